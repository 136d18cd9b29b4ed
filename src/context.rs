//! Context generators.
//!
//! Each generator turns the current configuration and relation state into one
//! record for the template renderer. Generators share nothing and can run in
//! any order.

use crate::config::CharmConfig;
use crate::error::ContextError;
use crate::host::HostFs;
use crate::network::AddressResolver;
use crate::relation::RelationStore;
use serde::Serialize;

pub mod dashboard;
pub mod federation;
pub mod identity;
pub mod load_balancer;
pub mod plugin_settings;
pub mod registry;
pub mod router;
pub mod web_server;

pub use dashboard::{DashboardSettings, DashboardSettingsContext};
pub use federation::{FederatedLogin, FederatedLoginContext, FederationProvider};
pub use identity::{
    normalize_endpoint_type, EndpointType, IdentityAuth, IdentityAuthContext, Region,
    ServiceEndpoint,
};
pub use load_balancer::{LoadBalancer, LoadBalancerContext, ServicePorts};
pub use plugin_settings::{PluginSettings, PluginSettingsContext};
pub use registry::ContextRegistry;
pub use router::{RouterUi, RouterUiContext};
pub use web_server::{WebServer, WebServerContext, WebServerSsl, WebServerSslContext};

/// Everything a generator may read or touch.
#[derive(Clone, Copy)]
pub struct Environment<'a> {
    pub config: &'a CharmConfig,
    pub relations: &'a dyn RelationStore,
    pub network: &'a dyn AddressResolver,
    pub host: &'a dyn HostFs,
}

/// Produces one template context.
pub trait ContextGenerator {
    type Output: Serialize;

    /// Name the renderer knows this context by.
    fn name(&self) -> &'static str;

    /// One-line summary for listings.
    fn description(&self) -> &'static str;

    fn generate(&self, env: &Environment<'_>) -> Result<Self::Output, ContextError>;
}
