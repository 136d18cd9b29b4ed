//! Identity service endpoint, regions and endpoint-type selection.

use super::{ContextGenerator, Environment};
use crate::error::ContextError;
use crate::network::format_ipv6_addr;
use crate::relation::{RelationData, IDENTITY_SERVICE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info};

/// Catalog visibility class of an identity endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndpointType {
    #[serde(rename = "publicURL")]
    Public,
    #[serde(rename = "internalURL")]
    Internal,
    #[serde(rename = "adminURL")]
    Admin,
}

impl EndpointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::Public => "publicURL",
            EndpointType::Internal => "internalURL",
            EndpointType::Admin => "adminURL",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointType {
    type Err = ContextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PUBLICURL" => Ok(EndpointType::Public),
            "INTERNALURL" => Ok(EndpointType::Internal),
            "ADMINURL" => Ok(EndpointType::Admin),
            _ => Err(ContextError::InvalidEndpointType(s.to_string())),
        }
    }
}

/// Normalize a user supplied endpoint type, e.g. `INTERNALURL` → `internalURL`.
pub fn normalize_endpoint_type(endpoint_type: &str) -> Result<EndpointType, ContextError> {
    endpoint_type.parse().map_err(|e| {
        error!("{}", e);
        e
    })
}

/// Where the dashboard reaches the identity API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    pub service_port: String,
    pub service_host: String,
    pub service_protocol: String,
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_domain_id: Option<String>,
}

impl ServiceEndpoint {
    /// Build from one unit's data; `None` unless every required field is set.
    ///
    /// `require_admin_domain` applies to v3 only.
    fn from_relation(data: &RelationData, require_admin_domain: bool) -> Option<Self> {
        let field = |key: &str| data.get(key).filter(|v| !v.is_empty()).cloned();

        let service_host = field("service_host")
            .map(|host| format_ipv6_addr(&host).unwrap_or(host));
        let service_protocol = field("service_protocol").unwrap_or_else(|| "http".to_string());
        let api_version = data
            .get("api_version")
            .cloned()
            .unwrap_or_else(|| "2".to_string());

        let admin_domain_id = if api_version == "3" && require_admin_domain {
            Some(field("admin_domain_id")?)
        } else {
            None
        };
        if api_version.is_empty() {
            return None;
        }

        Some(Self {
            service_port: field("service_port")?,
            service_host: service_host?,
            service_protocol,
            api_version,
            admin_domain_id,
        })
    }

    /// Legacy v2.0 URL advertised per region.
    pub fn v2_url(&self) -> String {
        format!(
            "{}://{}:{}/v2.0",
            self.service_protocol, self.service_host, self.service_port
        )
    }
}

/// One selectable region in the login form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Region {
    pub endpoint: String,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityAuth {
    /// First complete endpoint seen; later ones never replace it
    #[serde(flatten)]
    pub service: Option<ServiceEndpoint>,

    /// Only present when more than one (endpoint, region) pair exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<Region>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_endpoint: Option<EndpointType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_endpoint: Option<EndpointType>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityAuthContext;

impl ContextGenerator for IdentityAuthContext {
    type Output = IdentityAuth;

    fn name(&self) -> &'static str {
        "identity_service"
    }

    fn description(&self) -> &'static str {
        "identity endpoint, regions and endpoint types"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<IdentityAuth, ContextError> {
        info!("Generating template context for {}", IDENTITY_SERVICE);

        let require_admin_domain = env.config.default_domain().is_none();
        let mut ctxt = IdentityAuth::default();
        let mut regions = BTreeSet::new();

        for rid in env.relations.relation_ids(IDENTITY_SERVICE)? {
            for unit in env.relations.related_units(&rid)? {
                let data = env.relations.relation_get(&rid, &unit)?;
                let Some(endpoint) = ServiceEndpoint::from_relation(&data, require_admin_domain)
                else {
                    debug!(rid = %rid, unit = %unit, "Identity data incomplete, skipping");
                    continue;
                };

                if let Some(region) = data.get("region") {
                    let url = endpoint.v2_url();
                    for name in region.split_whitespace() {
                        regions.insert(Region {
                            endpoint: url.clone(),
                            title: name.to_string(),
                        });
                    }
                }

                if ctxt.service.is_none() {
                    ctxt.service = Some(endpoint);
                }
            }
        }

        if regions.len() > 1 {
            ctxt.regions = Some(regions.into_iter().collect());
        }

        if let Some(ep_types) = env.config.endpoint_type.as_deref().filter(|v| !v.is_empty()) {
            let ep_types = ep_types
                .split(',')
                .map(normalize_endpoint_type)
                .collect::<Result<Vec<_>, _>>()?;
            ctxt.primary_endpoint = ep_types.first().copied();
            ctxt.secondary_endpoint = ep_types.get(1).copied();
        }

        Ok(ctxt)
    }
}
