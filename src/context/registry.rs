//! Named lookup and bulk generation of every context.

use super::{
    ContextGenerator, DashboardSettingsContext, Environment, FederatedLoginContext,
    IdentityAuthContext, LoadBalancerContext, PluginSettingsContext, RouterUiContext,
    WebServerContext, WebServerSslContext,
};
use crate::error::ContextError;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Object-safe face of [`ContextGenerator`] for heterogeneous storage.
trait DynGenerator {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn generate_value(&self, env: &Environment<'_>) -> Result<Value, ContextError>;
}

impl<G: ContextGenerator> DynGenerator for G {
    fn name(&self) -> &'static str {
        ContextGenerator::name(self)
    }

    fn description(&self) -> &'static str {
        ContextGenerator::description(self)
    }

    fn generate_value(&self, env: &Environment<'_>) -> Result<Value, ContextError> {
        Ok(serde_json::to_value(self.generate(env)?)?)
    }
}

/// The dashboard's generators, in the order the charm renders them.
pub struct ContextRegistry {
    generators: Vec<Box<dyn DynGenerator>>,
}

impl Default for ContextRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextRegistry {
    pub fn new() -> Self {
        Self {
            generators: vec![
                Box::new(LoadBalancerContext),
                Box::new(IdentityAuthContext),
                Box::new(DashboardSettingsContext),
                Box::new(WebServerContext),
                Box::new(WebServerSslContext),
                Box::new(RouterUiContext),
                Box::new(PluginSettingsContext),
                Box::new(FederatedLoginContext),
            ],
        }
    }

    /// `(name, description)` of every generator.
    pub fn list(&self) -> Vec<(&'static str, &'static str)> {
        self.generators
            .iter()
            .map(|g| (g.name(), g.description()))
            .collect()
    }

    /// Generate one context by name.
    pub fn generate(&self, name: &str, env: &Environment<'_>) -> Result<Value, ContextError> {
        let generator = self
            .generators
            .iter()
            .find(|g| g.name() == name)
            .ok_or_else(|| ContextError::UnknownContext(name.to_string()))?;
        debug!(context = name, "Generating context");
        generator.generate_value(env)
    }

    /// Generate every context; the first failure aborts.
    pub fn generate_all(
        &self,
        env: &Environment<'_>,
    ) -> Result<BTreeMap<&'static str, Value>, ContextError> {
        let mut contexts = BTreeMap::new();
        for generator in &self.generators {
            debug!(context = generator.name(), "Generating context");
            contexts.insert(generator.name(), generator.generate_value(env)?);
        }
        Ok(contexts)
    }
}
