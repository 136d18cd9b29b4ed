//! WebSSO identity providers published over the federation relation.

use super::{ContextGenerator, Environment};
use crate::error::ContextError;
use crate::relation::{first_unit_data, RelationData, WEBSSO_FID_SERVICE_PROVIDER};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys a service provider must publish, each JSON encoded.
pub const WEBSSO_KEYS: [&str; 3] = ["protocol-name", "idp-name", "user-facing-name"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FederationProvider {
    pub protocol_name: Value,
    pub idp_name: Value,
    pub user_facing_name: Value,
}

impl FederationProvider {
    /// `None` unless all three keys are present.
    fn from_relation(data: &RelationData) -> Result<Option<Self>, ContextError> {
        let [protocol, idp, name] = WEBSSO_KEYS.map(|key| data.get(key));
        let (Some(protocol), Some(idp), Some(name)) = (protocol, idp, name) else {
            return Ok(None);
        };
        Ok(Some(Self {
            protocol_name: serde_json::from_str(protocol)?,
            idp_name: serde_json::from_str(idp)?,
            user_facing_name: serde_json::from_str(name)?,
        }))
    }
}

/// `websso_data` is omitted entirely when no provider is ready.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FederatedLogin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub websso_data: Option<Vec<FederationProvider>>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FederatedLoginContext;

impl ContextGenerator for FederatedLoginContext {
    type Output = FederatedLogin;

    fn name(&self) -> &'static str {
        "websso"
    }

    fn description(&self) -> &'static str {
        "federated identity providers for WebSSO login"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<FederatedLogin, ContextError> {
        let mut providers = Vec::new();
        for (_, data) in first_unit_data(env.relations, WEBSSO_FID_SERVICE_PROVIDER)? {
            if let Some(provider) = FederationProvider::from_relation(&data)? {
                providers.push(provider);
            }
        }

        Ok(FederatedLogin {
            websso_data: (!providers.is_empty()).then_some(providers),
        })
    }
}
