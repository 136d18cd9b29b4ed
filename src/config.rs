//! Configuration System
//!
//! Layered loading of the charm options and the host environment the generators
//! run against. Defaults, the global file and the workspace files are merged by
//! the `config` crate, in that order.

use crate::logging::LoggingConfig;
use crate::network::NetworkConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod charm;
mod facade;
mod merge;
mod sources;

pub use charm::{bool_from_string, CharmConfig, SUPPORTED_PROFILES};
pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Charm options as the operator set them
    #[serde(default)]
    pub charm: CharmConfig,

    /// Unit addresses and bindings
    #[serde(default)]
    pub network: NetworkConfig,

    /// Filesystem side effects
    #[serde(default)]
    pub host: HostConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where and how host side effects land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// Directory that absolute host paths are resolved under
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Command run after a CA certificate is installed; empty disables it
    #[serde(default = "default_trust_store_refresh")]
    pub trust_store_refresh: Vec<String>,
}

fn default_root() -> PathBuf {
    PathBuf::from("/")
}

fn default_trust_store_refresh() -> Vec<String> {
    vec![
        "update-ca-certificates".to_string(),
        "--fresh".to_string(),
    ]
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            trust_store_refresh: default_trust_store_refresh(),
        }
    }
}

impl HostConfig {
    /// Validate host configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.root.as_os_str().is_empty() {
            return Err("Host root cannot be empty".to_string());
        }
        if let Some(program) = self.trust_store_refresh.first() {
            if program.trim().is_empty() {
                return Err("Trust store refresh command cannot be blank".to_string());
            }
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Charm(String, String),
    Host(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Charm(option, msg) => write!(f, "Option '{}': {}", option, msg),
            ValidationError::Host(msg) => write!(f, "Host: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl EnvironmentConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (option, msg) in self.charm.validate() {
            errors.push(ValidationError::Charm(option.to_string(), msg));
        }

        if let Err(e) = self.host.validate() {
            errors.push(ValidationError::Host(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
