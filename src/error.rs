//! Error types for the dashboard context generators.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a template context.
///
/// Missing optional data never produces one of these; generators omit the
/// corresponding field instead.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Endpoint type specified {0} is not a valid endpoint type")]
    InvalidEndpointType(String),

    #[error("No IPv6 address found outside excluded addresses {excluded:?}")]
    NoIpv6Address { excluded: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Relation error: {0}")]
    Relation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unknown context: {0}")]
    UnknownContext(String),

    #[error("Host operation failed on {path}: {message}")]
    Host { path: PathBuf, message: String },

    #[error("Invalid base64 material: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ContextError {
    fn from(err: config::ConfigError) -> Self {
        ContextError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for ContextError {
    fn from(err: toml::de::Error) -> Self {
        ContextError::Config(err.to_string())
    }
}
