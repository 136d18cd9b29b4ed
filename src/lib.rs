//! Dashboard Contexts: template context generators for the web dashboard charm
//!
//! Each generator reads charm configuration and relation state through injected
//! ports and produces one record that the charm's template renderer consumes.

pub mod certs;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod host;
pub mod logging;
pub mod network;
pub mod relation;
