//! Unit address resolution.

use crate::error::ContextError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::Ipv6Addr;

/// Answers "which address does this unit use" questions.
pub trait AddressResolver {
    /// Global IPv6 addresses of the unit, skipping anything in `exclude`.
    fn ipv6_addresses(&self, exclude: &[String]) -> Vec<String>;

    /// Address the unit advertises on the given relation binding.
    fn relation_ip(&self, binding: &str) -> Result<String, ContextError>;

    /// Public address of the unit, if known.
    fn public_address(&self) -> Option<String>;
}

/// Addresses captured at hook start time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    #[serde(default)]
    pub private_address: Option<String>,

    #[serde(default)]
    pub public_address: Option<String>,

    #[serde(default)]
    pub ipv6_addresses: Vec<String>,

    /// Per-binding address overrides, keyed by relation name
    #[serde(default)]
    pub bindings: BTreeMap<String, String>,
}

/// [`AddressResolver`] backed by a fixed [`NetworkConfig`].
#[derive(Debug, Clone, Default)]
pub struct StaticAddresses {
    config: NetworkConfig,
}

impl StaticAddresses {
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }
}

impl AddressResolver for StaticAddresses {
    fn ipv6_addresses(&self, exclude: &[String]) -> Vec<String> {
        self.config
            .ipv6_addresses
            .iter()
            .filter(|addr| is_global_ipv6(addr))
            .filter(|addr| !exclude.iter().any(|e| e == *addr))
            .cloned()
            .collect()
    }

    fn relation_ip(&self, binding: &str) -> Result<String, ContextError> {
        self.config
            .bindings
            .get(binding)
            .or(self.config.private_address.as_ref())
            .cloned()
            .ok_or_else(|| {
                ContextError::Network(format!("No address available for binding '{}'", binding))
            })
    }

    fn public_address(&self) -> Option<String> {
        self.config
            .public_address
            .clone()
            .or_else(|| self.config.private_address.clone())
    }
}

fn is_global_ipv6(addr: &str) -> bool {
    match addr.parse::<Ipv6Addr>() {
        Ok(ip) => {
            // fe80::/10 is link-local
            !ip.is_loopback() && !ip.is_unspecified() && (ip.segments()[0] & 0xffc0) != 0xfe80
        }
        Err(_) => false,
    }
}

/// Bracket an IPv6 literal for use in a URL; `None` for anything else.
pub fn format_ipv6_addr(host: &str) -> Option<String> {
    host.parse::<Ipv6Addr>().ok().map(|_| format!("[{}]", host))
}
