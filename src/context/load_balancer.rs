//! haproxy peer list and front-end ports.
//!
//! haproxy runs on every dashboard unit, so a single unit still load balances
//! to itself.

use super::{ContextGenerator, Environment};
use crate::error::ContextError;
use crate::relation::{sanitize_unit_name, CLUSTER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Defaults file that gates the haproxy init script.
pub const HAPROXY_DEFAULTS: &str = "/etc/default/haproxy";

/// Front-end port and back-end port for each served listener.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicePorts {
    pub dash_insecure: [u16; 2],
    pub dash_secure: [u16; 2],
}

impl Default for ServicePorts {
    fn default() -> Self {
        Self {
            dash_insecure: [80, 70],
            dash_secure: [443, 433],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadBalancer {
    /// Sanitized unit name to address, local unit included
    pub units: BTreeMap<String, String>,
    pub service_ports: ServicePorts,
    pub prefer_ipv6: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LoadBalancerContext;

impl ContextGenerator for LoadBalancerContext {
    type Output = LoadBalancer;

    fn name(&self) -> &'static str {
        "haproxy"
    }

    fn description(&self) -> &'static str {
        "haproxy back-end units and service ports"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<LoadBalancer, ContextError> {
        let mut units = BTreeMap::new();

        let local_unit = sanitize_unit_name(env.relations.local_unit());
        let local_addr = if env.config.prefer_ipv6 {
            let excluded = env.config.vip_addresses();
            env.network
                .ipv6_addresses(&excluded)
                .into_iter()
                .next()
                .ok_or(ContextError::NoIpv6Address { excluded })?
        } else {
            env.network.relation_ip(CLUSTER)?
        };
        units.insert(local_unit, local_addr);

        for rid in env.relations.relation_ids(CLUSTER)? {
            for unit in env.relations.related_units(&rid)? {
                let data = env.relations.relation_get(&rid, &unit)?;
                match data.get("private-address").filter(|a| !a.is_empty()) {
                    Some(addr) => {
                        units.insert(sanitize_unit_name(&unit), addr.clone());
                    }
                    None => debug!(rid = %rid, unit = %unit, "Peer has not advertised an address"),
                }
            }
        }

        info!("Ensuring haproxy enabled in {}", HAPROXY_DEFAULTS);
        env.host
            .write_file(Path::new(HAPROXY_DEFAULTS), b"ENABLED=1\n")?;

        Ok(LoadBalancer {
            units,
            service_ports: ServicePorts::default(),
            prefer_ipv6: env.config.prefer_ipv6,
        })
    }
}
