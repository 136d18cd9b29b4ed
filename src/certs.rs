//! SSL material lookup.
//!
//! Material is base64 text. Operator configuration wins; otherwise the identity
//! service may hand out a certificate for the unit's public name.

use crate::config::CharmConfig;
use crate::error::ContextError;
use crate::network::AddressResolver;
use crate::relation::{RelationStore, IDENTITY_SERVICE};
use base64::engine::general_purpose::STANDARD as Base64;
use base64::Engine;
use tracing::debug;

/// Certificate and key as found, both still base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CertPair {
    pub cert: Option<String>,
    pub key: Option<String>,
}

impl CertPair {
    /// Both halves are present.
    pub fn is_complete(&self) -> bool {
        self.cert.is_some() && self.key.is_some()
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// Resolve the certificate/key pair.
///
/// Both values come from the same source: configuration, a name-specific pair
/// on the identity relation, or the generic pair on it.
pub fn get_cert(
    config: &CharmConfig,
    relations: &dyn RelationStore,
    network: &dyn AddressResolver,
) -> Result<CertPair, ContextError> {
    let configured = CertPair {
        cert: non_empty(config.ssl_cert.as_ref()),
        key: non_empty(config.ssl_key.as_ref()),
    };
    if configured.is_complete() {
        return Ok(configured);
    }

    let cn = config
        .os_public_hostname
        .clone()
        .filter(|h| !h.is_empty())
        .or_else(|| network.public_address());

    for rid in relations.relation_ids(IDENTITY_SERVICE)? {
        for unit in relations.related_units(&rid)? {
            let data = relations.relation_get(&rid, &unit)?;
            if let Some(cn) = &cn {
                let named = CertPair {
                    cert: non_empty(data.get(&format!("ssl_cert_{}", cn))),
                    key: non_empty(data.get(&format!("ssl_key_{}", cn))),
                };
                if named.is_complete() {
                    debug!(rid = %rid, unit = %unit, cn = %cn, "Using certificate issued for public name");
                    return Ok(named);
                }
            }
            let generic = CertPair {
                cert: non_empty(data.get("ssl_cert")),
                key: non_empty(data.get("ssl_key")),
            };
            if generic.is_complete() {
                debug!(rid = %rid, unit = %unit, "Using certificate from identity relation");
                return Ok(generic);
            }
        }
    }

    Ok(configured)
}

/// Resolve the CA certificate, still base64 encoded.
pub fn get_ca_cert(
    config: &CharmConfig,
    relations: &dyn RelationStore,
) -> Result<Option<String>, ContextError> {
    if let Some(ca) = non_empty(config.ssl_ca.as_ref()) {
        return Ok(Some(ca));
    }
    for rid in relations.relation_ids(IDENTITY_SERVICE)? {
        for unit in relations.related_units(&rid)? {
            let data = relations.relation_get(&rid, &unit)?;
            if let Some(ca) = non_empty(data.get("ca_cert")) {
                return Ok(Some(ca));
            }
        }
    }
    Ok(None)
}

/// Decode base64 material, tolerating embedded line breaks.
pub fn decode(material: &str) -> Result<Vec<u8>, ContextError> {
    let compact: String = material.split_whitespace().collect();
    Ok(Base64.decode(compact)?)
}
