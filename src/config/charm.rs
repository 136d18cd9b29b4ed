//! Charm options, named the way the operator sets them.

use crate::error::ContextError;
use serde::{Deserialize, Serialize};

/// Profiles that enable vendor-specific dashboard panels.
pub const SUPPORTED_PROFILES: &[&str] = &["cisco"];

/// Typed view of the charm's configuration store.
///
/// String options that the charm exposes as yes/no text stay strings here and
/// are parsed with [`bool_from_string`] where they are consumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CharmConfig {
    #[serde(default)]
    pub prefer_ipv6: bool,

    /// Virtual IP(s), whitespace separated
    #[serde(default)]
    pub vip: Option<String>,

    #[serde(default = "default_yes")]
    pub offline_compression: String,

    #[serde(default = "default_no")]
    pub debug: String,

    #[serde(default)]
    pub customization_module: Option<String>,

    #[serde(default = "default_role")]
    pub default_role: String,

    #[serde(default = "default_webroot")]
    pub webroot: String,

    #[serde(default = "default_yes")]
    pub ubuntu_theme: String,

    #[serde(default)]
    pub default_theme: Option<String>,

    #[serde(default)]
    pub custom_theme: bool,

    #[serde(default)]
    pub secret: Option<String>,

    #[serde(default)]
    pub profile: Option<String>,

    #[serde(default)]
    pub neutron_network_dvr: bool,

    #[serde(default)]
    pub neutron_network_l3ha: bool,

    #[serde(default)]
    pub neutron_network_lb: bool,

    #[serde(default)]
    pub neutron_network_firewall: bool,

    #[serde(default)]
    pub neutron_network_vpn: bool,

    #[serde(default)]
    pub cinder_backup: bool,

    #[serde(default)]
    pub allow_password_autocompletion: bool,

    #[serde(default)]
    pub password_retrieve: bool,

    #[serde(default)]
    pub default_domain: Option<String>,

    #[serde(default = "default_true")]
    pub default_create_volume: bool,

    #[serde(default)]
    pub image_formats: Option<String>,

    #[serde(default)]
    pub enforce_ssl: bool,

    #[serde(default)]
    pub hsts_max_age_seconds: u64,

    /// Comma separated endpoint types, primary first
    #[serde(default)]
    pub endpoint_type: Option<String>,

    /// Base64 encoded certificate
    #[serde(default)]
    pub ssl_cert: Option<String>,

    /// Base64 encoded private key
    #[serde(default)]
    pub ssl_key: Option<String>,

    /// Base64 encoded CA certificate
    #[serde(default)]
    pub ssl_ca: Option<String>,

    #[serde(default)]
    pub os_public_hostname: Option<String>,
}

fn default_yes() -> String {
    "yes".to_string()
}

fn default_no() -> String {
    "no".to_string()
}

fn default_role() -> String {
    "member".to_string()
}

fn default_webroot() -> String {
    "/horizon".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for CharmConfig {
    fn default() -> Self {
        Self {
            prefer_ipv6: false,
            vip: None,
            offline_compression: default_yes(),
            debug: default_no(),
            customization_module: None,
            default_role: default_role(),
            webroot: default_webroot(),
            ubuntu_theme: default_yes(),
            default_theme: None,
            custom_theme: false,
            secret: None,
            profile: None,
            neutron_network_dvr: false,
            neutron_network_l3ha: false,
            neutron_network_lb: false,
            neutron_network_firewall: false,
            neutron_network_vpn: false,
            cinder_backup: false,
            allow_password_autocompletion: false,
            password_retrieve: false,
            default_domain: None,
            default_create_volume: true,
            image_formats: None,
            enforce_ssl: false,
            hsts_max_age_seconds: 0,
            endpoint_type: None,
            ssl_cert: None,
            ssl_key: None,
            ssl_ca: None,
            os_public_hostname: None,
        }
    }
}

/// Treats an empty option the same as an unset one.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl CharmConfig {
    pub fn default_domain(&self) -> Option<&str> {
        non_empty(&self.default_domain)
    }

    pub fn profile(&self) -> Option<&str> {
        non_empty(&self.profile)
    }

    /// True when the configured profile enables vendor panels.
    pub fn has_supported_profile(&self) -> bool {
        self.profile()
            .map(|p| SUPPORTED_PROFILES.contains(&p))
            .unwrap_or(false)
    }

    /// Addresses that must never be picked as the unit's own address.
    pub fn vip_addresses(&self) -> Vec<String> {
        non_empty(&self.vip)
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Returns `(option, message)` for every option that cannot be interpreted.
    pub fn validate(&self) -> Vec<(&'static str, String)> {
        let mut errors = Vec::new();
        for (option, value) in [
            ("offline-compression", &self.offline_compression),
            ("debug", &self.debug),
            ("ubuntu-theme", &self.ubuntu_theme),
        ] {
            if let Err(e) = bool_from_string(value) {
                errors.push((option, e.to_string()));
            }
        }
        errors
    }
}

/// Interpret a yes/no style string option.
pub fn bool_from_string(value: &str) -> Result<bool, ContextError> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "t" | "on" => Ok(true),
        "n" | "no" | "false" | "f" | "off" => Ok(false),
        _ => Err(ContextError::Config(format!(
            "Unable to interpret string value '{}' as boolean",
            value
        ))),
    }
}
