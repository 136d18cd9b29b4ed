//! Dashboard settings flattened from charm options.

use super::{ContextGenerator, Environment};
use crate::config::bool_from_string;
use crate::error::ContextError;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Characters a generated password is drawn from: alphanumerics minus the
/// easily confused ones.
const PASSWORD_ALPHABET: &[u8] = b"23456789BCFGHJKLMNPRSTVWXYZbcdfghjkmnpqrstwxyz";

/// Generate a random password of 35 to 44 characters.
pub fn generate_password<R: Rng>(rng: &mut R) -> String {
    let length = rng.random_range(35..45);
    (0..length)
        .filter_map(|_| PASSWORD_ALPHABET.choose(&mut *rng).map(|&c| c as char))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub compress_offline: bool,
    pub debug: bool,
    pub customization_module: Option<String>,
    pub default_role: String,
    pub webroot: String,
    pub ubuntu_theme: bool,
    pub default_theme: Option<String>,
    pub custom_theme: bool,
    pub secret: String,
    pub support_profile: Option<String>,
    pub neutron_network_dvr: bool,
    pub neutron_network_l3ha: bool,
    pub neutron_network_lb: bool,
    pub neutron_network_firewall: bool,
    pub neutron_network_vpn: bool,
    pub cinder_backup: bool,
    pub allow_password_autocompletion: bool,
    pub password_retrieve: bool,
    pub default_domain: Option<String>,
    pub multi_domain: bool,
    pub default_create_volume: bool,
    pub image_formats: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DashboardSettingsContext;

impl ContextGenerator for DashboardSettingsContext {
    type Output = DashboardSettings;

    fn name(&self) -> &'static str {
        "horizon"
    }

    fn description(&self) -> &'static str {
        "dashboard local_settings options"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<DashboardSettings, ContextError> {
        let config = env.config;
        let secret = match config.secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret.to_string(),
            None => generate_password(&mut rand::rng()),
        };
        let webroot = if config.webroot.is_empty() {
            "/".to_string()
        } else {
            config.webroot.clone()
        };

        Ok(DashboardSettings {
            compress_offline: bool_from_string(&config.offline_compression)?,
            debug: bool_from_string(&config.debug)?,
            customization_module: config.customization_module.clone(),
            default_role: config.default_role.clone(),
            webroot,
            ubuntu_theme: bool_from_string(&config.ubuntu_theme)?,
            default_theme: config.default_theme.clone(),
            custom_theme: config.custom_theme,
            secret,
            support_profile: config
                .has_supported_profile()
                .then(|| config.profile().map(str::to_string))
                .flatten(),
            neutron_network_dvr: config.neutron_network_dvr,
            neutron_network_l3ha: config.neutron_network_l3ha,
            neutron_network_lb: config.neutron_network_lb,
            neutron_network_firewall: config.neutron_network_firewall,
            neutron_network_vpn: config.neutron_network_vpn,
            cinder_backup: config.cinder_backup,
            allow_password_autocompletion: config.allow_password_autocompletion,
            password_retrieve: config.password_retrieve,
            default_domain: config.default_domain.clone(),
            multi_domain: config.default_domain().is_none(),
            default_create_volume: config.default_create_volume,
            image_formats: config.image_formats.clone(),
        })
    }
}
