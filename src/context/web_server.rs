//! apache ports, SSL redirect and certificate material.

use super::{ContextGenerator, Environment};
use crate::certs::{decode, get_ca_cert, get_cert};
use crate::error::ContextError;
use crate::relation::CERTIFICATES;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Where locally issued material is written.
pub const LOCAL_CERT_FILE: &str = "/etc/ssl/certs/dashboard.cert";
pub const LOCAL_KEY_FILE: &str = "/etc/ssl/private/dashboard.key";

/// Where material from the `certificates` relation is installed.
pub const EXTERNAL_CERT_FILE: &str = "/etc/apache2/ssl/horizon/cert_dashboard";
pub const EXTERNAL_KEY_FILE: &str = "/etc/apache2/ssl/horizon/key_dashboard";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebServer {
    pub http_port: u16,
    pub https_port: u16,
    pub enforce_ssl: bool,
    pub hsts_max_age_seconds: u64,
    pub custom_theme: bool,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WebServerContext;

impl ContextGenerator for WebServerContext {
    type Output = WebServer;

    fn name(&self) -> &'static str {
        "apache"
    }

    fn description(&self) -> &'static str {
        "apache ports and SSL redirect"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<WebServer, ContextError> {
        let mut ctxt = WebServer {
            http_port: 70,
            https_port: 433,
            enforce_ssl: false,
            hsts_max_age_seconds: env.config.hsts_max_age_seconds,
            custom_theme: env.config.custom_theme,
        };

        if env.config.enforce_ssl {
            if get_cert(env.config, env.relations, env.network)?.is_complete() {
                ctxt.enforce_ssl = true;
            } else {
                warn!("Enforce ssl redirect requested but ssl not configured - skipping redirect");
            }
        }

        Ok(ctxt)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebServerSsl {
    pub ssl_configured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<String>,
}

impl WebServerSsl {
    fn configured(cert: &str, key: &str) -> Self {
        Self {
            ssl_configured: true,
            ssl_cert: Some(cert.to_string()),
            ssl_key: Some(key.to_string()),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct WebServerSslContext;

impl WebServerSslContext {
    /// Install the local CA and write the certificate/key pair, if available.
    fn from_local_authority(&self, env: &Environment<'_>) -> Result<WebServerSsl, ContextError> {
        let Some(ca_cert) = get_ca_cert(env.config, env.relations)? else {
            debug!("No CA certificate available, SSL not configured");
            return Ok(WebServerSsl::default());
        };
        env.host.install_ca_cert(&decode(&ca_cert)?)?;

        let pair = get_cert(env.config, env.relations, env.network)?;
        let (Some(cert), Some(key)) = (pair.cert, pair.key) else {
            debug!("Certificate or key missing, SSL not configured");
            return Ok(WebServerSsl::default());
        };
        // Decode both before writing either
        let cert = decode(&cert)?;
        let key = decode(&key)?;

        info!(cert = LOCAL_CERT_FILE, key = LOCAL_KEY_FILE, "Writing SSL material");
        env.host.write_file(Path::new(LOCAL_CERT_FILE), &cert)?;
        env.host.write_private_file(Path::new(LOCAL_KEY_FILE), &key)?;

        Ok(WebServerSsl::configured(LOCAL_CERT_FILE, LOCAL_KEY_FILE))
    }

    /// Material managed by the certificates relation is already on disk, or not.
    fn from_external_authority(&self, env: &Environment<'_>) -> WebServerSsl {
        if env.host.exists(Path::new(EXTERNAL_CERT_FILE))
            && env.host.exists(Path::new(EXTERNAL_KEY_FILE))
        {
            WebServerSsl::configured(EXTERNAL_CERT_FILE, EXTERNAL_KEY_FILE)
        } else {
            debug!("Waiting for certificates relation to provide SSL material");
            WebServerSsl::default()
        }
    }
}

impl ContextGenerator for WebServerSslContext {
    type Output = WebServerSsl;

    fn name(&self) -> &'static str {
        "apache_ssl"
    }

    fn description(&self) -> &'static str {
        "apache SSL certificate and key paths"
    }

    fn generate(&self, env: &Environment<'_>) -> Result<WebServerSsl, ContextError> {
        let mut use_local_ca = true;
        for rid in env.relations.relation_ids(CERTIFICATES)? {
            if !env.relations.related_units(&rid)?.is_empty() {
                use_local_ca = false;
            }
        }

        if use_local_ca {
            self.from_local_authority(env)
        } else {
            Ok(self.from_external_authority(env))
        }
    }
}
