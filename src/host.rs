//! Filesystem side effects.
//!
//! Generators only touch the host through [`HostFs`]. Paths are given as they
//! appear on a deployed unit (`/etc/...`); [`LocalHost`] resolves them under a
//! configurable root.

use crate::config::HostConfig;
use crate::error::ContextError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Where installed CA certificates are picked up by the trust store refresh.
pub const CA_CERT_PATH: &str = "/usr/local/share/ca-certificates/dashboard_juju_ca_cert.crt";

/// Host filesystem port.
pub trait HostFs {
    /// Replace a file with world-readable contents.
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), ContextError>;

    /// Replace a file with owner-only contents.
    ///
    /// The contents are never visible under a wider mode, not even partially.
    fn write_private_file(&self, path: &Path, contents: &[u8]) -> Result<(), ContextError>;

    fn exists(&self, path: &Path) -> bool;

    /// Add a PEM CA certificate to the system trust store.
    fn install_ca_cert(&self, cert: &[u8]) -> Result<(), ContextError>;
}

/// [`HostFs`] on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalHost {
    root: PathBuf,
    trust_store_refresh: Vec<String>,
}

impl LocalHost {
    pub fn new(config: &HostConfig) -> Self {
        Self {
            root: config.root.clone(),
            trust_store_refresh: config.trust_store_refresh.clone(),
        }
    }

    /// Host rooted at `root` that never runs external commands.
    pub fn rooted(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            trust_store_refresh: Vec::new(),
        }
    }

    /// Map a unit path onto the configured root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path.strip_prefix("/").unwrap_or(path))
    }

    #[cfg(test)]
    pub(crate) fn read_to_string(&self, path: &Path) -> Result<String, ContextError> {
        let target = self.resolve(path);
        fs::read_to_string(&target).map_err(|e| host_error(&target, e))
    }

    fn ensure_parent(&self, path: &Path) -> Result<(), ContextError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| host_error(parent, e))?;
        }
        Ok(())
    }

    fn refresh_trust_store(&self) -> Result<(), ContextError> {
        let Some((program, args)) = self.trust_store_refresh.split_first() else {
            return Ok(());
        };
        debug!(program = %program, "Refreshing trust store");
        let status = Command::new(program)
            .args(args)
            .status()
            .map_err(|e| host_error(Path::new(program), e))?;
        if !status.success() {
            return Err(ContextError::Host {
                path: PathBuf::from(program),
                message: format!("trust store refresh exited with {}", status),
            });
        }
        Ok(())
    }
}

fn host_error(path: &Path, err: std::io::Error) -> ContextError {
    ContextError::Host {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<(), ContextError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|e| host_error(path, e))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<(), ContextError> {
    Ok(())
}

#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl HostFs for LocalHost {
    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), ContextError> {
        let target = self.resolve(path);
        self.ensure_parent(&target)?;
        fs::write(&target, contents).map_err(|e| host_error(&target, e))?;
        set_mode(&target, 0o644)
    }

    fn write_private_file(&self, path: &Path, contents: &[u8]) -> Result<(), ContextError> {
        let target = self.resolve(path);
        self.ensure_parent(&target)?;

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| ContextError::Host {
                path: target.clone(),
                message: "path has no file name".to_string(),
            })?;
        let staging = target.with_file_name(format!(".{}.tmp", file_name));

        let mut file = open_private(&staging).map_err(|e| host_error(&staging, e))?;
        // A stale staging file keeps its old mode when reopened
        set_mode(&staging, 0o600)?;
        file.write_all(contents)
            .and_then(|_| file.sync_all())
            .map_err(|e| host_error(&staging, e))?;
        drop(file);

        fs::rename(&staging, &target).map_err(|e| host_error(&target, e))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn install_ca_cert(&self, cert: &[u8]) -> Result<(), ContextError> {
        let path = Path::new(CA_CERT_PATH);
        let target = self.resolve(path);
        if let Ok(existing) = fs::read(&target) {
            if existing == cert {
                debug!(path = %target.display(), "CA certificate already installed");
                return Ok(());
            }
        }
        info!(path = %target.display(), "Installing CA certificate");
        self.write_file(path, cert)?;
        if let Err(e) = self.refresh_trust_store() {
            // An installed file must imply a refreshed trust store
            if let Err(remove_err) = fs::remove_file(&target) {
                warn!(path = %target.display(), error = %remove_err, "Failed to remove CA certificate");
            }
            return Err(e);
        }
        Ok(())
    }
}
