//! Config loader facade over the layered sources.

use super::merge::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::EnvironmentConfig;
use crate::error::ContextError;
use config::File;
use std::path::Path;
use tracing::debug;

/// Loads [`EnvironmentConfig`] from defaults, the global file and the workspace.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with full precedence: defaults, global file, workspace files.
    pub fn load(workspace_root: &Path) -> Result<EnvironmentConfig, ContextError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;

        let config: EnvironmentConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Loaded layered configuration");
        Ok(config)
    }

    /// Load a single explicit file on top of the defaults.
    pub fn load_from_file(path: &Path) -> Result<EnvironmentConfig, ContextError> {
        let config: EnvironmentConfig = builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        debug!(config_path = %path.display(), "Loaded configuration file");
        Ok(config)
    }
}
