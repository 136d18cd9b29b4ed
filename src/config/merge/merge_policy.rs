//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources replace individual keys; tables are merged key by key, so a
/// workspace file only needs to carry the options it changes.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("host.root", "/")?
        .set_default("logging.level", "info")?
        .set_default("logging.output", "stderr")
}
