//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::presentation::{format_context_list, format_json};
use crate::config::{ConfigLoader, EnvironmentConfig};
use crate::context::{ContextRegistry, Environment};
use crate::error::ContextError;
use crate::host::LocalHost;
use crate::network::StaticAddresses;
use crate::relation::RelationSnapshot;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Unit name the deployment agent exports to hook processes.
const UNIT_NAME_ENV: &str = "JUJU_UNIT_NAME";

/// Runtime context for CLI execution: configuration, relation state and host.
pub struct RunContext {
    config: EnvironmentConfig,
    relations: RelationSnapshot,
    network: StaticAddresses,
    host: LocalHost,
    registry: ContextRegistry,
}

impl RunContext {
    /// Load configuration and relation state for a workspace.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        relations_path: Option<PathBuf>,
        root_override: Option<PathBuf>,
    ) -> Result<Self, ContextError> {
        let mut config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        if let Some(root) = root_override {
            config.host.root = root;
        }

        let relations = load_relations(&workspace_root, relations_path.as_deref())?;
        debug!(
            unit = %relations.local_unit,
            relations = relations.relations.len(),
            "Relation state loaded"
        );

        Ok(Self {
            network: StaticAddresses::new(config.network.clone()),
            host: LocalHost::new(&config.host),
            registry: ContextRegistry::new(),
            config,
            relations,
        })
    }

    pub fn config(&self) -> &EnvironmentConfig {
        &self.config
    }

    fn env(&self) -> Environment<'_> {
        Environment {
            config: &self.config.charm,
            relations: &self.relations,
            network: &self.network,
            host: &self.host,
        }
    }

    /// Execute a command and return its stdout text.
    pub fn execute(&self, command: &Commands) -> Result<String, ContextError> {
        match command {
            Commands::Render { name } => {
                let value = self.registry.generate(name, &self.env())?;
                info!(context = %name, "Context rendered");
                format_json(&value)
            }
            Commands::RenderAll => {
                let contexts = self.registry.generate_all(&self.env())?;
                info!(count = contexts.len(), "Contexts rendered");
                format_json(&contexts)
            }
            Commands::List => Ok(format_context_list(&self.registry.list())),
            Commands::Validate => self.validate(),
        }
    }

    fn validate(&self) -> Result<String, ContextError> {
        self.config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ContextError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok("Configuration is valid".to_string())
    }
}

fn load_relations(
    workspace_root: &Path,
    explicit: Option<&Path>,
) -> Result<RelationSnapshot, ContextError> {
    let mut snapshot = match explicit {
        Some(path) => RelationSnapshot::load(path)?,
        None => {
            let default_path = workspace_root.join("relations.toml");
            if default_path.exists() {
                RelationSnapshot::load(&default_path)?
            } else {
                debug!("No relation snapshot, running without relations");
                RelationSnapshot::default()
            }
        }
    };

    if snapshot.local_unit.is_empty() {
        snapshot.local_unit = std::env::var(UNIT_NAME_ENV).map_err(|_| {
            ContextError::Config(format!(
                "Local unit unknown: set local-unit in the relation snapshot or {}",
                UNIT_NAME_ENV
            ))
        })?;
    }
    Ok(snapshot)
}
