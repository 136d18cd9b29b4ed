//! CLI parse: clap types for dashboard-contexts. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dashboard-contexts - template contexts for the web dashboard charm
#[derive(Parser)]
#[command(name = "dashboard-contexts")]
#[command(about = "Generate template contexts for the web dashboard charm")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace directory holding config/ and relations.toml
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides layered config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Relation snapshot (TOML or JSON); defaults to <workspace>/relations.toml
    #[arg(long)]
    pub relations: Option<PathBuf>,

    /// Directory host paths are written under (overrides host.root)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render one context as JSON
    Render {
        /// Context name (see `list`)
        name: String,
    },
    /// Render every context as one JSON object keyed by name
    RenderAll,
    /// List available contexts
    List,
    /// Validate configuration without rendering
    Validate,
}
