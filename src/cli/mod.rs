//! CLI command definitions and handlers

mod assess;
mod impact;
mod snapshot;

use anyhow::{Context, Result};
use archgraph::{load_config, ArchConfig};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

/// archgraph - architecture assessment and change-impact analysis
#[derive(Parser, Debug)]
#[command(name = "archgraph")]
#[command(
    version,
    about = "Architecture assessment and change-impact analysis over pre-parsed repository snapshots",
    after_help = "\
Examples:
  archgraph assess snapshot.json                    Text summary
  archgraph assess snapshot.json --format json      Full assessment as JSON
  archgraph impact snapshot.json --change cr.json   Blast radius of a change"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: archgraph.toml or .archgraphrc.json next to the snapshot)
    #[arg(long, global = true, env = "ARCHGRAPH_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect structural issues, recognize patterns and score the architecture
    Assess {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "json", value_parser = ["text", "json"])]
        format: String,
    },

    /// Project which modules a change request would affect
    Impact {
        /// Snapshot JSON file (must contain a dependencyGraph)
        snapshot: PathBuf,

        /// Change request JSON file
        #[arg(long, short = 'c')]
        change: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "json", value_parser = ["text", "json"])]
        format: String,
    },
}

/// Explicit `--config` wins; otherwise search next to the snapshot
fn resolve_config(explicit: Option<&Path>, snapshot: &Path) -> Result<ArchConfig> {
    if let Some(path) = explicit {
        debug!("Using config {}", path.display());
        return ArchConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }
    let dir = snapshot
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok(load_config(dir))
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Assess { snapshot, format } => {
            let config = resolve_config(cli.config.as_deref(), &snapshot)?;
            assess::run(&snapshot, &format, config)
        }
        Commands::Impact {
            snapshot,
            change,
            format,
        } => {
            let config = resolve_config(cli.config.as_deref(), &snapshot)?;
            impact::run(&snapshot, &change, &format, config)
        }
    }
}
