//! Project-level configuration support
//!
//! Loads per-project configuration from `archgraph.toml` or
//! `.archgraphrc.json` in the repository root. Every field has a default,
//! so a partial file only overrides what it names.
//!
//! # Configuration Format
//!
//! ```toml
//! # archgraph.toml
//!
//! [thresholds]
//! god_object_methods = 25
//! large_file_lines = 1500
//!
//! [patterns]
//! repository = ["repository", "repo", "dao"]
//!
//! [scoring.issue_weights]
//! high = 12
//!
//! [impact]
//! max_depth = 50
//! complexity = { high_files = 20 }
//!
//! [detectors]
//! disabled = ["large-file"]
//! ```

use crate::detectors::{
    GOD_OBJECT_MAX_METHODS, LARGE_FILE_MAX_LINES, MAX_EXPORTS_PER_FILE,
    TIGHT_COUPLING_MAX_IMPORTS,
};
use crate::impact::ImpactPolicy;
use crate::patterns::PatternKeywords;
use crate::scoring::ScoringConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file names searched by [`load_config`], in order
pub const CONFIG_FILE_NAMES: &[&str] = &["archgraph.toml", ".archgraphrc.json"];

/// Errors from reading an explicit config file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported config format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),
}

/// Top-level archgraph configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchConfig {
    #[serde(default)]
    pub thresholds: DetectorThresholds,

    #[serde(default)]
    pub patterns: PatternKeywords,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub impact: ImpactPolicy,

    #[serde(default)]
    pub detectors: DetectorToggles,
}

/// Structural detector thresholds; an item is flagged when it strictly
/// exceeds its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorThresholds {
    #[serde(default = "default_god_object_methods")]
    pub god_object_methods: usize,

    #[serde(default = "default_max_exports")]
    pub max_exports: usize,

    #[serde(default = "default_large_file_lines")]
    pub large_file_lines: usize,

    #[serde(default = "default_tight_coupling_imports")]
    pub tight_coupling_imports: usize,
}

fn default_god_object_methods() -> usize {
    GOD_OBJECT_MAX_METHODS
}
fn default_max_exports() -> usize {
    MAX_EXPORTS_PER_FILE
}
fn default_large_file_lines() -> usize {
    LARGE_FILE_MAX_LINES
}
fn default_tight_coupling_imports() -> usize {
    TIGHT_COUPLING_MAX_IMPORTS
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            god_object_methods: default_god_object_methods(),
            max_exports: default_max_exports(),
            large_file_lines: default_large_file_lines(),
            tight_coupling_imports: default_tight_coupling_imports(),
        }
    }
}

/// Detector enable/disable switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorToggles {
    /// Detector names to skip (e.g. "tight-coupling")
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl DetectorToggles {
    pub fn is_enabled(&self, name: &str) -> bool {
        !self
            .disabled
            .iter()
            .any(|d| d.trim().eq_ignore_ascii_case(name))
    }
}

impl ArchConfig {
    /// Load configuration from an explicit `.toml` or `.json` file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            Some("json") => serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Load project configuration from the repository root.
///
/// Searches `archgraph.toml` then `.archgraphrc.json`. A file that fails
/// to parse is logged and skipped; defaults are returned when nothing
/// usable is found.
pub fn load_config(repo_path: &Path) -> ArchConfig {
    for name in CONFIG_FILE_NAMES {
        let path = repo_path.join(name);
        if !path.exists() {
            continue;
        }
        match ArchConfig::from_file(&path) {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("{}, using defaults", e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ArchConfig::default()
}
