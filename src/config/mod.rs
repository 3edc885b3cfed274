//! Configuration module for archgraph
//!
//! This module handles:
//! - Project-level configuration (archgraph.toml / .archgraphrc.json)
//! - Detector threshold overrides
//! - Pattern keyword tables
//! - Scoring weights and impact policy

mod project_config;

pub use project_config::{
    load_config, ArchConfig, ConfigError, DetectorThresholds, DetectorToggles,
    CONFIG_FILE_NAMES,
};
