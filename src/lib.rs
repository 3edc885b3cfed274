//! archgraph - architecture assessment and change-impact analysis
//!
//! Consumes pre-parsed file records plus dependency and lineage graphs
//! and produces:
//! - an [`ArchitectureAssessment`]: structural issues, recognized patterns,
//!   anti-patterns and a 0-100 score
//! - an [`ImpactAnalysis`](impact::ImpactAnalysis): the consumers a
//!   proposed change would reach, breaking changes and a complexity estimate

pub mod assessment;
pub mod config;
pub mod detectors;
pub mod graph;
pub mod impact;
pub mod models;
pub mod patterns;
pub mod scoring;

pub use assessment::{ArchitectureAnalyzer, AssessmentInput};
pub use config::{load_config, ArchConfig};
pub use graph::{CodeGraph, DependencyGraph, GraphError, LineageGraph};
pub use impact::{ChangeRequest, ImpactAnalyzer, ImpactError};
pub use models::ArchitectureAssessment;
pub use patterns::recognize_patterns;
pub use scoring::ArchitectureScorer;
