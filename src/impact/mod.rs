//! Change impact analysis
//!
//! Given a [`ChangeRequest`] and a dependency graph, computes which modules
//! consume the changed files (directly or transitively), how deep the
//! dependency chains run, which consumers a breaking change would hit and
//! a rough complexity estimate.
//!
//! # Example
//!
//! ```ignore
//! use archgraph::impact::{ChangeRequest, ChangeType, ImpactAnalyzer, ImpactPolicy};
//!
//! let analyzer = ImpactAnalyzer::new("my-repo", &graph, ImpactPolicy::default());
//! let request = ChangeRequest::new("cr-42", ChangeType::Remove, &["src/legacy.ts"]);
//! let analysis = analyzer.analyze(&request)?;
//! println!("{} files affected", analysis.summary.total_affected_files);
//! ```

mod analyzer;
mod models;
mod policy;

pub use analyzer::{normalize_path, ImpactAnalyzer, ImpactError};
pub use models::{
    AffectedNode, BreakingChange, ChangeRequest, ChangeType, Complexity, DependencyChain,
    ImpactAnalysis, ImpactLevel, ImpactSummary,
};
pub use policy::{ComplexityPolicy, ImpactPolicy};
