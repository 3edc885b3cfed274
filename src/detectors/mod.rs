//! Structural detectors
//!
//! This module provides the detector framework and the detectors that scan
//! parsed files and graphs for architecture issues.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     DetectorEngine                          │
//! │  - Registers detectors                                      │
//! │  - Skips detectors whose graph is missing                   │
//! │  - Runs the rest in parallel (rayon)                        │
//! │  - Collects and sorts issues                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Detector Trait                         │
//! │  - name(): Unique identifier                                │
//! │  - requires(): Graph the detector reads                     │
//! │  - detect(ctx): Run detection, return issues                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//! ┌──────────────────┐ ┌──────────────┐ ┌──────────────────┐
//! │ File-based       │ │ Dependency   │ │ Lineage          │
//! │ (GodClass,       │ │ graph        │ │ graph            │
//! │  ExcessExports,  │ │ (CircularDep,│ │ (LayerViolation) │
//! │  LargeFiles)     │ │  Coupling)   │ │                  │
//! └──────────────────┘ └──────────────┘ └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use archgraph::detectors::{AnalysisContext, DetectorEngine};
//!
//! let engine = DetectorEngine::with_defaults(&thresholds, &toggles);
//! let run = engine.run(&AnalysisContext::new(&files).with_dependency(&graph));
//! for issue in run.issues() {
//!     println!("{}: {}", issue.severity, issue.title);
//! }
//! ```

mod base;
mod engine;

mod circular_dependency;
mod excess_exports;
mod god_class;
mod large_files;
mod layer_violation;
mod tight_coupling;

pub use base::{
    AnalysisContext, DetectionSummary, Detector, DetectorResult, DetectorStatus,
    GraphRequirement,
};
pub use engine::{default_detectors, DetectionRun, DetectorEngine};

pub use circular_dependency::CircularDependencyDetector;
pub use excess_exports::{ExcessExportsDetector, MAX_EXPORTS_PER_FILE};
pub use god_class::{GodClassDetector, GOD_OBJECT_MAX_METHODS};
pub use large_files::{LargeFilesDetector, LARGE_FILE_MAX_LINES};
pub use layer_violation::LayerViolationDetector;
pub use tight_coupling::{TightCouplingDetector, TIGHT_COUPLING_MAX_IMPORTS};
