//! Base detector trait and types
//!
//! This module defines the core abstractions for structural detection:
//! - `Detector` trait that all detectors implement
//! - `AnalysisContext` bundling the inputs a detector may read
//! - `DetectorResult` for capturing execution results

use crate::graph::{DependencyGraph, LineageGraph};
use crate::models::{ArchitectureIssue, ParsedFile, Severity};
use anyhow::Result;
use std::collections::HashMap;

/// Inputs shared by every detector in one run
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub files: &'a [ParsedFile],
    pub dependency: Option<&'a DependencyGraph>,
    pub lineage: Option<&'a LineageGraph>,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(files: &'a [ParsedFile]) -> Self {
        Self {
            files,
            dependency: None,
            lineage: None,
        }
    }

    pub fn with_dependency(mut self, graph: &'a DependencyGraph) -> Self {
        self.dependency = Some(graph);
        self
    }

    pub fn with_lineage(mut self, graph: &'a LineageGraph) -> Self {
        self.lineage = Some(graph);
        self
    }

    /// Whether the graph a detector needs is present
    pub fn satisfies(&self, requirement: GraphRequirement) -> bool {
        match requirement {
            GraphRequirement::None => true,
            GraphRequirement::Dependency => self.dependency.is_some(),
            GraphRequirement::Lineage => self.lineage.is_some(),
        }
    }

    pub fn dependency_graph(&self) -> Result<&'a DependencyGraph> {
        self.dependency
            .ok_or_else(|| anyhow::anyhow!("dependency graph not provided"))
    }

    pub fn lineage_graph(&self) -> Result<&'a LineageGraph> {
        self.lineage
            .ok_or_else(|| anyhow::anyhow!("lineage graph not provided"))
    }
}

/// Which graph, if any, a detector reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphRequirement {
    None,
    Dependency,
    Lineage,
}

impl std::fmt::Display for GraphRequirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphRequirement::None => write!(f, "none"),
            GraphRequirement::Dependency => write!(f, "dependency graph"),
            GraphRequirement::Lineage => write!(f, "lineage graph"),
        }
    }
}

/// Outcome of running a single detector
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectorStatus {
    Succeeded,
    /// Required graph was absent
    Skipped(GraphRequirement),
    Failed(String),
}

/// Result from running a single detector
#[derive(Debug, Clone)]
pub struct DetectorResult {
    /// Name of the detector that produced these results
    pub detector_name: &'static str,
    /// Issues produced by the detector
    pub issues: Vec<ArchitectureIssue>,
    /// Execution time in milliseconds
    pub duration_ms: u64,
    pub status: DetectorStatus,
}

impl DetectorResult {
    /// Create a successful result
    pub fn success(
        detector_name: &'static str,
        issues: Vec<ArchitectureIssue>,
        duration_ms: u64,
    ) -> Self {
        Self {
            detector_name,
            issues,
            duration_ms,
            status: DetectorStatus::Succeeded,
        }
    }

    /// Create a failed result
    pub fn failure(detector_name: &'static str, error: String, duration_ms: u64) -> Self {
        Self {
            detector_name,
            issues: Vec::new(),
            duration_ms,
            status: DetectorStatus::Failed(error),
        }
    }

    /// Create a result for a detector whose graph was missing
    pub fn skipped(detector_name: &'static str, missing: GraphRequirement) -> Self {
        Self {
            detector_name,
            issues: Vec::new(),
            duration_ms: 0,
            status: DetectorStatus::Skipped(missing),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == DetectorStatus::Succeeded
    }
}

/// Trait for all structural detectors
///
/// Detectors are pure: they read the [`AnalysisContext`] and return the
/// issues they found. They never see each other's output.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyDetector;
///
/// impl Detector for MyDetector {
///     fn name(&self) -> &'static str {
///         "my-detector"
///     }
///
///     fn description(&self) -> &'static str {
///         "Detects my specific structural problem"
///     }
///
///     fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>> {
///         Ok(vec![])
///     }
/// }
/// ```
pub trait Detector: Send + Sync {
    /// Unique identifier for this detector (e.g. "circular-dependency")
    fn name(&self) -> &'static str;

    /// Human-readable description of what this detector finds
    fn description(&self) -> &'static str;

    /// Graph this detector reads. The engine skips the detector when the
    /// graph is absent instead of calling `detect`.
    ///
    /// Default: `GraphRequirement::None` (parsed files only)
    fn requires(&self) -> GraphRequirement {
        GraphRequirement::None
    }

    /// Run detection and return issues
    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>>;
}

/// Summary statistics from running all detectors
#[derive(Debug, Clone, Default)]
pub struct DetectionSummary {
    pub detectors_run: usize,
    pub detectors_succeeded: usize,
    pub detectors_skipped: usize,
    pub detectors_failed: usize,
    pub total_issues: usize,
    pub by_severity: HashMap<Severity, usize>,
    pub total_duration_ms: u64,
}

impl DetectionSummary {
    /// Update summary with a detector result
    pub fn add_result(&mut self, result: &DetectorResult) {
        self.detectors_run += 1;
        self.total_duration_ms += result.duration_ms;

        match result.status {
            DetectorStatus::Succeeded => {
                self.detectors_succeeded += 1;
                self.total_issues += result.issues.len();
                for issue in &result.issues {
                    *self.by_severity.entry(issue.severity).or_insert(0) += 1;
                }
            }
            DetectorStatus::Skipped(_) => self.detectors_skipped += 1,
            DetectorStatus::Failed(_) => self.detectors_failed += 1,
        }
    }

    /// Issues of one severity across succeeded detectors
    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }
}
