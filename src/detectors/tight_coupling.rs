//! Tight coupling detector
//!
//! Counts outgoing import edges per source file. A file that reaches into
//! many other modules is fragile: a change in any of them can break it.

use crate::detectors::base::{AnalysisContext, Detector, GraphRequirement};
use crate::graph::{CodeGraph, EdgeKind};
use crate::models::{deterministic_issue_id, ArchitectureIssue, IssueKind, Severity};
use anyhow::Result;
use std::collections::HashMap;
use tracing::{debug, info};

/// A file with more outgoing imports than this is flagged
pub const TIGHT_COUPLING_MAX_IMPORTS: usize = 10;

#[derive(Debug, Clone)]
pub struct TightCouplingDetector {
    max_imports: usize,
}

impl TightCouplingDetector {
    pub fn new() -> Self {
        Self::with_threshold(TIGHT_COUPLING_MAX_IMPORTS)
    }

    pub fn with_threshold(max_imports: usize) -> Self {
        Self { max_imports }
    }

    /// Outgoing import edge counts per source file, in first-seen order
    pub fn import_counts(graph: &CodeGraph) -> Vec<(&str, usize)> {
        let mut order: Vec<(&str, usize)> = Vec::new();
        let mut slot: HashMap<&str, usize> = HashMap::new();

        for edge in graph.edges_of_kind(EdgeKind::Import) {
            let Some(file) = graph.node(&edge.from).and_then(|n| n.resolved_file()) else {
                continue;
            };
            let idx = *slot.entry(file).or_insert_with(|| {
                order.push((file, 0));
                order.len() - 1
            });
            order[idx].1 += 1;
        }

        order
    }
}

impl Default for TightCouplingDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for TightCouplingDetector {
    fn name(&self) -> &'static str {
        "tight-coupling"
    }

    fn description(&self) -> &'static str {
        "Detects files with too many outgoing import dependencies"
    }

    fn requires(&self) -> GraphRequirement {
        GraphRequirement::Dependency
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>> {
        let graph = ctx.dependency_graph()?;
        let counts = Self::import_counts(graph);
        debug!("Counted imports for {} files", counts.len());

        let issues: Vec<ArchitectureIssue> = counts
            .into_iter()
            .filter(|&(_, count)| count > self.max_imports)
            .map(|(file, count)| ArchitectureIssue {
                id: deterministic_issue_id(IssueKind::TightCoupling, file, ""),
                kind: IssueKind::TightCoupling,
                severity: Severity::Medium,
                title: format!("Tight coupling: {} dependencies", count),
                description: format!(
                    "{} imports {} dependencies (threshold {}).",
                    file, count, self.max_imports
                ),
                affected_files: vec![file.to_string()],
                recommendation: "Introduce a facade or narrower interfaces so this module \
                                 depends on fewer collaborators."
                    .to_string(),
            })
            .collect();

        info!("TightCouplingDetector found {} files", issues.len());
        Ok(issues)
    }
}
