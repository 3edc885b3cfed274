//! Layer violation detector
//!
//! Frontend code must reach the database through a backend layer. Any
//! `database-query` lineage edge leaving a frontend node bypasses that
//! layer.

use crate::detectors::base::{AnalysisContext, Detector, GraphRequirement};
use crate::graph::{EdgeKind, Layer};
use crate::models::{deterministic_issue_id, ArchitectureIssue, IssueKind, Severity};
use anyhow::Result;
use tracing::info;

#[derive(Debug, Default)]
pub struct LayerViolationDetector;

impl LayerViolationDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Detector for LayerViolationDetector {
    fn name(&self) -> &'static str {
        "layer-violation"
    }

    fn description(&self) -> &'static str {
        "Detects frontend code querying the database directly"
    }

    fn requires(&self) -> GraphRequirement {
        GraphRequirement::Lineage
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>> {
        let graph = ctx.lineage_graph()?;
        let mut issues = Vec::new();

        for edge in graph.edges_of_kind(EdgeKind::DatabaseQuery) {
            let Some(source) = graph.node(&edge.from) else {
                continue;
            };
            if source.layer != Some(Layer::Frontend) {
                continue;
            }

            let source_file = source.resolved_file().unwrap_or(source.id.as_str());
            let mut affected_files = vec![source_file.to_string()];
            if let Some(target) = graph.node(&edge.to).and_then(|n| n.resolved_file()) {
                if target != source_file {
                    affected_files.push(target.to_string());
                }
            }

            issues.push(ArchitectureIssue {
                id: deterministic_issue_id(IssueKind::LayerViolation, source_file, &edge.id),
                kind: IssueKind::LayerViolation,
                severity: Severity::High,
                title: "Frontend queries the database directly".to_string(),
                description: format!(
                    "{} issues a database query to '{}' without going through a backend \
                     layer.",
                    source_file, edge.to
                ),
                affected_files,
                recommendation: "Move data access behind a backend service or API endpoint \
                                 and call that from the frontend."
                    .to_string(),
            });
        }

        info!("LayerViolationDetector found {} violations", issues.len());
        Ok(issues)
    }
}
