//! Excess exports detector
//!
//! A module that exports a large surface usually mixes several concerns
//! and forces every consumer to depend on all of them.

use crate::detectors::base::{AnalysisContext, Detector};
use crate::models::{deterministic_issue_id, ArchitectureIssue, IssueKind, Severity};
use anyhow::Result;
use tracing::info;

/// A file exporting more symbols than this is flagged
pub const MAX_EXPORTS_PER_FILE: usize = 15;

#[derive(Debug, Clone)]
pub struct ExcessExportsDetector {
    max_exports: usize,
}

impl ExcessExportsDetector {
    pub fn new() -> Self {
        Self::with_threshold(MAX_EXPORTS_PER_FILE)
    }

    pub fn with_threshold(max_exports: usize) -> Self {
        Self { max_exports }
    }
}

impl Default for ExcessExportsDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ExcessExportsDetector {
    fn name(&self) -> &'static str {
        "excessive-exports"
    }

    fn description(&self) -> &'static str {
        "Detects files with an oversized public export surface"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>> {
        let issues: Vec<ArchitectureIssue> = ctx
            .files
            .iter()
            .filter(|f| f.exports.len() > self.max_exports)
            .map(|f| ArchitectureIssue {
                id: deterministic_issue_id(IssueKind::ExcessiveExports, &f.path, ""),
                kind: IssueKind::ExcessiveExports,
                severity: Severity::Medium,
                title: format!("Too many exports: {}", f.path),
                description: format!(
                    "{} exports {} symbols (threshold {}).",
                    f.path,
                    f.exports.len(),
                    self.max_exports
                ),
                affected_files: vec![f.path.clone()],
                recommendation: "Split the module by responsibility and re-export only \
                                 the public API from an index module."
                    .to_string(),
            })
            .collect();

        info!("ExcessExportsDetector found {} files", issues.len());
        Ok(issues)
    }
}
