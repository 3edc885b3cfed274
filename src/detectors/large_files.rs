//! Large Files Detector
//!
//! Flags files whose reported line count exceeds the threshold. When a
//! dependency graph is available the finding also notes how many other
//! files import the oversized one, since large dependency hubs are the
//! hardest to split.

use crate::detectors::base::{AnalysisContext, Detector};
use crate::graph::{DependencyGraph, EdgeKind};
use crate::models::{deterministic_issue_id, ArchitectureIssue, IssueKind, Severity};
use anyhow::Result;
use std::collections::HashSet;
use tracing::info;

/// A file with more lines than this is flagged
pub const LARGE_FILE_MAX_LINES: usize = 1000;

pub struct LargeFilesDetector {
    threshold: usize,
}

impl LargeFilesDetector {
    pub fn new() -> Self {
        Self::with_threshold(LARGE_FILE_MAX_LINES)
    }

    pub fn with_threshold(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Count distinct files importing any node of `file`
    fn importer_count(graph: &DependencyGraph, file: &str) -> usize {
        let mut importers: HashSet<&str> = HashSet::new();
        for node in graph.nodes_in_file(file) {
            for edge in graph.incoming(&node.id, EdgeKind::Import) {
                if let Some(src) = graph.node(&edge.from).and_then(|n| n.resolved_file()) {
                    if src != file {
                        importers.insert(src);
                    }
                }
            }
        }
        importers.len()
    }
}

impl Default for LargeFilesDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for LargeFilesDetector {
    fn name(&self) -> &'static str {
        "large-file"
    }

    fn description(&self) -> &'static str {
        "Detects files exceeding size threshold"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>> {
        let mut issues = vec![];

        for file in ctx.files {
            let lines = file.lines_of_code;
            if lines <= self.threshold {
                continue;
            }

            let importers = ctx
                .dependency
                .map(|g| Self::importer_count(g, &file.path))
                .unwrap_or(0);
            let hub_note = if importers > 0 {
                format!(" {} other files depend on it.", importers)
            } else {
                String::new()
            };

            issues.push(ArchitectureIssue {
                id: deterministic_issue_id(IssueKind::LargeFile, &file.path, ""),
                kind: IssueKind::LargeFile,
                severity: Severity::Medium,
                title: format!("Large file: {} lines", lines),
                description: format!(
                    "{} exceeds recommended size ({} lines > {} threshold).{}",
                    file.path, lines, self.threshold, hub_note
                ),
                affected_files: vec![file.path.clone()],
                recommendation: "Split into smaller, focused modules. Group related functions \
                                 together."
                    .to_string(),
            });
        }

        info!("LargeFilesDetector found {} findings", issues.len());
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode};
    use crate::models::ParsedFile;

    #[test]
    fn test_line_threshold_boundary() {
        let files = vec![
            ParsedFile::new("src/ok.ts").with_lines(1000),
            ParsedFile::new("src/huge.ts").with_lines(1001),
        ];
        let issues = LargeFilesDetector::new()
            .detect(&AnalysisContext::new(&files))
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].affected_files, vec!["src/huge.ts"]);
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_notes_importers_when_graph_present() {
        let files = vec![ParsedFile::new("src/huge.ts").with_lines(5000)];
        let graph = DependencyGraph::new(
            vec![
                GraphNode::file("src/huge.ts"),
                GraphNode::file("src/a.ts"),
                GraphNode::file("src/b.ts"),
            ],
            vec![
                GraphEdge::import("src/a.ts", "src/huge.ts"),
                GraphEdge::import("src/b.ts", "src/huge.ts"),
            ],
        )
        .unwrap();
        let ctx = AnalysisContext::new(&files).with_dependency(&graph);
        let issues = LargeFilesDetector::new().detect(&ctx).unwrap();
        assert!(issues[0].description.contains("2 other files depend on it"));
    }
}
