//! Snapshot files: pre-parsed repository input for the CLI
//!
//! ```json
//! {
//!   "repository": "my-app",
//!   "files": [{"path": "src/a.ts", "linesOfCode": 120}],
//!   "dependencyGraph": {"nodes": [...], "edges": [...]},
//!   "lineageGraph": {"nodes": [...], "edges": [...]}
//! }
//! ```
//!
//! Graphs are read as plain listings first and validated afterwards, so a
//! dangling edge surfaces as a diagnostic instead of a parse failure.

use anyhow::{Context, Result};
use archgraph::graph::{CodeGraph, GraphSnapshot};
use archgraph::models::ParsedFile;
use archgraph::{AssessmentInput, DependencyGraph, GraphError, LineageGraph};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    repository: String,
    #[serde(default)]
    files: Vec<ParsedFile>,
    dependency_graph: Option<GraphSnapshot>,
    lineage_graph: Option<GraphSnapshot>,
}

pub struct Snapshot {
    pub repository: String,
    pub files: Vec<ParsedFile>,
    pub dependency: Option<Result<DependencyGraph, GraphError>>,
    pub lineage: Option<Result<LineageGraph, GraphError>>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let raw: RawSnapshot = serde_json::from_str(&content)
            .with_context(|| format!("Invalid snapshot JSON in {}", path.display()))?;

        let repository = if raw.repository.is_empty() {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            raw.repository
        };

        debug!(
            "Loaded snapshot {} with {} files",
            path.display(),
            raw.files.len()
        );

        Ok(Self {
            repository,
            files: raw.files,
            dependency: raw
                .dependency_graph
                .map(|g| CodeGraph::try_from(g).map(DependencyGraph::from)),
            lineage: raw
                .lineage_graph
                .map(|g| CodeGraph::try_from(g).map(LineageGraph::from)),
        })
    }

    pub fn into_input(self) -> AssessmentInput {
        let mut input = AssessmentInput::new(self.files);
        if let Some(graph) = self.dependency {
            input = input.with_dependency_graph(graph);
        }
        if let Some(graph) = self.lineage {
            input = input.with_lineage_graph(graph);
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_malformed_graph_is_kept_as_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        fs::write(
            &path,
            r#"{
                "files": [{"path": "a.ts"}],
                "dependencyGraph": {
                    "nodes": [{"id": "a.ts", "file": "a.ts"}],
                    "edges": [{"id": "e", "from": "a.ts", "to": "b.ts", "type": "import"}]
                }
            }"#,
        )
        .unwrap();

        let snapshot = Snapshot::load(&path).unwrap();
        assert_eq!(snapshot.repository, "snap");
        assert!(matches!(snapshot.dependency, Some(Err(_))));
        assert!(snapshot.lineage.is_none());
    }

    #[test]
    fn test_lineage_with_unlisted_kinds_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        fs::write(
            &path,
            r#"{
                "files": [{"path": "app/Main.kt"}],
                "lineageGraph": {
                    "nodes": [
                        {"id": "m", "file": "app/Main.kt", "layer": "mobile"},
                        {"id": "api", "file": "api/users.ts", "layer": "backend"}
                    ],
                    "edges": [{"id": "e1", "from": "m", "to": "api", "type": "http-request"}]
                }
            }"#,
        )
        .unwrap();

        let snapshot = Snapshot::load(&path).unwrap();
        let lineage = match snapshot.lineage {
            Some(Ok(graph)) => graph,
            other => panic!("lineage graph not loaded: {other:?}"),
        };
        assert_eq!(lineage.edge_count(), 1);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snap.json");
        fs::write(&path, "{not json").unwrap();
        assert!(Snapshot::load(&path).is_err());
    }
}
