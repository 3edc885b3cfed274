//! Architecture assessment orchestration
//!
//! Runs the structural detectors and the pattern recognizers side by side,
//! derives anti-patterns from the issues, and scores the result. Nothing
//! here fails: missing or malformed graphs and failing detectors become
//! [`Diagnostic`]s on the assessment.

use crate::config::ArchConfig;
use crate::detectors::{AnalysisContext, DetectionRun, DetectorEngine, DetectorStatus};
use crate::graph::{DependencyGraph, GraphError, LineageGraph};
use crate::models::{ArchitectureAssessment, Diagnostic, DiagnosticKind, ParsedFile};
use crate::patterns::{derive_anti_patterns, recognize_patterns};
use crate::scoring::ArchitectureScorer;
use std::time::Instant;
use tracing::{info, warn};

/// A graph input that may be absent or rejected at construction
#[derive(Debug, Clone)]
enum GraphInput<G> {
    Absent,
    Present(G),
    Malformed(GraphError),
}

impl<G> Default for GraphInput<G> {
    fn default() -> Self {
        GraphInput::Absent
    }
}

impl<G> GraphInput<G> {
    fn from_result(result: Result<G, GraphError>) -> Self {
        match result {
            Ok(graph) => GraphInput::Present(graph),
            Err(e) => GraphInput::Malformed(e),
        }
    }

    fn get(&self) -> Option<&G> {
        match self {
            GraphInput::Present(graph) => Some(graph),
            _ => None,
        }
    }

    fn error(&self) -> Option<&GraphError> {
        match self {
            GraphInput::Malformed(e) => Some(e),
            _ => None,
        }
    }
}

/// Everything one assessment reads
#[derive(Debug, Clone, Default)]
pub struct AssessmentInput {
    pub files: Vec<ParsedFile>,
    dependency: GraphInput<DependencyGraph>,
    lineage: GraphInput<LineageGraph>,
}

impl AssessmentInput {
    pub fn new(files: Vec<ParsedFile>) -> Self {
        Self {
            files,
            ..Default::default()
        }
    }

    /// Attach a dependency graph construction result. An `Err` is kept and
    /// reported as a `malformed-graph` diagnostic.
    pub fn with_dependency_graph(mut self, graph: Result<DependencyGraph, GraphError>) -> Self {
        self.dependency = GraphInput::from_result(graph);
        self
    }

    pub fn with_lineage_graph(mut self, graph: Result<LineageGraph, GraphError>) -> Self {
        self.lineage = GraphInput::from_result(graph);
        self
    }

    pub fn dependency_graph(&self) -> Option<&DependencyGraph> {
        self.dependency.get()
    }

    pub fn lineage_graph(&self) -> Option<&LineageGraph> {
        self.lineage.get()
    }

    fn context(&self) -> AnalysisContext<'_> {
        let mut ctx = AnalysisContext::new(&self.files);
        if let Some(graph) = self.dependency_graph() {
            ctx = ctx.with_dependency(graph);
        }
        if let Some(graph) = self.lineage_graph() {
            ctx = ctx.with_lineage(graph);
        }
        ctx
    }

    fn graph_diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        for (source, err) in [
            ("dependency-graph", self.dependency.error()),
            ("lineage-graph", self.lineage.error()),
        ] {
            if let Some(err) = err {
                warn!("Rejected {}: {}", source, err);
                out.push(Diagnostic {
                    kind: DiagnosticKind::MalformedGraph,
                    source: source.to_string(),
                    message: err.to_string(),
                });
            }
        }
        out
    }
}

/// Runs full architecture assessments with one configuration
pub struct ArchitectureAnalyzer {
    config: ArchConfig,
    engine: DetectorEngine,
}

impl ArchitectureAnalyzer {
    pub fn new(config: ArchConfig) -> Self {
        let engine = DetectorEngine::with_defaults(&config.thresholds, &config.detectors);
        Self { config, engine }
    }

    pub fn config(&self) -> &ArchConfig {
        &self.config
    }

    pub fn assess(&self, input: &AssessmentInput) -> ArchitectureAssessment {
        let start = Instant::now();
        let ctx = input.context();

        let (run, recognition) = rayon::join(
            || self.engine.run(&ctx),
            || {
                recognize_patterns(
                    &input.files,
                    input.dependency_graph(),
                    &self.config.patterns,
                )
            },
        );

        let mut diagnostics = input.graph_diagnostics();
        diagnostics.extend(detector_diagnostics(&run));
        diagnostics.extend(recognition.diagnostics);

        let issues = run.issues();
        let anti_patterns = derive_anti_patterns(&issues);
        let score = ArchitectureScorer::new(self.config.scoring).score(&issues, &anti_patterns);

        info!(
            "Assessment complete: {} issues, {} patterns, {} anti-patterns, score {} in {:?}",
            issues.len(),
            recognition.patterns.len(),
            anti_patterns.len(),
            score,
            start.elapsed()
        );

        ArchitectureAssessment {
            issues,
            patterns: recognition.patterns,
            anti_patterns,
            score,
            diagnostics,
        }
    }
}

impl Default for ArchitectureAnalyzer {
    fn default() -> Self {
        Self::new(ArchConfig::default())
    }
}

fn detector_diagnostics(run: &DetectionRun) -> Vec<Diagnostic> {
    run.results
        .iter()
        .filter_map(|r| match &r.status {
            DetectorStatus::Succeeded => None,
            DetectorStatus::Skipped(requirement) => Some(Diagnostic {
                kind: DiagnosticKind::MissingGraph,
                source: r.detector_name.to_string(),
                message: format!("{} not available", requirement),
            }),
            DetectorStatus::Failed(message) => Some(Diagnostic {
                kind: DiagnosticKind::DetectorFailed,
                source: r.detector_name.to_string(),
                message: message.clone(),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphEdge, GraphNode};
    use crate::models::{ClassRecord, IssueKind};

    #[test]
    fn test_files_only_assessment() {
        let files = vec![ParsedFile::new("src/big.ts").with_lines(1500)];
        let assessment = ArchitectureAnalyzer::default().assess(&AssessmentInput::new(files));

        assert_eq!(assessment.issues.len(), 1);
        assert_eq!(assessment.score, 95);
        // cycle, coupling, layer detectors plus both recognizers
        assert_eq!(assessment.diagnostics.len(), 5);
        assert!(assessment
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::MissingGraph));
    }

    #[test]
    fn test_malformed_graph_is_a_diagnostic() {
        let files = vec![ParsedFile::new("src/god.ts").with_class(ClassRecord::new(
            "God",
            (0..25).map(|i| format!("m{i}")).collect(),
        ))];
        let bad = DependencyGraph::new(
            vec![GraphNode::file("a.ts")],
            vec![GraphEdge::import("a.ts", "ghost.ts")],
        );
        let input = AssessmentInput::new(files).with_dependency_graph(bad);
        let assessment = ArchitectureAnalyzer::default().assess(&input);

        assert!(assessment
            .diagnostics
            .iter()
            .any(|d| d.kind == DiagnosticKind::MalformedGraph && d.source == "dependency-graph"));
        assert_eq!(assessment.issues_of(IssueKind::GodObject).count(), 1);
        // one high issue (10) and the God Object anti-pattern (8)
        assert_eq!(assessment.score, 82);
    }

    #[test]
    fn test_clean_repo_is_perfect() {
        let input = AssessmentInput::new(vec![ParsedFile::new("src/a.ts")])
            .with_dependency_graph(DependencyGraph::new(vec![GraphNode::file("src/a.ts")], vec![]))
            .with_lineage_graph(LineageGraph::new(vec![], vec![]));
        let assessment = ArchitectureAnalyzer::default().assess(&input);
        assert!(assessment.issues.is_empty());
        assert!(assessment.diagnostics.is_empty());
        assert_eq!(assessment.score, 100);
    }
}
