//! End-to-end assessment tests through the public API

use archgraph::graph::{EdgeKind, GraphEdge, GraphNode, Layer};
use archgraph::models::{ClassRecord, DiagnosticKind, IssueKind, ParsedFile, Severity};
use archgraph::{
    ArchConfig, ArchitectureAnalyzer, AssessmentInput, DependencyGraph, LineageGraph,
};

fn files(paths: &[&str]) -> Vec<ParsedFile> {
    paths.iter().map(|p| ParsedFile::new(p)).collect()
}

fn import_graph(ids: &[&str], imports: &[(&str, &str)]) -> DependencyGraph {
    DependencyGraph::new(
        ids.iter().map(|id| GraphNode::file(id)).collect(),
        imports.iter().map(|(a, b)| GraphEdge::import(a, b)).collect(),
    )
    .unwrap()
}

#[test]
fn test_three_file_cycle() {
    let graph = import_graph(
        &["src/a.ts", "src/b.ts", "src/c.ts"],
        &[
            ("src/a.ts", "src/b.ts"),
            ("src/b.ts", "src/c.ts"),
            ("src/c.ts", "src/a.ts"),
        ],
    );
    let input = AssessmentInput::new(files(&["src/a.ts", "src/b.ts", "src/c.ts"]))
        .with_dependency_graph(Ok(graph));

    let assessment = ArchitectureAnalyzer::default().assess(&input);
    let cycles: Vec<_> = assessment.issues_of(IssueKind::CircularDependency).collect();

    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].severity, Severity::High);
    assert_eq!(
        cycles[0].affected_files,
        vec!["src/a.ts", "src/b.ts", "src/c.ts"]
    );
    assert_eq!(assessment.anti_patterns.len(), 1);
    assert_eq!(assessment.anti_patterns[0].name, "Cyclic Dependencies");
    // 100 - 10 (high issue) - 8 (high anti-pattern)
    assert_eq!(assessment.score, 82);
}

#[test]
fn test_frontend_database_query() {
    let lineage = LineageGraph::new(
        vec![
            GraphNode::new("ui", "web/Dashboard.tsx").with_layer(Layer::Frontend),
            GraphNode::new("orders", "db/orders.sql").with_layer(Layer::Database),
        ],
        vec![GraphEdge::new("q", "ui", "orders", EdgeKind::DatabaseQuery)],
    );
    let input = AssessmentInput::new(vec![]).with_lineage_graph(lineage);

    let assessment = ArchitectureAnalyzer::default().assess(&input);
    let violations: Vec<_> = assessment.issues_of(IssueKind::LayerViolation).collect();

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].severity, Severity::High);
    assert_eq!(violations[0].primary_file(), "web/Dashboard.tsx");
    assert!(assessment.anti_patterns.iter().any(|a| a.name == "Layer Bypass"));
}

#[test]
fn test_patterns_and_issues_together() {
    let mut parsed = files(&[
        "src/controllers/UserController.ts",
        "src/models/UserModel.ts",
        "src/services/UserService.ts",
        "src/repositories/UserRepository.ts",
    ]);
    parsed[2] = parsed[2].clone().with_class(ClassRecord::new(
        "UserService",
        (0..21).map(|i| format!("op{i}")).collect(),
    ));
    let graph = import_graph(
        &["src/controllers/UserController.ts", "src/services/UserService.ts"],
        &[("src/controllers/UserController.ts", "src/services/UserService.ts")],
    );
    let input = AssessmentInput::new(parsed).with_dependency_graph(Ok(graph));

    let assessment = ArchitectureAnalyzer::default().assess(&input);
    let names: Vec<_> = assessment.patterns.iter().map(|p| p.name.as_str()).collect();

    assert_eq!(names, vec!["MVC (Model-View-Controller)", "Layered Architecture"]);
    assert_eq!(assessment.issues_of(IssueKind::GodObject).count(), 1);
    // only the lineage detector lacks its graph
    assert_eq!(assessment.diagnostics.len(), 1);
    assert_eq!(assessment.diagnostics[0].kind, DiagnosticKind::MissingGraph);
    assert_eq!(assessment.diagnostics[0].source, "layer-violation");
}

#[test]
fn test_disabled_detector_and_custom_threshold() {
    let mut config = ArchConfig::default();
    config.thresholds.large_file_lines = 100;
    config.detectors.disabled = vec!["circular-dependency".to_string()];

    let graph = import_graph(&["a.ts", "b.ts"], &[("a.ts", "b.ts"), ("b.ts", "a.ts")]);
    let input = AssessmentInput::new(vec![ParsedFile::new("a.ts").with_lines(150)])
        .with_dependency_graph(Ok(graph));

    let assessment = ArchitectureAnalyzer::new(config).assess(&input);
    assert_eq!(assessment.issues_of(IssueKind::CircularDependency).count(), 0);
    assert_eq!(assessment.issues_of(IssueKind::LargeFile).count(), 1);
}

#[test]
fn test_malformed_dependency_graph_still_runs_file_detectors() {
    let bad = DependencyGraph::new(
        vec![GraphNode::file("a.ts"), GraphNode::file("a.ts")],
        vec![],
    );
    let input = AssessmentInput::new(vec![ParsedFile::new("a.ts").with_lines(5000)])
        .with_dependency_graph(bad);

    let assessment = ArchitectureAnalyzer::default().assess(&input);
    assert_eq!(assessment.issues_of(IssueKind::LargeFile).count(), 1);
    assert!(assessment
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::MalformedGraph));
}

#[test]
fn test_assessment_json_shape() {
    let input = AssessmentInput::new(vec![ParsedFile::new("a.ts").with_lines(2000)]);
    let assessment = ArchitectureAnalyzer::default().assess(&input);
    let json = serde_json::to_value(&assessment).unwrap();

    assert_eq!(json["score"], 95);
    assert_eq!(json["issues"][0]["type"], "large-file");
    assert_eq!(json["issues"][0]["affectedFiles"][0], "a.ts");
    assert!(json["antiPatterns"].as_array().unwrap().is_empty());
    assert_eq!(json["diagnostics"][0]["kind"], "missing-graph");
}

#[test]
fn test_repeated_assessments_are_identical() {
    let graph = import_graph(
        &["a.ts", "b.ts", "c.ts"],
        &[("a.ts", "b.ts"), ("b.ts", "a.ts"), ("c.ts", "a.ts")],
    );
    let input = AssessmentInput::new(files(&["a.ts", "b.ts", "c.ts"]))
        .with_dependency_graph(Ok(graph));
    let analyzer = ArchitectureAnalyzer::default();
    assert_eq!(analyzer.assess(&input), analyzer.assess(&input));
}
