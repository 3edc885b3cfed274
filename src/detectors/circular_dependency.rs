//! Circular dependency detector
//!
//! Walks the import edges of the dependency graph depth-first, keeping a
//! recursion stack. An edge that points back at a node still on the stack
//! closes a cycle, which is reported as the stack slice from that node
//! through the closing edge.
//!
//! # Algorithm
//!
//! 1. Visit nodes in listing order; skip nodes already finished
//! 2. From each root, follow `import` edges in listing order using an
//!    explicit frame stack (deep graphs never touch the call stack)
//! 3. Every back-edge yields one cycle; overlapping cycles in the same
//!    strongly connected region are all kept
//!
//! `visited` and `on_stack` live inside a single call, so concurrent runs
//! over different graphs never share state.

use crate::detectors::base::{AnalysisContext, Detector, GraphRequirement};
use crate::graph::{CodeGraph, EdgeKind, GraphEdge};
use crate::models::{deterministic_issue_id, ArchitectureIssue, IssueKind, Severity};
use anyhow::Result;
use std::collections::HashSet;
use tracing::{debug, info};

/// Detects circular dependencies in the import graph
#[derive(Debug, Default)]
pub struct CircularDependencyDetector;

struct Frame<'g> {
    edges: Vec<&'g GraphEdge>,
    next: usize,
}

impl CircularDependencyDetector {
    pub fn new() -> Self {
        Self
    }

    /// Find cycles over import edges.
    ///
    /// Each cycle starts and ends with the same node id. A self-loop
    /// comes back as `[a, a]`.
    pub fn find_cycles(graph: &CodeGraph) -> Vec<Vec<String>> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_stack: HashSet<&str> = HashSet::new();
        let mut path: Vec<&str> = Vec::new();
        let mut cycles: Vec<Vec<String>> = Vec::new();

        for root in graph.nodes() {
            let root = root.id.as_str();
            if visited.contains(root) {
                continue;
            }

            visited.insert(root);
            on_stack.insert(root);
            path.push(root);
            let mut frames = vec![Frame {
                edges: graph.outgoing(root, EdgeKind::Import),
                next: 0,
            }];

            while let Some(frame) = frames.last_mut() {
                let next = frame.edges.get(frame.next).map(|e| e.to.as_str());
                frame.next += 1;

                let Some(target) = next else {
                    frames.pop();
                    if let Some(done) = path.pop() {
                        on_stack.remove(done);
                    }
                    continue;
                };

                if on_stack.contains(target) {
                    if let Some(start) = path.iter().position(|&n| n == target) {
                        let mut cycle: Vec<String> =
                            path[start..].iter().map(|n| n.to_string()).collect();
                        cycle.push(target.to_string());
                        cycles.push(cycle);
                    }
                } else if visited.insert(target) {
                    on_stack.insert(target);
                    path.push(target);
                    frames.push(Frame {
                        edges: graph.outgoing(target, EdgeKind::Import),
                        next: 0,
                    });
                }
            }
        }

        cycles
    }

    /// Resolve a cycle to file paths, dropping the closing repeat and any
    /// node without a file
    fn cycle_files(graph: &CodeGraph, cycle: &[String]) -> Vec<String> {
        let open = &cycle[..cycle.len().saturating_sub(1)];
        open.iter()
            .filter_map(|id| graph.node(id).and_then(|n| n.resolved_file()))
            .map(str::to_string)
            .collect()
    }

    /// Fix suggestion based on cycle size
    fn suggest_fix(cycle_length: usize) -> String {
        if cycle_length >= 5 {
            "Large circular dependency detected. Consider:\n\
             1. Extract shared interfaces/types into a separate module\n\
             2. Use dependency injection to break tight coupling\n\
             3. Refactor into layers with clear dependency direction\n\
             4. Apply the Dependency Inversion Principle"
                .to_string()
        } else {
            "Small circular dependency. Consider:\n\
             1. Merge the circular modules if they're tightly coupled\n\
             2. Extract common dependencies to a third module\n\
             3. Depend on an interface instead of the concrete module"
                .to_string()
        }
    }

    fn create_issue(cycle: &[String], files: Vec<String>) -> ArchitectureIssue {
        let cycle_length = cycle.len().saturating_sub(1).max(1);

        let display: Vec<&str> = cycle
            .iter()
            .map(|id| id.rsplit('/').next().unwrap_or(id.as_str()))
            .collect();
        let description = format!("Found circular import chain: {}", display.join(" → "));

        let primary = files
            .first()
            .cloned()
            .or_else(|| cycle.first().cloned())
            .unwrap_or_default();

        ArchitectureIssue {
            id: deterministic_issue_id(IssueKind::CircularDependency, &primary, &cycle.join("->")),
            kind: IssueKind::CircularDependency,
            severity: Severity::High,
            title: format!("Circular dependency involving {} files", cycle_length),
            description,
            affected_files: files,
            recommendation: Self::suggest_fix(cycle_length),
        }
    }
}

impl Detector for CircularDependencyDetector {
    fn name(&self) -> &'static str {
        "circular-dependency"
    }

    fn description(&self) -> &'static str {
        "Detects circular import chains with a depth-first back-edge search"
    }

    fn requires(&self) -> GraphRequirement {
        GraphRequirement::Dependency
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>> {
        let graph = ctx.dependency_graph()?;
        debug!(
            "Starting circular dependency detection over {} nodes",
            graph.node_count()
        );

        let cycles = Self::find_cycles(graph);
        let issues: Vec<ArchitectureIssue> = cycles
            .iter()
            .map(|cycle| Self::create_issue(cycle, Self::cycle_files(graph, cycle)))
            .collect();

        info!(
            "CircularDependencyDetector found {} circular dependencies",
            issues.len()
        );
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{DependencyGraph, GraphNode};
    use crate::models::ParsedFile;
    use proptest::prelude::*;

    fn graph(ids: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        DependencyGraph::new(
            ids.iter().map(|id| GraphNode::file(id)).collect(),
            edges.iter().map(|(a, b)| GraphEdge::import(a, b)).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_simple_cycle_in_order() {
        let g = graph(&["a.ts", "b.ts", "c.ts"], &[("a.ts", "b.ts"), ("b.ts", "c.ts"), ("c.ts", "a.ts")]);
        let cycles = CircularDependencyDetector::find_cycles(&g);
        assert_eq!(cycles, vec![vec!["a.ts", "b.ts", "c.ts", "a.ts"]]);
    }

    #[test]
    fn test_self_loop() {
        let g = graph(&["a.ts", "b.ts"], &[("a.ts", "a.ts"), ("a.ts", "b.ts")]);
        let cycles = CircularDependencyDetector::find_cycles(&g);
        assert_eq!(cycles, vec![vec!["a.ts", "a.ts"]]);
    }

    #[test]
    fn test_no_cycles_in_chain() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
        assert!(CircularDependencyDetector::find_cycles(&g).is_empty());
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        let g = graph(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );
        assert!(CircularDependencyDetector::find_cycles(&g).is_empty());
    }

    #[test]
    fn test_one_cycle_per_back_edge() {
        // a -> b -> a and b -> c -> a share a strongly connected region
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c"), ("c", "a")]);
        let cycles = CircularDependencyDetector::find_cycles(&g);
        assert_eq!(
            cycles,
            vec![vec!["a", "b", "a"], vec!["a", "b", "c", "a"]]
        );
    }

    #[test]
    fn test_disconnected_components_all_visited() {
        let g = graph(
            &["a", "b", "x", "y"],
            &[("a", "b"), ("x", "y"), ("y", "x")],
        );
        let cycles = CircularDependencyDetector::find_cycles(&g);
        assert_eq!(cycles, vec![vec!["x", "y", "x"]]);
    }

    #[test]
    fn test_only_import_edges_are_walked() {
        let g = DependencyGraph::new(
            vec![GraphNode::file("a"), GraphNode::file("b")],
            vec![
                GraphEdge::import("a", "b"),
                GraphEdge::new("call", "b", "a", EdgeKind::Call),
            ],
        )
        .unwrap();
        assert!(CircularDependencyDetector::find_cycles(&g).is_empty());
    }

    #[test]
    fn test_unresolvable_nodes_are_dropped_from_files() {
        let g = DependencyGraph::new(
            vec![GraphNode::file("a.ts"), GraphNode::new("ghost", "")],
            vec![GraphEdge::import("a.ts", "ghost"), GraphEdge::import("ghost", "a.ts")],
        )
        .unwrap();
        let files: Vec<ParsedFile> = vec![];
        let ctx = AnalysisContext::new(&files).with_dependency(&g);
        let issues = CircularDependencyDetector::new().detect(&ctx).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].affected_files, vec!["a.ts"]);
    }

    #[test]
    fn test_cycles_sharing_a_start_get_distinct_ids() {
        let g = graph(&["a", "b", "c"], &[("a", "b"), ("b", "a"), ("b", "c"), ("c", "a")]);
        let files: Vec<ParsedFile> = vec![];
        let ctx = AnalysisContext::new(&files).with_dependency(&g);
        let issues = CircularDependencyDetector::new().detect(&ctx).unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].affected_files[0], issues[1].affected_files[0]);
        assert_ne!(issues[0].id, issues[1].id);
    }

    #[test]
    fn test_issue_shape() {
        let g = graph(&["a.ts", "b.ts", "c.ts"], &[("a.ts", "b.ts"), ("b.ts", "c.ts"), ("c.ts", "a.ts")]);
        let files: Vec<ParsedFile> = vec![];
        let ctx = AnalysisContext::new(&files).with_dependency(&g);
        let issues = CircularDependencyDetector::new().detect(&ctx).unwrap();

        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.kind, IssueKind::CircularDependency);
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.affected_files, vec!["a.ts", "b.ts", "c.ts"]);
        assert_eq!(issue.title, "Circular dependency involving 3 files");
    }

    proptest! {
        /// Property: a graph without edges never has cycles
        #[test]
        fn edgeless_graphs_have_no_cycles(count in 0usize..50) {
            let nodes = (0..count).map(|i| GraphNode::file(&format!("f{i}.ts"))).collect();
            let g = DependencyGraph::new(nodes, vec![]).unwrap();
            prop_assert!(CircularDependencyDetector::find_cycles(&g).is_empty());
        }

        /// Property: any self-loop is reported as a cycle covering that node
        #[test]
        fn self_loops_are_always_found(count in 1usize..20, pick in 0usize..20) {
            let pick = pick % count;
            let ids: Vec<String> = (0..count).map(|i| format!("f{i}.ts")).collect();
            let nodes = ids.iter().map(|id| GraphNode::file(id)).collect();
            let g = DependencyGraph::new(nodes, vec![GraphEdge::import(&ids[pick], &ids[pick])]).unwrap();
            let cycles = CircularDependencyDetector::find_cycles(&g);
            prop_assert!(cycles.iter().any(|c| c.contains(&ids[pick])));
        }
    }
}
