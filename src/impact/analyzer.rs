//! Change impact analyzer
//!
//! Walks import edges backwards from the nodes of the changed files. Every
//! consumer is reached once, at its shortest distance, and its chain is the
//! BFS parent path back to the target it was reached from.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::graph::{DependencyGraph, EdgeKind};
use crate::impact::models::{
    AffectedNode, BreakingChange, ChangeRequest, ChangeType, Complexity, DependencyChain,
    ImpactAnalysis, ImpactLevel, ImpactSummary,
};
use crate::impact::policy::ImpactPolicy;
use crate::models::Severity;

/// Errors that stop an impact analysis
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImpactError {
    #[error("Consumer {node} lies beyond the traversal budget of {limit} hops")]
    TraversalBudgetExceeded { limit: usize, node: String },
}

/// Normalize a repository path for comparison: `\` becomes `/` and any
/// leading `./` is dropped
pub fn normalize_path(path: &str) -> String {
    let mut p = path.trim().replace('\\', "/");
    while let Some(rest) = p.strip_prefix("./") {
        p = rest.to_string();
    }
    p
}

/// BFS bookkeeping for one reached consumer
struct Visit<'g> {
    id: &'g str,
    depth: usize,
    parent: &'g str,
}

/// Projects the blast radius of a change request over a dependency graph
pub struct ImpactAnalyzer<'a> {
    repository: String,
    graph: &'a DependencyGraph,
    policy: ImpactPolicy,
}

impl<'a> ImpactAnalyzer<'a> {
    pub fn new(repository: impl Into<String>, graph: &'a DependencyGraph, policy: ImpactPolicy) -> Self {
        Self {
            repository: repository.into(),
            graph,
            policy,
        }
    }

    /// File of a node, falling back to its id
    fn file_of(&self, id: &'a str) -> &'a str {
        self.graph
            .node(id)
            .and_then(|n| n.resolved_file())
            .unwrap_or(id)
    }

    pub fn analyze(&self, request: &ChangeRequest) -> Result<ImpactAnalysis, ImpactError> {
        let target_files: Vec<String> = {
            let mut seen: Vec<String> = Vec::new();
            for f in &request.target_files {
                let f = normalize_path(f);
                if !f.is_empty() && !seen.contains(&f) {
                    seen.push(f);
                }
            }
            seen
        };

        let targets: Vec<&'a str> = self
            .graph
            .nodes()
            .iter()
            .filter(|&n| target_files.contains(&normalize_path(self.file_of(&n.id))))
            .map(|n| n.id.as_str())
            .collect();

        if targets.is_empty() {
            warn!(
                "Change {}: none of {} target files are in the dependency graph",
                request.id,
                target_files.len()
            );
        }

        let (visits, cycles_into_target) = self.traverse(&targets)?;
        let breaking = request.is_breaking();

        let affected_nodes: Vec<AffectedNode> = visits
            .iter()
            .map(|v| AffectedNode {
                id: v.id.to_string(),
                file: self.file_of(v.id).to_string(),
                depth: v.depth,
                impact: impact_level(v.depth, breaking),
            })
            .collect();

        let mut affected_files: Vec<String> = Vec::new();
        for node in &affected_nodes {
            if !affected_files.contains(&node.file) {
                affected_files.push(node.file.clone());
            }
        }

        let dependency_chain = build_chains(&visits);
        let breaking_changes = self.breaking_changes(request, &target_files, &targets);

        let count = |level: ImpactLevel| affected_nodes.iter().filter(|n| n.impact == level).count();
        let estimated_complexity = self
            .policy
            .complexity
            .estimate(affected_files.len(), breaking_changes.len());
        let summary = ImpactSummary {
            total_affected_files: affected_files.len(),
            total_affected_nodes: affected_nodes.len(),
            critical_impact: count(ImpactLevel::Critical),
            high_impact: count(ImpactLevel::High),
            medium_impact: count(ImpactLevel::Medium),
            low_impact: count(ImpactLevel::Low),
            breaking_changes_count: breaking_changes.len(),
            estimated_complexity,
        };

        let recommendations = self.recommendations(
            &breaking_changes,
            &cycles_into_target,
            &dependency_chain,
            &summary,
        );

        info!(
            "Change {}: {} affected nodes across {} files, complexity {}",
            request.id,
            summary.total_affected_nodes,
            summary.total_affected_files,
            summary.estimated_complexity
        );

        Ok(ImpactAnalysis {
            repository: self.repository.clone(),
            timestamp: Utc::now(),
            change_request: request.clone(),
            affected_nodes,
            affected_files,
            dependency_chain,
            breaking_changes,
            recommendations,
            summary,
        })
    }

    /// Multi-source BFS over reversed import edges. Returns consumers in
    /// discovery order plus the targets some consumer imports back.
    fn traverse(&self, targets: &[&'a str]) -> Result<(Vec<Visit<'a>>, Vec<&'a str>), ImpactError> {
        let target_set: HashSet<&str> = targets.iter().copied().collect();
        let mut seen: HashSet<&str> = target_set.clone();
        let mut depth_of: HashMap<&str, usize> = targets.iter().map(|t| (*t, 0)).collect();
        let mut queue: VecDeque<&'a str> = targets.iter().copied().collect();
        let mut visits = Vec::new();
        let mut cycles_into_target: Vec<&'a str> = Vec::new();

        while let Some(current) = queue.pop_front() {
            let depth = depth_of.get(current).copied().unwrap_or(0);
            for edge in self.graph.incoming(current, EdgeKind::Import) {
                let consumer = edge.from.as_str();
                if target_set.contains(consumer) {
                    // a target reached from a consumer means the change sits on a cycle
                    if depth > 0 && !cycles_into_target.contains(&consumer) {
                        cycles_into_target.push(consumer);
                    }
                    continue;
                }
                if !seen.insert(consumer) {
                    continue;
                }

                let next = depth + 1;
                if let Some(limit) = self.policy.max_depth {
                    if next > limit {
                        return Err(ImpactError::TraversalBudgetExceeded {
                            limit,
                            node: consumer.to_string(),
                        });
                    }
                }

                debug!("{} reached at depth {} via {}", consumer, next, current);
                depth_of.insert(consumer, next);
                visits.push(Visit {
                    id: consumer,
                    depth: next,
                    parent: current,
                });
                queue.push_back(consumer);
            }
        }

        Ok((visits, cycles_into_target))
    }

    fn breaking_changes(
        &self,
        request: &ChangeRequest,
        target_files: &[String],
        targets: &[&'a str],
    ) -> Vec<BreakingChange> {
        if !request.is_breaking() {
            return Vec::new();
        }

        let target_set: HashSet<&str> = targets.iter().copied().collect();
        let mut out = Vec::new();

        for file in target_files {
            let mut consumers: Vec<String> = Vec::new();
            for node in targets
                .iter()
                .filter(|&&t| normalize_path(self.file_of(t)) == *file)
            {
                for edge in self.graph.incoming(node, EdgeKind::Import) {
                    if target_set.contains(edge.from.as_str()) {
                        continue;
                    }
                    let consumer = self.file_of(&edge.from).to_string();
                    if !consumers.contains(&consumer) {
                        consumers.push(consumer);
                    }
                }
            }
            if consumers.is_empty() {
                continue;
            }

            out.push(BreakingChange {
                file: file.clone(),
                change_type: request.change_type,
                reason: breaking_reason(request),
                affected_consumers: consumers,
                severity: if request.change_type == ChangeType::Remove {
                    Severity::High
                } else {
                    Severity::Medium
                },
            });
        }

        out
    }

    fn recommendations(
        &self,
        breaking: &[BreakingChange],
        cycles_into_target: &[&'a str],
        chain: &DependencyChain,
        summary: &ImpactSummary,
    ) -> Vec<String> {
        let mut recs = Vec::new();

        if !breaking.is_empty() {
            let dependents: HashSet<&str> = breaking
                .iter()
                .flat_map(|b| b.affected_consumers.iter().map(String::as_str))
                .collect();
            recs.push(format!(
                "Update {} dependent modules before merging",
                dependents.len()
            ));
        }

        if !cycles_into_target.is_empty() {
            let files: Vec<&str> = cycles_into_target.iter().map(|&id| self.file_of(id)).collect();
            recs.push(format!(
                "Break the circular dependency through {} before making this change",
                files.join(", ")
            ));
        }

        let deep = chain
            .chains
            .iter()
            .filter(|c| c.len() >= self.policy.deep_chain_len)
            .count();
        if deep > 0 {
            recs.push(format!(
                "Add integration tests covering the {} dependency chains of {} or more modules",
                deep, self.policy.deep_chain_len
            ));
        }

        if summary.estimated_complexity >= Complexity::High {
            recs.push(
                "Split this change into smaller, independently mergeable steps".to_string(),
            );
        }

        if summary.total_affected_nodes == 0 {
            recs.push("No dependent modules found; this change is isolated".to_string());
        }

        recs
    }
}

fn impact_level(depth: usize, breaking: bool) -> ImpactLevel {
    match depth {
        0 | 1 if breaking => ImpactLevel::Critical,
        0 | 1 => ImpactLevel::High,
        2 => ImpactLevel::Medium,
        _ => ImpactLevel::Low,
    }
}

fn breaking_reason(request: &ChangeRequest) -> String {
    let removed = request.removed_exports.join(", ");
    match (request.change_type, request.signature_change, removed.is_empty()) {
        (ChangeType::Remove, _, _) => {
            "File is removed while other modules still import it".to_string()
        }
        (ChangeType::Modify, true, true) => "Public signature changes incompatibly".to_string(),
        (ChangeType::Modify, true, false) => format!(
            "Public signature changes incompatibly and exports {} are removed",
            removed
        ),
        _ => format!("Exports {} are removed", removed),
    }
}

fn build_chains(visits: &[Visit<'_>]) -> DependencyChain {
    let parent: HashMap<&str, &str> = visits.iter().map(|v| (v.id, v.parent)).collect();

    let chains: Vec<Vec<String>> = visits
        .iter()
        .map(|v| {
            let mut path = vec![v.id.to_string()];
            let mut cursor = v.id;
            while let Some(p) = parent.get(cursor) {
                path.push(p.to_string());
                cursor = *p;
            }
            path.reverse();
            path
        })
        .collect();

    DependencyChain {
        max_depth: chains.iter().map(Vec::len).max().unwrap_or(0),
        total_affected: visits.len(),
        chains,
    }
}
