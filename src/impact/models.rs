//! Change request and impact analysis data types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Severity;

/// Kind of change being proposed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    AddFeature,
    Modify,
    Remove,
    Refactor,
    BugFix,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ChangeType::AddFeature => "add-feature",
            ChangeType::Modify => "modify",
            ChangeType::Remove => "remove",
            ChangeType::Refactor => "refactor",
            ChangeType::BugFix => "bug-fix",
        };
        f.write_str(s)
    }
}

/// A proposed modification to one or more files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRequest {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub target_files: Vec<String>,
    /// Exported symbols the change deletes
    #[serde(default)]
    pub removed_exports: Vec<String>,
    /// Whether a public signature changes incompatibly
    #[serde(default)]
    pub signature_change: bool,
}

impl ChangeRequest {
    pub fn new(id: &str, change_type: ChangeType, target_files: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            description: String::new(),
            change_type,
            target_files: target_files.iter().map(|f| f.to_string()).collect(),
            removed_exports: Vec::new(),
            signature_change: false,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_removed_exports(mut self, exports: &[&str]) -> Self {
        self.removed_exports = exports.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_signature_change(mut self) -> Self {
        self.signature_change = true;
        self
    }

    /// Whether this change breaks the consumers of its targets
    pub fn is_breaking(&self) -> bool {
        match self.change_type {
            ChangeType::Remove => true,
            ChangeType::Modify => self.signature_change || !self.removed_exports.is_empty(),
            _ => !self.removed_exports.is_empty(),
        }
    }
}

/// How strongly one consumer is affected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// A consumer reached from the change targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedNode {
    pub id: String,
    pub file: String,
    /// Hops from the nearest target
    pub depth: usize,
    pub impact: ImpactLevel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyChain {
    /// One path per consumer, target first
    pub chains: Vec<Vec<String>>,
    /// Node count of the longest chain
    pub max_depth: usize,
    pub total_affected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakingChange {
    pub file: String,
    pub change_type: ChangeType,
    pub reason: String,
    pub affected_consumers: Vec<String>,
    pub severity: Severity,
}

/// Estimated effort of landing a change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
            Complexity::Critical => "critical",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactSummary {
    pub total_affected_files: usize,
    pub total_affected_nodes: usize,
    pub critical_impact: usize,
    pub high_impact: usize,
    pub medium_impact: usize,
    pub low_impact: usize,
    pub breaking_changes_count: usize,
    pub estimated_complexity: Complexity,
}

/// Projected blast radius of one change request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalysis {
    pub repository: String,
    pub timestamp: DateTime<Utc>,
    pub change_request: ChangeRequest,
    pub affected_nodes: Vec<AffectedNode>,
    pub affected_files: Vec<String>,
    pub dependency_chain: DependencyChain,
    pub breaking_changes: Vec<BreakingChange>,
    pub recommendations: Vec<String>,
    pub summary: ImpactSummary,
}

impl ImpactAnalysis {
    pub fn has_impact(&self) -> bool {
        !self.affected_nodes.is_empty()
    }
}
