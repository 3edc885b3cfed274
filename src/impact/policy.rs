//! Impact analysis policy (`[impact]` config section)

use serde::{Deserialize, Serialize};

use crate::impact::models::Complexity;

/// Thresholds mapping affected-file and breaking-change counts to a
/// complexity estimate. Levels are checked from critical down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityPolicy {
    /// Critical needs both counts at or above these
    pub critical_files: usize,
    pub critical_breaking: usize,
    /// High needs either count at or above these
    pub high_files: usize,
    pub high_breaking: usize,
    pub medium_files: usize,
    pub medium_breaking: usize,
}

impl Default for ComplexityPolicy {
    fn default() -> Self {
        Self {
            critical_files: 30,
            critical_breaking: 5,
            high_files: 15,
            high_breaking: 3,
            medium_files: 5,
            medium_breaking: 1,
        }
    }
}

impl ComplexityPolicy {
    pub fn estimate(&self, affected_files: usize, breaking: usize) -> Complexity {
        if affected_files >= self.critical_files && breaking >= self.critical_breaking {
            Complexity::Critical
        } else if affected_files >= self.high_files || breaking >= self.high_breaking {
            Complexity::High
        } else if affected_files >= self.medium_files || breaking >= self.medium_breaking {
            Complexity::Medium
        } else {
            Complexity::Low
        }
    }
}

/// Knobs for [`ImpactAnalyzer`](crate::impact::ImpactAnalyzer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactPolicy {
    pub complexity: ComplexityPolicy,
    /// Deepest consumer allowed before the analysis is refused
    pub max_depth: Option<usize>,
    /// Chains with at least this many nodes get an integration-test note
    pub deep_chain_len: usize,
}

impl Default for ImpactPolicy {
    fn default() -> Self {
        Self {
            complexity: ComplexityPolicy::default(),
            max_depth: None,
            deep_chain_len: 4,
        }
    }
}
