//! Architecture scorer
//!
//! Reduces issues and anti-patterns to one 0-100 score. The score is a pure
//! function of its inputs: it never looks at order, and adding a problem
//! can never raise it.

use crate::models::{AntiPattern, ArchitectureIssue, Severity};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// Score before any deductions
pub const MAX_SCORE: u8 = 100;

/// Points deducted per item of each severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityWeights {
    pub const fn new(high: u32, medium: u32, low: u32) -> Self {
        Self { high, medium, low }
    }

    pub fn weight(&self, severity: Severity) -> u32 {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }
}

/// Default deductions per issue
pub const ISSUE_WEIGHTS: SeverityWeights = SeverityWeights::new(10, 5, 2);

/// Default deductions per anti-pattern
pub const ANTI_PATTERN_WEIGHTS: SeverityWeights = SeverityWeights::new(8, 4, 2);

impl Default for SeverityWeights {
    fn default() -> Self {
        ISSUE_WEIGHTS
    }
}

/// A weight table as written in config; missing severities keep the
/// table's own defaults
#[derive(Debug, Default, Deserialize)]
struct PartialWeights {
    high: Option<u32>,
    medium: Option<u32>,
    low: Option<u32>,
}

impl PartialWeights {
    fn or(self, base: SeverityWeights) -> SeverityWeights {
        SeverityWeights {
            high: self.high.unwrap_or(base.high),
            medium: self.medium.unwrap_or(base.medium),
            low: self.low.unwrap_or(base.low),
        }
    }
}

fn default_issue_weights() -> SeverityWeights {
    ISSUE_WEIGHTS
}

fn default_anti_pattern_weights() -> SeverityWeights {
    ANTI_PATTERN_WEIGHTS
}

fn issue_weights<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SeverityWeights, D::Error> {
    PartialWeights::deserialize(deserializer).map(|w| w.or(ISSUE_WEIGHTS))
}

fn anti_pattern_weights<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<SeverityWeights, D::Error> {
    PartialWeights::deserialize(deserializer).map(|w| w.or(ANTI_PATTERN_WEIGHTS))
}

/// `[scoring]` config section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_issue_weights", deserialize_with = "issue_weights")]
    pub issue_weights: SeverityWeights,

    #[serde(
        default = "default_anti_pattern_weights",
        deserialize_with = "anti_pattern_weights"
    )]
    pub anti_pattern_weights: SeverityWeights,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            issue_weights: ISSUE_WEIGHTS,
            anti_pattern_weights: ANTI_PATTERN_WEIGHTS,
        }
    }
}

/// Computes the architecture score from weight tables
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchitectureScorer {
    config: ScoringConfig,
}

impl ArchitectureScorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Total deduction before clamping
    pub fn penalty(&self, issues: &[ArchitectureIssue], anti_patterns: &[AntiPattern]) -> u64 {
        let issue_penalty: u64 = issues
            .iter()
            .map(|i| u64::from(self.config.issue_weights.weight(i.severity)))
            .sum();
        let anti_pattern_penalty: u64 = anti_patterns
            .iter()
            .map(|a| u64::from(self.config.anti_pattern_weights.weight(a.severity)))
            .sum();
        issue_penalty + anti_pattern_penalty
    }

    /// Score in `0..=100`
    pub fn score(&self, issues: &[ArchitectureIssue], anti_patterns: &[AntiPattern]) -> u8 {
        let penalty = self.penalty(issues, anti_patterns);
        let score = u64::from(MAX_SCORE).saturating_sub(penalty) as u8;
        debug!(
            "Scored {} issues and {} anti-patterns: penalty {}, score {}",
            issues.len(),
            anti_patterns.len(),
            penalty,
            score
        );
        score
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::models::IssueKind;
    use proptest::prelude::*;

    fn severity_strategy() -> impl Strategy<Value = Severity> {
        prop_oneof![Just(Severity::High), Just(Severity::Medium), Just(Severity::Low)]
    }

    fn issue_strategy() -> impl Strategy<Value = ArchitectureIssue> {
        (severity_strategy(), 0usize..50).prop_map(|(severity, n)| ArchitectureIssue {
            id: format!("{n:016x}"),
            kind: IssueKind::TightCoupling,
            severity,
            title: String::new(),
            description: String::new(),
            affected_files: vec![format!("src/f{n}.ts")],
            recommendation: String::new(),
        })
    }

    fn anti_pattern_strategy() -> impl Strategy<Value = AntiPattern> {
        severity_strategy().prop_map(|severity| AntiPattern {
            name: "Layer Bypass".to_string(),
            severity,
            files: vec![],
            description: String::new(),
            recommendation: String::new(),
        })
    }

    proptest! {
        /// Property: reordering the inputs never changes the score
        #[test]
        fn order_independent(
            (issues, shuffled_issues) in prop::collection::vec(issue_strategy(), 0..30)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
            (antis, shuffled_antis) in prop::collection::vec(anti_pattern_strategy(), 0..5)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let scorer = ArchitectureScorer::default();
            prop_assert_eq!(
                scorer.score(&issues, &antis),
                scorer.score(&shuffled_issues, &shuffled_antis)
            );
        }

        /// Property: adding an issue never raises the score
        #[test]
        fn monotonic(
            issues in prop::collection::vec(issue_strategy(), 0..30),
            extra in issue_strategy()
        ) {
            let scorer = ArchitectureScorer::default();
            let before = scorer.score(&issues, &[]);
            let mut more = issues.clone();
            more.push(extra);
            prop_assert!(scorer.score(&more, &[]) <= before);
        }

        /// Property: score stays within 0..=100
        #[test]
        fn clamped(
            issues in prop::collection::vec(issue_strategy(), 0..200),
            antis in prop::collection::vec(anti_pattern_strategy(), 0..10)
        ) {
            let score = ArchitectureScorer::default().score(&issues, &antis);
            prop_assert!(score <= MAX_SCORE);
        }
    }
}
