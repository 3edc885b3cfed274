//! Architecture Scoring
//!
//! # Scoring Formula
//!
//! ```text
//! Score = clamp(100 - Σ issue_weight(severity) - Σ anti_pattern_weight(severity), 0, 100)
//! ```
//!
//! # Default Weights
//!
//! | Severity | Issue | Anti-pattern |
//! |----------|-------|--------------|
//! | High     | 10    | 8            |
//! | Medium   | 5     | 4            |
//! | Low      | 2     | 2            |
//!
//! Both tables can be overridden in the `[scoring]` config section.

mod architecture_scorer;

pub use architecture_scorer::{
    ArchitectureScorer, ScoringConfig, SeverityWeights, ANTI_PATTERN_WEIGHTS, ISSUE_WEIGHTS,
    MAX_SCORE,
};
