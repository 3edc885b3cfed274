//! Architectural pattern recognition
//!
//! Recognizers look for path naming conventions (controllers, models,
//! services, ...) and report a [`Pattern`] with a fixed heuristic
//! confidence. They only run when a dependency graph is available; without
//! one the recognizer is skipped and a `missing-graph` diagnostic is
//! recorded instead.
//!
//! The anti-pattern catalog lives here too, since it is the other half of
//! the "named structure" view of an assessment.

mod anti_patterns;
mod keywords;
mod layered;
mod mvc;

pub use anti_patterns::derive_anti_patterns;
pub use keywords::{PatternKeywords, Role};
pub use layered::{LayeredRecognizer, LAYERED_CONFIDENCE, LAYERED_PATTERN_NAME};
pub use mvc::{MvcRecognizer, MVC_CONFIDENCE, MVC_PATTERN_NAME};

use crate::graph::DependencyGraph;
use crate::models::{Diagnostic, DiagnosticKind, ParsedFile, Pattern};
use rayon::prelude::*;
use tracing::{info, warn};

/// A heuristic that recognizes one architectural pattern
pub trait PatternRecognizer: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return the pattern when every required role is present
    fn recognize(
        &self,
        files: &[ParsedFile],
        graph: &DependencyGraph,
        keywords: &PatternKeywords,
    ) -> Option<Pattern>;
}

/// Patterns found plus any recognizers that could not run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternRecognition {
    pub patterns: Vec<Pattern>,
    pub diagnostics: Vec<Diagnostic>,
}

fn recognizers() -> Vec<Box<dyn PatternRecognizer>> {
    vec![Box::new(MvcRecognizer), Box::new(LayeredRecognizer)]
}

/// Run every built-in recognizer
pub fn recognize_patterns(
    files: &[ParsedFile],
    graph: Option<&DependencyGraph>,
    keywords: &PatternKeywords,
) -> PatternRecognition {
    let recognizers = recognizers();

    let Some(graph) = graph else {
        let diagnostics = recognizers
            .iter()
            .map(|r| {
                warn!("Pattern recognizer {} skipped: no dependency graph", r.name());
                Diagnostic {
                    kind: DiagnosticKind::MissingGraph,
                    source: format!("pattern:{}", r.name()),
                    message: "dependency graph not provided".to_string(),
                }
            })
            .collect();
        return PatternRecognition {
            patterns: vec![],
            diagnostics,
        };
    };

    let patterns: Vec<Pattern> = recognizers
        .par_iter()
        .filter_map(|r| r.recognize(files, graph, keywords))
        .collect();

    info!("Recognized {} architectural patterns", patterns.len());
    PatternRecognition {
        patterns,
        diagnostics: vec![],
    }
}

/// Flatten role lists keeping the first occurrence of each path
pub(crate) fn unique_in_order<const N: usize>(groups: [Vec<&str>; N]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for path in groups.into_iter().flatten() {
        if !out.iter().any(|p| p == path) {
            out.push(path.to_string());
        }
    }
    out
}
