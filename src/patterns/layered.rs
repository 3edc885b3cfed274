//! Layered architecture recognizer
//!
//! Controller, service and repository files all present means requests
//! are likely routed through distinct presentation, business and data
//! access layers.

use crate::graph::DependencyGraph;
use crate::models::{ParsedFile, Pattern, PatternKind};
use crate::patterns::keywords::{PatternKeywords, Role};
use crate::patterns::{unique_in_order, PatternRecognizer};
use tracing::debug;

pub const LAYERED_PATTERN_NAME: &str = "Layered Architecture";
pub const LAYERED_CONFIDENCE: f64 = 0.8;

pub struct LayeredRecognizer;

impl PatternRecognizer for LayeredRecognizer {
    fn name(&self) -> &'static str {
        "layered"
    }

    fn recognize(
        &self,
        files: &[ParsedFile],
        _graph: &DependencyGraph,
        keywords: &PatternKeywords,
    ) -> Option<Pattern> {
        let paths = || files.iter().map(|f| f.path.as_str());
        let controllers = keywords.files_with_role(Role::Controller, paths());
        let services = keywords.files_with_role(Role::Service, paths());
        let repositories = keywords.files_with_role(Role::Repository, paths());

        if controllers.is_empty() || services.is_empty() || repositories.is_empty() {
            debug!(
                "No layered architecture: {} controllers, {} services, {} repositories",
                controllers.len(),
                services.len(),
                repositories.len()
            );
            return None;
        }

        Some(Pattern {
            name: LAYERED_PATTERN_NAME.to_string(),
            kind: PatternKind::Architectural,
            confidence: LAYERED_CONFIDENCE,
            description: "Controllers delegate to services, which delegate to repositories"
                .to_string(),
            files: unique_in_order([controllers, services, repositories]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(paths: &[&str]) -> Option<Pattern> {
        let files: Vec<ParsedFile> = paths.iter().map(|p| ParsedFile::new(p)).collect();
        let graph = DependencyGraph::new(vec![], vec![]).unwrap();
        LayeredRecognizer.recognize(&files, &graph, &PatternKeywords::default())
    }

    #[test]
    fn test_all_three_layers() {
        let pattern = recognize(&[
            "src/user.repo.ts",
            "src/UserService.ts",
            "src/UserController.ts",
        ])
        .unwrap();
        assert_eq!(pattern.name, "Layered Architecture");
        assert_eq!(pattern.confidence, 0.8);
        assert_eq!(
            pattern.files,
            vec!["src/UserController.ts", "src/UserService.ts", "src/user.repo.ts"]
        );
    }

    #[test]
    fn test_missing_repository_is_partial() {
        assert!(recognize(&["src/UserService.ts", "src/UserController.ts"]).is_none());
    }
}
