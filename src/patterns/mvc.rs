//! Model-View-Controller recognizer

use crate::graph::DependencyGraph;
use crate::models::{ParsedFile, Pattern, PatternKind};
use crate::patterns::keywords::{PatternKeywords, Role};
use crate::patterns::{unique_in_order, PatternRecognizer};
use tracing::debug;

pub const MVC_PATTERN_NAME: &str = "MVC (Model-View-Controller)";
pub const MVC_CONFIDENCE: f64 = 0.7;

/// Needs at least one controller and one model; views are optional.
pub struct MvcRecognizer;

impl PatternRecognizer for MvcRecognizer {
    fn name(&self) -> &'static str {
        "mvc"
    }

    fn recognize(
        &self,
        files: &[ParsedFile],
        _graph: &DependencyGraph,
        keywords: &PatternKeywords,
    ) -> Option<Pattern> {
        let paths = || files.iter().map(|f| f.path.as_str());
        let controllers = keywords.files_with_role(Role::Controller, paths());
        let models = keywords.files_with_role(Role::Model, paths());

        if controllers.is_empty() || models.is_empty() {
            debug!(
                "No MVC: {} controllers, {} models",
                controllers.len(),
                models.len()
            );
            return None;
        }

        let views = keywords.files_with_role(Role::View, paths());
        Some(Pattern {
            name: MVC_PATTERN_NAME.to_string(),
            kind: PatternKind::Architectural,
            confidence: MVC_CONFIDENCE,
            description: format!(
                "Separates {} controllers, {} models and {} views",
                controllers.len(),
                models.len(),
                views.len()
            ),
            files: unique_in_order([controllers, models, views]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> DependencyGraph {
        DependencyGraph::new(vec![], vec![]).unwrap()
    }

    fn files(paths: &[&str]) -> Vec<ParsedFile> {
        paths.iter().map(|p| ParsedFile::new(p)).collect()
    }

    #[test]
    fn test_controller_and_model_is_mvc() {
        let files = files(&["UserController.ts", "UserModel.ts"]);
        let pattern = MvcRecognizer
            .recognize(&files, &graph(), &PatternKeywords::default())
            .unwrap();
        assert_eq!(pattern.name, "MVC (Model-View-Controller)");
        assert_eq!(pattern.confidence, 0.7);
        assert_eq!(pattern.files, vec!["UserController.ts", "UserModel.ts"]);
    }

    #[test]
    fn test_controller_alone_is_not_mvc() {
        let files = files(&["UserController.ts"]);
        assert!(MvcRecognizer
            .recognize(&files, &graph(), &PatternKeywords::default())
            .is_none());
    }

    #[test]
    fn test_file_listed_once_across_roles() {
        let files = files(&["ModelViewController.ts", "UserModel.ts", "list.view.tsx"]);
        let pattern = MvcRecognizer
            .recognize(&files, &graph(), &PatternKeywords::default())
            .unwrap();
        assert_eq!(
            pattern.files,
            vec!["ModelViewController.ts", "UserModel.ts", "list.view.tsx"]
        );
    }
}
