//! God object detector - finds classes that do too much
//!
//! A "god object" is a class with so many methods that it has clearly
//! absorbed several responsibilities. These classes violate the Single
//! Responsibility Principle and are difficult to understand, test, and
//! maintain.

use crate::detectors::base::{AnalysisContext, Detector};
use crate::models::{deterministic_issue_id, ArchitectureIssue, IssueKind, Severity};
use anyhow::Result;
use tracing::{debug, info};

/// A class with more methods than this is a god object
pub const GOD_OBJECT_MAX_METHODS: usize = 20;

/// Detects god objects (classes with too many methods)
#[derive(Debug, Clone)]
pub struct GodClassDetector {
    max_methods: usize,
}

impl GodClassDetector {
    /// Create a new detector with the default threshold
    pub fn new() -> Self {
        Self::with_threshold(GOD_OBJECT_MAX_METHODS)
    }

    pub fn with_threshold(max_methods: usize) -> Self {
        Self { max_methods }
    }

    /// Generate refactoring suggestions
    fn suggest_refactoring(name: &str) -> String {
        format!(
            "Refactor '{}' to reduce its responsibilities:\n\
             1. Extract related methods into separate classes\n\
             2. Group methods that work with the same data\n\
             3. Prefer composition over a single coordinating class",
            name
        )
    }

    fn create_issue(file: &str, class_name: &str, method_count: usize) -> ArchitectureIssue {
        ArchitectureIssue {
            id: deterministic_issue_id(IssueKind::GodObject, file, class_name),
            kind: IssueKind::GodObject,
            severity: Severity::High,
            title: format!("God object detected: {}", class_name),
            description: format!(
                "Class '{}' in {} has {} methods, which suggests it has too many \
                 responsibilities.",
                class_name, file, method_count
            ),
            affected_files: vec![file.to_string()],
            recommendation: Self::suggest_refactoring(class_name),
        }
    }
}

impl Default for GodClassDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for GodClassDetector {
    fn name(&self) -> &'static str {
        "god-object"
    }

    fn description(&self) -> &'static str {
        "Detects classes with too many methods"
    }

    fn detect(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<ArchitectureIssue>> {
        let mut issues = Vec::new();

        for file in ctx.files {
            for class in &file.classes {
                let method_count = class.methods.len();
                if method_count > self.max_methods {
                    debug!(
                        "God object candidate {}::{} ({} methods)",
                        file.path, class.name, method_count
                    );
                    issues.push(Self::create_issue(&file.path, &class.name, method_count));
                }
            }
        }

        info!("GodClassDetector found {} god objects", issues.len());
        Ok(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassRecord, ParsedFile};

    fn class_with(methods: usize) -> ClassRecord {
        ClassRecord::new(
            "UserService",
            (0..methods).map(|i| format!("method{i}")).collect(),
        )
    }

    fn run(files: &[ParsedFile]) -> Vec<ArchitectureIssue> {
        GodClassDetector::new()
            .detect(&AnalysisContext::new(files))
            .unwrap()
    }

    #[test]
    fn test_exactly_threshold_is_fine() {
        let files = vec![ParsedFile::new("src/user.ts").with_class(class_with(20))];
        assert!(run(&files).is_empty());
    }

    #[test]
    fn test_one_over_threshold_is_flagged() {
        let files = vec![ParsedFile::new("src/user.ts").with_class(class_with(21))];
        let issues = run(&files);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[0].kind, IssueKind::GodObject);
        assert_eq!(issues[0].affected_files, vec!["src/user.ts"]);
    }

    #[test]
    fn test_id_keyed_by_file_and_class() {
        let files = vec![ParsedFile::new("src/user.ts")
            .with_class(class_with(25))
            .with_class(ClassRecord::new(
                "Other",
                (0..30).map(|i| format!("m{i}")).collect(),
            ))];
        let issues = run(&files);
        assert_eq!(issues.len(), 2);
        assert_ne!(issues[0].id, issues[1].id);
    }

    #[test]
    fn test_custom_threshold() {
        let files = vec![ParsedFile::new("src/user.ts").with_class(class_with(6))];
        let issues = GodClassDetector::with_threshold(5)
            .detect(&AnalysisContext::new(&files))
            .unwrap();
        assert_eq!(issues.len(), 1);
    }
}
