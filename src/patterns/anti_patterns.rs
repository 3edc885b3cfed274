//! Anti-pattern catalog
//!
//! Named anti-patterns are derived from the issues the detectors found.
//! Each catalog entry fires at most once per assessment and lists every
//! file involved.

use crate::models::{AntiPattern, ArchitectureIssue, IssueKind, Severity};

struct CatalogEntry {
    name: &'static str,
    source: IssueKind,
    severity: Severity,
    description: &'static str,
    recommendation: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "God Object",
        source: IssueKind::GodObject,
        severity: Severity::High,
        description: "Classes that centralize too many responsibilities",
        recommendation: "Break large classes into smaller, single-purpose collaborators",
    },
    CatalogEntry {
        name: "Cyclic Dependencies",
        source: IssueKind::CircularDependency,
        severity: Severity::High,
        description: "Modules that import each other directly or transitively",
        recommendation: "Invert one dependency or extract the shared code into a new module",
    },
    CatalogEntry {
        name: "Layer Bypass",
        source: IssueKind::LayerViolation,
        severity: Severity::Medium,
        description: "Presentation code reaching the data layer directly",
        recommendation: "Route data access through the backend service layer",
    },
];

/// Derive catalog anti-patterns from detected issues
pub fn derive_anti_patterns(issues: &[ArchitectureIssue]) -> Vec<AntiPattern> {
    CATALOG
        .iter()
        .filter_map(|entry| {
            let matching: Vec<&ArchitectureIssue> =
                issues.iter().filter(|i| i.kind == entry.source).collect();
            if matching.is_empty() {
                return None;
            }

            let mut files: Vec<String> = Vec::new();
            for file in matching.iter().flat_map(|i| &i.affected_files) {
                if !files.contains(file) {
                    files.push(file.clone());
                }
            }

            Some(AntiPattern {
                name: entry.name.to_string(),
                severity: entry.severity,
                files,
                description: format!("{} ({} occurrences)", entry.description, matching.len()),
                recommendation: entry.recommendation.to_string(),
            })
        })
        .collect()
}
