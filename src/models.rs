//! Core data models for archgraph
//!
//! These models are shared by the detectors, recognizers, scorer and
//! impact analyzer. Everything here is plain data that serializes to
//! camelCase JSON without loss.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Generate a deterministic issue ID.
///
/// The ID is a 16-character hex string derived from the issue type and
/// its primary affected file (plus an optional discriminator such as a
/// class name), so the same input always yields the same ID.
pub fn deterministic_issue_id(kind: IssueKind, primary_file: &str, discriminator: &str) -> String {
    let input = format!("{}\n{}\n{}", kind.as_str(), primary_file, discriminator);
    format!("{:016x}", xxh3_64(input.as_bytes()))
}

/// Severity levels for issues and anti-patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Kinds of architecture issue the detectors emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    CircularDependency,
    GodObject,
    ExcessiveExports,
    LargeFile,
    TightCoupling,
    #[serde(rename = "violation-of-layers")]
    LayerViolation,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::CircularDependency => "circular-dependency",
            IssueKind::GodObject => "god-object",
            IssueKind::ExcessiveExports => "excessive-exports",
            IssueKind::LargeFile => "large-file",
            IssueKind::TightCoupling => "tight-coupling",
            IssueKind::LayerViolation => "violation-of-layers",
        }
    }
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structural problem found by one detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureIssue {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub affected_files: Vec<String>,
    pub recommendation: String,
}

impl ArchitectureIssue {
    /// First affected file, used for IDs and sorting
    pub fn primary_file(&self) -> &str {
        self.affected_files.first().map(String::as_str).unwrap_or("")
    }
}

/// Broad family a recognized pattern belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Architectural,
    Design,
}

/// A recognized architectural pattern with a heuristic confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PatternKind,
    /// Confidence score from 0.0 to 1.0
    pub confidence: f64,
    pub files: Vec<String>,
    pub description: String,
}

/// A named, severity-tagged structural problem with a canonical fix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AntiPattern {
    pub name: String,
    pub severity: Severity,
    pub files: Vec<String>,
    pub description: String,
    pub recommendation: String,
}

/// Why a detector contributed nothing (or a graph was refused)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    MissingGraph,
    MalformedGraph,
    DetectorFailed,
}

/// A recoverable condition recorded during an assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Detector or input the condition applies to
    pub source: String,
    pub message: String,
}

/// Aggregate output of one assessment run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchitectureAssessment {
    pub issues: Vec<ArchitectureIssue>,
    pub patterns: Vec<Pattern>,
    pub anti_patterns: Vec<AntiPattern>,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ArchitectureAssessment {
    /// Issues of one kind
    pub fn issues_of(&self, kind: IssueKind) -> impl Iterator<Item = &ArchitectureIssue> {
        self.issues.iter().filter(move |i| i.kind == kind)
    }
}

/// A class as reported by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<String>,
}

impl ClassRecord {
    pub fn new(name: &str, methods: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            methods,
        }
    }
}

/// One import statement as reported by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRecord {
    pub from: String,
    #[serde(default)]
    pub names: Vec<String>,
}

/// A parsed source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedFile {
    pub path: String,
    #[serde(default)]
    pub classes: Vec<ClassRecord>,
    #[serde(default)]
    pub functions: Vec<String>,
    #[serde(default)]
    pub exports: Vec<String>,
    #[serde(default)]
    pub imports: Vec<ImportRecord>,
    #[serde(default)]
    pub lines_of_code: usize,
}

impl ParsedFile {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Default::default()
        }
    }

    pub fn with_class(mut self, class: ClassRecord) -> Self {
        self.classes.push(class);
        self
    }

    pub fn with_exports(mut self, exports: Vec<String>) -> Self {
        self.exports = exports;
        self
    }

    pub fn with_lines(mut self, lines: usize) -> Self {
        self.lines_of_code = lines;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_id_is_stable() {
        let a = deterministic_issue_id(IssueKind::LargeFile, "src/a.ts", "");
        let b = deterministic_issue_id(IssueKind::LargeFile, "src/a.ts", "");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert_ne!(a, deterministic_issue_id(IssueKind::GodObject, "src/a.ts", ""));
    }

    #[test]
    fn test_issue_kind_wire_names() {
        let json = serde_json::to_value(IssueKind::LayerViolation).unwrap();
        assert_eq!(json, "violation-of-layers");
        let json = serde_json::to_value(IssueKind::CircularDependency).unwrap();
        assert_eq!(json, "circular-dependency");
    }

    #[test]
    fn test_parsed_file_defaults() {
        let file: ParsedFile =
            serde_json::from_str(r#"{"path":"src/user.ts","linesOfCode":42}"#).unwrap();
        assert_eq!(file.lines_of_code, 42);
        assert!(file.classes.is_empty());
    }

    #[test]
    fn test_assessment_omits_empty_diagnostics() {
        let assessment = ArchitectureAssessment {
            issues: vec![],
            patterns: vec![],
            anti_patterns: vec![],
            score: 100,
            diagnostics: vec![],
        };
        let json = serde_json::to_value(&assessment).unwrap();
        assert!(json.get("diagnostics").is_none());
        assert_eq!(json["antiPatterns"], serde_json::json!([]));
    }
}
