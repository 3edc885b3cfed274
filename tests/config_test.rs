//! Config file loading

use archgraph::config::{ArchConfig, ConfigError};
use archgraph::impact::Complexity;
use archgraph::patterns::Role;
use std::fs;

#[test]
fn test_full_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("archgraph.toml");
    fs::write(
        &path,
        r#"
[thresholds]
god_object_methods = 30
tight_coupling_imports = 6

[patterns]
repository = ["dao"]

[scoring.issue_weights]
high = 20
medium = 5
low = 1

[impact]
max_depth = 12

[impact.complexity]
critical_files = 10
critical_breaking = 1

[detectors]
disabled = ["layer-violation"]
"#,
    )
    .unwrap();

    let config = ArchConfig::from_file(&path).unwrap();
    assert_eq!(config.thresholds.god_object_methods, 30);
    assert_eq!(config.thresholds.max_exports, 15);
    assert_eq!(config.thresholds.tight_coupling_imports, 6);
    assert!(config.patterns.matches(Role::Repository, "OrderDao.java"));
    assert_eq!(config.scoring.issue_weights.high, 20);
    assert_eq!(config.scoring.anti_pattern_weights.high, 8);
    assert_eq!(config.impact.max_depth, Some(12));
    assert_eq!(config.impact.complexity.estimate(10, 1), Complexity::Critical);
    assert!(!config.detectors.is_enabled("layer-violation"));
}

#[test]
fn test_explicit_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        ArchConfig::from_file(&missing),
        Err(ConfigError::Io { .. })
    ));

    let yaml = dir.path().join("config.yaml");
    fs::write(&yaml, "thresholds: {}").unwrap();
    assert!(matches!(
        ArchConfig::from_file(&yaml),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let bad_json = dir.path().join("config.json");
    fs::write(&bad_json, "{\"thresholds\": 3}").unwrap();
    assert!(matches!(
        ArchConfig::from_file(&bad_json),
        Err(ConfigError::Json { .. })
    ));
}
