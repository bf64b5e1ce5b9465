//! Tests for DocumentService using TOML files on disk

use std::fs;
use std::path::PathBuf;

use rstest::rstest;
use tempfile::TempDir;

use treeprint::application::services::DocumentService;
use treeprint::application::ApplicationError;
use treeprint::domain::DEFAULT_MAX_DEPTH;
use treeprint::TreeMode;

const MANIFEST: &str = r#"
[package]
name = "demo"
version = "0.1.0"

[dependencies]
serde = "1"

[dependencies.tracing]
version = "0.1"
features = ["attributes"]
"#;

fn write_document(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write document");
    path
}

// ============================================================
// Rendering
// ============================================================

#[rstest]
#[case(TreeMode::Name, "\
.
├── package
│   ├── name
│   └── version
└── dependencies
    ├── serde
    └── tracing
        ├── version
        └── features
")]
#[case(TreeMode::Value, "\
.
├── package
│   ├── [demo]  name
│   └── [0.1.0]  version
└── dependencies
    ├── [1]  serde
    └── tracing
        ├── [0.1]  version
        └── [[attributes]]  features
")]
fn given_manifest_when_building_then_renders_tables_as_branches(#[case] mode: TreeMode, #[case] expected: &str) {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = write_document(&temp, "Cargo.toml", MANIFEST);

    // Act
    let tree = DocumentService::new(mode, DEFAULT_MAX_DEPTH)
        .build_from_file(&path)
        .unwrap();

    // Assert
    assert_eq!(tree.render(), expected);
}

#[test]
fn given_empty_document_when_building_then_only_start_marker() {
    let temp = TempDir::new().unwrap();
    let path = write_document(&temp, "empty.toml", "");

    let tree = DocumentService::default().build_from_file(&path).unwrap();

    assert!(tree.is_empty());
    assert_eq!(tree.render(), ".\n");
}

// ============================================================
// Errors
// ============================================================

#[test]
fn given_missing_file_when_building_then_not_found() {
    let temp = TempDir::new().unwrap();

    let err = DocumentService::default()
        .build_from_file(&temp.path().join("missing.toml"))
        .unwrap_err();

    assert!(matches!(err, ApplicationError::NotFound(_)));
}

#[test]
fn given_invalid_toml_when_building_then_parse_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = write_document(&temp, "broken.toml", "key = \n");

    let err = DocumentService::default().build_from_file(&path).unwrap_err();

    assert!(matches!(err, ApplicationError::Parse { .. }));
    assert!(err.to_string().contains("broken.toml"), "{err}");
}

#[test]
fn given_nesting_over_limit_when_building_then_error_names_branch() {
    let temp = TempDir::new().unwrap();
    let path = write_document(&temp, "Cargo.toml", MANIFEST);

    let err = DocumentService::new(TreeMode::Name, 2)
        .build_from_file(&path)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "record nesting exceeds maximum depth of 2 on struct branch tracing on struct branch dependencies"
    );
}
