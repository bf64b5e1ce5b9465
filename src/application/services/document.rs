//! TOML document service
//!
//! Renders the structure of a TOML document through the record adapter:
//! tables are records (keys in document order), everything else is a scalar.

use std::fs;
use std::path::Path;

use toml::{Table, Value};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{from_record_with, Field, Inspect, Shape, Tree, TreeMode, DEFAULT_MAX_DEPTH};

impl Inspect for Table {
    fn type_name(&self) -> &'static str {
        "table"
    }

    fn shape(&self) -> Shape<'_> {
        Shape::Record(self.iter().map(|(key, value)| Field::new(key, value)).collect())
    }
}

impl Inspect for Value {
    fn type_name(&self) -> &'static str {
        self.type_str()
    }

    fn shape(&self) -> Shape<'_> {
        match self {
            Value::String(s) => s.shape(),
            Value::Integer(i) => i.shape(),
            Value::Float(f) => f.shape(),
            Value::Boolean(b) => b.shape(),
            Value::Datetime(dt) => Shape::Scalar {
                text: dt.to_string(),
                empty: false,
            },
            Value::Array(items) => items.shape(),
            Value::Table(table) => table.shape(),
        }
    }
}

/// Service for rendering TOML documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    mode: TreeMode,
    max_depth: usize,
}

impl Default for DocumentService {
    fn default() -> Self {
        Self::new(TreeMode::default(), DEFAULT_MAX_DEPTH)
    }
}

impl DocumentService {
    pub fn new(mode: TreeMode, max_depth: usize) -> Self {
        Self { mode, max_depth }
    }

    /// Read and adapt a TOML file.
    #[instrument(level = "debug", skip(self))]
    pub fn build_from_file(&self, path: &Path) -> ApplicationResult<Tree> {
        if !path.exists() {
            return Err(ApplicationError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).with_path_context("read document", path)?;
        self.build_from_str(&content, path)
    }

    /// Adapt TOML text; `origin` is only used in error messages.
    pub fn build_from_str(&self, content: &str, origin: &Path) -> ApplicationResult<Tree> {
        let table: Table = toml::from_str(content).map_err(|e| ApplicationError::Parse {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })?;
        debug!(keys = table.len(), mode = %self.mode, "parsed document");
        Ok(from_record_with(&table, self.mode, self.max_depth)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    const DOCUMENT: &str = r#"
title = "example"
tags = ["a", "b"]

[owner]
name = "Tom"
active = true

[empty]
"#;

    #[test]
    fn given_document_then_keys_keep_document_order() {
        let tree = DocumentService::default()
            .build_from_str(DOCUMENT, Path::new("inline.toml"))
            .unwrap();
        let expected = "\
.
├── [example]  title
├── [[a, b]]  tags
├── owner
│   ├── [Tom]  name
│   └── [true]  active
└── [{}]  empty
";
        assert_eq!(tree.render(), expected);
    }

    #[test]
    fn given_name_mode_then_values_hidden() {
        let tree = DocumentService::new(TreeMode::Name, DEFAULT_MAX_DEPTH)
            .build_from_str(DOCUMENT, Path::new("inline.toml"))
            .unwrap();
        assert_eq!(tree.render(), ".\n├── title\n├── tags\n├── owner\n│   ├── name\n│   └── active\n└── empty\n");
    }

    #[test]
    fn given_scalar_value_then_not_a_record() {
        let value = Value::Integer(7);
        let err = crate::domain::from_record(&value, TreeMode::Value).unwrap_err();
        assert!(matches!(err, DomainError::UnsupportedValueKind(ref kind) if kind == "integer"));
    }

    #[test]
    fn given_deep_document_beyond_limit_then_error_names_table() {
        let err = DocumentService::new(TreeMode::Value, 1)
            .build_from_str(DOCUMENT, Path::new("inline.toml"))
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::Field { ref field, .. }) if field == "owner"
        ));
    }
}
