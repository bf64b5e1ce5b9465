//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Errors raised while turning a record into a tree.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unsupported value kind: {0} is not a record")]
    UnsupportedValueKind(String),

    #[error("record nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),

    #[error("{source} on struct branch {field}")]
    Field {
        field: String,
        #[source]
        source: Box<DomainError>,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
