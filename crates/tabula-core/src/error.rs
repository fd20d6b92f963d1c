//! Error types for table operations.

use crate::table::DataType;

/// Errors surfaced by table construction, transformation and I/O.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("schemas do not match: {0}")]
    SchemaMismatch(String),

    #[error("column '{0}' not found")]
    UnknownColumn(String),

    #[error("row {0} not found")]
    RowNotFound(usize),

    #[error("{op} requires {expected} child filter(s), got {actual}")]
    Arity {
        op: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("values not comparable: {left} vs {right}")]
    NotComparable { left: String, right: String },

    #[error("empty input: {0}")]
    EmptyInput(String),

    #[error("cannot parse '{value}' as {target}")]
    Parse { value: String, target: DataType },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
