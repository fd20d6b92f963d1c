//! Column definitions and the ordered schema every row must conform to.

use crate::error::{Result, TableError};

use super::DataType;

/// One column definition: a label and a declared type. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    label: String,
    dtype: DataType,
}

impl Column {
    /// Create a new column definition.
    pub fn new(label: impl Into<String>, dtype: DataType) -> Self {
        Self {
            label: label.into(),
            dtype,
        }
    }

    /// The column label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The declared type.
    pub fn dtype(&self) -> DataType {
        self.dtype
    }
}

/// An ordered sequence of columns with unique labels.
///
/// The ordered list is the single source of truth; name-to-type lookup is
/// derived from it rather than kept in a second map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema, rejecting empty and duplicate labels.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        for (i, col) in columns.iter().enumerate() {
            if col.label().trim().is_empty() {
                return Err(TableError::Schema(format!(
                    "column {} has an empty label",
                    i
                )));
            }
            if columns[..i].iter().any(|c| c.label() == col.label()) {
                return Err(TableError::Schema(format!(
                    "duplicate column label '{}'",
                    col.label()
                )));
            }
        }
        Ok(Self { columns })
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when the schema has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The ordered column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Ordered column labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(Column::label)
    }

    /// Position of a column by exact label match. No case folding.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.label() == label)
    }

    /// Position of a column, failing with [`TableError::UnknownColumn`].
    pub fn require(&self, label: &str) -> Result<usize> {
        self.index_of(label)
            .ok_or_else(|| TableError::UnknownColumn(label.to_string()))
    }

    /// Declared type of a column, failing with [`TableError::UnknownColumn`].
    pub fn dtype_of(&self, label: &str) -> Result<DataType> {
        self.require(label).map(|i| self.columns[i].dtype())
    }
}
