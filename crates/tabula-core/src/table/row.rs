//! A single table record: a stable id plus one cell per schema column.

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, TableError};

use super::Cell;

/// An ordered tuple of cells for one record, addressable by column name.
///
/// The label slice is shared with the owning table, so cloning a row copies
/// its cells but not the column names.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    id: usize,
    values: Vec<Cell>,
    labels: Arc<[String]>,
}

impl Row {
    pub(crate) fn new(id: usize, values: Vec<Cell>, labels: Arc<[String]>) -> Self {
        Self { id, values, labels }
    }

    /// Stable row id within the owning table.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The ordered cell values.
    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    /// The ordered column labels, matching `values` by position.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Look up a cell by column name. Exact string match, no case folding.
    pub fn get(&self, column: &str) -> Result<&Cell> {
        let idx = self
            .labels
            .iter()
            .position(|l| l == column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        Ok(&self.values[idx])
    }

    pub(crate) fn set(&mut self, column: &str, value: Cell) -> Result<()> {
        let idx = self
            .labels
            .iter()
            .position(|l| l == column)
            .ok_or_else(|| TableError::UnknownColumn(column.to_string()))?;
        self.values[idx] = value;
        Ok(())
    }

    pub(crate) fn with_id(mut self, id: usize) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn into_values(self) -> Vec<Cell> {
        self.values
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, (label, value)) in self.labels.iter().zip(&self.values).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", label, value)?;
        }
        write!(f, " }}")
    }
}
