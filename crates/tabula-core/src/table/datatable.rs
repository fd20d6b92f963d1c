//! The immutable, schema-validated table container.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Result, TableError};

use super::{Cell, Filter, Row, Schema};

/// An ordered collection of rows plus the schema they conform to.
///
/// Tables are value objects: every transformation builds and returns a new
/// table, and the original stays valid. The single controlled exception is
/// [`DataTable::set_at`], which takes `&mut self` so the borrow checker
/// enforces that the caller exclusively owns the table being mutated
/// (typically a private copy from [`DataTable::deep_copy`]).
#[derive(Clone, Debug)]
pub struct DataTable {
    rows: IndexMap<usize, Row>,
    schema: Schema,
    labels: Arc<[String]>,
}

impl DataTable {
    /// Build a table from pre-assembled rows, validating every row against
    /// the schema.
    ///
    /// Each row must have exactly one cell per schema column, and every
    /// non-NA cell must carry the column's declared type; violations fail
    /// with [`TableError::Schema`]. Row ids are normalized to the map keys.
    pub fn new(rows: IndexMap<usize, Row>, schema: Schema) -> Result<Self> {
        let labels: Arc<[String]> = schema.labels().map(String::from).collect();
        let mut validated = IndexMap::with_capacity(rows.len());
        for (id, row) in rows {
            let values = row.into_values();
            Self::check_row(id, &values, &schema)?;
            validated.insert(id, Row::new(id, values, Arc::clone(&labels)));
        }
        Ok(Self {
            rows: validated,
            schema,
            labels,
        })
    }

    /// Build a table from an iterable of cell rows (covers both the 2D
    /// matrix and iterator-of-rows lifecycles). Ids are assigned 0..n-1.
    pub fn from_rows<I>(schema: Schema, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        let labels: Arc<[String]> = schema.labels().map(String::from).collect();
        let mut map = IndexMap::new();
        for (id, values) in rows.into_iter().enumerate() {
            Self::check_row(id, &values, &schema)?;
            map.insert(id, Row::new(id, values, Arc::clone(&labels)));
        }
        Ok(Self {
            rows: map,
            schema,
            labels,
        })
    }

    fn check_row(id: usize, values: &[Cell], schema: &Schema) -> Result<()> {
        if values.len() != schema.len() {
            return Err(TableError::Schema(format!(
                "row {} has {} cells, schema has {} columns",
                id,
                values.len(),
                schema.len()
            )));
        }
        for (cell, col) in values.iter().zip(schema.columns()) {
            if !cell.conforms_to(col.dtype()) {
                return Err(TableError::Schema(format!(
                    "row {}: cell '{}' does not conform to column '{}' of type {}",
                    id,
                    cell,
                    col.label(),
                    col.dtype()
                )));
            }
        }
        Ok(())
    }

    // Rows taken from an already-valid table keep their invariants.
    pub(crate) fn from_validated(
        rows: IndexMap<usize, Row>,
        schema: Schema,
        labels: Arc<[String]>,
    ) -> Self {
        Self {
            rows,
            schema,
            labels,
        }
    }

    pub(crate) fn labels_arc(&self) -> Arc<[String]> {
        Arc::clone(&self.labels)
    }

    /// The table schema.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Ordered column labels.
    pub fn column_labels(&self) -> Vec<&str> {
        self.schema.labels().collect()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// True when a column with this label exists.
    pub fn contains_column(&self, label: &str) -> bool {
        self.schema.index_of(label).is_some()
    }

    /// Look up a row by id.
    pub fn get_row(&self, row_id: usize) -> Result<&Row> {
        self.rows
            .get(&row_id)
            .ok_or(TableError::RowNotFound(row_id))
    }

    pub(crate) fn get_row_mut(&mut self, row_id: usize) -> Result<&mut Row> {
        self.rows
            .get_mut(&row_id)
            .ok_or(TableError::RowNotFound(row_id))
    }

    /// Look up one cell by column name and row id.
    ///
    /// Fails with [`TableError::UnknownColumn`] before touching rows, then
    /// with [`TableError::RowNotFound`] if the id is absent.
    pub fn get_value(&self, column: &str, row_id: usize) -> Result<&Cell> {
        let idx = self.schema.require(column)?;
        let row = self.get_row(row_id)?;
        Ok(&row.values()[idx])
    }

    /// Iterate rows in insertion order.
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.values()
    }

    /// Iterate `(row_id, row)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Row)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    /// Ordered row ids.
    pub fn row_ids(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.keys().copied()
    }

    /// Keep exactly the rows the filter accepts, in original row-id order.
    ///
    /// Row ids are preserved and the schema is unchanged. Evaluation errors
    /// (unknown column, non-comparable operands) propagate.
    pub fn filter(&self, filter: &Filter) -> Result<DataTable> {
        let mut kept = IndexMap::new();
        for (id, row) in &self.rows {
            if filter.apply(row)? {
                kept.insert(*id, row.clone());
            }
        }
        Ok(Self::from_validated(
            kept,
            self.schema.clone(),
            Arc::clone(&self.labels),
        ))
    }
}

impl fmt::Display for DataTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DataTable({} rows × {} cols)",
            self.row_count(),
            self.column_count()
        )
    }
}
