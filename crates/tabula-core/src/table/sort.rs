//! Stable multi-key row ordering.

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::error::{Result, TableError};

use super::{Cell, DataTable, Row};

impl DataTable {
    /// Reorder rows by lexicographic comparison across the given key
    /// columns.
    ///
    /// Per key: numeric values compare as f64, same-family ordered values
    /// use their natural order, and when exactly one side is NA the non-NA
    /// value sorts first when ascending. Rows tying on every key keep their
    /// relative input order (the sort is stable). `ascending = false`
    /// reverses every key's comparison uniformly.
    ///
    /// Duplicate or unknown key columns fail with
    /// [`TableError::UnknownColumn`] before any comparison starts. The
    /// result is re-keyed under a fresh 0..n-1 row-id sequence.
    pub fn sort(&self, columns: &[&str], ascending: bool) -> Result<DataTable> {
        let mut key_indices = Vec::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].contains(col) {
                return Err(TableError::UnknownColumn(format!(
                    "{} (duplicate sort key)",
                    col
                )));
            }
            key_indices.push(self.schema().require(col)?);
        }

        let mut ordered: Vec<&Row> = self.rows().collect();
        ordered.sort_by(|a, b| {
            for &idx in &key_indices {
                let cmp = compare_key(&a.values()[idx], &b.values()[idx]);
                if cmp != Ordering::Equal {
                    return if ascending { cmp } else { cmp.reverse() };
                }
            }
            Ordering::Equal
        });

        let labels = self.labels_arc();
        let mut rows = IndexMap::with_capacity(ordered.len());
        for (id, row) in ordered.into_iter().enumerate() {
            rows.insert(id, row.clone().with_id(id));
        }
        Ok(Self::from_validated(rows, self.schema().clone(), labels))
    }
}

// Per-key comparison: f64 widening for numerics, natural order for
// same-family ordered values, non-NA before NA, everything else ties so the
// next key decides.
fn compare_key(a: &Cell, b: &Cell) -> Ordering {
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x.partial_cmp(&y).unwrap_or(Ordering::Equal);
    }
    match (a, b) {
        (Cell::Str(x), Cell::Str(y)) => x.cmp(y),
        (Cell::Bool(x), Cell::Bool(y)) => x.cmp(y),
        (Cell::Na, Cell::Na) => Ordering::Equal,
        (Cell::Na, _) => Ordering::Greater,
        (_, Cell::Na) => Ordering::Less,
        _ => Ordering::Equal,
    }
}
