//! Schema-preserving and schema-extending table transformations.
//!
//! Every operation validates its inputs up front and builds a fresh table;
//! partial mutation never occurs. The one in-place operation is
//! [`DataTable::set_at`], which requires exclusive ownership via `&mut self`.

use std::ops::Range;
use std::sync::Arc;

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, TableError};

use super::{Cell, Column, DataTable, DataType, Row, Schema};

impl DataTable {
    /// First `n` rows in current order. Larger `n` yields all rows.
    /// Row ids are preserved.
    pub fn head(&self, n: usize) -> DataTable {
        let rows: IndexMap<usize, Row> = self
            .iter()
            .take(n)
            .map(|(id, row)| (id, row.clone()))
            .collect();
        Self::from_validated(rows, self.schema().clone(), self.labels_arc())
    }

    /// Last `n` rows in current order. Larger `n` yields all rows.
    /// Row ids are preserved.
    pub fn tail(&self, n: usize) -> DataTable {
        let skip = self.row_count().saturating_sub(n);
        let rows: IndexMap<usize, Row> = self
            .iter()
            .skip(skip)
            .map(|(id, row)| (id, row.clone()))
            .collect();
        Self::from_validated(rows, self.schema().clone(), self.labels_arc())
    }

    /// Rows at positions `range` in current order, ids preserved.
    ///
    /// Fails with [`TableError::InvalidArgument`] when the range is inverted
    /// or reaches past the row count.
    pub fn slice(&self, range: Range<usize>) -> Result<DataTable> {
        if range.start > range.end || range.end > self.row_count() {
            return Err(TableError::InvalidArgument(format!(
                "slice {}..{} out of bounds for {} rows",
                range.start,
                range.end,
                self.row_count()
            )));
        }
        let rows: IndexMap<usize, Row> = self
            .iter()
            .skip(range.start)
            .take(range.end - range.start)
            .map(|(id, row)| (id, row.clone()))
            .collect();
        Ok(Self::from_validated(
            rows,
            self.schema().clone(),
            self.labels_arc(),
        ))
    }

    /// Uniform without-replacement sample of `n` distinct rows in random
    /// order, ids preserved. Pass a seed for deterministic output.
    ///
    /// Fails with [`TableError::InvalidArgument`] when `n` exceeds the row
    /// count.
    pub fn sample(&self, n: usize, seed: Option<u64>) -> Result<DataTable> {
        if n > self.row_count() {
            return Err(TableError::InvalidArgument(format!(
                "sample size {} exceeds row count {}",
                n,
                self.row_count()
            )));
        }

        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut ids: Vec<usize> = self.row_ids().collect();
        ids.shuffle(&mut rng);
        ids.truncate(n);

        let mut rows = IndexMap::with_capacity(n);
        for id in ids {
            rows.insert(id, self.get_row(id)?.clone());
        }
        Ok(Self::from_validated(
            rows,
            self.schema().clone(),
            self.labels_arc(),
        ))
    }

    /// Sample `ceil(fraction * row_count)` rows; `fraction` must be in
    /// `(0, 1]`.
    pub fn sample_fraction(&self, fraction: f64, seed: Option<u64>) -> Result<DataTable> {
        if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
            return Err(TableError::InvalidArgument(format!(
                "fraction must be in (0, 1], got {}",
                fraction
            )));
        }
        let n = (fraction * self.row_count() as f64).ceil() as usize;
        self.sample(n.min(self.row_count()), seed)
    }

    /// Append one column to the schema and to every row.
    ///
    /// `values` must hold exactly one cell per row; each value is coerced to
    /// `dtype` (NA passes through unchanged). An existing label fails with
    /// [`TableError::Schema`].
    pub fn add_column(&self, name: &str, dtype: DataType, values: Vec<Cell>) -> Result<DataTable> {
        if values.len() != self.row_count() {
            return Err(TableError::InvalidArgument(format!(
                "column '{}' has {} values, table has {} rows",
                name,
                values.len(),
                self.row_count()
            )));
        }
        let mut columns = self.schema().columns().to_vec();
        columns.push(Column::new(name, dtype));
        let schema = Schema::new(columns)?;

        let coerced: Vec<Cell> = values
            .iter()
            .map(|v| v.coerce(dtype))
            .collect::<Result<_>>()?;

        let labels: Arc<[String]> = schema.labels().map(String::from).collect();
        let mut rows = IndexMap::with_capacity(self.row_count());
        for ((id, row), value) in self.iter().zip(coerced) {
            let mut cells = row.values().to_vec();
            cells.push(value);
            rows.insert(id, Row::new(id, cells, Arc::clone(&labels)));
        }
        Ok(Self::from_validated(rows, schema, labels))
    }

    /// Remove a column from the schema and from every row.
    pub fn drop_column(&self, name: &str) -> Result<DataTable> {
        let idx = self.schema().require(name)?;
        let columns: Vec<Column> = self
            .schema()
            .columns()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, c)| c.clone())
            .collect();
        let schema = Schema::new(columns)?;

        let labels: Arc<[String]> = schema.labels().map(String::from).collect();
        let mut rows = IndexMap::with_capacity(self.row_count());
        for (id, row) in self.iter() {
            let cells: Vec<Cell> = row
                .values()
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, c)| c.clone())
                .collect();
            rows.insert(id, Row::new(id, cells, Arc::clone(&labels)));
        }
        Ok(Self::from_validated(rows, schema, labels))
    }

    /// Remove one row by id; the other ids are preserved.
    pub fn drop_row(&self, row_id: usize) -> Result<DataTable> {
        self.get_row(row_id)?;
        let rows: IndexMap<usize, Row> = self
            .iter()
            .filter(|(id, _)| *id != row_id)
            .map(|(id, row)| (id, row.clone()))
            .collect();
        Ok(Self::from_validated(
            rows,
            self.schema().clone(),
            self.labels_arc(),
        ))
    }

    /// All of `self`'s rows followed by all of `other`'s, row ids renumbered
    /// contiguously from 0.
    ///
    /// Requires identical column labels and types in the same order, else
    /// [`TableError::SchemaMismatch`].
    pub fn concat(&self, other: &DataTable) -> Result<DataTable> {
        if self.column_count() != other.column_count() {
            return Err(TableError::SchemaMismatch(format!(
                "column counts differ: {} vs {}",
                self.column_count(),
                other.column_count()
            )));
        }
        for (a, b) in self.schema().columns().iter().zip(other.schema().columns()) {
            if a != b {
                return Err(TableError::SchemaMismatch(format!(
                    "column '{}' ({}) vs '{}' ({})",
                    a.label(),
                    a.dtype(),
                    b.label(),
                    b.dtype()
                )));
            }
        }

        let labels = self.labels_arc();
        let mut rows = IndexMap::with_capacity(self.row_count() + other.row_count());
        for (id, row) in self.rows().chain(other.rows()).enumerate() {
            rows.insert(id, Row::new(id, row.values().to_vec(), Arc::clone(&labels)));
        }
        Ok(Self::from_validated(rows, self.schema().clone(), labels))
    }

    /// Replace every NA cell in `column` with `value` coerced to the
    /// column's declared type. Non-NA cells are deep-copied untouched.
    pub fn impute(&self, column: &str, value: &Cell) -> Result<DataTable> {
        let idx = self.schema().require(column)?;
        let dtype = self.schema().columns()[idx].dtype();
        let replacement = value.coerce(dtype)?;

        let labels = self.labels_arc();
        let mut rows = IndexMap::with_capacity(self.row_count());
        for (id, row) in self.iter() {
            let mut cells = row.values().to_vec();
            if cells[idx].is_na() {
                cells[idx] = replacement.clone();
            }
            rows.insert(id, Row::new(id, cells, Arc::clone(&labels)));
        }
        Ok(Self::from_validated(rows, self.schema().clone(), labels))
    }

    /// Fully independent copy of rows, columns and labels. Mutating the
    /// copy never affects the source.
    pub fn deep_copy(&self) -> DataTable {
        let labels: Arc<[String]> = self.schema().labels().map(String::from).collect();
        let rows: IndexMap<usize, Row> = self
            .iter()
            .map(|(id, row)| (id, Row::new(id, row.values().to_vec(), Arc::clone(&labels))))
            .collect();
        Self::from_validated(rows, self.schema().clone(), labels)
    }

    /// Assign one cell in place.
    ///
    /// Takes `&mut self`: the caller must exclusively own the table, which
    /// is exactly the "private working copy" discipline the ownership model
    /// asks for. The value is coerced to the column's declared type; an NA
    /// literal stores NA.
    pub fn set_at(&mut self, row_id: usize, column: &str, value: Cell) -> Result<()> {
        let dtype = self.schema().dtype_of(column)?;
        let coerced = value.coerce(dtype)?;
        let row = self.get_row_mut(row_id)?;
        row.set(column, coerced)
    }
}
