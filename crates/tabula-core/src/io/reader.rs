//! Two-pass CSV ingestion with per-column type inference.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;

use crate::error::{Result, TableError};
use crate::table::{Cell, Column, DataTable, DataType, Schema};

/// Read a delimited text file into a [`DataTable`].
///
/// Pass 1 reads the header line as column names and classifies every
/// non-blank cell to infer one type per column; pass 2 parses every cell
/// with the inferred type. Blank or absent cells become [`Cell::Na`] and do
/// not influence inference; ragged rows are padded with NA. Row ids are
/// assigned 0..n-1 in file order.
///
/// An empty path or delimiter fails with [`TableError::InvalidArgument`]
/// before any I/O; a file without a header line fails with
/// [`TableError::EmptyInput`].
pub fn read(path: impl AsRef<Path>, delimiter: &str) -> Result<DataTable> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(TableError::InvalidArgument(
            "file path must not be empty".to_string(),
        ));
    }
    if delimiter.is_empty() {
        return Err(TableError::InvalidArgument(
            "delimiter must not be empty".to_string(),
        ));
    }

    let mut lines = BufReader::new(File::open(path)?).lines();
    let header = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(TableError::EmptyInput(
                "CSV has no header line".to_string(),
            ));
        }
    };
    let headers: Vec<String> = header
        .split(delimiter)
        .map(|h| h.trim().to_string())
        .collect();

    // Pass 1: materialize raw rows and infer one type per column.
    let mut inferred: Vec<Option<DataType>> = vec![None; headers.len()];
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for line in lines {
        let line = line?;
        let fields: Vec<String> = line.split(delimiter).map(str::to_string).collect();
        for (i, slot) in inferred.iter_mut().enumerate() {
            let Some(field) = fields.get(i) else {
                continue;
            };
            let cell = field.trim();
            if cell.is_empty() {
                continue;
            }
            *slot = Some(promote(*slot, classify(cell)));
        }
        raw_rows.push(fields);
    }

    let columns: Vec<Column> = headers
        .iter()
        .zip(&inferred)
        .map(|(label, dtype)| Column::new(label, dtype.unwrap_or(DataType::String)))
        .collect();
    let schema = Schema::new(columns)?;

    // Pass 2: parse every cell with its column's inferred type.
    let width = headers.len();
    let rows = raw_rows.into_iter().map(|raw| {
        (0..width)
            .map(|i| match raw.get(i) {
                Some(field) => parse_cell(field, inferred[i].unwrap_or(DataType::String)),
                None => Cell::Na,
            })
            .collect()
    });

    DataTable::from_rows(schema, rows)
}

/// Classify one non-blank cell: base-10 integer, then floating point, then
/// case-insensitive boolean, else string.
pub(crate) fn classify(cell: &str) -> DataType {
    if cell.parse::<i64>().is_ok() {
        DataType::Integer
    } else if cell.parse::<f64>().is_ok() {
        DataType::Double
    } else if cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false") {
        DataType::Boolean
    } else {
        DataType::String
    }
}

/// Merge a newly classified cell type into the column's running type.
///
/// Lattice: unset takes the new type; equal types stay; any String makes
/// the column String; Integer and Double mix to Double; every other
/// mismatch degrades to String.
pub(crate) fn promote(prev: Option<DataType>, next: DataType) -> DataType {
    match prev {
        None => next,
        Some(p) if p == next => p,
        Some(DataType::String) => DataType::String,
        Some(_) if next == DataType::String => DataType::String,
        Some(DataType::Integer) if next == DataType::Double => DataType::Double,
        Some(DataType::Double) if next == DataType::Integer => DataType::Double,
        Some(_) => DataType::String,
    }
}

// Blank fields are NA. A typed parse failure here should not happen given
// pass 1's inference; it degrades to NA with a diagnostic instead of
// aborting the whole read.
fn parse_cell(raw: &str, dtype: DataType) -> Cell {
    let v = raw.trim();
    if v.is_empty() {
        return Cell::Na;
    }
    match dtype.parse(v) {
        Ok(cell) => cell,
        Err(_) => {
            warn!("cannot parse '{}' as {}, storing NA", v, dtype);
            Cell::Na
        }
    }
}
