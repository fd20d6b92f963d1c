//! Delimiter-joined table output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TableError};
use crate::table::DataTable;

/// Write a table as delimited text, one line per row in current order.
///
/// Cells render with their `Display` form; NA renders as the literal text
/// `NA`. The header line is written when `with_header` is set. An empty
/// path or delimiter fails with [`TableError::InvalidArgument`] before any
/// I/O.
pub fn write(
    table: &DataTable,
    path: impl AsRef<Path>,
    delimiter: &str,
    with_header: bool,
) -> Result<()> {
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

    let mut out = BufWriter::new(File::create(path)?);
    if with_header {
        writeln!(out, "{}", table.column_labels().join(delimiter))?;
    }
    for row in table.rows() {
        let line: Vec<String> = row.values().iter().map(|c| c.to_string()).collect();
        writeln!(out, "{}", line.join(delimiter))?;
    }
    out.flush()?;
    Ok(())
}
