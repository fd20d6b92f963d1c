//! Tabula core: a small, strongly-typed, immutable in-memory table engine.
//!
//! A [`DataTable`] is an ordered collection of rows validated against a
//! [`Schema`]. Tables are value objects: filtering, sorting and every
//! structural transformation return a new table and leave the original
//! untouched. Delimited text goes in and out through [`io`], which infers
//! column types on read and marks absent cells with [`Cell::Na`].

pub mod error;
pub mod io;
pub mod table;

pub use error::{Result, TableError};
pub use table::{Cell, Column, DataTable, DataType, Filter, LogicalOp, Operator, Row, Schema};
