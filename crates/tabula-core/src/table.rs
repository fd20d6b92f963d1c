//! Core table structures: typed cells, schemas, rows and the immutable
//! [`DataTable`] container they form.

mod cell;
mod column;
mod datatable;
mod filter;
mod row;
mod sort;
mod transform;


// Re-exports
pub use cell::{Cell, DataType};
pub use column::{Column, Schema};
pub use datatable::DataTable;
pub use filter::{Filter, LogicalOp, Operator};
pub use row::Row;
