//! Delimited-text input and output.
//!
//! The format is deliberately plain: the first line holds column headers,
//! fields are split on the configured delimiter, and there is no quoting or
//! escaping support.

mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use reader::read;
pub use writer::write;
