//! Typed cell values and the declared column types they conform to.
//!
//! A [`Cell`] is a closed sum type so comparisons and coercions are checked
//! exhaustively at compile time. The missing-value marker is the dedicated
//! [`Cell::Na`] variant: `Na == Na` holds, while `Na` never equals an empty
//! string or a numeric zero.

use std::fmt;

use crate::error::{Result, TableError};

/// Declared type of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataType {
    Integer,
    Float,
    Double,
    String,
    Boolean,
}

impl DataType {
    /// Check if the type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Double)
    }

    /// Parse a raw text field into a cell of this type.
    ///
    /// The field is trimmed first; booleans accept `true`/`false` in any
    /// case. Fails with [`TableError::Parse`] when the text is irrecoverable.
    pub fn parse(&self, raw: &str) -> Result<Cell> {
        let v = raw.trim();
        match self {
            Self::Integer => v
                .parse::<i64>()
                .map(Cell::Int)
                .map_err(|_| self.parse_error(v)),
            Self::Float => v
                .parse::<f32>()
                .map(Cell::Float)
                .map_err(|_| self.parse_error(v)),
            Self::Double => v
                .parse::<f64>()
                .map(Cell::Double)
                .map_err(|_| self.parse_error(v)),
            Self::Boolean => {
                if v.eq_ignore_ascii_case("true") {
                    Ok(Cell::Bool(true))
                } else if v.eq_ignore_ascii_case("false") {
                    Ok(Cell::Bool(false))
                } else {
                    Err(self.parse_error(v))
                }
            }
            Self::String => Ok(Cell::Str(v.to_string())),
        }
    }

    fn parse_error(&self, value: &str) -> TableError {
        TableError::Parse {
            value: value.to_string(),
            target: *self,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
        }
    }
}

/// One value of a table cell: a typed value or the NA marker.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f32),
    Double(f64),
    Str(String),
    Bool(bool),
    /// No data for this cell. Distinct from an empty string and from zero.
    Na,
}

impl Cell {
    /// Returns true for the NA marker.
    pub fn is_na(&self) -> bool {
        matches!(self, Self::Na)
    }

    /// The data type this cell carries, or `None` for NA.
    pub fn dtype(&self) -> Option<DataType> {
        match self {
            Self::Int(_) => Some(DataType::Integer),
            Self::Float(_) => Some(DataType::Float),
            Self::Double(_) => Some(DataType::Double),
            Self::Str(_) => Some(DataType::String),
            Self::Bool(_) => Some(DataType::Boolean),
            Self::Na => None,
        }
    }

    /// Widen a numeric cell to `f64`.
    ///
    /// This is the documented comparison policy for filters and sorts: an
    /// Integer column can be compared against a Float or Double literal and
    /// vice versa. Integers above 2^53 compare lossily.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(f64::from(*v)),
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this cell may live in a column of the given declared type.
    /// NA conforms to every column type.
    pub fn conforms_to(&self, dtype: DataType) -> bool {
        match self.dtype() {
            Some(own) => own == dtype,
            None => true,
        }
    }

    /// Coerce this cell to the given target type.
    ///
    /// NA passes through unchanged. Numeric cells widen freely and narrow
    /// only when lossless; strings are parsed; any cell renders to String.
    /// Fails with [`TableError::Parse`] when the value is irrecoverable.
    pub fn coerce(&self, target: DataType) -> Result<Cell> {
        match (self, target) {
            (Self::Na, _) => Ok(Self::Na),
            (Self::Str(s), DataType::String) => Ok(Self::Str(s.clone())),
            (other, DataType::String) => Ok(Self::Str(other.to_string())),
            (Self::Str(s), t) => t.parse(s),

            (Self::Int(v), DataType::Integer) => Ok(Self::Int(*v)),
            (Self::Int(v), DataType::Float) => Ok(Self::Float(*v as f32)),
            (Self::Int(v), DataType::Double) => Ok(Self::Double(*v as f64)),

            (Self::Float(v), DataType::Float) => Ok(Self::Float(*v)),
            (Self::Float(v), DataType::Double) => Ok(Self::Double(f64::from(*v))),
            (Self::Float(v), DataType::Integer) if v.fract() == 0.0 && v.is_finite() => {
                Ok(Self::Int(*v as i64))
            }

            (Self::Double(v), DataType::Double) => Ok(Self::Double(*v)),
            (Self::Double(v), DataType::Float) => Ok(Self::Float(*v as f32)),
            (Self::Double(v), DataType::Integer) if v.fract() == 0.0 && v.is_finite() => {
                Ok(Self::Int(*v as i64))
            }

            (Self::Bool(v), DataType::Boolean) => Ok(Self::Bool(*v)),

            (other, t) => Err(TableError::Parse {
                value: other.to_string(),
                target: t,
            }),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(v) => fmt_float(f, f64::from(*v)),
            Self::Double(v) => fmt_float(f, *v),
            Self::Str(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Na => write!(f, "NA"),
        }
    }
}

// Whole-valued floats keep a trailing ".0" so a written Double column
// re-reads as Double, not Integer.
fn fmt_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_finite() && v.fract() == 0.0 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}
