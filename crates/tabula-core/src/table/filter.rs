//! Row predicates: leaf column/operator/literal comparisons and AND/OR/NOT
//! composites over them.

use std::cmp::Ordering;

use crate::error::{Result, TableError};

use super::{Cell, Row};

/// Comparison operator for a leaf filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

/// Logical connective for a composite filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

/// A predicate evaluated per row.
///
/// Leafs compare one column against a literal; composites combine
/// sub-filters with AND/OR/NOT. Nesting is unbounded and evaluation is
/// recursive depth-first with short-circuiting.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Compare {
        column: String,
        op: Operator,
        value: Cell,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    /// Leaf filter: `column <op> value`.
    pub fn compare(column: impl Into<String>, op: Operator, value: Cell) -> Self {
        Self::Compare {
            column: column.into(),
            op,
            value,
        }
    }

    /// AND over at least two children.
    pub fn and(children: Vec<Filter>) -> Result<Self> {
        Self::composite(LogicalOp::And, children)
    }

    /// OR over at least two children.
    pub fn or(children: Vec<Filter>) -> Result<Self> {
        Self::composite(LogicalOp::Or, children)
    }

    /// Negation of a single child.
    pub fn not(child: Filter) -> Self {
        Self::Not(Box::new(child))
    }

    /// Build a composite filter, enforcing child arity at construction:
    /// NOT takes exactly one child, AND/OR take at least two.
    pub fn composite(op: LogicalOp, children: Vec<Filter>) -> Result<Self> {
        let actual = children.len();
        match op {
            LogicalOp::And => {
                if actual < 2 {
                    return Err(TableError::Arity {
                        op: "AND",
                        expected: "at least 2",
                        actual,
                    });
                }
                Ok(Self::And(children))
            }
            LogicalOp::Or => {
                if actual < 2 {
                    return Err(TableError::Arity {
                        op: "OR",
                        expected: "at least 2",
                        actual,
                    });
                }
                Ok(Self::Or(children))
            }
            LogicalOp::Not => {
                let mut it = children.into_iter();
                match (it.next(), it.next()) {
                    (Some(child), None) => Ok(Self::not(child)),
                    _ => Err(TableError::Arity {
                        op: "NOT",
                        expected: "exactly 1",
                        actual,
                    }),
                }
            }
        }
    }

    /// Evaluate the predicate against one row.
    ///
    /// AND short-circuits on the first false child, OR on the first true
    /// one. Errors from leaf evaluation propagate.
    pub fn apply(&self, row: &Row) -> Result<bool> {
        match self {
            Self::Compare { column, op, value } => compare_cells(row.get(column)?, *op, value),
            Self::And(children) => {
                for child in children {
                    if !child.apply(row)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(children) => {
                for child in children {
                    if child.apply(row)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(child) => Ok(!child.apply(row)?),
        }
    }
}

/// Leaf comparison rule.
///
/// Numeric operands widen to f64 regardless of their exact types. Otherwise
/// EQ/NE use value equality (NA equals only NA), and the ordering operators
/// require both operands to share an ordered type; NA has no ordered type,
/// so ordering against NA fails with [`TableError::NotComparable`] rather
/// than silently evaluating to false.
fn compare_cells(left: &Cell, op: Operator, right: &Cell) -> Result<bool> {
    if let (Some(a), Some(b)) = (left.as_f64(), right.as_f64()) {
        return Ok(match op {
            Operator::Eq => a == b,
            Operator::Ne => a != b,
            Operator::Gt => a > b,
            Operator::Lt => a < b,
            Operator::Ge => a >= b,
            Operator::Le => a <= b,
        });
    }

    match op {
        Operator::Eq => return Ok(left == right),
        Operator::Ne => return Ok(left != right),
        _ => {}
    }

    let ord = ordered_cmp(left, right).ok_or_else(|| TableError::NotComparable {
        left: left.to_string(),
        right: right.to_string(),
    })?;
    Ok(match op {
        Operator::Gt => ord == Ordering::Greater,
        Operator::Lt => ord == Ordering::Less,
        Operator::Ge => ord != Ordering::Less,
        Operator::Le => ord != Ordering::Greater,
        // EQ/NE returned above.
        Operator::Eq | Operator::Ne => false,
    })
}

// Natural order for same-family ordered types. Numeric pairs are handled by
// the f64 path before this is consulted.
fn ordered_cmp(left: &Cell, right: &Cell) -> Option<Ordering> {
    match (left, right) {
        (Cell::Str(a), Cell::Str(b)) => Some(a.cmp(b)),
        (Cell::Bool(a), Cell::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
