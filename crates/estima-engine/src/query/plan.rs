//! Predicates as the planner sees them.

use estima_common::{StatsError, Value};
use estima_core::PredicateOp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator in a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Equality comparison (=).
    Eq,
    /// Inequality comparison (<>).
    Ne,
    /// Less than (<).
    Lt,
    /// Less than or equal (<=).
    Le,
    /// Greater than (>).
    Gt,
    /// Greater than or equal (>=).
    Ge,

    /// Logical AND.
    And,
    /// Logical OR.
    Or,

    /// Addition (+).
    Add,
    /// Subtraction (-).
    Sub,
    /// Multiplication (*).
    Mul,
    /// Division (/).
    Div,

    /// String starts with.
    StartsWith,
    /// String ends with.
    EndsWith,
    /// String contains.
    Contains,
    /// Collection membership (IN).
    In,
    /// Pattern matching (LIKE).
    Like,
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::StartsWith => "STARTS WITH",
            Self::EndsWith => "ENDS WITH",
            Self::Contains => "CONTAINS",
            Self::In => "IN",
            Self::Like => "LIKE",
        };
        f.write_str(s)
    }
}

impl TryFrom<BinaryOp> for PredicateOp {
    type Error = StatsError;

    fn try_from(op: BinaryOp) -> Result<Self, Self::Error> {
        match op {
            BinaryOp::Eq => Ok(Self::Equals),
            BinaryOp::Ne => Ok(Self::NotEquals),
            BinaryOp::Lt => Ok(Self::LessThan),
            BinaryOp::Le => Ok(Self::LessThanOrEq),
            BinaryOp::Gt => Ok(Self::GreaterThan),
            BinaryOp::Ge => Ok(Self::GreaterThanOrEq),
            BinaryOp::Like => Ok(Self::Like),
            other => Err(StatsError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// A `column op constant` filter on a single table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnPredicate {
    /// Column the predicate ranges over.
    pub column: String,
    /// Comparison operator.
    pub op: BinaryOp,
    /// Constant operand.
    pub value: Value,
}

impl ColumnPredicate {
    /// Creates a predicate.
    pub fn new(column: impl Into<String>, op: BinaryOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}
