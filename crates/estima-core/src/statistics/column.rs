//! Per-column histogram, chosen once from the column's type.

use estima_common::{LogicalType, StatsError, Value};
use serde::Serialize;
use std::fmt;

use super::{IntHistogram, PredicateOp, StringHistogram};

/// A column's histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "histogram", rename_all = "lowercase")]
pub enum ColumnHistogram {
    /// Histogram over an integer column.
    Int(IntHistogram),
    /// Histogram over a string column.
    String(StringHistogram),
}

impl ColumnHistogram {
    /// The column type this histogram covers.
    #[must_use]
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Self::Int(_) => LogicalType::Int,
            Self::String(_) => LogicalType::String,
        }
    }

    /// Number of values recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        match self {
            Self::Int(h) => h.total(),
            Self::String(h) => h.total(),
        }
    }

    /// Returns true if no values have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Estimates the selectivity of `column op value`.
    ///
    /// `column` only labels the error when `value`'s type does not match.
    pub fn estimate_selectivity(
        &self,
        column: &str,
        op: PredicateOp,
        value: &Value,
    ) -> Result<f64, StatsError> {
        match (self, value) {
            (Self::Int(h), Value::Int(v)) => Ok(h.estimate_selectivity(op, *v)),
            (Self::String(h), Value::String(s)) => Ok(h.estimate_selectivity(op, s)),
            _ => Err(StatsError::TypeMismatch {
                column: column.to_string(),
                expected: self.logical_type(),
                found: value.logical_type(),
            }),
        }
    }

    /// The integer histogram backing this column.
    ///
    /// For string columns its domain is the encoded string prefixes.
    #[must_use]
    pub fn as_int_histogram(&self) -> &IntHistogram {
        match self {
            Self::Int(h) => h,
            Self::String(h) => h.as_int_histogram(),
        }
    }

    /// Average selectivity of a predicate over this column (always `1.0`).
    #[must_use]
    pub fn avg_selectivity(&self) -> f64 {
        match self {
            Self::Int(h) => h.avg_selectivity(),
            Self::String(h) => h.avg_selectivity(),
        }
    }
}

impl fmt::Display for ColumnHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(h) => h.fmt(f),
            Self::String(h) => h.fmt(f),
        }
    }
}
