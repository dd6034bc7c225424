//! Predicate operators understood by selectivity estimation.

use estima_common::StatsError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operator in a `column op constant` predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PredicateOp {
    /// `=`
    Equals,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEq,
    /// `>=`
    GreaterThanOrEq,
    /// `LIKE`
    Like,
    /// `<>`
    NotEquals,
}

impl PredicateOp {
    /// Every operator, in declaration order.
    pub const ALL: [PredicateOp; 7] = [
        Self::Equals,
        Self::GreaterThan,
        Self::LessThan,
        Self::LessThanOrEq,
        Self::GreaterThanOrEq,
        Self::Like,
        Self::NotEquals,
    ];

    /// Returns the SQL symbol for this operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::LessThanOrEq => "<=",
            Self::GreaterThanOrEq => ">=",
            Self::Like => "LIKE",
            Self::NotEquals => "<>",
        }
    }
}

impl fmt::Display for PredicateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PredicateOp {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = s.trim();
        match op {
            "=" | "==" => Ok(Self::Equals),
            ">" => Ok(Self::GreaterThan),
            "<" => Ok(Self::LessThan),
            "<=" => Ok(Self::LessThanOrEq),
            ">=" => Ok(Self::GreaterThanOrEq),
            "<>" | "!=" => Ok(Self::NotEquals),
            _ if op.eq_ignore_ascii_case("like") => Ok(Self::Like),
            _ => Err(StatsError::UnsupportedOperator(op.to_string())),
        }
    }
}
