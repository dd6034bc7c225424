//! Column values.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::LogicalType;

/// A single column value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Integer value.
    Int(i32),
    /// String value.
    String(String),
}

impl Value {
    /// Returns the logical type of this value.
    #[must_use]
    pub const fn logical_type(&self) -> LogicalType {
        match self {
            Self::Int(_) => LogicalType::Int,
            Self::String(_) => LogicalType::String,
        }
    }

    /// Returns the integer payload, if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            Self::String(_) => None,
        }
    }

    /// Returns the string payload, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Int(_) => None,
        }
    }

    /// Parses `raw` as a value of type `ty`.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a valid integer for [`LogicalType::Int`].
    pub fn parse(raw: &str, ty: LogicalType) -> crate::Result<Self> {
        match ty {
            LogicalType::Int => raw.trim().parse::<i32>().map(Self::Int).map_err(|e| {
                crate::Error::InvalidValue(format!("'{}' is not an integer: {e}", raw.trim()))
            }),
            LogicalType::String => Ok(Self::String(raw.to_string())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "'{s}'"),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}
