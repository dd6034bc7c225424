//! Logical column types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::Error;

/// The type of a table column.
///
/// Only the types that statistics are gathered for are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalType {
    /// 32-bit signed integer.
    Int,
    /// Variable-length string.
    String,
}

impl LogicalType {
    /// Returns the on-page width of a value of this type, in bytes.
    ///
    /// Strings are stored in fixed-width slots: a 4-byte length prefix
    /// followed by [`LogicalType::STRING_LEN`] bytes of payload.
    #[must_use]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::Int => 4,
            Self::String => Self::STRING_LEN + 4,
        }
    }

    /// Maximum stored string payload, in bytes.
    pub const STRING_LEN: usize = 128;

    /// Returns the lowercase name of this type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::String => "string",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" | "int32" => Ok(Self::Int),
            "string" | "str" | "text" | "varchar" => Ok(Self::String),
            other => Err(Error::InvalidValue(format!("unknown column type '{other}'"))),
        }
    }
}
