//! # estima-common
//!
//! Foundation layer for Estima: the value model shared by storage and
//! statistics, plus the crate-wide error types.
//!
//! This crate has no internal dependencies and should be kept minimal.
//!
//! ## Modules
//!
//! - [`types`] - Core type definitions (TableId, Value, LogicalType, schemas, rows)
//! - [`utils`] - Utility functions and helpers (errors)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use types::{ColumnDef, LogicalType, Row, TableId, TableSchema, Value};
pub use utils::error::{Error, Result, StatsError, StorageError};
