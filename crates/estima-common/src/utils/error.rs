//! Error types for Estima.
//!
//! [`Error`] is the crate-wide error. Storage and statistics failures have
//! their own enums so callers can match on the precise cause.

use thiserror::Error;

use crate::types::{LogicalType, TableId};

/// Result type alias using the Estima error type.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A storage collaborator failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Statistics could not be built or queried.
    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be parsed or is out of range.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised by the catalog and table scans.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The catalog has no table with this id.
    #[error("table not found: {0}")]
    TableNotFound(TableId),

    /// Iteration over a table failed.
    #[error("scan failed: {0}")]
    Scan(String),

    /// A scan could not be restarted from the beginning.
    #[error("rewind failed: {0}")]
    Rewind(String),

    /// A row has a different number of values than the schema has columns.
    #[error("row has {found} values, schema has {expected} columns")]
    RowArity {
        /// Number of columns in the schema.
        expected: usize,
        /// Number of values in the row.
        found: usize,
    },

    /// A row value does not match the column's declared type.
    #[error("column '{column}' expects {expected}, found {found}")]
    SchemaMismatch {
        /// Column name.
        column: String,
        /// Declared type.
        expected: LogicalType,
        /// Type of the offending value.
        found: LogicalType,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while building or querying table statistics.
#[derive(Error, Debug)]
pub enum StatsError {
    /// The operator has no selectivity estimator.
    #[error("unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// No histogram is recorded for the column.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// The predicate constant does not match the column's histogram type.
    #[error("column '{column}' has a {expected} histogram, got a {found} constant")]
    TypeMismatch {
        /// Column name.
        column: String,
        /// Histogram domain type.
        expected: LogicalType,
        /// Type of the constant.
        found: LogicalType,
    },

    /// Scanning the table failed, so no statistics were produced.
    #[error("failed to build statistics for '{table}': {source}")]
    StatisticsBuildFailed {
        /// Table name.
        table: String,
        /// Underlying storage failure.
        #[source]
        source: StorageError,
    },
}

impl StatsError {
    /// Wraps a storage failure encountered while building `table`'s statistics.
    pub fn build_failed(table: impl Into<String>, source: StorageError) -> Self {
        Self::StatisticsBuildFailed {
            table: table.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(StatsError::UnknownColumn("age".to_string()));
        assert_eq!(err.to_string(), "statistics error: unknown column: age");

        let err = StatsError::build_failed("users", StorageError::Rewind("closed".to_string()));
        assert_eq!(
            err.to_string(),
            "failed to build statistics for 'users': rewind failed: closed"
        );

        let err = StorageError::RowArity {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "row has 2 values, schema has 3 columns");
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error as _;

        let err = StatsError::build_failed("t", StorageError::Scan("bad page".to_string()));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("scan failed: bad page"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = StatsError::TypeMismatch {
            column: "name".to_string(),
            expected: LogicalType::String,
            found: LogicalType::Int,
        };
        assert_eq!(
            err.to_string(),
            "column 'name' has a string histogram, got a int constant"
        );
    }
}
