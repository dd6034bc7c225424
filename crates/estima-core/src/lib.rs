//! # estima-core
//!
//! Core layer for Estima: fixed-space histograms, per-table statistics, and
//! the storage capabilities statistics are built from.
//!
//! This crate depends only on `estima-common`.
//!
//! ## Modules
//!
//! - [`statistics`] - Histograms, predicate operators, and [`TableStats`]
//! - [`storage`] - Catalog and scan capabilities, plus an in-memory implementation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod statistics;
pub mod storage;

// Re-export commonly used types
pub use statistics::{
    ColumnHistogram, IO_COST_PER_PAGE, IntHistogram, NUM_HIST_BINS, PredicateOp, StringHistogram,
    TableStats,
};
pub use storage::{
    Catalog, DEFAULT_PAGE_SIZE, MemoryCatalog, MemoryTable, TableScan, TableSource,
};
