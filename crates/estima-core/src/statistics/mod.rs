//! Statistics collection for cost-based query optimization.
//!
//! This module provides:
//! - Equi-width histograms over integer and string columns
//! - The predicate operators selectivity is estimated for
//! - Per-table statistics: row count, scan cost, per-column histograms

mod column;
mod histogram;
mod predicate;
mod string_histogram;
mod table;

pub use column::ColumnHistogram;
pub use histogram::IntHistogram;
pub use predicate::PredicateOp;
pub use string_histogram::StringHistogram;
pub use table::{IO_COST_PER_PAGE, NUM_HIST_BINS, TableStats};
