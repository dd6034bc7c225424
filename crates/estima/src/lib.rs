//! # Estima
//!
//! Table statistics for cost-based query optimizers.
//!
//! Estima summarizes every column of a table in a fixed-size equi-width
//! histogram, then answers the planner's questions (how many rows, how
//! expensive a scan, how selective a predicate) without touching the data
//! again.
//!
//! If you're new here, start with [`StatisticsRegistry`]: compute statistics
//! for every table in a [`Catalog`], then hand the registry to a
//! [`CardinalityEstimator`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use estima::{
//!     BinaryOp, CardinalityEstimator, ColumnPredicate, LogicalType, MemoryCatalog,
//!     MemoryTable, Row, StatisticsRegistry, TableSchema, Value,
//! };
//!
//! let schema = TableSchema::default().with_column("age", LogicalType::Int);
//! let rows = (1..=100).map(|age| Row::new([Value::Int(age)]));
//! let catalog = MemoryCatalog::new();
//! catalog.add_table("people", MemoryTable::new(schema).with_rows(rows)?);
//!
//! let registry = Arc::new(StatisticsRegistry::default());
//! registry.compute_all(&catalog);
//!
//! let estimator = CardinalityEstimator::new(Arc::clone(&registry));
//! let adults = ColumnPredicate::new("age", BinaryOp::Ge, 18);
//! assert_eq!(estimator.filter_cardinality("people", &[adults]), 83);
//! # Ok::<(), estima::StorageError>(())
//! ```

// Re-export the registry and planner API
pub use estima_engine::{
    BinaryOp, CardinalityEstimator, ColumnPredicate, ComputeReport, StatisticsRegistry,
    StatsConfig,
};

// Statistics and storage capabilities
pub use estima_core::{
    Catalog, ColumnHistogram, DEFAULT_PAGE_SIZE, IO_COST_PER_PAGE, IntHistogram, MemoryCatalog,
    MemoryTable, NUM_HIST_BINS, PredicateOp, StringHistogram, TableScan, TableSource, TableStats,
};

// Values, schemas and errors
pub use estima_common::{
    ColumnDef, Error, LogicalType, Result, Row, StatsError, StorageError, TableId, TableSchema,
    Value,
};
