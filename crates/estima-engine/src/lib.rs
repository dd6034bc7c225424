//! # estima-engine
//!
//! The entry point for query planners: a shared registry of per-table
//! statistics and the estimators that read it.
//!
//! ## Modules
//!
//! - [`config`] - Cost constants and planner fallbacks
//! - [`registry`] - [`StatisticsRegistry`], the table name to statistics cache
//! - [`query`] - Planner-facing predicates and cardinality estimation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod query;
pub mod registry;

pub use config::StatsConfig;
pub use query::{BinaryOp, CardinalityEstimator, ColumnPredicate};
pub use registry::{ComputeReport, StatisticsRegistry};
