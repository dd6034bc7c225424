//! Planner-facing estimation.
//!
//! ## Submodules
//!
//! - [`plan`] - Predicate representation used by the planner
//! - [`cardinality`] - Cardinality, selectivity and scan cost estimation

pub mod cardinality;
pub mod plan;

pub use cardinality::CardinalityEstimator;
pub use plan::{BinaryOp, ColumnPredicate};
