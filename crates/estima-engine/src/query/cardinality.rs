//! Cardinality estimation for query optimization.
//!
//! Answers the planner's questions about a table from the shared
//! [`StatisticsRegistry`]. When statistics are missing or cannot answer a
//! predicate, conservative defaults are used instead so plan search never
//! fails on an estimate.

use std::sync::Arc;

use estima_common::StatsError;
use estima_core::{PredicateOp, TableStats};
use tracing::debug;

use super::plan::{BinaryOp, ColumnPredicate};
use crate::registry::StatisticsRegistry;

/// Cardinality estimator backed by a statistics registry.
pub struct CardinalityEstimator {
    /// Statistics for each table.
    registry: Arc<StatisticsRegistry>,
    /// Row count for tables without statistics.
    default_row_count: u64,
    /// Page count for tables without statistics.
    default_page_count: usize,
    /// Selectivity for predicates without a better guess.
    default_selectivity: f64,
    /// Cost of one page read for tables without statistics.
    io_cost_per_page: f64,
}

impl CardinalityEstimator {
    /// Creates an estimator reading from `registry`, with fallbacks taken from
    /// the registry's configuration.
    #[must_use]
    pub fn new(registry: Arc<StatisticsRegistry>) -> Self {
        let config = registry.config().clone();
        Self {
            registry,
            default_row_count: config.default_row_count,
            default_page_count: config.default_page_count,
            default_selectivity: config.default_selectivity,
            io_cost_per_page: config.io_cost_per_page,
        }
    }

    /// The registry this estimator reads.
    #[must_use]
    pub fn registry(&self) -> &StatisticsRegistry {
        &self.registry
    }

    /// Estimated cost of scanning `table` in full.
    #[must_use]
    pub fn scan_cost(&self, table: &str) -> f64 {
        match self.registry.get(table) {
            Some(stats) => stats.estimate_scan_cost(),
            None => self.default_page_count as f64 * self.io_cost_per_page,
        }
    }

    /// Estimated number of rows in `table`.
    #[must_use]
    pub fn table_cardinality(&self, table: &str) -> u64 {
        self.registry
            .get(table)
            .map_or(self.default_row_count, |stats| stats.total_tuples())
    }

    /// Estimated selectivity of one predicate on `table`, in `[0, 1]`.
    #[must_use]
    pub fn predicate_selectivity(&self, table: &str, predicate: &ColumnPredicate) -> f64 {
        let Some(stats) = self.registry.get(table) else {
            return self.fallback_selectivity(predicate.op);
        };
        match Self::histogram_selectivity(&stats, predicate) {
            Ok(selectivity) => selectivity.clamp(0.0, 1.0),
            Err(err) => {
                debug!(table, column = %predicate.column, error = %err, "using default selectivity");
                self.fallback_selectivity(predicate.op)
            }
        }
    }

    /// Estimated number of rows of `table` satisfying every predicate.
    ///
    /// Predicates are assumed independent, so their selectivities multiply.
    #[must_use]
    pub fn filter_cardinality(&self, table: &str, predicates: &[ColumnPredicate]) -> u64 {
        let selectivity: f64 = predicates
            .iter()
            .map(|p| self.predicate_selectivity(table, p))
            .product();
        match self.registry.get(table) {
            Some(stats) => stats.estimate_table_cardinality(selectivity),
            None => (self.default_row_count as f64 * selectivity).ceil() as u64,
        }
    }

    fn histogram_selectivity(
        stats: &TableStats,
        predicate: &ColumnPredicate,
    ) -> Result<f64, StatsError> {
        let op = PredicateOp::try_from(predicate.op)?;
        stats.estimate_selectivity(&predicate.column, op, &predicate.value)
    }

    /// Selectivity assumed when statistics cannot answer.
    fn fallback_selectivity(&self, op: BinaryOp) -> f64 {
        match op {
            // Equality is typically very selective
            BinaryOp::Eq => 0.01,
            // Inequality is very unselective
            BinaryOp::Ne => 0.99,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => 0.33,
            BinaryOp::StartsWith
            | BinaryOp::EndsWith
            | BinaryOp::Contains
            | BinaryOp::Like
            | BinaryOp::In => 0.1,
            _ => self.default_selectivity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsConfig;
    use estima_common::{LogicalType, Row, TableSchema, Value};
    use estima_core::{MemoryCatalog, MemoryTable};

    const EPS: f64 = 1e-9;

    fn registry_with_numbers(n: i32) -> Arc<StatisticsRegistry> {
        let schema = TableSchema::default()
            .with_column("n", LogicalType::Int)
            .with_column("tag", LogicalType::String);
        let rows = (1..=n).map(|i| Row::new([Value::Int(i), Value::String(format!("t{}", i % 3))]));
        let catalog = MemoryCatalog::new();
        catalog.add_table("numbers", MemoryTable::new(schema).with_rows(rows).unwrap());

        let registry = Arc::new(StatisticsRegistry::default());
        registry.compute_all(&catalog);
        registry
    }

    #[test]
    fn test_defaults_without_stats() {
        let estimator = CardinalityEstimator::new(Arc::new(StatisticsRegistry::default()));

        assert_eq!(estimator.table_cardinality("ghost"), 1000);
        assert_eq!(estimator.scan_cost("ghost"), 10_000.0);

        let eq = ColumnPredicate::new("x", BinaryOp::Eq, 1);
        assert!((estimator.predicate_selectivity("ghost", &eq) - 0.01).abs() < EPS);
        let ne = ColumnPredicate::new("x", BinaryOp::Ne, 1);
        assert!((estimator.predicate_selectivity("ghost", &ne) - 0.99).abs() < EPS);
        let gt = ColumnPredicate::new("x", BinaryOp::Gt, 1);
        assert!((estimator.predicate_selectivity("ghost", &gt) - 0.33).abs() < EPS);
        let and = ColumnPredicate::new("x", BinaryOp::And, 1);
        assert!((estimator.predicate_selectivity("ghost", &and) - 0.1).abs() < EPS);

        assert_eq!(estimator.filter_cardinality("ghost", &[eq]), 10);
    }

    #[test]
    fn test_uses_histograms_when_available() {
        let estimator = CardinalityEstimator::new(registry_with_numbers(100));

        assert_eq!(estimator.table_cardinality("numbers"), 100);

        let gt = ColumnPredicate::new("n", BinaryOp::Gt, 50);
        assert!((estimator.predicate_selectivity("numbers", &gt) - 0.5).abs() < EPS);

        let eq = ColumnPredicate::new("n", BinaryOp::Eq, 42);
        assert!((estimator.predicate_selectivity("numbers", &eq) - 0.01).abs() < EPS);
    }

    #[test]
    fn test_filter_multiplies_selectivities() {
        let estimator = CardinalityEstimator::new(registry_with_numbers(100));
        let predicates = [
            ColumnPredicate::new("n", BinaryOp::Gt, 50),
            ColumnPredicate::new("n", BinaryOp::Le, 75),
        ];
        // 0.5 * 0.75 = 0.375 of 100 rows, rounded up
        assert_eq!(estimator.filter_cardinality("numbers", &predicates), 38);
        assert_eq!(estimator.filter_cardinality("numbers", &[]), 100);
    }

    #[test]
    fn test_falls_back_on_stats_errors() {
        let estimator = CardinalityEstimator::new(registry_with_numbers(100));

        // Unknown column
        let p = ColumnPredicate::new("missing", BinaryOp::Eq, 1);
        assert!((estimator.predicate_selectivity("numbers", &p) - 0.01).abs() < EPS);

        // Type mismatch
        let p = ColumnPredicate::new("n", BinaryOp::Lt, "ten");
        assert!((estimator.predicate_selectivity("numbers", &p) - 0.33).abs() < EPS);

        // Unsupported operator on a known column
        let p = ColumnPredicate::new("tag", BinaryOp::StartsWith, "t");
        assert!((estimator.predicate_selectivity("numbers", &p) - 0.1).abs() < EPS);
    }

    #[test]
    fn test_like_uses_placeholder() {
        let estimator = CardinalityEstimator::new(registry_with_numbers(30));
        let p = ColumnPredicate::new("tag", BinaryOp::Like, "t%");
        assert_eq!(estimator.predicate_selectivity("numbers", &p), 1.0);
    }

    #[test]
    fn test_empty_table_selectivity_is_zero() {
        let estimator = CardinalityEstimator::new(registry_with_numbers(0));
        let p = ColumnPredicate::new("n", BinaryOp::Ge, 0);
        assert_eq!(estimator.predicate_selectivity("numbers", &p), 0.0);
        assert_eq!(estimator.filter_cardinality("numbers", &[p]), 0);
        assert_eq!(estimator.scan_cost("numbers"), 0.0);
    }

    #[test]
    fn test_custom_fallbacks() {
        let config = StatsConfig::default()
            .with_default_row_count(50)
            .with_default_page_count(2)
            .with_default_selectivity(0.2)
            .with_io_cost_per_page(10.0);
        let estimator = CardinalityEstimator::new(Arc::new(StatisticsRegistry::new(config)));

        assert_eq!(estimator.table_cardinality("t"), 50);
        assert_eq!(estimator.scan_cost("t"), 20.0);
        let p = ColumnPredicate::new("x", BinaryOp::Or, 1);
        assert!((estimator.predicate_selectivity("t", &p) - 0.2).abs() < EPS);
    }
}
