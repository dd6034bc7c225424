//! Per-table statistics.
//!
//! [`TableStats`] is built by scanning a table exactly twice:
//!
//! 1. Discover each integer column's `(min, max)` and count rows.
//! 2. Rewind, then feed every value into its column's histogram.
//!
//! Integer histograms need their bounds before the first insert, which is why
//! bounds discovery gets its own pass. String histograms have a fixed domain
//! and are only filled during the second pass.
//!
//! Once built, a `TableStats` is never mutated.

use estima_common::{LogicalType, Row, StatsError, StorageError, TableId, TableSchema, Value};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use super::{ColumnHistogram, IntHistogram, PredicateOp, StringHistogram};
use crate::storage::{Catalog, TableScan, TableSource};

/// Cost of reading one page, in abstract I/O units.
pub const IO_COST_PER_PAGE: f64 = 1000.0;

/// Buckets per histogram.
pub const NUM_HIST_BINS: usize = 100;

/// Statistics about one table: size, row count and a histogram per column.
#[derive(Debug, Clone, Serialize)]
pub struct TableStats {
    table: String,
    io_cost_per_page: f64,
    page_count: usize,
    row_count: u64,
    histograms: IndexMap<String, ColumnHistogram>,
}

impl TableStats {
    /// Computes statistics for a cataloged table with [`NUM_HIST_BINS`] buckets
    /// per histogram.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::StatisticsBuildFailed`] if the table cannot be
    /// resolved or scanned.
    pub fn compute(
        catalog: &dyn Catalog,
        table_id: TableId,
        io_cost_per_page: f64,
    ) -> Result<Self, StatsError> {
        Self::compute_with_bins(catalog, table_id, io_cost_per_page, NUM_HIST_BINS)
    }

    /// Computes statistics for a cataloged table with `bins` buckets per
    /// histogram.
    pub fn compute_with_bins(
        catalog: &dyn Catalog,
        table_id: TableId,
        io_cost_per_page: f64,
        bins: usize,
    ) -> Result<Self, StatsError> {
        let name = catalog
            .table_name(table_id)
            .map_err(|e| StatsError::build_failed(table_id.to_string(), e))?;
        let source = catalog
            .table(table_id)
            .map_err(|e| StatsError::build_failed(name.clone(), e))?;
        Self::build(name, source.as_ref(), io_cost_per_page, bins)
    }

    /// Builds statistics by scanning `source` twice.
    ///
    /// Every integer and string column gets a histogram, even when the table
    /// is empty. An integer column with no values gets the bounds `(0, 0)`.
    ///
    /// # Errors
    ///
    /// Any scan, rewind, or row-shape failure is returned as
    /// [`StatsError::StatisticsBuildFailed`]; no partial statistics escape.
    pub fn build(
        table: impl Into<String>,
        source: &dyn TableSource,
        io_cost_per_page: f64,
        bins: usize,
    ) -> Result<Self, StatsError> {
        let table = table.into();
        match Self::scan_histograms(source, bins) {
            Ok((row_count, histograms)) => Ok(Self {
                table,
                io_cost_per_page,
                page_count: source.page_count(),
                row_count,
                histograms,
            }),
            Err(e) => Err(StatsError::build_failed(table, e)),
        }
    }

    /// Assembles statistics from prebuilt histograms.
    ///
    /// The row count is taken from the first histogram (all of a table's
    /// histograms hold the same number of values).
    pub fn from_histograms(
        table: impl Into<String>,
        page_count: usize,
        io_cost_per_page: f64,
        histograms: impl IntoIterator<Item = (String, ColumnHistogram)>,
    ) -> Self {
        let histograms: IndexMap<_, _> = histograms.into_iter().collect();
        let row_count = histograms.values().next().map_or(0, ColumnHistogram::total);
        Self {
            table: table.into(),
            io_cost_per_page,
            page_count,
            row_count,
            histograms,
        }
    }

    fn scan_histograms(
        source: &dyn TableSource,
        bins: usize,
    ) -> Result<(u64, IndexMap<String, ColumnHistogram>), StorageError> {
        let schema = source.schema();
        let mut scan = source.scan()?;

        let mut bounds: Vec<Option<(i32, i32)>> = vec![None; schema.len()];
        let mut row_count = 0_u64;
        while let Some(row) = scan.next_row()? {
            row_count += 1;
            for (index, column) in schema.columns().iter().enumerate() {
                if column.ty != LogicalType::Int {
                    continue;
                }
                let v = int_at(schema, &row, index)?;
                bounds[index] = Some(match bounds[index] {
                    Some((lo, hi)) => (lo.min(v), hi.max(v)),
                    None => (v, v),
                });
            }
        }
        debug!(rows = row_count, "bounds pass complete");

        let mut histograms: Vec<ColumnHistogram> = schema
            .columns()
            .iter()
            .zip(&bounds)
            .map(|(column, bounds)| match column.ty {
                LogicalType::Int => {
                    let (min, max) = bounds.unwrap_or((0, 0));
                    ColumnHistogram::Int(IntHistogram::new(bins, min, max))
                }
                LogicalType::String => ColumnHistogram::String(StringHistogram::new(bins)),
            })
            .collect();

        scan.rewind()?;
        let second_pass = fill(schema, scan.as_mut(), &mut histograms)?;
        if second_pass != row_count {
            return Err(StorageError::Scan(format!(
                "table changed between passes: {row_count} rows, then {second_pass}"
            )));
        }
        debug!(rows = row_count, columns = histograms.len(), "histogram pass complete");

        let histograms = schema
            .columns()
            .iter()
            .map(|c| c.name.clone())
            .zip(histograms)
            .collect();
        Ok((row_count, histograms))
    }

    /// Name of the table these statistics describe.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Estimated cost of a full sequential scan.
    ///
    /// Every page costs a full page read, with no seek or cache effects.
    #[must_use]
    pub fn estimate_scan_cost(&self) -> f64 {
        self.page_count as f64 * self.io_cost_per_page
    }

    /// Estimated number of rows left after applying a predicate with the given
    /// selectivity, rounded up.
    #[must_use]
    pub fn estimate_table_cardinality(&self, selectivity_factor: f64) -> u64 {
        (self.row_count as f64 * selectivity_factor).ceil() as u64
    }

    /// Estimates the selectivity of `column op value`.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::UnknownColumn`] if no histogram is recorded for
    /// `column`, or [`StatsError::TypeMismatch`] if `value` does not match
    /// the column's type.
    pub fn estimate_selectivity(
        &self,
        column: &str,
        op: PredicateOp,
        value: &Value,
    ) -> Result<f64, StatsError> {
        self.histogram_for(column)?.estimate_selectivity(column, op, value)
    }

    /// Average selectivity of `op` over `column` when the constant is unknown.
    ///
    /// Not estimated yet: every known column reports `1.0`.
    pub fn avg_selectivity(&self, column: &str, _op: PredicateOp) -> Result<f64, StatsError> {
        Ok(self.histogram_for(column)?.avg_selectivity())
    }

    /// Total number of rows seen while building.
    #[must_use]
    pub fn total_tuples(&self) -> u64 {
        self.row_count
    }

    /// Number of pages the table occupied when the statistics were built.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Cost per page used for scan cost estimates.
    #[must_use]
    pub fn io_cost_per_page(&self) -> f64 {
        self.io_cost_per_page
    }

    /// Returns the histogram for `column`, if one was recorded.
    #[must_use]
    pub fn histogram(&self, column: &str) -> Option<&ColumnHistogram> {
        self.histograms.get(column)
    }

    /// Iterates over `(column, histogram)` pairs in schema order.
    pub fn histograms(&self) -> impl Iterator<Item = (&str, &ColumnHistogram)> {
        self.histograms.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn histogram_for(&self, column: &str) -> Result<&ColumnHistogram, StatsError> {
        self.histograms
            .get(column)
            .ok_or_else(|| StatsError::UnknownColumn(column.to_string()))
    }
}

/// Feeds every remaining row of `scan` into `histograms`, returning the number
/// of rows read.
fn fill(
    schema: &TableSchema,
    scan: &mut dyn TableScan,
    histograms: &mut [ColumnHistogram],
) -> Result<u64, StorageError> {
    let mut rows = 0_u64;
    while let Some(row) = scan.next_row()? {
        rows += 1;
        for (index, hist) in histograms.iter_mut().enumerate() {
            match hist {
                ColumnHistogram::Int(h) => h.add_value(int_at(schema, &row, index)?),
                ColumnHistogram::String(h) => h.add_value(str_at(schema, &row, index)?),
            }
        }
    }
    Ok(rows)
}

fn value_at<'r>(
    schema: &TableSchema,
    row: &'r Row,
    index: usize,
) -> Result<&'r Value, StorageError> {
    row.get(index).ok_or(StorageError::RowArity {
        expected: schema.len(),
        found: row.len(),
    })
}

fn mismatch(
    schema: &TableSchema,
    index: usize,
    expected: LogicalType,
    value: &Value,
) -> StorageError {
    StorageError::SchemaMismatch {
        column: schema
            .column(index)
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        expected,
        found: value.logical_type(),
    }
}

fn int_at(schema: &TableSchema, row: &Row, index: usize) -> Result<i32, StorageError> {
    let value = value_at(schema, row, index)?;
    value
        .as_int()
        .ok_or_else(|| mismatch(schema, index, LogicalType::Int, value))
}

fn str_at<'r>(schema: &TableSchema, row: &'r Row, index: usize) -> Result<&'r str, StorageError> {
    let value = value_at(schema, row, index)?;
    value
        .as_str()
        .ok_or_else(|| mismatch(schema, index, LogicalType::String, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryCatalog, MemoryTable};
    use estima_common::{ColumnDef, Row};

    fn people(n: i32) -> MemoryTable {
        let schema = TableSchema::new(vec![
            ColumnDef::new("id", LogicalType::Int),
            ColumnDef::new("name", LogicalType::String),
            ColumnDef::new("age", LogicalType::Int),
        ]);
        let rows = (0..n).map(|i| {
            Row::new([
                Value::Int(i),
                Value::String(format!("person{i}")),
                Value::Int(20 + i % 50),
            ])
        });
        MemoryTable::new(schema).with_rows(rows).unwrap()
    }

    /// Scan that serves rows from a table but fails on demand.
    struct FlakyScan<'a> {
        inner: Box<dyn TableScan + 'a>,
        fail_rewind: bool,
        fail_after: Option<usize>,
        served: usize,
    }

    impl TableScan for FlakyScan<'_> {
        fn next_row(&mut self) -> Result<Option<Row>, StorageError> {
            if self.fail_after == Some(self.served) {
                return Err(StorageError::Scan("page checksum mismatch".to_string()));
            }
            self.served += 1;
            self.inner.next_row()
        }

        fn rewind(&mut self) -> Result<(), StorageError> {
            if self.fail_rewind {
                return Err(StorageError::Rewind("cursor closed".to_string()));
            }
            self.inner.rewind()
        }
    }

    struct FlakyTable {
        table: MemoryTable,
        fail_rewind: bool,
        fail_after: Option<usize>,
    }

    impl TableSource for FlakyTable {
        fn schema(&self) -> &TableSchema {
            self.table.schema()
        }

        fn page_count(&self) -> usize {
            self.table.page_count()
        }

        fn scan(&self) -> Result<Box<dyn TableScan + '_>, StorageError> {
            Ok(Box::new(FlakyScan {
                inner: self.table.scan()?,
                fail_rewind: self.fail_rewind,
                fail_after: self.fail_after,
                served: 0,
            }))
        }
    }

    #[test]
    fn test_build_counts_rows_and_columns() {
        let stats = TableStats::build("people", &people(101), IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap();
        assert_eq!(stats.table_name(), "people");
        assert_eq!(stats.total_tuples(), 101);

        let columns: Vec<_> = stats.histograms().map(|(name, _)| name).collect();
        assert_eq!(columns, ["id", "name", "age"]);
        for (_, hist) in stats.histograms() {
            assert_eq!(hist.total(), 101);
        }

        match stats.histogram("age") {
            Some(ColumnHistogram::Int(h)) => {
                assert_eq!((h.min(), h.max()), (20, 69));
                assert_eq!(h.bucket_count(), NUM_HIST_BINS);
            }
            other => panic!("expected int histogram, got {other:?}"),
        }
        assert!(matches!(
            stats.histogram("name"),
            Some(ColumnHistogram::String(_))
        ));
    }

    #[test]
    fn test_cardinality_rounds_up() {
        let stats = TableStats::build("people", &people(101), IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap();
        assert_eq!(stats.estimate_table_cardinality(0.5), 51);
        assert_eq!(stats.estimate_table_cardinality(1.0), 101);
        assert_eq!(stats.estimate_table_cardinality(0.0), 0);
    }

    #[test]
    fn test_scan_cost_is_pages_times_io_cost() {
        let schema = TableSchema::default()
            .with_column("a", LogicalType::Int)
            .with_column("b", LogicalType::Int);
        let rows = (0..5000).map(|i| Row::new([Value::Int(i), Value::Int(-i)]));
        let table = MemoryTable::new(schema).with_rows(rows).unwrap();

        let stats = TableStats::build("t", &table, 1000.0, NUM_HIST_BINS).unwrap();
        assert_eq!(stats.page_count(), 10);
        assert_eq!(stats.estimate_scan_cost(), 10_000.0);
    }

    #[test]
    fn test_selectivity_delegates_to_histograms() {
        let stats = TableStats::build("people", &people(100), IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap();

        let eq = stats
            .estimate_selectivity("id", PredicateOp::Equals, &Value::Int(50))
            .unwrap();
        assert!((eq - 0.01).abs() < 1e-9);

        let gt = stats
            .estimate_selectivity("age", PredicateOp::GreaterThan, &Value::Int(100))
            .unwrap();
        assert_eq!(gt, 0.0);

        let lt = stats
            .estimate_selectivity("name", PredicateOp::LessThan, &Value::from("zzzz"))
            .unwrap();
        assert!(lt > 0.99);
    }

    #[test]
    fn test_unknown_column_and_type_mismatch() {
        let stats = TableStats::build("people", &people(10), IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap();
        assert!(matches!(
            stats.estimate_selectivity("salary", PredicateOp::Equals, &Value::Int(1)),
            Err(StatsError::UnknownColumn(ref c)) if c == "salary"
        ));
        assert!(matches!(
            stats.estimate_selectivity("id", PredicateOp::Equals, &Value::from("1")),
            Err(StatsError::TypeMismatch { .. })
        ));
        assert!(stats.avg_selectivity("salary", PredicateOp::Like).is_err());
        assert_eq!(stats.avg_selectivity("id", PredicateOp::Like).unwrap(), 1.0);
    }

    #[test]
    fn test_empty_table_estimates_zero() {
        let stats = TableStats::build("people", &people(0), IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap();
        assert_eq!(stats.total_tuples(), 0);
        assert_eq!(stats.page_count(), 0);
        assert_eq!(stats.estimate_scan_cost(), 0.0);

        for op in PredicateOp::ALL {
            for (column, value) in [("id", Value::Int(5)), ("name", Value::from("bob"))] {
                let sel = stats.estimate_selectivity(column, op, &value).unwrap();
                assert_eq!(sel, 0.0, "{column} {op}");
            }
        }
    }

    #[test]
    fn test_scan_failure_is_propagated() {
        let source = FlakyTable {
            table: people(10),
            fail_rewind: false,
            fail_after: Some(4),
        };
        let err = TableStats::build("people", &source, IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap_err();
        match err {
            StatsError::StatisticsBuildFailed { table, source } => {
                assert_eq!(table, "people");
                assert!(matches!(source, StorageError::Scan(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rewind_failure_is_build_failure() {
        let source = FlakyTable {
            table: people(10),
            fail_rewind: true,
            fail_after: None,
        };
        let err = TableStats::build("people", &source, IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap_err();
        assert!(matches!(
            err,
            StatsError::StatisticsBuildFailed {
                source: StorageError::Rewind(_),
                ..
            }
        ));
    }

    #[test]
    fn test_compute_from_catalog() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_table("people", people(25));

        let stats = TableStats::compute(&catalog, id, IO_COST_PER_PAGE).unwrap();
        assert_eq!(stats.table_name(), "people");
        assert_eq!(stats.total_tuples(), 25);

        let err = TableStats::compute(&catalog, TableId::new(7), IO_COST_PER_PAGE).unwrap_err();
        assert!(matches!(
            err,
            StatsError::StatisticsBuildFailed {
                source: StorageError::TableNotFound(_),
                ..
            }
        ));
    }

    #[test]
    fn test_from_histograms() {
        let mut hist = IntHistogram::new(10, 0, 9);
        for v in 0..10 {
            hist.add_value(v);
        }
        let stats = TableStats::from_histograms(
            "fixture",
            3,
            IO_COST_PER_PAGE,
            [("x".to_string(), ColumnHistogram::Int(hist))],
        );
        assert_eq!(stats.total_tuples(), 10);
        assert_eq!(stats.estimate_scan_cost(), 3000.0);
    }

    /// Declares more columns than its rows carry.
    struct ShortRowTable {
        schema: TableSchema,
        rows: MemoryTable,
    }

    impl TableSource for ShortRowTable {
        fn schema(&self) -> &TableSchema {
            &self.schema
        }

        fn page_count(&self) -> usize {
            self.rows.page_count()
        }

        fn scan(&self) -> Result<Box<dyn TableScan + '_>, StorageError> {
            self.rows.scan()
        }
    }

    #[test]
    fn test_short_rows_are_arity_failures() {
        let narrow = TableSchema::default().with_column("a", LogicalType::Int);
        let source = ShortRowTable {
            schema: narrow.clone().with_column("b", LogicalType::Int),
            rows: MemoryTable::new(narrow)
                .with_rows([Row::new([Value::Int(1)])])
                .unwrap(),
        };
        let err = TableStats::build("short", &source, IO_COST_PER_PAGE, NUM_HIST_BINS)
            .unwrap_err();
        assert!(matches!(
            err,
            StatsError::StatisticsBuildFailed {
                source: StorageError::RowArity {
                    expected: 2,
                    found: 1
                },
                ..
            }
        ));
    }
}
