//! Single-predicate selectivity command.

use std::path::Path;

use anyhow::Result;
use estima::{PredicateOp, StatsError, TableStats, Value};
use serde::Serialize;
use tracing::info;

use crate::output::{self, Format};
use crate::{LoadOptions, OutputFormat, loader};

/// A predicate as typed on the command line.
pub struct Predicate<'a> {
    pub column: &'a str,
    pub op: &'a str,
    pub value: &'a str,
}

/// Estimate for one predicate.
#[derive(Debug, Serialize)]
struct EstimateOutput {
    table: String,
    predicate: String,
    selectivity: f64,
    total_rows: u64,
    estimated_rows: u64,
}

/// Estimates `predicate` against already-built statistics.
fn estimate(stats: &TableStats, predicate: &Predicate<'_>) -> Result<EstimateOutput> {
    let op: PredicateOp = predicate.op.parse()?;
    let histogram = stats
        .histogram(predicate.column)
        .ok_or_else(|| StatsError::UnknownColumn(predicate.column.to_string()))?;
    let value = Value::parse(predicate.value, histogram.logical_type())?;
    let selectivity = stats.estimate_selectivity(predicate.column, op, &value)?;

    Ok(EstimateOutput {
        table: stats.table_name().to_string(),
        predicate: format!("{} {op} {value}", predicate.column),
        selectivity,
        total_rows: stats.total_tuples(),
        estimated_rows: stats.estimate_table_cardinality(selectivity),
    })
}

/// Run the estimate command.
pub fn run(
    file: &Path,
    predicate: &Predicate<'_>,
    options: &LoadOptions,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let (name, table) = loader::load_table(file, options.delimiter, options.page_size)?;
    let config = options.config();
    let stats = TableStats::build(name, &table, config.io_cost_per_page, config.histogram_bins)?;
    info!(table = %stats.table_name(), rows = stats.total_tuples(), "statistics built");

    let out = estimate(&stats, predicate)?;
    let fmt: Format = format.into();
    match fmt {
        Format::Json => output::print_json(&out, quiet)?,
        Format::Table => {
            let items = [
                ("Table", out.table.clone()),
                ("Predicate", out.predicate.clone()),
                ("Selectivity", format!("{:.4}", out.selectivity)),
                ("Total Rows", out.total_rows.to_string()),
                ("Estimated Rows", out.estimated_rows.to_string()),
            ];
            output::print_key_value_table(&items, fmt, quiet)?;
        }
    }
    Ok(())
}
