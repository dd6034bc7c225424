//! Table statistics command.

use std::path::PathBuf;

use anyhow::{Result, bail};
use comfy_table::Cell;
use estima::{ColumnHistogram, StatisticsRegistry, TableStats};
use serde::Serialize;

use crate::output::{self, Format};
use crate::{LoadOptions, OutputFormat, loader};

/// Summary of one table's statistics.
#[derive(Serialize)]
struct TableOutput {
    table: String,
    rows: u64,
    pages: usize,
    scan_cost: f64,
    columns: Vec<ColumnOutput>,
}

/// Summary of one column's histogram.
#[derive(Serialize)]
struct ColumnOutput {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    min: Option<i32>,
    max: Option<i32>,
    bucket_width: i64,
    buckets: usize,
    occupied_buckets: usize,
}

impl TableOutput {
    fn new(stats: &TableStats) -> Self {
        let columns = stats
            .histograms()
            .map(|(name, histogram)| {
                let ints = histogram.as_int_histogram();
                // String bounds are encoded prefixes, not meaningful to a reader.
                let (min, max) = match histogram {
                    ColumnHistogram::Int(h) => (Some(h.min()), Some(h.max())),
                    ColumnHistogram::String(_) => (None, None),
                };
                ColumnOutput {
                    name: name.to_string(),
                    ty: histogram.logical_type().to_string(),
                    min,
                    max,
                    bucket_width: ints.bucket_width(),
                    buckets: ints.bucket_count(),
                    occupied_buckets: ints.bucket_counts().iter().filter(|&&c| c > 0).count(),
                }
            })
            .collect();

        Self {
            table: stats.table_name().to_string(),
            rows: stats.total_tuples(),
            pages: stats.page_count(),
            scan_cost: stats.estimate_scan_cost(),
            columns,
        }
    }
}

/// Run the stats command.
pub fn run(
    files: &[PathBuf],
    options: &LoadOptions,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let catalog = loader::load_catalog(files, options.delimiter, options.page_size)?;
    let registry = StatisticsRegistry::new(options.config());
    let report = registry.compute_all(&catalog);

    let tables: Vec<TableOutput> = report
        .computed
        .iter()
        .filter_map(|name| registry.get(name))
        .map(|stats| TableOutput::new(&stats))
        .collect();

    let fmt: Format = format.into();
    match fmt {
        Format::Json => output::print_json(&tables, quiet)?,
        Format::Table => {
            if !quiet {
                print_tables(&tables);
            }
        }
    }

    for (table, err) in &report.failed {
        output::error(&format!("{table}: {err}"));
    }
    if !report.is_success() {
        bail!("{} table(s) failed", report.failed.len());
    }
    Ok(())
}

fn print_tables(tables: &[TableOutput]) {
    let mut summary = output::create_table();
    output::add_header(&mut summary, &["Table", "Rows", "Pages", "Scan Cost"]);
    for t in tables {
        summary.add_row(vec![
            Cell::new(&t.table),
            Cell::new(t.rows),
            Cell::new(t.pages),
            Cell::new(format!("{:.1}", t.scan_cost)),
        ]);
    }
    println!("{summary}");

    for t in tables {
        let mut columns = output::create_table();
        output::add_header(
            &mut columns,
            &["Column", "Type", "Min", "Max", "Bucket Width", "Buckets", "Occupied"],
        );
        for c in &t.columns {
            let bound = |v: Option<i32>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
            columns.add_row(vec![
                Cell::new(&c.name),
                Cell::new(&c.ty),
                Cell::new(bound(c.min)),
                Cell::new(bound(c.max)),
                Cell::new(c.bucket_width),
                Cell::new(c.buckets),
                Cell::new(c.occupied_buckets),
            ]);
        }
        println!("\n{}", t.table);
        println!("{columns}");
    }
}
