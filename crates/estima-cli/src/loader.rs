//! Loading tables from delimited text files.
//!
//! ```text
//! id:int,name:string
//! 1,alice
//! 2,bob
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use estima::{LogicalType, MemoryCatalog, MemoryTable, Row, TableSchema, Value};
use tracing::debug;

/// Reads the table stored at `path`, named after the file stem.
pub fn load_table(path: &Path, delimiter: char, page_size: usize) -> Result<(String, MemoryTable)> {
    let name = table_name(path)?;
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let table = parse_table(&text, delimiter, page_size)
        .with_context(|| format!("failed to load {}", path.display()))?;
    debug!(table = %name, rows = table.len(), "loaded table");
    Ok((name, table))
}

/// Loads every file in `paths` into one catalog.
pub fn load_catalog(paths: &[PathBuf], delimiter: char, page_size: usize) -> Result<MemoryCatalog> {
    let catalog = MemoryCatalog::new();
    for path in paths {
        let (name, table) = load_table(path, delimiter, page_size)?;
        if catalog.table_id(&name).is_some() {
            bail!("duplicate table name '{name}' ({})", path.display());
        }
        catalog.add_table(name, table);
    }
    Ok(catalog)
}

/// Parses a header line followed by data rows.
pub fn parse_table(text: &str, delimiter: char, page_size: usize) -> Result<MemoryTable> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));

    let Some((_, header)) = lines.next() else {
        bail!("missing header line");
    };
    let schema = parse_header(header, delimiter)?;
    let mut table = MemoryTable::new(schema.clone()).with_page_size(page_size);

    for (line_no, line) in lines {
        let row = parse_row(line, delimiter, &schema).with_context(|| format!("line {line_no}"))?;
        table.insert(row).with_context(|| format!("line {line_no}"))?;
    }
    Ok(table)
}

fn parse_header(line: &str, delimiter: char) -> Result<TableSchema> {
    let mut schema = TableSchema::default();
    for field in line.split(delimiter) {
        let Some((name, ty)) = field.split_once(':') else {
            bail!("column '{}' has no type; expected name:type", field.trim());
        };
        let name = name.trim();
        if name.is_empty() {
            bail!("empty column name in header");
        }
        if schema.index_of(name).is_some() {
            bail!("duplicate column '{name}'");
        }
        let ty: LogicalType = ty.parse()?;
        schema = schema.with_column(name, ty);
    }
    Ok(schema)
}

fn parse_row(line: &str, delimiter: char, schema: &TableSchema) -> Result<Row> {
    let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
    if fields.len() != schema.len() {
        bail!("expected {} fields, found {}", schema.len(), fields.len());
    }
    fields
        .iter()
        .zip(schema.columns())
        .map(|(raw, column)| {
            Value::parse(raw, column.ty).with_context(|| format!("column '{}'", column.name))
        })
        .collect()
}

fn table_name(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .with_context(|| format!("cannot derive a table name from {}", path.display()))
}
