//! Storage capabilities consumed by statistics construction.
//!
//! Statistics never touch page files directly. They see the storage layer
//! through three narrow traits:
//!
//! - [`Catalog`] - enumerate tables and resolve them to names and sources
//! - [`TableSource`] - a table's schema, size in pages, and a way to scan it
//! - [`TableScan`] - a restartable cursor over a table's rows
//!
//! [`MemoryCatalog`] and [`MemoryTable`] implement them over rows held in memory.

mod memory;

pub use memory::{DEFAULT_PAGE_SIZE, MemoryCatalog, MemoryScan, MemoryTable};

use estima_common::{Row, StorageError, TableId, TableSchema};
use std::sync::Arc;

/// Table enumeration and name resolution.
pub trait Catalog: Send + Sync {
    /// Returns the ids of every table, in catalog order.
    fn table_ids(&self) -> Vec<TableId>;

    /// Resolves a table id to its name.
    fn table_name(&self, id: TableId) -> Result<String, StorageError>;

    /// Resolves a table id to its storage.
    fn table(&self, id: TableId) -> Result<Arc<dyn TableSource>, StorageError>;
}

/// A stored table.
pub trait TableSource: Send + Sync {
    /// Column layout of every row.
    fn schema(&self) -> &TableSchema;

    /// Number of pages the table occupies.
    fn page_count(&self) -> usize;

    /// Opens a scan positioned before the first row.
    fn scan(&self) -> Result<Box<dyn TableScan + '_>, StorageError>;
}

/// A cursor over a table's rows.
pub trait TableScan {
    /// Returns the next row, or `None` once the table is exhausted.
    fn next_row(&mut self) -> Result<Option<Row>, StorageError>;

    /// Repositions the scan before the first row.
    fn rewind(&mut self) -> Result<(), StorageError>;
}
