//! In-memory tables and catalog.

use estima_common::{Row, StorageError, TableId, TableSchema};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

use super::{Catalog, TableScan, TableSource};

/// Default page size in bytes.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// A table whose rows live in memory.
///
/// Its page count is what the rows would occupy in slotted heap pages of
/// `page_size` bytes: each row costs its fixed width plus one header bit.
#[derive(Debug, Clone)]
pub struct MemoryTable {
    schema: TableSchema,
    rows: Vec<Row>,
    page_size: usize,
}

impl MemoryTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the page size used for page counting.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Appends rows, validating each against the schema.
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Result<Self, StorageError> {
        for row in rows {
            self.insert(row)?;
        }
        Ok(self)
    }

    /// Appends a row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row's arity or value types differ from the schema.
    pub fn insert(&mut self, row: Row) -> Result<(), StorageError> {
        if row.len() != self.schema.len() {
            return Err(StorageError::RowArity {
                expected: self.schema.len(),
                found: row.len(),
            });
        }
        for (value, column) in row.values().zip(self.schema.columns()) {
            if value.logical_type() != column.ty {
                return Err(StorageError::SchemaMismatch {
                    column: column.name.clone(),
                    expected: column.ty,
                    found: value.logical_type(),
                });
            }
        }
        self.rows.push(row);
        Ok(())
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Page size in bytes.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Rows that fit on one page.
    #[must_use]
    pub fn rows_per_page(&self) -> usize {
        let bits_per_row = self.schema.row_width() * 8 + 1;
        (self.page_size.saturating_mul(8) / bits_per_row).max(1)
    }
}

impl TableSource for MemoryTable {
    fn schema(&self) -> &TableSchema {
        &self.schema
    }

    fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.rows_per_page())
    }

    fn scan(&self) -> Result<Box<dyn TableScan + '_>, StorageError> {
        Ok(Box::new(MemoryScan::new(&self.rows)))
    }
}

/// Scan over a [`MemoryTable`].
pub struct MemoryScan<'a> {
    rows: &'a [Row],
    position: usize,
}

impl<'a> MemoryScan<'a> {
    /// Creates a scan positioned before the first of `rows`.
    #[must_use]
    pub fn new(rows: &'a [Row]) -> Self {
        Self { rows, position: 0 }
    }
}

impl TableScan for MemoryScan<'_> {
    fn next_row(&mut self) -> Result<Option<Row>, StorageError> {
        let row = self.rows.get(self.position).cloned();
        if row.is_some() {
            self.position += 1;
        }
        Ok(row)
    }

    fn rewind(&mut self) -> Result<(), StorageError> {
        self.position = 0;
        Ok(())
    }
}

struct CatalogEntry {
    name: String,
    source: Arc<dyn TableSource>,
}

/// Thread-safe catalog of in-memory tables.
pub struct MemoryCatalog {
    tables: RwLock<IndexMap<TableId, CatalogEntry>>,
}

impl std::fmt::Debug for MemoryCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryCatalog").finish_non_exhaustive()
    }
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(IndexMap::new()),
        }
    }

    /// Registers `source` under `name`.
    ///
    /// Re-registering a name replaces its source and keeps its id.
    pub fn add_table(&self, name: impl Into<String>, source: impl TableSource + 'static) -> TableId {
        self.add_source(name, Arc::new(source))
    }

    /// Registers an already shared source under `name`.
    pub fn add_source(&self, name: impl Into<String>, source: Arc<dyn TableSource>) -> TableId {
        let name = name.into();
        let mut tables = self.tables.write();
        if let Some((id, entry)) = tables.iter_mut().find(|(_, e)| e.name == name) {
            entry.source = source;
            return *id;
        }
        let id = TableId::new(tables.len() as u32);
        tables.insert(id, CatalogEntry { name, source });
        id
    }

    /// Looks up a table id by name.
    #[must_use]
    pub fn table_id(&self, name: &str) -> Option<TableId> {
        self.tables
            .read()
            .iter()
            .find(|(_, e)| e.name == name)
            .map(|(id, _)| *id)
    }

    /// Number of registered tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    /// Returns true if no tables are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog for MemoryCatalog {
    fn table_ids(&self) -> Vec<TableId> {
        self.tables.read().keys().copied().collect()
    }

    fn table_name(&self, id: TableId) -> Result<String, StorageError> {
        self.tables
            .read()
            .get(&id)
            .map(|e| e.name.clone())
            .ok_or(StorageError::TableNotFound(id))
    }

    fn table(&self, id: TableId) -> Result<Arc<dyn TableSource>, StorageError> {
        self.tables
            .read()
            .get(&id)
            .map(|e| Arc::clone(&e.source))
            .ok_or(StorageError::TableNotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estima_common::{LogicalType, Value};

    fn two_int_schema() -> TableSchema {
        TableSchema::default()
            .with_column("a", LogicalType::Int)
            .with_column("b", LogicalType::Int)
    }

    fn int_rows(n: i32) -> impl Iterator<Item = Row> {
        (0..n).map(|i| Row::new([Value::Int(i), Value::Int(i * 2)]))
    }

    #[test]
    fn test_page_count() {
        let table = MemoryTable::new(two_int_schema());
        assert_eq!(table.page_count(), 0);
        // 8-byte rows: 4096 * 8 / 65 = 504 rows per page
        assert_eq!(table.rows_per_page(), 504);

        let table = MemoryTable::new(two_int_schema()).with_rows(int_rows(5000)).unwrap();
        assert_eq!(table.page_count(), 10);

        let table = MemoryTable::new(two_int_schema()).with_rows(int_rows(504)).unwrap();
        assert_eq!(table.page_count(), 1);
    }

    #[test]
    fn test_small_pages() {
        let table = MemoryTable::new(two_int_schema())
            .with_page_size(65)
            .with_rows(int_rows(3))
            .unwrap();
        // 65 * 8 / 65 = 8 rows per page
        assert_eq!(table.rows_per_page(), 8);
        assert_eq!(table.page_count(), 1);
    }

    #[test]
    fn test_huge_page_size() {
        let table = MemoryTable::new(two_int_schema())
            .with_page_size(usize::MAX)
            .with_rows(int_rows(3))
            .unwrap();
        assert_eq!(table.rows_per_page(), usize::MAX / 65);
        assert_eq!(table.page_count(), 1);
    }

    #[test]
    fn test_insert_validates_schema() {
        let mut table = MemoryTable::new(two_int_schema());
        let err = table
            .insert(Row::new([Value::Int(1), Value::from("x")]))
            .unwrap_err();
        assert!(matches!(err, StorageError::SchemaMismatch { ref column, .. } if column == "b"));

        let err = table.insert(Row::new([Value::Int(1)])).unwrap_err();
        assert!(matches!(err, StorageError::RowArity { expected: 2, found: 1 }));
        assert!(table.is_empty());
    }

    #[test]
    fn test_scan_and_rewind() {
        let table = MemoryTable::new(two_int_schema()).with_rows(int_rows(3)).unwrap();
        let mut scan = table.scan().unwrap();

        let mut seen = 0;
        while scan.next_row().unwrap().is_some() {
            seen += 1;
        }
        assert_eq!(seen, 3);
        assert!(scan.next_row().unwrap().is_none());

        scan.rewind().unwrap();
        let first = scan.next_row().unwrap().unwrap();
        assert_eq!(first.get(0), Some(&Value::Int(0)));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = MemoryCatalog::new();
        let a = catalog.add_table("a", MemoryTable::new(two_int_schema()));
        let b = catalog.add_table("b", MemoryTable::new(two_int_schema()));

        assert_eq!(catalog.table_ids(), vec![a, b]);
        assert_eq!(catalog.table_name(b).unwrap(), "b");
        assert_eq!(catalog.table_id("a"), Some(a));
        assert!(matches!(
            catalog.table(TableId::new(99)),
            Err(StorageError::TableNotFound(_))
        ));
    }

    #[test]
    fn test_catalog_replace_keeps_id() {
        let catalog = MemoryCatalog::new();
        let id = catalog.add_table("t", MemoryTable::new(two_int_schema()));
        let table = MemoryTable::new(two_int_schema()).with_rows(int_rows(7)).unwrap();
        let again = catalog.add_table("t", table);

        assert_eq!(id, again);
        assert_eq!(catalog.len(), 1);
        let mut scan_count = 0;
        let source = catalog.table(id).unwrap();
        let mut scan = source.scan().unwrap();
        while scan.next_row().unwrap().is_some() {
            scan_count += 1;
        }
        assert_eq!(scan_count, 7);
    }
}
