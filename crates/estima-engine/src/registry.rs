//! Shared cache of per-table statistics.
//!
//! The registry maps table names to [`TableStats`]. It starts empty, is
//! filled by [`StatisticsRegistry::compute_all`], and is read concurrently by
//! planner threads afterwards. Entries are built outside the lock and
//! published whole, so readers never observe a table mid-build.

use std::sync::Arc;

use estima_common::StatsError;
use estima_core::{Catalog, TableStats};
use hashbrown::HashMap;
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::config::StatsConfig;

/// Outcome of a batch statistics computation.
#[derive(Debug, Default)]
pub struct ComputeReport {
    /// Tables whose statistics were published.
    pub computed: Vec<String>,
    /// Tables whose statistics could not be built, with the cause.
    pub failed: Vec<(String, StatsError)>,
}

impl ComputeReport {
    /// Returns true if every table was computed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Thread-safe map from table name to statistics.
pub struct StatisticsRegistry {
    tables: RwLock<HashMap<String, Arc<TableStats>>>,
    config: StatsConfig,
}

impl StatisticsRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(config: StatsConfig) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Returns the configuration used for computing statistics.
    #[must_use]
    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Builds fresh statistics for every table in `catalog`.
    ///
    /// Each table's entry is replaced as soon as its statistics are complete.
    /// A table that fails to build is reported, never published, and loses
    /// any entry left over from an earlier computation.
    pub fn compute_all(&self, catalog: &dyn Catalog) -> ComputeReport {
        let ids = catalog.table_ids();
        info!(tables = ids.len(), "Computing table stats");

        let mut report = ComputeReport::default();
        for id in ids {
            let built = TableStats::compute_with_bins(
                catalog,
                id,
                self.config.io_cost_per_page,
                self.config.histogram_bins,
            );
            match built {
                Ok(stats) => {
                    let name = stats.table_name().to_string();
                    debug!(table = %name, rows = stats.total_tuples(), "statistics built");
                    self.tables.write().insert(name.clone(), Arc::new(stats));
                    report.computed.push(name);
                }
                Err(err) => {
                    let name = match &err {
                        StatsError::StatisticsBuildFailed { table, .. } => table.clone(),
                        _ => id.to_string(),
                    };
                    warn!(table = %name, error = %err, "failed to build statistics");
                    self.tables.write().remove(&name);
                    report.failed.push((name, err));
                }
            }
        }

        info!(
            computed = report.computed.len(),
            failed = report.failed.len(),
            "Done computing table stats"
        );
        report
    }

    /// Returns the statistics for `table`, if any.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<Arc<TableStats>> {
        self.tables.read().get(table).cloned()
    }

    /// Publishes `stats` under `table`, replacing any previous entry.
    pub fn set(&self, table: impl Into<String>, stats: TableStats) {
        self.tables.write().insert(table.into(), Arc::new(stats));
    }

    /// Removes and returns the statistics for `table`.
    pub fn remove(&self, table: &str) -> Option<Arc<TableStats>> {
        self.tables.write().remove(table)
    }

    /// Replaces the whole registry with `entries`.
    pub fn replace_all(&self, entries: impl IntoIterator<Item = (String, TableStats)>) {
        let fresh: HashMap<_, _> = entries
            .into_iter()
            .map(|(name, stats)| (name, Arc::new(stats)))
            .collect();
        *self.tables.write() = fresh;
    }

    /// Returns a point-in-time copy of every entry.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<String, Arc<TableStats>> {
        self.tables.read().clone()
    }

    /// Names of all tables with statistics, sorted.
    #[must_use]
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of tables with statistics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    /// Returns true if no statistics have been published.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl Default for StatisticsRegistry {
    fn default() -> Self {
        Self::new(StatsConfig::default())
    }
}
