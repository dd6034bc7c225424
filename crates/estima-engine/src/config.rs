//! Statistics configuration.

use estima_core::{IO_COST_PER_PAGE, NUM_HIST_BINS};
use serde::{Deserialize, Serialize};

/// Settings for building statistics and for planner fallbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Cost of reading one page.
    pub io_cost_per_page: f64,
    /// Buckets per histogram.
    pub histogram_bins: usize,
    /// Selectivity assumed for predicates no statistics can answer.
    pub default_selectivity: f64,
    /// Row count assumed for tables without statistics.
    pub default_row_count: u64,
    /// Page count assumed for tables without statistics.
    pub default_page_count: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            io_cost_per_page: IO_COST_PER_PAGE,
            histogram_bins: NUM_HIST_BINS,
            default_selectivity: 0.1,
            default_row_count: 1000,
            default_page_count: 10,
        }
    }
}

impl StatsConfig {
    /// Sets the cost of reading one page.
    #[must_use]
    pub fn with_io_cost_per_page(mut self, cost: f64) -> Self {
        self.io_cost_per_page = cost;
        self
    }

    /// Sets the number of histogram buckets (at least one).
    #[must_use]
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins.max(1);
        self
    }

    /// Sets the fallback selectivity, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_default_selectivity(mut self, selectivity: f64) -> Self {
        self.default_selectivity = selectivity.clamp(0.0, 1.0);
        self
    }

    /// Sets the fallback row count.
    #[must_use]
    pub fn with_default_row_count(mut self, rows: u64) -> Self {
        self.default_row_count = rows;
        self
    }

    /// Sets the fallback page count.
    #[must_use]
    pub fn with_default_page_count(mut self, pages: usize) -> Self {
        self.default_page_count = pages;
        self
    }
}
