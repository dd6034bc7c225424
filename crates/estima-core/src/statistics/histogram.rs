//! Equi-width histogram over a bounded integer domain.
//!
//! The histogram divides `[min, max]` into a fixed number of buckets of equal
//! width and keeps one counter per bucket. Space is constant in the number of
//! values added, inserts are O(1), and a selectivity query is O(buckets).
//!
//! Values are assumed to be uniformly distributed within a bucket, so range
//! predicates interpolate linearly across the bucket that contains the
//! constant.

use serde::Serialize;
use std::fmt;

use super::PredicateOp;

/// Fixed-width histogram over integer values in `[min, max]`.
///
/// # Example
///
/// ```
/// use estima_core::{IntHistogram, PredicateOp};
///
/// let mut hist = IntHistogram::new(10, 1, 100);
/// for v in 1..=100 {
///     hist.add_value(v);
/// }
///
/// let eq = hist.estimate_selectivity(PredicateOp::Equals, 50);
/// assert!((eq - 0.01).abs() < 1e-9);
/// assert_eq!(hist.estimate_selectivity(PredicateOp::GreaterThan, 100), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntHistogram {
    min: i32,
    max: i32,
    /// `ceil((max - min + 1) / buckets)`, always >= 1.
    width: i64,
    counts: Vec<u64>,
    total: u64,
}

impl IntHistogram {
    /// Creates an empty histogram with `buckets` buckets over `[min, max]`.
    ///
    /// A bucket count of zero is treated as one.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn new(buckets: usize, min: i32, max: i32) -> Self {
        assert!(min <= max, "histogram bounds are inverted: min {min} > max {max}");
        let buckets = buckets.max(1);
        let span = i64::from(max) - i64::from(min) + 1;
        let width = (span + buckets as i64 - 1) / buckets as i64;
        Self {
            min,
            max,
            width,
            counts: vec![0; buckets],
            total: 0,
        }
    }

    /// Records one occurrence of `v`.
    ///
    /// Callers must keep `v` inside `[min, max]`; values outside are clamped
    /// to the nearest bound.
    pub fn add_value(&mut self, v: i32) {
        debug_assert!(self.contains(v), "value {v} outside [{}, {}]", self.min, self.max);
        let index = self.bucket_index(v.clamp(self.min, self.max));
        self.counts[index] += 1;
        self.total += 1;
    }

    /// Estimates the fraction of recorded values satisfying `value op v`.
    ///
    /// A bucket's values are assumed uniform over its range clipped to
    /// `[min, max]`. Only the last bucket can be clipped: when the domain does
    /// not divide evenly it covers fewer values than `bucket_width`, so
    /// equality and the in-bucket share of range predicates are spread over
    /// that narrower range, keeping `<`, `=` and `>` summing to one.
    ///
    /// An empty histogram estimates `0.0` for every operator. Results for
    /// `<=`, `>=` and `<>` are derived sums and are not clamped to `[0, 1]`.
    #[must_use]
    pub fn estimate_selectivity(&self, op: PredicateOp, v: i32) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        match op {
            PredicateOp::Equals => self.equals(v),
            PredicateOp::GreaterThan => self.greater_than(v),
            PredicateOp::LessThan => self.less_than(v),
            PredicateOp::LessThanOrEq => self.less_than(v) + self.equals(v),
            PredicateOp::GreaterThanOrEq => self.greater_than(v) + self.equals(v),
            PredicateOp::NotEquals => 1.0 - self.equals(v),
            PredicateOp::Like => self.avg_selectivity(),
        }
    }

    /// Average selectivity of a predicate over this column.
    ///
    /// Not estimated yet: always `1.0`. `LIKE` uses this value as well.
    #[must_use]
    pub fn avg_selectivity(&self) -> f64 {
        1.0
    }

    /// Lower domain bound (inclusive).
    #[must_use]
    pub fn min(&self) -> i32 {
        self.min
    }

    /// Upper domain bound (inclusive).
    #[must_use]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Width of the value range covered by each bucket.
    #[must_use]
    pub fn bucket_width(&self) -> i64 {
        self.width
    }

    /// Number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.counts.len()
    }

    /// Per-bucket counts, lowest bucket first.
    #[must_use]
    pub fn bucket_counts(&self) -> &[u64] {
        &self.counts
    }

    /// Number of values recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns true if no values have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Returns true if `v` lies inside the histogram's domain.
    #[must_use]
    pub fn contains(&self, v: i32) -> bool {
        self.min <= v && v <= self.max
    }

    /// Maps an in-domain value to its bucket. `max` always lands in the last
    /// bucket.
    fn bucket_index(&self, v: i32) -> usize {
        if v == self.max {
            self.counts.len() - 1
        } else {
            ((i64::from(v) - i64::from(self.min)) / self.width) as usize
        }
    }

    /// Value range of bucket `index`, clipped to `[min, max]`.
    fn bucket_range(&self, index: usize) -> (i64, i64) {
        let (min, max) = (i64::from(self.min), i64::from(self.max));
        let lo = min + index as i64 * self.width;
        let hi = lo + self.width - 1;
        (lo.clamp(min, max), hi.clamp(min, max))
    }

    /// Locates `v`'s bucket: index, clipped range, and the bucket's share of
    /// all recorded values.
    fn locate(&self, v: i32) -> (usize, i64, i64, f64) {
        let index = self.bucket_index(v);
        let (lo, hi) = self.bucket_range(index);
        let share = self.counts[index] as f64 / self.total as f64;
        (index, lo, hi, share)
    }

    fn equals(&self, v: i32) -> f64 {
        if !self.contains(v) {
            return 0.0;
        }
        let (_, lo, hi, share) = self.locate(v);
        share / (hi - lo + 1) as f64
    }

    fn greater_than(&self, v: i32) -> f64 {
        if v < self.min {
            return 1.0;
        }
        if v > self.max {
            return 0.0;
        }
        let (index, lo, hi, share) = self.locate(v);
        let within = (hi - i64::from(v)) as f64 / (hi - lo + 1) as f64 * share;
        let right: u64 = self.counts[index + 1..].iter().sum();
        within + right as f64 / self.total as f64
    }

    fn less_than(&self, v: i32) -> f64 {
        if v < self.min {
            return 0.0;
        }
        if v > self.max {
            return 1.0;
        }
        let (index, lo, hi, share) = self.locate(v);
        let within = (i64::from(v) - lo) as f64 / (hi - lo + 1) as f64 * share;
        let left: u64 = self.counts[..index].iter().sum();
        within + left as f64 / self.total as f64
    }
}

impl fmt::Display for IntHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IntHistogram[min={}, max={}, width={}, buckets={}, total={}]",
            self.min,
            self.max,
            self.width,
            self.counts.len(),
            self.total
        )?;
        let mut occupied = self.counts.iter().enumerate().filter(|(_, c)| **c > 0);
        if let Some((first, count)) = occupied.next() {
            let (lo, hi) = self.bucket_range(first);
            write!(f, " {{[{lo}..{hi}]: {count}")?;
            for (index, count) in occupied {
                let (lo, hi) = self.bucket_range(index);
                write!(f, ", [{lo}..{hi}]: {count}")?;
            }
            f.write_str("}")?;
        }
        Ok(())
    }
}
