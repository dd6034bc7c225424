//! Histogram over string values.
//!
//! Strings are mapped onto integers by their first four bytes and counted in
//! an [`IntHistogram`] spanning the encoded range of `""` to `"zzzz"`. Unlike
//! the integer histogram it needs no bounds discovery, so it can be filled in
//! a single pass.

use serde::Serialize;
use std::fmt;

use super::{IntHistogram, PredicateOp};

/// Encoded value of the empty string.
const MIN_CODE: i32 = 0;
/// Encoded value of `"zzzz"`.
const MAX_CODE: i32 = 0x7a7a_7a7a;

/// Fixed-width histogram over strings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StringHistogram {
    inner: IntHistogram,
}

impl StringHistogram {
    /// Creates an empty histogram with `buckets` buckets.
    #[must_use]
    pub fn new(buckets: usize) -> Self {
        Self {
            inner: IntHistogram::new(buckets, MIN_CODE, MAX_CODE),
        }
    }

    /// Maps a string to its position in the histogram domain.
    ///
    /// The first four bytes are read as big-endian base-256 digits, missing
    /// bytes count as zero, and the result is clamped to the encoded range of
    /// `""` to `"zzzz"`. Ordering is preserved up to the clamp.
    #[must_use]
    pub fn encode(s: &str) -> i32 {
        let code = s
            .bytes()
            .chain(std::iter::repeat(0))
            .take(4)
            .fold(0_i64, |acc, b| (acc << 8) | i64::from(b));
        code.clamp(i64::from(MIN_CODE), i64::from(MAX_CODE)) as i32
    }

    /// Records one occurrence of `s`.
    pub fn add_value(&mut self, s: &str) {
        self.inner.add_value(Self::encode(s));
    }

    /// Estimates the fraction of recorded strings satisfying `value op s`.
    #[must_use]
    pub fn estimate_selectivity(&self, op: PredicateOp, s: &str) -> f64 {
        self.inner.estimate_selectivity(op, Self::encode(s))
    }

    /// Average selectivity of a predicate over this column (always `1.0`).
    #[must_use]
    pub fn avg_selectivity(&self) -> f64 {
        self.inner.avg_selectivity()
    }

    /// Number of strings recorded.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.inner.total()
    }

    /// Returns true if no strings have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The underlying integer histogram.
    #[must_use]
    pub fn as_int_histogram(&self) -> &IntHistogram {
        &self.inner
    }
}

impl fmt::Display for StringHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StringHistogram[buckets={}, total={}]",
            self.inner.bucket_count(),
            self.inner.total()
        )
    }
}
