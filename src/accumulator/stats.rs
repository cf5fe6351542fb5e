//! Descriptive-statistics accumulator
//!
//! Observations are pushed one at a time (or as sequences) and every query is
//! derived from the owned state on demand. Queries that need order share a
//! sorted view that is built lazily and dropped on the next push.
//!
//! # Thread Safety
//!
//! `Stats` is `Send` but **not `Sync`**: the sorted and frequency views are
//! cached through `&self` in `OnceCell`s. For shared access wrap the
//! accumulator in `Mutex<_>` or `RwLock<_>`.

use super::bucket::{self, Bucket};
use super::config::StatsConfig;
use super::storage::{self, Frequencies, Key, Mode, Storage};
use crate::error::StatsError;
use crate::math;
use crate::traits::{canonical, Compare, Observations};
use core::cell::OnceCell;
use core::cmp::Ordering;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Bucket count used by [`Stats::distribution`]
pub const DISTRIBUTION_BUCKETS: usize = 25;

/// Streaming descriptive-statistics accumulator
///
/// Keeps its observations either as raw values ([`Mode::Raw`], the default)
/// or as a frequency table ([`Mode::Histogram`]). The frequency table uses
/// memory proportional to the number of distinct values instead of the
/// number of observations, at the cost of insertion order: [`raw`](Self::raw)
/// is unavailable in that mode. Every other query gives the same answer in
/// both modes.
///
/// Statistical queries on an empty accumulator report `NaN` (or `None` for
/// positional lookups) instead of failing.
///
/// # Example
///
/// ```
/// use thinkstats::Stats;
///
/// let mut stats = Stats::new();
/// stats.push([1, 2, 2, 3, 5]);
///
/// assert_eq!(stats.count(), 5);
/// assert_eq!(stats.range(), Some((1.0, 5.0)));
/// assert_eq!(stats.median(), 2.0);
/// assert!((stats.cdf(2.0) - 0.6).abs() < 1e-12);
/// assert!((stats.cdf(4.0) - 0.8).abs() < 1e-12);
/// assert_eq!(stats.sorted_index_of(2.0), Some(1));
/// assert_eq!(stats.sorted_index_of(4.0), None);
/// ```
#[derive(Clone, Debug)]
pub struct Stats {
    /// Raw values or frequency table
    storage: Storage,
    /// Total order for extrema, sorting, searching and the CDF
    compare: Compare,
    /// Number of observations pushed
    count: u64,
    /// Least observation under `compare` (+inf before the first push)
    min: f64,
    /// Greatest observation under `compare` (-inf before the first push)
    max: f64,
    /// Ascending view, empty until first needed after a push
    sorted: OnceCell<Vec<f64>>,
    /// Frequency table computed from raw values (raw mode only)
    hist: OnceCell<Frequencies>,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    /// Create an empty raw-mode accumulator with numeric ascending order
    pub fn new() -> Self {
        Self::with_config(StatsConfig::new())
    }

    /// Create an empty histogram-mode accumulator with numeric ascending order
    pub fn histogram() -> Self {
        Self::with_config(StatsConfig::new().mode(Mode::Histogram))
    }

    /// Create an empty accumulator from explicit options
    pub fn with_config(config: StatsConfig) -> Self {
        Self {
            storage: Storage::new(config.mode),
            compare: config.compare,
            count: 0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sorted: OnceCell::new(),
            hist: OnceCell::new(),
        }
    }

    /// Storage mode chosen at construction
    pub fn mode(&self) -> Mode {
        self.storage.mode()
    }

    /// Push one value or a (possibly nested) sequence of values
    ///
    /// Sequences are pushed element by element in order. Returns `self` so
    /// pushes can be chained.
    pub fn push<O: Observations>(&mut self, values: O) -> &mut Self {
        values.for_each_value(&mut |value| self.observe(value));
        self
    }

    fn observe(&mut self, value: f64) {
        let value = canonical(value);
        self.storage.insert(value);

        if self.count == 0 {
            self.min = value;
            self.max = value;
        } else {
            if (self.compare)(&value, &self.min) == Ordering::Less {
                self.min = value;
            }
            if (self.compare)(&value, &self.max) == Ordering::Greater {
                self.max = value;
            }
        }

        self.sorted.take();
        self.hist.take();
        self.count += 1;
    }

    /// Number of observations pushed
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of observations pushed
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Least observation under the comparator
    pub fn min(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.min)
        }
    }

    /// Greatest observation under the comparator
    pub fn max(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.max)
        }
    }

    /// `(min, max)` of the observations
    pub fn range(&self) -> Option<(f64, f64)> {
        self.min().zip(self.max())
    }

    /// Observations in insertion order
    ///
    /// # Errors
    ///
    /// [`StatsError::Unavailable`] in histogram mode, where raw values are
    /// never retained.
    pub fn raw(&self) -> Result<&[f64], StatsError> {
        match &self.storage {
            Storage::Raw(values) => Ok(values),
            Storage::Histogram(_) => Err(StatsError::Unavailable),
        }
    }

    /// All observations in ascending order under the comparator
    ///
    /// Built on first use after a push and reused until the next push.
    /// In histogram mode each distinct value is repeated once per occurrence.
    pub fn sorted(&self) -> &[f64] {
        self.sorted.get_or_init(|| self.build_sorted())
    }

    fn build_sorted(&self) -> Vec<f64> {
        let compare = self.compare;
        let sorted = match &self.storage {
            Storage::Raw(values) => {
                let mut sorted = values.clone();
                sorted.sort_by(compare);
                sorted
            }
            Storage::Histogram(table) => {
                // Key order is numeric; re-order the distinct values for custom comparators.
                let mut runs: Vec<(f64, u64)> = table.iter().map(|(k, &n)| (k.get(), n)).collect();
                runs.sort_by(|a, b| compare(&a.0, &b.0));

                let mut sorted = Vec::with_capacity(self.count as usize);
                for (value, n) in runs {
                    sorted.extend(core::iter::repeat(value).take(n as usize));
                }
                sorted
            }
        };

        log::debug!("rebuilt sorted view of {} observations", sorted.len());
        sorted
    }

    /// Frequency table of the observations
    ///
    /// Histogram mode returns its storage directly; raw mode counts the raw
    /// values once and reuses the table until the next push.
    pub fn hist(&self) -> &Frequencies {
        match &self.storage {
            Storage::Histogram(table) => table,
            Storage::Raw(values) => self.hist.get_or_init(|| storage::tally(values)),
        }
    }

    /// Number of times `value` was observed
    pub fn frequency(&self, value: f64) -> u64 {
        self.hist().get(&Key::new(value)).copied().unwrap_or(0)
    }

    /// Distinct observed values
    pub fn unique(&self) -> Vec<f64> {
        self.hist().keys().map(|k| k.get()).collect()
    }

    /// Fraction of observations equal to `value`
    ///
    /// `NaN` on an empty accumulator.
    pub fn pmf(&self, value: f64) -> f64 {
        self.frequency(value) as f64 / self.count as f64
    }

    /// Fraction of observations equal to any of `values`
    ///
    /// This is the sum of the individual PMFs, i.e. the probability of the
    /// set under the empirical distribution.
    ///
    /// ```
    /// use thinkstats::Stats;
    ///
    /// let mut weeks = Stats::new();
    /// weeks.push([36, 39, 39, 40, 42]);
    ///
    /// assert!((weeks.pmf_of(38..=40) - 0.6).abs() < 1e-12);
    /// assert!((weeks.pmf_of([36.0, 42.0]) - 0.4).abs() < 1e-12);
    /// ```
    pub fn pmf_of<I>(&self, values: I) -> f64
    where
        I: IntoIterator,
        I::Item: Observations,
    {
        let mut total = 0.0;
        for item in values {
            item.for_each_value(&mut |value| total += self.pmf(value));
        }
        total
    }

    /// Split `[min, max]` into equal-width buckets and count observations
    ///
    /// `None` uses `max - min` buckets (unit width). Floating-point rounding
    /// of the boundaries can add one bucket beyond the requested count so
    /// that every observation is captured.
    ///
    /// # Errors
    ///
    /// - [`StatsError::InvalidBucketCount`] if the count is below one,
    ///   including the default count on an empty or single-valued range, or
    ///   if it splits the range finer than `f64` can represent
    /// - [`StatsError::InvertedRange`] if the comparator puts the numerically
    ///   larger extreme first
    /// - [`StatsError::NonFiniteRange`] if a NaN or infinite observation is
    ///   an extreme
    pub fn bucket(&self, bucket_count: Option<usize>) -> Result<Vec<Bucket>, StatsError> {
        let bucket_count = match bucket_count {
            Some(n) => n as f64,
            None => self.max - self.min,
        };
        bucket::partition(&self.storage, self.count, self.min, self.max, bucket_count)
    }

    /// [`bucket`](Self::bucket) with 25 buckets
    pub fn distribution(&self) -> Result<Vec<Bucket>, StatsError> {
        self.bucket(Some(DISTRIBUTION_BUCKETS))
    }

    /// Index of the first occurrence of `value` in [`sorted`](Self::sorted)
    ///
    /// Binary search driven by the comparator; on a hit, scans back over
    /// duplicates to the earliest equal index.
    pub fn sorted_index_of(&self, value: f64) -> Option<usize> {
        let sorted = self.sorted();
        let compare = self.compare;

        // Inclusive bounds; `end` may drop to -1 on the last step.
        let mut start: isize = 0;
        let mut end: isize = sorted.len() as isize - 1;

        loop {
            let middle = (start + end) / 2;
            let candidate = sorted.get(middle as usize)?;

            match compare(candidate, &value) {
                Ordering::Equal => {
                    let mut first = middle as usize;
                    while first > 0 && compare(&sorted[first - 1], &value) == Ordering::Equal {
                        first -= 1;
                    }
                    return Some(first);
                }
                _ if start >= end => return None,
                Ordering::Less => start = middle + 1,
                Ordering::Greater => end = middle - 1,
            }
        }
    }

    /// Sum of all observations
    pub fn sum(&self) -> f64 {
        let mut total = 0.0;
        self.storage
            .for_each_weighted(|value, n| total += value * n as f64);
        total
    }

    /// Arithmetic mean (`NaN` when empty)
    pub fn amean(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.sum() / self.count as f64
    }

    /// Middle observation, or the mean of the two middle observations for
    /// an even count (`NaN` when empty)
    pub fn median(&self) -> f64 {
        let sorted = self.sorted();
        let n = sorted.len();
        if n == 0 {
            return f64::NAN;
        }

        let middle = n / 2;
        if n % 2 == 1 {
            sorted[middle]
        } else {
            (sorted[middle - 1] + sorted[middle]) / 2.0
        }
    }

    /// Sum of squared deviations from the mean
    pub fn total_spread(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }

        let mean = self.amean();
        let mut spread = 0.0;
        self.storage.for_each_weighted(|value, n| {
            let delta = value - mean;
            spread += delta * delta * n as f64;
        });
        spread
    }

    /// Get the population variance
    ///
    /// This is the variance assuming the data represents the entire population.
    /// Use `sample_variance()` if the data is a sample.
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }
        self.total_spread() / self.count as f64
    }

    /// Get the sample variance
    ///
    /// This is the unbiased variance estimator (Bessel's correction).
    /// `NaN` with fewer than two observations.
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            return f64::NAN;
        }
        self.total_spread() / (self.count - 1) as f64
    }

    /// Get the population standard deviation
    pub fn stddev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Get the sample standard deviation
    pub fn sample_stddev(&self) -> f64 {
        math::sqrt(self.sample_variance())
    }

    /// Index into [`sorted`](Self::sorted) of the `p`th percentile
    ///
    /// `floor(count * p / 100)`. `None` when empty or when `p` is negative or
    /// `NaN`. The index equals `count` (one past the end) for `p = 100`.
    pub fn percentile_index(&self, p: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }

        let index = math::floor(self.count as f64 * p / 100.0);
        if index.is_nan() || index < 0.0 {
            None
        } else {
            Some(index as usize)
        }
    }

    /// Observation at [`percentile_index`](Self::percentile_index)
    ///
    /// `None` when the index falls outside the sorted view.
    pub fn percentile(&self, p: f64) -> Option<f64> {
        let index = self.percentile_index(p)?;
        self.sorted().get(index).copied()
    }

    /// Percentage of observations at or below `value`
    pub fn percentile_rank(&self, value: f64) -> f64 {
        self.cdf(value) * 100.0
    }

    /// Fraction of observations at or below `value` under the comparator
    ///
    /// When `value` was not itself observed this is the cumulative fraction
    /// at the nearest observed value below it, or 0 below the minimum.
    /// `NaN` when empty.
    pub fn cdf(&self, value: f64) -> f64 {
        if self.count == 0 {
            return f64::NAN;
        }

        let compare = self.compare;
        let at_or_below = self
            .sorted()
            .partition_point(|o| compare(o, &value) != Ordering::Greater);
        at_or_below as f64 / self.count as f64
    }

    /// Cumulative fraction at each distinct observed value, ascending
    ///
    /// An empty accumulator has no distinct values and yields an empty
    /// table; [`cdf`](Self::cdf) is the query that reports `NaN` when empty.
    pub fn cdf_table(&self) -> Vec<(f64, f64)> {
        let compare = self.compare;
        let total = self.count as f64;
        let mut seen = 0usize;

        self.sorted()
            .chunk_by(|a, b| compare(a, b) == Ordering::Equal)
            .map(|run| {
                seen += run.len();
                (run[0], seen as f64 / total)
            })
            .collect()
    }

    /// Probability of `value` among the observations at or above it
    ///
    /// The discrete hazard `P(X = value | X >= value)`. `NaN` when no
    /// observation is at or above `value`.
    ///
    /// ```
    /// use thinkstats::Stats;
    ///
    /// let mut weeks = Stats::new();
    /// weeks.push([38, 39, 39, 40, 40, 40, 41]);
    ///
    /// // Six pregnancies reach week 39, two of them end there.
    /// assert!((weeks.hazard(39.0) - 2.0 / 6.0).abs() < 1e-12);
    /// assert!(weeks.hazard(42.0).is_nan());
    /// ```
    pub fn hazard(&self, value: f64) -> f64 {
        let compare = self.compare;
        let sorted = self.sorted();
        let start = sorted.partition_point(|o| compare(o, &value) == Ordering::Less);
        let remaining = &sorted[start..];
        if remaining.is_empty() {
            return f64::NAN;
        }

        let hits = remaining
            .iter()
            .take_while(|o| compare(o, &value) == Ordering::Equal)
            .count();
        hits as f64 / remaining.len() as f64
    }

    /// Reset to the freshly constructed state, keeping mode and comparator
    ///
    /// Releases the storage and cached views.
    pub fn clear(&mut self) {
        *self = Self::with_config(StatsConfig::new().mode(self.mode()).compare(self.compare));
    }

    /// Approximate memory usage in bytes, including cached views
    pub fn size_bytes(&self) -> usize {
        let sorted = self
            .sorted
            .get()
            .map_or(0, |v| v.capacity() * core::mem::size_of::<f64>());
        let hist = self
            .hist
            .get()
            .map_or(0, |t| t.len() * (core::mem::size_of::<Key>() + core::mem::size_of::<u64>()));

        core::mem::size_of::<Self>() + self.storage.size_bytes() + sorted + hist
    }
}

impl<O: Observations> Extend<O> for Stats {
    fn extend<I: IntoIterator<Item = O>>(&mut self, iter: I) {
        for values in iter {
            self.push(values);
        }
    }
}

impl<O: Observations> FromIterator<O> for Stats {
    fn from_iter<I: IntoIterator<Item = O>>(iter: I) -> Self {
        let mut stats = Self::new();
        stats.extend(iter);
        stats
    }
}

// ============================================================================
// Tests
// ============================================================================
