//! Equal-width bucketing of the observed range

use super::storage::Storage;
use crate::error::StatsError;
use crate::math;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Upper bound on the buckets reserved up front; larger counts grow on demand
const MAX_PREALLOCATED: usize = 1 << 16;

/// One equal-width interval of the observed range
///
/// Covers `[min, max)`; the last bucket of a partition also admits `max`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bucket {
    /// Observations falling in this bucket
    pub count: u64,
    /// Inclusive lower bound
    pub min: f64,
    /// Exclusive upper bound (inclusive for the last bucket)
    pub max: f64,
    /// Midpoint of the interval
    pub midpoint: f64,
}

impl Bucket {
    fn new(min: f64, max: f64) -> Self {
        Self {
            count: 0,
            min,
            max,
            midpoint: (min + max) / 2.0,
        }
    }

    /// Whether `value` lies in `[min, max)`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// Partition `[min, max]` into `bucket_count` buckets and count observations.
///
/// Boundaries are computed from `min` for every bucket so rounding does not
/// accumulate, and buckets are added until the last upper bound reaches
/// `max`. When `min + width * n` falls short of `max` this yields one bucket
/// more than requested.
pub(crate) fn partition(
    storage: &Storage,
    total: u64,
    min: f64,
    max: f64,
    bucket_count: f64,
) -> Result<Vec<Bucket>, StatsError> {
    if bucket_count.is_nan() || bucket_count < 1.0 {
        return Err(StatsError::InvalidBucketCount(bucket_count));
    }
    if total == 0 {
        return Ok(Vec::new());
    }

    let span = max - min;
    if span < 0.0 {
        return Err(StatsError::InvertedRange { min, max });
    }
    if span == 0.0 {
        let mut only = Bucket::new(min, max);
        only.count = total;
        return Ok(Vec::from([only]));
    }

    let width = span / bucket_count;
    if !span.is_finite() || !width.is_finite() {
        return Err(StatsError::NonFiniteRange { min, max });
    }
    // Boundaries closer than the float spacing at either end never advance.
    if min + width == min || max - width == max {
        return Err(StatsError::InvalidBucketCount(bucket_count));
    }

    let requested = math::ceil(bucket_count) as usize;
    let mut buckets = Vec::with_capacity(requested.saturating_add(1).min(MAX_PREALLOCATED));
    let mut last_max = min;
    let mut i = 0u64;
    while last_max < max {
        let lower = min + width * i as f64;
        let upper = min + width * (i + 1) as f64;
        buckets.push(Bucket::new(lower, upper));
        last_max = upper;
        i += 1;
    }

    if buckets.len() as f64 > math::ceil(bucket_count) {
        log::debug!(
            "bucket boundaries fell short of max {}, using {} buckets for {} requested",
            max,
            buckets.len(),
            bucket_count
        );
    }

    // `max` itself and any float overshoot land in the last bucket.
    let Some(last) = buckets.len().checked_sub(1) else {
        return Ok(buckets);
    };
    storage.for_each_weighted(|value, n| {
        let index = (math::floor((value - min) / width) as usize).min(last);
        buckets[index].count += n;
    });

    Ok(buckets)
}
