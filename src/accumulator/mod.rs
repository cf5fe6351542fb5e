//! Descriptive-statistics accumulator
//!
//! [`Stats`] accumulates observations and answers queries about central
//! tendency, dispersion, distribution shape and binning.
//!
//! # Storage Modes
//!
//! - [`Mode::Raw`]: every observation in insertion order
//! - [`Mode::Histogram`]: a value-to-count table; smaller when few distinct
//!   values repeat often, but [`Stats::raw`] is unavailable
//!
//! # Example
//!
//! ```
//! use thinkstats::accumulator::{Stats, StatsConfig};
//!
//! let mut stats = Stats::with_config(StatsConfig::new().store_raw(false));
//!
//! for value in [-1, 0, 1, 2, 3, 4, 6, 8, 9] {
//!     stats.push(value);
//! }
//!
//! let buckets = stats.bucket(None).unwrap();
//! println!("Buckets: {}", buckets.len());
//! println!("Median: {}", stats.median());
//! println!("Stddev: {}", stats.stddev());
//! ```

mod bucket;
mod config;
mod stats;
mod storage;

pub use bucket::Bucket;
pub use config::StatsConfig;
pub use stats::{Stats, DISTRIBUTION_BUCKETS};
pub use storage::{Frequencies, Key, Mode};
