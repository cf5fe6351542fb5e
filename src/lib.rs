//! # Thinkstats
//!
//! Streaming descriptive statistics for Rust.
//!
//! Thinkstats accumulates numeric observations one at a time and answers
//! descriptive queries over everything seen so far: central tendency,
//! dispersion, distribution shape and binning.
//!
//! ## Features
//!
//! - **Two storage modes**: keep every raw value (insertion order preserved),
//!   or collapse observations into a frequency table when the value domain is
//!   small relative to the number of observations
//! - **Central tendency**: arithmetic mean, median
//! - **Dispersion**: total spread, population/sample variance, standard deviation
//! - **Shape**: histogram, PMF, CDF, percentiles, percentile rank, hazard
//! - **Binning**: equal-width buckets over the observed range
//! - **Custom ordering**: every order-dependent query honours an injectable comparator
//!
//! ## Quick Start
//!
//! ```rust
//! use thinkstats::prelude::*;
//!
//! let mut stats = Stats::new();
//! stats.push([-1.0, 0.0, 1.0, 2.0, 1.0, 1.0, 1.0, 3.0, 4.0, 6.0, 8.0, 9.0]);
//!
//! assert_eq!(stats.median(), 1.5);
//! assert_eq!(stats.frequency(1.0), 4);
//! assert!((stats.variance() - 9.4097).abs() < 1e-4);
//! ```
//!
//! ## Histogram Mode
//!
//! ```rust
//! use thinkstats::Stats;
//!
//! let mut weeks = Stats::histogram();
//! for week in [39, 39, 40, 38, 41, 39] {
//!     weeks.push(week);
//! }
//!
//! assert!(weeks.raw().is_err());
//! assert_eq!(weeks.sorted(), &[38.0, 39.0, 39.0, 39.0, 40.0, 41.0]);
//! assert!((weeks.pmf_of((38..=40).map(f64::from)) - 5.0 / 6.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std + alloc` and float math goes through `libm`
//! - `records` (default): Fixed-width data-file parser feeding the accumulator
//! - `serde`: Serialization for buckets and record schemas
//!
//! ## Thread Safety
//!
//! [`Stats`] is `Send` but **not `Sync`**: queries build their sorted and
//! frequency views lazily through `&self`. Wrap shared instances in a
//! `Mutex` or `RwLock`.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod accumulator;
pub mod error;
pub(crate) mod math;
pub mod traits;

#[cfg(feature = "records")]
#[cfg_attr(docsrs, doc(cfg(feature = "records")))]
pub mod records;

pub mod prelude {
    pub use crate::accumulator::{Bucket, Key, Mode, Stats, StatsConfig};
    pub use crate::error::StatsError;
    pub use crate::traits::*;

    #[cfg(feature = "records")]
    pub use crate::records::{FieldKind, Record, Schema};
}

pub use accumulator::{Bucket, Key, Mode, Stats, StatsConfig};
pub use error::StatsError;
