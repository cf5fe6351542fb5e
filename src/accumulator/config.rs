//! Accumulator configuration

use super::storage::Mode;
use crate::traits::{ascending, Compare};

/// Construction options for [`Stats`](super::Stats)
///
/// # Example
///
/// ```
/// use thinkstats::{Mode, Stats, StatsConfig};
/// use thinkstats::traits::descending;
///
/// let config = StatsConfig::new().store_raw(false).compare(descending);
/// let mut stats = Stats::with_config(config);
/// stats.push([1, 5, 3]);
///
/// assert_eq!(stats.mode(), Mode::Histogram);
/// assert_eq!(stats.sorted(), &[5.0, 3.0, 1.0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct StatsConfig {
    pub(crate) mode: Mode,
    pub(crate) compare: Compare,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsConfig {
    /// Raw storage, numeric ascending order
    pub fn new() -> Self {
        Self {
            mode: Mode::Raw,
            compare: ascending,
        }
    }

    /// Keep every raw value (`true`) or only a frequency table (`false`)
    pub fn store_raw(mut self, store_raw: bool) -> Self {
        self.mode = if store_raw { Mode::Raw } else { Mode::Histogram };
        self
    }

    /// Select the storage mode directly
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Order used by extrema, sorting, searching and the CDF
    pub fn compare(mut self, compare: Compare) -> Self {
        self.compare = compare;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cmp::Ordering;

    #[test]
    fn test_defaults() {
        let config = StatsConfig::default();
        assert_eq!(config.mode, Mode::Raw);
        assert_eq!((config.compare)(&1.0, &2.0), Ordering::Less);
    }

    #[test]
    fn test_store_raw_toggles_mode() {
        assert_eq!(StatsConfig::new().store_raw(false).mode, Mode::Histogram);
        assert_eq!(
            StatsConfig::new().mode(Mode::Histogram).store_raw(true).mode,
            Mode::Raw
        );
    }
}
