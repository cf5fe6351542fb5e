//! Observation storage
//!
//! An accumulator keeps its observations in exactly one of two layouts,
//! chosen at construction: every raw value in insertion order, or a
//! frequency table from distinct value to occurrence count.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::traits::canonical;

#[cfg(feature = "std")]
use std::{collections::BTreeMap, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};

/// Frequency table: distinct value to occurrence count
pub type Frequencies = BTreeMap<Key, u64>;

/// An observed value used as a frequency-table key
///
/// Equality and ordering are exact (`f64::total_cmp`), with `-0.0` folded
/// into `0.0` and every NaN treated as the same key.
#[derive(Clone, Copy, Debug)]
pub struct Key(f64);

impl Key {
    /// Wrap a value
    pub fn new(value: f64) -> Self {
        Self(canonical(value))
    }

    /// The wrapped value
    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Key> for f64 {
    fn from(key: Key) -> Self {
        key.0
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

/// Storage strategy of an accumulator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Every observation retained in insertion order
    Raw,
    /// Observations collapsed into a value-to-count table
    Histogram,
}

#[derive(Clone, Debug)]
pub(crate) enum Storage {
    Raw(Vec<f64>),
    Histogram(Frequencies),
}

impl Storage {
    pub(crate) fn new(mode: Mode) -> Self {
        match mode {
            Mode::Raw => Storage::Raw(Vec::new()),
            Mode::Histogram => Storage::Histogram(Frequencies::new()),
        }
    }

    pub(crate) fn mode(&self) -> Mode {
        match self {
            Storage::Raw(_) => Mode::Raw,
            Storage::Histogram(_) => Mode::Histogram,
        }
    }

    pub(crate) fn insert(&mut self, value: f64) {
        match self {
            Storage::Raw(values) => values.push(value),
            Storage::Histogram(table) => *table.entry(Key::new(value)).or_insert(0) += 1,
        }
    }

    /// Visit every distinct run as `(value, occurrences)`
    ///
    /// Raw mode visits each observation with weight 1 in insertion order;
    /// histogram mode visits each key once in key order.
    pub(crate) fn for_each_weighted<F: FnMut(f64, u64)>(&self, mut f: F) {
        match self {
            Storage::Raw(values) => values.iter().for_each(|&v| f(v, 1)),
            Storage::Histogram(table) => table.iter().for_each(|(k, &n)| f(k.get(), n)),
        }
    }

    pub(crate) fn size_bytes(&self) -> usize {
        match self {
            Storage::Raw(values) => values.capacity() * core::mem::size_of::<f64>(),
            // BTreeMap does not expose its node layout; count one key/value pair per entry.
            Storage::Histogram(table) => {
                table.len() * (core::mem::size_of::<Key>() + core::mem::size_of::<u64>())
            }
        }
    }
}

/// Count every observation in `values`
pub(crate) fn tally(values: &[f64]) -> Frequencies {
    let mut table = Frequencies::new();
    for &value in values {
        *table.entry(Key::new(value)).or_insert(0) += 1;
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_folds_signed_zero_and_nan() {
        assert_eq!(Key::new(-0.0), Key::new(0.0));
        assert_eq!(Key::new(f64::NAN), Key::new(-f64::NAN));
        assert_ne!(Key::new(1.0), Key::new(1.0 + f64::EPSILON));
        assert!(Key::new(-1.0) < Key::new(0.0));
    }

    #[test]
    fn test_insert_raw_keeps_order() {
        let mut storage = Storage::new(Mode::Raw);
        for v in [3.0, 1.0, 3.0] {
            storage.insert(v);
        }
        match &storage {
            Storage::Raw(values) => assert_eq!(values, &[3.0, 1.0, 3.0]),
            Storage::Histogram(_) => panic!("expected raw storage"),
        }
    }

    #[test]
    fn test_insert_histogram_counts() {
        let mut storage = Storage::new(Mode::Histogram);
        for v in [3.0, 1.0, 3.0, 0.0, -0.0] {
            storage.insert(v);
        }
        assert_eq!(storage.mode(), Mode::Histogram);

        let mut seen = Vec::new();
        storage.for_each_weighted(|v, n| seen.push((v, n)));
        assert_eq!(seen, [(0.0, 2), (1.0, 1), (3.0, 2)]);
    }

    #[test]
    fn test_tally_matches_histogram() {
        let table = tally(&[2.0, 2.0, 5.0]);
        assert_eq!(table.get(&Key::new(2.0)), Some(&2));
        assert_eq!(table.get(&Key::new(5.0)), Some(&1));
        assert_eq!(table.get(&Key::new(4.0)), None);
    }
}
