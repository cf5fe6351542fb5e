//! Core traits for feeding and ordering observations
//!
//! [`Observations`] describes anything that can be pushed into an
//! accumulator: a single number, or a sequence of them (sequences nest and
//! flatten in order). [`Compare`] is the total order the accumulator uses for
//! every order-dependent query.

use core::cmp::Ordering;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Total order over observations
///
/// Returns `Less` when `a` sorts before `b`. The default is [`ascending`].
pub type Compare = fn(&f64, &f64) -> Ordering;

/// Fold `-0.0` into `0.0` and every NaN into `f64::NAN`
///
/// Observations are stored in this form, so frequency keys and the built-in
/// comparators see the same equivalence classes.
#[inline]
pub(crate) fn canonical(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

/// Numeric ascending order (`f64::total_cmp` over canonical values)
///
/// `-0.0` equals `0.0` and all NaNs are equal, sorting after `+inf`.
pub fn ascending(a: &f64, b: &f64) -> Ordering {
    canonical(*a).total_cmp(&canonical(*b))
}

/// Numeric descending order
pub fn descending(a: &f64, b: &f64) -> Ordering {
    ascending(b, a)
}

/// Values that can be pushed into an accumulator
///
/// Implemented for the numeric primitives (and references to them), which
/// yield one observation, and for slices, arrays and `Vec`s of anything
/// that implements this trait, which yield each element in order.
///
/// # Example
///
/// ```
/// use thinkstats::Stats;
///
/// let mut stats = Stats::new();
/// stats.push(3).push(vec![vec![1.5, 2.0], vec![0.0]]).push(&[7u8, 8][..]);
///
/// assert_eq!(stats.count(), 6);
/// assert_eq!(stats.raw().unwrap(), &[3.0, 1.5, 2.0, 0.0, 7.0, 8.0]);
/// ```
pub trait Observations {
    /// Call `f` once per scalar observation, in order
    fn for_each_value<F: FnMut(f64)>(self, f: &mut F);
}

macro_rules! lossless_scalar {
    ($($ty:ty),*) => {$(
        impl Observations for $ty {
            #[inline]
            fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
                f(f64::from(self));
            }
        }

        impl Observations for &$ty {
            #[inline]
            fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
                f(f64::from(*self));
            }
        }
    )*};
}

// 64-bit integers above 2^53 round to the nearest representable f64.
macro_rules! rounding_scalar {
    ($($ty:ty),*) => {$(
        impl Observations for $ty {
            #[inline]
            fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
                f(self as f64);
            }
        }

        impl Observations for &$ty {
            #[inline]
            fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
                f(*self as f64);
            }
        }
    )*};
}

lossless_scalar!(f64, f32, i8, i16, i32, u8, u16, u32);
rounding_scalar!(i64, u64, isize, usize);

impl<'a, T> Observations for &'a [T]
where
    &'a T: Observations,
{
    fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
        for item in self {
            item.for_each_value(f);
        }
    }
}

impl<'a, T, const N: usize> Observations for &'a [T; N]
where
    &'a T: Observations,
{
    fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
        self.as_slice().for_each_value(f);
    }
}

impl<'a, T> Observations for &'a Vec<T>
where
    &'a T: Observations,
{
    fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
        self.as_slice().for_each_value(f);
    }
}

impl<T: Observations, const N: usize> Observations for [T; N] {
    fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
        for item in self {
            item.for_each_value(f);
        }
    }
}

impl<T: Observations> Observations for Vec<T> {
    fn for_each_value<F: FnMut(f64)>(self, f: &mut F) {
        for item in self {
            item.for_each_value(f);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<O: Observations>(values: O) -> Vec<f64> {
        let mut out = Vec::new();
        values.for_each_value(&mut |v| out.push(v));
        out
    }

    #[test]
    fn test_scalars() {
        assert_eq!(collect(0), [0.0]);
        assert_eq!(collect(-3i64), [-3.0]);
        assert_eq!(collect(2.5f32), [2.5]);
        assert_eq!(collect(&7u16), [7.0]);
    }

    #[test]
    fn test_sequences_flatten_in_order() {
        assert_eq!(collect([3.0, -1.0, 2.0]), [3.0, -1.0, 2.0]);
        assert_eq!(collect(vec![vec![1, 2], vec![], vec![3]]), [1.0, 2.0, 3.0]);

        let nested = vec![[1.0, 2.0], [3.0, 4.0]];
        assert_eq!(collect(&nested), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(collect(&nested[1..]), [3.0, 4.0]);
    }

    #[test]
    fn test_comparators() {
        assert_eq!(ascending(&1.0, &2.0), Ordering::Less);
        assert_eq!(descending(&1.0, &2.0), Ordering::Greater);
        assert_eq!(ascending(&0.0, &0.0), Ordering::Equal);
    }

    #[test]
    fn test_comparators_fold_signed_zero_and_nan() {
        assert_eq!(ascending(&-0.0, &0.0), Ordering::Equal);
        assert_eq!(descending(&0.0, &-0.0), Ordering::Equal);
        assert_eq!(ascending(&f64::NAN, &-f64::NAN), Ordering::Equal);
        assert_eq!(ascending(&-f64::NAN, &f64::INFINITY), Ordering::Greater);
        assert_eq!(canonical(-0.0).to_bits(), 0.0f64.to_bits());
    }
}
