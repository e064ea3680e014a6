//! Linear interpolation of scalars and 1D buffers.
//!
//! ## Purpose
//!
//! Small interpolation helpers used when profiles or lookup curves must be
//! resampled to a different length (for example a line profile displayed at
//! a new zoom level).
//!
//! ## Invariants
//!
//! * `resample_linear` keeps both endpoints exactly.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

/// Linear interpolation between `a` and `b`; `ratio = 0` gives `a`, `1` gives `b`.
#[inline]
pub fn lerp<T: Float>(a: T, b: T, ratio: T) -> T {
    a + (b - a) * ratio
}

/// Resample `values` to `len` points by linear interpolation.
///
/// An empty input or `len == 0` yields an empty vector; a single input value
/// is repeated.
pub fn resample_linear<T: Float>(values: &[T], len: usize) -> Vec<T> {
    match (values.len(), len) {
        (0, _) | (_, 0) => Vec::new(),
        (1, _) => vec![values[0]; len],
        (_, 1) => vec![values[0]],
        (n, _) => {
            let step = (n - 1) as f64 / (len - 1) as f64;
            (0..len)
                .map(|i| {
                    let pos = i as f64 * step;
                    let lower = (Float::floor(pos) as usize).min(n - 1);
                    let upper = (lower + 1).min(n - 1);
                    let ratio = T::from(pos - lower as f64).unwrap_or_else(T::zero);
                    lerp(values[lower], values[upper], ratio)
                })
                .collect()
        }
    }
}
