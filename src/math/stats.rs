//! Statistical reductions: moments, correlation and robust spread.
//!
//! ## Purpose
//!
//! This module computes the summary statistics consumed by display and
//! classification code: mean, variance, standard deviation, two correlation
//! coefficients, the median and the Median Absolute Deviation (MAD).
//!
//! ## Design notes
//!
//! * **Two-pass moments**: The mean is computed first, then squared
//!   deviations, which keeps variance non-negative and stable.
//! * **Accumulation**: Sums run in `f64` regardless of `T`; products for the
//!   correlation coefficients are accumulated two lanes at a time with
//!   `wide::f64x2`.
//! * **Selection-based median**: The median is the element of rank
//!   `len / 2` (0-based), found by quickselect. For even lengths this is the
//!   upper of the two middle values; no averaging takes place.
//!
//! ## Key concepts
//!
//! * **Un-centred correlation**: `Σab / sqrt(Σa²·Σb²)` (cosine similarity).
//! * **Pearson correlation**: Mean-centred estimator using unbiased deviations.
//! * **MAD**: `median(|x - median(x)|)`, optionally scaled by `1.4826`.
//!
//! ## Invariants
//!
//! * `var(x, false) == std(x, false)²`.
//! * `median` leaves its input untouched; `median_in_place` reorders it.
//!
//! ## Non-goals
//!
//! * Weighted statistics.
//! * NaN-aware variants (NaN propagates or yields an unspecified order).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;
use wide::f64x2;

// Internal dependencies
use crate::math::select::select;
use crate::primitives::errors::NumericError;
use crate::primitives::validator::Validator;

/// Consistency constant making the MAD an estimator of the normal standard deviation.
pub const MAD_NORMAL_CONSISTENCY: f64 = 1.4826;

// ============================================================================
// Conversion Helpers
// ============================================================================

#[inline]
fn widen<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

#[inline]
fn narrow<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Accumulate `Σ a·b` with two SIMD lanes.
fn sum_of_products<T: Float>(a: &[T], b: &[T]) -> f64 {
    let n = a.len().min(b.len());
    let mut acc = f64x2::splat(0.0);
    let mut i = 0;
    while i + 2 <= n {
        let va = f64x2::new([widen(a[i]), widen(a[i + 1])]);
        let vb = f64x2::new([widen(b[i]), widen(b[i + 1])]);
        acc += va * vb;
        i += 2;
    }
    let lanes = acc.to_array();
    let mut total = lanes[0] + lanes[1];
    if i < n {
        total += widen(a[i]) * widen(b[i]);
    }
    total
}

// ============================================================================
// Moments
// ============================================================================

/// Sum of all values.
pub fn sum<T: Float>(input: &[T]) -> T {
    narrow(input.iter().map(|&x| widen(x)).sum::<f64>())
}

/// Arithmetic mean. NaN for an empty input.
pub fn mean<T: Float>(input: &[T]) -> T {
    let total: f64 = input.iter().map(|&x| widen(x)).sum();
    narrow(total / input.len() as f64)
}

/// Variance, dividing by `n - 1` when `unbiased`, else by `n`.
pub fn var<T: Float>(input: &[T], unbiased: bool) -> T {
    let n = input.len() as f64;
    let m = widen(mean(input));
    let squares: f64 = input
        .iter()
        .map(|&x| {
            let d = widen(x) - m;
            d * d
        })
        .sum();
    let denominator = if unbiased { n - 1.0 } else { n };
    narrow(squares / denominator)
}

/// Standard deviation, the square root of [`var`].
pub fn std<T: Float>(input: &[T], unbiased: bool) -> T {
    var(input, unbiased).sqrt()
}

// ============================================================================
// Correlation
// ============================================================================

/// Un-centred correlation `Σab / sqrt(Σa² · Σb²)`.
///
/// # Errors
///
/// [`NumericError::PopulationSizeMismatch`] when the inputs differ in length.
pub fn correlation<T: Float>(a: &[T], b: &[T]) -> Result<T, NumericError> {
    Validator::validate_same_population(a.len(), b.len())?;
    let ab = sum_of_products(a, b);
    let aa = sum_of_products(a, a);
    let bb = sum_of_products(b, b);
    Ok(narrow(ab / Float::sqrt(aa * bb)))
}

/// Pearson correlation `(Σab - n·ā·b̄) / ((n - 1)·s_a·s_b)`.
///
/// # Errors
///
/// [`NumericError::PopulationSizeMismatch`] when the inputs differ in length.
pub fn correlation_pearson<T: Float>(a: &[T], b: &[T]) -> Result<T, NumericError> {
    Validator::validate_same_population(a.len(), b.len())?;
    let n = a.len() as f64;
    let ab = sum_of_products(a, b);
    let mean_a = widen(mean(a));
    let mean_b = widen(mean(b));
    let std_a = widen(std(a, true));
    let std_b = widen(std(b, true));
    Ok(narrow((ab - n * mean_a * mean_b) / ((n - 1.0) * std_a * std_b)))
}

// ============================================================================
// Median & MAD
// ============================================================================

/// Median by selection of rank `len / 2`, reordering `input`.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty slice.
pub fn median_in_place<T: Float>(input: &mut [T]) -> Result<T, NumericError> {
    Validator::validate_non_empty(input)?;
    let k = input.len() / 2 + 1;
    select(k, input)
}

/// Median by selection of rank `len / 2` on a private copy of `input`.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty slice.
pub fn median<T: Float>(input: &[T]) -> Result<T, NumericError> {
    let mut copy = input.to_vec();
    median_in_place(&mut copy)
}

/// Median Absolute Deviation `median(|x - median(x)|)`.
///
/// When `normalize_population` is set, deviations are multiplied by
/// [`MAD_NORMAL_CONSISTENCY`] before the outer median. `input` is not
/// modified.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty slice.
pub fn mad<T: Float>(input: &[T], normalize_population: bool) -> Result<T, NumericError> {
    let center = median(input)?;
    let factor: T = if normalize_population {
        narrow(MAD_NORMAL_CONSISTENCY)
    } else {
        T::one()
    };
    let mut deviations: Vec<T> = input
        .iter()
        .map(|&x| (x - center).abs() * factor)
        .collect();
    median_in_place(&mut deviations)
}
