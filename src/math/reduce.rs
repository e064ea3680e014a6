//! Scalar reductions over typed numeric buffers.
//!
//! ## Purpose
//!
//! Minimum, maximum and sum of a buffer of any [`Element`] kind. Integer
//! kinds honour a `signed` flag: when false, raw bit patterns are read as
//! unsigned values (for instance an `i8` of `-1` counts as `255`).
//!
//! ## Design notes
//!
//! * **Native comparison**: Extrema are found by comparing elements in their
//!   own width (unsigned views through the unsigned twin type); only the
//!   winning element is widened to `f64`. `i64` data beyond 2^53 therefore
//!   picks the exact extremum, and [`extrema`] returns it unrounded.
//! * **Widening**: Sums accumulate in `f64`, so unsigned views never overflow
//!   their storage type.
//! * **Empty input**: `min`/`max` of nothing is an error; `sum` of nothing
//!   is `0`.

// Internal dependencies
use crate::primitives::element::Element;
use crate::primitives::errors::NumericError;

/// Smallest value of `array`.
pub fn min<T: Element>(array: &[T], signed: bool) -> Result<f64, NumericError> {
    min_max(array, signed).map(|(lo, _)| lo)
}

/// Largest value of `array`.
pub fn max<T: Element>(array: &[T], signed: bool) -> Result<f64, NumericError> {
    min_max(array, signed).map(|(_, hi)| hi)
}

/// Smallest and largest value of `array` in a single pass.
pub fn min_max<T: Element>(array: &[T], signed: bool) -> Result<(f64, f64), NumericError> {
    extrema(array, signed).map(|(lo, hi)| (lo.to_f64(signed), hi.to_f64(signed)))
}

/// Smallest and largest element of `array`, in the element type.
///
/// Integers are ordered as unsigned when `signed` is false.
pub fn extrema<T: Element>(array: &[T], signed: bool) -> Result<(T, T), NumericError> {
    let (&first, rest) = array.split_first().ok_or(NumericError::EmptyInput)?;
    Ok(rest.iter().fold((first, first), |(lo, hi), &x| {
        (
            if x.less_than(lo, signed) { x } else { lo },
            if hi.less_than(x, signed) { x } else { hi },
        )
    }))
}

/// Sum of all values of `array`.
pub fn sum<T: Element>(array: &[T], signed: bool) -> f64 {
    array.iter().map(|&x| x.to_f64(signed)).sum()
}
