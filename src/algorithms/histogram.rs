//! Fixed-range histogram binning.
//!
//! ## Purpose
//!
//! This module bins numeric buffers into a fixed number of equal-width bins
//! over a fixed `[min, max]` range. Display code uses it for intensity
//! histograms; classification code uses the counts for thresholds.
//!
//! ## Design notes
//!
//! * **Fixed shape**: Range, bin width and bin count are fixed at
//!   construction; only the counts change afterwards.
//! * **Integer domain**: In integer mode the bin width is a whole number
//!   `max(1, floor((range + 1) / bins))` and the bin count becomes
//!   `ceil((range + 1) / width)`. This never creates more bins than there are
//!   distinct integer values, which would leave empty bins between populated
//!   ones and bias sparse regions.
//! * **Closed upper edge**: In float mode `max` falls into the last bin.
//!
//! ## Key concepts
//!
//! * **dataToBin**: Multiplier mapping `value - min` to a fractional bin index.
//!
//! ## Invariants
//!
//! * `bins.len() >= 1`.
//! * In integer mode `bins.len() <= range + 1`.
//! * Sum of counts equals the number of values accepted since the last reset.
//!
//! ## Non-goals
//!
//! * Adaptive or data-driven bin edges.
//! * Silently dropping out-of-range values (they are reported as errors).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::any::Any;
use num_traits::Float;

// Internal dependencies
use crate::math::reduce;
use crate::primitives::buffer::{match_buffer, BufferRef};
use crate::primitives::element::Element;
use crate::primitives::errors::NumericError;
use crate::primitives::validator::Validator;

// ============================================================================
// Histogram
// ============================================================================

/// Equal-width histogram over a fixed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    min_value: f64,
    max_value: f64,
    integer: bool,
    bin_width: f64,
    data_to_bin: f64,
    bins: Vec<u32>,
}

impl Histogram {
    /// Create a histogram over `[min_value, max_value]` with `bin_count` bins.
    ///
    /// In integer mode the effective bin count may be lower than requested
    /// (see the module docs).
    ///
    /// # Errors
    ///
    /// * [`NumericError::InvalidBinCount`] when `bin_count` is zero.
    /// * [`NumericError::InvalidRange`] when the bounds are not finite or
    ///   `min_value > max_value`.
    pub fn new(
        min_value: f64,
        max_value: f64,
        bin_count: usize,
        integer: bool,
    ) -> Result<Self, NumericError> {
        Validator::validate_bin_count(bin_count)?;
        Validator::validate_range(min_value, max_value)?;

        let range = max_value - min_value;
        if range == 0.0 {
            tracing::warn!(min_value, "histogram built over an empty range");
        }

        let (bin_width, len) = if integer {
            let width = Float::floor((range + 1.0) / bin_count as f64).max(1.0);
            let len = Float::ceil((range + 1.0) / width) as usize;
            (width, len.max(1))
        } else {
            (range / bin_count as f64, bin_count)
        };

        let data_to_bin = if bin_width > 0.0 { 1.0 / bin_width } else { 0.0 };

        Ok(Self {
            min_value,
            max_value,
            integer,
            bin_width,
            data_to_bin,
            bins: vec![0; len],
        })
    }

    /// Build a histogram whose range spans the values of `buffer`.
    ///
    /// Integer kinds select integer mode. The histogram is filled before it is
    /// returned.
    ///
    /// # Errors
    ///
    /// [`NumericError::EmptyInput`] for an empty buffer, plus the errors of
    /// [`Histogram::new`].
    pub fn compute(
        buffer: BufferRef<'_>,
        bin_count: usize,
        signed: bool,
    ) -> Result<Self, NumericError> {
        let (lo, hi) = match_buffer!(BufferRef, buffer, v => reduce::min_max(v, signed))?;
        let mut histogram = Self::new(lo, hi, bin_count, buffer.kind().is_integer())?;
        histogram.add_buffer(buffer, signed)?;
        Ok(histogram)
    }

    // ========================================================================
    // Accumulation
    // ========================================================================

    /// Zero every bin without reallocating.
    pub fn reset(&mut self) {
        self.bins.iter_mut().for_each(|b| *b = 0);
    }

    /// Bin index for `value`.
    ///
    /// # Errors
    ///
    /// [`NumericError::ValueOutOfRange`] when `value` is outside
    /// `[min, max]` or NaN.
    pub fn bin_index(&self, value: f64) -> Result<usize, NumericError> {
        if !(value >= self.min_value && value <= self.max_value) {
            return Err(NumericError::ValueOutOfRange {
                value,
                min: self.min_value,
                max: self.max_value,
            });
        }
        let index = Float::floor((value - self.min_value) * self.data_to_bin) as usize;
        // Only `value == max` in float mode lands one past the end.
        Ok(index.min(self.bins.len() - 1))
    }

    /// Count one value.
    ///
    /// # Errors
    ///
    /// [`NumericError::ValueOutOfRange`] when `value` is outside the range.
    pub fn add_value(&mut self, value: f64) -> Result<(), NumericError> {
        let index = self.bin_index(value)?;
        self.bins[index] += 1;
        Ok(())
    }

    /// Count every value of a typed slice.
    ///
    /// Values accepted before an out-of-range value stay counted.
    ///
    /// # Errors
    ///
    /// [`NumericError::ValueOutOfRange`] at the first out-of-range value.
    pub fn add_values<T: Element>(&mut self, values: &[T], signed: bool) -> Result<(), NumericError> {
        for &v in values {
            self.add_value(v.to_f64(signed))?;
        }
        Ok(())
    }

    /// Count every value of a kind-tagged buffer.
    ///
    /// # Errors
    ///
    /// [`NumericError::ValueOutOfRange`] at the first out-of-range value.
    pub fn add_buffer(&mut self, buffer: BufferRef<'_>, signed: bool) -> Result<(), NumericError> {
        match_buffer!(BufferRef, buffer, v => self.add_values(v, signed))
    }

    /// Count every value of an opaque buffer.
    ///
    /// Returns `Ok(false)` without touching the bins when `values` is not a
    /// buffer of a supported kind.
    ///
    /// # Errors
    ///
    /// [`NumericError::ValueOutOfRange`] at the first out-of-range value.
    pub fn add_any(&mut self, values: &dyn Any, signed: bool) -> Result<bool, NumericError> {
        match BufferRef::from_any(values) {
            Some(buffer) => self.add_buffer(buffer, signed).map(|()| true),
            None => Ok(false),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Lower bound of the range.
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper bound of the range.
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Whether the histogram was built in integer mode.
    pub fn is_integer(&self) -> bool {
        self.integer
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Width of one bin in data units.
    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    /// Multiplier mapping `value - min` to a fractional bin index.
    pub fn data_to_bin(&self) -> f64 {
        self.data_to_bin
    }

    /// Count of bin `index`, `None` past the end.
    pub fn bin(&self, index: usize) -> Option<u32> {
        self.bins.get(index).copied()
    }

    /// All bin counts.
    pub fn bins(&self) -> &[u32] {
        &self.bins
    }

    /// Lower edge of bin `index` in data units.
    pub fn bin_start(&self, index: usize) -> f64 {
        self.min_value + index as f64 * self.bin_width
    }

    /// Sum of all bin counts.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&b| u64::from(b)).sum()
    }
}
