//! High-level API for the numeric core.
//!
//! ## Purpose
//!
//! This module is the user-facing entry point. It re-exports the kernels,
//! buffer types and algorithms, and provides fluent builders for the two
//! stateful components: [`ScalerBuilder`] and [`HistogramBuilder`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Strict**: Setting the same parameter twice is reported as an error
//!   instead of silently keeping the last value.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`ScalerBuilder`] via `ScalerBuilder::new()` (or
//!    [`HistogramBuilder`] via `HistogramBuilder::new()`).
//! 2. Chain configuration methods (`.input_range()`, `.output_range()`, etc.).
//! 3. Call `.build()` to validate and construct.

// Internal dependencies
use crate::primitives::buffer::match_buffer;
use crate::primitives::validator::Validator;

// Publicly re-exported modules
pub use crate::engine::dispatch;
pub use crate::math::{arith, interpolate, reduce, stats};

// Publicly re-exported types
pub use crate::algorithms::assignment::{solve, Assignment, HungarianSolver, Step};
pub use crate::algorithms::histogram::Histogram;
pub use crate::algorithms::scaler::{
    rescale, ListenerId, Scaler, ScalerBounds, ScalerDocument, ScalerEvent, CROSS_EPSILON,
    LOOKUP_MAX,
};
pub use crate::math::arith::BinaryOp;
pub use crate::math::select::select;
pub use crate::math::stats::MAD_NORMAL_CONSISTENCY;
pub use crate::primitives::buffer::{BufferRef, NumericBuffer};
pub use crate::primitives::element::{Element, ElementKind};
pub use crate::primitives::errors::NumericError;

/// Default bin count of [`HistogramBuilder`].
pub const DEFAULT_BIN_COUNT: usize = 256;

// ============================================================================
// Scaler Builder
// ============================================================================

/// Fluent builder for a [`Scaler`].
///
/// Unset input bounds default to `[0, 1]`; the absolute range defaults to the
/// current window and vice versa. The output range defaults to `[0, 1]`.
#[derive(Debug, Clone, Default)]
pub struct ScalerBuilder {
    /// Absolute permissible input range.
    pub abs_range: Option<(f64, f64)>,

    /// Current input window.
    pub input_range: Option<(f64, f64)>,

    /// Output range.
    pub output_range: Option<(f64, f64)>,

    /// Whether the data is integer-valued (enables the lookup table).
    pub integer_data: Option<bool>,

    /// Whether left bounds may exceed right bounds.
    pub can_cross: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl ScalerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the absolute input range.
    pub fn abs_range(mut self, left: f64, right: f64) -> Self {
        if self.abs_range.is_some() {
            self.duplicate_param = Some("abs_range");
        }
        self.abs_range = Some((left, right));
        self
    }

    /// Set the current input window.
    pub fn input_range(mut self, left: f64, right: f64) -> Self {
        if self.input_range.is_some() {
            self.duplicate_param = Some("input_range");
        }
        self.input_range = Some((left, right));
        self
    }

    /// Set the output range.
    pub fn output_range(mut self, left: f64, right: f64) -> Self {
        if self.output_range.is_some() {
            self.duplicate_param = Some("output_range");
        }
        self.output_range = Some((left, right));
        self
    }

    /// Mark the data as integer-valued.
    pub fn integer_data(mut self, integer: bool) -> Self {
        if self.integer_data.is_some() {
            self.duplicate_param = Some("integer_data");
        }
        self.integer_data = Some(integer);
        self
    }

    /// Allow crossed input bounds.
    pub fn can_cross(mut self, can_cross: bool) -> Self {
        if self.can_cross.is_some() {
            self.duplicate_param = Some("can_cross");
        }
        self.can_cross = Some(can_cross);
        self
    }

    /// Validate the configuration and build the scaler.
    ///
    /// # Errors
    ///
    /// * [`NumericError::DuplicateParameter`] when a setter was called twice.
    /// * [`NumericError::InvalidNumericValue`] for a NaN or infinite bound.
    /// * [`NumericError::CrossedScaler`] for crossed bounds without `can_cross`.
    pub fn build(self) -> Result<Scaler, NumericError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let (left_in, right_in) = self.input_range.or(self.abs_range).unwrap_or((0.0, 1.0));
        let (abs_left_in, abs_right_in) = self.abs_range.unwrap_or((left_in, right_in));
        let (left_out, right_out) = self.output_range.unwrap_or((0.0, 1.0));

        for (name, value) in [
            ("abs_left_in", abs_left_in),
            ("abs_right_in", abs_right_in),
            ("left_in", left_in),
            ("right_in", right_in),
            ("left_out", left_out),
            ("right_out", right_out),
        ] {
            Validator::validate_scalar(value, name)?;
        }

        Scaler::new(
            abs_left_in,
            abs_right_in,
            left_in,
            right_in,
            left_out,
            right_out,
            self.integer_data.unwrap_or(false),
            self.can_cross.unwrap_or(false),
        )
    }
}

// ============================================================================
// Histogram Builder
// ============================================================================

/// Fluent builder for a [`Histogram`].
#[derive(Debug, Clone, Default)]
pub struct HistogramBuilder {
    /// Value range `[min, max]`; inferred from the data when absent.
    pub range: Option<(f64, f64)>,

    /// Requested bin count (default: [`DEFAULT_BIN_COUNT`]).
    pub bins: Option<usize>,

    /// Integer mode; inferred from the buffer kind when absent.
    pub integer: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl HistogramBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value range.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        if self.range.is_some() {
            self.duplicate_param = Some("range");
        }
        self.range = Some((min, max));
        self
    }

    /// Set the requested bin count.
    pub fn bins(mut self, bins: usize) -> Self {
        if self.bins.is_some() {
            self.duplicate_param = Some("bins");
        }
        self.bins = Some(bins);
        self
    }

    /// Select integer or float binning.
    pub fn integer(mut self, integer: bool) -> Self {
        if self.integer.is_some() {
            self.duplicate_param = Some("integer");
        }
        self.integer = Some(integer);
        self
    }

    /// Build an empty histogram over the configured range.
    ///
    /// # Errors
    ///
    /// * [`NumericError::DuplicateParameter`] when a setter was called twice.
    /// * [`NumericError::InvalidRange`] when no range was configured or it is
    ///   invalid.
    /// * [`NumericError::InvalidBinCount`] for zero bins.
    pub fn build(self) -> Result<Histogram, NumericError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        let (min, max) = self.range.unwrap_or((f64::NAN, f64::NAN));
        Histogram::new(
            min,
            max,
            self.bins.unwrap_or(DEFAULT_BIN_COUNT),
            self.integer.unwrap_or(false),
        )
    }

    /// Build a histogram and fill it with `buffer`.
    ///
    /// Unset parameters are inferred: the range from the data's min and max,
    /// integer mode from the buffer kind.
    ///
    /// # Errors
    ///
    /// Same as [`HistogramBuilder::build`], plus [`NumericError::EmptyInput`]
    /// when the range must be inferred from an empty buffer and
    /// [`NumericError::ValueOutOfRange`] when a value lies outside a configured
    /// range.
    pub fn build_from(self, buffer: BufferRef<'_>, signed: bool) -> Result<Histogram, NumericError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        let (min, max) = match self.range {
            Some(range) => range,
            None => match_buffer!(BufferRef, buffer, v => reduce::min_max(v, signed))?,
        };
        let integer = self.integer.unwrap_or_else(|| buffer.kind().is_integer());
        let mut histogram = Histogram::new(
            min,
            max,
            self.bins.unwrap_or(DEFAULT_BIN_COUNT),
            integer,
        )?;
        histogram.add_buffer(buffer, signed)?;
        Ok(histogram)
    }
}
