//! Error types for the numeric core.
//!
//! ## Purpose
//!
//! This module defines the single error enum returned by every fallible
//! operation in the crate: array kernels, statistics, rank selection,
//! histogram accumulation, scaler construction and the assignment solver.
//!
//! ## Design notes
//!
//! * **Fail-fast**: Precondition violations surface as errors, never as silent
//!   truncation or wraparound of indices.
//! * **No-std friendly**: `Display` is implemented by hand; `std::error::Error`
//!   is only implemented when the `std` feature is enabled.
//!
//! ## Non-goals
//!
//! * Unsupported element kinds are not errors; dispatch returns `None` instead.
//! * Integer overflow is not reported; it wraps.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt;

/// Errors raised by the numeric core.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericError {
    /// An operation that needs at least one element received none.
    EmptyInput,

    /// Two buffers that must have identical lengths do not.
    MismatchedLengths {
        /// Length required by the first operand.
        expected: usize,
        /// Length actually supplied.
        got: usize,
    },

    /// Correlation inputs differ in size.
    PopulationSizeMismatch {
        /// Size of the first population.
        left: usize,
        /// Size of the second population.
        right: usize,
    },

    /// Rank selection called with `k` outside `[1, len]`.
    InvalidRank {
        /// Requested 1-based rank.
        k: usize,
        /// Number of elements available.
        len: usize,
    },

    /// A histogram value fell outside the configured range.
    ValueOutOfRange {
        /// Offending value.
        value: f64,
        /// Lower histogram bound.
        min: f64,
        /// Upper histogram bound.
        max: f64,
    },

    /// Histogram requested with zero bins.
    InvalidBinCount(usize),

    /// A range whose bounds are not ordered or not finite.
    InvalidRange {
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Scaler bounds are crossed while crossing is not permitted.
    CrossedScaler,

    /// A row of a cost matrix has a different length than the first row.
    RaggedMatrix {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// NaN or infinite value where finite values are required.
    InvalidNumericValue(String),

    /// A persisted document could not be read or written.
    Persistence(String),

    /// A builder parameter was set more than once.
    DuplicateParameter {
        /// Name of the repeated parameter.
        parameter: &'static str,
    },
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "Input array is empty"),
            Self::MismatchedLengths { expected, got } => {
                write!(f, "Length mismatch: expected {}, got {}", expected, got)
            }
            Self::PopulationSizeMismatch { left, right } => write!(
                f,
                "populations must have same size ({} vs {})",
                left, right
            ),
            Self::InvalidRank { k, len } => {
                write!(f, "Invalid rank: {} (must be in [1, {}])", k, len)
            }
            Self::ValueOutOfRange { value, min, max } => write!(
                f,
                "Value out of histogram range: {} (must be in [{}, {}])",
                value, min, max
            ),
            Self::InvalidBinCount(n) => write!(f, "Invalid bin count: {} (must be >= 1)", n),
            Self::InvalidRange { min, max } => {
                write!(f, "Invalid range: [{}, {}]", min, max)
            }
            Self::CrossedScaler => {
                write!(f, "can't create scaler: left > right and can_cross=false")
            }
            Self::RaggedMatrix { row, expected, got } => write!(
                f,
                "Ragged cost matrix: row {} has {} columns, expected {}",
                row, got, expected
            ),
            Self::InvalidNumericValue(msg) => write!(f, "Invalid numeric value: {}", msg),
            Self::Persistence(msg) => write!(f, "Persistence error: {}", msg),
            Self::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NumericError {}
