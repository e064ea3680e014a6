//! Input validation for numeric kernels and solvers.
//!
//! ## Purpose
//!
//! This module centralizes the precondition checks shared by the array
//! kernels, statistics, histogram construction and the assignment solver:
//! matching lengths, non-empty inputs, valid ranks, bin counts, ranges and
//! well-formed cost matrices.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or repair invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::primitives::errors::NumericError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for numeric inputs.
///
/// All methods return `Result<_, NumericError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Buffers
    // ========================================================================

    /// Validate that two operands have the same length.
    pub fn validate_same_length(expected: usize, got: usize) -> Result<(), NumericError> {
        if expected != got {
            return Err(NumericError::MismatchedLengths { expected, got });
        }
        Ok(())
    }

    /// Validate that two statistical populations have the same size.
    pub fn validate_same_population(left: usize, right: usize) -> Result<(), NumericError> {
        if left != right {
            return Err(NumericError::PopulationSizeMismatch { left, right });
        }
        Ok(())
    }

    /// Validate that an input is not empty.
    pub fn validate_non_empty<T>(values: &[T]) -> Result<(), NumericError> {
        if values.is_empty() {
            return Err(NumericError::EmptyInput);
        }
        Ok(())
    }

    /// Validate a 1-based rank against the number of elements.
    pub fn validate_rank(k: usize, len: usize) -> Result<(), NumericError> {
        if k == 0 || k > len {
            return Err(NumericError::InvalidRank { k, len });
        }
        Ok(())
    }

    /// Validate a single value for finiteness.
    pub fn validate_scalar(value: f64, name: &str) -> Result<(), NumericError> {
        if !value.is_finite() {
            return Err(NumericError::InvalidNumericValue(format!(
                "{}={}",
                name, value
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Histogram
    // ========================================================================

    /// Validate a requested bin count.
    pub fn validate_bin_count(bin_count: usize) -> Result<(), NumericError> {
        if bin_count == 0 {
            return Err(NumericError::InvalidBinCount(bin_count));
        }
        Ok(())
    }

    /// Validate a closed range `[min, max]` with finite, ordered bounds.
    pub fn validate_range(min: f64, max: f64) -> Result<(), NumericError> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(NumericError::InvalidRange { min, max });
        }
        Ok(())
    }

    // ========================================================================
    // Assignment
    // ========================================================================

    /// Validate a row-major cost matrix and return its column count.
    ///
    /// The matrix must have at least one row and one column, all rows must
    /// have the same length and every cost must be finite.
    pub fn validate_cost_matrix(matrix: &[Vec<f64>]) -> Result<usize, NumericError> {
        // Check 1: Non-empty
        let first = matrix.first().ok_or(NumericError::EmptyInput)?;
        let num_cols = first.len();
        if num_cols == 0 {
            return Err(NumericError::EmptyInput);
        }

        // Check 2: Rectangular
        for (row, values) in matrix.iter().enumerate() {
            if values.len() != num_cols {
                return Err(NumericError::RaggedMatrix {
                    row,
                    expected: num_cols,
                    got: values.len(),
                });
            }
        }

        // Check 3: All costs finite
        for (r, values) in matrix.iter().enumerate() {
            for (c, &v) in values.iter().enumerate() {
                if !v.is_finite() {
                    return Err(NumericError::InvalidNumericValue(format!(
                        "cost[{}][{}]={}",
                        r, c, v
                    )));
                }
            }
        }

        Ok(num_cols)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Validate that no builder parameter was set twice.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), NumericError> {
        if let Some(param) = duplicate_param {
            return Err(NumericError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
