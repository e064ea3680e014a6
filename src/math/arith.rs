//! Element-wise arithmetic over typed numeric buffers.
//!
//! ## Purpose
//!
//! This module implements the binary element-wise operations (add, subtract,
//! multiply, divide) between two buffers or between a buffer and a scalar,
//! plus absolute value, for every [`Element`] kind with one generic body.
//!
//! ## Design notes
//!
//! * **Output reuse**: Every operation takes an optional output vector. When
//!   absent a fresh vector is allocated; when present it is overwritten and
//!   handed back, so hot loops can recycle one allocation.
//! * **Wrapping arithmetic**: Integer results wrap on overflow and divide by
//!   truncation toward zero (see [`Element`]).
//!
//! ## Key concepts
//!
//! * **BinaryOp**: The operation selector shared with the dispatch layer.
//! * **Scalar broadcast**: `array op scalar` and `scalar op array` forms.
//!
//! ## Invariants
//!
//! * The returned vector has exactly the length of the input operands.
//! * Inputs are never modified (except by the explicit `_in_place` forms).
//!
//! ## Non-goals
//!
//! * Integer division by zero is not intercepted and panics.
//! * Mixed-kind arithmetic (callers convert first).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::primitives::element::Element;
use crate::primitives::errors::NumericError;
use crate::primitives::validator::Validator;

// ============================================================================
// Binary Operation
// ============================================================================

/// Element-wise binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`
    Divide,
}

impl BinaryOp {
    /// Apply the operation to one pair of elements.
    #[inline]
    pub fn apply<T: Element>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a.elem_add(b),
            Self::Subtract => a.elem_sub(b),
            Self::Multiply => a.elem_mul(b),
            Self::Divide => a.elem_div(b),
        }
    }
}

// ============================================================================
// Generic Kernels
// ============================================================================

/// Prepare the output vector: reuse `out` if given, else allocate.
fn output_for<T: Element>(len: usize, out: Option<Vec<T>>) -> Result<Vec<T>, NumericError> {
    match out {
        Some(buffer) => {
            Validator::validate_same_length(len, buffer.len())?;
            Ok(buffer)
        }
        None => Ok(vec![T::zero(); len]),
    }
}

/// Apply `op` element-wise to two buffers of equal length.
pub fn apply<T: Element>(
    op: BinaryOp,
    a1: &[T],
    a2: &[T],
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    Validator::validate_same_length(a1.len(), a2.len())?;
    let mut result = output_for(a1.len(), out)?;
    for ((r, &x), &y) in result.iter_mut().zip(a1).zip(a2) {
        *r = op.apply(x, y);
    }
    Ok(result)
}

/// Apply `op` with the array on the left: `array[i] op value`.
pub fn apply_scalar<T: Element>(
    op: BinaryOp,
    array: &[T],
    value: T,
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    let mut result = output_for(array.len(), out)?;
    for (r, &x) in result.iter_mut().zip(array) {
        *r = op.apply(x, value);
    }
    Ok(result)
}

/// Apply `op` with the scalar on the left: `value op array[i]`.
pub fn apply_scalar_left<T: Element>(
    op: BinaryOp,
    value: T,
    array: &[T],
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    let mut result = output_for(array.len(), out)?;
    for (r, &x) in result.iter_mut().zip(array) {
        *r = op.apply(value, x);
    }
    Ok(result)
}

/// Apply `op` in place: `a1[i] = a1[i] op a2[i]`.
pub fn apply_in_place<T: Element>(op: BinaryOp, a1: &mut [T], a2: &[T]) -> Result<(), NumericError> {
    Validator::validate_same_length(a1.len(), a2.len())?;
    for (x, &y) in a1.iter_mut().zip(a2) {
        *x = op.apply(*x, y);
    }
    Ok(())
}

// ============================================================================
// Named Operations
// ============================================================================

/// Element-wise `a1 + a2`.
pub fn add<T: Element>(a1: &[T], a2: &[T], out: Option<Vec<T>>) -> Result<Vec<T>, NumericError> {
    apply(BinaryOp::Add, a1, a2, out)
}

/// Element-wise `a1 - a2`.
pub fn subtract<T: Element>(
    a1: &[T],
    a2: &[T],
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply(BinaryOp::Subtract, a1, a2, out)
}

/// Element-wise `a1 * a2`.
pub fn multiply<T: Element>(
    a1: &[T],
    a2: &[T],
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply(BinaryOp::Multiply, a1, a2, out)
}

/// Element-wise `a1 / a2`, truncating for integer kinds.
///
/// # Panics
///
/// Panics for integer kinds when an element of `a2` is zero.
pub fn divide<T: Element>(
    a1: &[T],
    a2: &[T],
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply(BinaryOp::Divide, a1, a2, out)
}

/// `array[i] + value`.
pub fn add_scalar<T: Element>(
    array: &[T],
    value: T,
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply_scalar(BinaryOp::Add, array, value, out)
}

/// `array[i] - value`.
pub fn subtract_scalar<T: Element>(
    array: &[T],
    value: T,
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply_scalar(BinaryOp::Subtract, array, value, out)
}

/// `value - array[i]`.
pub fn subtract_from_scalar<T: Element>(
    value: T,
    array: &[T],
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply_scalar_left(BinaryOp::Subtract, value, array, out)
}

/// `array[i] * value`.
pub fn multiply_scalar<T: Element>(
    array: &[T],
    value: T,
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply_scalar(BinaryOp::Multiply, array, value, out)
}

/// `array[i] / value`.
///
/// # Panics
///
/// Panics for integer kinds when `value` is zero.
pub fn divide_scalar<T: Element>(
    array: &[T],
    value: T,
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply_scalar(BinaryOp::Divide, array, value, out)
}

/// `value / array[i]`.
///
/// # Panics
///
/// Panics for integer kinds when an element of `array` is zero.
pub fn divide_scalar_by<T: Element>(
    value: T,
    array: &[T],
    out: Option<Vec<T>>,
) -> Result<Vec<T>, NumericError> {
    apply_scalar_left(BinaryOp::Divide, value, array, out)
}

// ============================================================================
// Absolute Value
// ============================================================================

/// Absolute value into a new vector.
pub fn abs<T: Element>(array: &[T]) -> Vec<T> {
    array.iter().map(|&x| x.elem_abs()).collect()
}

/// Absolute value, overwriting `array`.
pub fn abs_in_place<T: Element>(array: &mut [T]) {
    for x in array.iter_mut() {
        *x = x.elem_abs();
    }
}
