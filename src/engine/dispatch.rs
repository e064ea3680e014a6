//! Runtime dispatch of array kernels on the element kind.
//!
//! ## Purpose
//!
//! Callers that hold pixel data without static type information (a plane of
//! unknown kind, a `Box<dyn Any>` handed over from an I/O layer) go through
//! this module. It inspects the runtime kind and forwards to the generic
//! kernels in [`crate::math::arith`] and [`crate::math::reduce`].
//!
//! ## Design notes
//!
//! * **Unsupported is not an error**: An operand outside the six kinds, two
//!   operands of different kinds, or an output buffer of another kind yield
//!   `Ok(None)`. Errors are reserved for contract violations such as length
//!   mismatches.
//! * **Outputs are consumed**: An `out` buffer is moved into the call. When
//!   its kind does not match the operands it is dropped and the call returns
//!   `Ok(None)`; callers that want to keep such an allocation compare
//!   `out.kind()` with the operand kind first.
//! * **Scalars as `f64`**: Broadcast scalars are passed as `f64` and narrowed
//!   to the operand kind with cast semantics before the kernel runs.
//!
//! ## Invariants
//!
//! * A returned buffer always has the kind of the input operands.
//!
//! ## Non-goals
//!
//! * Promotion between kinds (e.g. `int + float`).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::any::Any;

// Internal dependencies
use crate::math::arith::{self, BinaryOp};
use crate::math::reduce;
use crate::primitives::buffer::{match_buffer, BufferRef, NumericBuffer};
use crate::primitives::element::Element;
use crate::primitives::errors::NumericError;

/// Expand `$body` when both buffers have the same kind, else `$mismatch`.
macro_rules! match_pair {
    ($a:expr, $b:expr, $x:ident, $y:ident => $body:expr, _ => $mismatch:expr) => {
        match ($a, $b) {
            (BufferRef::Byte($x), BufferRef::Byte($y)) => $body,
            (BufferRef::Short($x), BufferRef::Short($y)) => $body,
            (BufferRef::Int($x), BufferRef::Int($y)) => $body,
            (BufferRef::Long($x), BufferRef::Long($y)) => $body,
            (BufferRef::Float($x), BufferRef::Float($y)) => $body,
            (BufferRef::Double($x), BufferRef::Double($y)) => $body,
            _ => $mismatch,
        }
    };
}

/// Outcome of a dispatched kernel: `None` when the kinds are unsupported.
pub type Dispatched<T> = Result<Option<T>, NumericError>;

// ============================================================================
// Output Handling
// ============================================================================

/// Split an optional output buffer into the typed vector for `T`.
///
/// The outer `None` signals an output of the wrong kind, which is dropped.
fn typed_output<T: Element>(out: Option<NumericBuffer>) -> Option<Option<Vec<T>>> {
    match out {
        None => Some(None),
        Some(buffer) => {
            let kind = buffer.kind();
            let typed = buffer.into_vec::<T>().map(Some);
            if typed.is_none() {
                tracing::trace!(expected = %T::KIND, got = %kind, "output buffer dropped");
            }
            typed
        }
    }
}

fn binary_typed<T: Element>(
    op: BinaryOp,
    a1: &[T],
    a2: &[T],
    out: Option<NumericBuffer>,
) -> Dispatched<NumericBuffer> {
    let Some(out) = typed_output::<T>(out) else {
        return Ok(None);
    };
    arith::apply(op, a1, a2, out).map(|v| Some(v.into()))
}

fn scalar_typed<T: Element>(
    op: BinaryOp,
    array: &[T],
    value: f64,
    scalar_left: bool,
    out: Option<NumericBuffer>,
) -> Dispatched<NumericBuffer> {
    let Some(out) = typed_output::<T>(out) else {
        return Ok(None);
    };
    let value = T::from_f64(value);
    let result = if scalar_left {
        arith::apply_scalar_left(op, value, array, out)
    } else {
        arith::apply_scalar(op, array, value, out)
    };
    result.map(|v| Some(v.into()))
}

fn unsupported(what: &str) {
    tracing::trace!(operation = what, "unsupported element kind");
}

// ============================================================================
// Binary Operations
// ============================================================================

/// Apply `op` element-wise to two kind-tagged buffers.
///
/// `out` is consumed; an output of another kind is dropped and yields
/// `Ok(None)`.
///
/// # Errors
///
/// [`NumericError::MismatchedLengths`] when the operands (or `out`) differ in
/// length.
pub fn apply(
    op: BinaryOp,
    a1: BufferRef<'_>,
    a2: BufferRef<'_>,
    out: Option<NumericBuffer>,
) -> Dispatched<NumericBuffer> {
    match_pair!(a1, a2, x, y => binary_typed(op, x, y, out), _ => {
        unsupported("apply");
        Ok(None)
    })
}

/// Apply `op` as `array[i] op value`, narrowing `value` to the array kind.
///
/// `out` is consumed as in [`apply`].
///
/// # Errors
///
/// [`NumericError::MismatchedLengths`] when `out` differs in length.
pub fn apply_scalar(
    op: BinaryOp,
    array: BufferRef<'_>,
    value: f64,
    out: Option<NumericBuffer>,
) -> Dispatched<NumericBuffer> {
    match_buffer!(BufferRef, array, v => scalar_typed(op, v, value, false, out))
}

/// Apply `op` as `value op array[i]`, narrowing `value` to the array kind.
///
/// `out` is consumed as in [`apply`].
///
/// # Errors
///
/// [`NumericError::MismatchedLengths`] when `out` differs in length.
pub fn apply_scalar_left(
    op: BinaryOp,
    value: f64,
    array: BufferRef<'_>,
    out: Option<NumericBuffer>,
) -> Dispatched<NumericBuffer> {
    match_buffer!(BufferRef, array, v => scalar_typed(op, v, value, true, out))
}

/// Apply `op` to two opaque values.
///
/// Each operand must be a `Vec<T>`, `Box<[T]>` or [`NumericBuffer`] of one of
/// the six kinds; anything else yields `Ok(None)`.
///
/// # Errors
///
/// Same as [`apply`].
pub fn apply_any(
    op: BinaryOp,
    a1: &dyn Any,
    a2: &dyn Any,
    out: Option<NumericBuffer>,
) -> Dispatched<NumericBuffer> {
    match (BufferRef::from_any(a1), BufferRef::from_any(a2)) {
        (Some(a1), Some(a2)) => apply(op, a1, a2, out),
        _ => {
            unsupported("apply_any");
            Ok(None)
        }
    }
}

// ============================================================================
// Absolute Value
// ============================================================================

/// Absolute value into a new buffer of the same kind.
pub fn abs(array: BufferRef<'_>) -> NumericBuffer {
    match_buffer!(BufferRef, array, v => arith::abs(v).into())
}

/// Absolute value, overwriting `buffer`.
pub fn abs_in_place(buffer: &mut NumericBuffer) {
    match_buffer!(NumericBuffer, buffer, v => arith::abs_in_place(v.as_mut_slice()))
}

/// Absolute value of an opaque value, `None` when unsupported.
pub fn abs_any(array: &dyn Any) -> Option<NumericBuffer> {
    BufferRef::from_any(array).map(abs)
}

// ============================================================================
// Reductions
// ============================================================================

/// Smallest value, widened to `f64`.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty buffer.
pub fn min(array: BufferRef<'_>, signed: bool) -> Result<f64, NumericError> {
    match_buffer!(BufferRef, array, v => reduce::min(v, signed))
}

/// Largest value, widened to `f64`.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty buffer.
pub fn max(array: BufferRef<'_>, signed: bool) -> Result<f64, NumericError> {
    match_buffer!(BufferRef, array, v => reduce::max(v, signed))
}

/// Sum of all values, accumulated in `f64`.
pub fn sum(array: BufferRef<'_>, signed: bool) -> f64 {
    match_buffer!(BufferRef, array, v => reduce::sum(v, signed))
}

/// [`min`] of an opaque value.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty buffer.
pub fn min_any(array: &dyn Any, signed: bool) -> Dispatched<f64> {
    BufferRef::from_any(array)
        .map(|b| min(b, signed))
        .transpose()
}

/// [`max`] of an opaque value.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty buffer.
pub fn max_any(array: &dyn Any, signed: bool) -> Dispatched<f64> {
    BufferRef::from_any(array)
        .map(|b| max(b, signed))
        .transpose()
}

/// [`sum`] of an opaque value, `None` when unsupported.
pub fn sum_any(array: &dyn Any, signed: bool) -> Option<f64> {
    BufferRef::from_any(array).map(|b| sum(b, signed))
}
