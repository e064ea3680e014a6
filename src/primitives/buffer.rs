//! Kind-tagged numeric buffers for runtime dispatch.
//!
//! ## Purpose
//!
//! This module provides [`NumericBuffer`] (owned) and [`BufferRef`] (borrowed),
//! two enums that carry a buffer of one of the six supported element kinds
//! together with its runtime tag. They are the untyped currency of the
//! dispatch layer: collaborators hand over pixel planes or algorithm outputs
//! without knowing the element type at compile time.
//!
//! ## Design notes
//!
//! * **One variant per kind**: Variants mirror [`ElementKind`] exactly.
//! * **Unsupported kinds**: [`BufferRef::from_any`] returns `None` for anything
//!   that is not a `Vec` or slice of a supported kind, so callers can probe
//!   opaque values without an error path.
//! * **Dispatch macro**: `match_buffer!` expands one generic body for all six
//!   variants.
//!
//! ## Invariants
//!
//! * `buffer.kind()` always agrees with the variant.
//!
//! ## Non-goals
//!
//! * Strided or multi-dimensional layouts (buffers are flat).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};
#[cfg(feature = "std")]
use std::{boxed::Box, vec::Vec};

// External dependencies
use core::any::Any;

// Internal dependencies
use crate::primitives::element::{Element, ElementKind};

// ============================================================================
// Dispatch Macro
// ============================================================================

/// Expand `$body` once per variant with `$v` bound to the typed payload.
macro_rules! match_buffer {
    ($enum:ident, $buffer:expr, $v:ident => $body:expr) => {
        match $buffer {
            $enum::Byte($v) => $body,
            $enum::Short($v) => $body,
            $enum::Int($v) => $body,
            $enum::Long($v) => $body,
            $enum::Float($v) => $body,
            $enum::Double($v) => $body,
        }
    };
}

pub(crate) use match_buffer;

// ============================================================================
// Owned Buffer
// ============================================================================

/// An owned numeric buffer tagged with its element kind.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericBuffer {
    /// 8-bit integers.
    Byte(Vec<i8>),
    /// 16-bit integers.
    Short(Vec<i16>),
    /// 32-bit integers.
    Int(Vec<i32>),
    /// 64-bit integers.
    Long(Vec<i64>),
    /// 32-bit floats.
    Float(Vec<f32>),
    /// 64-bit floats.
    Double(Vec<f64>),
}

impl NumericBuffer {
    /// Allocate a zero-filled buffer of the given kind.
    pub fn zeros(kind: ElementKind, len: usize) -> Self {
        match kind {
            ElementKind::Byte => Self::Byte(vec![0; len]),
            ElementKind::Short => Self::Short(vec![0; len]),
            ElementKind::Int => Self::Int(vec![0; len]),
            ElementKind::Long => Self::Long(vec![0; len]),
            ElementKind::Float => Self::Float(vec![0.0; len]),
            ElementKind::Double => Self::Double(vec![0.0; len]),
        }
    }

    /// Runtime element kind.
    pub fn kind(&self) -> ElementKind {
        self.as_buffer_ref().kind()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match_buffer!(NumericBuffer, self, v => v.len())
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow as a [`BufferRef`].
    pub fn as_buffer_ref(&self) -> BufferRef<'_> {
        match_buffer!(NumericBuffer, self, v => Element::wrap_slice(v.as_slice()))
    }

    /// Take the typed vector out if the kind matches `T`.
    pub fn into_vec<T: Element>(self) -> Option<Vec<T>> {
        T::unwrap_vec(self).ok()
    }

    /// Borrow the typed slice if the kind matches `T`.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::unwrap_slice(self.as_buffer_ref())
    }

    /// Copy every element into an `f64` vector.
    pub fn to_f64_vec(&self, signed: bool) -> Vec<f64> {
        self.as_buffer_ref().to_f64_vec(signed)
    }
}

impl<T: Element> From<Vec<T>> for NumericBuffer {
    fn from(values: Vec<T>) -> Self {
        T::wrap_vec(values)
    }
}

// ============================================================================
// Borrowed Buffer
// ============================================================================

/// A borrowed numeric buffer tagged with its element kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BufferRef<'a> {
    /// 8-bit integers.
    Byte(&'a [i8]),
    /// 16-bit integers.
    Short(&'a [i16]),
    /// 32-bit integers.
    Int(&'a [i32]),
    /// 64-bit integers.
    Long(&'a [i64]),
    /// 32-bit floats.
    Float(&'a [f32]),
    /// 64-bit floats.
    Double(&'a [f64]),
}

impl<'a> BufferRef<'a> {
    /// Inspect an opaque value and borrow it as a typed buffer.
    ///
    /// Recognizes `Vec<T>`, `Box<[T]>` and [`NumericBuffer`] for the six
    /// supported kinds. Anything else yields `None`.
    pub fn from_any(value: &'a dyn Any) -> Option<Self> {
        if let Some(buffer) = value.downcast_ref::<NumericBuffer>() {
            return Some(buffer.as_buffer_ref());
        }
        probe::<i8>(value)
            .or_else(|| probe::<i16>(value))
            .or_else(|| probe::<i32>(value))
            .or_else(|| probe::<i64>(value))
            .or_else(|| probe::<f32>(value))
            .or_else(|| probe::<f64>(value))
    }

    /// Runtime element kind.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Byte(_) => ElementKind::Byte,
            Self::Short(_) => ElementKind::Short,
            Self::Int(_) => ElementKind::Int,
            Self::Long(_) => ElementKind::Long,
            Self::Float(_) => ElementKind::Float,
            Self::Double(_) => ElementKind::Double,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match_buffer!(BufferRef, self, v => v.len())
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow the typed slice if the kind matches `T`.
    pub fn as_slice<T: Element>(self) -> Option<&'a [T]> {
        T::unwrap_slice(self)
    }

    /// Read element `index` widened to `f64`.
    pub fn get_f64(&self, index: usize, signed: bool) -> Option<f64> {
        match_buffer!(BufferRef, self, v => v.get(index).map(|x| x.to_f64(signed)))
    }

    /// Copy every element into an `f64` vector.
    pub fn to_f64_vec(&self, signed: bool) -> Vec<f64> {
        match_buffer!(BufferRef, self, v => v.iter().map(|x| x.to_f64(signed)).collect())
    }

    /// Copy into an owned buffer of the same kind.
    pub fn to_owned_buffer(&self) -> NumericBuffer {
        match_buffer!(BufferRef, self, v => Element::wrap_vec(v.to_vec()))
    }
}

impl<'a, T: Element> From<&'a [T]> for BufferRef<'a> {
    fn from(values: &'a [T]) -> Self {
        T::wrap_slice(values)
    }
}

impl<'a, T: Element> From<&'a Vec<T>> for BufferRef<'a> {
    fn from(values: &'a Vec<T>) -> Self {
        T::wrap_slice(values.as_slice())
    }
}

impl<'a> From<&'a NumericBuffer> for BufferRef<'a> {
    fn from(buffer: &'a NumericBuffer) -> Self {
        buffer.as_buffer_ref()
    }
}

fn probe<T: Element>(value: &dyn Any) -> Option<BufferRef<'_>> {
    if let Some(v) = value.downcast_ref::<Vec<T>>() {
        return Some(T::wrap_slice(v.as_slice()));
    }
    value
        .downcast_ref::<Box<[T]>>()
        .map(|v| T::wrap_slice(&v[..]))
}
