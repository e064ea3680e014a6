//! Scalar element kinds supported by the array kernels.
//!
//! ## Purpose
//!
//! This module defines the [`Element`] trait implemented by the six numeric
//! representations the numeric core understands (`i8`, `i16`, `i32`, `i64`,
//! `f32`, `f64`) and the runtime tag [`ElementKind`] describing them.
//!
//! ## Design notes
//!
//! * **Sealed**: Only the six built-in kinds implement [`Element`].
//! * **Wrapping arithmetic**: Integer add/subtract/multiply wrap on overflow,
//!   division truncates toward zero and `MIN / -1` wraps to `MIN`.
//! * **Unsigned views**: Integer buffers carry raw bit patterns; a `signed`
//!   flag decides whether they are read as signed values or as unsigned values
//!   widened into a larger representation.
//!
//! ## Key concepts
//!
//! * **Kind**: The runtime tag used by dispatch (`ElementKind`).
//! * **Wrap / unwrap**: Conversions between typed vectors/slices and the
//!   kind-tagged [`NumericBuffer`] / [`BufferRef`] enums.
//!
//! ## Invariants
//!
//! * `T::KIND` uniquely identifies `T`.
//! * `from_f64` follows narrowing-cast semantics: float to integer saturates
//!   through 32 bits (64 bits for `i64`) and then wraps to the target width.
//!
//! ## Non-goals
//!
//! * Integer division by zero is not intercepted; it panics like any Rust
//!   integer division.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{self, Debug, Display};
use num_traits::Float;

// Internal dependencies
use crate::primitives::buffer::{BufferRef, NumericBuffer};

// ============================================================================
// Element Kind
// ============================================================================

/// Runtime tag of a numeric element representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// 8-bit integer (`i8`, optionally read as `u8`).
    Byte,

    /// 16-bit integer (`i16`, optionally read as `u16`).
    Short,

    /// 32-bit integer (`i32`, optionally read as `u32`).
    Int,

    /// 64-bit integer (`i64`, optionally read as `u64`).
    Long,

    /// 32-bit IEEE float.
    Float,

    /// 64-bit IEEE float.
    Double,
}

impl ElementKind {
    /// All supported kinds, smallest integer first.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Byte,
        ElementKind::Short,
        ElementKind::Int,
        ElementKind::Long,
        ElementKind::Float,
        ElementKind::Double,
    ];

    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int | Self::Float => 4,
            Self::Long | Self::Double => 8,
        }
    }

    /// Whether this kind is a floating-point representation.
    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    /// Whether this kind is an integer representation.
    pub fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Smallest representable value, read as signed or unsigned.
    pub fn min_value(self, signed: bool) -> f64 {
        match (self, signed) {
            (Self::Byte, true) => i8::MIN as f64,
            (Self::Short, true) => i16::MIN as f64,
            (Self::Int, true) => i32::MIN as f64,
            (Self::Long, true) => i64::MIN as f64,
            (Self::Float, _) => f32::MIN as f64,
            (Self::Double, _) => f64::MIN,
            (_, false) => 0.0,
        }
    }

    /// Largest representable value, read as signed or unsigned.
    pub fn max_value(self, signed: bool) -> f64 {
        match (self, signed) {
            (Self::Byte, true) => i8::MAX as f64,
            (Self::Byte, false) => u8::MAX as f64,
            (Self::Short, true) => i16::MAX as f64,
            (Self::Short, false) => u16::MAX as f64,
            (Self::Int, true) => i32::MAX as f64,
            (Self::Int, false) => u32::MAX as f64,
            (Self::Long, true) => i64::MAX as f64,
            (Self::Long, false) => u64::MAX as f64,
            (Self::Float, _) => f32::MAX as f64,
            (Self::Double, _) => f64::MAX,
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Element Trait
// ============================================================================

mod private {
    pub trait Sealed {}
    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// A scalar numeric representation accepted by the array kernels.
///
/// This trait is sealed; it is implemented for `i8`, `i16`, `i32`, `i64`,
/// `f32` and `f64` only.
pub trait Element:
    private::Sealed + Copy + PartialOrd + Debug + Default + Send + Sync + 'static
{
    /// Runtime tag for this representation.
    const KIND: ElementKind;

    /// Additive identity.
    fn zero() -> Self;

    /// Addition with wraparound on integer overflow.
    fn elem_add(self, rhs: Self) -> Self;

    /// Subtraction with wraparound on integer overflow.
    fn elem_sub(self, rhs: Self) -> Self;

    /// Multiplication with wraparound on integer overflow.
    fn elem_mul(self, rhs: Self) -> Self;

    /// Division; truncates toward zero for integers.
    ///
    /// # Panics
    ///
    /// Integer kinds panic when `rhs` is zero.
    fn elem_div(self, rhs: Self) -> Self;

    /// Absolute value; `MIN` maps to itself for integers.
    fn elem_abs(self) -> Self;

    /// Widen to `f64`, reading integer bits as unsigned when `signed` is false.
    fn to_f64(self, signed: bool) -> f64;

    /// Narrow an `f64` into this representation using cast semantics.
    fn from_f64(value: f64) -> Self;

    /// `self < other`, comparing integer bits as unsigned when `signed` is
    /// false. Compares in the native width, so no precision is lost.
    fn less_than(self, other: Self, signed: bool) -> bool;

    #[doc(hidden)]
    fn wrap_vec(values: Vec<Self>) -> NumericBuffer;

    #[doc(hidden)]
    fn unwrap_vec(buffer: NumericBuffer) -> Result<Vec<Self>, NumericBuffer>;

    #[doc(hidden)]
    fn wrap_slice(values: &[Self]) -> BufferRef<'_>;

    #[doc(hidden)]
    fn unwrap_slice(buffer: BufferRef<'_>) -> Option<&[Self]>;
}

macro_rules! impl_int_element {
    ($t:ty, $unsigned:ty, $narrow:ty, $kind:ident) => {
        impl Element for $t {
            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn zero() -> Self {
                0
            }

            #[inline]
            fn elem_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn elem_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn elem_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }

            #[inline]
            fn elem_div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }

            #[inline]
            fn elem_abs(self) -> Self {
                self.wrapping_abs()
            }

            #[inline]
            fn to_f64(self, signed: bool) -> f64 {
                if signed {
                    self as f64
                } else {
                    (self as $unsigned) as f64
                }
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                (value as $narrow) as $t
            }

            #[inline]
            fn less_than(self, other: Self, signed: bool) -> bool {
                if signed {
                    self < other
                } else {
                    (self as $unsigned) < (other as $unsigned)
                }
            }

            fn wrap_vec(values: Vec<Self>) -> NumericBuffer {
                NumericBuffer::$kind(values)
            }

            fn unwrap_vec(buffer: NumericBuffer) -> Result<Vec<Self>, NumericBuffer> {
                match buffer {
                    NumericBuffer::$kind(values) => Ok(values),
                    other => Err(other),
                }
            }

            fn wrap_slice(values: &[Self]) -> BufferRef<'_> {
                BufferRef::$kind(values)
            }

            fn unwrap_slice(buffer: BufferRef<'_>) -> Option<&[Self]> {
                match buffer {
                    BufferRef::$kind(values) => Some(values),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! impl_float_element {
    ($t:ty, $kind:ident) => {
        impl Element for $t {
            const KIND: ElementKind = ElementKind::$kind;

            #[inline]
            fn zero() -> Self {
                0.0
            }

            #[inline]
            fn elem_add(self, rhs: Self) -> Self {
                self + rhs
            }

            #[inline]
            fn elem_sub(self, rhs: Self) -> Self {
                self - rhs
            }

            #[inline]
            fn elem_mul(self, rhs: Self) -> Self {
                self * rhs
            }

            #[inline]
            fn elem_div(self, rhs: Self) -> Self {
                self / rhs
            }

            #[inline]
            fn elem_abs(self) -> Self {
                Float::abs(self)
            }

            #[inline]
            fn to_f64(self, _signed: bool) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            #[inline]
            fn less_than(self, other: Self, _signed: bool) -> bool {
                self < other
            }

            fn wrap_vec(values: Vec<Self>) -> NumericBuffer {
                NumericBuffer::$kind(values)
            }

            fn unwrap_vec(buffer: NumericBuffer) -> Result<Vec<Self>, NumericBuffer> {
                match buffer {
                    NumericBuffer::$kind(values) => Ok(values),
                    other => Err(other),
                }
            }

            fn wrap_slice(values: &[Self]) -> BufferRef<'_> {
                BufferRef::$kind(values)
            }

            fn unwrap_slice(buffer: BufferRef<'_>) -> Option<&[Self]> {
                match buffer {
                    BufferRef::$kind(values) => Some(values),
                    _ => None,
                }
            }
        }
    };
}

// Narrow integers go through a 32-bit cast first, then wrap to their width.
impl_int_element!(i8, u8, i32, Byte);
impl_int_element!(i16, u16, i32, Short);
impl_int_element!(i32, u32, i32, Int);
impl_int_element!(i64, u64, i64, Long);
impl_float_element!(f32, Float);
impl_float_element!(f64, Double);
