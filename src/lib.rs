//! # bioimage-numerics — Numeric core for bioimage analysis
//!
//! Array-oriented building blocks for image-processing pipelines: element-wise
//! arithmetic over every pixel representation, summary statistics, rank
//! selection, fixed-range histograms, a bidirectional linear scaler for
//! display windows and a Hungarian solver for track assignment.
//!
//! **What is in the box:**
//! - Element-wise `add` / `subtract` / `multiply` / `divide` and `abs` over
//!   `i8`, `i16`, `i32`, `i64`, `f32` and `f64`, with output-buffer reuse
//! - Runtime dispatch for buffers whose kind is only known at run time
//! - `mean`, `var`, `std`, two correlation coefficients, `median` and MAD
//! - Quickselect (k-th smallest element)
//! - Histograms that never create more bins than there are integer values
//! - A scaler with crossed ranges, an integer lookup table, change listeners
//!   and JSON persistence
//! - Minimum-cost assignment for rectangular cost matrices
//!
//! ## Quick Start
//!
//! ### Arithmetic
//!
//! Integer arithmetic wraps on overflow and divides by truncation:
//!
//! ```rust
//! use bioimage_numerics::prelude::*;
//!
//! let a: Vec<i8> = vec![100, -7, 9];
//! let b: Vec<i8> = vec![100, 2, -2];
//!
//! let sum = arith::add(&a, &b, None)?;
//! assert_eq!(sum, vec![-56, -5, 7]);
//!
//! let quotient = arith::divide(&a, &b, None)?;
//! assert_eq!(quotient, vec![1, -3, -4]);
//! # Result::<(), NumericError>::Ok(())
//! ```
//!
//! ### Runtime dispatch
//!
//! ```rust
//! use bioimage_numerics::prelude::*;
//!
//! let pixels = NumericBuffer::from(vec![1.5f32, -2.0, 3.0]);
//! let abs = dispatch::abs(pixels.as_buffer_ref());
//! assert_eq!(abs.as_slice::<f32>(), Some(&[1.5f32, 2.0, 3.0][..]));
//!
//! // Mixed kinds are unsupported rather than an error.
//! let ints = NumericBuffer::from(vec![1i32, 2, 3]);
//! let mixed = dispatch::apply(
//!     BinaryOp::Add,
//!     pixels.as_buffer_ref(),
//!     ints.as_buffer_ref(),
//!     None,
//! )?;
//! assert!(mixed.is_none());
//! # Result::<(), NumericError>::Ok(())
//! ```
//!
//! ### Statistics
//!
//! ```rust
//! use bioimage_numerics::prelude::*;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 100.0];
//! assert_eq!(stats::median(&values)?, 3.0);
//! assert_eq!(stats::mad(&values, false)?, 1.0);
//! assert_eq!(stats::mean(&[2.0, 4.0, 6.0]), 4.0);
//! # Result::<(), NumericError>::Ok(())
//! ```
//!
//! ### Scaling
//!
//! ```rust
//! use bioimage_numerics::prelude::*;
//!
//! let scaler = ScalerBuilder::new()
//!     .input_range(0.0, 4095.0)
//!     .output_range(0.0, 255.0)
//!     .integer_data(true)
//!     .build()?;
//!
//! assert_eq!(scaler.scale(0.0), 0.0);
//! assert_eq!(scaler.scale(4095.0), 255.0);
//! assert_eq!(scaler.scale(9000.0), 255.0); // clamped
//! # Result::<(), NumericError>::Ok(())
//! ```
//!
//! ### Histograms
//!
//! ```rust
//! use bioimage_numerics::prelude::*;
//!
//! // 10 requested bins over 5 integer values: only 5 bins are created.
//! let mut histogram = HistogramBuilder::new()
//!     .range(0.0, 4.0)
//!     .bins(10)
//!     .integer(true)
//!     .build()?;
//! histogram.add_values(&[0i16, 1, 1, 4], true)?;
//! assert_eq!(histogram.bins(), &[1, 2, 0, 0, 1]);
//! # Result::<(), NumericError>::Ok(())
//! ```
//!
//! ### Assignment
//!
//! ```rust
//! use bioimage_numerics::prelude::*;
//!
//! let costs = vec![
//!     vec![4.0, 1.0, 3.0],
//!     vec![2.0, 0.0, 5.0],
//!     vec![3.0, 2.0, 2.0],
//! ];
//! let assignment = solve(&costs)?;
//! assert_eq!(assignment.columns(), &[1, 0, 2]);
//! assert_eq!(assignment.total_cost(&costs), 5.0);
//! # Result::<(), NumericError>::Ok(())
//! ```
//!
//! ## Feature Flags
//!
//! - **`std`** (default): Enables standard library support and
//!   `std::error::Error` for [`prelude::NumericError`].
//! - **`dev`**: Exposes internal modules for integration testing.
//!
//! ## `no_std` Support
//!
//! The crate builds with `default-features = false` against `alloc`.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data types and validation.
//
// Contains the error enum, the `Element` trait over the six numeric kinds,
// kind-tagged buffers, and shared precondition checks.
mod primitives;

// Layer 2: Math - pure numeric kernels.
//
// Contains element-wise arithmetic, reductions, rank selection,
// statistics (moments, correlation, median, MAD) and interpolation.
mod math;

// Layer 3: Algorithms - stateful components.
//
// Contains histogram binning, the linear scaler and the Hungarian
// assignment solver.
mod algorithms;

// Layer 4: Engine - runtime dispatch.
//
// Routes untyped buffers to the typed kernels.
mod engine;

// High-level fluent API.
//
// Provides the `ScalerBuilder` and `HistogramBuilder` and the public
// re-exports.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use bioimage_numerics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        arith, dispatch, interpolate, reduce, rescale, select, solve, stats, Assignment,
        BinaryOp, BufferRef, Element, ElementKind, Histogram, HistogramBuilder,
        HungarianSolver, ListenerId, NumericBuffer, NumericError, Scaler, ScalerBounds,
        ScalerBuilder, ScalerDocument, ScalerEvent, Step, CROSS_EPSILON, DEFAULT_BIN_COUNT,
        LOOKUP_MAX, MAD_NORMAL_CONSISTENCY,
    };
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math functions.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal stateful algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal dispatch engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
