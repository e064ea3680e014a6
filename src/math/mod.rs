//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure numeric kernels over typed buffers:
//! - Element-wise arithmetic for all six element kinds
//! - Min / max / sum reductions with signed or unsigned integer views
//! - Rank selection (quickselect)
//! - Moments, correlation, median and MAD
//! - Linear interpolation
//!
//! These are reusable building blocks with no state of their own.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Element-wise arithmetic.
pub mod arith;

/// Min, max and sum reductions.
pub mod reduce;

/// Rank selection.
pub mod select;

/// Statistical reductions.
pub mod stats;

/// Linear interpolation.
pub mod interpolate;
