//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer provides the stateful components built on the math kernels:
//! - Fixed-range histograms with integer-domain bin clamping
//! - The linear scaler with crossed ranges, lookup table and listeners
//! - The Hungarian solver for the linear assignment problem
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Fixed-range histogram binning.
pub mod histogram;

/// Linear rescaling between ranges.
pub mod scaler;

/// Minimum-cost assignment.
pub mod assignment;
