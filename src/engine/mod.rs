//! Layer 4: Engine
//!
//! # Purpose
//!
//! This layer routes untyped input to the typed kernels:
//! - Runtime dispatch on the element kind of a [`BufferRef`] or opaque value
//! - Output-buffer reuse across kinds
//! - The "unsupported" outcome for unknown or mixed kinds
//!
//! [`BufferRef`]: crate::primitives::buffer::BufferRef
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Engine ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Runtime kind dispatch.
pub mod dispatch;
