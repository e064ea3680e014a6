//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data types every other layer is written against:
//! - The crate-wide error enum
//! - The sealed `Element` trait over the six supported numeric kinds
//! - Kind-tagged owned and borrowed buffers for runtime dispatch
//! - Shared precondition validation
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
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error types.
pub mod errors;

/// Element trait and runtime kind tags.
pub mod element;

/// Kind-tagged numeric buffers.
pub mod buffer;

/// Precondition checks.
pub mod validator;
