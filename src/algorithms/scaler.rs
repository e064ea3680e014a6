//! Linear rescaling between an input range and an output range.
//!
//! ## Purpose
//!
//! This module implements [`Scaler`], the stateful affine mapping used to turn
//! raw pixel intensities into display values (and back). A scaler knows four
//! input bounds (the absolute permissible range and the current window inside
//! it) and two output bounds.
//!
//! ## Design notes
//!
//! * **Clamping**: Values outside the current input window map exactly to the
//!   nearest output bound.
//! * **Crossed ranges**: When `abs_left_in > abs_right_in` the mapping is
//!   inverted (contrast inversion). Crossing is only allowed when the scaler
//!   was created with `can_cross`.
//! * **Lookup table**: For integer data whose absolute range fits within
//!   `[0, 65535]`, every integer input is pre-scaled into a table used by the
//!   batch methods. The table is rebuilt on every bound change.
//! * **Notifications**: Listeners fire only when a bound actually changes.
//!   Mutations inside `begin_update`/`end_update` (or [`Scaler::batch`])
//!   coalesce into a single notification.
//!
//! ## Key concepts
//!
//! * **Priority bound**: When a mutation would cross the input bounds of a
//!   scaler that may not cross, the bound that was written wins and the other
//!   one is pushed just past it by [`CROSS_EPSILON`].
//! * **Persistence**: [`ScalerDocument`] holds the eight persisted fields.
//!
//! ## Invariants
//!
//! * `!can_cross` implies `abs_left_in <= abs_right_in` and `left_in <= right_in`.
//! * The current input window lies inside the absolute input range.
//! * `unscaler == 1 / scaler` whenever `scaler != 0`.
//!
//! ## Non-goals
//!
//! * Non-linear (gamma, log) transfer curves.
//! * Thread-safe shared mutation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
#[cfg(feature = "std")]
use std::{boxed::Box, string::String, vec::Vec};

// External dependencies
use core::fmt;
use num_traits::Float;
use serde::{Deserialize, Serialize};

// Internal dependencies
use crate::math::reduce;
use crate::primitives::buffer::{match_buffer, BufferRef};
use crate::primitives::element::Element;
use crate::primitives::errors::NumericError;
use crate::primitives::validator::Validator;

/// Gap kept between input bounds when a mutation would cross them.
pub const CROSS_EPSILON: f64 = 0.000001;

/// Largest absolute input value covered by the integer lookup table.
pub const LOOKUP_MAX: f64 = 65535.0;

// ============================================================================
// Bounds, Events & Listeners
// ============================================================================

/// Snapshot of the six bounds of a scaler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalerBounds {
    /// Absolute left input bound.
    pub abs_left_in: f64,
    /// Absolute right input bound.
    pub abs_right_in: f64,
    /// Current left input bound.
    pub left_in: f64,
    /// Current right input bound.
    pub right_in: f64,
    /// Left output bound.
    pub left_out: f64,
    /// Right output bound.
    pub right_out: f64,
}

/// Notification sent to listeners after a change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalerEvent {
    /// Bounds after the change.
    pub bounds: ScalerBounds,
}

/// Handle returned by [`Scaler::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&ScalerEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Priority {
    Left,
    Right,
}

// ============================================================================
// Lookup Table
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Lookup {
    start: i64,
    values: Vec<f64>,
}

impl Lookup {
    #[inline]
    fn get(&self, value: f64) -> Option<f64> {
        if Float::fract(value) != 0.0 || value < self.start as f64 {
            return None;
        }
        let offset = (value - self.start as f64) as usize;
        self.values.get(offset).copied()
    }
}

// ============================================================================
// Scaler
// ============================================================================

/// Bidirectional affine mapping between an input range and an output range.
pub struct Scaler {
    abs_left_in: f64,
    abs_right_in: f64,
    left_in: f64,
    right_in: f64,
    left_out: f64,
    right_out: f64,
    scaler: f64,
    unscaler: f64,
    integer_data: bool,
    can_cross: bool,
    crossed: bool,
    lookup: Option<Lookup>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
    update_depth: usize,
    pending_change: bool,
}

impl Scaler {
    /// Create a scaler from all of its bounds.
    ///
    /// The current window is clamped into the absolute input range.
    ///
    /// # Errors
    ///
    /// [`NumericError::CrossedScaler`] when `can_cross` is false and either
    /// `abs_left_in > abs_right_in` or `left_in > right_in`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        abs_left_in: f64,
        abs_right_in: f64,
        left_in: f64,
        right_in: f64,
        left_out: f64,
        right_out: f64,
        integer_data: bool,
        can_cross: bool,
    ) -> Result<Self, NumericError> {
        if !can_cross && (abs_left_in > abs_right_in || left_in > right_in) {
            return Err(NumericError::CrossedScaler);
        }
        let mut scaler = Self {
            abs_left_in,
            abs_right_in,
            left_in,
            right_in,
            left_out,
            right_out,
            scaler: 0.0,
            unscaler: 0.0,
            integer_data,
            can_cross,
            crossed: abs_left_in > abs_right_in,
            lookup: None,
            listeners: Vec::new(),
            next_listener: 0,
            update_depth: 0,
            pending_change: false,
        };
        let (lo, hi) = scaler.abs_limits();
        scaler.left_in = left_in.max(lo).min(hi);
        scaler.right_in = right_in.max(lo).min(hi);
        scaler.update_scaler();
        Ok(scaler)
    }

    /// Create a non-crossing scaler whose absolute range equals its window.
    ///
    /// # Errors
    ///
    /// [`NumericError::CrossedScaler`] when `left_in > right_in`.
    pub fn with_range(
        left_in: f64,
        right_in: f64,
        left_out: f64,
        right_out: f64,
        integer_data: bool,
    ) -> Result<Self, NumericError> {
        Self::new(
            left_in,
            right_in,
            left_in,
            right_in,
            left_out,
            right_out,
            integer_data,
            false,
        )
    }

    // ========================================================================
    // Scaling
    // ========================================================================

    /// Map an input value to the output range, clamping outside the window.
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        if self.crossed {
            if value >= self.left_in {
                return self.left_out;
            }
            if value <= self.right_in {
                return self.right_out;
            }
        } else {
            if value <= self.left_in {
                return self.left_out;
            }
            if value >= self.right_in {
                return self.right_out;
            }
        }
        (value - self.left_in) * self.scaler + self.left_out
    }

    /// Map an output value back to the input range.
    #[inline]
    pub fn unscale(&self, value: f64) -> f64 {
        (value - self.left_out) * self.unscaler + self.left_in
    }

    #[inline]
    fn scale_with_lookup(&self, value: f64, lookup: Option<&Lookup>) -> f64 {
        lookup
            .and_then(|table| table.get(value))
            .unwrap_or_else(|| self.scale(value))
    }

    /// Lookup table usable for sources of kind `S`.
    fn lookup_for<S: Element>(&self) -> Option<&Lookup> {
        if S::KIND.is_integer() {
            self.lookup.as_ref()
        } else {
            None
        }
    }

    /// Scale every element of `src` into `dst`.
    ///
    /// Integer sources are read as unsigned when `signed` is false and use the
    /// lookup table when one is available. Integer destinations receive the
    /// truncated result.
    ///
    /// # Errors
    ///
    /// [`NumericError::MismatchedLengths`] when `dst` and `src` differ in length.
    pub fn scale_into<S: Element, D: Element>(
        &self,
        src: &[S],
        signed: bool,
        dst: &mut [D],
    ) -> Result<(), NumericError> {
        Validator::validate_same_length(src.len(), dst.len())?;
        let lookup = self.lookup_for::<S>();
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = D::from_f64(self.scale_with_lookup(s.to_f64(signed), lookup));
        }
        Ok(())
    }

    /// Scale every element of a typed slice into a new `f64` vector.
    pub fn scale_values<S: Element>(&self, src: &[S], signed: bool) -> Vec<f64> {
        let lookup = self.lookup_for::<S>();
        src.iter()
            .map(|&s| self.scale_with_lookup(s.to_f64(signed), lookup))
            .collect()
    }

    /// Scale every element of a kind-tagged buffer into a new `f64` vector.
    pub fn scale_buffer(&self, src: BufferRef<'_>, signed: bool) -> Vec<f64> {
        match_buffer!(BufferRef, src, v => self.scale_values(v, signed))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Snapshot of the six bounds.
    pub fn bounds(&self) -> ScalerBounds {
        ScalerBounds {
            abs_left_in: self.abs_left_in,
            abs_right_in: self.abs_right_in,
            left_in: self.left_in,
            right_in: self.right_in,
            left_out: self.left_out,
            right_out: self.right_out,
        }
    }

    /// Absolute left input bound.
    pub fn abs_left_in(&self) -> f64 {
        self.abs_left_in
    }

    /// Absolute right input bound.
    pub fn abs_right_in(&self) -> f64 {
        self.abs_right_in
    }

    /// Current left input bound.
    pub fn left_in(&self) -> f64 {
        self.left_in
    }

    /// Current right input bound.
    pub fn right_in(&self) -> f64 {
        self.right_in
    }

    /// Left output bound.
    pub fn left_out(&self) -> f64 {
        self.left_out
    }

    /// Right output bound.
    pub fn right_out(&self) -> f64 {
        self.right_out
    }

    /// Forward coefficient `Δout / Δin`.
    pub fn scaler(&self) -> f64 {
        self.scaler
    }

    /// Inverse coefficient `Δin / Δout`.
    pub fn unscaler(&self) -> f64 {
        self.unscaler
    }

    /// Whether the absolute input range is inverted.
    pub fn is_crossed(&self) -> bool {
        self.crossed
    }

    /// Whether inverted input ranges are permitted.
    pub fn can_cross(&self) -> bool {
        self.can_cross
    }

    /// Whether input values are integers.
    pub fn is_integer_data(&self) -> bool {
        self.integer_data
    }

    /// Pre-scaled values for integer inputs, with the first covered input.
    pub fn lookup(&self) -> Option<(i64, &[f64])> {
        self.lookup
            .as_ref()
            .map(|table| (table.start, table.values.as_slice()))
    }

    // ========================================================================
    // Mutators
    // ========================================================================

    /// Set the current left input bound.
    pub fn set_left_in(&mut self, value: f64) {
        let right = self.right_in;
        self.commit(|s| s.apply_in(value, right, Priority::Left));
    }

    /// Set the current right input bound.
    pub fn set_right_in(&mut self, value: f64) {
        let left = self.left_in;
        self.commit(|s| s.apply_in(left, value, Priority::Right));
    }

    /// Set both current input bounds; `left` wins a conflict.
    pub fn set_left_right_in(&mut self, left: f64, right: f64) {
        self.commit(|s| s.apply_in(left, right, Priority::Left));
    }

    /// Set the absolute left input bound.
    pub fn set_abs_left_in(&mut self, value: f64) {
        let right = self.abs_right_in;
        self.commit(|s| s.apply_abs_in(value, right, Priority::Left));
    }

    /// Set the absolute right input bound.
    pub fn set_abs_right_in(&mut self, value: f64) {
        let left = self.abs_left_in;
        self.commit(|s| s.apply_abs_in(left, value, Priority::Right));
    }

    /// Set both absolute input bounds; `left` wins a conflict.
    pub fn set_abs_left_right_in(&mut self, left: f64, right: f64) {
        self.commit(|s| s.apply_abs_in(left, right, Priority::Left));
    }

    /// Set the left output bound.
    pub fn set_left_out(&mut self, value: f64) {
        self.commit(|s| s.left_out = value);
    }

    /// Set the right output bound.
    pub fn set_right_out(&mut self, value: f64) {
        self.commit(|s| s.right_out = value);
    }

    /// Set both output bounds.
    pub fn set_left_right_out(&mut self, left: f64, right: f64) {
        self.commit(|s| {
            s.left_out = left;
            s.right_out = right;
        });
    }

    /// Declare whether input values are integers (rebuilds the lookup table).
    pub fn set_integer_data(&mut self, value: bool) {
        if self.integer_data != value {
            self.integer_data = value;
            self.update_lookup();
        }
    }

    /// Allow or forbid crossed input ranges.
    ///
    /// # Errors
    ///
    /// [`NumericError::CrossedScaler`] when forbidding crossing while the
    /// bounds are currently crossed.
    pub fn set_can_cross(&mut self, value: bool) -> Result<(), NumericError> {
        if !value && (self.abs_left_in > self.abs_right_in || self.left_in > self.right_in) {
            return Err(NumericError::CrossedScaler);
        }
        self.can_cross = value;
        Ok(())
    }

    /// Order two bounds when crossing is forbidden, keeping them in `[lo, hi]`.
    fn resolve(&self, left: f64, right: f64, priority: Priority, lo: f64, hi: f64) -> (f64, f64) {
        if self.can_cross || left <= right {
            return (left, right);
        }
        match priority {
            Priority::Left => {
                let pushed = (left + CROSS_EPSILON).min(hi);
                (left.min(pushed), pushed)
            }
            Priority::Right => {
                let pushed = (right - CROSS_EPSILON).max(lo);
                (pushed, right.max(pushed))
            }
        }
    }

    fn abs_limits(&self) -> (f64, f64) {
        if self.abs_left_in <= self.abs_right_in {
            (self.abs_left_in, self.abs_right_in)
        } else {
            (self.abs_right_in, self.abs_left_in)
        }
    }

    fn apply_in(&mut self, left: f64, right: f64, priority: Priority) {
        let (lo, hi) = self.abs_limits();
        let left = left.max(lo).min(hi);
        let right = right.max(lo).min(hi);
        let (left, right) = self.resolve(left, right, priority, lo, hi);
        self.left_in = left;
        self.right_in = right;
    }

    fn apply_abs_in(&mut self, left: f64, right: f64, priority: Priority) {
        let (left, right) =
            self.resolve(left, right, priority, f64::NEG_INFINITY, f64::INFINITY);
        self.abs_left_in = left;
        self.abs_right_in = right;
        // Keep the current window inside the new absolute range.
        let (current_left, current_right) = (self.left_in, self.right_in);
        self.apply_in(current_left, current_right, priority);
    }

    /// Run a mutation, recompute derived state and notify if bounds moved.
    fn commit<F: FnOnce(&mut Self)>(&mut self, mutate: F) {
        let before = self.bounds();
        mutate(self);
        self.crossed = self.abs_left_in > self.abs_right_in;
        self.update_scaler();
        if self.bounds() != before {
            self.changed();
        }
    }

    // ========================================================================
    // Derived State
    // ========================================================================

    fn update_scaler(&mut self) {
        let delta_in = self.right_in - self.left_in;
        let delta_out = self.right_out - self.left_out;
        if delta_in == 0.0 {
            self.scaler = 0.0;
            self.unscaler = 0.0;
        } else {
            self.scaler = delta_out / delta_in;
            self.unscaler = if self.scaler == 0.0 {
                0.0
            } else {
                1.0 / self.scaler
            };
        }
        self.update_lookup();
    }

    fn update_lookup(&mut self) {
        let (lo, hi) = self.abs_limits();
        if !self.integer_data || !(lo >= 0.0 && hi <= LOOKUP_MAX) {
            self.lookup = None;
            return;
        }
        let start = Float::ceil(lo) as i64;
        let end = Float::floor(hi) as i64;
        let values = (start..=end).map(|v| self.scale(v as f64)).collect();
        self.lookup = Some(Lookup { start, values });
    }

    // ========================================================================
    // Listeners & Batched Updates
    // ========================================================================

    /// Register a change listener.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ScalerEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener; returns whether it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    /// Start a batch; notifications are held until the matching `end_update`.
    pub fn begin_update(&mut self) {
        self.update_depth += 1;
    }

    /// End a batch; fires one notification if anything changed inside it.
    pub fn end_update(&mut self) {
        self.update_depth = self.update_depth.saturating_sub(1);
        if self.update_depth == 0 && self.pending_change {
            self.pending_change = false;
            self.notify();
        }
    }

    /// Whether a batch is open.
    pub fn is_updating(&self) -> bool {
        self.update_depth > 0
    }

    /// Run `f` inside a batch.
    pub fn batch<R, F: FnOnce(&mut Self) -> R>(&mut self, f: F) -> R {
        self.begin_update();
        let result = f(self);
        self.end_update();
        result
    }

    fn changed(&mut self) {
        if self.is_updating() {
            self.pending_change = true;
        } else {
            self.notify();
        }
    }

    fn notify(&mut self) {
        let event = ScalerEvent {
            bounds: self.bounds(),
        };
        tracing::trace!(
            left_in = event.bounds.left_in,
            right_in = event.bounds.right_in,
            listeners = self.listeners.len(),
            "scaler changed"
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Capture the persisted fields.
    pub fn to_document(&self) -> ScalerDocument {
        ScalerDocument {
            abs_left_in: self.abs_left_in,
            abs_right_in: self.abs_right_in,
            left_in: self.left_in,
            right_in: self.right_in,
            left_out: self.left_out,
            right_out: self.right_out,
            integer_data: self.integer_data,
            can_cross: self.can_cross,
        }
    }

    /// Create a scaler from persisted fields.
    ///
    /// # Errors
    ///
    /// [`NumericError::CrossedScaler`] for crossed bounds without `can_cross`.
    pub fn from_document(doc: &ScalerDocument) -> Result<Self, NumericError> {
        Self::new(
            doc.abs_left_in,
            doc.abs_right_in,
            doc.left_in,
            doc.right_in,
            doc.left_out,
            doc.right_out,
            doc.integer_data,
            doc.can_cross,
        )
    }

    /// Replace the state with persisted fields in one batched update.
    ///
    /// # Errors
    ///
    /// [`NumericError::CrossedScaler`] for crossed bounds without `can_cross`;
    /// the scaler is left untouched in that case.
    pub fn load_document(&mut self, doc: &ScalerDocument) -> Result<(), NumericError> {
        if !doc.can_cross && (doc.abs_left_in > doc.abs_right_in || doc.left_in > doc.right_in) {
            return Err(NumericError::CrossedScaler);
        }
        self.batch(|s| {
            // Intermediate states may be crossed; the final one was checked above.
            s.can_cross = true;
            s.set_integer_data(doc.integer_data);
            s.set_abs_left_right_in(doc.abs_left_in, doc.abs_right_in);
            s.set_left_right_in(doc.left_in, doc.right_in);
            s.set_left_right_out(doc.left_out, doc.right_out);
            s.can_cross = doc.can_cross;
        });
        Ok(())
    }

    /// Serialize the persisted fields as JSON.
    ///
    /// # Errors
    ///
    /// [`NumericError::Persistence`] if serialization fails.
    pub fn to_json(&self) -> Result<String, NumericError> {
        serde_json::to_string(&self.to_document())
            .map_err(|e| NumericError::Persistence(e.to_string()))
    }

    /// Load persisted fields from JSON in one batched update.
    ///
    /// # Errors
    ///
    /// [`NumericError::Persistence`] for malformed JSON, or the errors of
    /// [`Scaler::load_document`].
    pub fn load_json(&mut self, json: &str) -> Result<(), NumericError> {
        let doc: ScalerDocument =
            serde_json::from_str(json).map_err(|e| NumericError::Persistence(e.to_string()))?;
        self.load_document(&doc)
    }
}

impl fmt::Debug for Scaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scaler")
            .field("bounds", &self.bounds())
            .field("scaler", &self.scaler)
            .field("crossed", &self.crossed)
            .field("integer_data", &self.integer_data)
            .field("can_cross", &self.can_cross)
            .field("lookup", &self.lookup.as_ref().map(|t| t.values.len()))
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// ============================================================================
// Persistence Document
// ============================================================================

/// Persisted form of a [`Scaler`]. Missing fields default to `0.0` / `false`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalerDocument {
    /// Absolute left input bound.
    #[serde(rename = "absleftin")]
    pub abs_left_in: f64,
    /// Absolute right input bound.
    #[serde(rename = "absrightin")]
    pub abs_right_in: f64,
    /// Current left input bound.
    #[serde(rename = "leftin")]
    pub left_in: f64,
    /// Current right input bound.
    #[serde(rename = "rightin")]
    pub right_in: f64,
    /// Left output bound.
    #[serde(rename = "leftout")]
    pub left_out: f64,
    /// Right output bound.
    #[serde(rename = "rightout")]
    pub right_out: f64,
    /// Whether input values are integers.
    #[serde(rename = "integerdata")]
    pub integer_data: bool,
    /// Whether crossed input ranges are permitted.
    #[serde(rename = "cancross")]
    pub can_cross: bool,
}

// ============================================================================
// Convenience
// ============================================================================

/// Linearly map `values` from their own `[min, max]` onto `[out_min, out_max]`.
///
/// # Errors
///
/// [`NumericError::EmptyInput`] for an empty slice.
pub fn rescale(values: &[f64], out_min: f64, out_max: f64) -> Result<Vec<f64>, NumericError> {
    let (lo, hi) = reduce::min_max(values, true)?;
    let scaler = Scaler::with_range(lo, hi, out_min, out_max, false)?;
    Ok(values.iter().map(|&v| scaler.scale(v)).collect())
}
