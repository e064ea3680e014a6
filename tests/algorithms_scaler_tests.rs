//! Tests for the linear scaler.
//!
//! ## Test Organization
//!
//! 1. **Construction** - Valid, crossed and forbidden configurations
//! 2. **Scaling** - Forward mapping, clamping and inverse mapping
//! 3. **Crossed Ranges** - Inverted mappings
//! 4. **Mutators** - Bound updates, clamping and priority pushes
//! 5. **Lookup Table** - Integer pre-scaling
//! 6. **Listeners** - Change notifications and batching
//! 7. **Persistence** - Documents and JSON
//! 8. **Builder** - Fluent configuration

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bioimage_numerics::prelude::*;

fn ramp() -> Scaler {
    Scaler::new(0.0, 1000.0, 100.0, 500.0, 0.0, 255.0, false, false).unwrap()
}

// ============================================================================
// Construction Tests
// ============================================================================

/// Test derived coefficients.
#[test]
fn test_coefficients() {
    let s = ramp();
    assert_relative_eq!(s.scaler(), 255.0 / 400.0);
    assert_relative_eq!(s.unscaler(), 400.0 / 255.0);
    assert!(!s.is_crossed());
}

/// Test crossed bounds are refused without `can_cross`.
#[test]
fn test_crossed_refused() {
    assert_eq!(
        Scaler::new(10.0, 0.0, 10.0, 0.0, 0.0, 1.0, false, false).unwrap_err(),
        NumericError::CrossedScaler
    );
    assert!(Scaler::new(0.0, 10.0, 8.0, 2.0, 0.0, 1.0, false, false).is_err());
    assert!(Scaler::with_range(5.0, 1.0, 0.0, 1.0, false).is_err());
}

/// Test a window outside the absolute range is clamped into it.
#[test]
fn test_new_clamps_window() {
    let s = Scaler::new(0.0, 10.0, -5.0, 20.0, 0.0, 1.0, false, false).unwrap();
    assert_eq!((s.left_in(), s.right_in()), (0.0, 10.0));
    assert_relative_eq!(s.scaler(), 0.1);

    let crossed = Scaler::new(10.0, 0.0, 12.0, -3.0, 0.0, 1.0, false, true).unwrap();
    assert_eq!((crossed.left_in(), crossed.right_in()), (10.0, 0.0));
}

/// Test a clamped scaler survives a document round trip unchanged.
#[test]
fn test_clamped_document_round_trip() {
    let s = Scaler::new(0.0, 10.0, -5.0, 20.0, 0.0, 1.0, false, false).unwrap();
    let doc = s.to_document();
    let mut reloaded = ramp();
    reloaded.load_document(&doc).unwrap();
    assert_eq!(reloaded.to_document(), doc);
    assert_eq!(Scaler::from_document(&doc).unwrap().to_document(), doc);
}

/// Test the builder clamps the window into the absolute range.
#[test]
fn test_builder_clamps_window() {
    let s = ScalerBuilder::new()
        .abs_range(0.0, 255.0)
        .input_range(-10.0, 300.0)
        .build()
        .unwrap();
    assert_eq!((s.left_in(), s.right_in()), (0.0, 255.0));
}

/// Test an empty input window maps everything to the output bounds.
#[test]
fn test_degenerate_window() {
    let s = Scaler::with_range(3.0, 3.0, 0.0, 10.0, false).unwrap();
    assert_eq!(s.scaler(), 0.0);
    assert_eq!(s.unscaler(), 0.0);
    assert_eq!(s.scale(2.0), 0.0);
    assert_eq!(s.scale(3.0), 0.0);
    assert_eq!(s.scale(4.0), 10.0);
}

// ============================================================================
// Scaling Tests
// ============================================================================

/// Test the forward mapping inside the window.
#[test]
fn test_scale_inside() {
    let s = ramp();
    assert_relative_eq!(s.scale(300.0), 127.5);
    assert_relative_eq!(s.scale(200.0), 63.75);
}

/// Test values outside the window clamp to the output bounds.
#[test]
fn test_scale_clamps() {
    let s = ramp();
    assert_eq!(s.scale(100.0), 0.0);
    assert_eq!(s.scale(-5.0), 0.0);
    assert_eq!(s.scale(500.0), 255.0);
    assert_eq!(s.scale(10_000.0), 255.0);
}

/// Test `unscale(scale(x)) == x` inside the window.
#[test]
fn test_round_trip() {
    let s = ramp();
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..1000 {
        let x = rng.gen_range(100.0..500.0);
        assert_relative_eq!(s.unscale(s.scale(x)), x, epsilon = 1e-9);
    }
}

/// Test scaling typed, tagged and integer destinations.
#[test]
fn test_scale_batches() {
    let s = Scaler::with_range(0.0, 10.0, 0.0, 100.0, false).unwrap();
    let src = [0.0f32, 2.5, 10.0, 11.0];
    assert_eq!(s.scale_values(&src, true), vec![0.0, 25.0, 100.0, 100.0]);

    let mut dst = [0i8; 4];
    s.scale_into(&src, true, &mut dst).unwrap();
    assert_eq!(dst, [0, 25, 100, 100]);

    let mut short_dst = [0i16; 3];
    assert!(s.scale_into(&src, true, &mut short_dst).is_err());

    let tagged = NumericBuffer::from(vec![5i32]);
    assert_eq!(s.scale_buffer(tagged.as_buffer_ref(), true), vec![50.0]);
}

/// Test unsigned reading of integer sources.
#[test]
fn test_scale_unsigned_source() {
    let s = Scaler::with_range(0.0, 255.0, 0.0, 1.0, true).unwrap();
    let scaled = s.scale_values(&[-1i8, 0], false);
    assert_eq!(scaled, vec![1.0, 0.0]);
}

/// Test the data-range convenience mapping.
#[test]
fn test_rescale() {
    let out = rescale(&[2.0, 4.0, 6.0], 0.0, 1.0).unwrap();
    assert_eq!(out, vec![0.0, 0.5, 1.0]);
    let empty: [f64; 0] = [];
    assert_eq!(rescale(&empty, 0.0, 1.0), Err(NumericError::EmptyInput));
}

// ============================================================================
// Crossed Range Tests
// ============================================================================

/// Test inverted mapping for a crossed scaler.
#[test]
fn test_crossed_mapping() {
    let s = Scaler::new(100.0, 0.0, 100.0, 0.0, 0.0, 255.0, false, true).unwrap();
    assert!(s.is_crossed());
    assert_eq!(s.scale(100.0), 0.0);
    assert_eq!(s.scale(150.0), 0.0);
    assert_eq!(s.scale(0.0), 255.0);
    assert_eq!(s.scale(-20.0), 255.0);
    assert_relative_eq!(s.scale(25.0), 191.25);
    assert_relative_eq!(s.unscale(191.25), 25.0);
}

/// Test forbidding crossing while crossed fails.
#[test]
fn test_set_can_cross() {
    let mut s = Scaler::new(100.0, 0.0, 100.0, 0.0, 0.0, 1.0, false, true).unwrap();
    assert_eq!(s.set_can_cross(false), Err(NumericError::CrossedScaler));
    assert!(s.can_cross());

    let mut plain = ramp();
    plain.set_can_cross(true).unwrap();
    assert!(plain.can_cross());
}

// ============================================================================
// Mutator Tests
// ============================================================================

/// Test the window is clamped into the absolute range.
#[test]
fn test_window_clamped_to_abs() {
    let mut s = ramp();
    s.set_left_in(-50.0);
    assert_eq!(s.left_in(), 0.0);
    s.set_right_in(5000.0);
    assert_eq!(s.right_in(), 1000.0);
    assert_relative_eq!(s.scaler(), 255.0 / 1000.0);
}

/// Test the written bound wins and the other is pushed past it.
#[test]
fn test_priority_push() {
    let mut s = ramp();
    s.set_left_in(700.0);
    assert_eq!(s.left_in(), 700.0);
    assert_relative_eq!(s.right_in(), 700.0 + CROSS_EPSILON);

    let mut s = ramp();
    s.set_right_in(50.0);
    assert_eq!(s.right_in(), 50.0);
    assert_relative_eq!(s.left_in(), 50.0 - CROSS_EPSILON);
}

/// Test shrinking the absolute range drags the window along.
#[test]
fn test_abs_shrink_moves_window() {
    let mut s = ramp();
    s.set_abs_left_right_in(200.0, 300.0);
    assert_eq!(s.abs_left_in(), 200.0);
    assert_eq!(s.abs_right_in(), 300.0);
    assert_eq!(s.left_in(), 200.0);
    assert_eq!(s.right_in(), 300.0);
}

/// Test output bound mutators.
#[test]
fn test_output_mutators() {
    let mut s = ramp();
    s.set_left_right_out(10.0, 20.0);
    assert_eq!(s.scale(100.0), 10.0);
    assert_eq!(s.scale(500.0), 20.0);
    s.set_right_out(30.0);
    assert_eq!(s.right_out(), 30.0);
    s.set_left_out(0.0);
    assert_relative_eq!(s.scale(300.0), 15.0);
}

// ============================================================================
// Lookup Table Tests
// ============================================================================

/// Test a lookup table is built for small integer ranges.
#[test]
fn test_lookup_built() {
    let s = Scaler::new(0.0, 4095.0, 0.0, 4095.0, 0.0, 255.0, true, false).unwrap();
    let (start, values) = s.lookup().unwrap();
    assert_eq!(start, 0);
    assert_eq!(values.len(), 4096);
    assert_eq!(values[4095], 255.0);
    assert_relative_eq!(values[100], s.scale(100.0));
}

/// Test no table for float data or ranges beyond 16 bits.
#[test]
fn test_lookup_absent() {
    assert!(ramp().lookup().is_none());
    let wide = Scaler::with_range(0.0, 70000.0, 0.0, 1.0, true).unwrap();
    assert!(wide.lookup().is_none());
    let negative = Scaler::with_range(-10.0, 10.0, 0.0, 1.0, true).unwrap();
    assert!(negative.lookup().is_none());
}

/// Test the table follows bound changes.
#[test]
fn test_lookup_tracks_changes() {
    let mut s = Scaler::with_range(0.0, 255.0, 0.0, 1.0, true).unwrap();
    s.set_left_right_in(0.0, 127.0);
    let (_, values) = s.lookup().unwrap();
    assert_eq!(values[200], 1.0);
    s.set_integer_data(false);
    assert!(s.lookup().is_none());
}

/// Test batch results agree with the direct formula.
#[test]
fn test_lookup_matches_direct() {
    let s = Scaler::new(0.0, 1000.0, 100.0, 900.0, 0.0, 1.0, true, false).unwrap();
    let src: Vec<i16> = (0..=1000).collect();
    let batch = s.scale_values(&src, true);
    for (x, y) in src.iter().zip(batch) {
        assert_relative_eq!(y, s.scale(*x as f64));
    }
}

// ============================================================================
// Listener Tests
// ============================================================================

fn recorder(s: &mut Scaler) -> Rc<RefCell<Vec<ScalerEvent>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    s.add_listener(move |event| sink.borrow_mut().push(*event));
    events
}

/// Test listeners fire once per effective change.
#[test]
fn test_listener_fires_on_change() {
    let mut s = ramp();
    let events = recorder(&mut s);
    s.set_left_in(200.0);
    s.set_left_in(200.0); // no change
    s.set_right_out(100.0);
    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].bounds.left_in, 200.0);
    assert_eq!(events[1].bounds.right_out, 100.0);
}

/// Test batched updates coalesce into one notification.
#[test]
fn test_batch_coalesces() {
    let mut s = ramp();
    let events = recorder(&mut s);
    s.batch(|s| {
        s.set_left_in(150.0);
        s.set_right_in(450.0);
        s.set_left_right_out(1.0, 2.0);
        assert!(s.is_updating());
    });
    assert!(!s.is_updating());
    assert_eq!(events.borrow().len(), 1);
    assert_eq!(events.borrow()[0].bounds, s.bounds());
}

/// Test nested begin/end pairs notify at the outermost end.
#[test]
fn test_nested_updates() {
    let mut s = ramp();
    let events = recorder(&mut s);
    s.begin_update();
    s.begin_update();
    s.set_left_in(120.0);
    s.end_update();
    assert!(events.borrow().is_empty());
    s.end_update();
    assert_eq!(events.borrow().len(), 1);
}

/// Test an unchanged batch stays silent.
#[test]
fn test_batch_without_change() {
    let mut s = ramp();
    let events = recorder(&mut s);
    s.batch(|s| s.set_left_in(100.0));
    assert!(events.borrow().is_empty());
}

/// Test removing listeners.
#[test]
fn test_remove_listener() {
    let mut s = ramp();
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let id = s.add_listener(move |_| *sink.borrow_mut() += 1);
    s.set_left_in(110.0);
    assert!(s.remove_listener(id));
    assert!(!s.remove_listener(id));
    s.set_left_in(120.0);
    assert_eq!(*count.borrow(), 1);
}

// ============================================================================
// Persistence Tests
// ============================================================================

/// Test JSON field names and a reload into another scaler.
#[test]
fn test_json_round_trip() {
    let original = Scaler::new(0.0, 4095.0, 10.0, 3000.0, 0.0, 255.0, true, false).unwrap();
    let json = original.to_json().unwrap();
    for key in [
        "absleftin",
        "absrightin",
        "leftin",
        "rightin",
        "leftout",
        "rightout",
        "integerdata",
        "cancross",
    ] {
        assert!(json.contains(&format!("\"{}\"", key)), "missing {}", key);
    }

    let mut restored = ramp();
    let events = recorder(&mut restored);
    restored.load_json(&json).unwrap();
    assert_eq!(restored.to_document(), original.to_document());
    assert!(restored.lookup().is_some());
    assert_eq!(events.borrow().len(), 1);
}

/// Test missing fields default to zero / false.
#[test]
fn test_document_defaults() {
    let doc: ScalerDocument =
        serde_json::from_str(r#"{"absrightin": 10.0, "rightin": 10.0, "rightout": 1.0}"#)
            .unwrap();
    assert_eq!(doc.left_in, 0.0);
    assert_eq!(doc.abs_left_in, 0.0);
    assert!(!doc.integer_data);
    let s = Scaler::from_document(&doc).unwrap();
    assert_relative_eq!(s.scale(5.0), 0.5);

    // Without an absolute range the window collapses onto `[0, 0]`.
    let doc: ScalerDocument = serde_json::from_str(r#"{"rightin": 10.0}"#).unwrap();
    let s = Scaler::from_document(&doc).unwrap();
    assert_eq!((s.left_in(), s.right_in()), (0.0, 0.0));
}

/// Test a crossed document is refused unless it allows crossing.
#[test]
fn test_load_crossed_document() {
    let mut s = ramp();
    let mut doc = s.to_document();
    doc.left_in = 600.0;
    doc.right_in = 400.0;
    assert_eq!(s.load_document(&doc), Err(NumericError::CrossedScaler));
    assert_eq!(s.left_in(), 100.0);

    doc.abs_left_in = 1000.0;
    doc.abs_right_in = 0.0;
    doc.can_cross = true;
    s.load_document(&doc).unwrap();
    assert!(s.is_crossed());
    assert!(s.can_cross());
    assert_eq!(s.left_in(), 600.0);
    assert_eq!(s.right_in(), 400.0);
}

/// Test malformed JSON is reported.
#[test]
fn test_malformed_json() {
    let mut s = ramp();
    assert!(matches!(
        s.load_json("{not json"),
        Err(NumericError::Persistence(_))
    ));
}

// ============================================================================
// Builder Tests
// ============================================================================

/// Test builder defaults.
#[test]
fn test_builder_defaults() {
    let s = ScalerBuilder::new().build().unwrap();
    assert_eq!(s.bounds().left_in, 0.0);
    assert_eq!(s.bounds().right_in, 1.0);
    assert_eq!(s.bounds().right_out, 1.0);
    assert!(!s.can_cross());
}

/// Test the absolute range defaults to the window and vice versa.
#[test]
fn test_builder_range_fallbacks() {
    let s = ScalerBuilder::new().input_range(2.0, 8.0).build().unwrap();
    assert_eq!((s.abs_left_in(), s.abs_right_in()), (2.0, 8.0));

    let s = ScalerBuilder::new().abs_range(0.0, 65535.0).build().unwrap();
    assert_eq!((s.left_in(), s.right_in()), (0.0, 65535.0));
}

/// Test builder validation.
#[test]
fn test_builder_validation() {
    assert!(matches!(
        ScalerBuilder::new().input_range(f64::NAN, 1.0).build(),
        Err(NumericError::InvalidNumericValue(_))
    ));
    assert!(matches!(
        ScalerBuilder::new().input_range(5.0, 1.0).build(),
        Err(NumericError::CrossedScaler)
    ));
    assert!(ScalerBuilder::new()
        .input_range(5.0, 1.0)
        .can_cross(true)
        .build()
        .is_ok());
    assert!(matches!(
        ScalerBuilder::new().output_range(0.0, 1.0).output_range(0.0, 2.0).build(),
        Err(NumericError::DuplicateParameter {
            parameter: "output_range"
        })
    ));
}
