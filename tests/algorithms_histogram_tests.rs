//! Tests for fixed-range histograms.
//!
//! ## Test Organization
//!
//! 1. **Construction** - Float and integer bin layouts, invalid parameters
//! 2. **Binning** - Bin indices, edges and out-of-range values
//! 3. **Buffers** - Typed, kind-tagged and opaque inputs
//! 4. **Properties** - Count conservation and integer bin bound
//! 5. **Builder** - Fluent configuration

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bioimage_numerics::prelude::*;

// ============================================================================
// Construction Tests
// ============================================================================

/// Test float-mode layout.
#[test]
fn test_float_layout() {
    let h = Histogram::new(0.0, 1.0, 4, false).unwrap();
    assert_eq!(h.bin_count(), 4);
    assert_relative_eq!(h.bin_width(), 0.25);
    assert_relative_eq!(h.data_to_bin(), 4.0);
    assert_relative_eq!(h.bin_start(2), 0.5);
    assert!(!h.is_integer());
}

/// Test integer mode never creates more bins than integer values.
#[test]
fn test_integer_layout_clamped() {
    // Range 0..=9 holds 10 integers; 256 requested bins collapse to 10.
    let h = Histogram::new(0.0, 9.0, 256, true).unwrap();
    assert_eq!(h.bin_count(), 10);
    assert_relative_eq!(h.bin_width(), 1.0);
}

/// Test integer mode with wide bins.
#[test]
fn test_integer_layout_wide_bins() {
    // 256 integers into 100 bins: width floor(2.56) = 2, count ceil(128) = 128.
    let h = Histogram::new(0.0, 255.0, 100, true).unwrap();
    assert_relative_eq!(h.bin_width(), 2.0);
    assert_eq!(h.bin_count(), 128);
}

/// Test a degenerate range still yields one usable bin.
#[test]
fn test_zero_range() {
    let mut h = Histogram::new(5.0, 5.0, 8, true).unwrap();
    assert_eq!(h.bin_count(), 1);
    h.add_value(5.0).unwrap();
    assert_eq!(h.bins(), &[1]);

    let mut h = Histogram::new(5.0, 5.0, 8, false).unwrap();
    h.add_value(5.0).unwrap();
    assert_eq!(h.total(), 1);
}

/// Test invalid construction parameters.
#[test]
fn test_invalid_parameters() {
    assert_eq!(
        Histogram::new(0.0, 1.0, 0, false),
        Err(NumericError::InvalidBinCount(0))
    );
    assert_eq!(
        Histogram::new(2.0, 1.0, 4, false),
        Err(NumericError::InvalidRange { min: 2.0, max: 1.0 })
    );
    assert!(Histogram::new(f64::NAN, 1.0, 4, false).is_err());
}

// ============================================================================
// Binning Tests
// ============================================================================

/// Test bin indices including both range edges.
#[test]
fn test_bin_index_edges() {
    let h = Histogram::new(0.0, 10.0, 5, false).unwrap();
    assert_eq!(h.bin_index(0.0).unwrap(), 0);
    assert_eq!(h.bin_index(1.999).unwrap(), 0);
    assert_eq!(h.bin_index(2.0).unwrap(), 1);
    assert_eq!(h.bin_index(9.5).unwrap(), 4);
    // The upper edge belongs to the last bin.
    assert_eq!(h.bin_index(10.0).unwrap(), 4);
}

/// Test out-of-range and NaN values are rejected without counting.
#[test]
fn test_out_of_range() {
    let mut h = Histogram::new(0.0, 10.0, 5, false).unwrap();
    assert_eq!(
        h.add_value(10.5),
        Err(NumericError::ValueOutOfRange {
            value: 10.5,
            min: 0.0,
            max: 10.0
        })
    );
    assert!(h.add_value(-0.1).is_err());
    assert!(h.add_value(f64::NAN).is_err());
    assert_eq!(h.total(), 0);
}

/// Test reset clears counts but keeps the layout.
#[test]
fn test_reset() {
    let mut h = Histogram::new(0.0, 3.0, 4, true).unwrap();
    h.add_values(&[0i32, 1, 2, 3, 3], true).unwrap();
    assert_eq!(h.bins(), &[1, 1, 1, 2]);
    h.reset();
    assert_eq!(h.bins(), &[0, 0, 0, 0]);
    assert_eq!(h.bin_count(), 4);
    assert_eq!(h.bin(3), Some(0));
    assert_eq!(h.bin(4), None);
}

// ============================================================================
// Buffer Tests
// ============================================================================

/// Test unsigned reading of byte pixels.
#[test]
fn test_add_values_unsigned() {
    let mut h = Histogram::new(0.0, 255.0, 256, true).unwrap();
    h.add_values(&[-1i8, 0, -128], false).unwrap();
    assert_eq!(h.bin(255), Some(1));
    assert_eq!(h.bin(0), Some(1));
    assert_eq!(h.bin(128), Some(1));
}

/// Test kind-tagged buffers.
#[test]
fn test_add_buffer() {
    let mut h = Histogram::new(0.0, 1.0, 2, false).unwrap();
    let pixels = NumericBuffer::from(vec![0.1f32, 0.9, 0.6]);
    h.add_buffer(pixels.as_buffer_ref(), true).unwrap();
    assert_eq!(h.bins(), &[1, 2]);
}

/// Test opaque buffers, including unsupported ones.
#[test]
fn test_add_any() {
    let mut h = Histogram::new(0.0, 100.0, 10, true).unwrap();
    let shorts: Vec<i16> = vec![5, 15, 95];
    assert_eq!(h.add_any(&shorts, true), Ok(true));
    assert_eq!(h.total(), 3);

    let unsupported: Vec<u64> = vec![1, 2];
    assert_eq!(h.add_any(&unsupported, true), Ok(false));
    assert_eq!(h.total(), 3);
}

/// Test range inference from a buffer.
#[test]
fn test_compute_infers_range() {
    let data: Vec<i16> = vec![10, 12, 12, 15];
    let h = Histogram::compute(BufferRef::from(&data), 256, true).unwrap();
    assert!(h.is_integer());
    assert_eq!(h.min_value(), 10.0);
    assert_eq!(h.max_value(), 15.0);
    assert_eq!(h.bins(), &[1, 0, 2, 0, 0, 1]);

    let empty: Vec<f64> = Vec::new();
    assert_eq!(
        Histogram::compute(BufferRef::from(&empty), 8, true),
        Err(NumericError::EmptyInput)
    );
}

// ============================================================================
// Property Tests
// ============================================================================

/// Test counts are conserved and integer bins stay bounded.
#[test]
fn test_conservation_and_integer_bound() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..200 {
        let min = rng.gen_range(-500..500) as f64;
        let range = rng.gen_range(0..2000) as f64;
        let bins = rng.gen_range(1..600);
        let integer = rng.gen_bool(0.5);
        let mut h = Histogram::new(min, min + range, bins, integer).unwrap();

        if integer {
            assert!(h.bin_count() as f64 <= range + 1.0);
        } else {
            assert_eq!(h.bin_count(), bins);
        }

        let n = rng.gen_range(0..300);
        for _ in 0..n {
            let value = if integer {
                min + rng.gen_range(0..=range as i64) as f64
            } else {
                min + rng.gen_range(0.0..=range)
            };
            h.add_value(value).unwrap();
        }
        assert_eq!(h.total(), n as u64);
    }
}

// ============================================================================
// Builder Tests
// ============================================================================

/// Test the builder with an explicit range.
#[test]
fn test_builder_explicit() {
    let h = HistogramBuilder::new()
        .range(0.0, 255.0)
        .bins(16)
        .integer(true)
        .build()
        .unwrap();
    assert_eq!(h.bin_count(), 16);
    assert_relative_eq!(h.bin_width(), 16.0);
}

/// Test the builder default bin count and missing range.
#[test]
fn test_builder_defaults() {
    let h = HistogramBuilder::new().range(0.0, 1.0).build().unwrap();
    assert_eq!(h.bin_count(), DEFAULT_BIN_COUNT);
    assert!(matches!(
        HistogramBuilder::new().build(),
        Err(NumericError::InvalidRange { .. })
    ));
}

/// Test filling from a buffer with inferred parameters.
#[test]
fn test_builder_from_buffer() {
    let data = vec![0.0f64, 0.5, 1.0];
    let h = HistogramBuilder::new()
        .bins(2)
        .build_from(BufferRef::from(&data), true)
        .unwrap();
    assert!(!h.is_integer());
    assert_eq!(h.bins(), &[1, 2]);
}

/// Test duplicate parameters are rejected.
#[test]
fn test_builder_duplicate() {
    let err = HistogramBuilder::new().bins(4).bins(8).build().unwrap_err();
    assert_eq!(err, NumericError::DuplicateParameter { parameter: "bins" });
}
