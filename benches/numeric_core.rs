//! Benchmarks for the numeric core using Criterion.
//!
//! Benchmarks cover:
//! - Element-wise arithmetic (typed and dispatched)
//! - Statistics (moments, median, MAD)
//! - Histogram filling (integer and float binning)
//! - Scaling (closed form and lookup table)
//! - Assignment (square and rectangular cost matrices)
//!
//! Run with: `cargo bench`

use bioimage_numerics::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_distr::{Normal, Uniform};
use std::hint::black_box;

const SIZES: [usize; 3] = [1_000, 10_000, 100_000];

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate a 16-bit image row with Gaussian intensities around 2000.
fn generate_pixels(size: usize, seed: u64) -> Vec<i16> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::<f64>::new(2000.0, 300.0).unwrap();
    (0..size)
        .map(|_| dist.sample(&mut rng).clamp(0.0, 4095.0) as i16)
        .collect()
}

/// Generate Gaussian measurements.
fn generate_measurements(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Normal::new(0.0, 1.0).unwrap();
    (0..size).map(|_| dist.sample(&mut rng)).collect()
}

/// Generate a random cost matrix of track-to-detection distances.
fn generate_costs(rows: usize, cols: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let dist = Uniform::new(0.0, 100.0);
    (0..rows)
        .map(|_| (0..cols).map(|_| dist.sample(&mut rng)).collect())
        .collect()
}

// ============================================================================
// Arithmetic
// ============================================================================

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for &size in &SIZES {
        let a = generate_pixels(size, 42);
        let b = generate_pixels(size, 43);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("add_i16", size), &size, |bench, _| {
            let mut out = Some(vec![0i16; size]);
            bench.iter(|| {
                let result = arith::add(black_box(&a), black_box(&b), out.take()).unwrap();
                out = Some(black_box(result));
            })
        });

        group.bench_with_input(BenchmarkId::new("dispatch_add_i16", size), &size, |bench, _| {
            bench.iter(|| {
                dispatch::apply(
                    BinaryOp::Add,
                    BufferRef::from(black_box(&a)),
                    BufferRef::from(black_box(&b)),
                    None,
                )
                .unwrap()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Statistics
// ============================================================================

fn bench_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("statistics");

    for &size in &SIZES {
        let x = generate_measurements(size, 42);
        let y = generate_measurements(size, 43);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("std", size), &size, |bench, _| {
            bench.iter(|| stats::std(black_box(&x), true))
        });
        group.bench_with_input(BenchmarkId::new("pearson", size), &size, |bench, _| {
            bench.iter(|| stats::correlation_pearson(black_box(&x), black_box(&y)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("median", size), &size, |bench, _| {
            bench.iter(|| stats::median(black_box(&x)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("mad", size), &size, |bench, _| {
            bench.iter(|| stats::mad(black_box(&x), true).unwrap())
        });
    }

    group.finish();
}

// ============================================================================
// Histogram
// ============================================================================

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for &size in &SIZES {
        let pixels = generate_pixels(size, 42);
        let measurements = generate_measurements(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("integer_4096", size), &size, |bench, _| {
            let mut histogram = Histogram::new(0.0, 4095.0, 256, true).unwrap();
            bench.iter(|| {
                histogram.reset();
                histogram.add_values(black_box(&pixels), true).unwrap();
            })
        });

        group.bench_with_input(BenchmarkId::new("infer_float", size), &size, |bench, _| {
            bench.iter(|| {
                HistogramBuilder::new()
                    .bins(128)
                    .build_from(BufferRef::from(black_box(&measurements)), true)
                    .unwrap()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Scaling
// ============================================================================

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");

    for &size in &SIZES {
        let pixels = generate_pixels(size, 42);
        group.throughput(Throughput::Elements(size as u64));

        for integer in [false, true] {
            let scaler = ScalerBuilder::new()
                .abs_range(0.0, 4095.0)
                .input_range(500.0, 3500.0)
                .output_range(0.0, 255.0)
                .integer_data(integer)
                .build()
                .unwrap();
            let label = if integer { "lookup" } else { "closed_form" };
            group.bench_with_input(BenchmarkId::new(label, size), &size, |bench, _| {
                bench.iter(|| scaler.scale_values(black_box(&pixels), true))
            });
        }
    }

    group.finish();
}

// ============================================================================
// Assignment
// ============================================================================

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assignment");
    group.sample_size(20);

    for &(rows, cols) in &[(10, 10), (50, 50), (100, 100), (50, 80), (80, 50)] {
        let costs = generate_costs(rows, cols, 42);
        let id = format!("{rows}x{cols}");
        group.bench_with_input(BenchmarkId::new("solve", id), &costs, |bench, costs| {
            bench.iter(|| solve(black_box(costs)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_arithmetic,
    bench_statistics,
    bench_histogram,
    bench_scaling,
    bench_assignment,
);
criterion_main!(benches);
