//! Performance benchmarks for liadrs-kernels
//!
//! Run with: cargo bench -p liadrs-kernels
//!
//! Benchmarks cover:
//! - Forward LIAD (orders 1 and 2)
//! - Lehmer mean vs. naive maximum
//! - Peak-to-peak vs. quantile range

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use scirs2_core::ndarray_ext::Array3;
use liadrs_kernels::*;

fn grid(n_samples: usize, n_attributes: usize, n_interp: usize) -> (Array3<f64>, Array3<f64>) {
    let z = Array3::from_shape_fn((n_samples, n_attributes, n_interp), |(s, i, k)| {
        (s + i) as f64 + 0.125 * k as f64
    });
    let a = z.mapv(|v| (v * 0.7).sin() + 0.1 * v);
    (z, a)
}

fn bench_liad(c: &mut Criterion) {
    let mut group = c.benchmark_group("liad");

    for &n_samples in [16, 128, 1024].iter() {
        let (z, a) = grid(n_samples, 4, 32);
        group.throughput(Throughput::Elements(z.len() as u64));

        for order in [1usize, 2] {
            group.bench_with_input(
                BenchmarkId::new(format!("forward_order{}", order), n_samples),
                &n_samples,
                |bencher, _| {
                    bencher.iter(|| {
                        black_box(liad(&z.view(), &a.view(), order, LiadMode::Forward).unwrap());
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_peak_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("peak_estimators");

    for &n_interp in [8, 64, 512].iter() {
        let (_, a) = grid(256, 4, n_interp);
        let magnitude = a.mapv(f64::abs);
        group.throughput(Throughput::Elements(a.len() as u64));

        group.bench_with_input(BenchmarkId::new("lehmer_p2", n_interp), &n_interp, |bencher, _| {
            bencher.iter(|| black_box(lehmer_mean(&magnitude.view(), 2.0).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("naive_max", n_interp), &n_interp, |bencher, _| {
            bencher.iter(|| black_box(max_last_axis(&magnitude.view()).unwrap()));
        });
    }
    group.finish();
}

fn bench_range_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_estimators");

    for &n_interp in [8, 64, 512].iter() {
        let (_, a) = grid(256, 4, n_interp);
        group.throughput(Throughput::Elements(a.len() as u64));

        group.bench_with_input(BenchmarkId::new("ptp", n_interp), &n_interp, |bencher, _| {
            bencher.iter(|| black_box(peak_to_range(&a.view(), PtpMode::Naive).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("quantile_0.9", n_interp), &n_interp, |bencher, _| {
            bencher.iter(|| black_box(peak_to_range(&a.view(), PtpMode::Quantile(0.9)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_liad, bench_peak_estimators, bench_range_estimators);
criterion_main!(benches);
