//! Property-based tests for the interpolatability statistics

use super::*;
use proptest::prelude::*;
use scirs2_core::ndarray_ext::{Array2, Array3, ArrayD, Ix2, IxDyn};

/// `(n_samples, n_attributes, n_interp)` plus integer attribute values for every entry
fn batch() -> impl Strategy<Value = ((usize, usize, usize), Vec<i32>)> {
    (1usize..5, 1usize..4, 3usize..9).prop_flat_map(|(n, m, k)| {
        (Just((n, m, k)), prop::collection::vec(-20i32..20, n * m * k))
    })
}

/// Dyadic steps keep grid arithmetic exact
fn step() -> impl Strategy<Value = f64> {
    prop::sample::select(vec![0.25, 0.5, 1.0, 2.0, -0.5])
}

fn grid((n, m, k): (usize, usize, usize), step: f64) -> Array3<f64> {
    Array3::from_shape_fn((n, m, k), |(s, i, j)| s as f64 - 3.0 * i as f64 + step * j as f64)
}

fn attributes((n, m, k): (usize, usize, usize), values: &[i32]) -> Array3<f64> {
    Array3::from_shape_fn((n, m, k), |(s, i, j)| values[(s * m + i) * k + j] as f64)
}

fn same(x: f64, y: f64) -> bool {
    x == y || (x.is_nan() && y.is_nan()) || (x - y).abs() <= 1e-9 * x.abs().max(1.0)
}

fn unreduced(matrix: &ArrayD<f64>) -> Array2<f64> {
    matrix.clone().into_dimensionality::<Ix2>().unwrap()
}

proptest! {
    /// Unclamped smoothness never exceeds 1
    #[test]
    fn test_smoothness_upper_bound((dims, values) in batch(), step in step()) {
        let z = grid(dims, step);
        let a = attributes(dims, &values);
        let options = SmoothnessOptions::new().with_reduce_mode(ReduceMode::None);

        let smth = smoothness(&z.view().into_dyn(), &a.view().into_dyn(), &options).unwrap();
        prop_assert_eq!(smth.shape(), &[dims.0, dims.1]);
        prop_assert!(smth.iter().all(|&v| v.is_nan() || v <= 1.0));
    }

    /// Clamped smoothness lies in [0, 1]
    #[test]
    fn test_smoothness_clamped(
        (dims, values) in batch(),
        step in step(),
        q in prop::option::of(0.05f64..=1.0),
    ) {
        let z = grid(dims, step);
        let a = attributes(dims, &values);
        let ptp = q.map_or(PtpMode::Naive, PtpMode::Quantile);
        let options = SmoothnessOptions::new()
            .with_ptp_mode(ptp)
            .with_clamp(true)
            .with_reduce_mode(ReduceMode::None);

        let smth = smoothness(&z.view().into_dyn(), &a.view().into_dyn(), &options).unwrap();
        prop_assert!(smth.iter().all(|&v| v.is_nan() || (0.0..=1.0).contains(&v)));
    }

    /// Repeated calls are bit-identical
    #[test]
    fn test_idempotence((dims, values) in batch(), step in step()) {
        let z = grid(dims, step).into_dyn();
        let a = attributes(dims, &values).into_dyn();
        let options = SmoothnessOptions::new().with_reduce_mode(ReduceMode::None);

        let first = smoothness(&z.view(), &a.view(), &options).unwrap();
        let second = smoothness(&z.view(), &a.view(), &options).unwrap();
        prop_assert!(first.iter().zip(second.iter()).all(|(x, y)| x.to_bits() == y.to_bits()));

        let options = MonotonicityOptions::new().with_reduce_mode(ReduceMode::None);
        let first = monotonicity(&z.view(), &a.view(), &options).unwrap();
        let second = monotonicity(&z.view(), &a.view(), &options).unwrap();
        prop_assert!(first.iter().zip(second.iter()).all(|(x, y)| x.to_bits() == y.to_bits()));
    }

    /// "all", "attribute" and "sample" agree with means of the unreduced matrix
    #[test]
    fn test_smoothness_reduction_consistency((dims, values) in batch(), step in step()) {
        let z = grid(dims, step).into_dyn();
        let a = attributes(dims, &values).into_dyn();
        let run = |mode| smoothness(&z.view(), &a.view(), &SmoothnessOptions::new().with_reduce_mode(mode)).unwrap();

        let full = unreduced(&run(ReduceMode::None));
        let (n, m) = full.dim();

        let all = run(ReduceMode::All);
        prop_assert!(same(all[IxDyn(&[])], full.sum() / (n * m) as f64));

        let attribute = run(ReduceMode::Attribute);
        for j in 0..m {
            prop_assert!(same(attribute[[j]], full.column(j).sum() / n as f64));
        }

        let sample = run(ReduceMode::Sample);
        for i in 0..n {
            prop_assert!(same(sample[[i]], full.row(i).sum() / m as f64));
        }
    }

    /// Affine attributes are perfectly smooth
    #[test]
    fn test_linear_response_smoothness(
        dims in (1usize..5, 1usize..4, 3usize..9),
        step in step(),
        slope in -6i32..6,
        intercept in -6i32..6,
    ) {
        let z = grid(dims, step);
        let a = z.mapv(|v| slope as f64 * v + intercept as f64);

        let smth = smoothness(&z.view().into_dyn(), &a.view().into_dyn(), &SmoothnessOptions::default()).unwrap();
        prop_assert!(smth.iter().all(|&v| v == 1.0));
    }

    /// Monotonicity lies in [-1, 1] wherever it is defined
    #[test]
    fn test_monotonicity_range((dims, values) in batch(), step in step(), thresh in 0.0f64..3.0) {
        let z = grid(dims, step);
        let a = attributes(dims, &values);
        let options = MonotonicityOptions::new()
            .with_liad_thresh(thresh)
            .with_reduce_mode(ReduceMode::None);

        let mono = monotonicity(&z.view().into_dyn(), &a.view().into_dyn(), &options).unwrap();
        prop_assert!(mono.iter().all(|&v| v.is_nan() || (-1.0..=1.0).contains(&v)));
    }

    /// Strictly monotone responses score exactly ±1
    #[test]
    fn test_strictly_monotone(
        dims in (1usize..5, 1usize..4, 2usize..9),
        increments in prop::collection::vec(1i32..10, 8),
        increasing in any::<bool>(),
    ) {
        let z = grid(dims, 1.0);
        let sign = if increasing { 1.0 } else { -1.0 };
        let a = Array3::from_shape_fn(dims, |(_, _, j)| {
            sign * increments[..j].iter().sum::<i32>() as f64
        });

        let mono = monotonicity(&z.view().into_dyn(), &a.view().into_dyn(), &MonotonicityOptions::default()).unwrap();
        prop_assert!(mono.iter().all(|&v| v == sign));
    }
}
