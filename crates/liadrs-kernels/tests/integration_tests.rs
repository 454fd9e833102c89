//! Integration tests for liadrs-kernels
//!
//! These tests chain validation, the LIAD engine and the aggregation kernels
//! the way the interpolatability statistics do.

use scirs2_core::ndarray_ext::{s, Array, Array3, Axis};
use liadrs_kernels::{
    grid_interval, lehmer_mean, liad, max_last_axis, peak_to_range, validate_equal_interp_deltas,
    validate_interp_shape, validate_non_constant_interp, KernelError, LiadMode, PtpMode,
};

/// `(n_samples, n_features, n_interp)` batch where feature `f` of sample `s`
/// sweeps `s + f + step * k`
fn sweep(n_samples: usize, n_features: usize, n_interp: usize, step: f64) -> Array3<f64> {
    Array3::from_shape_fn((n_samples, n_features, n_interp), |(s, f, k)| {
        (s + f) as f64 + step * k as f64
    })
}

#[test]
fn test_pipeline_quadratic_response() {
    let z = sweep(5, 3, 8, 0.5);
    // Attribute 0 follows feature 2, attribute 1 follows feature 0
    let mut a = Array3::<f64>::zeros((5, 2, 8));
    a.index_axis_mut(Axis(1), 0)
        .assign(&z.index_axis(Axis(1), 2).mapv(|v| v * v));
    a.index_axis_mut(Axis(1), 1)
        .assign(&z.index_axis(Axis(1), 0).mapv(|v| -3.0 * v));

    let batch = validate_interp_shape(
        &z.view().into_dyn(),
        &a.view().into_dyn(),
        Some(&[2, 0]),
        3,
    )
    .unwrap();
    validate_non_constant_interp(&batch.z.view()).unwrap();
    validate_equal_interp_deltas(&batch.z.view()).unwrap();

    let orders = liad(&batch.z.view(), &batch.a.view(), 2, LiadMode::Forward).unwrap();
    let d1 = &orders[0].values;
    let d2 = &orders[1].values;

    // Quadratic attribute: curvature 2 everywhere
    assert!(d2.slice(s![.., 0, ..]).iter().all(|&v| (v - 2.0).abs() < 1e-9));
    // Linear attribute: slope -3, no curvature
    assert!(d1.slice(s![.., 1, ..]).iter().all(|&v| v == -3.0));
    assert!(d2.slice(s![.., 1, ..]).iter().all(|&v| v == 0.0));

    let curvature = lehmer_mean(&d2.mapv(f64::abs).view(), 2.0).unwrap();
    let peak = max_last_axis(&d2.mapv(f64::abs).view()).unwrap();
    assert_eq!(curvature.shape(), &[5, 2]);
    assert_eq!(curvature, peak);

    let spread = peak_to_range(&d1.view(), PtpMode::Naive).unwrap();
    let dz = grid_interval(&batch.z.view()).unwrap();
    assert_eq!(spread.shape(), dz.shape());
    // Slope of x^2 moves by 2 * step per point: 6 steps of 1.0
    assert!(spread.column(0).iter().all(|&v| (v - 6.0).abs() < 1e-9));
}

#[test]
fn test_pipeline_single_attribute_2d() {
    let z = Array::from_shape_fn((3, 4), |(s, k)| s as f64 + k as f64);
    let a = z.mapv(|v| 2.0 * v);

    let batch = validate_interp_shape(&z.view().into_dyn(), &a.view().into_dyn(), None, 3).unwrap();
    assert_eq!(batch.a.shape(), &[3, 1, 4]);

    let orders = liad(&batch.z.view(), &batch.a.view(), 1, LiadMode::Forward).unwrap();
    assert!(orders[0].values.iter().all(|&v| v == 2.0));
}

#[test]
fn test_pipeline_rejects_constant_grid() {
    let mut z = sweep(2, 1, 5, 1.0);
    z.slice_mut(s![1, 0, ..]).fill(3.0);
    let a = z.clone();

    let batch = validate_interp_shape(&z.view().into_dyn(), &a.view().into_dyn(), None, 3).unwrap();
    let err = validate_non_constant_interp(&batch.z.view()).unwrap_err();
    assert!(matches!(err, KernelError::Grid(_)));
}
