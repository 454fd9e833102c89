//! Latent monotonicity
//!
//! Monotonicity is the fraction of non-noise 1st-order LIAD steps that move
//! up minus the fraction that move down, so it lies in `[-1, 1]`. Steps with
//! `|D¹| <= liad_thresh` are noise. A `(sample, attribute)` position with no
//! non-noise step takes `degenerate_val`.

use crate::error::MetricResult;
use crate::options::{to_element, MonotonicityOptions};
use liadrs_kernels::{liad_order, nanreduce, reduce, validate_interp_shape, ReduceMode};
use scirs2_core::ndarray_ext::{Array2, ArrayD, ArrayView1, ArrayView3, ArrayViewD, Axis};
use scirs2_core::numeric::Float;

fn sign<T>(v: T) -> T
where
    T: Float,
{
    if v > T::zero() {
        T::one()
    } else if v < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Compute latent monotonicity
///
/// The grid only needs at least 2 interpolation points; it does not have to
/// be uniform.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array3;
/// use liadrs_metrics::{monotonicity, MonotonicityOptions};
///
/// let z = Array3::from_shape_fn((3, 2, 6), |(s, f, k)| s as f64 + f as f64 + k as f64);
/// let a = Array3::from_shape_fn((3, 2, 6), |(_, f, k)| {
///     if f == 0 { k as f64 } else { -(k as f64) }
/// });
///
/// let mono = monotonicity(&z.view().into_dyn(), &a.view().into_dyn(), &MonotonicityOptions::default()).unwrap();
/// assert_eq!(mono.as_slice().unwrap(), &[1.0, -1.0]);
/// ```
pub fn monotonicity<T>(
    z: &ArrayViewD<T>,
    a: &ArrayViewD<T>,
    options: &MonotonicityOptions,
) -> MetricResult<ArrayD<T>>
where
    T: Float,
{
    options.validate()?;

    let batch = validate_interp_shape(z, a, options.reg_dim.as_deref(), 2)?;

    log::debug!(
        "monotonicity: {} samples, {} attributes, {} interpolation points, thresh {}",
        batch.n_samples(),
        batch.n_attributes(),
        batch.n_interp(),
        options.liad_thresh
    );

    let liad1 = liad_order(&batch.z.view(), &batch.a.view(), 1, options.liad_mode)?;
    combine(&liad1.values.view(), options)
}

/// Combine a precomputed 1st-order LIAD, `(n_samples, n_attributes, n_interp - 1)`,
/// into monotonicity
pub fn monotonicity_from_liad<T>(
    liad1: &ArrayView3<T>,
    options: &MonotonicityOptions,
) -> MetricResult<ArrayD<T>>
where
    T: Float,
{
    options.validate()?;
    combine(liad1, options)
}

fn combine<T>(liad1: &ArrayView3<T>, options: &MonotonicityOptions) -> MetricResult<ArrayD<T>>
where
    T: Float,
{
    let thresh: T = to_element("liad_thresh", options.liad_thresh)?;
    let degenerate: T = to_element("degenerate_val", options.degenerate_val)?;

    let mono: Array2<T> = liad1.map_axis(Axis(2), |lane: ArrayView1<T>| {
        let (total, count) = lane
            .iter()
            .filter(|v| v.abs() > thresh)
            .fold((T::zero(), 0usize), |(total, count), &v| (total + sign(v), count + 1));

        if count == 0 {
            return degenerate;
        }
        T::from(count).map_or(degenerate, |n| total / n)
    });

    let reduced = if options.nanmean && options.reduce_mode != ReduceMode::None {
        nanreduce(&mono.view(), options.reduce_mode)
    } else {
        reduce(&mono.view(), options.reduce_mode)
    };
    Ok(reduced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricError;
    use liadrs_kernels::{KernelError, LiadMode, ShapeError};
    use scirs2_core::ndarray_ext::{array, Array, Array3, IxDyn};

    fn grid(n_samples: usize, n_features: usize, n_interp: usize) -> Array3<f64> {
        Array3::from_shape_fn((n_samples, n_features, n_interp), |(s, f, k)| {
            s as f64 + f as f64 + k as f64
        })
    }

    fn run(z: &Array3<f64>, a: &Array3<f64>, options: &MonotonicityOptions) -> MetricResult<ArrayD<f64>> {
        monotonicity(&z.view().into_dyn(), &a.view().into_dyn(), options)
    }

    #[test]
    fn test_strictly_increasing_and_decreasing() {
        let z = grid(4, 1, 8);
        let up = z.mapv(|v| v * v * v);
        let down = z.mapv(|v| -2.0 * v);

        assert_eq!(run(&z, &up, &MonotonicityOptions::default()).unwrap()[[0]], 1.0);
        assert_eq!(run(&z, &down, &MonotonicityOptions::default()).unwrap()[[0]], -1.0);
    }

    #[test]
    fn test_mixed_steps() {
        // Steps: +1, +1, -1, +1 => (3 - 1) / 4
        let z = array![[[0.0, 1.0, 2.0, 3.0, 4.0]]];
        let a = array![[[0.0, 1.0, 2.0, 1.0, 2.0]]];

        let mono = run(&z, &a, &MonotonicityOptions::default()).unwrap();
        assert_eq!(mono[[0]], 0.5);
    }

    #[test]
    fn test_noise_steps_are_ignored() {
        // Steps: +1, +1e-4 (noise), -1e-4 (noise), +1
        let z = array![[[0.0, 1.0, 2.0, 3.0, 4.0]]];
        let a = array![[[0.0, 1.0, 1.0001, 1.0, 2.0]]];

        let mono = run(&z, &a, &MonotonicityOptions::default()).unwrap();
        assert_eq!(mono[[0]], 1.0);

        let strict = run(&z, &a, &MonotonicityOptions::new().with_liad_thresh(0.0)).unwrap();
        assert_eq!(strict[[0]], 0.5);
    }

    #[test]
    fn test_degenerate_fill() {
        let z = grid(2, 1, 4);
        let a = Array3::<f64>::from_elem((2, 1, 4), 3.0);

        let options = MonotonicityOptions::new().with_reduce_mode(ReduceMode::None);
        let mono = run(&z, &a, &options).unwrap();
        assert_eq!(mono.shape(), &[2, 1]);
        assert!(mono.iter().all(|v| v.is_nan()));

        let options = options.with_degenerate_val(0.0);
        let mono = run(&z, &a, &options).unwrap();
        assert!(mono.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_nanmean_skips_degenerate_samples() {
        // Sample 0 is flat, sample 1 increases
        let z = grid(2, 1, 4);
        let a = array![[[1.0, 1.0, 1.0, 1.0]], [[0.0, 1.0, 2.0, 3.0]]];

        let mono = run(&z, &a, &MonotonicityOptions::default()).unwrap();
        assert_eq!(mono[[0]], 1.0);

        let mono = run(&z, &a, &MonotonicityOptions::new().with_nanmean(false)).unwrap();
        assert!(mono[[0]].is_nan());
    }

    #[test]
    fn test_fully_degenerate_slice_stays_nan() {
        let z = grid(3, 1, 3);
        let a = Array3::<f64>::zeros((3, 1, 3));

        let options = MonotonicityOptions::new().with_reduce_mode(ReduceMode::All);
        let mono = run(&z, &a, &options).unwrap();
        assert!(mono[IxDyn(&[])].is_nan());
    }

    #[test]
    fn test_uneven_grid_is_accepted() {
        let z = array![[[0.0, 0.1, 2.0, 2.5]]];
        let a = array![[[0.0, 1.0, 5.0, 6.0]]];

        let mono = run(&z, &a, &MonotonicityOptions::default()).unwrap();
        assert_eq!(mono[[0]], 1.0);
    }

    #[test]
    fn test_two_point_grid() {
        let z = Array::from_shape_vec((2, 2), vec![0.0, 1.0, 0.0, 1.0]).unwrap().into_dyn();
        let a = Array::from_shape_vec((2, 2), vec![0.0, 1.0, 1.0, 0.0]).unwrap().into_dyn();

        let options = MonotonicityOptions::new().with_reduce_mode(ReduceMode::Sample);
        let mono = monotonicity(&z.view(), &a.view(), &options).unwrap();
        assert_eq!(mono.as_slice().unwrap(), &[1.0, -1.0]);
    }

    #[test]
    fn test_reg_dim() {
        // Attribute 0 increases along feature 1 and decreases along feature 0
        let z = Array3::from_shape_fn((2, 2, 5), |(_, f, k)| {
            if f == 0 { -(k as f64) } else { k as f64 }
        });
        let a = Array3::from_shape_fn((2, 1, 5), |(_, _, k)| k as f64);

        let along_1 = run(&z, &a, &MonotonicityOptions::new().with_reg_dim(vec![1])).unwrap();
        assert_eq!(along_1[[0]], 1.0);

        let along_0 = run(&z, &a, &MonotonicityOptions::new().with_reg_dim(vec![0])).unwrap();
        assert_eq!(along_0[[0]], -1.0);
    }

    #[test]
    fn test_rejects_single_point() {
        let z = grid(2, 1, 1);
        let err = run(&z, &z, &MonotonicityOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            MetricError::Kernel(KernelError::Shape(ShapeError::InterpTooShort { actual: 1, min: 2 }))
        ));
    }

    #[test]
    fn test_rejects_unsupported_mode() {
        let z = grid(2, 1, 4);
        let options = MonotonicityOptions::new().with_liad_mode(LiadMode::Central);
        let err = run(&z, &z, &options).unwrap_err();
        assert!(err.kernel().map(KernelError::is_config).unwrap_or(false));
    }

    #[test]
    fn test_rejects_nan_threshold() {
        let z = grid(2, 1, 4);
        let options = MonotonicityOptions::new().with_liad_thresh(f64::NAN);
        let err = run(&z, &z, &options).unwrap_err();
        assert!(err.kernel().map(KernelError::is_config).unwrap_or(false));

        let liad1 = array![[[1.0, 2.0]]];
        assert!(monotonicity_from_liad(&liad1.view(), &options).is_err());
    }

    #[test]
    fn test_from_liad() {
        let liad1 = array![[[1.0, -1.0, 2.0], [0.0, 0.0, 0.0]]];
        let options = MonotonicityOptions::new()
            .with_reduce_mode(ReduceMode::None)
            .with_degenerate_val(-5.0);

        let mono = monotonicity_from_liad(&liad1.view(), &options).unwrap();
        assert!((mono[[0, 0]] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(mono[[0, 1]], -5.0);
    }
}
