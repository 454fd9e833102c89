//! Latent smoothness
//!
//! Smoothness measures how evenly an attribute changes along the latent
//! dimension that regularizes it. For attribute `i` regularized by feature `d`:
//!
//! ```text
//! smoothness = 1 - C[|D²|] / (R[D¹] / δ)
//! ```
//!
//! where `D¹`/`D²` are the 1st/2nd-order LIAD over the interpolation axis,
//! `C` is the Lehmer mean (or plain maximum), `R` is a peak-to-peak or
//! quantile range and `δ` is the magnitude of the grid step.
//!
//! A value of `1` means the attribute responds linearly to the latent step.
//! Attribute columns whose 2nd-order LIAD is zero for every sample are set to
//! exactly `1`, which covers the `0 / 0` case of a flat attribute.

use crate::error::MetricResult;
use crate::options::{to_element, SmoothnessOptions};
use liadrs_kernels::{
    grid_interval, lehmer_mean, liad, max_last_axis, peak_to_range, reduce,
    validate_equal_interp_deltas, validate_interp_shape, validate_non_constant_interp,
    KernelError, MaxMode, ShapeError,
};
use scirs2_core::ndarray_ext::{Array2, ArrayD, ArrayView2, ArrayView3, ArrayViewD, Axis};
use scirs2_core::numeric::Float;

/// Compute latent smoothness
///
/// # Arguments
///
/// * `z` - Latent batch, `(n_samples, n_interp)` or `(n_samples, n_features, n_interp)`
/// * `a` - Attribute batch, `(n_samples, n_interp)` or `(n_samples, n_attributes, n_interp)`
/// * `options` - See [`SmoothnessOptions`]
///
/// # Returns
///
/// `(n_attributes,)`, `(n_samples,)`, a 0-d scalar, or the full
/// `(n_samples, n_attributes)` matrix depending on `options.reduce_mode`.
///
/// # Errors
///
/// Options are checked first, then shapes, then the grid. Fails with
/// - a config error for invalid options,
/// - a shape error if the batch does not fit or has fewer than 3 interpolation points,
/// - a grid error if any grid is constant or unevenly spaced.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{Array3, IxDyn};
/// use liadrs_metrics::{smoothness, ReduceMode, SmoothnessOptions};
///
/// let z = Array3::from_shape_fn((2, 1, 5), |(s, _, k)| s as f64 + k as f64);
/// let linear = z.mapv(|v| 3.0 * v - 1.0);
///
/// let smth = smoothness(&z.view().into_dyn(), &linear.view().into_dyn(), &SmoothnessOptions::default()).unwrap();
/// assert_eq!(smth.as_slice().unwrap(), &[1.0]);
///
/// // a = z^2 on a unit grid: Lehmer mean of |D²| is 2, range of D¹ is 6
/// let z = Array3::from_shape_fn((1, 1, 5), |(_, _, k)| k as f64);
/// let quadratic = z.mapv(|v| v * v);
/// let options = SmoothnessOptions::new().with_reduce_mode(ReduceMode::All);
/// let smth = smoothness(&z.view().into_dyn(), &quadratic.view().into_dyn(), &options).unwrap();
/// assert!((smth[IxDyn(&[])] - 2.0 / 3.0).abs() < 1e-12);
/// ```
pub fn smoothness<T>(
    z: &ArrayViewD<T>,
    a: &ArrayViewD<T>,
    options: &SmoothnessOptions,
) -> MetricResult<ArrayD<T>>
where
    T: Float,
{
    options.validate()?;
    let p = to_element("p", options.p)?;

    let batch = validate_interp_shape(z, a, options.reg_dim.as_deref(), 3)?;
    validate_non_constant_interp(&batch.z.view())?;
    validate_equal_interp_deltas(&batch.z.view())?;

    log::debug!(
        "smoothness: {} samples, {} attributes, {} interpolation points, reg_dim {:?}",
        batch.n_samples(),
        batch.n_attributes(),
        batch.n_interp(),
        batch.reg_dim
    );

    let orders = liad(&batch.z.view(), &batch.a.view(), 2, options.liad_mode)?;
    let z_interval = grid_interval(&batch.z.view())?;

    match orders.as_slice() {
        [liad1, liad2] => combine(
            &liad1.values.view(),
            &liad2.values.view(),
            &z_interval.view(),
            options,
            p,
        ),
        _ => Err(KernelError::empty_input("smoothness", "liad").into()),
    }
}

/// Combine precomputed LIADs into smoothness
///
/// `liad1` is `(n_samples, n_attributes, n_interp - 1)`, `liad2` is
/// `(n_samples, n_attributes, n_interp - 2)` and `z_interval` is the grid step
/// of each `(sample, attribute)` grid. Only the magnitude of the step is used.
pub fn smoothness_from_liads<T>(
    liad1: &ArrayView3<T>,
    liad2: &ArrayView3<T>,
    z_interval: &ArrayView2<T>,
    options: &SmoothnessOptions,
) -> MetricResult<ArrayD<T>>
where
    T: Float,
{
    options.validate()?;
    let p = to_element("p", options.p)?;

    let (n_samples, n_attributes, _) = liad1.dim();
    let (n_samples2, n_attributes2, _) = liad2.dim();
    if (n_samples, n_attributes) != (n_samples2, n_attributes2) {
        return Err(KernelError::from(ShapeError::Incompatible {
            left: liad1.shape().to_vec(),
            right: liad2.shape().to_vec(),
        })
        .into());
    }
    if z_interval.dim() != (n_samples, n_attributes) {
        return Err(KernelError::from(ShapeError::Incompatible {
            left: vec![n_samples, n_attributes],
            right: z_interval.shape().to_vec(),
        })
        .into());
    }

    combine(liad1, liad2, z_interval, options, p)
}

fn combine<T>(
    liad1: &ArrayView3<T>,
    liad2: &ArrayView3<T>,
    z_interval: &ArrayView2<T>,
    options: &SmoothnessOptions,
    p: T,
) -> MetricResult<ArrayD<T>>
where
    T: Float,
{
    let liad2_abs = liad2.mapv(T::abs);
    let numerator: Array2<T> = match options.max_mode {
        MaxMode::Lehmer => lehmer_mean(&liad2_abs.view(), p)?,
        MaxMode::Naive => max_last_axis(&liad2_abs.view())?,
    };

    let denominator = peak_to_range(liad1, options.ptp_mode)? / &z_interval.mapv(T::abs);

    // IEEE division: 0/0 is NaN and x/0 is ±inf, neither is an error here
    let mut smth = (&numerator / &denominator).mapv(|r| T::one() - r);

    for (attribute, column) in numerator.axis_iter(Axis(1)).enumerate() {
        if column.iter().all(|&v| v == T::zero()) {
            smth.column_mut(attribute).fill(T::one());
        }
    }

    if options.clamp {
        smth.mapv_inplace(|v| {
            if v.is_nan() {
                v
            } else {
                v.max(T::zero()).min(T::one())
            }
        });
    }

    Ok(reduce(&smth.view(), options.reduce_mode))
}
