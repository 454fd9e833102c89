//! Aggregation primitives along the last (interpolation) axis
//!
//! # Operations
//!
//! ## Peak estimators
//! - **Lehmer mean** - `Σxᵖ / Σxᵖ⁻¹`, a smooth proxy for the maximum of non-negative data
//! - **Max** - Plain maximum
//!
//! ## Range estimators
//! - **Peak-to-peak** - `max - min`
//! - **Quantile range** - Distance between two symmetric quantiles, robust to outliers
//!
//! ## Score gaps
//! - **Top-two gap** - Margin between the best score and the runner-up (or a target)
//!
//! NaN propagates through every reduction here: a lane containing NaN reduces to NaN.

use crate::error::{ConfigError, KernelError, KernelResult, ShapeError};
use crate::modes::PtpMode;
use scirs2_core::ndarray::RemoveAxis;
use scirs2_core::ndarray_ext::{Array, ArrayView, ArrayView1, Axis};
use scirs2_core::numeric::Float;

fn last_axis<T, D>(x: &ArrayView<T, D>, operation: &str) -> KernelResult<Axis>
where
    D: RemoveAxis,
{
    if x.ndim() == 0 {
        return Err(KernelError::empty_input(operation, "x"));
    }
    let axis = Axis(x.ndim() - 1);
    if x.len_of(axis) == 0 {
        return Err(KernelError::empty_input(operation, "x"));
    }
    Ok(axis)
}

/// Lehmer mean of power `p` along the last axis
///
/// `L_p(x) = Σxᵖ / Σxᵖ⁻¹`. At `p = 2` this is the contraharmonic mean. For
/// non-negative data `L_p` lies between the arithmetic mean and the maximum and
/// approaches the maximum as `p` grows.
///
/// A lane whose `p - 1` power sum is zero (all zeros) has Lehmer mean `0`.
///
/// # Errors
///
/// - `ConfigError::InvalidPower` if `p <= 1`
/// - `KernelError::EmptyInput` for a 0-d array or an empty last axis
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use liadrs_kernels::lehmer_mean;
///
/// let x = array![[1.0_f64, 2.0, 3.0], [4.0, 4.0, 4.0]];
/// let lm = lehmer_mean(&x.view(), 2.0).unwrap();
///
/// // (1 + 4 + 9) / (1 + 2 + 3)
/// assert!((lm[0] - 14.0 / 6.0).abs() < 1e-12);
/// assert!((lm[1] - 4.0).abs() < 1e-12);
/// ```
pub fn lehmer_mean<T, D>(x: &ArrayView<T, D>, p: T) -> KernelResult<Array<T, D::Smaller>>
where
    T: Float,
    D: RemoveAxis,
{
    // `!(p > 1)` also rejects NaN
    if !(p > T::one()) {
        return Err(ConfigError::InvalidPower(p.to_f64().unwrap_or(f64::NAN)).into());
    }
    let axis = last_axis(x, "lehmer_mean")?;
    let p_minus_one = p - T::one();

    Ok(x.map_axis(axis, |lane| {
        let (num, den) = lane.iter().fold((T::zero(), T::zero()), |(num, den), &v| {
            (num + v.powf(p), den + v.powf(p_minus_one))
        });
        if den == T::zero() && num == T::zero() {
            T::zero()
        } else {
            num / den
        }
    }))
}

/// Maximum along the last axis
pub fn max_last_axis<T, D>(x: &ArrayView<T, D>) -> KernelResult<Array<T, D::Smaller>>
where
    T: Float,
    D: RemoveAxis,
{
    let axis = last_axis(x, "max_last_axis")?;
    Ok(x.map_axis(axis, |lane| {
        lane.iter().fold(T::neg_infinity(), |acc, &v| {
            if v.is_nan() || acc.is_nan() {
                T::nan()
            } else {
                acc.max(v)
            }
        })
    }))
}

/// Peak-to-peak range (`max - min`) along the last axis
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use liadrs_kernels::ptp_last_axis;
///
/// let x = array![[3.0, -1.0, 2.0], [5.0, 5.0, 5.0]];
/// let r = ptp_last_axis(&x.view()).unwrap();
/// assert_eq!(r, array![4.0, 0.0]);
/// ```
pub fn ptp_last_axis<T, D>(x: &ArrayView<T, D>) -> KernelResult<Array<T, D::Smaller>>
where
    T: Float,
    D: RemoveAxis,
{
    let axis = last_axis(x, "ptp_last_axis")?;
    Ok(x.map_axis(axis, |lane| {
        let (lo, hi) = lane
            .iter()
            .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
                if v.is_nan() || lo.is_nan() {
                    (T::nan(), T::nan())
                } else {
                    (lo.min(v), hi.max(v))
                }
            });
        hi - lo
    }))
}

/// Quantile of a sorted, NaN-free slice with linear interpolation between order statistics
fn sorted_quantile<T>(sorted: &[T], q: f64) -> T
where
    T: Float,
{
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let index = q * (n - 1) as f64;
    let lower = index.floor() as usize;
    let upper = (index.ceil() as usize).min(n - 1);
    let fraction = T::from(index - index.floor()).unwrap_or_else(T::zero);

    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

fn sorted_lane<T>(lane: ArrayView1<T>) -> Option<Vec<T>>
where
    T: Float,
{
    if lane.iter().any(|v| v.is_nan()) {
        return None;
    }
    let mut values: Vec<T> = lane.to_vec();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(values)
}

/// Quantile `q ∈ [0, 1]` along the last axis (linear interpolation)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use liadrs_kernels::quantile_last_axis;
///
/// let x = array![[1.0, 2.0, 3.0, 4.0, 5.0]];
/// let q = quantile_last_axis(&x.view(), 0.25).unwrap();
/// assert_eq!(q[0], 2.0);
/// ```
pub fn quantile_last_axis<T, D>(x: &ArrayView<T, D>, q: f64) -> KernelResult<Array<T, D::Smaller>>
where
    T: Float,
    D: RemoveAxis,
{
    if !(0.0..=1.0).contains(&q) {
        return Err(ConfigError::InvalidQuantile(q).into());
    }
    let axis = last_axis(x, "quantile_last_axis")?;

    Ok(x.map_axis(axis, |lane| match sorted_lane(lane) {
        Some(sorted) => sorted_quantile(&sorted, q),
        None => T::nan(),
    }))
}

/// Range of the last axis according to `mode`
///
/// - [`PtpMode::Naive`]: `max - min`
/// - [`PtpMode::Quantile`]`(q)`: `Q(0.5 + 0.5q) - Q(0.5 - 0.5q)`
///
/// # Errors
///
/// `ConfigError::QuantileOutOfRange` if `q` is outside `(0, 1]`.
pub fn peak_to_range<T, D>(x: &ArrayView<T, D>, mode: PtpMode) -> KernelResult<Array<T, D::Smaller>>
where
    T: Float,
    D: RemoveAxis,
{
    mode.validate()?;
    match mode.quantile_levels() {
        None => ptp_last_axis(x),
        Some((lo, hi)) => {
            let axis = last_axis(x, "peak_to_range")?;
            Ok(x.map_axis(axis, |lane| match sorted_lane(lane) {
                Some(sorted) => sorted_quantile(&sorted, hi) - sorted_quantile(&sorted, lo),
                None => T::nan(),
            }))
        }
    }
}

/// Gap between the top two scores, or between a target score and the top score
///
/// Without `zi`, returns `(top - runner_up, None)`. With `zi`:
///
/// - if `score[zi]` is the top score, returns `(top - runner_up, Some(runner_up_index))`
/// - otherwise returns `(score[zi] - top, Some(top_index))`, which is ≤ 0
///
/// Ties follow a stable ascending sort, so among equal scores the one with the
/// highest index ranks first.
///
/// # Errors
///
/// - `KernelError::EmptyInput` if fewer than two scores are given
/// - `KernelError::NanInput` if any score is NaN
/// - `ShapeError::IndexOutOfRange` if `zi` is not a valid index
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use liadrs_kernels::top2gap;
///
/// let score = array![1.0, 5.0, 3.0];
///
/// assert_eq!(top2gap(&score.view(), None).unwrap(), (2.0, None));
/// assert_eq!(top2gap(&score.view(), Some(1)).unwrap(), (2.0, Some(2)));
/// assert_eq!(top2gap(&score.view(), Some(0)).unwrap(), (-4.0, Some(1)));
/// ```
pub fn top2gap<T>(score: &ArrayView1<T>, zi: Option<usize>) -> KernelResult<(T, Option<usize>)>
where
    T: Float,
{
    let n = score.len();
    if n < 2 {
        return Err(KernelError::empty_input("top2gap", "score"));
    }
    if let Some(index) = score.iter().position(|v| v.is_nan()) {
        return Err(KernelError::nan_input("top2gap", "score", index));
    }

    // NaN-free, so the comparison is total
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        score[i]
            .partial_cmp(&score[j])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let top = order[n - 1];
    let runner_up = order[n - 2];

    match zi {
        None => Ok((score[top] - score[runner_up], None)),
        Some(target) if target >= n => Err(ShapeError::IndexOutOfRange {
            index: target,
            len: n,
        }
        .into()),
        Some(target) if target == top => Ok((score[top] - score[runner_up], Some(runner_up))),
        Some(target) => Ok((score[target] - score[top], Some(top))),
    }
}
