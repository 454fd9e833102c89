//! Axis reductions of `(n_samples, n_attributes)` result matrices
//!
//! - [`reduce`] takes the plain mean; NaN anywhere in a slice makes it NaN.
//! - [`nanreduce`] skips NaN entries; a slice that is entirely NaN stays NaN.
//!
//! Results are dynamic-rank: `(n_attributes,)`, `(n_samples,)`, 0-d, or the
//! unreduced matrix, depending on [`ReduceMode`].

use crate::modes::ReduceMode;
use scirs2_core::ndarray_ext::{ArrayD, ArrayView1, ArrayView2, Axis, IxDyn};
use scirs2_core::numeric::Float;

fn lane_mean<'a, T, I>(values: I, skip_nan: bool) -> T
where
    T: Float + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| !(skip_nan && v.is_nan()))
        .fold((T::zero(), 0usize), |(sum, count), &v| (sum + v, count + 1));

    if count == 0 {
        return T::nan();
    }
    T::from(count).map_or_else(T::nan, |n| sum / n)
}

fn reduce_with<T>(matrix: &ArrayView2<T>, mode: ReduceMode, skip_nan: bool) -> ArrayD<T>
where
    T: Float,
{
    let mean = |lane: ArrayView1<T>| lane_mean(lane.iter(), skip_nan);

    match mode {
        ReduceMode::Attribute => matrix.map_axis(Axis(0), mean).into_dyn(),
        ReduceMode::Sample => matrix.map_axis(Axis(1), mean).into_dyn(),
        ReduceMode::All => ArrayD::from_elem(IxDyn(&[]), lane_mean(matrix.iter(), skip_nan)),
        ReduceMode::None => matrix.to_owned().into_dyn(),
    }
}

/// Mean-reduce a `(n_samples, n_attributes)` matrix
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use liadrs_kernels::{reduce, ReduceMode};
///
/// let m = array![[1.0, 2.0], [3.0, 4.0]];
///
/// assert_eq!(reduce(&m.view(), ReduceMode::Attribute).as_slice().unwrap(), &[2.0, 3.0]);
/// assert_eq!(reduce(&m.view(), ReduceMode::Sample).as_slice().unwrap(), &[1.5, 3.5]);
/// assert_eq!(reduce(&m.view(), ReduceMode::All).ndim(), 0);
/// assert_eq!(reduce(&m.view(), ReduceMode::None).shape(), &[2, 2]);
/// ```
pub fn reduce<T>(matrix: &ArrayView2<T>, mode: ReduceMode) -> ArrayD<T>
where
    T: Float,
{
    reduce_with(matrix, mode, false)
}

/// NaN-skipping mean-reduce of a `(n_samples, n_attributes)` matrix
///
/// [`ReduceMode::None`] returns the matrix unchanged, NaNs included.
pub fn nanreduce<T>(matrix: &ArrayView2<T>, mode: ReduceMode) -> ArrayD<T>
where
    T: Float,
{
    reduce_with(matrix, mode, true)
}
