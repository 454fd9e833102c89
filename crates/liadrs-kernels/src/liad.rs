//! Latent-induced attribute differences (LIAD)
//!
//! LIAD is the finite-difference derivative of an attribute with respect to a
//! step along the latent dimension regularizing it. For the forward scheme
//!
//! ```text
//! D¹[k] = (a[k+1] - a[k]) / (z[k+1] - z[k])
//! Dⁿ[k] = (Dⁿ⁻¹[k+1] - Dⁿ⁻¹[k]) / (z[k+1] - z[k])
//! ```
//!
//! Every order divides by the spacing of the *original* grid, so each order
//! shrinks the interpolation axis by one and keeps `step[..., k] = z[k+1] - z[k]`.
//!
//! All arrays here are `(n_samples, n_attributes, n_interp)` with `z` already
//! gathered along `reg_dim` (see [`crate::validate_interp_shape`]).

use crate::error::{ConfigError, KernelError, KernelResult, ShapeError};
use crate::modes::LiadMode;
use scirs2_core::ndarray_ext::{s, Array2, Array3, ArrayView3, Axis};
use scirs2_core::numeric::Float;

/// One order of LIAD together with the grid spacing it was divided by
#[derive(Debug, Clone, PartialEq)]
pub struct LiadOrder<T> {
    /// Derivative order, starting at 1
    pub order: usize,
    /// Derivative values, `(n_samples, n_attributes, n_interp - order)`
    pub values: Array3<T>,
    /// Grid spacing aligned with `values`
    pub step: Array3<T>,
}

/// Forward difference along the last axis
fn forward_diff<T>(x: &ArrayView3<T>) -> Array3<T>
where
    T: Float,
{
    &x.slice(s![.., .., 1..]) - &x.slice(s![.., .., ..-1])
}

/// Compute LIAD of orders `1..=order`
///
/// # Arguments
///
/// * `z` - Latent grids, `(n_samples, n_attributes, n_interp)`
/// * `a` - Attributes, same shape as `z`
/// * `order` - Highest derivative order
/// * `mode` - Finite-difference scheme
///
/// # Errors
///
/// - `ConfigError::ZeroOrder` if `order == 0`
/// - `ShapeError` if `z` and `a` differ in shape or `n_interp <= order`
/// - `KernelError::Unsupported` for any scheme other than [`LiadMode::Forward`]
///
/// # Complexity
///
/// Time: O(order × tensor_size)
/// Space: O(order × tensor_size)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array3;
/// use liadrs_kernels::{liad, LiadMode};
///
/// let z = Array3::from_shape_fn((1, 1, 5), |(_, _, k)| k as f64);
/// let a = z.mapv(|v| v * v);
///
/// let orders = liad(&z.view(), &a.view(), 2, LiadMode::Forward).unwrap();
/// assert_eq!(orders.len(), 2);
/// assert_eq!(orders[0].values.shape(), &[1, 1, 4]);
/// assert_eq!(orders[1].values.shape(), &[1, 1, 3]);
///
/// // (k+1)^2 - k^2 = 2k + 1, whose forward difference is 2
/// assert_eq!(orders[0].values[[0, 0, 2]], 5.0);
/// assert!(orders[1].values.iter().all(|&v| v == 2.0));
/// ```
pub fn liad<T>(
    z: &ArrayView3<T>,
    a: &ArrayView3<T>,
    order: usize,
    mode: LiadMode,
) -> KernelResult<Vec<LiadOrder<T>>>
where
    T: Float,
{
    if order == 0 {
        return Err(ConfigError::ZeroOrder.into());
    }

    if z.shape() != a.shape() {
        return Err(ShapeError::Incompatible {
            left: z.shape().to_vec(),
            right: a.shape().to_vec(),
        }
        .into());
    }

    let n_interp = a.len_of(Axis(2));
    if n_interp <= order {
        return Err(ShapeError::InterpTooShort {
            actual: n_interp,
            min: order + 1,
        }
        .into());
    }

    match mode {
        LiadMode::Forward => Ok(forward_liad(z, a, order)),
        other => Err(KernelError::unsupported("liad", other.as_str())),
    }
}

fn forward_liad<T>(z: &ArrayView3<T>, a: &ArrayView3<T>, order: usize) -> Vec<LiadOrder<T>>
where
    T: Float,
{
    let dz = forward_diff(z);
    let mut orders = Vec::with_capacity(order);
    let mut current = a.to_owned();

    for n in 1..=order {
        let da = forward_diff(&current.view());
        let len = da.len_of(Axis(2));
        let step = dz.slice(s![.., .., ..len]).to_owned();
        let values = &da / &step;

        log::trace!("forward LIAD order {}: {:?}", n, values.shape());

        orders.push(LiadOrder {
            order: n,
            values: values.clone(),
            step,
        });
        current = values;
    }

    orders
}

/// Compute a single LIAD order
///
/// Equivalent to the last entry of [`liad`].
pub fn liad_order<T>(
    z: &ArrayView3<T>,
    a: &ArrayView3<T>,
    order: usize,
    mode: LiadMode,
) -> KernelResult<LiadOrder<T>>
where
    T: Float,
{
    liad(z, a, order, mode)?
        .pop()
        .ok_or_else(|| ConfigError::ZeroOrder.into())
}

/// Spacing between the first two interpolation points, `(n_samples, n_attributes)`
///
/// On a uniform grid this is the single scalar step of each `(sample, attribute)` grid.
pub fn grid_interval<T>(z: &ArrayView3<T>) -> KernelResult<Array2<T>>
where
    T: Float,
{
    let n_interp = z.len_of(Axis(2));
    if n_interp < 2 {
        return Err(ShapeError::InterpTooShort {
            actual: n_interp,
            min: 2,
        }
        .into());
    }

    Ok(&z.index_axis(Axis(2), 1) - &z.index_axis(Axis(2), 0))
}
