//! Shape validation and canonicalization of latent/attribute batches
//!
//! Two layout contracts are supported:
//!
//! - **Attribute-only** ([`validate_za_shape`]): `z` is `(n_samples, n_features)`,
//!   `a` is `(n_samples,)` or `(n_samples, n_attributes)`.
//! - **Interpolation** ([`validate_interp_shape`]): `z` and `a` carry a trailing
//!   interpolation axis, `(n_samples, n_interp)` or `(n_samples, n_features | n_attributes, n_interp)`.
//!
//! The interpolation contract gathers `z` along `reg_dim`, so downstream kernels
//! see one grid per attribute and never index features again.

use crate::error::{GridError, KernelResult, ShapeError};
use scirs2_core::ndarray_ext::{s, Array2, Array3, ArrayView3, ArrayViewD, Axis, Ix2, Ix3};
use scirs2_core::numeric::Float;

/// Absolute tolerance used when comparing interpolation steps
pub const STEP_ATOL: f64 = 1e-8;

/// Relative tolerance used when comparing interpolation steps
pub const STEP_RTOL: f64 = 1e-5;

/// A validated batch laid out as `(n_samples, n_attributes, n_interp)`
///
/// `z[s, i, :]` is the interpolation grid of the latent dimension regularizing
/// attribute `i` for sample `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpBatch<T> {
    /// Latent grids gathered along `reg_dim`
    pub z: Array3<T>,
    /// Attribute responses
    pub a: Array3<T>,
    /// Regularization map used for the gather
    pub reg_dim: Vec<usize>,
}

impl<T> InterpBatch<T> {
    pub fn n_samples(&self) -> usize {
        self.a.len_of(Axis(0))
    }

    pub fn n_attributes(&self) -> usize {
        self.a.len_of(Axis(1))
    }

    pub fn n_interp(&self) -> usize {
        self.a.len_of(Axis(2))
    }
}

fn check_reg_dim(reg_dim: &[usize], n_attributes: usize, n_features: usize) -> KernelResult<()> {
    if reg_dim.len() != n_attributes {
        return Err(ShapeError::RegDimLength {
            expected: n_attributes,
            actual: reg_dim.len(),
        }
        .into());
    }

    if let Some((position, &value)) = reg_dim.iter().enumerate().find(|(_, &d)| d >= n_features) {
        return Err(ShapeError::RegDimOutOfRange {
            position,
            value,
            features: n_features,
        }
        .into());
    }

    Ok(())
}

/// Validate the attribute-only layout
///
/// A 1-D `a` is promoted to `(n_samples, 1)`. When `reg_dim` is `None` and
/// `fill_reg_dim` is set, the identity map is returned.
///
/// # Errors
///
/// Returns a [`ShapeError`] if `a` has rank > 2, `z` is not 2-D, sample counts
/// differ, `z` has fewer features than `a` has attributes, or `reg_dim` is
/// malformed.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use liadrs_kernels::validate_za_shape;
///
/// let z = Array::<f64, _>::zeros(vec![8, 4]);
/// let a = Array::<f64, _>::zeros(vec![8]);
///
/// let (z, a, reg_dim) = validate_za_shape(&z.view(), &a.view(), None, true).unwrap();
/// assert_eq!(z.shape(), &[8, 4]);
/// assert_eq!(a.shape(), &[8, 1]);
/// assert_eq!(reg_dim, Some(vec![0]));
/// ```
#[allow(clippy::type_complexity)]
pub fn validate_za_shape<T>(
    z: &ArrayViewD<T>,
    a: &ArrayViewD<T>,
    reg_dim: Option<&[usize]>,
    fill_reg_dim: bool,
) -> KernelResult<(Array2<T>, Array2<T>, Option<Vec<usize>>)>
where
    T: Clone,
{
    let a = match a.ndim() {
        1 => a.view().insert_axis(Axis(1)),
        2 => a.view(),
        actual => {
            return Err(ShapeError::Rank {
                name: "a",
                expected: "1 or 2",
                actual,
            }
            .into())
        }
    };

    if z.ndim() != 2 {
        return Err(ShapeError::Rank {
            name: "z",
            expected: "2",
            actual: z.ndim(),
        }
        .into());
    }

    let a_rank = a.ndim();
    let z = z
        .view()
        .into_dimensionality::<Ix2>()
        .map_err(|_| ShapeError::Rank {
            name: "z",
            expected: "2",
            actual: 2,
        })?;
    let a = a.into_dimensionality::<Ix2>().map_err(|_| ShapeError::Rank {
        name: "a",
        expected: "1 or 2",
        actual: a_rank,
    })?;

    let (n_samples_z, n_features) = z.dim();
    let (n_samples_a, n_attributes) = a.dim();

    if n_samples_z != n_samples_a {
        return Err(ShapeError::SampleMismatch {
            z: n_samples_z,
            a: n_samples_a,
        }
        .into());
    }

    if n_features < n_attributes {
        return Err(ShapeError::TooFewFeatures {
            features: n_features,
            attributes: n_attributes,
        }
        .into());
    }

    let reg_dim = match reg_dim {
        Some(dims) => {
            check_reg_dim(dims, n_attributes, n_features)?;
            Some(dims.to_vec())
        }
        None if fill_reg_dim => Some((0..n_attributes).collect()),
        None => None,
    };

    Ok((z.to_owned(), a.to_owned(), reg_dim))
}

fn promote_interp<'a, T>(
    x: &ArrayViewD<'a, T>,
    name: &'static str,
) -> KernelResult<ArrayView3<'a, T>> {
    let rank_error = |actual| ShapeError::Rank {
        name,
        expected: "2 or 3",
        actual,
    };

    let promoted = match x.ndim() {
        2 => x.clone().insert_axis(Axis(1)),
        3 => x.clone(),
        actual => return Err(rank_error(actual).into()),
    };

    promoted
        .into_dimensionality::<Ix3>()
        .map_err(|_| rank_error(x.ndim()).into())
}

/// Validate the interpolation layout and gather `z` along `reg_dim`
///
/// 2-D inputs gain a unit feature/attribute axis at position 1. When `reg_dim`
/// is `None` the identity map is used.
///
/// # Arguments
///
/// * `z` - Latent batch, `(n_samples, n_interp)` or `(n_samples, n_features, n_interp)`
/// * `a` - Attribute batch, `(n_samples, n_interp)` or `(n_samples, n_attributes, n_interp)`
/// * `reg_dim` - Attribute `i` is regularized by feature `reg_dim[i]`
/// * `min_size` - Minimum number of interpolation points
///
/// # Errors
///
/// Returns a [`ShapeError`] on any layout violation. Nothing is computed on failure.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::Array;
/// use liadrs_kernels::validate_interp_shape;
///
/// let z = Array::<f64, _>::zeros(vec![4, 3, 5]);
/// let a = Array::<f64, _>::zeros(vec![4, 2, 5]);
///
/// let batch = validate_interp_shape(&z.view(), &a.view(), Some(&[2, 0]), 3).unwrap();
/// assert_eq!(batch.z.shape(), &[4, 2, 5]);
/// assert_eq!(batch.reg_dim, vec![2, 0]);
/// ```
pub fn validate_interp_shape<T>(
    z: &ArrayViewD<T>,
    a: &ArrayViewD<T>,
    reg_dim: Option<&[usize]>,
    min_size: usize,
) -> KernelResult<InterpBatch<T>>
where
    T: Clone,
{
    let a3 = promote_interp(a, "a")?;
    let z3 = promote_interp(z, "z")?;

    let (n_samples_z, n_features, n_interp_z) = z3.dim();
    let (n_samples_a, n_attributes, n_interp) = a3.dim();

    if n_samples_z != n_samples_a {
        return Err(ShapeError::SampleMismatch {
            z: n_samples_z,
            a: n_samples_a,
        }
        .into());
    }

    if n_features < n_attributes {
        return Err(ShapeError::TooFewFeatures {
            features: n_features,
            attributes: n_attributes,
        }
        .into());
    }

    if n_interp_z != n_interp {
        return Err(ShapeError::InterpMismatch {
            z: n_interp_z,
            a: n_interp,
        }
        .into());
    }

    if n_interp < min_size {
        return Err(ShapeError::InterpTooShort {
            actual: n_interp,
            min: min_size,
        }
        .into());
    }

    let reg_dim = match reg_dim {
        Some(dims) => {
            check_reg_dim(dims, n_attributes, n_features)?;
            dims.to_vec()
        }
        None => (0..n_attributes).collect(),
    };

    let z_reg = z3.select(Axis(1), &reg_dim);

    log::trace!(
        "validated interp batch: z {:?} -> {:?}, a {:?}",
        z3.shape(),
        z_reg.shape(),
        a3.shape()
    );

    Ok(InterpBatch {
        z: z_reg,
        a: a3.to_owned(),
        reg_dim,
    })
}

/// Fail if any `(sample, attribute)` grid is constant along the interpolation axis
pub fn validate_non_constant_interp<T>(z: &ArrayView3<T>) -> KernelResult<()>
where
    T: Float,
{
    let (n_samples, n_attributes, _) = z.dim();

    for sample in 0..n_samples {
        for attribute in 0..n_attributes {
            let grid = z.slice(s![sample, attribute, ..]);
            let first = match grid.first() {
                Some(&v) => v,
                None => continue,
            };
            if grid.iter().all(|&v| v == first) {
                return Err(GridError::Constant { sample, attribute }.into());
            }
        }
    }
    Ok(())
}

/// Fail unless every grid has equal consecutive steps
///
/// Each step `d_k` must satisfy `|d_k - d_0| <= STEP_ATOL + STEP_RTOL * |d_0|`.
pub fn validate_equal_interp_deltas<T>(z: &ArrayView3<T>) -> KernelResult<()>
where
    T: Float,
{
    let atol = T::from(STEP_ATOL).unwrap_or_else(T::epsilon);
    let rtol = T::from(STEP_RTOL).unwrap_or_else(T::epsilon);
    let (n_samples, n_attributes, n_interp) = z.dim();

    if n_interp < 3 {
        return Ok(());
    }

    for sample in 0..n_samples {
        for attribute in 0..n_attributes {
            let d0 = z[[sample, attribute, 1]] - z[[sample, attribute, 0]];
            for step in 1..n_interp - 1 {
                let dk = z[[sample, attribute, step + 1]] - z[[sample, attribute, step]];
                // NaN steps fail the comparison and are reported
                if !((dk - d0).abs() <= atol + rtol * d0.abs()) {
                    return Err(GridError::UnequalSpacing {
                        sample,
                        attribute,
                        step,
                    }
                    .into());
                }
            }
        }
    }

    Ok(())
}
