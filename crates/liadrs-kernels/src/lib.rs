//! # liadrs-kernels
//!
//! Numerical kernels for latent-induced attribute difference (LIAD) diagnostics.
//!
//! ## Overview
//!
//! Given batches of latent interpolation grids `z` and the attributes `a`
//! measured along them, this crate provides the pure array-in/array-out
//! building blocks that the smoothness and monotonicity statistics are made of.
//!
//! **Key Features:**
//! - **Shape validation** - Canonicalizes 2-D/3-D batches and gathers `z` along `reg_dim`
//! - **Grid checks** - Rejects constant grids and unevenly spaced grids
//! - **LIAD engine** - Forward finite differences of any order over the interpolation axis
//! - **Lehmer mean** - Smooth power-mean proxy for the maximum
//! - **Range estimators** - Peak-to-peak and outlier-trimmed quantile ranges
//! - **Top-two gap** - Score margin between the best and the runner-up
//! - **Reductions** - Attribute/sample/all means, with NaN-skipping variants
//!
//! ## Layout
//!
//! Every kernel assumes the interpolation axis is the **last** axis. Validated
//! batches are `(n_samples, n_attributes, n_interp)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array3;
//! use liadrs_kernels::{lehmer_mean, liad, validate_interp_shape, LiadMode};
//!
//! // 4 samples, 2 latent features, 6 interpolation points
//! let z = Array3::from_shape_fn((4, 2, 6), |(s, f, k)| s as f64 + f as f64 + 0.5 * k as f64);
//! let a = z.mapv(|v| v * v);
//!
//! let batch = validate_interp_shape(&z.view().into_dyn(), &a.view().into_dyn(), None, 3).unwrap();
//! let orders = liad(&batch.z.view(), &batch.a.view(), 2, LiadMode::Forward).unwrap();
//! assert_eq!(orders[1].values.shape(), &[4, 2, 4]);
//!
//! // Quadratic response: constant curvature of 2
//! let curvature = lehmer_mean(&orders[1].values.mapv(f64::abs).view(), 2.0).unwrap();
//! assert!(curvature.iter().all(|&c| (c - 2.0).abs() < 1e-9));
//! ```
//!
//! ## Errors
//!
//! Every fallible kernel returns [`KernelResult`]. Shape and configuration
//! problems are detected before any arithmetic runs. Numerical edge cases
//! (0/0, all-zero lanes) are not errors; each kernel documents what it returns.
//!
//! ## SciRS2 Integration
//!
//! All array operations go through `scirs2_core::ndarray_ext` and numeric traits
//! through `scirs2_core::numeric`.

pub mod aggregation;
pub mod error;
pub mod liad;
pub mod modes;
pub mod reductions;
pub mod validation;


// Re-exports
pub use aggregation::*;
pub use error::{ConfigError, GridError, KernelError, KernelResult, ShapeError};
pub use liad::*;
pub use modes::*;
pub use reductions::*;
pub use validation::*;
