//! # liadrs-metrics
//!
//! Interpolatability statistics for latent spaces: how smoothly and how
//! monotonically an attribute responds when its regularizing latent
//! dimension is swept.
//!
//! ## Overview
//!
//! - [`smoothness`] - `1 - C[|D²|] / (R[D¹] / δ)`, 1 for a linear response
//! - [`monotonicity`] - signed fraction of non-noise steps, in `[-1, 1]`
//! - [`Smoothness`] / [`Monotonicity`] - streaming versions that buffer batches
//! - [`MetricBundle`] - several metrics sharing one update call
//! - [`AdaptedMetric`] - any metric behind a [`TensorAdapter`]
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array3;
//! use liadrs_metrics::{monotonicity, smoothness, MonotonicityOptions, SmoothnessOptions};
//!
//! // 8 samples, 2 latent features swept over 10 points
//! let z = Array3::from_shape_fn((8, 2, 10), |(s, f, k)| 0.1 * s as f64 + f as f64 + 0.5 * k as f64);
//! // Attribute 0 is linear in feature 0, attribute 1 is cubic in feature 1
//! let a = Array3::from_shape_fn((8, 2, 10), |(s, f, k)| {
//!     let v = z[[s, f, k]];
//!     if f == 0 { 2.0 * v } else { v * v * v }
//! });
//!
//! let smth = smoothness(&z.view().into_dyn(), &a.view().into_dyn(), &SmoothnessOptions::default()).unwrap();
//! assert_eq!(smth[[0]], 1.0);
//! assert!(smth[[1]] < 1.0);
//!
//! let mono = monotonicity(&z.view().into_dyn(), &a.view().into_dyn(), &MonotonicityOptions::default()).unwrap();
//! assert_eq!(mono.as_slice().unwrap(), &[1.0, 1.0]);
//! ```
//!
//! ## Errors
//!
//! Every entry point returns [`MetricResult`]. Options are validated before
//! shapes, and shapes before any arithmetic, so a failing call never produces
//! partial output. Kernel errors pass through unchanged inside
//! [`MetricError::Kernel`].
//!
//! ## Features
//!
//! - `serde` - `Serialize`/`Deserialize` for the options and mode enums

pub mod adapter;
pub mod bundle;
pub mod error;
pub mod interpolatability;
pub mod metric;
pub mod monotonicity;
pub mod options;
pub mod smoothness;
pub mod state;

#[cfg(test)]
mod property_tests;

// Re-exports
pub use adapter::{AdaptedMetric, HostAdapter, HostTensor, TensorAdapter};
pub use bundle::MetricBundle;
pub use error::{MetricError, MetricResult};
pub use interpolatability::{Monotonicity, Smoothness};
pub use metric::{Metric, NamedArrays};
pub use monotonicity::{monotonicity, monotonicity_from_liad};
pub use options::{MonotonicityOptions, SmoothnessOptions};
pub use smoothness::{smoothness, smoothness_from_liads};
pub use state::MetricState;

pub use liadrs_kernels::{KernelError, LiadMode, MaxMode, PtpMode, ReduceMode};
