//! # liadrs - Latent Interpolatability Diagnostics
//!
//! Measures how well a latent space controls the attributes it is meant to
//! disentangle: sweep a latent dimension, measure the attribute it regularizes,
//! and score the response for **smoothness** and **monotonicity** using
//! latent-induced attribute differences (LIAD).
//!
//! This is the **meta crate** that re-exports all liadrs components for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use liadrs::prelude::*;
//! use scirs2_core::ndarray_ext::Array3;
//!
//! // 16 samples, one latent feature swept over 8 points, one attribute
//! let z = Array3::from_shape_fn((16, 1, 8), |(s, _, k)| s as f64 * 0.125 + 0.25 * k as f64);
//! let a = z.mapv(|v| 4.0 * v - 2.0);
//!
//! let smth = smoothness(&z.view().into_dyn(), &a.view().into_dyn(), &SmoothnessOptions::default())?;
//! let mono = monotonicity(&z.view().into_dyn(), &a.view().into_dyn(), &MonotonicityOptions::default())?;
//! assert_eq!(smth[[0]], 1.0);
//! assert_eq!(mono[[0]], 1.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Kernels ([`kernels`])
//!
//! Shape validation, the LIAD finite-difference engine, Lehmer mean,
//! peak-to-range estimators, top-two gap and axis reductions.
//!
//! ```
//! use liadrs::kernels::top2gap;
//! use scirs2_core::ndarray_ext::array;
//!
//! let (gap, runner_up) = top2gap(&array![1.0, 5.0, 3.0].view(), None).unwrap();
//! assert_eq!(gap, 2.0);
//! assert_eq!(runner_up, None);
//! ```
//!
//! ### Metrics ([`metrics`])
//!
//! The smoothness and monotonicity statistics, their options, streaming
//! accumulators, metric bundles and tensor adapters.
//!
//! ```
//! use liadrs::metrics::{Metric, Smoothness};
//! use scirs2_core::ndarray_ext::Array3;
//!
//! let mut metric = Smoothness::<f64>::default();
//! let z = Array3::from_shape_fn((2, 1, 4), |(s, _, k)| (s + k) as f64);
//! metric.update_batch(&z.view().into_dyn(), &z.mapv(|v| -v).view().into_dyn()).unwrap();
//! assert_eq!(metric.compute().unwrap()[[0]], 1.0);
//! ```
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for options and mode enums

pub use liadrs_kernels as kernels;
pub use liadrs_metrics as metrics;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use liadrs::prelude::*;
    //!
    //! let options = SmoothnessOptions::new().with_reduce_mode(ReduceMode::Sample);
    //! assert!(options.validate().is_ok());
    //! ```

    // Statistics
    pub use crate::metrics::{
        monotonicity, smoothness, MonotonicityOptions, SmoothnessOptions,
    };

    // Streaming
    pub use crate::metrics::{
        AdaptedMetric, HostAdapter, HostTensor, Metric, MetricBundle, Monotonicity, NamedArrays,
        Smoothness, TensorAdapter,
    };

    // Modes
    pub use crate::kernels::{LiadMode, MaxMode, PtpMode, ReduceMode};

    // Errors
    pub use crate::kernels::{KernelError, KernelResult};
    pub use crate::metrics::{MetricError, MetricResult};

    // Kernels
    pub use crate::kernels::{lehmer_mean, liad, peak_to_range, top2gap};
}
