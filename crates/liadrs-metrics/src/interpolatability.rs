//! Streaming smoothness and monotonicity metrics
//!
//! Both metrics buffer `(z, a)` batches and run a single call into the pure
//! statistic over the concatenated batches when computed.
//!
//! ```
//! use scirs2_core::ndarray_ext::Array3;
//! use liadrs_metrics::{Metric, Monotonicity, MonotonicityOptions};
//!
//! let mut metric = Monotonicity::<f64>::new(MonotonicityOptions::default()).unwrap();
//! for offset in 0..3 {
//!     let z = Array3::from_shape_fn((2, 1, 4), |(s, _, k)| (offset + s + k) as f64);
//!     let a = z.mapv(|v| 2.0 * v);
//!     metric.update_batch(&z.view().into_dyn(), &a.view().into_dyn()).unwrap();
//! }
//!
//! assert_eq!(metric.compute().unwrap().as_slice().unwrap(), &[1.0]);
//! metric.reset_state();
//! assert!(metric.compute().is_err());
//! ```

use crate::error::MetricResult;
use crate::metric::{required, Metric, NamedArrays};
use crate::monotonicity::monotonicity;
use crate::options::{MonotonicityOptions, SmoothnessOptions};
use crate::smoothness::smoothness;
use crate::state::MetricState;
use scirs2_core::ndarray_ext::{ArrayD, ArrayViewD};
use scirs2_core::numeric::Float;

const LATENT: &str = "z";
const ATTRIBUTE: &str = "a";
const INPUTS: &[&str] = &[LATENT, ATTRIBUTE];

fn latent_attribute_state<T: Clone>() -> MetricState<T> {
    let mut state = MetricState::new();
    state.add_state(LATENT, Vec::new());
    state.add_state(ATTRIBUTE, Vec::new());
    state
}

fn append_batch<T: Clone>(
    state: &mut MetricState<T>,
    z: &ArrayViewD<T>,
    a: &ArrayViewD<T>,
) -> MetricResult<()> {
    state.append(LATENT, z.to_owned())?;
    state.append(ATTRIBUTE, a.to_owned())
}

fn update_from_inputs<T: Clone>(
    metric: &str,
    state: &mut MetricState<T>,
    inputs: &NamedArrays<T>,
) -> MetricResult<()> {
    let z = required(metric, inputs, LATENT)?;
    let a = required(metric, inputs, ATTRIBUTE)?;
    append_batch(state, &z.view(), &a.view())
}

/// Streaming latent smoothness
#[derive(Debug, Clone)]
pub struct Smoothness<T> {
    options: SmoothnessOptions,
    state: MetricState<T>,
}

impl<T: Float> Smoothness<T> {
    /// Create the metric; options are validated here, not at compute time
    pub fn new(options: SmoothnessOptions) -> MetricResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            state: latent_attribute_state(),
        })
    }

    pub fn options(&self) -> &SmoothnessOptions {
        &self.options
    }

    pub fn state(&self) -> &MetricState<T> {
        &self.state
    }

    /// Buffer one batch of latent grids and attributes
    pub fn update_batch(&mut self, z: &ArrayViewD<T>, a: &ArrayViewD<T>) -> MetricResult<()> {
        append_batch(&mut self.state, z, a)
    }
}

impl<T: Float> Default for Smoothness<T> {
    fn default() -> Self {
        Self {
            options: SmoothnessOptions::default(),
            state: latent_attribute_state(),
        }
    }
}

impl<T: Float> Metric<T> for Smoothness<T> {
    fn name(&self) -> &str {
        "Smoothness"
    }

    fn input_names(&self) -> &[&'static str] {
        INPUTS
    }

    fn update_state(&mut self, inputs: &NamedArrays<T>) -> MetricResult<()> {
        update_from_inputs("Smoothness", &mut self.state, inputs)
    }

    fn compute(&self) -> MetricResult<ArrayD<T>> {
        let z = self.state.concatenated(LATENT)?;
        let a = self.state.concatenated(ATTRIBUTE)?;
        smoothness(&z.view(), &a.view(), &self.options)
    }

    fn reset_state(&mut self) {
        self.state.reset();
    }
}

/// Streaming latent monotonicity
#[derive(Debug, Clone)]
pub struct Monotonicity<T> {
    options: MonotonicityOptions,
    state: MetricState<T>,
}

impl<T: Float> Monotonicity<T> {
    /// Create the metric; options are validated here, not at compute time
    pub fn new(options: MonotonicityOptions) -> MetricResult<Self> {
        options.validate()?;
        Ok(Self {
            options,
            state: latent_attribute_state(),
        })
    }

    pub fn options(&self) -> &MonotonicityOptions {
        &self.options
    }

    pub fn state(&self) -> &MetricState<T> {
        &self.state
    }

    /// Buffer one batch of latent grids and attributes
    pub fn update_batch(&mut self, z: &ArrayViewD<T>, a: &ArrayViewD<T>) -> MetricResult<()> {
        append_batch(&mut self.state, z, a)
    }
}

impl<T: Float> Default for Monotonicity<T> {
    fn default() -> Self {
        Self {
            options: MonotonicityOptions::default(),
            state: latent_attribute_state(),
        }
    }
}

impl<T: Float> Metric<T> for Monotonicity<T> {
    fn name(&self) -> &str {
        "Monotonicity"
    }

    fn input_names(&self) -> &[&'static str] {
        INPUTS
    }

    fn update_state(&mut self, inputs: &NamedArrays<T>) -> MetricResult<()> {
        update_from_inputs("Monotonicity", &mut self.state, inputs)
    }

    fn compute(&self) -> MetricResult<ArrayD<T>> {
        let z = self.state.concatenated(LATENT)?;
        let a = self.state.concatenated(ATTRIBUTE)?;
        monotonicity(&z.view(), &a.view(), &self.options)
    }

    fn reset_state(&mut self) {
        self.state.reset();
    }
}
