//! Streaming metric interface

use crate::error::{MetricError, MetricResult};
use scirs2_core::ndarray_ext::ArrayD;
use std::collections::BTreeMap;

/// Named arrays passed to [`Metric::update_state`]
pub type NamedArrays<T> = BTreeMap<String, ArrayD<T>>;

/// A metric that accumulates batches and computes once over all of them
pub trait Metric<T> {
    /// Name used as the default key in a [`crate::MetricBundle`]
    fn name(&self) -> &str;

    /// Inputs required by [`Metric::update_state`]
    fn input_names(&self) -> &[&'static str];

    /// Accumulate one batch; every name in [`Metric::input_names`] must be present
    fn update_state(&mut self, inputs: &NamedArrays<T>) -> MetricResult<()>;

    /// Compute the metric over every accumulated batch
    fn compute(&self) -> MetricResult<ArrayD<T>>;

    /// Discard accumulated batches
    fn reset_state(&mut self);
}

impl<T, M> Metric<T> for Box<M>
where
    M: Metric<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn input_names(&self) -> &[&'static str] {
        (**self).input_names()
    }

    fn update_state(&mut self, inputs: &NamedArrays<T>) -> MetricResult<()> {
        (**self).update_state(inputs)
    }

    fn compute(&self) -> MetricResult<ArrayD<T>> {
        (**self).compute()
    }

    fn reset_state(&mut self) {
        (**self).reset_state()
    }
}

/// Look up a required input
pub(crate) fn required<'a, T>(
    metric: &str,
    inputs: &'a NamedArrays<T>,
    input: &str,
) -> MetricResult<&'a ArrayD<T>> {
    inputs.get(input).ok_or_else(|| MetricError::MissingInput {
        metric: metric.to_string(),
        input: input.to_string(),
    })
}
