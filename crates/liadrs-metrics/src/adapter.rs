//! Tensor adapters
//!
//! Metrics work on host arrays. A [`TensorAdapter`] converts some other tensor
//! type to and from [`ArrayD`], and [`AdaptedMetric`] applies it around any
//! [`Metric`] so callers can feed their own tensors directly.
//!
//! [`HostAdapter`] is the built-in adapter for [`HostTensor`], a flat buffer
//! with a shape.

use crate::error::{MetricError, MetricResult};
use crate::metric::{Metric, NamedArrays};
use scirs2_core::ndarray_ext::{ArrayD, IxDyn};
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Conversion between a tensor type and host arrays
pub trait TensorAdapter<T> {
    type Tensor;

    /// Materialize a tensor as an array
    ///
    /// Fails with [`MetricError::NotMaterialized`] when the tensor's values are
    /// not available on the host.
    fn to_array(&self, tensor: &Self::Tensor) -> MetricResult<ArrayD<T>>;

    /// Wrap an array as a tensor
    fn from_array(&self, array: ArrayD<T>) -> Self::Tensor;
}

/// Row-major flat buffer with a shape
///
/// The buffer length is not checked against the shape until the tensor is
/// materialized.
#[derive(Debug, Clone, PartialEq)]
pub struct HostTensor<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> HostTensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Self {
        Self { shape, data }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_parts(self) -> (Vec<usize>, Vec<T>) {
        (self.shape, self.data)
    }
}

/// Adapter for [`HostTensor`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostAdapter;

impl<T: Clone> TensorAdapter<T> for HostAdapter {
    type Tensor = HostTensor<T>;

    fn to_array(&self, tensor: &HostTensor<T>) -> MetricResult<ArrayD<T>> {
        ArrayD::from_shape_vec(IxDyn(&tensor.shape), tensor.data.clone()).map_err(|e| {
            MetricError::NotMaterialized(format!(
                "{} values for shape {:?}: {}",
                tensor.data.len(),
                tensor.shape,
                e
            ))
        })
    }

    fn from_array(&self, array: ArrayD<T>) -> HostTensor<T> {
        let shape = array.shape().to_vec();
        let data = array.iter().cloned().collect();
        HostTensor { shape, data }
    }
}

/// A [`Metric`] fed and read through a [`TensorAdapter`]
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use liadrs_metrics::{AdaptedMetric, HostAdapter, HostTensor, Monotonicity};
///
/// let mut metric = AdaptedMetric::new(HostAdapter, Monotonicity::<f64>::default());
///
/// let mut inputs = BTreeMap::new();
/// inputs.insert("z".to_string(), HostTensor::new(vec![1, 4], vec![0.0, 1.0, 2.0, 3.0]));
/// inputs.insert("a".to_string(), HostTensor::new(vec![1, 4], vec![5.0, 3.0, 1.0, 0.0]));
/// metric.update_state(&inputs).unwrap();
///
/// let result = metric.result().unwrap();
/// assert_eq!(result.shape(), &[1]);
/// assert_eq!(result.data(), &[-1.0]);
/// ```
pub struct AdaptedMetric<T, A, M> {
    adapter: A,
    metric: M,
    _element: PhantomData<T>,
}

impl<T, A, M> AdaptedMetric<T, A, M>
where
    A: TensorAdapter<T>,
    M: Metric<T>,
{
    pub fn new(adapter: A, metric: M) -> Self {
        Self {
            adapter,
            metric,
            _element: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.metric.name()
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    pub fn metric_mut(&mut self) -> &mut M {
        &mut self.metric
    }

    pub fn into_inner(self) -> M {
        self.metric
    }

    /// Convert the inputs the metric declares and update it
    ///
    /// Undeclared inputs are neither converted nor checked. Nothing is
    /// buffered if any conversion fails.
    pub fn update_state(&mut self, inputs: &BTreeMap<String, A::Tensor>) -> MetricResult<()> {
        let mut arrays = NamedArrays::new();
        for (name, tensor) in inputs {
            if self.metric.input_names().iter().any(|n| *n == name.as_str()) {
                arrays.insert(name.clone(), self.adapter.to_array(tensor)?);
            }
        }
        self.metric.update_state(&arrays)
    }

    /// Compute the metric and convert the result back to a tensor
    pub fn result(&self) -> MetricResult<A::Tensor> {
        Ok(self.adapter.from_array(self.metric.compute()?))
    }

    pub fn reset_state(&mut self) {
        self.metric.reset_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpolatability::Smoothness;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_host_round_trip() {
        let adapter = HostAdapter;
        let array = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]].into_dyn();

        let tensor = adapter.from_array(array.clone());
        assert_eq!(tensor.shape(), &[2, 3]);
        assert_eq!(tensor.data(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(adapter.to_array(&tensor).unwrap(), array);
    }

    #[test]
    fn test_from_transposed_array_is_row_major() {
        let array = array![[1.0, 2.0], [3.0, 4.0]].reversed_axes().into_dyn();
        let tensor = HostAdapter.from_array(array);
        assert_eq!(tensor.data(), &[1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn test_inconsistent_buffer_is_not_materialized() {
        let tensor = HostTensor::new(vec![2, 3], vec![0.0f64; 5]);
        let err = HostAdapter.to_array(&tensor).unwrap_err();
        assert!(matches!(err, MetricError::NotMaterialized(_)));
        assert!(format!("{}", err).contains("5 values for shape [2, 3]"));
    }

    #[test]
    fn test_failed_conversion_buffers_nothing() {
        let mut metric = AdaptedMetric::new(HostAdapter, Smoothness::<f64>::default());

        let mut inputs = BTreeMap::new();
        inputs.insert("z".to_string(), HostTensor::new(vec![1, 3], vec![0.0, 1.0, 2.0]));
        inputs.insert("a".to_string(), HostTensor::new(vec![1, 3], vec![0.0]));

        assert!(metric.update_state(&inputs).is_err());
        assert!(metric.metric().state().get("z").unwrap().is_empty());
    }

    #[test]
    fn test_undeclared_inputs_are_skipped() {
        let mut metric = AdaptedMetric::new(HostAdapter, Smoothness::<f64>::default());

        let mut inputs = BTreeMap::new();
        inputs.insert("z".to_string(), HostTensor::new(vec![1, 3], vec![0.0, 1.0, 2.0]));
        inputs.insert("a".to_string(), HostTensor::new(vec![1, 3], vec![0.0, 2.0, 4.0]));
        // Broken, but never converted
        inputs.insert("labels".to_string(), HostTensor::new(vec![9], vec![]));

        metric.update_state(&inputs).unwrap();
        let result = metric.result().unwrap();
        assert_eq!(result.data(), &[1.0]);

        metric.reset_state();
        assert!(metric.result().is_err());
        assert_eq!(metric.name(), "Smoothness");
    }
}
