//! Bundles of streaming metrics sharing one update call
//!
//! A [`MetricBundle`] routes each named input only to the metrics that declare
//! it in [`Metric::input_names`]; inputs nobody declares are ignored. An update
//! is all or nothing: every declared input is checked before any metric is
//! touched.
//!
//! ```
//! use std::collections::BTreeMap;
//! use scirs2_core::ndarray_ext::Array3;
//! use liadrs_metrics::{Metric, MetricBundle, Monotonicity, Smoothness};
//!
//! let mut bundle = MetricBundle::<f64>::from_metrics(vec![
//!     Box::new(Smoothness::<f64>::default()) as Box<dyn Metric<f64>>,
//!     Box::new(Monotonicity::<f64>::default()),
//! ]);
//!
//! let z = Array3::from_shape_fn((3, 1, 5), |(s, _, k)| (s + k) as f64);
//! let mut inputs = BTreeMap::new();
//! inputs.insert("z".to_string(), z.clone().into_dyn());
//! inputs.insert("a".to_string(), z.mapv(|v| 2.0 * v).into_dyn());
//! inputs.insert("labels".to_string(), z.into_dyn());
//! bundle.update_state(&inputs).unwrap();
//!
//! let results = bundle.compute().unwrap();
//! assert_eq!(results["Smoothness"].as_slice().unwrap(), &[1.0]);
//! assert_eq!(results["Monotonicity"].as_slice().unwrap(), &[1.0]);
//! ```

use crate::error::{MetricError, MetricResult};
use crate::metric::{Metric, NamedArrays};
use scirs2_core::ndarray_ext::ArrayD;
use std::collections::BTreeMap;

/// Named collection of metrics updated, computed and reset together
pub struct MetricBundle<T> {
    metrics: Vec<(String, Box<dyn Metric<T>>)>,
}

impl<T> Default for MetricBundle<T> {
    fn default() -> Self {
        Self {
            metrics: Vec::new(),
        }
    }
}

impl<T: Clone> MetricBundle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bundle metrics keyed by [`Metric::name`]
    ///
    /// A later metric with the same name replaces the earlier one.
    pub fn from_metrics(metrics: Vec<Box<dyn Metric<T>>>) -> Self {
        let mut bundle = Self::new();
        for metric in metrics {
            let name = metric.name().to_string();
            bundle.insert(name, metric);
        }
        bundle
    }

    /// Bundle metrics under explicit keys
    pub fn from_named<I, S>(metrics: I) -> Self
    where
        I: IntoIterator<Item = (S, Box<dyn Metric<T>>)>,
        S: Into<String>,
    {
        let mut bundle = Self::new();
        for (name, metric) in metrics {
            bundle.insert(name, metric);
        }
        bundle
    }

    /// Add a metric, replacing any metric already stored under `name`
    pub fn insert(&mut self, name: impl Into<String>, metric: Box<dyn Metric<T>>) {
        let name = name.into();
        match self.metrics.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = metric,
            None => self.metrics.push((name, metric)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Metric<T>> {
        self.metrics
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, metric)| &**metric)
    }

    /// Keys in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.metrics.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    /// Update every metric with the inputs it declares
    ///
    /// # Errors
    ///
    /// `MetricError::MissingInput` if any metric lacks a declared input. No
    /// metric is updated in that case.
    pub fn update_state(&mut self, inputs: &NamedArrays<T>) -> MetricResult<()> {
        for (_, metric) in &self.metrics {
            if let Some(missing) = metric
                .input_names()
                .iter()
                .find(|name| !inputs.contains_key(**name))
            {
                return Err(MetricError::MissingInput {
                    metric: metric.name().to_string(),
                    input: missing.to_string(),
                });
            }
        }

        for (key, metric) in &mut self.metrics {
            let accepted: NamedArrays<T> = inputs
                .iter()
                .filter(|(name, _)| metric.input_names().iter().any(|n| *n == name.as_str()))
                .map(|(name, array)| (name.clone(), array.clone()))
                .collect();

            log::trace!(
                "bundle: routing {:?} to '{}'",
                accepted.keys().collect::<Vec<_>>(),
                key
            );
            metric.update_state(&accepted)?;
        }
        Ok(())
    }

    /// Compute every metric, keyed by bundle name
    pub fn compute(&self) -> MetricResult<BTreeMap<String, ArrayD<T>>> {
        self.metrics
            .iter()
            .map(|(key, metric)| metric.compute().map(|value| (key.clone(), value)))
            .collect()
    }

    pub fn reset_state(&mut self) {
        for (_, metric) in &mut self.metrics {
            metric.reset_state();
        }
    }
}
