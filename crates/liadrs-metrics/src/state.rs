//! Named state buffers for streaming metrics
//!
//! A [`MetricState`] holds an ordered set of named buffers. Each buffer is a
//! list of accumulated batches and remembers the default it was registered
//! with, so [`MetricState::reset`] restores exactly that default.

use crate::error::{MetricError, MetricResult};
use scirs2_core::ndarray_ext::{ArrayD, ArrayViewD, Axis};

#[derive(Debug, Clone, PartialEq)]
struct Buffer<T> {
    name: String,
    batches: Vec<ArrayD<T>>,
    default: Vec<ArrayD<T>>,
}

/// Ordered collection of named batch buffers with registered defaults
#[derive(Debug, Clone, PartialEq)]
pub struct MetricState<T> {
    buffers: Vec<Buffer<T>>,
}

impl<T> Default for MetricState<T> {
    fn default() -> Self {
        Self {
            buffers: Vec::new(),
        }
    }
}

impl<T: Clone> MetricState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a buffer with its default value
    ///
    /// Registering an existing name replaces both its value and its default
    /// but keeps its position.
    pub fn add_state(&mut self, name: impl Into<String>, default: Vec<ArrayD<T>>) {
        let name = name.into();
        match self.buffers.iter_mut().find(|b| b.name == name) {
            Some(buffer) => {
                buffer.batches = default.clone();
                buffer.default = default;
            }
            None => self.buffers.push(Buffer {
                name,
                batches: default.clone(),
                default,
            }),
        }
    }

    fn buffer(&self, name: &str) -> MetricResult<&Buffer<T>> {
        self.buffers
            .iter()
            .find(|b| b.name == name)
            .ok_or_else(|| MetricError::UnknownBuffer(name.to_string()))
    }

    fn buffer_mut(&mut self, name: &str) -> MetricResult<&mut Buffer<T>> {
        self.buffers
            .iter_mut()
            .find(|b| b.name == name)
            .ok_or_else(|| MetricError::UnknownBuffer(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.buffers.iter().any(|b| b.name == name)
    }

    /// Buffer names in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buffers.iter().map(|b| b.name.as_str())
    }

    pub fn get(&self, name: &str) -> MetricResult<&[ArrayD<T>]> {
        Ok(&self.buffer(name)?.batches)
    }

    pub fn get_mut(&mut self, name: &str) -> MetricResult<&mut Vec<ArrayD<T>>> {
        Ok(&mut self.buffer_mut(name)?.batches)
    }

    /// Replace the current value of a buffer; its default is unchanged
    pub fn set(&mut self, name: &str, value: Vec<ArrayD<T>>) -> MetricResult<()> {
        self.buffer_mut(name)?.batches = value;
        Ok(())
    }

    pub fn append(&mut self, name: &str, batch: ArrayD<T>) -> MetricResult<()> {
        self.buffer_mut(name)?.batches.push(batch);
        Ok(())
    }

    /// Restore every buffer to its registered default
    pub fn reset(&mut self) {
        for buffer in &mut self.buffers {
            buffer.batches = buffer.default.clone();
        }
    }

    /// Concatenate the batches of a buffer along the sample axis
    ///
    /// # Errors
    ///
    /// - `UnknownBuffer` if `name` was never registered
    /// - `EmptyState` if the buffer holds no batch
    /// - `Concatenate` if the batches disagree in any non-sample dimension
    pub fn concatenated(&self, name: &str) -> MetricResult<ArrayD<T>> {
        let buffer = self.buffer(name)?;
        if buffer.batches.is_empty() {
            return Err(MetricError::EmptyState(name.to_string()));
        }

        let views: Vec<ArrayViewD<T>> = buffer.batches.iter().map(|b| b.view()).collect();
        scirs2_core::ndarray::concatenate(Axis(0), &views).map_err(|e| MetricError::Concatenate {
            buffer: name.to_string(),
            reason: e.to_string(),
        })
    }
}
