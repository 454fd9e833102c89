//! Error types for interpolatability metrics
//!
//! [`MetricError`] wraps every [`KernelError`] unchanged, so shape, grid and
//! configuration failures keep their category when they cross the crate
//! boundary, and adds the failures specific to stateful accumulation and
//! tensor adaptation.

use liadrs_kernels::KernelError;
use thiserror::Error;

/// Top-level error type for metric computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    /// Errors raised by the numerical kernels
    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// Access to a state buffer that was never registered
    #[error("Unknown state buffer '{0}'")]
    UnknownBuffer(String),

    /// A metric was updated without one of the inputs it requires
    #[error("{metric}: missing required input '{input}'")]
    MissingInput { metric: String, input: String },

    /// `compute` was called before any batch was accumulated
    #[error("State buffer '{0}' is empty; call update_state before compute")]
    EmptyState(String),

    /// Accumulated batches could not be concatenated along the sample axis
    #[error("Cannot concatenate batches of '{buffer}': {reason}")]
    Concatenate { buffer: String, reason: String },

    /// A tensor could not be turned into an array
    #[error("Tensor cannot be materialized: {0}")]
    NotMaterialized(String),
}

/// Result type for metric operations
pub type MetricResult<T> = Result<T, MetricError>;

impl MetricError {
    /// The kernel error behind this error, if any
    pub fn kernel(&self) -> Option<&KernelError> {
        match self {
            MetricError::Kernel(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liadrs_kernels::ShapeError;

    #[test]
    fn test_kernel_error_is_transparent() {
        let err: MetricError = KernelError::from(ShapeError::SampleMismatch { z: 4, a: 2 }).into();

        let msg = format!("{}", err);
        assert!(msg.starts_with("Shape error"));
        assert!(msg.contains("z has 4, a has 2"));
        assert!(err.kernel().map(KernelError::is_shape).unwrap_or(false));
    }

    #[test]
    fn test_state_error_display() {
        let err = MetricError::MissingInput {
            metric: "Smoothness".into(),
            input: "a".into(),
        };
        assert!(format!("{}", err).contains("missing required input 'a'"));
        assert!(err.kernel().is_none());

        let err = MetricError::EmptyState("z".into());
        assert!(format!("{}", err).contains("'z' is empty"));
    }
}
