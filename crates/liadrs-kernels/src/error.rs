//! Error types for LIAD kernel operations
//!
//! Errors are grouped by the stage that raises them:
//!
//! - **[`ShapeError`]**: rank, sample, feature/attribute and `reg_dim` contract violations
//! - **[`GridError`]**: degenerate interpolation grids (constant or unevenly spaced)
//! - **[`ConfigError`]**: invalid options, raised before any array work starts
//!
//! All of them fold into the top-level [`KernelError`].
//!
//! # Examples
//!
//! ```
//! use liadrs_kernels::error::{KernelError, ShapeError};
//!
//! fn check_samples(z: usize, a: usize) -> Result<(), KernelError> {
//!     if z != a {
//!         return Err(ShapeError::SampleMismatch { z, a }.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_samples(10, 10).is_ok());
//! assert!(matches!(check_samples(10, 8), Err(KernelError::Shape(_))));
//! ```

use thiserror::Error;

/// Top-level error type for kernel operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Shape or layout contract violations
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Degenerate interpolation grids
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Mode recognised but not implemented
    #[error("{operation}: mode '{mode}' is not implemented")]
    Unsupported { operation: String, mode: String },

    /// Empty input not allowed
    #[error("{operation}: empty input not allowed for parameter '{parameter}'")]
    EmptyInput { operation: String, parameter: String },

    /// NaN where an ordering is required
    #[error("{operation}: '{parameter}' contains NaN at index {index}")]
    NanInput {
        operation: String,
        parameter: String,
        index: usize,
    },
}

/// Layout contract violations on `z`, `a` and `reg_dim`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    #[error("`{name}` must have rank {expected}, got rank {actual}")]
    Rank {
        name: &'static str,
        expected: &'static str,
        actual: usize,
    },

    #[error("Sample counts differ: z has {z}, a has {a}")]
    SampleMismatch { z: usize, a: usize },

    #[error("z has {features} features but a has {attributes} attributes")]
    TooFewFeatures { features: usize, attributes: usize },

    #[error("Interpolation lengths differ: z has {z}, a has {a}")]
    InterpMismatch { z: usize, a: usize },

    #[error("Interpolation axis has {actual} points, at least {min} required")]
    InterpTooShort { actual: usize, min: usize },

    #[error("reg_dim has {actual} entries but a has {expected} attributes")]
    RegDimLength { expected: usize, actual: usize },

    #[error("reg_dim[{position}] = {value} is out of range for {features} features")]
    RegDimOutOfRange {
        position: usize,
        value: usize,
        features: usize,
    },

    #[error("Arrays must share a shape: {left:?} vs {right:?}")]
    Incompatible { left: Vec<usize>, right: Vec<usize> },

    #[error("Index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Degenerate interpolation grids
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("z must not be constant along the interpolation axis (sample {sample}, attribute {attribute})")]
    Constant { sample: usize, attribute: usize },

    #[error("Spacing between interpolation points must be equal (sample {sample}, attribute {attribute}, step {step})")]
    UnequalSpacing {
        sample: usize,
        attribute: usize,
        step: usize,
    },
}

/// Invalid options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`p` must be greater than 1.0, got {0}")]
    InvalidPower(f64),

    #[error("`ptp_mode` must be in (0.0, 1.0], got {0}")]
    QuantileOutOfRange(f64),

    #[error("`ptp_mode` must be either \"naive\" or a number, got '{0}'")]
    PtpModeType(String),

    #[error("Quantile must be in [0.0, 1.0], got {0}")]
    InvalidQuantile(f64),

    #[error("`{name}` must be one of {expected}, got '{value}'")]
    UnknownVariant {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("LIAD order must be at least 1")]
    ZeroOrder,

    #[error("`{name}` cannot be represented in the element type: {value}")]
    Unrepresentable { name: &'static str, value: f64 },

    #[error("`{name}` must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create an unsupported-mode error
    pub fn unsupported(operation: impl Into<String>, mode: impl Into<String>) -> Self {
        KernelError::Unsupported {
            operation: operation.into(),
            mode: mode.into(),
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        KernelError::EmptyInput {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Create a NaN input error
    pub fn nan_input(operation: impl Into<String>, parameter: impl Into<String>, index: usize) -> Self {
        KernelError::NanInput {
            operation: operation.into(),
            parameter: parameter.into(),
            index,
        }
    }

    /// Whether this error belongs to the shape-contract class
    pub fn is_shape(&self) -> bool {
        matches!(self, KernelError::Shape(_))
    }

    /// Whether this error belongs to the degenerate-grid class
    pub fn is_grid(&self) -> bool {
        matches!(self, KernelError::Grid(_))
    }

    /// Whether this error belongs to the configuration class
    pub fn is_config(&self) -> bool {
        matches!(self, KernelError::Config(_))
    }
}
