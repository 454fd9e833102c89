//! Options for the interpolatability statistics
//!
//! Both option sets follow the builder pattern and validate themselves before
//! any array is touched:
//!
//! ```
//! use liadrs_metrics::{MaxMode, PtpMode, ReduceMode, SmoothnessOptions};
//!
//! let options = SmoothnessOptions::new()
//!     .with_reg_dim(vec![2, 0])
//!     .with_max_mode(MaxMode::Naive)
//!     .with_ptp_mode(PtpMode::Quantile(0.9))
//!     .with_reduce_mode(ReduceMode::None)
//!     .with_clamp(true);
//!
//! assert!(options.validate().is_ok());
//! assert!(SmoothnessOptions::new().with_p(1.0).validate().is_err());
//! ```

use crate::error::MetricResult;
use liadrs_kernels::{ConfigError, KernelError, LiadMode, MaxMode, PtpMode, ReduceMode};

use scirs2_core::numeric::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Convert an `f64` option to the element type
pub(crate) fn to_element<T>(name: &'static str, value: f64) -> MetricResult<T>
where
    T: Float,
{
    T::from(value).ok_or_else(|| KernelError::from(ConfigError::Unrepresentable { name, value }).into())
}

fn check_liad_mode(mode: LiadMode) -> MetricResult<()> {
    if !mode.is_supported() {
        return Err(KernelError::from(ConfigError::UnknownVariant {
            name: "liad_mode",
            value: mode.to_string(),
            expected: "{forward}",
        })
        .into());
    }
    Ok(())
}

/// Options for [`crate::smoothness`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SmoothnessOptions {
    /// Attribute `i` is regularized by latent feature `reg_dim[i]`; identity when `None`
    pub reg_dim: Option<Vec<usize>>,
    /// Finite-difference scheme
    pub liad_mode: LiadMode,
    /// Peak estimator for the 2nd-order LIAD magnitude
    pub max_mode: MaxMode,
    /// Range estimator for the 1st-order LIAD
    pub ptp_mode: PtpMode,
    /// Axis reduction of the result
    pub reduce_mode: ReduceMode,
    /// Clamp smoothness to `[0, 1]`
    pub clamp: bool,
    /// Lehmer mean power, only used with [`MaxMode::Lehmer`]
    pub p: f64,
}

impl Default for SmoothnessOptions {
    fn default() -> Self {
        Self {
            reg_dim: None,
            liad_mode: LiadMode::Forward,
            max_mode: MaxMode::Lehmer,
            ptp_mode: PtpMode::Naive,
            reduce_mode: ReduceMode::Attribute,
            clamp: false,
            p: 2.0,
        }
    }
}

impl SmoothnessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reg_dim(mut self, reg_dim: Vec<usize>) -> Self {
        self.reg_dim = Some(reg_dim);
        self
    }

    pub fn with_liad_mode(mut self, mode: LiadMode) -> Self {
        self.liad_mode = mode;
        self
    }

    pub fn with_max_mode(mut self, mode: MaxMode) -> Self {
        self.max_mode = mode;
        self
    }

    pub fn with_ptp_mode(mut self, mode: impl Into<PtpMode>) -> Self {
        self.ptp_mode = mode.into();
        self
    }

    pub fn with_reduce_mode(mut self, mode: ReduceMode) -> Self {
        self.reduce_mode = mode;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_p(mut self, p: f64) -> Self {
        self.p = p;
        self
    }

    /// Check every option; fails on the first invalid one
    pub fn validate(&self) -> MetricResult<()> {
        check_liad_mode(self.liad_mode)?;
        self.ptp_mode.validate()?;
        // `!(p > 1)` also rejects NaN
        if !(self.p > 1.0) {
            return Err(KernelError::from(ConfigError::InvalidPower(self.p)).into());
        }
        Ok(())
    }
}

/// Options for [`crate::monotonicity`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonotonicityOptions {
    /// Attribute `i` is regularized by latent feature `reg_dim[i]`; identity when `None`
    pub reg_dim: Option<Vec<usize>>,
    /// Finite-difference scheme
    pub liad_mode: LiadMode,
    /// Axis reduction of the result
    pub reduce_mode: ReduceMode,
    /// 1st-order LIAD with magnitude at or below this is treated as noise; must be finite
    pub liad_thresh: f64,
    /// Value for positions where every step is noise
    pub degenerate_val: f64,
    /// Skip NaN entries when reducing (ignored for [`ReduceMode::None`])
    pub nanmean: bool,
}

impl Default for MonotonicityOptions {
    fn default() -> Self {
        Self {
            reg_dim: None,
            liad_mode: LiadMode::Forward,
            reduce_mode: ReduceMode::Attribute,
            liad_thresh: 1e-3,
            degenerate_val: f64::NAN,
            nanmean: true,
        }
    }
}

impl MonotonicityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reg_dim(mut self, reg_dim: Vec<usize>) -> Self {
        self.reg_dim = Some(reg_dim);
        self
    }

    pub fn with_liad_mode(mut self, mode: LiadMode) -> Self {
        self.liad_mode = mode;
        self
    }

    pub fn with_reduce_mode(mut self, mode: ReduceMode) -> Self {
        self.reduce_mode = mode;
        self
    }

    pub fn with_liad_thresh(mut self, thresh: f64) -> Self {
        self.liad_thresh = thresh;
        self
    }

    pub fn with_degenerate_val(mut self, value: f64) -> Self {
        self.degenerate_val = value;
        self
    }

    pub fn with_nanmean(mut self, nanmean: bool) -> Self {
        self.nanmean = nanmean;
        self
    }

    /// Check every option; fails on the first invalid one
    ///
    /// `liad_thresh` must be finite: a NaN or infinite threshold would mark
    /// every position degenerate.
    pub fn validate(&self) -> MetricResult<()> {
        check_liad_mode(self.liad_mode)?;
        if !self.liad_thresh.is_finite() {
            return Err(KernelError::from(ConfigError::NonFinite {
                name: "liad_thresh",
                value: self.liad_thresh,
            })
            .into());
        }
        Ok(())
    }
}
