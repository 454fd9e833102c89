//! Mode enumerations shared by the LIAD kernels and the statistics built on them
//!
//! Every mode parses from the lowercase names used in configuration files
//! (`"forward"`, `"lehmer"`, `"naive"`, `"attribute"`, ...).

use crate::error::{ConfigError, KernelError, KernelResult};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Finite-difference scheme used to compute LIAD
///
/// Only [`LiadMode::Forward`] is implemented; the other schemes are
/// recognised so that they can be rejected with a precise error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LiadMode {
    /// `(a[k+1] - a[k]) / (z[k+1] - z[k])`
    #[default]
    Forward,
    Backward,
    Central,
}

impl LiadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LiadMode::Forward => "forward",
            LiadMode::Backward => "backward",
            LiadMode::Central => "central",
        }
    }

    /// Whether the LIAD engine can evaluate this scheme
    pub fn is_supported(&self) -> bool {
        matches!(self, LiadMode::Forward)
    }
}

impl fmt::Display for LiadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LiadMode {
    type Err = KernelError;

    fn from_str(s: &str) -> KernelResult<Self> {
        match s.to_lowercase().as_str() {
            "forward" => Ok(LiadMode::Forward),
            "backward" => Ok(LiadMode::Backward),
            "central" => Ok(LiadMode::Central),
            _ => Err(ConfigError::UnknownVariant {
                name: "liad_mode",
                value: s.to_string(),
                expected: "{forward, backward, central}",
            }
            .into()),
        }
    }
}

/// Peak estimator applied to the magnitude of 2nd-order LIAD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MaxMode {
    /// Lehmer mean with power `p`, a smooth proxy for the maximum
    #[default]
    Lehmer,
    /// Plain maximum
    Naive,
}

impl MaxMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaxMode::Lehmer => "lehmer",
            MaxMode::Naive => "naive",
        }
    }
}

impl fmt::Display for MaxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaxMode {
    type Err = KernelError;

    fn from_str(s: &str) -> KernelResult<Self> {
        match s.to_lowercase().as_str() {
            "lehmer" => Ok(MaxMode::Lehmer),
            "naive" => Ok(MaxMode::Naive),
            _ => Err(ConfigError::UnknownVariant {
                name: "max_mode",
                value: s.to_string(),
                expected: "{lehmer, naive}",
            }
            .into()),
        }
    }
}

/// Range estimator applied to 1st-order LIAD
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PtpMode {
    /// `max - min`
    #[default]
    Naive,
    /// Distance between the `0.5 + 0.5q` and `0.5 - 0.5q` quantiles, `q` in `(0, 1]`
    Quantile(f64),
}

impl PtpMode {
    /// Check that a quantile width lies in `(0, 1]`
    pub fn validate(&self) -> KernelResult<()> {
        match *self {
            PtpMode::Naive => Ok(()),
            PtpMode::Quantile(q) if q > 0.0 && q <= 1.0 => Ok(()),
            PtpMode::Quantile(q) => Err(ConfigError::QuantileOutOfRange(q).into()),
        }
    }

    /// Lower and upper quantile levels for [`PtpMode::Quantile`]
    pub fn quantile_levels(&self) -> Option<(f64, f64)> {
        match *self {
            PtpMode::Naive => None,
            PtpMode::Quantile(q) => Some((0.5 - 0.5 * q, 0.5 + 0.5 * q)),
        }
    }
}

impl fmt::Display for PtpMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PtpMode::Naive => f.write_str("naive"),
            PtpMode::Quantile(q) => write!(f, "{}", q),
        }
    }
}

impl From<f64> for PtpMode {
    fn from(q: f64) -> Self {
        PtpMode::Quantile(q)
    }
}

impl FromStr for PtpMode {
    type Err = KernelError;

    /// Parse `"naive"` or a decimal quantile width. The width is range-checked.
    fn from_str(s: &str) -> KernelResult<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("naive") {
            return Ok(PtpMode::Naive);
        }

        let q: f64 = trimmed
            .parse()
            .map_err(|_| ConfigError::PtpModeType(s.to_string()))?;
        let mode = PtpMode::Quantile(q);
        mode.validate()?;
        Ok(mode)
    }
}

/// Axis-collapsing policy for a `(n_samples, n_attributes)` result matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReduceMode {
    /// Mean over samples, shape `(n_attributes,)`
    #[default]
    Attribute,
    /// Mean over attributes, shape `(n_samples,)`
    Sample,
    /// Mean over everything, 0-d
    All,
    /// Full `(n_samples, n_attributes)` matrix
    None,
}

impl ReduceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReduceMode::Attribute => "attribute",
            ReduceMode::Sample => "sample",
            ReduceMode::All => "all",
            ReduceMode::None => "none",
        }
    }
}

impl fmt::Display for ReduceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ReduceMode {
    /// Any name outside `attribute`, `sample(s)` and `all` means no reduction.
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "attribute" | "attributes" => ReduceMode::Attribute,
            "sample" | "samples" => ReduceMode::Sample,
            "all" => ReduceMode::All,
            _ => ReduceMode::None,
        }
    }
}
