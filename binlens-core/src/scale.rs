//! Forward/inverse transforms a renderer applies to the frequency axis.
//!
//! Histogram counts are never modified here; callers get transformed copies.

use binlens_common::{BinLensError, Result};
use serde::{Deserialize, Serialize};

use crate::histogram::Histogram;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleTransform {
    #[default]
    Linear,
    /// Natural log. Domain is `x > 0`; zero and negative values are rejected.
    #[serde(rename = "log")]
    Logarithmic,
    /// Domain is `x >= 0`.
    #[serde(rename = "sqrt")]
    SquareRoot,
}

impl ScaleTransform {
    pub const ALL: [ScaleTransform; 3] = [Self::Linear, Self::Logarithmic, Self::SquareRoot];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Logarithmic => "log",
            Self::SquareRoot => "sqrt",
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        match self {
            Self::Linear => x.is_finite(),
            Self::Logarithmic => x.is_finite() && x > 0.0,
            Self::SquareRoot => x.is_finite() && x >= 0.0,
        }
    }

    pub fn forward(&self, x: f64) -> Result<f64> {
        if !self.contains(x) {
            return Err(BinLensError::Domain { transform: self.name(), value: x });
        }
        Ok(match self {
            Self::Linear => x,
            Self::Logarithmic => x.ln(),
            Self::SquareRoot => x.sqrt(),
        })
    }

    pub fn inverse(&self, y: f64) -> f64 {
        match self {
            Self::Linear => y,
            Self::Logarithmic => y.exp(),
            Self::SquareRoot => y * y,
        }
    }

    /// Bin counts mapped through `forward`; bins outside the domain (zero counts on a
    /// log axis) are `None` and should be left out of drawing and labelling.
    pub fn scaled_counts(&self, hist: &Histogram) -> Vec<Option<f64>> {
        hist.bins().iter().map(|b| self.forward(b.count as f64).ok()).collect()
    }
}

impl std::fmt::Display for ScaleTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ScaleTransform {
    type Err = BinLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "log" | "logarithmic" => Ok(Self::Logarithmic),
            "sqrt" | "squareroot" | "square-root" => Ok(Self::SquareRoot),
            _ => Err(BinLensError::InvalidConfig(format!(
                "unknown scale: {s} (use linear, log or sqrt)"
            ))),
        }
    }
}
