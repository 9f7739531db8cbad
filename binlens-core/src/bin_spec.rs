use binlens_common::{BinLensError, BinMode, BinningConfig, Result};
use serde::{Deserialize, Serialize};

/// How the sample range is partitioned.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum BinSpec {
    FixedWidth { width: f64 },
    FixedCount { count: usize },
}

impl BinSpec {
    pub fn fixed_width(width: f64) -> Result<Self> {
        let spec = Self::FixedWidth { width };
        spec.validate()?;
        Ok(spec)
    }

    pub fn fixed_count(count: usize) -> Result<Self> {
        let spec = Self::FixedCount { count };
        spec.validate()?;
        Ok(spec)
    }

    pub fn from_config(cfg: &BinningConfig) -> Result<Self> {
        match cfg.mode {
            BinMode::FixedWidth => Self::fixed_width(cfg.width),
            BinMode::FixedCount => Self::fixed_count(cfg.count),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::FixedWidth { width } if !(width.is_finite() && width > 0.0) => {
                Err(BinLensError::InvalidConfig(format!(
                    "bin width must be a positive number, got {width}"
                )))
            }
            Self::FixedCount { count: 0 } => Err(BinLensError::InvalidConfig(
                "bin count must be at least 1".into(),
            )),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for BinSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FixedWidth { width } => write!(f, "fixed width {width}"),
            Self::FixedCount { count } => write!(f, "fixed count {count}"),
        }
    }
}
