use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{BinLensError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinMode {
    FixedWidth,
    FixedCount,
}

impl std::str::FromStr for BinMode {
    type Err = BinLensError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fixed-width" | "width" => Ok(Self::FixedWidth),
            "fixed-count" | "count" => Ok(Self::FixedCount),
            _ => Err(BinLensError::InvalidConfig(format!(
                "unknown bin mode: {s} (use fixed-width or fixed-count)"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinningConfig {
    #[serde(default = "default_mode")]
    pub mode: BinMode,
    #[serde(default = "default_width")]
    pub width: f64, // only read in fixed-width mode
    #[serde(default = "default_count")]
    pub count: usize, // only read in fixed-count mode
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_mode() -> BinMode {
    BinMode::FixedCount
}
fn default_width() -> f64 {
    50.0
}
fn default_count() -> usize {
    10
}
fn default_scale_factor() -> f64 {
    1.0
}
fn default_top_k() -> usize {
    3
}

impl Default for BinningConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            width: default_width(),
            count: default_count(),
            scale_factor: default_scale_factor(),
            top_k: default_top_k(),
        }
    }
}

impl BinningConfig {
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            BinMode::FixedWidth if !(self.width.is_finite() && self.width > 0.0) => {
                return Err(BinLensError::InvalidConfig(format!(
                    "bin width must be a positive number, got {}",
                    self.width
                )));
            }
            BinMode::FixedCount if self.count < 1 => {
                return Err(BinLensError::InvalidConfig(
                    "bin count must be at least 1".into(),
                ));
            }
            _ => {}
        }
        // NaN fails the comparison as well
        if !(self.scale_factor > 0.0) || !self.scale_factor.is_finite() {
            return Err(BinLensError::InvalidConfig(format!(
                "scale factor must be a positive number, got {}",
                self.scale_factor
            )));
        }
        if self.top_k < 1 {
            return Err(BinLensError::InvalidConfig("top_k must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    #[serde(default)]
    pub column: usize,
    #[serde(default)]
    pub has_header: bool,
}

fn default_delimiter() -> char {
    ','
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            column: 0,
            has_header: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_scale")]
    pub scale: String,
    #[serde(default = "default_digits")]
    pub significant_digits: usize,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_scale() -> String {
    "linear".into()
}
fn default_digits() -> usize {
    4
}
fn default_format() -> String {
    "json".into()
}
fn default_output_dir() -> String {
    ".".into()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            significant_digits: default_digits(),
            format: default_format(),
            output_dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub binning: BinningConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("binlens")
            .join("config.toml")
    }

    pub fn load() -> Result<Self> {
        let path = if let Ok(env_path) = std::env::var("BINLENS_CONFIG") {
            PathBuf::from(env_path) // $BINLENS_CONFIG overrides default config path
        } else {
            Self::config_path()
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let cfg: Self =
            toml::from_str(&content).map_err(|e| BinLensError::Other(e.to_string()))?;
        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| BinLensError::Other(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.binning.validate()?;
        if !(1..=17).contains(&self.report.significant_digits) {
            return Err(BinLensError::InvalidConfig(format!(
                "significant_digits must be in 1..=17, got {}",
                self.report.significant_digits
            )));
        }
        Ok(())
    }
}
