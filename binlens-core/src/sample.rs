use binlens_common::{BinLensError, Result};

/// Cleaned, non-empty sequence of finite values.
///
/// Order is kept for reproducible iteration but never affects binning.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    values: Vec<f64>,
    min: f64,
    max: f64,
}

impl SampleSet {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(BinLensError::EmptyDataset("no samples to bin".into()));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(BinLensError::InvalidConfig(format!(
                "sample set contains non-finite value {bad}"
            )));
        }
        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Ok(Self { values, min, max })
    }

    /// Drops NaN and infinite entries before building the set.
    pub fn from_raw<I: IntoIterator<Item = f64>>(raw: I) -> Result<Self> {
        Self::new(raw.into_iter().filter(|v| v.is_finite()).collect())
    }

    /// Divides every sample by `factor`.
    pub fn rescale(self, factor: f64) -> Result<Self> {
        if !(factor > 0.0) || !factor.is_finite() {
            return Err(BinLensError::InvalidConfig(format!(
                "scale factor must be a positive number, got {factor}"
            )));
        }
        if factor == 1.0 {
            return Ok(self);
        }
        Self::new(self.values.into_iter().map(|v| v / factor).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn min(&self) -> f64 {
        self.min
    }
    pub fn max(&self) -> f64 {
        self.max
    }
}
