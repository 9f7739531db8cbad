use binlens_common::{BinningConfig, Result};
use serde::Serialize;
use tracing::info;

use crate::bin_spec::BinSpec;
use crate::histogram::{compute, Histogram};
use crate::sample::SampleSet;
use crate::summary::{summarize, Summary};

/// Everything one run produces: the binning used, the sample range, the histogram and its summary.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub spec: BinSpec,
    pub scale_factor: f64,
    pub min: f64,
    pub max: f64,
    pub histogram: Histogram,
    pub summary: Summary,
}

pub fn analyze(values: Vec<f64>, cfg: &BinningConfig) -> Result<Analysis> {
    cfg.validate()?;
    let spec = BinSpec::from_config(cfg)?;
    let samples = SampleSet::new(values)?.rescale(cfg.scale_factor)?;
    let histogram = compute(&samples, &spec)?;
    let summary = summarize(&histogram, cfg.top_k)?;
    info!(
        samples = samples.len(),
        bins = histogram.len(),
        dominant = summary.dominant_bin_index,
        "analysis complete"
    );
    Ok(Analysis {
        spec,
        scale_factor: cfg.scale_factor,
        min: samples.min(),
        max: samples.max(),
        histogram,
        summary,
    })
}
