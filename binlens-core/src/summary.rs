use binlens_common::{BinLensError, Result};
use serde::Serialize;

use crate::histogram::Histogram;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBin {
    pub bin_index: usize,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: u64,
    pub dominant_bin_index: usize,
    pub dominant_percentage: f64,
    pub top_k: Vec<RankedBin>,
}

fn percentage(count: u64, total: u64) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Ranks bins by count. Ties resolve to the lower bin index.
pub fn summarize(hist: &Histogram, k: usize) -> Result<Summary> {
    if hist.is_empty() {
        return Err(BinLensError::EmptyDataset("histogram has no bins".into()));
    }
    if k < 1 {
        return Err(BinLensError::InvalidConfig("top_k must be at least 1".into()));
    }
    let total = hist.total();
    let mut ranked: Vec<(usize, u64)> = hist.bins().iter().map(|b| b.count).enumerate().collect();
    // stable sort keeps ascending index order among equal counts
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    let top_k: Vec<RankedBin> = ranked
        .into_iter()
        .take(k)
        .map(|(i, c)| RankedBin { bin_index: i, count: c, percentage: percentage(c, total) })
        .collect();
    let dominant = &top_k[0];
    Ok(Summary {
        total,
        dominant_bin_index: dominant.bin_index,
        dominant_percentage: dominant.percentage,
        top_k,
    })
}
