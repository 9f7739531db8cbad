use binlens_common::{BinLensError, Result};
use serde::Serialize;
use tracing::debug;

use crate::bin_spec::BinSpec;
use crate::sample::SampleSet;

/// Upper bound on the number of bins a single histogram may hold.
pub const MAX_BINS: usize = 1 << 24;

/// `[lower, upper)`, or `[lower, upper]` when it is the last bin of a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

impl Bin {
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Contiguous bins ordered by `lower`, spanning `[min, max]` of the samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    /// Builds a histogram from externally supplied bins, checking order and contiguity.
    /// An empty bin list is accepted; `summarize` rejects it.
    pub fn from_bins(bins: Vec<Bin>) -> Result<Self> {
        for (i, b) in bins.iter().enumerate() {
            if !(b.lower.is_finite() && b.upper.is_finite()) || b.lower > b.upper {
                return Err(BinLensError::InvalidConfig(format!(
                    "bin {i} has invalid bounds [{}, {}]",
                    b.lower, b.upper
                )));
            }
        }
        if let Some(i) = bins.windows(2).position(|w| w[0].upper != w[1].lower) {
            return Err(BinLensError::InvalidConfig(format!(
                "bins {i} and {} are not contiguous",
                i + 1
            )));
        }
        Ok(Self { bins })
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }
    pub fn len(&self) -> usize {
        self.bins.len()
    }
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }
    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|b| b.count).collect()
    }

    /// All `len() + 1` boundaries, or nothing for an empty histogram.
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(|b| b.lower).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.upper);
        }
        edges
    }

    /// Index of the bin `v` falls in, or `None` outside `[lower, upper]`.
    pub fn bin_index(&self, v: f64) -> Option<usize> {
        let first = self.bins.first()?;
        let last = self.bins.last()?;
        if !(v >= first.lower && v <= last.upper) {
            return None;
        }
        let idx = self.bins.partition_point(|b| b.lower <= v);
        Some(idx.saturating_sub(1).min(self.bins.len() - 1))
    }
}

/// Partitions `samples` according to `spec` and counts every sample into exactly one bin.
pub fn compute(samples: &SampleSet, spec: &BinSpec) -> Result<Histogram> {
    spec.validate()?;
    if samples.is_empty() {
        return Err(BinLensError::EmptyDataset("no samples to bin".into()));
    }
    let (lo, hi) = (samples.min(), samples.max());
    if lo == hi {
        debug!(value = lo, samples = samples.len(), "constant sample set, single bin");
        return Ok(Histogram {
            bins: vec![Bin { lower: lo, upper: hi, count: samples.len() as u64 }],
        });
    }
    let edges = bin_edges(lo, hi, spec)?;
    let n = edges.len() - 1;
    let width = match *spec {
        BinSpec::FixedWidth { width } => width,
        BinSpec::FixedCount { count } => (hi - lo) / count as f64,
    };
    let mut counts = vec![0u64; n];
    for &v in samples.values() {
        counts[locate(&edges, lo, width, v)] += 1;
    }
    debug!(bins = n, samples = samples.len(), lo, hi, %spec, "computed histogram");
    let bins = counts
        .iter()
        .enumerate()
        .map(|(i, &c)| Bin { lower: edges[i], upper: edges[i + 1], count: c })
        .collect();
    Ok(Histogram { bins })
}

/// Bin boundaries for a non-degenerate range `lo < hi`.
///
/// Every interior edge is derived from its index; the final edge is exactly `hi`.
/// Fails with `InvalidConfig` when two edges would round to the same value.
pub fn bin_edges(lo: f64, hi: f64, spec: &BinSpec) -> Result<Vec<f64>> {
    let range = hi - lo;
    if !range.is_finite() {
        return Err(BinLensError::InvalidConfig(format!(
            "sample range [{lo}, {hi}] is too wide to bin"
        )));
    }
    let mut edges = match *spec {
        BinSpec::FixedWidth { width } => {
            let span = range / width;
            if !span.is_finite() || span > MAX_BINS as f64 {
                return Err(BinLensError::InvalidConfig(format!(
                    "bin width {width} would need more than {MAX_BINS} bins"
                )));
            }
            let mut n = (span.ceil() as usize).max(1);
            // rounding in the division can overshoot by one bin
            while n > 1 && lo + (n - 1) as f64 * width >= hi {
                n -= 1;
            }
            (0..n).map(|i| lo + i as f64 * width).collect::<Vec<_>>()
        }
        BinSpec::FixedCount { count } => {
            if count > MAX_BINS {
                return Err(BinLensError::InvalidConfig(format!(
                    "bin count {count} exceeds {MAX_BINS}"
                )));
            }
            (0..count)
                .map(|i| lo + i as f64 * range / count as f64)
                .collect::<Vec<_>>()
        }
    };
    edges.push(hi);
    if let Some(i) = edges.windows(2).position(|w| w[0] >= w[1]) {
        return Err(BinLensError::InvalidConfig(format!(
            "{spec} is finer than float resolution near {}: edges {i} and {} coincide",
            edges[i],
            i + 1
        )));
    }
    Ok(edges)
}

// O(1) estimate, then nudged against the stored edges so the result matches a linear scan.
fn locate(edges: &[f64], lo: f64, width: f64, v: f64) -> usize {
    let last = edges.len() - 2;
    let mut idx = (((v - lo) / width).floor() as usize).min(last);
    while idx > 0 && v < edges[idx] {
        idx -= 1;
    }
    while idx < last && v >= edges[idx + 1] {
        idx += 1;
    }
    idx
}
