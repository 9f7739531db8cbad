use std::fmt;
use std::io::Write;
use std::path::Path;

use binlens_common::{BinLensError, Result};

use crate::bin_spec::BinSpec;
use crate::histogram::Histogram;
use crate::pipeline::Analysis;
use crate::scale::ScaleTransform;

/// `%g`-style formatting with `digits` significant digits and trailing zeros removed.
pub fn format_sig(x: f64, digits: usize) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x == 0.0 {
        return "0".into();
    }
    let digits = digits.max(1);
    // scientific form gives the exponent after rounding to `digits`
    let sci = format!("{:.*e}", digits - 1, x);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Console report for one analysis; `Display` writes it.
pub struct Report<'a> {
    pub analysis: &'a Analysis,
    pub digits: usize,
    pub scale: ScaleTransform,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = |x: f64| format_sig(x, self.digits);
        let analysis = self.analysis;
        let hist = &analysis.histogram;
        let summary = &analysis.summary;
        writeln!(f, "Data range: {} to {}", g(analysis.min), g(analysis.max))?;
        match analysis.spec {
            BinSpec::FixedWidth { width } => writeln!(f, "Bin width: {}", g(width))?,
            BinSpec::FixedCount { count } => writeln!(f, "Bin count: {count}")?,
        }
        if analysis.scale_factor != 1.0 {
            writeln!(f, "Scale factor: 1/{}", g(analysis.scale_factor))?;
        }
        writeln!(f, "Number of bins: {}", hist.len())?;

        writeln!(f, "\n=== ANALYSIS ===")?;
        writeln!(f, "Total data points: {}", summary.total)?;
        if let Some(dom) = hist.bins().get(summary.dominant_bin_index) {
            writeln!(
                f,
                "Most values are in bin {}: {} to {}",
                summary.dominant_bin_index + 1,
                g(dom.lower),
                g(dom.upper)
            )?;
            writeln!(
                f,
                "This bin contains {} values ({:.1}% of all data)",
                dom.count, summary.dominant_percentage
            )?;
        }
        writeln!(f, "\nTop {} bins:", summary.top_k.len())?;
        for (rank, r) in summary.top_k.iter().enumerate() {
            writeln!(f, "{}. Bin {}: {} values", rank + 1, r.bin_index + 1, r.count)?;
        }

        writeln!(f, "\nBins ({} scale):", self.scale)?;
        let last = hist.len().saturating_sub(1);
        for (i, (b, s)) in hist.bins().iter().zip(self.scale.scaled_counts(hist)).enumerate() {
            let close = if i == last { ']' } else { ')' };
            let s = s.map_or_else(|| "-".to_string(), g);
            writeln!(
                f,
                "{:>4}  [{}, {}{}  {:>8}  {:>10}",
                i + 1,
                g(b.lower),
                g(b.upper),
                close,
                b.count,
                s
            )?;
        }
        Ok(())
    }
}

pub fn render_report(analysis: &Analysis, digits: usize, scale: ScaleTransform) -> String {
    Report { analysis, digits, scale }.to_string()
}

pub fn export_json(output_path: &Path, analysis: &Analysis) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, analysis)
        .map_err(|e| BinLensError::Other(e.to_string()))?;
    Ok(())
}

pub fn export_csv(output_path: &Path, hist: &Histogram) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    writeln!(file, "bin,lower,upper,count")?;
    for (i, b) in hist.bins().iter().enumerate() {
        writeln!(file, "{},{},{},{}", i, b.lower, b.upper, b.count)?;
    }
    Ok(())
}
