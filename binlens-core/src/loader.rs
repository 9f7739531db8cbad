use std::io::{BufRead, BufReader};
use std::path::Path;

use binlens_common::{InputConfig, Result};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct LoadedColumn {
    pub values: Vec<f64>,
    /// Rows skipped as missing, unparsable or non-finite.
    pub dropped: usize,
}

pub fn load_values(path: &Path, cfg: &InputConfig) -> Result<LoadedColumn> {
    let file = std::fs::File::open(path)?;
    let loaded = parse_values(BufReader::new(file), cfg)?;
    debug!(path = %path.display(), values = loaded.values.len(), dropped = loaded.dropped, "loaded samples");
    Ok(loaded)
}

// Trims whitespace and one level of surrounding double quotes.
fn unquote(cell: &str) -> &str {
    let cell = cell.trim();
    cell.strip_prefix('"')
        .and_then(|c| c.strip_suffix('"'))
        .map_or(cell, str::trim)
}

/// Reads one column of a delimited text source, dropping cells that are not finite numbers.
pub fn parse_values<R: BufRead>(reader: R, cfg: &InputConfig) -> Result<LoadedColumn> {
    let mut values = Vec::new();
    let mut dropped = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line_no == 0 && cfg.has_header {
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        let cell = line.split(cfg.delimiter).nth(cfg.column).map(unquote);
        match cell.and_then(|c| c.parse::<f64>().ok()).filter(|v| v.is_finite()) {
            Some(v) => values.push(v),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(dropped, column = cfg.column, "dropped rows without a numeric value");
    }
    Ok(LoadedColumn { values, dropped })
}
