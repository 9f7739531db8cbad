pub mod bin_spec;
pub mod histogram;
pub mod loader;
pub mod pipeline;
pub mod report;
pub mod sample;
pub mod scale;
pub mod summary;

pub use binlens_common::{BinLensError, Result};
pub use bin_spec::BinSpec;
pub use histogram::{bin_edges, compute, Bin, Histogram, MAX_BINS};
pub use loader::{load_values, parse_values, LoadedColumn};
pub use pipeline::{analyze, Analysis};
pub use report::{export_csv, export_json, format_sig, render_report, Report};
pub use sample::SampleSet;
pub use scale::ScaleTransform;
pub use summary::{summarize, RankedBin, Summary};
