use std::io;
use std::path::{Path, PathBuf};

use binlens_common::{BinMode, Config};
use binlens_core::{
    analyze, export_csv, export_json, load_values, render_report, Analysis, ScaleTransform,
};
use clap::{Args, CommandFactory, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn parse_mode(s: &str) -> Result<BinMode, String> {
    s.parse().map_err(|e: binlens_common::BinLensError| e.to_string())
}

fn parse_scale(s: &str) -> Result<ScaleTransform, String> {
    s.parse().map_err(|e: binlens_common::BinLensError| e.to_string())
}

#[derive(Parser)]
#[command(name = "binlens", version, about = "Histogram and frequency summary of a numeric column")]
struct Cli {
    /// Enable debug logging (BINLENS_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct BinningArgs {
    /// fixed-width or fixed-count
    #[arg(long, value_parser = parse_mode)]
    mode: Option<BinMode>,
    #[arg(long)]
    width: Option<f64>,
    #[arg(long)]
    count: Option<usize>,
    /// Divide every sample by this before binning
    #[arg(long)]
    scale_factor: Option<f64>,
    #[arg(long)]
    top_k: Option<usize>,
    #[arg(long)]
    delimiter: Option<char>,
    /// 0-based column index
    #[arg(long)]
    column: Option<usize>,
    /// Skip the first line
    #[arg(long)]
    header: bool,
}

impl BinningArgs {
    fn apply(&self, config: &mut Config) {
        let b = &mut config.binning;
        if let Some(w) = self.width {
            b.width = w;
            b.mode = BinMode::FixedWidth;
        }
        if let Some(c) = self.count {
            b.count = c;
            b.mode = BinMode::FixedCount;
        }
        if let Some(m) = self.mode {
            b.mode = m; // explicit mode wins over the one implied by --width/--count
        }
        if let Some(f) = self.scale_factor {
            b.scale_factor = f;
        }
        if let Some(k) = self.top_k {
            b.top_k = k;
        }
        let input = &mut config.input;
        if let Some(d) = self.delimiter {
            input.delimiter = d;
        }
        if let Some(c) = self.column {
            input.column = c;
        }
        if self.header {
            input.has_header = true;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the histogram report
    Summary {
        path: String,
        #[command(flatten)]
        binning: BinningArgs,
        /// Frequency axis scale for the bin table: linear, log or sqrt
        #[arg(long, value_parser = parse_scale)]
        scale: Option<ScaleTransform>,
        /// Also write summary.json into the configured output directory
        #[arg(long)]
        save: bool,
    },
    /// Write the histogram as JSON or CSV
    Export {
        path: String,
        #[command(flatten)]
        binning: BinningArgs,
        #[arg(long)]
        format: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
    /// Print shell completions
    Completions { shell: clap_complete::Shell },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("BINLENS_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    // a missing file yields defaults; a malformed one is an error
    let mut config = Config::load()?;
    match cli.command {
        Commands::Summary { path, binning, scale, save } => {
            binning.apply(&mut config);
            run_summary(&path, scale, save, &config)?
        }
        Commands::Export { path, binning, format, output } => {
            binning.apply(&mut config);
            run_export(&path, format, output, &config)?
        }
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "binlens", &mut io::stdout());
        }
    }
    Ok(())
}

fn load_and_analyze(input_path: &str, config: &Config) -> anyhow::Result<Analysis> {
    if !Path::new(input_path).exists() {
        anyhow::bail!("input not found: {input_path}");
    }
    config.validate()?;
    let loaded = load_values(Path::new(input_path), &config.input)?;
    debug!(values = loaded.values.len(), dropped = loaded.dropped, "input cleaned");
    let analysis = analyze(loaded.values, &config.binning)
        .map_err(|e| anyhow::anyhow!("{input_path}: {e}"))?;
    Ok(analysis)
}

fn run_summary(
    input_path: &str,
    scale: Option<ScaleTransform>,
    save: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let scale = match scale {
        Some(s) => s,
        None => config.report.scale.parse()?,
    };
    let analysis = load_and_analyze(input_path, config)?;
    print!("{}", render_report(&analysis, config.report.significant_digits, scale));
    if save {
        let out_dir = Path::new(&config.report.output_dir);
        std::fs::create_dir_all(out_dir)?;
        let out_path = out_dir.join("summary.json");
        export_json(&out_path, &analysis)?;
        println!("Summary saved to {}", out_path.display());
    }
    Ok(())
}

fn run_export(
    input_path: &str,
    format: Option<String>,
    output: Option<String>,
    config: &Config,
) -> anyhow::Result<()> {
    let format = format.unwrap_or_else(|| config.report.format.clone());
    if format != "json" && format != "csv" {
        anyhow::bail!("Unknown format: {format} (use json or csv)");
    }
    let analysis = load_and_analyze(input_path, config)?;
    let out_path = match output {
        Some(o) => PathBuf::from(o),
        None => Path::new(&config.report.output_dir).join(format!("histogram.{format}")),
    };
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if format == "json" {
        export_json(&out_path, &analysis)?;
    } else {
        export_csv(&out_path, &analysis.histogram)?;
    }
    println!("Exported to {}", out_path.display());
    Ok(())
}
