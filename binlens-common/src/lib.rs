pub mod config;
pub use config::{BinMode, BinningConfig, Config, InputConfig, ReportConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinLensError {
    #[error("empty dataset: {0}")]
    EmptyDataset(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("{transform} scale is undefined for {value}")]
    Domain { transform: &'static str, value: f64 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BinLensError>;
