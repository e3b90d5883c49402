use core_types::{JoinPolicy, TRADING_DAYS_PER_YEAR};
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty file (or no file at all) yields a
/// usable configuration pointing at `data/stock_data.csv` and
/// `data/benchmark_data.csv` with the "S&P 500" benchmark.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub benchmark: BenchmarkConfig,
    pub analysis: AnalysisConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Where the price tables live and how their date column is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV with one price column per stock.
    pub stock_data_path: PathBuf,
    /// CSV holding the benchmark column(s).
    pub benchmark_data_path: PathBuf,
    /// Name of the column used as the date index.
    pub date_column: String,
    /// `chrono` format string for the date column.
    pub date_format: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Column of the benchmark table the stocks are measured against.
    pub column: String,
}

/// Parameters of the Sharpe ratio calculation.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Annualisation period. The daily ratio is scaled by its square root.
    pub trading_days_per_year: u32,
    /// How stock and benchmark returns are aligned by date.
    pub join: JoinPolicy,
    /// Fail instead of producing an all-NaN table when the dates never overlap.
    pub strict_alignment: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            stock_data_path: PathBuf::from("data/stock_data.csv"),
            benchmark_data_path: PathBuf::from("data/benchmark_data.csv"),
            date_column: "Date".to_string(),
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            column: "S&P 500".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
            join: JoinPolicy::Outer,
            strict_alignment: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "sharpe-ranker.log".to_string(),
        }
    }
}
