use analytics::{
    calculate_excess_returns_with, daily_returns, describe, AlignmentOptions, ColumnSummary,
    SharpeEngine, SharpeReport,
};
use analyzer::{Analyzer, Selection};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{Config, LoggingConfig, OutputFormat};
use core_types::{JoinPolicy, TimeSeriesTable};
use datasource::{read_data, LoaderOptions};
use serde::Serialize;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// The main entry point for the Sharpe ranker.
fn main() {
    // A missing .env file is fine; it only supplies optional SHARPE_* overrides.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config =
        configuration::load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let _log_guard = init_tracing(&config.logging)?;
    tracing::debug!(?config, "Configuration loaded");

    // Execute the appropriate command
    match cli.command {
        Commands::Rank(args) => {
            args.apply(&mut config);
            configuration::validate(&config)?;
            handle_rank(&config)
        }
        Commands::Describe(args) => {
            args.apply(&mut config);
            configuration::validate(&config)?;
            handle_describe(&config)
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Rank stocks by annualised Sharpe ratio against a benchmark index.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./sharpe.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute annualised Sharpe ratios and pick the best stock.
    Rank(RunArgs),
    /// Print summary statistics of prices, returns and excess returns.
    Describe(RunArgs),
}

/// Overrides for the values read from the configuration file.
#[derive(Args)]
struct RunArgs {
    /// CSV file with one price column per stock.
    #[arg(long)]
    stocks: Option<PathBuf>,

    /// CSV file with the benchmark price column(s).
    #[arg(long)]
    benchmark: Option<PathBuf>,

    /// Benchmark column to compare against (e.g., "S&P 500").
    #[arg(long)]
    benchmark_column: Option<String>,

    /// Trading days per year used to annualise the daily ratio.
    #[arg(long)]
    trading_days: Option<u32>,

    /// How stock and benchmark dates are aligned: outer, inner or left.
    #[arg(long)]
    join: Option<JoinPolicy>,

    /// Fail if stock and benchmark dates never overlap.
    #[arg(long)]
    strict: bool,

    /// Output format.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl RunArgs {
    fn apply(self, config: &mut Config) {
        if let Some(path) = self.stocks {
            config.data.stock_data_path = path;
        }
        if let Some(path) = self.benchmark {
            config.data.benchmark_data_path = path;
        }
        if let Some(column) = self.benchmark_column {
            config.benchmark.column = column;
        }
        if let Some(days) = self.trading_days {
            config.analysis.trading_days_per_year = days;
        }
        if let Some(join) = self.join {
            config.analysis.join = join;
        }
        if self.strict {
            config.analysis.strict_alignment = true;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// The returned guard must be kept alive so the file writer flushes on exit.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, &logging.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_writer(writer).with_ansi(false))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()?;
            Ok(None)
        }
    }
}

// ==============================================================================
// Data Loading
// ==============================================================================

/// Loads the stock table and the selected benchmark column.
fn load_inputs(config: &Config) -> anyhow::Result<(TimeSeriesTable, TimeSeriesTable)> {
    let options = LoaderOptions {
        date_column: config.data.date_column.clone(),
        date_format: config.data.date_format.clone(),
    };

    let stocks_path = &config.data.stock_data_path;
    let stocks = read_data(stocks_path, &options)
        .with_context(|| format!("Failed to read stock data from {}", stocks_path.display()))?;

    let benchmark_path = &config.data.benchmark_data_path;
    let benchmarks = read_data(benchmark_path, &options).with_context(|| {
        format!("Failed to read benchmark data from {}", benchmark_path.display())
    })?;

    let benchmark = benchmarks.select(&config.benchmark.column).with_context(|| {
        format!(
            "Benchmark column '{}' not found in {} (available: {})",
            config.benchmark.column,
            benchmark_path.display(),
            benchmarks.column_names().join(", ")
        )
    })?;

    Ok((stocks, benchmark))
}

fn alignment(config: &Config) -> AlignmentOptions {
    AlignmentOptions {
        join: config.analysis.join,
        strict: config.analysis.strict_alignment,
    }
}

// ==============================================================================
// Rank Command Logic
// ==============================================================================

#[derive(Serialize)]
struct RankOutput<'a> {
    report: &'a SharpeReport,
    selection: &'a Selection,
}

/// Handles the orchestration of the ranking pipeline.
fn handle_rank(config: &Config) -> anyhow::Result<()> {
    let (stocks, benchmark) = load_inputs(config)?;
    let engine = SharpeEngine::new(config.analysis.trading_days_per_year, alignment(config));
    tracing::info!(
        stocks = ?stocks.column_names(),
        benchmark = %config.benchmark.column,
        trading_days = engine.trading_days_per_year(),
        join = %engine.alignment().join,
        strict = engine.alignment().strict,
        "Ranking stocks"
    );

    let report = engine
        .calculate(&stocks, &benchmark)
        .context("Failed to calculate Sharpe ratios")?;
    let selection = Analyzer::new()
        .run(&report)
        .context("Failed to select the best stock")?;

    match config.output.format {
        OutputFormat::Json => {
            let output = RankOutput {
                report: &report,
                selection: &selection,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Table => {
            println!("Annualised Sharpe Ratio vs {}:", config.benchmark.column);
            println!("{}", report_table(&report));
            println!(
                "\nIn this dataset, {} has the best Sharpe Ratio at {:.2}.",
                selection.best_asset, selection.best_ratio
            );
        }
    }

    Ok(())
}

fn report_table(report: &SharpeReport) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Asset",
            "Days",
            "Mean excess",
            "Std excess",
            "Daily Sharpe",
            "Annualised Sharpe",
        ]);

    for row in report.rows() {
        table.add_row(vec![
            row.asset,
            row.observations.to_string(),
            display_or_nan(row.mean_excess_return),
            display_or_nan(row.std_excess_return),
            display_or_nan(row.daily_sharpe_ratio),
            display_or_nan(row.annualised_sharpe_ratio),
        ]);
    }
    table
}

fn display_or_nan<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "NaN".to_string(), |v| v.to_string())
}

// ==============================================================================
// Describe Command Logic
// ==============================================================================

#[derive(Serialize)]
struct DescribeSection {
    title: String,
    first_date: Option<String>,
    last_date: Option<String>,
    columns: Vec<ColumnSummary>,
}

impl DescribeSection {
    fn new(title: &str, table: &TimeSeriesTable) -> Self {
        Self {
            title: title.to_string(),
            first_date: table.dates().first().map(|d| d.to_string()),
            last_date: table.dates().last().map(|d| d.to_string()),
            columns: describe(table),
        }
    }
}

/// Summarises every intermediate table of the pipeline.
fn handle_describe(config: &Config) -> anyhow::Result<()> {
    let (stocks, benchmark) = load_inputs(config)?;
    let stock_returns = daily_returns(&stocks);
    let benchmark_returns = daily_returns(&benchmark);
    let excess_returns =
        calculate_excess_returns_with(&stock_returns, &benchmark_returns, &alignment(config))
            .context("Failed to calculate excess returns")?;

    let sections = vec![
        DescribeSection::new("Stocks", &stocks),
        DescribeSection::new("Benchmark", &benchmark),
        DescribeSection::new("Daily stock returns", &stock_returns),
        DescribeSection::new("Daily benchmark returns", &benchmark_returns),
        DescribeSection::new("Excess returns", &excess_returns),
    ];

    match config.output.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sections)?),
        OutputFormat::Table => {
            for section in &sections {
                println!(
                    "\n{} ({} -> {})",
                    section.title,
                    section.first_date.as_deref().unwrap_or("-"),
                    section.last_date.as_deref().unwrap_or("-")
                );
                println!("{}", summary_table(&section.columns));
            }
        }
    }

    Ok(())
}

fn summary_table(columns: &[ColumnSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
        ]);

    for c in columns {
        table.add_row(vec![
            c.name.clone(),
            c.count.to_string(),
            format!("{:.6}", c.mean),
            format!("{:.6}", c.std),
            format!("{:.6}", c.min),
            format!("{:.6}", c.p25),
            format!("{:.6}", c.median),
            format!("{:.6}", c.p75),
            format!("{:.6}", c.max),
        ]);
    }
    table
}
