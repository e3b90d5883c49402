use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AnalysisConfig, BenchmarkConfig, Config, DataConfig, LoggingConfig, OutputConfig,
    OutputFormat,
};

/// Base name of the configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_NAME: &str = "sharpe";

/// Prefix for environment overrides, e.g. `SHARPE_BENCHMARK__COLUMN`.
pub const ENV_PREFIX: &str = "SHARPE";

/// Loads the application configuration.
///
/// Sources, lowest precedence first: built-in defaults, the TOML file, then
/// `SHARPE_*` environment variables (nested keys separated by `__`). With an
/// explicit `path` the file must exist; otherwise `sharpe.toml` in the working
/// directory is used if present.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_config_with_env(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<Config, ConfigError> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;
    Ok(config)
}

/// Checks the invariants serde cannot express.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.analysis.trading_days_per_year == 0 {
        return Err(ConfigError::ValidationError {
            field: "analysis.trading_days_per_year",
            reason: "must be greater than zero".to_string(),
        });
    }
    if config.benchmark.column.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "benchmark.column",
            reason: "must not be empty".to_string(),
        });
    }
    if config.data.date_column.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data.date_column",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
