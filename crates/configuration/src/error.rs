use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file or environment could not be read or did not match the schema.
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid value for '{field}': {reason}")]
    ValidationError { field: &'static str, reason: String },
}
