use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Unknown series '{0}'")]
    UnknownSeries(String),

    #[error("Ratio for '{0}' is undefined")]
    UndefinedRatio(String),
}
