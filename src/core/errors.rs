use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the fallible edges of the crate.
#[derive(Error, Debug)]
pub enum OverspendError {
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, OverspendError>;

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] OverspendError),
    #[error("Invalid input: {0}")]
    Input(String),
}

impl From<std::io::Error> for OverspendError {
    fn from(err: std::io::Error) -> Self {
        OverspendError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for OverspendError {
    fn from(err: serde_json::Error) -> Self {
        OverspendError::StorageError(err.to_string())
    }
}
