use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the discount engine, the ledger store and configuration.
#[derive(Debug, Error)]
pub enum DiscountError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Corrupt ledger record at line {line}: {reason}")]
    CorruptRecord { line: u64, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, DiscountError>;

impl DiscountError {
    /// True for errors the user can fix by re-entering input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DiscountError::Validation(_) | DiscountError::MissingRequiredField(_)
        )
    }
}

impl From<std::io::Error> for DiscountError {
    fn from(err: std::io::Error) -> Self {
        DiscountError::StorageUnavailable(err.to_string())
    }
}

impl From<csv::Error> for DiscountError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|pos| pos.line());
        match (line, err.kind()) {
            (Some(line), csv::ErrorKind::Deserialize { err: inner, .. }) => {
                DiscountError::CorruptRecord {
                    line,
                    reason: inner.to_string(),
                }
            }
            (Some(line), csv::ErrorKind::UnequalLengths { .. }) => DiscountError::CorruptRecord {
                line,
                reason: err.to_string(),
            },
            _ => DiscountError::StorageUnavailable(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for DiscountError {
    fn from(err: serde_json::Error) -> Self {
        DiscountError::Config(err.to_string())
    }
}
