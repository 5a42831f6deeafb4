use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date '{input}', expected format {format}")]
    DateFormat { input: String, format: String },

    #[error("schema error: {0}")]
    Schema(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("chart error: {0}")]
    Chart(String),
}

/// Rejections raised while building a [`crate::Transaction`] from user input.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),

    #[error("amount is not a number: '{0}'")]
    InvalidAmount(String),

    #[error("unknown category '{0}', expected Income (I) or Expense (E)")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, Error>;
