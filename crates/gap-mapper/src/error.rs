//! Mapper error types.

use thiserror::Error;

/// Errors raised while reading tabular input.
#[derive(Debug, Error)]
pub enum MapperError {
    /// The CSV reader rejected the input.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The input file could not be opened.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
