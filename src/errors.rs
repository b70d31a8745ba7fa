use std::io;

use thiserror::Error;

/// Error type for conversion, subsampling, and MLM generation failures.
#[derive(Debug, Error)]
pub enum PrepError {
    /// Underlying filesystem failure.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Tab-separated record read or write failure.
    #[error("tsv read/write failure: {0}")]
    Tsv(#[from] csv::Error),
    /// Line-delimited JSON decode failure.
    #[error("json decode failure: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid parameters or inconsistent inputs.
    #[error("configuration error: {0}")]
    Configuration(String),
}
