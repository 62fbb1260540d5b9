//! Reference Index Error Types

use thiserror::Error;

/// Errors while loading reference data
#[derive(Debug, Error)]
pub enum IndexError {
    /// Source file could not be opened or read
    #[error("Reference source I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV syntax or decoding error
    #[error("Reference CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks the configured disease column
    #[error("Missing disease column '{0}' in reference header")]
    MissingDiseaseColumn(String),
}
