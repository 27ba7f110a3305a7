//! Error types for sheetsmith-jsonl operations.

use std::io;
use thiserror::Error;

/// The error type for sheetsmith-jsonl operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while reading.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A line could not be parsed into the requested record type.
    #[error("line {line_number}: {source}")]
    Parse {
        /// The 1-based line number of the offending line.
        line_number: usize,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A line was not valid UTF-8.
    #[error("line {line_number}: invalid UTF-8")]
    Encoding {
        /// The 1-based line number of the offending line.
        line_number: usize,
    },
}

impl Error {
    /// Returns the line number this error refers to, if any.
    #[must_use]
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Self::Parse { line_number, .. } | Self::Encoding { line_number } => Some(*line_number),
            Self::Io(_) => None,
        }
    }
}

/// A specialized Result type for sheetsmith-jsonl operations.
pub type Result<T> = std::result::Result<T, Error>;
