//! Error types for sheetsmith operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for sheetsmith operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input file could not be loaded.
    #[error("Failed to load input: {0}")]
    Jsonl(#[from] sheetsmith_jsonl::Error),

    /// The output path names the input file.
    #[error("Output {} is the input file; choose a different output path", .0.display())]
    OutputIsInput(PathBuf),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The worksheet name is not accepted by Excel.
    #[error("Invalid sheet name '{name}': {reason}")]
    InvalidSheetName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The table does not fit in a single worksheet.
    #[error("Table exceeds worksheet limits: {0}")]
    SheetLimit(String),

    /// The workbook could not be assembled.
    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// A specialized Result type for sheetsmith operations.
pub type Result<T> = std::result::Result<T, Error>;
