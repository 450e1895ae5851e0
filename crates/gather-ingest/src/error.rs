//! Error types for workbook loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening workbooks and reading worksheets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Workbook file or folder does not exist.
    #[error("workbook not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file metadata or contents.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Extension is not a spreadsheet or CSV format.
    #[error("unsupported workbook format '{extension}': {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The spreadsheet reader rejected the file or a worksheet.
    #[error("failed to read spreadsheet {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },

    /// Failed to parse a CSV worksheet.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    // === Worksheet Errors ===
    /// Requested worksheet is not in the workbook.
    #[error("worksheet '{sheet}' not found in {path}")]
    SheetNotFound { sheet: String, path: PathBuf },

    /// Workbook contains no worksheets at all.
    #[error("workbook has no worksheets: {path}")]
    EmptyWorkbook { path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
