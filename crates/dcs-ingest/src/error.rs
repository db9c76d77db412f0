//! Error types for chart row ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading row exports.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Row file not found.
    #[error("row file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported export format.
    #[error("unsupported row file format: {path} (expected .csv or .json)")]
    UnsupportedFormat { path: PathBuf },

    // === CSV Errors ===
    /// Required column missing from the CSV header.
    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { column: &'static str, origin: String },

    /// Malformed CSV record.
    #[error("failed to parse CSV {origin} at line {line}: {message}")]
    CsvParse {
        origin: String,
        line: u64,
        message: String,
    },

    // === JSON Errors ===
    /// Malformed JSON payload.
    #[error("failed to parse JSON {origin}: {message}")]
    JsonParse { origin: String, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
