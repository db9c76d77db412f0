//! Chart row ingestion utilities.
//!
//! This crate reads procedure, treatment-plan and legacy-import exports into
//! [`RawChartRow`](dcs_model::RawChartRow) batches. It validates only the
//! file shape; the meaning of tooth and surface codes is left to
//! normalization. A single row that does not fit the schema is returned as
//! a malformed row rather than failing the batch.
//!
//! # Features
//!
//! - **CSV Loading**: Header-driven CSV exports with flexible code cells
//! - **JSON Loading**: Arrays of rows as served by the collaborator endpoints
//! - **Format Detection**: By file extension
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use dcs_ingest::read_rows;
//!
//! let rows = read_rows(Path::new("exports/legacy_charting.csv"))?;
//! ```

mod csv;
mod error;
mod json;

use std::path::Path;

use dcs_model::RawChartRow;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use crate::csv::{REQUIRED_COLUMNS, read_csv_rows};
pub use json::read_json_rows;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// JSON array of row objects.
    Json,
}

impl RowFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Read a row file, choosing the parser from its extension.
pub fn read_rows(path: &Path) -> Result<Vec<RawChartRow>> {
    let format = RowFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let origin = path.display().to_string();
    let rows = read_rows_from_str(&content, format, &origin)?;
    tracing::debug!(path = %origin, rows = rows.len(), "read chart rows");
    Ok(rows)
}

/// Parse in-memory content in the given format.
///
/// `origin` labels the content in error messages.
pub fn read_rows_from_str(
    content: &str,
    format: RowFormat,
    origin: &str,
) -> Result<Vec<RawChartRow>> {
    match format {
        RowFormat::Csv => read_csv_rows(content, origin),
        RowFormat::Json => read_json_rows(content, origin),
    }
}
