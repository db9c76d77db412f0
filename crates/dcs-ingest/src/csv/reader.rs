//! Header-driven CSV reader.

use std::collections::BTreeMap;
use std::io::Cursor;

use serde::Deserialize;

use dcs_model::{RawChartRow, RawCode, RowDefect, Source};

use crate::error::{IngestError, Result};

use super::cells::{code_cell, flag_cell, non_empty};

/// Columns every row export must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = ["source", "tooth_code", "kind", "occurred_at"];

/// One CSV record before cell conversion.
#[derive(Debug, Deserialize)]
struct CsvRow {
    source: String,
    #[serde(default)]
    record_id: String,
    tooth_code: String,
    #[serde(default)]
    surface_code: String,
    kind: String,
    occurred_at: String,
    #[serde(default)]
    planned: String,
}

/// Parse CSV content with a header row.
///
/// Column order is free; `record_id`, `surface_code` and `planned` are
/// optional. Code cells are kept verbatim (integers stay integers) so that
/// normalization sees exactly what the source exported.
///
/// Only a broken header or unreadable content fails the batch. A record
/// with the wrong field count or an unreadable cell comes back as a
/// [`RawChartRow::malformed`] row carrying its line and raw cells.
pub fn read_csv_rows(content: &str, origin: &str) -> Result<Vec<RawChartRow>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(::csv::Trim::Headers)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let headers = reader
        .headers()
        .map_err(|e| csv_error(origin, 1, &e))?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header.eq_ignore_ascii_case(column)) {
            return Err(IngestError::MissingColumn {
                column,
                origin: origin.to_string(),
            });
        }
    }
    let headers = ::csv::StringRecord::from(
        headers
            .iter()
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>(),
    );

    let mut rows = Vec::new();
    let mut malformed = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| {
            let line = e.position().map_or(0, ::csv::Position::line);
            csv_error(origin, line, &e)
        })?;
        let line = record.position().map_or(0, ::csv::Position::line);

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let converted = if record.len() == headers.len() {
            record
                .deserialize::<CsvRow>(Some(&headers))
                .map_err(|e| e.to_string())
                .and_then(convert_row)
        } else {
            Err(format!(
                "expected {} fields, found {}",
                headers.len(),
                record.len()
            ))
        };

        match converted {
            Ok(row) => rows.push(row),
            Err(message) => {
                tracing::debug!(origin, line, "malformed CSV record: {message}");
                malformed += 1;
                rows.push(RawChartRow::malformed(RowDefect {
                    line,
                    message,
                    cells: raw_cells(&headers, &record),
                }));
            }
        }
    }

    tracing::trace!(origin, rows = rows.len(), malformed, "parsed CSV rows");
    Ok(rows)
}

fn convert_row(row: CsvRow) -> std::result::Result<RawChartRow, String> {
    let invalid = |field: &str, value: &str| format!("invalid {field} value '{value}'");

    let source = Source::try_from(row.source.trim().to_string())
        .map_err(|_| invalid("source", &row.source))?;
    let planned = flag_cell(&row.planned).ok_or_else(|| invalid("planned", &row.planned))?;

    Ok(RawChartRow {
        source,
        record_id: non_empty(&row.record_id),
        // A blank tooth code is kept so normalization can report it.
        tooth_code: code_cell(&row.tooth_code).unwrap_or_else(|| RawCode::Text(String::new())),
        surface_code: code_cell(&row.surface_code),
        kind: row.kind.trim().to_string(),
        occurred_at: row.occurred_at.trim().to_string(),
        planned,
        defect: None,
    })
}

/// Cells keyed by header; cells past the last header get positional names.
fn raw_cells(
    headers: &::csv::StringRecord,
    record: &::csv::StringRecord,
) -> BTreeMap<String, String> {
    record
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = headers
                .get(index)
                .map_or_else(|| format!("column {}", index + 1), str::to_string);
            (name, cell.to_string())
        })
        .collect()
}

fn csv_error(origin: &str, line: u64, error: &::csv::Error) -> IngestError {
    IngestError::CsvParse {
        origin: origin.to_string(),
        line,
        message: error.to_string(),
    }
}
