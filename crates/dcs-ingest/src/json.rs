//! JSON row exports.
//!
//! The collaborator endpoints serve either a bare array of rows or an
//! envelope object with a `rows` field; both are accepted here.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use dcs_model::{RawChartRow, RowDefect};

use crate::error::{IngestError, Result};

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Rows(Vec<Value>),
    Envelope { rows: Vec<Value> },
}

/// Parse JSON content into rows.
///
/// Content that is not JSON, or not an array of rows, fails the batch. An
/// element that does not fit the row schema comes back as a
/// [`RawChartRow::malformed`] row numbered by its 1-based array position.
pub fn read_json_rows(content: &str, origin: &str) -> Result<Vec<RawChartRow>> {
    let payload: Payload = serde_json::from_str(content).map_err(|e| IngestError::JsonParse {
        origin: origin.to_string(),
        message: e.to_string(),
    })?;

    let elements = match payload {
        Payload::Rows(elements) | Payload::Envelope { rows: elements } => elements,
    };

    let mut malformed = 0usize;
    let rows: Vec<RawChartRow> = elements
        .into_iter()
        .zip(1u64..)
        .map(|(element, line)| {
            let cells = raw_cells(&element);
            match serde_json::from_value::<RawChartRow>(element) {
                Ok(row) => row,
                Err(e) => {
                    tracing::debug!(origin, line, "malformed JSON row: {e}");
                    malformed += 1;
                    RawChartRow::malformed(RowDefect {
                        line,
                        message: e.to_string(),
                        cells,
                    })
                }
            }
        })
        .collect();

    tracing::trace!(origin, rows = rows.len(), malformed, "parsed JSON rows");
    Ok(rows)
}

/// Property values as text; a non-object element is kept whole under `row`.
fn raw_cells(element: &Value) -> BTreeMap<String, String> {
    let text = |value: &Value| match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };

    match element {
        Value::Object(object) => object
            .iter()
            .map(|(name, value)| (name.clone(), text(value)))
            .collect(),
        other => BTreeMap::from([("row".to_string(), text(other))]),
    }
}
