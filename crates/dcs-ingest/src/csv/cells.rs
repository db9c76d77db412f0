//! Cell-level conversions shared by the CSV reader.

use dcs_model::RawCode;

/// Read a code cell, keeping integers as integers.
///
/// Blank cells yield `None`.
pub(crate) fn code_cell(value: &str) -> Option<RawCode> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(match trimmed.parse::<i64>() {
        Ok(number) => RawCode::Integer(number),
        Err(_) => RawCode::Text(trimmed.to_string()),
    })
}

/// Parse a yes/no flag. Blank means `false`.
pub(crate) fn flag_cell(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" | "no" | "n" => Some(false),
        "true" | "1" | "yes" | "y" => Some(true),
        _ => None,
    }
}

/// `None` for blank cells, trimmed text otherwise.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
