//! CSV row exports.

mod cells;
mod reader;

pub use reader::{REQUIRED_COLUMNS, read_csv_rows};
