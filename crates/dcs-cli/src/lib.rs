//! Library components for the `dental-chart` command-line tool.

pub mod config;
pub mod logging;
pub mod render;
