//! CLI argument definitions for `dental-chart`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use dcs_chart::ViewMode;
use dcs_normalization::parse_occurred_at;

#[derive(Parser)]
#[command(
    name = "dental-chart",
    version,
    about = "Dental chart reconciliation - project legacy and native chart rows",
    long_about = "Reconcile dental chart rows from legacy and native sources.\n\n\
                  Normalizes FDI tooth codes and surface codes, projects current, history\n\
                  and planned odontogram views, and summarizes audit diffs."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Settings file (default: config.toml in the platform config directory).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project a CSV or JSON row file and print the chart.
    Chart(ChartArgs),

    /// List rows that could not be mapped to a tooth or surface.
    Unmapped(UnmappedArgs),

    /// Summarize the fields that differ between two JSON snapshots.
    Diff(DiffArgs),

    /// Fetch every feed for a patient from the practice server and print the chart.
    Fetch(FetchArgs),

    /// Fetch and print the audit history of one entity.
    Audit(AuditArgs),
}

/// View selection shared by `chart` and `fetch`.
#[derive(Args, Clone, Copy)]
pub struct ViewArgs {
    /// View mode (default from settings).
    #[arg(long = "mode", value_enum)]
    pub mode: Option<ModeArg>,

    /// Evaluate the chart as of this instant (RFC 3339 or YYYY-MM-DD).
    ///
    /// Ignored in planned mode.
    #[arg(long = "as-of", value_name = "INSTANT", value_parser = parse_instant)]
    pub as_of: Option<DateTime<Utc>>,
}

#[derive(Args)]
pub struct ChartArgs {
    /// Row file (.csv or .json).
    #[arg(value_name = "ROWS")]
    pub rows: PathBuf,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Print the projection as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct UnmappedArgs {
    /// Row file (.csv or .json).
    #[arg(value_name = "ROWS")]
    pub rows: PathBuf,
}

#[derive(Args)]
pub struct DiffArgs {
    /// Snapshot before the change (JSON object).
    #[arg(value_name = "BEFORE")]
    pub before: PathBuf,

    /// Snapshot after the change (JSON object).
    #[arg(value_name = "AFTER")]
    pub after: PathBuf,

    /// Field names shown before "+N more" (default from settings).
    #[arg(long = "max-preview", value_name = "N")]
    pub max_preview: Option<usize>,

    /// Print every changed field, one per line.
    #[arg(long = "all")]
    pub all: bool,
}

#[derive(Args)]
pub struct FetchArgs {
    /// Patient identifier on the practice server.
    #[arg(value_name = "PATIENT_ID")]
    pub patient_id: String,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Server base URL (overrides settings).
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Print the projection as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct AuditArgs {
    /// Entity type, e.g. chart_event or patient.
    #[arg(value_name = "ENTITY_TYPE")]
    pub entity_type: String,

    /// Entity identifier.
    #[arg(value_name = "ENTITY_ID")]
    pub entity_id: String,

    /// Server base URL (overrides settings).
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,
}

/// CLI view mode choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Current,
    History,
    Planned,
}

impl From<ModeArg> for ViewMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Current => ViewMode::Current,
            ModeArg::History => ViewMode::History,
            ModeArg::Planned => ViewMode::Planned,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    parse_occurred_at(value).ok_or_else(|| format!("'{value}' is not an RFC 3339 instant or date"))
}
