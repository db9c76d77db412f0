//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use dcs_audit::{AuditEntryView, summarize};
use dcs_chart::ProjectedChartState;
use dcs_cli::config::Settings;
use dcs_cli::logging::redact_value;
use dcs_cli::render::{audit_table, chart_table, ingest_line, projection_heading, unmapped_table};
use dcs_client::ChartSourceClient;
use dcs_model::RawChartRow;
use dcs_normalization::ChartEventLog;
use dcs_session::{ChartSession, LoadFailure, LoadOutcome, LoadStatus};

use crate::cli::{AuditArgs, ChartArgs, DiffArgs, FetchArgs, UnmappedArgs, ViewArgs};

pub fn run_chart(args: &ChartArgs, settings: &Settings) -> Result<()> {
    let rows = read_rows(&args.rows)?;
    let patient = args
        .rows
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut session = ChartSession::new(patient, &settings.chart);
    apply_view(&mut session, args.view);
    let summary = session.ingest(rows);

    print_projection(&session.projection(), args.json)?;
    if !args.json {
        println!("{}", ingest_line(&summary));
        if summary.unmapped > 0 {
            println!(
                "Run `dental-chart unmapped {}` to inspect excluded rows.",
                args.rows.display()
            );
        }
    }
    Ok(())
}

pub fn run_unmapped(args: &UnmappedArgs) -> Result<()> {
    let rows = read_rows(&args.rows)?;
    let total = rows.len();
    let mut log = ChartEventLog::new();
    log.ingest(rows);

    if log.unmapped().is_empty() {
        println!("All {total} rows mapped.");
    } else {
        println!("{}", unmapped_table(log.unmapped()));
        println!("{} of {total} rows need manual resolution.", log.unmapped().len());
    }
    Ok(())
}

pub fn run_diff(args: &DiffArgs, settings: &Settings) -> Result<()> {
    let before = read_snapshot(&args.before)?;
    let after = read_snapshot(&args.after)?;
    let changed = dcs_audit::diff(before.as_ref(), after.as_ref());

    if args.all {
        for field in &changed {
            println!("{field}");
        }
    }
    let max_preview = args.max_preview.unwrap_or(settings.chart.audit_preview);
    println!("{}", summarize(&changed, max_preview));
    Ok(())
}

pub fn run_fetch(args: &FetchArgs, settings: &Settings) -> Result<()> {
    let client = client_for(args.base_url.as_deref(), settings)?;
    let runtime = runtime()?;

    let mut session = ChartSession::new(&args.patient_id, &settings.chart);
    apply_view(&mut session, args.view);

    tracing::info!(
        patient = redact_value(&args.patient_id),
        server = %client.base_url(),
        "fetching chart rows"
    );
    let request = session.begin_load();
    let result = runtime
        .block_on(client.fetch_all(&args.patient_id))
        .map_err(|error| {
            tracing::debug!("fetch failed: {error}");
            LoadFailure::new(format!("{} ({error})", error.user_message()), error.is_retryable())
        });

    match session.complete_load(request, result) {
        LoadOutcome::Applied(summary) => {
            print_projection(&session.projection(), args.json)?;
            if !args.json {
                println!("{}", ingest_line(&summary));
            }
            Ok(())
        }
        LoadOutcome::Stale => bail!("chart load was superseded"),
        LoadOutcome::Failed => match session.status() {
            LoadStatus::Failed {
                message,
                retryable: true,
            } => bail!("{message}; retrying may succeed"),
            LoadStatus::Failed { message, .. } => bail!("{message}"),
            _ => bail!("chart load failed"),
        },
    }
}

pub fn run_audit(args: &AuditArgs, settings: &Settings) -> Result<()> {
    let client = client_for(args.base_url.as_deref(), settings)?;
    let runtime = runtime()?;

    let records = runtime
        .block_on(client.fetch_audit(&args.entity_type, &args.entity_id))
        .with_context(|| format!("failed to fetch audit history for {}", args.entity_type))?;

    if records.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }
    let entries: Vec<AuditEntryView> = records
        .iter()
        .map(|record| AuditEntryView::from_record(record, settings.chart.audit_preview))
        .collect();
    println!("{}", audit_table(&entries));
    Ok(())
}

fn apply_view(session: &mut ChartSession, view: ViewArgs) {
    if let Some(mode) = view.mode {
        session.set_mode(mode.into());
    }
    if view.as_of.is_some() {
        session.set_as_of(view.as_of);
    }
}

fn print_projection(state: &ProjectedChartState, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(state).context("failed to serialize chart")?;
        println!("{text}");
        return Ok(());
    }

    println!("{}", projection_heading(state));
    if state.is_empty() {
        println!("No chart entries.");
    } else {
        println!("{}", chart_table(state));
    }
    Ok(())
}

fn read_rows(path: &Path) -> Result<Vec<RawChartRow>> {
    dcs_ingest::read_rows(path)
        .with_context(|| format!("failed to read rows from {}", path.display()))
}

/// Read a JSON snapshot; `null` means the entity did not exist.
fn read_snapshot(path: &Path) -> Result<Option<Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("invalid JSON in snapshot {}", path.display()))?;
    Ok((!value.is_null()).then_some(value))
}

fn client_for(base_url: Option<&str>, settings: &Settings) -> Result<ChartSourceClient> {
    let base_url = base_url.unwrap_or(&settings.server.base_url);
    ChartSourceClient::new(base_url, settings.server.timeout())
        .with_context(|| format!("cannot connect to {base_url}"))
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}
