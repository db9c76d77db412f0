//! Terminal tables for projections, unmapped rows and audit entries.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use chrono::{DateTime, Utc};
use dcs_audit::{AuditAction, AuditEntryView};
use dcs_chart::{Badge, ProjectedChartState, ProjectedSlot, ViewMode, chart_index};
use dcs_model::{SurfaceKey, ToothKey, UnmappedRecord};
use dcs_normalization::IngestSummary;

const TABLE_WIDTH: u16 = 140;

/// One line describing an ingestion batch.
pub fn ingest_line(summary: &IngestSummary) -> String {
    let mut line = format!("{} mapped, {} unmapped", summary.mapped, summary.unmapped);
    if summary.duplicates > 0 {
        line.push_str(&format!(", {} duplicate rows skipped", summary.duplicates));
    }
    line
}

/// Heading shown above a projection.
pub fn projection_heading(state: &ProjectedChartState) -> String {
    match state.as_of {
        Some(as_of) => format!("{} view as of {}", state.mode.label(), format_instant(as_of)),
        None => format!("{} view", state.mode.label()),
    }
}

/// Projection table in odontogram order (UR8 first, LR8 last).
///
/// History views get an extra column listing each slot's timeline.
pub fn chart_table(state: &ProjectedChartState) -> Table {
    let history = state.mode == ViewMode::History;
    let mut table = Table::new();
    apply_table_style(&mut table);

    let mut header = vec![
        header_cell("Tooth"),
        header_cell("Surface"),
        header_cell("State"),
        header_cell("Date"),
        header_cell("Source"),
        header_cell("Event"),
    ];
    if history {
        header.push(header_cell("Timeline"));
    }
    table.set_header(header);

    let mut teeth = state.teeth();
    teeth.sort_by_key(|tooth| chart_index(*tooth));

    for tooth in teeth {
        let Some(badges) = state.tooth(tooth) else {
            continue;
        };
        if let Some(slot) = badges.whole {
            table.add_row(slot_row(tooth, None, slot, state.mode, history));
        }
        for (surface, slot) in badges.surfaces {
            table.add_row(slot_row(tooth, Some(surface), slot, state.mode, history));
        }
    }

    align_column(&mut table, 5, CellAlignment::Right);
    table
}

/// Unmapped rows awaiting manual resolution, in ingestion order.
pub fn unmapped_table(records: &[UnmappedRecord]) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Row"),
        header_cell("Source"),
        header_cell("Tooth code"),
        header_cell("Surface code"),
        header_cell("Reason"),
    ]);

    for record in records {
        let surface = record
            .row
            .surface_code
            .as_ref()
            .map_or_else(|| dim_cell("-"), Cell::new);
        table.add_row(vec![
            dim_cell(record.id),
            Cell::new(&record.row.source),
            Cell::new(&record.row.tooth_code),
            surface,
            Cell::new(record.message()).fg(Color::Yellow),
        ]);
    }

    align_column(&mut table, 0, CellAlignment::Right);
    table
}

/// Audit log rows, newest last.
pub fn audit_table(entries: &[AuditEntryView]) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Action"),
        header_cell("Entity"),
        header_cell("Actor"),
        header_cell("When"),
        header_cell("Changes"),
    ]);

    for entry in entries {
        let changes = if entry.summary.is_empty() {
            dim_cell(entry.summary_text())
        } else {
            Cell::new(entry.summary_text())
        };
        table.add_row(vec![
            Cell::new(entry.action_label).fg(action_color(entry.action)),
            Cell::new(&entry.entity),
            Cell::new(&entry.actor),
            dim_cell(format_instant(entry.created_at)),
            changes,
        ]);
    }
    table
}

fn slot_row(
    tooth: ToothKey,
    surface: Option<SurfaceKey>,
    slot: &ProjectedSlot,
    mode: ViewMode,
    history: bool,
) -> Vec<Cell> {
    let badge = &slot.badge;
    let state = Cell::new(badge.kind.label()).add_attribute(Attribute::Bold);
    let state = if mode.is_planned() {
        state.fg(Color::Yellow)
    } else {
        state.fg(Color::Green)
    };

    let mut row = vec![
        Cell::new(tooth),
        surface.map_or_else(|| dim_cell("whole"), |surface| Cell::new(surface.name())),
        state,
        Cell::new(format_instant(badge.occurred_at)),
        source_cell(badge),
        dim_cell(badge.event_id),
    ];
    if history {
        row.push(Cell::new(timeline_text(&slot.timeline)));
    }
    row
}

fn timeline_text(timeline: &[Badge]) -> String {
    timeline
        .iter()
        .map(|badge| badge.kind.as_str())
        .collect::<Vec<_>>()
        .join(" > ")
}

fn source_cell(badge: &Badge) -> Cell {
    if badge.source.is_legacy() {
        Cell::new(&badge.source).fg(Color::Cyan)
    } else {
        Cell::new(&badge.source)
    }
}

fn action_color(action: AuditAction) -> Color {
    match action {
        AuditAction::Create => Color::Green,
        AuditAction::Update => Color::Yellow,
        AuditAction::Delete => Color::Red,
    }
}

fn format_instant(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(TABLE_WIDTH);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dcs_model::{RawChartRow, RawCode, Source};
    use dcs_normalization::ChartEventLog;

    fn row(tooth: i64, surface: Option<i64>, kind: &str, at: &str, planned: bool) -> RawChartRow {
        RawChartRow {
            source: Source::Legacy("dentrix".to_string()),
            record_id: None,
            tooth_code: RawCode::Integer(tooth),
            surface_code: surface.map(RawCode::Integer),
            kind: kind.to_string(),
            occurred_at: at.to_string(),
            planned,
            defect: None,
        }
    }

    fn log() -> ChartEventLog {
        let mut log = ChartEventLog::new();
        log.ingest(vec![
            row(41, None, "crown", "2024-01-10", false),
            row(18, Some(2), "filling", "2024-02-01", false),
            row(18, Some(2), "root_canal", "2024-03-01", false),
            row(28, Some(3), "filling", "2025-06-01", true),
            row(59, None, "crown", "2024-01-01", false),
        ]);
        log
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap()
    }

    fn rendered(mut table: Table) -> String {
        table.force_no_tty();
        table.to_string()
    }

    #[test]
    fn test_ingest_line() {
        let summary = IngestSummary {
            mapped: 4,
            unmapped: 1,
            duplicates: 0,
        };
        assert_eq!(ingest_line(&summary), "4 mapped, 1 unmapped");

        let summary = IngestSummary {
            duplicates: 2,
            ..summary
        };
        assert_eq!(
            ingest_line(&summary),
            "4 mapped, 1 unmapped, 2 duplicate rows skipped"
        );
    }

    #[test]
    fn test_chart_table_rows_follow_chart_order() {
        let state = dcs_chart::project_at(log().events(), ViewMode::Current, now());
        let table = chart_table(&state);
        assert_eq!(table.row_iter().count(), 2);

        let text = rendered(table);
        let upper = text.find("UR8").expect("UR8 row");
        let lower = text.find("LR1").expect("LR1 row");
        assert!(upper < lower);
        assert!(text.contains("Root canal"));
        assert!(!text.contains("Timeline"));
    }

    #[test]
    fn test_history_table_lists_timeline() {
        let state = dcs_chart::project_at(log().events(), ViewMode::History, now());
        let text = rendered(chart_table(&state));
        assert!(text.contains("Timeline"));
        assert!(text.contains("filling > root_canal"));
    }

    #[test]
    fn test_planned_table() {
        let state = dcs_chart::project_at(log().events(), ViewMode::Planned, now());
        let table = chart_table(&state);
        assert_eq!(table.row_iter().count(), 1);
        assert!(rendered(table).contains("UL8"));
    }

    #[test]
    fn test_projection_heading() {
        let state = ProjectedChartState::empty(ViewMode::Current, Some(now()));
        assert_eq!(projection_heading(&state), "Current view as of 2024-12-31 00:00");
        let state = ProjectedChartState::empty(ViewMode::Planned, None);
        assert_eq!(projection_heading(&state), "Planned view");
    }

    #[test]
    fn test_unmapped_table() {
        let log = log();
        let table = unmapped_table(log.unmapped());
        assert_eq!(table.row_iter().count(), 1);
        assert!(rendered(table).contains("tooth code '59' has no canonical tooth"));
    }
}
