//! The chart event log: one patient's events in ingestion order.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dcs_model::{
    ChartEvent, Confidence, EventId, NormalizedRecord, Provenance, RawChartRow, RawCode,
    SlotKey, Source, SurfaceKey, ToothKey, ToothStateType, UnmappedRecord,
};

use crate::record::normalize_row;

/// Counts from one ingestion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Rows that became chart events.
    pub mapped: usize,
    /// Rows retained as unmapped records.
    pub unmapped: usize,
    /// Rows skipped because an earlier ingestion already delivered them.
    pub duplicates: usize,
}

impl IngestSummary {
    /// Rows that were added to the log.
    pub fn added(&self) -> usize {
        self.mapped + self.unmapped
    }
}

/// A chart entry created in this application (treatment planning or a correction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeEntry {
    /// Canonical tooth.
    pub tooth: ToothKey,
    /// Canonical surface, or `None` for whole-tooth entries.
    pub surface: Option<SurfaceKey>,
    /// Clinical state.
    pub kind: ToothStateType,
    /// When the entry happened (or is planned for).
    pub occurred_at: DateTime<Utc>,
    /// Treatment-plan entry not yet performed.
    pub planned: bool,
}

/// Append-only event log for a single patient.
///
/// Events are never removed or edited. Ids are assigned in ingestion order
/// across mapped and unmapped records alike.
#[derive(Debug, Clone, Default)]
pub struct ChartEventLog {
    /// Mapped events, ascending id.
    events: Vec<ChartEvent>,
    /// Unmapped records, ascending id.
    unmapped: Vec<UnmappedRecord>,
    /// `(source, record_id)` pairs already ingested.
    seen: HashSet<(Source, String)>,
    /// Rows without a `record_id`, keyed by their full content.
    seen_rows: HashSet<RawChartRow>,
    next_id: EventId,
}

impl ChartEventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize and append a batch of raw rows.
    ///
    /// Rows are normalized independently. A row whose `record_id` was already
    /// ingested from the same source is skipped, so re-fetched batches merge
    /// without duplicating events. A row without a `record_id` is skipped
    /// when an earlier batch delivered an identical row; identical rows
    /// within one batch are kept, since one export may repeat a procedure.
    pub fn ingest<I>(&mut self, rows: I) -> IngestSummary
    where
        I: IntoIterator<Item = RawChartRow>,
    {
        let mut summary = IngestSummary::default();
        let mut batch_rows = HashSet::new();

        for row in rows {
            let duplicate = match &row.record_id {
                Some(record_id) => !self.seen.insert((row.source.clone(), record_id.clone())),
                None if self.seen_rows.contains(&row) => true,
                None => {
                    batch_rows.insert(row.clone());
                    false
                }
            };
            if duplicate {
                summary.duplicates += 1;
                continue;
            }

            let id = self.allocate_id();
            match normalize_row(id, row) {
                NormalizedRecord::Mapped(event) => {
                    tracing::debug!(
                        id = %event.id,
                        slot = %event.slot(),
                        kind = %event.kind,
                        "mapped row"
                    );
                    summary.mapped += 1;
                    self.events.push(event);
                }
                NormalizedRecord::Unknown(record) => {
                    tracing::warn!(
                        id = %record.id,
                        source = %record.row.source,
                        reason = %record.reason,
                        "row excluded from chart views"
                    );
                    summary.unmapped += 1;
                    self.unmapped.push(record);
                }
            }
        }

        self.seen_rows.extend(batch_rows);

        tracing::info!(
            mapped = summary.mapped,
            unmapped = summary.unmapped,
            duplicates = summary.duplicates,
            "ingested chart rows"
        );
        summary
    }

    /// Append a natively created event and return it.
    pub fn record(&mut self, entry: NativeEntry) -> ChartEvent {
        let event = self.preview(&entry);
        self.next_id = event.id.next();
        self.events.push(event.clone());
        event
    }

    /// The event [`record`](Self::record) would append next, without appending it.
    pub fn preview(&self, entry: &NativeEntry) -> ChartEvent {
        ChartEvent {
            id: self.next_id,
            tooth: entry.tooth,
            surface: entry.surface,
            kind: entry.kind,
            occurred_at: entry.occurred_at,
            planned: entry.planned,
            provenance: Provenance {
                source: Source::Native,
                raw_tooth: RawCode::Integer(i64::from(entry.tooth.fdi_code())),
                raw_surface: entry
                    .surface
                    .map(|surface| RawCode::Text(surface.letter().to_string())),
                confidence: Confidence::Mapped,
            },
        }
    }

    /// Mapped events in ingestion order.
    pub fn events(&self) -> &[ChartEvent] {
        &self.events
    }

    /// Unmapped records awaiting manual resolution, in ingestion order.
    pub fn unmapped(&self) -> &[UnmappedRecord] {
        &self.unmapped
    }

    /// Look up a mapped event by id.
    pub fn get(&self, id: EventId) -> Option<&ChartEvent> {
        self.events
            .binary_search_by_key(&id, |event| event.id)
            .ok()
            .map(|index| &self.events[index])
    }

    /// Events for one slot, oldest first.
    pub fn slot_timeline(&self, slot: SlotKey) -> Vec<&ChartEvent> {
        chronological(&self.events)
            .into_iter()
            .filter(|event| event.slot() == slot)
            .collect()
    }

    /// Total records (mapped and unmapped).
    pub fn len(&self) -> usize {
        self.events.len() + self.unmapped.len()
    }

    /// Whether the log holds no records.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.unmapped.is_empty()
    }

    fn allocate_id(&mut self) -> EventId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }
}

/// Order events by `occurred_at`, breaking ties by ingestion order.
///
/// The result does not depend on the order of the input slice.
pub fn chronological(events: &[ChartEvent]) -> Vec<&ChartEvent> {
    let mut ordered: Vec<&ChartEvent> = events.iter().collect();
    ordered.sort_by_key(|event| (event.occurred_at, event.id));
    ordered
}
