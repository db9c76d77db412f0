//! One open chart view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dcs_audit::{AuditAction, AuditEntryView, AuditLog, AuditRecord};
use dcs_chart::{ProjectedChartState, ViewMode, ViewQuery, project_query};
use dcs_model::{ChartEvent, EventId, RawChartRow, SurfaceKey, ToothKey, ToothStateType};
use dcs_normalization::{ChartEventLog, IngestSummary, NativeEntry};

use crate::error::{Result, SessionError};
use crate::selection::{Selection, SelectionAction, SelectionState};
use crate::sequencer::{RequestId, RequestSequencer};
use crate::settings::ChartSettings;

/// Audit entity type for chart events.
pub const CHART_EVENT_ENTITY: &str = "chart_event";

// =============================================================================
// LOADING
// =============================================================================

/// Why a row fetch failed, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    pub message: String,
    pub retryable: bool,
}

impl LoadFailure {
    pub fn new(message: impl Into<String>, retryable: bool) -> Self {
        Self {
            message: message.into(),
            retryable,
        }
    }
}

/// Load state shown by the hosting view.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The latest load failed; the chart keeps what it already had.
    Failed { message: String, retryable: bool },
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether a retry should be offered.
    pub fn can_retry(&self) -> bool {
        matches!(self, Self::Failed { retryable: true, .. })
    }
}

/// What happened to a completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Rows were merged into the event log.
    Applied(IngestSummary),
    /// A newer load was started; the response was discarded.
    Stale,
    /// The latest load failed.
    Failed,
}

// =============================================================================
// CORRECTIONS
// =============================================================================

/// Replacement values for a corrected chart event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Correction {
    /// New clinical state, or keep the original.
    pub kind: Option<ToothStateType>,
    /// New surface (`Some(None)` for whole tooth), or keep the original.
    pub surface: Option<Option<SurfaceKey>>,
}

// =============================================================================
// SESSION
// =============================================================================

/// State owned by one open chart view.
///
/// Created when the view opens and dropped when it closes. Only the
/// [`ViewQuery`] is meant to outlive it, through [`ChartSession::query_string`].
#[derive(Debug)]
pub struct ChartSession {
    patient_id: String,
    log: ChartEventLog,
    query: ViewQuery,
    selection: SelectionState,
    loads: RequestSequencer,
    status: LoadStatus,
    audit: AuditLog,
    audit_preview: usize,
}

impl ChartSession {
    pub fn new(patient_id: impl Into<String>, settings: &ChartSettings) -> Self {
        Self {
            patient_id: patient_id.into(),
            log: ChartEventLog::new(),
            query: ViewQuery::new(settings.default_mode, None),
            selection: SelectionState::with_history_depth(settings.history_depth),
            loads: RequestSequencer::new(),
            status: LoadStatus::Idle,
            audit: AuditLog::new(),
            audit_preview: settings.audit_preview,
        }
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn log(&self) -> &ChartEventLog {
        &self.log
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }

    // === Loading ===

    /// Start a row fetch. Any earlier in-flight fetch becomes stale.
    pub fn begin_load(&mut self) -> RequestId {
        let id = self.loads.issue();
        self.status = LoadStatus::Loading;
        tracing::debug!(request = %id, "chart load started");
        id
    }

    /// Apply the result of a row fetch.
    ///
    /// Only the latest fetch is applied. Merging rows never touches the
    /// selection or its history.
    pub fn complete_load(
        &mut self,
        id: RequestId,
        result: std::result::Result<Vec<RawChartRow>, LoadFailure>,
    ) -> LoadOutcome {
        if !self.loads.is_current(id) {
            tracing::warn!(request = %id, "discarding stale chart load response");
            return LoadOutcome::Stale;
        }

        match result {
            Ok(rows) => {
                let summary = self.log.ingest(rows);
                self.status = LoadStatus::Ready;
                LoadOutcome::Applied(summary)
            }
            Err(failure) => {
                tracing::warn!(
                    request = %id,
                    retryable = failure.retryable,
                    "chart load failed: {}",
                    failure.message
                );
                self.status = LoadStatus::Failed {
                    message: failure.message,
                    retryable: failure.retryable,
                };
                LoadOutcome::Failed
            }
        }
    }

    /// Merge rows that did not come through a sequenced fetch (e.g. a file import).
    pub fn ingest(&mut self, rows: Vec<RawChartRow>) -> IngestSummary {
        self.log.ingest(rows)
    }

    // === View ===

    pub fn query(&self) -> ViewQuery {
        self.query
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.query = self.query.with_mode(mode);
    }

    pub fn set_as_of(&mut self, as_of: Option<DateTime<Utc>>) {
        self.query = self.query.with_as_of(as_of);
    }

    /// Restore the view from navigable state. On error the view is unchanged.
    pub fn restore_query(&mut self, query: &str) -> Result<()> {
        self.query = ViewQuery::from_query_string(query)?;
        Ok(())
    }

    /// Navigable state for the current view.
    pub fn query_string(&self) -> String {
        self.query.to_query_string()
    }

    /// Project the current view as of now.
    pub fn projection(&self) -> ProjectedChartState {
        self.projection_at(Utc::now())
    }

    /// Project the current view, using `now` when the view has no as-of instant.
    pub fn projection_at(&self, now: DateTime<Utc>) -> ProjectedChartState {
        project_query(self.log.events(), &self.query, now)
    }

    // === Selection ===

    /// Apply a selection action and return the new selection.
    pub fn dispatch(&mut self, action: SelectionAction) -> Selection {
        let state = std::mem::take(&mut self.selection);
        self.selection = state.apply(action);
        self.selection.current()
    }

    // === Mutations ===

    /// Add a treatment-plan entry.
    ///
    /// The audit record is built before the event is appended, so a
    /// rejected record leaves the log unchanged.
    pub fn plan_treatment(
        &mut self,
        tooth: ToothKey,
        surface: Option<SurfaceKey>,
        kind: ToothStateType,
        at: DateTime<Utc>,
        actor: &str,
    ) -> Result<ChartEvent> {
        let entry = NativeEntry {
            tooth,
            surface,
            kind,
            occurred_at: at,
            planned: true,
        };
        let pending = self.log.preview(&entry);

        let record = AuditRecord::new(
            CHART_EVENT_ENTITY,
            pending.id.0.to_string(),
            AuditAction::Create,
            actor,
            Utc::now(),
            None,
            Some(serde_json::to_value(&pending)?),
        )?;
        let event = self.log.record(entry);
        self.audit.append(record);

        tracing::info!(event = %event.id, slot = %event.slot(), "treatment planned");
        Ok(event)
    }

    /// Correct an event by recording a superseding one.
    ///
    /// The original event is left untouched. The audit record pairs the
    /// original (before) with its replacement (after) and is built before
    /// the replacement is appended.
    pub fn record_correction(
        &mut self,
        event_id: EventId,
        correction: Correction,
        at: DateTime<Utc>,
        actor: &str,
    ) -> Result<ChartEvent> {
        let original = self
            .log
            .get(event_id)
            .cloned()
            .ok_or(SessionError::UnknownEvent(event_id))?;

        if at < original.occurred_at {
            return Err(SessionError::CorrectionPredatesEvent {
                event: event_id,
                occurred_at: original.occurred_at,
                at,
            });
        }

        let entry = NativeEntry {
            tooth: original.tooth,
            surface: correction.surface.unwrap_or(original.surface),
            kind: correction.kind.unwrap_or(original.kind),
            occurred_at: at,
            planned: original.planned,
        };
        let pending = self.log.preview(&entry);

        let record = AuditRecord::new(
            CHART_EVENT_ENTITY,
            event_id.0.to_string(),
            AuditAction::Update,
            actor,
            Utc::now(),
            Some(serde_json::to_value(&original)?),
            Some(serde_json::to_value(&pending)?),
        )?;
        let replacement = self.log.record(entry);
        self.audit.append(record);

        tracing::info!(
            original = %event_id,
            replacement = %replacement.id,
            "chart event corrected"
        );
        Ok(replacement)
    }

    /// Audit rows for display, oldest first.
    pub fn audit_entries(&self) -> Vec<AuditEntryView> {
        self.audit
            .records()
            .iter()
            .map(|record| AuditEntryView::from_record(record, self.audit_preview))
            .collect()
    }
}
