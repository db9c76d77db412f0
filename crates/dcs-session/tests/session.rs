//! Chart session behavior: loading, merging, view restore and audited edits.

use chrono::{DateTime, TimeZone, Utc};
use dcs_audit::AuditAction;
use dcs_chart::ViewMode;
use dcs_model::{
    EventId, Quadrant, RawChartRow, RawCode, SlotKey, Source, SurfaceKey, ToothKey,
    ToothStateType,
};
use dcs_session::{
    ChartSession, ChartSettings, Correction, LoadFailure, LoadOutcome, LoadStatus,
    Selection, SelectionAction, SessionError,
};

fn row(
    record_id: &str,
    tooth: i64,
    kind: &str,
    occurred_at: &str,
    planned: bool,
) -> RawChartRow {
    RawChartRow {
        source: Source::Legacy("dentrix".to_string()),
        record_id: Some(record_id.to_string()),
        tooth_code: RawCode::Integer(tooth),
        surface_code: None,
        kind: kind.to_string(),
        occurred_at: occurred_at.to_string(),
        planned,
        defect: None,
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn ur5() -> ToothKey {
    ToothKey::new(Quadrant::UpperRight, 5).unwrap()
}

fn session() -> ChartSession {
    ChartSession::new("patient-42", &ChartSettings::default())
}

#[test]
fn stale_load_is_discarded() {
    let mut session = session();
    let first = session.begin_load();
    let second = session.begin_load();

    let rows = vec![row("A", 15, "crown", "2024-01-01", false)];
    let outcome = session.complete_load(second, Ok(rows));
    assert!(matches!(outcome, LoadOutcome::Applied(summary) if summary.mapped == 1));

    let rows = vec![row("B", 16, "filling", "2023-01-01", false)];
    let outcome = session.complete_load(first, Ok(rows));
    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(session.log().len(), 1);
    assert_eq!(session.status(), &LoadStatus::Ready);
}

#[test]
fn stale_failure_is_not_surfaced() {
    let mut session = session();
    let first = session.begin_load();
    let second = session.begin_load();

    assert_eq!(
        session.complete_load(first, Err(LoadFailure::new("timeout", true))),
        LoadOutcome::Stale
    );
    assert!(session.status().is_loading());

    assert_eq!(
        session.complete_load(second, Err(LoadFailure::new("server error", true))),
        LoadOutcome::Failed
    );
    assert!(session.status().can_retry());
}

#[test]
fn merging_rows_keeps_selection_and_history() {
    let mut session = session();
    session.dispatch(SelectionAction::SelectTooth(ur5()));
    session.dispatch(SelectionAction::ToggleSurface(SurfaceKey::O));
    let before = session.selection().clone();

    let id = session.begin_load();
    session.complete_load(id, Ok(vec![row("A", 15, "filling", "2024-01-01", false)]));
    let id = session.begin_load();
    session.complete_load(id, Err(LoadFailure::new("offline", true)));

    assert_eq!(session.selection(), &before);
    assert_eq!(session.log().events().len(), 1);
}

#[test]
fn refetch_merges_without_duplicates() {
    let mut session = session();
    let rows = vec![
        row("A", 15, "filling", "2024-01-01", false),
        row("B", 59, "crown", "2024-01-01", false),
    ];
    let id = session.begin_load();
    session.complete_load(id, Ok(rows.clone()));
    let id = session.begin_load();
    let outcome = session.complete_load(id, Ok(rows));

    assert!(matches!(outcome, LoadOutcome::Applied(summary) if summary.duplicates == 2));
    assert_eq!(session.log().events().len(), 1);
    assert_eq!(session.log().unmapped().len(), 1);
}

#[test]
fn view_query_restores_identical_projection() {
    let mut session = session();
    session.ingest(vec![
        row("A", 15, "filling", "2023-01-01", false),
        row("B", 15, "crown", "2024-03-01", false),
        row("C", 15, "implant", "2024-09-01", true),
    ]);
    session.set_mode(ViewMode::History);
    session.set_as_of(Some(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()));
    let shared = session.query_string();
    let projection = session.projection_at(now());

    let mut reopened = ChartSession::new("patient-42", &ChartSettings::default());
    reopened.ingest(vec![
        row("A", 15, "filling", "2023-01-01", false),
        row("B", 15, "crown", "2024-03-01", false),
        row("C", 15, "implant", "2024-09-01", true),
    ]);
    reopened.restore_query(&shared).unwrap();
    assert_eq!(reopened.projection_at(now()), projection);

    let slot = projection.slot(SlotKey::whole(ur5())).unwrap();
    assert_eq!(slot.badge.kind, ToothStateType::Filling);
    assert_eq!(slot.timeline.len(), 1);
}

#[test]
fn invalid_restore_keeps_view() {
    let mut session = session();
    session.set_mode(ViewMode::Planned);
    let err = session.restore_query("view=tomorrow").unwrap_err();
    assert!(matches!(err, SessionError::View(_)));
    assert_eq!(session.query().mode(), ViewMode::Planned);
}

#[test]
fn planning_treatment_is_audited() {
    let mut session = session();
    let at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
    let event = session
        .plan_treatment(ur5(), Some(SurfaceKey::D), ToothStateType::Filling, at, "dr.lee")
        .unwrap();

    assert!(event.planned);
    assert_eq!(event.provenance.source, Source::Native);

    session.set_mode(ViewMode::Planned);
    let planned = session.projection_at(now());
    assert!(planned.slot(SlotKey::new(ur5(), Some(SurfaceKey::D))).is_some());

    session.set_mode(ViewMode::Current);
    assert!(session.projection_at(at).is_empty());

    let records = session.audit_log().records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].action(), AuditAction::Create);
    assert!(records[0].before().is_none());
    assert_eq!(session.audit_entries()[0].summary_text(), "—");
}

#[test]
fn correction_supersedes_without_editing() {
    let mut session = session();
    session.ingest(vec![row("A", 15, "filling", "2024-01-01", false)]);
    let original = session.log().events()[0].clone();

    let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
    let replacement = session
        .record_correction(
            original.id,
            Correction {
                kind: Some(ToothStateType::Crown),
                surface: None,
            },
            at,
            "dr.lee",
        )
        .unwrap();

    assert_eq!(session.log().get(original.id), Some(&original));
    assert_eq!(replacement.kind, ToothStateType::Crown);

    let current = session.projection_at(now());
    let badge = &current.slot(SlotKey::whole(ur5())).unwrap().badge;
    assert_eq!(badge.event_id, replacement.id);

    let record = &session.audit_log().records()[0];
    assert_eq!(record.action(), AuditAction::Update);
    assert_eq!(record.entity_id(), original.id.0.to_string());
    let entry = &session.audit_entries()[0];
    assert_eq!(entry.summary_text(), "id, kind, occurred_at +1 more");
}

#[test]
fn correction_errors() {
    let mut session = session();
    session.ingest(vec![row("A", 15, "filling", "2024-01-01", false)]);

    let err = session
        .record_correction(EventId(99), Correction::default(), now(), "dr.lee")
        .unwrap_err();
    assert!(matches!(err, SessionError::UnknownEvent(EventId(99))));

    let early = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let err = session
        .record_correction(EventId(0), Correction::default(), early, "dr.lee")
        .unwrap_err();
    assert!(matches!(err, SessionError::CorrectionPredatesEvent { .. }));
    assert!(session.audit_log().is_empty());
}

#[test]
fn dispatch_reports_selection() {
    let mut session = session();
    assert_eq!(
        session.dispatch(SelectionAction::SelectTooth(ur5())),
        Selection::Tooth(ur5())
    );
    assert_eq!(session.dispatch(SelectionAction::Undo), Selection::Idle);
}

#[test]
fn reloading_rows_without_record_ids_keeps_one_event() {
    let mut session = session();
    let mut feed_row = row("", 15, "filling", "2024-01-01", false);
    feed_row.record_id = None;

    for attempt in 0..3 {
        let request = session.begin_load();
        let outcome = session.complete_load(request, Ok(vec![feed_row.clone()]));
        let LoadOutcome::Applied(summary) = outcome else {
            panic!("expected applied load");
        };
        assert_eq!(summary.duplicates, usize::from(attempt > 0));
    }

    assert_eq!(session.log().events().len(), 1);
    session.set_mode(ViewMode::History);
    let history = session.projection_at(now());
    assert_eq!(history.slot(SlotKey::whole(ur5())).unwrap().timeline.len(), 1);
}

#[test]
fn rejected_audit_record_leaves_log_unchanged() {
    let mut session = session();
    session.ingest(vec![row("A", 15, "filling", "2024-01-01", false)]);
    let at = Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();

    let err = session
        .plan_treatment(ur5(), None, ToothStateType::Crown, at, " ")
        .unwrap_err();
    assert!(matches!(err, SessionError::Audit(_)));
    let err = session
        .record_correction(EventId(0), Correction::default(), at, "")
        .unwrap_err();
    assert!(matches!(err, SessionError::Audit(_)));

    assert_eq!(session.log().len(), 1);
    assert!(session.audit_log().is_empty());

    let event = session
        .plan_treatment(ur5(), None, ToothStateType::Crown, at, "dr.lee")
        .unwrap();
    assert_eq!(event.id, EventId(1));
    assert_eq!(session.audit_log().records()[0].entity_id(), "1");
    assert_eq!(session.log().len(), session.audit_log().len() + 1);
}
