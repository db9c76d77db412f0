//! The projection fold.

use std::collections::btree_map::Entry;

use chrono::{DateTime, Utc};

use dcs_model::ChartEvent;
use dcs_normalization::chronological;

use crate::mode::{ViewMode, ViewQuery};
use crate::state::{Badge, ProjectedChartState, ProjectedSlot};

/// Project events for a mode, evaluating "now" when `as_of` is absent.
pub fn project(
    events: &[ChartEvent],
    mode: ViewMode,
    as_of: Option<DateTime<Utc>>,
) -> ProjectedChartState {
    project_at(events, mode, as_of.unwrap_or_else(Utc::now))
}

/// Project events for a mode at an explicit instant.
///
/// - `Current`: latest performed event per slot with `occurred_at <= as_of`.
/// - `History`: as `Current`, plus the full ordered timeline per slot.
/// - `Planned`: latest planned event per slot; `as_of` is ignored.
///
/// Events are folded in `(occurred_at, id)` order, so among events with the
/// same timestamp the later-ingested one wins.
pub fn project_at(
    events: &[ChartEvent],
    mode: ViewMode,
    as_of: DateTime<Utc>,
) -> ProjectedChartState {
    let recorded_as_of = (!mode.is_planned()).then_some(as_of);
    let keep_timeline = matches!(mode, ViewMode::History);

    let state = chronological(events)
        .into_iter()
        .filter(|event| match mode {
            ViewMode::Planned => event.planned,
            ViewMode::Current | ViewMode::History => {
                !event.planned && event.occurred_at <= as_of
            }
        })
        .fold(
            ProjectedChartState::empty(mode, recorded_as_of),
            |mut state, event| {
                let badge = Badge::from(event);
                match state.slots.entry(event.slot()) {
                    Entry::Occupied(mut occupied) => {
                        let slot = occupied.get_mut();
                        if keep_timeline {
                            slot.timeline.push(badge.clone());
                        }
                        slot.badge = badge;
                    }
                    Entry::Vacant(vacant) => {
                        let timeline = if keep_timeline {
                            vec![badge.clone()]
                        } else {
                            Vec::new()
                        };
                        vacant.insert(ProjectedSlot { badge, timeline });
                    }
                }
                state
            },
        );

    tracing::debug!(
        mode = %mode,
        events = events.len(),
        slots = state.len(),
        "projected chart"
    );
    state
}

/// Project the view a [`ViewQuery`] describes, using `now` for an absent as-of.
pub fn project_query(
    events: &[ChartEvent],
    query: &ViewQuery,
    now: DateTime<Utc>,
) -> ProjectedChartState {
    project_at(events, query.mode(), query.as_of().unwrap_or(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dcs_model::{
        Confidence, EventId, Provenance, Quadrant, RawCode, SlotKey, Source, SurfaceKey, ToothKey,
        ToothStateType,
    };

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
    }

    fn event(
        id: u64,
        tooth: ToothKey,
        kind: ToothStateType,
        day: u32,
        planned: bool,
    ) -> ChartEvent {
        ChartEvent {
            id: EventId(id),
            tooth,
            surface: None,
            kind,
            occurred_at: at(day),
            planned,
            provenance: Provenance {
                source: Source::Native,
                raw_tooth: RawCode::Integer(i64::from(tooth.fdi_code())),
                raw_surface: None,
                confidence: Confidence::Mapped,
            },
        }
    }

    fn ur5() -> ToothKey {
        ToothKey::new(Quadrant::UpperRight, 5).unwrap()
    }

    #[test]
    fn test_current_latest_wins() {
        let events = vec![
            event(0, ur5(), ToothStateType::Filling, 1, false),
            event(1, ur5(), ToothStateType::Crown, 5, false),
        ];
        let state = project_at(&events, ViewMode::Current, at(10));
        let slot = state.slot(SlotKey::whole(ur5())).unwrap();
        assert_eq!(slot.badge.kind, ToothStateType::Crown);
        assert!(slot.timeline.is_empty());
    }

    #[test]
    fn test_current_respects_as_of() {
        let events = vec![
            event(0, ur5(), ToothStateType::Filling, 1, false),
            event(1, ur5(), ToothStateType::Crown, 5, false),
        ];
        let state = project_at(&events, ViewMode::Current, at(3));
        assert_eq!(
            state.slot(SlotKey::whole(ur5())).unwrap().badge.kind,
            ToothStateType::Filling
        );

        let state = project_at(&events, ViewMode::Current, at(5));
        assert_eq!(
            state.slot(SlotKey::whole(ur5())).unwrap().badge.kind,
            ToothStateType::Crown
        );
    }

    #[test]
    fn test_history_timeline() {
        let events = vec![
            event(2, ur5(), ToothStateType::RootCanal, 4, false),
            event(0, ur5(), ToothStateType::Filling, 1, false),
            event(1, ur5(), ToothStateType::Crown, 9, true),
        ];
        let state = project_at(&events, ViewMode::History, at(10));
        let slot = state.slot(SlotKey::whole(ur5())).unwrap();
        let kinds: Vec<_> = slot.timeline.iter().map(|badge| badge.kind).collect();
        assert_eq!(kinds, vec![ToothStateType::Filling, ToothStateType::RootCanal]);
        assert_eq!(slot.badge.kind, ToothStateType::RootCanal);
    }

    #[test]
    fn test_planned_ignores_as_of() {
        let events = vec![
            event(0, ur5(), ToothStateType::Filling, 1, false),
            event(1, ur5(), ToothStateType::Crown, 20, true),
        ];
        let state = project_at(&events, ViewMode::Planned, at(2));
        assert_eq!(state.as_of, None);
        assert_eq!(
            state.slot(SlotKey::whole(ur5())).unwrap().badge.kind,
            ToothStateType::Crown
        );
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_same_timestamp_later_ingestion_wins() {
        let events = vec![
            event(7, ur5(), ToothStateType::Crown, 3, false),
            event(3, ur5(), ToothStateType::Filling, 3, false),
        ];
        let state = project_at(&events, ViewMode::Current, at(10));
        let slot = state.slot(SlotKey::whole(ur5())).unwrap();
        assert_eq!(slot.badge.event_id, EventId(7));
    }

    #[test]
    fn test_tooth_badges() {
        let mut surface_event = event(1, ur5(), ToothStateType::Filling, 2, false);
        surface_event.surface = Some(SurfaceKey::D);
        let events = vec![event(0, ur5(), ToothStateType::Crown, 1, false), surface_event];

        let state = project_at(&events, ViewMode::Current, at(10));
        let badges = state.tooth(ur5()).unwrap();
        assert_eq!(badges.whole.unwrap().badge.kind, ToothStateType::Crown);
        assert_eq!(badges.surfaces.len(), 1);
        assert_eq!(badges.surfaces[0].0, SurfaceKey::D);
        assert_eq!(state.teeth(), vec![ur5()]);

        let other = ToothKey::new(Quadrant::LowerLeft, 1).unwrap();
        assert!(state.tooth(other).is_none());
    }

    #[test]
    fn test_project_query_uses_now_when_absent() {
        let events = vec![event(0, ur5(), ToothStateType::Filling, 5, false)];
        let query = ViewQuery::new(ViewMode::Current, None);
        assert!(project_query(&events, &query, at(4)).is_empty());
        assert_eq!(project_query(&events, &query, at(6)).len(), 1);
    }

    #[test]
    fn test_serialized_state_is_keyed_by_slot() {
        let mut surface_event = event(1, ur5(), ToothStateType::Filling, 2, false);
        surface_event.surface = Some(SurfaceKey::D);
        let events = vec![event(0, ur5(), ToothStateType::Crown, 1, false), surface_event];

        let state = project_at(&events, ViewMode::Current, at(10));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["mode"], "current");
        assert_eq!(json["slots"]["UR5"]["badge"]["kind"], "crown");
        assert_eq!(json["slots"]["UR5/D"]["badge"]["kind"], "filling");
        assert!(json["slots"]["UR5"].get("timeline").is_none());

        let back: ProjectedChartState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
