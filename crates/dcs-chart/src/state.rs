//! Projected chart state.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dcs_model::{ChartEvent, EventId, SlotKey, Source, SurfaceKey, ToothKey, ToothStateType};

use crate::mode::ViewMode;

/// Badge shown on a chart slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    /// Event the badge was derived from.
    pub event_id: EventId,
    /// Clinical state.
    pub kind: ToothStateType,
    /// When the event happened (or is planned for).
    pub occurred_at: DateTime<Utc>,
    /// Originating system.
    pub source: Source,
}

impl From<&ChartEvent> for Badge {
    fn from(event: &ChartEvent) -> Self {
        Self {
            event_id: event.id,
            kind: event.kind,
            occurred_at: event.occurred_at,
            source: event.provenance.source.clone(),
        }
    }
}

/// One slot of a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedSlot {
    /// Latest event for the slot.
    pub badge: Badge,
    /// Every event for the slot, oldest first. Empty outside history mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeline: Vec<Badge>,
}

/// Badges for one tooth, as rendered on the odontogram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToothBadges<'a> {
    /// The tooth.
    pub tooth: ToothKey,
    /// Whole-tooth slot, if any.
    pub whole: Option<&'a ProjectedSlot>,
    /// Surface slots in surface order.
    pub surfaces: Vec<(SurfaceKey, &'a ProjectedSlot)>,
}

/// Derived chart state for one mode and instant.
///
/// Never persisted; recompute it from the events whenever inputs change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedChartState {
    /// Mode the state was projected in.
    pub mode: ViewMode,
    /// Evaluation instant; `None` for planned views.
    pub as_of: Option<DateTime<Utc>>,
    /// Slots with at least one contributing event.
    pub slots: BTreeMap<SlotKey, ProjectedSlot>,
}

impl ProjectedChartState {
    /// Empty state.
    pub fn empty(mode: ViewMode, as_of: Option<DateTime<Utc>>) -> Self {
        Self {
            mode,
            as_of,
            slots: BTreeMap::new(),
        }
    }

    /// Look up one slot.
    pub fn slot(&self, slot: SlotKey) -> Option<&ProjectedSlot> {
        self.slots.get(&slot)
    }

    /// All badges for one tooth, or `None` when the tooth has none.
    pub fn tooth(&self, tooth: ToothKey) -> Option<ToothBadges<'_>> {
        let mut badges = ToothBadges {
            tooth,
            whole: None,
            surfaces: Vec::new(),
        };

        let range = SlotKey::whole(tooth)..=SlotKey::new(tooth, Some(SurfaceKey::I));
        for (slot, projected) in self.slots.range(range) {
            match slot.surface {
                None => badges.whole = Some(projected),
                Some(surface) => badges.surfaces.push((surface, projected)),
            }
        }

        (badges.whole.is_some() || !badges.surfaces.is_empty()).then_some(badges)
    }

    /// Teeth with at least one badge, in key order.
    pub fn teeth(&self) -> Vec<ToothKey> {
        let mut teeth: Vec<ToothKey> = self.slots.keys().map(|slot| slot.tooth).collect();
        teeth.dedup();
        teeth
    }

    /// Number of slots with a badge.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot has a badge.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
