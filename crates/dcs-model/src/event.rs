//! Chart events and the boundary row schema they are built from.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::kind::ToothStateType;
use crate::provenance::{Confidence, Provenance, RawCode, Source};
use crate::tooth::{SlotKey, SurfaceKey, ToothKey};

// =============================================================================
// RAW ROW (boundary schema)
// =============================================================================

/// A procedure, treatment-plan or legacy-import row exactly as the
/// collaborator endpoints deliver it.
///
/// Nothing here is trusted: codes stay raw and the timestamp stays text
/// until normalization decides what it means.
///
/// Equality and hashing cover every field, so an id-less row can be
/// recognized when a later batch delivers it again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawChartRow {
    /// Originating system.
    pub source: Source,
    /// Identifier in the originating system, used to merge re-fetched batches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
    /// Two-digit FDI-style tooth code.
    pub tooth_code: RawCode,
    /// Surface letter, positional index, or nothing for whole-tooth rows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_code: Option<RawCode>,
    /// Tooth state type name.
    pub kind: String,
    /// When the procedure happened (or is planned for).
    pub occurred_at: String,
    /// Whether this row is a treatment-plan entry.
    #[serde(default)]
    pub planned: bool,
    /// Set by readers when the row did not match the schema; the typed
    /// fields then hold whatever cells could be salvaged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defect: Option<RowDefect>,
}

/// A row the reader could not fit to [`RawChartRow`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowDefect {
    /// 1-based CSV line or JSON array position.
    pub line: u64,
    /// What was wrong, naming the offending field when known.
    pub message: String,
    /// Cells as received, keyed by column or property name.
    pub cells: BTreeMap<String, String>,
}

impl RawChartRow {
    /// Build a placeholder row around a defect, salvaging the cells that
    /// still carry meaning.
    ///
    /// A missing or blank source falls back to [`Source::unattributed`].
    pub fn malformed(defect: RowDefect) -> Self {
        let cell = |name: &str| {
            defect
                .cells
                .get(name)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            source: cell("source")
                .and_then(|name| Source::try_from(name).ok())
                .unwrap_or_else(Source::unattributed),
            record_id: cell("record_id"),
            tooth_code: RawCode::Text(cell("tooth_code").unwrap_or_default()),
            surface_code: cell("surface_code").map(RawCode::Text),
            kind: cell("kind").unwrap_or_default(),
            occurred_at: cell("occurred_at").unwrap_or_default(),
            planned: false,
            defect: Some(defect),
        }
    }
}

// =============================================================================
// EVENT IDENTITY
// =============================================================================

/// Ingestion sequence number of a record within one patient's event log.
///
/// Assigned in ingestion order; used as the stable tie-breaker when two
/// events share a timestamp.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub u64);

impl EventId {
    /// The id following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// CHART EVENT
// =============================================================================

/// A canonical clinical fact with fully mapped addressing.
///
/// Events are immutable; corrections are new events that supersede older
/// ones by `occurred_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEvent {
    /// Ingestion sequence number.
    pub id: EventId,
    /// Canonical tooth.
    pub tooth: ToothKey,
    /// Canonical surface, or `None` for whole-tooth events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<SurfaceKey>,
    /// Clinical state.
    pub kind: ToothStateType,
    /// When the event happened (or is planned for).
    pub occurred_at: DateTime<Utc>,
    /// Origin and mapping outcome.
    pub provenance: Provenance,
    /// Treatment-plan entry not yet performed.
    pub planned: bool,
}

impl ChartEvent {
    /// Chart slot addressed by this event.
    #[inline]
    pub fn slot(&self) -> SlotKey {
        SlotKey::new(self.tooth, self.surface)
    }
}

// =============================================================================
// UNMAPPED RECORD
// =============================================================================

/// Why a raw row could not become a [`ChartEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedReason {
    /// Tooth code outside the FDI quadrant/position ranges.
    InvalidToothCode,
    /// Non-empty surface code that is neither a letter nor an index.
    UnrecognizedSurface,
    /// Kind outside the closed tooth state enumeration.
    UnknownKind,
    /// Timestamp that does not parse.
    InvalidTimestamp,
    /// Row the reader could not fit to the import schema.
    MalformedRow,
}

impl UnmappedReason {
    /// Short label for inspection queues.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::InvalidToothCode => "Invalid tooth code",
            Self::UnrecognizedSurface => "Unrecognized surface",
            Self::UnknownKind => "Unknown kind",
            Self::InvalidTimestamp => "Invalid timestamp",
            Self::MalformedRow => "Malformed row",
        }
    }
}

impl fmt::Display for UnmappedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A raw row whose addressing or content could not be mapped.
///
/// Retained verbatim for the manual resolution queue and excluded from
/// every projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedRecord {
    /// Ingestion sequence number.
    pub id: EventId,
    /// Row exactly as received.
    pub row: RawChartRow,
    /// First check that failed.
    pub reason: UnmappedReason,
}

impl UnmappedRecord {
    /// Provenance with `confidence = unknown`.
    pub fn provenance(&self) -> Provenance {
        Provenance {
            source: self.row.source.clone(),
            raw_tooth: self.row.tooth_code.clone(),
            raw_surface: self.row.surface_code.clone(),
            confidence: Confidence::Unknown,
        }
    }

    /// Human-readable description for the resolution queue.
    pub fn message(&self) -> String {
        match self.reason {
            UnmappedReason::InvalidToothCode => {
                format!("tooth code '{}' has no canonical tooth", self.row.tooth_code)
            }
            UnmappedReason::UnrecognizedSurface => format!(
                "surface code '{}' is not a known surface",
                self.row
                    .surface_code
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default()
            ),
            UnmappedReason::UnknownKind => {
                format!("kind '{}' is not a known tooth state", self.row.kind)
            }
            UnmappedReason::InvalidTimestamp => {
                format!("timestamp '{}' could not be parsed", self.row.occurred_at)
            }
            UnmappedReason::MalformedRow => match &self.row.defect {
                Some(defect) => format!("line {}: {}", defect.line, defect.message),
                None => "row does not match the import schema".to_string(),
            },
        }
    }
}

// =============================================================================
// NORMALIZED RECORD
// =============================================================================

/// Outcome of normalizing one raw row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "confidence", rename_all = "lowercase")]
pub enum NormalizedRecord {
    /// Fully mapped chart event.
    Mapped(ChartEvent),
    /// Row retained for manual resolution.
    Unknown(UnmappedRecord),
}

impl NormalizedRecord {
    /// Ingestion sequence number.
    pub fn id(&self) -> EventId {
        match self {
            Self::Mapped(event) => event.id,
            Self::Unknown(record) => record.id,
        }
    }

    /// Whether the row mapped cleanly.
    pub fn is_mapped(&self) -> bool {
        matches!(self, Self::Mapped(_))
    }

    /// Mapping confidence.
    pub fn confidence(&self) -> Confidence {
        match self {
            Self::Mapped(_) => Confidence::Mapped,
            Self::Unknown(_) => Confidence::Unknown,
        }
    }

    /// The chart event, if mapped.
    pub fn as_event(&self) -> Option<&ChartEvent> {
        match self {
            Self::Mapped(event) => Some(event),
            Self::Unknown(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RawChartRow {
        RawChartRow {
            source: Source::Legacy("dentrix".to_string()),
            record_id: Some("R-1".to_string()),
            tooth_code: RawCode::Integer(59),
            surface_code: Some(RawCode::Integer(2)),
            kind: "filling".to_string(),
            occurred_at: "2024-01-05".to_string(),
            planned: false,
            defect: None,
        }
    }

    #[test]
    fn test_raw_row_defaults() {
        let json = r#"{
            "source": "native",
            "tooth_code": "28",
            "kind": "crown",
            "occurred_at": "2024-01-01"
        }"#;
        let row: RawChartRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.source, Source::Native);
        assert_eq!(row.tooth_code, RawCode::Text("28".to_string()));
        assert!(row.surface_code.is_none());
        assert!(row.record_id.is_none());
        assert!(!row.planned);
    }

    #[test]
    fn test_unmapped_provenance_is_unknown() {
        let record = UnmappedRecord {
            id: EventId(3),
            row: sample_row(),
            reason: UnmappedReason::InvalidToothCode,
        };
        let provenance = record.provenance();
        assert_eq!(provenance.confidence, Confidence::Unknown);
        assert_eq!(provenance.raw_tooth, RawCode::Integer(59));
        assert_eq!(record.message(), "tooth code '59' has no canonical tooth");
    }

    #[test]
    fn test_malformed_row_salvages_cells() {
        let cells = BTreeMap::from([
            ("source".to_string(), " ".to_string()),
            ("tooth_code".to_string(), "11".to_string()),
            ("kind".to_string(), "crown".to_string()),
            ("planned".to_string(), "maybe".to_string()),
        ]);
        let row = RawChartRow::malformed(RowDefect {
            line: 3,
            message: "invalid planned value 'maybe'".to_string(),
            cells,
        });

        assert_eq!(row.source, Source::unattributed());
        assert_eq!(row.tooth_code, RawCode::Text("11".to_string()));
        assert_eq!(row.kind, "crown");
        assert!(row.surface_code.is_none());

        let record = UnmappedRecord {
            id: EventId(0),
            row,
            reason: UnmappedReason::MalformedRow,
        };
        assert_eq!(record.message(), "line 3: invalid planned value 'maybe'");
        assert_eq!(record.reason.label(), "Malformed row");
    }

    #[test]
    fn test_event_id_ordering() {
        assert!(EventId(1) < EventId(2));
        assert_eq!(EventId(1).next(), EventId(2));
        assert_eq!(EventId(7).to_string(), "#7");
    }
}
