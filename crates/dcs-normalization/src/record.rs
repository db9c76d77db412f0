//! Row normalization.

use dcs_model::{
    ChartEvent, Confidence, EventId, NormalizedRecord, Provenance, RawChartRow, ToothStateType,
    UnmappedReason, UnmappedRecord,
};

use crate::datetime::parse_occurred_at;
use crate::surface::{SurfaceOutcome, classify_surface};
use crate::tooth::{normalize_tooth, tooth_code_from_raw};

/// Normalize one raw row independently of every other row.
///
/// Rows a reader already flagged as malformed are retained as such.
/// Otherwise checks run in a fixed order (tooth, surface, kind, timestamp)
/// and the first failure becomes the [`UnmappedReason`]. The row is never
/// dropped.
pub fn normalize_row(id: EventId, row: RawChartRow) -> NormalizedRecord {
    let unknown = |row: RawChartRow, reason: UnmappedReason| {
        NormalizedRecord::Unknown(UnmappedRecord { id, row, reason })
    };

    if row.defect.is_some() {
        return unknown(row, UnmappedReason::MalformedRow);
    }

    let Some(tooth) = tooth_code_from_raw(&row.tooth_code).and_then(normalize_tooth) else {
        return unknown(row, UnmappedReason::InvalidToothCode);
    };

    let surface = match classify_surface(row.surface_code.as_ref()) {
        SurfaceOutcome::Whole => None,
        SurfaceOutcome::Surface(surface) => Some(surface),
        SurfaceOutcome::Unrecognized(_) => {
            return unknown(row, UnmappedReason::UnrecognizedSurface);
        }
    };

    let Some(kind) = ToothStateType::parse(&row.kind) else {
        return unknown(row, UnmappedReason::UnknownKind);
    };

    let Some(occurred_at) = parse_occurred_at(&row.occurred_at) else {
        return unknown(row, UnmappedReason::InvalidTimestamp);
    };

    NormalizedRecord::Mapped(ChartEvent {
        id,
        tooth,
        surface,
        kind,
        occurred_at,
        planned: row.planned,
        provenance: Provenance {
            source: row.source,
            raw_tooth: row.tooth_code,
            raw_surface: row.surface_code,
            confidence: Confidence::Mapped,
        },
    })
}
