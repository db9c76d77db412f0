//! Surface code normalization.
//!
//! Legacy sources express a surface as either a canonical letter or a
//! positional index `1..=6` (M, O, D, B, L, I). A code of `0`, an empty value
//! or an absent value means the event is whole-tooth.

use dcs_model::{RawCode, SurfaceKey};

/// Classification of a raw surface code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOutcome {
    /// No surface: `0`, empty or absent. The event addresses the whole tooth.
    Whole,
    /// A canonical surface.
    Surface(SurfaceKey),
    /// A non-empty value that is neither a letter nor an index.
    Unrecognized(String),
}

impl SurfaceOutcome {
    /// The canonical surface, if any.
    pub fn surface(&self) -> Option<SurfaceKey> {
        match self {
            Self::Surface(surface) => Some(*surface),
            Self::Whole | Self::Unrecognized(_) => None,
        }
    }
}

/// Normalize a surface code.
///
/// Returns `None` for `0`, empty, absent and unrecognized input. `None` is a
/// meaningful result ("whole tooth"), not an error; use [`classify_surface`]
/// when the caller must tell an empty code from an unrecognized one.
pub fn normalize_surface(code: Option<&RawCode>) -> Option<SurfaceKey> {
    classify_surface(code).surface()
}

/// Classify a surface code without losing the unrecognized case.
pub fn classify_surface(code: Option<&RawCode>) -> SurfaceOutcome {
    match code {
        None => SurfaceOutcome::Whole,
        Some(RawCode::Integer(index)) => classify_index(*index),
        Some(RawCode::Text(text)) => classify_text(text),
    }
}

fn classify_index(index: i64) -> SurfaceOutcome {
    if index == 0 {
        return SurfaceOutcome::Whole;
    }
    SurfaceKey::from_index(index)
        .map(SurfaceOutcome::Surface)
        .unwrap_or_else(|| SurfaceOutcome::Unrecognized(index.to_string()))
}

fn classify_text(text: &str) -> SurfaceOutcome {
    let cleaned = text.trim().to_ascii_uppercase();

    if cleaned.is_empty() {
        return SurfaceOutcome::Whole;
    }

    // Canonical letter
    if let Ok(surface) = cleaned.parse::<SurfaceKey>() {
        return SurfaceOutcome::Surface(surface);
    }

    // Positional index delivered as text
    match cleaned.parse::<i64>() {
        Ok(index) => classify_index(index),
        Err(_) => SurfaceOutcome::Unrecognized(text.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_index() {
        assert_eq!(normalize_surface(Some(&RawCode::Integer(1))), Some(SurfaceKey::M));
        assert_eq!(normalize_surface(Some(&RawCode::Integer(3))), Some(SurfaceKey::D));
        assert_eq!(normalize_surface(Some(&RawCode::Integer(6))), Some(SurfaceKey::I));
    }

    #[test]
    fn test_letters() {
        assert_eq!(normalize_surface(Some(&RawCode::from("o"))), Some(SurfaceKey::O));
        assert_eq!(normalize_surface(Some(&RawCode::from(" B "))), Some(SurfaceKey::B));
    }

    #[test]
    fn test_numeric_text() {
        assert_eq!(normalize_surface(Some(&RawCode::from("2"))), Some(SurfaceKey::O));
        assert_eq!(normalize_surface(Some(&RawCode::from("0"))), None);
    }

    #[test]
    fn test_whole_tooth() {
        assert_eq!(classify_surface(None), SurfaceOutcome::Whole);
        assert_eq!(classify_surface(Some(&RawCode::Integer(0))), SurfaceOutcome::Whole);
        assert_eq!(classify_surface(Some(&RawCode::from("0"))), SurfaceOutcome::Whole);
        assert_eq!(classify_surface(Some(&RawCode::from("  "))), SurfaceOutcome::Whole);
    }

    #[test]
    fn test_unrecognized() {
        assert_eq!(
            classify_surface(Some(&RawCode::Integer(7))),
            SurfaceOutcome::Unrecognized("7".to_string())
        );
        assert_eq!(
            classify_surface(Some(&RawCode::from("MOD"))),
            SurfaceOutcome::Unrecognized("MOD".to_string())
        );
        assert_eq!(
            classify_surface(Some(&RawCode::from("x"))),
            SurfaceOutcome::Unrecognized("x".to_string())
        );
        assert_eq!(normalize_surface(Some(&RawCode::from("x"))), None);
    }
}
