//! Tooth code normalization.
//!
//! Legacy systems encode a tooth as a two-digit FDI-style code `Q*10 + P`
//! where `Q` is the quadrant digit (`1..=4`) and `P` the position (`1..=8`).

use dcs_model::{Quadrant, RawCode, ToothKey};

/// Map an FDI-style code to a canonical tooth.
///
/// Returns `None` when the quadrant digit has no mapping or the position is
/// outside `1..=8`. Never guesses: `59`, `19`, `10` and negative codes all
/// yield `None`.
pub fn normalize_tooth(code: i64) -> Option<ToothKey> {
    let quadrant = Quadrant::from_fdi_digit(code.div_euclid(10))?;
    let position = u8::try_from(code.rem_euclid(10)).ok()?;
    ToothKey::new(quadrant, position)
}

/// Extract the integer tooth code from a raw value.
///
/// Integers pass through; text must be an integer after trimming.
pub fn tooth_code_from_raw(raw: &RawCode) -> Option<i64> {
    match raw {
        RawCode::Integer(code) => Some(*code),
        RawCode::Text(text) => text.trim().parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_codes() {
        let tooth = normalize_tooth(28).unwrap();
        assert_eq!(tooth.quadrant(), Quadrant::UpperLeft);
        assert_eq!(tooth.position(), 8);

        let tooth = normalize_tooth(41).unwrap();
        assert_eq!(tooth.quadrant(), Quadrant::LowerRight);
        assert_eq!(tooth.position(), 1);

        assert_eq!(normalize_tooth(11).unwrap().to_string(), "UR1");
        assert_eq!(normalize_tooth(38).unwrap().to_string(), "LL8");
    }

    #[test]
    fn test_unmapped_quadrant() {
        assert_eq!(normalize_tooth(59), None);
        assert_eq!(normalize_tooth(5), None);
        assert_eq!(normalize_tooth(0), None);
    }

    #[test]
    fn test_position_out_of_range() {
        assert_eq!(normalize_tooth(10), None);
        assert_eq!(normalize_tooth(19), None);
        assert_eq!(normalize_tooth(49), None);
    }

    #[test]
    fn test_negative_and_large_codes() {
        assert_eq!(normalize_tooth(-11), None);
        assert_eq!(normalize_tooth(118), None);
        assert_eq!(normalize_tooth(i64::MIN), None);
        assert_eq!(normalize_tooth(i64::MAX), None);
    }

    #[test]
    fn test_round_trip_fdi() {
        for code in [11, 18, 21, 28, 31, 38, 41, 48] {
            assert_eq!(i64::from(normalize_tooth(code).unwrap().fdi_code()), code);
        }
    }

    #[test]
    fn test_tooth_code_from_raw() {
        assert_eq!(tooth_code_from_raw(&RawCode::Integer(28)), Some(28));
        assert_eq!(tooth_code_from_raw(&RawCode::from(" 41 ")), Some(41));
        assert_eq!(tooth_code_from_raw(&RawCode::from("UR5")), None);
        assert_eq!(tooth_code_from_raw(&RawCode::from("")), None);
    }
}
