//! Canonical tooth and surface addressing.
//!
//! A tooth is addressed by quadrant and position (`1..=8`, counted from the
//! midline). Surfaces are the six conventional designations. Both keys are
//! immutable values; the only way to obtain a [`ToothKey`] is through a
//! checked constructor, so an out-of-range tooth cannot exist in memory.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ModelError;

// =============================================================================
// QUADRANT
// =============================================================================

/// Dental quadrant.
///
/// Variant order follows the FDI quadrant digits (1 = upper right through
/// 4 = lower right), which is also the derived `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// Upper right (FDI 1).
    #[serde(rename = "UR")]
    UpperRight,
    /// Upper left (FDI 2).
    #[serde(rename = "UL")]
    UpperLeft,
    /// Lower left (FDI 3).
    #[serde(rename = "LL")]
    LowerLeft,
    /// Lower right (FDI 4).
    #[serde(rename = "LR")]
    LowerRight,
}

impl Quadrant {
    /// All quadrants in FDI order.
    pub const ALL: [Quadrant; 4] = [
        Self::UpperRight,
        Self::UpperLeft,
        Self::LowerLeft,
        Self::LowerRight,
    ];

    /// Two-letter chart code (e.g., "UR").
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UpperRight => "UR",
            Self::UpperLeft => "UL",
            Self::LowerLeft => "LL",
            Self::LowerRight => "LR",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UpperRight => "Upper right",
            Self::UpperLeft => "Upper left",
            Self::LowerLeft => "Lower left",
            Self::LowerRight => "Lower right",
        }
    }

    /// Map an FDI quadrant digit (`1..=4`) to a quadrant.
    pub const fn from_fdi_digit(digit: i64) -> Option<Self> {
        match digit {
            1 => Some(Self::UpperRight),
            2 => Some(Self::UpperLeft),
            3 => Some(Self::LowerLeft),
            4 => Some(Self::LowerRight),
            _ => None,
        }
    }

    /// FDI quadrant digit.
    pub const fn fdi_digit(&self) -> u8 {
        match self {
            Self::UpperRight => 1,
            Self::UpperLeft => 2,
            Self::LowerLeft => 3,
            Self::LowerRight => 4,
        }
    }

    /// Whether this quadrant is on the upper arch.
    pub const fn is_upper(&self) -> bool {
        matches!(self, Self::UpperRight | Self::UpperLeft)
    }

    /// The vertically opposite quadrant on the other arch, same side.
    pub const fn opposite_arch(&self) -> Self {
        match self {
            Self::UpperRight => Self::LowerRight,
            Self::UpperLeft => Self::LowerLeft,
            Self::LowerLeft => Self::UpperLeft,
            Self::LowerRight => Self::UpperRight,
        }
    }

    /// Parse a two-letter chart code (case-insensitive).
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "UR" => Some(Self::UpperRight),
            "UL" => Some(Self::UpperLeft),
            "LL" => Some(Self::LowerLeft),
            "LR" => Some(Self::LowerRight),
            _ => None,
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// TOOTH KEY
// =============================================================================

/// Canonical tooth identifier: quadrant plus position `1..=8`.
///
/// Serialized as its chart code (e.g., `"UL8"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToothKey {
    quadrant: Quadrant,
    position: u8,
}

impl ToothKey {
    /// Lowest tooth position (central incisor).
    pub const MIN_POSITION: u8 = 1;
    /// Highest tooth position (third molar).
    pub const MAX_POSITION: u8 = 8;

    /// Create a tooth key, returning `None` when the position is out of range.
    pub const fn new(quadrant: Quadrant, position: u8) -> Option<Self> {
        if position >= Self::MIN_POSITION && position <= Self::MAX_POSITION {
            Some(Self { quadrant, position })
        } else {
            None
        }
    }

    /// Quadrant of this tooth.
    #[inline]
    pub const fn quadrant(&self) -> Quadrant {
        self.quadrant
    }

    /// Position within the quadrant, counted from the midline.
    #[inline]
    pub const fn position(&self) -> u8 {
        self.position
    }

    /// Two-digit FDI code (`Q*10 + P`).
    pub const fn fdi_code(&self) -> u8 {
        self.quadrant.fdi_digit() * 10 + self.position
    }
}

impl fmt::Display for ToothKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quadrant.code(), self.position)
    }
}

impl FromStr for ToothKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ModelError::InvalidToothKey(s.to_string());

        if !trimmed.is_ascii() || trimmed.len() != 3 {
            return Err(invalid());
        }
        let quadrant = Quadrant::parse(&trimmed[..2]).ok_or_else(invalid)?;
        let position = trimmed[2..].parse::<u8>().map_err(|_| invalid())?;
        Self::new(quadrant, position).ok_or_else(invalid)
    }
}

impl Serialize for ToothKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ToothKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// SURFACE KEY
// =============================================================================

/// Tooth surface designation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SurfaceKey {
    /// Mesial
    M,
    /// Occlusal
    O,
    /// Distal
    D,
    /// Buccal
    B,
    /// Lingual
    L,
    /// Incisal
    I,
}

impl SurfaceKey {
    /// All surfaces in legacy positional order (`1..=6`).
    pub const ALL: [SurfaceKey; 6] = [Self::M, Self::O, Self::D, Self::B, Self::L, Self::I];

    /// Single-letter code.
    pub const fn letter(&self) -> char {
        match self {
            Self::M => 'M',
            Self::O => 'O',
            Self::D => 'D',
            Self::B => 'B',
            Self::L => 'L',
            Self::I => 'I',
        }
    }

    /// Anatomical name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::M => "mesial",
            Self::O => "occlusal",
            Self::D => "distal",
            Self::B => "buccal",
            Self::L => "lingual",
            Self::I => "incisal",
        }
    }

    /// Look up a surface by its letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'M' => Some(Self::M),
            'O' => Some(Self::O),
            'D' => Some(Self::D),
            'B' => Some(Self::B),
            'L' => Some(Self::L),
            'I' => Some(Self::I),
            _ => None,
        }
    }

    /// Look up a surface by its legacy positional index (`1..=6`).
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| Self::ALL.get(i).copied())
    }
}

impl fmt::Display for SurfaceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for SurfaceKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Self::from_letter(letter).ok_or_else(|| ModelError::InvalidSurface(s.to_string()))
            }
            _ => Err(ModelError::InvalidSurface(s.to_string())),
        }
    }
}

// =============================================================================
// SLOT KEY
// =============================================================================

/// A chart slot: one tooth, optionally narrowed to one surface.
///
/// Whole-tooth slots (`surface == None`) sort before the tooth's surfaces.
/// Serializes as `"UR5"` or `"UR5/D"` so it can key JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotKey {
    /// Tooth of the slot.
    pub tooth: ToothKey,
    /// Surface, or `None` for a whole-tooth slot.
    pub surface: Option<SurfaceKey>,
}

impl SlotKey {
    /// Create a slot key.
    pub const fn new(tooth: ToothKey, surface: Option<SurfaceKey>) -> Self {
        Self { tooth, surface }
    }

    /// Whole-tooth slot.
    pub const fn whole(tooth: ToothKey) -> Self {
        Self {
            tooth,
            surface: None,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.surface {
            Some(surface) => write!(f, "{}/{}", self.tooth, surface),
            None => write!(f, "{}", self.tooth),
        }
    }
}

impl FromStr for SlotKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().split_once('/') {
            Some((tooth, surface)) => Ok(Self::new(tooth.parse()?, Some(surface.parse()?))),
            None => Ok(Self::whole(s.parse()?)),
        }
    }
}

impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooth_key_range() {
        assert!(ToothKey::new(Quadrant::UpperRight, 0).is_none());
        assert!(ToothKey::new(Quadrant::UpperRight, 9).is_none());
        assert!(ToothKey::new(Quadrant::UpperRight, 1).is_some());
        assert!(ToothKey::new(Quadrant::LowerRight, 8).is_some());
    }

    #[test]
    fn test_tooth_key_display_and_parse() {
        let tooth = ToothKey::new(Quadrant::UpperLeft, 8).unwrap();
        assert_eq!(tooth.to_string(), "UL8");
        assert_eq!("UL8".parse::<ToothKey>().unwrap(), tooth);
        assert_eq!(" ul8 ".parse::<ToothKey>().unwrap(), tooth);
        assert!("UL9".parse::<ToothKey>().is_err());
        assert!("XX1".parse::<ToothKey>().is_err());
        assert!("UL".parse::<ToothKey>().is_err());
    }

    #[test]
    fn test_fdi_code() {
        let tooth = ToothKey::new(Quadrant::LowerRight, 1).unwrap();
        assert_eq!(tooth.fdi_code(), 41);
    }

    #[test]
    fn test_opposite_arch() {
        assert_eq!(Quadrant::UpperRight.opposite_arch(), Quadrant::LowerRight);
        assert_eq!(Quadrant::LowerLeft.opposite_arch(), Quadrant::UpperLeft);
        for quadrant in Quadrant::ALL {
            assert_eq!(quadrant.opposite_arch().opposite_arch(), quadrant);
            assert_ne!(quadrant.is_upper(), quadrant.opposite_arch().is_upper());
        }
    }

    #[test]
    fn test_surface_from_index() {
        assert_eq!(SurfaceKey::from_index(1), Some(SurfaceKey::M));
        assert_eq!(SurfaceKey::from_index(3), Some(SurfaceKey::D));
        assert_eq!(SurfaceKey::from_index(6), Some(SurfaceKey::I));
        assert_eq!(SurfaceKey::from_index(0), None);
        assert_eq!(SurfaceKey::from_index(7), None);
        assert_eq!(SurfaceKey::from_index(-1), None);
    }

    #[test]
    fn test_surface_parse() {
        assert_eq!("o".parse::<SurfaceKey>().unwrap(), SurfaceKey::O);
        assert!("MO".parse::<SurfaceKey>().is_err());
        assert!("".parse::<SurfaceKey>().is_err());
    }

    #[test]
    fn test_slot_ordering_whole_tooth_first() {
        let tooth = ToothKey::new(Quadrant::UpperRight, 5).unwrap();
        assert!(SlotKey::whole(tooth) < SlotKey::new(tooth, Some(SurfaceKey::M)));
        assert_eq!(SlotKey::new(tooth, Some(SurfaceKey::D)).to_string(), "UR5/D");
    }

    #[test]
    fn test_slot_parse() {
        let tooth = ToothKey::new(Quadrant::LowerLeft, 6).unwrap();
        assert_eq!("LL6/O".parse::<SlotKey>(), Ok(SlotKey::new(tooth, Some(SurfaceKey::O))));
        assert_eq!("LL6".parse::<SlotKey>(), Ok(SlotKey::whole(tooth)));
        assert!("LL6/X".parse::<SlotKey>().is_err());
        assert!("LL9/O".parse::<SlotKey>().is_err());
    }
}
