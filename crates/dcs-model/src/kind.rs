//! Tooth state types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Clinical state recorded against a tooth or surface.
///
/// This is a closed set: a new kind is a compile-time addition, never a
/// free-form string carried through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothStateType {
    Implant,
    Bridge,
    Crown,
    Veneer,
    InlayOnlay,
    Post,
    RootCanal,
    Filling,
    Extraction,
    Denture,
    Other,
}

impl ToothStateType {
    /// All kinds in declaration order.
    pub const ALL: [ToothStateType; 11] = [
        Self::Implant,
        Self::Bridge,
        Self::Crown,
        Self::Veneer,
        Self::InlayOnlay,
        Self::Post,
        Self::RootCanal,
        Self::Filling,
        Self::Extraction,
        Self::Denture,
        Self::Other,
    ];

    /// Canonical snake_case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Implant => "implant",
            Self::Bridge => "bridge",
            Self::Crown => "crown",
            Self::Veneer => "veneer",
            Self::InlayOnlay => "inlay_onlay",
            Self::Post => "post",
            Self::RootCanal => "root_canal",
            Self::Filling => "filling",
            Self::Extraction => "extraction",
            Self::Denture => "denture",
            Self::Other => "other",
        }
    }

    /// Display label for chart badges.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Implant => "Implant",
            Self::Bridge => "Bridge",
            Self::Crown => "Crown",
            Self::Veneer => "Veneer",
            Self::InlayOnlay => "Inlay/Onlay",
            Self::Post => "Post",
            Self::RootCanal => "Root canal",
            Self::Filling => "Filling",
            Self::Extraction => "Extraction",
            Self::Denture => "Denture",
            Self::Other => "Other",
        }
    }

    /// Parse a canonical name.
    ///
    /// Matching is case-insensitive and treats `-`, `/` and spaces as `_`,
    /// so `"Root Canal"` and `"inlay/onlay"` are accepted. Anything else is
    /// rejected rather than folded into [`ToothStateType::Other`].
    pub fn parse(value: &str) -> Option<Self> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|c| match c {
                '-' | '/' | ' ' => '_',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
    }
}

impl fmt::Display for ToothStateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ToothStateType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_names() {
        for kind in ToothStateType::ALL {
            assert_eq!(ToothStateType::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_parse_tolerates_separators() {
        assert_eq!(
            ToothStateType::parse("Root Canal"),
            Some(ToothStateType::RootCanal)
        );
        assert_eq!(
            ToothStateType::parse("inlay/onlay"),
            Some(ToothStateType::InlayOnlay)
        );
        assert_eq!(
            ToothStateType::parse(" ROOT-CANAL "),
            Some(ToothStateType::RootCanal)
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(ToothStateType::parse("sealant"), None);
        assert_eq!(ToothStateType::parse(""), None);
        assert!("sealant".parse::<ToothStateType>().is_err());
    }
}
