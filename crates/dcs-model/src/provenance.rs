//! Record origin and mapping confidence.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Origin of a chart record.
///
/// Serialized as a bare string: `"native"` or the legacy system's name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Source {
    /// Entered in this application.
    Native,
    /// Imported from a named read-only legacy system.
    Legacy(String),
}

impl Source {
    const NATIVE: &'static str = "native";
    const UNATTRIBUTED: &'static str = "unattributed";

    /// Placeholder for malformed rows whose source cell is unusable.
    pub fn unattributed() -> Self {
        Self::Legacy(Self::UNATTRIBUTED.to_string())
    }

    /// Source name as serialized.
    pub fn name(&self) -> &str {
        match self {
            Self::Native => Self::NATIVE,
            Self::Legacy(name) => name,
        }
    }

    /// Whether this record came from a legacy system.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }
}

impl TryFrom<String> for Source {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Err(ModelError::EmptySource)
        } else if trimmed.eq_ignore_ascii_case(Self::NATIVE) {
            Ok(Self::Native)
        } else {
            Ok(Self::Legacy(trimmed.to_string()))
        }
    }
}

impl From<Source> for String {
    fn from(source: Source) -> Self {
        match source {
            Source::Native => Source::NATIVE.to_string(),
            Source::Legacy(name) => name,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether a record's tooth/surface addressing was mapped to the canonical model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Every code resolved to a canonical key.
    Mapped,
    /// At least one code could not be resolved; excluded from projections.
    Unknown,
}

/// A raw tooth or surface code as delivered by the source system.
///
/// Legacy payloads are not self-describing: the same column may carry
/// integers in one export and strings in another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCode {
    /// Numeric code.
    Integer(i64),
    /// Textual code, kept verbatim.
    Text(String),
}

impl RawCode {
    /// Whether the code is empty text.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl fmt::Display for RawCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for RawCode {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for RawCode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Where a chart record came from and how well it mapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Originating system.
    pub source: Source,
    /// Tooth code exactly as received.
    pub raw_tooth: RawCode,
    /// Surface code exactly as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_surface: Option<RawCode>,
    /// Mapping outcome.
    pub confidence: Confidence,
}
