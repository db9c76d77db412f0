//! View modes and their navigable representation.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, Result};

// =============================================================================
// VIEW MODE
// =============================================================================

/// Which slice of the chart history a projection shows.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Latest performed state of every slot (default).
    #[default]
    Current,

    /// Performed state with the full ordered timeline per slot.
    History,

    /// Treatment-plan entries not yet performed.
    Planned,
}

impl ViewMode {
    /// Get all view modes in toolbar order.
    pub fn all() -> &'static [ViewMode] {
        &[Self::Current, Self::History, Self::Planned]
    }

    /// Stable identifier used in navigable state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::History => "history",
            Self::Planned => "planned",
        }
    }

    /// Get the display label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::History => "History",
            Self::Planned => "Planned",
        }
    }

    /// Parse an identifier (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value.trim()))
    }

    /// Whether this mode folds planned events (and ignores the as-of instant).
    pub fn is_planned(&self) -> bool {
        matches!(self, Self::Planned)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// VIEW QUERY
// =============================================================================

/// Restorable view selection: mode plus optional as-of instant.
///
/// Planned views never carry an as-of instant, so that two queries that
/// project identically also serialize identically. Deserialization goes
/// through [`ViewQuery::new`] and drops the instant the same way.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ViewQueryWire")]
pub struct ViewQuery {
    mode: ViewMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    as_of: Option<DateTime<Utc>>,
}

/// Unnormalized wire shape.
#[derive(Deserialize)]
struct ViewQueryWire {
    mode: ViewMode,
    #[serde(default)]
    as_of: Option<DateTime<Utc>>,
}

impl From<ViewQueryWire> for ViewQuery {
    fn from(wire: ViewQueryWire) -> Self {
        Self::new(wire.mode, wire.as_of)
    }
}

impl ViewQuery {
    const VIEW_KEY: &'static str = "view";
    const AS_OF_KEY: &'static str = "as_of";

    /// Create a query. The as-of instant is dropped for planned views.
    pub fn new(mode: ViewMode, as_of: Option<DateTime<Utc>>) -> Self {
        Self {
            mode,
            as_of: if mode.is_planned() { None } else { as_of },
        }
    }

    /// The view mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// The as-of instant, `None` meaning "now".
    pub fn as_of(&self) -> Option<DateTime<Utc>> {
        self.as_of
    }

    /// Same query with another mode.
    pub fn with_mode(self, mode: ViewMode) -> Self {
        Self::new(mode, self.as_of)
    }

    /// Same query with another as-of instant.
    pub fn with_as_of(self, as_of: Option<DateTime<Utc>>) -> Self {
        Self::new(self.mode, as_of)
    }

    /// Serialize as a URL query string, e.g. `view=history&as_of=2024-03-01T00:00:00Z`.
    pub fn to_query_string(&self) -> String {
        let mut query = format!("{}={}", Self::VIEW_KEY, self.mode.as_str());
        if let Some(as_of) = self.as_of {
            query.push('&');
            query.push_str(Self::AS_OF_KEY);
            query.push('=');
            query.push_str(&as_of.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        }
        query
    }

    /// Restore a query from a URL query string.
    ///
    /// A leading `?` is accepted, unknown keys are ignored and missing keys
    /// take their defaults.
    pub fn from_query_string(query: &str) -> Result<Self> {
        let mut mode = ViewMode::default();
        let mut as_of = None;

        for pair in query.trim().trim_start_matches('?').split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let invalid = || ChartError::InvalidQuery {
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                Self::VIEW_KEY => mode = ViewMode::parse(value).ok_or_else(invalid)?,
                Self::AS_OF_KEY => {
                    let decoded = value.replace("%3A", ":").replace("%3a", ":");
                    let parsed = DateTime::parse_from_rfc3339(&decoded).map_err(|_| invalid())?;
                    as_of = Some(parsed.with_timezone(&Utc));
                }
                _ => {}
            }
        }

        Ok(Self::new(mode, as_of))
    }
}
