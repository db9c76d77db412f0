//! Row feeds exposed per patient.

use std::fmt;

/// A row feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// Procedures entered in the practice application.
    Procedures,
    /// Treatment-plan entries.
    TreatmentPlan,
    /// Rows imported from the legacy system.
    LegacyImport,
}

impl Feed {
    /// All feeds in merge order.
    pub fn all() -> &'static [Feed] {
        &[Self::Procedures, Self::TreatmentPlan, Self::LegacyImport]
    }

    /// Last path segment of the feed endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Procedures => "procedures",
            Self::TreatmentPlan => "treatment-plan",
            Self::LegacyImport => "legacy-charting",
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
