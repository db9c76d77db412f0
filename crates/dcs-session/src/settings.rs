//! Chart session settings.

use dcs_chart::ViewMode;
use serde::{Deserialize, Serialize};

use crate::selection::DEFAULT_HISTORY_DEPTH;

/// Settings applied when a chart view opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    /// Undo/redo steps kept per chart view.
    pub history_depth: usize,

    /// Mode a chart opens in when no view is restored.
    pub default_mode: ViewMode,

    /// Changed field names shown per audit row before "+N more".
    pub audit_preview: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            default_mode: ViewMode::Current,
            audit_preview: 3,
        }
    }
}
