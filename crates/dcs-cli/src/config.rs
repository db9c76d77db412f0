//! Settings file for the `dental-chart` CLI.
//!
//! Settings are read from `--config` when given, otherwise from
//! `config.toml` in the platform config directory. Every section and field
//! is optional; anything left out keeps its default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dcs_client::DEFAULT_TIMEOUT;
use dcs_session::{ChartSettings, DebounceConfig};

/// File name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub chart: ChartSettings,
    /// Debounce applied by hosts that offer patient search.
    pub search: DebounceConfig,
}

/// Practice server connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ServerSettings {
    /// Request timeout. Zero falls back to the client default.
    pub fn timeout(&self) -> Duration {
        if self.timeout_secs == 0 {
            DEFAULT_TIMEOUT
        } else {
            Duration::from_secs(self.timeout_secs)
        }
    }
}

impl Settings {
    /// Load settings for this run.
    ///
    /// An explicit path must exist and parse. The platform file is optional:
    /// when it is missing or invalid the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        let Some(path) = Self::config_path() else {
            tracing::debug!("no platform config directory, using default settings");
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        match Self::load_from(&path) {
            Ok(settings) => Ok(settings),
            Err(error) => {
                tracing::warn!(path = %path.display(), "ignoring settings file: {error:#}");
                Ok(Self::default())
            }
        }
    }

    /// Read and parse one settings file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings: Self = toml::from_str(&content)
            .with_context(|| format!("invalid settings file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Write settings as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize settings")?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write settings file {}", path.display()))
    }

    /// `config.toml` in the platform config directory.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "DentalChartStudio", "dental-chart")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}
