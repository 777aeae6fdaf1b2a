//! Persisted dashboard settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub title: String,
    pub subtitle: String,
    /// Free text shown as "Updated: ..." in the header.
    pub updated: String,
    /// Text of the status badge next to the updated label.
    pub status: String,
    pub footer_left: String,
    pub footer_right: String,
    /// Optional JSON timeline to show instead of the built-in roadmap.
    pub data_file: Option<PathBuf>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: "UDP Framework Timeline".into(),
            subtitle: "Unified Data Platform Implementation Roadmap 2025".into(),
            updated: "Feb 2025".into(),
            status: "In Progress".into(),
            footer_left: "UDP Framework - Executive Dashboard".into(),
            footer_right: "Confidential - Internal Use Only".into(),
            data_file: None,
        }
    }
}

impl DashboardSettings {
    /// Location of `settings.json`, falling back to the working directory
    /// when the OS config dir can't be resolved.
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "ExecTimeline") {
            proj_dirs.config_dir().join("settings.json")
        } else {
            PathBuf::from(".").join("settings.json")
        }
    }

    /// Read settings from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, writing defaults on first run. Unreadable or malformed
    /// files fall back to defaults.
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            match settings.save(path) {
                Ok(()) => info!(path = %path.display(), "wrote default settings"),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "could not write default settings")
                }
            }
            return settings;
        }

        match Self::load(path) {
            Ok(settings) => {
                debug!(path = %path.display(), "loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Resolve `data_file` relative to the settings file's directory.
    pub fn data_path(&self, settings_path: &Path) -> Option<PathBuf> {
        let file = self.data_file.as_ref()?;
        if file.is_absolute() {
            Some(file.clone())
        } else {
            let base = settings_path.parent().unwrap_or_else(|| Path::new("."));
            Some(base.join(file))
        }
    }
}
