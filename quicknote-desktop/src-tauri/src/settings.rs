//! Application settings persistence for QuickNote.
//!
//! Stores user preferences (note store location, startup behaviour) in a JSON
//! file at an OS-appropriate location.

use quicknote_core::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    /// Overrides the note store path; `None` uses the user-data directory.
    pub notes_file: Option<String>,
    /// Move an unreadable `notes.json` aside before starting fresh.
    pub backup_corrupt_store: bool,
    /// Prepare the composer at launch without showing it.
    pub start_hidden: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notes_file: None,
            backup_corrupt_store: true,
            start_hidden: true,
        }
    }
}

impl AppSettings {
    /// Builds the note store configuration these settings describe.
    pub fn store_config(&self) -> StoreConfig {
        let config = match self.notes_file.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => StoreConfig::new(path),
            _ => StoreConfig::default_location(),
        };
        config.with_backup_corrupt(self.backup_corrupt_store)
    }
}

/// Returns the path to the settings JSON file.
///
/// - macOS / Linux: `~/.config/quicknote/settings.json`
/// - Windows: `%APPDATA%/QuickNote/settings.json`
pub fn settings_file_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        base.join("QuickNote").join("settings.json")
    }
    #[cfg(not(target_os = "windows"))]
    {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config").join("quicknote").join("settings.json")
    }
}

/// Loads settings from disk; returns defaults if the file is missing or corrupt.
pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_file_path())
}

/// Saves settings to disk, creating parent directories as needed.
pub fn save_settings(settings: &AppSettings) -> Result<(), String> {
    save_settings_to(&settings_file_path(), settings)
}

fn load_settings_from(path: &Path) -> AppSettings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings file {}: {e}", path.display());
            AppSettings::default()
        }),
        Err(_) => AppSettings::default(),
    }
}

fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(())
}
