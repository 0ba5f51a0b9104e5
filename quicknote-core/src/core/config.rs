//! Note store configuration.

use std::path::PathBuf;

/// Environment variable that overrides the default notes file location.
pub const NOTES_FILE_ENV: &str = "QUICKNOTE_NOTES_FILE";

/// File name of the note collection inside the user-data directory.
pub const NOTES_FILE_NAME: &str = "notes.json";

/// Where the note store lives and how it treats unreadable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the JSON file holding the whole note collection.
    pub notes_file: PathBuf,
    /// Move an unparseable store aside to `<file>.bak` before replacing it.
    pub backup_corrupt: bool,
}

impl StoreConfig {
    pub fn new(notes_file: impl Into<PathBuf>) -> Self {
        Self {
            notes_file: notes_file.into(),
            backup_corrupt: true,
        }
    }

    /// Resolves the store location from the environment or the user-data directory.
    ///
    /// - `QUICKNOTE_NOTES_FILE`, when set and non-empty, wins.
    /// - Otherwise `<data dir>/QuickNote/notes.json`, e.g.
    ///   `~/.local/share/QuickNote/notes.json` on Linux.
    pub fn default_location() -> Self {
        match std::env::var(NOTES_FILE_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::new(path),
            _ => Self::new(default_data_dir().join(NOTES_FILE_NAME)),
        }
    }

    #[must_use]
    pub fn with_backup_corrupt(mut self, enabled: bool) -> Self {
        self.backup_corrupt = enabled;
        self
    }
}

/// Returns the QuickNote user-data directory.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("QuickNote")
}
