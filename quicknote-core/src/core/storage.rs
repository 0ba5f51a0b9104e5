//! Flat-file note store.
//!
//! The whole collection lives in one JSON array on disk. Every mutation is a
//! full read-modify-write cycle; nothing is cached between calls, so any
//! number of windows can re-list at any time and see the latest state.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;

use crate::core::config::StoreConfig;
use crate::core::note::{now_timestamp, sort_by_recency, Note};
use crate::Result;

/// Owns the on-disk note collection. No other component writes the file.
pub struct NoteStore {
    config: StoreConfig,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl NoteStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    /// Opens a store at `path` with default settings.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::new(StoreConfig::new(path.as_ref()))
    }

    pub fn path(&self) -> &Path {
        &self.config.notes_file
    }

    /// Path the previous contents are moved to when the store is unreadable.
    pub fn backup_path(&self) -> PathBuf {
        sibling_path(self.path(), ".bak")
    }

    /// Loads every note in storage order, normalizing legacy records.
    ///
    /// Creates the file (and its parent directories) holding `[]` when it is
    /// absent. Content that is not a JSON array is treated as an empty
    /// collection rather than an error; see [`StoreConfig::backup_corrupt`].
    ///
    /// Repaired records are written back before returning, so a generated id
    /// stays the same on every later load.
    ///
    /// # Errors
    ///
    /// Returns [`crate::QuickNoteError::Io`] if the file cannot be created or read.
    pub async fn load_all(&self) -> Result<Vec<Note>> {
        let _guard = self.write_lock.lock().await;
        self.load_locked().await
    }

    /// [`load_all`](Self::load_all) for callers already holding `write_lock`.
    async fn load_locked(&self) -> Result<Vec<Note>> {
        let (notes, repaired) = self.read_records().await?;
        if repaired > 0 {
            // A failed write-back only costs id stability; the notes are still readable.
            match self.save_all(&notes).await {
                Ok(()) => log::info!(
                    "Migrated {repaired} legacy note record(s) in {}",
                    self.path().display()
                ),
                Err(e) => log::warn!("Could not persist repaired note records: {e}"),
            }
        }
        Ok(notes)
    }

    /// Reads and normalizes the stored records. Returns the notes and how many needed repair.
    async fn read_records(&self) -> Result<(Vec<Note>, usize)> {
        self.ensure_file().await?;
        let bytes = fs::read(self.path()).await?;

        let records = match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(records)) => records,
            Ok(_) => {
                self.recover_malformed("top-level value is not an array").await;
                return Ok((Vec::new(), 0));
            }
            Err(e) => {
                self.recover_malformed(&e.to_string()).await;
                return Ok((Vec::new(), 0));
            }
        };

        // One timestamp per load keeps createdAt == updatedAt for backfilled records.
        let now = now_timestamp();
        let mut repaired = 0usize;
        let notes: Vec<Note> = records
            .iter()
            .map(|raw| {
                let (note, was_repaired) = Note::normalize(raw, &now);
                if was_repaired {
                    repaired += 1;
                }
                note
            })
            .collect();

        if repaired > 0 {
            log::debug!(
                "Repaired {repaired} of {} note records loaded from {}",
                notes.len(),
                self.path().display()
            );
        }
        Ok((notes, repaired))
    }

    /// Loads every note ordered for display, most recently updated first.
    ///
    /// # Errors
    ///
    /// Same as [`load_all`](Self::load_all).
    pub async fn list(&self) -> Result<Vec<Note>> {
        let mut notes = self.load_all().await?;
        sort_by_recency(&mut notes);
        Ok(notes)
    }

    /// Replaces the whole collection on disk.
    ///
    /// The JSON is written to a sibling `.tmp` file which is then renamed over
    /// the store, so readers never observe a truncated file.
    ///
    /// # Errors
    ///
    /// Returns [`crate::QuickNoteError::Io`] if writing or renaming fails, or
    /// [`crate::QuickNoteError::Json`] if serialization fails. Nothing is retried.
    pub async fn save_all(&self, notes: &[Note]) -> Result<()> {
        let json = serde_json::to_string_pretty(notes)?;
        if let Err(e) = self.write_atomically(json.as_bytes()).await {
            log::error!("Failed to write {} notes to {}: {e}", notes.len(), self.path().display());
            return Err(e.into());
        }
        log::debug!("Wrote {} notes to {}", notes.len(), self.path().display());
        Ok(())
    }

    /// Creates a note from `text`, inserts it at the front of the collection and persists it.
    ///
    /// # Errors
    ///
    /// Propagates any load or save failure; the note is not created in that case.
    pub async fn create(&self, text: &str) -> Result<Note> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_locked().await?;
        let note = Note::new(text, &now_timestamp());
        notes.insert(0, note.clone());
        self.save_all(&notes).await?;
        log::debug!("Created note {}", note.id);
        Ok(note)
    }

    /// Replaces the text of note `id`, re-deriving its tags.
    ///
    /// Returns `Ok(None)` without touching the file when no note has that id.
    ///
    /// # Errors
    ///
    /// Propagates any load or save failure.
    pub async fn update(&self, id: &str, text: &str) -> Result<Option<Note>> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_locked().await?;
        let Some(note) = notes.iter_mut().find(|n| n.id == id) else {
            log::debug!("Update skipped, note {id} not found");
            return Ok(None);
        };
        note.apply_text(text, &now_timestamp());
        let updated = note.clone();
        self.save_all(&notes).await?;
        log::debug!("Updated note {id}");
        Ok(Some(updated))
    }

    /// Removes note `id`. Returns whether the collection shrank.
    ///
    /// Nothing is written when no note has that id.
    ///
    /// # Errors
    ///
    /// Propagates any load or save failure.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_locked().await?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            log::debug!("Delete skipped, note {id} not found");
            return Ok(false);
        }
        self.save_all(&notes).await?;
        log::debug!("Deleted note {id}");
        Ok(true)
    }

    async fn ensure_file(&self) -> Result<()> {
        let path = self.path();
        if fs::try_exists(path).await? {
            return Ok(());
        }
        create_parent_dirs(path).await?;
        fs::write(path, "[]").await?;
        log::info!("Created empty note store at {}", path.display());
        Ok(())
    }

    /// Handles unparseable store content. Never fails: the caller still
    /// degrades to an empty collection.
    async fn recover_malformed(&self, reason: &str) {
        let path = self.path();
        if !self.config.backup_corrupt {
            log::warn!("Note store {} is malformed ({reason}); treating as empty", path.display());
            return;
        }

        let backup = self.backup_path();
        let result = match fs::rename(path, &backup).await {
            Ok(()) => fs::write(path, "[]").await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => log::warn!(
                "Note store {} is malformed ({reason}); moved to {} and started empty",
                path.display(),
                backup.display()
            ),
            Err(e) => log::error!(
                "Note store {} is malformed ({reason}) and could not be backed up: {e}",
                path.display()
            ),
        }
    }

    async fn write_atomically(&self, contents: &[u8]) -> std::io::Result<()> {
        let path = self.path();
        let tmp = sibling_path(path, ".tmp");
        create_parent_dirs(path).await?;
        if let Err(e) = fs::write(&tmp, contents).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(e);
        }
        Ok(())
    }
}

async fn create_parent_dirs(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent).await,
        _ => Ok(()),
    }
}

/// `notes.json` + `.bak` → `notes.json.bak`, in the same directory.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("notes"));
    name.push(suffix);
    path.with_file_name(name)
}
