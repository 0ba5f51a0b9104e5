//! Boundary between UI surfaces and the note store.
//!
//! Every command a window can issue goes through [`RequestHandler`]. Successful
//! mutations are followed by a refresh broadcast so that all other open
//! windows re-list the notes.

use std::sync::Arc;

use crate::core::search;
use crate::{ChangeNotifier, Note, NoteStore, QuickNoteError, Result};

/// Window-control actions the handler delegates to the UI shell.
pub trait SurfaceControl: Send + Sync {
    /// Hides both the composer and the history window.
    fn hide_all(&self) -> Result<()>;

    /// Shows and focuses the history window, creating it if needed.
    fn open_history(&self) -> Result<()>;

    /// Shows the composer if it is hidden, hides it otherwise.
    fn toggle_composer(&self) -> Result<()>;
}

/// Dispatches UI commands onto a [`NoteStore`] and a [`ChangeNotifier`].
pub struct RequestHandler<S> {
    store: NoteStore,
    notifier: Arc<ChangeNotifier>,
    surfaces: S,
}

impl<S: SurfaceControl> RequestHandler<S> {
    pub fn new(store: NoteStore, notifier: Arc<ChangeNotifier>, surfaces: S) -> Self {
        Self {
            store,
            notifier,
            surfaces,
        }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    pub fn notifier(&self) -> &Arc<ChangeNotifier> {
        &self.notifier
    }

    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    /// Returns every note, most recently updated first.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        self.store.list().await
    }

    /// Creates a note from trimmed `text` and notifies all surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`QuickNoteError::ValidationFailed`] if `text` is blank, or any
    /// store failure.
    pub async fn create_note(&self, text: &str) -> Result<Note> {
        let text = require_text(text)?;
        let note = self.store.create(text).await?;
        self.notifier.broadcast();
        Ok(note)
    }

    /// Replaces the text of note `id`.
    ///
    /// `Ok(None)` means the note no longer exists (another window may have
    /// deleted it); nothing is broadcast in that case.
    ///
    /// # Errors
    ///
    /// Returns [`QuickNoteError::ValidationFailed`] if `text` is blank, or any
    /// store failure.
    pub async fn update_note(&self, id: &str, text: &str) -> Result<Option<Note>> {
        let text = require_text(text)?;
        let updated = self.store.update(id, text).await?;
        if updated.is_some() {
            self.notifier.broadcast();
        }
        Ok(updated)
    }

    /// Deletes note `id`. Returns `false` if it was already gone.
    pub async fn delete_note(&self, id: &str) -> Result<bool> {
        let removed = self.store.delete(id).await?;
        if removed {
            self.notifier.broadcast();
        }
        Ok(removed)
    }

    /// Returns the notes matching `query`, most recently updated first.
    pub async fn search_notes(&self, query: &str) -> Result<Vec<Note>> {
        let notes = self.store.list().await?;
        Ok(search::search_notes(notes, query))
    }

    /// Returns every distinct tag in use, sorted alphabetically.
    pub async fn list_tags(&self) -> Result<Vec<String>> {
        let notes = self.store.load_all().await?;
        Ok(search::all_tags(&notes))
    }

    pub fn hide_surfaces(&self) -> Result<()> {
        self.surfaces.hide_all()
    }

    pub fn open_history(&self) -> Result<()> {
        self.surfaces.open_history()
    }

    pub fn toggle_composer(&self) -> Result<()> {
        self.surfaces.toggle_composer()
    }
}

fn require_text(text: &str) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(QuickNoteError::ValidationFailed(
            "Note text cannot be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSurfaces {
        calls: Mutex<Vec<&'static str>>,
    }

    impl SurfaceControl for RecordingSurfaces {
        fn hide_all(&self) -> Result<()> {
            self.calls.lock().unwrap().push("hide");
            Ok(())
        }

        fn open_history(&self) -> Result<()> {
            self.calls.lock().unwrap().push("history");
            Ok(())
        }

        fn toggle_composer(&self) -> Result<()> {
            Err(QuickNoteError::Surface("composer unavailable".to_string()))
        }
    }

    fn setup() -> (RequestHandler<RecordingSurfaces>, Arc<AtomicUsize>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = NoteStore::open(dir.path().join("notes.json"));
        let notifier = Arc::new(ChangeNotifier::new());
        let refreshes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&refreshes);
        notifier.subscribe("history", move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let handler = RequestHandler::new(store, notifier, RecordingSurfaces::default());
        (handler, refreshes, dir)
    }

    #[tokio::test]
    async fn test_create_trims_and_broadcasts() {
        let (handler, refreshes, _dir) = setup();
        let note = handler.create_note("  hello #World \n").await.unwrap();
        assert_eq!(note.text, "hello #World");
        assert_eq!(note.tags, vec!["world"]);
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_text_is_rejected() {
        let (handler, refreshes, _dir) = setup();
        let result = handler.create_note(" \t ").await;
        assert!(matches!(result, Err(QuickNoteError::ValidationFailed(_))));

        let note = handler.create_note("x").await.unwrap();
        let result = handler.update_note(&note.id, "").await;
        assert!(matches!(result, Err(QuickNoteError::ValidationFailed(_))));
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_survives_panicking_observer() {
        let (handler, refreshes, _dir) = setup();
        handler.notifier().subscribe("composer", || panic!("window gone"));

        let note = handler.create_note("still saved").await.unwrap();
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
        assert_eq!(handler.list_notes().await.unwrap(), vec![note]);
    }

    #[tokio::test]
    async fn test_update_unknown_does_not_broadcast() {
        let (handler, refreshes, _dir) = setup();
        assert!(handler.update_note("xyz", "text").await.unwrap().is_none());
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_broadcasts_only_when_removed() {
        let (handler, refreshes, _dir) = setup();
        let note = handler.create_note("bye").await.unwrap();

        assert!(handler.delete_note(&note.id).await.unwrap());
        assert!(!handler.delete_note(&note.id).await.unwrap());
        assert_eq!(refreshes.load(Ordering::SeqCst), 2);
        assert!(handler.list_notes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_and_tags() {
        let (handler, _refreshes, _dir) = setup();
        handler.create_note("dentist #health").await.unwrap();
        handler.create_note("milk #home #todo").await.unwrap();

        let hits = handler.search_notes("HOME").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(handler.list_tags().await.unwrap(), vec!["health", "home", "todo"]);
    }

    #[test]
    fn test_window_actions_are_delegated() {
        let (handler, refreshes, _dir) = setup();
        handler.hide_surfaces().unwrap();
        handler.open_history().unwrap();
        assert!(matches!(handler.toggle_composer(), Err(QuickNoteError::Surface(_))));
        assert_eq!(*handler.surfaces().calls.lock().unwrap(), vec!["hide", "history"]);
        assert_eq!(refreshes.load(Ordering::SeqCst), 0);
    }
}
