//! Core library for QuickNote — a hotkey-driven quick-capture note utility.
//!
//! Notes live in a single JSON file owned by [`NoteStore`]. UI surfaces talk
//! to the store only through [`RequestHandler`], which follows every
//! successful mutation with a [`ChangeNotifier`] broadcast so each open
//! window re-lists the notes.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use self::core::{
    config::{default_data_dir, StoreConfig, NOTES_FILE_ENV, NOTES_FILE_NAME},
    error::{QuickNoteError, Result},
    handler::{RequestHandler, SurfaceControl},
    note::{now_timestamp, parse_timestamp, sort_by_recency, Note},
    notifier::{ChangeNotifier, RefreshCallback},
    search::{all_tags, search_notes},
    storage::NoteStore,
    surface::{Surface, SurfaceRegistry},
    tags::extract_tags,
};
