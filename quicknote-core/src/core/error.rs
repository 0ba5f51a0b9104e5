//! Error types for the QuickNote core library.

use thiserror::Error;

/// All errors that can occur within the QuickNote core library.
///
/// An unknown note id is deliberately absent: update and delete report it
/// through their return values, since another window may already have
/// removed the note.
#[derive(Debug, Error)]
pub enum QuickNoteError {
    /// An I/O operation on the note store failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The note collection could not be serialized to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input from a UI surface was rejected before reaching the store.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Showing, hiding or creating a window failed.
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Convenience alias that pins the error type to [`QuickNoteError`].
pub type Result<T> = std::result::Result<T, QuickNoteError>;

impl QuickNoteError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("Failed to save notes: {e}"),
            Self::Json(e) => format!("Data format error: {e}"),
            Self::ValidationFailed(msg) => msg.clone(),
            Self::Surface(msg) => format!("Window error: {msg}"),
        }
    }
}
