//! The persisted note record and its on-load normalization.

use std::cmp::Reverse;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::core::tags::extract_tags;

/// A single quick note.
///
/// Serialized in camelCase so the on-disk shape matches what the UI
/// surfaces receive: `id`, `text`, `tags`, `createdAt`, `updatedAt`.
/// `tags` is always derived from `text`; nothing outside this module sets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub text: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Note {
    /// Builds a brand-new note with a fresh id and both timestamps set to `now`.
    pub fn new(text: impl Into<String>, now: &str) -> Self {
        let text = text.into();
        Self {
            id: Uuid::new_v4().to_string(),
            tags: extract_tags(&text),
            text,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Replaces the text, re-derives tags and refreshes `updated_at`.
    ///
    /// `id` and `created_at` are left untouched.
    pub fn apply_text(&mut self, text: impl Into<String>, now: &str) {
        self.text = text.into();
        self.tags = extract_tags(&self.text);
        self.updated_at = now.to_string();
    }

    /// Repairs a raw stored record into the full five-field shape.
    ///
    /// Each field is recovered independently; anything missing, empty or of
    /// the wrong JSON type falls back to its default. `created_at` falls back
    /// to `now`, and `updated_at` to the (possibly repaired) `created_at`.
    /// Returns the note and whether any field had to be filled in.
    pub fn normalize(raw: &Value, now: &str) -> (Self, bool) {
        let mut repaired = false;
        let mut string_field = |key: &str| {
            let found = raw
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            if found.is_none() {
                repaired = true;
            }
            found
        };

        let id = string_field("id").unwrap_or_else(|| Uuid::new_v4().to_string());
        let created_at = string_field("createdAt").unwrap_or_else(|| now.to_string());
        let updated_at = string_field("updatedAt").unwrap_or_else(|| created_at.clone());

        // Empty text is a legitimate value and does not count as a repair.
        let text = match raw.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => {
                repaired = true;
                String::new()
            }
        };

        let tags = match raw.get("tags").and_then(Value::as_array) {
            Some(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            None => {
                repaired = true;
                Vec::new()
            }
        };

        (
            Self {
                id,
                text,
                tags,
                created_at,
                updated_at,
            },
            repaired,
        )
    }
}

/// Returns the current time as an ISO-8601 UTC string with millisecond precision.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses a stored timestamp; `None` for anything that is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Sorts notes for display: most recently updated first.
///
/// The primary key is `updated_at`, falling back to `created_at` when the
/// former does not parse; ties are broken by `created_at`, newest first.
/// Unparseable timestamps order as oldest. The sort is stable, so notes
/// that tie on both keys keep their storage order.
pub fn sort_by_recency(notes: &mut [Note]) {
    notes.sort_by_cached_key(|note| {
        let created = parse_timestamp(&note.created_at);
        let updated = parse_timestamp(&note.updated_at).or(created);
        Reverse((updated, created))
    });
}
