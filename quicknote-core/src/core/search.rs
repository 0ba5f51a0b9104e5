//! Filtering helpers behind the history window's search box.

use std::collections::BTreeSet;

use crate::Note;

/// Returns the notes whose text or any tag contains `query`, ignoring case.
///
/// A blank query matches everything. Input order is preserved, so callers
/// usually pass an already sorted list.
pub fn search_notes(notes: Vec<Note>, query: &str) -> Vec<Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes;
    }
    notes
        .into_iter()
        .filter(|note| {
            note.text.to_lowercase().contains(&needle)
                || note.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Returns all distinct tags used across `notes`, sorted alphabetically.
pub fn all_tags(notes: &[Note]) -> Vec<String> {
    notes
        .iter()
        .flat_map(|note| note.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: &str = "2026-10-19T08:30:00.000Z";

    fn notes() -> Vec<Note> {
        vec![
            Note::new("Call the Dentist #health", NOW),
            Note::new("groceries #home #todo", NOW),
            Note::new("read about rust", NOW),
        ]
    }

    #[test]
    fn test_blank_query_returns_everything() {
        assert_eq!(search_notes(notes(), "").len(), 3);
        assert_eq!(search_notes(notes(), "   ").len(), 3);
    }

    #[test]
    fn test_matches_text_case_insensitively() {
        let hits = search_notes(notes(), "DENTIST");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].text.starts_with("Call"));
    }

    #[test]
    fn test_matches_tags_by_substring() {
        let hits = search_notes(notes(), "tod");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].tags, vec!["home", "todo"]);
    }

    #[test]
    fn test_no_match() {
        assert!(search_notes(notes(), "python").is_empty());
    }

    #[test]
    fn test_all_tags_sorted_distinct() {
        let mut list = notes();
        list.push(Note::new("more #todo", NOW));
        assert_eq!(all_tags(&list), vec!["health", "home", "todo"]);
        assert!(all_tags(&[]).is_empty());
    }
}
