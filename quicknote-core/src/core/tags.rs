//! Hashtag extraction from note text.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// A `#` at the start of the text or after whitespace, followed by one or
/// more Unicode letters, numbers, underscores or hyphens.
static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)#([\p{L}\p{N}_-]+)").expect("valid hashtag regex")
});

/// Extracts the normalized hashtags from `text`.
///
/// Tags are lowercased and returned without the leading `#`. Duplicates
/// collapse onto their first appearance, so the result behaves as a set
/// while keeping encounter order stable for display.
///
/// ```rust
/// use quicknote_core::extract_tags;
///
/// assert_eq!(extract_tags("buy milk #todo #home #TODO"), vec!["todo", "home"]);
/// assert!(extract_tags("email@#example").is_empty());
/// ```
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    TAG_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_in_encounter_order() {
        assert_eq!(extract_tags("buy milk #todo #home"), vec!["todo", "home"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_tags("").is_empty());
        assert!(extract_tags("no tags here").is_empty());
    }

    #[test]
    fn test_lowercases_and_dedupes() {
        assert_eq!(extract_tags("#Work #WORK #work"), vec!["work"]);
    }

    #[test]
    fn test_requires_whitespace_or_start_before_hash() {
        assert_eq!(extract_tags("#first mid#dle\t#tab\n#newline"), vec!["first", "tab", "newline"]);
        assert!(extract_tags("a#b").is_empty());
    }

    #[test]
    fn test_bare_hash_is_not_a_tag() {
        assert!(extract_tags("# heading").is_empty());
        assert!(extract_tags("#").is_empty());
    }

    #[test]
    fn test_unicode_letters_and_digits() {
        assert_eq!(extract_tags("#Çalışma #日本語 #v2"), vec!["çalışma", "日本語", "v2"]);
    }

    #[test]
    fn test_underscore_and_hyphen_are_part_of_tag() {
        assert_eq!(extract_tags("#follow-up #to_do"), vec!["follow-up", "to_do"]);
    }

    #[test]
    fn test_punctuation_ends_tag() {
        assert_eq!(extract_tags("ship it #release!"), vec!["release"]);
        assert_eq!(extract_tags("(#paren)"), Vec::<String>::new());
    }

    #[test]
    fn test_adjacent_tags_separated_by_single_space() {
        assert_eq!(extract_tags("#a #b #c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_extraction_is_pure() {
        let text = "Plan #Trip to #Rome #trip";
        assert_eq!(extract_tags(text), extract_tags(text));
        for tag in extract_tags(text) {
            assert!(!tag.starts_with('#'));
            assert_eq!(tag, tag.to_lowercase());
        }
    }
}
