//! Small word and sentence helpers shared by the pipeline stages.

use std::collections::HashSet;

/// Lowercased word with surrounding punctuation removed.
pub fn word_key(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

/// Lowercase, whitespace-collapsed form used for exact-duplicate checks.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Set of word keys in `text`, empty keys skipped.
pub fn token_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(word_key)
        .filter(|w| !w.is_empty())
        .collect()
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip trailing terminal punctuation and whitespace.
pub fn strip_terminal(text: &str) -> &str {
    text.trim()
        .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?') || c.is_whitespace())
}

pub fn ends_with_terminal(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_key() {
        assert_eq!(word_key("Bicycle,"), "bicycle");
        assert_eq!(word_key("..."), "");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize_first("a dog"), "A dog");
        assert_eq!(lowercase_first("A Dog"), "a Dog");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(strip_terminal("  A dog!?. "), "A dog");
    }

    #[test]
    fn test_token_set_ignores_punctuation() {
        let set = token_set("A dog, a DOG.");
        assert_eq!(set.len(), 2);
        assert!(set.contains("dog"));
    }
}
