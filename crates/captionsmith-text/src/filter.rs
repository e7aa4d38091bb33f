//! Meaningfulness filter: rejects gibberish and stuttering output.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tokens::word_key;

pub const MIN_MEANINGFUL_CHARS: usize = 15;
/// A word longer than two characters may appear at most this many times.
pub const MAX_WORD_REPEATS: usize = 3;

const NONSENSE_BIGRAMS: &[&str] = &[
    "why why",
    "the the",
    "yes yes",
    "no no",
    "answer answer",
    "question question",
    "what what",
    "image image",
];

static NONSENSE_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = NONSENSE_BIGRAMS
        .iter()
        .map(|p| p.replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?:{})", alternation)).unwrap()
});

/// Whether a cleaned sentence reads as language rather than model noise.
///
/// Nonsense bigrams are matched as substrings of the lowercased text.
pub fn is_meaningful(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_MEANINGFUL_CHARS {
        return false;
    }

    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in trimmed.split_whitespace() {
        let key = word_key(token);
        if key.chars().count() <= 2 {
            continue;
        }
        let count = counts.entry(key).or_insert(0);
        *count += 1;
        if *count > MAX_WORD_REPEATS {
            return false;
        }
    }

    !NONSENSE_RE.is_match(&trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_short() {
        assert!(!is_meaningful(""));
        assert!(!is_meaningful("A dog runs."));
    }

    #[test]
    fn test_repetition() {
        assert!(!is_meaningful("the the the the the"));
        assert!(!is_meaningful("Boat on water, boat in harbor, boat, boat again"));
        // Short words are not counted.
        assert!(is_meaningful("a a a a man on a bench in a park"));
    }

    #[test]
    fn test_nonsense_bigrams() {
        assert!(!is_meaningful("Why why is the sky blue today"));
        assert!(!is_meaningful("A photo of answer answer text"));
        // Matched anywhere in the text, word boundaries or not.
        assert!(!is_meaningful("People bathe there in the summer"));
        assert!(!is_meaningful("A casino nobody visits anymore"));
    }

    #[test]
    fn test_ordinary_sentence() {
        assert!(is_meaningful("A man stands near a red bicycle."));
    }
}
