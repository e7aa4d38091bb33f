//! Similarity deduplication and final formatting of a sentence block.
//!
//! Greedy and order-preserving: a sentence is kept unless it is too similar to
//! one already kept, so the earliest (usually highest-confidence) prompt wins.

use std::collections::HashSet;

use captionsmith_core::config::DEFAULT_SIMILARITY_THRESHOLD;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::clean::clean;
use crate::filter::is_meaningful;
use crate::narrative::enhance::enhance_caption;
use crate::tokens::{capitalize_first, normalize, strip_terminal, token_set};

pub const MIN_SENTENCE_CHARS: usize = 10;

static REPEATED_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?](?:\s*[.!?])+").unwrap());

/// `|A ∩ B| / max(|A|, |B|)` over word-key sets; 0.0 when both are empty.
pub fn token_similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let largest = a.len().max(b.len());
    if largest == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / largest as f64
}

/// Similarity of two sentences' normalized token sets.
pub fn similarity(a: &str, b: &str) -> f64 {
    token_similarity(&token_set(&normalize(a)), &token_set(&normalize(b)))
}

/// Deduplicate and format with default settings.
pub fn dedupe_and_polish(text: &str) -> String {
    Polisher::default().polish(text)
}

/// Deduplicator with a configurable threshold.
#[derive(Debug, Clone)]
pub struct Polisher {
    pub similarity_threshold: f64,
    pub min_sentence_chars: usize,
}

impl Default for Polisher {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            min_sentence_chars: MIN_SENTENCE_CHARS,
        }
    }
}

impl Polisher {
    pub fn new(similarity_threshold: f64) -> Self {
        Self {
            similarity_threshold,
            ..Self::default()
        }
    }

    /// Split `text` into sentences, drop noise and near-duplicates, rejoin.
    pub fn polish(&self, text: &str) -> String {
        let mut seen: HashSet<String> = HashSet::new();
        let mut accepted: Vec<HashSet<String>> = Vec::new();
        let mut output: Vec<String> = Vec::new();

        for candidate in text.split(['.', '!', '?']) {
            let candidate = candidate.trim();
            if candidate.chars().count() < self.min_sentence_chars || !is_meaningful(candidate) {
                if !candidate.is_empty() {
                    debug!("Dropping noisy sentence: '{}'", candidate);
                }
                continue;
            }

            let normalized = normalize(candidate);
            if seen.contains(&normalized) {
                debug!("Dropping repeated sentence: '{}'", candidate);
                continue;
            }
            let tokens = token_set(&normalized);
            if let Some(score) = accepted
                .iter()
                .map(|prev| token_similarity(&tokens, prev))
                .find(|score| *score > self.similarity_threshold)
            {
                debug!("Dropping near-duplicate (similarity {:.2}): '{}'", score, candidate);
                continue;
            }

            seen.insert(normalized);
            accepted.push(tokens);
            let sentence = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
            output.push(capitalize_first(
                sentence.trim_end_matches([',', ';', ':']),
            ));
        }

        if output.is_empty() {
            return Self::fallback(text);
        }

        let joined = format!("{}.", output.join(". "));
        REPEATED_PUNCT_RE.replace_all(&joined, ".").into_owned()
    }

    /// Nothing survived: expand the first clause from templates instead.
    fn fallback(text: &str) -> String {
        let first_clause = text
            .split(['.', '!', '?'])
            .map(str::trim)
            .find(|clause| !clause.is_empty())
            .unwrap_or("");
        let cleaned = clean(first_clause, "");
        let base = strip_terminal(&cleaned);
        if base.is_empty() {
            return String::new();
        }
        debug!("No sentence survived polishing; enhancing '{}'", base);
        enhance_caption(base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(text: &str) -> Vec<&str> {
        text.split('.').map(str::trim).filter(|s| !s.is_empty()).collect()
    }

    #[test]
    fn test_similarity_measure() {
        assert_eq!(similarity("a red car", "A red car"), 1.0);
        assert_eq!(similarity("", ""), 0.0);
        // {red, car} shared, max size 4.
        assert_eq!(similarity("a red car parked", "the red car"), 0.5);
    }

    #[test]
    fn test_drops_near_duplicates() {
        let text = "A man rides a red bicycle down the street. \
                    A man rides a red bicycle down a street! \
                    Tall trees line the quiet road nearby.";
        let result = dedupe_and_polish(text);
        assert_eq!(
            result,
            "A man rides a red bicycle down the street. Tall trees line the quiet road nearby."
        );
    }

    #[test]
    fn test_first_occurrence_wins() {
        let text = "the dog sleeps on a warm porch. The dog sleeps on a warm porch.";
        assert_eq!(dedupe_and_polish(text), "The dog sleeps on a warm porch.");
    }

    #[test]
    fn test_never_emits_similar_pair() {
        let text = "A woman holds an umbrella in the rain. \
                    A woman holds a black umbrella in the rain. \
                    A woman with an umbrella walks in the rain. \
                    Cars pass by on the wet street. \
                    Cars pass by on the wet street slowly.";
        let result = dedupe_and_polish(text);
        let kept = sentences(&result);
        assert!(!kept.is_empty());
        for (i, a) in kept.iter().enumerate() {
            for b in kept.iter().skip(i + 1) {
                assert!(similarity(a, b) <= 0.75, "{} / {}", a, b);
            }
        }
    }

    #[test]
    fn test_noise_removed() {
        let text = "Yes. the the the the the. A child flies a kite on the hill";
        assert_eq!(dedupe_and_polish(text), "A child flies a kite on the hill.");
    }

    #[test]
    fn test_fallback_when_nothing_survives() {
        let result = dedupe_and_polish("a red kite. blue sky");
        assert!(result.starts_with("This image shows a red kite."));
    }

    #[test]
    fn test_fallback_on_empty_input() {
        assert_eq!(dedupe_and_polish(""), "");
        assert_eq!(dedupe_and_polish(" . ! ? "), "");
    }

    #[test]
    fn test_threshold_is_configurable() {
        let text = "A dog runs across the green park. A dog runs across the park.";
        assert_eq!(
            Polisher::new(0.95).polish(text),
            "A dog runs across the green park. A dog runs across the park."
        );
        assert_eq!(Polisher::default().polish(text), "A dog runs across the green park.");
    }
}
