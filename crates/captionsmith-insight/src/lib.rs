//! captionsmith insight: keyword-table classification of a caption.
//!
//! Subjects, settings and mood come from ordered category tables; objects
//! from a fixed noun list; keywords from the caption's own content words.

pub mod tables;

use captionsmith_core::types::{GENERAL_TAG, NEUTRAL_MOOD};
use captionsmith_core::Insights;

use tables::{Category, MOOD_CATEGORIES, OBJECTS, SETTING_CATEGORIES, STOP_WORDS, SUBJECT_CATEGORIES};

pub const MAX_OBJECTS: usize = 5;
pub const MAX_KEYWORDS: usize = 6;
/// Keywords must be longer than this.
const MIN_KEYWORD_CHARS: usize = 3;

/// Derive insights from a caption. Deterministic; never fails.
pub fn extract_insights(caption: &str) -> Insights {
    let lower = caption.to_lowercase();

    let subjects = matching_tags(&lower, SUBJECT_CATEGORIES);
    let settings = matching_tags(&lower, SETTING_CATEGORIES);
    let mood = MOOD_CATEGORIES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(tag, _)| *tag)
        .unwrap_or(NEUTRAL_MOOD);

    Insights {
        subjects: or_general(subjects),
        settings: or_general(settings),
        objects: extract_objects(&lower),
        mood: mood.to_string(),
        keywords: extract_keywords(&lower),
    }
}

/// Every category with at least one keyword in `text_lower`, in table order.
fn matching_tags(text_lower: &str, categories: &[Category]) -> Vec<String> {
    categories
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|kw| text_lower.contains(kw)))
        .map(|(tag, _)| tag.to_string())
        .collect()
}

fn or_general(tags: Vec<String>) -> Vec<String> {
    if tags.is_empty() {
        vec![GENERAL_TAG.to_string()]
    } else {
        tags
    }
}

fn extract_objects(text_lower: &str) -> Vec<String> {
    OBJECTS
        .iter()
        .filter(|obj| text_lower.contains(**obj))
        .take(MAX_OBJECTS)
        .map(|obj| obj.to_string())
        .collect()
}

fn extract_keywords(text_lower: &str) -> Vec<String> {
    text_lower
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS && !STOP_WORDS.contains(w))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}
