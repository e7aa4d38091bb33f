//! Narrative assembly: caption plus aspect fragments into one paragraph.
//!
//! Sentence order is fixed: opening, subject, setting, then either the
//! composition or the atmosphere sentence.

pub mod enhance;

use captionsmith_core::config::DEFAULT_NARRATIVE_MARGIN;
use captionsmith_core::{Aspect, Aspects};
use tracing::debug;

use crate::clean::clean;
use crate::polish::Polisher;
use crate::tokens::{lowercase_first, strip_terminal};

use self::enhance::enhance_caption;

const MIN_SUBJECT_CHARS: usize = 5;
const MIN_SETTING_CHARS: usize = 5;
const MIN_DETAIL_CHARS: usize = 10;
/// Leading words compared when checking a detail sentence for overlap.
const OVERLAP_WORDS: usize = 3;

/// Build a narrative with default settings.
pub fn build_narrative(caption: &str, aspects: &Aspects) -> String {
    NarrativeAssembler::default().build(caption, aspects)
}

#[derive(Debug, Clone)]
pub struct NarrativeAssembler {
    polisher: Polisher,
    /// Characters the narrative must add over the caption.
    margin: usize,
}

impl Default for NarrativeAssembler {
    fn default() -> Self {
        Self {
            polisher: Polisher::default(),
            margin: DEFAULT_NARRATIVE_MARGIN,
        }
    }
}

impl NarrativeAssembler {
    pub fn new(polisher: Polisher, margin: usize) -> Self {
        Self { polisher, margin }
    }

    /// Assemble, polish, and fall back to [`enhance_caption`] when no aspect
    /// text is usable (blank, placeholder or redundant) or the result is not
    /// substantially longer than the caption.
    pub fn build(&self, caption: &str, aspects: &Aspects) -> String {
        let caption = caption.trim();
        if aspects.is_empty() {
            debug!("No aspect text, using template");
            return enhance_caption(caption);
        }
        let base = strip_terminal(caption);
        let base_lower = base.to_lowercase();

        let opened = !base.is_empty();
        let mut sentences: Vec<String> = Vec::new();
        if opened {
            sentences.push(format!("This photograph captures {}.", base_lower));
        }
        if let Some(sentence) = subject_sentence(&base_lower, aspects.get(Aspect::Subject)) {
            sentences.push(sentence);
        }
        if let Some(sentence) = setting_sentence(aspects.get(Aspect::Setting)) {
            sentences.push(sentence);
        }
        let assembled = sentences.join(" ").to_lowercase();
        if let Some(sentence) = detail_sentence(&assembled, aspects) {
            sentences.push(sentence);
        }
        if sentences.len() == usize::from(opened) {
            debug!("Aspect text added nothing usable, using template");
            return enhance_caption(caption);
        }

        let narrative = self.polisher.polish(&sentences.join(" "));
        if narrative.chars().count() >= caption.chars().count() + self.margin {
            narrative
        } else {
            debug!(
                "Narrative too short ({} chars for caption of {}), using template",
                narrative.chars().count(),
                caption.chars().count()
            );
            enhance_caption(caption)
        }
    }
}

/// Cleaned aspect text without terminal punctuation.
fn cleaned_body(raw: &str) -> String {
    strip_terminal(&clean(raw, "")).to_string()
}

fn is_placeholder(aspect: Aspect, body: &str) -> bool {
    aspect
        .placeholder()
        .map(|p| body.eq_ignore_ascii_case(p))
        .unwrap_or(false)
}

fn subject_sentence(caption_lower: &str, raw: &str) -> Option<String> {
    let raw = strip_terminal(raw);
    if raw.is_empty() || raw.to_lowercase() == caption_lower {
        return None;
    }
    let body = cleaned_body(raw);
    if body.chars().count() <= MIN_SUBJECT_CHARS || caption_lower.contains(&body.to_lowercase()) {
        return None;
    }
    Some(format!("The main subject is {}.", lowercase_first(&body)))
}

fn setting_sentence(raw: &str) -> Option<String> {
    let body = cleaned_body(raw);
    if body.chars().count() <= MIN_SETTING_CHARS || is_placeholder(Aspect::Setting, &body) {
        return None;
    }
    Some(format!("The setting features {}.", body.to_lowercase()))
}

/// Composition if usable, otherwise atmosphere, under the same rule.
fn detail_sentence(assembled_lower: &str, aspects: &Aspects) -> Option<String> {
    [
        (Aspect::Composition, "The composition reveals"),
        (Aspect::Atmosphere, "The atmosphere conveys"),
    ]
    .into_iter()
    .find_map(|(aspect, lead)| {
        let body = cleaned_body(aspects.get(aspect));
        if body.chars().count() <= MIN_DETAIL_CHARS || is_placeholder(aspect, &body) {
            return None;
        }
        let opening = body
            .to_lowercase()
            .split_whitespace()
            .take(OVERLAP_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        if assembled_lower.contains(&opening) {
            debug!("Skipping {} sentence overlapping earlier text", aspect);
            return None;
        }
        Some(format!("{} {}.", lead, lowercase_first(&body)))
    })
}
