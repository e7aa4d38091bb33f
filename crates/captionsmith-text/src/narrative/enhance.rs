//! Template-only caption expansion.
//!
//! Used when no aspect text is available or the assembled narrative is not
//! richer than the caption. Output is a pure function of the caption.

use crate::tokens::{lowercase_first, strip_terminal};

type ContextTable = &'static [(&'static str, &'static str)];

const SUBJECT_CONTEXT: ContextTable = &[
    ("woman", "The woman is the clear focal point of the frame."),
    ("man", "The man is the clear focal point of the frame."),
    ("child", "The child brings a sense of innocence to the scene."),
    ("people", "Several people share the frame, suggesting a social moment."),
    ("dog", "The dog adds warmth and companionship to the composition."),
    ("cat", "The cat lends the scene a calm, domestic character."),
    ("bird", "The bird introduces a delicate natural element."),
    ("horse", "The horse gives the image a sense of strength and grace."),
    ("player", "The player is captured in the middle of the action."),
];

const OBJECT_CONTEXT: ContextTable = &[
    ("bicycle", "The bicycle suggests movement and an active lifestyle."),
    ("bike", "The bike suggests movement and an active lifestyle."),
    ("car", "The vehicle anchors the scene in everyday travel."),
    ("boat", "The boat hints at a connection with the water."),
    ("umbrella", "The umbrella adds a splash of shape and color."),
    ("laptop", "The laptop points to work or study in progress."),
    ("book", "The book suggests a quiet moment of reading."),
    ("ball", "The ball signals play and recreation."),
    ("backpack", "The backpack hints at travel or a day out."),
];

const LOCATION_CONTEXT: ContextTable = &[
    ("beach", "The beach setting evokes sun, sand and open space."),
    ("mountain", "The mountain backdrop adds scale and grandeur."),
    ("forest", "The forest surroundings create a lush, enclosed atmosphere."),
    ("city", "The urban surroundings give the image a lively backdrop."),
    ("street", "The street setting places the moment in everyday life."),
    ("park", "The park setting offers greenery and a relaxed feel."),
    ("kitchen", "The kitchen setting suggests a homely, practical space."),
    ("room", "The interior space frames the subject closely."),
    ("field", "The open field gives the scene a sense of freedom."),
    ("water", "The water adds reflections and a tranquil quality."),
];

const ACTIVITY_CONTEXT: ContextTable = &[
    ("riding", "The activity conveys motion and purpose."),
    ("running", "The running figure brings energy to the frame."),
    ("playing", "The playful activity gives the image a lighthearted tone."),
    ("sitting", "The seated pose suggests a pause or moment of rest."),
    ("standing", "The standing pose gives the subject a steady presence."),
    ("walking", "The walking motion suggests a journey underway."),
    ("eating", "The shared meal suggests comfort and routine."),
    ("reading", "The act of reading suggests focus and calm."),
];

const ATMOSPHERE_CONTEXT: ContextTable = &[
    ("sunset", "Warm evening light bathes the scene."),
    ("sunny", "Bright sunlight gives the image a cheerful quality."),
    ("night", "The night setting lends the image a moody character."),
    ("snow", "The snow softens the scene with a quiet stillness."),
    ("rain", "The rain adds texture and a reflective mood."),
    ("fog", "The fog gives the scene a mysterious depth."),
    ("colorful", "Vivid colors make the image feel lively."),
    ("dark", "Low light gives the image a subdued tone."),
];

/// Tables in priority order; the first hit across all of them wins.
const CONTEXT_TABLES: &[ContextTable] = &[
    SUBJECT_CONTEXT,
    OBJECT_CONTEXT,
    LOCATION_CONTEXT,
    ACTIVITY_CONTEXT,
    ATMOSPHERE_CONTEXT,
];

const GENERIC_CONTEXT: &str = "The scene presents a clearly captured moment with distinct visual detail.";

/// Indexed by caption length modulo four, so a caption always gets the same one.
const CONCLUSIONS: [&str; 4] = [
    "Overall, the image offers a clear and engaging visual story.",
    "Together, these elements create a balanced and memorable composition.",
    "The result is a well-composed snapshot of the moment.",
    "Each element contributes to a cohesive and expressive image.",
];

/// Expand a caption from the context tables.
///
/// The caption is inserted as written, minus its terminal punctuation and
/// with a leading capital lowered so a cleaned sentence reads mid-sentence.
/// An empty caption yields an empty string.
pub fn enhance_caption(caption: &str) -> String {
    let base = strip_terminal(caption);
    if base.is_empty() {
        return String::new();
    }
    let lower = base.to_lowercase();

    let context = CONTEXT_TABLES
        .iter()
        .find_map(|table| {
            table
                .iter()
                .find(|(keyword, _)| lower.contains(keyword))
                .map(|(_, sentence)| *sentence)
        })
        .unwrap_or(GENERIC_CONTEXT);
    let conclusion = CONCLUSIONS[caption.chars().count() % CONCLUSIONS.len()];

    format!(
        "This image shows {}. {} {}",
        lowercase_first(base),
        context,
        conclusion
    )
}
