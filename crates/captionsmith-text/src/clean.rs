//! Phrase cleaning for one raw generator fragment.
//!
//! Strips prompt echoes, Q&A scaffolding, stuttered words and filler phrases,
//! then normalizes punctuation and capitalization.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tokens::{capitalize_first, ends_with_terminal, word_key};

/// Filler and prompt-leakage phrases, matched as whole phrases.
/// Longer phrases come first so alternation prefers them.
const FILLER_PHRASES: &[&str] = &[
    "this is an image of",
    "this is a picture of",
    "this is a photo of",
    "describe this image",
    "describe the image",
    "describe the scene",
    "what can you see",
    "what do you see",
    "background features",
    "in this picture",
    "in this image",
    "in the picture",
    "in the image",
    "can you see",
    "it appears",
    "please describe",
];

/// Words that cannot end a sentence.
const DANGLING: &[&str] = &[
    "with", "of", "in", "on", "at", "to", "for", "from", "by", "near", "into", "onto", "under",
    "over", "behind", "and", "or", "the", "a", "an",
];

const LEADING_STUBS: &[&str] = &["a", "an", "the", "in", "on", "at"];

static FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    let alternation = FILLER_PHRASES
        .iter()
        .map(|p| regex::escape(p).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).unwrap()
});
static QA_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:questions?|answers?)\s*:").unwrap());
static PERIOD_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(?:\s*\.)+").unwrap());
static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([.,!])").unwrap());
static PERIOD_SPACING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\s*").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Clean one raw fragment that was produced for `prompt`.
///
/// Never fails; returns an empty string when nothing meaningful remains.
pub fn clean(raw: &str, prompt: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let mut text = remove_prompt(raw, prompt);
    text = remove_qa_scaffolding(&text);
    text = collapse_repeated_words(&text);
    text = FILLER_RE.replace_all(&text, " ").into_owned();
    text = normalize_punctuation(&text);
    text = strip_dangling(&text);
    text = drop_leading_stub(&text);

    if !text.chars().any(char::is_alphanumeric) {
        return String::new();
    }

    let mut text = capitalize_first(&text);
    if !ends_with_terminal(&text) {
        text.push('.');
    }
    text
}

fn remove_prompt(raw: &str, prompt: &str) -> String {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return raw.to_string();
    }
    match Regex::new(&format!("(?i){}", regex::escape(prompt))) {
        Ok(re) => re.replace_all(raw, " ").into_owned(),
        Err(_) => raw.replace(prompt, " "),
    }
}

/// A question or answer label goes together with the run after it, up to
/// the next capitalized token or the end of the text.
fn remove_qa_scaffolding(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(label) = QA_LABEL_RE.find(rest) {
        out.push_str(&rest[..label.start()]);
        out.push(' ');
        let tail = &rest[label.end()..];
        let next_capital = tail
            .char_indices()
            .find(|(_, c)| c.is_uppercase())
            .map(|(i, _)| i)
            .unwrap_or(tail.len());
        rest = &tail[next_capital..];
    }
    out.push_str(rest);
    out
}

/// Runs of three or more identical words collapse to the last one.
fn collapse_repeated_words(text: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(words.len());
    let mut i = 0;
    while i < words.len() {
        let key = word_key(words[i]);
        let mut j = i + 1;
        while !key.is_empty() && j < words.len() && word_key(words[j]) == key {
            j += 1;
        }
        if j - i >= 3 {
            kept.push(words[j - 1]);
        } else {
            kept.extend_from_slice(&words[i..j]);
        }
        i = j;
    }
    kept.join(" ")
}

fn normalize_punctuation(text: &str) -> String {
    let text: String = text
        .chars()
        .map(|c| if c == '?' || c == ':' { '.' } else { c })
        .collect();
    let text = PERIOD_RUN_RE.replace_all(&text, ".");
    let text = SPACE_BEFORE_PUNCT_RE.replace_all(&text, "$1");
    let text = PERIOD_RUN_RE.replace_all(&text, ".");
    let text = PERIOD_SPACING_RE.replace_all(&text, ". ");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';' | '!'))
        .trim_end()
        .to_string()
}

/// Drop trailing prepositions, articles and conjunctions from every sentence.
fn strip_dangling(text: &str) -> String {
    let sentences: Vec<String> = text
        .split('.')
        .filter_map(|sentence| {
            let mut words: Vec<&str> = sentence.split_whitespace().collect();
            while let Some(last) = words.last() {
                let key = word_key(last);
                if key.is_empty() || DANGLING.contains(&key.as_str()) {
                    words.pop();
                } else {
                    break;
                }
            }
            if words.is_empty() {
                None
            } else {
                Some(
                    words
                        .join(" ")
                        .trim_end_matches([',', ';'])
                        .to_string(),
                )
            }
        })
        .collect();

    let mut joined = sentences.join(". ");
    if !joined.is_empty() && text.trim_end().ends_with('.') {
        joined.push('.');
    }
    joined
}

/// Prepositions always go; an article goes only when it is stacked on
/// another stub word ("the in the park").
fn drop_leading_stub(text: &str) -> String {
    let mut words = text.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };
    let first_key = word_key(first);
    let second_key = words.next().map(word_key).unwrap_or_default();

    let drop = match first_key.as_str() {
        "in" | "on" | "at" => true,
        "a" | "an" | "the" => LEADING_STUBS.contains(&second_key.as_str()),
        _ => false,
    };
    if drop {
        text.split_whitespace().skip(1).collect::<Vec<_>>().join(" ")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_echo_removed() {
        assert_eq!(
            clean("Describe this image: a cat on a mat", "Describe this image:"),
            "A cat on a mat."
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean("", "anything"), "");
        assert_eq!(clean("   \n\t", ""), "");
        assert_eq!(clean("?? ... ::", ""), "");
    }

    #[test]
    fn test_idempotent_on_clean_sentence() {
        let once = clean("A man stands near a red bicycle.", "");
        assert_eq!(once, "A man stands near a red bicycle.");
        assert_eq!(clean(&once, ""), once);
    }

    #[test]
    fn test_qa_scaffolding() {
        assert_eq!(
            clean("question: what is in the picture? Answer: A dog on the grass", ""),
            "A dog on the grass."
        );
        assert_eq!(clean("question: what is this? answer: a red bus", ""), "");
        assert_eq!(clean("answer: a red bus", ""), "");
        assert_eq!(
            clean("A bus at a stop. Answers: red and white", ""),
            "A bus at a stop."
        );
    }

    #[test]
    fn test_repeated_words_collapse() {
        assert_eq!(clean("a dog dog dog dog running", ""), "A dog running.");
        // Two repetitions are left alone.
        assert_eq!(clean("a big big dog", ""), "A big big dog.");
    }

    #[test]
    fn test_filler_phrases() {
        assert_eq!(
            clean("in this image a woman is reading a book", ""),
            "A woman is reading a book."
        );
        assert_eq!(clean("it appears a bus is parked", ""), "A bus is parked.");
    }

    #[test]
    fn test_filler_requires_whole_phrase() {
        // "appears" inside a longer word is not the filler phrase.
        assert_eq!(clean("a kite disappears", ""), "A kite disappears.");
    }

    #[test]
    fn test_punctuation_normalization() {
        assert_eq!(clean("a dog...running fast", ""), "A dog. running fast.");
        assert_eq!(clean("a dog ?  a cat", ""), "A dog. a cat.");
    }

    #[test]
    fn test_dangling_preposition() {
        assert_eq!(clean("a man riding a horse with.", ""), "A man riding a horse.");
        assert_eq!(
            clean("a man riding a horse. standing next to", ""),
            "A man riding a horse. standing next."
        );
    }

    #[test]
    fn test_leading_stub() {
        assert_eq!(clean("in a park with trees", ""), "A park with trees.");
        assert_eq!(clean("the in the park a dog", ""), "In the park a dog.");
        assert_eq!(clean("the dog sleeps", ""), "The dog sleeps.");
    }

    #[test]
    fn test_keeps_exclamation() {
        assert_eq!(clean("what a view!", ""), "What a view!");
    }
}
