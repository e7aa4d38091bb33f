//! Caption generator trait and implementations.
//!
//! The `CaptionGenerator` trait abstracts over the vision-captioning model.
//! Implementations:
//! - `NoopGenerator`: returns empty text (no model configured)
//! - `ReplayGenerator`: serves fragments recorded from an earlier model run

use std::collections::HashMap;

use captionsmith_core::{Aspect, Result};

/// Prompt used to elicit the base caption; models tend to echo it.
pub const CAPTION_PROMPT: &str = "a photograph of";
/// Fragment key of the base caption in recorded fragment sets.
pub const CAPTION_KEY: &str = "caption";

/// Trait for caption generation backends.
pub trait CaptionGenerator: Send + Sync {
    /// Generate raw text for an image and a prompt.
    fn generate(&self, image: &[u8], prompt: &str) -> Result<String>;

    /// Generate up to `n` candidate strings for the same prompt.
    fn generate_candidates(&self, image: &[u8], prompt: &str, n: usize) -> Result<Vec<String>> {
        let _ = n;
        Ok(vec![self.generate(image, prompt)?])
    }

    /// Short backend name for logs.
    fn name(&self) -> &str;
}

/// Map a prompt back to its fragment key (`caption` or an aspect name).
pub fn prompt_key(prompt: &str) -> Option<&'static str> {
    if prompt == CAPTION_PROMPT {
        return Some(CAPTION_KEY);
    }
    Aspect::all()
        .iter()
        .find(|a| a.prompt() == prompt)
        .map(|a| a.name())
}

/// Generator that never produces text.
pub struct NoopGenerator;

impl CaptionGenerator for NoopGenerator {
    fn generate(&self, _image: &[u8], _prompt: &str) -> Result<String> {
        Ok(String::new())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Recorded generator output keyed by prompt (`caption`, `subject`, ...).
#[derive(Debug, Clone, Default)]
pub struct ReplayGenerator {
    fragments: HashMap<String, Vec<String>>,
}

impl ReplayGenerator {
    /// Keys that differ only in case or padding are merged, in key order.
    pub fn new(fragments: HashMap<String, Vec<String>>) -> Self {
        let mut entries: Vec<(String, Vec<String>)> = fragments.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        let mut merged: HashMap<String, Vec<String>> = HashMap::new();
        for (key, values) in entries {
            merged
                .entry(key.trim().to_lowercase())
                .or_default()
                .extend(values);
        }
        Self { fragments: merged }
    }

    /// Builder-style: record one more fragment under `key`.
    pub fn with_fragment(mut self, key: &str, fragment: impl Into<String>) -> Self {
        self.fragments
            .entry(key.trim().to_lowercase())
            .or_default()
            .push(fragment.into());
        self
    }

    fn recorded(&self, prompt: &str) -> &[String] {
        prompt_key(prompt)
            .and_then(|key| self.fragments.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl CaptionGenerator for ReplayGenerator {
    fn generate(&self, _image: &[u8], prompt: &str) -> Result<String> {
        Ok(self.recorded(prompt).first().cloned().unwrap_or_default())
    }

    fn generate_candidates(&self, _image: &[u8], prompt: &str, n: usize) -> Result<Vec<String>> {
        Ok(self.recorded(prompt).iter().take(n).cloned().collect())
    }

    fn name(&self) -> &str {
        "replay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_key() {
        assert_eq!(prompt_key(CAPTION_PROMPT), Some("caption"));
        assert_eq!(prompt_key(Aspect::Setting.prompt()), Some("setting"));
        assert_eq!(prompt_key("what is this"), None);
    }

    #[test]
    fn test_replay_candidates() {
        let generator = ReplayGenerator::default()
            .with_fragment("Caption", "a photograph of a dog")
            .with_fragment("caption", "a photograph of a puppy");
        let all = generator.generate_candidates(&[], CAPTION_PROMPT, 5).unwrap();
        assert_eq!(all.len(), 2);
        let first = generator.generate_candidates(&[], CAPTION_PROMPT, 1).unwrap();
        assert_eq!(first, vec!["a photograph of a dog"]);
        assert_eq!(generator.generate(&[], Aspect::Subject.prompt()).unwrap(), "");
    }

    #[test]
    fn test_new_merges_case_variants() {
        let mut fragments = HashMap::new();
        fragments.insert("caption".to_string(), vec!["a photograph of a cat".to_string()]);
        fragments.insert("Caption".to_string(), vec!["a photograph of a dog".to_string()]);
        let generator = ReplayGenerator::new(fragments);
        let all = generator.generate_candidates(&[], CAPTION_PROMPT, 5).unwrap();
        assert_eq!(all, vec!["a photograph of a dog", "a photograph of a cat"]);
    }

    #[test]
    fn test_noop() {
        let generator = NoopGenerator;
        assert_eq!(generator.generate(b"img", CAPTION_PROMPT).unwrap(), "");
        assert_eq!(
            generator.generate_candidates(b"img", CAPTION_PROMPT, 3).unwrap(),
            vec![String::new()]
        );
    }
}
