//! Synthesis jobs: recorded generator fragments plus per-job overrides.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use captionsmith_core::{Aspect, CaptionMode, Error, Result, SynthesisConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generator::{ReplayGenerator, CAPTION_KEY};

/// A job file: `{mode?, detailed?, metadata?, fragments: {caption: [..], subject: [..]}}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisJob {
    #[serde(default)]
    pub mode: Option<CaptionMode>,
    #[serde(default)]
    pub detailed: Option<bool>,
    /// Passed through to the export envelope.
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub fragments: HashMap<String, Vec<String>>,
}

impl SynthesisJob {
    /// Read and validate a job file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let job: SynthesisJob = serde_json::from_str(&raw)?;
        job.validate()?;
        Ok(job)
    }

    /// Rejects unknown fragment keys and keys that differ only in case.
    pub fn validate(&self) -> Result<()> {
        let mut seen: HashSet<String> = HashSet::new();
        for raw in self.fragments.keys() {
            let key = raw.trim().to_lowercase();
            if key != CAPTION_KEY && Aspect::from_name(&key).is_none() {
                return Err(Error::Config(format!("unknown fragment key: {}", key)));
            }
            if !seen.insert(key.clone()) {
                return Err(Error::Config(format!("duplicate fragment key: {}", key)));
            }
        }
        Ok(())
    }

    /// Job overrides applied on top of `config`.
    pub fn apply_to(&self, mut config: SynthesisConfig) -> SynthesisConfig {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(detailed) = self.detailed {
            config.detailed = detailed;
        }
        let most_candidates = self.fragments.values().map(Vec::len).max().unwrap_or(1);
        config.candidates_per_prompt = config.candidates_per_prompt.max(most_candidates);
        config
    }

    pub fn generator(&self) -> ReplayGenerator {
        ReplayGenerator::new(self.fragments.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_job() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.json");
        std::fs::write(
            &path,
            r#"{
                "mode": "cloud",
                "fragments": {
                    "caption": ["a photograph of a dog", "a photograph of a puppy"],
                    "Setting": ["a sunny park"]
                }
            }"#,
        )
        .unwrap();
        let job = SynthesisJob::load(&path).unwrap();
        let config = job.apply_to(SynthesisConfig::default());
        assert_eq!(config.mode, CaptionMode::Cloud);
        assert!(config.detailed);
        assert_eq!(config.candidates_per_prompt, 2);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let job: SynthesisJob =
            serde_json::from_str(r#"{"fragments": {"lighting": ["soft"]}}"#).unwrap();
        assert!(matches!(job.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let job: SynthesisJob = serde_json::from_str(
            r#"{"fragments": {"caption": ["a dog"], "Caption ": ["a cat"]}}"#,
        )
        .unwrap();
        assert!(matches!(job.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            SynthesisJob::load(&dir.path().join("nope.json")),
            Err(Error::Io(_))
        ));
    }
}
