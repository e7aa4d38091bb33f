//! Synthesis configuration: JSON file, environment overrides, defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::CaptionMode;

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.75;
pub const DEFAULT_NARRATIVE_MARGIN: usize = 20;
pub const DEFAULT_CANDIDATES_PER_PROMPT: usize = 1;

/// Tunables for one synthesizer instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisConfig {
    #[serde(default)]
    pub mode: CaptionMode,
    /// Query the aspect prompts and build a detailed description.
    #[serde(default = "default_detailed")]
    pub detailed: bool,
    /// Sentences more similar than this to an accepted one are dropped.
    #[serde(default = "default_similarity")]
    pub similarity_threshold: f64,
    /// Characters a narrative must add over its caption to be kept.
    #[serde(default = "default_margin")]
    pub narrative_margin: usize,
    #[serde(default = "default_candidates")]
    pub candidates_per_prompt: usize,
}

fn default_detailed() -> bool {
    true
}
fn default_similarity() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}
fn default_margin() -> usize {
    DEFAULT_NARRATIVE_MARGIN
}
fn default_candidates() -> usize {
    DEFAULT_CANDIDATES_PER_PROMPT
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            mode: CaptionMode::Local,
            detailed: true,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            narrative_margin: DEFAULT_NARRATIVE_MARGIN,
            candidates_per_prompt: DEFAULT_CANDIDATES_PER_PROMPT,
        }
    }
}

impl SynthesisConfig {
    /// Load config from a JSON file. A missing file yields the defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config = match std::fs::read_to_string(config_path) {
            Ok(s) => {
                let config: SynthesisConfig = serde_json::from_str(&s)?;
                info!("Loaded synthesis config from {}", config_path.display());
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", config_path.display());
                Self::default()
            }
            Err(e) => return Err(e.into()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `CAPTIONSMITH_*` environment overrides on top of `self`.
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(mode) = std::env::var("CAPTIONSMITH_MODE") {
            self.mode = mode.parse()?;
        }
        if let Ok(detailed) = std::env::var("CAPTIONSMITH_DETAILED") {
            self.detailed = matches!(
                detailed.trim().to_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Ok(threshold) = std::env::var("CAPTIONSMITH_SIMILARITY") {
            self.similarity_threshold = threshold.trim().parse().map_err(|_| {
                Error::Config(format!("CAPTIONSMITH_SIMILARITY is not a number: {}", threshold))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.similarity_threshold > 0.0 && self.similarity_threshold <= 1.0) {
            return Err(Error::Config(format!(
                "similarity_threshold must be in (0, 1], got {}",
                self.similarity_threshold
            )));
        }
        if self.candidates_per_prompt == 0 {
            return Err(Error::Config("candidates_per_prompt must be at least 1".into()));
        }
        Ok(())
    }
}
