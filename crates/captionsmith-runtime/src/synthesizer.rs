//! Synthesizer: drives a caption generator and the text pipeline.

use std::sync::Arc;

use captionsmith_core::{Aspect, Aspects, DescriptionRecord, Error, Result, SynthesisConfig};
use captionsmith_insight::extract_insights;
use captionsmith_text::{clean, is_meaningful, NarrativeAssembler, Polisher};
use tracing::{debug, info, warn};

use crate::generator::{CaptionGenerator, NoopGenerator, CAPTION_PROMPT};

/// Turns generator output into a [`DescriptionRecord`].
///
/// Holds no mutable state; share it freely across threads.
pub struct Synthesizer {
    config: SynthesisConfig,
    generator: Arc<dyn CaptionGenerator>,
    assembler: NarrativeAssembler,
}

impl Synthesizer {
    pub fn new(config: SynthesisConfig, generator: Arc<dyn CaptionGenerator>) -> Self {
        let assembler = NarrativeAssembler::new(
            Polisher::new(config.similarity_threshold),
            config.narrative_margin,
        );
        info!(
            "Synthesizer initialized: generator={}, mode={}, detailed={}",
            generator.name(),
            config.mode,
            config.detailed
        );
        Self {
            config,
            generator,
            assembler,
        }
    }

    /// Synthesizer for callers that already hold caption text.
    pub fn without_generator(config: SynthesisConfig) -> Self {
        Self::new(config, Arc::new(NoopGenerator))
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Build a record from a base caption and raw aspect text.
    ///
    /// Each aspect is cleaned against its prompt and dropped if it reads as noise.
    pub fn synthesize(&self, caption: &str, aspects: &Aspects) -> DescriptionRecord {
        let caption = clean(caption, "");
        let mut prepared = Aspects::default();
        for &aspect in Aspect::all() {
            let cleaned = clean(aspects.get(aspect), aspect.prompt());
            if is_meaningful(&cleaned) {
                prepared.set(aspect, cleaned);
            } else if !cleaned.is_empty() {
                debug!("Discarding noisy {} aspect: '{}'", aspect, cleaned);
            }
        }
        self.assemble(caption, &prepared)
    }

    /// Query the generator for an image and build its record.
    ///
    /// Fails only when the base caption prompt fails; aspect failures are
    /// logged and treated as empty aspects.
    pub fn describe(&self, image: &[u8]) -> Result<DescriptionRecord> {
        let caption = self.base_caption(image)?;
        let aspects = if self.config.detailed && !caption.is_empty() {
            self.gather_aspects(image)
        } else {
            Aspects::default()
        };
        Ok(self.assemble(caption, &aspects))
    }

    fn base_caption(&self, image: &[u8]) -> Result<String> {
        let candidates = self
            .generator
            .generate_candidates(image, CAPTION_PROMPT, self.config.candidates_per_prompt)
            .map_err(|e| Error::Generation(format!("caption prompt failed: {}", e)))?;

        let cleaned: Vec<String> = candidates
            .iter()
            .map(|raw| clean(raw, CAPTION_PROMPT))
            .filter(|c| !c.is_empty())
            .collect();

        let caption = cleaned
            .iter()
            .find(|c| is_meaningful(c))
            .or_else(|| cleaned.first())
            .cloned()
            .unwrap_or_default();
        if caption.is_empty() {
            warn!("Generator {} produced no usable caption", self.generator.name());
        }
        Ok(caption)
    }

    fn gather_aspects(&self, image: &[u8]) -> Aspects {
        let mut aspects = Aspects::default();
        for &aspect in Aspect::all() {
            let candidates = match self.generator.generate_candidates(
                image,
                aspect.prompt(),
                self.config.candidates_per_prompt,
            ) {
                Ok(candidates) => candidates,
                Err(e) => {
                    warn!("{} prompt failed, continuing without it: {}", aspect, e);
                    continue;
                }
            };

            let mut kept: Vec<String> = Vec::new();
            for raw in &candidates {
                let cleaned = clean(raw, aspect.prompt());
                if is_meaningful(&cleaned) && !kept.contains(&cleaned) {
                    kept.push(cleaned);
                }
            }
            debug!(
                "{} aspect: kept {} of {} candidates",
                aspect,
                kept.len(),
                candidates.len()
            );
            aspects.set(aspect, kept.join(" "));
        }
        aspects
    }

    fn assemble(&self, caption: String, aspects: &Aspects) -> DescriptionRecord {
        let insights = extract_insights(&caption);
        let detailed_description = if self.config.detailed && !caption.is_empty() {
            self.assembler.build(&caption, aspects)
        } else {
            String::new()
        };
        let confidence = if caption.is_empty() {
            0.0
        } else {
            self.config.mode.confidence()
        };

        debug!(
            "Assembled record: caption={} chars, detailed={} chars, subjects={:?}",
            caption.chars().count(),
            detailed_description.chars().count(),
            insights.subjects
        );

        DescriptionRecord {
            has_detailed: !detailed_description.is_empty(),
            caption,
            detailed_description,
            confidence,
            mode: self.config.mode,
            insights,
        }
    }
}
