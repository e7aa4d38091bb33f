//! captionsmith runtime: synthesis over an injected caption generator.
//!
//! The `Synthesizer` owns no model. Callers hand it a `CaptionGenerator`
//! (or plain caption text) and get back an immutable `DescriptionRecord`,
//! which the `export` module renders as a JSON envelope, SRT cues or a
//! plain-text report.

pub mod export;
pub mod generator;
pub mod job;
pub mod synthesizer;

pub use export::{
    create_batch_report, record_digest, to_json_envelope, to_srt, to_txt_report, BatchReport,
    BatchSummary,
};
pub use generator::{CaptionGenerator, NoopGenerator, ReplayGenerator, CAPTION_PROMPT};
pub use job::SynthesisJob;
pub use synthesizer::Synthesizer;
