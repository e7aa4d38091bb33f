//! captionsmith text: turns noisy generator fragments into clean prose.
//!
//! Cleans raw fragments, rejects gibberish, removes near-duplicate sentences
//! by token-set similarity and assembles aspect fragments into a paragraph.
//! Every function here is a pure transform over immutable tables.

pub mod clean;
pub mod filter;
pub mod narrative;
pub mod polish;
pub mod tokens;

pub use clean::clean;
pub use filter::is_meaningful;
pub use narrative::enhance::enhance_caption;
pub use narrative::{build_narrative, NarrativeAssembler};
pub use polish::{dedupe_and_polish, similarity, Polisher};
