//! captionsmith core: shared record types, configuration and errors.

pub mod config;
pub mod error;
pub mod types;

pub use config::SynthesisConfig;
pub use error::{Error, Result};
pub use types::{Aspect, Aspects, CaptionMode, DescriptionRecord, Insights};
