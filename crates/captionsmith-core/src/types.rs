//! Record types shared by the text, insight and runtime crates.

use serde::{Deserialize, Serialize};

/// Fallback tag for subjects and settings when no table entry matched.
pub const GENERAL_TAG: &str = "general";
/// Fallback mood when no mood table entry matched.
pub const NEUTRAL_MOOD: &str = "neutral";

/// Where the base caption came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionMode {
    /// Model running in-process.
    #[default]
    Local,
    /// Hosted inference endpoint.
    Cloud,
}

impl CaptionMode {
    /// Nominal confidence reported for captions produced in this mode.
    pub fn confidence(&self) -> f64 {
        match self {
            Self::Local => 0.90,
            Self::Cloud => 0.92,
        }
    }
}

impl std::fmt::Display for CaptionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Cloud => write!(f, "cloud"),
        }
    }
}

impl std::str::FromStr for CaptionMode {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cloud" => Ok(Self::Cloud),
            other => Err(crate::Error::Config(format!("unknown caption mode: {}", other))),
        }
    }
}

/// A prompted sub-query about the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Subject,
    Setting,
    Composition,
    Atmosphere,
}

impl Aspect {
    /// Aspects in assembly order.
    pub fn all() -> &'static [Aspect] {
        &[
            Self::Subject,
            Self::Setting,
            Self::Composition,
            Self::Atmosphere,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Setting => "setting",
            Self::Composition => "composition",
            Self::Atmosphere => "atmosphere",
        }
    }

    /// Prompt sent to the generator for this aspect.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Subject => "Describe the main subject of this image:",
            Self::Setting => "Describe the setting of this image:",
            Self::Composition => "Describe the composition of this image:",
            Self::Atmosphere => "Describe the atmosphere of this image:",
        }
    }

    /// Placeholder value a generator falls back to when it has nothing to say.
    ///
    /// The subject has no fixed placeholder; it is compared against the caption.
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            Self::Subject => None,
            Self::Setting => Some("a natural setting"),
            Self::Composition => Some("balanced framing"),
            Self::Atmosphere => Some("natural lighting"),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "subject" => Some(Self::Subject),
            "setting" => Some(Self::Setting),
            "composition" => Some(Self::Composition),
            "atmosphere" => Some(Self::Atmosphere),
            _ => None,
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Aspect text keyed by aspect. A missing entry and an empty one are the same thing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aspects {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub setting: String,
    #[serde(default)]
    pub composition: String,
    #[serde(default)]
    pub atmosphere: String,
}

impl Aspects {
    pub fn get(&self, aspect: Aspect) -> &str {
        match aspect {
            Aspect::Subject => &self.subject,
            Aspect::Setting => &self.setting,
            Aspect::Composition => &self.composition,
            Aspect::Atmosphere => &self.atmosphere,
        }
    }

    pub fn set(&mut self, aspect: Aspect, text: impl Into<String>) {
        let slot = match aspect {
            Aspect::Subject => &mut self.subject,
            Aspect::Setting => &mut self.setting,
            Aspect::Composition => &mut self.composition,
            Aspect::Atmosphere => &mut self.atmosphere,
        };
        *slot = text.into();
    }

    /// Builder-style [`Aspects::set`].
    pub fn with(mut self, aspect: Aspect, text: impl Into<String>) -> Self {
        self.set(aspect, text);
        self
    }

    /// True when every aspect is blank.
    pub fn is_empty(&self) -> bool {
        Aspect::all().iter().all(|a| self.get(*a).trim().is_empty())
    }
}

/// Structured tags derived from a caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insights {
    /// Subject category tags in table order.
    pub subjects: Vec<String>,
    /// Setting category tags in table order.
    pub settings: Vec<String>,
    /// Concrete objects, at most five, in table order.
    pub objects: Vec<String>,
    pub mood: String,
    /// Content words in caption order, at most six.
    pub keywords: Vec<String>,
}

impl Default for Insights {
    fn default() -> Self {
        Self {
            subjects: vec![GENERAL_TAG.to_string()],
            settings: vec![GENERAL_TAG.to_string()],
            objects: Vec::new(),
            mood: NEUTRAL_MOOD.to_string(),
            keywords: Vec::new(),
        }
    }
}

/// The externally visible result of one synthesis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionRecord {
    pub caption: String,
    pub detailed_description: String,
    /// Nominal confidence in `[0, 1]`.
    pub confidence: f64,
    pub mode: CaptionMode,
    pub has_detailed: bool,
    pub insights: Insights,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_confidence() {
        assert_eq!(CaptionMode::Local.confidence(), 0.90);
        assert_eq!(CaptionMode::Cloud.confidence(), 0.92);
        assert_eq!("Cloud".parse::<CaptionMode>().unwrap(), CaptionMode::Cloud);
        assert!("remote".parse::<CaptionMode>().is_err());
    }

    #[test]
    fn test_aspects_empty_equivalence() {
        let aspects = Aspects::default().with(Aspect::Setting, "   ");
        assert!(aspects.is_empty());
        assert_eq!(aspects, Aspects { setting: "   ".into(), ..Default::default() });
    }

    #[test]
    fn test_record_field_names() {
        let record = DescriptionRecord {
            caption: "A dog.".into(),
            detailed_description: String::new(),
            confidence: 0.9,
            mode: CaptionMode::Local,
            has_detailed: false,
            insights: Insights::default(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["mode"], "local");
        assert!(json["detailed_description"].is_string());
        assert!(json["has_detailed"].is_boolean());
        assert_eq!(json["insights"]["subjects"][0], "general");
        assert_eq!(json["insights"]["mood"], "neutral");
    }
}
