//! Character entity: identity, narrative attributes, emotion timeline.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared speech register of a character.
///
/// Mirrors Korean politeness levels: formal (합쇼체), informal polite
/// (해요체), casual (반말). `Mixed` means no single register dominates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeechLevel {
    /// Formal polite endings (…습니다).
    Formal,
    /// Informal polite endings (…요).
    Informal,
    /// Casual endings (반말).
    Casual,
    /// No single register; anything passes the dialogue lint.
    #[default]
    Mixed,
}

impl fmt::Display for SpeechLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Formal => "formal",
            Self::Informal => "informal",
            Self::Casual => "casual",
            Self::Mixed => "mixed",
        };
        write!(f, "{s}")
    }
}

/// One appended point on a character's emotion timeline.
///
/// The timeline is append-only and never reordered or deduplicated;
/// insertion order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionPoint {
    /// When the emotion was recorded.
    pub timestamp: String,
    /// Scene the emotion belongs to, if any (soft reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    /// Emotion label ("설렘", "분노", ...).
    pub emotion: String,
    /// What caused it.
    #[serde(default)]
    pub trigger: String,
    /// Strength on the 1 to 5 scale.
    pub intensity: u8,
}

/// A character and everything the store knows about them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Immutable id; also the character map key.
    pub id: String,
    /// Display name. Mutable in principle, but relationships, scenes and
    /// themes reference characters by name, so a rename leaves danglers
    /// for the validator to report.
    pub name: String,
    /// Alternate names accepted by lookup.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Narrative arc summary.
    #[serde(default)]
    pub arc: String,
    /// Voice and tone description.
    #[serde(default)]
    pub tone: String,
    /// Declared speech register.
    #[serde(default)]
    pub speech_level: SpeechLevel,
    /// Signature vocabulary this character actually uses.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Worldview, default stance toward the world.
    #[serde(default)]
    pub attitude: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Things this character would never say or do.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub taboo: Vec<String>,
    /// Baseline emotional temperature, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_baseline: Option<String>,
    /// Situations that reliably provoke this character.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emotional_triggers: Vec<String>,
    /// Append-only emotion history.
    #[serde(default)]
    pub emotion_timeline: Vec<EmotionPoint>,
    /// Creation instant.
    pub created: String,
    /// Last mutation instant.
    pub updated: String,
}
