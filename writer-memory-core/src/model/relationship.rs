//! Relationship entity: an unordered character pair with an evolution
//! timeline.

use serde::{Deserialize, Serialize};

use super::character::SpeechLevel;

/// Fixed classification of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// Lovers, crushes, exes.
    Romantic,
    /// Blood or chosen family.
    Familial,
    /// Friends.
    Friendship,
    /// Rivals and enemies.
    Antagonistic,
    /// Colleagues, business ties.
    Professional,
    /// Master and apprentice.
    Mentor,
    /// Anything that refuses a single label.
    Complex,
}

impl RelationshipKind {
    /// Human-readable label used by renderers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Romantic => "Romantic",
            Self::Familial => "Family",
            Self::Friendship => "Friendship",
            Self::Antagonistic => "Antagonistic",
            Self::Professional => "Professional",
            Self::Mentor => "Mentor",
            Self::Complex => "Complex",
        }
    }

    /// Single-glyph symbol used by the ASCII relationship map.
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Romantic => '♥',
            Self::Familial => '⌂',
            Self::Friendship => '☼',
            Self::Antagonistic => '⚔',
            Self::Professional => '⚙',
            Self::Mentor => '↟',
            Self::Complex => '∿',
        }
    }
}

/// One appended event on a relationship's evolution timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipEvent {
    /// When the change was recorded. Timestamps are padded ISO strings,
    /// so readers sort them lexicographically.
    pub timestamp: String,
    /// What changed between the two characters.
    pub change: String,
    /// What triggered the change.
    #[serde(default)]
    pub catalyst: String,
    /// Scene where it happened, if any (soft reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
}

/// A relationship between two characters.
///
/// The `from`/`to` orientation is retained for display only; every
/// lookup treats the pair as unordered, and at most one relationship
/// exists per unordered pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Immutable id.
    pub id: String,
    /// First endpoint as originally entered (character name).
    pub from: String,
    /// Second endpoint as originally entered (character name).
    pub to: String,
    /// Classification.
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    /// Free-text descriptor of the pair's dynamic.
    #[serde(default)]
    pub dynamic: String,
    /// Register the pair uses with each other, when it differs from
    /// either character's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_level: Option<SpeechLevel>,
    /// Append-only evolution events.
    #[serde(default)]
    pub timeline: Vec<RelationshipEvent>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Creation instant.
    pub created: String,
}

impl Relationship {
    /// Whether this relationship joins the unordered pair `(a, b)`.
    #[must_use]
    pub fn joins(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// The endpoint that is not `name`, if `name` is an endpoint.
    #[must_use]
    pub fn other_end(&self, name: &str) -> Option<&str> {
        if self.from == name {
            Some(self.to.as_str())
        } else if self.to == name {
            Some(self.from.as_str())
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Relationship {
        Relationship {
            id: "rel-1".into(),
            from: "A".into(),
            to: "B".into(),
            kind: RelationshipKind::Romantic,
            dynamic: "밀당".into(),
            speech_level: None,
            timeline: vec![],
            notes: String::new(),
            created: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    #[test]
    fn joins_is_orientation_insensitive() {
        let rel = sample();
        assert!(rel.joins("A", "B"));
        assert!(rel.joins("B", "A"));
        assert!(!rel.joins("A", "C"));
    }

    #[test]
    fn other_end_reports_the_counterpart() {
        let rel = sample();
        assert_eq!(rel.other_end("A"), Some("B"));
        assert_eq!(rel.other_end("B"), Some("A"));
        assert_eq!(rel.other_end("C"), None);
    }

    #[test]
    fn kind_serializes_as_type_key() {
        let json = serde_json::to_string(&sample()).expect("encode");
        assert!(json.contains("\"type\":\"romantic\""));
    }
}
