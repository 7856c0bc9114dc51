//! Scene entity: an ordered narrative unit holding ordered cuts.

use serde::{Deserialize, Serialize};

/// The kind of content a cut carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutKind {
    /// A spoken line.
    Dialogue,
    /// Narrator voice.
    Narration,
    /// Physical action.
    Action,
    /// A character's inner thought.
    Internal,
}

/// The smallest narrative unit inside a scene.
///
/// Cuts are identified by their `order` index, which stays a dense
/// `0..n-1` range within the scene after every structural change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cut {
    /// Dense zero-based position within the scene.
    pub order: usize,
    /// Content kind.
    #[serde(rename = "type")]
    pub kind: CutKind,
    /// The text itself.
    pub content: String,
    /// Speaking or acting character, if attributed (soft reference).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<String>,
    /// Emotion tag for this cut, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}

/// A scene: one unit of the total narrative order.
///
/// `order` values form a contiguous `0..n-1` permutation across all
/// scenes after any insert, delete or reorder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Immutable id.
    pub id: String,
    /// Scene title.
    pub title: String,
    /// Chapter label, if the work is chaptered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    /// Dense zero-based narrative position.
    pub order: usize,
    /// Participating character names (soft references).
    #[serde(default)]
    pub characters: Vec<String>,
    /// Emotion tags for the scene as a whole.
    #[serde(default)]
    pub emotions: Vec<String>,
    /// Ordered cuts.
    #[serde(default)]
    pub cuts: Vec<Cut>,
    /// Narration tone for this scene, if it deviates from the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration_tone: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Creation instant.
    pub created: String,
}
