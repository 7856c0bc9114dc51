//! Synopsis state: five derived or authorable free-text slots.

use serde::{Deserialize, Serialize};

/// The stored synopsis slots. Absent from a document until first
/// written; empty strings mean "not filled in yet".
///
/// The first three slots are normally derived from current entity state
/// by the synopsis subsystem; the last two are authored directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynopsisState {
    /// How the protagonist meets the world.
    #[serde(default)]
    pub protagonist_attitude: String,
    /// The relationships the story actually runs on.
    #[serde(default)]
    pub core_relationships: String,
    /// The emotional undercurrent of the work.
    #[serde(default)]
    pub emotional_theme: String,
    /// Where the genre's promise and the real emotion diverge.
    #[serde(default)]
    pub genre_contrast: String,
    /// The feeling the ending should leave behind.
    #[serde(default)]
    pub aftertaste: String,
    /// When the derived slots were last generated.
    #[serde(default)]
    pub generated: String,
}
