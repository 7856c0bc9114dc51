//! Theme entity.

use serde::{Deserialize, Serialize};

/// A recurring theme of the work, loosely linked to the characters and
/// scenes that carry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Immutable id.
    pub id: String,
    /// Theme name.
    pub name: String,
    /// What the theme is about.
    #[serde(default)]
    pub description: String,
    /// Keywords associated with the theme.
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Related character names (soft references).
    #[serde(default)]
    pub characters: Vec<String>,
    /// Related scene ids (soft references).
    #[serde(default)]
    pub scenes: Vec<String>,
}
