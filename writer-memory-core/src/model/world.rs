//! World model: the single setting description for a project.

use serde::{Deserialize, Serialize};

/// A rule the world obeys (magic system, social law, physics quirk).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldRule {
    /// Immutable id.
    pub id: String,
    /// Rule category ("magic", "society", ...).
    #[serde(default)]
    pub category: String,
    /// The rule itself.
    pub description: String,
}

/// A place in the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Immutable id.
    pub id: String,
    /// Location name.
    pub name: String,
    /// What the place is.
    #[serde(default)]
    pub description: String,
    /// How the place feels.
    #[serde(default)]
    pub atmosphere: String,
    /// Ids of directly connected locations (soft references).
    #[serde(default)]
    pub connections: Vec<String>,
}

/// The world singleton. Present on every document; starts empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct World {
    /// World or setting name.
    #[serde(default)]
    pub name: String,
    /// Era or period.
    #[serde(default)]
    pub era: String,
    /// Overall atmosphere.
    #[serde(default)]
    pub atmosphere: String,
    /// Rules the world obeys.
    #[serde(default)]
    pub rules: Vec<WorldRule>,
    /// Known locations.
    #[serde(default)]
    pub locations: Vec<Location>,
    /// Cultural background notes.
    #[serde(default)]
    pub cultural_notes: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}
