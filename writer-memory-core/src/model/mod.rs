//! Data model: one file per entity family, aggregated by [`Document`].
//!
//! Everything here is passive serde data. Behavior lives in the
//! subsystem modules (`character`, `relationship`, `scene`, ...), which
//! operate on a loaded [`Document`] as pure functions.

pub mod character;
pub mod relationship;
pub mod scene;
pub mod synopsis;
pub mod theme;
pub mod world;

pub use character::{Character, EmotionPoint, SpeechLevel};
pub use relationship::{Relationship, RelationshipEvent, RelationshipKind};
pub use scene::{Cut, CutKind, Scene};
pub use synopsis::SynopsisState;
pub use theme::Theme;
pub use world::{Location, World, WorldRule};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::now_iso;

/// The supported document schema version. Any other value is a hard
/// validation error, never a silent upgrade.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Project metadata block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMeta {
    /// Project (work) title.
    pub name: String,
    /// Declared genre; empty when not set.
    #[serde(default)]
    pub genre: String,
    /// Creation instant.
    pub created: String,
    /// Refreshed by every save.
    pub updated: String,
}

/// Root of the serialized store: the entire writer-memory state for one
/// project.
///
/// Characters are keyed by their immutable id in insertion order (the
/// first inserted character is the presumed protagonist). Relationships,
/// scenes and themes reference characters by display name; those are
/// soft references resolved at read time and checked by the validator,
/// never enforced on write.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Schema version tag; must equal [`DOCUMENT_VERSION`].
    pub version: String,
    /// Project metadata.
    pub project: ProjectMeta,
    /// Characters keyed by id, in insertion order.
    #[serde(default)]
    pub characters: IndexMap<String, Character>,
    /// Relationships between character pairs.
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    /// Scenes; narrative position lives in [`Scene::order`].
    #[serde(default)]
    pub scenes: Vec<Scene>,
    /// Themes of the work.
    #[serde(default)]
    pub themes: Vec<Theme>,
    /// World model singleton.
    #[serde(default)]
    pub world: World,
    /// Synopsis slots; absent until first written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<SynopsisState>,
}

impl Document {
    /// Create an empty document for a new project.
    #[must_use]
    pub fn new(name: impl Into<String>, genre: impl Into<String>) -> Self {
        let now = now_iso();
        Self {
            version: DOCUMENT_VERSION.to_string(),
            project: ProjectMeta {
                name: name.into(),
                genre: genre.into(),
                created: now.clone(),
                updated: now,
            },
            characters: IndexMap::new(),
            relationships: Vec::new(),
            scenes: Vec::new(),
            themes: Vec::new(),
            world: World::default(),
            synopsis: None,
        }
    }
}
