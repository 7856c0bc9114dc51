//! Theme operations: CRUD over the work's theme list.
//!
//! Links from themes to characters and scenes are soft references; the
//! validator reports danglers, nothing here enforces them.

use crate::model::{Document, Theme};
use crate::types::generate_id;

/// Caller-supplied fields for a new theme.
#[derive(Debug, Clone, Default)]
pub struct ThemeDraft {
    /// Theme name.
    pub name: String,
    /// What the theme is about.
    pub description: String,
    /// Keywords associated with the theme.
    pub keywords: Vec<String>,
    /// Related character names.
    pub characters: Vec<String>,
    /// Related scene ids.
    pub scenes: Vec<String>,
}

/// Partial update; identity (`id`) is not part of the patch.
#[derive(Debug, Clone, Default)]
pub struct ThemePatch {
    /// Replace the name.
    pub name: Option<String>,
    /// Replace the description.
    pub description: Option<String>,
    /// Replace the keyword list.
    pub keywords: Option<Vec<String>>,
    /// Replace the related character list.
    pub characters: Option<Vec<String>>,
    /// Replace the related scene list.
    pub scenes: Option<Vec<String>>,
}

/// Find a theme by id or name.
#[must_use]
pub fn get<'a>(doc: &'a Document, key: &str) -> Option<&'a Theme> {
    doc.themes.iter().find(|t| t.id == key || t.name == key)
}

/// Add a theme. Returns `None` when the name is already taken.
pub fn add<'a>(doc: &'a mut Document, draft: ThemeDraft) -> Option<&'a Theme> {
    if doc.themes.iter().any(|t| t.name == draft.name) {
        return None;
    }
    doc.themes.push(Theme {
        id: generate_id("theme"),
        name: draft.name,
        description: draft.description,
        keywords: draft.keywords,
        characters: draft.characters,
        scenes: draft.scenes,
    });
    doc.themes.last()
}

/// Apply a partial update. Returns `false` when the target is unknown.
pub fn update(doc: &mut Document, key: &str, patch: ThemePatch) -> bool {
    let Some(theme) = doc.themes.iter_mut().find(|t| t.id == key || t.name == key) else {
        return false;
    };
    if let Some(name) = patch.name {
        theme.name = name;
    }
    if let Some(description) = patch.description {
        theme.description = description;
    }
    if let Some(keywords) = patch.keywords {
        theme.keywords = keywords;
    }
    if let Some(characters) = patch.characters {
        theme.characters = characters;
    }
    if let Some(scenes) = patch.scenes {
        theme.scenes = scenes;
    }
    true
}

/// Remove a theme by id or name.
pub fn remove(doc: &mut Document, key: &str) -> bool {
    let before = doc.themes.len();
    doc.themes.retain(|t| t.id != key && t.name != key);
    doc.themes.len() != before
}
