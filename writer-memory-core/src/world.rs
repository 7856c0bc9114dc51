//! World operations: the setting singleton, its rules and locations.

use crate::model::{Document, Location, WorldRule};
use crate::types::generate_id;

/// Partial update of the world's scalar fields; `None` leaves a field
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct WorldPatch {
    /// Replace the world name.
    pub name: Option<String>,
    /// Replace the era.
    pub era: Option<String>,
    /// Replace the atmosphere.
    pub atmosphere: Option<String>,
    /// Replace the cultural notes.
    pub cultural_notes: Option<String>,
    /// Replace the free notes.
    pub notes: Option<String>,
}

/// Apply a partial update to the world singleton.
pub fn update(doc: &mut Document, patch: WorldPatch) {
    let world = &mut doc.world;
    if let Some(name) = patch.name {
        world.name = name;
    }
    if let Some(era) = patch.era {
        world.era = era;
    }
    if let Some(atmosphere) = patch.atmosphere {
        world.atmosphere = atmosphere;
    }
    if let Some(cultural_notes) = patch.cultural_notes {
        world.cultural_notes = cultural_notes;
    }
    if let Some(notes) = patch.notes {
        world.notes = notes;
    }
}

/// Add a world rule; returns its generated id.
pub fn add_rule(doc: &mut Document, category: &str, description: &str) -> String {
    let id = generate_id("rule");
    doc.world.rules.push(WorldRule {
        id: id.clone(),
        category: category.to_string(),
        description: description.to_string(),
    });
    id
}

/// Remove a rule by id.
pub fn remove_rule(doc: &mut Document, id: &str) -> bool {
    let before = doc.world.rules.len();
    doc.world.rules.retain(|r| r.id != id);
    doc.world.rules.len() != before
}

/// Add a location; returns its generated id.
pub fn add_location(doc: &mut Document, name: &str, description: &str) -> String {
    let id = generate_id("loc");
    doc.world.locations.push(Location {
        id: id.clone(),
        name: name.to_string(),
        description: description.to_string(),
        atmosphere: String::new(),
        connections: Vec::new(),
    });
    id
}

/// Connect two locations by id, both directions. Reconnecting already
/// connected locations is a no-op success.
pub fn connect_locations(doc: &mut Document, a: &str, b: &str) -> bool {
    let ids: Vec<&str> = doc.world.locations.iter().map(|l| l.id.as_str()).collect();
    if !ids.contains(&a) || !ids.contains(&b) || a == b {
        return false;
    }
    for location in &mut doc.world.locations {
        let other = if location.id == a {
            b
        } else if location.id == b {
            a
        } else {
            continue;
        };
        if !location.connections.iter().any(|c| c == other) {
            location.connections.push(other.to_string());
        }
    }
    true
}
