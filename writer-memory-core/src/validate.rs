//! Read-only structural and referential validation.
//!
//! Errors mark a document unsafe to use programmatically; warnings mark
//! it merely incomplete from an authoring standpoint. The store may
//! transiently hold invalid states between independent edits, so
//! validation runs on demand, never automatically on load or save, and
//! it never mutates or auto-repairs.

use std::collections::HashSet;

use crate::model::{DOCUMENT_VERSION, Document};

/// Outcome of a validation pass.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// True when no errors were found. Warnings do not affect validity.
    pub valid: bool,
    /// Defects that make the document unsafe to use.
    pub errors: Vec<String>,
    /// Authoring gaps that do not block use.
    pub warnings: Vec<String>,
}

/// Validate `doc` against the structural and referential rules.
#[must_use]
pub fn validate(doc: &Document) -> ValidationReport {
    let mut report = ValidationReport::default();

    if doc.version != DOCUMENT_VERSION {
        report.errors.push(format!(
            "unsupported document version {:?} (supported: {DOCUMENT_VERSION:?})",
            doc.version
        ));
    }
    if doc.project.name.is_empty() {
        report.errors.push("project name is missing".to_string());
    }
    if doc.project.created.is_empty() {
        report
            .errors
            .push("project created timestamp is missing".to_string());
    }
    if doc.project.genre.is_empty() {
        report.warnings.push("project genre is not set".to_string());
    }

    // Name and alias sets drive every soft-reference check below.
    let mut known_names: HashSet<&str> = HashSet::new();
    for character in doc.characters.values() {
        known_names.insert(character.name.as_str());
        for alias in &character.aliases {
            known_names.insert(alias.as_str());
        }
    }
    let known_scene_ids: HashSet<&str> = doc.scenes.iter().map(|s| s.id.as_str()).collect();

    for (key, character) in &doc.characters {
        if *key != character.id {
            report.errors.push(format!(
                "character map key {key:?} does not match id {:?}",
                character.id
            ));
        }
        if character.name.is_empty() {
            report
                .errors
                .push(format!("character {} has no name", character.id));
        }
        for point in &character.emotion_timeline {
            if !(1..=5).contains(&point.intensity) {
                report.warnings.push(format!(
                    "character {:?}: emotion intensity {} outside 1..=5",
                    character.name, point.intensity
                ));
            }
            if let Some(scene) = &point.scene {
                if !known_scene_ids.contains(scene.as_str()) {
                    report.warnings.push(format!(
                        "character {:?}: emotion point references unknown scene {scene:?}",
                        character.name
                    ));
                }
            }
        }
    }

    for rel in &doc.relationships {
        for end in [&rel.from, &rel.to] {
            if !known_names.contains(end.as_str()) {
                report.errors.push(format!(
                    "relationship {} references missing character {end:?}",
                    rel.id
                ));
            }
        }
        if rel.from == rel.to {
            report.warnings.push(format!(
                "relationship {} is self-referential ({:?})",
                rel.id, rel.from
            ));
        }
    }

    let mut seen_scene_ids: HashSet<&str> = HashSet::new();
    for scene in &doc.scenes {
        if !seen_scene_ids.insert(scene.id.as_str()) {
            report
                .errors
                .push(format!("duplicate scene id {:?}", scene.id));
        }
        for name in &scene.characters {
            if !known_names.contains(name.as_str()) {
                report.warnings.push(format!(
                    "scene {:?} references unknown character {name:?}",
                    scene.title
                ));
            }
        }
        if scene.cuts.is_empty() {
            report
                .warnings
                .push(format!("scene {:?} has no cuts", scene.title));
        }
    }

    for theme in &doc.themes {
        for name in &theme.characters {
            if !known_names.contains(name.as_str()) {
                report.warnings.push(format!(
                    "theme {:?} references unknown character {name:?}",
                    theme.name
                ));
            }
        }
        for id in &theme.scenes {
            if !known_scene_ids.contains(id.as_str()) {
                report.warnings.push(format!(
                    "theme {:?} references unknown scene {id:?}",
                    theme.name
                ));
            }
        }
    }

    report.valid = report.errors.is_empty();
    report
}
