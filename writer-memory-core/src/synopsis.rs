//! Synopsis extraction, completeness checklist, format renderers.
//!
//! Five narrative elements are derived from current state. Empty slots
//! come back as the literal [`PLACEHOLDER`] string; that string is part
//! of the contract, letting callers detect incompleteness without
//! parsing prose. The renderers are pure functions of the extracted
//! elements plus raw document fields.

use serde::Serialize;

use crate::model::{Document, SynopsisState};
use crate::relationship;
use crate::types::now_iso;

/// Placeholder for an element with no content yet.
pub const PLACEHOLDER: &str = "not yet provided";

/// The five extracted narrative elements.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SynopsisElements {
    /// How the protagonist meets the world.
    pub protagonist_attitude: String,
    /// The relationships the story runs on.
    pub core_relationships: String,
    /// The emotional undercurrent.
    pub emotional_theme: String,
    /// Where the genre's promise and the real emotion diverge.
    pub genre_contrast: String,
    /// The feeling the ending should leave behind.
    pub aftertaste: String,
}

/// Completeness status of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    /// Enough material is present.
    Complete,
    /// Some material, but thin.
    Partial,
    /// Nothing usable yet.
    Missing,
}

/// One row of the completeness checklist.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    /// Element key (camelCase, matching the stored slot names).
    pub element: &'static str,
    /// Completeness status.
    pub status: Completeness,
    /// Suggested corrective action.
    pub suggestion: &'static str,
}

/// Output format for synopsis rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynopsisFormat {
    /// Multi-section markdown.
    Full,
    /// A few lines.
    Brief,
    /// One paragraph to say out loud.
    Pitch,
}

/// Derive the first three elements from entity state. The protagonist
/// is the first stored character.
fn derive_raw(doc: &Document) -> (String, String, String) {
    let protagonist = doc.characters.values().next();

    let attitude = protagonist.map_or_else(String::new, |c| {
        match (c.attitude.is_empty(), c.arc.is_empty()) {
            (false, false) => format!("{} — {}", c.attitude, c.arc),
            (false, true) => c.attitude.clone(),
            (true, false) => c.arc.clone(),
            (true, true) => String::new(),
        }
    });

    let relationships = protagonist.map_or_else(String::new, |c| {
        relationship::connections(doc, &c.name)
            .iter()
            .map(|conn| {
                if conn.dynamic.is_empty() {
                    format!("{} ({})", conn.with, conn.kind.label())
                } else {
                    format!("{} ({}): {}", conn.with, conn.kind.label(), conn.dynamic)
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    });

    let theme = doc
        .themes
        .iter()
        .filter(|t| !t.description.is_empty())
        .map(|t| t.description.as_str())
        .collect::<Vec<_>>()
        .join("; ");

    (attitude, relationships, theme)
}

fn or_placeholder(value: String) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value
    }
}

/// Derive the five elements from current state, with placeholders for
/// anything absent.
#[must_use]
pub fn extract(doc: &Document) -> SynopsisElements {
    let (attitude, relationships, theme) = derive_raw(doc);
    let stored = doc.synopsis.clone().unwrap_or_default();
    SynopsisElements {
        protagonist_attitude: or_placeholder(attitude),
        core_relationships: or_placeholder(relationships),
        emotional_theme: or_placeholder(theme),
        genre_contrast: or_placeholder(stored.genre_contrast),
        aftertaste: or_placeholder(stored.aftertaste),
    }
}

/// Re-derive the derived slots, store them (raw, without placeholders)
/// in the document's synopsis state, stamp `generated`, and return the
/// placeholder-padded elements.
///
/// Authored slots (`genreContrast`, `aftertaste`) are left untouched.
pub fn generate(doc: &mut Document) -> SynopsisElements {
    let (attitude, relationships, theme) = derive_raw(doc);
    let mut state = doc.synopsis.clone().unwrap_or_default();
    state.protagonist_attitude = attitude;
    state.core_relationships = relationships;
    state.emotional_theme = theme;
    state.generated = now_iso();
    doc.synopsis = Some(state);
    extract(doc)
}

/// Patch for the authorable synopsis slots; `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct SynopsisPatch {
    /// Override the derived protagonist-attitude slot.
    pub protagonist_attitude: Option<String>,
    /// Override the derived core-relationships slot.
    pub core_relationships: Option<String>,
    /// Override the derived emotional-theme slot.
    pub emotional_theme: Option<String>,
    /// Set the genre-contrast slot.
    pub genre_contrast: Option<String>,
    /// Set the aftertaste slot.
    pub aftertaste: Option<String>,
}

/// Author synopsis slots directly. Creates the synopsis state on first
/// write.
pub fn update_slots(doc: &mut Document, patch: SynopsisPatch) {
    let state = doc.synopsis.get_or_insert_with(SynopsisState::default);
    if let Some(value) = patch.protagonist_attitude {
        state.protagonist_attitude = value;
    }
    if let Some(value) = patch.core_relationships {
        state.core_relationships = value;
    }
    if let Some(value) = patch.emotional_theme {
        state.emotional_theme = value;
    }
    if let Some(value) = patch.genre_contrast {
        state.genre_contrast = value;
    }
    if let Some(value) = patch.aftertaste {
        state.aftertaste = value;
    }
}

/// Completeness per element, with a suggested corrective action each.
#[must_use]
pub fn checklist(doc: &Document) -> Vec<ChecklistItem> {
    let mut items = Vec::with_capacity(5);
    let protagonist = doc.characters.values().next();

    let status = match protagonist {
        Some(c) if !c.arc.is_empty() && !c.attitude.is_empty() => Completeness::Complete,
        Some(c) if !c.arc.is_empty() || !c.attitude.is_empty() => Completeness::Partial,
        _ => Completeness::Missing,
    };
    items.push(ChecklistItem {
        element: "protagonistAttitude",
        status,
        suggestion: "fill in the protagonist's arc and attitude",
    });

    let relationship_count =
        protagonist.map_or(0, |c| relationship::connections(doc, &c.name).len());
    let status = match relationship_count {
        0 => Completeness::Missing,
        1 => Completeness::Partial,
        _ => Completeness::Complete,
    };
    items.push(ChecklistItem {
        element: "coreRelationships",
        status,
        suggestion: "relate at least two characters to the protagonist",
    });

    let status = if doc.themes.iter().any(|t| !t.description.is_empty()) {
        Completeness::Complete
    } else if doc.themes.is_empty() {
        Completeness::Missing
    } else {
        Completeness::Partial
    };
    items.push(ChecklistItem {
        element: "emotionalTheme",
        status,
        suggestion: "describe what the story is really about emotionally",
    });

    let stored = doc.synopsis.clone().unwrap_or_default();
    let status = if !stored.genre_contrast.is_empty() {
        Completeness::Complete
    } else if !doc.project.genre.is_empty() {
        Completeness::Partial
    } else {
        Completeness::Missing
    };
    items.push(ChecklistItem {
        element: "genreContrast",
        status,
        suggestion: "note where the genre's promise and the real emotion diverge",
    });

    let status = if stored.aftertaste.is_empty() {
        Completeness::Missing
    } else {
        Completeness::Complete
    };
    items.push(ChecklistItem {
        element: "aftertaste",
        status,
        suggestion: "write the feeling the ending should leave behind",
    });

    items
}

/// Render the synopsis in the requested format.
#[must_use]
pub fn render(doc: &Document, format: SynopsisFormat) -> String {
    let e = extract(doc);
    let project = &doc.project;
    match format {
        SynopsisFormat::Full => {
            let mut out = format!("# {}\n", project.name);
            if !project.genre.is_empty() {
                out.push_str(&format!("\nGenre: {}\n", project.genre));
            }
            out.push_str(&format!(
                "\n## Protagonist\n\n{}\n\n## Core relationships\n\n{}\n\n## Emotional theme\n\n{}\n\n## Genre vs. real emotion\n\n{}\n\n## Aftertaste\n\n{}\n",
                e.protagonist_attitude,
                e.core_relationships,
                e.emotional_theme,
                e.genre_contrast,
                e.aftertaste
            ));
            out
        }
        SynopsisFormat::Brief => format!(
            "{} ({})\n{}\n{}\n{}",
            project.name,
            if project.genre.is_empty() {
                "unspecified"
            } else {
                project.genre.as_str()
            },
            e.protagonist_attitude,
            e.core_relationships,
            e.emotional_theme
        ),
        SynopsisFormat::Pitch => format!(
            "{}: a {} story. {} {} In the end: {}",
            project.name,
            if project.genre.is_empty() {
                "genre-less"
            } else {
                project.genre.as_str()
            },
            e.protagonist_attitude,
            e.emotional_theme,
            e.aftertaste
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{self, CharacterDraft};
    use crate::model::{Document, RelationshipKind, Theme};
    use crate::relationship::{self, RelationshipDraft};

    fn empty_doc() -> Document {
        Document::new("작품", "로맨스")
    }

    fn rich_doc() -> Document {
        let mut doc = empty_doc();
        character::add(
            &mut doc,
            CharacterDraft {
                name: "서연".into(),
                arc: "세상과 화해한다".into(),
                attitude: "무심한 척 다정함".into(),
                ..CharacterDraft::default()
            },
        );
        character::add(
            &mut doc,
            CharacterDraft {
                name: "민준".into(),
                ..CharacterDraft::default()
            },
        );
        character::add(
            &mut doc,
            CharacterDraft {
                name: "하린".into(),
                ..CharacterDraft::default()
            },
        );
        relationship::add(
            &mut doc,
            RelationshipDraft::new("서연", "민준", RelationshipKind::Romantic),
        );
        relationship::add(
            &mut doc,
            RelationshipDraft::new("하린", "서연", RelationshipKind::Friendship),
        );
        doc.themes.push(Theme {
            id: "theme-1".into(),
            name: "상실".into(),
            description: "잃고 나서야 알게 되는 것들".into(),
            keywords: vec![],
            characters: vec![],
            scenes: vec![],
        });
        doc
    }

    #[test]
    fn empty_slots_yield_placeholders() {
        let elements = extract(&empty_doc());
        assert_eq!(elements.protagonist_attitude, PLACEHOLDER);
        assert_eq!(elements.core_relationships, PLACEHOLDER);
        assert_eq!(elements.emotional_theme, PLACEHOLDER);
        assert_eq!(elements.genre_contrast, PLACEHOLDER);
        assert_eq!(elements.aftertaste, PLACEHOLDER);
    }

    #[test]
    fn extraction_uses_the_first_character_as_protagonist() {
        let doc = rich_doc();
        let elements = extract(&doc);
        assert!(elements.protagonist_attitude.contains("무심한 척 다정함"));
        assert!(elements.core_relationships.contains("민준"));
        assert!(elements.core_relationships.contains("하린"));
        assert!(elements.emotional_theme.contains("잃고 나서야"));
    }

    #[test]
    fn generate_stores_raw_slots_and_stamps_generated() {
        let mut doc = rich_doc();
        update_slots(
            &mut doc,
            SynopsisPatch {
                aftertaste: Some("쓸쓸한 온기".into()),
                ..SynopsisPatch::default()
            },
        );
        let elements = generate(&mut doc);
        assert_eq!(elements.aftertaste, "쓸쓸한 온기");

        let state = doc.synopsis.as_ref().expect("stored");
        assert!(!state.generated.is_empty());
        assert!(state.protagonist_attitude.contains("무심한"));
        assert_eq!(state.genre_contrast, "", "no placeholder pollution");
    }

    #[test]
    fn checklist_relationship_thresholds() {
        let mut doc = empty_doc();
        character::add(
            &mut doc,
            CharacterDraft {
                name: "서연".into(),
                ..CharacterDraft::default()
            },
        );
        character::add(
            &mut doc,
            CharacterDraft {
                name: "민준".into(),
                ..CharacterDraft::default()
            },
        );

        let row = |doc: &Document| {
            checklist(doc)
                .into_iter()
                .find(|i| i.element == "coreRelationships")
                .expect("row")
                .status
        };
        assert_eq!(row(&doc), Completeness::Missing);

        relationship::add(
            &mut doc,
            RelationshipDraft::new("서연", "민준", RelationshipKind::Romantic),
        );
        assert_eq!(row(&doc), Completeness::Partial);

        character::add(
            &mut doc,
            CharacterDraft {
                name: "하린".into(),
                ..CharacterDraft::default()
            },
        );
        relationship::add(
            &mut doc,
            RelationshipDraft::new("서연", "하린", RelationshipKind::Friendship),
        );
        assert_eq!(row(&doc), Completeness::Complete);
    }

    #[test]
    fn checklist_covers_all_five_elements() {
        let items = checklist(&rich_doc());
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|i| !i.suggestion.is_empty()));
        // genre set but contrast unwritten: partial
        let genre_row = items
            .iter()
            .find(|i| i.element == "genreContrast")
            .expect("row");
        assert_eq!(genre_row.status, Completeness::Partial);
    }

    #[test]
    fn renderers_are_pure_and_format_specific() {
        let doc = rich_doc();
        let full = render(&doc, SynopsisFormat::Full);
        assert!(full.contains("# 작품"));
        assert!(full.contains("## Core relationships"));

        let brief = render(&doc, SynopsisFormat::Brief);
        assert!(brief.starts_with("작품 (로맨스)"));
        assert!(!brief.contains("##"));

        let pitch = render(&doc, SynopsisFormat::Pitch);
        assert!(pitch.contains("로맨스"));
        assert!(pitch.contains(PLACEHOLDER), "unwritten aftertaste shows as placeholder");

        // rendering twice changes nothing
        assert_eq!(full, render(&doc, SynopsisFormat::Full));
    }
}
