//! Character operations: CRUD, alias resolution, emotion timeline,
//! profile rendering.
//!
//! Every operation here is a pure function over a loaded
//! [`Document`]; persisting the result is the orchestrator's job. A
//! target that does not resolve degrades to a `None`/`false` return,
//! never a fault.

use tracing::debug;

use crate::model::{Character, Document, EmotionPoint, SpeechLevel};
use crate::types::{generate_id, now_iso};

/// Caller-supplied fields for a new character.
#[derive(Debug, Clone, Default)]
pub struct CharacterDraft {
    /// Display name; must not collide with an existing name or alias.
    pub name: String,
    /// Narrative arc.
    pub arc: String,
    /// Voice and tone description.
    pub tone: String,
    /// Declared speech register.
    pub speech_level: SpeechLevel,
    /// Signature vocabulary.
    pub keywords: Vec<String>,
    /// Worldview, default stance.
    pub attitude: String,
    /// Free-form notes.
    pub notes: String,
}

/// Partial update; `None` fields are left untouched. Identity fields
/// (`id`, `name`, `created`) are not part of the patch at all, so a
/// caller-supplied update can never overwrite them.
#[derive(Debug, Clone, Default)]
pub struct CharacterPatch {
    /// Replace the arc.
    pub arc: Option<String>,
    /// Replace the tone description.
    pub tone: Option<String>,
    /// Replace the declared speech register.
    pub speech_level: Option<SpeechLevel>,
    /// Replace the keyword list.
    pub keywords: Option<Vec<String>>,
    /// Replace the attitude.
    pub attitude: Option<String>,
    /// Replace the notes.
    pub notes: Option<String>,
    /// Replace the taboo list.
    pub taboo: Option<Vec<String>>,
    /// Replace the emotional baseline.
    pub emotional_baseline: Option<String>,
    /// Replace the trigger list.
    pub emotional_triggers: Option<Vec<String>>,
}

/// Summary row for list views.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterSummary {
    /// Character id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Narrative arc.
    pub arc: String,
    /// Tone description.
    pub tone: String,
    /// Number of emotion timeline entries.
    pub timeline_len: usize,
    /// Last mutation instant.
    pub updated: String,
}

/// Caller-supplied fields for a new emotion point.
#[derive(Debug, Clone, Default)]
pub struct EmotionDraft {
    /// Emotion label.
    pub emotion: String,
    /// What caused it.
    pub trigger: String,
    /// Scene the emotion belongs to, if any.
    pub scene: Option<String>,
    /// Intensity 1 to 5; defaults to 3 when unspecified.
    pub intensity: Option<u8>,
}

/// Resolve a character by id, then name, then alias.
///
/// The id path is a direct map lookup; name and alias fall back to a
/// linear scan over all characters.
#[must_use]
pub fn resolve<'a>(doc: &'a Document, key: &str) -> Option<&'a Character> {
    if let Some(found) = doc.characters.get(key) {
        return Some(found);
    }
    doc.characters
        .values()
        .find(|c| c.name == key)
        .or_else(|| {
            doc.characters
                .values()
                .find(|c| c.aliases.iter().any(|a| a == key))
        })
}

/// Mutable variant of [`resolve`].
pub fn resolve_mut<'a>(doc: &'a mut Document, key: &str) -> Option<&'a mut Character> {
    let id = resolve(doc, key)?.id.clone();
    doc.characters.get_mut(&id)
}

/// Add a character. Returns `None` when the name already resolves to
/// someone (by name or alias).
pub fn add<'a>(doc: &'a mut Document, draft: CharacterDraft) -> Option<&'a Character> {
    if resolve(doc, &draft.name).is_some() {
        debug!(name = %draft.name, "character already exists");
        return None;
    }
    let now = now_iso();
    let id = generate_id("char");
    let character = Character {
        id: id.clone(),
        name: draft.name,
        aliases: Vec::new(),
        arc: draft.arc,
        tone: draft.tone,
        speech_level: draft.speech_level,
        keywords: draft.keywords,
        attitude: draft.attitude,
        notes: draft.notes,
        taboo: Vec::new(),
        emotional_baseline: None,
        emotional_triggers: Vec::new(),
        emotion_timeline: Vec::new(),
        created: now.clone(),
        updated: now,
    };
    doc.characters.insert(id.clone(), character);
    doc.characters.get(&id)
}

/// Apply a partial update. Returns `false` when the target is unknown.
pub fn update(doc: &mut Document, key: &str, patch: CharacterPatch) -> bool {
    let Some(character) = resolve_mut(doc, key) else {
        return false;
    };
    if let Some(arc) = patch.arc {
        character.arc = arc;
    }
    if let Some(tone) = patch.tone {
        character.tone = tone;
    }
    if let Some(level) = patch.speech_level {
        character.speech_level = level;
    }
    if let Some(keywords) = patch.keywords {
        character.keywords = keywords;
    }
    if let Some(attitude) = patch.attitude {
        character.attitude = attitude;
    }
    if let Some(notes) = patch.notes {
        character.notes = notes;
    }
    if let Some(taboo) = patch.taboo {
        character.taboo = taboo;
    }
    if let Some(baseline) = patch.emotional_baseline {
        character.emotional_baseline = Some(baseline);
    }
    if let Some(triggers) = patch.emotional_triggers {
        character.emotional_triggers = triggers;
    }
    character.updated = now_iso();
    true
}

/// Remove a character by any resolvable key.
///
/// Dependent relationships and scene/theme references are NOT cascaded;
/// they become dangling soft references the validator reports.
pub fn remove(doc: &mut Document, key: &str) -> bool {
    let Some(id) = resolve(doc, key).map(|c| c.id.clone()) else {
        return false;
    };
    // shift_remove keeps the insertion order of the survivors intact.
    doc.characters.shift_remove(&id).is_some()
}

/// Summary view of every character, in insertion order.
#[must_use]
pub fn list(doc: &Document) -> Vec<CharacterSummary> {
    doc.characters
        .values()
        .map(|c| CharacterSummary {
            id: c.id.clone(),
            name: c.name.clone(),
            arc: c.arc.clone(),
            tone: c.tone.clone(),
            timeline_len: c.emotion_timeline.len(),
            updated: c.updated.clone(),
        })
        .collect()
}

/// Add an alias. Adding one that is already present is a no-op success.
pub fn add_alias(doc: &mut Document, key: &str, alias: &str) -> bool {
    let Some(character) = resolve_mut(doc, key) else {
        return false;
    };
    if !character.aliases.iter().any(|a| a == alias) {
        character.aliases.push(alias.to_string());
        character.updated = now_iso();
    }
    true
}

/// Remove an alias. Removing an absent one is a no-op success.
pub fn remove_alias(doc: &mut Document, key: &str, alias: &str) -> bool {
    let Some(character) = resolve_mut(doc, key) else {
        return false;
    };
    let before = character.aliases.len();
    character.aliases.retain(|a| a != alias);
    if character.aliases.len() != before {
        character.updated = now_iso();
    }
    true
}

/// Append a point to the emotion timeline. The timeline is append-only
/// and never reordered.
pub fn add_emotion_point(doc: &mut Document, key: &str, draft: EmotionDraft) -> bool {
    let Some(character) = resolve_mut(doc, key) else {
        return false;
    };
    let now = now_iso();
    character.emotion_timeline.push(EmotionPoint {
        timestamp: now.clone(),
        scene: draft.scene,
        emotion: draft.emotion,
        trigger: draft.trigger,
        intensity: draft.intensity.unwrap_or(3),
    });
    character.updated = now;
    true
}

/// Full timeline in insertion order.
#[must_use]
pub fn emotion_timeline<'a>(doc: &'a Document, key: &str) -> Option<&'a [EmotionPoint]> {
    resolve(doc, key).map(|c| c.emotion_timeline.as_slice())
}

/// The most recently appended point.
#[must_use]
pub fn latest_emotion<'a>(doc: &'a Document, key: &str) -> Option<&'a EmotionPoint> {
    resolve(doc, key)?.emotion_timeline.last()
}

/// Emotion labels joined in chronological (insertion) order.
#[must_use]
pub fn emotion_arc(doc: &Document, key: &str) -> Option<String> {
    let character = resolve(doc, key)?;
    Some(
        character
            .emotion_timeline
            .iter()
            .map(|p| p.emotion.as_str())
            .collect::<Vec<_>>()
            .join(" → "),
    )
}

/// Markdown profile assembled from present fields only; absent fields
/// contribute no section.
#[must_use]
pub fn render_profile(character: &Character) -> String {
    let mut out = format!("# {}\n", character.name);
    if !character.aliases.is_empty() {
        out.push_str(&format!("\nAliases: {}\n", character.aliases.join(", ")));
    }
    section(&mut out, "Arc", &character.arc);
    section(&mut out, "Tone", &character.tone);
    if character.speech_level != SpeechLevel::Mixed {
        section(
            &mut out,
            "Speech level",
            &character.speech_level.to_string(),
        );
    }
    if !character.keywords.is_empty() {
        section(&mut out, "Keywords", &character.keywords.join(", "));
    }
    section(&mut out, "Attitude", &character.attitude);
    if !character.taboo.is_empty() {
        section(&mut out, "Never", &character.taboo.join(", "));
    }
    if let Some(baseline) = &character.emotional_baseline {
        section(&mut out, "Emotional baseline", baseline);
    }
    if !character.emotional_triggers.is_empty() {
        section(
            &mut out,
            "Emotional triggers",
            &character.emotional_triggers.join(", "),
        );
    }
    if !character.emotion_timeline.is_empty() {
        let arc = character
            .emotion_timeline
            .iter()
            .map(|p| p.emotion.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        section(&mut out, "Emotion arc", &arc);
    }
    section(&mut out, "Notes", &character.notes);
    out
}

fn section(out: &mut String, title: &str, body: &str) {
    if !body.is_empty() {
        out.push_str(&format!("\n## {title}\n\n{body}\n"));
    }
}
