//! Scene operations: dense narrative ordering, cuts, emotion tags,
//! filtered queries, pacing views.
//!
//! Scene `order` values always form a contiguous `0..n-1` permutation,
//! and cut `order` values the same within each scene. Every structural
//! operation here restores that invariant before returning.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::model::{Cut, CutKind, Document, Scene};
use crate::types::{generate_id, now_iso};

/// Sentinel emotion shown for scenes with no tags.
pub const EMOTION_UNSET: &str = "unset";

/// Caller-supplied fields for a new scene.
#[derive(Debug, Clone, Default)]
pub struct SceneDraft {
    /// Scene title.
    pub title: String,
    /// Chapter label, if any.
    pub chapter: Option<String>,
    /// Participating character names.
    pub characters: Vec<String>,
    /// Narration tone override.
    pub narration_tone: Option<String>,
    /// Free-form notes.
    pub notes: String,
}

/// Caller-supplied fields for a new cut.
#[derive(Debug, Clone)]
pub struct CutDraft {
    /// Content kind.
    pub kind: CutKind,
    /// The text itself.
    pub content: String,
    /// Attributed character, if any.
    pub character: Option<String>,
    /// Emotion tag, if any.
    pub emotion: Option<String>,
}

impl CutDraft {
    /// Draft with only the required fields filled in.
    #[must_use]
    pub fn new(kind: CutKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            character: None,
            emotion: None,
        }
    }
}

/// Find a scene by id.
#[must_use]
pub fn get<'a>(doc: &'a Document, id: &str) -> Option<&'a Scene> {
    doc.scenes.iter().find(|s| s.id == id)
}

fn get_mut<'a>(doc: &'a mut Document, id: &str) -> Option<&'a mut Scene> {
    doc.scenes.iter_mut().find(|s| s.id == id)
}

/// Add a scene at the end of the narrative order.
pub fn add<'a>(doc: &'a mut Document, draft: SceneDraft) -> &'a Scene {
    let idx = doc.scenes.len();
    doc.scenes.push(Scene {
        id: generate_id("scene"),
        title: draft.title,
        chapter: draft.chapter,
        order: idx,
        characters: draft.characters,
        emotions: Vec::new(),
        cuts: Vec::new(),
        narration_tone: draft.narration_tone,
        notes: draft.notes,
        created: now_iso(),
    });
    &doc.scenes[idx]
}

/// Remove a scene and renumber the survivors to a dense `0..n-1` order.
pub fn remove(doc: &mut Document, id: &str) -> bool {
    let Some(pos) = doc.scenes.iter().position(|s| s.id == id) else {
        return false;
    };
    doc.scenes.remove(pos);
    renumber_scenes(doc);
    true
}

/// Reorder scenes to the given id sequence. Fails unless `ids` is
/// exactly the current id set, each id once.
pub fn reorder(doc: &mut Document, ids: &[String]) -> bool {
    if ids.len() != doc.scenes.len() {
        debug!(given = ids.len(), have = doc.scenes.len(), "reorder length mismatch");
        return false;
    }
    let current: HashSet<&str> = doc.scenes.iter().map(|s| s.id.as_str()).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    for id in ids {
        if !current.contains(id.as_str()) || !seen.insert(id.as_str()) {
            return false;
        }
    }
    for (position, id) in ids.iter().enumerate() {
        if let Some(scene) = get_mut(doc, id) {
            scene.order = position;
        }
    }
    true
}

/// Re-derive dense scene orders, preserving the current relative order.
fn renumber_scenes(doc: &mut Document) {
    let mut scenes: Vec<&mut Scene> = doc.scenes.iter_mut().collect();
    scenes.sort_by_key(|s| s.order);
    for (position, scene) in scenes.into_iter().enumerate() {
        scene.order = position;
    }
}

/// Append a cut to a scene.
pub fn add_cut(doc: &mut Document, scene_id: &str, draft: CutDraft) -> bool {
    let Some(scene) = get_mut(doc, scene_id) else {
        return false;
    };
    let order = scene.cuts.len();
    scene.cuts.push(Cut {
        order,
        kind: draft.kind,
        content: draft.content,
        character: draft.character,
        emotion: draft.emotion,
    });
    true
}

/// Remove the cut at `index`; the remaining cuts are renumbered densely
/// in their original relative sequence.
pub fn remove_cut(doc: &mut Document, scene_id: &str, index: usize) -> bool {
    let Some(scene) = get_mut(doc, scene_id) else {
        return false;
    };
    let Some(pos) = scene.cuts.iter().position(|c| c.order == index) else {
        return false;
    };
    scene.cuts.remove(pos);
    let mut cuts: Vec<&mut Cut> = scene.cuts.iter_mut().collect();
    cuts.sort_by_key(|c| c.order);
    for (position, cut) in cuts.into_iter().enumerate() {
        cut.order = position;
    }
    true
}

/// Reorder a scene's cuts. `indices[i]` names the current cut index that
/// should land at position `i`; the input must be a permutation of
/// `0..n-1`, validated by sorting a copy and comparing to the range.
pub fn reorder_cuts(doc: &mut Document, scene_id: &str, indices: &[usize]) -> bool {
    let Some(scene) = get_mut(doc, scene_id) else {
        return false;
    };
    if indices.len() != scene.cuts.len() {
        return false;
    }
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    if sorted.iter().copied().ne(0..scene.cuts.len()) {
        return false;
    }
    let new_positions: HashMap<usize, usize> = indices
        .iter()
        .enumerate()
        .map(|(position, old)| (*old, position))
        .collect();
    for cut in &mut scene.cuts {
        if let Some(&position) = new_positions.get(&cut.order) {
            cut.order = position;
        }
    }
    true
}

/// Tag a scene with an emotion. Duplicate adds are no-op successes.
pub fn add_emotion_tag(doc: &mut Document, scene_id: &str, tag: &str) -> bool {
    let Some(scene) = get_mut(doc, scene_id) else {
        return false;
    };
    if !scene.emotions.iter().any(|t| t == tag) {
        scene.emotions.push(tag.to_string());
    }
    true
}

/// Remove an emotion tag. Removing an absent tag is a no-op success.
pub fn remove_emotion_tag(doc: &mut Document, scene_id: &str, tag: &str) -> bool {
    let Some(scene) = get_mut(doc, scene_id) else {
        return false;
    };
    scene.emotions.retain(|t| t != tag);
    true
}

fn by_order<'a>(scenes: impl Iterator<Item = &'a Scene>) -> Vec<&'a Scene> {
    let mut scenes: Vec<&Scene> = scenes.collect();
    scenes.sort_by_key(|s| s.order);
    scenes
}

/// All scenes in narrative order.
#[must_use]
pub fn in_order(doc: &Document) -> Vec<&Scene> {
    by_order(doc.scenes.iter())
}

/// Scenes in the given chapter, in narrative order.
#[must_use]
pub fn by_chapter<'a>(doc: &'a Document, chapter: &str) -> Vec<&'a Scene> {
    by_order(
        doc.scenes
            .iter()
            .filter(|s| s.chapter.as_deref() == Some(chapter)),
    )
}

/// Scenes a character participates in, in narrative order.
#[must_use]
pub fn by_character<'a>(doc: &'a Document, name: &str) -> Vec<&'a Scene> {
    by_order(
        doc.scenes
            .iter()
            .filter(|s| s.characters.iter().any(|n| n == name)),
    )
}

/// Scenes carrying the given emotion tag, in narrative order.
#[must_use]
pub fn by_emotion<'a>(doc: &'a Document, tag: &str) -> Vec<&'a Scene> {
    by_order(
        doc.scenes
            .iter()
            .filter(|s| s.emotions.iter().any(|t| t == tag)),
    )
}

/// Global emotion-tag frequency, descending by count. Ties keep
/// first-seen order.
#[must_use]
pub fn emotion_frequency(doc: &Document) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for scene in &doc.scenes {
        for tag in &scene.emotions {
            match counts.iter_mut().find(|(t, _)| t == tag) {
                Some((_, n)) => *n += 1,
                None => counts.push((tag.clone(), 1)),
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// One row of the linear pacing summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEntry {
    /// 1-indexed narrative position.
    pub position: usize,
    /// Scene title.
    pub title: String,
    /// Chapter label, if any.
    pub chapter: Option<String>,
    /// First emotion tag, or [`EMOTION_UNSET`].
    pub emotion: String,
    /// Participating characters.
    pub characters: Vec<String>,
    /// Number of cuts.
    pub cut_count: usize,
}

/// Linear narrative-pacing summary over all scenes, in order.
#[must_use]
pub fn flow(doc: &Document) -> Vec<FlowEntry> {
    in_order(doc)
        .into_iter()
        .map(|scene| FlowEntry {
            position: scene.order + 1,
            title: scene.title.clone(),
            chapter: scene.chapter.clone(),
            emotion: scene
                .emotions
                .first()
                .cloned()
                .unwrap_or_else(|| EMOTION_UNSET.to_string()),
            characters: scene.characters.clone(),
            cut_count: scene.cuts.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    fn doc() -> Document {
        Document::new("작품", "")
    }

    fn titled(title: &str) -> SceneDraft {
        SceneDraft {
            title: title.to_string(),
            ..SceneDraft::default()
        }
    }

    fn orders(doc: &Document) -> Vec<usize> {
        let mut orders: Vec<usize> = doc.scenes.iter().map(|s| s.order).collect();
        orders.sort_unstable();
        orders
    }

    #[test]
    fn add_appends_at_the_end_of_the_order() {
        let mut doc = doc();
        add(&mut doc, titled("하나"));
        add(&mut doc, titled("둘"));
        let third_order = add(&mut doc, titled("셋")).order;
        assert_eq!(third_order, 2);
        assert_eq!(orders(&doc), vec![0, 1, 2]);
    }

    #[test]
    fn remove_renumbers_densely() {
        let mut doc = doc();
        add(&mut doc, titled("하나"));
        let middle = add(&mut doc, titled("둘")).id.clone();
        add(&mut doc, titled("셋"));

        assert!(remove(&mut doc, &middle));
        assert_eq!(orders(&doc), vec![0, 1]);
        let seq: Vec<&str> = in_order(&doc).iter().map(|s| s.title.as_str()).collect();
        assert_eq!(seq, ["하나", "셋"]);

        assert!(!remove(&mut doc, &middle), "already gone");
    }

    #[test]
    fn reorder_requires_the_exact_id_set() {
        let mut doc = doc();
        let a = add(&mut doc, titled("하나")).id.clone();
        let b = add(&mut doc, titled("둘")).id.clone();
        let c = add(&mut doc, titled("셋")).id.clone();

        assert!(!reorder(&mut doc, &[a.clone(), b.clone()]), "too short");
        assert!(
            !reorder(&mut doc, &[a.clone(), b.clone(), "scene-ghost".into()]),
            "unknown id"
        );
        assert!(
            !reorder(&mut doc, &[a.clone(), a.clone(), b.clone()]),
            "duplicate id"
        );

        assert!(reorder(&mut doc, &[c.clone(), a.clone(), b.clone()]));
        let seq: Vec<&str> = in_order(&doc).iter().map(|s| s.title.as_str()).collect();
        assert_eq!(seq, ["셋", "하나", "둘"]);
        assert_eq!(orders(&doc), vec![0, 1, 2]);
    }

    #[test]
    fn removing_a_cut_renumbers_the_rest() {
        let mut doc = doc();
        let id = add(&mut doc, titled("첫 만남")).id.clone();
        for content in ["안녕.", "...안녕하세요.", "(어색한 침묵)"] {
            add_cut(&mut doc, &id, CutDraft::new(CutKind::Dialogue, content));
        }

        assert!(remove_cut(&mut doc, &id, 1));
        let scene = get(&doc, &id).expect("present");
        let orders: Vec<usize> = scene.cuts.iter().map(|c| c.order).collect();
        assert_eq!(orders, vec![0, 1]);
        assert_eq!(scene.cuts[0].content, "안녕.");
        assert_eq!(scene.cuts[1].content, "(어색한 침묵)");

        assert!(!remove_cut(&mut doc, &id, 9), "no such index");
    }

    #[test]
    fn reorder_cuts_validates_the_permutation() {
        let mut doc = doc();
        let id = add(&mut doc, titled("장면")).id.clone();
        for content in ["a", "b", "c"] {
            add_cut(&mut doc, &id, CutDraft::new(CutKind::Narration, content));
        }

        assert!(!reorder_cuts(&mut doc, &id, &[0, 1]), "length mismatch");
        assert!(!reorder_cuts(&mut doc, &id, &[0, 1, 3]), "out of range");
        assert!(!reorder_cuts(&mut doc, &id, &[0, 0, 1]), "duplicate");

        assert!(reorder_cuts(&mut doc, &id, &[2, 0, 1]));
        let scene = get(&doc, &id).expect("present");
        let mut cuts: Vec<(usize, &str)> = scene
            .cuts
            .iter()
            .map(|c| (c.order, c.content.as_str()))
            .collect();
        cuts.sort_unstable();
        assert_eq!(cuts, vec![(0, "c"), (1, "a"), (2, "b")]);
    }

    #[test]
    fn emotion_tags_are_idempotent() {
        let mut doc = doc();
        let id = add(&mut doc, titled("장면")).id.clone();

        assert!(add_emotion_tag(&mut doc, &id, "긴장"));
        assert!(add_emotion_tag(&mut doc, &id, "긴장"), "duplicate add succeeds");
        assert_eq!(get(&doc, &id).expect("present").emotions.len(), 1);

        assert!(remove_emotion_tag(&mut doc, &id, "긴장"));
        assert!(remove_emotion_tag(&mut doc, &id, "긴장"), "absent remove succeeds");
        assert!(get(&doc, &id).expect("present").emotions.is_empty());
    }

    #[test]
    fn queries_filter_and_sort_by_order() {
        let mut doc = doc();
        let a = add(
            &mut doc,
            SceneDraft {
                title: "하나".into(),
                chapter: Some("1장".into()),
                characters: vec!["서연".into()],
                ..SceneDraft::default()
            },
        )
        .id
        .clone();
        let b = add(
            &mut doc,
            SceneDraft {
                title: "둘".into(),
                chapter: Some("1장".into()),
                characters: vec!["서연".into(), "민준".into()],
                ..SceneDraft::default()
            },
        )
        .id
        .clone();
        add_emotion_tag(&mut doc, &a, "긴장");
        add_emotion_tag(&mut doc, &b, "긴장");

        // reverse narrative order; queries must still come back sorted
        assert!(reorder(&mut doc, &[b.clone(), a.clone()]));

        let chapter: Vec<&str> = by_chapter(&doc, "1장").iter().map(|s| s.title.as_str()).collect();
        assert_eq!(chapter, ["둘", "하나"]);
        assert_eq!(by_character(&doc, "민준").len(), 1);
        let tagged: Vec<&str> = by_emotion(&doc, "긴장").iter().map(|s| s.title.as_str()).collect();
        assert_eq!(tagged, ["둘", "하나"]);
        assert!(by_chapter(&doc, "2장").is_empty());
    }

    #[test]
    fn emotion_frequency_descends() {
        let mut doc = doc();
        for (title, tags) in [("하나", vec!["긴장", "설렘"]), ("둘", vec!["긴장"]), ("셋", vec!["긴장", "설렘", "공포"])] {
            let id = add(&mut doc, titled(title)).id.clone();
            for tag in tags {
                add_emotion_tag(&mut doc, &id, tag);
            }
        }
        let freq = emotion_frequency(&doc);
        assert_eq!(freq[0], ("긴장".to_string(), 3));
        assert_eq!(freq[1], ("설렘".to_string(), 2));
        assert_eq!(freq[2], ("공포".to_string(), 1));
    }

    #[test]
    fn flow_summarizes_in_order_with_unset_sentinel() {
        let mut doc = doc();
        let a = add(
            &mut doc,
            SceneDraft {
                title: "하나".into(),
                characters: vec!["서연".into()],
                ..SceneDraft::default()
            },
        )
        .id
        .clone();
        add(&mut doc, titled("둘"));
        add_emotion_tag(&mut doc, &a, "설렘");
        add_cut(&mut doc, &a, CutDraft::new(CutKind::Dialogue, "안녕."));

        let flow = flow(&doc);
        assert_eq!(flow.len(), 2);
        assert_eq!(flow[0].position, 1);
        assert_eq!(flow[0].emotion, "설렘");
        assert_eq!(flow[0].cut_count, 1);
        assert_eq!(flow[1].emotion, EMOTION_UNSET);
        assert_eq!(flow[1].cut_count, 0);
    }
}
