//! Relationship operations: unordered-pair CRUD, evolution timeline,
//! graph queries, map rendering.
//!
//! `(a, b)` and `(b, a)` denote the same relationship everywhere in
//! this module; the stored `from`/`to` orientation only survives for
//! display. At most one relationship exists per unordered pair.

use serde::Serialize;
use tracing::debug;

use crate::model::{Document, Relationship, RelationshipEvent, RelationshipKind, SpeechLevel};
use crate::types::{generate_id, now_iso};

/// Caller-supplied fields for a new relationship.
#[derive(Debug, Clone)]
pub struct RelationshipDraft {
    /// First endpoint (character name).
    pub from: String,
    /// Second endpoint (character name).
    pub to: String,
    /// Classification.
    pub kind: RelationshipKind,
    /// Free-text descriptor of the pair's dynamic.
    pub dynamic: String,
    /// Register override for this pair.
    pub speech_level: Option<SpeechLevel>,
    /// Free-form notes.
    pub notes: String,
}

impl RelationshipDraft {
    /// Draft with only the required fields filled in.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            dynamic: String::new(),
            speech_level: None,
            notes: String::new(),
        }
    }
}

/// Partial update; identity fields (`id`, `from`, `to`, `created`) are
/// not part of the patch.
#[derive(Debug, Clone, Default)]
pub struct RelationshipPatch {
    /// Replace the classification.
    pub kind: Option<RelationshipKind>,
    /// Replace the dynamic descriptor.
    pub dynamic: Option<String>,
    /// Replace the register override.
    pub speech_level: Option<SpeechLevel>,
    /// Replace the notes.
    pub notes: Option<String>,
}

/// Caller-supplied fields for a new evolution event.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    /// What changed between the two characters.
    pub change: String,
    /// What triggered the change.
    pub catalyst: String,
    /// Scene where it happened, if any.
    pub scene: Option<String>,
}

/// Orientation-insensitive lookup.
#[must_use]
pub fn get<'a>(doc: &'a Document, a: &str, b: &str) -> Option<&'a Relationship> {
    doc.relationships.iter().find(|r| r.joins(a, b))
}

fn get_mut<'a>(doc: &'a mut Document, a: &str, b: &str) -> Option<&'a mut Relationship> {
    doc.relationships.iter_mut().find(|r| r.joins(a, b))
}

/// Add a relationship. Returns `None` when the pair already has one in
/// either orientation.
pub fn add<'a>(doc: &'a mut Document, draft: RelationshipDraft) -> Option<&'a Relationship> {
    if get(doc, &draft.from, &draft.to).is_some() {
        debug!(from = %draft.from, to = %draft.to, "pair already related");
        return None;
    }
    doc.relationships.push(Relationship {
        id: generate_id("rel"),
        from: draft.from,
        to: draft.to,
        kind: draft.kind,
        dynamic: draft.dynamic,
        speech_level: draft.speech_level,
        timeline: Vec::new(),
        notes: draft.notes,
        created: now_iso(),
    });
    doc.relationships.last()
}

/// Apply a partial update to the pair's relationship. Returns `false`
/// when the pair is unknown.
pub fn update(doc: &mut Document, a: &str, b: &str, patch: RelationshipPatch) -> bool {
    let Some(rel) = get_mut(doc, a, b) else {
        return false;
    };
    if let Some(kind) = patch.kind {
        rel.kind = kind;
    }
    if let Some(dynamic) = patch.dynamic {
        rel.dynamic = dynamic;
    }
    if let Some(level) = patch.speech_level {
        rel.speech_level = Some(level);
    }
    if let Some(notes) = patch.notes {
        rel.notes = notes;
    }
    true
}

/// Remove the pair's relationship, located by either orientation.
pub fn remove(doc: &mut Document, a: &str, b: &str) -> bool {
    let before = doc.relationships.len();
    doc.relationships.retain(|r| !r.joins(a, b));
    doc.relationships.len() != before
}

/// Append an evolution event to the pair's relationship.
pub fn add_event(doc: &mut Document, a: &str, b: &str, draft: EventDraft) -> bool {
    let Some(rel) = get_mut(doc, a, b) else {
        return false;
    };
    rel.timeline.push(RelationshipEvent {
        timestamp: now_iso(),
        change: draft.change,
        catalyst: draft.catalyst,
        scene: draft.scene,
    });
    true
}

/// The pair's events sorted by timestamp string.
///
/// Re-sorts on every read instead of trusting insertion order, so
/// out-of-order event insertion still reads back chronologically.
#[must_use]
pub fn timeline<'a>(doc: &'a Document, a: &str, b: &str) -> Option<Vec<&'a RelationshipEvent>> {
    let rel = get(doc, a, b)?;
    let mut events: Vec<&RelationshipEvent> = rel.timeline.iter().collect();
    events.sort_by(|x, y| x.timestamp.cmp(&y.timestamp));
    Some(events)
}

/// The pair's `change` descriptions joined in timestamp order.
#[must_use]
pub fn evolution_arc(doc: &Document, a: &str, b: &str) -> Option<String> {
    let events = timeline(doc, a, b)?;
    Some(
        events
            .iter()
            .map(|e| e.change.as_str())
            .collect::<Vec<_>>()
            .join(" → "),
    )
}

/// One row of a [`connections`] query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// The other party's name.
    pub with: String,
    /// Classification.
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    /// The pair's dynamic descriptor.
    pub dynamic: String,
    /// Always "mutual": the query layer does not track asymmetric
    /// direction, even for kinds like mentor that could carry one.
    pub direction: &'static str,
}

/// Every relationship touching `name`, each reported with the other
/// party's name.
#[must_use]
pub fn connections(doc: &Document, name: &str) -> Vec<Connection> {
    doc.relationships
        .iter()
        .filter_map(|rel| {
            rel.other_end(name).map(|other| Connection {
                with: other.to_string(),
                kind: rel.kind,
                dynamic: rel.dynamic.clone(),
                direction: "mutual",
            })
        })
        .collect()
}

/// One edge of the relationship web.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebEdge {
    /// Stored orientation, first endpoint.
    pub from: String,
    /// Stored orientation, second endpoint.
    pub to: String,
    /// Classification.
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    /// The pair's dynamic descriptor.
    pub dynamic: String,
}

/// Node/edge view of the whole relationship graph.
#[derive(Debug, Clone, Serialize)]
pub struct RelationshipWeb {
    /// Every name appearing in any endpoint, whether or not it resolves
    /// to a stored character; broken references surface here too.
    pub nodes: Vec<String>,
    /// All relationships as edges.
    pub edges: Vec<WebEdge>,
}

/// Build the full node/edge view of the graph.
#[must_use]
pub fn web(doc: &Document) -> RelationshipWeb {
    let mut nodes: Vec<String> = Vec::new();
    for rel in &doc.relationships {
        for end in [&rel.from, &rel.to] {
            if !nodes.iter().any(|n| n == end) {
                nodes.push(end.clone());
            }
        }
    }
    let edges = doc
        .relationships
        .iter()
        .map(|rel| WebEdge {
            from: rel.from.clone(),
            to: rel.to.clone(),
            kind: rel.kind,
            dynamic: rel.dynamic.clone(),
        })
        .collect();
    RelationshipWeb { nodes, edges }
}

/// ASCII relationship map driven by the fixed kind symbol/label tables.
#[must_use]
pub fn render_map(doc: &Document) -> String {
    let web = web(doc);
    let mut out = String::from("# Relationship map\n\n");
    if web.edges.is_empty() {
        out.push_str("(no relationships)\n");
        return out;
    }
    for edge in &web.edges {
        out.push_str(&format!(
            "{} ──{}── {}  [{}]",
            edge.from,
            edge.kind.symbol(),
            edge.to,
            edge.kind.label()
        ));
        if !edge.dynamic.is_empty() {
            out.push_str(&format!("  {}", edge.dynamic));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{self, CharacterDraft};
    use crate::model::Document;

    fn doc_with(names: &[&str]) -> Document {
        let mut doc = Document::new("작품", "");
        for name in names {
            character::add(
                &mut doc,
                CharacterDraft {
                    name: (*name).to_string(),
                    ..CharacterDraft::default()
                },
            );
        }
        doc
    }

    #[test]
    fn pair_is_unique_across_orientations() {
        let mut doc = doc_with(&["A", "B"]);
        assert!(add(&mut doc, RelationshipDraft::new("A", "B", RelationshipKind::Romantic)).is_some());
        assert!(
            add(&mut doc, RelationshipDraft::new("B", "A", RelationshipKind::Friendship)).is_none(),
            "reversed orientation is the same pair"
        );
        assert_eq!(doc.relationships.len(), 1);
    }

    #[test]
    fn lookup_is_orientation_insensitive() {
        let mut doc = doc_with(&["A", "B"]);
        let id = add(&mut doc, RelationshipDraft::new("A", "B", RelationshipKind::Romantic))
            .expect("added")
            .id
            .clone();
        assert_eq!(get(&doc, "B", "A").expect("found").id, id);
    }

    #[test]
    fn update_merges_and_keeps_identity() {
        let mut doc = doc_with(&["A", "B"]);
        add(&mut doc, RelationshipDraft::new("A", "B", RelationshipKind::Friendship));

        assert!(update(
            &mut doc,
            "B",
            "A",
            RelationshipPatch {
                kind: Some(RelationshipKind::Romantic),
                dynamic: Some("애증".into()),
                ..RelationshipPatch::default()
            }
        ));

        let rel = get(&doc, "A", "B").expect("found");
        assert_eq!(rel.kind, RelationshipKind::Romantic);
        assert_eq!(rel.dynamic, "애증");
        assert_eq!(rel.from, "A", "orientation untouched");
    }

    #[test]
    fn remove_works_from_either_side() {
        let mut doc = doc_with(&["A", "B"]);
        add(&mut doc, RelationshipDraft::new("A", "B", RelationshipKind::Mentor));
        assert!(remove(&mut doc, "B", "A"));
        assert!(!remove(&mut doc, "A", "B"), "already gone");
        assert!(doc.relationships.is_empty());
    }

    #[test]
    fn timeline_reads_back_sorted_by_timestamp() {
        let mut doc = doc_with(&["A", "B"]);
        add(&mut doc, RelationshipDraft::new("A", "B", RelationshipKind::Romantic));
        for change in ["첫 만남", "오해", "화해"] {
            add_event(
                &mut doc,
                "A",
                "B",
                EventDraft {
                    change: change.into(),
                    ..EventDraft::default()
                },
            );
            // timestamps carry millisecond grain; keep them distinct
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        // shuffle storage order; reads must re-sort by timestamp
        doc.relationships[0].timeline.reverse();

        let events = timeline(&doc, "A", "B").expect("found");
        let changes: Vec<_> = events.iter().map(|e| e.change.as_str()).collect();
        assert_eq!(changes, ["첫 만남", "오해", "화해"]);
        assert_eq!(
            evolution_arc(&doc, "A", "B").expect("found"),
            "첫 만남 → 오해 → 화해"
        );
    }

    #[test]
    fn connections_report_the_other_party_as_mutual() {
        let mut doc = doc_with(&["A", "B", "C"]);
        add(&mut doc, RelationshipDraft::new("A", "B", RelationshipKind::Romantic));
        add(&mut doc, RelationshipDraft::new("C", "A", RelationshipKind::Antagonistic));

        let conns = connections(&doc, "A");
        assert_eq!(conns.len(), 2);
        assert_eq!(conns[0].with, "B");
        assert_eq!(conns[1].with, "C");
        assert!(conns.iter().all(|c| c.direction == "mutual"));
    }

    #[test]
    fn web_includes_unresolved_endpoints() {
        let mut doc = doc_with(&["A", "B"]);
        add(&mut doc, RelationshipDraft::new("A", "B", RelationshipKind::Friendship));
        character::remove(&mut doc, "B");

        let web = web(&doc);
        assert!(web.nodes.contains(&"B".to_string()), "dangling name still a node");
        assert_eq!(web.edges.len(), 1);
    }

    #[test]
    fn map_renders_symbols_and_labels() {
        let mut doc = doc_with(&["A", "B"]);
        add(
            &mut doc,
            RelationshipDraft {
                dynamic: "밀당".into(),
                ..RelationshipDraft::new("A", "B", RelationshipKind::Romantic)
            },
        );
        let map = render_map(&doc);
        assert!(map.contains("A ──♥── B"));
        assert!(map.contains("[Romantic]"));
        assert!(map.contains("밀당"));

        let empty = render_map(&doc_with(&[]));
        assert!(empty.contains("(no relationships)"));
    }
}
