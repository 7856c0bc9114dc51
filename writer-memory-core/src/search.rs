//! Full-text search across every entity collection.
//!
//! One pass per query: each domain tests case-folded substring matches
//! against its textual fields. Result order follows domain iteration
//! order; there is no scoring beyond the coarse name-vs-content
//! relevance tag.

use serde::Serialize;

use crate::model::Document;

/// Which entity collection a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// A character record.
    Character,
    /// A relationship record.
    Relationship,
    /// A scene record.
    Scene,
    /// A theme record.
    Theme,
    /// The world singleton.
    World,
}

/// Coarse relevance tag: did the query hit an identifying field or
/// body text?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    /// Matched a name or alias.
    Name,
    /// Matched a title.
    Title,
    /// Matched body text.
    Content,
}

/// One search hit.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Source collection.
    #[serde(rename = "type")]
    pub domain: Domain,
    /// Entity id ("world" for the world singleton).
    pub id: String,
    /// Display title of the entity.
    pub title: String,
    /// Coarse relevance tag.
    pub relevance: Relevance,
    /// Truncated context snippet.
    pub snippet: String,
}

/// Hard cap on snippet length, in characters.
const SNIPPET_MAX: usize = 80;

fn snippet(parts: &[&str]) -> String {
    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" · ");
    if joined.chars().count() <= SNIPPET_MAX {
        joined
    } else {
        let mut cut: String = joined.chars().take(SNIPPET_MAX).collect();
        cut.push_str("...");
        cut
    }
}

fn hit(haystack: &str, folded_query: &str) -> bool {
    haystack.to_lowercase().contains(folded_query)
}

/// Search every entity collection for `query` (case-folded substring
/// match). An empty query matches nothing.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn search(doc: &Document, query: &str) -> Vec<SearchHit> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }
    let mut hits = Vec::new();

    for character in doc.characters.values() {
        let name_hit =
            hit(&character.name, &q) || character.aliases.iter().any(|a| hit(a, &q));
        let content_hit = hit(&character.arc, &q)
            || hit(&character.tone, &q)
            || hit(&character.attitude, &q)
            || hit(&character.notes, &q)
            || character.keywords.iter().any(|k| hit(k, &q));
        if name_hit || content_hit {
            hits.push(SearchHit {
                domain: Domain::Character,
                id: character.id.clone(),
                title: character.name.clone(),
                relevance: if name_hit { Relevance::Name } else { Relevance::Content },
                snippet: snippet(&[&character.arc, &character.tone, &character.notes]),
            });
        }
    }

    for rel in &doc.relationships {
        let name_hit = hit(&rel.from, &q) || hit(&rel.to, &q);
        let content_hit = hit(&rel.dynamic, &q)
            || hit(&rel.notes, &q)
            || rel.timeline.iter().any(|e| hit(&e.change, &q));
        if name_hit || content_hit {
            hits.push(SearchHit {
                domain: Domain::Relationship,
                id: rel.id.clone(),
                title: format!("{} - {}", rel.from, rel.to),
                relevance: if name_hit { Relevance::Name } else { Relevance::Content },
                snippet: snippet(&[rel.kind.label(), &rel.dynamic, &rel.notes]),
            });
        }
    }

    for scene in &doc.scenes {
        let title_hit = hit(&scene.title, &q);
        let matching_cut = scene.cuts.iter().find(|c| hit(&c.content, &q));
        let content_hit = matching_cut.is_some()
            || hit(&scene.notes, &q)
            || scene.characters.iter().any(|n| hit(n, &q))
            || scene.emotions.iter().any(|t| hit(t, &q));
        if title_hit || content_hit {
            let cut_text = matching_cut
                .or_else(|| scene.cuts.first())
                .map_or("", |c| c.content.as_str());
            hits.push(SearchHit {
                domain: Domain::Scene,
                id: scene.id.clone(),
                title: scene.title.clone(),
                relevance: if title_hit { Relevance::Title } else { Relevance::Content },
                snippet: snippet(&[cut_text, &scene.notes]),
            });
        }
    }

    for theme in &doc.themes {
        let name_hit = hit(&theme.name, &q);
        let content_hit =
            hit(&theme.description, &q) || theme.keywords.iter().any(|k| hit(k, &q));
        if name_hit || content_hit {
            hits.push(SearchHit {
                domain: Domain::Theme,
                id: theme.id.clone(),
                title: theme.name.clone(),
                relevance: if name_hit { Relevance::Name } else { Relevance::Content },
                snippet: snippet(&[&theme.description, &theme.keywords.join(", ")]),
            });
        }
    }

    let world = &doc.world;
    let name_hit = hit(&world.name, &q);
    let content_hit = hit(&world.era, &q)
        || hit(&world.atmosphere, &q)
        || hit(&world.cultural_notes, &q)
        || hit(&world.notes, &q)
        || world.rules.iter().any(|r| hit(&r.description, &q))
        || world
            .locations
            .iter()
            .any(|l| hit(&l.name, &q) || hit(&l.description, &q));
    if name_hit || content_hit {
        hits.push(SearchHit {
            domain: Domain::World,
            id: "world".to_string(),
            title: world.name.clone(),
            relevance: if name_hit { Relevance::Name } else { Relevance::Content },
            snippet: snippet(&[&world.era, &world.atmosphere, &world.notes]),
        });
    }

    hits
}
