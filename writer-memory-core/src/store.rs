//! Thin orchestrator owning the load-mutate-save bracket.
//!
//! Each invocation of the surrounding tool is stateless: it loads the
//! whole document, applies exactly one logical operation, and persists
//! the result. Subsystem operations are pure functions over a loaded
//! [`Document`]; this type is the only place a mutation touches disk,
//! which keeps the core independently testable.
//!
//! At most one process is assumed to access the store at a time. There
//! is no file locking; if two processes interleave brackets, the later
//! save overwrites the earlier one (accepted lost-update limitation).

use std::path::Path;

use tracing::info;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::model::Document;
use crate::persistence::DocumentStore;

/// Entry point for callers: a [`DocumentStore`] plus the
/// load-apply-save bracket every public operation runs inside.
#[derive(Debug, Clone)]
pub struct WriterMemory {
    files: DocumentStore,
}

impl WriterMemory {
    /// Open the store under `project_root` with the default layout.
    #[must_use]
    pub fn open(project_root: impl AsRef<Path>) -> Self {
        Self {
            files: DocumentStore::open(project_root),
        }
    }

    /// Open with an explicit layout configuration.
    #[must_use]
    pub fn with_config(project_root: impl AsRef<Path>, config: StoreConfig) -> Self {
        Self {
            files: DocumentStore::with_config(project_root, config),
        }
    }

    /// Borrow the underlying file store.
    #[must_use]
    pub fn files(&self) -> &DocumentStore {
        &self.files
    }

    /// Create and persist a fresh document if none exists; return the
    /// stored document either way. A fresh store gets no backup since
    /// there is nothing to back up.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures from the persistence layer.
    pub fn init(&self, name: &str, genre: &str) -> Result<Document> {
        if let Some(existing) = self.files.load()? {
            return Ok(existing);
        }
        let mut doc = Document::new(name, genre);
        self.files.save(&mut doc)?;
        info!(project = name, "writer memory initialized");
        Ok(doc)
    }

    /// Run a read-only query against the loaded document. Never writes.
    ///
    /// Returns `Ok(None)` when no store exists yet.
    ///
    /// # Errors
    ///
    /// Propagates load failures from the persistence layer.
    pub fn read<T>(&self, query: impl FnOnce(&Document) -> T) -> Result<Option<T>> {
        Ok(self.files.load()?.map(|doc| query(&doc)))
    }

    /// Run one logical mutation inside a full load-apply-save bracket.
    ///
    /// Returns `Ok(None)` when no store exists yet; callers are expected
    /// to [`init`](Self::init) first.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures from the persistence layer.
    pub fn mutate<T>(&self, op: impl FnOnce(&mut Document) -> T) -> Result<Option<T>> {
        let Some(mut doc) = self.files.load()? else {
            return Ok(None);
        };
        let out = op(&mut doc);
        self.files.save(&mut doc)?;
        Ok(Some(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{self, CharacterDraft};

    #[test]
    fn read_and_mutate_require_init() {
        let dir = tempfile::tempdir().expect("tempdir");
        let memory = WriterMemory::open(dir.path());

        assert!(memory.read(|d| d.project.name.clone()).expect("read").is_none());
        assert!(memory.mutate(|_| ()).expect("mutate").is_none());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let memory = WriterMemory::open(dir.path());

        let first = memory.init("소설", "로맨스").expect("init");
        let second = memory.init("다른 이름", "호러").expect("re-init");
        assert_eq!(second.project.name, first.project.name);
        assert_eq!(second.project.genre, "로맨스");
    }

    #[test]
    fn mutation_persists_across_brackets() {
        let dir = tempfile::tempdir().expect("tempdir");
        let memory = WriterMemory::open(dir.path());
        memory.init("소설", "").expect("init");

        memory
            .mutate(|doc| {
                character::add(
                    doc,
                    CharacterDraft {
                        name: "서연".into(),
                        ..CharacterDraft::default()
                    },
                )
                .is_some()
            })
            .expect("mutate")
            .expect("store present");

        let count = memory
            .read(|doc| doc.characters.len())
            .expect("read")
            .expect("store present");
        assert_eq!(count, 1);
    }
}
