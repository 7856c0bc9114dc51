//! JSON-file persistence for the writer-memory document.
//!
//! The store is a single pretty-printed JSON document at
//! `<root>/.writer-memory/memory.json`. Every invocation of the
//! surrounding tool is a fresh process, so durability is re-established
//! on every mutation: a save first snapshots the prior document into
//! `backups/`, then commits the new content with a scoped temp-file
//! write followed by an atomic rename. Readers never observe a torn
//! file; if the process dies mid-write, the old document survives.
//!
//! Backups are a best-effort recovery aid. There is no transaction log
//! or undo, so the timestamped snapshots (pruned to a fixed retention
//! count) are the only way back after a caller writes bad data.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{MemoryError, Result};
use crate::model::Document;
use crate::types::{backup_stamp, now_iso};

/// Handle to one project's on-disk store.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    config: StoreConfig,
    store_dir: PathBuf,
}

impl DocumentStore {
    /// Store rooted at `<project_root>/.writer-memory` with the default
    /// layout.
    #[must_use]
    pub fn open(project_root: impl AsRef<Path>) -> Self {
        Self::with_config(project_root, StoreConfig::default())
    }

    /// Store with an explicit layout configuration.
    #[must_use]
    pub fn with_config(project_root: impl AsRef<Path>, config: StoreConfig) -> Self {
        let store_dir = project_root.as_ref().join(&config.dir_name);
        Self { config, store_dir }
    }

    /// Canonical document path.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.store_dir.join(&self.config.file_name)
    }

    /// Backup directory path.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.store_dir.join(&self.config.backup_dir)
    }

    /// Load the document.
    ///
    /// A missing store file is not an error (first use starts empty), so
    /// absence maps to `Ok(None)`.
    ///
    /// # Errors
    ///
    /// [`MemoryError::Corrupt`] when the file exists but cannot be
    /// parsed; callers treat that as "no usable memory".
    /// [`MemoryError::Io`] for other filesystem failures.
    pub fn load(&self) -> Result<Option<Document>> {
        let path = self.document_path();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no store file; starting empty");
                return Ok(None);
            }
            Err(e) => return Err(MemoryError::Io(e)),
        };
        let doc: Document = serde_json::from_str(&raw).map_err(|e| MemoryError::Corrupt {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        debug!(path = %path.display(), bytes = raw.len(), "document loaded");
        Ok(Some(doc))
    }

    /// Save the document, backing up whatever was on disk before.
    ///
    /// Refreshes `project.updated`, writes the new JSON to a temporary
    /// file in the store directory, then renames it over the canonical
    /// path. The canonical file is untouched unless the rename commits;
    /// the temp file is removed on any earlier failure.
    ///
    /// # Errors
    ///
    /// [`MemoryError::Serialization`] on encode failure,
    /// [`MemoryError::Io`] on write or rename failure.
    pub fn save(&self, doc: &mut Document) -> Result<()> {
        fs::create_dir_all(&self.store_dir)?;

        // Backup must never block the save.
        match self.load() {
            Ok(Some(previous)) => {
                self.backup(&previous);
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "prior document unreadable; skipping backup"),
        }

        doc.project.updated = now_iso();

        let json = if self.config.pretty {
            serde_json::to_string_pretty(doc)
        } else {
            serde_json::to_string(doc)
        }
        .map_err(|e| MemoryError::Serialization(e.to_string()))?;

        let path = self.document_path();
        let tmp = self.store_dir.join(format!("{}.tmp", self.config.file_name));
        if let Err(e) = fs::write(&tmp, json.as_bytes()) {
            let _ = fs::remove_file(&tmp);
            return Err(MemoryError::Io(e));
        }
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(MemoryError::Io(e));
        }

        info!(path = %path.display(), bytes = json.len(), "document saved");
        Ok(())
    }

    /// Snapshot `doc` into the backup directory, then prune old
    /// snapshots down to the retention count.
    ///
    /// Returns the snapshot path, or `None` when the backup could not
    /// be written. All failures here are logged and swallowed.
    pub fn backup(&self, doc: &Document) -> Option<PathBuf> {
        let dir = self.backup_dir();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!(error = %e, "backup directory unavailable");
            return None;
        }
        let json = match serde_json::to_string_pretty(doc) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "backup serialization failed");
                return None;
            }
        };

        let stamp = backup_stamp(&now_iso());
        let mut path = dir.join(format!("memory-{stamp}.json"));
        // Same-millisecond saves disambiguate with a counter suffix.
        let mut n = 1;
        while path.exists() {
            path = dir.join(format!("memory-{stamp}-{n}.json"));
            n += 1;
        }

        if let Err(e) = fs::write(&path, json.as_bytes()) {
            warn!(path = %path.display(), error = %e, "backup write failed");
            return None;
        }
        debug!(path = %path.display(), "backup written");
        self.prune_backups(&dir);
        Some(path)
    }

    /// Delete the oldest backups until at most `backup_retention`
    /// remain. Filenames embed a filename-safe sortable timestamp, so
    /// lexicographic order is chronological order.
    fn prune_backups(&self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "backup prune skipped");
                return;
            }
        };
        let mut names: Vec<String> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with("memory-") && name.ends_with(".json"))
            .collect();
        if names.len() <= self.config.backup_retention {
            return;
        }
        names.sort();
        let excess = names.len() - self.config.backup_retention;
        for name in names.into_iter().take(excess) {
            if let Err(e) = fs::remove_file(dir.join(&name)) {
                warn!(file = %name, error = %e, "stale backup not removed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Document;

    fn store_in(dir: &Path) -> DocumentStore {
        DocumentStore::open(dir)
    }

    #[test]
    fn load_without_store_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        assert!(store.load().expect("load").is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let mut doc = Document::new("첫 소설", "로맨스");
        let created = doc.project.created.clone();
        store.save(&mut doc).expect("save");

        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded.project.name, "첫 소설");
        assert_eq!(loaded.project.created, created);
        // save refreshes updated, never created
        assert!(loaded.project.updated >= created);
    }

    #[test]
    fn corrupt_store_is_reported_not_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        fs::create_dir_all(store.document_path().parent().expect("parent")).expect("mkdir");
        fs::write(store.document_path(), b"{ not json").expect("write");

        let err = store.load().expect_err("corrupt");
        assert!(matches!(err, MemoryError::Corrupt { .. }));
    }

    #[test]
    fn first_save_leaves_no_backup() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.save(&mut Document::new("p", "")).expect("save");
        assert!(!store.backup_dir().exists());
    }

    #[test]
    fn second_save_backs_up_the_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let mut doc = Document::new("p", "");
        store.save(&mut doc).expect("save 1");
        doc.project.genre = "스릴러".into();
        store.save(&mut doc).expect("save 2");

        let backups: Vec<_> = fs::read_dir(store.backup_dir())
            .expect("read backups")
            .filter_map(std::result::Result::ok)
            .collect();
        assert_eq!(backups.len(), 1);

        // the backup holds the pre-mutation state
        let raw = fs::read_to_string(backups[0].path()).expect("read");
        let snapshot: Document = serde_json::from_str(&raw).expect("decode");
        assert_eq!(snapshot.project.genre, "");
    }

    #[test]
    fn retention_keeps_only_newest_backups() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = StoreConfig::default();
        config.backup_retention = 3;
        let store = DocumentStore::with_config(dir.path(), config);

        let mut doc = Document::new("p", "");
        for i in 0..8 {
            doc.project.genre = format!("g{i}");
            store.save(&mut doc).expect("save");
            // keep backup stamps strictly increasing (millisecond grain)
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let mut names: Vec<String> = fs::read_dir(store.backup_dir())
            .expect("read backups")
            .filter_map(std::result::Result::ok)
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 3);

        // the survivors are the newest snapshots: the latest one holds
        // the state just before the final save
        names.sort();
        let raw = fs::read_to_string(store.backup_dir().join(&names[2])).expect("read");
        let snapshot: Document = serde_json::from_str(&raw).expect("decode");
        assert_eq!(snapshot.project.genre, "g6");
    }

    #[test]
    fn no_temp_file_survives_a_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());
        store.save(&mut Document::new("p", "")).expect("save");

        let leftovers: Vec<_> = fs::read_dir(store.document_path().parent().expect("parent"))
            .expect("read dir")
            .filter_map(std::result::Result::ok)
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn failed_rename_leaves_prior_document_intact() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let mut doc = Document::new("p", "");
        store.save(&mut doc).expect("save");

        // Force the rename to fail by replacing the canonical path with
        // a non-empty directory.
        let path = store.document_path();
        let original = fs::read_to_string(&path).expect("read");
        fs::remove_file(&path).expect("rm");
        fs::create_dir(&path).expect("mkdir");
        fs::write(path.join("keep"), b"x").expect("occupy");

        doc.project.genre = "changed".into();
        assert!(store.save(&mut doc).is_err());

        // temp file cleaned up, obstacle untouched
        assert!(path.is_dir());
        fs::remove_file(path.join("keep")).expect("rm keep");
        fs::remove_dir(&path).expect("rmdir");
        fs::write(&path, original.as_bytes()).expect("restore");
        let restored = store.load().expect("load").expect("present");
        assert_eq!(restored.project.genre, "");
    }

    #[test]
    fn backup_failure_does_not_block_save() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = store_in(dir.path());

        let mut doc = Document::new("p", "");
        store.save(&mut doc).expect("save");

        // Occupy the backup dir path with a plain file so snapshots fail.
        fs::write(store.backup_dir(), b"in the way").expect("occupy");

        doc.project.genre = "still saves".into();
        store.save(&mut doc).expect("save despite backup failure");
        let loaded = store.load().expect("load").expect("present");
        assert_eq!(loaded.project.genre, "still saves");
    }
}
