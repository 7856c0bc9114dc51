//! Store layout configuration, loadable from TOML.
//!
//! Defaults reproduce the canonical on-disk layout
//! (`.writer-memory/memory.json` plus a `backups/` directory holding at
//! most 20 snapshots). External callers normally never touch this;
//! tests and embedders can relocate or retune the store.

use serde::{Deserialize, Serialize};

/// On-disk layout and retention settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store directory created under the project root.
    #[serde(default = "default_dir_name")]
    pub dir_name: String,
    /// Canonical document filename inside the store directory.
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Backup subdirectory name inside the store directory.
    #[serde(default = "default_backup_dir")]
    pub backup_dir: String,
    /// How many backup snapshots to keep; older ones are pruned.
    #[serde(default = "default_retention")]
    pub backup_retention: usize,
    /// Pretty-print the stored JSON.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir_name: default_dir_name(),
            file_name: default_file_name(),
            backup_dir: default_backup_dir(),
            backup_retention: default_retention(),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    /// Returns [`crate::MemoryError::Config`] if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::MemoryError::Config(e.to_string()))
    }

    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

fn default_dir_name() -> String {
    ".writer-memory".to_string()
}

fn default_file_name() -> String {
    "memory.json".to_string()
}

fn default_backup_dir() -> String {
    "backups".to_string()
}

fn default_retention() -> usize {
    20
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_canonical_layout() {
        let config = StoreConfig::default();
        assert_eq!(config.dir_name, ".writer-memory");
        assert_eq!(config.file_name, "memory.json");
        assert_eq!(config.backup_dir, "backups");
        assert_eq!(config.backup_retention, 20);
        assert!(config.pretty);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = StoreConfig::from_toml("backup_retention = 5").expect("parse");
        assert_eq!(config.backup_retention, 5);
        assert_eq!(config.file_name, "memory.json");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = StoreConfig::from_toml("backup_retention = \"many\"");
        assert!(err.is_err());
    }
}
