//! Error types for the writer-memory core.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all store operations.
///
/// Absence of the store file is deliberately NOT an error: first use
/// starts from an empty store, so loads report it as `Ok(None)`.
/// Likewise, an operation whose target entity does not resolve degrades
/// to a `None`/`false` return at the subsystem layer instead of raising.
#[derive(Error, Debug)]
pub enum MemoryError {
    /// The store file exists but is unparsable or structurally wrong.
    /// Callers treat this as "no usable memory", never as a crash.
    #[error("corrupt store at {}: {detail}", .path.display())]
    Corrupt {
        /// Path of the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        detail: String,
    },

    /// JSON encoding failure while preparing a save or backup.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration parse failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure (write, rename, directory creation).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, MemoryError>;
