//! # writer-memory core
//!
//! Persistent structured memory for narrative writing. One JSON
//! [`Document`] per project holds characters, relationships, scenes
//! with ordered cuts, themes, a world model and a derived synopsis.
//!
//! The surrounding tool is invoked once per operation by short-lived,
//! stateless processes, so every public operation is a complete
//! load-mutate-save (or load-query) cycle:
//!
//! - [`persistence::DocumentStore`] loads and saves the whole document,
//!   with a scoped temp-file write plus atomic rename and automatic
//!   timestamped backups of the prior state.
//! - [`store::WriterMemory`] owns that bracket; the subsystems
//!   ([`character`], [`relationship`], [`scene`], [`search`],
//!   [`synopsis`]) are pure functions over a loaded document.
//! - [`validate`] checks structural and referential soundness on
//!   demand; cross-entity links are soft references, so a document may
//!   transiently hold danglers between edits.
//!
//! ## Example
//!
//! ```no_run
//! use writer_memory_core::{WriterMemory, character::CharacterDraft};
//!
//! let memory = WriterMemory::open("my-novel");
//! memory.init("목요일의 아이", "로맨스")?;
//! memory.mutate(|doc| {
//!     writer_memory_core::character::add(doc, CharacterDraft {
//!         name: "서연".into(),
//!         ..CharacterDraft::default()
//!     }).map(|c| c.id.clone())
//! })?;
//! # Ok::<(), writer_memory_core::MemoryError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod character;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod model;
pub mod persistence;
pub mod relationship;
pub mod scene;
pub mod search;
pub mod store;
pub mod synopsis;
pub mod theme;
pub mod types;
pub mod validate;
pub mod world;

pub use config::StoreConfig;
pub use error::MemoryError;
pub use model::Document;
pub use persistence::DocumentStore;
pub use store::WriterMemory;
pub use validate::{ValidationReport, validate};
