//! Persistent storage for quiz show state.
//!
//! Content (quizzes) and the live session are saved together as one JSON
//! blob under a fixed namespace key. The blob is read once at startup and
//! rewritten after every mutation.
//!
//! # Features
//!
//! - **Pluggable backends** via the [`BlobStore`] trait (file, in-memory)
//! - **Atomic writes** for the file backend (temp file + rename)
//! - **Schema migrations** applied once on load
//! - **Dirty tracking** so failed saves are retried on the next flush
//!
//! # Blob Format
//!
//! ```text
//! {
//!   "state": {
//!     "quizzes": [ ... ],
//!     "activeQuizId": "abc1234" | null,
//!     "activeSession": { ... } | null
//!   },
//!   "version": 1
//! }
//! ```
//!
//! Blobs written before versioning (version `0`) may keep questions in a flat
//! `questions` list on each quiz and may contain retired question variants;
//! [`decode_state`] upgrades them to the current shape.
//!
//! # Example
//!
//! ```ignore
//! use quizshow_persistence::{BlobStore, FileBlobStore, PersistedState, decode_state, encode_state};
//!
//! let store = FileBlobStore::new("/path/to/data", "quiz-storage");
//! let state = match store.load()? {
//!     Some(blob) => decode_state(&blob)?,
//!     None => PersistedState::default(),
//! };
//! store.save(&encode_state(&state)?)?;
//! ```

mod codec;
mod error;
mod io;
mod migrate;
mod tracker;
mod types;

pub use codec::{decode_state, decode_state_with_report, encode_state};
pub use error::{PersistenceError, Result};
pub use io::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use migrate::{LEGACY_SECTION_TITLE, MigrationReport, upgrade};
pub use tracker::DirtyTracker;
pub use types::{CURRENT_SCHEMA_VERSION, PersistedState, STORAGE_KEY};
