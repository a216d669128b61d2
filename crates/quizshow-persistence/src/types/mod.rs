//! Persistence types for state serialization.

mod state;

pub use state::PersistedState;

/// Current schema version.
///
/// Increment this when making breaking changes to the saved layout and add
/// the matching step to the migration chain. The loader rejects blobs with
/// version > CURRENT_SCHEMA_VERSION.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Namespace key the state blob is stored under.
pub const STORAGE_KEY: &str = "quiz-storage";
