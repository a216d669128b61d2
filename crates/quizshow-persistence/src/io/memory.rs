//! In-memory blob store.

use std::sync::{Arc, Mutex, PoisonError};

use super::BlobStore;
use crate::error::Result;

/// A blob slot shared between clones.
///
/// Cloning yields a handle onto the same slot, so a caller can keep one
/// handle to inspect what an application state saved through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with `blob`.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(blob.into()))),
        }
    }

    /// Current contents of the slot.
    pub fn contents(&self) -> Option<String> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.contents())
    }

    fn save(&self, blob: &str) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(blob.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
