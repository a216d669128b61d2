//! Blob store backends.
//!
//! The application state is saved as a single blob under one namespace key.
//! This module defines the [`BlobStore`] seam and its implementations:
//! - [`FileBlobStore`]: one JSON file per namespace, written atomically
//! - [`MemoryBlobStore`]: a shared in-memory slot

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::Result;

/// Key-value storage for the state blob.
pub trait BlobStore {
    /// Read the stored blob. `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored blob.
    fn save(&self, blob: &str) -> Result<()>;

    /// Human readable location, for logs.
    fn describe(&self) -> String;
}

impl<T: BlobStore + ?Sized> BlobStore for Box<T> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, blob: &str) -> Result<()> {
        (**self).save(blob)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
