//! File-backed blob store.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::BlobStore;
use crate::error::{PersistenceError, Result};

/// Stores the blob as `<dir>/<namespace>.json`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    path: PathBuf,
}

impl FileBlobStore {
    /// Store for `namespace` inside `dir`.
    pub fn new(dir: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            path: dir.as_ref().join(format!("{namespace}.json")),
        }
    }

    /// Store at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => {
                tracing::info!("Loaded state from {}", self.path.display());
                Ok(Some(blob))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!("No saved state at {}", self.path.display());
                Ok(None)
            }
            Err(e) => Err(PersistenceError::Io {
                operation: "read",
                path: self.path.clone(),
                source: e,
            }),
        }
    }

    /// Uses atomic write (temp file + rename) to prevent data corruption
    /// on crash or power loss.
    fn save(&self, blob: &str) -> Result<()> {
        let path = self.path.as_path();
        let temp_path = path.with_extension("json.tmp");

        // Create parent directory if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PersistenceError::Io {
                operation: "create directory",
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(blob.as_bytes())
            .map_err(|e| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| PersistenceError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!(bytes = blob.len(), "Saved state to {}", path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path(), "quiz-storage");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_creates_directories_and_replaces_content() {
        let dir = tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("nested/data"), "quiz-storage");

        store.save("{\"a\":1}").unwrap();
        store.save("{\"a\":2}").unwrap();

        assert_eq!(store.load().unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(store.path().ends_with("nested/data/quiz-storage.json"));
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn unreadable_path_is_an_io_error() {
        let dir = tempdir().unwrap();
        // A directory where the file should be.
        let store = FileBlobStore::at(dir.path());
        assert!(matches!(
            store.load(),
            Err(PersistenceError::Io {
                operation: "read",
                ..
            })
        ));
    }
}
