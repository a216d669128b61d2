//! Persistence error types.
//!
//! All persistence operations return structured errors that provide
//! user-friendly messages and optional remediation hints.

use std::path::PathBuf;
use thiserror::Error;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// File I/O error.
    #[error("Failed to {operation} file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blob is not JSON, or not a state document.
    #[error("Invalid saved state: {reason}")]
    InvalidFormat { reason: String },

    /// Unsupported schema version.
    #[error("Saved state version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion { found: u32, max_supported: u32 },

    /// A migration step could not upgrade the saved state.
    #[error("Failed to migrate saved state from version {from_version}: {reason}")]
    Migration { from_version: u32, reason: String },

    /// Serialization error.
    #[error("Failed to serialize state")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization error.
    #[error("Failed to deserialize state")]
    Deserialization {
        #[source]
        source: serde_json::Error,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete save operation")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PersistenceError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                operation, path, ..
            } => {
                format!("Could not {} the file at {}", operation, path.display())
            }
            Self::InvalidFormat { reason } => {
                format!("The saved quizzes could not be read: {reason}")
            }
            Self::UnsupportedVersion {
                found,
                max_supported,
            } => {
                format!(
                    "The saved quizzes were written by a newer version of the application \
                    (data version {found}, this version supports up to {max_supported}). \
                    Please update the application."
                )
            }
            Self::Migration { from_version, .. } => {
                format!("The saved quizzes (version {from_version}) could not be upgraded.")
            }
            Self::Serialization { .. } => "An error occurred while saving the quizzes.".to_string(),
            Self::Deserialization { .. } => {
                "An error occurred while reading the saved quizzes. The data may be corrupted."
                    .to_string()
            }
            Self::AtomicWriteFailed { target_path, .. } => {
                format!(
                    "Could not save the file to {}. Please check disk space and permissions.",
                    target_path.display()
                )
            }
        }
    }

    /// Get a suggestion for how to resolve this error.
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::Io { operation, .. } => {
                if *operation == "read" {
                    Some("Check that the data file exists and you have permission to read it.".into())
                } else {
                    Some("Check that you have permission to write to the data directory.".into())
                }
            }
            Self::InvalidFormat { .. } | Self::Deserialization { .. } => {
                Some("Restore a backup of the data file, or move it aside to start fresh.".into())
            }
            Self::UnsupportedVersion { .. } => {
                Some("Install the latest release of the application.".into())
            }
            Self::Migration { .. } => {
                Some("Keep a copy of the data file and report the problem.".into())
            }
            Self::Serialization { .. } => None,
            Self::AtomicWriteFailed { .. } => {
                Some("Free up disk space or choose a different data directory.".into())
            }
        }
    }
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_write_io_errors_suggest_differently() {
        let read = PersistenceError::Io {
            operation: "read",
            path: PathBuf::from("/data/quiz-storage.json"),
            source: std::io::Error::other("denied"),
        };
        let write = PersistenceError::Io {
            operation: "write",
            path: PathBuf::from("/data/quiz-storage.json"),
            source: std::io::Error::other("denied"),
        };
        assert!(read.user_message().contains("/data/quiz-storage.json"));
        assert_ne!(read.suggestion(), write.suggestion());
    }

    #[test]
    fn unsupported_version_mentions_both_versions() {
        let err = PersistenceError::UnsupportedVersion {
            found: 7,
            max_supported: 1,
        };
        let message = err.user_message();
        assert!(message.contains('7'));
        assert!(message.contains('1'));
        assert!(err.suggestion().is_some());
    }
}
