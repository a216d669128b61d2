//! Error types for content and session operations.
//!
//! Lookups that miss are reported as values rather than panics. Callers that
//! only care about "did anything change" can discard them; the state is left
//! untouched either way.

use quizshow_model::QuestionType;
use thiserror::Error;

/// Content store operation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Quiz '{quiz_id}' not found")]
    QuizNotFound { quiz_id: String },

    #[error("Section '{section_id}' not found in quiz '{quiz_id}'")]
    SectionNotFound { quiz_id: String, section_id: String },

    #[error("Question '{question_id}' not found in section '{section_id}'")]
    QuestionNotFound {
        section_id: String,
        question_id: String,
    },

    #[error("Question '{question_id}' has no cell at position {index}")]
    CellNotFound { question_id: String, index: usize },

    #[error("Pin '{pin_id}' not found on question '{question_id}'")]
    PinNotFound { question_id: String, pin_id: String },

    /// An edit addressed fields of a variant the question does not have.
    #[error("Question '{question_id}' is a {found} question, not {expected}")]
    VariantMismatch {
        question_id: String,
        expected: QuestionType,
        found: QuestionType,
    },
}

impl StoreError {
    /// Whether this error is one of the "not found" kinds.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, Self::VariantMismatch { .. })
    }
}

/// Session operation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("No game session is active")]
    NoActiveSession,

    #[error("Player '{player_id}' is not part of the session")]
    PlayerNotFound { player_id: String },

    /// Starting a session while one is live, with the reject policy set.
    #[error("Session '{session_id}' is still in progress")]
    SessionInProgress { session_id: String },

    #[error("Quiz '{quiz_id}' not found")]
    QuizNotFound { quiz_id: String },

    #[error("Section '{section_id}' not found in the session's quiz")]
    SectionNotFound { section_id: String },
}

impl SessionError {
    /// Hint shown to the host alongside the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::NoActiveSession => Some("Start a session first."),
            Self::SessionInProgress { .. } => {
                Some("End the current session, or set the overwrite policy to \"replace\".")
            }
            Self::QuizNotFound { .. } => {
                Some("The quiz may have been deleted. End the session and start a new one.")
            }
            Self::PlayerNotFound { .. } | Self::SectionNotFound { .. } => None,
        }
    }
}

/// Result type for content store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result type for session operations.
pub type SessionResult<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_is_not_a_lookup_miss() {
        let err = StoreError::VariantMismatch {
            question_id: "q".to_string(),
            expected: QuestionType::Map,
            found: QuestionType::Minefield,
        };
        assert!(!err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Question 'q' is a MINEFIELD question, not MAP"
        );
        assert!(
            StoreError::QuizNotFound {
                quiz_id: "x".to_string()
            }
            .is_not_found()
        );
    }
}
