use thiserror::Error;

use crate::question::QuestionType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A payload update was addressed to a question of another variant.
    #[error("cannot apply {found} fields to a {expected} question")]
    VariantMismatch {
        expected: QuestionType,
        found: QuestionType,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
