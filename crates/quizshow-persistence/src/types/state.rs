//! Root state document.

use serde::{Deserialize, Serialize};

use quizshow_model::{GameSession, Quiz};

/// Everything that survives a restart: authored content plus the live session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub quizzes: Vec<Quiz>,

    /// Quiz currently open in the editor.
    #[serde(default)]
    pub active_quiz_id: Option<String>,

    /// Live game, if one was running when the state was saved.
    #[serde(default)]
    pub active_session: Option<GameSession>,
}
