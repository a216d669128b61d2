//! Live game session lifecycle and scoring.

use serde::{Deserialize, Serialize};

use quizshow_model::{GameSession, Player, SessionUpdate};

use crate::error::{SessionError, SessionResult};

/// What `start_session` does when a session is already live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Discard the live session and its scores.
    #[default]
    Replace,
    /// Refuse with [`SessionError::SessionInProgress`].
    Reject,
}

impl OverwritePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Reject => "reject",
        }
    }
}

/// Owner of the single live session.
///
/// The quiz reference is not validated here; see
/// [`AppState::start_session`](crate::AppState::start_session).
#[derive(Debug, Clone, Default)]
pub struct SessionManager {
    session: Option<GameSession>,
    policy: OverwritePolicy,
}

impl SessionManager {
    pub fn new(policy: OverwritePolicy) -> Self {
        Self {
            session: None,
            policy,
        }
    }

    /// Resume a saved session.
    pub fn with_session(session: Option<GameSession>, policy: OverwritePolicy) -> Self {
        Self { session, policy }
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn policy(&self) -> OverwritePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: OverwritePolicy) {
        self.policy = policy;
    }

    /// Begin a session for `quiz_id` with the roster as given.
    ///
    /// No section is active and both timestamps are set to now.
    pub fn start_session(
        &mut self,
        quiz_id: &str,
        players: Vec<Player>,
    ) -> SessionResult<&GameSession> {
        if let Some(live) = &self.session {
            match self.policy {
                OverwritePolicy::Reject => {
                    return Err(SessionError::SessionInProgress {
                        session_id: live.session_id.clone(),
                    });
                }
                OverwritePolicy::Replace => {
                    tracing::info!(
                        session_id = %live.session_id,
                        "Replacing live session; its scores are discarded"
                    );
                }
            }
        }

        let session = GameSession::new(quiz_id, players);
        tracing::info!(
            session_id = %session.session_id,
            quiz_id,
            players = session.players.len(),
            "Started session"
        );
        Ok(&*self.session.insert(session))
    }

    /// Merge quiz id / active section into the live session.
    pub fn update_session(&mut self, update: &SessionUpdate) -> SessionResult<()> {
        let session = self.live_mut()?;
        session.apply(update);
        session.touch();
        Ok(())
    }

    /// Add `delta` to a player's score. Returns the new score.
    ///
    /// Scores saturate at the `i64` bounds.
    pub fn update_player_score(&mut self, player_id: &str, delta: i64) -> SessionResult<i64> {
        let session = self.live_mut()?;
        let player = session
            .player_mut(player_id)
            .ok_or_else(|| SessionError::PlayerNotFound {
                player_id: player_id.to_string(),
            })
            .inspect_err(|err| tracing::debug!(error = %err, "Score update skipped"))?;
        player.score = player.score.saturating_add(delta);
        let score = player.score;
        session.touch();
        Ok(score)
    }

    /// Clear the live session. Returns it, or `None` when nothing was active.
    pub fn end_session(&mut self) -> Option<GameSession> {
        let ended = self.session.take();
        if let Some(session) = &ended {
            tracing::info!(session_id = %session.session_id, "Ended session");
        }
        ended
    }

    /// Players ranked by score, highest first; empty without a session.
    pub fn scoreboard(&self) -> Vec<&Player> {
        self.session
            .as_ref()
            .map(GameSession::ranking)
            .unwrap_or_default()
    }

    fn live_mut(&mut self) -> SessionResult<&mut GameSession> {
        self.session.as_mut().ok_or_else(|| {
            tracing::debug!("No active session");
            SessionError::NoActiveSession
        })
    }
}
