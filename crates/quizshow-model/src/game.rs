//! Live game types: players and the session they play in.

use serde::{Deserialize, Serialize};

use crate::clock::{Timestamp, advance, now_millis};
use crate::ids::{generate_id, generate_unique_id};

/// A contestant. Players only exist inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub score: i64,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
        }
    }
}

/// The single live play-through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub session_id: String,
    /// Lookup-only reference into the content store. May dangle.
    pub quiz_id: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub active_section_id: Option<String>,
    pub start_time: Timestamp,
    pub last_active: Timestamp,
}

impl GameSession {
    pub fn new(quiz_id: impl Into<String>, players: Vec<Player>) -> Self {
        let now = now_millis();
        Self {
            session_id: generate_id(),
            quiz_id: quiz_id.into(),
            players,
            active_section_id: None,
            start_time: now,
            last_active: now,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn touch(&mut self) {
        self.last_active = advance(self.last_active);
    }

    pub fn apply(&mut self, update: &SessionUpdate) {
        if let Some(quiz_id) = &update.quiz_id {
            self.quiz_id.clone_from(quiz_id);
        }
        if let Some(section) = &update.active_section_id {
            self.active_section_id.clone_from(section);
        }
    }

    /// Players ordered by score, highest first. Ties keep roster order.
    pub fn ranking(&self) -> Vec<&Player> {
        let mut ranked: Vec<&Player> = self.players.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

/// Partial update of the live session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub quiz_id: Option<String>,
    /// `Some(None)` returns to the hub (no section being played).
    pub active_section_id: Option<Option<String>>,
}

impl SessionUpdate {
    pub fn active_section(section_id: Option<String>) -> Self {
        Self {
            active_section_id: Some(section_id),
            ..Self::default()
        }
    }
}

/// Roster being assembled before a session starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerRoster {
    players: Vec<Player>,
}

impl PlayerRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a player with score 0. Names are trimmed; blank names are ignored.
    ///
    /// Returns the new player's id.
    pub fn add(&mut self, name: &str) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let id = generate_unique_id(|candidate| self.players.iter().any(|p| p.id == candidate));
        self.players.push(Player::new(id.clone(), name));
        Some(id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.players.len();
        self.players.retain(|player| player.id != id);
        self.players.len() != before
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}
