//! Questions and their playable variants.
//!
//! A [`Question`] carries the fields common to every variant and a
//! [`QuestionKind`] holding the variant payload. Partial edits go through
//! [`QuestionUpdate`], whose payload part is itself tagged by variant so an
//! edit can never write fields that do not belong to the question.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::map::{MAX_PIN_SIZE, MIN_PIN_SIZE, MapPayload, MapPin};
use crate::minefield::{MinefieldCell, MinefieldPayload};

/// Time limit assumed for questions without one when estimating durations.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

// =============================================================================
// VARIANT TAG
// =============================================================================

/// Variant tag of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Minefield,
    GuessFusion,
    Map,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [Self::Minefield, Self::GuessFusion, Self::Map];

    /// Tag as written in saved documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minefield => "MINEFIELD",
            Self::GuessFusion => "GUESS_FUSION",
            Self::Map => "MAP",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Minefield => "Minefield",
            Self::GuessFusion => "Guess Fusion",
            Self::Map => "Map",
        }
    }

    /// Parse a saved tag. Unknown tags (including retired variants) yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ty| ty.as_str() == tag)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// QUESTION
// =============================================================================

/// A question owned by one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// Seconds allowed to answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Variant payload of a question, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    Minefield(MinefieldPayload),
    GuessFusion(GuessFusionPayload),
    Map(MapPayload),
}

impl QuestionKind {
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::Minefield(_) => QuestionType::Minefield,
            Self::GuessFusion(_) => QuestionType::GuessFusion,
            Self::Map(_) => QuestionType::Map,
        }
    }
}

/// Payload of a `GUESS_FUSION` question: one fused image, two identities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessFusionPayload {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub answer1: String,
    #[serde(default)]
    pub answer2: String,
}

impl Question {
    pub fn question_type(&self) -> QuestionType {
        self.kind.question_type()
    }

    pub fn minefield(&self) -> Option<&MinefieldPayload> {
        match &self.kind {
            QuestionKind::Minefield(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn minefield_mut(&mut self) -> Option<&mut MinefieldPayload> {
        match &mut self.kind {
            QuestionKind::Minefield(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn guess_fusion(&self) -> Option<&GuessFusionPayload> {
        match &self.kind {
            QuestionKind::GuessFusion(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn map(&self) -> Option<&MapPayload> {
        match &self.kind {
            QuestionKind::Map(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn map_mut(&mut self) -> Option<&mut MapPayload> {
        match &mut self.kind {
            QuestionKind::Map(payload) => Some(payload),
            _ => None,
        }
    }

    /// Time limit used for duration estimates.
    pub fn effective_time_limit(&self) -> u32 {
        self.time_limit.unwrap_or(DEFAULT_TIME_LIMIT_SECS)
    }

    /// Shallow-merge a partial update.
    ///
    /// Fields the update leaves as `None` are preserved. A payload update for
    /// another variant rejects the whole update and leaves the question
    /// untouched.
    pub fn apply(&mut self, update: &QuestionUpdate) -> Result<()> {
        if let Some(payload) = &update.payload {
            match (&mut self.kind, payload) {
                (QuestionKind::Minefield(current), PayloadUpdate::Minefield { grid }) => {
                    if let Some(grid) = grid {
                        current.grid.clone_from(grid);
                    }
                }
                (
                    QuestionKind::GuessFusion(current),
                    PayloadUpdate::GuessFusion {
                        image_url,
                        answer1,
                        answer2,
                    },
                ) => {
                    if let Some(image_url) = image_url {
                        current.image_url.clone_from(image_url);
                    }
                    if let Some(answer1) = answer1 {
                        current.answer1.clone_from(answer1);
                    }
                    if let Some(answer2) = answer2 {
                        current.answer2.clone_from(answer2);
                    }
                }
                (
                    QuestionKind::Map(current),
                    PayloadUpdate::Map {
                        map_image_url,
                        pin_size,
                        pins,
                    },
                ) => {
                    if let Some(map_image_url) = map_image_url {
                        current.map_image_url.clone_from(map_image_url);
                    }
                    if let Some(pin_size) = pin_size {
                        current.pin_size = (*pin_size).clamp(MIN_PIN_SIZE, MAX_PIN_SIZE);
                    }
                    if let Some(pins) = pins {
                        current.pins.clone_from(pins);
                    }
                }
                (kind, payload) => {
                    return Err(ModelError::VariantMismatch {
                        expected: kind.question_type(),
                        found: payload.question_type(),
                    });
                }
            }
        }

        if let Some(text) = &update.text {
            self.text.clone_from(text);
        }
        if let Some(time_limit) = update.time_limit {
            self.time_limit = time_limit;
        }
        Ok(())
    }
}

// =============================================================================
// CREATION
// =============================================================================

/// A question before the store assigns it an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuestion {
    pub text: String,
    pub time_limit: Option<u32>,
    pub kind: QuestionKind,
}

impl NewQuestion {
    /// Blank 20-cell board, as created by the editor's "add minefield" action.
    pub fn minefield() -> Self {
        Self {
            text: "New Minefield".to_string(),
            time_limit: Some(60),
            kind: QuestionKind::Minefield(MinefieldPayload::blank()),
        }
    }

    pub fn guess_fusion() -> Self {
        Self {
            text: "New Guess Fusion".to_string(),
            time_limit: Some(DEFAULT_TIME_LIMIT_SECS),
            kind: QuestionKind::GuessFusion(GuessFusionPayload::default()),
        }
    }

    pub fn map() -> Self {
        Self {
            text: "New Map".to_string(),
            time_limit: None,
            kind: QuestionKind::Map(MapPayload::default()),
        }
    }

    /// Editor template for a variant.
    pub fn template(question_type: QuestionType) -> Self {
        match question_type {
            QuestionType::Minefield => Self::minefield(),
            QuestionType::GuessFusion => Self::guess_fusion(),
            QuestionType::Map => Self::map(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, seconds: Option<u32>) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn into_question(self, id: String) -> Question {
        Question {
            id,
            text: self.text,
            time_limit: self.time_limit,
            kind: self.kind,
        }
    }
}

// =============================================================================
// PARTIAL UPDATES
// =============================================================================

/// Partial update of a question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionUpdate {
    pub text: Option<String>,
    /// `Some(None)` removes the time limit.
    pub time_limit: Option<Option<u32>>,
    pub payload: Option<PayloadUpdate>,
}

impl QuestionUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn payload(payload: PayloadUpdate) -> Self {
        Self {
            payload: Some(payload),
            ..Self::default()
        }
    }
}

/// Variant-specific part of a [`QuestionUpdate`].
#[derive(Debug, Clone, PartialEq)]
pub enum PayloadUpdate {
    Minefield {
        grid: Option<Vec<MinefieldCell>>,
    },
    GuessFusion {
        image_url: Option<String>,
        answer1: Option<String>,
        answer2: Option<String>,
    },
    Map {
        map_image_url: Option<String>,
        pin_size: Option<u32>,
        pins: Option<Vec<MapPin>>,
    },
}

impl PayloadUpdate {
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::Minefield { .. } => QuestionType::Minefield,
            Self::GuessFusion { .. } => QuestionType::GuessFusion,
            Self::Map { .. } => QuestionType::Map,
        }
    }
}
