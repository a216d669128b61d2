//! Data model for the quiz show studio.
//!
//! This crate holds the plain data types shared by the content store, the
//! session manager and the persistence layer:
//!
//! - [`quiz`]: `Quiz` and `Section`, plus their creation/update payloads
//! - [`question`]: the `Question` sum type over the playable variants
//! - [`minefield`] / [`map`]: variant-specific sub-entities (cells and pins)
//! - [`game`]: players and the live `GameSession`
//! - [`ids`] / [`clock`]: identity generation and millisecond timestamps
//!
//! The types carry no behaviour beyond construction helpers and the
//! variant-aware merge used when applying partial updates.
//!
//! # Serialized form
//!
//! All types serialize with camelCase field names and the question variant
//! tag in a `type` field (`MINEFIELD`, `GUESS_FUSION`, `MAP`), matching the
//! layout written by earlier releases of the application.

pub mod clock;
pub mod error;
pub mod game;
pub mod ids;
pub mod map;
pub mod minefield;
pub mod question;
pub mod quiz;

pub use clock::{Timestamp, advance, now_millis};
pub use error::{ModelError, Result};
pub use game::{GameSession, Player, PlayerRoster, SessionUpdate};
pub use ids::{ID_LENGTH, generate_id, generate_unique_id};
pub use map::{DEFAULT_PIN_SIZE, MAX_PIN_SIZE, MIN_PIN_SIZE, MapPin, MapPayload, PinUpdate};
pub use minefield::{
    CellUpdate, GRID_COLUMNS, GRID_ROWS, GRID_SIZE, HiddenKind, MinefieldCell, MinefieldPayload,
};
pub use question::{
    DEFAULT_TIME_LIMIT_SECS, GuessFusionPayload, NewQuestion, PayloadUpdate, Question,
    QuestionKind, QuestionType, QuestionUpdate,
};
pub use quiz::{NewQuiz, Quiz, QuizUpdate, Section};
