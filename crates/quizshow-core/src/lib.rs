//! Quiz show runtime: authored content, the live session, and play navigation.
//!
//! - [`ContentStore`]: CRUD over quizzes, sections, questions, cells and pins
//! - [`SessionManager`]: the single live session and its scores
//! - [`PlayNavigator`]: position and reveal state while playing a section
//! - [`AppState`]: ties the above to a [`BlobStore`](quizshow_persistence::BlobStore)
//!   and saves after every change
//!
//! # Example
//!
//! ```ignore
//! use quizshow_core::{AppState, OverwritePolicy};
//! use quizshow_model::{NewQuestion, NewQuiz, Player};
//! use quizshow_persistence::MemoryBlobStore;
//!
//! let mut app = AppState::open(MemoryBlobStore::new(), OverwritePolicy::Replace)?;
//! let quiz = app.edit(|store| store.add_quiz(NewQuiz::new("Trivia Night", "")));
//! let round = app.edit(|store| store.add_section(&quiz, "Round 1"))?;
//! app.edit(|store| store.add_question(&quiz, &round, NewQuestion::minefield()))?;
//!
//! app.start_session(&quiz, vec![Player::new("p1", "Alice")])?;
//! let mut nav = app.play_section(&round)?;
//! nav.toggle_reveal();
//! app.update_player_score("p1", 10)?;
//! ```

mod app;
mod error;
mod navigator;
mod session;
mod store;

pub use app::AppState;
pub use error::{SessionError, SessionResult, StoreError, StoreResult};
pub use navigator::{CellView, PinView, PlayNavigator, RevealBoard, RevealView};
pub use session::{OverwritePolicy, SessionManager};
pub use store::ContentStore;
