//! Application state: content, live session, and the backend they persist to.

use std::sync::Arc;

use quizshow_model::{GameSession, Player, Question, Quiz, Section, SessionUpdate};
use quizshow_persistence::{
    BlobStore, DirtyTracker, MigrationReport, PersistedState, PersistenceError,
    decode_state_with_report, encode_state,
};

use crate::error::{SessionError, SessionResult};
use crate::navigator::PlayNavigator;
use crate::session::{OverwritePolicy, SessionManager};
use crate::store::ContentStore;

/// Root of all runtime state.
///
/// Constructed once with [`AppState::open`] and passed to whatever drives it.
/// Every mutation is applied in memory first and then written to the
/// backend as a single blob. A failed write is logged and retried on the
/// next mutation or [`flush`](Self::flush); the in-memory state stays
/// authoritative.
pub struct AppState<B: BlobStore> {
    backend: B,
    store: ContentStore,
    sessions: SessionManager,
    tracker: DirtyTracker,
}

impl<B: BlobStore> AppState<B> {
    /// Load saved state from `backend`, or start empty when none exists.
    ///
    /// A blob in an older layout is written back in the current one right
    /// away, so ids created by the upgrade stay stable across opens.
    pub fn open(backend: B, policy: OverwritePolicy) -> Result<Self, PersistenceError> {
        let (state, report) = match backend.load()? {
            Some(blob) => decode_state_with_report(&blob)?,
            None => (PersistedState::default(), MigrationReport::default()),
        };
        tracing::info!(
            location = %backend.describe(),
            quizzes = state.quizzes.len(),
            session = state.active_session.is_some(),
            "Opened quiz storage"
        );

        let mut app = Self {
            backend,
            store: ContentStore::from_parts(state.quizzes, state.active_quiz_id),
            sessions: SessionManager::with_session(state.active_session, policy),
            tracker: DirtyTracker::new(),
        };
        if report.upgraded() {
            app.persist();
        }
        Ok(app)
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.sessions.session()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Whether some change has not reached the backend yet.
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    // =========================================================================
    // CONTENT
    // =========================================================================

    /// Run an edit against the content store, persisting if it changed
    /// anything.
    ///
    /// ```ignore
    /// let quiz = app.edit(|store| store.add_quiz(NewQuiz::default()));
    /// app.edit(|store| store.add_section(&quiz, "Round 1"))?;
    /// ```
    pub fn edit<T>(&mut self, edit: impl FnOnce(&mut ContentStore) -> T) -> T {
        let before = self.store.snapshot();
        let active_before = self.store.active_quiz_id().map(str::to_owned);

        let output = edit(&mut self.store);

        let changed = !Arc::ptr_eq(&before, &self.store.snapshot())
            || active_before.as_deref() != self.store.active_quiz_id();
        if changed {
            self.persist();
        }
        output
    }

    // =========================================================================
    // SESSION
    // =========================================================================

    /// Start a session for an existing quiz.
    pub fn start_session(&mut self, quiz_id: &str, players: Vec<Player>) -> SessionResult<String> {
        if self.store.quiz(quiz_id).is_none() {
            tracing::debug!(quiz_id, "Refusing session for unknown quiz");
            return Err(SessionError::QuizNotFound {
                quiz_id: quiz_id.to_string(),
            });
        }
        let session_id = self
            .sessions
            .start_session(quiz_id, players)?
            .session_id
            .clone();
        self.persist();
        Ok(session_id)
    }

    pub fn update_session(&mut self, update: &SessionUpdate) -> SessionResult<()> {
        self.sessions.update_session(update)?;
        self.persist();
        Ok(())
    }

    pub fn update_player_score(&mut self, player_id: &str, delta: i64) -> SessionResult<i64> {
        let score = self.sessions.update_player_score(player_id, delta)?;
        self.persist();
        Ok(score)
    }

    /// End the live session. No-op (and no write) when nothing is active.
    pub fn end_session(&mut self) -> Option<GameSession> {
        let ended = self.sessions.end_session();
        if ended.is_some() {
            self.persist();
        }
        ended
    }

    /// The quiz the live session plays, if both still exist.
    pub fn session_quiz(&self) -> Option<&Quiz> {
        self.store.quiz(&self.sessions.session()?.quiz_id)
    }

    /// A session is dangling when its quiz was deleted after it started.
    pub fn is_session_dangling(&self) -> bool {
        self.sessions.is_active() && self.session_quiz().is_none()
    }

    /// The section being played, if any.
    pub fn active_section(&self) -> Option<&Section> {
        let section_id = self.sessions.session()?.active_section_id.as_deref()?;
        self.session_quiz()?.section(section_id)
    }

    /// Questions of the section being played; empty when none is.
    pub fn active_questions(&self) -> &[Question] {
        self.active_section()
            .map(|section| section.questions.as_slice())
            .unwrap_or_default()
    }

    /// Enter a section of the session's quiz and get a navigator for it.
    pub fn play_section(&mut self, section_id: &str) -> SessionResult<PlayNavigator> {
        let session = self.sessions.session().ok_or(SessionError::NoActiveSession)?;
        let quiz = self
            .store
            .quiz(&session.quiz_id)
            .ok_or_else(|| SessionError::QuizNotFound {
                quiz_id: session.quiz_id.clone(),
            })?;
        let section = quiz
            .section(section_id)
            .ok_or_else(|| SessionError::SectionNotFound {
                section_id: section_id.to_string(),
            })?;
        let mut navigator = PlayNavigator::new(section.questions.len());
        navigator.resync(&section.questions);

        self.update_session(&SessionUpdate::active_section(Some(section_id.to_string())))?;
        tracing::info!(section_id, questions = navigator.len(), "Playing section");
        Ok(navigator)
    }

    /// Return to the section hub.
    pub fn leave_section(&mut self) -> SessionResult<()> {
        self.update_session(&SessionUpdate::active_section(None))
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    /// Copy of everything that gets saved.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            quizzes: self.store.quizzes().to_vec(),
            active_quiz_id: self.store.active_quiz_id().map(str::to_owned),
            active_session: self.sessions.session().cloned(),
        }
    }

    /// Write any unsaved state, reporting failure to the caller.
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if !self.tracker.is_dirty() {
            return Ok(());
        }
        self.save()
    }

    /// Flush and release the backend.
    pub fn close(mut self) -> Result<B, PersistenceError> {
        self.flush()?;
        Ok(self.backend)
    }

    fn persist(&mut self) {
        self.tracker.mark_dirty();
        if let Err(err) = self.save() {
            tracing::warn!(
                error = %err,
                pending = self.tracker.pending_changes(),
                failures = self.tracker.consecutive_failures(),
                unsaved_ms = self.tracker.ms_since_first_unsaved().unwrap_or_default(),
                "Failed to save state; keeping changes in memory"
            );
        }
    }

    fn save(&mut self) -> Result<(), PersistenceError> {
        let result = encode_state(&self.persisted_state()).and_then(|blob| self.backend.save(&blob));
        match &result {
            Ok(()) => self.tracker.save_complete(),
            Err(_) => self.tracker.save_failed(),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizshow_model::{NewQuestion, NewQuiz};
    use quizshow_persistence::MemoryBlobStore;
    use std::cell::Cell;

    /// Backend whose writes fail until switched on.
    struct Flaky {
        inner: MemoryBlobStore,
        failing: Cell<bool>,
    }

    impl BlobStore for Flaky {
        fn load(&self) -> quizshow_persistence::Result<Option<String>> {
            self.inner.load()
        }

        fn save(&self, blob: &str) -> quizshow_persistence::Result<()> {
            if self.failing.get() {
                return Err(PersistenceError::InvalidFormat {
                    reason: "disk unavailable".to_string(),
                });
            }
            self.inner.save(blob)
        }

        fn describe(&self) -> String {
            "flaky".to_string()
        }
    }

    fn open() -> (AppState<MemoryBlobStore>, MemoryBlobStore) {
        let backend = MemoryBlobStore::new();
        let app = AppState::open(backend.clone(), OverwritePolicy::default()).unwrap();
        (app, backend)
    }

    #[test]
    fn empty_backend_opens_empty() {
        let (app, backend) = open();
        assert!(app.store().quizzes().is_empty());
        assert!(app.session().is_none());
        assert!(backend.contents().is_none());
    }

    #[test]
    fn edits_reach_the_backend() {
        let (mut app, backend) = open();
        let quiz = app.edit(|store| store.add_quiz(NewQuiz::new("Trivia Night", "")));
        assert!(backend.contents().unwrap().contains("Trivia Night"));

        app.edit(|store| store.add_section(&quiz, "Round 1")).unwrap();
        let reopened = AppState::open(backend.clone(), OverwritePolicy::default()).unwrap();
        assert_eq!(reopened.store().quiz(&quiz).unwrap().sections.len(), 1);
    }

    #[test]
    fn legacy_blob_is_rewritten_once_on_open() {
        let legacy = r#"{"state": {"quizzes": [{
            "id": "old0001", "title": "Old", "createdAt": 1, "updatedAt": 2,
            "questions": [{"id": "m1", "type": "MAP", "text": "Where?"}]
        }]}, "version": 0}"#;
        let backend = MemoryBlobStore::with_blob(legacy);

        let first = AppState::open(backend.clone(), OverwritePolicy::default()).unwrap();
        let section = first.store().quizzes()[0].sections[0].id.clone();
        assert!(!first.is_dirty());
        first.close().unwrap();

        let stored: serde_json::Value =
            serde_json::from_str(&backend.contents().unwrap()).unwrap();
        assert_eq!(stored["version"], quizshow_persistence::CURRENT_SCHEMA_VERSION);

        let second = AppState::open(backend.clone(), OverwritePolicy::default()).unwrap();
        assert_eq!(second.store().quizzes()[0].sections[0].id, section);
    }

    #[test]
    fn current_blob_is_not_rewritten_on_open() {
        let (mut app, backend) = open();
        app.edit(|store| store.add_quiz(NewQuiz::default()));
        let saved = backend.contents().unwrap();

        let reopened = AppState::open(backend.clone(), OverwritePolicy::default()).unwrap();
        assert!(!reopened.is_dirty());
        assert_eq!(backend.contents().unwrap(), saved);
    }

    #[test]
    fn missed_edits_do_not_write() {
        let (mut app, backend) = open();
        assert!(app.edit(|store| store.delete_quiz("nope")).is_err());
        assert!(backend.contents().is_none());
        assert!(!app.is_dirty());
    }

    #[test]
    fn editor_pointer_changes_are_saved() {
        let (mut app, backend) = open();
        let quiz = app.edit(|store| store.add_quiz(NewQuiz::default()));
        app.edit(|store| store.set_active_quiz(Some(quiz.clone())));

        let saved = quizshow_persistence::decode_state(&backend.contents().unwrap()).unwrap();
        assert_eq!(saved.active_quiz_id, Some(quiz));
    }

    #[test]
    fn session_requires_existing_quiz() {
        let (mut app, _backend) = open();
        assert_eq!(
            app.start_session("ghost", Vec::new()),
            Err(SessionError::QuizNotFound {
                quiz_id: "ghost".to_string()
            })
        );
    }

    #[test]
    fn deleting_the_quiz_leaves_session_dangling() {
        let (mut app, _backend) = open();
        let quiz = app.edit(|store| store.add_quiz(NewQuiz::default()));
        app.start_session(&quiz, vec![Player::new("p1", "Alice")])
            .unwrap();
        assert!(!app.is_session_dangling());

        app.edit(|store| store.delete_quiz(&quiz)).unwrap();
        assert!(app.session().is_some());
        assert!(app.session_quiz().is_none());
        assert!(app.is_session_dangling());
    }

    #[test]
    fn play_section_tracks_active_section() {
        let (mut app, backend) = open();
        let quiz = app.edit(|store| store.add_quiz(NewQuiz::default()));
        let section = app.edit(|store| store.add_section(&quiz, "Round 1")).unwrap();
        app.edit(|store| store.add_question(&quiz, &section, NewQuestion::map()))
            .unwrap();
        app.start_session(&quiz, Vec::new()).unwrap();

        let nav = app.play_section(&section).unwrap();
        assert_eq!(nav.len(), 1);
        assert_eq!(app.active_questions().len(), 1);
        assert!(backend.contents().unwrap().contains(&section));

        assert_eq!(
            app.play_section("nope"),
            Err(SessionError::SectionNotFound {
                section_id: "nope".to_string()
            })
        );

        app.leave_section().unwrap();
        assert!(app.active_section().is_none());
        assert!(app.active_questions().is_empty());
    }

    #[test]
    fn failed_saves_are_retried_on_flush() {
        let backend = Flaky {
            inner: MemoryBlobStore::new(),
            failing: Cell::new(true),
        };
        let mut app = AppState::open(backend, OverwritePolicy::default()).unwrap();

        let quiz = app.edit(|store| store.add_quiz(NewQuiz::default()));
        assert!(app.is_dirty());
        assert!(app.flush().is_err());

        app.backend().failing.set(false);
        app.flush().unwrap();
        assert!(!app.is_dirty());

        let backend = app.close().unwrap();
        assert!(backend.inner.contents().unwrap().contains(&quiz));
    }
}
