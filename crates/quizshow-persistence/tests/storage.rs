//! End-to-end tests for saving and loading state through a blob store.

use quizshow_model::{GameSession, NewQuestion, NewQuiz, Player, Quiz, Section};
use quizshow_persistence::{
    BlobStore, FileBlobStore, LEGACY_SECTION_TITLE, MemoryBlobStore, PersistedState,
    PersistenceError, STORAGE_KEY, decode_state, encode_state,
};
use tempfile::tempdir;

fn sample_state() -> PersistedState {
    let mut quiz = Quiz::new("quiz001".to_string(), NewQuiz::new("Friday Night", "Round up"));
    let mut section = Section::new("sec0001".to_string(), "Round 1".to_string());
    section
        .questions
        .push(NewQuestion::map().into_question("map0001".to_string()));
    quiz.sections.push(section);

    PersistedState {
        quizzes: vec![quiz],
        active_quiz_id: Some("quiz001".to_string()),
        active_session: Some(GameSession::new(
            "quiz001",
            vec![Player::new("p1", "Alice"), Player::new("p2", "Bob")],
        )),
    }
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempdir().unwrap();
    let state = sample_state();

    FileBlobStore::new(dir.path(), STORAGE_KEY)
        .save(&encode_state(&state).unwrap())
        .unwrap();

    let reopened = FileBlobStore::new(dir.path(), STORAGE_KEY);
    let blob = reopened.load().unwrap().expect("blob was saved");
    assert_eq!(decode_state(&blob).unwrap(), state);
    assert!(dir.path().join("quiz-storage.json").exists());
}

#[test]
fn boxed_store_delegates() {
    let memory = MemoryBlobStore::new();
    let boxed: Box<dyn BlobStore> = Box::new(memory.clone());

    boxed.save(&encode_state(&sample_state()).unwrap()).unwrap();
    assert_eq!(boxed.describe(), "memory");
    assert!(memory.contents().is_some());
}

#[test]
fn legacy_blob_is_upgraded_on_load() {
    let legacy = r#"{
        "state": {
            "quizzes": [{
                "id": "old1234",
                "title": "Legacy",
                "description": "Before sections",
                "createdAt": 1700000000000,
                "updatedAt": 1700000000000,
                "questions": [
                    {"id": "tf00001", "type": "TRUE_FALSE", "text": "Old?", "correctAnswer": true},
                    {"id": "gf00001", "type": "GUESS_FUSION", "text": "Who?",
                     "imageUrl": "", "answer1": "A", "answer2": "B"}
                ]
            }],
            "activeQuizId": "old1234"
        },
        "version": 0
    }"#;

    let store = MemoryBlobStore::with_blob(legacy);
    let state = decode_state(&store.load().unwrap().unwrap()).unwrap();

    let quiz = &state.quizzes[0];
    assert_eq!(quiz.sections.len(), 1);
    assert_eq!(quiz.sections[0].title, LEGACY_SECTION_TITLE);
    assert_eq!(quiz.sections[0].questions.len(), 1);
    assert_eq!(quiz.sections[0].questions[0].id, "gf00001");
    assert!(state.active_session.is_none());

    // Saving writes the current layout back.
    store.save(&encode_state(&state).unwrap()).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&store.contents().unwrap()).unwrap();
    assert_eq!(saved["version"], 1);
    assert!(saved["state"]["quizzes"][0].get("questions").is_none());
}

#[test]
fn corrupt_file_reports_invalid_format() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("quiz-storage.json"), "{ truncated").unwrap();

    let blob = FileBlobStore::new(dir.path(), STORAGE_KEY)
        .load()
        .unwrap()
        .unwrap();
    let err = decode_state(&blob).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidFormat { .. }));
    assert!(!err.user_message().is_empty());
}
