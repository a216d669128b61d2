//! Tests for quizshow-model types and their saved form.

use quizshow_model::{
    DEFAULT_PIN_SIZE, GRID_SIZE, GameSession, HiddenKind, NewQuestion, Player, Question,
    QuestionKind, QuestionType, Quiz,
};

#[test]
fn question_reads_saved_minefield_layout() {
    let json = r#"{
        "id": "abc1234",
        "type": "MINEFIELD",
        "text": "Capitals",
        "timeLimit": 60,
        "grid": [
            {"id": "c0", "index": 0, "hiddenType": "TEXT", "hiddenContent": "Rome"},
            {"id": "c1", "index": 1, "coverImage": "cover.png", "hiddenType": "IMAGE", "hiddenContent": "flag.png"}
        ]
    }"#;

    let question: Question = serde_json::from_str(json).expect("parse minefield");
    assert_eq!(question.question_type(), QuestionType::Minefield);
    assert_eq!(question.time_limit, Some(60));
    let grid = &question.minefield().expect("minefield payload").grid;
    assert_eq!(grid.len(), 2);
    assert_eq!(grid[1].cover_image.as_deref(), Some("cover.png"));
    assert_eq!(grid[1].hidden_type, HiddenKind::Image);
    assert!(!grid[0].is_revealed);
}

#[test]
fn question_reads_saved_map_layout_with_default_pin_size() {
    let json = r#"{
        "id": "m1",
        "type": "MAP",
        "text": "Where?",
        "mapImageUrl": "/MAPS_IMAGE/italy_map.png",
        "pins": [{"id": "p1", "x": 12.5, "y": 40, "question": "Capital?", "answer": "Rome"}]
    }"#;

    let question: Question = serde_json::from_str(json).expect("parse map");
    let map = question.map().expect("map payload");
    assert_eq!(map.pin_size, DEFAULT_PIN_SIZE);
    assert_eq!(map.pins[0].y, 40.0);
    assert_eq!(question.time_limit, None);
}

#[test]
fn question_writes_type_tag_and_camel_case() {
    let question = NewQuestion::guess_fusion()
        .with_text("Who is it?")
        .into_question("g1".to_string());
    let value = serde_json::to_value(&question).expect("serialize");

    assert_eq!(value["type"], "GUESS_FUSION");
    assert_eq!(value["text"], "Who is it?");
    assert_eq!(value["timeLimit"], 30);
    assert!(value.get("imageUrl").is_some());
    assert!(value.get("answer1").is_some());
    assert!(value.get("kind").is_none());
}

#[test]
fn unknown_variant_is_rejected() {
    let json = r#"{"id": "t1", "type": "TRUE_FALSE", "text": "Sky is blue", "correctAnswer": true}"#;
    assert!(serde_json::from_str::<Question>(json).is_err());
}

#[test]
fn minefield_template_has_full_board() {
    let question = NewQuestion::minefield().into_question("q".to_string());
    match &question.kind {
        QuestionKind::Minefield(payload) => {
            assert_eq!(payload.grid.len(), GRID_SIZE);
            let mut ids: Vec<&str> = payload.grid.iter().map(|c| c.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), GRID_SIZE, "cell ids should be distinct");
        }
        other => panic!("unexpected payload: {other:?}"),
    }
}

#[test]
fn quiz_reads_saved_layout() {
    let json = r#"{
        "id": "quiz001",
        "title": "Trivia Night",
        "description": "",
        "sections": [{"id": "s1", "title": "Round 1", "questions": []}],
        "createdAt": 1700000000000,
        "updatedAt": 1700000000500
    }"#;
    let quiz: Quiz = serde_json::from_str(json).expect("parse quiz");
    assert_eq!(quiz.sections[0].title, "Round 1");
    assert_eq!(quiz.updated_at - quiz.created_at, 500);
}

#[test]
fn session_serializes_with_saved_field_names() {
    let session = GameSession::new("quiz-1", vec![Player::new("p1", "Alice")]);
    let value = serde_json::to_value(&session).expect("serialize session");
    assert_eq!(value["quizId"], "quiz-1");
    assert_eq!(value["players"][0]["score"], 0);
    assert!(value["activeSectionId"].is_null());
    assert!(value.get("startTime").is_some());
    assert!(value.get("lastActive").is_some());
}

mod properties {
    use proptest::prelude::*;
    use quizshow_model::{PayloadUpdate, QuestionUpdate};

    use super::*;

    fn fusion_update() -> impl Strategy<Value = QuestionUpdate> {
        (
            proptest::option::of("[a-z ]{0,12}"),
            proptest::option::of(proptest::option::of(0u32..600)),
            proptest::option::of("[a-z]{0,8}"),
            proptest::option::of("[a-z]{0,8}"),
        )
            .prop_map(|(text, time_limit, answer1, answer2)| QuestionUpdate {
                text,
                time_limit,
                payload: Some(PayloadUpdate::GuessFusion {
                    image_url: None,
                    answer1,
                    answer2,
                }),
            })
    }

    proptest! {
        #[test]
        fn applying_an_update_twice_equals_once(update in fusion_update()) {
            let original = NewQuestion::guess_fusion().into_question("q".to_string());

            let mut once = original.clone();
            once.apply(&update).unwrap();
            let mut twice = once.clone();
            twice.apply(&update).unwrap();

            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(once.id.as_str(), "q");
            if update.text.is_none() {
                prop_assert_eq!(&once.text, &original.text);
            }
            if update.time_limit.is_none() {
                prop_assert_eq!(once.time_limit, original.time_limit);
            }
        }
    }
}
