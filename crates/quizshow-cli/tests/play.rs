//! Integration tests for the host console.

use std::io::Cursor;

use quizshow_cli::play::run_play;
use quizshow_cli::settings::DisplaySettings;
use quizshow_cli::summary::Tables;
use quizshow_core::{AppState, OverwritePolicy};
use quizshow_model::{
    CellUpdate, NewQuestion, NewQuiz, PayloadUpdate, Player, QuestionUpdate,
};
use quizshow_persistence::MemoryBlobStore;

struct Game {
    app: AppState<MemoryBlobStore>,
    section: String,
}

fn game() -> Game {
    let mut app = AppState::open(MemoryBlobStore::new(), OverwritePolicy::Replace).unwrap();
    let quiz = app.edit(|store| store.add_quiz(NewQuiz::new("Pub Quiz", "")));
    let section = app.edit(|store| store.add_section(&quiz, "Round 1")).unwrap();

    let mine = app
        .edit(|store| store.add_question(&quiz, &section, NewQuestion::minefield()))
        .unwrap();
    let bomb = CellUpdate {
        hidden_content: Some("BOOM".to_string()),
        ..CellUpdate::default()
    };
    app.edit(|store| store.update_cell(&quiz, &section, &mine, 0, &bomb))
        .unwrap();

    let fusion = app
        .edit(|store| store.add_question(&quiz, &section, NewQuestion::guess_fusion()))
        .unwrap();
    let answers = QuestionUpdate::payload(PayloadUpdate::GuessFusion {
        image_url: Some("fusion.png".to_string()),
        answer1: Some("Lion".to_string()),
        answer2: Some("Eagle".to_string()),
    });
    app.edit(|store| store.update_question(&quiz, &section, &fusion, &answers))
        .unwrap();

    app.start_session(
        &quiz,
        vec![Player::new("p1", "Alice"), Player::new("p2", "Bob")],
    )
    .unwrap();
    Game { app, section }
}

fn play(game: &mut Game, script: &str) -> String {
    let tables = Tables::new(&DisplaySettings::default());
    let mut out = Vec::new();
    run_play(
        &mut game.app,
        &game.section,
        &tables,
        Cursor::new(script.to_string()),
        &mut out,
    )
    .unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn host_walks_through_a_section() {
    let mut game = game();
    let out = play(&mut game, "c 1\nn\nr\ns alice 10\ns p2 -5\nn\nj 9\nq\n");

    assert!(out.contains("== Round 1 =="));
    assert!(out.contains("Question 1/2 | Minefield | 60s"));
    assert!(out.contains("BOOM"));
    assert!(out.contains("Answer: hidden"));
    assert!(out.contains("Answer: Lion + Eagle"));
    assert!(out.contains("alice: 10"));
    assert!(out.contains("p2: -5"));
    assert!(out.contains("Section complete (2 questions)."));
    assert!(out.contains("Back at the section hub."));

    let session = game.app.session().unwrap();
    assert!(session.active_section_id.is_none());
    assert_eq!(session.player("p1").unwrap().score, 10);
    assert_eq!(session.player("p2").unwrap().score, -5);
}

#[test]
fn bad_commands_do_not_end_the_game() {
    let mut game = game();
    let out = play(&mut game, "dance\ns nobody 5\nj 0\n\nb\n");

    assert!(out.contains("unknown command 'dance'"));
    assert!(out.contains("Player 'nobody' is not part of the session"));
    assert!(out.contains("positions start at 1"));
    assert!(out.contains("Alice"));
    // End of input leaves the section like `quit`.
    assert!(out.contains("Back at the section hub."));
    assert!(game.app.session().unwrap().active_section_id.is_none());
}

#[test]
fn failed_score_keeps_the_console_running() {
    let mut game = game();
    let out = play(&mut game, "s nobody 5\ns bob 3\nq\n");

    assert!(out.contains("Player 'nobody' is not part of the session"));
    assert!(out.contains("bob: 3"));
    let session = game.app.session().unwrap();
    assert!(session.active_section_id.is_none());
    assert_eq!(session.player("p2").unwrap().score, 3);
}

#[test]
fn unknown_section_is_an_error() {
    let mut game = game();
    let tables = Tables::new(&DisplaySettings::default());
    let mut out = Vec::new();
    let err = run_play(
        &mut game.app,
        "missing",
        &tables,
        Cursor::new(String::new()),
        &mut out,
    )
    .unwrap_err();
    assert!(err.to_string().contains("missing"));
}
