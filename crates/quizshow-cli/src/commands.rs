//! Subcommand handlers.

use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use quizshow_cli::play::run_play;
use quizshow_cli::settings::{Settings, save_settings, settings_path};
use quizshow_cli::summary::{Tables, session_heading};
use quizshow_core::AppState;
use quizshow_model::{
    CellUpdate, NewQuestion, NewQuiz, PayloadUpdate, PinUpdate, PlayerRoster, QuestionType,
    QuestionUpdate, QuizUpdate,
};
use quizshow_persistence::BlobStore;

use crate::cli::{
    CellCommand, ConfigCommand, PinCommand, PlayArgs, QuestionCommand, QuestionRef, QuizCommand,
    SectionCommand, SessionCommand,
};

pub fn run_quiz<B: BlobStore>(
    app: &mut AppState<B>,
    tables: &Tables,
    command: QuizCommand,
) -> Result<()> {
    match command {
        QuizCommand::List => {
            let store = app.store();
            if store.quizzes().is_empty() {
                println!("No quizzes yet. Create one with `quizshow quiz add`.");
            } else {
                println!("{}", tables.quiz_list(store.quizzes(), store.active_quiz_id()));
            }
        }
        QuizCommand::Show { quiz } => {
            let found = app
                .store()
                .quiz(&quiz)
                .with_context(|| format!("quiz '{quiz}' not found"))?;
            println!("{} ({})", found.title, found.id);
            if !found.description.is_empty() {
                println!("{}", found.description);
            }
            println!(
                "{} questions, about {} minutes",
                found.question_count(),
                found.estimated_minutes()
            );
            println!("{}", tables.quiz_detail(found));
        }
        QuizCommand::Add { title, description } => {
            let defaults = NewQuiz::default();
            let new_quiz = NewQuiz::new(
                title.unwrap_or(defaults.title),
                description.unwrap_or(defaults.description),
            );
            let id = app.edit(|store| store.add_quiz(new_quiz));
            println!("{id}");
        }
        QuizCommand::Update {
            quiz,
            title,
            description,
        } => {
            let update = QuizUpdate { title, description };
            if update.is_empty() {
                bail!("nothing to update; pass --title or --description");
            }
            app.edit(|store| store.update_quiz(&quiz, &update))?;
        }
        QuizCommand::Delete { quiz } => {
            app.edit(|store| store.delete_quiz(&quiz))?;
            if app.is_session_dangling() {
                println!(
                    "The running session played this quiz; end it with `quizshow session end`."
                );
            }
        }
        QuizCommand::Activate { quiz, clear } => {
            let target = if clear { None } else { quiz };
            if let Some(id) = &target {
                app.store()
                    .quiz(id)
                    .with_context(|| format!("quiz '{id}' not found"))?;
            }
            app.edit(|store| store.set_active_quiz(target));
        }
    }
    Ok(())
}

pub fn run_section<B: BlobStore>(app: &mut AppState<B>, command: SectionCommand) -> Result<()> {
    match command {
        SectionCommand::Add { quiz, title } => {
            let id = app.edit(|store| store.add_section(&quiz, &title))?;
            println!("{id}");
        }
        SectionCommand::Rename {
            quiz,
            section,
            title,
        } => {
            app.edit(|store| store.update_section(&quiz, &section, &title))?;
        }
        SectionCommand::Delete { quiz, section } => {
            app.edit(|store| store.delete_section(&quiz, &section))?;
        }
    }
    Ok(())
}

pub fn run_question<B: BlobStore>(app: &mut AppState<B>, command: QuestionCommand) -> Result<()> {
    match command {
        QuestionCommand::Add {
            target,
            kind,
            text,
            time_limit,
        } => {
            let mut question = NewQuestion::template(QuestionType::from(kind));
            if let Some(text) = text {
                question = question.with_text(text);
            }
            if time_limit.is_some() {
                question = question.with_time_limit(time_limit);
            }
            let id =
                app.edit(|store| store.add_question(&target.quiz, &target.section, question))?;
            println!("{id}");
        }
        QuestionCommand::Text {
            target,
            text,
            time_limit,
            no_time_limit,
        } => {
            let update = QuestionUpdate {
                text,
                time_limit: if no_time_limit {
                    Some(None)
                } else {
                    time_limit.map(Some)
                },
                payload: None,
            };
            update_question(app, &target, &update)?;
        }
        QuestionCommand::Fusion {
            target,
            image_url,
            answer1,
            answer2,
        } => {
            let update = QuestionUpdate::payload(PayloadUpdate::GuessFusion {
                image_url,
                answer1,
                answer2,
            });
            update_question(app, &target, &update)?;
        }
        QuestionCommand::Map {
            target,
            map_image_url,
            pin_size,
        } => {
            let update = QuestionUpdate::payload(PayloadUpdate::Map {
                map_image_url,
                pin_size,
                pins: None,
            });
            update_question(app, &target, &update)?;
        }
        QuestionCommand::Delete { target } => {
            app.edit(|store| {
                store.delete_question(&target.quiz, &target.section, &target.question)
            })?;
        }
    }
    Ok(())
}

fn update_question<B: BlobStore>(
    app: &mut AppState<B>,
    target: &QuestionRef,
    update: &QuestionUpdate,
) -> Result<()> {
    app.edit(|store| {
        store.update_question(&target.quiz, &target.section, &target.question, update)
    })?;
    Ok(())
}

pub fn run_cell<B: BlobStore>(app: &mut AppState<B>, command: CellCommand) -> Result<()> {
    let CellCommand::Set {
        target,
        index,
        cover_image,
        clear_cover,
        hidden_kind,
        hidden_content,
    } = command;

    let update = CellUpdate {
        cover_image: if clear_cover {
            Some(None)
        } else {
            cover_image.map(Some)
        },
        hidden_type: hidden_kind.map(Into::into),
        hidden_content,
    };
    if update.is_empty() {
        bail!("nothing to update; pass --cover, --clear-cover, --kind or --content");
    }
    app.edit(|store| {
        store.update_cell(&target.quiz, &target.section, &target.question, index, &update)
    })?;
    Ok(())
}

pub fn run_pin<B: BlobStore>(app: &mut AppState<B>, command: PinCommand) -> Result<()> {
    match command {
        PinCommand::Add {
            target,
            x,
            y,
            prompt,
            answer,
        } => {
            let pin = app.edit(|store| {
                let pin = store.add_pin(&target.quiz, &target.section, &target.question, x, y)?;
                if prompt.is_some() || answer.is_some() {
                    let update = PinUpdate {
                        question: prompt,
                        answer,
                        ..PinUpdate::default()
                    };
                    store.update_pin(
                        &target.quiz,
                        &target.section,
                        &target.question,
                        &pin,
                        &update,
                    )?;
                }
                Ok::<_, quizshow_core::StoreError>(pin)
            })?;
            println!("{pin}");
        }
        PinCommand::Update {
            target,
            pin,
            x,
            y,
            prompt,
            answer,
        } => {
            let update = PinUpdate {
                x,
                y,
                question: prompt,
                answer,
            };
            app.edit(|store| {
                store.update_pin(&target.quiz, &target.section, &target.question, &pin, &update)
            })?;
        }
        PinCommand::Delete { target, pin } => {
            app.edit(|store| {
                store.delete_pin(&target.quiz, &target.section, &target.question, &pin)
            })?;
        }
    }
    Ok(())
}

pub fn run_session<B: BlobStore>(
    app: &mut AppState<B>,
    tables: &Tables,
    command: SessionCommand,
) -> Result<()> {
    match command {
        SessionCommand::Start { quiz, players } => {
            let mut roster = PlayerRoster::new();
            for name in &players {
                roster.add(name);
            }
            if roster.is_empty() {
                bail!("at least one player needs a name");
            }
            app.start_session(&quiz, roster.into_players())?;
            print_session(app, tables);
        }
        SessionCommand::Show => {
            if app.session().is_none() {
                println!("No game is running.");
            } else {
                print_session(app, tables);
            }
        }
        SessionCommand::Score { player, delta } => {
            let score = app.update_player_score(&player, delta)?;
            println!("{score}");
        }
        SessionCommand::End => match app.end_session() {
            Some(ended) => {
                println!("Final scores:");
                println!("{}", tables.scoreboard(&ended.ranking()));
            }
            None => println!("No game is running."),
        },
    }
    Ok(())
}

fn print_session<B: BlobStore>(app: &AppState<B>, tables: &Tables) {
    let Some(session) = app.session() else {
        return;
    };
    println!("{}", session_heading(session, app.session_quiz()));
    if let Some(quiz) = app.session_quiz() {
        for section in &quiz.sections {
            println!(
                "  {} ({}): {} questions",
                section.title,
                section.id,
                section.questions.len()
            );
        }
    }
    println!("{}", tables.scoreboard(&app.sessions().scoreboard()));
}

pub fn run_play_command<B: BlobStore>(
    app: &mut AppState<B>,
    tables: &Tables,
    args: &PlayArgs,
) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run_play(app, &args.section, tables, stdin.lock(), &mut stdout)
}

pub fn run_config(
    settings: &Settings,
    config_path: Option<&Path>,
    command: ConfigCommand,
) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .or_else(settings_path)
        .context("could not determine a settings path; pass --config")?;
    match command {
        ConfigCommand::Path => println!("{}", path.display()),
        ConfigCommand::Show => {
            print!("{}", toml::to_string_pretty(settings).context("serialize settings")?);
        }
        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                bail!("{} already exists; pass --force to overwrite", path.display());
            }
            save_settings(settings, &path)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
