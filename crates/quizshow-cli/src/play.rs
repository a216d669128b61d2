//! Line-driven host console for playing one section.
//!
//! The loop reads one command per line, applies it to the navigator or the
//! session, and redraws the current question. Reading from any [`BufRead`]
//! and writing to any [`Write`] keeps it scriptable.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use quizshow_core::{AppState, PlayNavigator, RevealView};
use quizshow_model::{GRID_COLUMNS, GameSession, HiddenKind};
use quizshow_persistence::BlobStore;

use crate::summary::Tables;

const HELP: &str = "\
Commands:
  n, next            next question
  p, prev            previous question
  j, jump <N>        go to question N (past the end finishes the section)
  r, reveal          show or hide the answer
  c, cell <N>        uncover or cover minefield cell N (1-20)
  pin <ID>           open a map pin
  a, answer          show or hide the open pin's answer
  close              close the open pin
  s, score <P> <D>   add D points to player P (name or id)
  b, board           show the scoreboard
  h, help            this text
  q, quit            back to the section hub";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Next,
    Prev,
    Jump(usize),
    Reveal,
    Cell(usize),
    Pin(String),
    PinAnswer,
    ClosePin,
    Score { player: String, delta: i64 },
    Board,
    Help,
    Quit,
}

impl PlayCommand {
    /// Parse one line. Positions are 1-based as shown on screen.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };
        let command = match verb.to_lowercase().as_str() {
            "n" | "next" => Self::Next,
            "p" | "prev" => Self::Prev,
            "j" | "jump" => Self::Jump(position(words.next())?),
            "r" | "reveal" => Self::Reveal,
            "c" | "cell" => Self::Cell(position(words.next())?),
            "pin" => Self::Pin(words.next().context("pin needs an id")?.to_string()),
            "a" | "answer" => Self::PinAnswer,
            "close" => Self::ClosePin,
            "s" | "score" => {
                let player = words.next().context("score needs a player")?.to_string();
                let delta = words
                    .next()
                    .context("score needs points")?
                    .parse()
                    .context("points must be a whole number")?;
                Self::Score { player, delta }
            }
            "b" | "board" => Self::Board,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            other => bail!("unknown command '{other}' (h for help)"),
        };
        Ok(Some(command))
    }
}

fn position(word: Option<&str>) -> Result<usize> {
    let value: usize = word
        .context("missing number")?
        .parse()
        .context("expected a number")?;
    if value == 0 {
        bail!("positions start at 1");
    }
    Ok(value - 1)
}

/// Host a section until the host quits or input ends, then return the
/// session to the section hub.
pub fn run_play<B, R, W>(
    app: &mut AppState<B>,
    section_id: &str,
    tables: &Tables,
    input: R,
    out: &mut W,
) -> Result<()>
where
    B: BlobStore,
    R: BufRead,
    W: Write,
{
    let mut nav = app.play_section(section_id)?;
    if let Some(section) = app.active_section() {
        writeln!(out, "== {} ==", section.title)?;
    }
    draw(app, &nav, out)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read console input")?;
        let command = match PlayCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                writeln!(out, "{error:#}")?;
                continue;
            }
        };
        tracing::debug!(?command, "Console command");

        match command {
            PlayCommand::Quit => break,
            PlayCommand::Help => writeln!(out, "{HELP}")?,
            PlayCommand::Board => {
                writeln!(out, "{}", tables.scoreboard(&app.sessions().scoreboard()))?;
            }
            PlayCommand::Score { player, delta } => {
                let player_id = app
                    .session()
                    .and_then(|s| find_player(s, &player))
                    .unwrap_or_else(|| player.clone());
                match app.update_player_score(&player_id, delta) {
                    Ok(score) => writeln!(out, "{player}: {score}")?,
                    Err(error) => writeln!(out, "{error}")?,
                }
            }
            other => {
                apply(&mut nav, other);
                nav.resync(app.active_questions());
                draw(app, &nav, out)?;
            }
        }
    }

    app.leave_section()?;
    writeln!(out, "Back at the section hub.")?;
    Ok(())
}

fn apply(nav: &mut PlayNavigator, command: PlayCommand) {
    match command {
        PlayCommand::Next => {
            nav.next();
        }
        PlayCommand::Prev => {
            nav.prev();
        }
        PlayCommand::Jump(index) => nav.jump(index),
        PlayCommand::Reveal => nav.toggle_reveal(),
        PlayCommand::Cell(index) => {
            nav.toggle_cell(index);
        }
        PlayCommand::Pin(id) => nav.select_pin(&id),
        PlayCommand::PinAnswer => nav.toggle_pin_answer(),
        PlayCommand::ClosePin => nav.close_pin(),
        PlayCommand::Score { .. } | PlayCommand::Board | PlayCommand::Help | PlayCommand::Quit => {}
    }
}

/// Match a player by id, then by case-insensitive name.
fn find_player(session: &GameSession, query: &str) -> Option<String> {
    session
        .player(query)
        .or_else(|| {
            session
                .players
                .iter()
                .find(|player| player.name.eq_ignore_ascii_case(query))
        })
        .map(|player| player.id.clone())
}

fn draw<B: BlobStore, W: Write>(app: &AppState<B>, nav: &PlayNavigator, out: &mut W) -> Result<()> {
    let questions = app.active_questions();
    let Some(question) = nav.current(questions) else {
        writeln!(out, "Section complete ({} questions).", questions.len())?;
        return Ok(());
    };

    let limit = question
        .time_limit
        .map(|seconds| format!(" | {seconds}s"))
        .unwrap_or_default();
    writeln!(
        out,
        "Question {}/{} | {}{limit}",
        nav.index() + 1,
        questions.len(),
        question.question_type().label()
    )?;
    writeln!(out, "{}", question.text)?;

    match nav.view(question) {
        RevealView::Minefield { cells } => {
            for row in cells.chunks(GRID_COLUMNS) {
                let line: Vec<String> = row
                    .iter()
                    .map(|view| {
                        if view.uncovered {
                            let content = match view.cell.hidden_type {
                                HiddenKind::Text => view.cell.hidden_content.clone(),
                                HiddenKind::Image => format!("<{}>", view.cell.hidden_content),
                            };
                            format!("[{content:^12}]")
                        } else {
                            format!("[{:^12}]", view.cell.index + 1)
                        }
                    })
                    .collect();
                writeln!(out, "{}", line.join(" "))?;
            }
        }
        RevealView::GuessFusion { image_url, answers } => {
            writeln!(out, "Image: {image_url}")?;
            match answers {
                Some((first, second)) => writeln!(out, "Answer: {first} + {second}")?,
                None => writeln!(out, "Answer: hidden")?,
            }
        }
        RevealView::Map {
            map_image_url,
            pin_size,
            pins,
            active,
        } => {
            writeln!(out, "Map: {map_image_url} ({} pins, size {pin_size})", pins.len())?;
            for pin in pins {
                writeln!(out, "  {} at ({:.1}, {:.1}): {}", pin.id, pin.x, pin.y, pin.question)?;
            }
            if let Some(active) = active {
                let answer = if active.answer_visible {
                    active.pin.answer.as_str()
                } else {
                    "hidden"
                };
                writeln!(out, "Pin {}: {} -> {answer}", active.pin.id, active.pin.question)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_one_based_positions() {
        assert_eq!(PlayCommand::parse("jump 3").unwrap(), Some(PlayCommand::Jump(2)));
        assert_eq!(PlayCommand::parse("  C 20 ").unwrap(), Some(PlayCommand::Cell(19)));
        assert_eq!(
            PlayCommand::parse("s Alice -10").unwrap(),
            Some(PlayCommand::Score {
                player: "Alice".to_string(),
                delta: -10
            })
        );
        assert_eq!(PlayCommand::parse("").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(PlayCommand::parse("jump 0").is_err());
        assert!(PlayCommand::parse("jump").is_err());
        assert!(PlayCommand::parse("score Alice lots").is_err());
        assert!(PlayCommand::parse("dance").is_err());
    }
}
