//! Table rendering for quizzes, sessions and scoreboards.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{ASCII_FULL_CONDENSED, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use quizshow_model::{GameSession, Player, Question, QuestionKind, QuestionType, Quiz};

use crate::settings::{DisplaySettings, TableStyle};

/// Builds tables in the configured style.
#[derive(Debug, Clone)]
pub struct Tables {
    style: TableStyle,
    width: u16,
}

impl Tables {
    pub fn new(display: &DisplaySettings) -> Self {
        Self {
            style: display.table_style,
            width: display.table_width,
        }
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        match self.style {
            TableStyle::Rounded => {
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .apply_modifier(UTF8_ROUND_CORNERS);
            }
            TableStyle::Ascii => {
                table.load_preset(ASCII_FULL_CONDENSED);
            }
        }
        table
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(self.width)
            .set_header(headers.iter().map(|label| header_cell(label)));
        table
    }

    /// One row per quiz; the quiz being edited is marked.
    pub fn quiz_list(&self, quizzes: &[Quiz], active_quiz_id: Option<&str>) -> Table {
        let mut table = self.table(&["", "ID", "Title", "Sections", "Questions", "Minutes"]);
        for column in 3..=5 {
            align_column(&mut table, column, CellAlignment::Right);
        }
        for quiz in quizzes {
            let marker = if active_quiz_id == Some(quiz.id.as_str()) {
                Cell::new("*").fg(Color::Green).add_attribute(Attribute::Bold)
            } else {
                Cell::new("")
            };
            table.add_row(vec![
                marker,
                dim_cell(&quiz.id),
                Cell::new(&quiz.title),
                Cell::new(quiz.sections.len()),
                Cell::new(quiz.question_count()),
                Cell::new(quiz.estimated_minutes()),
            ]);
        }
        table
    }

    /// Every question of a quiz, grouped by section.
    pub fn quiz_detail(&self, quiz: &Quiz) -> Table {
        let mut table = self.table(&["Section", "#", "ID", "Type", "Text", "Time", "Content"]);
        align_column(&mut table, 1, CellAlignment::Right);
        align_column(&mut table, 5, CellAlignment::Right);
        for section in &quiz.sections {
            let section_label = format!("{} ({})", section.title, section.id);
            if section.questions.is_empty() {
                table.add_row(vec![
                    Cell::new(&section_label),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("-"),
                    dim_cell("no questions"),
                    dim_cell("-"),
                    dim_cell("-"),
                ]);
            }
            for (position, question) in section.questions.iter().enumerate() {
                let label = if position == 0 {
                    Cell::new(&section_label)
                } else {
                    Cell::new("")
                };
                table.add_row(vec![
                    label,
                    Cell::new(position + 1),
                    dim_cell(&question.id),
                    type_cell(question),
                    Cell::new(&question.text),
                    match question.time_limit {
                        Some(seconds) => Cell::new(format!("{seconds}s")),
                        None => dim_cell("-"),
                    },
                    Cell::new(content_summary(question)),
                ]);
            }
        }
        table
    }

    /// Players ranked by score.
    pub fn scoreboard(&self, ranking: &[&Player]) -> Table {
        let mut table = self.table(&["Rank", "Player", "ID", "Score"]);
        align_column(&mut table, 0, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for (rank, player) in ranking.iter().enumerate() {
            let score = Cell::new(player.score).add_attribute(Attribute::Bold);
            let score = if player.score < 0 {
                score.fg(Color::Red)
            } else {
                score
            };
            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(&player.name),
                dim_cell(&player.id),
                score,
            ]);
        }
        table
    }
}

/// One-line description of a session for headers.
pub fn session_heading(session: &GameSession, quiz: Option<&Quiz>) -> String {
    let quiz_label = match quiz {
        Some(quiz) => format!("\"{}\"", quiz.title),
        None => format!("{} (deleted)", session.quiz_id),
    };
    let place = match session.active_section_id.as_deref() {
        None => "at the section hub".to_string(),
        Some(id) => match quiz.and_then(|quiz| quiz.section(id)) {
            Some(section) => format!("playing \"{}\"", section.title),
            None => format!("playing missing section {id}"),
        },
    };
    format!("Session {} for {quiz_label}, {place}", session.session_id)
}

/// What the variant payload holds, in a few words.
pub fn content_summary(question: &Question) -> String {
    match &question.kind {
        QuestionKind::Minefield(board) => {
            let filled = board
                .grid
                .iter()
                .filter(|cell| !cell.hidden_content.is_empty())
                .count();
            format!("{filled}/{} cells filled", board.grid.len())
        }
        QuestionKind::GuessFusion(fusion) => {
            if fusion.answer1.is_empty() && fusion.answer2.is_empty() {
                "answers not set".to_string()
            } else {
                format!("{} + {}", fusion.answer1, fusion.answer2)
            }
        }
        QuestionKind::Map(map) => format!(
            "{} pins, size {}",
            map.pins.len(),
            map.effective_pin_size()
        ),
    }
}

fn type_cell(question: &Question) -> Cell {
    let color = match question.question_type() {
        QuestionType::Minefield => Color::Yellow,
        QuestionType::GuessFusion => Color::Magenta,
        QuestionType::Map => Color::Blue,
    };
    Cell::new(question.question_type().label()).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizshow_model::{NewQuestion, NewQuiz, Section};

    fn ascii() -> Tables {
        Tables::new(&DisplaySettings {
            table_style: TableStyle::Ascii,
            table_width: 120,
        })
    }

    #[test]
    fn quiz_list_marks_the_active_quiz() {
        let quiz = Quiz::new("abc1234".to_string(), NewQuiz::new("Trivia Night", ""));
        let rendered = ascii().quiz_list(&[quiz], Some("abc1234")).to_string();
        assert!(rendered.contains("Trivia Night"));
        assert!(rendered.contains('*'));
    }

    #[test]
    fn detail_lists_every_question() {
        let mut quiz = Quiz::new("abc1234".to_string(), NewQuiz::default());
        let mut section = Section::new("sec0001".to_string(), "Round 1");
        section
            .questions
            .push(NewQuestion::minefield().into_question("mine001".to_string()));
        section
            .questions
            .push(NewQuestion::map().into_question("map0001".to_string()));
        quiz.sections.push(section);
        quiz.sections
            .push(Section::new("sec0002".to_string(), "Empty round"));

        let rendered = ascii().quiz_detail(&quiz).to_string();
        assert!(rendered.contains("0/20 cells filled"));
        assert!(rendered.contains("0 pins, size 40"));
        assert!(rendered.contains("no questions"));
    }

    #[test]
    fn heading_flags_a_deleted_quiz() {
        let session = GameSession::new("gone123", Vec::new());
        assert!(session_heading(&session, None).contains("gone123 (deleted)"));
    }
}
