//! Question-by-question navigation through one section during play.
//!
//! The navigator only holds a position and reveal flags. It never owns the
//! questions; callers pass the section's current question list in, so edits
//! made while playing are picked up on the next read.

use std::collections::BTreeSet;

use quizshow_model::{MapPin, MinefieldCell, Question, QuestionKind};

/// Position within a section plus the host's reveal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayNavigator {
    index: usize,
    len: usize,
    revealed: bool,
    board: RevealBoard,
    /// Question at `index` when the reveal state was last checked.
    shown: Option<String>,
}

impl PlayNavigator {
    /// Navigator at the first question of a section with `len` questions.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the host has revealed the current answer.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Past the last question: the consumer shows the completion state.
    pub fn is_complete(&self) -> bool {
        self.index >= self.len
    }

    pub fn board(&self) -> &RevealBoard {
        &self.board
    }

    /// Advance one question. No-op at the last one.
    pub fn next(&mut self) -> bool {
        if self.index + 1 < self.len {
            self.move_to(self.index + 1);
            true
        } else {
            false
        }
    }

    /// Go back one question. No-op at the first one.
    pub fn prev(&mut self) -> bool {
        if self.index > 0 {
            self.move_to(self.index - 1);
            true
        } else {
            false
        }
    }

    /// Move straight to `target`. Anything past the end completes the section.
    pub fn jump(&mut self, target: usize) {
        self.move_to(target.min(self.len));
    }

    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
    }

    /// The question at the current position, or `None` once complete.
    pub fn current<'a>(&self, questions: &'a [Question]) -> Option<&'a Question> {
        questions.get(self.index)
    }

    /// Pick up the section's current questions after it may have been
    /// edited mid-play.
    ///
    /// The position is kept, so removing questions at or before it can land
    /// the navigator in the completion state. When a different question now
    /// sits at the position, its answer starts hidden.
    pub fn resync(&mut self, questions: &[Question]) {
        self.len = questions.len();
        if self.index > self.len {
            self.move_to(self.len);
        }
        let current = questions.get(self.index).map(|question| question.id.as_str());
        if self.shown.is_some() && self.shown.as_deref() != current {
            self.revealed = false;
            self.board.reset();
        }
        self.shown = current.map(str::to_owned);
    }

    pub fn toggle_cell(&mut self, index: usize) -> bool {
        self.board.toggle_cell(index)
    }

    pub fn select_pin(&mut self, pin_id: &str) {
        self.board.select_pin(pin_id);
    }

    pub fn close_pin(&mut self) {
        self.board.close_pin();
    }

    pub fn toggle_pin_answer(&mut self) {
        self.board.toggle_pin_answer();
    }

    /// What the host screen shows for `question` given the reveal state.
    pub fn view<'a>(&self, question: &'a Question) -> RevealView<'a> {
        self.board.view(question, self.revealed)
    }

    fn move_to(&mut self, index: usize) {
        self.index = index;
        self.revealed = false;
        self.board.reset();
        self.shown = None;
    }
}

/// Reveal state below the question level: individual minefield cells and
/// the map pin being looked at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealBoard {
    cells: BTreeSet<usize>,
    active_pin: Option<String>,
    pin_revealed: bool,
}

impl RevealBoard {
    /// Flip one minefield cell. Returns whether it is now uncovered.
    pub fn toggle_cell(&mut self, index: usize) -> bool {
        if self.cells.remove(&index) {
            false
        } else {
            self.cells.insert(index);
            true
        }
    }

    pub fn is_cell_uncovered(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }

    pub fn active_pin(&self) -> Option<&str> {
        self.active_pin.as_deref()
    }

    /// Focus a pin. Switching pins hides the answer again.
    pub fn select_pin(&mut self, pin_id: &str) {
        if self.active_pin.as_deref() != Some(pin_id) {
            self.active_pin = Some(pin_id.to_string());
            self.pin_revealed = false;
        }
    }

    pub fn close_pin(&mut self) {
        self.active_pin = None;
        self.pin_revealed = false;
    }

    pub fn toggle_pin_answer(&mut self) {
        self.pin_revealed = !self.pin_revealed;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn view<'a>(&self, question: &'a Question, revealed: bool) -> RevealView<'a> {
        match &question.kind {
            QuestionKind::Minefield(board) => RevealView::Minefield {
                cells: board
                    .padded_cells()
                    .into_iter()
                    .map(|cell| CellView {
                        uncovered: revealed || self.is_cell_uncovered(cell.index),
                        cell,
                    })
                    .collect(),
            },
            QuestionKind::GuessFusion(fusion) => RevealView::GuessFusion {
                image_url: &fusion.image_url,
                answers: revealed.then_some((fusion.answer1.as_str(), fusion.answer2.as_str())),
            },
            QuestionKind::Map(map) => RevealView::Map {
                map_image_url: &map.map_image_url,
                pin_size: map.effective_pin_size(),
                pins: &map.pins,
                active: self
                    .active_pin
                    .as_deref()
                    .and_then(|id| map.pin(id))
                    .map(|pin| PinView {
                        pin,
                        answer_visible: revealed || self.pin_revealed,
                    }),
            },
        }
    }
}

/// Host-facing rendering of the current question.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealView<'a> {
    /// All 20 board positions, gaps filled with placeholders.
    Minefield { cells: Vec<CellView> },
    GuessFusion {
        image_url: &'a str,
        /// Both identities once revealed.
        answers: Option<(&'a str, &'a str)>,
    },
    Map {
        map_image_url: &'a str,
        pin_size: u32,
        pins: &'a [MapPin],
        active: Option<PinView<'a>>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub cell: MinefieldCell,
    pub uncovered: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinView<'a> {
    pub pin: &'a MapPin,
    pub answer_visible: bool,
}
