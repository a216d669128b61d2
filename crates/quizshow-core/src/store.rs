//! Content store: the quiz → section → question tree.
//!
//! The quiz list is held behind an [`Arc`]. Every successful mutation builds
//! a new list and swaps it in, so an observer holding a [`snapshot`] can tell
//! whether anything changed with [`Arc::ptr_eq`]. A mutation that misses
//! leaves the current list (and its pointer) as it was.
//!
//! [`snapshot`]: ContentStore::snapshot

use std::sync::Arc;

use quizshow_model::{
    CellUpdate, MapPin, ModelError, NewQuestion, NewQuiz, PinUpdate, Question, QuestionType,
    QuestionUpdate, Quiz, QuizUpdate, Section, generate_unique_id,
};

use crate::error::{StoreError, StoreResult};

/// Owner of all authored content.
#[derive(Debug, Clone, Default)]
pub struct ContentStore {
    quizzes: Arc<Vec<Quiz>>,
    /// Quiz open in the editor. Not validated against the list.
    active_quiz_id: Option<String>,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from saved content.
    pub fn from_parts(quizzes: Vec<Quiz>, active_quiz_id: Option<String>) -> Self {
        Self {
            quizzes: Arc::new(quizzes),
            active_quiz_id,
        }
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    pub fn quizzes(&self) -> &[Quiz] {
        &self.quizzes
    }

    /// Shared handle on the current quiz list.
    pub fn snapshot(&self) -> Arc<Vec<Quiz>> {
        Arc::clone(&self.quizzes)
    }

    pub fn quiz(&self, quiz_id: &str) -> Option<&Quiz> {
        self.quizzes.iter().find(|quiz| quiz.id == quiz_id)
    }

    pub fn section(&self, quiz_id: &str, section_id: &str) -> Option<&Section> {
        self.quiz(quiz_id)?.section(section_id)
    }

    pub fn question(&self, quiz_id: &str, section_id: &str, question_id: &str) -> Option<&Question> {
        self.section(quiz_id, section_id)?.question(question_id)
    }

    pub fn active_quiz_id(&self) -> Option<&str> {
        self.active_quiz_id.as_deref()
    }

    /// The quiz open in the editor, if it still exists.
    pub fn active_quiz(&self) -> Option<&Quiz> {
        self.quiz(self.active_quiz_id.as_deref()?)
    }

    // =========================================================================
    // QUIZZES
    // =========================================================================

    /// Append a new quiz with no sections. Returns its id.
    pub fn add_quiz(&mut self, new_quiz: NewQuiz) -> String {
        let id = generate_unique_id(|candidate| self.quiz(candidate).is_some());
        let mut next = Vec::clone(&self.quizzes);
        next.push(Quiz::new(id.clone(), new_quiz));
        self.quizzes = Arc::new(next);

        tracing::info!(quiz_id = %id, "Added quiz");
        id
    }

    pub fn update_quiz(&mut self, quiz_id: &str, update: &QuizUpdate) -> StoreResult<()> {
        self.mutate_quiz(quiz_id, |quiz| {
            quiz.apply(update);
            Ok(())
        })
    }

    /// Remove a quiz and everything in it.
    ///
    /// The editor pointer is cleared when it referenced the removed quiz.
    pub fn delete_quiz(&mut self, quiz_id: &str) -> StoreResult<()> {
        let position = self.locate(quiz_id).inspect_err(log_miss)?;
        let mut next = Vec::clone(&self.quizzes);
        next.remove(position);
        self.quizzes = Arc::new(next);

        if self.active_quiz_id.as_deref() == Some(quiz_id) {
            self.active_quiz_id = None;
        }
        tracing::info!(quiz_id, "Deleted quiz");
        Ok(())
    }

    pub fn set_active_quiz(&mut self, quiz_id: Option<String>) {
        self.active_quiz_id = quiz_id;
    }

    // =========================================================================
    // SECTIONS
    // =========================================================================

    /// Append an empty section to a quiz. Returns its id.
    pub fn add_section(&mut self, quiz_id: &str, title: &str) -> StoreResult<String> {
        self.mutate_quiz(quiz_id, |quiz| {
            let id = generate_unique_id(|candidate| quiz.section(candidate).is_some());
            quiz.sections.push(Section::new(id.clone(), title));
            Ok(id)
        })
    }

    pub fn update_section(&mut self, quiz_id: &str, section_id: &str, title: &str) -> StoreResult<()> {
        self.mutate_section(quiz_id, section_id, |section| {
            title.clone_into(&mut section.title);
            Ok(())
        })
    }

    /// Remove a section together with all of its questions.
    pub fn delete_section(&mut self, quiz_id: &str, section_id: &str) -> StoreResult<()> {
        self.mutate_quiz(quiz_id, |quiz| {
            let position = quiz
                .sections
                .iter()
                .position(|section| section.id == section_id)
                .ok_or_else(|| section_miss(quiz_id, section_id))?;
            quiz.sections.remove(position);
            Ok(())
        })
    }

    // =========================================================================
    // QUESTIONS
    // =========================================================================

    /// Append a question to a section. Returns its id.
    ///
    /// The payload is stored as given; incomplete payloads are accepted.
    pub fn add_question(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question: NewQuestion,
    ) -> StoreResult<String> {
        self.mutate_section(quiz_id, section_id, |section| {
            let id = generate_unique_id(|candidate| section.question(candidate).is_some());
            section.questions.push(question.into_question(id.clone()));
            Ok(id)
        })
    }

    /// Merge a partial update into a question.
    ///
    /// Fields the update does not name are preserved. A payload update for
    /// another variant is rejected and nothing is written.
    pub fn update_question(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question_id: &str,
        update: &QuestionUpdate,
    ) -> StoreResult<()> {
        self.mutate_question(quiz_id, section_id, question_id, |question| {
            question.apply(update).map_err(|err| match err {
                ModelError::VariantMismatch { expected, found } => {
                    mismatch(question_id, expected, found)
                }
            })
        })
    }

    pub fn delete_question(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question_id: &str,
    ) -> StoreResult<()> {
        self.mutate_section(quiz_id, section_id, |section| {
            let position = section
                .position_of(question_id)
                .ok_or_else(|| question_miss(section_id, question_id))?;
            section.questions.remove(position);
            Ok(())
        })
    }

    // =========================================================================
    // MINEFIELD CELLS AND MAP PINS
    // =========================================================================

    /// Edit one cell of a minefield board.
    pub fn update_cell(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question_id: &str,
        index: usize,
        update: &CellUpdate,
    ) -> StoreResult<()> {
        self.mutate_question(quiz_id, section_id, question_id, |question| {
            let found = question.question_type();
            let board = question
                .minefield_mut()
                .ok_or_else(|| mismatch(question_id, QuestionType::Minefield, found))?;
            let cell = board.cell_mut(index).ok_or_else(|| StoreError::CellNotFound {
                question_id: question_id.to_string(),
                index,
            })?;
            cell.apply(update);
            Ok(())
        })
    }

    /// Drop an empty pin on a map question. Returns the pin id.
    ///
    /// Coordinates are percentages and are clamped onto the image.
    pub fn add_pin(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question_id: &str,
        x: f64,
        y: f64,
    ) -> StoreResult<String> {
        self.mutate_question(quiz_id, section_id, question_id, |question| {
            let found = question.question_type();
            let map = question
                .map_mut()
                .ok_or_else(|| mismatch(question_id, QuestionType::Map, found))?;
            let id = generate_unique_id(|candidate| map.pin(candidate).is_some());
            map.pins.push(MapPin::at(id.clone(), x, y));
            Ok(id)
        })
    }

    pub fn update_pin(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question_id: &str,
        pin_id: &str,
        update: &PinUpdate,
    ) -> StoreResult<()> {
        self.mutate_question(quiz_id, section_id, question_id, |question| {
            let found = question.question_type();
            let map = question
                .map_mut()
                .ok_or_else(|| mismatch(question_id, QuestionType::Map, found))?;
            let pin = map
                .pin_mut(pin_id)
                .ok_or_else(|| pin_miss(question_id, pin_id))?;
            pin.apply(update);
            Ok(())
        })
    }

    pub fn delete_pin(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question_id: &str,
        pin_id: &str,
    ) -> StoreResult<()> {
        self.mutate_question(quiz_id, section_id, question_id, |question| {
            let found = question.question_type();
            let map = question
                .map_mut()
                .ok_or_else(|| mismatch(question_id, QuestionType::Map, found))?;
            let position = map
                .pins
                .iter()
                .position(|pin| pin.id == pin_id)
                .ok_or_else(|| pin_miss(question_id, pin_id))?;
            map.pins.remove(position);
            Ok(())
        })
    }

    // =========================================================================
    // MUTATION PLUMBING
    // =========================================================================

    fn locate(&self, quiz_id: &str) -> StoreResult<usize> {
        self.quizzes
            .iter()
            .position(|quiz| quiz.id == quiz_id)
            .ok_or_else(|| StoreError::QuizNotFound {
                quiz_id: quiz_id.to_string(),
            })
    }

    /// Apply `edit` to a copy of the quiz list and swap it in on success,
    /// refreshing the quiz's `updatedAt`.
    fn mutate_quiz<T>(
        &mut self,
        quiz_id: &str,
        edit: impl FnOnce(&mut Quiz) -> StoreResult<T>,
    ) -> StoreResult<T> {
        let result = self.locate(quiz_id).and_then(|position| {
            let mut next = Vec::clone(&self.quizzes);
            let quiz = &mut next[position];
            let value = edit(quiz)?;
            quiz.touch();
            self.quizzes = Arc::new(next);
            Ok(value)
        });
        result.inspect_err(log_miss)
    }

    fn mutate_section<T>(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        edit: impl FnOnce(&mut Section) -> StoreResult<T>,
    ) -> StoreResult<T> {
        self.mutate_quiz(quiz_id, |quiz| {
            let section = quiz
                .section_mut(section_id)
                .ok_or_else(|| section_miss(quiz_id, section_id))?;
            edit(section)
        })
    }

    fn mutate_question<T>(
        &mut self,
        quiz_id: &str,
        section_id: &str,
        question_id: &str,
        edit: impl FnOnce(&mut Question) -> StoreResult<T>,
    ) -> StoreResult<T> {
        self.mutate_section(quiz_id, section_id, |section| {
            let question = section
                .question_mut(question_id)
                .ok_or_else(|| question_miss(section_id, question_id))?;
            edit(question)
        })
    }
}

fn log_miss(err: &StoreError) {
    tracing::debug!(error = %err, "Content edit skipped");
}

fn section_miss(quiz_id: &str, section_id: &str) -> StoreError {
    StoreError::SectionNotFound {
        quiz_id: quiz_id.to_string(),
        section_id: section_id.to_string(),
    }
}

fn question_miss(section_id: &str, question_id: &str) -> StoreError {
    StoreError::QuestionNotFound {
        section_id: section_id.to_string(),
        question_id: question_id.to_string(),
    }
}

fn pin_miss(question_id: &str, pin_id: &str) -> StoreError {
    StoreError::PinNotFound {
        question_id: question_id.to_string(),
        pin_id: pin_id.to_string(),
    }
}

fn mismatch(question_id: &str, expected: QuestionType, found: QuestionType) -> StoreError {
    StoreError::VariantMismatch {
        question_id: question_id.to_string(),
        expected,
        found,
    }
}
