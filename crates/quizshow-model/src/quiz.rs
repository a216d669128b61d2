//! Quizzes and sections.

use serde::{Deserialize, Serialize};

use crate::clock::{Timestamp, advance, now_millis};
use crate::question::Question;

/// Top-level authored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Quiz {
    /// Build a quiz from its creation payload with both timestamps set to now.
    pub fn new(id: String, new_quiz: NewQuiz) -> Self {
        let now = now_millis();
        Self {
            id,
            title: new_quiz.title,
            description: new_quiz.description,
            sections: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a modification of this quiz or anything below it.
    pub fn touch(&mut self) {
        self.updated_at = advance(self.updated_at);
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.id == id)
    }

    pub fn section_mut(&mut self, id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|section| section.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|section| section.questions.len()).sum()
    }

    /// Rough play time in whole minutes, rounding up.
    pub fn estimated_minutes(&self) -> u32 {
        let seconds: u32 = self
            .sections
            .iter()
            .flat_map(|section| &section.questions)
            .map(Question::effective_time_limit)
            .sum();
        seconds.div_ceil(60)
    }

    /// Merge a partial update of the quiz metadata.
    pub fn apply(&mut self, update: &QuizUpdate) {
        if let Some(title) = &update.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &update.description {
            self.description.clone_from(description);
        }
    }
}

/// Named round of questions ("tabellone").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Section {
    pub fn new(id: String, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            questions: Vec::new(),
        }
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn question_mut(&mut self, id: &str) -> Option<&mut Question> {
        self.questions.iter_mut().find(|question| question.id == id)
    }

    /// Position of a question within the play order.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }
}

/// Caller-supplied fields of a new quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuiz {
    pub title: String,
    pub description: String,
}

impl NewQuiz {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

impl Default for NewQuiz {
    fn default() -> Self {
        Self::new("New Quiz", "A brand new quiz waiting for questions.")
    }
}

/// Partial update of quiz metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl QuizUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::NewQuestion;

    #[test]
    fn estimated_minutes_rounds_up() {
        let mut quiz = Quiz::new("q".to_string(), NewQuiz::default());
        let mut section = Section::new("s".to_string(), "Round 1");
        // 60 + 30 + 30 (default) = 120s
        section.questions.push(NewQuestion::minefield().into_question("a".to_string()));
        section.questions.push(NewQuestion::guess_fusion().into_question("b".to_string()));
        section.questions.push(NewQuestion::map().into_question("c".to_string()));
        quiz.sections.push(section);
        assert_eq!(quiz.estimated_minutes(), 2);

        quiz.sections[0].questions[0].time_limit = Some(61);
        assert_eq!(quiz.estimated_minutes(), 3);
    }

    #[test]
    fn touch_advances_updated_at() {
        let mut quiz = Quiz::new("q".to_string(), NewQuiz::default());
        let before = quiz.updated_at;
        quiz.touch();
        quiz.touch();
        assert!(quiz.updated_at >= before + 2);
        assert_eq!(quiz.created_at, before);
    }
}
