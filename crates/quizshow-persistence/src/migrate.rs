//! Schema migrations.
//!
//! Migrations operate on the raw JSON value before it is deserialized into
//! the typed state, so business logic only ever sees the current shape.
//!
//! Version history:
//!
//! | Version | Shape |
//! |---------|-------|
//! | 0 | Unversioned. Quizzes may hold a flat `questions` list instead of `sections`, and questions may use the retired `TRUE_FALSE` variant. |
//! | 1 | Quizzes hold `sections` of questions; only `MINEFIELD`, `GUESS_FUSION` and `MAP` exist; the live session is saved as `activeSession`. |

use serde_json::{Map, Value, json};

use quizshow_model::{QuestionType, generate_id};

use crate::error::{PersistenceError, Result};

/// Title of the section created for questions lifted out of a flat list.
pub const LEGACY_SECTION_TITLE: &str = "Tabellone 1";

/// What a migration run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Quizzes whose flat question list was moved into a section.
    pub restructured_quizzes: usize,
    /// Questions removed because their variant no longer exists.
    pub dropped_questions: usize,
}

impl MigrationReport {
    pub fn changed_anything(&self) -> bool {
        self.restructured_quizzes > 0 || self.dropped_questions > 0
    }

    /// Whether the saved blob is older than what was decoded from it.
    pub fn upgraded(&self) -> bool {
        self.from_version < self.to_version || self.changed_anything()
    }
}

/// Upgrade a saved state value from `from_version` to the current version.
pub fn upgrade(mut state: Value, from_version: u32) -> Result<(Value, MigrationReport)> {
    let mut report = MigrationReport {
        from_version,
        to_version: from_version,
        ..MigrationReport::default()
    };

    if report.to_version == 0 {
        v0_to_v1(&mut state, &mut report)?;
        report.to_version = 1;
    }

    if report.changed_anything() {
        tracing::info!(
            from = report.from_version,
            to = report.to_version,
            restructured = report.restructured_quizzes,
            dropped = report.dropped_questions,
            "Migrated saved state"
        );
    }
    Ok((state, report))
}

fn v0_to_v1(state: &mut Value, report: &mut MigrationReport) -> Result<()> {
    let Some(root) = state.as_object_mut() else {
        return Err(PersistenceError::Migration {
            from_version: 0,
            reason: "state is not an object".to_string(),
        });
    };
    let Some(quizzes) = root.get_mut("quizzes") else {
        return Ok(());
    };
    let Some(quizzes) = quizzes.as_array_mut() else {
        return Err(PersistenceError::Migration {
            from_version: 0,
            reason: "`quizzes` is not a list".to_string(),
        });
    };

    for quiz in quizzes.iter_mut().filter_map(Value::as_object_mut) {
        if lift_flat_questions(quiz) {
            report.restructured_quizzes += 1;
        }
        if let Some(Value::Array(sections)) = quiz.get_mut("sections") {
            for section in sections.iter_mut() {
                if let Some(Value::Array(questions)) = section.get_mut("questions") {
                    report.dropped_questions += retain_known_variants(questions);
                }
            }
        }
    }
    Ok(())
}

/// Move a quiz's flat `questions` list into a new section.
///
/// Returns true when a non-empty list was moved. An empty or malformed list
/// is simply removed.
fn lift_flat_questions(quiz: &mut Map<String, Value>) -> bool {
    let flat = quiz.remove("questions");
    let sections = quiz
        .entry("sections")
        .or_insert_with(|| Value::Array(Vec::new()));
    if !sections.is_array() {
        *sections = Value::Array(Vec::new());
    }

    let questions = match flat {
        Some(Value::Array(questions)) if !questions.is_empty() => questions,
        _ => return false,
    };
    if let Value::Array(sections) = sections {
        sections.push(json!({
            "id": generate_id(),
            "title": LEGACY_SECTION_TITLE,
            "questions": questions,
        }));
    }
    true
}

/// Drop questions whose variant tag is not a current `QuestionType`.
fn retain_known_variants(questions: &mut Vec<Value>) -> usize {
    let before = questions.len();
    questions.retain(|question| {
        let tag = question.get("type").and_then(Value::as_str).unwrap_or("");
        let known = QuestionType::from_tag(tag).is_some();
        if !known {
            let question_id = question.get("id").and_then(Value::as_str).unwrap_or("?");
            tracing::warn!(
                question_id,
                variant = tag,
                "Dropping question with retired variant"
            );
        }
        known
    });
    before - questions.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CURRENT_SCHEMA_VERSION;

    #[test]
    fn flat_questions_move_into_a_section() {
        let state = json!({
            "quizzes": [{
                "id": "q1",
                "title": "Old",
                "questions": [
                    {"id": "a", "type": "TRUE_FALSE", "text": "?", "correctAnswer": true},
                    {"id": "b", "type": "MINEFIELD", "text": "Grid", "grid": []}
                ]
            }]
        });

        let (state, report) = upgrade(state, 0).unwrap();

        assert_eq!(report.restructured_quizzes, 1);
        assert_eq!(report.dropped_questions, 1);
        assert_eq!(report.to_version, 1);
        let quiz = &state["quizzes"][0];
        assert!(quiz.get("questions").is_none());
        assert_eq!(quiz["sections"][0]["title"], LEGACY_SECTION_TITLE);
        assert_eq!(quiz["sections"][0]["questions"][0]["id"], "b");
    }

    #[test]
    fn empty_flat_list_is_removed_without_a_section() {
        let state = json!({"quizzes": [{"id": "q1", "title": "New", "questions": []}]});
        let (state, report) = upgrade(state, 0).unwrap();
        assert!(!report.changed_anything());
        assert_eq!(state["quizzes"][0]["sections"], json!([]));
    }

    #[test]
    fn sectioned_data_keeps_its_sections() {
        let state = json!({
            "quizzes": [{
                "id": "q1",
                "title": "Current",
                "sections": [{"id": "s1", "title": "Round 1", "questions": [
                    {"id": "m", "type": "MAP", "text": "Where?"}
                ]}]
            }]
        });
        let (migrated, report) = upgrade(state.clone(), 0).unwrap();
        assert!(!report.changed_anything());
        assert_eq!(migrated, state);
    }

    #[test]
    fn current_version_is_left_alone() {
        let state = json!({"quizzes": [{"id": "q1", "questions": [{"id": "x"}]}]});
        let (migrated, report) = upgrade(state.clone(), CURRENT_SCHEMA_VERSION).unwrap();
        assert_eq!(migrated, state);
        assert_eq!(report.to_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn non_object_state_fails() {
        let err = upgrade(json!([1, 2, 3]), 0).unwrap_err();
        assert!(matches!(err, PersistenceError::Migration { from_version: 0, .. }));
    }
}
