//! Encoding and decoding of the state blob.

use serde::Serialize;
use serde_json::Value;

use crate::error::{PersistenceError, Result};
use crate::migrate::{MigrationReport, upgrade};
use crate::types::{CURRENT_SCHEMA_VERSION, PersistedState};

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a PersistedState,
    version: u32,
}

/// Serialize state into the versioned blob format.
pub fn encode_state(state: &PersistedState) -> Result<String> {
    serde_json::to_string(&EnvelopeRef {
        state,
        version: CURRENT_SCHEMA_VERSION,
    })
    .map_err(|source| PersistenceError::Serialization { source })
}

/// Parse a blob, upgrading older layouts to the current schema.
///
/// Accepts the versioned envelope as well as a bare, unversioned state
/// object (treated as version 0).
pub fn decode_state(blob: &str) -> Result<PersistedState> {
    decode_state_with_report(blob).map(|(state, _)| state)
}

/// Like [`decode_state`], also reporting what the upgrade changed.
///
/// Callers that own the backend should write the state back when
/// [`MigrationReport::upgraded`] is true, so the upgrade runs only once.
pub fn decode_state_with_report(blob: &str) -> Result<(PersistedState, MigrationReport)> {
    let value: Value = serde_json::from_str(blob).map_err(|e| PersistenceError::InvalidFormat {
        reason: format!("not valid JSON ({e})"),
    })?;

    let (state, version) = split_envelope(value)?;
    if version > CURRENT_SCHEMA_VERSION {
        return Err(PersistenceError::UnsupportedVersion {
            found: version,
            max_supported: CURRENT_SCHEMA_VERSION,
        });
    }

    let (state, report) = upgrade(state, version)?;
    let state: PersistedState = serde_json::from_value(state)
        .map_err(|source| PersistenceError::Deserialization { source })?;

    tracing::debug!(
        quizzes = state.quizzes.len(),
        has_session = state.active_session.is_some(),
        version,
        "Decoded saved state"
    );
    Ok((state, report))
}

fn split_envelope(value: Value) -> Result<(Value, u32)> {
    let Value::Object(mut root) = value else {
        return Err(PersistenceError::InvalidFormat {
            reason: "expected a JSON object".to_string(),
        });
    };

    match root.remove("state") {
        Some(state) => {
            let version = match root.get("version") {
                None | Some(Value::Null) => 0,
                Some(raw) => raw
                    .as_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| PersistenceError::InvalidFormat {
                        reason: format!("invalid version {raw}"),
                    })?,
            };
            Ok((state, version))
        }
        None if root.contains_key("quizzes") => Ok((Value::Object(root), 0)),
        None => Err(PersistenceError::InvalidFormat {
            reason: "missing `state` object".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizshow_model::{GameSession, NewQuiz, Player, Quiz};

    #[test]
    fn encoded_blob_carries_current_version() {
        let blob = encode_state(&PersistedState::default()).unwrap();
        let value: Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(value["version"], CURRENT_SCHEMA_VERSION);
        assert_eq!(value["state"]["quizzes"], serde_json::json!([]));
        assert!(value["state"]["activeSession"].is_null());
    }

    #[test]
    fn decode_restores_content_and_session() {
        let state = PersistedState {
            quizzes: vec![Quiz::new("quiz001".to_string(), NewQuiz::default())],
            active_quiz_id: Some("quiz001".to_string()),
            active_session: Some(GameSession::new("quiz001", vec![Player::new("p1", "Alice")])),
        };

        let decoded = decode_state(&encode_state(&state).unwrap()).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn bare_state_is_treated_as_unversioned() {
        let blob = r#"{"quizzes": [], "activeQuizId": null}"#;
        let state = decode_state(blob).unwrap();
        assert!(state.quizzes.is_empty());
    }

    #[test]
    fn missing_version_defaults_to_zero() {
        let blob = r#"{"state": {"quizzes": [{"id": "q", "title": "T", "createdAt": 1, "updatedAt": 2, "questions": []}]}}"#;
        let state = decode_state(blob).unwrap();
        assert!(state.quizzes[0].sections.is_empty());
    }

    #[test]
    fn report_flags_upgraded_blobs() {
        let legacy = r#"{"state": {"quizzes": []}, "version": 0}"#;
        let (_, report) = decode_state_with_report(legacy).unwrap();
        assert!(report.upgraded());

        let current = encode_state(&PersistedState::default()).unwrap();
        let (_, report) = decode_state_with_report(&current).unwrap();
        assert!(!report.upgraded());
    }

    #[test]
    fn future_version_is_rejected() {
        let blob = r#"{"state": {"quizzes": []}, "version": 99}"#;
        assert!(matches!(
            decode_state(blob),
            Err(PersistenceError::UnsupportedVersion {
                found: 99,
                max_supported: CURRENT_SCHEMA_VERSION
            })
        ));
    }

    #[test]
    fn garbage_is_invalid_format() {
        assert!(matches!(
            decode_state("not json"),
            Err(PersistenceError::InvalidFormat { .. })
        ));
        assert!(matches!(
            decode_state(r#"{"something": "else"}"#),
            Err(PersistenceError::InvalidFormat { .. })
        ));
        assert!(matches!(
            decode_state(r#"{"state": {}, "version": "one"}"#),
            Err(PersistenceError::InvalidFormat { .. })
        ));
    }
}
