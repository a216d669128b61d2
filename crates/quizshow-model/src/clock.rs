//! Millisecond timestamps.

use chrono::Utc;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

/// Current wall-clock time in milliseconds.
pub fn now_millis() -> Timestamp {
    Utc::now().timestamp_millis()
}

/// Next modification timestamp after `previous`.
///
/// Always strictly greater than `previous`, even when the wall clock has not
/// moved (or moved backwards) since the last mutation.
pub fn advance(previous: Timestamp) -> Timestamp {
    now_millis().max(previous.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_is_strictly_monotonic() {
        let far_future = now_millis() + 60_000;
        assert_eq!(advance(far_future), far_future + 1);

        let past = now_millis() - 60_000;
        assert!(advance(past) > past);
    }

    #[test]
    fn advance_saturates() {
        assert_eq!(advance(Timestamp::MAX), Timestamp::MAX);
    }
}
