//! Dirty state tracking for the state blob.

use std::time::Instant;

/// Tracks whether the in-memory state has changes the store has not
/// accepted yet.
///
/// Every mutation marks the tracker dirty. A successful save clears it; a
/// failed save leaves it dirty so the next flush retries.
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    dirty: bool,

    /// Mutations recorded since the last successful save.
    pending_changes: usize,

    /// When the first unsaved change was made.
    /// Reset when saved.
    first_unsaved_change: Option<Instant>,

    /// Saves that failed since the last successful one.
    consecutive_failures: u32,
}

impl DirtyTracker {
    /// Create a new tracker with no unsaved changes.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn pending_changes(&self) -> usize {
        self.pending_changes
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// Record a mutation of the in-memory state.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
        self.pending_changes += 1;
        if self.first_unsaved_change.is_none() {
            self.first_unsaved_change = Some(Instant::now());
        }
    }

    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.pending_changes = 0;
        self.first_unsaved_change = None;
        self.consecutive_failures = 0;
    }

    pub fn save_failed(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }

    /// Milliseconds since the oldest change the store has not accepted.
    pub fn ms_since_first_unsaved(&self) -> Option<u64> {
        self.first_unsaved_change
            .map(|t| u64::try_from(t.elapsed().as_millis()).unwrap_or(u64::MAX))
    }
}
