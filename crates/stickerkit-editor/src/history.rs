//! Undo/redo history over transform snapshots.
//!
//! An append-only, depth-bounded list of snapshots plus a cursor. Rapid
//! gesture updates are coalesced: an edit only becomes a history entry
//! once no newer edit has arrived within the settle window. Time is
//! injected as millisecond timestamps so gesture-driven tests stay
//! synchronous.

use crate::transform::TransformState;

/// Maximum number of history entries retained.
pub const HISTORY_DEPTH: usize = 50;

/// Milliseconds an edit must sit unchanged before it becomes an entry.
pub const SETTLE_WINDOW_MS: u64 = 300;

/// Bounded undo/redo log of transform snapshots.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    entries: Vec<TransformState>,
    cursor: usize,
    pending: Option<(TransformState, u64)>,
}

impl HistoryManager {
    /// Creates a history seeded with one entry.
    pub fn new(initial: TransformState) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            pending: None,
        }
    }

    /// Notes an edit at `now_ms`. The edit stays pending until the settle
    /// window elapses without a newer edit, so a drag produces one entry,
    /// not one per pixel.
    pub fn note_edit(&mut self, state: TransformState, now_ms: u64) {
        self.pending = Some((state, now_ms));
    }

    /// Commits the pending edit if its settle window has elapsed.
    /// Returns true when an entry was appended.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some((state, at)) = self.pending else {
            return false;
        };
        if now_ms.saturating_sub(at) < SETTLE_WINDOW_MS {
            return false;
        }
        self.pending = None;
        self.commit(state)
    }

    /// Commits the pending edit immediately (before save/export, where the
    /// latest state must be undoable).
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some((state, _)) => self.commit(state),
            None => false,
        }
    }

    fn commit(&mut self, state: TransformState) -> bool {
        if self.entries[self.cursor] == state {
            return false;
        }
        // Appending after an undo discards the redo branch
        self.entries.truncate(self.cursor + 1);
        self.entries.push(state);
        if self.entries.len() > HISTORY_DEPTH {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    /// Steps the cursor back and returns that snapshot verbatim.
    /// No-op at the oldest entry. A pending edit is committed first so it
    /// is not silently lost.
    pub fn undo(&mut self) -> Option<TransformState> {
        self.flush();
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor])
    }

    /// Steps the cursor forward and returns that snapshot verbatim.
    /// No-op at the newest entry.
    pub fn redo(&mut self) -> Option<TransformState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor])
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0 || self.pending.is_some()
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of committed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its seed entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Resets to a single entry. Called when a new image is loaded or
    /// shape/dimensions change outside the transform; those are not
    /// undoable through this log.
    pub fn reset(&mut self, initial: TransformState) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
        self.pending = None;
    }
}
