//! Editor session: wires the transform engine to the history log.
//!
//! Every user-driven mutation is noted in history (coalesced by the settle
//! window). Mutations performed *by* undo/redo are guarded against
//! re-recording, or a single undo would immediately become a new entry and
//! make the log unusable.

use crate::engine::{CutArea, EditorKey, PointerId, TransformEngine};
use crate::history::HistoryManager;
use crate::transform::{TransformState, Vec2};
use std::sync::Arc;
use stickerkit_core::EventBus;

/// Transform engine plus history, driven by the UI layer.
#[derive(Debug)]
pub struct EditorSession {
    engine: TransformEngine,
    history: HistoryManager,
    applying_history: bool,
}

impl EditorSession {
    /// Creates a session for a cut area.
    pub fn new(cut_area: CutArea) -> Self {
        let engine = TransformEngine::new(cut_area);
        let history = HistoryManager::new(engine.state());
        Self {
            engine,
            history,
            applying_history: false,
        }
    }

    /// Creates a session whose engine publishes transform changes on `bus`.
    pub fn with_event_bus(cut_area: CutArea, bus: Arc<EventBus>) -> Self {
        let engine = TransformEngine::new(cut_area).with_event_bus(bus);
        let history = HistoryManager::new(engine.state());
        Self {
            engine,
            history,
            applying_history: false,
        }
    }

    /// The underlying engine (read-only access for rendering).
    pub fn engine(&self) -> &TransformEngine {
        &self.engine
    }

    /// Current transform snapshot.
    pub fn state(&self) -> TransformState {
        self.engine.state()
    }

    /// The history log.
    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Advances the coalescing clock; call once per frame or timer tick.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.history.tick(now_ms)
    }

    // --- gestures, recorded ---------------------------------------------

    pub fn begin_drag(&mut self, pointer: PointerId, point: Vec2) -> bool {
        self.engine.begin_drag(pointer, point)
    }

    pub fn update_drag(&mut self, pointer: PointerId, point: Vec2, now_ms: u64) {
        self.engine.update_drag(pointer, point);
        self.record(now_ms);
    }

    pub fn begin_scale_handle(&mut self, pointer: PointerId, point: Vec2) -> bool {
        self.engine.begin_scale_handle(pointer, point)
    }

    pub fn update_scale_handle(&mut self, pointer: PointerId, point: Vec2, now_ms: u64) {
        self.engine.update_scale_handle(pointer, point);
        self.record(now_ms);
    }

    pub fn begin_rotate_handle(&mut self, pointer: PointerId, point: Vec2) -> bool {
        self.engine.begin_rotate_handle(pointer, point)
    }

    pub fn update_rotate_handle(&mut self, pointer: PointerId, point: Vec2, now_ms: u64) {
        self.engine.update_rotate_handle(pointer, point);
        self.record(now_ms);
    }

    pub fn end_gesture(&mut self, pointer: PointerId) {
        self.engine.end_gesture(pointer);
    }

    pub fn zoom_by(&mut self, ratio: f64, now_ms: u64) {
        self.engine.zoom_by(ratio);
        self.record(now_ms);
    }

    pub fn rotate_by(&mut self, delta: f64, now_ms: u64) {
        self.engine.rotate_by(delta);
        self.record(now_ms);
    }

    pub fn handle_key(
        &mut self,
        key: EditorKey,
        shift: bool,
        text_input_focused: bool,
        now_ms: u64,
    ) -> bool {
        let handled = self.engine.handle_key(key, shift, text_input_focused);
        if handled {
            self.record(now_ms);
        }
        handled
    }

    // --- undo/redo, guarded ----------------------------------------------

    /// Undoes the last settled edit. Returns the restored snapshot.
    pub fn undo(&mut self) -> Option<TransformState> {
        let snapshot = self.history.undo()?;
        self.apply_guarded(snapshot);
        Some(snapshot)
    }

    /// Redoes the last undone edit. Returns the restored snapshot.
    pub fn redo(&mut self) -> Option<TransformState> {
        let snapshot = self.history.redo()?;
        self.apply_guarded(snapshot);
        Some(snapshot)
    }

    fn apply_guarded(&mut self, snapshot: TransformState) {
        self.applying_history = true;
        self.engine.apply_snapshot(snapshot);
        self.applying_history = false;
    }

    /// Resets transform and history for a newly loaded image or an
    /// out-of-band shape/dimension change.
    pub fn reset_for_new_design(&mut self) {
        self.engine.cancel_gesture();
        self.engine.reset();
        self.history.reset(self.engine.state());
    }

    /// Restores a persisted transform (draft reload) as the new history
    /// seed.
    pub fn restore(&mut self, state: TransformState) {
        self.apply_guarded(state);
        self.history.reset(state);
    }

    /// Commits any pending coalesced edit; call before save/export so the
    /// exported state is exactly the settled one.
    pub fn settle(&mut self) -> TransformState {
        self.history.flush();
        self.engine.state()
    }

    fn record(&mut self, now_ms: u64) {
        if !self.applying_history {
            self.history.note_edit(self.engine.state(), now_ms);
        }
    }
}
