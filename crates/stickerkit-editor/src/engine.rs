//! Transform engine: resolves pointer, wheel, and keyboard input into
//! transform changes.
//!
//! Exposes intention-revealing methods (`begin_drag`, `scale_by`,
//! `rotate_by`, handle drags) instead of passed-down event callbacks; the
//! rendering layer subscribes to the event bus for state changes.
//!
//! Only one gesture may be active at a time. A pointer-down captures that
//! pointer's identity exclusively until release or cancel, so a second
//! simultaneous pointer cannot corrupt the transform. Handle drags are
//! computed against the current on-screen artwork center, recomputed on
//! every event, so they stay stable under concurrent scale+rotate.

use crate::transform::{wrap_degrees, TransformState, Vec2};
use std::sync::Arc;
use stickerkit_core::{EditorEvent, EventBus, TransformEvent};

/// Identity of a pointer (mouse button, touch contact, pen).
pub type PointerId = u64;

/// Keyboard nudge step in pixels.
const KEY_NUDGE_PX: f64 = 1.0;
/// Keyboard nudge step with shift held.
const KEY_NUDGE_SHIFT_PX: f64 = 10.0;
/// Scale step for the +/- keys.
const KEY_SCALE_STEP: f64 = 0.1;
/// Rotation step for the [/] keys in degrees.
const KEY_ROTATE_STEP: f64 = 5.0;

/// On-screen size of the cut area in editor pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutArea {
    pub width: f64,
    pub height: f64,
}

impl CutArea {
    /// Creates a cut area.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Geometric center of the cut area.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Editor keys the engine responds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    /// `+` key: scale up by 0.1
    ScaleUp,
    /// `-` key: scale down by 0.1
    ScaleDown,
    /// `[` key: rotate counterclockwise by 5°
    RotateCcw,
    /// `]` key: rotate clockwise by 5°
    RotateCw,
    /// `r` key: reset to identity
    Reset,
}

/// The currently active gesture, keyed by the capturing pointer.
#[derive(Debug, Clone, Copy)]
enum Gesture {
    Move {
        pointer: PointerId,
        start_point: Vec2,
        start_position: Vec2,
    },
    ScaleHandle {
        pointer: PointerId,
        start_scale: f64,
        start_distance: f64,
    },
    RotateHandle {
        pointer: PointerId,
        start_rotation: f64,
        start_angle: f64,
    },
}

impl Gesture {
    fn pointer(&self) -> PointerId {
        match self {
            Gesture::Move { pointer, .. }
            | Gesture::ScaleHandle { pointer, .. }
            | Gesture::RotateHandle { pointer, .. } => *pointer,
        }
    }
}

/// Owns the live artwork transform and resolves input into deltas.
#[derive(Debug)]
pub struct TransformEngine {
    state: TransformState,
    cut_area: CutArea,
    gesture: Option<Gesture>,
    bus: Option<Arc<EventBus>>,
}

impl TransformEngine {
    /// Creates an engine for a cut area with the identity transform.
    pub fn new(cut_area: CutArea) -> Self {
        Self {
            state: TransformState::identity(),
            cut_area,
            gesture: None,
            bus: None,
        }
    }

    /// Attaches an event bus; subsequent transform changes are published.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Snapshot of the current transform.
    pub fn state(&self) -> TransformState {
        self.state
    }

    /// The cut-area geometry in editor pixels.
    pub fn cut_area(&self) -> CutArea {
        self.cut_area
    }

    /// Updates the on-screen cut-area size (window resize).
    pub fn set_cut_area(&mut self, cut_area: CutArea) {
        self.cut_area = cut_area;
    }

    /// Whether a gesture currently holds pointer capture.
    pub fn gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Current on-screen center of the artwork. Recomputed from the live
    /// position on every call, never cached.
    pub fn artwork_center(&self) -> Vec2 {
        self.cut_area.center().add(self.state.position)
    }

    /// Applies a snapshot verbatim (undo/redo, draft restore).
    pub fn apply_snapshot(&mut self, state: TransformState) {
        self.state = state;
        self.publish_changed();
    }

    /// Resets the transform to identity.
    pub fn reset(&mut self) {
        self.state = TransformState::identity();
        if let Some(bus) = &self.bus {
            let _ = bus.publish(EditorEvent::Transform(TransformEvent::Reset));
        }
    }

    // --- translational drag -------------------------------------------------

    /// Starts a move drag. Returns false if another gesture holds capture.
    pub fn begin_drag(&mut self, pointer: PointerId, point: Vec2) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        self.gesture = Some(Gesture::Move {
            pointer,
            start_point: point,
            start_position: self.state.position,
        });
        true
    }

    /// Updates a move drag: position is the absolute delta from drag start.
    /// Events from non-capturing pointers are ignored.
    pub fn update_drag(&mut self, pointer: PointerId, point: Vec2) {
        let Some(Gesture::Move {
            pointer: captured,
            start_point,
            start_position,
        }) = self.gesture
        else {
            return;
        };
        if captured != pointer {
            return;
        }
        self.state.position = start_position.add(point.sub(start_point));
        self.publish_changed();
    }

    // --- handle drags -------------------------------------------------------

    /// Starts a corner scale-handle drag.
    pub fn begin_scale_handle(&mut self, pointer: PointerId, point: Vec2) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let distance = point.sub(self.artwork_center()).length();
        if distance <= f64::EPSILON {
            return false;
        }
        self.gesture = Some(Gesture::ScaleHandle {
            pointer,
            start_scale: self.state.scale,
            start_distance: distance,
        });
        true
    }

    /// Updates a scale-handle drag; the scale follows the ratio of the
    /// pointer's distance to the artwork center.
    pub fn update_scale_handle(&mut self, pointer: PointerId, point: Vec2) {
        let Some(Gesture::ScaleHandle {
            pointer: captured,
            start_scale,
            start_distance,
        }) = self.gesture
        else {
            return;
        };
        if captured != pointer {
            return;
        }
        let distance = point.sub(self.artwork_center()).length();
        self.state.set_scale(start_scale * (distance / start_distance));
        self.publish_changed();
    }

    /// Starts a rotation-handle drag.
    pub fn begin_rotate_handle(&mut self, pointer: PointerId, point: Vec2) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        self.gesture = Some(Gesture::RotateHandle {
            pointer,
            start_rotation: self.state.rotation,
            start_angle: point.sub(self.artwork_center()).angle_deg(),
        });
        true
    }

    /// Updates a rotation-handle drag; the rotation follows the angular
    /// sweep of the pointer around the artwork center.
    pub fn update_rotate_handle(&mut self, pointer: PointerId, point: Vec2) {
        let Some(Gesture::RotateHandle {
            pointer: captured,
            start_rotation,
            start_angle,
        }) = self.gesture
        else {
            return;
        };
        if captured != pointer {
            return;
        }
        let angle = point.sub(self.artwork_center()).angle_deg();
        self.state
            .set_rotation(start_rotation + wrap_degrees(angle - start_angle));
        self.publish_changed();
    }

    /// Ends the active gesture if `pointer` holds the capture.
    pub fn end_gesture(&mut self, pointer: PointerId) {
        if self
            .gesture
            .is_some_and(|gesture| gesture.pointer() == pointer)
        {
            self.gesture = None;
        }
    }

    /// Cancels the active gesture regardless of pointer (pointer-cancel,
    /// focus loss). The transform keeps its last value.
    pub fn cancel_gesture(&mut self) {
        self.gesture = None;
    }

    // --- wheel / pinch ------------------------------------------------------

    /// Multiplicative zoom from a wheel tick or pinch ratio, clamped.
    /// Ignored while a pointer gesture holds capture.
    pub fn zoom_by(&mut self, ratio: f64) {
        if self.gesture.is_some() || !ratio.is_finite() || ratio <= 0.0 {
            return;
        }
        self.state.scale_by(ratio);
        self.publish_changed();
    }

    /// Adds a rotation delta in degrees, wrapped into (-180, 180].
    pub fn rotate_by(&mut self, delta: f64) {
        if self.gesture.is_some() {
            return;
        }
        self.state.rotate_by(delta);
        self.publish_changed();
    }

    // --- keyboard -----------------------------------------------------------

    /// Handles a keyboard nudge. Returns true if the key was consumed.
    /// All keyboard handling is suppressed while a text input has focus.
    pub fn handle_key(&mut self, key: EditorKey, shift: bool, text_input_focused: bool) -> bool {
        if text_input_focused {
            return false;
        }
        let step = if shift { KEY_NUDGE_SHIFT_PX } else { KEY_NUDGE_PX };
        match key {
            EditorKey::ArrowLeft => self.state.translate_by(Vec2::new(-step, 0.0)),
            EditorKey::ArrowRight => self.state.translate_by(Vec2::new(step, 0.0)),
            EditorKey::ArrowUp => self.state.translate_by(Vec2::new(0.0, -step)),
            EditorKey::ArrowDown => self.state.translate_by(Vec2::new(0.0, step)),
            EditorKey::ScaleUp => self.state.set_scale(self.state.scale + KEY_SCALE_STEP),
            EditorKey::ScaleDown => self.state.set_scale(self.state.scale - KEY_SCALE_STEP),
            EditorKey::RotateCcw => self.state.rotate_by(-KEY_ROTATE_STEP),
            EditorKey::RotateCw => self.state.rotate_by(KEY_ROTATE_STEP),
            EditorKey::Reset => {
                self.reset();
                return true;
            }
        }
        self.publish_changed();
        true
    }

    fn publish_changed(&self) {
        if let Some(bus) = &self.bus {
            let _ = bus.publish(EditorEvent::Transform(TransformEvent::Changed {
                scale: self.state.scale,
                rotation: self.state.rotation,
                x: self.state.position.x,
                y: self.state.position.y,
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TransformEngine {
        TransformEngine::new(CutArea::new(400.0, 300.0))
    }

    #[test]
    fn test_drag_moves_by_absolute_delta() {
        let mut e = engine();
        assert!(e.begin_drag(1, Vec2::new(100.0, 100.0)));
        e.update_drag(1, Vec2::new(130.0, 80.0));
        assert_eq!(e.state().position, Vec2::new(30.0, -20.0));
        // Absolute from drag start, not cumulative
        e.update_drag(1, Vec2::new(110.0, 110.0));
        assert_eq!(e.state().position, Vec2::new(10.0, 10.0));
        e.end_gesture(1);
        assert!(!e.gesture_active());
    }

    #[test]
    fn test_second_pointer_cannot_steal_capture() {
        let mut e = engine();
        assert!(e.begin_drag(1, Vec2::new(100.0, 100.0)));
        assert!(!e.begin_drag(2, Vec2::new(0.0, 0.0)));
        e.update_drag(2, Vec2::new(500.0, 500.0));
        assert_eq!(e.state().position, Vec2::ZERO);
        // Ending with the wrong pointer keeps the capture
        e.end_gesture(2);
        assert!(e.gesture_active());
        e.end_gesture(1);
        assert!(!e.gesture_active());
    }

    #[test]
    fn test_zoom_clamped() {
        let mut e = engine();
        e.zoom_by(2.0);
        assert_eq!(e.state().scale, 2.0);
        e.zoom_by(4.0);
        assert_eq!(e.state().scale, 3.0);
        e.zoom_by(0.01);
        assert_eq!(e.state().scale, 0.5);
    }

    #[test]
    fn test_zoom_ignored_during_drag() {
        let mut e = engine();
        e.begin_drag(1, Vec2::ZERO);
        e.zoom_by(2.0);
        assert_eq!(e.state().scale, 1.0);
    }

    #[test]
    fn test_scale_handle_follows_distance_ratio() {
        let mut e = engine();
        // Artwork center is the cut-area center (200, 150)
        assert!(e.begin_scale_handle(1, Vec2::new(300.0, 150.0))); // 100 px out
        e.update_scale_handle(1, Vec2::new(350.0, 150.0)); // 150 px out
        assert!((e.state().scale - 1.5).abs() < 1e-12);
        e.update_scale_handle(1, Vec2::new(250.0, 150.0)); // 50 px out
        assert!((e.state().scale - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_rotate_handle_follows_angular_sweep() {
        let mut e = engine();
        // Start directly right of center, sweep to directly below
        assert!(e.begin_rotate_handle(1, Vec2::new(300.0, 150.0)));
        e.update_rotate_handle(1, Vec2::new(200.0, 250.0));
        assert!((e.state().rotation - 90.0).abs() < 1e-9);
        e.end_gesture(1);
    }

    #[test]
    fn test_handle_drag_uses_current_center_after_move() {
        let mut e = engine();
        // Move the artwork off-center first
        e.begin_drag(1, Vec2::ZERO);
        e.update_drag(1, Vec2::new(50.0, 0.0));
        e.end_gesture(1);
        // Center is now (250, 150); equal distances about it give scale 1
        assert!(e.begin_scale_handle(1, Vec2::new(350.0, 150.0)));
        e.update_scale_handle(1, Vec2::new(150.0, 150.0));
        assert!((e.state().scale - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_keyboard_nudges() {
        let mut e = engine();
        assert!(e.handle_key(EditorKey::ArrowRight, false, false));
        assert_eq!(e.state().position, Vec2::new(1.0, 0.0));
        assert!(e.handle_key(EditorKey::ArrowDown, true, false));
        assert_eq!(e.state().position, Vec2::new(1.0, 10.0));
        assert!(e.handle_key(EditorKey::ScaleUp, false, false));
        assert!((e.state().scale - 1.1).abs() < 1e-12);
        assert!(e.handle_key(EditorKey::RotateCw, false, false));
        assert_eq!(e.state().rotation, 5.0);
        assert!(e.handle_key(EditorKey::Reset, false, false));
        assert!(e.state().is_identity());
    }

    #[test]
    fn test_keyboard_suppressed_in_text_input() {
        let mut e = engine();
        assert!(!e.handle_key(EditorKey::ArrowRight, false, true));
        assert_eq!(e.state().position, Vec2::ZERO);
    }

    #[test]
    fn test_apply_snapshot_verbatim() {
        let mut e = engine();
        let snapshot = TransformState {
            scale: 2.25,
            rotation: -45.0,
            position: Vec2::new(12.0, -7.5),
        };
        e.apply_snapshot(snapshot);
        assert_eq!(e.state(), snapshot);
    }
}
