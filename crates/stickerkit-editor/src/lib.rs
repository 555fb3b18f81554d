//! # StickerKit Editor
//!
//! Interactive transform editing for sticker artwork: pointer gestures,
//! wheel zoom, keyboard nudges, and a coalescing undo/redo history.
//!
//! ## Core Components
//!
//! - **TransformState**: the live {scale, rotation, position} of the
//!   artwork inside the cut area, with clamping and angle wrapping
//! - **TransformEngine**: resolves pointer/wheel/keyboard input into
//!   transform changes, with exclusive pointer capture per gesture
//! - **HistoryManager**: depth-bounded undo/redo with settle-window
//!   coalescing so a drag records one entry, not one per pixel
//! - **EditorSession**: wires engine and history together and guards
//!   undo/redo application from being re-recorded

pub mod engine;
pub mod history;
pub mod session;
pub mod transform;

pub use engine::{CutArea, EditorKey, PointerId, TransformEngine};
pub use history::{HistoryManager, HISTORY_DEPTH, SETTLE_WINDOW_MS};
pub use session::EditorSession;
pub use transform::{wrap_degrees, TransformState, Vec2, MAX_SCALE, MIN_SCALE};
