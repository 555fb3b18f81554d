//! # StickerKit Core
//!
//! Core types, data tables, and events for StickerKit.
//! Provides the sticker shape/dimension model, the material and size
//! catalogs, unit conversion, and the editor event bus.

pub mod data;
pub mod error;
pub mod event_bus;
pub mod geometry;
pub mod units;

pub use data::{DimensionCatalog, Material, PresetSize, SizePreset};
pub use error::{CoreError, Result};
pub use event_bus::{
    DesignEvent, DraftEvent, EditorEvent, EventBus, EventBusError, EventCategory, EventFilter,
    OrderEvent, SubscriptionId, TransformEvent,
};
pub use geometry::{
    Dimensions, Orientation, StickerShape, MAX_DIMENSION_CM, MIN_DIMENSION_CM,
};
pub use units::{
    check_resolution, cm_to_inch, inch_to_cm, pixels_per_inch, print_pixels, ResolutionWarning,
    CM_PER_INCH, MIN_RECOMMENDED_PPI, TARGET_PRINT_PPI,
};
