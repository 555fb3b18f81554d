//! Editor event definitions.
//!
//! Events flowing between the transform engine, the persistence store, and
//! the pricing recompute scheduler. The rendering layer subscribes to these
//! instead of owning editor logic.

use crate::data::Material;
use crate::geometry::{Dimensions, StickerShape};
use serde::{Deserialize, Serialize};

/// Event category, used for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Live transform changes (drag/zoom/rotate)
    Transform,
    /// Shape, dimension, or artwork changes
    Design,
    /// Quantity/material changes that require a price recompute
    Order,
    /// Draft persistence lifecycle
    Draft,
}

/// Live transform change events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TransformEvent {
    /// The artwork transform changed (any of scale/rotation/position).
    Changed {
        scale: f64,
        rotation: f64,
        x: f64,
        y: f64,
    },
    /// The transform was reset to identity.
    Reset,
}

/// Design configuration events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DesignEvent {
    /// A new artwork was loaded into the editor.
    ImageLoaded { width: u32, height: u32 },
    /// The cut shape changed.
    ShapeChanged { shape: StickerShape },
    /// The cut dimensions changed.
    DimensionsChanged { dimensions: Dimensions },
}

/// Order parameter events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrderEvent {
    /// The order quantity changed.
    QuantityChanged { quantity: u32 },
    /// The material finish changed.
    MaterialChanged { material: Material },
}

/// Draft persistence events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DraftEvent {
    /// A draft was saved.
    Saved { draft_id: String },
    /// The draft was cleared.
    Cleared { draft_id: String },
    /// A storage tier was unavailable and a lower tier took the write.
    StorageDegraded { detail: String },
}

/// Top-level editor event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    Transform(TransformEvent),
    Design(DesignEvent),
    Order(OrderEvent),
    Draft(DraftEvent),
}

impl EditorEvent {
    /// The category this event belongs to.
    pub fn category(&self) -> EventCategory {
        match self {
            Self::Transform(_) => EventCategory::Transform,
            Self::Design(_) => EventCategory::Design,
            Self::Order(_) => EventCategory::Order,
            Self::Draft(_) => EventCategory::Draft,
        }
    }
}
