//! Editor event bus: per-session publish/subscribe for editor state changes.

mod bus;
mod events;

pub use bus::{EventBus, EventBusError, EventFilter, SubscriptionId};
pub use events::{
    DesignEvent, DraftEvent, EditorEvent, EventCategory, OrderEvent, TransformEvent,
};
