//! # StickerKit
//!
//! A custom sticker design and pricing toolkit: a buyer configures a
//! die-cut/shape sticker (shape, physical size, material, quantity),
//! positions uploaded artwork inside the cut area, and gets a
//! quantity- and area-dependent price for that exact configuration.
//!
//! ## Architecture
//!
//! StickerKit is organized as a workspace with multiple crates:
//!
//! 1. **stickerkit-core** - Shape/dimension model, catalogs, units, events
//! 2. **stickerkit-imaging** - Artwork analysis and auto-configuration
//! 3. **stickerkit-editor** - Transform engine, gestures, undo/redo
//! 4. **stickerkit-store** - Tiered draft persistence
//! 5. **stickerkit-export** - Print-resolution shape-clipped export
//! 6. **stickerkit-pricing** - Parameter tables, validation, debounced pricing
//! 7. **stickerkit-commerce** - Upload and cart hand-off contracts
//! 8. **stickerkit** - Main binary that integrates all crates

// Re-export crates for main.rs and embedders
pub use stickerkit_commerce as commerce;
pub use stickerkit_editor as editor;
pub use stickerkit_export as export;
pub use stickerkit_imaging as imaging;
pub use stickerkit_pricing as pricing;
pub use stickerkit_store as store;

pub use stickerkit_core::{
    check_resolution, cm_to_inch, inch_to_cm, DimensionCatalog, Dimensions, DraftEvent,
    EditorEvent, EventBus, EventCategory, EventFilter, Material, Orientation, PresetSize,
    SizePreset, StickerShape, TransformEvent, MAX_DIMENSION_CM, MIN_DIMENSION_CM,
    TARGET_PRINT_PPI,
};

pub use stickerkit_editor::{CutArea, EditorSession, TransformEngine, TransformState};
pub use stickerkit_export::{render_export, ExportRequest, ExportedImage};
pub use stickerkit_imaging::{analyze_image, auto_configure, ImageAnalysis, SuggestedConfig};
pub use stickerkit_pricing::{
    handle_price_request, PriceRequest, PricingEngine, PricingResult, PricingScheduler,
    QuantityValidator, MOQ,
};
pub use stickerkit_store::{DesignDraft, PersistenceStore};

/// Application version from the workspace manifest
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
