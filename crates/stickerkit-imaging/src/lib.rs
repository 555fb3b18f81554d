//! # StickerKit Imaging
//!
//! Artwork analysis and auto-configuration:
//! - decode + transparency/resolution/luminance analysis of uploads
//! - best-fit shape and size suggestion against the preset catalog

pub mod analyzer;
pub mod autoconfig;
pub mod error;

pub use analyzer::{analyze_decoded, analyze_image, ImageAnalysis};
pub use autoconfig::{
    auto_configure, SuggestedConfig, CUSTOM_TARGET_AREA_CM2, RATIO_TOLERANCE,
};
pub use error::{ImagingError, Result};
