//! Size preset catalog
//!
//! Static S/M/L/XL presets per shape plus default dimensions. The
//! auto-configurator matches uploaded artwork against these presets by
//! aspect ratio; the storefront uses them as the quick-pick size options.

use crate::geometry::{Dimensions, StickerShape};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Preset size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetSize {
    S,
    M,
    L,
    XL,
}

impl fmt::Display for PresetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S => write!(f, "S"),
            Self::M => write!(f, "M"),
            Self::L => write!(f, "L"),
            Self::XL => write!(f, "XL"),
        }
    }
}

/// A single catalog entry: shape + tier + physical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizePreset {
    /// The shape this preset belongs to.
    pub shape: StickerShape,
    /// Size tier.
    pub size: PresetSize,
    /// Physical dimensions, consistent with the shape.
    pub dimensions: Dimensions,
}

impl SizePreset {
    /// Aspect ratio of the preset, long side over short side.
    /// Diameter-based presets have ratio 1.
    pub fn aspect_ratio(&self) -> f64 {
        self.dimensions.aspect_ratio().unwrap_or(1.0)
    }
}

/// Static catalog of per-shape size presets.
///
/// Pure data + lookup; the table never changes at runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionCatalog;

const fn rect(width: f64, height: f64) -> Dimensions {
    Dimensions {
        width: Some(width),
        height: Some(height),
        diameter: None,
    }
}

const fn circle(diameter: f64) -> Dimensions {
    Dimensions {
        width: None,
        height: None,
        diameter: Some(diameter),
    }
}

const fn preset(shape: StickerShape, size: PresetSize, dimensions: Dimensions) -> SizePreset {
    SizePreset {
        shape,
        size,
        dimensions,
    }
}

static RECTANGLE_PRESETS: [SizePreset; 4] = [
    preset(StickerShape::Rectangle, PresetSize::S, rect(5.0, 3.0)),
    preset(StickerShape::Rectangle, PresetSize::M, rect(8.0, 5.0)),
    preset(StickerShape::Rectangle, PresetSize::L, rect(12.0, 8.0)),
    preset(StickerShape::Rectangle, PresetSize::XL, rect(18.0, 9.0)),
];

static SQUARE_PRESETS: [SizePreset; 4] = [
    preset(StickerShape::Square, PresetSize::S, rect(3.0, 3.0)),
    preset(StickerShape::Square, PresetSize::M, rect(5.0, 5.0)),
    preset(StickerShape::Square, PresetSize::L, rect(8.0, 8.0)),
    preset(StickerShape::Square, PresetSize::XL, rect(12.0, 12.0)),
];

static CIRCLE_PRESETS: [SizePreset; 4] = [
    preset(StickerShape::Circle, PresetSize::S, circle(3.0)),
    preset(StickerShape::Circle, PresetSize::M, circle(5.0)),
    preset(StickerShape::Circle, PresetSize::L, circle(8.0)),
    preset(StickerShape::Circle, PresetSize::XL, circle(12.0)),
];

static DIECUT_PRESETS: [SizePreset; 4] = [
    preset(StickerShape::Diecut, PresetSize::S, rect(4.0, 4.0)),
    preset(StickerShape::Diecut, PresetSize::M, rect(7.0, 5.0)),
    preset(StickerShape::Diecut, PresetSize::L, rect(10.0, 7.0)),
    preset(StickerShape::Diecut, PresetSize::XL, rect(14.0, 10.0)),
];

impl DimensionCatalog {
    /// Presets for a single shape, smallest first.
    pub fn presets_for(shape: StickerShape) -> &'static [SizePreset] {
        match shape {
            StickerShape::Rectangle => &RECTANGLE_PRESETS,
            StickerShape::Square => &SQUARE_PRESETS,
            StickerShape::Circle => &CIRCLE_PRESETS,
            StickerShape::Diecut => &DIECUT_PRESETS,
        }
    }

    /// Every preset in the catalog, iterated shape by shape.
    pub fn all_presets() -> impl Iterator<Item = &'static SizePreset> {
        StickerShape::ALL
            .iter()
            .flat_map(|shape| Self::presets_for(*shape).iter())
    }

    /// Default dimensions used when a shape is picked manually without an
    /// upload to infer from (the M preset).
    pub fn default_dimensions(shape: StickerShape) -> Dimensions {
        Self::presets_for(shape)[1].dimensions
    }

    /// Looks up one preset by shape and tier.
    pub fn preset(shape: StickerShape, size: PresetSize) -> &'static SizePreset {
        let idx = match size {
            PresetSize::S => 0,
            PresetSize::M => 1,
            PresetSize::L => 2,
            PresetSize::XL => 3,
        };
        &Self::presets_for(shape)[idx]
    }
}
