//! Shape and size auto-configuration.
//!
//! Given decoded artwork geometry and a transparency flag, suggests the
//! best-fit {shape, dimensions, orientation} by matching the image aspect
//! ratio against catalog presets, or synthesizing a custom size that
//! preserves the ratio at a constant target area. This is a heuristic;
//! the user can always override shape and size afterward.

use serde::{Deserialize, Serialize};
use stickerkit_core::{
    Dimensions, DimensionCatalog, Orientation, PresetSize, StickerShape, MAX_DIMENSION_CM,
    MIN_DIMENSION_CM,
};

/// Relative aspect-ratio tolerance for a preset match.
pub const RATIO_TOLERANCE: f64 = 0.08;

/// Target area held constant when synthesizing a custom size.
pub const CUSTOM_TARGET_AREA_CM2: f64 = 60.0;

/// Shape preference when the artwork carries transparency (a silhouette
/// probably matters).
const PRIORITY_TRANSPARENT: [StickerShape; 4] = [
    StickerShape::Diecut,
    StickerShape::Circle,
    StickerShape::Square,
    StickerShape::Rectangle,
];

/// Shape preference for fully opaque artwork.
const PRIORITY_OPAQUE: [StickerShape; 4] = [
    StickerShape::Square,
    StickerShape::Rectangle,
    StickerShape::Circle,
    StickerShape::Diecut,
];

/// Suggested sticker configuration for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestedConfig {
    /// Suggested cut shape.
    pub shape: StickerShape,
    /// Suggested physical dimensions, oriented to the artwork.
    pub dimensions: Dimensions,
    /// Artwork orientation.
    pub orientation: Orientation,
    /// The catalog tier that matched, or `None` for a synthesized custom
    /// size.
    pub matched_preset: Option<PresetSize>,
}

/// Infers the best-fit configuration for artwork of the given native pixel
/// size.
pub fn auto_configure(width: u32, height: u32, has_transparency: bool) -> SuggestedConfig {
    let orientation = if width >= height {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };

    let w = f64::from(width.max(1));
    let h = f64::from(height.max(1));
    let ratio = w.max(h) / w.min(h);

    let priority = if has_transparency {
        &PRIORITY_TRANSPARENT
    } else {
        &PRIORITY_OPAQUE
    };

    for shape in priority {
        if let Some(preset) = best_preset_for(*shape, ratio) {
            let dimensions = orient_dimensions(preset.dimensions, *shape, orientation);
            tracing::debug!(
                "Auto-configured {}x{} px as {} {} (ratio {:.3})",
                width,
                height,
                shape,
                preset.size,
                ratio
            );
            return SuggestedConfig {
                shape: *shape,
                // Circles are orientation-agnostic, reported landscape.
                orientation: if shape.uses_diameter() {
                    Orientation::Landscape
                } else {
                    orientation
                },
                dimensions,
                matched_preset: Some(preset.size),
            };
        }
    }

    synthesize_custom(ratio, has_transparency, orientation, width, height)
}

/// The in-tolerance preset for a shape closest to the image ratio,
/// tie-broken toward the custom target area.
fn best_preset_for(
    shape: StickerShape,
    ratio: f64,
) -> Option<&'static stickerkit_core::SizePreset> {
    DimensionCatalog::presets_for(shape)
        .iter()
        .filter(|preset| {
            let preset_ratio = preset.aspect_ratio();
            (preset_ratio - ratio).abs() / ratio <= RATIO_TOLERANCE
        })
        .min_by(|a, b| {
            let diff_a = (a.aspect_ratio() - ratio).abs();
            let diff_b = (b.aspect_ratio() - ratio).abs();
            diff_a.total_cmp(&diff_b).then_with(|| {
                let area_a = (a.dimensions.area_cm2().unwrap_or(0.0) - CUSTOM_TARGET_AREA_CM2).abs();
                let area_b = (b.dimensions.area_cm2().unwrap_or(0.0) - CUSTOM_TARGET_AREA_CM2).abs();
                area_a.total_cmp(&area_b)
            })
        })
}

/// Swaps width/height when the artwork is portrait. Circles are untouched.
fn orient_dimensions(
    dimensions: Dimensions,
    shape: StickerShape,
    orientation: Orientation,
) -> Dimensions {
    if shape.uses_diameter() || orientation == Orientation::Landscape {
        return dimensions;
    }
    match (dimensions.width, dimensions.height) {
        (Some(w), Some(h)) => Dimensions::rect(w.min(h), w.max(h)),
        _ => dimensions,
    }
}

/// Custom size preserving the image ratio at constant area, rounded to the
/// nearest 0.5 cm and clamped to the manufacturable range.
fn synthesize_custom(
    ratio: f64,
    has_transparency: bool,
    orientation: Orientation,
    width: u32,
    height: u32,
) -> SuggestedConfig {
    let shape = if has_transparency {
        StickerShape::Diecut
    } else {
        StickerShape::Rectangle
    };

    let long = (CUSTOM_TARGET_AREA_CM2 * ratio).sqrt();
    let short = (CUSTOM_TARGET_AREA_CM2 / ratio).sqrt();
    let long = round_half_cm(long).clamp(MIN_DIMENSION_CM, MAX_DIMENSION_CM);
    let short = round_half_cm(short).clamp(MIN_DIMENSION_CM, MAX_DIMENSION_CM);

    let dimensions = match orientation {
        Orientation::Landscape => Dimensions::rect(long, short),
        Orientation::Portrait => Dimensions::rect(short, long),
    };

    tracing::debug!(
        "No preset within tolerance for {}x{} px (ratio {:.3}); synthesized custom {} size",
        width,
        height,
        ratio,
        shape
    );

    SuggestedConfig {
        shape,
        dimensions,
        orientation,
        matched_preset: None,
    }
}

fn round_half_cm(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opaque_square_matches_square_preset() {
        let config = auto_configure(1000, 1000, false);
        assert_eq!(config.shape, StickerShape::Square);
        assert!(config.matched_preset.is_some());
        assert_eq!(config.orientation, Orientation::Landscape);
    }

    #[test]
    fn test_transparent_square_prefers_diecut() {
        let config = auto_configure(1000, 1000, true);
        assert!(
            matches!(config.shape, StickerShape::Diecut | StickerShape::Circle),
            "transparency-aware branch must not pick {}",
            config.shape
        );
        assert_ne!(config.shape, StickerShape::Rectangle);
        assert!(config.matched_preset.is_some());
    }

    #[test]
    fn test_wide_opaque_matches_rectangle() {
        // Ratio 1.6 matches the rectangle M preset exactly
        let config = auto_configure(1600, 1000, false);
        assert_eq!(config.shape, StickerShape::Rectangle);
        assert_eq!(config.matched_preset, Some(PresetSize::M));
        assert_eq!(config.dimensions, Dimensions::rect(8.0, 5.0));
    }

    #[test]
    fn test_portrait_orientation_swaps_sides() {
        let config = auto_configure(1000, 1600, false);
        assert_eq!(config.orientation, Orientation::Portrait);
        let (w, h) = config.dimensions.footprint_cm().unwrap();
        assert!(h > w, "portrait suggestion must be taller than wide");
    }

    #[test]
    fn test_extreme_ratio_synthesizes_custom() {
        let config = auto_configure(3000, 1000, false);
        assert_eq!(config.matched_preset, None);
        assert_eq!(config.shape, StickerShape::Rectangle);
        let (w, h) = config.dimensions.footprint_cm().unwrap();
        // Area held near 60 cm^2, ratio near 3, half-cm steps
        assert!((w / h - 3.0).abs() < 0.15, "ratio should be near 3, got {}", w / h);
        assert!((w * h - CUSTOM_TARGET_AREA_CM2).abs() < 8.0);
        assert_eq!((w * 2.0).fract(), 0.0);
        assert_eq!((h * 2.0).fract(), 0.0);
    }

    #[test]
    fn test_extreme_ratio_with_transparency_synthesizes_diecut() {
        let config = auto_configure(1000, 3000, true);
        assert_eq!(config.matched_preset, None);
        assert_eq!(config.shape, StickerShape::Diecut);
        assert_eq!(config.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_custom_sides_clamped() {
        // Ratio 100 would push the long side past sqrt(6000) cm; both
        // sides must stay inside the manufacturable range.
        let config = auto_configure(10_000, 100, false);
        let (w, h) = config.dimensions.footprint_cm().unwrap();
        assert!(w <= MAX_DIMENSION_CM && w >= MIN_DIMENSION_CM);
        assert!(h <= MAX_DIMENSION_CM && h >= MIN_DIMENSION_CM);
    }

    #[test]
    fn test_circle_reported_landscape() {
        // Transparent artwork at ratio 1 prefers diecut first; force the
        // circle path by checking its convention directly through a
        // near-square transparent portrait image that matches diecut or
        // circle. Either way a diameter-based suggestion must report
        // landscape.
        let config = auto_configure(990, 1000, true);
        if config.shape.uses_diameter() {
            assert_eq!(config.orientation, Orientation::Landscape);
        }
    }
}
