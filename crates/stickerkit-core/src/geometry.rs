//! Sticker shape and physical dimension model.
//!
//! A sticker is cut to one of four outlines. Circles carry a single
//! diameter; every other shape carries width and height. All physical
//! sizes are centimeters.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest manufacturable side/diameter in centimeters
pub const MIN_DIMENSION_CM: f64 = 1.0;
/// Largest manufacturable side/diameter in centimeters
pub const MAX_DIMENSION_CM: f64 = 50.0;

/// Sticker cut outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StickerShape {
    /// Axis-aligned rectangle with rounded corners
    Rectangle,
    /// Square with rounded corners
    Square,
    /// Circle, sized by diameter only
    Circle,
    /// Contour cut following the artwork's own silhouette
    Diecut,
}

impl StickerShape {
    /// All supported shapes, in catalog order.
    pub const ALL: [StickerShape; 4] = [
        StickerShape::Rectangle,
        StickerShape::Square,
        StickerShape::Circle,
        StickerShape::Diecut,
    ];

    /// Whether this shape is sized by a single diameter.
    pub fn uses_diameter(&self) -> bool {
        matches!(self, Self::Circle)
    }
}

impl fmt::Display for StickerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rectangle => write!(f, "rectangle"),
            Self::Square => write!(f, "square"),
            Self::Circle => write!(f, "circle"),
            Self::Diecut => write!(f, "diecut"),
        }
    }
}

impl FromStr for StickerShape {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rectangle" | "rect" => Ok(Self::Rectangle),
            "square" => Ok(Self::Square),
            "circle" | "round" => Ok(Self::Circle),
            "diecut" | "die-cut" => Ok(Self::Diecut),
            other => Err(CoreError::UnsupportedShape {
                shape: other.to_string(),
            }),
        }
    }
}

/// Suggested artwork orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Width >= height. Circles report landscape by convention.
    Landscape,
    /// Height > width
    Portrait,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Landscape => write!(f, "landscape"),
            Self::Portrait => write!(f, "portrait"),
        }
    }
}

/// Physical cut-area dimensions in centimeters.
///
/// Exactly one of (`diameter`) or (`width` and `height`) is populated,
/// consistent with the shape the dimensions belong to. Construct through
/// [`Dimensions::rect`] or [`Dimensions::circle`] and enforce the pairing
/// with [`Dimensions::validate_for`] at API and persistence boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in cm (rectangle, square, diecut)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height in cm (rectangle, square, diecut)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Diameter in cm (circle only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
}

impl Dimensions {
    /// Creates width/height dimensions.
    pub fn rect(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            diameter: None,
        }
    }

    /// Creates diameter dimensions for a circle.
    pub fn circle(diameter: f64) -> Self {
        Self {
            width: None,
            height: None,
            diameter: Some(diameter),
        }
    }

    /// Checks that the populated fields match the shape and that every
    /// value lies inside the manufacturable range.
    pub fn validate_for(&self, shape: StickerShape) -> Result<()> {
        if shape.uses_diameter() {
            let Some(d) = self.diameter else {
                return Err(CoreError::DimensionShapeMismatch {
                    shape: shape.to_string(),
                    reason: "diameter is required".to_string(),
                });
            };
            if self.width.is_some() || self.height.is_some() {
                return Err(CoreError::DimensionShapeMismatch {
                    shape: shape.to_string(),
                    reason: "width/height must not be set for a circle".to_string(),
                });
            }
            check_range(d)?;
        } else {
            let (Some(w), Some(h)) = (self.width, self.height) else {
                return Err(CoreError::DimensionShapeMismatch {
                    shape: shape.to_string(),
                    reason: "width and height are required".to_string(),
                });
            };
            if self.diameter.is_some() {
                return Err(CoreError::DimensionShapeMismatch {
                    shape: shape.to_string(),
                    reason: "diameter must not be set".to_string(),
                });
            }
            check_range(w)?;
            check_range(h)?;
        }
        Ok(())
    }

    /// Cut area in square centimeters.
    ///
    /// Circle area is computed from the diameter; everything else is
    /// width x height. Returns `None` when the populated fields do not
    /// form a complete size.
    pub fn area_cm2(&self) -> Option<f64> {
        if let Some(d) = self.diameter {
            let r = d / 2.0;
            return Some(std::f64::consts::PI * r * r);
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(w * h),
            _ => None,
        }
    }

    /// The physical footprint as (width, height) in cm.
    /// Circles report (diameter, diameter).
    pub fn footprint_cm(&self) -> Option<(f64, f64)> {
        if let Some(d) = self.diameter {
            return Some((d, d));
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }

    /// Aspect ratio normalized to long side over short side (>= 1).
    /// Diameter-based dimensions have ratio 1.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let (w, h) = self.footprint_cm()?;
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        Some(w.max(h) / w.min(h))
    }
}

fn check_range(value: f64) -> Result<()> {
    if !value.is_finite() || value < MIN_DIMENSION_CM || value > MAX_DIMENSION_CM {
        return Err(CoreError::DimensionOutOfRange {
            value,
            min: MIN_DIMENSION_CM,
            max: MAX_DIMENSION_CM,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_dimensions_validate() {
        let dims = Dimensions::rect(10.0, 6.0);
        assert!(dims.validate_for(StickerShape::Rectangle).is_ok());
        assert!(dims.validate_for(StickerShape::Square).is_ok());
        assert!(dims.validate_for(StickerShape::Circle).is_err());
    }

    #[test]
    fn test_circle_dimensions_validate() {
        let dims = Dimensions::circle(8.0);
        assert!(dims.validate_for(StickerShape::Circle).is_ok());
        assert!(dims.validate_for(StickerShape::Rectangle).is_err());
    }

    #[test]
    fn test_both_populated_rejected() {
        let dims = Dimensions {
            width: Some(5.0),
            height: Some(5.0),
            diameter: Some(5.0),
        };
        assert!(dims.validate_for(StickerShape::Square).is_err());
        assert!(dims.validate_for(StickerShape::Circle).is_err());
    }

    #[test]
    fn test_range_enforced() {
        assert!(Dimensions::rect(0.5, 5.0)
            .validate_for(StickerShape::Rectangle)
            .is_err());
        assert!(Dimensions::rect(5.0, 51.0)
            .validate_for(StickerShape::Rectangle)
            .is_err());
        assert!(Dimensions::circle(50.0)
            .validate_for(StickerShape::Circle)
            .is_ok());
        assert!(Dimensions::circle(1.0)
            .validate_for(StickerShape::Circle)
            .is_ok());
    }

    #[test]
    fn test_area() {
        assert_eq!(Dimensions::rect(10.0, 6.0).area_cm2(), Some(60.0));
        let circle_area = Dimensions::circle(10.0).area_cm2().unwrap();
        assert!((circle_area - std::f64::consts::PI * 25.0).abs() < 1e-9);
        assert_eq!(Dimensions::default().area_cm2(), None);
    }

    #[test]
    fn test_aspect_ratio_normalized() {
        assert_eq!(Dimensions::rect(10.0, 5.0).aspect_ratio(), Some(2.0));
        assert_eq!(Dimensions::rect(5.0, 10.0).aspect_ratio(), Some(2.0));
        assert_eq!(Dimensions::circle(8.0).aspect_ratio(), Some(1.0));
    }

    #[test]
    fn test_shape_parsing() {
        assert_eq!(
            "die-cut".parse::<StickerShape>().unwrap(),
            StickerShape::Diecut
        );
        assert_eq!(
            "Rectangle".parse::<StickerShape>().unwrap(),
            StickerShape::Rectangle
        );
        assert!("hexagon".parse::<StickerShape>().is_err());
    }
}
