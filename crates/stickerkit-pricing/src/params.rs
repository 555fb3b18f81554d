//! Shape pricing parameter tables.
//!
//! Each shape carries a fixed setup cost, a per-area variable cost, and a
//! quantity exponent. The diecut constants diverge sharply from the other
//! shapes (much higher per-area cost, much lower exponent); they are kept
//! exactly as priced in production, pending product-owner confirmation.

use serde::{Deserialize, Serialize};
use stickerkit_core::StickerShape;

/// Minimum order quantity; orders below it are rejected before pricing.
pub const MOQ: u32 = 500;

/// Pricing constants for one shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapePricingParams {
    /// Fixed setup cost, independent of area
    pub fixed_setup: f64,
    /// Variable cost per square centimeter
    pub per_area: f64,
    /// Exponent applied to quantity/MOQ; below 1 gives bulk discounts
    pub quantity_exponent: f64,
}

/// Per-shape pricing table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    pub rectangle: ShapePricingParams,
    pub square: ShapePricingParams,
    pub circle: ShapePricingParams,
    pub diecut: ShapePricingParams,
}

impl PricingTable {
    /// Parameters for a shape.
    pub fn params_for(&self, shape: StickerShape) -> ShapePricingParams {
        match shape {
            StickerShape::Rectangle => self.rectangle,
            StickerShape::Square => self.square,
            StickerShape::Circle => self.circle,
            StickerShape::Diecut => self.diecut,
        }
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            rectangle: ShapePricingParams {
                fixed_setup: 100.0,
                per_area: 0.5,
                quantity_exponent: 0.8,
            },
            square: ShapePricingParams {
                fixed_setup: 100.0,
                per_area: 0.5,
                quantity_exponent: 0.8,
            },
            circle: ShapePricingParams {
                fixed_setup: 100.0,
                per_area: 0.6,
                quantity_exponent: 0.8,
            },
            diecut: ShapePricingParams {
                fixed_setup: 100.0,
                per_area: 1.9,
                quantity_exponent: 0.55,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_params() {
        let table = PricingTable::default();
        for shape in StickerShape::ALL {
            let params = table.params_for(shape);
            assert!(params.fixed_setup > 0.0);
            assert!(params.per_area > 0.0);
            assert!(params.quantity_exponent > 0.0);
        }
    }

    #[test]
    fn test_diecut_diverges_from_other_shapes() {
        let table = PricingTable::default();
        assert!(table.diecut.per_area > 3.0 * table.rectangle.per_area);
        assert!(table.diecut.quantity_exponent < table.rectangle.quantity_exponent);
    }
}
