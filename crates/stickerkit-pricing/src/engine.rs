//! The pricing computation.
//!
//! A pure function of {shape, dimensions, quantity, material} over the
//! configured parameter tables. Unit price is recomputed from the rounded
//! total, never from the base price, so unit x quantity always equals the
//! displayed total to the cent.

use crate::error::{PricingError, Result};
use crate::params::{PricingTable, ShapePricingParams, MOQ};
use serde::{Deserialize, Serialize};
use stickerkit_core::{Dimensions, Material, StickerShape};

/// A fully derived price, with the intermediate factors exposed for the
/// order breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Shape priced
    pub shape: StickerShape,
    /// Dimensions priced
    pub dimensions: Dimensions,
    /// Material priced
    pub material: Material,
    /// Quantity priced
    pub quantity: u32,
    /// Cut area in square centimeters
    pub area_cm2: f64,
    /// Setup plus per-area cost, times the material factor
    pub base_price: f64,
    /// (quantity / MOQ) ^ shape exponent
    pub scaling_factor: f64,
    /// base_price x scaling_factor, before rounding
    pub raw_total: f64,
    /// Psychologically rounded total
    pub total_price: f64,
    /// total_price / quantity
    pub unit_price: f64,
    /// Parameters the computation used
    pub applied_params: ShapePricingParams,
}

/// Rounds a raw total to the next "ends in 9" price point.
///
/// The total is rounded up to the strictly next multiple of 10, then
/// discounted by 1 (156.34 becomes 159, and an exact 130 becomes 139, not
/// 129). Totals of 10 or less skip the discount and just round up, so a
/// tiny total can never go non-positive. Idempotent on its own output.
pub fn round_psychological(raw: f64) -> f64 {
    if raw <= 10.0 {
        return ((raw / 10.0).ceil() * 10.0).max(raw);
    }
    (raw / 10.0).floor() * 10.0 + 9.0
}

/// Computes prices over a parameter table.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    table: PricingTable,
}

impl PricingEngine {
    /// Creates an engine with the production table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with a custom table.
    pub fn with_table(table: PricingTable) -> Self {
        Self { table }
    }

    /// The parameter table in force.
    pub fn table(&self) -> &PricingTable {
        &self.table
    }

    /// Prices a configuration. `quantity` must already have passed the
    /// quantity validator; the MOQ floor is re-checked here so a direct
    /// call can never divide a discounted total over a tiny run.
    pub fn price(
        &self,
        shape: StickerShape,
        dimensions: &Dimensions,
        quantity: u32,
        material: Material,
    ) -> Result<PricingResult> {
        dimensions.validate_for(shape)?;
        if quantity < MOQ {
            return Err(PricingError::BelowMinimum {
                quantity,
                moq: MOQ,
            });
        }

        // validate_for guarantees a complete size
        let area_cm2 = dimensions.area_cm2().ok_or_else(|| {
            PricingError::InvalidDimensions {
                source: stickerkit_core::CoreError::DimensionShapeMismatch {
                    shape: shape.to_string(),
                    reason: "incomplete dimensions".to_string(),
                },
            }
        })?;

        let params = self.table.params_for(shape);
        let base_price = (params.fixed_setup + params.per_area * area_cm2) * material.factor();
        let scaling_factor =
            (f64::from(quantity) / f64::from(MOQ)).powf(params.quantity_exponent);
        let raw_total = base_price * scaling_factor;
        let total_price = round_psychological(raw_total);
        let unit_price = total_price / f64::from(quantity);

        tracing::debug!(
            %shape,
            quantity,
            area_cm2,
            raw_total,
            total_price,
            "price computed"
        );

        Ok(PricingResult {
            shape,
            dimensions: *dimensions,
            material,
            quantity,
            area_cm2,
            base_price,
            scaling_factor,
            raw_total,
            total_price,
            unit_price,
            applied_params: params,
        })
    }
}
