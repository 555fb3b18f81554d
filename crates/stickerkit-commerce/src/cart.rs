//! Cart hand-off.
//!
//! The finished design contributes one line item to the external cart.
//! The commerce collaborator re-derives totals downstream, so the line
//! item carries the full pricing breakdown, and the total is verified
//! against unit x quantity to the cent before the hand-off is allowed.

use crate::error::{CommerceError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stickerkit_core::{Dimensions, Material, StickerShape};
use stickerkit_pricing::PricingResult;

/// Largest acceptable gap between unit x quantity and the reported total.
pub const TOTAL_TOLERANCE: f64 = 0.01;

/// Design metadata attached to a cart line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemMetadata {
    /// Cut shape
    pub shape: StickerShape,
    /// Cut dimensions
    pub dimensions: Dimensions,
    /// Material finish
    pub material: Material,
    /// Public reference to the exported design file
    pub design_file: String,
    /// Full pricing breakdown for downstream re-derivation
    pub pricing: PricingResult,
}

/// One configured sticker design as a cart line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Commerce variant the configuration belongs to
    pub variant_id: String,
    /// Order quantity
    pub quantity: u32,
    /// Price per sticker
    pub unit_price: f64,
    /// Design and pricing detail
    pub metadata: LineItemMetadata,
    /// When the line item was assembled
    pub created_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Assembles a verified line item from a pricing result and the
    /// exported design file reference.
    ///
    /// Fails with [`CommerceError::PricingDiscrepancy`] if the result's
    /// unit price and total disagree; a mismatched price must never reach
    /// the cart.
    pub fn from_pricing(
        variant_id: impl Into<String>,
        pricing: PricingResult,
        design_file: impl Into<String>,
    ) -> Result<Self> {
        if pricing.quantity == 0 {
            return Err(CommerceError::ZeroQuantity);
        }
        verify_total(pricing.unit_price, pricing.quantity, pricing.total_price)?;
        Ok(Self {
            variant_id: variant_id.into(),
            quantity: pricing.quantity,
            unit_price: pricing.unit_price,
            metadata: LineItemMetadata {
                shape: pricing.shape,
                dimensions: pricing.dimensions,
                material: pricing.material,
                design_file: design_file.into(),
                pricing,
            },
            created_at: Utc::now(),
        })
    }

    /// Re-verifies this line item against a total reported downstream.
    pub fn verify_against(&self, reported_total: f64) -> Result<()> {
        verify_total(self.unit_price, self.quantity, reported_total)
    }
}

/// Checks that unit x quantity matches the reported total within a cent.
pub fn verify_total(unit_price: f64, quantity: u32, reported_total: f64) -> Result<()> {
    let derived_total = unit_price * f64::from(quantity);
    if (derived_total - reported_total).abs() > TOTAL_TOLERANCE {
        tracing::error!(
            unit_price,
            quantity,
            derived_total,
            reported_total,
            "pricing discrepancy, aborting cart hand-off"
        );
        return Err(CommerceError::PricingDiscrepancy {
            unit_price,
            quantity,
            derived_total,
            reported_total,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerkit_pricing::PricingEngine;

    fn pricing() -> PricingResult {
        PricingEngine::new()
            .price(
                StickerShape::Rectangle,
                &Dimensions::rect(10.0, 6.0),
                500,
                Material::Vinyl,
            )
            .unwrap()
    }

    #[test]
    fn test_line_item_from_consistent_pricing() {
        let item =
            CartLineItem::from_pricing("variant-1", pricing(), "https://cdn/x/design.png").unwrap();
        assert_eq!(item.quantity, 500);
        assert_eq!(item.unit_price, 139.0 / 500.0);
        assert_eq!(item.metadata.pricing.total_price, 139.0);
    }

    #[test]
    fn test_discrepancy_aborts_hand_off() {
        let mut p = pricing();
        p.total_price += 5.0; // tampered or stale total
        let err = CartLineItem::from_pricing("variant-1", p, "file").unwrap_err();
        assert!(matches!(err, CommerceError::PricingDiscrepancy { .. }));
    }

    #[test]
    fn test_sub_cent_drift_tolerated() {
        assert!(verify_total(0.278, 500, 139.0).is_ok());
        assert!(verify_total(0.278, 500, 139.009).is_ok());
        assert!(verify_total(0.278, 500, 139.02).is_err());
    }

    #[test]
    fn test_line_item_wire_format() {
        let item =
            CartLineItem::from_pricing("variant-1", pricing(), "https://cdn/x/design.png").unwrap();
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"variantId\""));
        assert!(json.contains("\"designFile\""));
    }
}
