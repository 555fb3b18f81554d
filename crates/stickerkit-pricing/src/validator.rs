//! Order quantity validation.
//!
//! Runs before the pricing engine; a quantity that fails here never
//! reaches a price computation.

use crate::error::{PricingError, Result};
use crate::params::MOQ;

/// Validates order quantities against integrality and the minimum order
/// quantity.
#[derive(Debug, Clone, Copy)]
pub struct QuantityValidator {
    moq: u32,
}

impl QuantityValidator {
    /// Creates a validator with the production MOQ.
    pub fn new() -> Self {
        Self { moq: MOQ }
    }

    /// Creates a validator with a custom MOQ.
    pub fn with_moq(moq: u32) -> Self {
        Self { moq }
    }

    /// The minimum order quantity in force.
    pub fn moq(&self) -> u32 {
        self.moq
    }

    /// Validates a raw quantity as it arrives from an input field:
    /// finite, positive, whole, and at or above the MOQ.
    pub fn validate(&self, value: f64) -> Result<u32> {
        if !value.is_finite() || value <= 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX)
        {
            return Err(PricingError::InvalidQuantity { value });
        }
        let quantity = value as u32;
        if quantity < self.moq {
            return Err(PricingError::BelowMinimum {
                quantity,
                moq: self.moq,
            });
        }
        Ok(quantity)
    }
}

impl Default for QuantityValidator {
    fn default() -> Self {
        Self::new()
    }
}
