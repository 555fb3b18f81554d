//! Pricing error types.

use thiserror::Error;

/// Errors from quantity validation and price computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// Quantity is not a positive whole number.
    #[error("quantity {value} is not a positive whole number")]
    InvalidQuantity {
        /// The rejected value as supplied
        value: f64,
    },

    /// Quantity is below the minimum order quantity.
    #[error("quantity {quantity} is below the minimum order quantity of {moq}")]
    BelowMinimum {
        /// Requested quantity
        quantity: u32,
        /// Minimum order quantity
        moq: u32,
    },

    /// The shape key is not in the pricing table.
    #[error("shape '{shape}' has no pricing parameters")]
    UnsupportedShape {
        /// The rejected shape key
        shape: String,
    },

    /// Dimensions are inconsistent with the shape or out of range.
    #[error("invalid dimensions for pricing: {source}")]
    InvalidDimensions {
        /// Underlying dimension validation error
        #[from]
        source: stickerkit_core::CoreError,
    },
}

/// Result type for pricing operations.
pub type Result<T> = std::result::Result<T, PricingError>;
