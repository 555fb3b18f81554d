//! Commerce error types.

use thiserror::Error;

/// Errors from the commerce hand-off.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Unit price times quantity disagrees with the reported total beyond
    /// the one-cent tolerance. Fatal: the add-to-cart must abort rather
    /// than charge an unverified price.
    #[error(
        "pricing discrepancy: unit {unit_price} x {quantity} = {derived_total}, \
         but total reported as {reported_total}"
    )]
    PricingDiscrepancy {
        /// Unit price on the line item
        unit_price: f64,
        /// Quantity on the line item
        quantity: u32,
        /// unit_price x quantity
        derived_total: f64,
        /// Total claimed by the pricing breakdown
        reported_total: f64,
    },

    /// A line item carries a zero quantity.
    #[error("cart line item has zero quantity")]
    ZeroQuantity,
}

/// Result type for commerce operations.
pub type Result<T> = std::result::Result<T, CommerceError>;
