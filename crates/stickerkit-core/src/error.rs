//! Error handling for StickerKit core types.
//!
//! Validation errors raised at the model boundary (shape/dimension
//! consistency, range checks). Downstream crates wrap these in their own
//! error types where they add context.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Core validation error type
///
/// Represents violations of the sticker data model: dimensions out of the
/// manufacturable range, or dimension fields inconsistent with the shape
/// they are attached to.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A dimension value falls outside the manufacturable range
    #[error("Dimension {value} cm out of range ({min}-{max} cm)")]
    DimensionOutOfRange {
        /// The offending value in centimeters.
        value: f64,
        /// Lower bound of the allowed range.
        min: f64,
        /// Upper bound of the allowed range.
        max: f64,
    },

    /// Dimension fields do not match what the shape requires
    #[error("Dimensions inconsistent with shape {shape}: {reason}")]
    DimensionShapeMismatch {
        /// The shape the dimensions were validated against.
        shape: String,
        /// What was missing or superfluous.
        reason: String,
    },

    /// Shape key not present in the supported set
    #[error("Unsupported shape: {shape}")]
    UnsupportedShape {
        /// The rejected shape key.
        shape: String,
    },
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
