//! Pricing request/response envelope.
//!
//! The wire shape of the pricing endpoint, also usable as an in-process
//! call: a raw request with a string shape key and an unvalidated
//! quantity, answered with either a full pricing result or a structured
//! error code.

use crate::engine::{PricingEngine, PricingResult};
use crate::error::PricingError;
use crate::validator::QuantityValidator;
use serde::{Deserialize, Serialize};
use stickerkit_core::{Dimensions, Material, StickerShape};

/// A pricing request as it arrives from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRequest {
    /// Commerce variant this configuration belongs to, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<String>,
    /// Raw quantity, validated before pricing
    pub quantity: f64,
    /// Shape key
    pub shape: String,
    /// Cut dimensions
    pub dimensions: Dimensions,
    /// Material key; vinyl when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
}

/// A successful pricing response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceResponse {
    /// The derived price with its breakdown
    pub pricing: PricingResult,
}

/// Machine-readable validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceErrorCode {
    MoqNotMet,
    InvalidQuantity,
    InvalidShape,
}

/// A structured pricing rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceErrorResponse {
    /// Error code
    pub error: PriceErrorCode,
    /// Human-readable detail
    pub message: String,
}

impl From<PricingError> for PriceErrorResponse {
    fn from(e: PricingError) -> Self {
        let error = match &e {
            PricingError::BelowMinimum { .. } => PriceErrorCode::MoqNotMet,
            PricingError::InvalidQuantity { .. } => PriceErrorCode::InvalidQuantity,
            PricingError::UnsupportedShape { .. } | PricingError::InvalidDimensions { .. } => {
                PriceErrorCode::InvalidShape
            }
        };
        Self {
            error,
            message: e.to_string(),
        }
    }
}

/// Answers a raw pricing request: validate, then price.
pub fn handle_price_request(
    engine: &PricingEngine,
    validator: &QuantityValidator,
    request: &PriceRequest,
) -> Result<PriceResponse, PriceErrorResponse> {
    let quantity = validator.validate(request.quantity).map_err(PriceErrorResponse::from)?;
    let shape: StickerShape = request
        .shape
        .parse()
        .map_err(|_| PriceErrorResponse::from(PricingError::UnsupportedShape {
            shape: request.shape.clone(),
        }))?;
    let material = match &request.material {
        Some(key) => key.parse::<Material>().unwrap_or_else(|_| {
            let fallback = Material::default();
            tracing::warn!("Unknown material key '{}', pricing as {}", key, fallback);
            fallback
        }),
        None => Material::default(),
    };
    let pricing = engine
        .price(shape, &request.dimensions, quantity, material)
        .map_err(PriceErrorResponse::from)?;
    Ok(PriceResponse { pricing })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(shape: &str, quantity: f64) -> PriceRequest {
        PriceRequest {
            variant_id: None,
            quantity,
            shape: shape.to_string(),
            dimensions: Dimensions::rect(10.0, 6.0),
            material: None,
        }
    }

    #[test]
    fn test_valid_request_prices() {
        let engine = PricingEngine::new();
        let validator = QuantityValidator::new();
        let resp = handle_price_request(&engine, &validator, &request("rectangle", 500.0)).unwrap();
        assert_eq!(resp.pricing.total_price, 139.0);
    }

    #[test]
    fn test_error_codes() {
        let engine = PricingEngine::new();
        let validator = QuantityValidator::new();

        let err = handle_price_request(&engine, &validator, &request("rectangle", 100.0))
            .unwrap_err();
        assert_eq!(err.error, PriceErrorCode::MoqNotMet);

        let err = handle_price_request(&engine, &validator, &request("rectangle", 500.5))
            .unwrap_err();
        assert_eq!(err.error, PriceErrorCode::InvalidQuantity);

        let err = handle_price_request(&engine, &validator, &request("hexagon", 500.0))
            .unwrap_err();
        assert_eq!(err.error, PriceErrorCode::InvalidShape);
    }

    #[test]
    fn test_unknown_material_prices_as_default() {
        let engine = PricingEngine::new();
        let validator = QuantityValidator::new();

        let mut req = request("rectangle", 500.0);
        req.material = Some("gold_leaf".to_string());
        let unknown = handle_price_request(&engine, &validator, &req).unwrap();

        let baseline = handle_price_request(&engine, &validator, &request("rectangle", 500.0))
            .unwrap();
        assert_eq!(unknown.pricing.total_price, baseline.pricing.total_price);
        assert_eq!(unknown.pricing.material, Material::default());
    }

    #[test]
    fn test_error_code_wire_format() {
        let err = PriceErrorResponse {
            error: PriceErrorCode::MoqNotMet,
            message: "too few".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"MOQ_NOT_MET\""));
    }
}
