//! # StickerKit Pricing
//!
//! Area- and quantity-based pricing: per-shape parameter tables, the MOQ
//! quantity validator, the pure price computation with psychological
//! rounding, the request/response envelope, and the debounced recompute
//! scheduler.

pub mod api;
pub mod engine;
pub mod error;
pub mod params;
pub mod scheduler;
pub mod validator;

pub use api::{
    handle_price_request, PriceErrorCode, PriceErrorResponse, PriceRequest, PriceResponse,
};
pub use engine::{round_psychological, PricingEngine, PricingResult};
pub use error::{PricingError, Result};
pub use params::{PricingTable, ShapePricingParams, MOQ};
pub use scheduler::{PricingInputs, PricingScheduler, PRICING_DEBOUNCE};
pub use validator::QuantityValidator;
