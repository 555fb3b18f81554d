//! # StickerKit Commerce
//!
//! Hand-off contracts to the external commerce collaborators: presigned
//! artwork uploads and verified cart line items. Totals are never trusted
//! verbatim across the boundary; a line item only forms when unit price
//! times quantity matches the reported total to the cent.

pub mod cart;
pub mod error;
pub mod upload;

pub use cart::{verify_total, CartLineItem, LineItemMetadata, TOTAL_TOLERANCE};
pub use error::{CommerceError, Result};
pub use upload::{public_url, PresignRequest, PresignResponse};
