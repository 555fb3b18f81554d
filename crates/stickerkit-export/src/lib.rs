//! # StickerKit Export
//!
//! Print-resolution export rendering: composites the settled artwork
//! transform into a shape-clipped, supersampled raster and encodes it as
//! PNG. The placement math mirrors the live editor preview exactly so the
//! exported file matches what the customer approved.

pub mod error;
pub mod renderer;

pub use error::{ExportError, Result};
pub use renderer::{
    export_footprint_px, render_export, ExportRequest, ExportedImage, SUPERSAMPLE,
};
