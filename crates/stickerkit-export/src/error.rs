//! Export error types.

use thiserror::Error;

/// Errors from export rendering.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The offscreen surface could not be allocated.
    #[error("cannot allocate a {width}x{height} export surface")]
    SurfaceAllocation {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// The artwork raster has a zero dimension.
    #[error("artwork raster is empty ({width}x{height})")]
    EmptyArtwork {
        /// Artwork width in pixels
        width: u32,
        /// Artwork height in pixels
        height: u32,
    },

    /// The cut dimensions do not form a complete physical size.
    #[error("dimensions are incomplete, cannot derive a pixel footprint")]
    IncompleteDimensions,

    /// The on-screen cut area used during editing has a zero dimension.
    #[error("screen cut area is empty ({width}x{height})")]
    EmptyScreenArea {
        /// On-screen width in pixels
        width: f64,
        /// On-screen height in pixels
        height: f64,
    },

    /// PNG encoding failed.
    #[error("png encoding failed: {source}")]
    Encode {
        /// Underlying encoder error
        #[from]
        source: image::ImageError,
    },
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
