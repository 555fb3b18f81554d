//! Error handling for artwork analysis.

use thiserror::Error;

/// Imaging error type
///
/// Decode failures are recoverable at the editor level: the original bytes
/// are retained and the editor shows an unsupported-preview state instead
/// of discarding the upload.
#[derive(Error, Debug)]
pub enum ImagingError {
    /// The uploaded bytes could not be decoded into a bitmap
    #[error("Failed to decode image ({mime_type}): {source}")]
    Decode {
        /// Declared MIME type of the upload.
        mime_type: String,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The decoded bitmap has a zero-sized axis
    #[error("Image has empty dimensions: {width}x{height}")]
    EmptyImage {
        /// Decoded width in pixels.
        width: u32,
        /// Decoded height in pixels.
        height: u32,
    },
}

/// Result alias for imaging operations
pub type Result<T> = std::result::Result<T, ImagingError>;
