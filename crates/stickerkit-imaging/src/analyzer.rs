//! Artwork analysis: transparency detection, print-resolution checking,
//! and overall luminance classification.
//!
//! The darkness signal only picks a contrasting canvas backdrop; it is
//! never authoritative for pricing or manufacturing.

use crate::error::{ImagingError, Result};
use image::{DynamicImage, GenericImageView, RgbaImage};
use serde::{Deserialize, Serialize};
use stickerkit_core::units::{check_resolution, ResolutionWarning};
use stickerkit_core::Dimensions;

/// Alpha value below which a pixel counts as transparent (anything < 255).
const OPAQUE_ALPHA: u8 = 255;

/// Pixels with alpha at or below this are skipped when averaging luminance.
const LUMA_ALPHA_CUTOFF: u8 = 50;

/// Average luma below this classifies the image as dark.
const DARK_LUMA_THRESHOLD: f64 = 128.0;

/// Upper bound on luminance samples taken per image.
const MAX_LUMA_SAMPLES: u32 = 10_000;

/// Result of analyzing an uploaded artwork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Native pixel width.
    pub width: u32,
    /// Native pixel height.
    pub height: u32,
    /// Any pixel with alpha < 255 exists (alpha-capable formats only).
    pub has_transparency: bool,
    /// Transparency on the outermost rows/columns: the stronger die-cut
    /// silhouette signal, as opposed to an incidental soft edge.
    pub edge_transparency: bool,
    /// Average luma over sufficiently opaque pixels is below 128.
    pub is_dark: bool,
    /// Set when the upload cannot cover the target size at acceptable PPI.
    pub resolution_warning: Option<ResolutionWarning>,
}

/// Decodes an upload and analyzes it.
///
/// `target` is the physical size the artwork is intended to cover; when
/// present the effective print resolution is checked against it.
/// Undecodable input is an error; callers fall back to an
/// unsupported-preview state without dropping the original bytes.
pub fn analyze_image(
    bytes: &[u8],
    mime_type: &str,
    target: Option<&Dimensions>,
) -> Result<ImageAnalysis> {
    let decoded = image::load_from_memory(bytes).map_err(|source| {
        tracing::debug!("Image decode failed for {}: {}", mime_type, source);
        ImagingError::Decode {
            mime_type: mime_type.to_string(),
            source,
        }
    })?;
    analyze_decoded(&decoded, target)
}

/// Analyzes an already-decoded bitmap.
pub fn analyze_decoded(
    decoded: &DynamicImage,
    target: Option<&Dimensions>,
) -> Result<ImageAnalysis> {
    let (width, height) = decoded.dimensions();
    if width == 0 || height == 0 {
        return Err(ImagingError::EmptyImage { width, height });
    }

    let alpha_capable = decoded.color().has_alpha();
    let rgba = decoded.to_rgba8();

    let (has_transparency, edge_transparency) = if alpha_capable {
        scan_transparency(&rgba)
    } else {
        (false, false)
    };

    let is_dark = average_luma(&rgba)
        .map(|luma| luma < DARK_LUMA_THRESHOLD)
        .unwrap_or(false);

    let resolution_warning = target.and_then(|dims| resolution_warning(width, height, dims));

    Ok(ImageAnalysis {
        width,
        height,
        has_transparency,
        edge_transparency,
        is_dark,
        resolution_warning,
    })
}

/// Returns (any transparency, edge transparency).
fn scan_transparency(rgba: &RgbaImage) -> (bool, bool) {
    let (width, height) = rgba.dimensions();
    let mut any = false;

    let mut edge = false;
    for x in 0..width {
        if rgba.get_pixel(x, 0)[3] < OPAQUE_ALPHA || rgba.get_pixel(x, height - 1)[3] < OPAQUE_ALPHA
        {
            edge = true;
            break;
        }
    }
    if !edge {
        for y in 0..height {
            if rgba.get_pixel(0, y)[3] < OPAQUE_ALPHA
                || rgba.get_pixel(width - 1, y)[3] < OPAQUE_ALPHA
            {
                edge = true;
                break;
            }
        }
    }

    if edge {
        any = true;
    } else {
        for pixel in rgba.pixels() {
            if pixel[3] < OPAQUE_ALPHA {
                any = true;
                break;
            }
        }
    }

    (any, edge)
}

/// Average luma (0.299R + 0.587G + 0.114B) over a strided sample of
/// sufficiently opaque pixels. `None` when nothing qualifies.
fn average_luma(rgba: &RgbaImage) -> Option<f64> {
    let total = rgba.width() as u64 * rgba.height() as u64;
    let stride = (total / u64::from(MAX_LUMA_SAMPLES)).max(1) as usize;

    let mut sum = 0.0;
    let mut count = 0u64;
    for pixel in rgba.pixels().step_by(stride) {
        if pixel[3] > LUMA_ALPHA_CUTOFF {
            let luma = 0.299 * f64::from(pixel[0])
                + 0.587 * f64::from(pixel[1])
                + 0.114 * f64::from(pixel[2]);
            sum += luma;
            count += 1;
        }
    }

    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Resolution check on the limiting axis against the target physical size.
fn resolution_warning(
    width: u32,
    height: u32,
    target: &Dimensions,
) -> Option<ResolutionWarning> {
    let (target_w_cm, target_h_cm) = target.footprint_cm()?;
    let warn_w = check_resolution(width, target_w_cm);
    let warn_h = check_resolution(height, target_h_cm);
    match (warn_w, warn_h) {
        (Some(a), Some(b)) => {
            if a.effective_ppi <= b.effective_ppi {
                Some(a)
            } else {
                Some(b)
            }
        }
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
