//! Unit conversion utilities
//!
//! Handles conversion between centimeters, inches, and print pixels.
//! Print resolution math (pixels-per-inch against a physical target size)
//! lives here so the analyzer and the export renderer agree on it.

use serde::{Deserialize, Serialize};

/// Millimeter-exact centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;

/// Resolution below which uploads get a quality warning
pub const MIN_RECOMMENDED_PPI: f64 = 200.0;

/// Resolution recommended for print output
pub const TARGET_PRINT_PPI: f64 = 300.0;

/// Converts centimeters to inches.
pub fn cm_to_inch(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

/// Converts inches to centimeters.
pub fn inch_to_cm(inch: f64) -> f64 {
    inch * CM_PER_INCH
}

/// Effective print resolution when `native_px` pixels cover `cm`
/// centimeters. Returns 0 for non-positive physical sizes.
pub fn pixels_per_inch(native_px: u32, cm: f64) -> f64 {
    if cm <= 0.0 {
        return 0.0;
    }
    f64::from(native_px) / cm_to_inch(cm)
}

/// Pixel count needed to print `cm` centimeters at `ppi`.
pub fn print_pixels(cm: f64, ppi: f64) -> u32 {
    (cm_to_inch(cm) * ppi).round().max(1.0) as u32
}

/// Print-resolution warning attached to an analyzed upload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolutionWarning {
    /// Effective PPI on the limiting axis.
    pub effective_ppi: f64,
    /// Minimum acceptable PPI.
    pub minimum_ppi: f64,
    /// PPI recommended for clean print output.
    pub recommended_ppi: f64,
}

/// Checks whether `native_px` pixels printed across `cm` centimeters stay
/// above the minimum recommended resolution.
pub fn check_resolution(native_px: u32, cm: f64) -> Option<ResolutionWarning> {
    let ppi = pixels_per_inch(native_px, cm);
    if ppi < MIN_RECOMMENDED_PPI {
        Some(ResolutionWarning {
            effective_ppi: ppi,
            minimum_ppi: MIN_RECOMMENDED_PPI,
            recommended_ppi: TARGET_PRINT_PPI,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cm_inch_round_trip() {
        assert!((cm_to_inch(2.54) - 1.0).abs() < 1e-12);
        assert!((inch_to_cm(1.0) - 2.54).abs() < 1e-12);
        assert!((inch_to_cm(cm_to_inch(13.7)) - 13.7).abs() < 1e-12);
    }

    #[test]
    fn test_pixels_per_inch() {
        // 1000 px over 10 cm = 1000 / 3.937 inch = 254 ppi
        assert!((pixels_per_inch(1000, 10.0) - 254.0).abs() < 1e-9);
        assert_eq!(pixels_per_inch(1000, 0.0), 0.0);
    }

    #[test]
    fn test_print_pixels() {
        // 10 cm at 300 ppi = 3.937 in * 300 = 1181 px
        assert_eq!(print_pixels(10.0, 300.0), 1181);
        assert_eq!(print_pixels(2.54, 300.0), 300);
    }

    #[test]
    fn test_resolution_warning_threshold() {
        // 1000 px over 10 cm = 254 ppi, fine
        assert!(check_resolution(1000, 10.0).is_none());
        // 500 px over 10 cm = 127 ppi, warns
        let warn = check_resolution(500, 10.0).expect("should warn");
        assert!((warn.effective_ppi - 127.0).abs() < 1e-9);
        assert_eq!(warn.recommended_ppi, TARGET_PRINT_PPI);
    }
}
