//! Material finishes and their pricing multipliers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sticker material/finish
///
/// Each material carries a flat price multiplier applied to the shape base
/// price. Standard films are 1.0; premium finishes are 1.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    /// Standard white vinyl
    Vinyl,
    /// Clear polypropylene film
    PolypropFilm,
    /// Holographic foil (premium)
    HoloFoil,
    /// Brushed-alloy effect foil (premium)
    BrushedAlloy,
}

impl Material {
    /// All catalog materials, standard finishes first.
    pub const ALL: [Material; 4] = [
        Material::Vinyl,
        Material::PolypropFilm,
        Material::HoloFoil,
        Material::BrushedAlloy,
    ];

    /// Price multiplier applied to the shape base price.
    pub fn factor(&self) -> f64 {
        match self {
            Self::Vinyl | Self::PolypropFilm => 1.0,
            Self::HoloFoil | Self::BrushedAlloy => 1.3,
        }
    }

    /// Whether this is a premium finish.
    pub fn is_premium(&self) -> bool {
        self.factor() > 1.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::Vinyl
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vinyl => write!(f, "Vinyl"),
            Self::PolypropFilm => write!(f, "Polypropylene Film"),
            Self::HoloFoil => write!(f, "Holographic Foil"),
            Self::BrushedAlloy => write!(f, "Brushed Alloy"),
        }
    }
}

impl FromStr for Material {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vinyl" => Ok(Self::Vinyl),
            "polyprop_film" | "polypropylene" | "film" => Ok(Self::PolypropFilm),
            "holo_foil" | "holographic" => Ok(Self::HoloFoil),
            "brushed_alloy" | "alloy" => Ok(Self::BrushedAlloy),
            _ => Err(format!("Unknown material: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factors() {
        assert_eq!(Material::Vinyl.factor(), 1.0);
        assert_eq!(Material::PolypropFilm.factor(), 1.0);
        assert_eq!(Material::HoloFoil.factor(), 1.3);
        assert_eq!(Material::BrushedAlloy.factor(), 1.3);
    }

    #[test]
    fn test_premium_flag() {
        assert!(!Material::Vinyl.is_premium());
        assert!(Material::HoloFoil.is_premium());
    }

    #[test]
    fn test_parse() {
        assert_eq!("vinyl".parse::<Material>().unwrap(), Material::Vinyl);
        assert_eq!(
            "holographic".parse::<Material>().unwrap(),
            Material::HoloFoil
        );
        assert!("gold_leaf".parse::<Material>().is_err());
    }
}
