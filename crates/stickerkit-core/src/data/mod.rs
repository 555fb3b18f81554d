//! Static data tables: material finishes and the size preset catalog.

pub mod catalog;
pub mod materials;

pub use catalog::{DimensionCatalog, PresetSize, SizePreset};
pub use materials::Material;
