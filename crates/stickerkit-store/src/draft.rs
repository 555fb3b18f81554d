//! The persisted design draft.
//!
//! `DesignDraft` is the single unit of work the store persists: asset
//! references, the live and last-saved transforms, and the cut
//! shape/dimensions. The unsaved-changes flag is derived here from one
//! canonical comparison, never stored or re-derived elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use stickerkit_core::{Dimensions, StickerShape};
use stickerkit_editor::TransformState;
use uuid::Uuid;

/// Scale difference below which a draft counts as saved.
pub const SCALE_EPSILON: f64 = 0.005;
/// Rotation difference in degrees below which a draft counts as saved.
pub const ROTATION_EPSILON_DEG: f64 = 0.5;
/// Position difference in pixels below which a draft counts as saved.
pub const POSITION_EPSILON_PX: f64 = 0.5;

/// Which storage tier holds an asset's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageTier {
    /// Payload embedded in the metadata record
    Inline,
    /// Payload in the async blob store, referenced by key
    Blob,
    /// Payload held only in process memory for this session
    Memory,
}

impl fmt::Display for StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageTier::Inline => write!(f, "inline"),
            StorageTier::Blob => write!(f, "blob"),
            StorageTier::Memory => write!(f, "memory"),
        }
    }
}

/// Role of an asset within a draft, used to derive its blob key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetRole {
    /// The uploaded artwork as received
    Original,
    /// The flattened export produced on save
    Edited,
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetRole::Original => write!(f, "original"),
            AssetRole::Edited => write!(f, "edited"),
        }
    }
}

/// How the uploaded artwork can be previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PreviewKind {
    /// Decoded and rendered as a raster preview
    #[default]
    Raster,
    /// Bytes retained but not previewable (undecodable upload)
    Unsupported,
}

/// An artwork payload reference: inline bytes or a blob-store key.
///
/// Exactly one of `inline_data` / `storage_key` is authoritative,
/// according to `tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Original file name
    pub name: String,
    /// MIME type as reported at upload
    pub mime_type: String,
    /// File modification time as reported at upload, if any
    pub last_modified: Option<DateTime<Utc>>,
    /// Payload bytes, for the inline tier only
    pub inline_data: Option<Vec<u8>>,
    /// Blob key, for the blob and memory tiers
    pub storage_key: Option<String>,
    /// Tier holding the payload
    pub tier: StorageTier,
}

impl Asset {
    /// Creates an inline asset.
    pub fn inline(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            last_modified: None,
            inline_data: Some(bytes),
            storage_key: None,
            tier: StorageTier::Inline,
        }
    }

    /// Creates a key-referenced asset in the given tier.
    pub fn keyed(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        key: impl Into<String>,
        tier: StorageTier,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            last_modified: None,
            inline_data: None,
            storage_key: Some(key.into()),
            tier,
        }
    }

    /// Payload size if the asset is inline.
    pub fn inline_len(&self) -> Option<usize> {
        self.inline_data.as_ref().map(|d| d.len())
    }
}

/// The persisted unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDraft {
    /// Stable draft identity, also the blob-key prefix
    pub id: String,
    /// The uploaded artwork
    pub original: Asset,
    /// The flattened export, once a save has produced one
    pub edited: Option<Asset>,
    /// Whether the artwork could be decoded for preview
    pub preview_kind: PreviewKind,
    /// Live transform at last save
    pub transform: TransformState,
    /// Transform against which unsaved changes are measured
    pub last_saved_transform: TransformState,
    /// Cut shape
    pub shape: StickerShape,
    /// Cut dimensions
    pub dimensions: Dimensions,
    /// Last save time
    pub updated_at: DateTime<Utc>,
}

impl DesignDraft {
    /// Creates a draft for a freshly uploaded asset with a new id and the
    /// identity transform.
    pub fn new(original: Asset, shape: StickerShape, dimensions: Dimensions) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            original,
            edited: None,
            preview_kind: PreviewKind::Raster,
            transform: TransformState::identity(),
            last_saved_transform: TransformState::identity(),
            shape,
            dimensions,
            updated_at: Utc::now(),
        }
    }

    /// The blob key for one of this draft's assets.
    pub fn asset_key(&self, role: AssetRole) -> String {
        asset_key(&self.id, role)
    }

    /// Whether the live editor state diverges from what was last saved.
    ///
    /// The single canonical comparison behind every "unsaved changes"
    /// indicator: transform beyond the epsilons, or a different
    /// shape/dimensions.
    pub fn has_unsaved_changes(
        &self,
        live_transform: &TransformState,
        live_shape: StickerShape,
        live_dimensions: &Dimensions,
    ) -> bool {
        live_transform.diverges_from(
            &self.last_saved_transform,
            SCALE_EPSILON,
            ROTATION_EPSILON_DEG,
            POSITION_EPSILON_PX,
        ) || live_shape != self.shape
            || *live_dimensions != self.dimensions
    }

    /// Records a save of the given transform.
    pub fn mark_saved(&mut self, transform: TransformState, now: DateTime<Utc>) {
        self.transform = transform;
        self.last_saved_transform = transform;
        self.updated_at = now;
    }
}

/// The blob key for a draft's asset: `{draft_id}:{role}`.
pub fn asset_key(draft_id: &str, role: AssetRole) -> String {
    format!("{draft_id}:{role}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerkit_editor::Vec2;

    fn draft() -> DesignDraft {
        DesignDraft::new(
            Asset::inline("cat.png", "image/png", vec![1, 2, 3]),
            StickerShape::Rectangle,
            Dimensions::rect(8.0, 5.0),
        )
    }

    #[test]
    fn test_unsaved_changes_epsilons() {
        let d = draft();
        let mut live = TransformState::identity();
        assert!(!d.has_unsaved_changes(&live, d.shape, &d.dimensions));

        live.position = Vec2::new(0.4, 0.0);
        assert!(!d.has_unsaved_changes(&live, d.shape, &d.dimensions));
        live.position = Vec2::new(0.6, 0.0);
        assert!(d.has_unsaved_changes(&live, d.shape, &d.dimensions));
    }

    #[test]
    fn test_shape_change_is_unsaved() {
        let d = draft();
        let live = TransformState::identity();
        assert!(d.has_unsaved_changes(&live, StickerShape::Circle, &d.dimensions));
        assert!(d.has_unsaved_changes(&live, d.shape, &Dimensions::rect(12.0, 8.0)));
    }

    #[test]
    fn test_mark_saved_resets_divergence() {
        let mut d = draft();
        let live = TransformState {
            scale: 1.4,
            rotation: 30.0,
            position: Vec2::new(10.0, -4.0),
        };
        assert!(d.has_unsaved_changes(&live, d.shape, &d.dimensions));
        d.mark_saved(live, Utc::now());
        assert!(!d.has_unsaved_changes(&live, d.shape, &d.dimensions));
    }

    #[test]
    fn test_asset_key_format() {
        assert_eq!(asset_key("d-1", AssetRole::Original), "d-1:original");
        assert_eq!(asset_key("d-1", AssetRole::Edited), "d-1:edited");
    }

    #[test]
    fn test_metadata_round_trip() {
        let d = draft();
        let json = serde_json::to_string(&d).unwrap();
        let back: DesignDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
