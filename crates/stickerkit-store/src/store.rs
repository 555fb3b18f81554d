//! Tiered draft persistence.
//!
//! Asset write path, each tier a strict fallback of the previous:
//! inline (payload small enough to embed in metadata) → async blob store →
//! process memory. Metadata goes to a synchronous key-value store under a
//! fixed versioned key; a quota rejection degrades the write to an
//! in-memory mirror so the session keeps working. Tier degradation is
//! logged and published as an event but is never surfaced as an error
//! unless every tier fails.

use crate::backend::{BlobStore, KvStore};
use crate::draft::{Asset, AssetRole, DesignDraft, StorageTier};
use crate::error::{Result, StoreError};
use std::collections::HashMap;
use std::sync::Arc;
use stickerkit_core::{DraftEvent, EditorEvent, EventBus};

/// Payloads at or below this size are embedded inline in the metadata.
pub const INLINE_LIMIT_BYTES: usize = 2_500_000;

/// Fixed key of the single session draft record.
pub const DRAFT_METADATA_KEY: &str = "stickerkit.draft.v1";

/// Draft persistence across injected storage backends.
///
/// Constructed once per session and passed by reference; holds the
/// in-memory fallback tier itself so nothing lives in ambient globals.
#[derive(Debug)]
pub struct PersistenceStore {
    kv: Box<dyn KvStore>,
    blobs: Box<dyn BlobStore>,
    memory_blobs: HashMap<String, Vec<u8>>,
    /// Metadata mirror used after a kv quota rejection. Newer than the kv
    /// record whenever present.
    memory_metadata: Option<String>,
    bus: Option<Arc<EventBus>>,
}

impl PersistenceStore {
    /// Creates a store over the given backends.
    pub fn new(kv: Box<dyn KvStore>, blobs: Box<dyn BlobStore>) -> Self {
        Self {
            kv,
            blobs,
            memory_blobs: HashMap::new(),
            memory_metadata: None,
            bus: None,
        }
    }

    /// Attaches an event bus; saves, clears, and degradations are published.
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Places an asset payload in the best available tier and returns the
    /// reference to persist.
    ///
    /// Never fails on blob-store unavailability; the payload falls through
    /// to process memory and the degradation is published.
    pub async fn store_asset(
        &mut self,
        draft_id: &str,
        role: AssetRole,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Asset {
        if bytes.len() <= INLINE_LIMIT_BYTES {
            return Asset::inline(name, mime_type, bytes);
        }

        let key = crate::draft::asset_key(draft_id, role);
        match self.blobs.put(&key, &bytes).await {
            Ok(()) => {
                tracing::debug!(key = %key, size = bytes.len(), "asset written to blob store");
                Asset::keyed(name, mime_type, key, StorageTier::Blob)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "blob store unavailable, keeping asset in memory");
                self.publish_degraded(format!("blob store unavailable for '{key}': {e}"));
                self.memory_blobs.insert(key.clone(), bytes);
                Asset::keyed(name, mime_type, key, StorageTier::Memory)
            }
        }
    }

    /// Reads an asset's payload back, walking tiers from the recorded one
    /// downward: inline bytes, then the blob store, then process memory.
    pub async fn load_asset(&self, asset: &Asset) -> Result<Vec<u8>> {
        if let Some(bytes) = &asset.inline_data {
            return Ok(bytes.clone());
        }
        let Some(key) = &asset.storage_key else {
            return Err(StoreError::AssetUnreadable {
                name: asset.name.clone(),
            });
        };
        if asset.tier == StorageTier::Blob {
            match self.blobs.get(key).await {
                Ok(Some(bytes)) => return Ok(bytes),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "blob read failed, trying memory tier");
                }
            }
        }
        self.memory_blobs
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::BlobMissing { key: key.clone() })
    }

    /// Persists the draft metadata record.
    ///
    /// A quota rejection degrades to the in-memory mirror and still
    /// succeeds: the session keeps working, the draft just won't survive a
    /// reload. Any other backend failure propagates.
    pub fn save_draft(&mut self, draft: &DesignDraft) -> Result<()> {
        let json = serde_json::to_string(draft)?;
        match self.kv.set(DRAFT_METADATA_KEY, &json) {
            Ok(()) => {
                self.memory_metadata = None;
                tracing::debug!(draft_id = %draft.id, "draft metadata saved");
            }
            Err(StoreError::QuotaExceeded { key, size }) => {
                tracing::warn!(
                    key = %key,
                    size,
                    "metadata quota exceeded, mirroring draft in memory"
                );
                self.publish_degraded(format!(
                    "metadata quota exceeded ({size} bytes), draft will not survive reload"
                ));
                self.memory_metadata = Some(json);
            }
            Err(e) => return Err(e),
        }
        if let Some(bus) = &self.bus {
            let _ = bus.publish(EditorEvent::Draft(DraftEvent::Saved {
                draft_id: draft.id.clone(),
            }));
        }
        Ok(())
    }

    /// Loads the session draft, if any. The memory mirror wins over the kv
    /// record because it only exists after a degraded (newer) save.
    pub fn load_draft(&self) -> Result<Option<DesignDraft>> {
        let json = match &self.memory_metadata {
            Some(json) => Some(json.clone()),
            None => self.kv.get(DRAFT_METADATA_KEY)?,
        };
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Removes the draft record and its blobs from every tier that may
    /// hold them.
    pub async fn clear_draft(&mut self, draft_id: &str) -> Result<()> {
        self.kv.remove(DRAFT_METADATA_KEY)?;
        self.memory_metadata = None;
        for role in [AssetRole::Original, AssetRole::Edited] {
            let key = crate::draft::asset_key(draft_id, role);
            if let Err(e) = self.blobs.delete(&key).await {
                tracing::warn!(key = %key, error = %e, "blob delete failed during clear");
            }
            self.memory_blobs.remove(&key);
        }
        if let Some(bus) = &self.bus {
            let _ = bus.publish(EditorEvent::Draft(DraftEvent::Cleared {
                draft_id: draft_id.to_string(),
            }));
        }
        tracing::debug!(draft_id = %draft_id, "draft cleared");
        Ok(())
    }

    /// Whether the last metadata save only reached the memory mirror.
    pub fn is_degraded(&self) -> bool {
        self.memory_metadata.is_some()
    }

    fn publish_degraded(&self, detail: String) {
        if let Some(bus) = &self.bus {
            let _ = bus.publish(EditorEvent::Draft(DraftEvent::StorageDegraded { detail }));
        }
    }
}
