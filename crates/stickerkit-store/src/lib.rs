//! # StickerKit Store
//!
//! Tiered draft persistence: the design draft's structured metadata goes
//! to a small synchronous key-value store, artwork payloads go inline,
//! to an async blob store, or to process memory, each tier a strict
//! fallback of the previous. Backends are injected; degradation to a
//! lower tier is logged and published, never surfaced as an error unless
//! every tier fails.

pub mod backend;
pub mod draft;
pub mod error;
pub mod store;

pub use backend::{BlobStore, FileKvStore, FsBlobStore, KvStore, MemoryBlobStore, MemoryKvStore};
pub use draft::{
    asset_key, Asset, AssetRole, DesignDraft, PreviewKind, StorageTier, POSITION_EPSILON_PX,
    ROTATION_EPSILON_DEG, SCALE_EPSILON,
};
pub use error::{Result, StoreError};
pub use store::{PersistenceStore, DRAFT_METADATA_KEY, INLINE_LIMIT_BYTES};
