//! Persistence round trips across real file-backed backends.

use stickerkit_core::{Dimensions, StickerShape};
use stickerkit_editor::{TransformState, Vec2};
use stickerkit_store::{
    Asset, AssetRole, DesignDraft, FileKvStore, FsBlobStore, PersistenceStore, StorageTier,
    INLINE_LIMIT_BYTES,
};

fn sample_transform() -> TransformState {
    TransformState {
        scale: 1.75,
        rotation: -22.5,
        position: Vec2::new(14.0, -3.5),
    }
}

#[tokio::test]
async fn draft_survives_store_reconstruction() {
    let dir = tempfile::tempdir().unwrap();
    let kv_path = dir.path().join("meta.json");
    let blob_root = dir.path().join("blobs");

    let bytes = vec![42u8; INLINE_LIMIT_BYTES + 100];
    let (draft, asset) = {
        let mut store = PersistenceStore::new(
            Box::new(FileKvStore::new(&kv_path)),
            Box::new(FsBlobStore::new(&blob_root)),
        );
        let asset = store
            .store_asset("rt-1", AssetRole::Original, "logo.png", "image/png", bytes.clone())
            .await;
        assert_eq!(asset.tier, StorageTier::Blob);

        let mut draft = DesignDraft::new(
            asset.clone(),
            StickerShape::Diecut,
            Dimensions::rect(10.0, 7.0),
        );
        draft.id = "rt-1".to_string();
        draft.mark_saved(sample_transform(), chrono::Utc::now());
        store.save_draft(&draft).unwrap();
        (draft, asset)
    };

    // Session reload: a fresh store over the same backends
    let store = PersistenceStore::new(
        Box::new(FileKvStore::new(&kv_path)),
        Box::new(FsBlobStore::new(&blob_root)),
    );
    let loaded = store.load_draft().unwrap().expect("draft persisted");
    assert_eq!(loaded.shape, draft.shape);
    assert_eq!(loaded.dimensions, draft.dimensions);
    assert_eq!(loaded.transform, sample_transform());
    assert_eq!(loaded.last_saved_transform, sample_transform());
    assert_eq!(store.load_asset(&asset).await.unwrap(), bytes);
}

#[tokio::test]
async fn quota_degradation_keeps_session_working() {
    let dir = tempfile::tempdir().unwrap();
    let blob_root = dir.path().join("blobs");

    // Metadata store with a quota too small for any draft record
    let mut store = PersistenceStore::new(
        Box::new(FileKvStore::new(dir.path().join("meta.json")).with_quota(8)),
        Box::new(FsBlobStore::new(&blob_root)),
    );

    let draft = DesignDraft::new(
        Asset::inline("a.png", "image/png", vec![1, 2, 3]),
        StickerShape::Square,
        Dimensions::rect(5.0, 5.0),
    );
    store.save_draft(&draft).unwrap();
    assert!(store.is_degraded());

    // Within the session the draft reads back intact
    let loaded = store.load_draft().unwrap().expect("mirrored draft");
    assert_eq!(loaded, draft);
}

#[tokio::test]
async fn clear_draft_removes_blob_files() {
    let dir = tempfile::tempdir().unwrap();
    let blob_root = dir.path().join("blobs");
    let mut store = PersistenceStore::new(
        Box::new(FileKvStore::new(dir.path().join("meta.json"))),
        Box::new(FsBlobStore::new(&blob_root)),
    );

    let bytes = vec![9u8; INLINE_LIMIT_BYTES + 1];
    let asset = store
        .store_asset("rt-2", AssetRole::Original, "a.png", "image/png", bytes)
        .await;
    let mut draft = DesignDraft::new(asset.clone(), StickerShape::Circle, Dimensions::circle(5.0));
    draft.id = "rt-2".to_string();
    store.save_draft(&draft).unwrap();

    store.clear_draft("rt-2").await.unwrap();
    assert!(store.load_draft().unwrap().is_none());
    assert!(store.load_asset(&asset).await.is_err());
}
