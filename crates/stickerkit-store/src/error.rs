//! Storage error types.

use thiserror::Error;

/// Errors from draft persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The metadata store rejected a write for exceeding its quota.
    #[error("metadata quota exceeded writing '{key}' ({size} bytes)")]
    QuotaExceeded {
        /// Key being written
        key: String,
        /// Size of the rejected value in bytes
        size: usize,
    },

    /// The blob store could not take or serve a blob.
    #[error("blob store unavailable for '{key}': {detail}")]
    BlobUnavailable {
        /// Blob key
        key: String,
        /// Backend-specific detail
        detail: String,
    },

    /// A referenced blob was not found in any tier.
    #[error("blob '{key}' not found in any storage tier")]
    BlobMissing {
        /// Blob key
        key: String,
    },

    /// An asset record references no retrievable payload.
    #[error("asset '{name}' has neither inline data nor a storage key")]
    AssetUnreadable {
        /// Asset file name
        name: String,
    },

    /// Persisted draft metadata could not be (de)serialized.
    #[error("draft metadata is corrupt: {source}")]
    CorruptMetadata {
        /// Underlying serde error
        #[from]
        source: serde_json::Error,
    },

    /// Filesystem I/O failed.
    #[error("storage i/o failed: {source}")]
    Io {
        /// Underlying i/o error
        #[from]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
