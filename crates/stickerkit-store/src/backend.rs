//! Storage backends.
//!
//! Two seams, both injected into the persistence store rather than reached
//! through ambient globals: a small synchronous key-value store for draft
//! metadata, and an asynchronous blob store for artwork payloads.

use crate::error::{Result, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Synchronous key-value store for draft metadata.
///
/// Implementations enforce their own quota and report overflow as
/// [`StoreError::QuotaExceeded`]; the persistence store treats that as a
/// recoverable degradation, not a failure.
pub trait KvStore: fmt::Debug + Send {
    /// Reads a value, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;
    /// Writes a value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    /// Removes a value; absent keys are not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Asynchronous blob store for artwork payloads.
#[async_trait]
pub trait BlobStore: fmt::Debug + Send {
    /// Stores a blob under a key, replacing any previous payload.
    async fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()>;
    /// Reads a blob, `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    /// Deletes a blob; absent keys are not an error.
    async fn delete(&mut self, key: &str) -> Result<()>;
}

/// In-memory key-value store with an optional byte quota.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: HashMap<String, String>,
    max_value_bytes: Option<usize>,
}

impl MemoryKvStore {
    /// Creates an unbounded in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that rejects values larger than `max_value_bytes`.
    pub fn with_quota(max_value_bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            max_value_bytes: Some(max_value_bytes),
        }
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(max) = self.max_value_bytes {
            if value.len() > max {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed key-value store: one JSON object per file.
///
/// Suitable for the small metadata record; reads and rewrites the whole
/// file on every write.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    max_value_bytes: Option<usize>,
}

impl FileKvStore {
    /// Creates a store backed by `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_value_bytes: None,
        }
    }

    /// Sets a per-value byte quota.
    pub fn with_quota(mut self, max_value_bytes: usize) -> Self {
        self.max_value_bytes = Some(max_value_bytes);
        self
    }

    fn read_entries(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_entries(&self, entries: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(entries)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_entries()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if let Some(max) = self.max_value_bytes {
            if value.len() > max {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    size: value.len(),
                });
            }
        }
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.read_entries()?;
        if entries.remove(key).is_some() {
            self.write_entries(&entries)?;
        }
        Ok(())
    }
}

/// In-memory blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// Filesystem blob store: one file per key under a root directory.
#[derive(Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at `root`. The directory is created on first
    /// write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Blob keys contain `:` which is not filename-safe everywhere.
    fn file_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            })
            .collect();
        self.root.join(format!("{name}.blob"))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.file_for(key), bytes).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.file_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&mut self, key: &str) -> Result<()> {
        match tokio::fs::remove_file(self.file_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Returns `true` if `path` exists (helper for tests and cleanup tooling).
pub fn blob_file_exists(root: &Path, key: &str) -> bool {
    FsBlobStore::new(root).file_for(key).exists()
}
