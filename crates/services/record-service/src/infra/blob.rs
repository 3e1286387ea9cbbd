//! Blob storage for uploaded files.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult, BlobConfig};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stores raw bytes under a slash-separated path and hands out a URL.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload `bytes` to `path` and return its download URL
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<String>;

    /// Remove the blob at `path`. Removing a missing blob succeeds.
    async fn delete(&self, path: &str) -> AppResult<()>;
}

/// Build the storage path `{collection}/{scope_id}/{uuid}_{name}`.
///
/// Path separators in the original name are replaced so the file always
/// lands directly under its scope.
pub fn blob_path(collection: &str, scope_id: &str, original_name: &str) -> String {
    let name = original_name.replace(['/', '\\'], "_");
    format!("{}/{}/{}_{}", collection, scope_id, Uuid::new_v4(), name)
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

// =============================================================================
// Filesystem
// =============================================================================

/// Blob store on the local filesystem, served from `base_url`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    base_url: String,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &BlobConfig) -> Self {
        Self::new(&config.root_dir, &config.base_url)
    }

    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if path.is_empty() || escapes {
            return Err(AppError::validation(format!("Invalid blob path: {}", path)));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<String> {
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::blob(format!("{}: {}", parent.display(), e)))?;
        }
        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|e| AppError::blob(format!("{}: {}", target.display(), e)))?;

        debug!(path, size = bytes.len(), "Blob written");
        Ok(join_url(&self.base_url, path))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                debug!(path, "Blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::blob(format!("{}: {}", target.display(), e))),
        }
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Blob store kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub const URL_PREFIX: &'static str = "memory://blobs";

    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes stored at `path`
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, path: &str, bytes: Vec<u8>) -> AppResult<String> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), bytes);
        Ok(join_url(Self::URL_PREFIX, path))
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.blobs
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path);
        Ok(())
    }
}
