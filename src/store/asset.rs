//! Content-addressed asset store
//!
//! Logo images are stored once per distinct payload: the key is the
//! lowercase hex SHA-256 of the bytes, so identical uploads land on the same
//! entry and `put` is idempotent. Nothing here tracks which records
//! reference an asset — replacing or deleting a record can orphan entries,
//! and `clear` is the only reclaim path.

use crate::core::InvoxResult;
use crate::storage::StorageBackend;
use sha2::{Digest, Sha256};
use std::sync::Arc;

const ASSET_PREFIX: &str = "asset/";

/// Content hash of a payload: lowercase hex SHA-256.
pub fn content_hash(payload: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(payload);
    format!("{:x}", hasher.finalize())
}

/// Content-addressed store for binary assets.
#[derive(Clone)]
pub struct AssetStore {
    backend: Arc<dyn StorageBackend>,
}

impl AssetStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn key_for(hash: &str) -> String {
        format!("{}{}", ASSET_PREFIX, hash)
    }

    /// Store `payload` and return its content hash.
    ///
    /// If an entry with the same hash already exists it is left unchanged.
    pub async fn put(&self, payload: &[u8]) -> InvoxResult<String> {
        let hash = content_hash(payload);
        let key = Self::key_for(&hash);

        if self.backend.read(&key).await?.is_none() {
            self.backend.write(&key, payload).await?;
            tracing::debug!(hash = %hash, size = payload.len(), "asset store: stored payload");
        } else {
            tracing::debug!(hash = %hash, "asset store: payload already present");
        }

        Ok(hash)
    }

    /// Fetch the payload for `hash`, or `None` if no such asset exists.
    pub async fn get(&self, hash: &str) -> InvoxResult<Option<Vec<u8>>> {
        self.backend.read(&Self::key_for(hash)).await
    }

    /// Remove the asset under `hash`. Removing an unknown hash is not an
    /// error.
    pub async fn delete(&self, hash: &str) -> InvoxResult<()> {
        self.backend.remove(&Self::key_for(hash)).await
    }

    /// Remove every stored asset.
    pub async fn clear(&self) -> InvoxResult<()> {
        let keys = self.backend.keys(ASSET_PREFIX).await?;
        let count = keys.len();
        for key in keys {
            self.backend.remove(&key).await?;
        }
        tracing::debug!(count, "asset store: cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBackend;

    fn store() -> AssetStore {
        AssetStore::new(Arc::new(InMemoryBackend::new()))
    }

    #[tokio::test]
    async fn test_get_put_roundtrip() {
        let assets = store();
        let hash = assets.put(b"png-bytes").await.unwrap();
        assert_eq!(assets.get(&hash).await.unwrap(), Some(b"png-bytes".to_vec()));
    }

    #[tokio::test]
    async fn test_put_is_idempotent() {
        let assets = store();
        let first = assets.put(b"logo").await.unwrap();
        let second = assets.put(b"logo").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_distinct_payloads_get_distinct_keys() {
        let assets = store();
        let a = assets.put(b"logo-a").await.unwrap();
        let b = assets.put(b"logo-b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let assets = store();
        let hash = assets.put(b"logo").await.unwrap();
        assets.delete(&hash).await.unwrap();
        assets.delete(&hash).await.unwrap();
        assert_eq!(assets.get(&hash).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_removes_everything() {
        let assets = store();
        let a = assets.put(b"one").await.unwrap();
        let b = assets.put(b"two").await.unwrap();
        assets.clear().await.unwrap();
        assert_eq!(assets.get(&a).await.unwrap(), None);
        assert_eq!(assets.get(&b).await.unwrap(), None);
    }

    #[test]
    fn test_content_hash_is_deterministic() {
        assert_eq!(content_hash(b"x"), content_hash(b"x"));
        assert_ne!(content_hash(b"x"), content_hash(b"y"));
        assert_eq!(content_hash(b"x").len(), 64);
    }
}
