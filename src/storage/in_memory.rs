//! In-memory implementation of StorageBackend for testing and development

use crate::core::{InvoxResult, StorageError};
use crate::storage::StorageBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory storage backend
///
/// Useful for testing and ephemeral runs. Uses RwLock for thread-safe
/// access; clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryBackend {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryBackend {
    /// Create a new, empty in-memory backend
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(message: impl std::fmt::Display) -> StorageError {
    StorageError::Backend {
        backend: "in-memory",
        message: format!("failed to acquire lock: {}", message),
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    async fn read(&self, key: &str) -> InvoxResult<Option<Vec<u8>>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &[u8]) -> InvoxResult<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn remove(&self, key: &str) -> InvoxResult<()> {
        let mut entries = self.entries.write().map_err(lock_error)?;
        entries.remove(key);
        Ok(())
    }

    async fn keys(&self, prefix: &str) -> InvoxResult<Vec<String>> {
        let entries = self.entries.read().map_err(lock_error)?;
        Ok(entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
