//! Filesystem implementation of StorageBackend
//!
//! Stores one file per key under a base directory, with `/`-separated key
//! segments becoming subdirectories (`asset/ab12...` →
//! `{base}/asset/ab12...`). Writes go to a sibling `.tmp` file first and are
//! renamed into place, so a failed write never corrupts the previous value.

use crate::core::{InvoxResult, StorageError};
use crate::storage::StorageBackend;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Filesystem storage backend
///
/// The base directory is created lazily on first write.
#[derive(Debug, Clone)]
pub struct FsBackend {
    base_path: PathBuf,
}

impl FsBackend {
    /// Create a backend rooted at `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Map a key to its on-disk path, rejecting keys that escape the root.
    fn key_path(&self, key: &str) -> InvoxResult<PathBuf> {
        let escapes = key.is_empty()
            || key
                .split('/')
                .any(|segment| segment.is_empty() || segment == "." || segment == "..");
        if escapes {
            return Err(StorageError::InvalidKey {
                key: key.to_string(),
            }
            .into());
        }
        Ok(self.base_path.join(key))
    }
}

fn io_error(operation: &str, path: &Path, err: std::io::Error) -> StorageError {
    StorageError::Backend {
        backend: "fs",
        message: format!("{} {}: {}", operation, path.display(), err),
    }
}

#[async_trait]
impl StorageBackend for FsBackend {
    async fn read(&self, key: &str) -> InvoxResult<Option<Vec<u8>>> {
        let path = self.key_path(key)?;
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error("read", &path, err).into()),
        }
    }

    async fn write(&self, key: &str, value: &[u8]) -> InvoxResult<()> {
        let path = self.key_path(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| io_error("create dir", parent, err))?;
        }

        // Write-then-rename keeps the previous value intact on failure.
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp_path = path.with_file_name(format!("{}.tmp", file_name));
        fs::write(&tmp_path, value)
            .await
            .map_err(|err| io_error("write", &tmp_path, err))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|err| io_error("rename", &path, err))?;

        tracing::debug!(key = %key, size = value.len(), "fs backend: write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> InvoxResult<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(io_error("remove", &path, err).into()),
        }
    }

    async fn keys(&self, prefix: &str) -> InvoxResult<Vec<String>> {
        let mut found = Vec::new();
        let mut pending = vec![self.base_path.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(io_error("read dir", &dir, err).into()),
            };

            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|err| io_error("read dir entry", &dir, err))?
            {
                let path = entry.path();
                let file_type = entry
                    .file_type()
                    .await
                    .map_err(|err| io_error("stat", &path, err))?;
                if file_type.is_dir() {
                    pending.push(path);
                    continue;
                }
                if path.extension().is_some_and(|ext| ext == "tmp") {
                    continue;
                }
                if let Ok(relative) = path.strip_prefix(&self.base_path) {
                    let key = relative.to_string_lossy().replace('\\', "/");
                    if key.starts_with(prefix) {
                        found.push(key);
                    }
                }
            }
        }

        Ok(found)
    }
}
