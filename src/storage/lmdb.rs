//! LMDB storage backend using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded key-value store — no external server required.
//! All operations are synchronous (memory-mapped I/O) and are wrapped in
//! `tokio::task::spawn_blocking` for async compatibility.
//!
//! A single named database (`kv`) holds every namespace: the invoice
//! collection, assets, artifacts and settings, keyed exactly like the other
//! backends. `keys(prefix)` uses LMDB's ordered keys for a prefix scan.
//!
//! # Feature flag
//!
//! Enable with `--features lmdb`. Requires the `heed` crate.

use crate::core::{InvoxResult, StorageError};
use crate::storage::StorageBackend;
use async_trait::async_trait;
use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;

/// LMDB-backed implementation of `StorageBackend`.
///
/// The `Env` is wrapped in an `Arc` for cheap cloning across async tasks.
#[derive(Clone)]
pub struct LmdbBackend {
    env: Arc<Env>,
    db: Database<Str, Bytes>,
}

impl LmdbBackend {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `kv` named database.
    ///
    /// The map size defaults to 256 MB which is plenty for invoice data.
    /// LMDB will not actually allocate that much — it is a virtual address
    /// space reservation.
    pub fn open(path: impl AsRef<Path>) -> InvoxResult<Self> {
        std::fs::create_dir_all(path.as_ref())
            .map_err(|err| StorageError::Backend {
                backend: "lmdb",
                message: format!("create dir {}: {}", path.as_ref().display(), err),
            })?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(256 * 1024 * 1024)
                .max_dbs(3)
                .max_readers(126)
                .open(path.as_ref())
                .map_err(lmdb_error)?
        };

        let mut wtxn = env.write_txn().map_err(lmdb_error)?;
        let db: Database<Str, Bytes> = env
            .create_database(&mut wtxn, Some("kv"))
            .map_err(lmdb_error)?;
        wtxn.commit().map_err(lmdb_error)?;

        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

fn lmdb_error(err: heed::Error) -> StorageError {
    StorageError::Backend {
        backend: "lmdb",
        message: err.to_string(),
    }
}

fn join_error(err: tokio::task::JoinError) -> StorageError {
    StorageError::Backend {
        backend: "lmdb",
        message: format!("blocking task failed: {}", err),
    }
}

#[async_trait]
impl StorageBackend for LmdbBackend {
    async fn read(&self, key: &str) -> InvoxResult<Option<Vec<u8>>> {
        let env = self.env.clone();
        let db = self.db;
        let key = key.to_string();

        tokio::task::spawn_blocking(move || -> InvoxResult<Option<Vec<u8>>> {
            let rtxn = env.read_txn().map_err(lmdb_error)?;
            Ok(db.get(&rtxn, &key).map_err(lmdb_error)?.map(<[u8]>::to_vec))
        })
        .await
        .map_err(join_error)?
    }

    async fn write(&self, key: &str, value: &[u8]) -> InvoxResult<()> {
        let env = self.env.clone();
        let db = self.db;
        let key = key.to_string();
        let value = value.to_vec();

        tokio::task::spawn_blocking(move || -> InvoxResult<()> {
            let mut wtxn = env.write_txn().map_err(lmdb_error)?;
            db.put(&mut wtxn, &key, &value).map_err(lmdb_error)?;
            wtxn.commit().map_err(lmdb_error)?;
            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    async fn remove(&self, key: &str) -> InvoxResult<()> {
        let env = self.env.clone();
        let db = self.db;
        let key = key.to_string();

        tokio::task::spawn_blocking(move || -> InvoxResult<()> {
            let mut wtxn = env.write_txn().map_err(lmdb_error)?;
            db.delete(&mut wtxn, &key).map_err(lmdb_error)?;
            wtxn.commit().map_err(lmdb_error)?;
            Ok(())
        })
        .await
        .map_err(join_error)?
    }

    async fn keys(&self, prefix: &str) -> InvoxResult<Vec<String>> {
        let env = self.env.clone();
        let db = self.db;
        let prefix = prefix.to_string();

        tokio::task::spawn_blocking(move || -> InvoxResult<Vec<String>> {
            let rtxn = env.read_txn().map_err(lmdb_error)?;
            let mut found = Vec::new();
            for item in db.prefix_iter(&rtxn, &prefix).map_err(lmdb_error)? {
                let (key, _value) = item.map_err(lmdb_error)?;
                found.push(key.to_string());
            }
            Ok(found)
        })
        .await
        .map_err(join_error)?
    }
}
