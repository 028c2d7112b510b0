//! Storage backends for the persisted state
//!
//! All persisted state — the invoice collection, logo assets, generated
//! artifacts and settings — goes through the [`StorageBackend`] trait: named
//! keys mapping to opaque byte values. The stores never touch a concrete
//! backend type, which keeps them testable against the in-memory fake.
//!
//! Keys are `/`-separated namespaces (`invoices`, `asset/{hash}`,
//! `artifact/{name}`, `settings`).
//!
//! # Backends
//!
//! - [`InMemoryBackend`] — process-local map; tests and ephemeral runs
//! - [`FsBackend`] — one file per key under a base directory
//! - `LmdbBackend` — embedded LMDB database (feature `lmdb`)

use crate::core::InvoxResult;
use async_trait::async_trait;

pub mod fs;
pub mod in_memory;
#[cfg(feature = "lmdb")]
pub mod lmdb;

pub use fs::FsBackend;
pub use in_memory::InMemoryBackend;
#[cfg(feature = "lmdb")]
pub use lmdb::LmdbBackend;

/// Byte-valued key-value persistence.
///
/// Implementations must make `write` atomic per key: a failed write leaves
/// the previous value (or absence) intact. `remove` is idempotent. No
/// ordering is guaranteed across independent processes sharing a backend —
/// the last whole-value writer wins.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Read the value under `key`, or `None` if the key is absent.
    async fn read(&self, key: &str) -> InvoxResult<Option<Vec<u8>>>;

    /// Write `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &[u8]) -> InvoxResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> InvoxResult<()>;

    /// List all keys starting with `prefix`, in unspecified order.
    async fn keys(&self, prefix: &str) -> InvoxResult<Vec<String>>;
}
