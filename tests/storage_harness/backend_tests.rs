//! Macro-generated test suite for `StorageBackend` contract validation.
//!
//! The `storage_backend_tests!` macro generates a test module that
//! validates any `StorageBackend` implementation against the full
//! contract: read/write/remove semantics, prefix key listing, binary
//! payloads, and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use invox::storage::InMemoryBackend;
//!
//! storage_backend_tests!(InMemoryBackend::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_write_then_read` — a written value reads back byte-identical
//! - `test_read_missing_returns_none` — absent keys are `None`, not errors
//! - `test_overwrite_replaces_value` — a second write wins
//! - `test_remove_then_read` — removed keys read as absent
//! - `test_remove_missing_is_ok` — removal is idempotent
//! - `test_binary_payload_roundtrip` — non-UTF-8 bytes survive unchanged
//! - `test_empty_value_roundtrip` — zero-length values are stored, not dropped
//! - `test_keys_filters_by_prefix` — namespaced enumeration
//! - `test_keys_on_empty_store` — enumeration of nothing is empty, not an error
//! - `test_concurrent_writers` — parallel writes to distinct keys both land

/// Generate a full `StorageBackend` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an instance
/// implementing `StorageBackend`. It is re-evaluated for each test to
/// ensure isolation. For the concurrency test the backend must also be
/// `Clone + Send + 'static` (the standard pattern: Clone shares the
/// backing store via Arc).
#[macro_export]
macro_rules! storage_backend_tests {
    ($factory:expr) => {
        mod backend_contract_tests {
            use super::*;
            use invox::storage::StorageBackend;

            #[tokio::test]
            async fn test_write_then_read() {
                let backend = $factory;
                backend.write("invoices", b"[]").await.unwrap();
                assert_eq!(
                    backend.read("invoices").await.unwrap(),
                    Some(b"[]".to_vec())
                );
            }

            #[tokio::test]
            async fn test_read_missing_returns_none() {
                let backend = $factory;
                assert_eq!(backend.read("absent").await.unwrap(), None);
            }

            #[tokio::test]
            async fn test_overwrite_replaces_value() {
                let backend = $factory;
                backend.write("settings", b"old").await.unwrap();
                backend.write("settings", b"new").await.unwrap();
                assert_eq!(
                    backend.read("settings").await.unwrap(),
                    Some(b"new".to_vec())
                );
            }

            #[tokio::test]
            async fn test_remove_then_read() {
                let backend = $factory;
                backend.write("settings", b"x").await.unwrap();
                backend.remove("settings").await.unwrap();
                assert_eq!(backend.read("settings").await.unwrap(), None);
            }

            #[tokio::test]
            async fn test_remove_missing_is_ok() {
                let backend = $factory;
                backend.remove("never-written").await.unwrap();
            }

            #[tokio::test]
            async fn test_binary_payload_roundtrip() {
                let backend = $factory;
                let payload: Vec<u8> = vec![0x89, 0x50, 0x4e, 0x47, 0x00, 0xff, 0x7f];
                backend.write("asset/deadbeef", &payload).await.unwrap();
                assert_eq!(
                    backend.read("asset/deadbeef").await.unwrap(),
                    Some(payload)
                );
            }

            #[tokio::test]
            async fn test_empty_value_roundtrip() {
                let backend = $factory;
                backend.write("empty", b"").await.unwrap();
                assert_eq!(backend.read("empty").await.unwrap(), Some(Vec::new()));
            }

            #[tokio::test]
            async fn test_keys_filters_by_prefix() {
                let backend = $factory;
                backend.write("asset/aa", b"1").await.unwrap();
                backend.write("asset/bb", b"2").await.unwrap();
                backend.write("artifact/invoice_1.pdf", b"3").await.unwrap();
                backend.write("invoices", b"4").await.unwrap();

                let mut asset_keys = backend.keys("asset/").await.unwrap();
                asset_keys.sort();
                assert_eq!(
                    asset_keys,
                    vec!["asset/aa".to_string(), "asset/bb".to_string()]
                );

                let all_keys = backend.keys("").await.unwrap();
                assert_eq!(all_keys.len(), 4);
            }

            #[tokio::test]
            async fn test_keys_on_empty_store() {
                let backend = $factory;
                assert!(backend.keys("asset/").await.unwrap().is_empty());
            }

            /// Parallel writes to distinct keys from spawned tasks both land.
            #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
            async fn test_concurrent_writers() {
                let backend = $factory;
                let b1 = backend.clone();
                let b2 = backend.clone();

                let h1 = tokio::spawn(async move { b1.write("left", b"l").await });
                let h2 = tokio::spawn(async move { b2.write("right", b"r").await });

                let (r1, r2) = tokio::try_join!(h1, h2).unwrap();
                r1.unwrap();
                r2.unwrap();

                assert_eq!(backend.read("left").await.unwrap(), Some(b"l".to_vec()));
                assert_eq!(backend.read("right").await.unwrap(), Some(b"r".to_vec()));
            }
        }
    };
}
