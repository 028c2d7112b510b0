//! Shared test harness for storage backend testing
//!
//! Provides the `storage_backend_tests!` conformance macro plus small
//! helpers for backend construction.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

use std::path::PathBuf;

#[macro_use]
pub mod backend_tests;

/// A fresh scratch directory for a disk-backed backend under test.
///
/// The directory is kept after the `TempDir` guard would have removed it,
/// because the backend outlives this call; the OS temp dir reclaims it.
pub fn scratch_dir(label: &str) -> PathBuf {
    tempfile::Builder::new()
        .prefix(&format!("invox-{}-", label))
        .tempdir()
        .expect("create temp dir")
        .keep()
}
