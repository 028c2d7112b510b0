//! Integration tests for FsBackend using the storage test harness.
//!
//! Each test gets a fresh scratch directory, so tests are fully isolated
//! and can run in parallel.

#[macro_use]
mod storage_harness;

use invox::storage::FsBackend;
use storage_harness::scratch_dir;

storage_backend_tests!(FsBackend::new(scratch_dir("fs")));
