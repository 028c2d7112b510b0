//! Domain stores built on a storage backend
//!
//! [`AssetStore`] holds logo images content-addressed by SHA-256;
//! [`RecordStore`] holds the ordered invoice collection and keeps its asset
//! references consistent across create/update/delete.

pub mod asset;
pub mod record;

pub use asset::AssetStore;
pub use record::RecordStore;
