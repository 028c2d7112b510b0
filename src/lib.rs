//! # Invox
//!
//! The persistence and data-integrity core of an invoice manager.
//!
//! ## Features
//!
//! - **Injected Storage**: every piece of state goes through the
//!   [`StorageBackend`](storage::StorageBackend) trait — in-memory,
//!   filesystem, or LMDB (feature `lmdb`)
//! - **Content-Addressed Assets**: logo images deduplicated by SHA-256
//! - **Consistent References**: updates never silently drop an attached
//!   logo; inline image data never reaches the persisted collection
//! - **YAML Import/Export**: human-editable field-sets with tolerant,
//!   field-by-field defaulting on import
//! - **Document Generation**: typed client for the external DOCX/PDF
//!   rendering service
//! - **List Views**: filtering and multi-key sorting, including totals
//!   computed from free-text service lines
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invox::prelude::*;
//! use std::sync::Arc;
//!
//! let backend = Arc::new(InMemoryBackend::new());
//! let records = RecordStore::new(backend.clone());
//!
//! let added = records
//!     .add(InvoiceRecord {
//!         client_name: "Mike Smith".to_string(),
//!         invoice_number: 1008,
//!         hourly_rate: 300.0,
//!         services: vec!["AI Consultancy (2 hours)".to_string()],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let config = GeneratorConfig::load(backend.as_ref()).await?;
//! let client = DocumentClient::new(config);
//! let artifact = client.generate(&added, records.assets(), OutputFormat::Pdf).await?;
//! ```

pub mod codec;
pub mod config;
pub mod core;
pub mod generate;
pub mod storage;
pub mod store;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{
            ConfigError, GenerationError, InvoxError, InvoxResult, NotFoundError, ParseError,
            StorageError, ValidationError,
        },
        invoice::{InvoiceDraft, InvoiceRecord},
        query::{view, SortDirection, SortField},
    };

    // === Stores ===
    pub use crate::store::{AssetStore, RecordStore};

    // === Storage ===
    pub use crate::storage::{FsBackend, InMemoryBackend, StorageBackend};
    #[cfg(feature = "lmdb")]
    pub use crate::storage::LmdbBackend;

    // === Codec ===
    pub use crate::codec::{export, import};

    // === Generation ===
    pub use crate::generate::{Artifact, DocumentClient, GenerateRequest, OutputFormat};

    // === Config ===
    pub use crate::config::{GeneratorConfig, PdfBackend};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
