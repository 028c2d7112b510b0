//! Invoice record store
//!
//! The whole ordered collection lives JSON-encoded under one key and every
//! mutation is a read-modify-write of that value. There is no
//! optimistic-concurrency check: two independent writers sharing a backend
//! race on the whole collection and the last write wins.
//!
//! Inline image payloads never reach the persisted collection. `add` and
//! `update` resolve them through the [`AssetStore`] into an `icon_hash`
//! reference and strip the raw data before writing.

use crate::core::{
    InvoiceRecord, InvoxResult, NotFoundError, StorageError, ValidationError,
};
use crate::storage::StorageBackend;
use crate::store::AssetStore;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;
use uuid::Uuid;

/// Backend key of the serialized record collection.
pub const RECORDS_KEY: &str = "invoices";

/// Store for the ordered invoice collection.
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
    assets: AssetStore,
}

impl RecordStore {
    /// Build a record store and its asset store over the same backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let assets = AssetStore::new(backend.clone());
        Self { backend, assets }
    }

    /// The asset store this record store resolves logo references through.
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    async fn load(&self) -> InvoxResult<Vec<InvoiceRecord>> {
        match self.backend.read(RECORDS_KEY).await? {
            None => Ok(Vec::new()),
            Some(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                StorageError::Serialization {
                    key: RECORDS_KEY.to_string(),
                    message: err.to_string(),
                }
                .into()
            }),
        }
    }

    async fn persist(&self, records: &[InvoiceRecord]) -> InvoxResult<()> {
        let bytes = serde_json::to_vec(records).map_err(|err| StorageError::Serialization {
            key: RECORDS_KEY.to_string(),
            message: err.to_string(),
        })?;
        self.backend.write(RECORDS_KEY, &bytes).await
    }

    /// Decode any inline image on `record` into the asset store and replace
    /// it with its content-hash reference.
    async fn resolve_inline_image(&self, record: &mut InvoiceRecord) -> InvoxResult<()> {
        let Some(data) = record.icon_data.take() else {
            return Ok(());
        };

        // Accept both a bare base64 string and a full data URI.
        let encoded = data
            .rsplit_once("base64,")
            .map(|(_, tail)| tail)
            .unwrap_or(data.as_str());

        let payload = BASE64.decode(encoded.trim()).map_err(|err| {
            ValidationError::InvalidImageData {
                message: err.to_string(),
            }
        })?;

        let hash = self.assets.put(&payload).await?;
        record.icon_hash = Some(hash);
        Ok(())
    }

    /// All records in insertion order.
    pub async fn list(&self) -> InvoxResult<Vec<InvoiceRecord>> {
        self.load().await
    }

    /// A single record by id, or `None`.
    pub async fn get(&self, id: &str) -> InvoxResult<Option<InvoiceRecord>> {
        Ok(self.load().await?.into_iter().find(|record| record.id == id))
    }

    /// Add `candidate` to the collection.
    ///
    /// Assigns a fresh id, resolves any inline image into an asset
    /// reference, and appends. The collection write is all-or-nothing: on
    /// failure the previously stored collection is untouched.
    pub async fn add(&self, mut candidate: InvoiceRecord) -> InvoxResult<InvoiceRecord> {
        candidate.id = Uuid::new_v4().to_string();
        self.resolve_inline_image(&mut candidate).await?;

        let mut records = self.load().await?;
        records.push(candidate.clone());
        self.persist(&records).await?;

        tracing::info!(
            id = %candidate.id,
            invoice_number = candidate.invoice_number,
            "record store: added invoice"
        );
        Ok(candidate)
    }

    /// Replace the stored record with `record.id`.
    ///
    /// A new inline image replaces the previous asset reference (the old
    /// asset entry is left behind). When the incoming record carries
    /// neither inline data nor a reference, the previous reference — and
    /// the previous icon display name, if the incoming one is empty — are
    /// carried forward so an update never silently drops an attached logo.
    pub async fn update(&self, mut record: InvoiceRecord) -> InvoxResult<InvoiceRecord> {
        if record.id.is_empty() {
            return Err(ValidationError::MissingId { operation: "update" }.into());
        }

        let mut records = self.load().await?;
        let position = records
            .iter()
            .position(|existing| existing.id == record.id)
            .ok_or_else(|| NotFoundError::Record {
                id: record.id.clone(),
            })?;

        if record.icon_data.is_some() {
            self.resolve_inline_image(&mut record).await?;
        } else if record.icon_hash.is_none() {
            let previous = &records[position];
            record.icon_hash = previous.icon_hash.clone();
            if record.icon_name.is_empty() {
                record.icon_name = previous.icon_name.clone();
            }
        }

        records[position] = record.clone();
        self.persist(&records).await?;

        tracing::info!(id = %record.id, "record store: updated invoice");
        Ok(record)
    }

    /// Remove the record with `id`, if present.
    ///
    /// Unknown ids are a no-op. The referenced asset, if any, is not
    /// touched — orphaning is accepted.
    pub async fn delete(&self, id: &str) -> InvoxResult<()> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            tracing::debug!(id = %id, "record store: delete of unknown id ignored");
            return Ok(());
        }

        self.persist(&records).await?;
        tracing::info!(id = %id, "record store: deleted invoice");
        Ok(())
    }

    /// Empty the record collection and, independently, the asset store.
    pub async fn clear_all(&self) -> InvoxResult<()> {
        self.backend.remove(RECORDS_KEY).await?;
        self.assets.clear().await?;
        tracing::info!("record store: cleared all records and assets");
        Ok(())
    }
}
