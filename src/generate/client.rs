//! HTTP client for the document-rendering service

use crate::config::GeneratorConfig;
use crate::core::{GenerationError, InvoiceRecord, InvoxResult};
use crate::generate::{Artifact, GenerateRequest, OutputFormat};
use crate::storage::StorageBackend;
use crate::store::AssetStore;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Client for the rendering endpoint.
///
/// One `generate` call is one attempt: failures surface to the caller, who
/// owns any retry policy. A second call while one is pending is the
/// caller's responsibility to prevent.
pub struct DocumentClient {
    http: reqwest::Client,
    config: GeneratorConfig,
}

impl DocumentClient {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The record's logo as base64, preferring transient inline data over
    /// the stored asset.
    async fn resolve_icon_data(
        &self,
        record: &InvoiceRecord,
        assets: &AssetStore,
    ) -> InvoxResult<Option<String>> {
        if let Some(data) = &record.icon_data {
            return Ok(Some(data.clone()));
        }
        let Some(hash) = &record.icon_hash else {
            return Ok(None);
        };
        Ok(assets.get(hash).await?.map(|bytes| BASE64.encode(bytes)))
    }

    /// Ask the rendering service for a document.
    ///
    /// On a non-success response the server's error body is carried in
    /// [`GenerationError::Endpoint`]; the caller's record is untouched.
    pub async fn generate(
        &self,
        record: &InvoiceRecord,
        assets: &AssetStore,
        format: OutputFormat,
    ) -> InvoxResult<Artifact> {
        let icon_data = self.resolve_icon_data(record, assets).await?;
        let payload = GenerateRequest::from_record(record, icon_data);
        let url = format!(
            "{}/generate-invoice",
            self.config.base_url.trim_end_matches('/')
        );

        tracing::info!(
            invoice_number = record.invoice_number,
            format = format.as_str(),
            url = %url,
            "requesting document generation"
        );

        let mut request = self.http.post(&url).query(&[("format", format.as_str())]);
        if format == OutputFormat::Pdf {
            request = request.query(&[("pdf_backend", self.config.pdf_backend.as_str())]);
        }

        let response = request.json(&payload).send().await.map_err(|err| {
            GenerationError::Transport {
                message: err.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(
                invoice_number = record.invoice_number,
                status = status.as_u16(),
                "rendering service rejected the request"
            );
            return Err(GenerationError::Endpoint {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let bytes = response.bytes().await.map_err(|err| {
            GenerationError::Transport {
                message: err.to_string(),
            }
        })?;
        if bytes.is_empty() {
            return Err(GenerationError::InvalidDocument {
                message: "empty response body".to_string(),
            }
            .into());
        }

        tracing::info!(
            invoice_number = record.invoice_number,
            size = bytes.len(),
            "document generated"
        );
        Ok(Artifact {
            format,
            bytes: bytes.to_vec(),
        })
    }

    /// Persist a generated document and return its locator.
    ///
    /// The locator is the backend key; the caller writes it onto the record
    /// via the record store. Regenerating overwrites the same key.
    pub async fn store_artifact(
        &self,
        backend: &dyn StorageBackend,
        record: &InvoiceRecord,
        artifact: &Artifact,
    ) -> InvoxResult<String> {
        let key = format!("artifact/{}", artifact.file_name(record.invoice_number));
        backend.write(&key, &artifact.bytes).await?;
        Ok(key)
    }
}
