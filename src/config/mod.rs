//! Runtime configuration of the document-rendering endpoint
//!
//! The endpoint URL and the PDF backend variant are user-editable and
//! persisted locally, like every other piece of state, through a
//! [`StorageBackend`] — under the `settings` key as YAML. Absent settings
//! fall back to the documented localhost default.

use crate::core::{ConfigError, InvoxResult};
use crate::storage::StorageBackend;
use serde::{Deserialize, Serialize};

/// Backend key of the serialized settings.
pub const SETTINGS_KEY: &str = "settings";

/// Default rendering-service URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// PDF conversion backend offered by the rendering service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfBackend {
    #[default]
    LibreOffice,
    Docx2pdf,
}

impl PdfBackend {
    /// The query-parameter value the rendering service expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfBackend::LibreOffice => "libreoffice",
            PdfBackend::Docx2pdf => "docx2pdf",
        }
    }
}

/// Configuration for the document-generation client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base URL of the rendering service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Which PDF conversion backend the service should use.
    #[serde(default)]
    pub pdf_backend: PdfBackend,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pdf_backend: PdfBackend::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse configuration from a YAML string.
    ///
    /// Unknown keys are tolerated; absent keys fall back to defaults.
    pub fn from_yaml_str(yaml: &str) -> InvoxResult<Self> {
        serde_yaml::from_str(yaml).map_err(|err| {
            ConfigError::ParseError {
                message: err.to_string(),
            }
            .into()
        })
    }

    /// Render this configuration as YAML.
    pub fn to_yaml_string(&self) -> InvoxResult<String> {
        serde_yaml::to_string(self).map_err(|err| {
            ConfigError::ParseError {
                message: err.to_string(),
            }
            .into()
        })
    }

    /// Load the persisted configuration, or the default when none is stored.
    pub async fn load(backend: &dyn StorageBackend) -> InvoxResult<Self> {
        match backend.read(SETTINGS_KEY).await? {
            None => Ok(Self::default()),
            Some(bytes) => {
                let text = String::from_utf8(bytes).map_err(|err| ConfigError::ParseError {
                    message: err.to_string(),
                })?;
                Self::from_yaml_str(&text)
            }
        }
    }

    /// Persist this configuration.
    pub async fn save(&self, backend: &dyn StorageBackend) -> InvoxResult<()> {
        let yaml = self.to_yaml_string()?;
        backend.write(SETTINGS_KEY, yaml.as_bytes()).await
    }
}
