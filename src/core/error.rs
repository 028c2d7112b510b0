//! Typed error handling for the invox core
//!
//! This module provides the error type hierarchy shared by every component,
//! so callers can handle failures specifically rather than dealing with
//! generic `anyhow::Error` values.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: a caller-supplied record is unusable as given
//! - [`NotFoundError`]: a reference to an unknown record
//! - [`StorageError`]: local persistence read/write failures
//! - [`ParseError`]: malformed import text
//! - [`GenerationError`]: failures talking to the document-rendering service
//! - [`ConfigError`]: unreadable or unparseable runtime configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use invox::prelude::*;
//!
//! match store.update(record).await {
//!     Ok(updated) => println!("saved {}", updated.id),
//!     Err(InvoxError::NotFound(NotFoundError::Record { id })) => {
//!         eprintln!("invoice {} no longer exists", id);
//!     }
//!     Err(e) => eprintln!("update failed: {}", e),
//! }
//! ```

use std::fmt;

/// The main error type for the invox core
///
/// Each variant contains a more specific error type for that category.
/// No error here is fatal to the process — every failure is local to the
/// operation that triggered it and prior state is left intact.
#[derive(Debug)]
pub enum InvoxError {
    /// Caller-supplied input is unusable (e.g. update without an id)
    Validation(ValidationError),

    /// Reference to a record that does not exist
    NotFound(NotFoundError),

    /// Local persistence errors (backend I/O, quota, serialization)
    Storage(StorageError),

    /// Import text could not be parsed
    Parse(ParseError),

    /// Document-rendering service errors
    Generation(GenerationError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for InvoxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoxError::Validation(e) => write!(f, "{}", e),
            InvoxError::NotFound(e) => write!(f, "{}", e),
            InvoxError::Storage(e) => write!(f, "{}", e),
            InvoxError::Parse(e) => write!(f, "{}", e),
            InvoxError::Generation(e) => write!(f, "{}", e),
            InvoxError::Config(e) => write!(f, "{}", e),
            InvoxError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for InvoxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvoxError::Validation(e) => Some(e),
            InvoxError::NotFound(e) => Some(e),
            InvoxError::Storage(e) => Some(e),
            InvoxError::Parse(e) => Some(e),
            InvoxError::Generation(e) => Some(e),
            InvoxError::Config(e) => Some(e),
            InvoxError::Internal(_) => None,
        }
    }
}

impl InvoxError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InvoxError::Validation(e) => e.error_code(),
            InvoxError::NotFound(_) => "RECORD_NOT_FOUND",
            InvoxError::Storage(e) => e.error_code(),
            InvoxError::Parse(_) => "PARSE_ERROR",
            InvoxError::Generation(e) => e.error_code(),
            InvoxError::Config(_) => "CONFIG_ERROR",
            InvoxError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors for caller-supplied input that cannot be processed
#[derive(Debug)]
pub enum ValidationError {
    /// The operation requires a record id and none was given
    MissingId { operation: &'static str },

    /// Inline image data is not decodable base64
    InvalidImageData { message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId { operation } => {
                write!(f, "Cannot {} a record without an id", operation)
            }
            ValidationError::InvalidImageData { message } => {
                write!(f, "Inline image data is not valid base64: {}", message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingId { .. } => "MISSING_RECORD_ID",
            ValidationError::InvalidImageData { .. } => "INVALID_IMAGE_DATA",
        }
    }
}

impl From<ValidationError> for InvoxError {
    fn from(err: ValidationError) -> Self {
        InvoxError::Validation(err)
    }
}

// =============================================================================
// Not-found Errors
// =============================================================================

/// A reference to a record that is not in the store
#[derive(Debug)]
pub enum NotFoundError {
    /// No record with this id exists
    Record { id: String },
}

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundError::Record { id } => {
                write!(f, "Invoice record with id '{}' not found", id)
            }
        }
    }
}

impl std::error::Error for NotFoundError {}

impl From<NotFoundError> for InvoxError {
    fn from(err: NotFoundError) -> Self {
        InvoxError::NotFound(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the local persistence layer
#[derive(Debug)]
pub enum StorageError {
    /// The backend rejected or failed an operation
    Backend { backend: &'static str, message: String },

    /// A persisted value could not be encoded or decoded
    Serialization { key: String, message: String },

    /// A key is not usable with this backend (path escapes, empty, ...)
    InvalidKey { key: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Backend { backend, message } => {
                write!(f, "{} storage error: {}", backend, message)
            }
            StorageError::Serialization { key, message } => {
                write!(f, "Failed to encode/decode value under '{}': {}", key, message)
            }
            StorageError::InvalidKey { key } => {
                write!(f, "Invalid storage key: '{}'", key)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::Backend { .. } => "STORAGE_BACKEND_ERROR",
            StorageError::Serialization { .. } => "STORAGE_SERIALIZATION_ERROR",
            StorageError::InvalidKey { .. } => "STORAGE_INVALID_KEY",
        }
    }
}

impl From<StorageError> for InvoxError {
    fn from(err: StorageError) -> Self {
        InvoxError::Storage(err)
    }
}

// =============================================================================
// Parse Errors
// =============================================================================

/// Malformed import text
///
/// The import path never fails on missing or wrong-typed fields — those are
/// defaulted. It fails only when the input is not a structured document at
/// all, and the reason is carried for display to the user.
#[derive(Debug)]
pub enum ParseError {
    /// The text is not parseable YAML
    InvalidDocument { message: String },

    /// The document parsed but is not a key/value mapping
    NotAMapping,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidDocument { message } => {
                write!(f, "Import text is not valid YAML: {}", message)
            }
            ParseError::NotAMapping => {
                write!(f, "Import text must be a key/value mapping")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for InvoxError {
    fn from(err: ParseError) -> Self {
        InvoxError::Parse(err)
    }
}

// =============================================================================
// Generation Errors
// =============================================================================

/// Failures from the document-rendering round trip
#[derive(Debug)]
pub enum GenerationError {
    /// The endpoint answered with a non-success status
    Endpoint { status: u16, message: String },

    /// The request never completed (connect, DNS, interrupted body, ...)
    Transport { message: String },

    /// The endpoint answered 2xx but the body is not a usable document
    InvalidDocument { message: String },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Endpoint { status, message } => {
                write!(f, "Rendering service returned status {}: {}", status, message)
            }
            GenerationError::Transport { message } => {
                write!(f, "Rendering service unreachable: {}", message)
            }
            GenerationError::InvalidDocument { message } => {
                write!(f, "Rendering service returned an unusable document: {}", message)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl GenerationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GenerationError::Endpoint { .. } => "GENERATION_ENDPOINT_ERROR",
            GenerationError::Transport { .. } => "GENERATION_TRANSPORT_ERROR",
            GenerationError::InvalidDocument { .. } => "GENERATION_INVALID_DOCUMENT",
        }
    }
}

impl From<GenerationError> for InvoxError {
    fn from(err: GenerationError) -> Self {
        InvoxError::Generation(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to runtime configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse a configuration document
    ParseError { message: String },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { message } => {
                write!(f, "Failed to parse config: {}", message)
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for InvoxError {
    fn from(err: ConfigError) -> Self {
        InvoxError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for InvoxError {
    fn from(err: std::io::Error) -> Self {
        InvoxError::Storage(StorageError::Backend {
            backend: "fs",
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for InvoxError {
    fn from(err: serde_yaml::Error) -> Self {
        InvoxError::Parse(ParseError::InvalidDocument {
            message: err.to_string(),
        })
    }
}

/// Convert from anyhow::Error for interop at the edges
impl From<anyhow::Error> for InvoxError {
    fn from(err: anyhow::Error) -> Self {
        InvoxError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for invox operations
pub type InvoxResult<T> = Result<T, InvoxError>;

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = NotFoundError::Record {
            id: "abc-123".to_string(),
        };
        assert!(err.to_string().contains("abc-123"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_validation_error_codes() {
        let err = ValidationError::MissingId { operation: "update" };
        assert_eq!(err.error_code(), "MISSING_RECORD_ID");
        assert!(err.to_string().contains("update"));

        let err = ValidationError::InvalidImageData {
            message: "bad padding".to_string(),
        };
        assert_eq!(err.error_code(), "INVALID_IMAGE_DATA");
    }

    #[test]
    fn test_generation_error_carries_status_and_body() {
        let err = GenerationError::Endpoint {
            status: 500,
            message: "server error".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("server error"));
        assert_eq!(err.error_code(), "GENERATION_ENDPOINT_ERROR");
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Backend {
            backend: "lmdb",
            message: "map full".to_string(),
        };
        assert!(err.to_string().contains("lmdb"));
        assert!(err.to_string().contains("map full"));
    }

    #[test]
    fn test_invox_error_conversion() {
        let not_found = NotFoundError::Record {
            id: "x".to_string(),
        };
        let err: InvoxError = not_found.into();
        assert_eq!(err.error_code(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>(": : :").unwrap_err();
        let err: InvoxError = yaml_err.into();
        assert!(matches!(err, InvoxError::Parse(ParseError::InvalidDocument { .. })));
    }

    #[test]
    fn test_parse_error_reason_is_human_readable() {
        let err = ParseError::InvalidDocument {
            message: "mapping values are not allowed in this context".to_string(),
        };
        assert!(err.to_string().contains("not valid YAML"));
        assert!(err.to_string().contains("mapping values"));
    }
}
