//! Domain error types
//!
//! This module defines the error hierarchy for reco-export.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main reco-export error type
///
/// This is the primary error type used throughout the library. Failures are
/// never retried at this layer; they are surfaced to the immediate caller.
#[derive(Debug, Error)]
pub enum RecoError {
    /// No data source holds the requested `(id, language)` pair
    #[error("Item not found: id={id}, language={language}")]
    ItemNotFound { id: String, language: String },

    /// Boundary access on a collection without elements
    #[error("Collection is empty")]
    EmptyCollection,

    /// Unknown grouping strategy key
    #[error("Unsupported group item strategy '{key}'. Available strategies: {}", .available.join(", "))]
    UnsupportedGroupItemStrategy { key: String, available: Vec<String> },

    /// Unknown credentials method key
    #[error("Unsupported export credentials method '{method}'. Available methods: {}", .available.join(", "))]
    UnsupportedExportCredentialsMethod {
        method: String,
        available: Vec<String>,
    },

    /// Malformed input rejected at construction time
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Another export run holds the lock marker
    #[error("Export is locked: {0}")]
    ExportLocked(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Failure reported by an underlying data source
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Notification delivery errors
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl RecoError {
    /// Shorthand for [`RecoError::ItemNotFound`]
    pub fn item_not_found(id: impl Into<String>, language: impl Into<String>) -> Self {
        RecoError::ItemNotFound {
            id: id.into(),
            language: language.into(),
        }
    }

    /// Whether this error is a source's "not found" signal
    pub fn is_not_found(&self) -> bool {
        matches!(self, RecoError::ItemNotFound { .. })
    }
}

/// Recommendation engine notification errors
///
/// These errors don't expose the HTTP client types.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Failed to reach the endpoint
    #[error("Failed to connect to recommendation endpoint: {0}")]
    ConnectionFailed(String),

    /// Endpoint answered with a non-success status
    #[error("Recommendation endpoint rejected notification: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Request timeout
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

impl From<std::io::Error> for RecoError {
    fn from(err: std::io::Error) -> Self {
        RecoError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RecoError {
    fn from(err: serde_json::Error) -> Self {
        RecoError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RecoError {
    fn from(err: toml::de::Error) -> Self {
        RecoError::Configuration(format!("TOML parse error: {err}"))
    }
}
