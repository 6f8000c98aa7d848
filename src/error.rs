//! Error types shared by the handlers, helpers and the ARM client.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, VwanError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VwanError {
    /// Caller or programming mistake: missing upsert key, bad argument value.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A named item expected in a collection or path is absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failure reported by `az` or by the remote service.
    #[error("Remote error: {0}")]
    Remote(String),

    /// A response could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for VwanError {
    fn from(e: serde_json::Error) -> Self {
        VwanError::Json(e.to_string())
    }
}

impl VwanError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VwanError::NotFound(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, VwanError::Configuration(_))
    }
}
