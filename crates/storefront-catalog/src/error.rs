//! # Catalog Error Types
//!
//! Everything that can go wrong between us and the catalog service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  reqwest::Error ──────► Transport      (DNS, connect, timeout, TLS)    │
//! │  non-2xx response ────► Status         (status code + URL)             │
//! │  serde_json::Error ───► Malformed      (body is not what we expect)    │
//! │  ValidationError ─────► Validation     (decoded but nonsensical)       │
//! │  config problems ─────► InvalidConfig / ConfigLoadFailed               │
//! │                                                                         │
//! │  CatalogLoader turns any of these into CatalogState::error (a string). │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use storefront_core::ValidationError;
use thiserror::Error;

/// Catalog client and configuration errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request never produced a response.
    #[error("Request failed: {0}")]
    Transport(String),

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// Body could not be decoded.
    #[error("Malformed catalog response: {0}")]
    Malformed(String),

    /// Body decoded but failed validation.
    #[error("Invalid catalog data: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration values are invalid.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl CatalogError {
    /// True for failures worth a manual retry (network and 5xx).
    pub fn is_transient(&self) -> bool {
        match self {
            CatalogError::Transport(_) => true,
            CatalogError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return CatalogError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        CatalogError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Malformed(err.to_string())
    }
}

impl From<url::ParseError> for CatalogError {
    fn from(err: url::ParseError) -> Self {
        CatalogError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::ConfigLoadFailed(err.to_string())
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = CatalogError::Status {
            status: 503,
            url: "https://fakestoreapi.in/api/products".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 from https://fakestoreapi.in/api/products"
        );
        assert!(err.is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        let err = CatalogError::Status {
            status: 404,
            url: String::new(),
        };
        assert!(!err.is_transient());
        assert!(!CatalogError::Malformed("x".into()).is_transient());
    }
}
