//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Command Function: Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── Store error?      StoreError::QueryFailed ──────┐          │
//! │         ├── Catalog error?    CatalogError::Status ─────────┤          │
//! │         ├── Validation error? ValidationError::Required ────┼─► ApiError│
//! │         └── Success ──────────────────────────────────────► output     │
//! │                                                                         │
//! │  --json:  {"code": "CATALOG_UNAVAILABLE", "message": "..."}            │
//! │  text:    ✗ [CatalogUnavailable] HTTP 503 from https://...              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_catalog::CatalogError;
use storefront_core::{CoreError, ValidationError};
use storefront_store::StoreError;

/// Error returned from commands.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Local store failed
    DatabaseError,

    /// Catalog service unreachable or answered with an error
    CatalogUnavailable,

    /// Catalog service answered with something we could not use
    CatalogError,

    /// Configuration is unusable
    ConfigError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self.code {
            ErrorCode::ValidationError | ErrorCode::ConfigError => 2,
            ErrorCode::NotFound => 3,
            ErrorCode::CatalogUnavailable | ErrorCode::CatalogError => 4,
            ErrorCode::DatabaseError | ErrorCode::Internal => 1,
        }
    }
}

/// Converts store errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed(e) => {
                tracing::error!("Store connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Local store could not be opened")
            }
            StoreError::MigrationFailed(e) => {
                tracing::error!("Store migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Local store migration failed")
            }
            StoreError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Local store is busy")
            }
            StoreError::Corrupt { key, .. } => ApiError::new(
                ErrorCode::DatabaseError,
                format!("Stored value '{}' is corrupt", key),
            ),
            StoreError::QueryFailed(e) | StoreError::Internal(e) => {
                tracing::error!("Store operation failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Local store operation failed")
            }
        }
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Status { status: 404, url } => ApiError::not_found("Resource", &url),
            _ if err.is_transient() => ApiError::new(ErrorCode::CatalogUnavailable, err.to_string()),
            CatalogError::Transport(_) | CatalogError::Status { .. } | CatalogError::Malformed(_) => {
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
            CatalogError::Validation(e) => ApiError::validation(e.to_string()),
            CatalogError::InvalidConfig(_)
            | CatalogError::ConfigLoadFailed(_)
            | CatalogError::InvalidUrl(_) => ApiError::new(ErrorCode::ConfigError, err.to_string()),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::MalformedSnapshot(_) | CoreError::UnsupportedSnapshotVersion { .. } => {
                ApiError::new(ErrorCode::DatabaseError, err.to_string())
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Product", "42");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 42");
    }

    #[test]
    fn test_catalog_mapping() {
        let err: ApiError = CatalogError::Status {
            status: 503,
            url: "https://fakestoreapi.in/api/products".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
        assert_eq!(err.exit_code(), 4);

        let err: ApiError = CatalogError::Status {
            status: 404,
            url: "https://fakestoreapi.in/api/products/999".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);

        // A rejected request will not succeed on retry
        let err: ApiError = CatalogError::Status {
            status: 400,
            url: "https://fakestoreapi.in/api/products?page=1&limit=8".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert_eq!(err.exit_code(), 4);

        let err: ApiError = CatalogError::Transport("connection refused".into()).into();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }

    #[test]
    fn test_store_mapping_hides_sql() {
        let err: ApiError = StoreError::QueryFailed("no such table: kv_store".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("kv_store"));
    }

    #[test]
    fn test_display() {
        let err = ApiError::validation("page must be positive");
        assert_eq!(err.to_string(), "[ValidationError] page must be positive");
    }
}
