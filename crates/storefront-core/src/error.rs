//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Snapshot and domain errors                     │
//! │  └── ValidationError  - Payload validation failures                    │
//! │                                                                         │
//! │  storefront-store errors                                               │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  storefront-catalog errors                                             │
//! │  └── CatalogError     - HTTP / payload failures                        │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the UI sees (serialized)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves never fail, so nothing here is returned from
//! the cart reducer.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Persisted cart snapshot could not be decoded.
    ///
    /// ## When This Occurs
    /// - Storage was edited by hand or truncated
    /// - Snapshot written by an incompatible build
    #[error("Malformed cart snapshot: {0}")]
    MalformedSnapshot(String),

    /// Snapshot was written by a newer format version.
    #[error("Unsupported cart snapshot version {found} (supported up to {supported})")]
    UnsupportedSnapshotVersion { found: u32, supported: u32 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::MalformedSnapshot(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Validation errors for data received from the catalog service or the UI.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. a slug containing a path separator).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
