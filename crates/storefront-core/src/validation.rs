//! # Validation Module
//!
//! Sanity checks for data coming off the wire or typed in at the CLI.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Field types, decimal price → cents                                │
//! │  └── Unknown fields ignored                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Product id / title / price sanity                                 │
//! │  └── Category slug and page number before they hit a URL               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart reducer                                                 │
//! │  └── Quantities clamped, totals re-derived                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_category_slug, validate_page};
//!
//! validate_category_slug("gaming").unwrap();
//! validate_page(1).unwrap();
//! assert!(validate_page(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest category slug accepted.
pub const MAX_SLUG_LEN: usize = 64;

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product decoded from the catalog service.
///
/// ## Rules
/// - Id must be non-zero
/// - Title must not be blank
/// - Price must not be negative
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    if product.id.get() == 0 {
        return Err(ValidationError::MustBePositive {
            field: "product id".to_string(),
        });
    }

    if product.title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if product.price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a category slug before it is put in a query string.
///
/// ```rust
/// use storefront_core::validation::validate_category_slug;
///
/// assert!(validate_category_slug("audio").is_ok());
/// assert!(validate_category_slug("  ").is_err());
/// assert!(validate_category_slug("a/b").is_err());
/// ```
pub fn validate_category_slug(slug: &str) -> ValidationResult<()> {
    let slug = slug.trim();

    if slug.is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    if slug.len() > MAX_SLUG_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_SLUG_LEN,
        });
    }

    if slug.contains('/') {
        return Err(ValidationError::InvalidFormat {
            field: "category".to_string(),
            reason: "must not contain '/'".to_string(),
        });
    }

    Ok(())
}

/// Pages are 1-based.
pub fn validate_page(page: u32) -> ValidationResult<()> {
    if page == 0 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
