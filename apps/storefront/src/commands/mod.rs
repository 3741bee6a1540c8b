//! # Commands
//!
//! One function per CLI action. Each takes only the state it needs and
//! returns a serializable response or an [`ApiError`](crate::error::ApiError).
//!
//! ## Available Commands
//!
//! ### Product Commands ([`product`])
//! - `list_products` - Load one or more pages, optionally filtered
//! - `get_product` - Single product by id
//! - `list_categories` - Category tabs
//!
//! ### Cart Commands ([`cart`])
//! - `get_cart`, `add_to_cart`, `remove_from_cart`, `update_cart_item`,
//!   `clear_cart`

pub mod cart;
pub mod product;

use storefront_core::ProductId;

use crate::error::ApiError;

/// Parses a product id typed by the user.
pub fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    let id: ProductId = raw.parse()?;
    if id.get() == 0 {
        return Err(ApiError::validation("product id must be positive"));
    }
    Ok(id)
}
