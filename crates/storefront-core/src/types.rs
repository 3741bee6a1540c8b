//! # Domain Types
//!
//! Catalog types shared by the cart, the catalog loader and the UI layer.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │  CatalogPage    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (position)  │   │  products       │       │
//! │  │  title          │   │  category       │   │  page           │       │
//! │  │  price (Money)  │   │  name           │   │  total_pages?   │       │
//! │  │  category       │   │  slug           │   │  total_products?│       │
//! │  │  rating?        │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are owned by the external catalog service. They are decoded
//! once at the HTTP boundary and never mutated locally.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog-assigned product identifier.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(ProductId)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "product id".to_string(),
                reason: e.to_string(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// Customer rating summary attached to some products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// A product as listed by the catalog service.
///
/// ## Wire Format
/// ```json
/// {
///   "id": 1,
///   "title": "Sony WH-1000XM3",
///   "image": "https://...",
///   "price": 773,
///   "description": "...",
///   "category": "audio"
/// }
/// ```
/// Fields the storefront does not use (brand, model, discount, ...) are
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    pub title: String,

    /// Image URL. Rendering is the UI's business.
    #[serde(default)]
    pub image: String,

    /// Unit price, decimal on the wire.
    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    pub price: Money,

    #[serde(default)]
    pub description: String,

    /// Category slug as used by the category endpoint.
    #[serde(default)]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub rating: Option<Rating>,
}

impl Product {
    /// Creates a product with only the fields the cart cares about.
    ///
    /// Mostly useful for tests and fixtures; real products come from the
    /// catalog service.
    pub fn new(id: ProductId, title: impl Into<String>, price: Money) -> Self {
        Product {
            id,
            title: title.into(),
            image: String::new(),
            price,
            description: String::new(),
            category: String::new(),
            rating: None,
        }
    }

    /// Sets the category slug.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

// =============================================================================
// Category
// =============================================================================

/// A catalog category, as shown on the category tabs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Category {
    /// 1-based position in the list returned by the catalog service.
    pub id: u32,

    /// Raw category name from the catalog service.
    pub category: String,

    /// Display name: the slug with its first character upper-cased.
    pub name: String,

    /// Value passed back to the category endpoint.
    pub slug: String,
}

impl Category {
    /// Builds a category from its position (0-based) and raw API name.
    ///
    /// ```rust
    /// use storefront_core::Category;
    ///
    /// let c = Category::from_slug(0, "gaming");
    /// assert_eq!(c.id, 1);
    /// assert_eq!(c.name, "Gaming");
    /// assert_eq!(c.slug, "gaming");
    /// ```
    pub fn from_slug(index: usize, slug: &str) -> Self {
        let mut chars = slug.chars();
        let name = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };

        Category {
            id: (index + 1) as u32,
            category: slug.to_string(),
            name,
            slug: slug.to_string(),
        }
    }
}

// =============================================================================
// Catalog Page
// =============================================================================

/// One fetch-sized batch of products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogPage {
    pub products: Vec<Product>,

    /// Page number this batch was requested as.
    pub page: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub total_pages: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub total_products: Option<u32>,
}

impl CatalogPage {
    /// Wraps a category listing, which the catalog service never paginates.
    pub fn single(products: Vec<Product>) -> Self {
        let total = products.len() as u32;
        CatalogPage {
            products,
            page: 1,
            total_pages: Some(1),
            total_products: Some(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_decodes_wire_format() {
        let json = r#"{
            "id": 7,
            "title": "Logitech G733",
            "image": "https://example.test/g733.jpg",
            "price": 129.99,
            "description": "Wireless headset",
            "brand": "logitech",
            "model": "G733",
            "color": "white",
            "category": "gaming",
            "discount": 10
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price.cents(), 12999);
        assert_eq!(product.category, "gaming");
        assert!(product.rating.is_none());
    }

    #[test]
    fn test_product_with_rating() {
        let json = r#"{"id": 1, "title": "Bag", "price": 109.95,
                       "rating": {"rate": 3.9, "count": 120}}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        let rating = product.rating.unwrap();
        assert_eq!(rating.count, 120);
        assert!((rating.rate - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_product_id_parsing() {
        assert_eq!("42".parse::<ProductId>().unwrap(), ProductId::new(42));
        assert_eq!(" 3 ".parse::<ProductId>().unwrap(), ProductId::new(3));
        assert!("abc".parse::<ProductId>().is_err());
        assert!("-1".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_category_from_slug() {
        let c = Category::from_slug(2, "tv");
        assert_eq!(c.id, 3);
        assert_eq!(c.name, "Tv");
        assert_eq!(c.category, "tv");

        let empty = Category::from_slug(0, "");
        assert_eq!(empty.name, "");
    }

    #[test]
    fn test_single_page() {
        let products = vec![
            Product::new(ProductId::new(1), "A", Money::from_cents(100)),
            Product::new(ProductId::new(2), "B", Money::from_cents(200)),
        ];
        let page = CatalogPage::single(products);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, Some(1));
        assert_eq!(page.total_products, Some(2));
    }
}
