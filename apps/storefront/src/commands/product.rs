//! # Product Commands
//!
//! Catalog browsing: the paginated grid, a detail view and category tabs.
//!
//! ```text
//! storefront products --pages 3
//!   start() ──► page 1 ──► load_more() ──► page 2 ──► load_more() ──► page 3
//!                                   stops early when has_more == false
//!
//! storefront products --category gaming
//!   set_category("gaming") ──► one request, whole category, has_more = false
//! ```

use serde::Serialize;
use storefront_catalog::CatalogLoader;
use storefront_core::validation::validate_category_slug;
use storefront_core::{CatalogState, Category, Product, ProductId};
use tracing::{debug, info};

use crate::error::{ApiError, ErrorCode};
use crate::output::Output;

/// Listing response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub current_page: u32,
    pub has_more: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Set when a later page failed after earlier pages loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&CatalogState> for ProductListResponse {
    fn from(state: &CatalogState) -> Self {
        ProductListResponse {
            products: state.products().to_vec(),
            current_page: state.current_page(),
            has_more: state.has_more(),
            category: state.selected_category().map(str::to_string),
            error: state.error().map(str::to_string),
        }
    }
}

/// Loads up to `pages` pages, or the whole of `category`.
///
/// Fails only when nothing at all could be loaded.
pub async fn list_products(
    catalog: &CatalogLoader,
    category: Option<String>,
    pages: u32,
) -> Result<ProductListResponse, ApiError> {
    debug!(category = ?category, pages, "list_products command");

    if pages == 0 {
        return Err(ApiError::validation("pages must be at least 1"));
    }

    match category {
        Some(slug) => {
            validate_category_slug(&slug)?;
            catalog.set_category(Some(slug)).await;
        }
        None => {
            catalog.start().await;
            for _ in 1..pages {
                let state = catalog.state();
                if state.error().is_some() || !state.has_more() {
                    break;
                }
                catalog.load_more().await;
            }
        }
    }

    let state = catalog.state();
    if let Some(message) = state.error() {
        if state.products().is_empty() {
            return Err(ApiError::new(ErrorCode::CatalogUnavailable, message));
        }
    }

    info!(
        loaded = state.products().len(),
        page = state.current_page(),
        has_more = state.has_more(),
        "Products listed"
    );
    Ok(ProductListResponse::from(&state))
}

pub async fn get_product(catalog: &CatalogLoader, id: ProductId) -> Result<Product, ApiError> {
    debug!(product_id = %id, "get_product command");
    Ok(catalog.fetch_product(id).await?)
}

pub async fn list_categories(catalog: &CatalogLoader) -> Result<Vec<Category>, ApiError> {
    debug!("list_categories command");
    Ok(catalog.fetch_categories().await?)
}

// =============================================================================
// Rendering
// =============================================================================

pub fn render_list(output: &Output, response: &ProductListResponse) {
    output.emit(response, || {
        let title = match &response.category {
            Some(c) => format!("Products in '{}' ({})", c, response.products.len()),
            None => format!(
                "Products ({}, page {})",
                response.products.len(),
                response.current_page
            ),
        };
        output.header(&title);

        let widths = [6, 40, 12, 12];
        output.table_row(&["ID", "TITLE", "PRICE", "CATEGORY"], &widths);
        for p in &response.products {
            let id = p.id.to_string();
            let price = p.price.to_string();
            output.table_row(
                &[id.as_str(), p.title.as_str(), price.as_str(), p.category.as_str()],
                &widths,
            );
        }

        if let Some(err) = &response.error {
            output.warn(&format!("Stopped early: {}", err));
        } else if response.has_more {
            output.kv("more", "yes (use --pages to load further)");
        }
    });
}

pub fn render_product(output: &Output, product: &Product) {
    output.emit(product, || {
        output.header(&product.title);
        output.kv("id", &product.id.to_string());
        output.kv("price", &product.price.to_string());
        if !product.category.is_empty() {
            output.kv("category", &product.category);
        }
        if let Some(rating) = &product.rating {
            output.kv("rating", &format!("{:.1} ({} reviews)", rating.rate, rating.count));
        }
        if !product.description.is_empty() {
            output.kv("description", &product.description);
        }
    });
}

pub fn render_categories(output: &Output, categories: &[Category]) {
    output.emit(&categories, || {
        output.header(&format!("Categories ({})", categories.len()));
        let widths = [4, 20, 20];
        output.table_row(&["#", "NAME", "SLUG"], &widths);
        for c in categories {
            let id = c.id.to_string();
            output.table_row(&[id.as_str(), c.name.as_str(), c.slug.as_str()], &widths);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use storefront_catalog::{CatalogApi, CatalogError, CatalogResult};
    use storefront_core::{CatalogPage, Money};

    /// 20 products, 8 per page. Pages after `fail_after` fail.
    struct StubCatalog {
        fail_after: Option<u32>,
        down: AtomicBool,
    }

    impl StubCatalog {
        fn healthy() -> Self {
            StubCatalog {
                fail_after: None,
                down: AtomicBool::new(false),
            }
        }
    }

    fn product(id: u32) -> Product {
        Product::new(ProductId::new(id), format!("P{}", id), Money::from_cents(100))
    }

    fn unavailable() -> CatalogError {
        CatalogError::Transport("connection refused".into())
    }

    #[async_trait]
    impl CatalogApi for StubCatalog {
        async fn fetch_page(&self, page: u32, limit: u32) -> CatalogResult<CatalogPage> {
            if self.down.load(Ordering::SeqCst) || self.fail_after.is_some_and(|n| page > n) {
                return Err(unavailable());
            }
            let start = (page - 1) * limit + 1;
            let end = (page * limit).min(20);
            Ok(CatalogPage {
                products: (start..=end).map(product).collect(),
                page,
                total_pages: Some(3),
                total_products: Some(20),
            })
        }

        async fn fetch_category(&self, slug: &str) -> CatalogResult<CatalogPage> {
            let products = if slug == "audio" {
                vec![product(3), product(5)]
            } else {
                Vec::new()
            };
            Ok(CatalogPage::single(products))
        }

        async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
            if id.get() > 20 {
                return Err(CatalogError::Status {
                    status: 404,
                    url: format!("stub/{}", id),
                });
            }
            Ok(product(id.get()))
        }

        async fn fetch_categories(&self) -> CatalogResult<Vec<Category>> {
            Ok(vec![Category::from_slug(0, "audio")])
        }
    }

    fn loader(api: StubCatalog) -> CatalogLoader {
        CatalogLoader::new(Arc::new(api))
    }

    #[tokio::test]
    async fn test_list_multiple_pages_stops_at_end() {
        let catalog = loader(StubCatalog::healthy());
        let response = list_products(&catalog, None, 10).await.unwrap();

        assert_eq!(response.products.len(), 20);
        assert_eq!(response.current_page, 3);
        assert!(!response.has_more);
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_list_category() {
        let catalog = loader(StubCatalog::healthy());
        let response = list_products(&catalog, Some("audio".into()), 1)
            .await
            .unwrap();

        assert_eq!(response.category.as_deref(), Some("audio"));
        assert_eq!(response.products.len(), 2);
        assert!(!response.has_more);
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_loaded_pages() {
        let catalog = loader(StubCatalog {
            fail_after: Some(1),
            down: AtomicBool::new(false),
        });
        let response = list_products(&catalog, None, 3).await.unwrap();

        assert_eq!(response.products.len(), 8);
        assert!(response.error.is_some());
    }

    #[tokio::test]
    async fn test_total_failure_is_an_error() {
        let catalog = loader(StubCatalog {
            fail_after: None,
            down: AtomicBool::new(true),
        });
        let err = list_products(&catalog, None, 1).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogUnavailable);
    }

    #[tokio::test]
    async fn test_rejects_bad_arguments() {
        let catalog = loader(StubCatalog::healthy());
        let err = list_products(&catalog, None, 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = list_products(&catalog, Some("a/b".into()), 1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let catalog = loader(StubCatalog::healthy());
        assert_eq!(
            get_product(&catalog, ProductId::new(4)).await.unwrap().title,
            "P4"
        );

        let err = get_product(&catalog, ProductId::new(99)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let catalog = loader(StubCatalog::healthy());
        let categories = list_categories(&catalog).await.unwrap();
        assert_eq!(categories[0].name, "Audio");
    }
}
