//! # Catalog HTTP Client
//!
//! The [`CatalogApi`] port and its reqwest-backed implementation.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET api/products?page={p}&limit={n}                                   │
//! │      → { products, totalPages?, currentPage?, totalProducts? }         │
//! │                                                                         │
//! │  GET api/products/{id}                                                 │
//! │      → { product }   (a bare product object is accepted too)           │
//! │                                                                         │
//! │  GET api/products/category                                             │
//! │      → { categories: ["tv", "audio", ...] }                            │
//! │                                                                         │
//! │  GET api/products/category?type={slug}                                 │
//! │      → { products }  (never paginated; wrapped as a single page)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bodies are read as text and decoded by the free `decode_*` functions, so
//! the wire handling is testable without a server.

use async_trait::async_trait;
use serde::Deserialize;
use storefront_core::validation::{validate_category_slug, validate_page, validate_product};
use storefront_core::{CatalogPage, Category, Product, ProductId};
use tracing::{debug, warn};
use url::Url;

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// Port
// =============================================================================

/// Read access to the catalog service.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// One page of the full catalog.
    async fn fetch_page(&self, page: u32, limit: u32) -> CatalogResult<CatalogPage>;

    /// Every product in a category, as a single page.
    async fn fetch_category(&self, slug: &str) -> CatalogResult<CatalogPage>;

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product>;

    async fn fetch_categories(&self) -> CatalogResult<Vec<Category>>;
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    #[serde(default)]
    products: Vec<Product>,
    total_pages: Option<u32>,
    current_page: Option<u32>,
    total_products: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CategoryProductsResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductResponse {
    Wrapped { product: Product },
    Bare(Product),
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Vec<String>,
}

fn validate_all(products: &[Product]) -> CatalogResult<()> {
    for product in products {
        validate_product(product)?;
    }
    Ok(())
}

/// Decodes a page response. `requested` fills in a missing `currentPage`.
pub fn decode_page(body: &str, requested: u32) -> CatalogResult<CatalogPage> {
    let response: PageResponse = serde_json::from_str(body)?;
    validate_all(&response.products)?;

    Ok(CatalogPage {
        products: response.products,
        page: response.current_page.unwrap_or(requested),
        total_pages: response.total_pages,
        total_products: response.total_products,
    })
}

/// Decodes a category listing as one complete page.
pub fn decode_category_page(body: &str) -> CatalogResult<CatalogPage> {
    let response: CategoryProductsResponse = serde_json::from_str(body)?;
    validate_all(&response.products)?;
    Ok(CatalogPage::single(response.products))
}

pub fn decode_product(body: &str) -> CatalogResult<Product> {
    let product = match serde_json::from_str::<ProductResponse>(body)? {
        ProductResponse::Wrapped { product } => product,
        ProductResponse::Bare(product) => product,
    };
    validate_product(&product)?;
    Ok(product)
}

/// Decodes the category name list into numbered [`Category`] entries.
pub fn decode_categories(body: &str) -> CatalogResult<Vec<Category>> {
    let response: CategoriesResponse = serde_json::from_str(body)?;
    Ok(response
        .categories
        .iter()
        .enumerate()
        .map(|(index, slug)| Category::from_slug(index, slug))
        .collect())
}

// =============================================================================
// HTTP Client
// =============================================================================

/// [`CatalogApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| CatalogError::Transport(e.to_string()))?;

        Ok(HttpCatalogClient {
            http,
            base_url: config.base_url()?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> CatalogResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// `api/products?page=&limit=`
    pub fn page_url(&self, page: u32, limit: u32) -> CatalogResult<Url> {
        let mut url = self.endpoint("api/products")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    /// `api/products/category?type=`
    pub fn category_url(&self, slug: &str) -> CatalogResult<Url> {
        let mut url = self.endpoint("api/products/category")?;
        url.query_pairs_mut().append_pair("type", slug);
        Ok(url)
    }

    pub fn product_url(&self, id: ProductId) -> CatalogResult<Url> {
        self.endpoint(&format!("api/products/{}", id))
    }

    pub fn categories_url(&self) -> CatalogResult<Url> {
        self.endpoint("api/products/category")
    }

    /// GETs `url` and returns the body of a successful response.
    async fn get_text(&self, url: Url) -> CatalogResult<String> {
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::Transport(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Catalog request failed");
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_page(&self, page: u32, limit: u32) -> CatalogResult<CatalogPage> {
        validate_page(page)?;
        let body = self.get_text(self.page_url(page, limit)?).await?;
        decode_page(&body, page)
    }

    async fn fetch_category(&self, slug: &str) -> CatalogResult<CatalogPage> {
        validate_category_slug(slug)?;
        let body = self.get_text(self.category_url(slug.trim())?).await?;
        decode_category_page(&body)
    }

    async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        let body = self.get_text(self.product_url(id)?).await?;
        decode_product(&body)
    }

    async fn fetch_categories(&self) -> CatalogResult<Vec<Category>> {
        let body = self.get_text(self.categories_url()?).await?;
        decode_categories(&body)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> HttpCatalogClient {
        HttpCatalogClient::new(&CatalogConfig::default()).unwrap()
    }

    #[test]
    fn test_urls() {
        let c = client();
        assert_eq!(
            c.page_url(2, 8).unwrap().as_str(),
            "https://fakestoreapi.in/api/products?page=2&limit=8"
        );
        assert_eq!(
            c.category_url("mobile").unwrap().as_str(),
            "https://fakestoreapi.in/api/products/category?type=mobile"
        );
        assert_eq!(
            c.product_url(ProductId::new(42)).unwrap().as_str(),
            "https://fakestoreapi.in/api/products/42"
        );
    }

    #[test]
    fn test_category_slug_is_query_encoded() {
        let url = client().category_url("home & garden").unwrap();
        assert_eq!(url.query(), Some("type=home+%26+garden"));
    }

    #[test]
    fn test_decode_page() {
        let body = r#"{
            "status": "SUCCESS",
            "products": [
                {"id": 1, "title": "TV", "price": 499.99, "category": "tv"},
                {"id": 2, "title": "Soundbar", "price": 120, "category": "audio"}
            ],
            "totalPages": 19,
            "currentPage": 3,
            "totalProducts": 150
        }"#;

        let page = decode_page(body, 3).unwrap();
        assert_eq!(page.products.len(), 2);
        assert_eq!(page.products[0].price.cents(), 49999);
        assert_eq!(page.page, 3);
        assert_eq!(page.total_pages, Some(19));
        assert_eq!(page.total_products, Some(150));
    }

    #[test]
    fn test_decode_page_without_metadata() {
        let page = decode_page(r#"{"products": []}"#, 5).unwrap();
        assert!(page.products.is_empty());
        assert_eq!(page.page, 5);
        assert_eq!(page.total_pages, None);
    }

    #[test]
    fn test_decode_rejects_invalid_product() {
        let body = r#"{"products": [{"id": 1, "title": "", "price": 1}]}"#;
        assert!(matches!(
            decode_page(body, 1),
            Err(CatalogError::Validation(_))
        ));

        let body = r#"{"products": [{"id": 1, "title": "X", "price": -1}]}"#;
        assert!(matches!(
            decode_category_page(body),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_page("<html>", 1),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn test_decode_category_page_is_single() {
        let body = r#"{"products": [
            {"id": 10, "title": "Pad", "price": 20},
            {"id": 11, "title": "Stick", "price": 30}
        ]}"#;

        let page = decode_category_page(body).unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, Some(1));
        assert_eq!(page.total_products, Some(2));
    }

    #[test]
    fn test_decode_product_wrapped_and_bare() {
        let wrapped = r#"{"status": "SUCCESS", "product": {"id": 4, "title": "Phone", "price": 699}}"#;
        assert_eq!(decode_product(wrapped).unwrap().id, ProductId::new(4));

        let bare = r#"{"id": 5, "title": "Case", "price": 9.5}"#;
        assert_eq!(decode_product(bare).unwrap().price.cents(), 950);
    }

    #[test]
    fn test_decode_categories() {
        let body = r#"{"status": "SUCCESS", "categories": ["tv", "audio", "gaming"]}"#;
        let categories = decode_categories(body).unwrap();

        assert_eq!(categories.len(), 3);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[2].name, "Gaming");
        assert_eq!(categories[2].slug, "gaming");
    }

    #[tokio::test]
    async fn test_page_zero_is_rejected_before_request() {
        let err = client().fetch_page(0, 8).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }
}
