//! # Catalog Loader
//!
//! Drives [`CatalogState`] against a [`CatalogApi`] and publishes every
//! change to subscribers.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  load_page / load_more / set_category / retry                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send_if_modified(|s| s.begin_…())    ← check-and-set in one closure   │
//! │       │                                                                 │
//! │       ├── None  → already Fetching (or nothing to do): log, return     │
//! │       │                                                                 │
//! │       ▼ Some(request)                                                   │
//! │  api.fetch_page / api.fetch_category   ← only await point              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send_modify(|s| s.complete(..) | s.fail(..))                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subscribers see the new state                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are never cancelled. A category response that lands after the
//! user switched away still applies.

use std::sync::Arc;

use storefront_core::{CatalogPage, CatalogState, Category, FetchRequest, Product, ProductId, PAGE_SIZE};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::CatalogApi;
use crate::error::CatalogResult;

/// Paginated, filterable product listing.
///
/// Cheap to share: wrap in an `Arc` and call from any task.
pub struct CatalogLoader {
    api: Arc<dyn CatalogApi>,
    state: watch::Sender<CatalogState>,
}

impl CatalogLoader {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        let (state, _) = watch::channel(CatalogState::new());
        CatalogLoader { api, state }
    }

    /// Current state, cloned.
    pub fn state(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Change stream. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.state.subscribe()
    }

    /// First load: page 1, replacing whatever is held.
    pub async fn start(&self) -> bool {
        self.load_page(1, true).await
    }

    /// Fetches `page` under the current filter.
    ///
    /// Returns `false` when the call was dropped because a fetch was already
    /// in flight.
    pub async fn load_page(&self, page: u32, reset: bool) -> bool {
        let request = self.begin(|s| s.begin_fetch(page, reset));
        match request {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => {
                debug!(page, reset, "Fetch already in flight, dropping load_page");
                false
            }
        }
    }

    /// Appends the next page.
    ///
    /// No-op while loading, after the last page, or with a category selected.
    pub async fn load_more(&self) -> bool {
        match self.begin(CatalogState::begin_load_more) {
            Some(request) => {
                self.run(request).await;
                true
            }
            None => {
                debug!("Nothing to load more");
                false
            }
        }
    }

    /// Changes the category filter and reloads from page 1.
    ///
    /// Blank names clear the filter.
    pub async fn set_category(&self, category: Option<String>) -> bool {
        let category = category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty());

        info!(category = ?category, "Selecting category");
        self.state.send_modify(|s| s.select_category(category));

        self.load_page(1, true).await
    }

    /// Re-issues the request that failed. Only acts from the errored state.
    pub async fn retry(&self) -> bool {
        match self.begin(CatalogState::begin_retry) {
            Some(request) => {
                info!(page = request.page, "Retrying failed fetch");
                self.run(request).await;
                true
            }
            None => {
                debug!("Retry ignored, last fetch did not fail");
                false
            }
        }
    }

    /// Single product for a detail view. Does not touch the listing.
    pub async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
        self.api.fetch_product(id).await
    }

    /// Category tabs. Does not touch the listing.
    pub async fn fetch_categories(&self) -> CatalogResult<Vec<Category>> {
        self.api.fetch_categories().await
    }

    /// Runs a guard transition atomically with respect to other callers.
    fn begin<F>(&self, transition: F) -> Option<FetchRequest>
    where
        F: FnOnce(&mut CatalogState) -> Option<FetchRequest>,
    {
        let mut request = None;
        self.state.send_if_modified(|s| {
            request = transition(s);
            request.is_some()
        });
        request
    }

    async fn run(&self, request: FetchRequest) {
        debug!(
            page = request.page,
            reset = request.reset,
            category = ?request.category,
            "Fetching catalog"
        );

        let result: CatalogResult<CatalogPage> = match &request.category {
            Some(slug) => self.api.fetch_category(slug).await,
            None => self.api.fetch_page(request.page, PAGE_SIZE as u32).await,
        };

        match result {
            Ok(page) => {
                let received = page.products.len();
                self.state.send_modify(|s| s.complete(&request, page));
                let state = self.state.borrow();
                info!(
                    page = request.page,
                    received,
                    total = state.products().len(),
                    has_more = state.has_more(),
                    "Catalog page applied"
                );
            }
            Err(e) => {
                warn!(page = request.page, error = %e, "Catalog fetch failed");
                self.state.send_modify(|s| s.fail(e.to_string()));
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use storefront_core::{FetchStatus, Money};
    use tokio::sync::Notify;

    fn product(id: u32) -> Product {
        Product::new(ProductId::new(id), format!("P{}", id), Money::from_cents(100 * id as i64))
    }

    /// In-memory catalog. Pages are 8 wide; `gate` holds fetches open.
    #[derive(Default)]
    struct FakeCatalog {
        total: u32,
        categories: HashMap<String, Vec<u32>>,
        fail: AtomicBool,
        calls: AtomicUsize,
        gate: Option<(Arc<Notify>, Arc<Notify>)>,
    }

    impl FakeCatalog {
        fn with_total(total: u32) -> Self {
            FakeCatalog {
                total,
                ..Default::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        async fn enter(&self) -> CatalogResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some((started, release)) = &self.gate {
                started.notify_one();
                release.notified().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(CatalogError::Status {
                    status: 500,
                    url: "fake".into(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogApi for FakeCatalog {
        async fn fetch_page(&self, page: u32, limit: u32) -> CatalogResult<CatalogPage> {
            self.enter().await?;
            let start = (page - 1) * limit + 1;
            let end = (page * limit).min(self.total);
            Ok(CatalogPage {
                products: (start..=end).map(product).collect(),
                page,
                total_pages: None,
                total_products: Some(self.total),
            })
        }

        async fn fetch_category(&self, slug: &str) -> CatalogResult<CatalogPage> {
            self.enter().await?;
            let ids = self.categories.get(slug).cloned().unwrap_or_default();
            Ok(CatalogPage::single(ids.into_iter().map(product).collect()))
        }

        async fn fetch_product(&self, id: ProductId) -> CatalogResult<Product> {
            self.enter().await?;
            Ok(product(id.get()))
        }

        async fn fetch_categories(&self) -> CatalogResult<Vec<Category>> {
            self.enter().await?;
            let mut slugs: Vec<&String> = self.categories.keys().collect();
            slugs.sort();
            Ok(slugs
                .into_iter()
                .enumerate()
                .map(|(i, s)| Category::from_slug(i, s))
                .collect())
        }
    }

    fn ids(state: &CatalogState) -> Vec<u32> {
        state.products().iter().map(|p| p.id.get()).collect()
    }

    #[tokio::test]
    async fn test_start_loads_full_first_page() {
        let loader = CatalogLoader::new(Arc::new(FakeCatalog::with_total(20)));

        assert!(loader.start().await);

        let state = loader.state();
        assert_eq!(ids(&state), (1..=8).collect::<Vec<_>>());
        assert!(state.has_more());
        assert_eq!(state.status(), &FetchStatus::Idle);
    }

    #[tokio::test]
    async fn test_load_more_until_exhausted() {
        let api = Arc::new(FakeCatalog::with_total(20));
        let loader = CatalogLoader::new(api.clone());
        loader.start().await;

        assert!(loader.load_more().await);
        assert!(loader.load_more().await);

        let state = loader.state();
        assert_eq!(ids(&state), (1..=20).collect::<Vec<_>>());
        assert_eq!(state.current_page(), 3);
        assert!(!state.has_more());

        // Exhausted: no further request goes out
        assert!(!loader.load_more().await);
        assert_eq!(api.calls(), 3);
    }

    #[tokio::test]
    async fn test_reload_page_never_duplicates() {
        let loader = CatalogLoader::new(Arc::new(FakeCatalog::with_total(30)));
        loader.start().await;
        loader.load_more().await;

        // Re-append page 2 on top of itself
        loader.load_page(2, false).await;

        let state = loader.state();
        assert_eq!(ids(&state), (1..=16).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_failure_keeps_products_and_retry_recovers() {
        let api = Arc::new(FakeCatalog::with_total(20));
        let loader = CatalogLoader::new(api.clone());
        loader.start().await;

        api.fail.store(true, Ordering::SeqCst);
        loader.load_more().await;

        let state = loader.state();
        assert_eq!(state.products().len(), 8);
        assert!(!state.is_loading());
        assert_eq!(state.error(), Some("HTTP 500 from fake"));

        api.fail.store(false, Ordering::SeqCst);
        assert!(loader.retry().await);

        let state = loader.state();
        assert_eq!(state.error(), None);
        assert_eq!(ids(&state), (1..=16).collect::<Vec<_>>());
        assert!(!loader.retry().await);
    }

    #[tokio::test]
    async fn test_category_replaces_and_disables_paging() {
        let mut api = FakeCatalog::with_total(20);
        api.categories
            .insert("gaming".to_string(), (100..108).collect());
        let loader = CatalogLoader::new(Arc::new(api));
        loader.start().await;

        assert!(loader.set_category(Some("gaming".to_string())).await);

        let state = loader.state();
        assert_eq!(state.selected_category(), Some("gaming"));
        assert_eq!(ids(&state), (100..108).collect::<Vec<_>>());
        assert!(!state.has_more());
        assert!(!loader.load_more().await);

        // Clearing the filter goes back to page 1 of the full catalog
        loader.set_category(Some("  ".to_string())).await;
        let state = loader.state();
        assert_eq!(state.selected_category(), None);
        assert_eq!(ids(&state), (1..=8).collect::<Vec<_>>());
        assert!(state.has_more());
    }

    #[tokio::test]
    async fn test_concurrent_load_is_dropped() {
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let api = Arc::new(FakeCatalog {
            total: 20,
            gate: Some((started.clone(), release.clone())),
            ..Default::default()
        });
        let loader = Arc::new(CatalogLoader::new(api.clone()));

        let first = {
            let loader = loader.clone();
            tokio::spawn(async move { loader.load_page(1, true).await })
        };

        started.notified().await;
        assert!(loader.state().is_loading());

        // Second request while the first is in flight
        assert!(!loader.load_page(2, false).await);
        assert!(!loader.load_more().await);

        release.notify_one();
        assert!(first.await.unwrap());

        assert_eq!(api.calls(), 1);
        assert_eq!(loader.state().products().len(), 8);
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let loader = CatalogLoader::new(Arc::new(FakeCatalog::with_total(3)));
        let mut rx = loader.subscribe();
        assert!(rx.borrow_and_update().products().is_empty());

        loader.start().await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.products().len(), 3);
        assert!(!state.has_more());
    }

    #[tokio::test]
    async fn test_detail_and_categories_pass_through() {
        let mut api = FakeCatalog::with_total(5);
        api.categories.insert("audio".to_string(), vec![1]);
        api.categories.insert("tv".to_string(), vec![2]);
        let loader = CatalogLoader::new(Arc::new(api));

        let p = loader.fetch_product(ProductId::new(4)).await.unwrap();
        assert_eq!(p.price, Money::from_cents(400));

        let cats = loader.fetch_categories().await.unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].slug, "audio");
        assert_eq!(cats[1].name, "Tv");

        // The listing is untouched
        assert!(loader.state().products().is_empty());
    }
}
