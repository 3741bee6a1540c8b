//! # Catalog State
//!
//! Accumulated product listing plus the fetch state machine that guards it.
//!
//! ## Fetch Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Fetch States                                 │
//! │                                                                         │
//! │  ┌────────────┐  begin_fetch()  ┌────────────┐                         │
//! │  │    Idle    │ ──────────────► │  Fetching  │ ◄─── begin_fetch()      │
//! │  └────────────┘                 └─────┬──────┘      while Fetching:     │
//! │        ▲                              │             DROPPED (None)      │
//! │        │                    complete  │   fail                          │
//! │        │                        ┌─────┴─────┐                           │
//! │        │                        ▼           ▼                           │
//! │        └──────────────── (Idle)      ┌────────────┐                    │
//! │                                      │  Errored   │                    │
//! │        begin_fetch() / retry ◄────── │  (message) │                    │
//! │                                      └────────────┘                    │
//! │                                                                         │
//! │  Only fetch start, success and failure move the machine.              │
//! │  Accumulated products change only on success.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Page Accumulation
//! - Unfiltered, `reset`: replace the list with the page
//! - Unfiltered, append: add only ids not already present (first wins)
//! - Category selected: replace the list, pagination off (`has_more = false`)

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use ts_rs::TS;

use crate::types::{CatalogPage, Product, ProductId};
use crate::PAGE_SIZE;

// =============================================================================
// Fetch Status
// =============================================================================

/// Loading guard for a catalog loader instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
#[ts(export)]
pub enum FetchStatus {
    /// Nothing in flight.
    Idle,
    /// One request in flight. Further requests are dropped.
    Fetching,
    /// Last request failed. Products are as they were before it.
    Errored(String),
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Idle => write!(f, "idle"),
            FetchStatus::Fetching => write!(f, "fetching"),
            FetchStatus::Errored(msg) => write!(f, "errored: {}", msg),
        }
    }
}

// =============================================================================
// Fetch Request
// =============================================================================

/// A fetch the loader has committed to issuing.
///
/// Carries the category that was selected when the fetch began, so the
/// response is applied with the filter it was requested under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FetchRequest {
    pub page: u32,
    pub reset: bool,
    pub category: Option<String>,
}

impl FetchRequest {
    /// True when this request targets the category endpoint.
    pub fn is_category(&self) -> bool {
        self.category.is_some()
    }
}

// =============================================================================
// Catalog State
// =============================================================================

/// Everything the product grid renders from.
///
/// Serializes as a [`CatalogView`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "CatalogView")]
pub struct CatalogState {
    products: Vec<Product>,
    status: FetchStatus,
    has_more: bool,
    current_page: u32,
    selected_category: Option<String>,
    last_request: Option<FetchRequest>,
}

/// UI-facing form of [`CatalogState`].
///
/// `loading` and `error` are flattened out of `status` so the grid can bind
/// to them directly.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogView {
    pub products: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub current_page: u32,
    pub selected_category: Option<String>,
    pub status: FetchStatus,
}

impl From<CatalogState> for CatalogView {
    fn from(state: CatalogState) -> Self {
        CatalogView {
            loading: state.is_loading(),
            error: state.error().map(str::to_string),
            products: state.products,
            has_more: state.has_more,
            current_page: state.current_page,
            selected_category: state.selected_category,
            status: state.status,
        }
    }
}

impl CatalogState {
    /// Fresh state: no products, page 1, no filter, more to load.
    pub fn new() -> Self {
        CatalogState {
            products: Vec::new(),
            status: FetchStatus::Idle,
            has_more: true,
            current_page: 1,
            selected_category: None,
            last_request: None,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Accumulated products, unique by id, in arrival order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Fetching
    }

    /// Message of the last failed fetch, if the machine is `Errored`.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Errored(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Idle/Errored → Fetching for `page` under the current filter.
    ///
    /// Returns `None` (and changes nothing) while a fetch is in flight.
    pub fn begin_fetch(&mut self, page: u32, reset: bool) -> Option<FetchRequest> {
        if self.is_loading() {
            return None;
        }

        let request = FetchRequest {
            page,
            reset,
            category: self.selected_category.clone(),
        };
        self.status = FetchStatus::Fetching;
        self.last_request = Some(request.clone());
        Some(request)
    }

    /// Starts the next page in append mode.
    ///
    /// No-op while fetching, when there is nothing more to load, or while a
    /// category is selected.
    pub fn begin_load_more(&mut self) -> Option<FetchRequest> {
        if self.is_loading() || !self.has_more || self.selected_category.is_some() {
            return None;
        }

        self.current_page += 1;
        self.begin_fetch(self.current_page, false)
    }

    /// Re-issues the request that last failed. Only valid from `Errored`.
    pub fn begin_retry(&mut self) -> Option<FetchRequest> {
        if !matches!(self.status, FetchStatus::Errored(_)) {
            return None;
        }
        let last = self.last_request.clone()?;

        self.status = FetchStatus::Fetching;
        Some(last)
    }

    /// Switches the filter and resets paging.
    ///
    /// Leaves the fetch status alone: a fetch already in flight still owns
    /// the guard and will apply when it lands.
    pub fn select_category(&mut self, category: Option<String>) {
        self.selected_category = category;
        self.current_page = 1;
        self.products.clear();
        self.has_more = true;
    }

    /// Fetching → Idle, applying a successful response.
    pub fn complete(&mut self, request: &FetchRequest, page: CatalogPage) {
        let received = page.products.len();

        if request.is_category() {
            self.products = dedup(page.products);
            self.has_more = false;
        } else {
            if request.reset {
                self.products = dedup(page.products);
            } else {
                self.append(page.products);
            }
            self.has_more = received == PAGE_SIZE;
        }

        self.status = FetchStatus::Idle;
    }

    /// Fetching → Errored. Products are left exactly as they were.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = FetchStatus::Errored(message.into());
    }

    fn append(&mut self, incoming: Vec<Product>) {
        let mut seen: HashSet<ProductId> = self.products.iter().map(|p| p.id).collect();
        self.products
            .extend(incoming.into_iter().filter(|p| seen.insert(p.id)));
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        Self::new()
    }
}

/// Drops repeated ids, keeping the first occurrence.
fn dedup(products: Vec<Product>) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    products.into_iter().filter(|p| seen.insert(p.id)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
