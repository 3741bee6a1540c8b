//! # storefront-catalog: Catalog Client and Paginated Loader
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI `products` ──► CatalogLoader ──► Arc<dyn CatalogApi>               │
//! │                        │                   │                            │
//! │                        │                   ▼                            │
//! │                        │            HttpCatalogClient ──► catalog API   │
//! │                        ▼                                                │
//! │              watch::Sender<CatalogState>  (storefront-core rules)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - `CatalogApi` port and HTTP implementation
//! - [`loader`] - `CatalogLoader`, the stateful paginated listing
//! - [`config`] - Catalog service configuration
//! - [`error`] - Catalog error types

pub mod client;
pub mod config;
pub mod error;
pub mod loader;

pub use client::{CatalogApi, HttpCatalogClient};
pub use config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use loader::CatalogLoader;
