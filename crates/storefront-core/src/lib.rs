//! # storefront-core: Pure State Logic for the Storefront
//!
//! This crate holds every piece of storefront state logic as plain data plus
//! pure transition functions. Nothing in here touches the network, the disk
//! or a clock other than `Utc::now()` for timestamps.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   UI layer (CLI in this workspace)              │   │
//! │  │    product grid ──► category tabs ──► cart view                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            CartStore (app)        CatalogLoader (catalog)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Catalog  │  │   │
//! │  │   │  Category │  │  decimal  │  │ Snapshot  │  │   State   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog domain types (Product, Category, CatalogPage)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart reducer and persisted snapshot format
//! - [`catalog`] - Accumulated catalog state and its fetch state machine
//! - [`error`] - Domain error types
//! - [`validation`] - Payload validation for data coming off the wire
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product, ProductId};
//!
//! let mug = Product::new(ProductId::new(1), "Mug", Money::from_cents(1000));
//! let pen = Product::new(ProductId::new(2), "Pen", Money::from_cents(500));
//!
//! let mut cart = Cart::new();
//! cart.add_item(mug.clone());
//! cart.add_item(mug);
//! cart.add_item(pen);
//!
//! assert_eq!(cart.total(), Money::from_cents(2500));
//! assert_eq!(cart.item_count(), 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSnapshot};
pub use catalog::{CatalogState, CatalogView, FetchRequest, FetchStatus};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of products requested per catalog page.
///
/// A page shorter than this is taken as the last page.
pub const PAGE_SIZE: usize = 8;

/// Storage key the cart snapshot is persisted under.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Snapshot format version written by this build.
pub const CART_SNAPSHOT_VERSION: u32 = 0;
