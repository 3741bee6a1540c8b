//! # storefront-store: Local Persistence for the Storefront
//!
//! Keeps client-side state across runs. Today that is exactly one thing:
//! the cart snapshot under the `cart-storage` key.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CartStore (app) ── after every mutation ──► CartPersistence::save      │
//! │       ▲                                            │                    │
//! │       │ restore on startup                         ▼                    │
//! │  ┌────┴────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ KvRepository  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ (kv.rs)       │    │  (embedded)  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (platform data dir or STOREFRONT_DB_PATH)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_store::{Database, StoreConfig, SqliteCartPersistence};
//!
//! let db = Database::new(StoreConfig::new("storefront.db")).await?;
//! let persistence = SqliteCartPersistence::new(db.kv());
//! ```

pub mod error;
pub mod migrations;
pub mod persistence;
pub mod pool;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use persistence::{CartPersistence, MemoryCartPersistence, SqliteCartPersistence};
pub use pool::{Database, StoreConfig};
pub use repository::kv::KvRepository;
