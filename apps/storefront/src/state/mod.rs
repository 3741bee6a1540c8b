//! # Application State
//!
//! ```text
//! ┌──────────────────────┐   ┌──────────────────────────────────────┐
//! │     CartStore        │   │     CatalogLoader (catalog crate)    │
//! │  • Current cart      │   │  • Accumulated products              │
//! │  • Snapshot saving   │   │  • Paging + category filter          │
//! │  • Change stream     │   │  • Fetch state machine               │
//! └──────────────────────┘   └──────────────────────────────────────┘
//! ```
//!
//! Each command receives only the state it needs.

pub mod cart;

pub use cart::CartStore;
