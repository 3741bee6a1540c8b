//! # Cart
//!
//! The shopping cart reducer and its persisted snapshot format.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action              Reducer Call               Lines Change         │
//! │  ─────────              ────────────               ────────────         │
//! │                                                                         │
//! │  Add to cart ─────────► add_item(product) ──────► qty + 1 or push       │
//! │                                                                         │
//! │  Change quantity ─────► update_quantity(id, n) ─► qty = n (n <= 0: drop)│
//! │                                                                         │
//! │  Remove ──────────────► remove_item(id) ────────► retain(id != ..)      │
//! │                                                                         │
//! │  Empty cart ──────────► clear() ────────────────► []                    │
//! │                                                                         │
//! │  After EVERY call: total and item_count are re-derived from the lines. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these operations can fail. Unknown ids are no-ops and
//! non-positive quantities degrade to a removal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::CART_SNAPSHOT_VERSION;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart with its quantity.
///
/// The product is a frozen copy taken when it was first added, so the cart
/// keeps showing the price the customer saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product: Product,

    /// Always at least 1.
    pub quantity: u32,

    /// When this product first entered the cart.
    #[serde(default = "Utc::now")]
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product bumps quantity)
/// - Every line has quantity >= 1
/// - `total == Σ price × quantity` and `item_count == Σ quantity`, re-derived
///   after every mutation and never set directly
///
/// Deserializing re-derives the totals from the lines, so a tampered or
/// stale snapshot cannot break the invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", from = "CartRecord")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,

    #[serde(with = "crate::money::decimal")]
    #[ts(type = "number")]
    total: Money,

    #[ts(type = "number")]
    item_count: u64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            total: Money::zero(),
            item_count: 0,
        }
    }

    /// Adds one unit of a product.
    ///
    /// - Product already in cart: its quantity goes up by one
    /// - Otherwise: appended as a new line with quantity 1
    pub fn add_item(&mut self, product: Product) {
        match self.line_mut(product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(product)),
        }
        self.recompute();
    }

    /// Removes the line for `product_id`. Absent ids are ignored.
    pub fn remove_item(&mut self, product_id: ProductId) {
        self.lines.retain(|line| line.product.id != product_id);
        self.recompute();
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove_item`]
    /// - Product not in cart: no-op
    /// - Quantities above `u32::MAX` are clamped
    ///
    /// Totals saturate at `i64::MAX` cents (see [`Money`]).
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
        }
        self.recompute();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total = Money::zero();
        self.item_count = 0;
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Sum of all quantities.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Quantity held for a product, 0 when absent.
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product.id == product_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product.id == product_id)
    }

    fn recompute(&mut self) {
        self.total = self.lines.iter().map(CartLine::line_total).sum();
        self.item_count = self.lines.iter().map(|line| line.quantity as u64).sum();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw deserialization target for [`Cart`]. Stored totals are ignored.
#[derive(Deserialize)]
struct CartRecord {
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl From<CartRecord> for Cart {
    fn from(record: CartRecord) -> Self {
        // Merge duplicate ids and drop empty lines so a hand-edited snapshot
        // still satisfies the one-line-per-product invariant.
        let mut positions: HashMap<ProductId, usize> = HashMap::new();
        let mut lines: Vec<CartLine> = Vec::with_capacity(record.lines.len());

        for line in record.lines.into_iter().filter(|l| l.quantity > 0) {
            match positions.get(&line.product.id) {
                Some(&idx) => {
                    lines[idx].quantity = lines[idx].quantity.saturating_add(line.quantity);
                }
                None => {
                    positions.insert(line.product.id, lines.len());
                    lines.push(line);
                }
            }
        }

        let mut cart = Cart {
            lines,
            total: Money::zero(),
            item_count: 0,
        };
        cart.recompute();
        cart
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Persisted form of the cart, stored under [`crate::CART_STORAGE_KEY`].
///
/// ## Format
/// ```json
/// {
///   "state": { "lines": [...], "total": 25.0, "itemCount": 3 },
///   "version": 0,
///   "savedAt": "2026-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub state: Cart,

    #[serde(default)]
    pub version: u32,

    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
}

impl CartSnapshot {
    /// Captures the current cart.
    pub fn capture(cart: &Cart) -> Self {
        CartSnapshot {
            state: cart.clone(),
            version: CART_SNAPSHOT_VERSION,
            saved_at: Utc::now(),
        }
    }

    /// Encodes the snapshot as JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot, rejecting versions newer than this build writes.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let snapshot: CartSnapshot = serde_json::from_str(json)?;
        if snapshot.version > CART_SNAPSHOT_VERSION {
            return Err(CoreError::UnsupportedSnapshotVersion {
                found: snapshot.version,
                supported: CART_SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    pub fn into_cart(self) -> Cart {
        self.state
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
