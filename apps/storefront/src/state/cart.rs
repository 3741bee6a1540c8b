//! # Cart State
//!
//! The application's one cart, shared by every command.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CartStore Operations                                 │
//! │                                                                         │
//! │  add_item / remove_item / update_quantity / clear_cart                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock cart ──► reducer (sync, cannot fail) ──► publish to subscribers  │
//! │                                                       │                 │
//! │                                                       ▼                 │
//! │                  persistence.save(snapshot) / clear()                   │
//! │                              failure → warn!, state unaffected          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unlock, return new cart                                               │
//! │                                                                         │
//! │  The lock is held across the save so snapshots land in the same        │
//! │  order as the mutations that produced them.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A snapshot written by a newer build is never overwritten: the store
//! starts empty and keeps its changes in memory for that session.

use std::sync::Arc;

use storefront_core::{Cart, CartSnapshot, CoreError, Product, ProductId};
use storefront_store::{CartPersistence, StoreError};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Cart container with persistence and change notification.
pub struct CartStore {
    cart: Mutex<Cart>,
    updates: watch::Sender<Cart>,
    persistence: Arc<dyn CartPersistence>,

    /// Set when the saved snapshot must be left as it is.
    read_only: bool,
}

impl CartStore {
    /// Empty cart that saves through `persistence`. Nothing is loaded.
    pub fn new(persistence: Arc<dyn CartPersistence>) -> Self {
        Self::with_cart(Cart::new(), persistence, false)
    }

    fn with_cart(cart: Cart, persistence: Arc<dyn CartPersistence>, read_only: bool) -> Self {
        let (updates, _) = watch::channel(cart.clone());
        CartStore {
            cart: Mutex::new(cart),
            updates,
            persistence,
            read_only,
        }
    }

    /// Loads the saved cart.
    ///
    /// A missing or unreadable snapshot starts an empty cart. A snapshot
    /// from a newer version also starts empty, and is never written over.
    pub async fn restore(persistence: Arc<dyn CartPersistence>) -> Self {
        let mut read_only = false;
        let cart = match persistence.load().await {
            Ok(Some(snapshot)) => {
                let cart = snapshot.into_cart();
                info!(
                    lines = cart.lines().len(),
                    items = cart.item_count(),
                    "Restored cart"
                );
                cart
            }
            Ok(None) => {
                debug!("No saved cart, starting empty");
                Cart::new()
            }
            Err(StoreError::Corrupt {
                source: CoreError::UnsupportedSnapshotVersion { found, supported },
                ..
            }) => {
                warn!(
                    found,
                    supported,
                    "Saved cart is from a newer version, keeping it and not saving this session"
                );
                read_only = true;
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Saved cart unreadable, starting empty");
                Cart::new()
            }
        };

        Self::with_cart(cart, persistence, read_only)
    }

    pub async fn add_item(&self, product: Product) -> Cart {
        debug!(product_id = %product.id, "add_item");
        self.apply("add_item", |cart| cart.add_item(product)).await
    }

    pub async fn remove_item(&self, product_id: ProductId) -> Cart {
        debug!(product_id = %product_id, "remove_item");
        self.apply("remove_item", |cart| cart.remove_item(product_id))
            .await
    }

    /// Sets a line's quantity. Zero or negative removes the line.
    pub async fn update_quantity(&self, product_id: ProductId, quantity: i64) -> Cart {
        debug!(product_id = %product_id, quantity, "update_quantity");
        self.apply("update_quantity", |cart| {
            cart.update_quantity(product_id, quantity)
        })
        .await
    }

    /// Empties the cart and forgets the saved snapshot.
    pub async fn clear_cart(&self) -> Cart {
        debug!("clear_cart");
        let mut cart = self.cart.lock().await;
        cart.clear();
        let current = cart.clone();

        self.updates.send_replace(current.clone());

        if self.writable("clear_cart") {
            if let Err(e) = self.persistence.clear().await {
                warn!(op = "clear_cart", error = %e, "Failed to clear saved cart");
            }
        }

        current
    }

    /// Latest published cart. Does not wait for an in-progress save.
    pub fn snapshot(&self) -> Cart {
        self.updates.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.updates.subscribe()
    }

    async fn apply<F>(&self, op: &'static str, mutate: F) -> Cart
    where
        F: FnOnce(&mut Cart),
    {
        let mut cart = self.cart.lock().await;
        mutate(&mut cart);
        let current = cart.clone();

        self.updates.send_replace(current.clone());

        if self.writable(op) {
            if let Err(e) = self.persistence.save(&CartSnapshot::capture(&current)).await {
                warn!(op, error = %e, "Failed to persist cart");
            }
        }

        current
    }

    fn writable(&self, op: &'static str) -> bool {
        if self.read_only {
            debug!(op, "Cart is read-only this session, not persisting");
        }
        !self.read_only
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
