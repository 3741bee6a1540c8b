//! # Cart Persistence
//!
//! The port the cart store saves through, plus its adapters.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartStore ──► Arc<dyn CartPersistence>                                │
//! │                        │                                                │
//! │          ┌─────────────┴──────────────┐                                 │
//! │          ▼                            ▼                                 │
//! │   SqliteCartPersistence        MemoryCartPersistence                    │
//! │   kv_store["cart-storage"]     Mutex<Option<String>>                    │
//! │   (CLI, real runs)             (tests, ephemeral sessions)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both adapters store the same JSON snapshot text, so a snapshot written by
//! one can be read by the other.

use async_trait::async_trait;
use storefront_core::{CartSnapshot, CART_STORAGE_KEY};
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::kv::KvRepository;

// =============================================================================
// Port
// =============================================================================

/// Durable home for the cart snapshot.
#[async_trait]
pub trait CartPersistence: Send + Sync {
    /// Reads the saved snapshot, `None` when nothing was saved yet.
    async fn load(&self) -> StoreResult<Option<CartSnapshot>>;

    /// Replaces the saved snapshot.
    async fn save(&self, snapshot: &CartSnapshot) -> StoreResult<()>;

    /// Forgets the saved snapshot.
    async fn clear(&self) -> StoreResult<()>;
}

fn decode(key: &str, raw: &str) -> StoreResult<CartSnapshot> {
    CartSnapshot::from_json(raw).map_err(|e| StoreError::corrupt(key, e))
}

fn encode(key: &str, snapshot: &CartSnapshot) -> StoreResult<String> {
    snapshot.to_json().map_err(|e| StoreError::corrupt(key, e))
}

// =============================================================================
// SQLite Adapter
// =============================================================================

/// Saves the snapshot in the local SQLite `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteCartPersistence {
    kv: KvRepository,
    key: String,
}

impl SqliteCartPersistence {
    /// Uses the standard `cart-storage` key.
    pub fn new(kv: KvRepository) -> Self {
        Self::with_key(kv, CART_STORAGE_KEY)
    }

    pub fn with_key(kv: KvRepository, key: impl Into<String>) -> Self {
        SqliteCartPersistence {
            kv,
            key: key.into(),
        }
    }
}

#[async_trait]
impl CartPersistence for SqliteCartPersistence {
    async fn load(&self) -> StoreResult<Option<CartSnapshot>> {
        match self.kv.get(&self.key).await? {
            Some(raw) => {
                let snapshot = decode(&self.key, &raw)?;
                debug!(key = %self.key, lines = snapshot.state.lines().len(), "Loaded cart snapshot");
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, snapshot: &CartSnapshot) -> StoreResult<()> {
        let raw = encode(&self.key, snapshot)?;
        self.kv.put(&self.key, &raw).await
    }

    async fn clear(&self) -> StoreResult<()> {
        if !self.kv.delete(&self.key).await? {
            debug!(key = %self.key, "No cart snapshot to clear");
        }
        Ok(())
    }
}

// =============================================================================
// In-Memory Adapter
// =============================================================================

/// Keeps the snapshot text in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryCartPersistence {
    raw: Mutex<Option<String>>,
}

impl MemoryCartPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `raw` already stored, as if a previous session wrote it.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryCartPersistence {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// The stored snapshot text, exactly as saved.
    pub async fn raw(&self) -> Option<String> {
        self.raw.lock().await.clone()
    }
}

#[async_trait]
impl CartPersistence for MemoryCartPersistence {
    async fn load(&self) -> StoreResult<Option<CartSnapshot>> {
        let raw = self.raw.lock().await;
        raw.as_deref()
            .map(|r| decode(CART_STORAGE_KEY, r))
            .transpose()
    }

    async fn save(&self, snapshot: &CartSnapshot) -> StoreResult<()> {
        let encoded = encode(CART_STORAGE_KEY, snapshot)?;
        *self.raw.lock().await = Some(encoded);
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        *self.raw.lock().await = None;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, StoreConfig};
    use storefront_core::{Cart, Money, Product, ProductId};

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item(Product::new(ProductId::new(1), "Mug", Money::from_cents(1000)));
        cart.add_item(Product::new(ProductId::new(1), "Mug", Money::from_cents(1000)));
        cart.add_item(Product::new(ProductId::new(2), "Pen", Money::from_cents(500)));
        cart
    }

    async fn sqlite() -> SqliteCartPersistence {
        let db = Database::new(StoreConfig::in_memory()).await.unwrap();
        SqliteCartPersistence::new(db.kv())
    }

    #[tokio::test]
    async fn test_sqlite_round_trip() {
        let store = sqlite().await;
        assert!(store.load().await.unwrap().is_none());

        let cart = sample_cart();
        store.save(&CartSnapshot::capture(&cart)).await.unwrap();

        let loaded = store.load().await.unwrap().unwrap().into_cart();
        assert_eq!(loaded, cart);
        assert_eq!(loaded.total(), Money::from_cents(2500));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sqlite_corrupt_value() {
        let db = Database::new(StoreConfig::in_memory()).await.unwrap();
        db.kv().put(CART_STORAGE_KEY, "{{{").await.unwrap();

        let store = SqliteCartPersistence::new(db.kv());
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn test_memory_adapter_stores_json_text() {
        let store = MemoryCartPersistence::new();
        store
            .save(&CartSnapshot::capture(&sample_cart()))
            .await
            .unwrap();

        let raw = store.raw().await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["itemCount"], 3);
        assert_eq!(value["state"]["total"], 25.0);

        store.clear().await.unwrap();
        assert!(store.raw().await.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_moves_between_adapters() {
        let memory = MemoryCartPersistence::new();
        memory
            .save(&CartSnapshot::capture(&sample_cart()))
            .await
            .unwrap();

        let db = Database::new(StoreConfig::in_memory()).await.unwrap();
        db.kv()
            .put(CART_STORAGE_KEY, &memory.raw().await.unwrap())
            .await
            .unwrap();

        let loaded = SqliteCartPersistence::new(db.kv())
            .load()
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.state.item_count(), 3);
    }
}
