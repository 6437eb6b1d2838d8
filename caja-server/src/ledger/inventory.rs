//! Inventory ledger

use crate::store::{JsonStore, StoreError, StoreResult};
use shared::models::{Product, ProductCreate};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("Product {0} already exists")]
    Duplicate(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<InventoryError> for shared::ApiError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Duplicate(id) => shared::ApiError::conflict(format!("Product {}", id)),
            InventoryError::Store(e) => e.into(),
        }
    }
}

/// Product list backed by one JSON document
#[derive(Debug, Clone)]
pub struct InventoryLedger {
    store: JsonStore,
}

impl InventoryLedger {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Full product list as currently persisted
    pub fn list(&self) -> StoreResult<Vec<Product>> {
        self.store.read()
    }

    /// First product matching `id` in a snapshot, linear scan
    pub fn find_by_id(products: &[Product], id: i64) -> Option<&Product> {
        products.iter().find(|p| p.id == Some(id))
    }

    /// Append a product, assigning `max(existing ids, 0) + 1` when the
    /// payload carries no id. An explicit id that already exists is a
    /// conflict; ids are unique by invariant.
    pub fn add(&self, payload: ProductCreate) -> Result<Product, InventoryError> {
        let mut products = self.list()?;

        let id = match payload.id {
            Some(id) => {
                if Self::find_by_id(&products, id).is_some() {
                    return Err(InventoryError::Duplicate(id));
                }
                id
            }
            None => Self::next_id(&products),
        };

        let product = payload.into_product(id);
        products.push(product.clone());
        self.store.write(&products)?;

        info!(id, name = %product.name, "Product added to inventory");
        Ok(product)
    }

    /// Persist a mutated snapshot (stock decrements from checkout)
    pub fn save(&self, products: &[Product]) -> StoreResult<()> {
        self.store.write(products)
    }

    fn next_id(products: &[Product]) -> i64 {
        products.iter().filter_map(|p| p.id).max().unwrap_or(0) + 1
    }
}
