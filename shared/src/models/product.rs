//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product entity
///
/// Owned by the inventory ledger. `id` is unique and positive; it is
/// `None` only on a create payload that has not been assigned yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: Option<i64>,
    pub name: String,
    /// Unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units on hand, never negative
    pub stock: i64,
}

impl Product {
    /// Whether a sale of `quantity` units can be served from stock
    pub fn has_stock(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }
}

/// Create product payload
///
/// `id` is optional; when absent the ledger assigns `max(existing) + 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub id: Option<i64>,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
}

impl ProductCreate {
    /// Build the persisted entity with its assigned id
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id: Some(id),
            name: self.name,
            price: self.price,
            stock: self.stock,
        }
    }
}
