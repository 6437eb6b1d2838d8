//! Sale Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A line item inside a recorded sale
///
/// Denormalized copy of the product at sale time: later price or name
/// changes in the inventory do not retroactively alter recorded sales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleItem {
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

/// Sale entity
///
/// Owned by the sales ledger. Immutable once appended; there is no
/// update or delete operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sale {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub payment_method: String,
    pub items: Vec<SaleItem>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_percentage: Decimal,
}

impl Sale {
    /// Tax amount as recorded: the difference between total and subtotal
    pub fn tax_amount(&self) -> Decimal {
        self.total - self.subtotal
    }
}

/// Proposed line item in a sale request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemDraft {
    pub product_id: i64,
    pub quantity: i64,
    /// Client-supplied display name; the inventory name wins when absent
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,
}

/// Proposed sale, as posted by the point-of-sale frontend
///
/// Only `items` is mandatory. Monetary figures supplied by the client
/// are echoed into the recorded sale; missing ones are computed from
/// the inventory snapshot at recording time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDraft {
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<SaleItemDraft>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_percentage: Option<Decimal>,
}

/// Same-day sales projection: `{ total, count }` for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_amount() {
        let sale = Sale {
            id: 1,
            date: Utc::now(),
            payment_method: "cash".to_string(),
            items: vec![],
            subtotal: Decimal::new(10000, 2), // 100.00
            total: Decimal::new(12100, 2),    // 121.00
            tax_percentage: Decimal::from(21),
        };
        assert_eq!(sale.tax_amount(), Decimal::new(2100, 2));
    }

    #[test]
    fn test_sale_draft_accepts_minimal_body() {
        let draft: SaleDraft =
            serde_json::from_str(r#"{"items":[{"product_id":1,"quantity":3}]}"#).unwrap();
        assert_eq!(draft.items.len(), 1);
        assert!(draft.payment_method.is_none());
    }
}
