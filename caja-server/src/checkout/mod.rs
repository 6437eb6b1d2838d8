//! Sale-recording workflow
//!
//! The only multi-step sequence in the backend:
//! validate -> stock check -> persist both ledgers -> text receipt.
//!
//! Validation is two-pass: every item is checked against an immutable
//! inventory snapshot first, and stock is decremented only once the
//! whole batch is known to succeed. A rejected sale therefore never
//! mutates anything, in memory or on disk. Thermal printing is not part
//! of this workflow; it runs only on an explicit print request.

use chrono::Utc;
use rust_decimal::Decimal;
use shared::ApiError;
use shared::models::{Product, Sale, SaleDraft, SaleItem};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::ServerState;
use crate::ledger::InventoryLedger;
use crate::receipt;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Sale has no items")]
    EmptyItems,

    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: i64, quantity: i64 },

    #[error("Unknown product id {0}")]
    UnknownProduct(i64),

    #[error("Insufficient stock for {0}")]
    InsufficientStock(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyItems | CheckoutError::InvalidQuantity { .. } => {
                ApiError::validation(err.to_string())
            }
            CheckoutError::UnknownProduct(_) => ApiError::unknown_product(err.to_string()),
            CheckoutError::InsufficientStock(_) => ApiError::insufficient_stock(err.to_string()),
            CheckoutError::Store(e) => e.into(),
        }
    }
}

/// Record a proposed sale
///
/// On success the finalized sale (assigned id, timestamp, denormalized
/// items and computed totals) has been appended to the sales ledger and
/// the inventory document reflects the decremented stock. The text
/// receipt is best-effort: its failure is logged, never surfaced.
pub async fn record_sale(state: &ServerState, draft: SaleDraft) -> Result<Sale, CheckoutError> {
    if draft.items.is_empty() {
        return Err(CheckoutError::EmptyItems);
    }
    for item in &draft.items {
        if item.quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }
    }

    // Serialize read-modify-write over the two documents
    let _guard = state.write_guard().await;

    let mut inventory = state.inventory.list()?;

    // Pass 1: validate the whole batch against the snapshot
    let mut short: Vec<String> = Vec::new();
    for item in &draft.items {
        let product = InventoryLedger::find_by_id(&inventory, item.product_id)
            .ok_or(CheckoutError::UnknownProduct(item.product_id))?;

        if !product.has_stock(item.quantity) {
            short.push(format!(
                "{} (requested {}, available {})",
                product.name, item.quantity, product.stock
            ));
        }
    }
    if !short.is_empty() {
        info!(products = %short.join(", "), "Sale rejected: insufficient stock");
        return Err(CheckoutError::InsufficientStock(short.join(", ")));
    }

    // Pass 2: apply all decrements, then persist
    for item in &draft.items {
        let product = inventory
            .iter_mut()
            .find(|p| p.id == Some(item.product_id))
            .expect("validated in pass 1");
        product.stock -= item.quantity;
    }
    state.inventory.save(&inventory)?;

    let sale = finalize(&state.config.tax_percentage, &inventory, draft);
    let sale = state.sales.append(sale)?;

    // Text receipt is a side effect; failure must not fail the sale
    if let Err(e) = receipt::text::write(
        &state.config.receipts_dir(),
        &sale,
        &state.config.store_name,
    ) {
        warn!(sale_id = sale.id, error = %e, "Failed to write text receipt");
    }

    info!(sale_id = sale.id, total = %sale.total, "Sale recorded");
    Ok(sale)
}

/// Build the persisted sale record from the draft and the inventory
/// snapshot
///
/// Client-supplied figures (names, prices, totals) are echoed verbatim;
/// missing ones are denormalized from the product record or computed at
/// the given tax rate.
fn finalize(default_tax: &Decimal, inventory: &[Product], draft: SaleDraft) -> Sale {
    let items: Vec<SaleItem> = draft
        .items
        .into_iter()
        .map(|item| {
            // Pass 1 guarantees the product exists
            let product = InventoryLedger::find_by_id(inventory, item.product_id)
                .expect("validated in pass 1");

            let unit_price = item.unit_price.unwrap_or(product.price);
            let quantity = item.quantity;
            let subtotal = item
                .subtotal
                .unwrap_or_else(|| (unit_price * Decimal::from(quantity)).round_dp(2));

            SaleItem {
                product_id: item.product_id,
                name: item.name.unwrap_or_else(|| product.name.clone()),
                quantity,
                unit_price,
                subtotal,
            }
        })
        .collect();

    let subtotal = draft
        .subtotal
        .unwrap_or_else(|| items.iter().map(|i| i.subtotal).sum());
    let tax_percentage = draft.tax_percentage.unwrap_or(*default_tax);
    let total = draft.total.unwrap_or_else(|| {
        (subtotal * (Decimal::ONE + tax_percentage / Decimal::from(100))).round_dp(2)
    });

    Sale {
        id: 0, // assigned by the sales ledger on append
        date: Utc::now(),
        payment_method: draft.payment_method.unwrap_or_else(|| "cash".to_string()),
        items,
        subtotal,
        total,
        tax_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use shared::models::{ProductCreate, SaleItemDraft};

    fn state_with_product(stock: i64) -> (tempfile::TempDir, ServerState) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);
        let state = ServerState::initialize(&config).unwrap();
        state
            .inventory
            .add(ProductCreate {
                id: Some(1),
                name: "Yerba Mate".to_string(),
                price: Decimal::new(750, 2),
                stock,
            })
            .unwrap();
        (dir, state)
    }

    fn draft(product_id: i64, quantity: i64) -> SaleDraft {
        SaleDraft {
            payment_method: Some("cash".to_string()),
            items: vec![SaleItemDraft {
                product_id,
                quantity,
                name: None,
                unit_price: None,
                subtotal: None,
            }],
            subtotal: None,
            total: None,
            tax_percentage: None,
        }
    }

    #[tokio::test]
    async fn test_successful_sale_decrements_stock() {
        let (_dir, state) = state_with_product(5);

        let sale = record_sale(&state, draft(1, 3)).await.unwrap();

        let inventory = state.inventory.list().unwrap();
        assert_eq!(inventory[0].stock, 2);
        assert_eq!(sale.id, 1);
        assert_eq!(sale.items[0].name, "Yerba Mate");
        // 3 x 7.50 = 22.50, plus default 21% tax
        assert_eq!(sale.subtotal, Decimal::new(2250, 2));
        assert_eq!(sale.total, Decimal::new(272250, 4).round_dp(2));

        let sales = state.sales.list().unwrap();
        assert_eq!(sales.len(), 1);
    }

    #[tokio::test]
    async fn test_insufficient_stock_leaves_everything_unchanged() {
        let (_dir, state) = state_with_product(1);

        let result = record_sale(&state, draft(1, 2)).await;
        assert!(matches!(result, Err(CheckoutError::InsufficientStock(_))));

        assert_eq!(state.inventory.list().unwrap()[0].stock, 1);
        assert!(state.sales.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mixed_batch_rejected_without_any_decrement() {
        let (_dir, state) = state_with_product(5);
        state
            .inventory
            .add(ProductCreate {
                id: Some(2),
                name: "Azúcar".to_string(),
                price: Decimal::from(2),
                stock: 0,
            })
            .unwrap();

        let mut d = draft(1, 3);
        d.items.push(SaleItemDraft {
            product_id: 2,
            quantity: 1,
            name: None,
            unit_price: None,
            subtotal: None,
        });

        let result = record_sale(&state, d).await;
        assert!(matches!(result, Err(CheckoutError::InsufficientStock(_))));

        // The valid item was not decremented either: two-pass validation
        let inventory = state.inventory.list().unwrap();
        assert_eq!(inventory[0].stock, 5);
        assert_eq!(inventory[1].stock, 0);
    }

    #[tokio::test]
    async fn test_unknown_product_rejects_the_sale() {
        let (_dir, state) = state_with_product(5);

        let result = record_sale(&state, draft(99, 1)).await;
        assert!(matches!(result, Err(CheckoutError::UnknownProduct(99))));
        assert!(state.sales.list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_items_rejected() {
        let (_dir, state) = state_with_product(5);

        let mut d = draft(1, 1);
        d.items.clear();
        assert!(matches!(
            record_sale(&state, d).await,
            Err(CheckoutError::EmptyItems)
        ));
    }

    #[tokio::test]
    async fn test_non_positive_quantity_rejected() {
        let (_dir, state) = state_with_product(5);

        assert!(matches!(
            record_sale(&state, draft(1, 0)).await,
            Err(CheckoutError::InvalidQuantity { .. })
        ));
    }

    #[tokio::test]
    async fn test_client_total_is_echoed() {
        let (_dir, state) = state_with_product(5);

        let mut d = draft(1, 1);
        d.total = Some(Decimal::new(999, 2));
        let sale = record_sale(&state, d).await.unwrap();
        assert_eq!(sale.total, Decimal::new(999, 2));
    }

    #[tokio::test]
    async fn test_text_receipt_written_as_side_effect() {
        let (_dir, state) = state_with_product(5);

        let sale = record_sale(&state, draft(1, 1)).await.unwrap();
        let path = state
            .config
            .receipts_dir()
            .join(format!("ticket_{}.txt", sale.id));
        assert!(path.exists());
    }
}
