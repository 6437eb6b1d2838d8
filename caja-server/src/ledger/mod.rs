//! Append-only ledgers over the flat-file store
//!
//! - [`InventoryLedger`] - product records, mutated in place by stock
//!   decrements during checkout
//! - [`SalesLedger`] - immutable sale records plus the read-only
//!   projections (recent sales, same-day totals)
//!
//! Ordering in both documents is insertion order, which for sales is
//! also chronological order.

mod inventory;
mod sales;

pub use inventory::{InventoryError, InventoryLedger};
pub use sales::{RECENT_SALES, SalesLedger};
