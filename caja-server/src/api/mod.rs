//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`inventory`] - product list queries
//! - [`products`] - product creation
//! - [`sales`] - sale recording and sale queries
//! - [`print`] - manual thermal reprint by sale id

pub mod health;
pub mod inventory;
pub mod print;
pub mod products;
pub mod sales;

use axum::Router;

use crate::core::ServerState;

/// Compose the full API router, nested under `/api`
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(inventory::router())
        .merge(products::router())
        .merge(sales::router())
        .merge(print::router())
}
