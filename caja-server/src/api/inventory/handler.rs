//! Inventory API handlers

use axum::{Json, extract::State};
use shared::ApiResult;
use shared::models::Product;

use crate::core::ServerState;

/// GET /api/inventory - full product list
pub async fn list(State(state): State<ServerState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.inventory.list()?;
    Ok(Json(products))
}
