//! Product API handlers

use axum::{Json, extract::State};
use serde::Serialize;
use shared::models::{Product, ProductCreate};
use shared::{ApiError, ApiResult};

use crate::core::ServerState;

#[derive(Debug, Serialize)]
pub struct ProductSaved {
    pub message: String,
    pub product: Product,
}

/// POST /api/products - add a product to the inventory
///
/// Assigns `max(existing ids) + 1` when the payload carries no id.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> ApiResult<Json<ProductSaved>> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Product name is required"));
    }
    if payload.stock < 0 {
        return Err(ApiError::validation("Stock cannot be negative"));
    }

    let _guard = state.write_guard().await;
    let product = state.inventory.add(payload)?;

    Ok(Json(ProductSaved {
        message: "Product saved".to_string(),
        product,
    }))
}
