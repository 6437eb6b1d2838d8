//! Sales API handlers

use axum::{Json, extract::State};
use chrono::Local;
use serde::Serialize;
use shared::ApiResult;
use shared::models::{DailyTotal, Sale, SaleDraft};

use crate::checkout;
use crate::core::ServerState;
use crate::ledger::RECENT_SALES;

#[derive(Debug, Serialize)]
pub struct SaleRecorded {
    pub message: String,
    pub sale: Sale,
}

/// GET /api/sales - full sales history
pub async fn list(State(state): State<ServerState>) -> ApiResult<Json<Vec<Sale>>> {
    let sales = state.sales.list()?;
    Ok(Json(sales))
}

/// GET /api/sales/recent - last 3 sales, most recent first
pub async fn recent(State(state): State<ServerState>) -> ApiResult<Json<Vec<Sale>>> {
    let sales = state.sales.recent(RECENT_SALES)?;
    Ok(Json(sales))
}

/// GET /api/daily-total - sum and count of today's sales
pub async fn daily_total(State(state): State<ServerState>) -> ApiResult<Json<DailyTotal>> {
    let total = state.sales.daily_total(Local::now())?;
    Ok(Json(total))
}

/// POST /api/sales - record a sale
///
/// Runs the full checkout workflow: validation, two-pass stock check,
/// persistence of both ledgers, text receipt.
pub async fn create(
    State(state): State<ServerState>,
    Json(draft): Json<SaleDraft>,
) -> ApiResult<Json<SaleRecorded>> {
    let sale = checkout::record_sale(&state, draft).await?;

    Ok(Json(SaleRecorded {
        message: "Sale recorded".to_string(),
        sale,
    }))
}
