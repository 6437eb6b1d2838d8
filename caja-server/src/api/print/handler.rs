//! Manual print API handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use shared::{ApiError, ApiResult};
use tracing::warn;

use crate::core::ServerState;
use crate::receipt::thermal::ReceiptRenderer;

#[derive(Debug, Serialize)]
pub struct PrintResponse {
    pub success: bool,
}

/// POST /api/print/:sale_id - reprint a recorded sale on the thermal
/// printer
///
/// An unknown sale id is a 404. Device trouble is not: a missing or
/// unreachable printer logs a diagnostic and the call still succeeds,
/// so the counter UI never blocks on hardware.
pub async fn print_ticket(
    State(state): State<ServerState>,
    Path(sale_id): Path<i64>,
) -> ApiResult<Json<PrintResponse>> {
    let sale = state
        .sales
        .find_by_id(sale_id)?
        .ok_or_else(|| ApiError::not_found(format!("Sale {}", sale_id)))?;

    let renderer =
        ReceiptRenderer::new(state.config.paper_width, state.config.store_name.as_str());
    let data = renderer.render(&sale);

    match &state.printer {
        Some(printer) => {
            if let Err(e) = printer.print(&data).await {
                warn!(sale_id, error = %e, "Thermal print failed");
            }
        }
        None => {
            warn!(sale_id, "No thermal printer configured, skipping print");
        }
    }

    Ok(Json(PrintResponse { success: true }))
}
