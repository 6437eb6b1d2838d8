//! Manual print API module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/print/{sale_id}", post(handler::print_ticket))
}
