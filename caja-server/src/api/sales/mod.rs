//! Sales API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/sales", get(handler::list).post(handler::create))
        .route("/api/sales/recent", get(handler::recent))
        .route("/api/daily-total", get(handler::daily_total))
}
