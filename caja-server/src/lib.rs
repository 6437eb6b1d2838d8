//! Caja - point-of-sale backend
//!
//! Tracks product inventory, records sales, persists both ledgers as
//! flat JSON documents, writes a text receipt per sale and reprints
//! tickets on a network thermal printer on demand.
//!
//! # Modules
//!
//! - [`core`] - configuration, shared state, HTTP server
//! - [`store`] - flat-file JSON document store
//! - [`ledger`] - inventory and sales ledgers
//! - [`checkout`] - the sale-recording workflow
//! - [`receipt`] - text and thermal receipt renderers
//! - [`api`] - HTTP route handlers
//! - [`common`] - logging infrastructure

pub mod api;
pub mod checkout;
pub mod common;
pub mod core;
pub mod ledger;
pub mod receipt;
pub mod store;

pub use crate::core::{Config, Server, ServerState};

use tracing_appender::non_blocking::WorkerGuard;

/// Prepare the process environment: `.env`, configuration, work
/// directories, logging
///
/// Returns the loaded configuration and the log appender guard, which
/// the caller keeps alive for the process lifetime.
pub fn setup_environment() -> anyhow::Result<(Config, Option<WorkerGuard>)> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_dirs()?;

    let log_dir = config.log_dir();
    let guard = common::logger::init_logger(
        if config.is_production() { "info" } else { "debug" },
        config.is_production(),
        Some(&log_dir),
    )?;

    Ok((config, guard))
}
