//! Receipt rendering
//!
//! Two independent renderers over a finalized sale record:
//!
//! - [`text`] - fixed-width plain-text document, written to the
//!   receipts directory as `ticket_<id>.txt` during checkout
//! - [`thermal`] - ESC/POS byte sequence for a thermal printer,
//!   produced only on an explicit print request
//!
//! The hardware side effect goes through the [`TicketPrinter`]
//! capability so the workflow and its tests never depend on a physical
//! device being present.

pub mod text;
pub mod thermal;

use async_trait::async_trait;
use caja_printer::{NetworkPrinter, PrintResult, Printer};

/// Injectable printing capability
///
/// The production implementation sends the rendered ticket to a network
/// thermal printer; tests substitute a recording stub.
#[async_trait]
pub trait TicketPrinter: Send + Sync {
    /// Send rendered ESC/POS data to the device
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Whether the device is currently reachable
    async fn is_online(&self) -> bool;
}

#[async_trait]
impl TicketPrinter for NetworkPrinter {
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        Printer::print(self, data).await
    }

    async fn is_online(&self) -> bool {
        Printer::is_online(self).await
    }
}
