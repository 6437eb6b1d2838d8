//! Server state

use std::sync::Arc;

use caja_printer::NetworkPrinter;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, warn};

use crate::core::Config;
use crate::ledger::{InventoryLedger, SalesLedger};
use crate::receipt::TicketPrinter;
use crate::store::JsonStore;

/// Server state - shared handles for every request
///
/// Cloning is cheap: the ledgers hold only a document path and the
/// printer is behind an `Arc`.
///
/// The `write_lock` serializes read-modify-write cycles over the flat
/// files (checkout, product creation) within this process, so two
/// concurrent sales cannot both read the pre-decrement snapshot and
/// lose an update. Read-only queries take no lock.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Product ledger
    pub inventory: InventoryLedger,
    /// Sale ledger
    pub sales: SalesLedger,
    /// Thermal printer capability; `None` when no device is configured
    pub printer: Option<Arc<dyn TicketPrinter>>,
    write_lock: Arc<Mutex<()>>,
}

impl ServerState {
    /// Build the server state from configuration
    ///
    /// Creates the work directory tree and wires the ledgers to their
    /// documents. A misconfigured printer address disables hardware
    /// printing rather than failing startup.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_dirs()?;

        let inventory = InventoryLedger::new(JsonStore::new(config.inventory_path()));
        let sales = SalesLedger::new(JsonStore::new(config.sales_path()));

        let printer: Option<Arc<dyn TicketPrinter>> = match &config.printer_addr {
            Some(addr) => match NetworkPrinter::from_addr(addr) {
                Ok(p) => {
                    info!(addr = %addr, timeout = config.printer_timeout_secs, "Thermal printer configured");
                    Some(Arc::new(p.with_timeout(config.printer_timeout())))
                }
                Err(e) => {
                    warn!(addr = %addr, error = %e, "Invalid printer address, printing disabled");
                    None
                }
            },
            None => {
                info!("No thermal printer configured");
                None
            }
        };

        Ok(Self {
            config: config.clone(),
            inventory,
            sales,
            printer,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Replace the printer capability (test injection)
    pub fn with_printer(mut self, printer: Arc<dyn TicketPrinter>) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Take the write lock guarding ledger read-modify-write cycles
    pub async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Probe the configured printer and log its availability
    ///
    /// Run once at startup so an unplugged or misaddressed device shows
    /// up in the logs before the first print request. Returns whether a
    /// printer is configured and reachable.
    pub async fn probe_printer(&self) -> bool {
        match &self.printer {
            Some(printer) => {
                let online = printer.is_online().await;
                if online {
                    info!("Thermal printer online");
                } else {
                    warn!("Thermal printer configured but unreachable");
                }
                online
            }
            None => false,
        }
    }
}
