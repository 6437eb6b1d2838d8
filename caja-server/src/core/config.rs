//! Server configuration

use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration for the point-of-sale backend
///
/// # Environment variables
///
/// All items can be overridden through environment variables:
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./work_dir | Work directory (data, receipts, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | STORE_NAME | CAJA POS | Banner printed on receipts |
/// | PRINTER_ADDR | (unset) | Thermal printer `host:port`, e.g. 192.168.1.50:9100 |
/// | PRINTER_TIMEOUT | 5 | Printer connect/write timeout in seconds |
/// | PAPER_WIDTH | 32 | Thermal paper width in characters |
/// | TAX_PERCENTAGE | 21 | Default tax rate when a sale carries none |
/// | ENVIRONMENT | development | development \| production |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/var/lib/caja HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Work directory holding data documents, receipts and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// Store name, used as the receipt banner
    pub store_name: String,
    /// Thermal printer socket address; `None` disables hardware printing
    pub printer_addr: Option<String>,
    /// Printer connect/write timeout in seconds
    pub printer_timeout_secs: u64,
    /// Thermal paper width in characters (32 for 58mm, 48 for 80mm)
    pub paper_width: usize,
    /// Default tax percentage applied when a sale draft carries none
    pub tax_percentage: Decimal,
    /// Running environment: development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to defaults.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./work_dir".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            store_name: std::env::var("STORE_NAME").unwrap_or_else(|_| "CAJA POS".into()),
            printer_addr: std::env::var("PRINTER_ADDR").ok().filter(|a| !a.is_empty()),
            printer_timeout_secs: std::env::var("PRINTER_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(5),
            paper_width: std::env::var("PAPER_WIDTH")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(32),
            tax_percentage: std::env::var("TAX_PERCENTAGE")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or_else(|| Decimal::from(21)),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// Override work dir and port, keeping the rest from the environment
    ///
    /// Used by tests to point the server at a temp directory.
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.printer_addr = None;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn printer_timeout(&self) -> Duration {
        Duration::from_secs(self.printer_timeout_secs)
    }

    // === Derived paths ===

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("data")
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir().join("inventory.json")
    }

    pub fn sales_path(&self) -> PathBuf {
        self.data_dir().join("sales.json")
    }

    pub fn receipts_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("receipts")
    }

    pub fn log_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// Create the work directory tree
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.data_dir())?;
        std::fs::create_dir_all(self.receipts_dir())?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}
