//! Network transport for rendered tickets
//!
//! LAN thermal printers accept raw ESC/POS bytes over TCP port 9100
//! with no protocol on top: connect, write, flush, drop. The device
//! prints whatever arrives, so every step is bounded by a timeout to
//! keep a wedged printer from hanging the caller.

use crate::error::{PrintError, PrintResult};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, instrument, warn};

/// Bound on connect and write when no timeout is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Short bound for reachability probes
const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Trait for ticket transports
#[allow(async_fn_in_trait)]
pub trait Printer {
    /// Send raw ESC/POS data to the device
    async fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the device is reachable
    async fn is_online(&self) -> bool;
}

/// Raw-TCP ticket transport (port 9100 on most thermal printers)
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    addr: SocketAddr,
    timeout: Duration,
}

impl NetworkPrinter {
    /// Create a transport from a `host:port` string, as configured via
    /// the `PRINTER_ADDR` environment variable
    pub fn from_addr(addr: &str) -> PrintResult<Self> {
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| PrintError::InvalidConfig(format!("Bad printer address: {}", addr)))?;

        Ok(Self {
            addr,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Replace the connect/write bound (`PRINTER_TIMEOUT` in seconds)
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    async fn connect(&self, limit: Duration) -> PrintResult<TcpStream> {
        tokio::time::timeout(limit, TcpStream::connect(self.addr))
            .await
            .map_err(|_| PrintError::Timeout(format!("Connect timeout: {}", self.addr)))?
            .map_err(|e| PrintError::Connection(format!("{}: {}", self.addr, e)))
    }
}

impl Printer for NetworkPrinter {
    #[instrument(skip(data), fields(addr = %self.addr, bytes = data.len()))]
    async fn print(&self, data: &[u8]) -> PrintResult<()> {
        let mut stream = self.connect(self.timeout).await?;

        tokio::time::timeout(self.timeout, async {
            stream.write_all(data).await?;
            stream.flush().await
        })
        .await
        .map_err(|_| PrintError::Timeout(format!("Write timeout: {}", self.addr)))??;

        debug!("Ticket sent");
        Ok(())
    }

    #[instrument(fields(addr = %self.addr))]
    async fn is_online(&self) -> bool {
        match self.connect(PROBE_TIMEOUT).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Printer unreachable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_parses_configured_addr() {
        let printer = NetworkPrinter::from_addr("10.0.0.20:9100").unwrap();
        assert_eq!(printer.addr().port(), 9100);
        assert_eq!(printer.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_rejects_addr_without_port() {
        assert!(NetworkPrinter::from_addr("10.0.0.20").is_err());
    }

    #[test]
    fn test_timeout_override() {
        let printer = NetworkPrinter::from_addr("10.0.0.20:9100")
            .unwrap()
            .with_timeout(Duration::from_secs(2));
        assert_eq!(printer.timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_print_delivers_bytes_to_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            socket.read_to_end(&mut received).await.unwrap();
            received
        });

        let printer = NetworkPrinter::from_addr(&addr.to_string()).unwrap();
        printer.print(b"\x1b@ticket bytes").await.unwrap();

        assert_eq!(server.await.unwrap(), b"\x1b@ticket bytes");
    }

    #[tokio::test]
    async fn test_offline_when_nothing_listens() {
        // Bind then drop to get a port with no listener behind it
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let printer = NetworkPrinter::from_addr(&addr.to_string()).unwrap();
        assert!(!printer.is_online().await);
        assert!(printer.print(b"x").await.is_err());
    }
}
