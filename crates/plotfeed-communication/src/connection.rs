//! Connection abstraction over the byte-oriented serial link.
//!
//! The device consumes one byte at a time with a fixed pause between
//! bytes; anything faster overruns its UART polling loop. The connection
//! owns that pacing so callers can hand it whole command strings.

use plotfeed_core::{Result, BAUD_RATE, INTER_BYTE_DELAY_MS};
use std::time::Duration;

/// Callback invoked when a connection closes. The argument is `true` when
/// the close was caused by an error rather than an orderly shutdown.
pub type CloseListener = Box<dyn Fn(bool) + Send>;

/// Parameters for opening a plotter connection.
#[derive(Debug, Clone)]
pub struct ConnectionParams {
    /// Explicit port name (e.g. "/dev/ttyACM0", "COM3"). `None` means
    /// detect the device by USB descriptor.
    pub port: Option<String>,

    /// Serial baud rate.
    pub baud_rate: u32,

    /// Pause inserted between individual bytes on the wire.
    pub inter_byte_delay: Duration,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: BAUD_RATE,
            inter_byte_delay: Duration::from_millis(INTER_BYTE_DELAY_MS),
        }
    }
}

impl ConnectionParams {
    /// Use an explicit port instead of descriptor detection.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }
}

/// A byte-oriented connection to the plotter.
///
/// Implementations pace writes at the device's required inter-byte delay
/// and report closes (orderly or not) to registered listeners.
pub trait Connection: Send {
    /// Send a string one byte at a time, pausing between bytes.
    fn send_str(&mut self, data: &str) -> Result<()>;

    /// Whether the link is currently open.
    fn is_connected(&self) -> bool;

    /// Close the link and notify listeners of an orderly shutdown.
    fn close(&mut self) -> Result<()>;

    /// Register a callback for connection-closed events.
    fn add_close_listener(&mut self, listener: CloseListener);
}

/// A connection that records what would have been sent.
///
/// Used by tests and by dump runs where the planner output is persisted
/// instead of transmitted.
#[derive(Default)]
pub struct NoOpConnection {
    sent: Vec<String>,
    connected: bool,
    listeners: Vec<CloseListener>,
}

impl NoOpConnection {
    /// Create a new no-op connection in the connected state.
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            connected: true,
            listeners: Vec::new(),
        }
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> &[String] {
        &self.sent
    }

    /// All sent data joined into one stream, as the device would see it.
    pub fn stream(&self) -> String {
        self.sent.concat()
    }
}

impl Connection for NoOpConnection {
    fn send_str(&mut self, data: &str) -> Result<()> {
        if !self.connected {
            return Err(plotfeed_core::ConnectionError::NotConnected.into());
        }
        self.sent.push(data.to_string());
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn close(&mut self) -> Result<()> {
        self.connected = false;
        for listener in &self.listeners {
            listener(false);
        }
        Ok(())
    }

    fn add_close_listener(&mut self, listener: CloseListener) {
        self.listeners.push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_records_sends_in_order() {
        let mut conn = NoOpConnection::new();
        conn.send_str("s\n").unwrap();
        conn.send_str("0,0,0;").unwrap();
        assert_eq!(conn.sent(), ["s\n", "0,0,0;"]);
        assert_eq!(conn.stream(), "s\n0,0,0;");
    }

    #[test]
    fn noop_rejects_sends_after_close() {
        let mut conn = NoOpConnection::new();
        conn.close().unwrap();
        assert!(!conn.is_connected());
        assert!(conn.send_str("1,1,1;").is_err());
    }

    #[test]
    fn close_listener_sees_orderly_shutdown() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let called = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&called);

        let mut conn = NoOpConnection::new();
        conn.add_close_listener(Box::new(move |was_error| {
            assert!(!was_error);
            flag.store(true, Ordering::SeqCst);
        }));
        conn.close().unwrap();
        assert!(called.load(Ordering::SeqCst));
    }
}
