//! Serial port discovery and the real device connection.
//!
//! Provides low-level serial operations for direct hardware connection to
//! the plotter's Pico board over USB CDC.
//!
//! Supports:
//! - Port enumeration and descriptor-based device detection
//! - Byte-paced blocking writes (the firmware drops back-to-back bytes)
//! - Connection-closed notification

use crate::connection::{CloseListener, Connection, ConnectionParams};
use parking_lot::Mutex;
use plotfeed_core::{ConnectionError, Result};
use std::io::Write;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// USB vendor ID of the Raspberry Pi Pico's CDC interface.
pub const PICO_USB_VID: u16 = 0x2e8a;

/// Settle time after opening the port before the device accepts input.
const OPEN_SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Information about an available serial port.
#[derive(Debug, Clone)]
pub struct SerialPortInfo {
    /// Port name (e.g. "/dev/ttyACM0", "COM3").
    pub port_name: String,

    /// Human-readable description.
    pub description: String,

    /// USB vendor ID if applicable.
    pub vid: Option<u16>,

    /// USB product ID if applicable.
    pub pid: Option<u16>,
}

/// List serial ports that look like candidate plotter devices.
///
/// Filters to the patterns a USB CDC device shows up under:
/// - Windows: COM*
/// - Linux: /dev/ttyUSB*, /dev/ttyACM*
/// - macOS: /dev/cu.usbserial-*, /dev/cu.usbmodem*
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    match serialport::available_ports() {
        Ok(ports) => Ok(ports
            .iter()
            .filter(|port| is_candidate_port(&port.port_name))
            .map(|port| {
                let (vid, pid, description) = match &port.port_type {
                    serialport::SerialPortType::UsbPort(usb) => (
                        Some(usb.vid),
                        Some(usb.pid),
                        format!(
                            "USB {} {}",
                            usb.manufacturer.as_deref().unwrap_or("Device"),
                            usb.product.as_deref().unwrap_or("Serial Port")
                        ),
                    ),
                    _ => (None, None, "Serial Port".to_string()),
                };
                SerialPortInfo {
                    port_name: port.port_name.clone(),
                    description,
                    vid,
                    pid,
                }
            })
            .collect()),
        Err(e) => {
            tracing::error!("Failed to enumerate serial ports: {}", e);
            Err(ConnectionError::IoError {
                reason: format!("Failed to enumerate ports: {}", e),
            }
            .into())
        }
    }
}

/// Pick the port the plotter is attached to.
///
/// Prefers a port whose USB descriptor carries the Pico vendor ID; falls
/// back to the first candidate port when no descriptor matches.
pub fn detect_port() -> Result<String> {
    let ports = list_ports()?;

    if let Some(port) = ports.iter().find(|p| p.vid == Some(PICO_USB_VID)) {
        tracing::info!(port = %port.port_name, desc = %port.description, "found Pico by USB descriptor");
        return Ok(port.port_name.clone());
    }

    if let Some(port) = ports.first() {
        tracing::warn!(
            port = %port.port_name,
            "no Pico descriptor found; falling back to first candidate port"
        );
        return Ok(port.port_name.clone());
    }

    Err(ConnectionError::DeviceNotFound {
        checked: ports.len(),
    }
    .into())
}

/// Check if a port name matches the patterns a plotter can appear under.
fn is_candidate_port(port_name: &str) -> bool {
    if port_name.starts_with("COM") && port_name[3..].chars().all(|c| c.is_ascii_digit()) {
        return true;
    }

    if port_name.starts_with("/dev/ttyUSB") || port_name.starts_with("/dev/ttyACM") {
        return true;
    }

    if port_name.starts_with("/dev/cu.usbserial-") || port_name.starts_with("/dev/cu.usbmodem") {
        return true;
    }

    false
}

/// Trait for the boxed port handle.
trait PortIo: Write + Send {}
impl<T: Write + Send> PortIo for T {}

/// Real serial connection using the serialport crate.
///
/// Owns the port handle with an explicit open/close lifecycle; there is no
/// process-wide device state.
pub struct SerialConnection {
    port_name: String,
    port: Option<Box<dyn PortIo>>,
    inter_byte_delay: Duration,
    listeners: Arc<Mutex<Vec<CloseListener>>>,
}

impl SerialConnection {
    /// Open a connection to the plotter.
    ///
    /// Detects the device by USB descriptor when `params.port` is `None`.
    /// Waits a settle delay after opening; the firmware discards input
    /// received while it boots its menu loop.
    pub fn open(params: &ConnectionParams) -> Result<Self> {
        let port_name = match &params.port {
            Some(port) => port.clone(),
            None => detect_port()?,
        };

        let builder = serialport::new(&port_name, params.baud_rate)
            .timeout(Duration::from_millis(100))
            .data_bits(serialport::DataBits::Eight)
            .stop_bits(serialport::StopBits::One)
            .parity(serialport::Parity::None)
            .flow_control(serialport::FlowControl::None);

        match builder.open_native() {
            Ok(port) => {
                tracing::info!(port = %port_name, baud = params.baud_rate, "opened serial connection");
                thread::sleep(OPEN_SETTLE_DELAY);
                Ok(Self {
                    port_name,
                    port: Some(Box::new(port)),
                    inter_byte_delay: params.inter_byte_delay,
                    listeners: Arc::new(Mutex::new(Vec::new())),
                })
            }
            Err(e) => {
                tracing::warn!("Failed to open serial port {}: {}", port_name, e);
                Err(ConnectionError::FailedToOpen {
                    port: port_name,
                    reason: e.to_string(),
                }
                .into())
            }
        }
    }

    /// The name of the open port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    fn notify_closed(&self, was_error: bool) {
        for listener in self.listeners.lock().iter() {
            listener(was_error);
        }
    }
}

impl Connection for SerialConnection {
    fn send_str(&mut self, data: &str) -> Result<()> {
        let Some(port) = self.port.as_mut() else {
            return Err(ConnectionError::NotConnected.into());
        };

        // One byte per write with a pause in between; the firmware reads
        // its UART without a FIFO and misses anything faster.
        for byte in data.bytes() {
            let result = match port.write_all(&[byte]) {
                Ok(()) => port.flush(),
                Err(e) => Err(e),
            };
            if let Err(e) = result {
                self.port = None;
                self.notify_closed(true);
                return Err(ConnectionError::ConnectionLost {
                    reason: e.to_string(),
                }
                .into());
            }
            thread::sleep(self.inter_byte_delay);
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    fn close(&mut self) -> Result<()> {
        if self.port.take().is_some() {
            tracing::info!(port = %self.port_name, "closed serial connection");
            self.notify_closed(false);
        }
        Ok(())
    }

    fn add_close_listener(&mut self, listener: CloseListener) {
        self.listeners.lock().push(listener);
    }
}
