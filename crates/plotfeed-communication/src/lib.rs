//! # Plotfeed Communication
//!
//! Serial transport and step transmission for the plotter device.
//! Provides port discovery, a byte-paced serial connection with an
//! explicit open/close lifecycle, and the transmitter that frames each
//! compiled path with pen-lift transitions.

pub mod connection;
pub mod serial;
pub mod transmitter;

pub use connection::{CloseListener, Connection, ConnectionParams, NoOpConnection};
pub use serial::{detect_port, list_ports, SerialConnection, SerialPortInfo, PICO_USB_VID};
pub use transmitter::Transmitter;
