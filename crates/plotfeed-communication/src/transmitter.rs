//! Step transmission with pen-lift framing.
//!
//! The firmware's automated draw mode accepts ASCII motion commands of the
//! form `X,Y,Z;`. Each compiled path is framed as:
//! 1. pen-up traversal to the first step,
//! 2. pen-down at the first step,
//! 3. one motion command per interior step,
//! 4. motion to the last step still pen-down,
//! 5. pen-up at the last step.
//!
//! Transmission is strictly sequential; each command must be fully written
//! (at the connection's byte pacing) before the next is issued.

use crate::connection::Connection;
use plotfeed_core::{CompiledPath, DeviceBounds, Result, DEVICE_BOUNDS};

/// Sends compiled paths over a connection in image order.
pub struct Transmitter<'a> {
    connection: &'a mut dyn Connection,
    device: DeviceBounds,
}

impl<'a> Transmitter<'a> {
    /// Create a transmitter over an open connection using the default
    /// device bounds for the pen range.
    pub fn new(connection: &'a mut dyn Connection) -> Self {
        Self::with_device(connection, DEVICE_BOUNDS)
    }

    /// Create a transmitter with explicit device bounds.
    pub fn with_device(connection: &'a mut dyn Connection, device: DeviceBounds) -> Self {
        Self { connection, device }
    }

    /// Enter the firmware's automated draw mode and reset to the origin,
    /// pen up.
    pub fn begin_session(&mut self) -> Result<()> {
        self.connection.send_str("s\n")?;
        self.send_command(self.device.min_x, self.device.min_y, self.device.min_z)
    }

    /// Transmit one compiled path with its pen-lift framing.
    pub fn send_path(&mut self, name: &str, path: &CompiledPath) -> Result<()> {
        tracing::info!(path = %name, steps = path.total_steps(), "sending path");

        let pen_up = self.device.min_z;
        let pen_down = self.device.max_z;

        // Travel to the stroke start with the pen lifted, then drop it.
        self.send_command(path.first.x, path.first.y, pen_up)?;
        self.send_command(path.first.x, path.first.y, pen_down)?;

        for (index, step) in path.interior.iter().enumerate() {
            tracing::debug!(path = %name, index = index + 1, x = step.x, y = step.y, "motion");
            self.send_command(step.x, step.y, pen_down)?;
        }

        // Finish the stroke, then lift the pen where it ended.
        self.send_command(path.last.x, path.last.y, pen_down)?;
        self.send_command(path.last.x, path.last.y, pen_up)
    }

    /// Transmit a whole compiled image, paths in order.
    pub fn send_image(&mut self, compiled: &[(String, CompiledPath)]) -> Result<()> {
        for (name, path) in compiled {
            self.send_path(name, path)?;
        }
        Ok(())
    }

    fn send_command(&mut self, x: f64, y: f64, z: f64) -> Result<()> {
        self.connection.send_str(&format_command(x, y, z))
    }
}

/// Format one motion command in the firmware's `X,Y,Z;` wire format.
pub fn format_command(x: f64, y: f64, z: f64) -> String {
    format!("{},{},{};", x, y, z)
}
