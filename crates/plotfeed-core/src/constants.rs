//! Device constants shared with the plotter firmware.
//!
//! The step range and serial parameters mirror the values compiled into the
//! Pico firmware; changing them here without reflashing the device will
//! produce out-of-range motion commands.

use crate::geometry::DeviceBounds;

/// Maximum step position on the X axis.
pub const MAX_STEPS_X: f64 = 10.0;
/// Maximum step position on the Y axis.
pub const MAX_STEPS_Y: f64 = 10.0;
/// Maximum step position on the Z (pen) axis. Pen down.
pub const MAX_STEPS_Z: f64 = 1.0;
/// Minimum step position on the X axis.
pub const MIN_STEPS_X: f64 = 0.0;
/// Minimum step position on the Y axis.
pub const MIN_STEPS_Y: f64 = 0.0;
/// Minimum step position on the Z (pen) axis. Pen up.
pub const MIN_STEPS_Z: f64 = 0.0;

/// The default device step rectangle.
pub const DEVICE_BOUNDS: DeviceBounds = DeviceBounds {
    max_x: MAX_STEPS_X,
    min_x: MIN_STEPS_X,
    max_y: MAX_STEPS_Y,
    min_y: MIN_STEPS_Y,
    max_z: MAX_STEPS_Z,
    min_z: MIN_STEPS_Z,
};

/// Fractional step resolution of the stepper drivers (1/32 microstepping).
pub const STEP_DENOMINATOR: f64 = 32.0;

/// Decimal places kept after grid rounding.
///
/// The second rounding stage compensates for binary floating-point
/// representation error so equality comparisons on quantized coordinates
/// behave as the firmware expects.
pub const ROUND_DECIMALS: u32 = 5;

/// Serial baud rate of the device UART.
pub const BAUD_RATE: u32 = 115_200;

/// Pause between individual bytes on the wire, in milliseconds.
///
/// The firmware polls its UART without a FIFO; bytes sent back-to-back at
/// full line rate get dropped.
pub const INTER_BYTE_DELAY_MS: u64 = 30;
