//! Error handling for plotfeed.
//!
//! Provides error types for each layer of the pipeline:
//! - Planner errors (scaling/quantization failures)
//! - Connection errors (serial transport)
//! - Image errors (path sources)
//!
//! All error types use `thiserror`. Planner errors are pure-function
//! failures: they carry no partial device-side effects and must be fully
//! resolved before any transmission begins, since transmission is
//! irreversible motion on physical hardware.

use crate::geometry::Axis;
use thiserror::Error;

/// Path-to-step compiler error type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// A coordinate range has zero width on an axis needed for scaling.
    #[error("Degenerate {axis} interval: source range has zero width, cannot rescale")]
    DegenerateInterval {
        /// The axis with the zero-width range.
        axis: Axis,
    },

    /// The shrink-and-retry bounds fit did not converge.
    #[error("Cannot fit path within device bounds on {axis} after {attempts} shrink attempts")]
    BoundsUnfittable {
        /// The axis that kept overflowing.
        axis: Axis,
        /// Number of fit attempts made before giving up.
        attempts: u32,
    },

    /// A path simplified to fewer steps than the pen transitions need.
    #[error("Path '{name}' has {len} point(s); at least 2 are required")]
    PathTooShort {
        /// The path name.
        name: String,
        /// The number of points the path had.
        len: usize,
    },
}

/// Serial transport error type.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// No plotter device was found on any serial port.
    #[error("No plotter device found; checked {checked} candidate port(s)")]
    DeviceNotFound {
        /// Number of candidate ports examined.
        checked: usize,
    },

    /// Failed to open a port.
    #[error("Failed to open port {port}: {reason}")]
    FailedToOpen {
        /// The port that failed to open.
        port: String,
        /// The underlying failure.
        reason: String,
    },

    /// An operation was attempted on a closed connection.
    #[error("Connection is not open")]
    NotConnected,

    /// The connection dropped mid-transmission.
    #[error("Connection lost: {reason}")]
    ConnectionLost {
        /// The underlying failure.
        reason: String,
    },

    /// I/O error on the wire.
    #[error("I/O error: {reason}")]
    IoError {
        /// The underlying failure.
        reason: String,
    },
}

/// Path source error type.
#[derive(Error, Debug, Clone)]
pub enum ImageError {
    /// The requested catalog key does not exist.
    ///
    /// Non-fatal: the caller may retry with one of the listed keys.
    #[error("Unknown image '{key}'; available images: {}", available.join(", "))]
    UnknownImage {
        /// The key that was requested.
        key: String,
        /// Valid catalog keys.
        available: Vec<String>,
    },

    /// SVG document could not be converted to paths.
    #[error("Failed to extract paths from SVG: {reason}")]
    SvgParse {
        /// The underlying failure.
        reason: String,
    },

    /// The image contains no paths to draw.
    #[error("Image contains no paths")]
    EmptyImage,
}

/// Unified error type for plotfeed.
///
/// The primary error type used in public APIs; any layer's error converts
/// into it via `From`.
#[derive(Error, Debug)]
pub enum Error {
    /// Planner error
    #[error(transparent)]
    Planner(#[from] PlannerError),

    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Image source error
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message.
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Check if this is a planner error.
    pub fn is_planner_error(&self) -> bool {
        matches!(self, Error::Planner(_))
    }
}

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_image_lists_available_keys() {
        let err = ImageError::UnknownImage {
            key: "spiral".to_string(),
            available: vec!["square".to_string(), "triangle".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("spiral"));
        assert!(msg.contains("square, triangle"));
    }

    #[test]
    fn planner_errors_convert_to_unified() {
        let err: Error = PlannerError::DegenerateInterval { axis: Axis::X }.into();
        assert!(err.is_planner_error());
        assert!(!err.is_connection_error());
    }
}
