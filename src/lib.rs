//! # Plotfeed
//!
//! Turns named 2D point paths into quantized step streams and feeds them
//! to a pen plotter over a serial link. The work is split across four
//! crates:
//!
//! - `plotfeed-core`: shared geometry types, device constants, errors
//! - `plotfeed-planner`: bounds scan, adaptive scaling, simplification
//! - `plotfeed-communication`: serial transport and pen-lift framing
//! - `plotfeed-images`: predefined figures and SVG outline extraction
//!
//! This crate ties them together behind the `plotfeed` binary.

use tracing_subscriber::EnvFilter;

pub mod dump;

pub use plotfeed_communication as communication;
pub use plotfeed_images as images;
pub use plotfeed_planner as planner;

/// Initialise logging from `RUST_LOG`, defaulting to `info`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
