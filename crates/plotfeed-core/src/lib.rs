//! # Plotfeed Core
//!
//! Core types, device constants, and error taxonomy for plotfeed.
//! Provides the fundamental data model shared by the planner,
//! communication, and image-source crates.

pub mod constants;
pub mod error;
pub mod geometry;

pub use constants::{
    BAUD_RATE, DEVICE_BOUNDS, INTER_BYTE_DELAY_MS, MAX_STEPS_X, MAX_STEPS_Y, MAX_STEPS_Z,
    MIN_STEPS_X, MIN_STEPS_Y, MIN_STEPS_Z, ROUND_DECIMALS, STEP_DENOMINATOR,
};
pub use error::{ConnectionError, Error, ImageError, PlannerError, Result};
pub use geometry::{Axis, Bounds, CompiledPath, DeviceBounds, Image, PlotPath, Point, Step};
