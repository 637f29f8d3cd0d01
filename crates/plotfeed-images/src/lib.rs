//! # Plotfeed Images
//!
//! Path sources for the plotter pipeline: a catalog of predefined figures
//! and an SVG outline extractor. Both produce
//! [`Image`](plotfeed_core::Image)s in the planner's input coordinate
//! space; the planner takes care of fitting them to the device.

pub mod catalog;
pub mod svg;

pub use catalog::{available_keys, predefined};
pub use svg::image_from_svg;
