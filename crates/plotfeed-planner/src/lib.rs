//! # Plotfeed Planner
//!
//! The path-to-step compiler. Turns an [`Image`](plotfeed_core::Image) of
//! arbitrary-coordinate paths into ordered, quantized
//! [`CompiledPath`](plotfeed_core::CompiledPath)s that lie within the
//! device's step range.
//!
//! Pipeline, in order:
//! 1. [`bounds::find_bounds`] — one scan over every point of the image
//! 2. [`scaler::scale_path`] — per-path affine rescale with adaptive
//!    bounds shrinking
//! 3. [`simplify::simplify`] — quantization to the microstep grid and
//!    removal of redundant interior points
//! 4. [`compile::compile_image`] — drives the above and splits each result
//!    into (first, interior, last) for the transmitter
//!
//! Everything here is pure computation: no device I/O, no shared state
//! between paths beyond the read-only image bounds.

pub mod bounds;
pub mod compile;
pub mod rescale;
pub mod scaler;
pub mod simplify;

pub use bounds::find_bounds;
pub use compile::{compile_image, compile_path};
pub use rescale::rescale;
pub use scaler::{scale_path, MAX_FIT_ATTEMPTS};
pub use simplify::{quantize, simplify};
