//! Per-image compilation driver.
//!
//! Runs the full pipeline for one image: bounds scan, adaptive scaling,
//! simplification, and the first/interior/last split the transmitter
//! consumes. Pure computation; any error here is reported before a single
//! byte reaches the device.

use crate::bounds::find_bounds;
use crate::scaler::scale_path;
use crate::simplify::simplify;
use plotfeed_core::{CompiledPath, DeviceBounds, Image, ImageError, PlannerError, Result, Step};

/// Split a simplified step sequence into the transmitter's
/// (first, interior, last) contract.
///
/// The transmitter brackets every stroke with pen transitions at the first
/// and last step, so a compiled path needs at least two steps.
pub fn compile_path(name: &str, mut steps: Vec<Step>) -> Result<CompiledPath> {
    if steps.len() < 2 {
        return Err(PlannerError::PathTooShort {
            name: name.to_string(),
            len: steps.len(),
        }
        .into());
    }

    let first = steps.remove(0);
    let Some(last) = steps.pop() else {
        // Length checked above; kept as an error rather than a panic.
        return Err(PlannerError::PathTooShort {
            name: name.to_string(),
            len: 1,
        }
        .into());
    };

    Ok(CompiledPath {
        first,
        interior: steps,
        last,
    })
}

/// Compile every path of `image` into transmit-ready step sequences.
///
/// Paths are processed in image insertion order and the output preserves
/// that order; transmission downstream is ordering-sensitive. The bounds
/// scan completes before any scaling begins, and the resulting bounds are
/// shared read-only by all paths so disjoint strokes keep their relative
/// proportions.
pub fn compile_image(image: &Image, device: &DeviceBounds) -> Result<Vec<(String, CompiledPath)>> {
    if image.is_empty() {
        return Err(ImageError::EmptyImage.into());
    }

    let bounds = find_bounds(image);
    tracing::info!(
        paths = image.len(),
        points = image.total_points(),
        max_x = bounds.max_x,
        max_y = bounds.max_y,
        min_x = bounds.min_x,
        min_y = bounds.min_y,
        "computed image bounds"
    );

    let mut compiled = Vec::with_capacity(image.len());
    for (index, (name, path)) in image.iter().enumerate() {
        tracing::info!(
            path = %name,
            index = index + 1,
            total = image.len(),
            "normalising and scaling path"
        );

        let scaled = scale_path(path, &bounds, device)?;
        let steps = simplify(&scaled);
        tracing::info!(
            path = %name,
            steps = steps.len(),
            original = scaled.len(),
            "simplified path"
        );

        compiled.push((name.clone(), compile_path(name, steps)?));
    }

    Ok(compiled)
}
