//! Quantization to the microstep grid and removal of redundant points.
//!
//! Works on one already-scaled path. Every coordinate is snapped to the
//! device's 1/32-unit grid, then interior points that contribute no motion
//! of their own are dropped:
//! - stationary runs (three identical consecutive positions),
//! - interior points of vertical runs (same X as both neighbors),
//! - interior points of horizontal runs (same Y as both neighbors).
//!
//! A path's first and last point are never removed or folded; they carry
//! the pen-lift transitions and must survive as explicit endpoints.
//!
//! # Known limitation
//!
//! Only immediate neighbors are compared, so a sharp zig-zag that stays
//! axis-aligned (a back-and-forth sandwiched between two same-axis
//! neighbors) can be flattened away. This matches the device's historical
//! behavior and is kept for compatibility; it is an accuracy trade-off,
//! not a bug to patch here.

use plotfeed_core::{Point, Step, ROUND_DECIMALS, STEP_DENOMINATOR};

/// Snap a coordinate to the nearest 1/32 device unit, then round to 5
/// decimal places.
///
/// The second stage compensates for binary floating-point representation
/// error so that equality comparisons between quantized coordinates behave
/// as the firmware expects.
pub fn quantize(value: f64) -> f64 {
    let snapped = (value * STEP_DENOMINATOR).round() / STEP_DENOMINATOR;
    let factor = 10f64.powi(ROUND_DECIMALS as i32);
    (snapped * factor).round() / factor
}

/// An output slot. The emitted coordinate is fixed at creation; a removed
/// run point folds its coordinate into the predecessor's *comparison*
/// coordinate only, which later neighbor checks read. Removal is recorded
/// as a flag rather than an out-of-band coordinate value so no legitimate
/// device coordinate can collide with the marker.
#[derive(Debug, Clone, Copy)]
struct Slot {
    x: f64,
    y: f64,
    cmp_x: f64,
    cmp_y: f64,
    removed: bool,
}

impl Slot {
    fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            cmp_x: x,
            cmp_y: y,
            removed: false,
        }
    }
}

/// Quantize a scaled path and strip redundant interior points.
///
/// The successor used in the run comparisons is always read from the
/// original scaled sequence, never re-quantized at lookup time; the
/// predecessor is the nearest earlier output slot not flagged for removal,
/// compared through its comparison coordinate. Removing a run point
/// advances that comparison coordinate so the rest of the run keeps
/// collapsing, while every kept slot is emitted with the coordinates it
/// was created with.
pub fn simplify(scaled: &[Point]) -> Vec<Step> {
    if scaled.is_empty() {
        return Vec::new();
    }

    let last_index = scaled.len() - 1;
    let mut slots: Vec<Slot> = Vec::with_capacity(scaled.len());

    for (i, point) in scaled.iter().enumerate() {
        let x = quantize(point.x);
        let y = quantize(point.y);

        // Endpoints carry the pen transitions; never removed.
        if i == 0 || i == last_index {
            slots.push(Slot::new(x, y));
            continue;
        }

        // Removal is transitive backward: skip flagged slots until a kept
        // predecessor is found. Slot 0 is never flagged, so this always
        // terminates there at the latest.
        let prev = slots.iter().rposition(|slot| !slot.removed).unwrap_or(0);
        let (prev_x, prev_y) = (slots[prev].cmp_x, slots[prev].cmp_y);
        let next = scaled[i + 1];

        let removed = if prev_x == x && prev_y == y && next.x == x && next.y == y {
            // No motion across three consecutive positions.
            true
        } else if prev_x == x && next.x == x {
            // Interior of a vertical run: advance the predecessor's
            // comparison Y so the run can keep collapsing.
            slots[prev].cmp_y = y;
            true
        } else if prev_y == y && next.y == y {
            // Interior of a horizontal run: advance the predecessor's
            // comparison X.
            slots[prev].cmp_x = x;
            true
        } else {
            false
        };

        let mut slot = Slot::new(x, y);
        slot.removed = removed;
        slots.push(slot);
    }

    slots
        .into_iter()
        .filter(|slot| !slot.removed)
        .map(|slot| Step::new(slot.x, slot.y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(pairs: &[(f64, f64)]) -> Vec<Point> {
        pairs.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn quantize_snaps_to_microstep_grid() {
        assert_eq!(quantize(0.0), 0.0);
        assert_eq!(quantize(1.0 / 32.0), 0.03125);
        assert_eq!(quantize(0.04), 0.03125);
        assert_eq!(quantize(3.1), 3.09375);
        // 5-decimal stage keeps comparisons stable
        assert_eq!(quantize(10.000000000000002), 10.0);
    }

    #[test]
    fn stationary_run_is_collapsed() {
        let scaled = points(&[(0.0, 0.0), (5.0, 5.0), (5.0, 5.0), (5.0, 5.0), (9.0, 9.0)]);
        let steps = simplify(&scaled);
        // The middle of the stationary triple goes; its neighbor before the
        // departure is compared against the moving successor and stays.
        assert_eq!(
            steps,
            vec![
                Step::new(0.0, 0.0),
                Step::new(5.0, 5.0),
                Step::new(5.0, 5.0),
                Step::new(9.0, 9.0)
            ]
        );
    }

    #[test]
    fn l_shape_keeps_the_corner() {
        let scaled = points(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 5.0), (10.0, 10.0)]);
        let steps = simplify(&scaled);
        assert_eq!(
            steps,
            vec![
                Step::new(0.0, 0.0),
                Step::new(10.0, 0.0),
                Step::new(10.0, 10.0)
            ]
        );
    }

    #[test]
    fn endpoints_survive_even_when_redundant() {
        // The whole path sits on one spot; only the middle goes away.
        let scaled = points(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]);
        let steps = simplify(&scaled);
        assert_eq!(steps, vec![Step::new(3.0, 3.0), Step::new(3.0, 3.0)]);
    }

    #[test]
    fn vertical_run_removal_leaves_kept_points_untouched() {
        let scaled = points(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (4.0, 6.0), (8.0, 6.0)]);
        let steps = simplify(&scaled);
        // (4, 3) goes; its neighbors keep the coordinates they entered with.
        assert_eq!(
            steps,
            vec![
                Step::new(0.0, 0.0),
                Step::new(4.0, 0.0),
                Step::new(4.0, 6.0),
                Step::new(8.0, 6.0)
            ]
        );
    }

    #[test]
    fn long_vertical_run_collapses_to_its_ends() {
        // The comparison coordinate advances with each removal, so the
        // whole interior of the run is dropped, not just the first point.
        let scaled = points(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 3.0),
            (4.0, 6.0),
            (4.0, 9.0),
            (8.0, 9.0),
        ]);
        let steps = simplify(&scaled);
        assert_eq!(
            steps,
            vec![
                Step::new(0.0, 0.0),
                Step::new(4.0, 0.0),
                Step::new(4.0, 9.0),
                Step::new(8.0, 9.0)
            ]
        );
    }

    #[test]
    fn run_corner_survives_with_its_own_coordinates() {
        // The corner after a horizontal run must come through verbatim;
        // only the run interior is removed.
        let scaled = points(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]);
        let steps = simplify(&scaled);
        assert_eq!(steps, vec![Step::new(0.0, 0.0), Step::new(10.0, 0.0)]);
    }

    #[test]
    fn off_grid_input_is_quantized() {
        let scaled = points(&[(0.01, 0.01), (5.02, 5.01), (9.99, 9.98)]);
        let steps = simplify(&scaled);
        for step in &steps {
            let x_frac = step.x * 32.0;
            let y_frac = step.y * 32.0;
            assert!((x_frac - x_frac.round()).abs() < 1e-6);
            assert!((y_frac - y_frac.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn short_paths_pass_through() {
        assert!(simplify(&[]).is_empty());
        assert_eq!(simplify(&points(&[(1.0, 2.0)])).len(), 1);
        assert_eq!(simplify(&points(&[(1.0, 2.0), (3.0, 4.0)])).len(), 2);
    }
}
