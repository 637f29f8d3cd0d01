//! Adaptive scaling of one path into the device step rectangle.

use crate::rescale::rescale;
use plotfeed_core::{Axis, Bounds, DeviceBounds, PlannerError, PlotPath, Point};

/// Maximum number of shrink-and-retry passes before giving up.
///
/// The shrink loop converges in practice within a handful of passes; the
/// cap turns a pathological input into an explicit
/// [`PlannerError::BoundsUnfittable`] instead of an endless loop.
pub const MAX_FIT_ATTEMPTS: u32 = 32;

/// Rescale every point of `path` from `bounds` into `device`, shrinking the
/// target rectangle by 10% per axis overflow and retrying the whole path.
///
/// Floating-point rounding can land a mapped endpoint a hair outside the
/// target interval; when that happens the overflowing axis range is
/// narrowed (`max -= max * 0.1`, `min += min * 0.1`) and the path is
/// rescaled from scratch with the tighter range. Note that with the usual
/// zero minimum the min term is a no-op, so only the max bound effectively
/// shrinks. That is the observed device behavior and is kept as is.
///
/// The returned points always lie within the *caller-supplied* `device`
/// rectangle; the narrowed rectangle is internal fitting state. Returns
/// [`PlannerError::DegenerateInterval`] when an axis of `bounds` has zero
/// width, and [`PlannerError::BoundsUnfittable`] when the retry cap is
/// reached.
pub fn scale_path(
    path: &PlotPath,
    bounds: &Bounds,
    device: &DeviceBounds,
) -> Result<Vec<Point>, PlannerError> {
    if bounds.is_degenerate(Axis::X) {
        return Err(PlannerError::DegenerateInterval { axis: Axis::X });
    }
    if bounds.is_degenerate(Axis::Y) {
        return Err(PlannerError::DegenerateInterval { axis: Axis::Y });
    }

    // Working copy; the caller's rectangle is never mutated.
    let mut fit = *device;

    for attempt in 0..MAX_FIT_ATTEMPTS {
        match try_scale(path, bounds, &fit) {
            Ok(scaled) => {
                if attempt > 0 {
                    tracing::debug!(attempts = attempt, "path fit after bounds shrink");
                }
                return Ok(scaled);
            }
            Err(Axis::X) => {
                fit.max_x -= fit.max_x * 0.1;
                fit.min_x += fit.min_x * 0.1;
            }
            Err(Axis::Y) => {
                fit.max_y -= fit.max_y * 0.1;
                fit.min_y += fit.min_y * 0.1;
            }
        }
    }

    let axis = if fit.max_x != device.max_x || fit.min_x != device.min_x {
        Axis::X
    } else {
        Axis::Y
    };
    Err(PlannerError::BoundsUnfittable {
        axis,
        attempts: MAX_FIT_ATTEMPTS,
    })
}

/// Single rescale pass. Fails with the overflowing axis as soon as any
/// mapped coordinate leaves the current fit rectangle.
fn try_scale(path: &PlotPath, bounds: &Bounds, fit: &DeviceBounds) -> Result<Vec<Point>, Axis> {
    let mut scaled = Vec::with_capacity(path.len());

    for point in path.iter() {
        let x = rescale(point.x, bounds.max_x, bounds.min_x, fit.max_x, fit.min_x);
        let y = rescale(point.y, bounds.max_y, bounds.min_y, fit.max_y, fit.min_y);

        if x > fit.max_x || x < fit.min_x {
            return Err(Axis::X);
        }
        if y > fit.max_y || y < fit.min_y {
            return Err(Axis::Y);
        }
        scaled.push(Point::new(x, y));
    }

    Ok(scaled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotfeed_core::DEVICE_BOUNDS;

    fn bounds(max_x: f64, max_y: f64, min_x: f64, min_y: f64) -> Bounds {
        Bounds {
            max_x,
            max_y,
            min_x,
            min_y,
        }
    }

    #[test]
    fn identity_when_ranges_match() {
        let path = PlotPath::from_pairs(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]);
        let scaled = scale_path(&path, &bounds(10.0, 10.0, 0.0, 0.0), &DEVICE_BOUNDS).unwrap();
        assert_eq!(
            scaled,
            vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 5.0),
                Point::new(10.0, 10.0)
            ]
        );
    }

    #[test]
    fn maps_arbitrary_units_into_device_range() {
        let path = PlotPath::from_pairs(&[(100.0, 200.0), (300.0, 400.0), (500.0, 600.0)]);
        let scaled = scale_path(&path, &bounds(500.0, 600.0, 100.0, 200.0), &DEVICE_BOUNDS).unwrap();
        for point in &scaled {
            assert!(DEVICE_BOUNDS.contains_xy(point.x, point.y), "{point:?}");
        }
        assert_eq!(scaled[0], Point::new(0.0, 0.0));
        assert_eq!(scaled[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn degenerate_x_interval_is_reported() {
        let path = PlotPath::from_pairs(&[(4.0, 0.0), (4.0, 10.0)]);
        let err = scale_path(&path, &bounds(4.0, 10.0, 4.0, 0.0), &DEVICE_BOUNDS).unwrap_err();
        assert_eq!(err, PlannerError::DegenerateInterval { axis: Axis::X });
    }

    #[test]
    fn single_point_path_is_degenerate_on_both_axes() {
        let path = PlotPath::from_pairs(&[(3.0, 3.0)]);
        let err = scale_path(&path, &bounds(3.0, 3.0, 3.0, 3.0), &DEVICE_BOUNDS).unwrap_err();
        assert!(matches!(err, PlannerError::DegenerateInterval { .. }));
    }

    #[test]
    fn unfittable_path_hits_the_retry_cap() {
        // Bounds deliberately narrower than the path's extent. The mapped
        // overflow is proportional to the fit range, so shrinking can never
        // catch up; the cap must turn this into an explicit error.
        let path = PlotPath::from_pairs(&[(0.0, 0.0), (16.0, 8.0)]);
        let err = scale_path(&path, &bounds(12.0, 8.0, 0.0, 0.0), &DEVICE_BOUNDS).unwrap_err();
        assert_eq!(
            err,
            PlannerError::BoundsUnfittable {
                axis: Axis::X,
                attempts: MAX_FIT_ATTEMPTS,
            }
        );
    }

    #[test]
    fn epsilon_overflow_converges_after_one_shrink() {
        // 9.1875 is 147/16; 10/9.1875 rounds up far enough that mapping
        // the endpoint lands one ulp above 10.0 and fails the first pass.
        // After one shrink the target max is exactly 9.0 and 9/9.1875
        // rounds down, so the endpoint maps to exactly 9.0 and fits.
        let path = PlotPath::from_pairs(&[(0.0, 0.0), (9.1875, 1.0)]);
        let scaled = scale_path(&path, &bounds(9.1875, 1.0, 0.0, 0.0), &DEVICE_BOUNDS).unwrap();

        assert_eq!(scaled[0], Point::new(0.0, 0.0));
        assert_eq!(scaled[1], Point::new(9.0, 10.0));
        for point in &scaled {
            assert!(DEVICE_BOUNDS.contains_xy(point.x, point.y), "{point:?}");
        }
    }

    #[test]
    fn output_stays_within_caller_bounds_after_internal_shrink() {
        // Even when the fit rectangle is narrowed internally, the contract
        // is against the rectangle the caller supplied.
        let path = PlotPath::from_pairs(&[(0.0, 0.0), (2.5, 7.5), (10.0, 10.0)]);
        let scaled = scale_path(&path, &bounds(10.0, 10.0, 0.0, 0.0), &DEVICE_BOUNDS).unwrap();
        for point in &scaled {
            assert!(DEVICE_BOUNDS.contains_xy(point.x, point.y), "{point:?}");
        }
    }
}
