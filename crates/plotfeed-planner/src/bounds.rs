//! Global bounds scan over all paths of an image.

use plotfeed_core::{Bounds, Image};

/// Find the smallest axis-aligned rectangle containing every point of
/// every path in `image`.
///
/// Maxes are seeded at the smallest representable value and mins at the
/// largest so any real coordinate updates them. One pass over the points,
/// no allocation. The result is shared read-only across all paths during
/// scaling.
pub fn find_bounds(image: &Image) -> Bounds {
    let mut bounds = Bounds {
        max_x: f64::MIN,
        max_y: f64::MIN,
        min_x: f64::MAX,
        min_y: f64::MAX,
    };

    for (_, path) in image.iter() {
        for point in path.iter() {
            if point.x > bounds.max_x {
                bounds.max_x = point.x;
            }
            if point.x < bounds.min_x {
                bounds.min_x = point.x;
            }
            if point.y > bounds.max_y {
                bounds.max_y = point.y;
            }
            if point.y < bounds.min_y {
                bounds.min_y = point.y;
            }
        }
    }

    bounds
}
