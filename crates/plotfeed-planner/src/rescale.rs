//! Affine interval mapping.

/// Map `value` from the interval `[cur_min, cur_max]` onto
/// `[new_min, new_max]`.
///
/// Produces a non-finite result when the source interval is degenerate
/// (`cur_max == cur_min`); callers must guard that case and report it as
/// a degenerate-interval error rather than let the division through.
pub fn rescale(value: f64, cur_max: f64, cur_min: f64, new_max: f64, new_min: f64) -> f64 {
    new_min + (value - cur_min) * ((new_max - new_min) / (cur_max - cur_min))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_endpoints_and_midpoint() {
        assert_eq!(rescale(0.0, 100.0, 0.0, 10.0, 0.0), 0.0);
        assert_eq!(rescale(100.0, 100.0, 0.0, 10.0, 0.0), 10.0);
        assert_eq!(rescale(50.0, 100.0, 0.0, 10.0, 0.0), 5.0);
    }

    #[test]
    fn maps_onto_offset_interval() {
        // [0, 1] -> [-5, 5]
        assert_eq!(rescale(0.5, 1.0, 0.0, 5.0, -5.0), 0.0);
        assert_eq!(rescale(0.25, 1.0, 0.0, 5.0, -5.0), -2.5);
    }

    #[test]
    fn degenerate_source_is_non_finite() {
        assert!(!rescale(3.0, 3.0, 3.0, 10.0, 0.0).is_finite());
    }
}
