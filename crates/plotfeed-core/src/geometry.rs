//! Geometric data model for the path-to-step pipeline.
//!
//! A figure is an [`Image`]: an ordered collection of named [`PlotPath`]s,
//! each a single continuous pen stroke. The planner derives one [`Bounds`]
//! per image, maps every path into a [`DeviceBounds`] rectangle, and emits
//! [`CompiledPath`]s of quantized [`Step`]s.

use serde::{Deserialize, Serialize};

/// A coordinate axis of the plotting mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
        }
    }
}

/// A 2D point in an arbitrary input coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One continuous pen stroke: an ordered sequence of points.
///
/// Order is significant; it defines the draw order along the stroke.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotPath {
    points: Vec<Point>,
}

impl PlotPath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a path from raw coordinate pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        Self {
            points: pairs.iter().map(|&(x, y)| Point::new(x, y)).collect(),
        }
    }

    /// Append a point to the stroke.
    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Number of points in the stroke.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the points in draw order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// The points as a slice.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl From<Vec<Point>> for PlotPath {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

/// A named collection of paths forming one drawable figure.
///
/// Insertion order is preserved; it is the processing and transmission
/// order, which keeps logs and dump artifacts reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Image {
    paths: Vec<(String, PlotPath)>,
}

impl Image {
    /// Create an empty image.
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Add a named path. Later insertions with the same name are kept as
    /// separate strokes.
    pub fn insert(&mut self, name: impl Into<String>, path: PlotPath) {
        self.paths.push((name.into(), path));
    }

    /// Number of paths in the image.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether the image contains no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterate over (name, path) pairs in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, (String, PlotPath)> {
        self.paths.iter()
    }

    /// Total number of points across all paths.
    pub fn total_points(&self) -> usize {
        self.paths.iter().map(|(_, p)| p.len()).sum()
    }
}

/// The smallest axis-aligned rectangle containing every point of an image.
///
/// Computed once per image and shared read-only across all of its paths
/// during scaling. Per-path bounds would distort the relative proportions
/// of disjoint strokes within the same figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub max_x: f64,
    pub max_y: f64,
    pub min_x: f64,
    pub min_y: f64,
}

impl Bounds {
    /// Width of the source extent.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the source extent.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether the given point lies within the rectangle.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Whether an axis has zero extent, which makes affine rescaling
    /// impossible on that axis.
    pub fn is_degenerate(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.max_x == self.min_x,
            Axis::Y => self.max_y == self.min_y,
        }
    }
}

/// The target step-range rectangle of the device, per axis, plus the fixed
/// pen (Z) range.
///
/// Starts from the global device constant; narrowed only transiently while
/// the adaptive scaler fits a path, never mutated outside that call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceBounds {
    pub max_x: f64,
    pub min_x: f64,
    pub max_y: f64,
    pub min_y: f64,
    pub max_z: f64,
    pub min_z: f64,
}

impl DeviceBounds {
    /// Whether an (x, y) position lies within the step rectangle.
    pub fn contains_xy(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// A quantized, transmit-ready coordinate pair.
///
/// Coordinates are rounded to the device's fractional step grid. The pen
/// (Z) state is implicit: a step's position within a [`CompiledPath`]
/// determines whether it is sent pen-up or pen-down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub x: f64,
    pub y: f64,
}

impl Step {
    /// Create a step from already-quantized coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The compiled form of one path, split for the transmitter.
///
/// The transmitter emits: a pen-up traversal to `first`, a pen-down command
/// at `first`, one motion command per `interior` step, a motion command to
/// `last` at pen-down, then a pen-up command at `last`. The split is part
/// of the planner's output contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledPath {
    pub first: Step,
    pub interior: Vec<Step>,
    pub last: Step,
}

impl CompiledPath {
    /// Total number of steps including both endpoints.
    pub fn total_steps(&self) -> usize {
        self.interior.len() + 2
    }

    /// All steps in transmission order.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = Vec::with_capacity(self.total_steps());
        steps.push(self.first);
        steps.extend_from_slice(&self.interior);
        steps.push(self.last);
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_contains_edges() {
        let bounds = Bounds {
            max_x: 10.0,
            max_y: 5.0,
            min_x: 0.0,
            min_y: -5.0,
        };
        assert!(bounds.contains(&Point::new(0.0, -5.0)));
        assert!(bounds.contains(&Point::new(10.0, 5.0)));
        assert!(!bounds.contains(&Point::new(10.1, 0.0)));
        assert!(!bounds.contains(&Point::new(5.0, -5.1)));
    }

    #[test]
    fn degenerate_axis_detection() {
        let bounds = Bounds {
            max_x: 3.0,
            max_y: 7.0,
            min_x: 3.0,
            min_y: 0.0,
        };
        assert!(bounds.is_degenerate(Axis::X));
        assert!(!bounds.is_degenerate(Axis::Y));
    }

    #[test]
    fn image_preserves_insertion_order() {
        let mut image = Image::new();
        image.insert("b", PlotPath::from_pairs(&[(0.0, 0.0)]));
        image.insert("a", PlotPath::from_pairs(&[(1.0, 1.0)]));
        let names: Vec<&str> = image.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
    }

    #[test]
    fn compiled_path_step_order() {
        let compiled = CompiledPath {
            first: Step::new(0.0, 0.0),
            interior: vec![Step::new(1.0, 1.0)],
            last: Step::new(2.0, 2.0),
        };
        assert_eq!(compiled.total_steps(), 3);
        assert_eq!(
            compiled.steps(),
            vec![
                Step::new(0.0, 0.0),
                Step::new(1.0, 1.0),
                Step::new(2.0, 2.0)
            ]
        );
    }
}
