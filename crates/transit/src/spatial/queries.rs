//! Distance helpers in map units.

use geo::{EuclideanDistance, Point};

/// Straight-line distance between two map positions
pub fn map_distance(p1: Point, p2: Point) -> f64 {
    p1.euclidean_distance(&p2)
}

/// Point halfway between two map positions
pub fn midpoint(p1: Point, p2: Point) -> Point {
    Point::new((p1.x() + p2.x()) / 2.0, (p1.y() + p2.y()) / 2.0)
}
