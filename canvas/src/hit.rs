//! Hit-testing: which shape (if any) a canvas click lands on.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::geometry::Point;
use crate::input::Axis;
use crate::shape::ShapeInstance;

/// Index of the first shape in list order whose silhouette contains `click`.
///
/// Dispersed shapes are tested copy by copy; a hit on any copy counts as a
/// hit on the shape. `distance` is the sticky layout distance, which sets the
/// ring radius of dispersed copies.
#[must_use]
pub fn hit_test(click: Point, shapes: &[ShapeInstance], axis: Axis, distance: f64) -> Option<usize> {
    shapes.iter().position(|shape| shape.contains(click, axis, distance))
}
