//! Geometry kernel: point containment for rotated silhouettes and path helpers.
//!
//! Everything here is stateless. Angles are radians, clockwise on screen
//! (y grows downward), matching the Canvas2D `rotate` convention.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::consts::ROUNDED_TRIANGLE_EPSILON;

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rotate around the origin by `angle` radians.
    #[must_use]
    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One segment of a path in local (pre-transform) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCmd {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bézier through `ctrl` ending at `to`.
    QuadTo { ctrl: Point, to: Point },
    Close,
}

/// Move `p` into the local frame of a shape centered at `center` rotated by `angle`.
fn to_local(p: Point, center: Point, angle: f64) -> Point {
    Point::new(p.x - center.x, p.y - center.y).rotated(-angle)
}

/// Whether `p` lies inside a `w`×`h` rectangle centered at `center` and rotated by `angle`.
///
/// Edges count as inside. Zero-size rectangles contain nothing.
#[must_use]
pub fn point_in_rotated_rect(p: Point, center: Point, w: f64, h: f64, angle: f64) -> bool {
    if w <= 0.0 || h <= 0.0 {
        return false;
    }
    let local = to_local(p, center, angle);
    local.x.abs() <= w / 2.0 && local.y.abs() <= h / 2.0
}

/// Barycentric containment test for the triangle `a`, `b`, `c`.
///
/// Degenerate (zero-area) triangles contain nothing.
#[must_use]
pub fn point_in_triangle(p: Point, a: Point, b: Point, c: Point) -> bool {
    let area2 = -b.y * c.x + a.y * (c.x - b.x) + a.x * (b.y - c.y) + b.x * c.y;
    if area2 == 0.0 || !area2.is_finite() {
        return false;
    }
    let s = (a.y * c.x - a.x * c.y + (c.y - a.y) * p.x + (a.x - c.x) * p.y) / area2;
    let t = (a.x * b.y - a.y * b.x + (a.y - b.y) * p.x + (b.x - a.x) * p.y) / area2;
    s >= 0.0 && t >= 0.0 && s + t <= 1.0
}

/// Whether `p` lies inside a `w`×`h` ellipse centered at `center` and rotated by `angle`.
///
/// Returns false when either half-extent is zero.
#[must_use]
pub fn point_in_ellipse(p: Point, center: Point, w: f64, h: f64, angle: f64) -> bool {
    let half_w = w / 2.0;
    let half_h = h / 2.0;
    if half_w == 0.0 || half_h == 0.0 {
        return false;
    }
    let local = to_local(p, center, angle);
    (local.x * local.x) / (half_w * half_w) + (local.y * local.y) / (half_h * half_h) <= 1.0
}

/// Closed path for triangle `[a, b, c]` with each corner replaced by a quadratic curve.
///
/// `radius` is the tangent distance from each vertex; it is clamped to
/// `[0, shortest_edge / 2 - ε]`. Corners whose adjacent edges have zero length
/// fall back to the sharp vertex.
#[must_use]
pub fn rounded_triangle_path(verts: [Point; 3], radius: f64) -> Vec<PathCmd> {
    let [a, b, c] = verts;
    let shortest = a.distance(b).min(b.distance(c)).min(c.distance(a));
    let limit = shortest / 2.0 - ROUNDED_TRIANGLE_EPSILON;
    let r = radius.min(limit).max(0.0);

    // Corner order follows the outline: c, a, b.
    let (c_in, c_out) = corner_tangents(c, b, a, r);
    let (a_in, a_out) = corner_tangents(a, c, b, r);
    let (b_in, b_out) = corner_tangents(b, a, c, r);

    vec![
        PathCmd::MoveTo(c_in),
        PathCmd::QuadTo { ctrl: c, to: c_out },
        PathCmd::LineTo(a_in),
        PathCmd::QuadTo { ctrl: a, to: a_out },
        PathCmd::LineTo(b_in),
        PathCmd::QuadTo { ctrl: b, to: b_out },
        PathCmd::Close,
    ]
}

/// Tangent points on the edges `vertex→from` and `vertex→to` at distance `r`.
fn corner_tangents(vertex: Point, from: Point, to: Point, r: f64) -> (Point, Point) {
    (toward(vertex, from, r), toward(vertex, to, r))
}

/// `origin` moved `dist` toward `target`; `origin` itself when they coincide.
fn toward(origin: Point, target: Point, dist: f64) -> Point {
    let len = origin.distance(target);
    if len == 0.0 {
        return origin;
    }
    let k = dist / len;
    origin.offset((target.x - origin.x) * k, (target.y - origin.y) * k)
}

/// Centroid of three points.
#[must_use]
pub fn centroid(verts: [Point; 3]) -> Point {
    let [a, b, c] = verts;
    Point::new((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0)
}

/// Linear re-map of `value` from `[in_lo, in_hi]` to `[out_lo, out_hi]` (no clamping).
#[must_use]
pub fn map_range(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    if in_hi == in_lo {
        return out_lo;
    }
    out_lo + (value - in_lo) * (out_hi - out_lo) / (in_hi - in_lo)
}
