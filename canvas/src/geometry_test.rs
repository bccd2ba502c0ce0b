#![allow(clippy::float_cmp)]

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Point on the boundary of an axis-aligned `2hw`×`2hh` rect along direction `theta`.
fn rect_boundary(hw: f64, hh: f64, theta: f64) -> Point {
    let (sin, cos) = theta.sin_cos();
    let sx = if cos.abs() < EPSILON { f64::INFINITY } else { hw / cos.abs() };
    let sy = if sin.abs() < EPSILON { f64::INFINITY } else { hh / sin.abs() };
    let s = sx.min(sy);
    pt(cos * s, sin * s)
}

fn sample_angles() -> Vec<f64> {
    (0..24).map(|i| f64::from(i) * TAU / 24.0 + 0.013).collect()
}

// =============================================================
// Point
// =============================================================

#[test]
fn rotated_quarter_turn_maps_x_axis_to_y_axis() {
    let p = pt(1.0, 0.0).rotated(FRAC_PI_2);
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 1.0));
}

#[test]
fn distance_is_euclidean() {
    assert!(approx_eq(pt(0.0, 0.0).distance(pt(3.0, 4.0)), 5.0));
}

// =============================================================
// Rotated rect
// =============================================================

#[test]
fn rect_contains_center_and_rejects_far_point() {
    let c = pt(400.0, 400.0);
    assert!(point_in_rotated_rect(c, c, 200.0, 200.0, 0.0));
    assert!(!point_in_rotated_rect(pt(650.0, 400.0), c, 200.0, 200.0, 0.0));
}

#[test]
fn rect_boundary_sanity_for_all_directions() {
    let (hw, hh) = (120.0, 45.0);
    for theta in sample_angles() {
        let b = rect_boundary(hw, hh, theta);
        let inside = pt(b.x * 0.99, b.y * 0.99);
        let outside = pt(b.x * 1.01, b.y * 1.01);
        assert!(point_in_rotated_rect(inside, pt(0.0, 0.0), hw * 2.0, hh * 2.0, 0.0), "theta {theta}");
        assert!(!point_in_rotated_rect(outside, pt(0.0, 0.0), hw * 2.0, hh * 2.0, 0.0), "theta {theta}");
    }
}

#[test]
fn rect_boundary_sanity_survives_rotation() {
    let (hw, hh) = (80.0, 20.0);
    let center = pt(10.0, -5.0);
    for angle in [0.3, FRAC_PI_4, 2.0, PI] {
        for theta in sample_angles() {
            let b = rect_boundary(hw, hh, theta).rotated(angle);
            let inside = pt(center.x + b.x * 0.99, center.y + b.y * 0.99);
            let outside = pt(center.x + b.x * 1.01, center.y + b.y * 1.01);
            assert!(point_in_rotated_rect(inside, center, hw * 2.0, hh * 2.0, angle));
            assert!(!point_in_rotated_rect(outside, center, hw * 2.0, hh * 2.0, angle));
        }
    }
}

#[test]
fn rect_rotated_quarter_turn_swaps_extents() {
    let c = pt(0.0, 0.0);
    // 100 wide, 10 tall; after a quarter turn it is 10 wide, 100 tall.
    assert!(point_in_rotated_rect(pt(0.0, 45.0), c, 100.0, 10.0, FRAC_PI_2));
    assert!(!point_in_rotated_rect(pt(45.0, 0.0), c, 100.0, 10.0, FRAC_PI_2));
}

#[test]
fn rect_with_zero_extent_contains_nothing() {
    let c = pt(5.0, 5.0);
    assert!(!point_in_rotated_rect(c, c, 0.0, 10.0, 0.0));
    assert!(!point_in_rotated_rect(c, c, 10.0, 0.0, 0.0));
}

// =============================================================
// Triangle
// =============================================================

#[test]
fn triangle_contains_centroid() {
    let (a, b, c) = (pt(0.0, -50.0), pt(-50.0, 50.0), pt(50.0, 50.0));
    assert!(point_in_triangle(centroid([a, b, c]), a, b, c));
}

#[test]
fn triangle_rejects_points_beside_apex() {
    let (a, b, c) = (pt(0.0, -50.0), pt(-50.0, 50.0), pt(50.0, 50.0));
    assert!(!point_in_triangle(pt(40.0, -40.0), a, b, c));
    assert!(!point_in_triangle(pt(0.0, 60.0), a, b, c));
}

#[test]
fn triangle_orientation_does_not_matter() {
    let (a, b, c) = (pt(0.0, -50.0), pt(-50.0, 50.0), pt(50.0, 50.0));
    assert!(point_in_triangle(pt(0.0, 10.0), a, c, b));
    assert!(point_in_triangle(pt(0.0, 10.0), c, b, a));
}

#[test]
fn degenerate_triangle_contains_nothing() {
    let (a, b, c) = (pt(0.0, 0.0), pt(10.0, 10.0), pt(20.0, 20.0));
    assert!(!point_in_triangle(pt(10.0, 10.0), a, b, c));
    assert!(!point_in_triangle(a, a, a, a));
}

// =============================================================
// Ellipse
// =============================================================

#[test]
fn ellipse_boundary_sanity_for_all_directions() {
    let (hw, hh) = (90.0, 30.0);
    for theta in sample_angles() {
        let (sin, cos) = theta.sin_cos();
        let inside = pt(hw * cos * 0.99, hh * sin * 0.99);
        let outside = pt(hw * cos * 1.01, hh * sin * 1.01);
        assert!(point_in_ellipse(inside, pt(0.0, 0.0), hw * 2.0, hh * 2.0, 0.0));
        assert!(!point_in_ellipse(outside, pt(0.0, 0.0), hw * 2.0, hh * 2.0, 0.0));
    }
}

#[test]
fn ellipse_respects_rotation() {
    let c = pt(100.0, 100.0);
    assert!(point_in_ellipse(pt(100.0, 140.0), c, 100.0, 20.0, FRAC_PI_2));
    assert!(!point_in_ellipse(pt(140.0, 100.0), c, 100.0, 20.0, FRAC_PI_2));
}

#[test]
fn ellipse_with_zero_extent_never_contains() {
    for p in [pt(0.0, 0.0), pt(1.0, 1.0), pt(-300.0, 12.0)] {
        assert!(!point_in_ellipse(p, pt(0.0, 0.0), 0.0, 0.0, 0.0));
        assert!(!point_in_ellipse(p, pt(0.0, 0.0), 0.0, 40.0, 1.0));
    }
}

// =============================================================
// Rounded triangle path
// =============================================================

#[test]
fn rounded_triangle_has_three_curves_and_closes() {
    let verts = [pt(0.0, -100.0), pt(-100.0, 100.0), pt(100.0, 100.0)];
    let path = rounded_triangle_path(verts, 20.0);
    assert_eq!(path.len(), 7);
    assert!(matches!(path[0], PathCmd::MoveTo(_)));
    assert_eq!(path.iter().filter(|c| matches!(c, PathCmd::QuadTo { .. })).count(), 3);
    assert_eq!(path[6], PathCmd::Close);
}

#[test]
fn rounded_triangle_curves_pass_through_vertices_as_controls() {
    let verts = [pt(0.0, -100.0), pt(-100.0, 100.0), pt(100.0, 100.0)];
    let path = rounded_triangle_path(verts, 20.0);
    let ctrls: Vec<Point> = path
        .iter()
        .filter_map(|c| match c {
            PathCmd::QuadTo { ctrl, .. } => Some(*ctrl),
            _ => None,
        })
        .collect();
    assert_eq!(ctrls, vec![verts[2], verts[0], verts[1]]);
}

#[test]
fn rounded_triangle_tangents_sit_at_radius_from_vertex() {
    let verts = [pt(0.0, -100.0), pt(-100.0, 100.0), pt(100.0, 100.0)];
    let path = rounded_triangle_path(verts, 20.0);
    let PathCmd::MoveTo(start) = path[0] else {
        panic!("path must start with MoveTo");
    };
    assert!(approx_eq(start.distance(verts[2]), 20.0));
}

#[test]
fn rounded_triangle_radius_is_clamped_to_half_shortest_edge() {
    let verts = [pt(0.0, -10.0), pt(-10.0, 10.0), pt(10.0, 10.0)];
    let path = rounded_triangle_path(verts, 500.0);
    let PathCmd::MoveTo(start) = path[0] else {
        panic!("path must start with MoveTo");
    };
    // Shortest edge is 20, so the radius is clamped to 20 / 2 - 1 = 9.
    assert!(approx_eq(start.distance(verts[2]), 9.0));
}

#[test]
fn rounded_triangle_zero_radius_uses_sharp_corners() {
    let verts = [pt(0.0, -10.0), pt(-10.0, 10.0), pt(10.0, 10.0)];
    let path = rounded_triangle_path(verts, 0.0);
    assert_eq!(path[0], PathCmd::MoveTo(verts[2]));
}

#[test]
fn rounded_triangle_tolerates_collapsed_vertices() {
    let p = pt(3.0, 3.0);
    let path = rounded_triangle_path([p, p, p], 5.0);
    assert_eq!(path[0], PathCmd::MoveTo(p));
}

// =============================================================
// map_range
// =============================================================

#[test]
fn map_range_handles_inverted_outputs() {
    assert_eq!(map_range(0.0, 0.0, 100.0, 255.0, 10.0), 255.0);
    assert_eq!(map_range(100.0, 0.0, 100.0, 255.0, 10.0), 10.0);
    assert!(approx_eq(map_range(50.0, 0.0, 100.0, 2.0, 8.0), 5.0));
}

#[test]
fn map_range_with_empty_input_span_returns_low_output() {
    assert_eq!(map_range(7.0, 3.0, 3.0, 1.0, 9.0), 1.0);
}
