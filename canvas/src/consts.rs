//! Shared numeric constants for the canvas crate.

use crate::input::Rgb;

// ── Composition ─────────────────────────────────────────────────

/// Maximum number of shapes on the canvas at once.
pub const MAX_SHAPES: usize = 3;

/// Physical distance (px) at raw Distance 0; also the initial sticky distance.
pub const INITIAL_MAX_DISTANCE: f64 = 300.0;

/// Default canvas edge length in pixels.
pub const DEFAULT_CANVAS_PX: u32 = 800;

// ── Parameter ranges ────────────────────────────────────────────

/// Upper bound of every raw slider value.
pub const RAW_MAX: u8 = 100;

pub const SHAPE_SIZE_MIN: f64 = 30.0;
pub const SHAPE_SIZE_MAX: f64 = 400.0;

/// Alpha at raw Transparency 0 (opaque).
pub const ALPHA_OPAQUE: f64 = 255.0;
/// Alpha at raw Transparency 100.
pub const ALPHA_FAINT: f64 = 10.0;

pub const CONTRACTION_MIN: f64 = 0.2;
pub const CONTRACTION_MAX: f64 = 1.0;

pub const STRETCHED_MIN: f64 = 1.0;
pub const STRETCHED_MAX: f64 = 5.0;

/// Blur radius in px at raw Blur 100.
pub const BLUR_MAX_PX: f64 = 10.0;

/// Nesting count at raw Depth 100.
pub const DEPTH_MAX_LEVELS: u32 = 10;

// ── Nesting ─────────────────────────────────────────────────────

/// Per-level shrink for nested copies (size, line length and line thickness).
pub const NESTED_SCALE_PER_DEPTH: f64 = 0.8;

/// Nested copies never shrink below this size / line length.
pub const NESTED_MIN_SIZE_PX: f64 = 10.0;

/// Nested line thickness never drops below this.
pub const NESTED_MIN_THICKNESS_PX: f64 = 1.0;

/// Stroke width of the outline stack when depth > 0.
pub const NESTED_STROKE_PX: f64 = 5.0;

// ── Dispersion ──────────────────────────────────────────────────

pub const SCATTER_MIN_COPIES: u32 = 2;
pub const SCATTER_MAX_COPIES: u32 = 8;

/// Copy scale at raw Scatter 100 (1.0 at raw 0).
pub const SCATTER_MIN_SCALE: f64 = 0.7;

/// Ring radius at raw Scatter 100, as a fraction of the sticky distance.
pub const SCATTER_RADIUS_FRACTION: f64 = 0.5;

// ── Silhouettes ─────────────────────────────────────────────────

/// Line thickness floor before stretching.
pub const LINE_MIN_THICKNESS_PX: f64 = 20.0;

/// Line thickness as a fraction of shape size before stretching.
pub const LINE_THICKNESS_FRACTION: f64 = 0.05;

/// Max corner radius for squares as a fraction of size.
pub const SQUARE_ROUND_FRACTION: f64 = 0.45;

/// Max corner radius for triangles as a fraction of size.
pub const TRIANGLE_ROUND_FRACTION: f64 = 0.4;

/// Rounded-triangle radius stays this far below half the shortest edge.
pub const ROUNDED_TRIANGLE_EPSILON: f64 = 1.0;

// ── Selection border ────────────────────────────────────────────

pub const BORDER_STROKE_PX: f64 = 2.0;
pub const BORDER_MIN_OFFSET_PX: f64 = 4.0;
pub const BORDER_OFFSET_FRACTION: f64 = 0.05;
pub const LINE_BORDER_EXPANSION: f64 = 1.1;
pub const LINE_BORDER_MIN_PAD_PX: f64 = 4.0;
pub const BORDER_COLOR: Rgb = Rgb { r: 0, g: 0, b: 0 };

// ── Colors ──────────────────────────────────────────────────────

/// Color used before a swatch is picked.
pub const DEFAULT_COLOR: &str = "#000000";

/// Canvas background.
pub const BACKGROUND_COLOR: &str = "#FFFFFF";

/// The 21-swatch picker palette, row by row.
pub const PALETTE: [&str; 21] = [
    "#5D9B2F", "#79B557", "#A3CE84", "#B6D7C8", "#A7CAE6", "#87BDE9", "#2D4FA1", //
    "#F9E680", "#F6D16E", "#F6BC53", "#F5A543", "#D88A25", "#9B6714", "#6D4B04", //
    "#2C0D0D", "#590F0F", "#861212", "#B61C1C", "#D63F3F", "#C6707C", "#E7B5AD",
];
