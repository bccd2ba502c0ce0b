//! Rendering: builds the frame's display list.
//!
//! This module is pure. It turns the active shapes into an ordered list of
//! draw commands per shape, which [`crate::surface`] replays onto Canvas2D.
//! Keeping the recursion here (instead of against a live context) means the
//! nesting, dispersion and border rules are testable without a browser.
//!
//! Each shape gets its own [`Layer`]. The backend clears the full-size buffer
//! before every layer, so a layer's blur applies to that shape alone.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{BORDER_COLOR, BORDER_STROKE_PX, NESTED_STROKE_PX};
use crate::geometry::{PathCmd, rounded_triangle_path};
use crate::input::{Axis, Rgb, Rgba};
use crate::shape::{Extents, ShapeInstance, Silhouette};

/// A closed outline in the current (translated, rotated) frame, centered at the origin.
#[derive(Debug, Clone, PartialEq)]
pub enum Outline {
    RoundedRect { width: f64, height: f64, radius: f64 },
    Ellipse { width: f64, height: f64 },
    Path(Vec<PathCmd>),
}

impl From<Silhouette> for Outline {
    fn from(silhouette: Silhouette) -> Self {
        match silhouette {
            Silhouette::Rect { width, height, radius } => Self::RoundedRect { width, height, radius },
            Silhouette::Ellipse { width, height } => Self::Ellipse { width, height },
            Silhouette::Triangle { verts, radius } => Self::Path(rounded_triangle_path(verts, radius)),
        }
    }
}

/// One display-list instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Save,
    Restore,
    Translate { dx: f64, dy: f64 },
    /// Radians, clockwise on screen.
    Rotate(f64),
    Fill { outline: Outline, color: Rgba },
    Stroke { outline: Outline, color: Rgba, width: f64 },
}

impl DrawCmd {
    /// Whether this command puts pixels on the buffer.
    #[must_use]
    pub fn is_paint(&self) -> bool {
        matches!(self, Self::Fill { .. } | Self::Stroke { .. })
    }
}

/// Everything drawn for one shape, composited with a single blur.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    pub commands: Vec<DrawCmd>,
    /// CSS blur radius in px; 0 means no filter.
    pub blur_px: f64,
}

/// A full frame: canvas size plus one layer per shape in list order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub layers: Vec<Layer>,
}

/// Read-only view of the state a frame is built from.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub shapes: &'a [ShapeInstance],
    pub selected: Option<usize>,
    pub axis: Axis,
    /// Sticky layout distance; sets the dispersion ring radius.
    pub distance: f64,
    /// Current palette color.
    pub color: Rgb,
    pub width: f64,
    pub height: f64,
}

/// Build the display list for `scene`.
#[must_use]
pub fn build_frame(scene: &Scene<'_>) -> Frame {
    let layers = scene
        .shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| shape_layer(shape, scene.selected == Some(i), scene.axis, scene.distance, scene.color))
        .collect();
    Frame { width: scene.width, height: scene.height, layers }
}

/// The layer for one shape: its nested stack at every placement, plus the
/// selection border when `selected`.
#[must_use]
pub fn shape_layer(shape: &ShapeInstance, selected: bool, axis: Axis, distance: f64, color: Rgb) -> Layer {
    let paint = color.with_alpha(shape.transparency);
    let max_depth = shape.max_depth();
    let ring = shape.dispersion > 0;

    let mut commands = vec![
        DrawCmd::Save,
        DrawCmd::Translate { dx: shape.x, dy: shape.y },
        DrawCmd::Rotate(shape.rotation),
    ];
    for placement in shape.placements(distance) {
        let extents = shape.extents(placement.scale);
        if ring {
            commands.push(DrawCmd::Save);
            commands.push(DrawCmd::Translate { dx: placement.offset.x, dy: placement.offset.y });
        }
        push_nested(&mut commands, shape, extents, 0, max_depth, axis, paint);
        if selected {
            commands.push(DrawCmd::Stroke {
                outline: extents.border(shape.kind, shape.round, axis).into(),
                color: BORDER_COLOR.with_alpha(255.0),
                width: BORDER_STROKE_PX,
            });
        }
        if ring {
            commands.push(DrawCmd::Restore);
        }
    }
    commands.push(DrawCmd::Restore);

    Layer { commands, blur_px: shape.blur_px() }
}

/// Draw level `depth` and recurse inward until `max_depth`.
///
/// With any nesting every level is an outline; a lone level is filled.
fn push_nested(
    out: &mut Vec<DrawCmd>,
    shape: &ShapeInstance,
    base: Extents,
    depth: u32,
    max_depth: u32,
    axis: Axis,
    paint: Rgba,
) {
    if depth > max_depth {
        return;
    }
    let outline: Outline = base.nested(depth).silhouette(shape.kind, shape.round, axis).into();
    if max_depth > 0 {
        out.push(DrawCmd::Stroke { outline, color: paint, width: NESTED_STROKE_PX });
    } else {
        out.push(DrawCmd::Fill { outline, color: paint });
    }
    if depth < max_depth {
        push_nested(out, shape, base, depth + 1, max_depth, axis, paint);
    }
}
