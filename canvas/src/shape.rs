//! Shape model: one placed shape and its raw/physical parameter mapping.
//!
//! Sliders speak in raw steps (0–100). Shapes store physical values (pixels,
//! radians, alpha) for the continuous parameters and keep raw steps for the
//! discrete ones (`round`, `blur`, `dispersion`, `depth`). Both the renderer
//! and the hit-tester derive silhouettes from the same [`Extents`] so what is
//! drawn is what is clickable.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::f64::consts::TAU;

use posters::{ShapeKind, ShapeRecord};

use crate::consts::{
    ALPHA_FAINT, ALPHA_OPAQUE, BLUR_MAX_PX, BORDER_MIN_OFFSET_PX, BORDER_OFFSET_FRACTION, CONTRACTION_MAX,
    CONTRACTION_MIN, DEPTH_MAX_LEVELS, INITIAL_MAX_DISTANCE, LINE_BORDER_EXPANSION, LINE_BORDER_MIN_PAD_PX,
    LINE_MIN_THICKNESS_PX, LINE_THICKNESS_FRACTION, NESTED_MIN_SIZE_PX, NESTED_MIN_THICKNESS_PX,
    NESTED_SCALE_PER_DEPTH, RAW_MAX, SCATTER_MAX_COPIES, SCATTER_MIN_COPIES, SCATTER_MIN_SCALE,
    SCATTER_RADIUS_FRACTION, SHAPE_SIZE_MAX, SHAPE_SIZE_MIN, SQUARE_ROUND_FRACTION, STRETCHED_MAX, STRETCHED_MIN,
    TRIANGLE_ROUND_FRACTION,
};
use crate::geometry::{Point, centroid, map_range, point_in_ellipse, point_in_rotated_rect, point_in_triangle};
use crate::input::{Axis, Control, ControlSnapshot, clamp_raw};

const RAW_SPAN: f64 = RAW_MAX as f64;

// =============================================================
// Raw <-> physical mapping
// =============================================================

/// Physical value for a raw slider step.
///
/// `Round`, `Blur`, `Scatter` and `Depth` are stored raw, so they map to themselves.
#[must_use]
pub fn raw_to_physical(control: Control, raw: u8) -> f64 {
    let raw = f64::from(raw.min(RAW_MAX));
    match control {
        Control::ShapeSize => map_range(raw, 0.0, RAW_SPAN, SHAPE_SIZE_MIN, SHAPE_SIZE_MAX),
        Control::Transparency => map_range(raw, 0.0, RAW_SPAN, ALPHA_OPAQUE, ALPHA_FAINT),
        Control::Distance => map_range(raw, 0.0, RAW_SPAN, INITIAL_MAX_DISTANCE, 0.0),
        Control::Rotation => map_range(raw, 0.0, RAW_SPAN, 0.0, TAU),
        Control::Contraction => map_range(raw, 0.0, RAW_SPAN, CONTRACTION_MAX, CONTRACTION_MIN),
        Control::Stretched => map_range(raw, 0.0, RAW_SPAN, STRETCHED_MIN, STRETCHED_MAX),
        Control::Round | Control::Blur | Control::Scatter | Control::Depth => raw,
    }
}

/// Raw slider step for a physical value, rounded and clamped to `[0, 100]`.
#[must_use]
pub fn physical_to_raw(control: Control, value: f64) -> u8 {
    let raw = match control {
        Control::ShapeSize => map_range(value, SHAPE_SIZE_MIN, SHAPE_SIZE_MAX, 0.0, RAW_SPAN),
        Control::Transparency => map_range(value, ALPHA_OPAQUE, ALPHA_FAINT, 0.0, RAW_SPAN),
        Control::Distance => map_range(value, INITIAL_MAX_DISTANCE, 0.0, 0.0, RAW_SPAN),
        Control::Rotation => map_range(value, 0.0, TAU, 0.0, RAW_SPAN),
        Control::Contraction => map_range(value, CONTRACTION_MAX, CONTRACTION_MIN, 0.0, RAW_SPAN),
        Control::Stretched => map_range(value, STRETCHED_MIN, STRETCHED_MAX, 0.0, RAW_SPAN),
        Control::Round | Control::Blur | Control::Scatter | Control::Depth => value,
    };
    clamp_raw(raw)
}

// =============================================================
// ShapeInstance
// =============================================================

/// A shape placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeInstance {
    pub kind: ShapeKind,
    /// Base edge length in px, `[30, 400]`.
    pub shape_size: f64,
    /// Fill alpha on the 0–255 scale, `[10, 255]`.
    pub transparency: f64,
    /// Radians, `[0, 2π]`.
    pub rotation: f64,
    /// Cross-axis scale, `[0.2, 1]`.
    pub contraction: f64,
    /// Main-axis scale, `[1, 5]`.
    pub stretched: f64,
    pub round: u8,
    pub blur: u8,
    pub dispersion: u8,
    pub depth: u8,
    /// Canvas position, written by layout.
    pub x: f64,
    pub y: f64,
}

impl ShapeInstance {
    /// New shape of `kind` snapshotting every slider in `controls`.
    #[must_use]
    pub fn from_controls(kind: ShapeKind, controls: &ControlSnapshot) -> Self {
        let physical = |control| raw_to_physical(control, controls.get(control));
        Self {
            kind,
            shape_size: physical(Control::ShapeSize),
            transparency: physical(Control::Transparency),
            rotation: physical(Control::Rotation),
            contraction: physical(Control::Contraction),
            stretched: physical(Control::Stretched),
            round: controls.get(Control::Round),
            blur: controls.get(Control::Blur),
            dispersion: controls.get(Control::Scatter),
            depth: controls.get(Control::Depth),
            x: 0.0,
            y: 0.0,
        }
    }

    /// Write one slider into the matching field. `Distance` is not a shape
    /// parameter and is ignored.
    pub fn apply_raw(&mut self, control: Control, raw: u8) {
        let raw = raw.min(RAW_MAX);
        let physical = raw_to_physical(control, raw);
        match control {
            Control::ShapeSize => self.shape_size = physical,
            Control::Transparency => self.transparency = physical,
            Control::Rotation => self.rotation = physical,
            Control::Contraction => self.contraction = physical,
            Control::Stretched => self.stretched = physical,
            Control::Round => self.round = raw,
            Control::Blur => self.blur = raw,
            Control::Scatter => self.dispersion = raw,
            Control::Depth => self.depth = raw,
            Control::Distance => {}
        }
    }

    /// Raw slider step reflecting this shape's value for `control`.
    ///
    /// Returns `None` for `Distance`.
    #[must_use]
    pub fn raw(&self, control: Control) -> Option<u8> {
        let raw = match control {
            Control::ShapeSize => physical_to_raw(control, self.shape_size),
            Control::Transparency => physical_to_raw(control, self.transparency),
            Control::Rotation => physical_to_raw(control, self.rotation),
            Control::Contraction => physical_to_raw(control, self.contraction),
            Control::Stretched => physical_to_raw(control, self.stretched),
            Control::Round => self.round,
            Control::Blur => self.blur,
            Control::Scatter => self.dispersion,
            Control::Depth => self.depth,
            Control::Distance => return None,
        };
        Some(raw)
    }

    /// Copy this shape's parameters into every shape slider of `controls`.
    pub fn write_controls(&self, controls: &mut ControlSnapshot) {
        for control in Control::ALL {
            if let Some(raw) = self.raw(control) {
                controls.set_raw(control, raw);
            }
        }
    }

    /// Stored form of this shape.
    #[must_use]
    pub fn to_record(&self, selected: bool) -> ShapeRecord {
        ShapeRecord {
            kind: self.kind,
            shape_size: self.shape_size,
            transparency: self.transparency,
            rotation: self.rotation,
            contraction: self.contraction,
            stretched: self.stretched,
            round: self.round,
            blur: self.blur,
            dispersion: self.dispersion,
            depth: self.depth,
            x: self.x,
            y: self.y,
            selected,
        }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Number of nested levels below the outermost one, `[0, 10]`.
    #[must_use]
    pub fn max_depth(&self) -> u32 {
        u32::from(self.depth.min(RAW_MAX)) * DEPTH_MAX_LEVELS / u32::from(RAW_MAX)
    }

    /// Blur radius in px, `[0, 10]`.
    #[must_use]
    pub fn blur_px(&self) -> f64 {
        map_range(f64::from(self.blur.min(RAW_MAX)), 0.0, RAW_SPAN, 0.0, BLUR_MAX_PX)
    }

    /// Outermost extents at `scale` (1 for an undispersed shape).
    #[must_use]
    pub fn extents(&self, scale: f64) -> Extents {
        let stretched = self.stretched * scale;
        let thickness = LINE_MIN_THICKNESS_PX.max(self.shape_size * LINE_THICKNESS_FRACTION) * stretched;
        Extents {
            size: self.shape_size * scale,
            stretched,
            contraction: self.contraction * scale,
            thickness: thickness.max(NESTED_MIN_THICKNESS_PX),
        }
    }

    /// Where copies of this shape are drawn, relative to its position and
    /// before rotation. A single placement at the origin when not dispersed.
    ///
    /// `distance` is the sticky layout distance; it bounds the ring radius.
    #[must_use]
    pub fn placements(&self, distance: f64) -> Vec<Placement> {
        if self.dispersion == 0 {
            return vec![Placement { offset: Point::default(), scale: 1.0 }];
        }
        let scatter = Scatter::new(self.dispersion, distance);
        (0..scatter.copies)
            .map(|j| Placement { offset: scatter.offset(j), scale: scatter.scale })
            .collect()
    }

    /// Whether `p` (canvas space) lands on any copy of this shape.
    ///
    /// Uses the unrounded depth-0 silhouette of each copy.
    #[must_use]
    pub fn contains(&self, p: Point, axis: Axis, distance: f64) -> bool {
        let origin = self.position();
        self.placements(distance).into_iter().any(|placement| {
            let offset = placement.offset.rotated(self.rotation);
            let center = origin.offset(offset.x, offset.y);
            self.extents(placement.scale)
                .silhouette(self.kind, self.round, axis)
                .contains(p, center, self.rotation)
        })
    }
}

// =============================================================
// Dispersion
// =============================================================

/// The ring of copies drawn for a dispersed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Copies on the ring, `[2, 8]`.
    pub copies: u32,
    /// Ring radius in px.
    pub radius: f64,
    /// Uniform scale applied to size, stretch and contraction of each copy.
    pub scale: f64,
}

impl Scatter {
    /// Ring parameters for a raw Scatter value.
    #[must_use]
    pub fn new(dispersion: u8, distance: f64) -> Self {
        let raw = dispersion.min(RAW_MAX);
        let span = SCATTER_MAX_COPIES - SCATTER_MIN_COPIES;
        let raw_f = f64::from(raw);
        Self {
            copies: SCATTER_MIN_COPIES + u32::from(raw) * span / u32::from(RAW_MAX),
            radius: map_range(raw_f, 0.0, RAW_SPAN, 0.0, distance * SCATTER_RADIUS_FRACTION),
            scale: map_range(raw_f, 0.0, RAW_SPAN, 1.0, SCATTER_MIN_SCALE),
        }
    }

    /// Unrotated offset of copy `j` from the shape's center.
    #[must_use]
    pub fn offset(&self, j: u32) -> Point {
        let angle = f64::from(j) / f64::from(self.copies) * TAU;
        Point::new(self.radius * angle.cos(), self.radius * angle.sin())
    }
}

/// One drawn copy of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Offset from the shape's center in its rotated frame.
    pub offset: Point,
    pub scale: f64,
}

// =============================================================
// Extents and silhouettes
// =============================================================

/// Size parameters of one drawn level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub size: f64,
    pub stretched: f64,
    pub contraction: f64,
    /// Line thickness (stretch already applied). Unused by other kinds.
    pub thickness: f64,
}

impl Extents {
    /// These extents shrunk for nesting level `depth`.
    #[must_use]
    pub fn nested(self, depth: u32) -> Self {
        let factor = NESTED_SCALE_PER_DEPTH.powi(i32::try_from(depth).unwrap_or(i32::MAX));
        Self {
            size: (self.size * factor).max(NESTED_MIN_SIZE_PX),
            thickness: (self.thickness * factor).max(NESTED_MIN_THICKNESS_PX),
            ..self
        }
    }

    /// Length of a line along its long axis.
    #[must_use]
    pub fn line_length(self) -> f64 {
        self.size * self.contraction
    }

    /// The drawn outline of `kind` at these extents, centered at the origin.
    #[must_use]
    pub fn silhouette(self, kind: ShapeKind, round: u8, axis: Axis) -> Silhouette {
        let round = f64::from(round.min(RAW_MAX));
        match kind {
            ShapeKind::Line => {
                let (width, height) = line_box(axis, self.thickness, self.line_length());
                Silhouette::Rect { width, height, radius: map_range(round, 0.0, RAW_SPAN, 0.0, self.thickness / 2.0) }
            }
            ShapeKind::Square => Silhouette::Rect {
                width: self.size * self.stretched,
                height: self.size * self.contraction,
                radius: map_range(round, 0.0, RAW_SPAN, 0.0, self.size * SQUARE_ROUND_FRACTION),
            },
            ShapeKind::Circle => Silhouette::Ellipse {
                width: self.size * self.stretched,
                height: self.size * self.contraction,
            },
            ShapeKind::Triangle => Silhouette::Triangle {
                verts: self.triangle_verts(),
                radius: map_range(round, 0.0, RAW_SPAN, 0.0, self.size * TRIANGLE_ROUND_FRACTION),
            },
        }
    }

    /// The selection border drawn around the depth-0 silhouette.
    #[must_use]
    pub fn border(self, kind: ShapeKind, round: u8, axis: Axis) -> Silhouette {
        let offset = BORDER_MIN_OFFSET_PX.max(self.size * BORDER_OFFSET_FRACTION);
        let round_f = f64::from(round.min(RAW_MAX));
        match self.silhouette(kind, round, axis) {
            Silhouette::Rect { .. } if kind == ShapeKind::Line => {
                let thickness = expand_line(self.thickness);
                let length = expand_line(self.line_length());
                let (width, height) = line_box(axis, thickness, length);
                Silhouette::Rect { width, height, radius: map_range(round_f, 0.0, RAW_SPAN, 0.0, thickness / 2.0) }
            }
            Silhouette::Rect { width, height, radius } => {
                Silhouette::Rect { width: width + offset, height: height + offset, radius }
            }
            Silhouette::Ellipse { width, height } => {
                Silhouette::Ellipse { width: width + offset, height: height + offset }
            }
            Silhouette::Triangle { verts, radius } => {
                let c = centroid(verts);
                let grow = 1.0 + offset / self.size;
                let scaled = verts.map(|v| Point::new(c.x + (v.x - c.x) * grow, c.y + (v.y - c.y) * grow));
                Silhouette::Triangle { verts: scaled, radius }
            }
        }
    }

    /// Apex-up isosceles triangle, x scaled by stretch and y by contraction.
    fn triangle_verts(self) -> [Point; 3] {
        let half = self.size / 2.0;
        [Point::new(0.0, -half), Point::new(-half, half), Point::new(half, half)]
            .map(|v| Point::new(v.x * self.stretched, v.y * self.contraction))
    }
}

/// `(width, height)` of a line box. A horizontal layout stands lines upright.
fn line_box(axis: Axis, thickness: f64, length: f64) -> (f64, f64) {
    match axis {
        Axis::Horizontal => (thickness, length),
        Axis::Vertical => (length, thickness),
    }
}

/// Line border dimension: ×1.1, and at least 4 px wider than the line.
fn expand_line(extent: f64) -> f64 {
    (extent * LINE_BORDER_EXPANSION).max(extent + LINE_BORDER_MIN_PAD_PX)
}

/// A shape outline in its own (unrotated, origin-centered) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Silhouette {
    Rect { width: f64, height: f64, radius: f64 },
    Ellipse { width: f64, height: f64 },
    /// Corner rounding is visual only; containment uses the sharp triangle.
    Triangle { verts: [Point; 3], radius: f64 },
}

impl Silhouette {
    /// Whether `p` lies inside this outline placed at `center` and rotated by `angle`.
    #[must_use]
    pub fn contains(&self, p: Point, center: Point, angle: f64) -> bool {
        match *self {
            Self::Rect { width, height, .. } => point_in_rotated_rect(p, center, width, height, angle),
            Self::Ellipse { width, height } => point_in_ellipse(p, center, width, height, angle),
            Self::Triangle { verts, .. } => {
                let [a, b, c] = verts.map(|v| {
                    let r = v.rotated(angle);
                    center.offset(r.x, r.y)
                });
                point_in_triangle(p, a, b, c)
            }
        }
    }
}
