//! Canvas2D backend: replays a [`Frame`] onto the visible canvas.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It owns the visible canvas and an offscreen buffer canvas of the same size.
//! Each layer is drawn into the cleared buffer, then composited onto the
//! visible canvas through a CSS `blur()` filter.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::BACKGROUND_COLOR;
use crate::geometry::PathCmd;
use crate::render::{DrawCmd, Frame, Outline};

const NO_FILTER: &str = "none";

/// The visible canvas plus its offscreen buffer.
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    buffer: HtmlCanvasElement,
    buffer_ctx: CanvasRenderingContext2d,
}

impl Surface {
    /// Wrap `canvas` and allocate a matching buffer canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is no document or a 2D context is unavailable.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let buffer: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        buffer.set_width(canvas.width());
        buffer.set_height(canvas.height());
        let ctx = context_2d(&canvas)?;
        let buffer_ctx = context_2d(&buffer)?;
        Ok(Self { canvas, ctx, buffer, buffer_ctx })
    }

    /// Reallocate both canvases at `width`×`height`.
    ///
    /// Must run before the next [`Surface::present`] so no frame is drawn
    /// into a buffer of the old size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.buffer.set_width(width);
        self.buffer.set_height(height);
    }

    /// Draw `frame` onto the visible canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any `Canvas2D` call fails.
    pub fn present(&self, frame: &Frame) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.set_filter(NO_FILTER);
        ctx.set_fill_style_str(BACKGROUND_COLOR);
        ctx.fill_rect(0.0, 0.0, frame.width, frame.height);

        for layer in &frame.layers {
            self.buffer_ctx.clear_rect(0.0, 0.0, frame.width, frame.height);
            replay(&self.buffer_ctx, &layer.commands)?;

            if layer.blur_px > 0.0 {
                ctx.set_filter(&format!("blur({}px)", layer.blur_px));
            } else {
                ctx.set_filter(NO_FILTER);
            }
            ctx.draw_image_with_html_canvas_element(&self.buffer, 0.0, 0.0)?;
        }

        ctx.set_filter(NO_FILTER);
        Ok(())
    }

    /// The visible canvas encoded as a `data:image/png;base64,...` URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot be encoded (e.g. it is tainted).
    pub fn to_png_data_url(&self) -> Result<String, JsValue> {
        self.canvas.to_data_url_with_type("image/png")
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

// =============================================================
// Display-list replay
// =============================================================

fn replay(ctx: &CanvasRenderingContext2d, commands: &[DrawCmd]) -> Result<(), JsValue> {
    for cmd in commands {
        match cmd {
            DrawCmd::Save => ctx.save(),
            DrawCmd::Restore => ctx.restore(),
            DrawCmd::Translate { dx, dy } => ctx.translate(*dx, *dy)?,
            DrawCmd::Rotate(angle) => ctx.rotate(*angle)?,
            DrawCmd::Fill { outline, color } => {
                if trace(ctx, outline)? {
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill();
                }
            }
            DrawCmd::Stroke { outline, color, width } => {
                if trace(ctx, outline)? {
                    ctx.set_stroke_style_str(&color.css());
                    ctx.set_line_width(*width);
                    ctx.stroke();
                }
            }
        }
    }
    Ok(())
}

/// Trace `outline` as the current path. Returns `false` for empty outlines.
fn trace(ctx: &CanvasRenderingContext2d, outline: &Outline) -> Result<bool, JsValue> {
    ctx.begin_path();
    match outline {
        Outline::RoundedRect { width, height, radius } => {
            if *width <= 0.0 || *height <= 0.0 {
                return Ok(false);
            }
            trace_rounded_rect(ctx, *width, *height, *radius)?;
        }
        Outline::Ellipse { width, height } => {
            if *width <= 0.0 || *height <= 0.0 {
                return Ok(false);
            }
            ctx.ellipse(0.0, 0.0, width / 2.0, height / 2.0, 0.0, 0.0, TAU)?;
        }
        Outline::Path(path) => {
            for seg in path {
                match *seg {
                    PathCmd::MoveTo(p) => ctx.move_to(p.x, p.y),
                    PathCmd::LineTo(p) => ctx.line_to(p.x, p.y),
                    PathCmd::QuadTo { ctrl, to } => ctx.quadratic_curve_to(ctrl.x, ctrl.y, to.x, to.y),
                    PathCmd::Close => ctx.close_path(),
                }
            }
        }
    }
    Ok(true)
}

/// Origin-centered rectangle with corners of `radius` (clamped to half the short side).
fn trace_rounded_rect(ctx: &CanvasRenderingContext2d, width: f64, height: f64, radius: f64) -> Result<(), JsValue> {
    let r = radius.clamp(0.0, width.min(height) / 2.0);
    let (left, top) = (-width / 2.0, -height / 2.0);
    let (right, bottom) = (width / 2.0, height / 2.0);

    ctx.move_to(left + r, top);
    ctx.arc_to(right, top, right, bottom, r)?;
    ctx.arc_to(right, bottom, left, bottom, r)?;
    ctx.arc_to(left, bottom, left, top, r)?;
    ctx.arc_to(left, top, right, top, r)?;
    ctx.close_path();
    Ok(())
}
