use posters::{Selection, ShapeKind};
use wasm_bindgen::JsValue;
use web_sys::HtmlCanvasElement;

use crate::composer::{Composer, PressOutcome};
use crate::config::EngineConfig;
use crate::consts::{DEFAULT_COLOR, RAW_MAX};
use crate::geometry::Point;
use crate::hit::hit_test;
use crate::input::{Axis, Control, ControlSnapshot, Rgb, changed_controls};
use crate::layout::{Distance, layout};
use crate::render::{Frame, Scene, build_frame};
use crate::save::PosterDraft;
use crate::surface::Surface;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The slider bank was resynchronised from a shape; move the host sliders.
    ControlsChanged(ControlSnapshot),
    /// The selected shape changed; highlight this shape button.
    SelectionChanged(Option<ShapeKind>),
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub composer: Composer,
    /// Slider values as the host last reported them.
    pub controls: ControlSnapshot,
    /// Slider values as of the last tick.
    pub prev_controls: ControlSnapshot,
    pub axis: Axis,
    pub distance: Distance,
    pub color: Rgb,
    /// The `{emotion, reason}` pair chosen before entering the canvas.
    pub selection: Selection,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            composer: Composer::new(),
            controls: ControlSnapshot::new(),
            prev_controls: ControlSnapshot::new(),
            axis: Axis::default(),
            distance: Distance::new(),
            color: Rgb::parse_hex(DEFAULT_COLOR).unwrap_or_default(),
            selection: Selection::default(),
            viewport_width: 0.0,
            viewport_height: 0.0,
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(width: f64, height: f64, selection: Selection) -> Self {
        Self { viewport_width: width, viewport_height: height, selection, ..Self::default() }
    }

    // --- Shape buttons ---

    /// Handle a press of the `kind` shape button.
    pub fn press_shape(&mut self, kind: ShapeKind) -> Vec<Action> {
        let outcome = self.composer.press(kind, &self.controls);
        match outcome {
            PressOutcome::Created(i) => log::info!("shape: created {} at {i}", kind.as_str()),
            PressOutcome::Removed { .. } => log::info!("shape: removed {}", kind.as_str()),
            PressOutcome::Selected(i) => log::debug!("shape: selected {} at {i}", kind.as_str()),
            PressOutcome::Retyped { index, from } => {
                log::info!("shape: retyped {index} from {} to {}", from.as_str(), kind.as_str());
            }
            PressOutcome::Ignored => {
                log::debug!("shape: ignored {} press, list is full", kind.as_str());
                return Vec::new();
            }
        }

        let mut actions = vec![Action::SelectionChanged(self.composer.selected_kind())];
        if let Some(index) = outcome.resync_from() {
            actions.extend(self.resync_from(index));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Copy shape `index` into the slider bank, marking it as already seen so
    /// the next tick does not write it straight back.
    fn resync_from(&mut self, index: usize) -> Option<Action> {
        let shape = self.composer.shapes().get(index)?;
        shape.write_controls(&mut self.controls);
        shape.write_controls(&mut self.prev_controls);
        Some(Action::ControlsChanged(self.controls))
    }

    // --- Host inputs ---

    /// Record a slider move from the host. The value is clamped and rounded;
    /// it takes effect on the next tick.
    pub fn set_control(&mut self, control: Control, value: f64) -> u8 {
        self.controls.set(control, value)
    }

    /// Switch the spreading axis.
    ///
    /// With the Distance slider at its maximum and exactly two shapes active,
    /// either toggle also swaps the pair.
    pub fn set_axis(&mut self, axis: Axis) -> Vec<Action> {
        if self.controls.get(Control::Distance) == RAW_MAX && self.composer.swap_pair() {
            log::debug!("axis: swapped shape pair");
        }
        if self.axis != axis {
            log::info!("axis: {}", axis.as_str());
        }
        self.axis = axis;
        vec![Action::RenderNeeded]
    }

    /// Set the fill color from a `#RRGGBB` palette entry. Invalid input is ignored.
    pub fn set_color(&mut self, hex: &str) -> Vec<Action> {
        let Some(color) = Rgb::parse_hex(hex) else {
            log::warn!("color: ignoring invalid value {hex:?}");
            return Vec::new();
        };
        self.color = color;
        vec![Action::RenderNeeded]
    }

    /// Remove every shape.
    pub fn clear(&mut self) -> Vec<Action> {
        log::info!("shape: cleared {} shapes", self.composer.len());
        self.composer.clear();
        vec![Action::SelectionChanged(None), Action::RenderNeeded]
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        log::debug!("viewport: {width}x{height}");
        self.viewport_width = width;
        self.viewport_height = height;
    }

    /// Handle a canvas click at `p` (canvas pixels).
    ///
    /// Clicks on or outside the canvas edge are ignored.
    pub fn click(&mut self, p: Point) -> Vec<Action> {
        let inside = p.x > 0.0 && p.x < self.viewport_width && p.y > 0.0 && p.y < self.viewport_height;
        if !inside {
            return Vec::new();
        }
        let hit = hit_test(p, self.composer.shapes(), self.axis, self.distance.get());
        let selected = self.composer.click(hit);
        log::debug!("click: ({}, {}) hit {hit:?}, selected {selected:?}", p.x, p.y);

        let mut actions = vec![Action::SelectionChanged(self.composer.selected_kind())];
        if let Some(index) = selected {
            actions.extend(self.resync_from(index));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Frame loop ---

    /// Per-frame update: route slider changes, then lay the shapes out.
    ///
    /// Distance moves the sticky layout distance; every other slider goes to
    /// the selected shape, if any.
    pub fn tick(&mut self) {
        for control in changed_controls(&self.prev_controls, &self.controls) {
            let raw = self.controls.get(control);
            if !control.is_shape_param() {
                self.distance.set_raw(raw);
            } else if let Some(shape) = self.composer.selected_shape_mut() {
                shape.apply_raw(control, raw);
            }
        }
        self.prev_controls = self.controls;
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        layout(self.composer.shapes_mut(), self.distance.get(), self.axis, center);
    }

    /// Tick, then build this frame's display list.
    pub fn frame(&mut self) -> Frame {
        self.tick();
        build_frame(&Scene {
            shapes: self.composer.shapes(),
            selected: self.composer.selected(),
            axis: self.axis,
            distance: self.distance.get(),
            color: self.color,
            width: self.viewport_width,
            height: self.viewport_height,
        })
    }

    // --- Queries ---

    /// Everything the save flow needs, detached from engine state.
    #[must_use]
    pub fn draft(&self) -> PosterDraft {
        PosterDraft {
            selection: self.selection.clone(),
            color: self.color.to_hex(),
            shapes: self.composer.records(),
            slider_params: self.controls.to_slider_params(),
            distance_direction: self.axis,
        }
    }

    #[must_use]
    pub fn selected_kind(&self) -> Option<ShapeKind> {
        self.composer.selected_kind()
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas.
pub struct Engine {
    surface: Surface,
    pub core: EngineCore,
}

impl Engine {
    /// Create an engine bound to `canvas`, sized per `config`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the drawing surface cannot be created.
    pub fn new(canvas: HtmlCanvasElement, config: &EngineConfig, selection: Selection) -> Result<Self, JsValue> {
        let mut surface = Surface::new(canvas)?;
        surface.resize(config.width, config.height);
        let core = EngineCore::new(f64::from(config.width), f64::from(config.height), selection);
        Ok(Self { surface, core })
    }

    /// Resize the canvas. Both buffers are reallocated before the core sees
    /// the new size, so the next frame is drawn at the new dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface.resize(width, height);
        self.core.resize(f64::from(width), f64::from(height));
    }

    /// Tick and draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let frame = self.core.frame();
        self.surface.present(&frame)
    }

    /// Render, then encode the canvas as a PNG data URL.
    ///
    /// # Errors
    ///
    /// Returns `Err` if rendering or encoding fails.
    pub fn snapshot_png(&mut self) -> Result<String, JsValue> {
        self.render()?;
        self.surface.to_png_data_url()
    }
}
