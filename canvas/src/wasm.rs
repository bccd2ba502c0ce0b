//! `wasm-bindgen` entry point for the host page.
//!
//! The host wires DOM events to [`CanvasApp`] and applies the returned host
//! updates (JSON strings) to its shape buttons and sliders. Saving runs as a
//! JS `Promise`; the canvas stays interactive while it is in flight.

#[cfg(test)]
#[path = "wasm_test.rs"]
mod wasm_test;

use std::cell::Cell;
use std::rc::Rc;

use posters::{Selection, ShapeKind, SliderParams};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use crate::config::EngineConfig;
use crate::consts::PALETTE;
use crate::engine::{Action, Engine};
use crate::geometry::Point;
use crate::input::{Axis, Control};
use crate::save::{HttpPosterStore, SaveJob, SavePolicy, save_poster};

/// What the host should update after an input, serialized as JSON.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct HostUpdate {
    /// Whether the shape-button highlight changed.
    selection_changed: bool,
    /// Kind to highlight when `selection_changed`.
    selected: Option<&'static str>,
    /// New slider positions, when the bank was resynchronised.
    controls: Option<SliderParams>,
    render: bool,
}

fn host_update(actions: &[Action]) -> HostUpdate {
    let mut update = HostUpdate::default();
    for action in actions {
        match action {
            Action::SelectionChanged(kind) => {
                update.selection_changed = true;
                update.selected = kind.map(ShapeKind::as_str);
            }
            Action::ControlsChanged(snapshot) => update.controls = Some(snapshot.to_slider_params()),
            Action::RenderNeeded => update.render = true,
        }
    }
    update
}

fn to_json(actions: &[Action]) -> Result<String, JsValue> {
    serde_json::to_string(&host_update(actions)).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_axis(raw: &str) -> Option<Axis> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "horizontal" => Some(Axis::Horizontal),
        "vertical" => Some(Axis::Vertical),
        _ => None,
    }
}

fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {err}");
    }
}

#[wasm_bindgen]
pub struct CanvasApp {
    engine: Engine,
    store: HttpPosterStore,
    policy: SavePolicy,
    saving: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl CanvasApp {
    /// Bind to `canvas`. `config_json` may be empty; `emotion` and `reason`
    /// are the pair chosen before entering the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` for invalid config or when the canvas has no 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config_json: &str, emotion: String, reason: String) -> Result<CanvasApp, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        init_logging(config.level().map_err(|e| JsValue::from_str(&e.to_string()))?);

        let engine = Engine::new(canvas, &config, Selection { emotion, reason })?;
        log::info!("canvas: ready at {}x{}", config.width, config.height);
        Ok(Self {
            engine,
            store: HttpPosterStore::new(&config.api_base),
            policy: config.save_policy(),
            saving: Rc::new(Cell::new(false)),
        })
    }

    /// Shape button press (`line`, `square`, `circle` or `triangle`).
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown shape name.
    #[wasm_bindgen(js_name = pressShape)]
    pub fn press_shape(&mut self, kind: &str) -> Result<String, JsValue> {
        let kind = ShapeKind::parse(kind).ok_or_else(|| JsValue::from_str(&format!("unknown shape: {kind}")))?;
        to_json(&self.engine.core.press_shape(kind))
    }

    /// Slider input by display label (e.g. `Shape Size`). Returns the stored raw value.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown slider label.
    #[wasm_bindgen(js_name = setControl)]
    pub fn set_control(&mut self, label: &str, value: f64) -> Result<u8, JsValue> {
        let control = Control::from_label(label).ok_or_else(|| JsValue::from_str(&format!("unknown slider: {label}")))?;
        Ok(self.engine.core.set_control(control, value))
    }

    /// Axis toggle (`horizontal` or `vertical`).
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown axis name.
    #[wasm_bindgen(js_name = setAxis)]
    pub fn set_axis(&mut self, axis: &str) -> Result<String, JsValue> {
        let axis = parse_axis(axis).ok_or_else(|| JsValue::from_str(&format!("unknown axis: {axis}")))?;
        to_json(&self.engine.core.set_axis(axis))
    }

    /// Palette pick.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the host update cannot be serialized.
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, hex: &str) -> Result<String, JsValue> {
        to_json(&self.engine.core.set_color(hex))
    }

    /// # Errors
    ///
    /// Returns `Err` only if the host update cannot be serialized.
    pub fn clear(&mut self) -> Result<String, JsValue> {
        to_json(&self.engine.core.clear())
    }

    /// Canvas click in canvas pixels.
    ///
    /// # Errors
    ///
    /// Returns `Err` only if the host update cannot be serialized.
    pub fn click(&mut self, x: f64, y: f64) -> Result<String, JsValue> {
        to_json(&self.engine.core.click(Point::new(x, y)))
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.engine.resize(width, height);
    }

    /// Draw one frame. Call once per animation frame.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a `Canvas2D` call fails.
    pub fn render(&mut self) -> Result<(), JsValue> {
        self.engine.render()
    }

    /// The 21 palette colors as `#RRGGBB` strings.
    #[must_use]
    pub fn palette() -> js_sys::Array {
        PALETTE.iter().map(|hex| JsValue::from_str(hex)).collect()
    }

    /// Upload the canvas and store the poster.
    ///
    /// Resolves with the stored poster JSON, or rejects with a message to show
    /// the user. A save started while another is in flight is rejected.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the canvas cannot be rendered or encoded.
    pub fn save(&mut self) -> Result<js_sys::Promise, JsValue> {
        if self.saving.get() {
            log::warn!("save: already in progress");
            return Ok(js_sys::Promise::reject(&JsValue::from_str("A save is already in progress.")));
        }

        let job = SaveJob {
            draft: self.engine.core.draft(),
            data_url: self.engine.snapshot_png()?,
            created_at: js_sys::Date::new_0().to_iso_string().into(),
        };
        let store = self.store.clone();
        let policy = self.policy;
        let saving = Rc::clone(&self.saving);
        saving.set(true);

        Ok(wasm_bindgen_futures::future_to_promise(async move {
            let result = save_poster(&store, job, policy, gloo_timers::future::sleep).await;
            saving.set(false);
            match result {
                Ok(poster) => serde_json::to_string(&poster)
                    .map(|json| JsValue::from_str(&json))
                    .map_err(|e| JsValue::from_str(&e.to_string())),
                Err(err) => Err(JsValue::from_str(&err.user_message())),
            }
        }))
    }
}
