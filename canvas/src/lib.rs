//! Shape composition engine for the emotion canvas.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! interactive canvas: up to three parameterized shapes driven by ten sliders,
//! laid out along an axis, drawn as nested and dispersed outlines, selectable
//! by click, and finally saved as a PNG plus poster record. The host page only
//! wires DOM events to [`wasm::CanvasApp`] and reflects the returned updates
//! in its buttons and sliders.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] frame loop |
//! | [`composer`] | Active-shape list and the shape-button state machine |
//! | [`shape`] | Shape instances, slider mapping, silhouettes and dispersion |
//! | [`layout`] | Positions shapes along the distance axis |
//! | [`geometry`] | Points, containment tests and rounded paths |
//! | [`input`] | Sliders, control snapshots and palette colors |
//! | [`hit`] | Hit-testing clicks against shapes |
//! | [`render`] | Display-list builder |
//! | [`surface`] | Canvas2D backend that replays display lists |
//! | [`save`] | Save flow with rate-limit retries |
//! | [`config`] | Engine configuration from the host |
//! | [`wasm`] | `wasm-bindgen` entry point |
//! | [`consts`] | Shared constants (ranges, nesting, borders, palette) |

pub mod composer;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod layout;
pub mod render;
pub mod save;
pub mod shape;
pub mod surface;
pub mod wasm;
