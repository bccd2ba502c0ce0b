//! Control surface model: slider bank, axis toggles and the color picker.
//!
//! The host page owns the actual DOM widgets. This module defines the values
//! they carry into the engine. `ControlSnapshot` is the whole slider bank at
//! one instant; the engine keeps the previous frame's snapshot and diffs the
//! two to find which slider the user touched, so only that parameter is
//! written back to the selected shape.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use posters::SliderParams;

use crate::consts::RAW_MAX;

/// Axis along which two or three shapes are spread apart.
pub use posters::DistanceDirection as Axis;

/// One of the ten parameter sliders, in panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    ShapeSize,
    Transparency,
    /// Spacing between shapes. Global, never routed to a shape.
    Distance,
    Rotation,
    Contraction,
    Stretched,
    Round,
    Blur,
    Scatter,
    Depth,
}

impl Control {
    /// All sliders in panel order.
    pub const ALL: [Self; 10] = [
        Self::ShapeSize,
        Self::Transparency,
        Self::Distance,
        Self::Rotation,
        Self::Contraction,
        Self::Stretched,
        Self::Round,
        Self::Blur,
        Self::Scatter,
        Self::Depth,
    ];

    /// Display label shown next to the slider.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ShapeSize => "Shape Size",
            Self::Transparency => "Transparency",
            Self::Distance => "Distance",
            Self::Rotation => "Rotation",
            Self::Contraction => "Contraction",
            Self::Stretched => "Stretched",
            Self::Round => "Round",
            Self::Blur => "Blur",
            Self::Scatter => "Scatter",
            Self::Depth => "Depth",
        }
    }

    /// Look up a slider by its display label (case-insensitive).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|control| control.label().eq_ignore_ascii_case(label))
    }

    /// Whether edits to this slider are routed to the selected shape.
    #[must_use]
    pub fn is_shape_param(self) -> bool {
        self != Self::Distance
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Clamp a host slider value into the raw `[0, 100]` range, rounding to the
/// nearest step. Non-finite input maps to 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_raw(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // Clamped to [0, 100] first, so the cast cannot truncate.
    value.round().clamp(0.0, f64::from(RAW_MAX)) as u8
}

/// Raw value of every slider at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlSnapshot {
    values: [u8; 10],
}

impl ControlSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current raw value of `control`.
    #[must_use]
    pub fn get(&self, control: Control) -> u8 {
        self.values[control.index()]
    }

    /// Set `control` from untrusted host input. Returns the stored raw value.
    pub fn set(&mut self, control: Control, value: f64) -> u8 {
        let raw = clamp_raw(value);
        self.values[control.index()] = raw;
        raw
    }

    /// Set `control` from an already-integral raw value, clamped to 100.
    pub fn set_raw(&mut self, control: Control, raw: u8) {
        self.values[control.index()] = raw.min(RAW_MAX);
    }

    /// `(control, raw)` pairs in panel order.
    pub fn iter(&self) -> impl Iterator<Item = (Control, u8)> + '_ {
        Control::ALL.into_iter().map(|control| (control, self.get(control)))
    }

    /// The slider bank in its stored (camelCase) form.
    #[must_use]
    pub fn to_slider_params(&self) -> SliderParams {
        SliderParams {
            shape_size: self.get(Control::ShapeSize),
            transparency: self.get(Control::Transparency),
            distance: self.get(Control::Distance),
            rotation: self.get(Control::Rotation),
            contraction: self.get(Control::Contraction),
            stretched: self.get(Control::Stretched),
            round: self.get(Control::Round),
            blur: self.get(Control::Blur),
            scatter: self.get(Control::Scatter),
            depth: self.get(Control::Depth),
        }
    }
}

/// Every control whose raw value differs between `prev` and `current`, in panel order.
#[must_use]
pub fn changed_controls(prev: &ControlSnapshot, current: &ControlSnapshot) -> Vec<Control> {
    Control::ALL
        .into_iter()
        .filter(|control| prev.get(*control) != current.get(*control))
        .collect()
}

/// The first changed control, if any.
#[must_use]
pub fn diff(prev: &ControlSnapshot, current: &ControlSnapshot) -> Option<Control> {
    Control::ALL
        .into_iter()
        .find(|control| prev.get(*control) != current.get(*control))
}

// =============================================================
// Colors
// =============================================================

/// An opaque sRGB color picked from the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
    #[must_use]
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Some(Self { r, g, b }),
            _ => None,
        }
    }

    /// Uppercase `#RRGGBB`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// This color with an alpha on the 0–255 scale (clamped).
    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Rgba {
        Rgba { rgb: self, alpha: alpha.clamp(0.0, 255.0) }
    }
}

/// A color with alpha on the 0–255 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f64,
}

impl Rgba {
    /// CSS `rgba(...)` string for Canvas2D fill/stroke styles.
    #[must_use]
    pub fn css(self) -> String {
        let Rgb { r, g, b } = self.rgb;
        let a = self.alpha / 255.0;
        format!("rgba({r}, {g}, {b}, {a:.3})")
    }
}
