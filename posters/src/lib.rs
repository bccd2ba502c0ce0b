//! Shared poster model for saved compositions.
//!
//! This crate owns the JSON representation of a finished composition: the
//! shape records captured from the canvas, the raw slider bank, and the
//! metadata record handed to the persistence collaborator. Both the `canvas`
//! engine (which produces posters) and the `gallery` aggregations (which read
//! them back) depend on it, so field names follow the stored camelCase form.

#[cfg(test)]
#[path = "lib_test.rs"]
mod lib_test;

use serde::{Deserialize, Serialize};

/// `source` value written by the canvas screen.
pub const SOURCE_CANVAS: &str = "canvas";

/// Fallback used in file names when the emotion or reason is empty.
const UNKNOWN_SEGMENT: &str = "unknown";

/// Number of trailing timestamp characters (milliseconds and zone) dropped from file names.
const STAMP_TRIM: usize = 5;

/// Error returned when poster JSON cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum PosterError {
    /// The input was not valid poster JSON.
    #[error("failed to decode poster json: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The four placeable shape types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// A thin bar; its long axis follows the distance direction.
    Line,
    /// A (possibly rounded) rectangle.
    Square,
    /// An ellipse.
    Circle,
    /// An apex-up isosceles triangle.
    Triangle,
}

impl ShapeKind {
    /// All kinds in toolbar order.
    pub const ALL: [Self; 4] = [Self::Line, Self::Square, Self::Circle, Self::Triangle];

    /// Lowercase name as stored on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Square => "square",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }

    /// Parse a lowercase wire name. Surrounding whitespace and case are ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw))
    }
}

/// Axis along which multiple shapes are spread apart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl DistanceDirection {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// A placed shape as captured at save time.
///
/// Geometric fields hold physical values (pixels, radians, alpha); `round`,
/// `blur`, `dispersion` and `depth` keep their raw 0–100 slider values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeRecord {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub shape_size: f64,
    pub transparency: f64,
    pub rotation: f64,
    pub contraction: f64,
    pub stretched: f64,
    pub round: u8,
    pub blur: u8,
    pub dispersion: u8,
    pub depth: u8,
    pub x: f64,
    pub y: f64,
    pub selected: bool,
}

/// Raw slider bank (each 0–100) at save time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SliderParams {
    pub shape_size: u8,
    pub transparency: u8,
    pub distance: u8,
    pub rotation: u8,
    pub contraction: u8,
    pub stretched: u8,
    pub round: u8,
    pub blur: u8,
    pub scatter: u8,
    pub depth: u8,
}

impl SliderParams {
    /// `(wire name, value)` pairs in slider order.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, u8); 10] {
        [
            ("shapeSize", self.shape_size),
            ("transparency", self.transparency),
            ("distance", self.distance),
            ("rotation", self.rotation),
            ("contraction", self.contraction),
            ("stretched", self.stretched),
            ("round", self.round),
            ("blur", self.blur),
            ("scatter", self.scatter),
            ("depth", self.depth),
        ]
    }
}

/// The `{emotion, reason}` pair chosen before entering the canvas.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub emotion: String,
    pub reason: String,
}

/// Metadata record stored alongside the uploaded image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Poster {
    pub emotion: String,
    pub reason: String,
    /// Palette color used for the composition, `#RRGGBB`.
    pub color: String,
    /// Image file name without extension.
    pub img: String,
    /// Stable URL returned by the upload.
    pub img_route: String,
    pub shapes: Vec<ShapeRecord>,
    pub slider_params: SliderParams,
    pub distance_direction: DistanceDirection,
    /// ISO-8601 creation time.
    pub created_at: String,
    pub source: String,
}

impl Poster {
    /// Decode a single poster from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PosterError::Decode`] for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, PosterError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Whether this poster was produced by the canvas screen.
    #[must_use]
    pub fn is_canvas(&self) -> bool {
        self.source == SOURCE_CANVAS
    }
}

/// Decode a JSON array of posters.
///
/// # Errors
///
/// Returns [`PosterError::Decode`] for malformed input.
pub fn parse_posters(raw: &str) -> Result<Vec<Poster>, PosterError> {
    Ok(serde_json::from_str(raw)?)
}

/// Build the upload file name (without extension) for a composition.
///
/// `timestamp` is an ISO-8601 string such as `2025-03-04T05:06:07.890Z`.
#[must_use]
pub fn poster_file_name(emotion: &str, reason: &str, timestamp: &str) -> String {
    let stamp: String = timestamp
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    let keep = stamp.chars().count().saturating_sub(STAMP_TRIM);
    let stamp: String = stamp.chars().take(keep).collect();
    format!("{}_{}_canvas_{stamp}", file_segment(emotion), file_segment(reason))
}

fn file_segment(raw: &str) -> String {
    if raw.is_empty() {
        return UNKNOWN_SEGMENT.to_owned();
    }
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
