//! Composition layout: positions the 1–3 active shapes around the canvas center.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::consts::INITIAL_MAX_DISTANCE;
use crate::geometry::Point;
use crate::input::{Axis, Control};
use crate::shape::{ShapeInstance, raw_to_physical};

/// The spacing between shapes, in px.
///
/// Sticky: it only changes when the Distance slider itself moves, so
/// resynchronising the slider bank from a shape never disturbs the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    last_set: f64,
}

impl Default for Distance {
    fn default() -> Self {
        Self { last_set: INITIAL_MAX_DISTANCE }
    }
}

impl Distance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last distance the user set.
    #[must_use]
    pub fn get(self) -> f64 {
        self.last_set
    }

    /// Record a Distance slider move.
    pub fn set_raw(&mut self, raw: u8) {
        self.last_set = raw_to_physical(Control::Distance, raw);
    }
}

/// Write each shape's position for this frame.
///
/// - one shape is centered once; a shape already placed is left where it is
/// - two shapes sit at `center ± distance / 2` along `axis`
/// - three shapes sit at `center - distance`, `center`, `center + distance`, in list order
#[allow(clippy::float_cmp)]
pub fn layout(shapes: &mut [ShapeInstance], distance: f64, axis: Axis, center: Point) {
    let (step_x, step_y) = match axis {
        Axis::Horizontal => (distance, 0.0),
        Axis::Vertical => (0.0, distance),
    };
    let place = |shape: &mut ShapeInstance, k: f64| {
        shape.x = center.x + step_x * k;
        shape.y = center.y + step_y * k;
    };
    match shapes {
        [] => {}
        [only] => {
            if only.x == 0.0 && only.y == 0.0 {
                place(only, 0.0);
            }
        }
        [first, second] => {
            place(first, -0.5);
            place(second, 0.5);
        }
        [first, second, third, ..] => {
            place(first, -1.0);
            place(second, 0.0);
            place(third, 1.0);
        }
    }
}
