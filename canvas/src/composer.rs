//! Active-shape list and selection: the shape-button state machine.
//!
//! At most [`MAX_SHAPES`] shapes, never two of the same kind, at most one
//! selected. Pressing a shape button for kind `T`:
//!
//! 1. `T` is selected: remove it and select the first remaining shape.
//! 2. `T` is absent and there is room: create it from the sliders and select it.
//! 3. `T` exists but is not selected: select it.
//! 4. `T` is absent, the list is full and a shape is selected: retype the
//!    selected shape to `T` in place.
//! 5. Otherwise nothing happens.

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;

use posters::{ShapeKind, ShapeRecord};

use crate::consts::MAX_SHAPES;
use crate::input::ControlSnapshot;
use crate::shape::ShapeInstance;

/// What a shape-button press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// A new shape was appended at this index and selected.
    Created(usize),
    /// The selected shape was removed; `selected` is the new selection.
    Removed { selected: Option<usize> },
    /// An existing shape was selected.
    Selected(usize),
    /// The selected shape changed kind in place.
    Retyped { index: usize, from: ShapeKind },
    Ignored,
}

impl PressOutcome {
    /// The index the slider bank should be resynchronised from, if any.
    #[must_use]
    pub fn resync_from(self) -> Option<usize> {
        match self {
            Self::Removed { selected } => selected,
            Self::Selected(index) | Self::Retyped { index, .. } => Some(index),
            Self::Created(_) | Self::Ignored => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Composer {
    shapes: Vec<ShapeInstance>,
    selected: Option<usize>,
}

impl Composer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn shapes(&self) -> &[ShapeInstance] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [ShapeInstance] {
        &mut self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn selected_shape(&self) -> Option<&ShapeInstance> {
        self.selected.and_then(|i| self.shapes.get(i))
    }

    pub fn selected_shape_mut(&mut self) -> Option<&mut ShapeInstance> {
        self.selected.and_then(|i| self.shapes.get_mut(i))
    }

    #[must_use]
    pub fn selected_kind(&self) -> Option<ShapeKind> {
        self.selected_shape().map(|s| s.kind)
    }

    fn position_of(&self, kind: ShapeKind) -> Option<usize> {
        self.shapes.iter().position(|s| s.kind == kind)
    }

    /// Handle a press of the `kind` shape button.
    ///
    /// New shapes snapshot `controls`.
    pub fn press(&mut self, kind: ShapeKind, controls: &ControlSnapshot) -> PressOutcome {
        match (self.position_of(kind), self.selected) {
            (Some(index), Some(selected)) if index == selected => {
                self.shapes.remove(index);
                self.selected = if self.shapes.is_empty() { None } else { Some(0) };
                PressOutcome::Removed { selected: self.selected }
            }
            (Some(index), _) => {
                self.selected = Some(index);
                PressOutcome::Selected(index)
            }
            (None, _) if self.shapes.len() < MAX_SHAPES => {
                self.shapes.push(ShapeInstance::from_controls(kind, controls));
                let index = self.shapes.len() - 1;
                self.selected = Some(index);
                PressOutcome::Created(index)
            }
            (None, Some(index)) => match self.shapes.get_mut(index) {
                Some(shape) => {
                    let from = shape.kind;
                    shape.kind = kind;
                    PressOutcome::Retyped { index, from }
                }
                None => PressOutcome::Ignored,
            },
            (None, None) => PressOutcome::Ignored,
        }
    }

    /// Apply a canvas click whose hit-test result is `hit`.
    ///
    /// A hit toggles that shape's selection and deselects the rest; a miss
    /// deselects everything. Returns the newly selected index.
    pub fn click(&mut self, hit: Option<usize>) -> Option<usize> {
        self.selected = match hit {
            Some(index) if self.selected == Some(index) => None,
            Some(index) if index < self.shapes.len() => Some(index),
            _ => None,
        };
        self.selected
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.selected = None;
    }

    /// Swap the two shapes of a pair, keeping the same shape selected.
    ///
    /// Returns `false` (and does nothing) unless exactly two shapes are active.
    pub fn swap_pair(&mut self) -> bool {
        if self.shapes.len() != 2 {
            return false;
        }
        self.shapes.swap(0, 1);
        self.selected = self.selected.map(|i| 1 - i);
        true
    }

    /// Stored form of every shape, in list order.
    #[must_use]
    pub fn records(&self) -> Vec<ShapeRecord> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, s)| s.to_record(self.selected == Some(i)))
            .collect()
    }
}
