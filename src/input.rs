//! Input model: mouse buttons, wheel deltas, cursor styles, and the pointer
//! gesture state machine.
//!
//! `PointerState` is the active gesture being tracked between pointer-down
//! and pointer-up, carrying the context needed to compute the pan offset and
//! to tell a click from a drag on release. `SelectionState` is what the user
//! interaction derived; it is never persisted.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// Cursor styles the engine can ask the host to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    /// Over a mirror; a click would select it.
    Pointer,
    /// Pan is available.
    Grab,
    /// Pan in progress.
    Grabbing,
}

impl CursorStyle {
    /// CSS cursor keyword for the host to apply.
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
        }
    }
}

/// Selection state derived from user interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    /// Mirror picked by the last click, if any.
    pub selected: Option<String>,
    /// Mirror currently under the cursor, if any.
    pub hovered: Option<String>,
    /// Mirror matched by the last id search, if any.
    pub search_match: Option<String>,
}

/// Pointer gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerState {
    /// No gesture in progress; pointer moves hover-test instead of panning.
    Idle,
    /// The user is panning the viewport by dragging.
    Dragging {
        /// Pointer position minus camera offset at press; `offset = pointer - anchor`.
        anchor: Point,
        /// Screen position at press, used to tell a click from a drag on release.
        press: Point,
    },
}

impl Default for PointerState {
    fn default() -> Self {
        Self::Idle
    }
}
