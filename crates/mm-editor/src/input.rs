//! Normalized input events.
//!
//! Frontends translate raw pointer/keyboard/drag-and-drop activity into
//! these events; the editor consumes them without knowing where they came
//! from.

use mm_core::Shape;

/// Keyboard modifier state carried with pointer and key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A normalized input event, in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp {
        x: f32,
        y: f32,
    },
    /// The pointer left the canvas while a button may still be held.
    /// Treated exactly like a release so drags can never get stuck.
    PointerLeave {
        x: f32,
        y: f32,
    },
    DoubleClick {
        x: f32,
        y: f32,
    },
    /// A shape dropped from the palette. `shape` is `None` when the drag
    /// payload is missing; the active palette shape is used instead.
    PaletteDrop {
        x: f32,
        y: f32,
        shape: Option<Shape>,
    },
    Key {
        key: String,
        modifiers: Modifiers,
    },
}

impl InputEvent {
    /// Extract the position if this is a positional event.
    pub fn position(&self) -> Option<(f32, f32)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::PointerLeave { x, y }
            | Self::DoubleClick { x, y }
            | Self::PaletteDrop { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
