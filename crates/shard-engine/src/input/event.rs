use core::fmt;

use super::types::{Key, MouseButton};

/// Abstract input event kind. Listeners register interest per kind.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum InputKind {
    PointerMove,
    PointerDown,
    PointerUp,
    PointerWheel,
    KeyDown,
    KeyUp,
}

impl InputKind {
    pub const ALL: [InputKind; 6] = [
        InputKind::PointerMove,
        InputKind::PointerDown,
        InputKind::PointerUp,
        InputKind::PointerWheel,
        InputKind::KeyDown,
        InputKind::KeyUp,
    ];

    /// Stable kebab-case name, used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            InputKind::PointerMove => "pointer-move",
            InputKind::PointerDown => "pointer-down",
            InputKind::PointerUp => "pointer-up",
            InputKind::PointerWheel => "pointer-wheel",
            InputKind::KeyDown => "key-down",
            InputKind::KeyUp => "key-up",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalized input record, independent of the backend's event encoding.
///
/// Field use by kind:
/// - pointer move / down / up: `x`, `y` are the pointer position; down/up set `button`
/// - pointer wheel: `x`, `y` are the wheel deltas
/// - key down / up: `key` and `code` are set, position is zero
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputEvent {
    pub kind: InputKind,
    pub x: f32,
    pub y: f32,
    pub button: Option<MouseButton>,
    pub key: Option<Key>,
    /// Platform scancode for key events, 0 otherwise.
    pub code: u32,
}

impl InputEvent {
    #[inline]
    pub fn pointer(kind: InputKind, x: f32, y: f32, button: Option<MouseButton>) -> Self {
        Self { kind, x, y, button, key: None, code: 0 }
    }

    #[inline]
    pub fn key(kind: InputKind, key: Key, code: u32) -> Self {
        Self { kind, x: 0.0, y: 0.0, button: None, key: Some(key), code }
    }
}
