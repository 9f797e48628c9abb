use crate::input::{ButtonState, Key, MouseButton};

/// Backend-level input event, before normalization.
///
/// Pointer coordinates are in surface pixels. The runtime fills the
/// backend's queue with these from window system events; the input layer
/// pops them one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    PointerMotion { x: f32, y: f32 },

    PointerButton {
        button: MouseButton,
        state: ButtonState,
        x: f32,
        y: f32,
    },

    /// Wheel delta in lines (or pixels on high-precision devices).
    PointerWheel { x: f32, y: f32 },

    Key {
        key: Key,
        state: ButtonState,
        /// Platform scancode when available.
        code: u32,
        repeat: bool,
    },

    /// Committed text input.
    Text(String),

    Focused(bool),

    Resized { width: u32, height: u32 },

    CloseRequested,
}
