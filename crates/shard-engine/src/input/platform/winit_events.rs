use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::backend::RawEvent;
use crate::input::{ButtonState, Key, MouseButton};

/// Maps winit window events to backend [`RawEvent`]s.
///
/// The canvas is stretched over the whole window, so cursor positions are
/// rescaled from window pixels to canvas pixels. winit does not attach a
/// position to button events; the last cursor position is tracked here and
/// stamped onto presses and releases.
#[derive(Debug)]
pub struct WinitEventMapper {
    pointer: (f32, f32),
    canvas: (u32, u32),
    window: (u32, u32),
}

impl WinitEventMapper {
    pub fn new(canvas: (u32, u32), window: PhysicalSize<u32>) -> Self {
        let mut mapper = Self { pointer: (0.0, 0.0), canvas, window: canvas };
        mapper.set_window_size(window);
        mapper
    }

    /// Last known cursor position in canvas pixels.
    pub fn pointer(&self) -> (f32, f32) {
        self.pointer
    }

    /// Records the window's inner size. A zero-area size (minimized) keeps
    /// the previous scale.
    pub fn set_window_size(&mut self, size: PhysicalSize<u32>) {
        if size.width > 0 && size.height > 0 {
            self.window = (size.width, size.height);
        }
    }

    /// Converts a window position to canvas pixels.
    pub fn to_canvas(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let sx = f64::from(self.canvas.0) / f64::from(self.window.0);
        let sy = f64::from(self.canvas.1) / f64::from(self.window.1);
        ((position.x * sx) as f32, (position.y * sy) as f32)
    }

    /// Returns `None` for events the backend queue does not carry.
    pub fn map(&mut self, event: &WindowEvent) -> Option<RawEvent> {
        match event {
            WindowEvent::CloseRequested => Some(RawEvent::CloseRequested),

            WindowEvent::Focused(f) => Some(RawEvent::Focused(*f)),

            WindowEvent::Resized(size) => {
                self.set_window_size(*size);
                Some(RawEvent::Resized { width: size.width, height: size.height })
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = self.to_canvas(*position);
                let (x, y) = self.pointer;
                Some(RawEvent::PointerMotion { x, y })
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self.pointer;
                Some(RawEvent::PointerButton {
                    button: map_mouse_button(*button),
                    state: map_state(*state),
                    x,
                    y,
                })
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let (x, y) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                    MouseScrollDelta::PixelDelta(p) => (p.x as f32, p.y as f32),
                };
                Some(RawEvent::PointerWheel { x, y })
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let (key, code) = map_key(event.physical_key);
                Some(RawEvent::Key {
                    key,
                    state: map_state(event.state),
                    code,
                    repeat: event.repeat,
                })
            }

            WindowEvent::Ime(winit::event::Ime::Commit(text)) if !text.is_empty() => {
                Some(RawEvent::Text(text.clone()))
            }

            _ => None,
        }
    }
}

fn map_state(state: ElementState) -> ButtonState {
    match state {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Space => Key::Space,

                KeyCode::ArrowUp => Key::ArrowUp,
                KeyCode::ArrowDown => Key::ArrowDown,
                KeyCode::ArrowLeft => Key::ArrowLeft,
                KeyCode::ArrowRight => Key::ArrowRight,

                KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
                KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
                KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,

                KeyCode::KeyA => Key::A,
                KeyCode::KeyB => Key::B,
                KeyCode::KeyC => Key::C,
                KeyCode::KeyD => Key::D,
                KeyCode::KeyE => Key::E,
                KeyCode::KeyF => Key::F,
                KeyCode::KeyG => Key::G,
                KeyCode::KeyH => Key::H,
                KeyCode::KeyI => Key::I,
                KeyCode::KeyJ => Key::J,
                KeyCode::KeyK => Key::K,
                KeyCode::KeyL => Key::L,
                KeyCode::KeyM => Key::M,
                KeyCode::KeyN => Key::N,
                KeyCode::KeyO => Key::O,
                KeyCode::KeyP => Key::P,
                KeyCode::KeyQ => Key::Q,
                KeyCode::KeyR => Key::R,
                KeyCode::KeyS => Key::S,
                KeyCode::KeyT => Key::T,
                KeyCode::KeyU => Key::U,
                KeyCode::KeyV => Key::V,
                KeyCode::KeyW => Key::W,
                KeyCode::KeyX => Key::X,
                KeyCode::KeyY => Key::Y,
                KeyCode::KeyZ => Key::Z,

                KeyCode::Digit0 => Key::Digit0,
                KeyCode::Digit1 => Key::Digit1,
                KeyCode::Digit2 => Key::Digit2,
                KeyCode::Digit3 => Key::Digit3,
                KeyCode::Digit4 => Key::Digit4,
                KeyCode::Digit5 => Key::Digit5,
                KeyCode::Digit6 => Key::Digit6,
                KeyCode::Digit7 => Key::Digit7,
                KeyCode::Digit8 => Key::Digit8,
                KeyCode::Digit9 => Key::Digit9,

                KeyCode::F1 => Key::F1,
                KeyCode::F2 => Key::F2,
                KeyCode::F3 => Key::F3,
                KeyCode::F4 => Key::F4,
                KeyCode::F5 => Key::F5,
                KeyCode::F6 => Key::F6,
                KeyCode::F7 => Key::F7,
                KeyCode::F8 => Key::F8,
                KeyCode::F9 => Key::F9,
                KeyCode::F10 => Key::F10,
                KeyCode::F11 => Key::F11,
                KeyCode::F12 => Key::F12,

                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        // NativeKeyCode has no stable numeric form.
        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}
