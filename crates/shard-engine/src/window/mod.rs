//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the game window, and wires them to the
//! GPU presenter, the display and the input normalizer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
