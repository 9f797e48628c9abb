//! Contract between the runtime and game code.
//!
//! The runtime owns the window, GPU and display; game code sees them only
//! through [`GameCtx`] and [`FrameCtx`].

mod app;
mod ctx;

pub use app::{step_frame, AppControl, Game};
pub use ctx::{FrameCtx, GameCtx};
