use anyhow::Result;

use crate::backend::Canvas;
use crate::display::Display;
use crate::input::InputNormalizer;
use crate::time::FrameTime;

use super::ctx::{FrameCtx, GameCtx};

/// Control directive returned by game callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Game logic driven by the runtime.
pub trait Game {
    /// Called once, after the window and display exist. Register input
    /// listeners here.
    fn init(&mut self, ctx: &mut GameCtx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Called once per frame between input polling and drawing. Submissions
    /// made here are drawn this frame.
    fn update(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}

/// Runs one frame against the display: clear, poll input, update, draw and
/// present to the canvas.
///
/// Putting the canvas on screen is left to the caller.
pub fn step_frame<G: Game + ?Sized>(
    game: &mut G,
    display: &mut Display<Canvas>,
    input: &mut InputNormalizer,
    time: FrameTime,
) -> AppControl {
    display.clear_display();
    input.poll(time.dt, display.backend_mut());

    let control = {
        let mut ctx = FrameCtx { display: &mut *display, input: &mut *input, time };
        game.update(&mut ctx)
    };

    display.display();
    control
}
