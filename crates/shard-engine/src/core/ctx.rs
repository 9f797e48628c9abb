use crate::backend::Canvas;
use crate::display::Display;
use crate::input::InputNormalizer;
use crate::time::FrameTime;

/// Context for [`Game::init`](super::Game::init).
pub struct GameCtx<'a> {
    pub display: &'a mut Display<Canvas>,
    pub input: &'a mut InputNormalizer,
}

/// Per-frame context passed to [`Game::update`](super::Game::update).
///
/// Input for this frame has already been dispatched to listeners.
pub struct FrameCtx<'a> {
    pub display: &'a mut Display<Canvas>,
    pub input: &'a mut InputNormalizer,
    pub time: FrameTime,
}

impl FrameCtx<'_> {
    /// Frame delta in seconds.
    pub fn dt(&self) -> f64 {
        self.time.dt
    }
}
