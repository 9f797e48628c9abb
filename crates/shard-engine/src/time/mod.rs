//! Frame timing.
//!
//! One `FrameClock` per loop; `tick()` once per presented frame yields the
//! `FrameTime` whose `dt` feeds input polling and game updates.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
