//! GPU device, surface and canvas presentation.
//!
//! [`Gpu`] owns the wgpu device and the configured window surface.
//! [`CanvasPresenter`] puts the software canvas on that surface each frame.

mod gpu;
mod presenter;

pub use gpu::{AcquireError, Gpu, GpuFrame, SurfaceOptions};
pub use presenter::{CanvasPresenter, PresentOutcome};
