//! Deferred sprite and shape drawing.
//!
//! Game code submits into a [`DrawQueue`] during the frame; the display
//! draws the queue in one pass and clears it.

mod queue;
mod raster;
mod shape;
mod transform;

pub use queue::{load_texture, DrawQueue, TextureCache};
pub use raster::{rasterize_circle, ring_touches_surface, MAX_CIRCLE_RADIUS};
pub use shape::{Circle, Line};
pub use transform::{Transform, TransformRef};
