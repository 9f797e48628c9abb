//! Coordinate and colour types shared by the display and input layers.
//!
//! Canonical space:
//! - Surface pixels
//! - Origin top-left
//! - +X right, +Y down
//!
//! `Vec2` carries real-valued positions (transforms, text origins); `Point`
//! carries the integer pixel positions the rasterizer and plot primitives use.

mod color;
mod point;
mod rect;
mod vec2;

pub use color::Rgba8;
pub use point::Point;
pub use rect::Rect;
pub use vec2::Vec2;
