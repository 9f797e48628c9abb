//! Native rendering/windowing backend boundary.
//!
//! The display layer only talks to the backend through [`Backend`] (drawing,
//! resource creation, presentation) and the input layer only through
//! [`EventSource`] (non-blocking event popping). [`Canvas`] is the software
//! implementation used by the runtime; tests use a recording double.

mod bitmap;
mod canvas;
mod error;
mod event;

#[cfg(test)]
pub(crate) mod recording;

use std::path::Path;

use crate::coords::{Point, Rect, Rgba8};
use crate::resource::{FontHandle, TextHandle, TextureHandle};

pub use bitmap::Bitmap;
pub use canvas::Canvas;
pub use error::BackendError;
pub use event::RawEvent;

/// Drawing side of the backend.
///
/// Resource constructors report failure with `Err`; the caches above turn
/// that into an empty handle. Draw calls with stale handles or off-surface
/// coordinates are silent no-ops.
pub trait Backend {
    /// Decodes an image file into a texture.
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError>;

    /// Natural size of a texture in pixels.
    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)>;

    fn release_texture(&mut self, texture: TextureHandle);

    /// Opens a font file at `size` pixels.
    fn open_font(&mut self, path: &Path, size: u32) -> Result<FontHandle, BackendError>;

    fn close_font(&mut self, font: FontHandle);

    /// Rasterizes `text` with `font` into a new text resource.
    fn render_text(
        &mut self,
        font: FontHandle,
        text: &str,
        color: Rgba8,
    ) -> Result<TextHandle, BackendError>;

    /// Natural size of a rendered text resource in pixels.
    fn text_size(&self, text: TextHandle) -> Option<(u32, u32)>;

    fn destroy_text(&mut self, text: TextHandle);

    /// Sets the colour used by `draw_point` / `draw_line`.
    fn set_draw_color(&mut self, color: Rgba8);

    fn draw_point(&mut self, p: Point);

    fn draw_points(&mut self, points: &[Point]) {
        for &p in points {
            self.draw_point(p);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point);

    /// Draws the `src` region of `texture` into `dst`, rotated by `angle`
    /// degrees (clockwise) about the centre of `dst`.
    fn blit_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect, angle: f32);

    /// Draws a whole text resource into `dst`.
    fn blit_text(&mut self, text: TextHandle, dst: Rect);

    /// Fills the whole surface with `color`.
    fn clear(&mut self, color: Rgba8);

    /// Makes the frame drawn so far visible.
    fn present(&mut self);

    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);
}

/// Event side of the backend: a non-blocking pop of the next pending event.
pub trait EventSource {
    fn poll_event(&mut self) -> Option<RawEvent>;
}

impl EventSource for std::collections::VecDeque<RawEvent> {
    fn poll_event(&mut self) -> Option<RawEvent> {
        self.pop_front()
    }
}
