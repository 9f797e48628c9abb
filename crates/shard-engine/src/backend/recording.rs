//! Test double that records every backend call.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::coords::{Point, Rect, Rgba8};
use crate::resource::{
    Arena, FontHandle, FontKind, TextHandle, TextKind, TextureHandle, TextureKind,
};

use super::{Backend, BackendError};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    LoadTexture(PathBuf),
    ReleaseTexture(TextureHandle),
    OpenFont(PathBuf, u32),
    CloseFont(FontHandle),
    RenderText(String, Rgba8),
    DestroyText(TextHandle),
    SetDrawColor(Rgba8),
    DrawPoint(Point),
    DrawPoints(Vec<Point>),
    DrawLine(Point, Point),
    BlitTexture { texture: TextureHandle, src: Rect, dst: Rect, angle: f32 },
    BlitText { text: TextHandle, dst: Rect },
    Clear(Rgba8),
    Present,
    SetFullscreen(bool),
}

/// In-memory backend: resources are sizes, drawing is a call log.
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    /// Paths whose texture or font load fails.
    pub missing: HashSet<PathBuf>,
    /// Size reported for every loaded texture.
    pub texture_dims: (u32, u32),
    pub textures: Arena<TextureKind, (u32, u32)>,
    pub fonts: Arena<FontKind, u32>,
    pub texts: Arena<TextKind, (u32, u32)>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            missing: HashSet::new(),
            texture_dims: (32, 16),
            textures: Arena::new(),
            fonts: Arena::new(),
            texts: Arena::new(),
        }
    }

    pub fn with_missing(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing.insert(path.into());
        self
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn texture_loads(&self, path: &str) -> usize {
        self.count(|c| matches!(c, Call::LoadTexture(p) if p == Path::new(path)))
    }

    /// Calls that put pixels on the surface, in order.
    pub fn draws(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::DrawPoint(_)
                        | Call::DrawPoints(_)
                        | Call::DrawLine(..)
                        | Call::BlitTexture { .. }
                        | Call::BlitText { .. }
                )
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.calls.clear();
    }
}

impl Backend for RecordingBackend {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError> {
        self.calls.push(Call::LoadTexture(path.to_path_buf()));
        if self.missing.contains(path) {
            return Err(BackendError::Io {
                path: path.to_path_buf(),
                message: "not found".to_string(),
            });
        }
        Ok(self.textures.insert(self.texture_dims))
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(texture).copied()
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        self.calls.push(Call::ReleaseTexture(texture));
        self.textures.remove(texture);
    }

    fn open_font(&mut self, path: &Path, size: u32) -> Result<FontHandle, BackendError> {
        self.calls.push(Call::OpenFont(path.to_path_buf(), size));
        if self.missing.contains(path) {
            return Err(BackendError::Io {
                path: path.to_path_buf(),
                message: "not found".to_string(),
            });
        }
        Ok(self.fonts.insert(size))
    }

    fn close_font(&mut self, font: FontHandle) {
        self.calls.push(Call::CloseFont(font));
        self.fonts.remove(font);
    }

    fn render_text(
        &mut self,
        font: FontHandle,
        text: &str,
        color: Rgba8,
    ) -> Result<TextHandle, BackendError> {
        self.calls.push(Call::RenderText(text.to_string(), color));
        let size = *self.fonts.get(font).ok_or(BackendError::InvalidHandle)?;
        let width = text.chars().count() as u32 * (size / 2).max(1);
        Ok(self.texts.insert((width, size)))
    }

    fn text_size(&self, text: TextHandle) -> Option<(u32, u32)> {
        self.texts.get(text).copied()
    }

    fn destroy_text(&mut self, text: TextHandle) {
        self.calls.push(Call::DestroyText(text));
        self.texts.remove(text);
    }

    fn set_draw_color(&mut self, color: Rgba8) {
        self.calls.push(Call::SetDrawColor(color));
    }

    fn draw_point(&mut self, p: Point) {
        self.calls.push(Call::DrawPoint(p));
    }

    fn draw_points(&mut self, points: &[Point]) {
        self.calls.push(Call::DrawPoints(points.to_vec()));
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        self.calls.push(Call::DrawLine(from, to));
    }

    fn blit_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect, angle: f32) {
        self.calls.push(Call::BlitTexture { texture, src, dst, angle });
    }

    fn blit_text(&mut self, text: TextHandle, dst: Rect) {
        self.calls.push(Call::BlitText { text, dst });
    }

    fn clear(&mut self, color: Rgba8) {
        self.calls.push(Call::Clear(color));
    }

    fn present(&mut self) {
        self.calls.push(Call::Present);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.calls.push(Call::SetFullscreen(fullscreen));
    }

    fn size(&self) -> (u32, u32) {
        (1280, 864)
    }
}
