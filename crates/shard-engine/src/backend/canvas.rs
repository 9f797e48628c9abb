use std::collections::VecDeque;
use std::path::Path;

use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

use crate::coords::{Point, Rect, Rgba8, Vec2};
use crate::resource::{
    Arena, FontHandle, FontKind, TextHandle, TextKind, TextureHandle, TextureKind,
};

use super::{Backend, BackendError, Bitmap, EventSource, RawEvent};

struct LoadedFont {
    font: fontdue::Font,
    px: f32,
}

/// Software backend rendering into an in-memory RGBA framebuffer.
///
/// Drawing goes to a back buffer; [`present`](Backend::present) copies it to
/// the front buffer, which the window runtime uploads to the GPU. Input events
/// pushed by the runtime are queued FIFO and popped through [`EventSource`].
pub struct Canvas {
    back: Bitmap,
    front: Bitmap,
    draw_color: Rgba8,

    textures: Arena<TextureKind, Bitmap>,
    fonts: Arena<FontKind, LoadedFont>,
    texts: Arena<TextKind, Bitmap>,

    events: VecDeque<RawEvent>,
    frames_presented: u64,
    fullscreen_request: Option<bool>,

    // reusable fontdue layout
    layout: Layout<()>,
}

impl Canvas {
    /// Creates a canvas of `width` x `height` pixels, cleared to opaque black.
    pub fn new(width: u32, height: u32) -> Result<Self, BackendError> {
        if width == 0 || height == 0 {
            return Err(BackendError::InvalidSize { width, height });
        }

        Ok(Self {
            back: Bitmap::filled(width, height, Rgba8::BLACK),
            front: Bitmap::filled(width, height, Rgba8::BLACK),
            draw_color: Rgba8::BLACK,
            textures: Arena::new(),
            fonts: Arena::new(),
            texts: Arena::new(),
            events: VecDeque::new(),
            frames_presented: 0,
            fullscreen_request: None,
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        })
    }

    /// Last presented frame.
    pub fn front_buffer(&self) -> &Bitmap {
        &self.front
    }

    /// Frame currently being drawn.
    pub fn back_buffer(&self) -> &Bitmap {
        &self.back
    }

    /// Number of `present` calls so far.
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Queues a window-system event for the input layer.
    pub fn push_event(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Returns and clears the last fullscreen request, if any.
    pub fn take_fullscreen_request(&mut self) -> Option<bool> {
        self.fullscreen_request.take()
    }

    /// Number of live texture, font and text resources.
    pub fn live_resources(&self) -> (usize, usize, usize) {
        (self.textures.len(), self.fonts.len(), self.texts.len())
    }

    fn plot(&mut self, x: i64, y: i64) {
        self.back.blend(x, y, self.draw_color);
    }

    /// Nearest-sample blit of `src` region of `bitmap` into `dst`, rotated
    /// about the centre of `dst`.
    fn blit(back: &mut Bitmap, bitmap: &Bitmap, src: Rect, dst: Rect, angle: f32) {
        if dst.is_empty() || src.is_empty() {
            return;
        }

        let surface = Rect::new(0.0, 0.0, back.width() as f32, back.height() as f32);
        let Some(area) = dst.rotated_bounds(angle).intersect(surface) else { return };

        let centre = dst.center();
        let half = dst.size * 0.5;
        let sx = src.size.x / dst.size.x;
        let sy = src.size.y / dst.size.y;

        let x0 = area.origin.x.floor() as i64;
        let y0 = area.origin.y.floor() as i64;
        let x1 = (area.origin.x + area.size.x).ceil() as i64;
        let y1 = (area.origin.y + area.size.y).ceil() as i64;

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let local = (p - centre).rotated(-angle) + half;
                if local.x < 0.0 || local.y < 0.0 || local.x >= dst.size.x || local.y >= dst.size.y {
                    continue;
                }

                let u = (src.origin.x + local.x * sx).floor() as i64;
                let v = (src.origin.y + local.y * sy).floor() as i64;
                if let Some(texel) = bitmap.get(u, v) {
                    back.blend(x, y, texel);
                }
            }
        }
    }
}

impl Backend for Canvas {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle, BackendError> {
        let img = image::open(path).map_err(|e| match e {
            image::ImageError::IoError(io) => BackendError::Io {
                path: path.to_path_buf(),
                message: io.to_string(),
            },
            other => BackendError::Image {
                path: path.to_path_buf(),
                message: other.to_string(),
            },
        })?;

        Ok(self.textures.insert(Bitmap::from_image(img.to_rgba8())))
    }

    fn texture_size(&self, texture: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(texture).map(Bitmap::size)
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        if self.textures.remove(texture).is_none() {
            log::debug!("release of stale texture {texture:?}");
        }
    }

    fn open_font(&mut self, path: &Path, size: u32) -> Result<FontHandle, BackendError> {
        let bytes = std::fs::read(path).map_err(|e| BackendError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let px = size.max(1) as f32;
        let settings = fontdue::FontSettings { scale: px, ..fontdue::FontSettings::default() };
        let font = fontdue::Font::from_bytes(bytes, settings).map_err(|e| BackendError::Font {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(self.fonts.insert(LoadedFont { font, px }))
    }

    fn close_font(&mut self, font: FontHandle) {
        if self.fonts.remove(font).is_none() {
            log::debug!("close of stale font {font:?}");
        }
    }

    fn render_text(
        &mut self,
        font: FontHandle,
        text: &str,
        color: Rgba8,
    ) -> Result<TextHandle, BackendError> {
        let loaded = self.fonts.get(font).ok_or(BackendError::InvalidHandle)?;

        self.layout.reset(&LayoutSettings::default());
        self.layout.append(&[&loaded.font], &TextStyle::new(text, loaded.px, 0));

        let glyphs = self.layout.glyphs();
        let width = glyphs
            .iter()
            .map(|g| (g.x + g.width as f32).ceil().max(0.0) as u32)
            .max()
            .unwrap_or(0);
        let height = glyphs
            .iter()
            .map(|g| (g.y + g.height as f32).ceil().max(0.0) as u32)
            .fold(self.layout.height().ceil() as u32, u32::max);

        let mut bitmap = Bitmap::new(width.max(1), height.max(1));
        for g in glyphs {
            if g.width == 0 || g.height == 0 {
                continue;
            }

            let (_, coverage) = loaded.font.rasterize_config(g.key);
            let gx = g.x.round() as i64;
            let gy = g.y.round() as i64;
            for (i, &c) in coverage.iter().enumerate() {
                if c == 0 {
                    continue;
                }
                let col = (i % g.width) as i64;
                let row = (i / g.width) as i64;
                bitmap.blend(gx + col, gy + row, color.with_coverage(c));
            }
        }

        Ok(self.texts.insert(bitmap))
    }

    fn text_size(&self, text: TextHandle) -> Option<(u32, u32)> {
        self.texts.get(text).map(Bitmap::size)
    }

    fn destroy_text(&mut self, text: TextHandle) {
        if self.texts.remove(text).is_none() {
            log::debug!("destroy of stale text {text:?}");
        }
    }

    fn set_draw_color(&mut self, color: Rgba8) {
        self.draw_color = color;
    }

    fn draw_point(&mut self, p: Point) {
        self.plot(p.x as i64, p.y as i64);
    }

    fn draw_line(&mut self, from: Point, to: Point) {
        let (width, height) = self.back.size();
        let Some((from, to)) = clip_segment(from, to, width, height) else { return };

        // Bresenham, all octants.
        let (mut x, mut y) = (from.x as i64, from.y as i64);
        let (x1, y1) = (to.x as i64, to.y as i64);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn blit_texture(&mut self, texture: TextureHandle, src: Rect, dst: Rect, angle: f32) {
        let Some(bitmap) = self.textures.get(texture) else { return };
        Self::blit(&mut self.back, bitmap, src, dst, angle);
    }

    fn blit_text(&mut self, text: TextHandle, dst: Rect) {
        let Some(bitmap) = self.texts.get(text) else { return };
        let src = Rect::new(0.0, 0.0, bitmap.width() as f32, bitmap.height() as f32);
        Self::blit(&mut self.back, bitmap, src, dst, 0.0);
    }

    fn clear(&mut self, color: Rgba8) {
        self.back.fill(color);
    }

    fn present(&mut self) {
        self.front.copy_from(&self.back);
        self.frames_presented += 1;
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen_request = Some(fullscreen);
    }

    fn size(&self) -> (u32, u32) {
        self.back.size()
    }
}

impl EventSource for Canvas {
    fn poll_event(&mut self) -> Option<RawEvent> {
        self.events.pop_front()
    }
}

/// Clips a segment to the pixel rectangle of a `width` by `height` surface
/// (Liang-Barsky). Segments already inside come back unchanged, so on-surface
/// lines keep their exact Bresenham path.
fn clip_segment(from: Point, to: Point, width: u32, height: u32) -> Option<(Point, Point)> {
    let right = i64::from(width) - 1;
    let bottom = i64::from(height) - 1;
    let inside = |p: Point| {
        (0..=right).contains(&i64::from(p.x)) && (0..=bottom).contains(&i64::from(p.y))
    };
    if inside(from) && inside(to) {
        return Some((from, to));
    }

    let (x0, y0) = (f64::from(from.x), f64::from(from.y));
    let dx = f64::from(to.x) - x0;
    let dy = f64::from(to.y) - y0;
    let (mut enter, mut exit) = (0.0_f64, 1.0_f64);

    for (p, q) in [
        (-dx, x0),
        (dx, right as f64 - x0),
        (-dy, y0),
        (dy, bottom as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > exit {
                return None;
            }
            enter = enter.max(t);
        } else {
            if t < enter {
                return None;
            }
            exit = exit.min(t);
        }
    }

    let at = |t: f64| {
        let x = (x0 + t * dx).round().clamp(0.0, right as f64);
        let y = (y0 + t * dy).round().clamp(0.0, bottom as f64);
        Point::new(x as i32, y as i32)
    };
    Some((at(enter), at(exit)))
}
