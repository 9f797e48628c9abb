use std::path::Path;
use std::rc::Rc;

use crate::backend::Backend;
use crate::coords::Rect;
use crate::resource::{ResourceCache, TextureHandle};

use super::raster::{rasterize_circle, ring_touches_surface, MAX_CIRCLE_RADIUS};
use super::shape::{Circle, Line};
use super::transform::TransformRef;

/// Texture cache keyed by sprite path.
pub type TextureCache = ResourceCache<String, TextureHandle>;

/// Per-frame sprite and shape submissions.
///
/// Submissions only append; nothing touches the backend until the frame is
/// drawn. Drawing order is fixed: sprites, then circles, then lines, so
/// debug overlays always land on top of sprites. Text is drawn after this by
/// the text layer.
#[derive(Default)]
pub struct DrawQueue {
    sprites: Vec<TransformRef>,
    circles: Vec<Circle>,
    lines: Vec<Line>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a sprite. The same transform may be queued more than once.
    pub fn submit_sprite(&mut self, transform: TransformRef) {
        self.sprites.push(transform);
    }

    /// Removes the first queued entry for `transform` (by identity).
    ///
    /// Returns `false` if it was not queued.
    pub fn remove_sprite(&mut self, transform: &TransformRef) -> bool {
        match self.sprites.iter().position(|t| Rc::ptr_eq(t, transform)) {
            Some(i) => {
                self.sprites.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn submit_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn submit_circle(&mut self, circle: Circle) {
        self.circles.push(circle);
    }

    pub fn sprites(&self) -> &[TransformRef] {
        &self.sprites
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty() && self.circles.is_empty() && self.lines.is_empty()
    }

    /// Draws every queued item in layer order. The queue is left intact.
    pub fn draw<B: Backend + ?Sized>(&self, backend: &mut B, textures: &mut TextureCache) {
        self.draw_sprites(backend, textures);
        self.draw_circles(backend);
        self.draw_lines(backend);
    }

    pub fn clear(&mut self) {
        self.sprites.clear();
        self.circles.clear();
        self.lines.clear();
    }

    fn draw_sprites<B: Backend + ?Sized>(&self, backend: &mut B, textures: &mut TextureCache) {
        for transform in &self.sprites {
            let Ok(mut t) = transform.try_borrow_mut() else {
                log::warn!("sprite transform is borrowed during draw; skipping");
                continue;
            };

            let Some(path) = t.sprite_path.as_deref() else { continue };
            let Some(texture) = load_texture(backend, textures, path) else { continue };
            let Some((w, h)) = backend.texture_size(texture) else { continue };

            t.width = w;
            t.height = h;
            t.recalculate_centre();

            let src = Rect::new(0.0, 0.0, w as f32, h as f32);
            backend.blit_texture(texture, src, t.bounds(), t.rotation);
        }
    }

    fn draw_circles<B: Backend + ?Sized>(&self, backend: &mut B) {
        let (width, height) = backend.size();
        for c in &self.circles {
            if !ring_touches_surface(c.center.x, c.center.y, c.radius, width, height) {
                continue;
            }
            if c.radius > MAX_CIRCLE_RADIUS {
                log::debug!("skipping circle of radius {} at {:?}", c.radius, c.center);
                continue;
            }

            backend.set_draw_color(c.color);
            let points = rasterize_circle(c.center.x, c.center.y, c.radius);
            // One batch per octant step, the way the outline is produced.
            for step in points.chunks(8) {
                backend.draw_points(step);
            }
        }
    }

    fn draw_lines<B: Backend + ?Sized>(&self, backend: &mut B) {
        for l in &self.lines {
            backend.set_draw_color(l.color);
            backend.draw_line(l.from, l.to);
        }
    }
}

/// Resolves a sprite path through the texture cache.
pub fn load_texture<B: Backend + ?Sized>(
    backend: &mut B,
    textures: &mut TextureCache,
    path: &str,
) -> Option<TextureHandle> {
    textures.acquire(path, |p| backend.load_texture(Path::new(p)))
}
