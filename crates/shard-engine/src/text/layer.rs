use std::path::{Path, PathBuf};

use crate::backend::Backend;
use crate::coords::{Rect, Rgba8};
use crate::resource::{FontHandle, ResourceCache, TextHandle};

use super::key::FontKey;

/// One string queued for drawing this frame.
///
/// The rendered resource belongs to the request and is created on first
/// draw. It is not shared with other requests, even for identical strings.
#[derive(Debug, PartialEq)]
pub struct TextRequest {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: u32,
    pub color: Rgba8,
    pub font: FontKey,
    rendered: Option<TextHandle>,
}

impl TextRequest {
    pub fn rendered(&self) -> Option<TextHandle> {
        self.rendered
    }
}

/// Frame text list plus the font cache behind it.
///
/// Fonts persist for the life of the layer. Rendered text lives for one
/// frame: [`clear`](Self::clear) destroys it.
pub struct TextLayer {
    font_path: PathBuf,
    fonts: ResourceCache<FontKey, FontHandle>,
    requests: Vec<TextRequest>,
}

impl TextLayer {
    /// `font_path` is the font file every request is drawn with.
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
            fonts: ResourceCache::new("fonts"),
            requests: Vec::new(),
        }
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }

    pub fn requests(&self) -> &[TextRequest] {
        &self.requests
    }

    /// Cached font keys, failed ones included.
    pub fn cached_fonts(&self) -> usize {
        self.fonts.len()
    }

    /// Queues `text` with its top-left corner at (`x`, `y`).
    pub fn enqueue(&mut self, text: impl Into<String>, x: f32, y: f32, size: u32, color: Rgba8) {
        self.requests.push(TextRequest {
            text: text.into(),
            x,
            y,
            size,
            color,
            font: FontKey::new(self.font_path.clone(), size),
            rendered: None,
        });
    }

    /// Queues one request per grid row, top to bottom, `size` pixels apart.
    pub fn enqueue_grid<R>(&mut self, rows: &[R], x: f32, y: f32, size: u32, color: Rgba8)
    where
        R: AsRef<[char]>,
    {
        for (i, row) in rows.iter().enumerate() {
            let line: String = row.as_ref().iter().collect();
            self.enqueue(line, x, y + (i as f32) * size as f32, size, color);
        }
    }

    /// Realizes pending requests and blits every request at its natural size.
    pub fn draw<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        for req in &mut self.requests {
            if req.rendered.is_none() {
                req.rendered = realize(backend, &mut self.fonts, req);
            }

            let Some(text) = req.rendered else { continue };
            let Some((w, h)) = backend.text_size(text) else { continue };

            backend.blit_text(text, Rect::new(req.x, req.y, w as f32, h as f32));
        }
    }

    /// Destroys this frame's rendered text and empties the list.
    pub fn clear<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        for req in self.requests.drain(..) {
            if let Some(text) = req.rendered {
                backend.destroy_text(text);
            }
        }
    }

    /// Clears the frame and closes every cached font.
    pub fn release<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        self.clear(backend);
        for font in self.fonts.drain() {
            backend.close_font(font);
        }
    }
}

fn realize<B: Backend + ?Sized>(
    backend: &mut B,
    fonts: &mut ResourceCache<FontKey, FontHandle>,
    req: &TextRequest,
) -> Option<TextHandle> {
    let Some(font) = fonts.acquire(&req.font, |k| backend.open_font(&k.path, k.size)) else {
        log::debug!("no font {} for text {:?}; skipped", req.font, req.text);
        return None;
    };

    match backend.render_text(font, &req.text, req.color) {
        Ok(text) => Some(text),
        Err(e) => {
            log::warn!("failed to render text {:?}: {e}", req.text);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::recording::{Call, RecordingBackend};

    const WHITE: Rgba8 = Rgba8::WHITE;

    #[test]
    fn requests_render_lazily_and_blit_at_natural_size() {
        let mut backend = RecordingBackend::new();
        let mut layer = TextLayer::new("font.ttf");
        layer.enqueue("hello", 10.0, 20.0, 16, WHITE);

        assert!(layer.requests()[0].rendered().is_none());
        layer.draw(&mut backend);

        let text = layer.requests()[0].rendered().expect("rendered");
        assert!(backend.calls.contains(&Call::BlitText {
            text,
            dst: Rect::new(10.0, 20.0, 40.0, 16.0),
        }));
    }

    #[test]
    fn fonts_are_shared_by_path_and_size() {
        let mut backend = RecordingBackend::new();
        let mut layer = TextLayer::new("font.ttf");
        layer.enqueue("a", 0.0, 0.0, 16, WHITE);
        layer.enqueue("b", 0.0, 0.0, 16, WHITE);
        layer.enqueue("c", 0.0, 0.0, 24, WHITE);

        layer.draw(&mut backend);

        assert_eq!(backend.count(|c| matches!(c, Call::OpenFont(..))), 2);
        assert_eq!(layer.cached_fonts(), 2);
    }

    #[test]
    fn identical_strings_render_separately() {
        let mut backend = RecordingBackend::new();
        let mut layer = TextLayer::new("font.ttf");
        layer.enqueue("score", 0.0, 0.0, 12, WHITE);
        layer.enqueue("score", 0.0, 30.0, 12, WHITE);

        layer.draw(&mut backend);

        assert_eq!(backend.count(|c| matches!(c, Call::RenderText(..))), 2);
    }

    #[test]
    fn missing_font_skips_text_and_is_not_reopened() {
        let mut backend = RecordingBackend::new().with_missing("nope.ttf");
        let mut layer = TextLayer::new("nope.ttf");

        for _ in 0..3 {
            layer.enqueue("x", 0.0, 0.0, 12, WHITE);
            layer.draw(&mut backend);
            layer.clear(&mut backend);
        }

        assert_eq!(backend.count(|c| matches!(c, Call::OpenFont(..))), 1);
        assert!(backend.draws().is_empty());
    }

    #[test]
    fn clear_destroys_rendered_text() {
        let mut backend = RecordingBackend::new();
        let mut layer = TextLayer::new("font.ttf");
        layer.enqueue("a", 0.0, 0.0, 12, WHITE);
        layer.enqueue("b", 0.0, 0.0, 12, WHITE);
        layer.draw(&mut backend);

        layer.clear(&mut backend);

        assert!(layer.requests().is_empty());
        assert_eq!(backend.count(|c| matches!(c, Call::DestroyText(_))), 2);
        assert!(backend.texts.is_empty());
    }

    #[test]
    fn each_rendered_text_is_destroyed_exactly_once() {
        let mut backend = RecordingBackend::new();
        let mut layer = TextLayer::new("font.ttf");
        layer.enqueue("same", 0.0, 0.0, 12, WHITE);
        layer.enqueue("same", 0.0, 0.0, 12, WHITE);
        layer.draw(&mut backend);
        layer.draw(&mut backend);

        let rendered: Vec<TextHandle> =
            layer.requests().iter().filter_map(TextRequest::rendered).collect();
        layer.clear(&mut backend);
        layer.clear(&mut backend);

        let destroyed: Vec<TextHandle> = backend
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::DestroyText(t) => Some(*t),
                _ => None,
            })
            .collect();

        assert_eq!(rendered.len(), 2);
        assert_ne!(rendered[0], rendered[1]);
        assert_eq!(destroyed.len(), 2);
        for t in &rendered {
            assert_eq!(destroyed.iter().filter(|d| *d == t).count(), 1);
        }
    }

    #[test]
    fn grid_rows_stack_by_size() {
        let mut layer = TextLayer::new("font.ttf");
        let rows = [['a', 'b'], ['c', 'd'], ['e', 'f']];

        layer.enqueue_grid(&rows, 5.0, 100.0, 20, WHITE);

        let got: Vec<(&str, f32)> =
            layer.requests().iter().map(|r| (r.text.as_str(), r.y)).collect();
        assert_eq!(got, vec![("ab", 100.0), ("cd", 120.0), ("ef", 140.0)]);
        assert!(layer.requests().iter().all(|r| r.x == 5.0));
    }

    #[test]
    fn release_closes_fonts() {
        let mut backend = RecordingBackend::new();
        let mut layer = TextLayer::new("font.ttf");
        layer.enqueue("a", 0.0, 0.0, 12, WHITE);
        layer.draw(&mut backend);

        layer.release(&mut backend);

        assert_eq!(backend.count(|c| matches!(c, Call::CloseFont(_))), 1);
        assert_eq!(layer.cached_fonts(), 0);
    }
}
