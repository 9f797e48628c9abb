use crate::backend::Backend;
use crate::coords::{Point, Rgba8};
use crate::scene::{load_texture, Circle, DrawQueue, Line, TextureCache, TransformRef};
use crate::text::TextLayer;

use super::config::DisplayConfig;

/// Game-facing drawing surface.
///
/// Owns the backend, the texture cache, the sprite/shape queue and the text
/// layer. Everything submitted during a frame is drawn by [`display`](Self::display)
/// in layer order: sprites, circles, lines, then text.
///
/// Dropping the display releases every cached texture and font.
pub struct Display<B: Backend> {
    backend: B,
    clear_color: Rgba8,
    textures: TextureCache,
    queue: DrawQueue,
    text: TextLayer,
}

impl<B: Backend> Display<B> {
    pub fn new(backend: B, config: &DisplayConfig) -> Self {
        let (w, h) = backend.size();
        log::info!("display '{}' ready at {w}x{h}", config.title);

        Self {
            backend,
            clear_color: config.clear_color,
            textures: TextureCache::new("textures"),
            queue: DrawQueue::new(),
            text: TextLayer::new(config.font_path.clone()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn queue(&self) -> &DrawQueue {
        &self.queue
    }

    pub fn text(&self) -> &TextLayer {
        &self.text
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    /// Starts a frame: drops leftover submissions and clears the surface.
    pub fn clear_display(&mut self) {
        self.text.clear(&mut self.backend);
        self.queue.clear();
        self.backend.clear(self.clear_color);
    }

    /// Draws everything submitted this frame, presents, and empties the queues.
    pub fn display(&mut self) {
        self.queue.draw(&mut self.backend, &mut self.textures);
        self.text.draw(&mut self.backend);

        self.backend.present();

        self.queue.clear();
        self.text.clear(&mut self.backend);
    }

    /// Queues a sprite and loads its texture now if it has one.
    pub fn add_to_draw(&mut self, transform: TransformRef) {
        let path = transform.borrow().sprite_path.clone();
        if let Some(path) = path {
            load_texture(&mut self.backend, &mut self.textures, &path);
        }
        self.queue.submit_sprite(transform);
    }

    pub fn remove_to_draw(&mut self, transform: &TransformRef) {
        self.queue.remove_sprite(transform);
    }

    /// Queues a line. Channels saturate into `0..=255`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(&mut self, x: i32, y: i32, x2: i32, y2: i32, r: i32, g: i32, b: i32, a: i32) {
        self.queue.submit_line(Line::new(
            Point::new(x, y),
            Point::new(x2, y2),
            Rgba8::from_channels(r, g, b, a),
        ));
    }

    /// Queues a circle outline.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32, r: i32, g: i32, b: i32, a: i32) {
        self.queue.submit_circle(Circle::new(
            Point::new(x, y),
            radius,
            Rgba8::from_channels(r, g, b, a),
        ));
    }

    /// Queues opaque text at (`x`, `y`), `size` pixels high.
    #[allow(clippy::too_many_arguments)]
    pub fn show_text(&mut self, text: &str, x: f32, y: f32, size: u32, r: i32, g: i32, b: i32) {
        self.text.enqueue(text, x, y, size, Rgba8::from_channels(r, g, b, 255));
    }

    /// Queues one line of text per grid row.
    #[allow(clippy::too_many_arguments)]
    pub fn show_text_grid<R: AsRef<[char]>>(
        &mut self,
        rows: &[R],
        x: f32,
        y: f32,
        size: u32,
        r: i32,
        g: i32,
        b: i32,
    ) {
        self.text.enqueue_grid(rows, x, y, size, Rgba8::from_channels(r, g, b, 255));
    }

    pub fn set_fullscreen(&mut self) {
        self.backend.set_fullscreen(true);
    }

    pub fn width(&self) -> u32 {
        self.backend.size().0
    }

    pub fn height(&self) -> u32 {
        self.backend.size().1
    }
}

impl<B: Backend> Drop for Display<B> {
    fn drop(&mut self) {
        self.text.release(&mut self.backend);
        for texture in self.textures.drain() {
            self.backend.release_texture(texture);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::backend::recording::{Call, RecordingBackend};
    use crate::backend::Canvas;
    use crate::scene::Transform;

    fn display() -> Display<RecordingBackend> {
        Display::new(RecordingBackend::new(), &DisplayConfig::default())
    }

    #[test]
    fn sprite_and_line_frame() {
        let mut d = display();
        d.add_to_draw(Transform::new(5.0, 5.0).with_sprite("ship.png").shared());
        d.draw_line(0, 0, 10, 10, 255, 0, 0, 255);

        d.backend_mut().clear_log();
        d.display();

        let b = d.backend();
        assert_eq!(b.count(|c| matches!(c, Call::BlitTexture { .. })), 1);
        assert_eq!(
            b.count(|c| matches!(c, Call::DrawLine(from, to) if *from == Point::new(0, 0) && *to == Point::new(10, 10))),
            1
        );
        assert!(b.calls.contains(&Call::SetDrawColor(Rgba8::rgb(255, 0, 0))));
        assert!(d.queue().is_empty());
        assert!(d.text().requests().is_empty());
    }

    #[test]
    fn present_follows_every_draw() {
        let mut d = display();
        d.draw_circle(10, 10, 3, 0, 255, 0, 255);
        d.show_text("hi", 0.0, 0.0, 12, 255, 255, 255);
        d.display();

        let calls = &d.backend().calls;
        let present = calls.iter().position(|c| *c == Call::Present).expect("present");
        let last_draw = calls
            .iter()
            .rposition(|c| matches!(c, Call::DrawPoints(_) | Call::BlitText { .. }))
            .expect("draw");
        assert!(last_draw < present);
        // Rendered text is destroyed after presenting.
        assert!(matches!(calls.last(), Some(Call::DestroyText(_))));
    }

    #[test]
    fn texture_is_loaded_on_submission() {
        let mut d = display();
        d.add_to_draw(Transform::default().with_sprite("a.png").shared());
        assert_eq!(d.backend().texture_loads("a.png"), 1);

        d.display();
        assert_eq!(d.backend().texture_loads("a.png"), 1);
    }

    #[test]
    fn missing_asset_fails_once() {
        let mut d = Display::new(
            RecordingBackend::new().with_missing("missing.png"),
            &DisplayConfig::default(),
        );
        let t = Transform::default().with_sprite("missing.png").shared();

        for _ in 0..3 {
            d.clear_display();
            d.add_to_draw(Rc::clone(&t));
            d.display();
        }

        assert_eq!(d.backend().texture_loads("missing.png"), 1);
        assert_eq!(d.textures().peek("missing.png"), Some(None));
        assert_eq!(d.backend().count(|c| matches!(c, Call::BlitTexture { .. })), 0);
    }

    #[test]
    fn submissions_after_display_wait_for_next_frame() {
        let mut d = display();
        d.draw_line(0, 0, 1, 1, 255, 255, 255, 255);
        d.display();
        d.draw_line(2, 2, 3, 3, 255, 255, 255, 255);

        let lines = d.backend().count(|c| matches!(c, Call::DrawLine(..)));
        assert_eq!(lines, 1);
        assert_eq!(d.queue().lines().len(), 1);
    }

    #[test]
    fn remove_to_draw_before_display() {
        let mut d = display();
        let t = Transform::default().with_sprite("a.png").shared();
        d.add_to_draw(Rc::clone(&t));
        d.remove_to_draw(&t);
        d.display();

        assert_eq!(d.backend().count(|c| matches!(c, Call::BlitTexture { .. })), 0);
    }

    #[test]
    fn text_is_opaque_and_channels_saturate() {
        let mut d = display();
        d.show_text("x", 0.0, 0.0, 10, 300, -5, 128);
        assert_eq!(d.text().requests()[0].color, Rgba8::new(255, 0, 128, 255));
    }

    #[test]
    fn clear_display_uses_clear_colour() {
        let mut d = display();
        d.clear_display();
        assert_eq!(d.backend().calls.last(), Some(&Call::Clear(Rgba8::BLACK)));
    }

    #[test]
    fn fullscreen_and_size_pass_through() {
        let mut d = display();
        d.set_fullscreen();
        assert!(d.backend().calls.contains(&Call::SetFullscreen(true)));
        assert_eq!((d.width(), d.height()), (1280, 864));
    }

    #[test]
    fn lines_land_on_a_software_canvas() {
        let canvas = Canvas::new(16, 16).expect("canvas");
        let mut d = Display::new(canvas, &DisplayConfig::default());

        d.clear_display();
        d.draw_line(0, 0, 15, 0, 255, 0, 0, 255);
        d.display();

        let front = d.backend().front_buffer();
        assert_eq!(front.get(7, 0), Some(Rgba8::rgb(255, 0, 0)));
        assert_eq!(front.get(7, 1), Some(Rgba8::BLACK));
        assert_eq!(d.backend().frames_presented(), 1);
    }
}
