use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::{Rect, Vec2};

/// Placement of a game object on the surface.
///
/// Game code owns transforms and mutates them between frames; the draw queue
/// holds [`TransformRef`]s and reads the current state at flush time.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Top-left corner in surface pixels.
    pub x: f32,
    pub y: f32,

    pub scale_x: f32,
    pub scale_y: f32,

    /// Clockwise rotation in degrees, about the centre of the drawn rect.
    pub rotation: f32,

    /// Unscaled size. Refreshed from the texture whenever the sprite resolves.
    pub width: u32,
    pub height: u32,

    /// Image file drawn for this transform. `None` draws nothing.
    pub sprite_path: Option<String>,

    centre: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            width: 0,
            height: 0,
            sprite_path: None,
            centre: Vec2::zero(),
        }
    }
}

impl Transform {
    pub fn new(x: f32, y: f32) -> Self {
        let mut t = Self { x, y, ..Self::default() };
        t.recalculate_centre();
        t
    }

    pub fn with_sprite(mut self, path: impl Into<String>) -> Self {
        self.sprite_path = Some(path.into());
        self
    }

    /// Wraps the transform for shared use with the draw queue.
    pub fn shared(self) -> TransformRef {
        Rc::new(RefCell::new(self))
    }

    /// Centre of the scaled rect, as of the last [`recalculate_centre`](Self::recalculate_centre).
    pub fn centre(&self) -> Vec2 {
        self.centre
    }

    pub fn recalculate_centre(&mut self) {
        let size = self.scaled_size();
        self.centre = Vec2::new(self.x + size.x / 2.0, self.y + size.y / 2.0);
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
        self.recalculate_centre();
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.rotation = (self.rotation + degrees) % 360.0;
    }

    pub fn scaled_size(&self) -> Vec2 {
        Vec2::new(self.width as f32 * self.scale_x, self.height as f32 * self.scale_y)
    }

    /// Destination rect of the sprite: position plus scaled size.
    pub fn bounds(&self) -> Rect {
        let size = self.scaled_size();
        Rect::new(self.x, self.y, size.x, size.y)
    }
}

/// Shared, mutable transform. The draw queue matches these by identity.
pub type TransformRef = Rc<RefCell<Transform>>;
