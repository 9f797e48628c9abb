use super::Vec2;

/// Integer pixel position.
///
/// Produced by the circle rasterizer and consumed by the plot primitives.
/// Coordinates may lie outside the surface; plotting clips silently.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for Vec2 {
    #[inline]
    fn from(p: Point) -> Vec2 {
        Vec2::new(p.x as f32, p.y as f32)
    }
}
