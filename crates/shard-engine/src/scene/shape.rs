use crate::coords::{Point, Rgba8};

/// Straight line queued for the next flush.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub color: Rgba8,
}

impl Line {
    pub fn new(from: Point, to: Point, color: Rgba8) -> Self {
        Self { from, to, color }
    }
}

/// Unfilled circle queued for the next flush.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: i32,
    pub color: Rgba8,
}

impl Circle {
    pub fn new(center: Point, radius: i32, color: Rgba8) -> Self {
        Self { center, radius, color }
    }
}
