use crate::coords::Point;

/// Outline points of a circle, midpoint algorithm.
///
/// Each step emits the eight octant reflections of the current `(x, y)`,
/// starting from `(radius - 1, 0)` and stopping once `x < y`. Points on the
/// octant seams repeat. A radius below 1 yields nothing.
///
/// Every point lies within half a pixel of radius `radius` or `radius - 1`.
/// Points are not clipped; coordinates past the `i32` range saturate.
/// Radii above [`MAX_CIRCLE_RADIUS`] yield nothing. Callers drawing to a
/// surface should cull with [`ring_touches_surface`] first.
pub fn rasterize_circle(cx: i32, cy: i32, radius: i32) -> Vec<Point> {
    if radius > MAX_CIRCLE_RADIUS {
        return Vec::new();
    }
    let (cx, cy, radius) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let diameter = radius * 2;
    let mut x = radius - 1;
    let mut y = 0;
    let mut tx = 1;
    let mut ty = 1;
    let mut error = tx - diameter;

    let steps = radius.clamp(0, MAX_RESERVED_STEPS) as usize;
    let mut points = Vec::with_capacity(steps * 8);

    while x >= y {
        points.extend_from_slice(&[
            point(cx + x, cy - y),
            point(cx + x, cy + y),
            point(cx - x, cy - y),
            point(cx - x, cy + y),
            point(cx + y, cy - x),
            point(cx + y, cy + x),
            point(cx - y, cy - x),
            point(cx - y, cy + x),
        ]);

        if error <= 0 {
            y += 1;
            error += ty;
            ty += 2;
        }

        if error > 0 {
            x -= 1;
            tx += 2;
            error += tx - diameter;
        }
    }

    points
}

/// Largest radius that is rasterized. The work is linear in the radius.
pub const MAX_CIRCLE_RADIUS: i32 = 1 << 15;

// Up-front reservation cap; larger outlines grow the vec as they go.
const MAX_RESERVED_STEPS: i64 = 4096;

fn point(x: i64, y: i64) -> Point {
    let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Point::new(clamp(x), clamp(y))
}

/// Whether any outline pixel of the circle can land on a `width` by
/// `height` surface anchored at the origin.
///
/// Outline pixels sit between `radius - 1.5` and `radius + 0.5` from the
/// centre, so a ring that lies wholly outside the surface, or wholly
/// encloses it, is rejected.
pub fn ring_touches_surface(cx: i32, cy: i32, radius: i32, width: u32, height: u32) -> bool {
    if radius < 1 || width == 0 || height == 0 {
        return false;
    }

    let (cx, cy, r) = (f64::from(cx), f64::from(cy), f64::from(radius));
    let (right, bottom) = (f64::from(width - 1), f64::from(height - 1));

    let near_x = cx.clamp(0.0, right) - cx;
    let near_y = cy.clamp(0.0, bottom) - cy;
    let nearest = near_x.hypot(near_y);

    let far_x = cx.max(right - cx);
    let far_y = cy.max(bottom - cy);
    let farthest = far_x.hypot(far_y);

    nearest <= r + 1.0 && farthest >= r - 2.0
}
