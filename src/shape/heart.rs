use std::sync::LazyLock;

use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Vec2};

/// Point of the local outline that lands on the heart's placement center.
pub const HEART_ANCHOR: Point = Point::new(50.125, 39.795);

/// Local width the outline is normalized against: a heart of size `s` is scaled by `s / 100.25`.
pub const HEART_UNIT_SIZE: f64 = 100.25;

static HEART_OUTLINE: LazyLock<BezPath> = LazyLock::new(build_heart_outline);

/// Build the closed heart outline in its local ~100x80 unit space.
pub fn build_heart_outline() -> BezPath {
    let mut p = BezPath::new();
    p.move_to((64.77, 6.19));
    p.line_to((50.13, 20.83));
    p.line_to((35.49, 6.19));
    p.curve_to((27.4, -1.9), (14.29, -1.9), (6.2, 6.19));
    p.curve_to((-2.29, 14.28), (-2.29, 27.39), (6.2, 35.48));
    p.line_to((20.84, 50.12));
    p.line_to((50.13, 79.41));
    p.line_to((79.42, 50.12));
    p.line_to((94.06, 35.48));
    p.curve_to((102.15, 27.39), (102.15, 14.28), (94.06, 6.19));
    p.curve_to((85.97, -1.9), (72.86, -1.9), (64.77, 6.19));
    p.close_path();
    p
}

/// Shared outline; identical to [`build_heart_outline`].
pub fn heart_outline() -> &'static BezPath {
    &HEART_OUTLINE
}

/// Local-to-canvas transform for a heart of `size` centered on `center`, flipped by `mirror`.
///
/// `translate(center) * scale(mirror) * scale(size / 100.25) * translate(-anchor)`.
pub fn heart_transform(center: Point, size: f64, mirror: Vec2) -> Affine {
    Affine::translate(center.to_vec2())
        * Affine::scale_non_uniform(mirror.x, mirror.y)
        * Affine::scale(size / HEART_UNIT_SIZE)
        * Affine::translate(-HEART_ANCHOR.to_vec2())
}

/// Outline already placed in canvas space.
pub fn placed_heart(center: Point, size: f64, mirror: Vec2) -> BezPath {
    heart_transform(center, size, mirror) * heart_outline().clone()
}

/// Square of side `size` centered on `center`, used for visibility culling.
pub fn heart_bounds(center: Point, size: f64) -> Rect {
    Rect::from_center_size(center, (size, size))
}

/// `false` only when the bounding square lies entirely outside the canvas (touching counts
/// as visible).
pub fn heart_visible(center: Point, size: f64, canvas: Canvas) -> bool {
    let half = size / 2.0;
    center.x + half >= 0.0
        && center.x - half <= canvas.width_f64()
        && center.y + half >= 0.0
        && center.y - half <= canvas.height_f64()
}

#[cfg(test)]
#[path = "../../tests/unit/shape/heart.rs"]
mod tests;
