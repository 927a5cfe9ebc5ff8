use crate::{
    field::pool::{PooledPoint, VectorPool},
    foundation::core::{Canvas, Point, Vec2},
};

/// One mirrored copy of an emission point under box reflection.
#[derive(Debug)]
pub struct ImageSource {
    position: PooledPoint,
    scale_x: f64,
    scale_y: f64,
}

impl ImageSource {
    /// Mirrored position in canvas coordinates (may lie outside the canvas).
    pub fn position(&self) -> Point {
        self.position.get()
    }

    /// `1` or `-1`: horizontal flip of the heart drawn at this image.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// `1` or `-1`: vertical flip of the heart drawn at this image.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    /// `(scale_x, scale_y)`.
    pub fn mirror(&self) -> Vec2 {
        Vec2::new(self.scale_x, self.scale_y)
    }

    pub(crate) fn into_position(self) -> PooledPoint {
        self.position
    }
}

/// Number of image sources generated for reflection order `order`: `(2 * order + 1)^2`.
pub fn image_source_count(order: u32) -> usize {
    let side = 2 * order as usize + 1;
    side * side
}

/// Position and axis flips of tile `(ix, iy)` in the method-of-images lattice.
///
/// Even tiles translate the source by whole canvas sizes; odd tiles reflect it first.
pub fn mirrored_position(origin: Point, canvas: Canvas, ix: i64, iy: i64) -> (Point, Vec2) {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let (fx, fy) = (ix as f64, iy as f64);
    let x_even = ix.rem_euclid(2) == 0;
    let y_even = iy.rem_euclid(2) == 0;

    let sx = if x_even {
        origin.x + fx * w
    } else {
        w - origin.x + fx * w
    };
    let sy = if y_even {
        origin.y + fy * h
    } else {
        h - origin.y + fy * h
    };
    let mirror = Vec2::new(
        if x_even { 1.0 } else { -1.0 },
        if y_even { 1.0 } else { -1.0 },
    );
    (Point::new(sx, sy), mirror)
}

/// Build the full image-source set for `origin`, drawing positions from `pool`.
///
/// Tiles are emitted with `ix` in the outer loop and `iy` in the inner loop, both over
/// `[-order, order]`.
pub fn generate_image_sources(
    origin: Point,
    canvas: Canvas,
    order: u32,
    pool: &mut VectorPool,
) -> Vec<ImageSource> {
    let r = i64::from(order);
    let mut out = Vec::with_capacity(image_source_count(order));
    for ix in -r..=r {
        for iy in -r..=r {
            let (p, mirror) = mirrored_position(origin, canvas, ix, iy);
            out.push(ImageSource {
                position: pool.acquire(p),
                scale_x: mirror.x,
                scale_y: mirror.y,
            });
        }
    }
    out
}

/// Return every position in `sources` to `pool`, leaving `sources` empty.
///
/// Returns how many points were handed back.
pub fn release_image_sources(sources: &mut Vec<ImageSource>, pool: &mut VectorPool) -> usize {
    let n = sources.len();
    for s in sources.drain(..) {
        pool.release(s.into_position());
    }
    n
}

#[cfg(test)]
#[path = "../../tests/unit/field/image_source.rs"]
mod tests;
