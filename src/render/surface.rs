use crate::foundation::{
    core::{Affine, BezPath, Rect, Rgba8},
    error::{HeartwaveError, HeartwaveResult},
};

/// CPU-readable RGBA8 frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Whether `data` holds premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Frame filled with one premultiplied color.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> Self {
        let len = width as usize * height as usize;
        let mut data = Vec::with_capacity(len * 4);
        for _ in 0..len {
            data.extend_from_slice(&premul);
        }
        Self {
            width,
            height,
            data,
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy with straight alpha, as PNG encoders expect.
    pub fn to_straight_rgba8(&self) -> HeartwaveResult<Vec<u8>> {
        if self.data.len() != self.width as usize * self.height as usize * 4 {
            return Err(HeartwaveError::render("frame data length mismatch"));
        }
        if !self.premultiplied {
            return Ok(self.data.clone());
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Ok(out)
    }
}

/// Stroke parameters for one ring.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Width in the path's local units (scaled by the transform).
    pub width: f64,
    /// Stroke color, straight alpha.
    pub color: Rgba8,
}

/// Target layer the wave field draws into.
///
/// Implementations know nothing about the simulation: they receive a fixed outline, a
/// transform and a stroke per ring.
pub trait WaveSurface {
    /// `(width, height)` in pixels.
    fn size(&self) -> (u32, u32);

    /// Erase everything drawn so far; paint `fill` when given, else leave transparent.
    fn clear(&mut self, fill: Option<Rgba8>);

    /// Restrict subsequent strokes to `rect` until the matching [`WaveSurface::pop_clip`].
    fn push_clip(&mut self, rect: Rect);

    /// Undo the most recent [`WaveSurface::push_clip`]; a no-op with no clip active.
    fn pop_clip(&mut self);

    /// Stroke `path` (in local units) mapped to the surface by `transform`.
    fn stroke_path(&mut self, path: &BezPath, transform: Affine, style: StrokeStyle);
}
