use crate::foundation::error::{HeartwaveError, HeartwaveResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Zero-based output frame number.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Half-open frame range `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// First frame (inclusive).
    pub start: FrameIndex,
    /// Last frame (exclusive).
    pub end: FrameIndex,
}

impl FrameRange {
    /// Build a range, rejecting `start > end`.
    pub fn new(start: FrameIndex, end: FrameIndex) -> HeartwaveResult<Self> {
        if start.0 > end.0 {
            return Err(HeartwaveError::validation("FrameRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }

    /// `true` when the range covers no frame.
    pub fn is_empty(self) -> bool {
        self.start.0 == self.end.0
    }

    /// `true` when `f` lies inside the range.
    pub fn contains(self, f: FrameIndex) -> bool {
        self.start.0 <= f.0 && f.0 < self.end.0
    }
}

/// Rational frame rate used to turn frame numbers into simulation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> HeartwaveResult<Self> {
        if den == 0 {
            return Err(HeartwaveError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(HeartwaveError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Seconds between two consecutive frames.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Timestamp of frame `frames`.
    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * self.frame_duration_secs()
    }

    /// Last frame whose timestamp is `<= secs`.
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// First frame whose timestamp is `>= secs`.
    pub fn secs_to_frames_ceil(self, secs: f64) -> u64 {
        (secs * self.as_f64()).ceil().max(0.0) as u64
    }
}

/// Drawing area in pixels. Runtime-mutable through [`crate::WaveField::resize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Build a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> HeartwaveResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    /// Reject zero dimensions.
    pub fn validate(self) -> HeartwaveResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(HeartwaveError::validation(format!(
                "canvas must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Width as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Length of the diagonal; the largest radius a wave ring may reach.
    pub fn diagonal(self) -> f64 {
        self.width_f64().hypot(self.height_f64())
    }

    /// `[0, width] x [0, height]`.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }

    /// Inclusive containment test (points on the border are inside).
    pub fn contains(self, p: Point) -> bool {
        p.x >= 0.0 && p.x <= self.width_f64() && p.y >= 0.0 && p.y <= self.height_f64()
    }
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent black.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Same color with a replaced alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `#rrggbbaa`: the color with its alpha appended as a two-digit hex suffix.
    pub fn to_hex(self) -> String {
        format!("{}{:02x}", self.to_hex_rgb(), self.a)
    }

    /// Premultiplied `[r, g, b, a]`.
    pub fn to_premul(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
