use crate::{
    foundation::{
        core::{Affine, BezPath, Point, Rect, Rgba8},
        error::{HeartwaveError, HeartwaveResult},
    },
    render::{
        composite::{over_in_place, tint_in_place},
        surface::{FrameRGBA, StrokeStyle, WaveSurface},
    },
};

/// Straight-alpha color of the dimming overlay drawn over paused frames.
pub const PAUSE_OVERLAY: Rgba8 = Rgba8 {
    r: 0,
    g: 0,
    b: 0,
    a: 100,
};

/// Offscreen wave layer rasterized with vello_cpu.
///
/// Strokes are recorded into a render context and rasterized by [`CpuLayer::finish`].
pub struct CpuLayer {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    clip_depth: usize,
}

impl std::fmt::Debug for CpuLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuLayer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clip_depth", &self.clip_depth)
            .finish_non_exhaustive()
    }
}

impl CpuLayer {
    /// Transparent layer of `width x height` pixels (each at most `u16::MAX`).
    pub fn new(width: u32, height: u32) -> HeartwaveResult<Self> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| HeartwaveError::render("layer width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| HeartwaveError::render("layer height exceeds u16"))?;
        if width_u16 == 0 || height_u16 == 0 {
            return Err(HeartwaveError::render("layer must be non-empty"));
        }
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
            clip_depth: 0,
        })
    }

    /// Rasterize everything drawn since the last clear into a premultiplied frame.
    ///
    /// Clips still open are closed first.
    pub fn finish(&mut self) -> FrameRGBA {
        while self.clip_depth > 0 {
            self.pop_clip();
        }
        self.ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

impl WaveSurface for CpuLayer {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn clear(&mut self, fill: Option<Rgba8>) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
        self.clip_depth = 0;
        if let Some(c) = fill {
            self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            self.ctx.set_paint(color_to_cpu(c));
            self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(self.width),
                f64::from(self.height),
            ));
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        let mut path = vello_cpu::kurbo::BezPath::new();
        path.move_to(point_to_cpu(Point::new(rect.x0, rect.y0)));
        path.line_to(point_to_cpu(Point::new(rect.x1, rect.y0)));
        path.line_to(point_to_cpu(Point::new(rect.x1, rect.y1)));
        path.line_to(point_to_cpu(Point::new(rect.x0, rect.y1)));
        path.close_path();
        self.ctx.push_clip_layer(&path);
        self.clip_depth += 1;
    }

    fn pop_clip(&mut self) {
        if self.clip_depth > 0 {
            self.ctx.pop_layer();
            self.clip_depth -= 1;
        }
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, style: StrokeStyle) {
        // Zero-size rings collapse the transform.
        let det = transform.determinant();
        if !det.is_finite() || det.abs() < 1e-12 || style.width.is_nan() || style.width <= 0.0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_stroke(vello_cpu::kurbo::Stroke::new(style.width));
        self.ctx.set_paint(color_to_cpu(style.color));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }
}

/// Offscreen wave layer plus the visible frame it is composited onto.
#[derive(Debug)]
pub struct CpuCompositor {
    layer: CpuLayer,
}

impl CpuCompositor {
    /// Compositor for a `width x height` canvas.
    pub fn new(width: u32, height: u32) -> HeartwaveResult<Self> {
        Ok(Self {
            layer: CpuLayer::new(width, height)?,
        })
    }

    /// The wave layer the field draws into.
    pub fn layer_mut(&mut self) -> &mut CpuLayer {
        &mut self.layer
    }

    /// Replace the wave layer after a canvas resize.
    pub fn resize(&mut self, width: u32, height: u32) -> HeartwaveResult<()> {
        self.layer = CpuLayer::new(width, height)?;
        Ok(())
    }

    /// Fill the visible frame with `background`, then composite the wave layer over it.
    ///
    /// Paused frames get a translucent dark overlay.
    pub fn compose(&mut self, background: Rgba8, paused: bool) -> HeartwaveResult<FrameRGBA> {
        let layer = self.layer.finish();
        let mut visible = FrameRGBA::solid(layer.width, layer.height, background.to_premul());
        over_in_place(&mut visible.data, &layer.data, 1.0)?;
        if paused {
            tint_in_place(&mut visible.data, PAUSE_OVERLAY.to_premul());
        }
        Ok(visible)
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
