use std::fmt::Write as _;

use crate::{
    foundation::core::{Affine, BezPath, Rect, Rgba8},
    render::surface::{StrokeStyle, WaveSurface},
};

/// Vector surface that records strokes as SVG elements.
#[derive(Clone, Debug)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    defs: String,
    body: String,
    open_groups: usize,
    next_clip: usize,
    strokes: usize,
}

impl SvgSurface {
    /// Empty document of `width x height` user units.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            defs: String::new(),
            body: String::new(),
            open_groups: 0,
            next_clip: 0,
            strokes: 0,
        }
    }

    /// Paths recorded since the last clear.
    pub fn stroke_count(&self) -> usize {
        self.strokes
    }

    /// Close any open clip group and return the standalone document.
    pub fn finish(mut self) -> String {
        while self.open_groups > 0 {
            self.pop_clip();
        }
        let mut out = String::with_capacity(self.defs.len() + self.body.len() + 256);
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            out.push_str(&self.defs);
            out.push_str("</defs>\n");
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl WaveSurface for SvgSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, fill: Option<Rgba8>) {
        self.defs.clear();
        self.body.clear();
        self.open_groups = 0;
        self.strokes = 0;
        if let Some(c) = fill {
            let _ = writeln!(
                self.body,
                r#"<rect width="{}" height="{}" fill="{}"{}/>"#,
                self.width,
                self.height,
                c.to_hex_rgb(),
                opacity_attr("fill-opacity", c.a)
            );
        }
    }

    fn push_clip(&mut self, rect: Rect) {
        let id = self.next_clip;
        self.next_clip += 1;
        let _ = writeln!(
            self.defs,
            r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            num(rect.x0),
            num(rect.y0),
            num(rect.width()),
            num(rect.height())
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#clip{id})">"#);
        self.open_groups += 1;
    }

    fn pop_clip(&mut self) {
        if self.open_groups > 0 {
            self.body.push_str("</g>\n");
            self.open_groups -= 1;
        }
    }

    fn stroke_path(&mut self, path: &BezPath, transform: Affine, style: StrokeStyle) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        let _ = writeln!(
            self.body,
            r#"<path d="{}" transform="matrix({} {} {} {} {} {})" fill="none" stroke="{}"{} stroke-width="{}"/>"#,
            path.to_svg(),
            num(a),
            num(b),
            num(c),
            num(d),
            num(e),
            num(f),
            style.color.to_hex_rgb(),
            opacity_attr("stroke-opacity", style.color.a),
            num(style.width)
        );
        self.strokes += 1;
    }
}

fn opacity_attr(name: &str, a: u8) -> String {
    if a == 255 {
        String::new()
    } else {
        format!(r#" {name}="{}""#, num(f64::from(a) / 255.0))
    }
}

/// Shortest fixed-point rendering with at most four decimals.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_owned(),
        s => s.to_owned(),
    }
}
