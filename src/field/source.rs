use std::borrow::Cow;

use crate::{
    config::{
        palette::Palette,
        sim::SimConfig,
        wave::{SourceOverride, WaveTypeConfig},
    },
    field::{
        clock::sanitize_dt,
        decay::calc_alpha,
        image_source::{ImageSource, generate_image_sources, release_image_sources},
        pool::VectorPool,
    },
    foundation::{
        core::{Canvas, Point, Vec2},
        math::unit_to_u8_floor,
    },
    render::surface::{StrokeStyle, WaveSurface},
    shape::heart::{heart_outline, heart_transform, heart_visible},
};

/// Read-only field state a source needs to enumerate and draw its rings.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    /// Global configuration.
    pub config: &'a SimConfig,
    /// Stroke colors.
    pub palette: &'a Palette,
    /// Canvas used for culling.
    pub canvas: Canvas,
    /// Radius at which rings vanish (the canvas diagonal).
    pub max_radius: f64,
}

/// One ring that passed every culling test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    /// Index into `SimConfig::wave_types`.
    pub wave_type: usize,
    /// Index of the image source the ring is centered on.
    pub image_index: usize,
    /// Phase slot `i` in `[0, max_wave_count)`.
    pub wave_index: u32,
    /// Center in canvas coordinates.
    pub center: Point,
    /// Axis flips of the image source.
    pub mirror: Vec2,
    /// `speed * (local_time - i * interval)`.
    pub radius: f64,
    /// Heart size: `2 * radius * heart_size_scale`.
    pub size: f64,
    /// Opacity from the decay function.
    pub alpha: f64,
}

/// A single emission point and its mirrored copies.
#[derive(Debug)]
pub struct WaveSource {
    id: u64,
    position: Point,
    local_time: f64,
    image_sources: Vec<ImageSource>,
    overrides: Option<SourceOverride>,
}

impl WaveSource {
    /// New source at `local_time = 0` with its image sources drawn from `pool`.
    pub fn new(
        id: u64,
        position: Point,
        overrides: Option<SourceOverride>,
        canvas: Canvas,
        reflection_order: u32,
        pool: &mut VectorPool,
    ) -> Self {
        Self {
            id,
            position,
            local_time: 0.0,
            image_sources: generate_image_sources(position, canvas, reflection_order, pool),
            overrides,
        }
    }

    /// Identifier assigned by the field.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Trigger position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Seconds since birth, excluding paused time.
    pub fn local_time(&self) -> f64 {
        self.local_time
    }

    /// Current mirrored set.
    pub fn image_sources(&self) -> &[ImageSource] {
        &self.image_sources
    }

    /// Per-source overrides, if any.
    pub fn overrides(&self) -> Option<&SourceOverride> {
        self.overrides.as_ref()
    }

    /// Release the current image sources to `pool` and rebuild them for `canvas` and `order`.
    pub fn recompute_image_sources(&mut self, canvas: Canvas, order: u32, pool: &mut VectorPool) {
        release_image_sources(&mut self.image_sources, pool);
        self.image_sources = generate_image_sources(self.position, canvas, order, pool);
    }

    /// Advance the local clock.
    pub fn update(&mut self, dt: f64) {
        self.local_time += sanitize_dt(dt);
    }

    /// Wave type `index` with this source's overrides applied.
    pub fn wave_type<'a>(
        &self,
        index: usize,
        config: &'a SimConfig,
    ) -> Option<Cow<'a, WaveTypeConfig>> {
        let base = config.wave_types.get(index)?;
        Some(match &self.overrides {
            Some(o) => o.resolve(index, base),
            None => Cow::Borrowed(base),
        })
    }

    fn resolved_wave_types<'a>(
        &'a self,
        config: &'a SimConfig,
    ) -> impl Iterator<Item = (usize, Cow<'a, WaveTypeConfig>)> + 'a {
        (0..config.wave_types.len()).filter_map(move |i| self.wave_type(i, config).map(|w| (i, w)))
    }

    /// Call `f` for every visible ring of wave type `index`, resolved as `wave`.
    fn visit_wave_rings(
        &self,
        index: usize,
        wave: &WaveTypeConfig,
        view: &FieldView<'_>,
        f: &mut dyn FnMut(Ring),
    ) {
        for (image_index, s) in self.image_sources.iter().enumerate() {
            let center = s.position();
            for i in 0..wave.max_wave_count {
                let radius = wave.speed * (self.local_time - f64::from(i) * wave.interval);
                if radius < 0.0 || radius > view.max_radius {
                    continue;
                }
                let size = radius * 2.0 * wave.heart_size_scale;
                if view.config.enable_clipping && !heart_visible(center, size, view.canvas) {
                    continue;
                }
                let alpha = calc_alpha(wave.base_alpha, radius, view.max_radius, wave.decay_factor);
                if alpha < view.config.alpha_threshold {
                    continue;
                }
                f(Ring {
                    wave_type: index,
                    image_index,
                    wave_index: i,
                    center,
                    mirror: s.mirror(),
                    radius,
                    size,
                    alpha,
                });
            }
        }
    }

    /// Call `f` for every ring the display mode shows, wave types in config order.
    pub fn visit_rings(&self, view: &FieldView<'_>, mut f: impl FnMut(Ring)) {
        for (i, wave) in self.resolved_wave_types(view.config) {
            if view.config.wave_display_mode.shows(wave.role) {
                self.visit_wave_rings(i, &wave, view, &mut f);
            }
        }
    }

    /// Rings that would be drawn right now.
    pub fn rings(&self, view: &FieldView<'_>) -> Vec<Ring> {
        let mut out = Vec::new();
        self.visit_rings(view, |r| out.push(r));
        out
    }

    /// Draw every displayed wave type and return the number of rings stroked.
    pub fn draw_wave_layer<S: WaveSurface + ?Sized>(
        &self,
        view: &FieldView<'_>,
        surface: &mut S,
    ) -> usize {
        let mut total = 0;
        for (i, wave) in self.resolved_wave_types(view.config) {
            if view.config.wave_display_mode.shows(wave.role) {
                total += self.draw_wave(i, &wave, view, surface);
            }
        }
        total
    }

    /// Stroke the rings of one resolved wave type and return how many were drawn.
    pub fn draw_wave<S: WaveSurface + ?Sized>(
        &self,
        index: usize,
        wave: &WaveTypeConfig,
        view: &FieldView<'_>,
        surface: &mut S,
    ) -> usize {
        let base = view.palette.stroke_color(&wave.color_key);
        let mut drawn = 0;
        self.visit_wave_rings(index, wave, view, &mut |ring| {
            let style = StrokeStyle {
                width: wave.stroke_width,
                color: base.with_alpha(unit_to_u8_floor(ring.alpha)),
            };
            let transform = heart_transform(ring.center, ring.size, ring.mirror);
            surface.stroke_path(heart_outline(), transform, style);
            drawn += 1;
        });
        drawn
    }

    /// Whether the oldest ring of the slowest-cycling family is still above the threshold.
    ///
    /// Takes the maxima of interval, speed, decay and wave count over every wave type
    /// (displayed or not) and evaluates the decay at base alpha 1.
    pub fn is_alive(&self, config: &SimConfig, max_radius: f64) -> bool {
        let mut max_interval = 0.0_f64;
        let mut max_speed = 0.0_f64;
        let mut max_decay = 0.0_f64;
        let mut max_waves = 0_u32;
        for (_, w) in self.resolved_wave_types(config) {
            max_interval = max_interval.max(w.interval);
            max_speed = max_speed.max(w.speed);
            max_decay = max_decay.max(w.decay_factor);
            max_waves = max_waves.max(w.max_wave_count);
        }

        let oldest = self.local_time - f64::from(max_waves.saturating_sub(1)) * max_interval;
        if oldest < 0.0 {
            return true;
        }
        calc_alpha(1.0, max_speed * oldest, max_radius, max_decay) > config.alpha_threshold
    }

    /// Return every image-source point to `pool`. Returns the number of points released.
    pub fn destroy(mut self, pool: &mut VectorPool) -> usize {
        release_image_sources(&mut self.image_sources, pool)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/source.rs"]
mod tests;
