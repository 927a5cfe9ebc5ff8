use crate::{
    config::{palette::Palette, presets::find_preset, sim::SimConfig, wave::SourceOverride},
    field::{
        clock::SimClock,
        pool::{VectorPool, VectorPoolStats},
        sequence::{Sequence, SequencePlayer},
        source::{FieldView, WaveSource},
    },
    foundation::{
        core::{Canvas, Point},
        error::{HeartwaveError, HeartwaveResult},
    },
    render::surface::WaveSurface,
};

/// Per-frame counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Rings stroked during the last draw.
    pub waves_drawn: usize,
    /// Live sources after pruning.
    pub source_count: usize,
}

/// The whole simulation: live sources, their shared pool, the clock and an optional
/// sequence player.
///
/// Index 0 of the source list is the most recent trigger.
#[derive(Debug)]
pub struct WaveField {
    config: SimConfig,
    palette: Palette,
    defaults: (SimConfig, Palette),
    canvas: Canvas,
    max_radius: f64,
    sources: Vec<WaveSource>,
    pool: VectorPool,
    clock: SimClock,
    sequence: Option<SequencePlayer>,
    stats: FrameStats,
    next_id: u64,
}

impl WaveField {
    /// Field with no sources. `config` and `palette` become the targets of [`WaveField::reset`].
    pub fn new(config: SimConfig, palette: Palette, canvas: Canvas) -> HeartwaveResult<Self> {
        config.validate()?;
        palette.validate()?;
        canvas.validate()?;
        warn_missing_colors(&config, &palette);
        Ok(Self {
            pool: VectorPool::new(config.pool_capacity),
            defaults: (config.clone(), palette.clone()),
            config,
            palette,
            canvas,
            max_radius: canvas.diagonal(),
            sources: Vec::new(),
            clock: SimClock::new(),
            sequence: None,
            stats: FrameStats::default(),
            next_id: 0,
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Current palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Current canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Radius at which rings vanish: the canvas diagonal.
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    /// Live sources, newest first.
    pub fn sources(&self) -> &[WaveSource] {
        &self.sources
    }

    /// Global simulation time.
    pub fn time(&self) -> f64 {
        self.clock.elapsed()
    }

    /// `true` while frozen.
    pub fn is_paused(&self) -> bool {
        self.clock.is_paused()
    }

    /// Counters from the most recent frame.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Pool traffic counters.
    pub fn pool_stats(&self) -> VectorPoolStats {
        self.pool.stats()
    }

    /// Running sequence, if any.
    pub fn sequence(&self) -> Option<&SequencePlayer> {
        self.sequence.as_ref()
    }

    /// Borrowed view used by sources to enumerate rings.
    pub fn view(&self) -> FieldView<'_> {
        FieldView {
            config: &self.config,
            palette: &self.palette,
            canvas: self.canvas,
            max_radius: self.max_radius,
        }
    }

    /// Start a new source at `(x, y)`.
    ///
    /// Positions outside the canvas (borders included as inside) and triggers beyond
    /// `max_concurrent_sources` are dropped. Returns the new source's id.
    pub fn trigger(&mut self, x: f64, y: f64, overrides: Option<SourceOverride>) -> Option<u64> {
        let position = Point::new(x, y);
        if !self.canvas.contains(position) {
            tracing::trace!(x, y, "trigger outside canvas ignored");
            return None;
        }
        if self.sources.len() >= self.config.max_concurrent_sources {
            tracing::trace!(
                x,
                y,
                cap = self.config.max_concurrent_sources,
                "trigger over source cap dropped"
            );
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        let source = WaveSource::new(
            id,
            position,
            overrides,
            self.canvas,
            self.config.max_reflection_order,
            &mut self.pool,
        );
        self.sources.insert(0, source);
        tracing::debug!(id, x, y, live = self.sources.len(), "wave source started");
        Some(id)
    }

    /// Advance one frame and redraw the wave layer.
    ///
    /// Steps the clock (0 while paused) and the sequence player, erases `layer`, then updates,
    /// draws and prunes sources from oldest to newest inside a canvas-sized clip.
    #[tracing::instrument(level = "trace", skip(self, layer), fields(t = self.clock.elapsed()))]
    pub fn tick<S: WaveSurface + ?Sized>(&mut self, frame_delta: f64, layer: &mut S) -> FrameStats {
        let dt = self.clock.advance(frame_delta);
        self.advance_sequence(dt);

        self.erase_layer(layer);
        layer.push_clip(self.canvas.bounds());

        let mut waves_drawn = 0;
        for i in (0..self.sources.len()).rev() {
            self.sources[i].update(dt);
            let view = FieldView {
                config: &self.config,
                palette: &self.palette,
                canvas: self.canvas,
                max_radius: self.max_radius,
            };
            waves_drawn += self.sources[i].draw_wave_layer(&view, layer);
            if !self.sources[i].is_alive(&self.config, self.max_radius) {
                let source = self.sources.remove(i);
                let id = source.id();
                let released = source.destroy(&mut self.pool);
                tracing::debug!(id, released, "wave source expired");
            }
        }

        layer.pop_clip();
        self.stats = FrameStats {
            waves_drawn,
            source_count: self.sources.len(),
        };
        self.stats
    }

    fn advance_sequence(&mut self, dt: f64) {
        let Some(player) = self.sequence.as_mut() else {
            return;
        };
        let due = player.advance(dt);
        let finished = player.is_finished();
        for e in due {
            tracing::debug!(time = e.time, x = e.x, y = e.y, "sequence event");
            self.trigger(e.x, e.y, e.overrides);
        }
        if finished {
            tracing::debug!("sequence finished");
            self.sequence = None;
        }
    }

    /// Paint the background when persisting it, otherwise clear to transparent.
    pub fn erase_layer<S: WaveSurface + ?Sized>(&self, layer: &mut S) {
        let fill = self
            .config
            .persist_background
            .then(|| self.palette.background());
        layer.clear(fill);
    }

    /// Draw every live source oldest-first without advancing time. Used for export.
    pub fn draw_wave_layer<S: WaveSurface + ?Sized>(&self, layer: &mut S) -> usize {
        let view = self.view();
        layer.push_clip(self.canvas.bounds());
        let drawn: usize = self
            .sources
            .iter()
            .rev()
            .map(|s| s.draw_wave_layer(&view, layer))
            .sum();
        layer.pop_clip();
        drawn
    }

    /// Change the canvas size; image sources and the field radius follow.
    pub fn resize(&mut self, width: u32, height: u32) -> HeartwaveResult<()> {
        let canvas = Canvas::new(width, height)?;
        self.canvas = canvas;
        self.max_radius = canvas.diagonal();
        self.recompute_all();
        tracing::debug!(width, height, "canvas resized");
        Ok(())
    }

    fn recompute_all(&mut self) {
        let order = self.config.max_reflection_order;
        for s in &mut self.sources {
            s.recompute_image_sources(self.canvas, order, &mut self.pool);
        }
    }

    /// Replace the configuration, rebuilding image sources when the reflection order changes.
    pub fn set_config(&mut self, config: SimConfig) -> HeartwaveResult<()> {
        config.validate()?;
        let reorder = config.max_reflection_order != self.config.max_reflection_order;
        warn_missing_colors(&config, &self.palette);
        if config.pool_capacity != self.pool.capacity() {
            self.pool.set_capacity(config.pool_capacity);
        }
        self.config = config;
        if reorder {
            self.recompute_all();
        }
        Ok(())
    }

    /// Edit a copy of the configuration and apply it with [`WaveField::set_config`].
    pub fn update_config(&mut self, edit: impl FnOnce(&mut SimConfig)) -> HeartwaveResult<()> {
        let mut next = self.config.clone();
        edit(&mut next);
        self.set_config(next)
    }

    /// Replace the palette.
    pub fn set_palette(&mut self, palette: Palette) -> HeartwaveResult<()> {
        palette.validate()?;
        warn_missing_colors(&self.config, &palette);
        self.palette = palette;
        Ok(())
    }

    /// Apply a built-in preset by name.
    pub fn apply_preset(&mut self, name: &str) -> HeartwaveResult<()> {
        let preset = find_preset(name)
            .ok_or_else(|| HeartwaveError::validation(format!("unknown preset \"{name}\"")))?;
        self.update_config(|c| preset.apply(c))
    }

    /// Freeze or resume the clock.
    pub fn set_paused(&mut self, paused: bool) {
        self.clock.set_paused(paused);
    }

    /// Flip the pause state and return the new one.
    pub fn toggle_pause(&mut self) -> bool {
        let paused = !self.clock.is_paused();
        self.clock.set_paused(paused);
        paused
    }

    /// Start `sequence`, replacing any running one. Events at `t = 0` fire on the next tick.
    pub fn play_sequence(&mut self, sequence: Sequence) -> HeartwaveResult<()> {
        sequence.validate()?;
        tracing::debug!(
            events = sequence.events.len(),
            duration = sequence.duration,
            "sequence started"
        );
        self.sequence = Some(SequencePlayer::new(sequence));
        Ok(())
    }

    /// Halt the running sequence, if any.
    pub fn stop_sequence(&mut self) {
        self.sequence = None;
    }

    /// Destroy every source, halt the sequence and erase `layer` when given.
    pub fn clear(&mut self, layer: Option<&mut dyn WaveSurface>) {
        self.stop_sequence();
        for s in self.sources.drain(..) {
            s.destroy(&mut self.pool);
        }
        self.stats = FrameStats::default();
        if let Some(layer) = layer {
            self.erase_layer(layer);
        }
    }

    /// Clear, rewind the clock to 0 unpaused, and restore the construction-time config and
    /// palette.
    pub fn reset(&mut self, layer: Option<&mut dyn WaveSurface>) {
        self.stop_sequence();
        for s in self.sources.drain(..) {
            s.destroy(&mut self.pool);
        }
        self.clock.reset();
        let (config, palette) = self.defaults.clone();
        self.pool.set_capacity(config.pool_capacity);
        self.config = config;
        self.palette = palette;
        self.stats = FrameStats::default();
        if let Some(layer) = layer {
            self.erase_layer(layer);
        }
    }
}

/// Warn once per configuration change about wave colors the palette cannot supply.
fn warn_missing_colors(config: &SimConfig, palette: &Palette) -> usize {
    let missing = palette.missing_keys(config.wave_types.iter().map(|w| w.color_key.as_str()));
    for key in &missing {
        tracing::warn!(key, "palette has no usable color; strokes use the default color");
    }
    missing.len()
}

#[cfg(test)]
#[path = "../../tests/unit/field/manager.rs"]
mod tests;
