use std::path::Path;

use crate::{
    encode::{
        ffmpeg::{FfmpegSink, FfmpegSinkOpts},
        png::write_png,
        sink::{FrameSink, SinkConfig},
    },
    field::manager::{FrameStats, WaveField},
    foundation::{
        core::{Affine, BezPath, Fps, FrameIndex, FrameRange, Rect, Rgba8},
        error::{HeartwaveError, HeartwaveResult},
    },
    render::{
        cpu::CpuCompositor,
        surface::{FrameRGBA, StrokeStyle, WaveSurface},
        svg::SvgSurface,
    },
    scene::model::Scene,
};

/// One composited frame and the field counters that produced it.
#[derive(Clone, Debug)]
pub struct RenderedFrame {
    /// Visible canvas, premultiplied.
    pub frame: FrameRGBA,
    /// Counters of the tick that drew the frame.
    pub stats: FrameStats,
    /// Simulation time after the tick.
    pub time: f64,
}

/// Totals over a rendered range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames handed to the consumer.
    pub frames: u64,
    /// Rings stroked across those frames.
    pub waves_drawn: u64,
    /// Largest live source count seen.
    pub peak_sources: usize,
}

impl RenderStats {
    fn record(&mut self, s: FrameStats) {
        self.frames += 1;
        self.waves_drawn += s.waves_drawn as u64;
        self.peak_sources = self.peak_sources.max(s.source_count);
    }
}

/// Surface for ticks whose output is never looked at.
struct DiscardSurface;

impl WaveSurface for DiscardSurface {
    fn size(&self) -> (u32, u32) {
        (0, 0)
    }
    fn clear(&mut self, _fill: Option<Rgba8>) {}
    fn push_clip(&mut self, _rect: Rect) {}
    fn pop_clip(&mut self) {}
    fn stroke_path(&mut self, _path: &BezPath, _transform: Affine, _style: StrokeStyle) {}
}

/// Frames covering the scene's sequence: `[0, ceil(duration * fps))`, at least one frame.
pub fn scene_frame_range(scene: &Scene, fps: Fps) -> FrameRange {
    let end = fps.secs_to_frames_ceil(scene.duration_secs()).max(1);
    FrameRange {
        start: FrameIndex(0),
        end: FrameIndex(end),
    }
}

/// Tick `field` from `t = 0` to `time` at `fps`, sending only the last tick to `layer`.
///
/// The first tick has `dt = 0` so events scheduled at `t = 0` fire on frame 0; a trailing
/// partial frame is stepped so the field clock ends exactly on `time`.
fn advance_to<S: WaveSurface + ?Sized>(
    field: &mut WaveField,
    time: f64,
    fps: Fps,
    layer: &mut S,
) -> HeartwaveResult<FrameStats> {
    if !time.is_finite() || time < 0.0 {
        return Err(HeartwaveError::validation(format!(
            "render time must be finite and >= 0, got {time}"
        )));
    }
    let dt = fps.frame_duration_secs();
    let whole = fps.secs_to_frames_floor(time);
    let rem = time - fps.frames_to_secs(whole);
    let rem = (rem > 1e-9).then_some(rem);

    let steps = whole + u64::from(rem.is_some());
    if steps == 0 {
        return Ok(field.tick(0.0, layer));
    }
    let mut discard = DiscardSurface;
    field.tick(0.0, &mut discard);
    for _ in 1..steps {
        field.tick(dt, &mut discard);
    }
    Ok(field.tick(rem.unwrap_or(dt), layer))
}

/// Play `scene` from the start and rasterize the visible canvas at `time` seconds.
#[tracing::instrument(skip(scene), fields(w = scene.canvas.width, h = scene.canvas.height))]
pub fn render_frame_at(scene: &Scene, time: f64, fps: Fps) -> HeartwaveResult<RenderedFrame> {
    let mut field = scene.build_field()?;
    let mut compositor = CpuCompositor::new(scene.canvas.width, scene.canvas.height)?;
    let stats = advance_to(&mut field, time, fps, compositor.layer_mut())?;
    let frame = compositor.compose(field.palette().background(), field.is_paused())?;
    Ok(RenderedFrame {
        frame,
        stats,
        time: field.time(),
    })
}

/// Play `scene` from the start and record the wave layer at `time` seconds as SVG.
#[tracing::instrument(skip(scene))]
pub fn export_svg_at(scene: &Scene, time: f64, fps: Fps) -> HeartwaveResult<String> {
    let mut field = scene.build_field()?;
    let mut svg = SvgSurface::new(scene.canvas.width, scene.canvas.height);
    advance_to(&mut field, time, fps, &mut svg)?;
    Ok(svg.finish())
}

/// Snapshot the live sources of `field` as SVG without advancing time.
pub fn export_svg(field: &WaveField) -> String {
    let canvas = field.canvas();
    let mut svg = SvgSurface::new(canvas.width, canvas.height);
    field.erase_layer(&mut svg);
    field.draw_wave_layer(&mut svg);
    svg.finish()
}

/// Play `scene` from frame 0 and hand every frame of `range` to `on_frame`.
///
/// Frames before `range.start` are simulated without rasterizing.
fn drive(
    scene: &Scene,
    range: FrameRange,
    fps: Fps,
    mut on_frame: impl FnMut(FrameIndex, RenderedFrame) -> HeartwaveResult<()>,
) -> HeartwaveResult<RenderStats> {
    let mut field = scene.build_field()?;
    let mut compositor = CpuCompositor::new(scene.canvas.width, scene.canvas.height)?;
    let mut discard = DiscardSurface;
    let dt = fps.frame_duration_secs();
    let mut totals = RenderStats::default();

    for idx in 0..range.end.0 {
        let delta = if idx == 0 { 0.0 } else { dt };
        if idx < range.start.0 {
            field.tick(delta, &mut discard);
            continue;
        }
        let stats = field.tick(delta, compositor.layer_mut());
        let frame = compositor.compose(field.palette().background(), field.is_paused())?;
        totals.record(stats);
        on_frame(
            FrameIndex(idx),
            RenderedFrame {
                frame,
                stats,
                time: field.time(),
            },
        )?;
    }
    Ok(totals)
}

/// Render every frame of `range`.
pub fn render_frames(
    scene: &Scene,
    range: FrameRange,
    fps: Fps,
) -> HeartwaveResult<Vec<RenderedFrame>> {
    let mut out = Vec::with_capacity(range.len_frames() as usize);
    drive(scene, range, fps, |_, f| {
        out.push(f);
        Ok(())
    })?;
    Ok(out)
}

/// Render `range` into `sink`, bracketing it with `begin` / `end`.
#[tracing::instrument(skip(scene, sink), fields(start = range.start.0, end = range.end.0))]
pub fn render_range_to_sink(
    scene: &Scene,
    range: FrameRange,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> HeartwaveResult<RenderStats> {
    sink.begin(SinkConfig {
        width: scene.canvas.width,
        height: scene.canvas.height,
        fps,
    })?;
    let rendered = drive(scene, range, fps, |idx, f| sink.push_frame(idx, &f.frame));
    let ended = sink.end();
    let stats = rendered?;
    ended?;
    tracing::debug!(frames = stats.frames, waves = stats.waves_drawn, "range rendered");
    Ok(stats)
}

/// Encode the scene's whole sequence to MP4 through the system `ffmpeg`.
pub fn render_to_mp4(
    scene: &Scene,
    fps: Fps,
    mut opts: FfmpegSinkOpts,
) -> HeartwaveResult<RenderStats> {
    opts.background = scene.palette.background();
    let mut sink = FfmpegSink::new(opts);
    render_range_to_sink(scene, scene_frame_range(scene, fps), fps, &mut sink)
}

/// Render the frame at `time` and write it to `path` as PNG.
pub fn render_png_at(scene: &Scene, time: f64, fps: Fps, path: &Path) -> HeartwaveResult<FrameStats> {
    let rendered = render_frame_at(scene, time, fps)?;
    write_png(&rendered.frame, path)?;
    Ok(rendered.stats)
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
