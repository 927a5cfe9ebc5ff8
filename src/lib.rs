//! Heartwave renders fields of heart-shaped waves that expand, fade, and reflect off the canvas
//! edges.
//!
//! Each trigger starts a [`WaveSource`]. Reflections are modeled with mirrored image sources, and
//! every frame the [`WaveField`] ages, draws and prunes its sources onto a [`WaveSurface`]:
//!
//! - Load a [`Scene`] (canvas, [`SimConfig`], [`Palette`], optional [`Sequence`])
//! - Build a [`WaveField`] and `tick` it into a [`CpuCompositor`] layer or an [`SvgSurface`]
//! - Or use the one-shot helpers: [`render_frame_at`], [`render_frames`], [`render_to_mp4`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod config;
pub(crate) mod encode;
pub(crate) mod field;
pub(crate) mod pipeline;
pub(crate) mod render;
pub(crate) mod scene;
pub(crate) mod shape;

pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{HeartwaveError, HeartwaveResult};

pub use crate::config::palette::{BG_KEY, Palette, STROKE_KEY, STROKE2_KEY, parse_hex_color};
pub use crate::config::presets::{Preset, PresetWave, find_preset, presets};
pub use crate::config::sim::{SimConfig, WaveDisplayMode};
pub use crate::config::wave::{SourceOverride, WaveRole, WaveTypeConfig, WaveTypeOverride};

pub use crate::field::clock::SimClock;
pub use crate::field::decay::{DEFAULT_ALPHA_THRESHOLD, calc_alpha};
pub use crate::field::image_source::{
    ImageSource, generate_image_sources, image_source_count, mirrored_position,
    release_image_sources,
};
pub use crate::field::manager::{FrameStats, WaveField};
pub use crate::field::pool::{DEFAULT_POOL_CAPACITY, PooledPoint, VectorPool, VectorPoolStats};
pub use crate::field::sequence::{Sequence, SequenceEvent, SequencePlayer};
pub use crate::field::source::{FieldView, Ring, WaveSource};

pub use crate::shape::heart::{
    HEART_ANCHOR, HEART_UNIT_SIZE, build_heart_outline, heart_bounds, heart_outline,
    heart_transform, heart_visible, placed_heart,
};

pub use crate::render::composite::{PremulRgba8, over, over_in_place};
pub use crate::render::cpu::{CpuCompositor, CpuLayer, PAUSE_OVERLAY};
pub use crate::render::surface::{FrameRGBA, StrokeStyle, WaveSurface};
pub use crate::render::svg::SvgSurface;

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::png::write_png;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};

pub use crate::pipeline::{
    RenderStats, RenderedFrame, export_svg, export_svg_at, render_frame_at, render_frames,
    render_png_at, render_range_to_sink, render_to_mp4, scene_frame_range,
};
pub use crate::scene::model::Scene;
