use super::*;
use crate::{
    config::{sim::WaveDisplayMode, wave::WaveTypeOverride},
    field::sequence::SequenceEvent,
    foundation::core::{Affine, BezPath, Rect, Rgba8},
    render::surface::StrokeStyle,
};

#[derive(Default)]
struct Recorder {
    clears: Vec<Option<Rgba8>>,
    clip_depth: i32,
    max_clip_depth: i32,
    strokes: usize,
}

impl WaveSurface for Recorder {
    fn size(&self) -> (u32, u32) {
        (0, 0)
    }
    fn clear(&mut self, fill: Option<Rgba8>) {
        self.clears.push(fill);
    }
    fn push_clip(&mut self, _rect: Rect) {
        self.clip_depth += 1;
        self.max_clip_depth = self.max_clip_depth.max(self.clip_depth);
    }
    fn pop_clip(&mut self) {
        self.clip_depth -= 1;
    }
    fn stroke_path(&mut self, _path: &BezPath, _transform: Affine, _style: StrokeStyle) {
        self.strokes += 1;
    }
}

fn field() -> WaveField {
    WaveField::new(
        SimConfig::default(),
        Palette::default(),
        Canvas::new(300, 400).unwrap(),
    )
    .unwrap()
}

#[test]
fn new_rejects_invalid_inputs() {
    let bad = SimConfig {
        wave_types: Vec::new(),
        ..SimConfig::default()
    };
    assert!(WaveField::new(bad, Palette::default(), Canvas { width: 10, height: 10 }).is_err());
    assert!(
        WaveField::new(
            SimConfig::default(),
            Palette::default(),
            Canvas { width: 0, height: 10 }
        )
        .is_err()
    );
}

#[test]
fn triggers_are_bounded_by_canvas_and_cap() {
    let mut f = field();
    assert!(f.trigger(-1.0, 10.0, None).is_none());
    assert!(f.trigger(10.0, 400.5, None).is_none());
    assert!(f.trigger(300.0, 400.0, None).is_some());
    assert!(f.trigger(0.0, 0.0, None).is_some());
    for _ in 0..3 {
        assert!(f.trigger(150.0, 200.0, None).is_some());
    }
    assert_eq!(f.sources().len(), 5);
    assert!(f.trigger(150.0, 200.0, None).is_none());
    assert_eq!(f.sources().len(), 5);
}

#[test]
fn newest_source_is_first() {
    let mut f = field();
    let a = f.trigger(10.0, 10.0, None).unwrap();
    let b = f.trigger(20.0, 20.0, None).unwrap();
    assert_eq!(f.sources()[0].id(), b);
    assert_eq!(f.sources()[1].id(), a);
}

#[test]
fn tick_erases_clips_and_counts() {
    let mut f = field();
    f.trigger(150.0, 200.0, None);
    let mut layer = Recorder::default();
    let stats = f.tick(0.5, &mut layer);

    assert_eq!(layer.clears, vec![Some(Rgba8::opaque(255, 255, 255))]);
    assert_eq!(layer.clip_depth, 0);
    assert_eq!(layer.max_clip_depth, 1);
    assert!(stats.waves_drawn > 0);
    assert_eq!(stats.waves_drawn, layer.strokes);
    assert_eq!(stats.source_count, 1);
    assert_eq!(f.stats(), stats);
}

#[test]
fn transparent_layer_when_background_is_not_persisted() {
    let config = SimConfig {
        persist_background: false,
        ..SimConfig::default()
    };
    let mut f = WaveField::new(config, Palette::default(), Canvas::new(10, 10).unwrap()).unwrap();
    let mut layer = Recorder::default();
    f.tick(0.1, &mut layer);
    assert_eq!(layer.clears, vec![None]);
}

#[test]
fn expired_sources_return_their_points() {
    let mut f = field();
    f.trigger(150.0, 200.0, None);
    let mut layer = Recorder::default();
    f.tick(0.1, &mut layer);
    assert_eq!(f.pool_stats().outstanding, 25);

    for _ in 0..200 {
        f.tick(0.25, &mut layer);
    }
    assert!(f.sources().is_empty());
    assert_eq!(f.stats().source_count, 0);
    assert_eq!(f.pool_stats().outstanding, 0);
    assert_eq!(f.pool_stats().retained, 25);
}

#[test]
fn pause_freezes_time_and_liveness() {
    let mut f = field();
    f.trigger(150.0, 200.0, None);
    let mut layer = Recorder::default();
    f.tick(1.0, &mut layer);
    let before = f.sources()[0].local_time();

    f.set_paused(true);
    for _ in 0..1000 {
        f.tick(1.0, &mut layer);
    }
    assert_eq!(f.sources().len(), 1);
    assert_eq!(f.sources()[0].local_time(), before);
    assert_eq!(f.time(), 1.0);

    assert!(!f.toggle_pause());
    f.tick(0.5, &mut layer);
    assert_eq!(f.sources()[0].local_time(), before + 0.5);
}

#[test]
fn resize_recomputes_images_and_radius() {
    let mut f = field();
    f.trigger(100.0, 50.0, None);
    f.resize(200, 100).unwrap();

    assert_eq!(f.max_radius(), 200.0_f64.hypot(100.0));
    let s = &f.sources()[0];
    assert_eq!(s.image_sources().len(), 25);
    // ix = -2, iy = -1
    assert_eq!(s.image_sources()[1].position(), Point::new(100.0 - 400.0, 100.0 - 50.0 - 100.0));
    assert_eq!(f.pool_stats().outstanding, 25);
    assert!(f.resize(0, 10).is_err());
}

#[test]
fn reflection_order_change_rebuilds_sources() {
    let mut f = field();
    f.trigger(100.0, 50.0, None);
    f.update_config(|c| c.max_reflection_order = 1).unwrap();
    assert_eq!(f.sources()[0].image_sources().len(), 9);
    assert_eq!(f.pool_stats().outstanding, 9);

    f.update_config(|c| c.wave_display_mode = WaveDisplayMode::Primary).unwrap();
    assert_eq!(f.pool_stats().reused, 9);
    assert!(f.update_config(|c| c.wave_types.clear()).is_err());
    assert_eq!(f.config().max_reflection_order, 1);
}

#[test]
fn presets_apply_by_name() {
    let mut f = field();
    f.apply_preset("vital-echo").unwrap();
    assert_eq!(f.config().wave_types[0].speed, 120.0);
    assert_eq!(f.config().max_reflection_order, 1);
    assert!(f.apply_preset("missing").is_err());
}

#[test]
fn sequence_events_trigger_sources_then_player_drops() {
    let mut f = field();
    f.play_sequence(Sequence {
        duration: 1.0,
        events: vec![
            SequenceEvent::at(0.0, 10.0, 10.0),
            SequenceEvent {
                overrides: Some(SourceOverride::uniform(
                    WaveTypeOverride {
                        speed: Some(60.0),
                        ..WaveTypeOverride::default()
                    },
                    2,
                )),
                ..SequenceEvent::at(0.5, 20.0, 20.0)
            },
        ],
    })
    .unwrap();

    let mut layer = Recorder::default();
    f.tick(0.0, &mut layer);
    assert_eq!(f.sources().len(), 1);
    f.tick(0.5, &mut layer);
    assert_eq!(f.sources().len(), 2);
    assert!(f.sources()[0].overrides().is_some());
    assert!(f.sequence().is_some());
    f.tick(0.6, &mut layer);
    assert!(f.sequence().is_none());
}

#[test]
fn clear_halts_sequence_and_erases_layer() {
    let mut f = field();
    f.play_sequence(Sequence {
        duration: 5.0,
        events: vec![
            SequenceEvent::at(0.0, 10.0, 10.0),
            SequenceEvent::at(1.0, 20.0, 20.0),
        ],
    })
    .unwrap();
    let mut layer = Recorder::default();
    f.tick(0.1, &mut layer);
    assert_eq!(f.sources().len(), 1);

    f.clear(Some(&mut layer));
    assert!(f.sources().is_empty());
    assert!(f.sequence().is_none());
    assert_eq!(layer.clears.len(), 2);
    assert_eq!(f.pool_stats().outstanding, 0);

    f.tick(2.0, &mut layer);
    assert!(f.sources().is_empty());
}

#[test]
fn reset_restores_construction_state() {
    let mut f = field();
    f.trigger(10.0, 10.0, None);
    let mut layer = Recorder::default();
    f.tick(1.0, &mut layer);
    f.apply_preset("calm-breath").unwrap();
    let mut palette = Palette::default();
    palette.set("bg", "#000000").unwrap();
    f.set_palette(palette).unwrap();
    f.set_paused(true);

    f.reset(None);
    assert!(f.sources().is_empty());
    assert_eq!(f.time(), 0.0);
    assert!(!f.is_paused());
    assert_eq!(f.config(), &SimConfig::default());
    assert_eq!(f.palette(), &Palette::default());
}

#[test]
fn export_draw_does_not_advance_time() {
    let mut f = field();
    f.trigger(150.0, 200.0, None);
    let mut layer = Recorder::default();
    f.tick(1.0, &mut layer);
    let drawn = f.draw_wave_layer(&mut layer);
    assert_eq!(drawn, f.stats().waves_drawn);
    assert_eq!(f.sources()[0].local_time(), 1.0);
    assert_eq!(layer.clip_depth, 0);
}

#[test]
fn pool_capacity_follows_config_updates() {
    let mut f = field();
    f.update_config(|c| c.pool_capacity = 3).unwrap();
    f.trigger(150.0, 200.0, None);
    assert_eq!(f.sources()[0].image_sources().len(), 25);
    f.clear(None);

    let st = f.pool_stats();
    assert_eq!(st.retained, 3);
    assert_eq!(st.dropped_on_release, 22);

    f.reset(None);
    assert_eq!(f.config().pool_capacity, SimConfig::default().pool_capacity);
    f.trigger(150.0, 200.0, None);
    f.clear(None);
    assert_eq!(f.pool_stats().retained, 25);
}

#[test]
fn missing_wave_colors_are_reported_per_config_not_per_draw() {
    let mut config = SimConfig::default();
    assert_eq!(warn_missing_colors(&config, &Palette::default()), 0);
    config.wave_types[1].color_key = "accent".to_owned();
    assert_eq!(warn_missing_colors(&config, &Palette::default()), 1);

    let mut f = field();
    f.set_config(config).unwrap();
    f.trigger(150.0, 200.0, None);
    let mut layer = Recorder::default();
    f.tick(0.5, &mut layer);
    assert!(layer.strokes > 0);
}
