use crate::config::{sim::SimConfig, wave::WaveRole};

/// Per-family values carried by a preset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresetWave {
    /// Ring speed.
    pub speed: f64,
    /// Ring interval.
    pub interval: f64,
    /// Stroke width.
    pub stroke_width: f64,
    /// Base alpha.
    pub base_alpha: f64,
    /// Decay factor.
    pub decay_factor: f64,
}

/// A named look applied over the current config. Fields a preset does not name are kept.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    /// Stable lookup name.
    pub name: &'static str,
    /// Values for [`WaveRole::Primary`] wave types.
    pub primary: PresetWave,
    /// Values for [`WaveRole::Secondary`] wave types.
    pub secondary: PresetWave,
    /// Rings per image source, applied to every family.
    pub max_wave_count: u32,
    /// Reflection order.
    pub max_reflection_order: u32,
}

impl Preset {
    /// Overwrite the preset's fields in `config`.
    pub fn apply(&self, config: &mut SimConfig) {
        for w in &mut config.wave_types {
            let v = match w.role {
                WaveRole::Primary => self.primary,
                WaveRole::Secondary => self.secondary,
            };
            w.speed = v.speed;
            w.interval = v.interval;
            w.stroke_width = v.stroke_width;
            w.base_alpha = v.base_alpha;
            w.decay_factor = v.decay_factor;
        }
        config.set_max_wave_count(self.max_wave_count);
        config.max_reflection_order = self.max_reflection_order;
    }
}

const fn wave(
    speed: f64,
    interval: f64,
    stroke_width: f64,
    base_alpha: f64,
    decay_factor: f64,
) -> PresetWave {
    PresetWave {
        speed,
        interval,
        stroke_width,
        base_alpha,
        decay_factor,
    }
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "harmonic-flow",
        primary: wave(50.0, 0.4, 50.0, 0.8, 2.0),
        secondary: wave(50.0, 0.4, 25.0, 0.8, 2.0),
        max_wave_count: 3,
        max_reflection_order: 2,
    },
    Preset {
        name: "vital-echo",
        primary: wave(120.0, 0.1, 40.0, 0.9, 0.8),
        secondary: wave(120.0, 0.1, 15.0, 0.9, 0.8),
        max_wave_count: 5,
        max_reflection_order: 1,
    },
    Preset {
        name: "historic-weave",
        primary: wave(20.0, 0.8, 60.0, 0.4, 3.0),
        secondary: wave(20.0, 0.8, 30.0, 0.4, 3.0),
        max_wave_count: 10,
        max_reflection_order: 4,
    },
    Preset {
        name: "full-flavor",
        primary: wave(40.0, 0.4, 120.0, 0.85, 2.5),
        secondary: wave(40.0, 0.4, 60.0, 0.85, 2.5),
        max_wave_count: 5,
        max_reflection_order: 2,
    },
    Preset {
        name: "calm-breath",
        primary: wave(15.0, 1.5, 10.0, 0.2, 4.0),
        secondary: wave(15.0, 1.5, 5.0, 0.2, 4.0),
        max_wave_count: 5,
        max_reflection_order: 1,
    },
    Preset {
        name: "creative-gesture",
        primary: wave(80.0, 0.15, 10.0, 0.9, 1.5),
        secondary: wave(25.0, 0.6, 90.0, 0.7, 2.5),
        max_wave_count: 7,
        max_reflection_order: 3,
    },
];

/// Every built-in preset, in menu order.
pub fn presets() -> &'static [Preset] {
    PRESETS
}

/// Look up a preset by name (case-insensitive).
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
