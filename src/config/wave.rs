use std::borrow::Cow;

use crate::foundation::error::{HeartwaveError, HeartwaveResult};

/// Which display-mode family a wave type belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveRole {
    /// Shown in `primary` and `both` display modes.
    #[default]
    Primary,
    /// Shown in `secondary` and `both` display modes.
    Secondary,
}

/// One independently animated ring family emitted by every source.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WaveTypeConfig {
    /// Display-mode family.
    #[serde(default)]
    pub role: WaveRole,
    /// Ring expansion speed in pixels per second.
    pub speed: f64,
    /// Seconds between consecutive rings of the same family.
    pub interval: f64,
    /// Stroke width in heart-local units.
    pub stroke_width: f64,
    /// Opacity of a freshly emitted ring, in `[0, 1]`.
    pub base_alpha: f64,
    /// Exponential decay factor; larger decays slower.
    pub decay_factor: f64,
    /// Palette key of the stroke color.
    #[serde(default = "default_color_key")]
    pub color_key: String,
    /// Multiplier applied to the ring diameter when sizing the heart.
    #[serde(default = "default_heart_size_scale")]
    pub heart_size_scale: f64,
    /// Number of phase-offset rings per image source.
    #[serde(default = "default_max_wave_count")]
    pub max_wave_count: u32,
}

fn default_color_key() -> String {
    crate::config::palette::STROKE_KEY.to_owned()
}

fn default_heart_size_scale() -> f64 {
    1.0
}

fn default_max_wave_count() -> u32 {
    5
}

impl Default for WaveTypeConfig {
    fn default() -> Self {
        Self::primary()
    }
}

impl WaveTypeConfig {
    /// Wide, dark strokes.
    pub fn primary() -> Self {
        Self {
            role: WaveRole::Primary,
            speed: 30.0,
            interval: 0.3,
            stroke_width: 80.0,
            base_alpha: 0.8,
            decay_factor: 1.5,
            color_key: crate::config::palette::STROKE_KEY.to_owned(),
            heart_size_scale: default_heart_size_scale(),
            max_wave_count: default_max_wave_count(),
        }
    }

    /// Thin, light strokes on a faster cadence.
    pub fn secondary() -> Self {
        Self {
            role: WaveRole::Secondary,
            speed: 30.0,
            interval: 0.2,
            stroke_width: 20.0,
            base_alpha: 0.8,
            decay_factor: 1.5,
            color_key: crate::config::palette::STROKE2_KEY.to_owned(),
            heart_size_scale: default_heart_size_scale(),
            max_wave_count: default_max_wave_count(),
        }
    }

    /// Reject values outside the documented domains.
    pub fn validate(&self) -> HeartwaveResult<()> {
        if !is_positive(self.speed) {
            return Err(HeartwaveError::validation("wave speed must be finite and > 0"));
        }
        if !is_non_negative(self.interval) {
            return Err(HeartwaveError::validation(
                "wave interval must be finite and >= 0",
            ));
        }
        if !is_positive(self.stroke_width) {
            return Err(HeartwaveError::validation(
                "wave stroke_width must be finite and > 0",
            ));
        }
        if !is_unit(self.base_alpha) {
            return Err(HeartwaveError::validation(
                "wave base_alpha must be within [0, 1]",
            ));
        }
        if !is_positive(self.decay_factor) {
            return Err(HeartwaveError::validation(
                "wave decay_factor must be finite and > 0",
            ));
        }
        if !is_positive(self.heart_size_scale) {
            return Err(HeartwaveError::validation(
                "wave heart_size_scale must be finite and > 0",
            ));
        }
        if self.max_wave_count == 0 {
            return Err(HeartwaveError::validation("wave max_wave_count must be > 0"));
        }
        if self.color_key.trim().is_empty() {
            return Err(HeartwaveError::validation("wave color_key must be non-empty"));
        }
        Ok(())
    }
}

/// Optional per-source replacement for each [`WaveTypeConfig`] field.
///
/// Unset or malformed values resolve to the base configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaveTypeOverride {
    pub speed: Option<f64>,
    pub interval: Option<f64>,
    pub stroke_width: Option<f64>,
    pub base_alpha: Option<f64>,
    pub decay_factor: Option<f64>,
    pub color_key: Option<String>,
    pub heart_size_scale: Option<f64>,
    pub max_wave_count: Option<u32>,
}

impl WaveTypeOverride {
    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge over `base`, keeping base values where the override is unset or out of domain.
    pub fn resolve(&self, base: &WaveTypeConfig) -> WaveTypeConfig {
        WaveTypeConfig {
            role: base.role,
            speed: pick(self.speed, base.speed, is_positive),
            interval: pick(self.interval, base.interval, is_non_negative),
            stroke_width: pick(self.stroke_width, base.stroke_width, is_positive),
            base_alpha: pick(self.base_alpha, base.base_alpha, is_unit),
            decay_factor: pick(self.decay_factor, base.decay_factor, is_positive),
            color_key: match self.color_key.as_deref() {
                Some(k) if !k.trim().is_empty() => k.to_owned(),
                _ => base.color_key.clone(),
            },
            heart_size_scale: pick(self.heart_size_scale, base.heart_size_scale, is_positive),
            max_wave_count: match self.max_wave_count {
                Some(n) if n > 0 => n,
                _ => base.max_wave_count,
            },
        }
    }
}

/// Per-source overrides, index-aligned with the configured wave types.
///
/// Missing trailing entries mean "no override" for those wave types.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SourceOverride {
    /// Override for wave type `i`.
    pub wave_types: Vec<WaveTypeOverride>,
}

impl SourceOverride {
    /// Apply the same override to the first `count` wave types.
    pub fn uniform(o: WaveTypeOverride, count: usize) -> Self {
        Self {
            wave_types: vec![o; count],
        }
    }

    /// Resolved wave type `index`, borrowing `base` when nothing is overridden.
    pub fn resolve<'a>(&self, index: usize, base: &'a WaveTypeConfig) -> Cow<'a, WaveTypeConfig> {
        match self.wave_types.get(index) {
            Some(o) if !o.is_empty() => Cow::Owned(o.resolve(base)),
            _ => Cow::Borrowed(base),
        }
    }
}

fn pick(value: Option<f64>, fallback: f64, valid: fn(f64) -> bool) -> f64 {
    match value {
        Some(v) if valid(v) => v,
        _ => fallback,
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn is_non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn is_unit(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

#[cfg(test)]
#[path = "../../tests/unit/config/wave.rs"]
mod tests;
