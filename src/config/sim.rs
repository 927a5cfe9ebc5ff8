use crate::{
    config::wave::{WaveRole, WaveTypeConfig},
    field::decay::DEFAULT_ALPHA_THRESHOLD,
    field::pool::DEFAULT_POOL_CAPACITY,
    foundation::error::{HeartwaveError, HeartwaveResult},
};

/// Which wave families are drawn. Liveness always considers every family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveDisplayMode {
    /// Draw every wave type.
    #[default]
    Both,
    /// Draw only [`WaveRole::Primary`] types.
    Primary,
    /// Draw only [`WaveRole::Secondary`] types.
    Secondary,
}

impl WaveDisplayMode {
    /// `true` when wave types of `role` are drawn in this mode.
    pub fn shows(self, role: WaveRole) -> bool {
        match self {
            Self::Both => true,
            Self::Primary => role == WaveRole::Primary,
            Self::Secondary => role == WaveRole::Secondary,
        }
    }
}

/// Global simulation parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Ring families emitted by every source.
    pub wave_types: Vec<WaveTypeConfig>,
    /// Mirror iterations per axis; each source owns `(2r+1)^2` image sources.
    pub max_reflection_order: u32,
    /// Rings fainter than this are skipped, and sources whose oldest ring is fainter die.
    pub alpha_threshold: f64,
    /// Triggers beyond this many live sources are dropped.
    pub max_concurrent_sources: usize,
    /// Cull hearts whose bounding square lies fully outside the canvas.
    pub enable_clipping: bool,
    /// Paint the palette background on the wave layer each frame instead of clearing it.
    pub persist_background: bool,
    /// Wave families to draw.
    pub wave_display_mode: WaveDisplayMode,
    /// Free-list capacity of the point pool.
    pub pool_capacity: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            wave_types: vec![WaveTypeConfig::primary(), WaveTypeConfig::secondary()],
            max_reflection_order: 2,
            alpha_threshold: DEFAULT_ALPHA_THRESHOLD,
            max_concurrent_sources: 5,
            enable_clipping: true,
            persist_background: true,
            wave_display_mode: WaveDisplayMode::Both,
            pool_capacity: DEFAULT_POOL_CAPACITY,
        }
    }
}

impl SimConfig {
    /// Reject configurations the simulation cannot run.
    pub fn validate(&self) -> HeartwaveResult<()> {
        if self.wave_types.is_empty() {
            return Err(HeartwaveError::validation(
                "config must declare at least one wave type",
            ));
        }
        for (i, w) in self.wave_types.iter().enumerate() {
            w.validate().map_err(|e| match e {
                HeartwaveError::Validation(msg) => {
                    HeartwaveError::validation(format!("wave_types[{i}]: {msg}"))
                }
                other => other,
            })?;
        }
        if !self.alpha_threshold.is_finite() || self.alpha_threshold < 0.0 {
            return Err(HeartwaveError::validation(
                "alpha_threshold must be finite and >= 0",
            ));
        }
        // 2r+1 tiles per axis; keep the per-source tile count sane.
        if self.max_reflection_order > 16 {
            return Err(HeartwaveError::validation(
                "max_reflection_order must be <= 16",
            ));
        }
        Ok(())
    }

    /// Set `max_wave_count` on every wave type.
    pub fn set_max_wave_count(&mut self, n: u32) {
        for w in &mut self.wave_types {
            w.max_wave_count = n;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/sim.rs"]
mod tests;
