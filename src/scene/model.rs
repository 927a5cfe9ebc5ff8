use std::{fs::File, io::BufReader, path::Path};

use crate::{
    config::{palette::Palette, presets::find_preset, sim::SimConfig},
    field::{manager::WaveField, sequence::Sequence},
    foundation::{
        core::Canvas,
        error::{HeartwaveError, HeartwaveResult},
    },
};

fn default_canvas() -> Canvas {
    Canvas {
        width: 800,
        height: 600,
    }
}

/// JSON scene file: canvas, look, and an optional timed sequence of triggers.
///
/// Every field is optional; missing ones take the stock defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    /// Canvas size in pixels.
    #[serde(default = "default_canvas")]
    pub canvas: Canvas,
    /// Built-in preset applied on top of `config`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Simulation parameters.
    #[serde(default)]
    pub config: SimConfig,
    /// Named colors.
    #[serde(default)]
    pub palette: Palette,
    /// Triggers played from `t = 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<Sequence>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            canvas: default_canvas(),
            preset: None,
            config: SimConfig::default(),
            palette: Palette::default(),
            sequence: None,
        }
    }
}

impl Scene {
    /// Parse a scene from a JSON reader (not validated).
    pub fn from_reader<R: std::io::Read>(r: R) -> HeartwaveResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HeartwaveError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON string (not validated).
    pub fn from_json(s: &str) -> HeartwaveResult<Self> {
        serde_json::from_str(s).map_err(|e| HeartwaveError::serde(format!("parse scene JSON: {e}")))
    }

    /// Parse a scene from a JSON file (not validated).
    pub fn from_path(path: impl AsRef<Path>) -> HeartwaveResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HeartwaveError::validation(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize back to pretty JSON.
    pub fn to_json(&self) -> HeartwaveResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HeartwaveError::serde(format!("serialize scene JSON: {e}")))
    }

    /// `config` with the preset applied.
    pub fn resolved_config(&self) -> HeartwaveResult<SimConfig> {
        let mut config = self.config.clone();
        if let Some(name) = &self.preset {
            let preset = find_preset(name)
                .ok_or_else(|| HeartwaveError::validation(format!("unknown preset \"{name}\"")))?;
            preset.apply(&mut config);
        }
        Ok(config)
    }

    /// Reject scenes that cannot be played.
    pub fn validate(&self) -> HeartwaveResult<()> {
        self.canvas.validate()?;
        self.resolved_config()?.validate()?;
        self.palette.validate()?;
        if let Some(seq) = &self.sequence {
            seq.validate()?;
        }
        Ok(())
    }

    /// Seconds of animation the scene describes: the sequence duration, or 0 without one.
    pub fn duration_secs(&self) -> f64 {
        self.sequence.as_ref().map_or(0.0, |s| s.duration)
    }

    /// Fresh field at `t = 0` with the sequence queued.
    pub fn build_field(&self) -> HeartwaveResult<WaveField> {
        self.validate()?;
        let mut field = WaveField::new(self.resolved_config()?, self.palette.clone(), self.canvas)?;
        if let Some(seq) = &self.sequence {
            field.play_sequence(seq.clone())?;
        }
        Ok(field)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
