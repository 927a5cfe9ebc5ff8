use crate::{
    foundation::{
        core::{Fps, FrameIndex},
        error::{HeartwaveError, HeartwaveResult},
    },
    render::surface::FrameRGBA,
};

/// Geometry and rate announced to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: Fps,
}

/// Consumer of rendered frames.
///
/// `push_frame` receives strictly increasing frame indices between `begin` and `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> HeartwaveResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HeartwaveResult<()>;
    fn end(&mut self) -> HeartwaveResult<()>;
}

/// Keeps every frame in memory. Handy for tests.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    ended: bool,
    /// Frames in push order.
    pub frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration from the last `begin`.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> HeartwaveResult<()> {
        self.cfg = Some(cfg);
        self.ended = false;
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> HeartwaveResult<()> {
        if self.cfg.is_none() {
            return Err(HeartwaveError::encode("in-memory sink not started"));
        }
        if let Some((last, _)) = self.frames.last()
            && idx.0 <= last.0
        {
            return Err(HeartwaveError::encode("out-of-order frame index"));
        }
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> HeartwaveResult<()> {
        self.ended = true;
        Ok(())
    }
}
