/// Global simulation clock. Paused clocks accept deltas but do not advance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimClock {
    elapsed: f64,
    paused: bool,
}

impl SimClock {
    /// Running clock at `t = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds accumulated while unpaused.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// `true` while frozen.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or resume.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Consume one frame delta and return the simulation step it produced.
    ///
    /// The step is 0 while paused, and negative or non-finite deltas count as 0.
    pub fn advance(&mut self, frame_delta: f64) -> f64 {
        let dt = sanitize_dt(frame_delta);
        if self.paused {
            return 0.0;
        }
        self.elapsed += dt;
        dt
    }

    /// Back to `t = 0`, running.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Clamp a time step to a finite, non-negative value.
pub(crate) fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
