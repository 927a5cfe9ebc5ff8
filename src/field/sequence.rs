use crate::{
    config::wave::SourceOverride,
    field::clock::sanitize_dt,
    foundation::error::{HeartwaveError, HeartwaveResult},
};

/// One scheduled trigger.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequenceEvent {
    /// Seconds from the start of the sequence.
    pub time: f64,
    /// Trigger x in canvas pixels.
    pub x: f64,
    /// Trigger y in canvas pixels.
    pub y: f64,
    /// Per-source wave type overrides.
    #[serde(rename = "override", default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<SourceOverride>,
}

impl SequenceEvent {
    /// Event without overrides.
    pub fn at(time: f64, x: f64, y: f64) -> Self {
        Self {
            time,
            x,
            y,
            overrides: None,
        }
    }
}

/// Timed list of triggers, sorted by `time`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Sequence {
    /// Length in seconds; the player finishes once its clock passes this.
    pub duration: f64,
    /// Events in non-decreasing time order.
    #[serde(default)]
    pub events: Vec<SequenceEvent>,
}

impl Sequence {
    /// Reject non-positive durations and misordered or out-of-range event times.
    pub fn validate(&self) -> HeartwaveResult<()> {
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(HeartwaveError::validation(
                "sequence duration must be finite and > 0",
            ));
        }
        let mut prev = 0.0;
        for (i, e) in self.events.iter().enumerate() {
            if !e.time.is_finite() || e.time < 0.0 {
                return Err(HeartwaveError::validation(format!(
                    "sequence event {i}: time must be finite and >= 0"
                )));
            }
            if e.time < prev {
                return Err(HeartwaveError::validation(format!(
                    "sequence event {i}: events must be sorted by time"
                )));
            }
            if e.time > self.duration {
                return Err(HeartwaveError::validation(format!(
                    "sequence event {i}: time {} exceeds duration {}",
                    e.time, self.duration
                )));
            }
            if !e.x.is_finite() || !e.y.is_finite() {
                return Err(HeartwaveError::validation(format!(
                    "sequence event {i}: position must be finite"
                )));
            }
            prev = e.time;
        }
        Ok(())
    }
}

/// Plays a [`Sequence`] against its own clock.
#[derive(Clone, Debug)]
pub struct SequencePlayer {
    sequence: Sequence,
    clock: f64,
    cursor: usize,
}

impl SequencePlayer {
    /// Player positioned at the start of `sequence`.
    pub fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            clock: 0.0,
            cursor: 0,
        }
    }

    /// The sequence being played.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Seconds played so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    /// Events not yet emitted.
    pub fn remaining(&self) -> usize {
        self.sequence.events.len() - self.cursor
    }

    /// Move the clock by `dt` and return every newly due event (`time <= clock`), in order.
    ///
    /// The first call with `dt = 0` emits the events scheduled at `t = 0`.
    pub fn advance(&mut self, dt: f64) -> Vec<SequenceEvent> {
        self.clock += sanitize_dt(dt);
        let due = self.sequence.events[self.cursor..]
            .iter()
            .take_while(|e| e.time <= self.clock)
            .count();
        let out = self.sequence.events[self.cursor..self.cursor + due].to_vec();
        self.cursor += due;
        out
    }

    /// `true` once the clock has passed the sequence duration.
    pub fn is_finished(&self) -> bool {
        self.clock > self.sequence.duration
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/sequence.rs"]
mod tests;
