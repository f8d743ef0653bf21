//! Confidence meter - smoothed match score for the progress ring
//!
//! Rises fast on matching frames and falls slowly otherwise, so a single
//! dropped frame does not wipe out visible progress.

use crate::config::ToleranceProfile;

pub const CONFIDENCE_MAX: f32 = 100.0;

/// What one frame told us about the target gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSignal {
    /// No relevant hand in view
    Absent,
    /// A relevant hand, not showing the gesture
    Mismatch,
    /// The gesture is shown
    Match,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConfidenceMeter {
    value: f32,
}

impl ConfidenceMeter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one frame into the meter, returns the new value (always 0-100)
    pub fn apply(&mut self, signal: FrameSignal, tol: &ToleranceProfile) -> f32 {
        self.value = match signal {
            FrameSignal::Absent => self.value - tol.absent_decay,
            FrameSignal::Mismatch => {
                let tried = (self.value + tol.presence_bonus).min(CONFIDENCE_MAX);
                (tried - tol.mismatch_decay).max(tol.mismatch_floor)
            }
            FrameSignal::Match => self.value + tol.rise_step,
        }
        .clamp(0.0, CONFIDENCE_MAX);

        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whole percent for display
    pub fn percent(&self) -> u8 {
        self.value.round() as u8
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}
