//! Match engine - turns per-frame classifier output into a recognition
//!
//! Tracks confidence and how long the gesture has been held without a
//! break. Recognition fires once the hold reaches the profile's hold time,
//! or, when the profile allows it, once confidence reaches the
//! auto-success ceiling on a frame where a relevant hand is present but
//! not matching. It fires at most once per round.

use crate::config::{DifficultyProfile, HandSelection, ToleranceProfile};
use crate::gestures::{GestureClassifier, GestureDefinition};
use crate::hand::Frame;

use super::confidence::{ConfidenceMeter, FrameSignal};

/// Why a round's gesture counted as recognized
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecognitionCause {
    HeldMatch,
    AutoSuccess,
}

/// Result of folding one frame into the engine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchUpdate {
    /// Any hand at all was in view
    pub detected: bool,
    pub signal: FrameSignal,
    pub confidence: f32,
    pub hold_secs: f64,
    /// Set on the single frame that completes the round
    pub recognized: Option<RecognitionCause>,
}

pub struct MatchEngine {
    tolerance: ToleranceProfile,
    required_hold_secs: f64,
    classifier: GestureClassifier,
    meter: ConfidenceMeter,
    /// Timestamp (seconds) the current unbroken match started
    hold_start: Option<f64>,
    hold_secs: f64,
    paused_at: Option<f64>,
    recognized: bool,
}

impl MatchEngine {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            tolerance: profile.tolerance,
            required_hold_secs: profile.required_hold_secs,
            classifier: GestureClassifier::new(profile.tolerance),
            meter: ConfidenceMeter::new(),
            hold_start: None,
            hold_secs: 0.0,
            paused_at: None,
            recognized: false,
        }
    }

    /// Process one frame for `target`
    ///
    /// - `selection`: which of the user's hands count
    /// - `now`: frame timestamp in seconds
    pub fn update(
        &mut self,
        target: &GestureDefinition,
        frame: &Frame,
        selection: HandSelection,
        now: f64,
    ) -> MatchUpdate {
        let detected = !frame.is_empty();

        if self.recognized {
            // Waiting for the round transition; nothing more to decide
            return self.snapshot(detected, FrameSignal::Match, None);
        }

        let signal = if frame.relevant_hands(selection).next().is_none() {
            FrameSignal::Absent
        } else {
            match self.classifier.classify(target, frame, selection) {
                Ok(true) => FrameSignal::Match,
                Ok(false) => FrameSignal::Mismatch,
                Err(e) => {
                    log::warn!("Gesture check for {:?} failed, treating as no match: {}", target.id, e);
                    FrameSignal::Mismatch
                }
            }
        };

        let confidence = self.meter.apply(signal, &self.tolerance);

        if signal == FrameSignal::Match {
            let start = *self.hold_start.get_or_insert(now);
            self.hold_secs = (now - start).max(0.0);
        } else {
            self.hold_start = None;
            self.hold_secs = 0.0;
        }

        // While the pose is held the hold timer decides; auto-success only
        // rescues a hand that is in view and slipped out of the pose
        let cause = match signal {
            FrameSignal::Match if self.hold_secs >= self.required_hold_secs => {
                Some(RecognitionCause::HeldMatch)
            }
            FrameSignal::Mismatch
                if self.tolerance.auto_success.is_some_and(|ceiling| confidence >= ceiling) =>
            {
                Some(RecognitionCause::AutoSuccess)
            }
            _ => None,
        };

        if let Some(cause) = cause {
            self.recognized = true;
            log::debug!(
                "Recognized {:?} ({:?}, hold {:.2}s, confidence {:.0})",
                target.id, cause, self.hold_secs, confidence
            );
        }

        self.snapshot(detected, signal, cause)
    }

    fn snapshot(&self, detected: bool, signal: FrameSignal, recognized: Option<RecognitionCause>) -> MatchUpdate {
        MatchUpdate {
            detected,
            signal,
            confidence: self.meter.value(),
            hold_secs: self.hold_secs,
            recognized,
        }
    }

    /// Freeze hold timing while the game is paused
    pub fn pause(&mut self, now: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Shift the hold start past the pause so paused time never counts
    pub fn resume(&mut self, now: f64) {
        if let Some(paused_at) = self.paused_at.take() {
            let paused_for = (now - paused_at).max(0.0);
            if let Some(start) = self.hold_start.as_mut() {
                *start += paused_for;
            }
        }
    }

    /// Fresh state for a new round
    pub fn reset(&mut self) {
        self.meter.reset();
        self.hold_start = None;
        self.hold_secs = 0.0;
        self.paused_at = None;
        self.recognized = false;
        self.classifier.reset();
    }

    pub fn confidence(&self) -> f32 {
        self.meter.value()
    }

    pub fn confidence_percent(&self) -> u8 {
        self.meter.percent()
    }

    pub fn hold_secs(&self) -> f64 {
        self.hold_secs
    }

    pub fn is_recognized(&self) -> bool {
        self.recognized
    }
}
