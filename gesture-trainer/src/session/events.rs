//! Events and snapshots handed to the renderer
//!
//! The core never touches the DOM; it records what changed and the host
//! drains these after each callback.

use serde::Serialize;

use crate::engine::RecognitionCause;
use crate::gestures::GestureId;
use crate::hand::HandSide;

use super::round::RoundToken;
use super::summary::SessionSummary;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionKind {
    Held,
    AutoSuccess,
}

impl From<RecognitionCause> for RecognitionKind {
    fn from(cause: RecognitionCause) -> Self {
        match cause {
            RecognitionCause::HeldMatch => RecognitionKind::Held,
            RecognitionCause::AutoSuccess => RecognitionKind::AutoSuccess,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    RoundStarted {
        round: u32,
        total_rounds: u32,
        gesture: GestureId,
        glyph: &'static str,
        name: &'static str,
        instruction: &'static str,
        seconds: u32,
    },
    GestureRecognized {
        token: RoundToken,
        points: u32,
        score: u32,
        seconds_taken: u32,
        kind: RecognitionKind,
        encouragement: &'static str,
        haptic: [u32; 3],
    },
    RoundTimedOut {
        round: u32,
    },
    Paused,
    Resumed,
    SessionEnded {
        summary: SessionSummary,
    },
    Error {
        message: String,
    },
}

/// Everything the game screen shows, at any moment
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionView {
    pub phase: &'static str,
    pub score: u32,
    pub seconds_remaining: u32,
    pub round: u32,
    pub total_rounds: u32,
    pub round_label: String,
    pub target_glyph: Option<&'static str>,
    pub target_name: Option<&'static str>,
    pub instruction: &'static str,
    pub confidence_percent: u8,
    pub hand_detected: bool,
    pub detected_sides: Vec<HandSide>,
    /// A gesture was recognized and the next prompt is pending
    pub celebrating: bool,
    pub error: Option<String>,
}
