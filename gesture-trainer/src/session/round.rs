//! A single prompt-and-match round

use serde::{Deserialize, Serialize};

use crate::gestures::GestureDefinition;

/// Identity of a round, captured by deferred continuations
///
/// A continuation only acts if its token still names the current round
/// of the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundToken {
    pub generation: u32,
    pub round: u32,
}

#[derive(Clone, Debug)]
pub struct Round {
    pub index: u32,
    pub gesture: &'static GestureDefinition,
    pub seconds_remaining: u32,
    pub recognized: bool,
}

impl Round {
    pub fn new(index: u32, gesture: &'static GestureDefinition, seconds: u32) -> Self {
        Self {
            index,
            gesture,
            seconds_remaining: seconds,
            recognized: false,
        }
    }

    /// One second passed; returns true when time ran out
    pub fn tick(&mut self) -> bool {
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        self.seconds_remaining == 0
    }

    /// Points for recognizing the gesture now
    pub fn points(&self) -> u32 {
        self.seconds_remaining.saturating_mul(10).saturating_add(50)
    }
}
