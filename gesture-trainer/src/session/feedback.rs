//! Encouragement cues and prompt text

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{GestureMode, HandSelection};

pub const ENCOURAGEMENTS: [&str; 5] = ["👏 Super!", "🌟 Great!", "💪 Keep going!", "✨ Perfect!", "🎯 Nailed it!"];

/// Vibration pattern (ms on, off, on) played on recognition
pub const HAPTIC_PATTERN: [u32; 3] = [100, 50, 100];

/// Delay between a recognized gesture and the next prompt
pub const ADVANCE_DELAY_MS: u32 = 1500;

pub fn pick_encouragement<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ENCOURAGEMENTS.choose(rng).copied().unwrap_or(ENCOURAGEMENTS[0])
}

/// Line shown above the target gesture
pub fn instruction(mode: GestureMode, selection: HandSelection) -> &'static str {
    match (mode, selection) {
        (GestureMode::Arms, _) => "Copy this:",
        (GestureMode::Hands, HandSelection::Both) => "Both hands:",
        (GestureMode::Hands, HandSelection::Left) => "Left hand:",
        (GestureMode::Hands, HandSelection::Right) => "Right hand:",
    }
}
