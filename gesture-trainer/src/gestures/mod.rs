//! Gesture library - catalogs and geometric classifiers
//!
//! Re-exports only. All logic in submodules.

mod arm_rules;
mod catalog;
mod classifier;
mod hand_rules;
mod waving;

pub use arm_rules::matches_frame;
pub use catalog::{catalog, GestureDefinition, GestureId, GestureScope, ARM_GESTURES, HAND_GESTURES};
pub use classifier::GestureClassifier;
pub use hand_rules::{is_fist, is_open, matches_hand};
pub use waving::{WaveTracker, WAVE_HISTORY, WAVE_MIN_SAMPLES, WAVE_NOISE_FLOOR};
