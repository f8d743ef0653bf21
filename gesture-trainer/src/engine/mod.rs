//! Match engine module - confidence smoothing and hold-time gating
//!
//! Re-exports only. All logic in submodules.

mod confidence;
mod match_engine;

pub use confidence::{ConfidenceMeter, FrameSignal, CONFIDENCE_MAX};
pub use match_engine::{MatchEngine, MatchUpdate, RecognitionCause};
