//! Session module - rounds, scoring and the game lifecycle
//!
//! Re-exports only. All logic in submodules.

mod events;
mod feedback;
mod machine;
mod round;
mod summary;

#[cfg(test)]
mod scenarios;

pub use events::{RecognitionKind, SessionEvent, SessionView};
pub use feedback::{instruction, pick_encouragement, ADVANCE_DELAY_MS, ENCOURAGEMENTS, HAPTIC_PATTERN};
pub use machine::{ClockCommand, Session, SessionPhase, TickOutcome};
pub use round::{Round, RoundToken};
pub use summary::{accuracy, OutcomeTier, SessionSummary};
