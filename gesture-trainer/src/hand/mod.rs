//! Hand module - landmark data and finger states
//!
//! Re-exports only. All logic in submodules.

mod fingers;
mod landmarks;

pub use fingers::FingerStates;
pub use landmarks::{
    Frame, Hand, HandSide, Landmark,
    // Constants
    HAND_LANDMARK_COUNT, MAX_HANDS, VALUES_PER_HAND,
    WRIST, THUMB_MCP, THUMB_IP, THUMB_TIP,
    INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP,
    RING_PIP, RING_TIP, PINKY_PIP, PINKY_TIP,
};

#[cfg(test)]
pub(crate) use fingers::test_hands;
