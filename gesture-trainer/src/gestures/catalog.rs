//! Fixed gesture catalogs
//!
//! Hand mode draws from ten single-hand poses, arm mode from five
//! whole-frame movements. Order is stable and matches the prompt screen.

use serde::Serialize;

use crate::config::GestureMode;

/// Every gesture the trainer can prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureId {
    ThumbsUp,
    ThumbsDown,
    Peace,
    HangLoose,
    Fist,
    OpenHand,
    Pointing,
    CrossedFingers,
    OkSign,
    HighFive,
    HandsUp,
    HandsOpen,
    HandsTogether,
    Waving,
    Muscle,
}

/// Whether a classifier looks at one hand or the whole frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureScope {
    SingleHand,
    WholeFrame,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GestureDefinition {
    pub id: GestureId,
    pub glyph: &'static str,
    pub name: &'static str,
    pub scope: GestureScope,
}

const fn hand(id: GestureId, glyph: &'static str, name: &'static str) -> GestureDefinition {
    GestureDefinition { id, glyph, name, scope: GestureScope::SingleHand }
}

const fn arm(id: GestureId, glyph: &'static str, name: &'static str) -> GestureDefinition {
    GestureDefinition { id, glyph, name, scope: GestureScope::WholeFrame }
}

pub const HAND_GESTURES: [GestureDefinition; 10] = [
    hand(GestureId::ThumbsUp, "👍", "Thumbs up"),
    hand(GestureId::ThumbsDown, "👎", "Thumbs down"),
    hand(GestureId::Peace, "✌️", "Victory / Peace"),
    hand(GestureId::HangLoose, "🤙", "Hang loose"),
    hand(GestureId::Fist, "👊", "Fist"),
    hand(GestureId::OpenHand, "✋", "Open hand"),
    hand(GestureId::Pointing, "☝️", "Pointing"),
    hand(GestureId::CrossedFingers, "🤞", "Crossed fingers"),
    hand(GestureId::OkSign, "👌", "OK sign"),
    hand(GestureId::HighFive, "🖐️", "High five"),
];

pub const ARM_GESTURES: [GestureDefinition; 5] = [
    arm(GestureId::HandsUp, "🙌", "Hands up"),
    arm(GestureId::HandsOpen, "👐", "Hands open"),
    arm(GestureId::HandsTogether, "🙏", "Hands together"),
    arm(GestureId::Waving, "👋", "Wave"),
    arm(GestureId::Muscle, "💪", "Show your muscle"),
];

/// Catalog for the selected mode
pub fn catalog(mode: GestureMode) -> &'static [GestureDefinition] {
    match mode {
        GestureMode::Hands => &HAND_GESTURES,
        GestureMode::Arms => &ARM_GESTURES,
    }
}

impl GestureId {
    pub fn definition(self) -> &'static GestureDefinition {
        HAND_GESTURES
            .iter()
            .chain(ARM_GESTURES.iter())
            .find(|d| d.id == self)
            .unwrap_or(&HAND_GESTURES[0])
    }
}
