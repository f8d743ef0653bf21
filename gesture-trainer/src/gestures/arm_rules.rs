//! Whole-frame arm and two-hand gesture rules
//!
//! These look at every hand in the frame at once. Only waving carries
//! state, through the engine-owned `WaveTracker`, and it follows a single
//! hand picked by the side filter.

use crate::config::{HandSelection, ToleranceProfile};
use crate::hand::Hand;

use super::catalog::GestureId;
use super::hand_rules::{is_fist, is_open};
use super::waving::WaveTracker;

/// Horizontal screen centre in normalized coordinates
const SCREEN_CENTER_X: f32 = 0.5;

/// Does the frame show `gesture`? Single-hand gestures never match here.
pub fn matches_frame(
    gesture: GestureId,
    hands: &[Hand],
    selection: HandSelection,
    tol: &ToleranceProfile,
    waves: &mut WaveTracker,
) -> bool {
    match gesture {
        GestureId::HandsUp => hands_up(hands, tol),
        GestureId::HandsOpen => hands_open(hands, tol),
        GestureId::HandsTogether => hands_together(hands, tol),
        GestureId::Waving => waving(hands, selection, tol, waves),
        GestureId::Muscle => muscle(hands, tol),
        _ => false,
    }
}

fn required(tol: &ToleranceProfile) -> usize {
    tol.hands_required as usize
}

fn hands_up(hands: &[Hand], tol: &ToleranceProfile) -> bool {
    hands.len() >= required(tol)
        && hands.iter().filter(|h| h.wrist().y < tol.hands_up_height).count() >= required(tol)
}

fn hands_open(hands: &[Hand], tol: &ToleranceProfile) -> bool {
    hands.len() >= required(tol) && hands.iter().filter(|h| is_open(h, tol)).count() >= required(tol)
}

/// Palms (middle MCP) close together; lenient profiles also accept a lone
/// hand held in front of the body
fn hands_together(hands: &[Hand], tol: &ToleranceProfile) -> bool {
    match hands {
        [first, second, ..] => first.palm_center().distance(second.palm_center()) < tol.together_distance,
        [only] => {
            tol.together_single_hand
                && (only.palm_center().x - SCREEN_CENTER_X).abs() < tol.together_center_band
        }
        [] => false,
    }
}

/// Tracker order is not stable across frames, so always follow the first
/// selected hand rather than whichever hand comes first
fn waving(hands: &[Hand], selection: HandSelection, tol: &ToleranceProfile, waves: &mut WaveTracker) -> bool {
    match hands.iter().find(|h| h.side.is_selected(selection)) {
        Some(hand) => waves.update(hand.wrist().x, tol.waving_min_changes),
        None => false,
    }
}

/// A raised fist
fn muscle(hands: &[Hand], tol: &ToleranceProfile) -> bool {
    hands
        .iter()
        .any(|h| is_fist(h, tol) && h.wrist().y < tol.muscle_height)
}
