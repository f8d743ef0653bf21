//! Single-hand gesture rules
//!
//! Pure predicates over one hand's landmarks. The tolerance profile decides
//! how many of the "other fingers must be closed" clauses are enforced.

use crate::config::ToleranceProfile;
use crate::hand::{FingerStates, Hand, INDEX_TIP, MIDDLE_TIP, THUMB_TIP};

use super::catalog::GestureId;

/// Does `hand` show `gesture`? Whole-frame gestures never match here.
pub fn matches_hand(gesture: GestureId, hand: &Hand, tol: &ToleranceProfile) -> bool {
    let f = FingerStates::read(hand, tol.finger_margin, tol.thumb_margin);
    let strict = tol.require_closed_others;

    match gesture {
        GestureId::ThumbsUp => thumb_only(&f) && hand.landmarks[THUMB_TIP].y < hand.wrist().y,
        GestureId::ThumbsDown => thumb_only(&f) && hand.landmarks[THUMB_TIP].y > hand.wrist().y,
        GestureId::Peace => is_peace(&f, strict),
        GestureId::HangLoose => {
            f.thumb && f.pinky && (!strict || (!f.index && !f.middle && !f.ring))
        }
        GestureId::Fist => is_fist(hand, tol),
        GestureId::OpenHand | GestureId::HighFive => is_open(hand, tol),
        GestureId::Pointing => f.index && (!strict || (!f.middle && !f.ring && !f.pinky)),
        GestureId::CrossedFingers => {
            if tol.crossed_requires_touch {
                is_peace(&f, true)
                    && hand.landmarks[INDEX_TIP].distance(&hand.landmarks[MIDDLE_TIP])
                        < tol.crossed_tip_distance
            } else {
                is_peace(&f, strict)
            }
        }
        GestureId::OkSign => {
            let pinch = hand.landmarks[THUMB_TIP].distance(&hand.landmarks[INDEX_TIP]);
            pinch < tol.ok_tip_distance && (!tol.ok_requires_others || (f.middle && f.ring && f.pinky))
        }
        GestureId::HandsUp
        | GestureId::HandsOpen
        | GestureId::HandsTogether
        | GestureId::Waving
        | GestureId::Muscle => false,
    }
}

/// At most `fist_max_extended` digits out
pub fn is_fist(hand: &Hand, tol: &ToleranceProfile) -> bool {
    let f = FingerStates::read(hand, tol.finger_margin, tol.thumb_margin);
    f.extended_count() <= tol.fist_max_extended
}

/// At least `open_min_extended` digits out
pub fn is_open(hand: &Hand, tol: &ToleranceProfile) -> bool {
    let f = FingerStates::read(hand, tol.finger_margin, tol.thumb_margin);
    f.extended_count() >= tol.open_min_extended
}

fn thumb_only(f: &FingerStates) -> bool {
    f.thumb && f.fingers_closed()
}

fn is_peace(f: &FingerStates, closed_others: bool) -> bool {
    f.index && f.middle && (!closed_others || (!f.ring && !f.pinky))
}
