//! Finger extension states
//!
//! The four fingers flex along the image y axis, so a finger counts as
//! extended when its tip sits above its PIP joint. The thumb folds across
//! the palm instead, so it is judged by horizontal reach from the wrist.

use super::landmarks::{
    Hand, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP, RING_PIP, RING_TIP,
    THUMB_IP, THUMB_TIP, WRIST,
};

/// Extension flags for all five digits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Read finger states with the given tolerance margins
    ///
    /// - `finger_margin`: how far below its PIP a tip may sit and still count
    /// - `thumb_margin`: slack on the thumb reach comparison
    pub fn read(hand: &Hand, finger_margin: f32, thumb_margin: f32) -> Self {
        let l = &hand.landmarks;
        let finger = |tip: usize, pip: usize| l[tip].y < l[pip].y + finger_margin;

        let tip_reach = (l[THUMB_TIP].x - l[WRIST].x).abs();
        let ip_reach = (l[THUMB_IP].x - l[WRIST].x).abs();

        Self {
            thumb: tip_reach > ip_reach - thumb_margin,
            index: finger(INDEX_TIP, INDEX_PIP),
            middle: finger(MIDDLE_TIP, MIDDLE_PIP),
            ring: finger(RING_TIP, RING_PIP),
            pinky: finger(PINKY_TIP, PINKY_PIP),
        }
    }

    pub fn extended_count(&self) -> u8 {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|e| **e)
            .count() as u8
    }

    /// None of index, middle, ring, pinky
    pub fn fingers_closed(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }
}
