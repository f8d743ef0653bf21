//! Gesture classifier - dispatches a target gesture to its rule
//!
//! Hand gestures match if any relevant hand shows them. Arm gestures
//! look at every hand in the frame, the way the arm prompts are shown
//! (both arms in view), once at least one relevant hand is present.

use crate::config::{HandSelection, ToleranceProfile};
use crate::error::Result;
use crate::hand::{Frame, Hand};

use super::arm_rules::matches_frame;
use super::catalog::{GestureDefinition, GestureScope};
use super::hand_rules::matches_hand;
use super::waving::WaveTracker;

pub struct GestureClassifier {
    tolerance: ToleranceProfile,
    waves: WaveTracker,
}

impl GestureClassifier {
    pub fn new(tolerance: ToleranceProfile) -> Self {
        Self {
            tolerance,
            waves: WaveTracker::new(),
        }
    }

    pub fn tolerance(&self) -> &ToleranceProfile {
        &self.tolerance
    }

    /// Classify one frame against the target gesture
    ///
    /// Fails if any hand the rule would read carries malformed landmarks.
    pub fn classify(
        &mut self,
        gesture: &GestureDefinition,
        frame: &Frame,
        selection: HandSelection,
    ) -> Result<bool> {
        match gesture.scope {
            GestureScope::SingleHand => {
                let relevant: Vec<&Hand> = frame.relevant_hands(selection).collect();
                for hand in &relevant {
                    hand.validate()?;
                }
                Ok(relevant
                    .iter()
                    .any(|h| matches_hand(gesture.id, h, &self.tolerance)))
            }
            GestureScope::WholeFrame => {
                for hand in &frame.hands {
                    hand.validate()?;
                }
                Ok(matches_frame(
                    gesture.id,
                    &frame.hands,
                    selection,
                    &self.tolerance,
                    &mut self.waves,
                ))
            }
        }
    }

    /// Forget temporal history (round start)
    pub fn reset(&mut self) {
        self.waves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gestures::catalog::GestureId;
    use crate::hand::test_hands::*;
    use crate::hand::{HandSide, INDEX_TIP};
    use crate::error::GameError;

    #[test]
    fn hand_gesture_respects_side_filter() {
        let mut left_fist = fist();
        left_fist.side = HandSide::Left;
        let frame = Frame::new(vec![left_fist, open_hand()]);
        let mut classifier = GestureClassifier::new(ToleranceProfile::strict());
        let target = GestureId::Fist.definition();

        assert!(classifier.classify(target, &frame, HandSelection::Left).unwrap());
        assert!(!classifier.classify(target, &frame, HandSelection::Right).unwrap());
        assert!(classifier.classify(target, &frame, HandSelection::Both).unwrap());
    }

    #[test]
    fn malformed_hand_is_an_error() {
        let mut hand = fist();
        hand.landmarks[INDEX_TIP].x = f32::INFINITY;
        let frame = Frame::new(vec![hand]);
        let mut classifier = GestureClassifier::new(ToleranceProfile::lenient());

        let result = classifier.classify(GestureId::Pointing.definition(), &frame, HandSelection::Both);
        assert_eq!(result, Err(GameError::NonFiniteLandmark { index: INDEX_TIP }));
    }

    #[test]
    fn reset_clears_wave_history() {
        let mut classifier = GestureClassifier::new(ToleranceProfile::lenient());
        let target = GestureId::Waving.definition();
        for i in 0..8 {
            let frame = Frame::new(vec![open_hand_at(0.3 + 0.05 * (i % 3) as f32, 0.5)]);
            classifier.classify(target, &frame, HandSelection::Both).unwrap();
        }
        classifier.reset();
        let frame = Frame::new(vec![open_hand_at(0.6, 0.5)]);
        assert!(!classifier.classify(target, &frame, HandSelection::Both).unwrap());
    }
}
