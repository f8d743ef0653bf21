//! Hand landmark data as delivered by the hand tracker
//!
//! Frames arrive from JavaScript as a flat Float32Array of
//! hands × 21 landmarks × (x, y, z) plus one handedness label per hand.
//! The tracker labels sides as seen in the mirrored selfie view, so the
//! labels are un-mirrored here, once, before anything else reads them.

use serde::Serialize;

use crate::config::HandSelection;
use crate::error::{GameError, Result};

// ============================================================================
// HAND LANDMARK INDICES (MediaPipe Hands - 21 total)
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
/// Middle finger MCP, used as the palm centre
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

pub const HAND_LANDMARK_COUNT: usize = 21;

/// Floats per hand in the flat frame buffer
pub const VALUES_PER_HAND: usize = HAND_LANDMARK_COUNT * 3;

/// The tracker is configured for at most two hands
pub const MAX_HANDS: usize = 2;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark in normalized frame coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32, // 0-1, left to right
    pub y: f32, // 0-1, top to bottom
    pub z: f32, // relative depth
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Planar distance, depth is too noisy to use
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// The user's physical hand
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Un-mirror a tracker label: "Left" in the selfie view is the right hand
    pub fn from_mirrored_label(label: &str) -> Option<HandSide> {
        match label.trim().to_lowercase().as_str() {
            "left" => Some(HandSide::Right),
            "right" => Some(HandSide::Left),
            _ => None,
        }
    }

    pub fn is_selected(self, selection: HandSelection) -> bool {
        match selection {
            HandSelection::Both => true,
            HandSelection::Left => self == HandSide::Left,
            HandSelection::Right => self == HandSide::Right,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub landmarks: [Landmark; HAND_LANDMARK_COUNT],
    pub side: HandSide,
}

impl Hand {
    pub fn new(landmarks: [Landmark; HAND_LANDMARK_COUNT], side: HandSide) -> Self {
        Self { landmarks, side }
    }

    pub fn wrist(&self) -> &Landmark {
        &self.landmarks[WRIST]
    }

    pub fn palm_center(&self) -> &Landmark {
        &self.landmarks[MIDDLE_MCP]
    }

    /// Classifiers assume finite coordinates; anything else is rejected per frame
    pub fn validate(&self) -> Result<()> {
        match self.landmarks.iter().position(|l| !l.is_finite()) {
            Some(index) => Err(GameError::NonFiniteLandmark { index }),
            None => Ok(()),
        }
    }
}

/// All hands seen in one video frame
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub hands: Vec<Hand>,
}

impl Frame {
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the flat buffer sent by the tracker callback
    ///
    /// `labels` holds the raw (mirrored) handedness label of each hand.
    /// Hands beyond `MAX_HANDS` or with an unreadable label are dropped.
    pub fn from_flat(data: &[f32], labels: &[String]) -> Result<Frame> {
        let hands = labels.len().min(MAX_HANDS);
        let expected = hands * VALUES_PER_HAND;
        if data.len() < expected {
            return Err(GameError::MalformedFrame {
                values: data.len(),
                hands,
                expected,
            });
        }

        let mut parsed = Vec::with_capacity(hands);
        for (h, label) in labels.iter().take(hands).enumerate() {
            let Some(side) = HandSide::from_mirrored_label(label) else {
                log::debug!("Dropping hand {} with unknown handedness '{}'", h, label);
                continue;
            };

            let mut landmarks = [Landmark::default(); HAND_LANDMARK_COUNT];
            for (i, landmark) in landmarks.iter_mut().enumerate() {
                let base = h * VALUES_PER_HAND + i * 3;
                *landmark = Landmark {
                    x: data[base],
                    y: data[base + 1],
                    z: data[base + 2],
                };
            }
            parsed.push(Hand::new(landmarks, side));
        }

        Ok(Frame::new(parsed))
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Hands the user chose to train with
    pub fn relevant_hands(&self, selection: HandSelection) -> impl Iterator<Item = &Hand> {
        self.hands.iter().filter(move |h| h.side.is_selected(selection))
    }

    pub fn sides(&self) -> Vec<HandSide> {
        self.hands.iter().map(|h| h.side).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_hand(x: f32, y: f32) -> Vec<f32> {
        (0..HAND_LANDMARK_COUNT).flat_map(|_| [x, y, 0.0]).collect()
    }

    #[test]
    fn unmirrors_labels() {
        assert_eq!(HandSide::from_mirrored_label("Left"), Some(HandSide::Right));
        assert_eq!(HandSide::from_mirrored_label("Right"), Some(HandSide::Left));
        assert_eq!(HandSide::from_mirrored_label("?"), None);
    }

    #[test]
    fn parses_two_hands() {
        let mut data = flat_hand(0.2, 0.3);
        data.extend(flat_hand(0.7, 0.8));
        let labels = vec!["Left".to_string(), "Right".to_string()];

        let frame = Frame::from_flat(&data, &labels).unwrap();
        assert_eq!(frame.hands.len(), 2);
        assert_eq!(frame.hands[0].side, HandSide::Right);
        assert!((frame.hands[1].wrist().x - 0.7).abs() < 1e-6);
    }

    #[test]
    fn short_buffer_is_malformed() {
        let data = vec![0.5; 10];
        let labels = vec!["Left".to_string()];
        assert!(matches!(
            Frame::from_flat(&data, &labels),
            Err(GameError::MalformedFrame { values: 10, hands: 1, expected: 63 })
        ));
    }

    #[test]
    fn no_labels_is_an_empty_frame() {
        let frame = Frame::from_flat(&[], &[]).unwrap();
        assert!(frame.is_empty());
    }

    #[test]
    fn filters_by_selection() {
        let data: Vec<f32> = flat_hand(0.2, 0.3).into_iter().chain(flat_hand(0.6, 0.3)).collect();
        let labels = vec!["Left".to_string(), "Right".to_string()];
        let frame = Frame::from_flat(&data, &labels).unwrap();

        let right: Vec<_> = frame.relevant_hands(HandSelection::Right).collect();
        assert_eq!(right.len(), 1);
        assert_eq!(right[0].side, HandSide::Right);
        assert_eq!(frame.relevant_hands(HandSelection::Both).count(), 2);
    }

    #[test]
    fn nan_landmark_fails_validation() {
        let mut landmarks = [Landmark::new(0.5, 0.5); HAND_LANDMARK_COUNT];
        landmarks[7].y = f32::NAN;
        let hand = Hand::new(landmarks, HandSide::Left);
        assert_eq!(hand.validate(), Err(GameError::NonFiniteLandmark { index: 7 }));
    }
}
