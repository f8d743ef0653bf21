//! Error types shared by the core and the JS bridge

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Everything that can go wrong while running a training session
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("camera access was denied, please allow camera access and try again")]
    CameraPermissionDenied,

    #[error("camera could not be started: {0}")]
    CameraUnavailable(String),

    #[error("malformed frame: {values} values for {hands} hand(s) (expected {expected})")]
    MalformedFrame {
        values: usize,
        hands: usize,
        expected: usize,
    },

    #[error("landmark {index} has a non-finite coordinate")]
    NonFiniteLandmark { index: usize },

    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
    UnknownDifficulty(String),

    #[error("unknown strictness '{0}' (expected strict or lenient)")]
    UnknownStrictness(String),

    #[error("unknown gesture mode '{0}' (expected hands or arms)")]
    UnknownMode(String),

    #[error("unknown hand selection '{0}' (expected left, right or both)")]
    UnknownHandSelection(String),

    #[error("invalid difficulty profile: {0}")]
    InvalidProfile(String),
}

impl GameError {
    /// Acquisition failures abort session start; everything else is per-frame
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(
            self,
            GameError::CameraPermissionDenied | GameError::CameraUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
