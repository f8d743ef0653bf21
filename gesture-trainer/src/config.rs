//! Session configuration - difficulty tables and tolerance tunables
//!
//! Everything here is chosen once before a session starts and stays
//! immutable until the session ends.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

// ============================================================================
// SELECTIONS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(GameError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// How forgiving classifiers and the match engine are
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Strict,
    #[default]
    Lenient,
}

impl FromStr for Strictness {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(Strictness::Strict),
            "lenient" | "fuzzy" => Ok(Strictness::Lenient),
            _ => Err(GameError::UnknownStrictness(s.to_string())),
        }
    }
}

/// Which gesture catalog rounds draw from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GestureMode {
    #[default]
    Hands,
    Arms,
}

impl FromStr for GestureMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hands" | "hand" => Ok(GestureMode::Hands),
            "arms" | "arm" => Ok(GestureMode::Arms),
            _ => Err(GameError::UnknownMode(s.to_string())),
        }
    }
}

/// User-facing side filter (already un-mirrored)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandSelection {
    Left,
    #[default]
    Right,
    Both,
}

impl FromStr for HandSelection {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(HandSelection::Left),
            "right" => Ok(HandSelection::Right),
            "both" => Ok(HandSelection::Both),
            _ => Err(GameError::UnknownHandSelection(s.to_string())),
        }
    }
}

impl fmt::Display for HandSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandSelection::Left => "left",
            HandSelection::Right => "right",
            HandSelection::Both => "both",
        };
        f.write_str(name)
    }
}

// ============================================================================
// TOLERANCE PROFILE
// ============================================================================

/// Every threshold that differs between the strict and lenient variants
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToleranceProfile {
    /// Added to the PIP y before the tip comparison (0 = strict)
    pub finger_margin: f32,
    /// Slack on the thumb's horizontal reach test
    pub thumb_margin: f32,
    /// Fist: at most this many fingers extended
    pub fist_max_extended: u8,
    /// Open hand: at least this many fingers extended
    pub open_min_extended: u8,
    /// Peace / pointing / hang loose / thumbs require the other fingers closed
    pub require_closed_others: bool,
    /// Crossed fingers must have touching tips (otherwise same rule as peace)
    pub crossed_requires_touch: bool,
    pub crossed_tip_distance: f32,
    pub ok_tip_distance: f32,
    /// OK sign also needs middle, ring and pinky extended
    pub ok_requires_others: bool,
    /// Two-hand gestures need this many qualifying hands
    pub hands_required: u8,
    /// Wrist y must be below this (i.e. higher on screen) for hands up
    pub hands_up_height: f32,
    pub together_distance: f32,
    /// Single hand near the horizontal centre counts as hands together
    pub together_single_hand: bool,
    pub together_center_band: f32,
    pub muscle_height: f32,
    pub waving_min_changes: u8,

    /// Confidence gained on a matching frame
    pub rise_step: f32,
    /// Confidence lost on a non-matching frame with a hand present
    pub mismatch_decay: f32,
    /// Confidence lost on a frame with no relevant hand
    pub absent_decay: f32,
    /// Credit for trying, applied before the mismatch decay (kept below it)
    pub presence_bonus: f32,
    /// Mismatch decay never takes confidence below this
    pub mismatch_floor: f32,
    /// Confidence at which a round is recognized without a held match
    pub auto_success: Option<f32>,
}

impl ToleranceProfile {
    pub fn strict() -> Self {
        Self {
            finger_margin: 0.0,
            thumb_margin: 0.0,
            fist_max_extended: 0,
            open_min_extended: 5,
            require_closed_others: true,
            crossed_requires_touch: true,
            crossed_tip_distance: 0.05,
            ok_tip_distance: 0.08,
            ok_requires_others: true,
            hands_required: 2,
            hands_up_height: 0.4,
            together_distance: 0.15,
            together_single_hand: false,
            together_center_band: 0.0,
            muscle_height: 0.5,
            waving_min_changes: 3,
            rise_step: 15.0,
            mismatch_decay: 5.0,
            absent_decay: 5.0,
            presence_bonus: 0.0,
            mismatch_floor: 0.0,
            auto_success: None,
        }
    }

    pub fn lenient() -> Self {
        Self {
            finger_margin: 0.03,
            thumb_margin: 0.02,
            fist_max_extended: 2,
            open_min_extended: 3,
            require_closed_others: false,
            crossed_requires_touch: false,
            crossed_tip_distance: 0.08,
            ok_tip_distance: 0.12,
            ok_requires_others: false,
            hands_required: 1,
            hands_up_height: 0.5,
            together_distance: 0.2,
            together_single_hand: true,
            together_center_band: 0.15,
            muscle_height: 0.6,
            waving_min_changes: 1,
            rise_step: 20.0,
            mismatch_decay: 2.0,
            absent_decay: 3.0,
            presence_bonus: 0.5,
            mismatch_floor: 10.0,
            auto_success: Some(95.0),
        }
    }

    pub fn for_strictness(strictness: Strictness) -> Self {
        match strictness {
            Strictness::Strict => Self::strict(),
            Strictness::Lenient => Self::lenient(),
        }
    }

    /// Reject tunables that would break the confidence or hold invariants
    pub fn validate(&self) -> Result<()> {
        let steps = [
            self.rise_step,
            self.mismatch_decay,
            self.absent_decay,
            self.presence_bonus,
        ];
        if steps.iter().any(|s| !s.is_finite() || *s < 0.0) {
            return Err(GameError::InvalidProfile("confidence steps must be finite and >= 0".into()));
        }
        if self.absent_decay <= 0.0 {
            return Err(GameError::InvalidProfile("absent decay must be positive".into()));
        }
        if self.rise_step <= self.mismatch_decay {
            return Err(GameError::InvalidProfile("rise step must exceed mismatch decay".into()));
        }
        // Otherwise a wrong pose held long enough climbs to auto-success
        if self.presence_bonus >= self.mismatch_decay {
            return Err(GameError::InvalidProfile("presence bonus must be below mismatch decay".into()));
        }
        if !(0.0..=100.0).contains(&self.mismatch_floor) {
            return Err(GameError::InvalidProfile("mismatch floor must be within 0-100".into()));
        }
        if let Some(ceiling) = self.auto_success {
            if !(0.0..=100.0).contains(&ceiling) || ceiling <= self.mismatch_floor {
                return Err(GameError::InvalidProfile(
                    "auto-success ceiling must be within 0-100 and above the floor".into(),
                ));
            }
        }
        if self.open_min_extended > 5 || self.fist_max_extended > 5 {
            return Err(GameError::InvalidProfile("finger counts must be at most 5".into()));
        }
        if self.hands_required == 0 || self.hands_required > 2 {
            return Err(GameError::InvalidProfile("hands required must be 1 or 2".into()));
        }
        Ok(())
    }
}

impl Default for ToleranceProfile {
    fn default() -> Self {
        Self::lenient()
    }
}

// ============================================================================
// DIFFICULTY PROFILE
// ============================================================================

/// Longest round a custom profile may ask for (one hour)
pub const MAX_SECONDS_PER_ROUND: u32 = 3600;

/// Most rounds a custom profile may ask for
pub const MAX_TOTAL_ROUNDS: u32 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub seconds_per_round: u32,
    pub required_hold_secs: f64,
    pub total_rounds: u32,
    pub tolerance: ToleranceProfile,
}

impl DifficultyProfile {
    /// Built-in tables; lenient rounds are longer and fewer
    pub fn preset(difficulty: Difficulty, strictness: Strictness) -> Self {
        let (seconds_per_round, required_hold_secs, total_rounds) = match (strictness, difficulty) {
            (Strictness::Strict, Difficulty::Easy) => (15, 1.5, 8),
            (Strictness::Strict, Difficulty::Medium) => (10, 1.0, 10),
            (Strictness::Strict, Difficulty::Hard) => (7, 0.8, 12),
            (Strictness::Lenient, Difficulty::Easy) => (20, 1.0, 6),
            (Strictness::Lenient, Difficulty::Medium) => (15, 0.8, 8),
            (Strictness::Lenient, Difficulty::Hard) => (10, 0.6, 10),
        };

        Self {
            seconds_per_round,
            required_hold_secs,
            total_rounds,
            tolerance: ToleranceProfile::for_strictness(strictness),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SECONDS_PER_ROUND).contains(&self.seconds_per_round) {
            return Err(GameError::InvalidProfile(format!(
                "seconds per round must be within 1-{}",
                MAX_SECONDS_PER_ROUND
            )));
        }
        if !(1..=MAX_TOTAL_ROUNDS).contains(&self.total_rounds) {
            return Err(GameError::InvalidProfile(format!(
                "round count must be within 1-{}",
                MAX_TOTAL_ROUNDS
            )));
        }
        if !self.required_hold_secs.is_finite() || self.required_hold_secs < 0.0 {
            return Err(GameError::InvalidProfile("hold time must be finite and >= 0".into()));
        }
        self.tolerance.validate()
    }
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Self::preset(Difficulty::default(), Strictness::default())
    }
}

/// Snapshot of all user choices, taken at session start
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GestureMode,
    pub hand_selection: HandSelection,
    pub profile: DifficultyProfile,
}

impl GameConfig {
    pub fn new(mode: GestureMode, hand_selection: HandSelection, profile: DifficultyProfile) -> Self {
        Self { mode, hand_selection, profile }
    }
}
