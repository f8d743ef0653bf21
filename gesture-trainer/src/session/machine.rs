//! Session state machine
//!
//! `Idle -> Loading -> Active <-> Paused -> Resulting -> Idle`, plus
//! `Error` when the camera cannot be acquired. The session is driven by
//! two independent callbacks, frames and a 1 Hz tick, and by the one-shot
//! "next round" continuation that follows a recognized gesture. Every
//! entry point checks the phase before touching round state. The session
//! owns no timers; it tells the host when to restart or stop the clock.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::config::GameConfig;
use crate::engine::{MatchEngine, MatchUpdate, RecognitionCause};
use crate::error::{GameError, Result};
use crate::gestures::{catalog, GestureDefinition};
use crate::hand::{Frame, HandSide};

use super::events::{SessionEvent, SessionView};
use super::feedback::{instruction, pick_encouragement, HAPTIC_PATTERN};
use super::round::{Round, RoundToken};
use super::summary::SessionSummary;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Loading,
    Active,
    Paused,
    Resulting,
    Error,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Loading => "loading",
            SessionPhase::Active => "active",
            SessionPhase::Paused => "paused",
            SessionPhase::Resulting => "resulting",
            SessionPhase::Error => "error",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the host's 1 Hz round clock should do next
///
/// Every round gets a fresh interval so its first second is a full one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockCommand {
    /// Clear any running interval and start a new one
    Restart,
    /// Clear the interval
    Stop,
}

/// What a tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer gated (paused, celebrating, or no session)
    Idle,
    Counted { seconds_remaining: u32 },
    TimedOut { next_round_started: bool },
}

pub struct Session {
    phase: SessionPhase,
    config: GameConfig,
    /// Bumped on every start so old continuations never match
    generation: u32,
    round_index: u32,
    score: u32,
    recognized_count: u32,
    best_time_secs: Option<u32>,
    round: Option<Round>,
    engine: Option<MatchEngine>,
    /// Continuation that will start the next round after a recognition
    pending_advance: Option<RoundToken>,
    /// The continuation arrived while paused; run it on resume
    advance_on_resume: bool,
    hand_detected: bool,
    detected_sides: Vec<HandSide>,
    summary: Option<SessionSummary>,
    error: Option<GameError>,
    events: Vec<SessionEvent>,
    /// Latest clock change the host has not applied yet
    clock: Option<ClockCommand>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            config: GameConfig::default(),
            generation: 0,
            round_index: 0,
            score: 0,
            recognized_count: 0,
            best_time_secs: None,
            round: None,
            engine: None,
            pending_advance: None,
            advance_on_resume: false,
            hand_detected: false,
            detected_sides: Vec::new(),
            summary: None,
            error: None,
            events: Vec::new(),
            clock: None,
        }
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Camera and tracker are being set up
    pub fn begin_loading(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Resulting => {
                self.phase = SessionPhase::Loading;
                Ok(())
            }
            from => Err(self.invalid(from, "load")),
        }
    }

    /// Camera or permission failure; no partial session survives
    pub fn fail_acquisition(&mut self, error: GameError) {
        log::warn!("Camera acquisition failed: {}", error);
        self.clear_progress();
        self.round = None;
        self.engine = None;
        self.summary = None;
        self.events.push(SessionEvent::Error { message: error.to_string() });
        self.error = Some(error);
        self.phase = SessionPhase::Error;
        self.clock = Some(ClockCommand::Stop);
    }

    pub fn acknowledge_error(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Error => {
                self.error = None;
                self.phase = SessionPhase::Idle;
                Ok(())
            }
            from => Err(self.invalid(from, "acknowledge an error")),
        }
    }

    /// Snapshot `config` and start round 1
    pub fn start<R: Rng + ?Sized>(&mut self, config: GameConfig, rng: &mut R) -> Result<()> {
        match self.phase {
            SessionPhase::Idle | SessionPhase::Loading | SessionPhase::Resulting => {}
            from => return Err(self.invalid(from, "start")),
        }
        config.profile.validate()?;

        self.config = config;
        self.generation = self.generation.wrapping_add(1);
        self.clear_progress();
        self.summary = None;
        self.engine = Some(MatchEngine::new(&config.profile));
        self.phase = SessionPhase::Active;

        log::info!(
            "Session started: {:?} mode, {} hand, {} rounds of {}s",
            config.mode, config.hand_selection, config.profile.total_rounds, config.profile.seconds_per_round
        );

        self.next_round(rng);
        Ok(())
    }

    pub fn pause(&mut self, now: f64) -> Result<()> {
        match self.phase {
            SessionPhase::Active => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.pause(now);
                }
                self.phase = SessionPhase::Paused;
                self.clock = Some(ClockCommand::Stop);
                self.events.push(SessionEvent::Paused);
                log::debug!("Paused in round {}", self.round_index);
                Ok(())
            }
            from => Err(self.invalid(from, "pause")),
        }
    }

    pub fn resume<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R) -> Result<()> {
        match self.phase {
            SessionPhase::Paused => {
                if let Some(engine) = self.engine.as_mut() {
                    engine.resume(now);
                }
                self.phase = SessionPhase::Active;
                self.clock = Some(ClockCommand::Restart);
                self.events.push(SessionEvent::Resumed);

                if std::mem::take(&mut self.advance_on_resume) {
                    self.pending_advance = None;
                    self.next_round(rng);
                }
                Ok(())
            }
            from => Err(self.invalid(from, "resume")),
        }
    }

    /// Page visibility changed; hiding an active game pauses it
    pub fn set_page_hidden(&mut self, hidden: bool, now: f64) {
        if hidden && self.phase == SessionPhase::Active {
            // Active is the only phase pause accepts
            let _ = self.pause(now);
        }
    }

    /// End the session at current progress
    pub fn quit(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Active | SessionPhase::Paused => {
                log::info!("Session quit in round {}", self.round_index);
                self.finish();
                Ok(())
            }
            from => Err(self.invalid(from, "quit")),
        }
    }

    /// Leave the result screen
    pub fn return_home(&mut self) -> Result<()> {
        match self.phase {
            SessionPhase::Resulting | SessionPhase::Idle => {
                self.phase = SessionPhase::Idle;
                Ok(())
            }
            from => Err(self.invalid(from, "return home")),
        }
    }

    // ========================================================================
    // CALLBACKS
    // ========================================================================

    /// Feed one tracker frame; ignored unless a round is live
    pub fn process_frame<R: Rng + ?Sized>(
        &mut self,
        frame: &Frame,
        now: f64,
        rng: &mut R,
    ) -> Option<MatchUpdate> {
        if self.phase != SessionPhase::Active {
            return None;
        }
        let round = self.round.as_ref().filter(|r| !r.recognized)?;
        let gesture = round.gesture;
        let engine = self.engine.as_mut()?;

        self.hand_detected = !frame.is_empty();
        self.detected_sides = frame.sides();

        let update = engine.update(gesture, frame, self.config.hand_selection, now);
        if let Some(cause) = update.recognized {
            self.complete_round(cause, rng);
        }
        Some(update)
    }

    /// One second of round time; fired by the host's 1 Hz clock
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> TickOutcome {
        if self.phase != SessionPhase::Active {
            return TickOutcome::Idle;
        }
        let Some(round) = self.round.as_mut().filter(|r| !r.recognized) else {
            return TickOutcome::Idle;
        };

        if !round.tick() {
            return TickOutcome::Counted { seconds_remaining: round.seconds_remaining };
        }

        let index = round.index;
        log::info!("Round {} timed out", index);
        self.events.push(SessionEvent::RoundTimedOut { round: index });
        self.next_round(rng);
        TickOutcome::TimedOut { next_round_started: self.phase == SessionPhase::Active }
    }

    /// The delayed continuation after a recognition
    ///
    /// Returns true if it started the next round. Stale tokens (a newer
    /// round or session, a quit) are ignored; while paused the advance
    /// waits for resume.
    pub fn advance<R: Rng + ?Sized>(&mut self, token: RoundToken, rng: &mut R) -> bool {
        if self.pending_advance != Some(token) {
            log::debug!("Ignoring stale advance for {:?}", token);
            return false;
        }

        match self.phase {
            SessionPhase::Active => {
                self.pending_advance = None;
                self.next_round(rng);
                true
            }
            SessionPhase::Paused => {
                self.advance_on_resume = true;
                false
            }
            _ => {
                self.pending_advance = None;
                false
            }
        }
    }

    // ========================================================================
    // TRANSITIONS
    // ========================================================================

    fn complete_round<R: Rng + ?Sized>(&mut self, cause: RecognitionCause, rng: &mut R) {
        let Some(round) = self.round.as_mut() else {
            return;
        };
        if round.recognized {
            return;
        }
        round.recognized = true;

        let points = round.points();
        let seconds_taken = self.config.profile.seconds_per_round - round.seconds_remaining;
        let token = RoundToken { generation: self.generation, round: round.index };

        self.score = self.score.saturating_add(points);
        self.recognized_count += 1;
        self.best_time_secs = Some(match self.best_time_secs {
            Some(best) => best.min(seconds_taken),
            None => seconds_taken,
        });
        self.pending_advance = Some(token);

        log::info!("Round {} recognized: +{} points ({}s)", token.round, points, seconds_taken);

        self.events.push(SessionEvent::GestureRecognized {
            token,
            points,
            score: self.score,
            seconds_taken,
            kind: cause.into(),
            encouragement: pick_encouragement(rng),
            haptic: HAPTIC_PATTERN,
        });
    }

    fn next_round<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.round_index += 1;

        if self.round_index > self.config.profile.total_rounds {
            self.finish();
            return;
        }

        let gesture = pick_gesture(catalog(self.config.mode), rng);
        let round = Round::new(self.round_index, gesture, self.config.profile.seconds_per_round);

        if let Some(engine) = self.engine.as_mut() {
            engine.reset();
        }
        self.hand_detected = false;
        self.detected_sides.clear();

        log::debug!("Round {}/{}: {}", round.index, self.config.profile.total_rounds, gesture.name);
        self.events.push(SessionEvent::RoundStarted {
            round: round.index,
            total_rounds: self.config.profile.total_rounds,
            gesture: gesture.id,
            glyph: gesture.glyph,
            name: gesture.name,
            instruction: instruction(self.config.mode, self.config.hand_selection),
            seconds: round.seconds_remaining,
        });
        self.round = Some(round);
        self.clock = Some(ClockCommand::Restart);
    }

    /// Cancel everything round-scoped and publish the summary
    fn finish(&mut self) {
        self.pending_advance = None;
        self.advance_on_resume = false;
        self.round = None;

        let summary = SessionSummary::new(
            self.score,
            self.recognized_count,
            self.config.profile.total_rounds,
            self.best_time_secs,
        );
        log::info!(
            "Session ended: score {}, {} recognized, {}% ({})",
            summary.score,
            summary.recognized_label(),
            summary.accuracy_percent,
            summary.tier.as_str()
        );

        self.events.push(SessionEvent::SessionEnded { summary: summary.clone() });
        self.summary = Some(summary);
        self.phase = SessionPhase::Resulting;
        self.clock = Some(ClockCommand::Stop);
    }

    fn clear_progress(&mut self) {
        self.round_index = 0;
        self.score = 0;
        self.recognized_count = 0;
        self.best_time_secs = None;
        self.round = None;
        self.pending_advance = None;
        self.advance_on_resume = false;
        self.hand_detected = false;
        self.detected_sides.clear();
    }

    fn invalid(&self, from: SessionPhase, action: &'static str) -> GameError {
        GameError::InvalidTransition { from: from.as_str(), action }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    pub fn recognized_count(&self) -> u32 {
        self.recognized_count
    }

    pub fn best_time_secs(&self) -> Option<u32> {
        self.best_time_secs
    }

    pub fn current_round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn pending_advance(&self) -> Option<RoundToken> {
        self.pending_advance
    }

    pub fn confidence(&self) -> f32 {
        self.engine.as_ref().map_or(0.0, |e| e.confidence())
    }

    pub fn hold_secs(&self) -> f64 {
        self.engine.as_ref().map_or(0.0, |e| e.hold_secs())
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    pub fn error(&self) -> Option<&GameError> {
        self.error.as_ref()
    }

    /// Take the pending clock change, if any
    pub fn take_clock_command(&mut self) -> Option<ClockCommand> {
        self.clock.take()
    }

    /// Take everything recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn view(&self) -> SessionView {
        let total = self.config.profile.total_rounds;
        let shown_round = self.round_index.min(total);
        let round = self.round.as_ref();

        SessionView {
            phase: self.phase.as_str(),
            score: self.score,
            seconds_remaining: round.map_or(0, |r| r.seconds_remaining),
            round: shown_round,
            total_rounds: total,
            round_label: format!("{}/{}", shown_round, total),
            target_glyph: round.map(|r| r.gesture.glyph),
            target_name: round.map(|r| r.gesture.name),
            instruction: instruction(self.config.mode, self.config.hand_selection),
            confidence_percent: self.engine.as_ref().map_or(0, |e| e.confidence_percent()),
            hand_detected: self.hand_detected,
            detected_sides: self.detected_sides.clone(),
            celebrating: self.pending_advance.is_some(),
            error: self.error.as_ref().map(|e| e.to_string()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform pick from a non-empty catalog
fn pick_gesture<R: Rng + ?Sized>(gestures: &'static [GestureDefinition], rng: &mut R) -> &'static GestureDefinition {
    gestures.choose(rng).unwrap_or(&gestures[0])
}
