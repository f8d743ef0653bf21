//! Game bridge - JS entry points driving the training session
//!
//! Holds the single live `Session` for the page. JavaScript forwards
//! tracker results and button presses here and reads back the view and
//! drained events after each call.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::config::{DifficultyProfile, GameConfig, GestureMode, HandSelection};
use crate::error::GameError;
use crate::gestures::catalog;
use crate::hand::Frame;
use crate::session::{ClockCommand, RoundToken, Session, ADVANCE_DELAY_MS};

use super::timers::{clock_running, now_secs, restart_clock, run_later, stop_clock};

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static GAME: RefCell<Session> = RefCell::new(Session::new());
}

/// Run `f` on the live session, then apply any clock change it asked for
fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> T {
    let out = GAME.with(|cell| f(&mut cell.borrow_mut()));
    sync_clock();
    out
}

fn sync_clock() {
    match GAME.with(|cell| cell.borrow_mut().take_clock_command()) {
        Some(ClockCommand::Restart) => {
            if let Err(e) = restart_clock(on_clock_tick) {
                log::error!("Could not start round clock: {:?}", e);
            }
        }
        Some(ClockCommand::Stop) => stop_clock(),
        None => {}
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

// ============================================================================
// LIFECYCLE
// ============================================================================

/// Start screen pressed "start": camera and tracker are being set up
#[wasm_bindgen]
pub fn begin_session() -> Result<(), JsValue> {
    with_session(|s| s.begin_loading()).map_err(Into::into)
}

/// Camera is live; start round 1 with a preset profile
#[wasm_bindgen]
pub fn start_session(mode: &str, hand: &str, difficulty: &str, strictness: &str) -> Result<(), JsValue> {
    let profile = DifficultyProfile::preset(difficulty.parse()?, strictness.parse()?);
    start_with(mode, hand, profile)
}

/// Same as `start_session` with a full profile object from JS
#[wasm_bindgen]
pub fn start_session_with_profile(mode: &str, hand: &str, profile: JsValue) -> Result<(), JsValue> {
    let profile: DifficultyProfile = serde_wasm_bindgen::from_value(profile)
        .map_err(|e| GameError::InvalidProfile(e.to_string()))?;
    start_with(mode, hand, profile)
}

fn start_with(mode: &str, hand: &str, profile: DifficultyProfile) -> Result<(), JsValue> {
    let mode: GestureMode = mode.parse()?;
    let hand: HandSelection = hand.parse()?;
    let config = GameConfig::new(mode, hand, profile);

    with_session(|s| s.start(config, &mut rand::thread_rng()))?;
    Ok(())
}

fn on_clock_tick() {
    with_session(|s| s.tick(&mut rand::thread_rng()));
}

/// Camera or tracker setup failed (`error_name` is the DOMException name)
#[wasm_bindgen]
pub fn report_camera_error(error_name: &str, message: &str) {
    let error = if error_name == "NotAllowedError" {
        GameError::CameraPermissionDenied
    } else {
        GameError::CameraUnavailable(message.to_string())
    };
    with_session(|s| s.fail_acquisition(error));
}

#[wasm_bindgen]
pub fn acknowledge_error() -> Result<(), JsValue> {
    with_session(|s| s.acknowledge_error()).map_err(Into::into)
}

#[wasm_bindgen]
pub fn pause_game() -> Result<(), JsValue> {
    with_session(|s| s.pause(now_secs())).map_err(Into::into)
}

#[wasm_bindgen]
pub fn resume_game() -> Result<(), JsValue> {
    with_session(|s| s.resume(now_secs(), &mut rand::thread_rng())).map_err(Into::into)
}

#[wasm_bindgen]
pub fn quit_game() -> Result<(), JsValue> {
    with_session(|s| s.quit()).map_err(Into::into)
}

#[wasm_bindgen]
pub fn return_home() -> Result<(), JsValue> {
    with_session(|s| s.return_home()).map_err(Into::into)
}

/// Called from the `visibilitychange` listener
#[wasm_bindgen]
pub fn set_page_hidden(hidden: bool) {
    with_session(|s| s.set_page_hidden(hidden, now_secs()));
}

// ============================================================================
// FRAMES
// ============================================================================

/// Called from the tracker's results callback
///
/// `flat_data` holds hands × 21 × (x, y, z); `handedness` holds the raw
/// tracker label ("Left"/"Right") of each hand, in the same order.
#[wasm_bindgen]
pub fn apply_hand_frame(flat_data: &[f32], handedness: Vec<String>) {
    let frame = match Frame::from_flat(flat_data, &handedness) {
        Ok(frame) => frame,
        Err(e) => {
            log::warn!("Dropping frame: {}", e);
            return;
        }
    };

    let recognized = with_session(|s| {
        let update = s.process_frame(&frame, now_secs(), &mut rand::thread_rng());
        update.and_then(|u| u.recognized).and(s.pending_advance())
    });

    if let Some(token) = recognized {
        schedule_advance(token);
    }
}

/// Start the next round after the celebration, if the round is still current
fn schedule_advance(token: RoundToken) {
    let scheduled = run_later(ADVANCE_DELAY_MS, move || {
        with_session(|s| s.advance(token, &mut rand::thread_rng()));
    });
    if let Err(e) = scheduled {
        log::error!("Could not schedule next round, advancing now: {:?}", e);
        with_session(|s| s.advance(token, &mut rand::thread_rng()));
    }
}

// ============================================================================
// READ-BACK
// ============================================================================

/// Current screen state (score, timer, round, target, confidence, ...)
#[wasm_bindgen]
pub fn get_view() -> Result<JsValue, JsValue> {
    let view = with_session(|s| s.view());
    to_js(&view)
}

/// Events recorded since the last call, oldest first
#[wasm_bindgen]
pub fn drain_events() -> Result<JsValue, JsValue> {
    let events = with_session(|s| s.drain_events());
    to_js(&events)
}

/// Result screen data, or `undefined` before a session has ended
#[wasm_bindgen]
pub fn get_summary() -> Result<JsValue, JsValue> {
    match with_session(|s| s.summary().cloned()) {
        Some(summary) => to_js(&summary),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Whether the 1 Hz round clock is armed
#[wasm_bindgen]
pub fn is_clock_running() -> bool {
    clock_running()
}

/// Gestures available in a mode, for the start screen preview
#[wasm_bindgen]
pub fn get_catalog(mode: &str) -> Result<JsValue, JsValue> {
    let mode: GestureMode = mode.parse()?;
    to_js(&catalog(mode))
}
