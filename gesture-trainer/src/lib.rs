//! Gesture Trainer - hand gesture rehabilitation game for the browser
//!
//! Entry point for the WASM module. Contains:
//! - Module declarations
//! - wasm_bindgen entry points for startup and logging
//!
//! The game prompts a hand or arm gesture, scores how well the tracked
//! hand landmarks match it, and runs a timed, round-based session.
//! Thresholds are forgiving on purpose: players are recovering from
//! strokes.

pub mod bridge;
pub mod config;
pub mod engine;
pub mod error;
pub mod gestures;
pub mod hand;
pub mod session;

use wasm_bindgen::prelude::*;

pub use bridge::*;
pub use config::{Difficulty, DifficultyProfile, GameConfig, GestureMode, HandSelection, Strictness, ToleranceProfile};
pub use error::{GameError, Result};
pub use session::{Session, SessionEvent, SessionPhase, SessionSummary, SessionView};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console
///
/// `level`: "trace", "debug", "info", "warn" or "error" (default info)
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let log_level = match level.to_lowercase().as_str() {
        "trace" => log::Level::Trace,
        "debug" => log::Level::Debug,
        "warn" => log::Level::Warn,
        "error" => log::Level::Error,
        _ => log::Level::Info,
    };

    wasm_logger::init(wasm_logger::Config::new(log_level));
    log::info!("✅ Gesture trainer ready (log level {})", log_level);
}
