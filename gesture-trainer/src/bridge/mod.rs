//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod game;
mod timers;

pub use game::{
    // Lifecycle
    begin_session,
    start_session,
    start_session_with_profile,
    report_camera_error,
    acknowledge_error,
    pause_game,
    resume_game,
    quit_game,
    return_home,
    set_page_hidden,
    // Frames
    apply_hand_frame,
    // Read-back
    get_view,
    drain_events,
    get_summary,
    get_catalog,
    is_clock_running,
};
