//! Browser timers - the 1 Hz round clock and one-shot continuations
//!
//! The clock callback is created once and kept for the page's lifetime;
//! only the interval around it is cleared and re-armed. That lets a tick
//! restart or stop the clock it is running in.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CLOCK_INTERVAL_MS: i32 = 1000;

struct Clock {
    /// Running interval, if any
    handle: Option<i32>,
    callback: Closure<dyn FnMut()>,
}

thread_local! {
    static CLOCK: RefCell<Option<Clock>> = RefCell::new(None);
}

fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("No window found"))
}

/// Clear any running interval and start a fresh one calling `on_tick`
///
/// `on_tick` is only captured the first time; later calls reuse it.
pub fn restart_clock(on_tick: fn()) -> Result<(), JsValue> {
    let window = window()?;

    CLOCK.with(|c| {
        let mut slot = c.borrow_mut();
        let clock = slot.get_or_insert_with(|| Clock {
            handle: None,
            callback: Closure::wrap(Box::new(on_tick) as Box<dyn FnMut()>),
        });

        if let Some(handle) = clock.handle.take() {
            window.clear_interval_with_handle(handle);
        }
        let handle = window.set_interval_with_callback_and_timeout_and_arguments_0(
            clock.callback.as_ref().unchecked_ref(),
            CLOCK_INTERVAL_MS,
        )?;
        clock.handle = Some(handle);
        Ok(())
    })
}

/// Clear the running interval, if any
pub fn stop_clock() {
    let handle = CLOCK.with(|c| c.borrow_mut().as_mut().and_then(|clock| clock.handle.take()));
    if let (Some(handle), Some(window)) = (handle, web_sys::window()) {
        window.clear_interval_with_handle(handle);
        log::debug!("Round clock stopped");
    }
}

/// Whether an interval is currently armed
pub fn clock_running() -> bool {
    CLOCK.with(|c| c.borrow().as_ref().is_some_and(|clock| clock.handle.is_some()))
}

/// Run `f` once after `delay_ms`
pub fn run_later(delay_ms: u32, f: impl FnOnce() + 'static) -> Result<(), JsValue> {
    let callback = Closure::once_into_js(f);
    window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms as i32,
    )?;
    Ok(())
}

/// Current time in seconds
pub fn now_secs() -> f64 {
    js_sys::Date::now() / 1000.0
}
