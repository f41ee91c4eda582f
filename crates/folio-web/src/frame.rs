//! `requestAnimationFrame` loop with explicit start and stop.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

struct Shared {
    running: Cell<bool>,
    /// Id of the requested but not yet delivered frame.
    pending: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// Calls `on_frame` with the frame timestamp once per animation frame while
/// running. Dropping the loop cancels the pending frame.
pub struct FrameLoop {
    shared: Rc<Shared>,
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut(f64) + 'static) -> Self {
        let shared = Rc::new(Shared {
            running: Cell::new(false),
            pending: Cell::new(None),
            callback: RefCell::new(None),
        });

        // The closure holds a weak handle so the loop and its callback do
        // not keep each other alive.
        let weak: Weak<Shared> = Rc::downgrade(&shared);
        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.pending.set(None);
            if !shared.running.get() {
                return;
            }
            on_frame(timestamp);
            if shared.running.get() {
                if let Err(err) = request(&shared) {
                    log::error!("frame loop: cannot request frame: {:?}", err);
                    shared.running.set(false);
                }
            }
        });
        *shared.callback.borrow_mut() = Some(callback);

        Self { shared }
    }

    pub fn start(&self) -> Result<(), JsValue> {
        if self.shared.running.replace(true) {
            return Ok(());
        }
        request(&self.shared)
    }

    pub fn stop(&self) {
        self.shared.running.set(false);
        if let Some(id) = self.shared.pending.take() {
            if let Some(window) = web_sys::window() {
                if let Err(err) = window.cancel_animation_frame(id) {
                    log::trace!("frame loop: cancel failed: {:?}", err);
                }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.running.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request(shared: &Shared) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let callback = shared.callback.borrow();
    if let Some(callback) = callback.as_ref() {
        let id = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        shared.pending.set(Some(id));
    }
    Ok(())
}

/// Current `performance.now()`, or 0 outside a window.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
