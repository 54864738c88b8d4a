//! Tick scheduling
//!
//! Both handles share a liveness flag with their callback. `cancel()`
//! clears the browser timer and flips the flag, so a callback already
//! queued by the browser returns without touching game state. Dropping a
//! handle cancels it.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Repeating requestAnimationFrame loop
pub struct FrameLoop {
    live: Rc<Cell<bool>>,
    handle: Rc<Cell<Option<i32>>>,
    /// Owns the closure; the closure only holds a weak ref back
    _slot: FrameSlot,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp every animation frame
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let live = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(None));
        let slot: FrameSlot = Rc::new(RefCell::new(None));

        let weak = Rc::downgrade(&slot);
        let cb_live = live.clone();
        let cb_handle = handle.clone();
        let cb_window = window.clone();
        *slot.borrow_mut() = Some(Closure::new(move |time: f64| {
            if !cb_live.get() {
                return;
            }
            on_frame(time);
            // on_frame may have cancelled us
            if !cb_live.get() {
                return;
            }
            let Some(slot) = weak.upgrade() else {
                return;
            };
            if let Some(cb) = slot.borrow().as_ref() {
                match cb_window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => cb_handle.set(Some(id)),
                    Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                }
            }
        }));

        if let Some(cb) = slot.borrow().as_ref() {
            handle.set(Some(
                window.request_animation_frame(cb.as_ref().unchecked_ref())?,
            ));
        }

        Ok(Self {
            live,
            handle,
            _slot: slot,
        })
    }

    pub fn cancel(&self) {
        self.live.set(false);
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Fixed-delay setInterval timer
pub struct Interval {
    live: Rc<Cell<bool>>,
    handle: Cell<Option<i32>>,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn start(delay_ms: u32, mut on_tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let live = Rc::new(Cell::new(true));

        let cb_live = live.clone();
        let callback = Closure::<dyn FnMut()>::new(move || {
            if cb_live.get() {
                on_tick();
            }
        });
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms as i32,
        )?;

        Ok(Self {
            live,
            handle: Cell::new(Some(id)),
            _callback: callback,
        })
    }

    /// Stop ticking. Safe to call from inside the tick itself.
    pub fn cancel(&self) {
        self.live.set(false);
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            window.clear_interval_with_handle(id);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}
