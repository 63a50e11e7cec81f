use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling `requestAnimationFrame` loop.
///
/// The closure only holds a weak reference to itself, so dropping (or
/// cancelling) the loop frees it even while a frame is pending.
pub struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let me = Rc::downgrade(&callback);
        let next = pending.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            next.set(None);
            tick(ts);
            let Some(cb) = me.upgrade() else { return };
            let cb = cb.borrow();
            if let (Some(w), Some(f)) = (web_sys::window(), cb.as_ref()) {
                next.set(w.request_animation_frame(f.as_ref().unchecked_ref()).ok());
            }
        }) as Box<dyn FnMut(f64)>));

        let first = {
            let cb = callback.borrow();
            let f = cb.as_ref().ok_or_else(|| JsValue::from_str("frame callback missing"))?;
            super::window()?.request_animation_frame(f.as_ref().unchecked_ref())?
        };
        pending.set(Some(first));
        Ok(Self { callback, pending })
    }

    pub fn is_running(&self) -> bool {
        self.callback.borrow().is_some()
    }

    /// Cancel the pending frame and release the closure. Idempotent.
    pub fn cancel(&mut self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web_sys::window()) {
            w.cancel_animation_frame(id).ok();
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
