use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

use super::canvas;
use super::frame_loop::FrameLoop;
use super::listeners::EventListener;
use crate::config::EarthConfig;
use crate::globe::EarthScene;

struct EarthState {
    scene: EarthScene,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    on_acquired_change: Option<js_sys::Function>,
    reported: bool,
}

impl EarthState {
    /// Step, paint, and hand back the callback to fire if the signal flipped.
    fn frame(&mut self, ts: f64) -> Option<(js_sys::Function, bool)> {
        let acquired = self.scene.tick(ts);
        if let Some(ctx) = self.ctx.as_mut() {
            self.scene.render(ctx, ts);
        }
        if acquired == self.reported {
            return None;
        }
        self.reported = acquired;
        log::debug!("target acquired: {acquired}");
        self.on_acquired_change.clone().map(|f| (f, acquired))
    }

    fn fit_to_canvas(&mut self) {
        let vp = canvas::measure(&self.canvas);
        canvas::apply_viewport(&self.canvas, self.ctx.as_ref(), &vp);
        self.scene.resize(vp.width, vp.height, vp.pixel_ratio);
    }

    fn local(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        canvas::local_point(&self.canvas, client_x, client_y)
    }
}

/// The spinnable globe, mounted on an existing `<canvas>`.
#[wasm_bindgen]
pub struct EarthView {
    state: Rc<RefCell<EarthState>>,
    frame: Option<FrameLoop>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl EarthView {
    pub fn mount(canvas_id: &str) -> Result<EarthView, JsValue> {
        Self::mount_with(canvas_id, EarthConfig::default())
    }

    pub fn target_acquired(&self) -> bool {
        self.state.borrow().scene.target_acquired()
    }

    /// `callback(acquired: boolean)` runs whenever the acquisition signal flips.
    pub fn set_on_acquired_change(&self, callback: Option<js_sys::Function>) {
        self.state.borrow_mut().on_acquired_change = callback;
    }

    /// Stop the loop, remove every listener and release the context. Safe to
    /// call more than once.
    pub fn destroy(&mut self) {
        if self.frame.is_none() && self.listeners.is_empty() {
            return;
        }
        self.frame = None;
        self.listeners.clear();
        let mut st = self.state.borrow_mut();
        st.ctx = None;
        st.on_acquired_change = None;
        log::info!("earth view destroyed");
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
impl EarthView {
    /// Mount with a JSON object overriding any [`EarthConfig`] fields.
    pub fn mount_with_config(canvas_id: &str, json: &str) -> Result<EarthView, JsValue> {
        let config = EarthConfig::from_json(json)
            .inspect_err(|err| log::error!("earth config rejected: {err}"))?;
        Self::mount_with(canvas_id, config)
    }
}

impl EarthView {
    pub fn mount_with(canvas_id: &str, config: EarthConfig) -> Result<EarthView, JsValue> {
        let canvas_el = canvas::find_canvas(canvas_id)?;
        let ctx = canvas::context_2d(&canvas_el);
        if ctx.is_none() {
            log::warn!("#{canvas_id}: no 2d context, globe will not be painted");
        }
        let viewport = canvas::measure(&canvas_el);
        canvas::apply_viewport(&canvas_el, ctx.as_ref(), &viewport);
        let scene = EarthScene::new(config, viewport)
            .inspect_err(|err| log::error!("earth config rejected: {err}"))?;

        let state = Rc::new(RefCell::new(EarthState {
            reported: scene.target_acquired(),
            scene,
            canvas: canvas_el.clone(),
            ctx,
            on_acquired_change: None,
        }));
        let listeners = Self::listen(&canvas_el, &state)?;

        let st = state.clone();
        let frame = FrameLoop::start(move |ts| {
            let flipped = st.borrow_mut().frame(ts);
            if let Some((callback, acquired)) = flipped {
                if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(acquired)) {
                    log::warn!("acquired-change callback threw: {err:?}");
                }
            }
        })?;

        log::info!(
            "earth view mounted on #{canvas_id} ({}x{})",
            viewport.width,
            viewport.height
        );
        Ok(EarthView { state, frame: Some(frame), listeners })
    }

    fn listen(
        canvas_el: &HtmlCanvasElement,
        state: &Rc<RefCell<EarthState>>,
    ) -> Result<Vec<EventListener>, JsValue> {
        let mut out = Vec::new();

        let st = state.clone();
        out.push(EventListener::new(canvas_el, "mousedown", move |evt: MouseEvent| {
            let mut st = st.borrow_mut();
            let (x, y) = st.local(evt.client_x() as f64, evt.client_y() as f64);
            st.scene.pointer_down(x, y);
        })?);

        let st = state.clone();
        out.push(EventListener::new(canvas_el, "mousemove", move |evt: MouseEvent| {
            let mut st = st.borrow_mut();
            let (x, y) = st.local(evt.client_x() as f64, evt.client_y() as f64);
            st.scene.pointer_move(x, y);
        })?);

        for kind in ["mouseup", "mouseleave"] {
            let st = state.clone();
            out.push(EventListener::new(canvas_el, kind, move |_evt: MouseEvent| {
                st.borrow_mut().scene.pointer_up();
            })?);
        }

        let st = state.clone();
        out.push(EventListener::new(canvas_el, "touchstart", move |evt: TouchEvent| {
            evt.prevent_default();
            let Some((cx, cy)) = super::first_touch(&evt) else { return };
            let mut st = st.borrow_mut();
            let (x, y) = st.local(cx, cy);
            st.scene.pointer_down(x, y);
        })?);

        let st = state.clone();
        out.push(EventListener::new(canvas_el, "touchmove", move |evt: TouchEvent| {
            evt.prevent_default();
            let Some((cx, cy)) = super::first_touch(&evt) else { return };
            let mut st = st.borrow_mut();
            let (x, y) = st.local(cx, cy);
            st.scene.pointer_move(x, y);
        })?);

        for kind in ["touchend", "touchcancel"] {
            let st = state.clone();
            out.push(EventListener::new(canvas_el, kind, move |_evt: TouchEvent| {
                st.borrow_mut().scene.pointer_up();
            })?);
        }

        let win = super::window()?;
        let st = state.clone();
        out.push(EventListener::new(&win, "resize", move |_evt: web_sys::Event| {
            let mut st = st.borrow_mut();
            st.fit_to_canvas();
            let vp = st.scene.viewport();
            log::debug!("earth view resized to {}x{}", vp.width, vp.height);
        })?);

        Ok(out)
    }
}

impl Drop for EarthView {
    fn drop(&mut self) {
        self.destroy();
    }
}
