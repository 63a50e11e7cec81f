use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

use super::canvas;
use super::frame_loop::FrameLoop;
use super::listeners::EventListener;
use crate::audio::{self, PageAudio};
use crate::config::FireworksConfig;
use crate::fireworks::{Explosion, FireworksShow};

struct FireworksState {
    show: FireworksShow,
    canvas: HtmlCanvasElement,
    ctx: Option<CanvasRenderingContext2d>,
    on_explosion: Option<js_sys::Function>,
}

impl FireworksState {
    fn frame(&mut self, ts: f64) -> (Option<js_sys::Function>, Vec<Explosion>) {
        self.show.tick(ts);
        if let Some(ctx) = self.ctx.as_mut() {
            self.show.render(ctx);
        }
        let bursts = self.show.drain_explosions();
        (self.on_explosion.clone(), bursts)
    }

    /// A tap or click: unlock audio, then burst where the pointer is.
    fn pointer_down(&mut self, client_x: f64, client_y: f64) {
        audio::resume_audio();
        let (x, y) = canvas::local_point(&self.canvas, client_x, client_y);
        self.show.spawn(x, y);
    }
}

/// Interactive fireworks, mounted on an existing `<canvas>`.
#[wasm_bindgen]
pub struct FireworksView {
    state: Rc<RefCell<FireworksState>>,
    frame: Option<FrameLoop>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl FireworksView {
    pub fn mount(canvas_id: &str) -> Result<FireworksView, JsValue> {
        Self::mount_with(canvas_id, FireworksConfig::default())
    }

    /// `callback(x, y)` runs once per burst, user-triggered or autonomous.
    pub fn set_on_explosion(&self, callback: Option<js_sys::Function>) {
        self.state.borrow_mut().on_explosion = callback;
    }

    /// Set off a burst at canvas-local CSS coordinates.
    pub fn explode(&self, x: f64, y: f64) {
        self.state.borrow_mut().show.spawn(x, y);
    }

    pub fn particle_count(&self) -> usize {
        self.state.borrow().show.particle_count()
    }

    pub fn destroy(&mut self) {
        if self.frame.is_none() && self.listeners.is_empty() {
            return;
        }
        self.frame = None;
        self.listeners.clear();
        let mut st = self.state.borrow_mut();
        st.ctx = None;
        st.on_explosion = None;
        log::info!("fireworks view destroyed");
    }
}

#[cfg(feature = "serde_json")]
#[wasm_bindgen]
impl FireworksView {
    /// Mount with a JSON object overriding any [`FireworksConfig`] fields.
    pub fn mount_with_config(canvas_id: &str, json: &str) -> Result<FireworksView, JsValue> {
        let config = FireworksConfig::from_json(json)
            .inspect_err(|err| log::error!("fireworks config rejected: {err}"))?;
        Self::mount_with(canvas_id, config)
    }
}

impl FireworksView {
    pub fn mount_with(canvas_id: &str, config: FireworksConfig) -> Result<FireworksView, JsValue> {
        let canvas_el = canvas::find_canvas(canvas_id)?;
        let ctx = canvas::context_2d(&canvas_el);
        if ctx.is_none() {
            log::warn!("#{canvas_id}: no 2d context, fireworks will not be painted");
        }
        let viewport = canvas::measure(&canvas_el);
        canvas::apply_viewport(&canvas_el, ctx.as_ref(), &viewport);
        let mut show = FireworksShow::new(config, viewport)
            .inspect_err(|err| log::error!("fireworks config rejected: {err}"))?;
        show.set_sound(Box::new(PageAudio));

        let state = Rc::new(RefCell::new(FireworksState {
            show,
            canvas: canvas_el.clone(),
            ctx,
            on_explosion: None,
        }));
        let listeners = Self::listen(&canvas_el, &state)?;

        let st = state.clone();
        let frame = FrameLoop::start(move |ts| {
            let (callback, bursts) = st.borrow_mut().frame(ts);
            let Some(callback) = callback else { return };
            for b in bursts {
                if let Err(err) = callback.call2(&JsValue::NULL, &b.x.into(), &b.y.into()) {
                    log::warn!("explosion callback threw: {err:?}");
                }
            }
        })?;

        log::info!(
            "fireworks view mounted on #{canvas_id} ({}x{})",
            viewport.width,
            viewport.height
        );
        Ok(FireworksView { state, frame: Some(frame), listeners })
    }

    fn listen(
        canvas_el: &HtmlCanvasElement,
        state: &Rc<RefCell<FireworksState>>,
    ) -> Result<Vec<EventListener>, JsValue> {
        let mut out = Vec::new();

        let st = state.clone();
        out.push(EventListener::new(canvas_el, "mousedown", move |evt: MouseEvent| {
            st.borrow_mut().pointer_down(evt.client_x() as f64, evt.client_y() as f64);
        })?);

        let st = state.clone();
        out.push(EventListener::new(canvas_el, "touchstart", move |evt: TouchEvent| {
            evt.prevent_default();
            if let Some((x, y)) = super::first_touch(&evt) {
                st.borrow_mut().pointer_down(x, y);
            }
        })?);

        let win = super::window()?;
        let st = state.clone();
        out.push(EventListener::new(&win, "resize", move |_evt: web_sys::Event| {
            let mut st = st.borrow_mut();
            let vp = canvas::measure(&st.canvas);
            canvas::apply_viewport(&st.canvas, st.ctx.as_ref(), &vp);
            st.show.resize(vp.width, vp.height, vp.pixel_ratio);
            log::debug!("fireworks view resized to {}x{}", vp.width, vp.height);
        })?);

        Ok(out)
    }
}

impl Drop for FireworksView {
    fn drop(&mut self) {
        self.destroy();
    }
}
