use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::surface::{Composite, Surface, Viewport};

impl Surface for CanvasRenderingContext2d {
    fn set_fill_style(&mut self, css: &str) {
        self.set_fill_style_str(css);
    }

    fn set_stroke_style(&mut self, css: &str) {
        self.set_stroke_style_str(css);
    }

    fn set_line_width(&mut self, width: f64) {
        CanvasRenderingContext2d::set_line_width(self, width);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        CanvasRenderingContext2d::set_global_alpha(self, alpha);
    }

    fn set_composite(&mut self, mode: Composite) {
        self.set_global_composite_operation(mode.as_css()).ok();
    }

    fn set_shadow(&mut self, blur: f64, color: &str) {
        self.set_shadow_blur(blur);
        self.set_shadow_color(color);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        CanvasRenderingContext2d::fill_rect(self, x, y, w, h);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        self.fill();
    }

    fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.begin_path();
        self.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        self.stroke();
    }
}

pub fn find_canvas(canvas_id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let doc = super::window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let el = doc
        .get_element_by_id(canvas_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?;
    el.dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element '{canvas_id}' is not a canvas")))
}

/// `None` when the browser refuses a 2D context; callers keep simulating
/// without painting.
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into().ok())
}

/// The views fill the window: CSS size is the window's inner size, scaled by
/// the device pixel ratio for the backing buffer.
pub fn measure(canvas: &HtmlCanvasElement) -> Viewport {
    let Some(win) = web_sys::window() else {
        return Viewport::new(canvas.width() as f64, canvas.height() as f64, 1.0);
    };
    let inner = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64());
    match (inner(win.inner_width()), inner(win.inner_height())) {
        (Some(w), Some(h)) => Viewport::new(w, h, win.device_pixel_ratio()),
        _ => Viewport::new(canvas.width() as f64, canvas.height() as f64, 1.0),
    }
}

/// Size the backing buffer for `viewport` and scale the context so drawing
/// stays in CSS pixels. Changing the width resets the context, so the
/// transform is applied afterwards every time.
pub fn apply_viewport(
    canvas: &HtmlCanvasElement,
    ctx: Option<&CanvasRenderingContext2d>,
    viewport: &Viewport,
) {
    let (bw, bh) = viewport.buffer_size();
    canvas.set_width(bw);
    canvas.set_height(bh);
    // pin the CSS size, otherwise the new buffer size would leak into layout
    let style = canvas.style();
    style.set_property("width", &format!("{}px", viewport.width)).ok();
    style.set_property("height", &format!("{}px", viewport.height)).ok();
    if let Some(ctx) = ctx {
        let r = viewport.pixel_ratio;
        ctx.set_transform(r, 0.0, 0.0, r, 0.0, 0.0).ok();
    }
}

/// Canvas-local CSS coordinates of a client-space point.
pub fn local_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> (f64, f64) {
    let rect = canvas.get_bounding_client_rect();
    (client_x - rect.left(), client_y - rect.top())
}
