//! Browser glue: canvas lookup, the animation loop, DOM listeners and the two
//! mounted views exported to JavaScript.

pub mod canvas;
pub mod earth_view;
pub mod fireworks_view;
pub mod frame_loop;
pub mod listeners;

use wasm_bindgen::prelude::*;
use web_sys::Window;

pub use earth_view::EarthView;
pub use fireworks_view::FireworksView;

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// First touch point in client coordinates.
pub(crate) fn first_touch(evt: &web_sys::TouchEvent) -> Option<(f64, f64)> {
    evt.touches()
        .get(0)
        .map(|t| (t.client_x() as f64, t.client_y() as f64))
}
