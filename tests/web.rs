// Browser smoke tests. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use lunar_canvas::{EarthView, FireworksView};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> HtmlCanvasElement {
    let doc = web_sys::window().unwrap().document().unwrap();
    let canvas: HtmlCanvasElement = doc.create_element("canvas").unwrap().dyn_into().unwrap();
    canvas.set_id(id);
    canvas.set_width(640);
    canvas.set_height(480);
    doc.body().unwrap().append_child(&canvas).unwrap();
    canvas
}

#[wasm_bindgen_test]
fn earth_view_mounts_and_tears_down() {
    add_canvas("earth-test");
    let mut view = EarthView::mount("earth-test").unwrap();
    assert!(!view.target_acquired());
    view.destroy();
    view.destroy();
}

#[wasm_bindgen_test]
fn fireworks_view_explodes_on_demand() {
    add_canvas("fireworks-test");
    let mut view = FireworksView::mount("fireworks-test").unwrap();
    view.explode(100.0, 100.0);
    assert_eq!(view.particle_count(), 120);
    view.destroy();
}

#[wasm_bindgen_test]
fn mounting_on_missing_canvas_fails() {
    assert!(EarthView::mount("no-such-canvas").is_err());
    assert!(FireworksView::mount("no-such-canvas").is_err());
}

#[wasm_bindgen_test]
fn window_resize_reaches_mounted_views() {
    add_canvas("earth-resize");
    add_canvas("fireworks-resize");
    let mut earth = EarthView::mount("earth-resize").unwrap();
    let mut fireworks = FireworksView::mount("fireworks-resize").unwrap();
    fireworks.explode(50.0, 50.0);

    let resize = web_sys::Event::new("resize").unwrap();
    web_sys::window().unwrap().dispatch_event(&resize).unwrap();

    assert!(!earth.target_acquired());
    assert_eq!(fireworks.particle_count(), 120);
    earth.destroy();
    fireworks.destroy();
}
