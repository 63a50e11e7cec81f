//! Lunar Canvas core crate.
//!
//! Two canvas views for the Lunar New Year page: a point-cloud Earth the
//! visitor spins until the home city is centred, and a fireworks show that
//! bursts wherever they tap. The simulations (`globe`, `fireworks`) are plain
//! Rust and paint through the [`surface::Surface`] trait; `web` mounts them on
//! real canvases and `audio` provides the explosion cue.

use wasm_bindgen::prelude::*;

pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod fireworks;
pub mod globe;
pub mod math;
pub mod rng;
pub mod surface;
pub mod web;

pub use config::{EarthConfig, FireworksConfig};
pub use error::{ConfigError, ConfigResult};
pub use fireworks::{Explosion, FireworksShow, SoundCue};
pub use globe::EarthScene;
pub use surface::{CommandBuffer, Surface, Viewport};
pub use web::{EarthView, FireworksView};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // a second init (another module on the page) is harmless
    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("lunar-canvas {} ready", env!("CARGO_PKG_VERSION"));
    }
}
