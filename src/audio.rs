//! Synthesized explosion cue on the Web Audio API.
//!
//! One `AudioContext` per page, created lazily on first use and resumed from a
//! user gesture (browsers start it suspended). The fireworks core only sees the
//! [`SoundCue`] trait; [`PageAudio`] forwards to the shared output.

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::{AudioBuffer, AudioContext, AudioContextState, BiquadFilterType};

use crate::fireworks::SoundCue;
use crate::rng::Rng;

/// Length of the white-noise burst.
pub const NOISE_SECONDS: f64 = 2.0;
/// Low-pass cutoff at the start of the cue.
pub const FILTER_START_HZ: f32 = 800.0;
/// Cutoff sweeps down to zero over this many seconds.
pub const FILTER_SWEEP_SECONDS: f64 = 1.5;
pub const GAIN_START: f32 = 0.5;
pub const GAIN_END: f32 = 0.01;
pub const GAIN_FADE_SECONDS: f64 = 1.0;

/// Uniform white noise in [-1, 1).
pub fn white_noise(rng: &mut Rng, len: usize) -> Vec<f32> {
    (0..len).map(|_| rng.range(-1.0, 1.0) as f32).collect()
}

pub struct AudioOutput {
    ctx: Option<AudioContext>,
    noise: Option<AudioBuffer>,
    rng: Rng,
    unavailable: bool,
}

impl Default for AudioOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioOutput {
    pub fn new() -> Self {
        Self { ctx: None, noise: None, rng: Rng::from_entropy(), unavailable: false }
    }

    pub fn is_started(&self) -> bool {
        self.ctx.is_some()
    }

    fn context(&mut self) -> Option<AudioContext> {
        if self.ctx.is_none() && !self.unavailable {
            match AudioContext::new() {
                Ok(ctx) => {
                    log::info!("audio context created ({} Hz)", ctx.sample_rate());
                    self.ctx = Some(ctx);
                }
                Err(err) => {
                    log::warn!("audio unavailable: {err:?}");
                    self.unavailable = true;
                }
            }
        }
        self.ctx.clone()
    }

    /// Create the context if needed and resume it when the browser suspended it.
    pub fn resume(&mut self) {
        let Some(ctx) = self.context() else { return };
        if ctx.state() == AudioContextState::Suspended {
            if let Err(err) = ctx.resume() {
                log::warn!("audio resume failed: {err:?}");
            }
        }
    }

    fn noise_buffer(&mut self, ctx: &AudioContext) -> Result<AudioBuffer, JsValue> {
        if let Some(buf) = &self.noise {
            return Ok(buf.clone());
        }
        let rate = ctx.sample_rate();
        let len = (rate as f64 * NOISE_SECONDS) as u32;
        let buf = ctx.create_buffer(1, len, rate)?;
        buf.copy_to_channel(&white_noise(&mut self.rng, len as usize), 0)?;
        self.noise = Some(buf.clone());
        Ok(buf)
    }

    /// noise -> low-pass sweep -> fading gain -> speakers
    pub fn play_explosion(&mut self) -> Result<(), JsValue> {
        let Some(ctx) = self.context() else { return Ok(()) };
        let now = ctx.current_time();

        let source = ctx.create_buffer_source()?;
        source.set_buffer(Some(&self.noise_buffer(&ctx)?));

        let filter = ctx.create_biquad_filter()?;
        filter.set_type(BiquadFilterType::Lowpass);
        let cutoff = filter.frequency();
        cutoff.set_value_at_time(FILTER_START_HZ, now)?;
        cutoff.linear_ramp_to_value_at_time(0.0, now + FILTER_SWEEP_SECONDS)?;

        let gain = ctx.create_gain()?;
        let level = gain.gain();
        level.set_value_at_time(GAIN_START, now)?;
        level.exponential_ramp_to_value_at_time(GAIN_END, now + GAIN_FADE_SECONDS)?;

        source.connect_with_audio_node(&filter)?;
        filter.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;
        source.start()?;
        Ok(())
    }
}

thread_local! {
    static OUTPUT: RefCell<AudioOutput> = RefCell::new(AudioOutput::new());
}

/// Run `f` against the page-wide output.
pub fn with_output<R>(f: impl FnOnce(&mut AudioOutput) -> R) -> R {
    OUTPUT.with(|out| f(&mut out.borrow_mut()))
}

/// Call from the first user gesture so later cues are audible.
#[wasm_bindgen]
pub fn resume_audio() {
    with_output(AudioOutput::resume);
}

/// [`SoundCue`] backed by the page-wide audio output.
#[derive(Debug, Default, Clone, Copy)]
pub struct PageAudio;

impl SoundCue for PageAudio {
    fn explosion(&mut self) {
        with_output(|out| {
            if let Err(err) = out.play_explosion() {
                log::warn!("explosion cue failed: {err:?}");
            }
        });
    }
}
