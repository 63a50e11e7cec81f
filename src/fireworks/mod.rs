//! Interactive fireworks: taps (and a random timer) set off bursts of sparks
//! that fall, slow down and fade, painted with additive glow over fading trails.

pub mod palette;
pub mod particle;
pub mod render;

use crate::clock::FrameClock;
use crate::config::FireworksConfig;
use crate::error::ConfigResult;
use crate::rng::Rng;
use crate::surface::{Surface, Viewport};

use palette::BurstStyle;
use particle::{Particle, Physics};

/// Something that can play the explosion cue. Injected so the simulation never
/// owns an audio device.
pub trait SoundCue {
    fn explosion(&mut self);
}

/// No-op cue for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundCue for Silent {
    fn explosion(&mut self) {}
}

/// Reported to the host after each burst.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    pub x: f64,
    pub y: f64,
    pub style: BurstStyle,
}

pub struct FireworksShow {
    config: FireworksConfig,
    physics: Physics,
    particles: Vec<Particle>,
    rng: Rng,
    viewport: Viewport,
    clock: FrameClock,
    sound: Box<dyn SoundCue>,
    explosions: Vec<Explosion>,
}

impl FireworksShow {
    pub fn new(config: FireworksConfig, viewport: Viewport) -> ConfigResult<Self> {
        Self::with_rng(config, viewport, Rng::from_entropy())
    }

    /// Reproducible show for tests and replays.
    pub fn with_seed(config: FireworksConfig, viewport: Viewport, seed: u64) -> ConfigResult<Self> {
        Self::with_rng(config, viewport, Rng::new(seed))
    }

    fn with_rng(config: FireworksConfig, viewport: Viewport, rng: Rng) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            physics: Physics::new(config.gravity, config.drag, config.base_fps),
            particles: Vec::with_capacity(config.max_particles),
            config,
            rng,
            viewport,
            clock: FrameClock::new(),
            sound: Box::new(Silent),
            explosions: Vec::new(),
        })
    }

    pub fn set_sound(&mut self, sound: Box<dyn SoundCue>) {
        self.sound = sound;
    }

    pub fn config(&self) -> &FireworksConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resizing keeps every live particle where it is.
    pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
        self.viewport = Viewport::new(width, height, pixel_ratio);
    }

    /// Set off a burst at `(x, y)`: play the cue, then add one burst of sparks.
    /// Non-finite coordinates are ignored.
    pub fn spawn(&mut self, x: f64, y: f64) -> Option<Explosion> {
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        self.sound.explosion();

        let style = BurstStyle::roll(&mut self.rng);
        let cfg = &self.config;
        for _ in 0..cfg.particles_per_burst {
            let angle = self.rng.range(0.0, std::f64::consts::TAU);
            let speed = self.rng.range(cfg.speed_min, cfg.speed_max);
            let color = style.spark_color(&mut self.rng);
            self.particles.push(Particle {
                x,
                y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                alpha: 1.0,
                decay: self.rng.range(cfg.decay_min, cfg.decay_max),
                fill: color.to_css(),
                color,
                size: self.rng.range(cfg.size_min, cfg.size_max),
            });
        }

        let overflow = self.particles.len().saturating_sub(cfg.max_particles);
        if overflow > 0 {
            // oldest sparks are the dimmest
            self.particles.drain(..overflow);
            log::trace!("particle cap hit, evicted {overflow}");
        }

        let explosion = Explosion { x, y, style };
        self.explosions.push(explosion);
        Some(explosion)
    }

    /// Bursts since the last drain, oldest first.
    pub fn drain_explosions(&mut self) -> Vec<Explosion> {
        std::mem::take(&mut self.explosions)
    }

    /// Advance by the time since the previous frame stamp.
    pub fn tick(&mut self, now_ms: f64) {
        let dt = self.clock.tick(now_ms);
        self.advance(dt);
    }

    /// Advance physics by `dt` seconds, then maybe launch an autonomous burst.
    pub fn advance(&mut self, dt: f64) {
        particle::step_all(&mut self.particles, dt, &self.physics);

        if dt > 0.0 && self.config.auto_spawn_rate > 0.0 {
            // Poisson arrival: same average rate at any frame rate
            let p = -(-self.config.auto_spawn_rate * dt).exp_m1();
            if self.rng.chance(p) {
                let x = self.rng.range(0.0, self.viewport.width);
                let y = self.rng.range(0.0, self.viewport.height * self.config.auto_spawn_height);
                self.spawn(x, y);
            }
        }
    }

    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        render::draw_sparks(
            surface,
            &self.viewport,
            &self.particles,
            self.config.trail_alpha,
            self.config.flicker_chance,
            &mut self.rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingCue(Rc<Cell<usize>>);

    impl SoundCue for CountingCue {
        fn explosion(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn quiet_config() -> FireworksConfig {
        FireworksConfig { auto_spawn_rate: 0.0, ..FireworksConfig::default() }
    }

    #[test]
    fn spawn_adds_one_burst_and_plays_cue() {
        let plays = Rc::new(Cell::new(0));
        let mut show = FireworksShow::with_seed(quiet_config(), Viewport::default(), 1).unwrap();
        show.set_sound(Box::new(CountingCue(plays.clone())));
        let boom = show.spawn(100.0, 50.0).unwrap();
        assert_eq!(show.particle_count(), show.config().particles_per_burst);
        assert_eq!(plays.get(), 1);
        assert_eq!((boom.x, boom.y), (100.0, 50.0));
        assert!(show.particles().iter().all(|p| p.x == 100.0 && p.y == 50.0 && p.alpha == 1.0));
        assert!(show.particles().iter().all(|p| p.fill == p.color.to_css()));
    }

    #[test]
    fn spawn_ignores_non_finite() {
        let mut show = FireworksShow::with_seed(quiet_config(), Viewport::default(), 1).unwrap();
        assert!(show.spawn(f64::NAN, 1.0).is_none());
        assert_eq!(show.particle_count(), 0);
        assert!(show.drain_explosions().is_empty());
    }

    #[test]
    fn cap_evicts_oldest() {
        let cfg = FireworksConfig {
            max_particles: 200,
            particles_per_burst: 120,
            ..quiet_config()
        };
        let mut show = FireworksShow::with_seed(cfg, Viewport::default(), 4).unwrap();
        show.spawn(1.0, 1.0);
        show.spawn(500.0, 500.0);
        assert_eq!(show.particle_count(), 200);
        // the whole second burst survives
        let newest = show.particles().iter().filter(|p| p.x == 500.0).count();
        assert_eq!(newest, 120);
    }

    #[test]
    fn explosions_drain_once() {
        let mut show = FireworksShow::with_seed(quiet_config(), Viewport::default(), 2).unwrap();
        show.spawn(1.0, 2.0);
        show.spawn(3.0, 4.0);
        let drained = show.drain_explosions();
        assert_eq!(drained.len(), 2);
        assert_eq!((drained[1].x, drained[1].y), (3.0, 4.0));
        assert!(show.drain_explosions().is_empty());
    }

    #[test]
    fn show_burns_out_without_input() {
        let mut show = FireworksShow::with_seed(quiet_config(), Viewport::default(), 8).unwrap();
        show.spawn(400.0, 300.0);
        for _ in 0..400 {
            show.advance(1.0 / 60.0);
        }
        assert_eq!(show.particle_count(), 0);
    }

    #[test]
    fn autonomous_bursts_land_in_upper_area() {
        let cfg = FireworksConfig { auto_spawn_rate: 50.0, ..FireworksConfig::default() };
        let mut show = FireworksShow::with_seed(cfg, Viewport::new(800.0, 600.0, 1.0), 21).unwrap();
        for _ in 0..120 {
            show.advance(1.0 / 60.0);
        }
        let bursts = show.drain_explosions();
        assert!(!bursts.is_empty());
        assert!(bursts.iter().all(|b| b.x >= 0.0 && b.x < 800.0 && b.y >= 0.0 && b.y < 360.0));
    }

    #[test]
    fn zero_dt_never_autospawns() {
        let cfg = FireworksConfig { auto_spawn_rate: 500.0, ..FireworksConfig::default() };
        let mut show = FireworksShow::with_seed(cfg, Viewport::default(), 3).unwrap();
        for _ in 0..50 {
            show.advance(0.0);
        }
        assert_eq!(show.particle_count(), 0);
    }
}
