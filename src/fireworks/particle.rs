//! Spark physics: linear air drag plus constant gravity, integrated in closed
//! form so the trajectory does not depend on the frame rate.

use super::palette::Hsl;

/// A single spark.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Remaining opacity; the particle is dead at or below 0.
    pub alpha: f64,
    /// Alpha lost per second.
    pub decay: f64,
    pub color: Hsl,
    /// `color` as a CSS string, formatted once at spawn.
    pub fill: String,
    pub size: f64,
}

/// World constants shared by every spark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Physics {
    /// px/s^2, positive is down.
    pub gravity: f64,
    /// Drag constant `k` (1/s), derived from a per-frame velocity multiplier.
    pub drag_rate: f64,
}

impl Physics {
    /// `drag_per_frame` is the velocity multiplier at `base_fps`
    /// (0.96 keeps 96% of the speed every 60 Hz frame).
    pub fn new(gravity: f64, drag_per_frame: f64, base_fps: f64) -> Self {
        Self {
            gravity,
            drag_rate: -base_fps * drag_per_frame.ln(),
        }
    }
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.alpha > 0.0
    }

    /// Advance `dt` seconds. Equivalent to `v *= drag^(dt * fps)` with gravity
    /// folded in exactly, so N small steps match one big one.
    pub fn step(&mut self, dt: f64, physics: &Physics) {
        if !(dt > 0.0) {
            return;
        }
        let k = physics.drag_rate;
        let g = physics.gravity;
        if k > 1e-9 {
            let decay = (-k * dt).exp();
            // (1 - e^{-k dt}) / k, accurate for small k dt
            let reach = -(-k * dt).exp_m1() / k;
            let terminal = g / k;

            self.x += self.vx * reach;
            self.vx *= decay;

            self.y += terminal * dt + (self.vy - terminal) * reach;
            self.vy = terminal + (self.vy - terminal) * decay;
        } else {
            self.x += self.vx * dt;
            self.y += self.vy * dt + 0.5 * g * dt * dt;
            self.vy += g * dt;
        }
        self.alpha -= self.decay * dt;
    }
}

/// Step every particle and drop the ones that burned out, in one pass.
/// Returns how many were removed.
pub fn step_all(particles: &mut Vec<Particle>, dt: f64, physics: &Physics) -> usize {
    let before = particles.len();
    particles.retain_mut(|p| {
        p.step(dt, physics);
        p.is_alive()
    });
    before - particles.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spark(vx: f64, vy: f64, decay: f64) -> Particle {
        Particle {
            x: 400.0,
            y: 300.0,
            vx,
            vy,
            alpha: 1.0,
            decay,
            color: Hsl::new(0.0, 100.0, 60.0),
            fill: Hsl::new(0.0, 100.0, 60.0).to_css(),
            size: 2.5,
        }
    }

    fn physics() -> Physics {
        Physics::new(180.0, 0.96, 60.0)
    }

    #[test]
    fn one_big_step_equals_ten_small_steps() {
        let phys = physics();
        let mut big = spark(500.0, -700.0, 0.6);
        let mut small = big.clone();
        big.step(0.1, &phys);
        for _ in 0..10 {
            small.step(0.01, &phys);
        }
        assert_relative_eq!(big.x, small.x, max_relative = 1e-9);
        assert_relative_eq!(big.y, small.y, max_relative = 1e-9);
        assert_relative_eq!(big.vx, small.vx, max_relative = 1e-9);
        assert_relative_eq!(big.vy, small.vy, max_relative = 1e-9);
        assert_relative_eq!(big.alpha, small.alpha, max_relative = 1e-9);
    }

    #[test]
    fn frictionless_steps_also_compose() {
        let phys = Physics::new(180.0, 1.0, 60.0);
        let mut big = spark(100.0, -200.0, 0.5);
        let mut small = big.clone();
        big.step(0.1, &phys);
        for _ in 0..10 {
            small.step(0.01, &phys);
        }
        assert_relative_eq!(big.y, small.y, max_relative = 1e-9);
        assert_relative_eq!(big.vy, small.vy, max_relative = 1e-9);
    }

    #[test]
    fn drag_matches_per_frame_multiplier() {
        let phys = Physics::new(0.0, 0.96, 60.0);
        let mut p = spark(600.0, 0.0, 0.5);
        p.step(1.0 / 60.0, &phys);
        assert_relative_eq!(p.vx, 600.0 * 0.96, max_relative = 1e-9);
    }

    #[test]
    fn gravity_pulls_down() {
        let mut p = spark(0.0, 0.0, 0.5);
        p.step(0.5, &physics());
        assert!(p.vy > 0.0 && p.y > 300.0);
    }

    #[test]
    fn alpha_strictly_decreases() {
        let phys = physics();
        let mut p = spark(10.0, 10.0, 0.3);
        let mut last = p.alpha;
        for _ in 0..20 {
            p.step(1.0 / 60.0, &phys);
            assert!(p.alpha < last);
            last = p.alpha;
        }
    }

    #[test]
    fn zero_dt_is_noop() {
        let mut p = spark(10.0, 10.0, 0.3);
        let before = p.clone();
        p.step(0.0, &physics());
        p.step(f64::NAN, &physics());
        assert_eq!(p, before);
    }

    #[test]
    fn dead_particles_removed_in_same_step() {
        let phys = physics();
        let mut ps = vec![spark(0.0, 0.0, 0.5), spark(0.0, 0.0, 20.0)];
        let removed = step_all(&mut ps, 0.1, &phys);
        assert_eq!(removed, 1);
        assert_eq!(ps.len(), 1);
        assert!(ps.iter().all(Particle::is_alive));
    }

    #[test]
    fn removed_exactly_when_alpha_hits_zero() {
        let phys = physics();
        let mut ps = vec![spark(0.0, 0.0, 1.0)];
        step_all(&mut ps, 0.5, &phys);
        assert_eq!(ps.len(), 1);
        step_all(&mut ps, 0.5, &phys);
        assert!(ps.is_empty());
    }
}
