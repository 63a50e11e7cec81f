use super::particle::Particle;
use crate::rng::Rng;
use crate::surface::{Composite, Surface, Viewport};

/// Rendered alpha is scaled into this band on a flicker frame.
const FLICKER_DIM: (f64, f64) = (0.2, 0.6);

/// Alpha actually painted this frame. Stored alpha is never touched.
pub fn rendered_alpha(p: &Particle, rng: &mut Rng, flicker_chance: f64) -> f64 {
    let base = p.alpha.clamp(0.0, 1.0);
    if flicker_chance > 0.0 && rng.chance(flicker_chance) {
        base * rng.range(FLICKER_DIM.0, FLICKER_DIM.1)
    } else {
        base
    }
}

/// Fade the previous frame toward black, then paint sparks additively.
pub fn draw_sparks<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    particles: &[Particle],
    trail_alpha: f64,
    flicker_chance: f64,
    rng: &mut Rng,
) {
    surface.set_composite(Composite::SourceOver);
    surface.set_global_alpha(1.0);
    surface.set_fill_style(&format!("rgba(0, 0, 0, {trail_alpha})"));
    surface.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    surface.set_composite(Composite::Lighter);
    for p in particles {
        surface.set_global_alpha(rendered_alpha(p, rng, flicker_chance));
        surface.set_fill_style(&p.fill);
        surface.fill_circle(p.x, p.y, p.size);
    }

    surface.set_global_alpha(1.0);
    surface.set_composite(Composite::SourceOver);
}
