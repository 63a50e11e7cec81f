//! Paints the rotated point cloud and the target beacon.

use super::projection::{ProjectedPoint, Projector};
use super::sphere::SpherePoint;
use super::target::Acquisition;
use crate::config::PULSE_PERIOD_MS;
use crate::math::Mat3;
use crate::surface::{Composite, Surface, Viewport};

const BACKGROUND: &str = "#020617"; // slate 950
const LAND_COLOR: &str = "rgb(16, 185, 129)"; // emerald 500
const WATER_COLOR: &str = "rgb(30, 58, 138)"; // blue 900
const LAND_DOT_RADIUS: f64 = 1.8;
const WATER_DOT_RADIUS: f64 = 1.2;
const WATER_ALPHA_SCALE: f64 = 0.6;

const BEACON_COLOR: &str = "#FFD700";
const BEACON_GLOW: &str = "#FF0000";
const BEACON_RADIUS: f64 = 6.0;
const BEACON_GLOW_BLUR: f64 = 15.0;
const PULSE_GROWTH: f64 = 20.0;

/// Project every point that survives the back-face cull into `out`, water
/// first and land second so land dots sit on top.
pub fn project_cloud(
    points: &[SpherePoint],
    rotation: &Mat3,
    projector: &Projector,
    cull_threshold: f64,
    out: &mut Vec<(ProjectedPoint, bool)>,
) {
    out.clear();
    for pass_land in [false, true] {
        for p in points.iter().filter(|p| p.is_land == pass_land) {
            let r = rotation.transform(p.pos);
            if r.z > cull_threshold {
                out.push((projector.project(r), p.is_land));
            }
        }
    }
}

/// Pulse phase in [0, 1) for a wall-clock time in ms.
pub fn pulse_phase(now_ms: f64) -> f64 {
    if !now_ms.is_finite() {
        return 0.0;
    }
    now_ms.rem_euclid(PULSE_PERIOD_MS) / PULSE_PERIOD_MS
}

/// Draw one full globe frame from already projected points.
pub fn draw_globe<S: Surface + ?Sized>(
    surface: &mut S,
    viewport: &Viewport,
    projected: &[(ProjectedPoint, bool)],
    target: &Acquisition,
    now_ms: f64,
) {
    surface.set_composite(Composite::SourceOver);
    surface.set_global_alpha(1.0);
    surface.set_fill_style(BACKGROUND);
    surface.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    let mut current_land: Option<bool> = None;
    for (p, is_land) in projected {
        if current_land != Some(*is_land) {
            surface.set_fill_style(if *is_land { LAND_COLOR } else { WATER_COLOR });
            current_land = Some(*is_land);
        }
        let (alpha, radius) = if *is_land {
            (p.alpha, LAND_DOT_RADIUS)
        } else {
            (p.alpha * WATER_ALPHA_SCALE, WATER_DOT_RADIUS)
        };
        surface.set_global_alpha(alpha);
        surface.fill_circle(p.x, p.y, radius);
    }
    surface.set_global_alpha(1.0);

    if let Some(marker) = target.marker {
        draw_beacon(surface, &marker, now_ms);
    }
}

fn draw_beacon<S: Surface + ?Sized>(surface: &mut S, marker: &ProjectedPoint, now_ms: f64) {
    surface.set_fill_style(BEACON_COLOR);
    surface.set_shadow(BEACON_GLOW_BLUR, BEACON_GLOW);
    surface.fill_circle(marker.x, marker.y, BEACON_RADIUS);
    surface.set_shadow(0.0, BEACON_GLOW);

    let pulse = pulse_phase(now_ms);
    surface.set_line_width(1.0);
    surface.set_stroke_style(&format!("rgba(255, 215, 0, {:.3})", 1.0 - pulse));
    surface.stroke_circle(marker.x, marker.y, BEACON_RADIUS + pulse * PULSE_GROWTH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quat, Vec3};
    use crate::surface::{CommandBuffer, DrawOp};

    fn pt(pos: Vec3, is_land: bool) -> SpherePoint {
        let (lat, lon) = pos.to_lat_lon_deg();
        SpherePoint { pos, lat, lon, is_land }
    }

    #[test]
    fn back_points_are_culled() {
        let points = [pt(Vec3::Z, true), pt(-Vec3::Z, true), pt(Vec3::X, false)];
        let proj = Projector::new(&Viewport::default(), 280.0, 300.0);
        let mut out = Vec::new();
        project_cloud(&points, &Mat3::IDENTITY, &proj, -0.5, &mut out);
        assert_eq!(out.len(), 2);
        // water pass first
        assert!(!out[0].1);
        assert!(out[1].1);
    }

    #[test]
    fn rotation_changes_what_is_culled() {
        let points = [pt(-Vec3::Z, true)];
        let proj = Projector::new(&Viewport::default(), 280.0, 300.0);
        let half_turn = Quat::from_axis_angle(Vec3::Y, std::f64::consts::PI).to_rotation_matrix();
        let mut out = Vec::new();
        project_cloud(&points, &half_turn, &proj, -0.5, &mut out);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn pulse_wraps_each_period() {
        assert_eq!(pulse_phase(0.0), 0.0);
        assert!((pulse_phase(1250.0) - 0.25).abs() < 1e-12);
        assert_eq!(pulse_phase(f64::NAN), 0.0);
    }

    #[test]
    fn frame_starts_with_background_and_draws_beacon() {
        let vp = Viewport::default();
        let proj = Projector::new(&vp, 280.0, 300.0);
        let marker = proj.project(Vec3::Z);
        let target = Acquisition { marker: Some(marker), distance: Some(0.0), acquired: true };
        let projected = vec![(proj.project(Vec3::new(0.0, 0.6, 0.8)), true)];

        let mut buf = CommandBuffer::new();
        draw_globe(&mut buf, &vp, &projected, &target, 500.0);

        assert!(buf.ops.contains(&DrawOp::FillStyle(BACKGROUND.into())));
        assert!(buf.ops.contains(&DrawOp::FillRect { x: 0.0, y: 0.0, w: 800.0, h: 600.0 }));
        assert!(buf.ops.contains(&DrawOp::StrokeCircle { x: 400.0, y: 300.0, radius: 16.0 }));
        assert_eq!(buf.fill_circles().count(), 2);
    }

    #[test]
    fn hidden_target_draws_no_beacon() {
        let vp = Viewport::default();
        let mut buf = CommandBuffer::new();
        draw_globe(&mut buf, &vp, &[], &Acquisition::HIDDEN, 0.0);
        assert!(!buf.ops.iter().any(|op| matches!(op, DrawOp::StrokeCircle { .. })));
    }
}
