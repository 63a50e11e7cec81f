//! "Is the target city centred?" hit test, run once per frame after the
//! orientation update.

use super::projection::{ProjectedPoint, Projector};
use crate::math::{Mat3, Vec3};

/// Per-frame target state. A pure function of orientation, viewport and config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acquisition {
    /// Projection of the target, present only while it faces the viewer.
    pub marker: Option<ProjectedPoint>,
    /// Screen distance to the viewport centre when front-facing.
    pub distance: Option<f64>,
    pub acquired: bool,
}

impl Acquisition {
    pub const HIDDEN: Self = Self { marker: None, distance: None, acquired: false };
}

/// Rotate `target` by `rotation`, project it, and decide whether it is both
/// front-facing (`z > facing_threshold`) and within `acquire_distance` px of
/// the centre. No smoothing: the threshold itself is the only hysteresis.
pub fn acquire(
    rotation: &Mat3,
    target: Vec3,
    projector: &Projector,
    facing_threshold: f64,
    acquire_distance: f64,
) -> Acquisition {
    let rotated = rotation.transform(target);
    if rotated.z <= facing_threshold {
        return Acquisition::HIDDEN;
    }
    let marker = projector.project(rotated);
    let distance = (marker.x - projector.cx).hypot(marker.y - projector.cy);
    Acquisition {
        marker: Some(marker),
        distance: Some(distance),
        acquired: distance < acquire_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quat;
    use crate::surface::Viewport;

    fn projector() -> Projector {
        Projector::new(&Viewport::new(800.0, 600.0, 1.0), 280.0, 300.0)
    }

    #[test]
    fn target_at_front_is_acquired() {
        let acq = acquire(&Mat3::IDENTITY, Vec3::Z, &projector(), 0.4, 80.0);
        assert!(acq.acquired);
        assert_eq!(acq.distance, Some(0.0));
    }

    #[test]
    fn target_behind_is_hidden() {
        let acq = acquire(&Mat3::IDENTITY, -Vec3::Z, &projector(), 0.4, 80.0);
        assert_eq!(acq, Acquisition::HIDDEN);
    }

    #[test]
    fn front_facing_but_off_centre_is_visible_not_acquired() {
        let off = Quat::from_axis_angle(Vec3::Y, 0.6).to_rotation_matrix();
        let acq = acquire(&off, Vec3::Z, &projector(), 0.4, 80.0);
        assert!(acq.marker.is_some());
        assert!(!acq.acquired);
    }

    #[test]
    fn acquisition_is_pure() {
        let m = Quat::new(0.9, 0.1, -0.3, 0.2).normalize().to_rotation_matrix();
        let t = Vec3::from_lat_lon_deg(23.1, 113.2);
        let a = acquire(&m, t, &projector(), 0.4, 80.0);
        let b = acquire(&m, t, &projector(), 0.4, 80.0);
        assert_eq!(a, b);
    }
}
