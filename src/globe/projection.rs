use crate::math::Vec3;
use crate::surface::Viewport;

/// Screen-space result for one rotated sphere point. Lives for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    /// Rotated z: 1 faces the viewer, -1 faces away.
    pub depth: f64,
    pub scale: f64,
    /// Fades from 1 at the front to 0 at the back.
    pub alpha: f64,
}

/// Perspective projection of the unit sphere scaled to `radius` px, centred in
/// the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub focal_length: f64,
}

impl Projector {
    pub fn new(viewport: &Viewport, radius: f64, focal_length: f64) -> Self {
        let (cx, cy) = viewport.center();
        Self { cx, cy, radius, focal_length }
    }

    /// `p` must already be rotated into view space.
    #[inline]
    pub fn project(&self, p: Vec3) -> ProjectedPoint {
        // distance behind the front-most surface point
        let depth_offset = self.radius - p.z * self.radius;
        let scale = self.focal_length / (self.focal_length + depth_offset);
        ProjectedPoint {
            x: self.cx + p.x * self.radius * scale,
            y: self.cy - p.y * self.radius * scale,
            depth: p.z,
            scale,
            alpha: ((p.z + 1.0) * 0.5).clamp(0.0, 1.0),
        }
    }
}
