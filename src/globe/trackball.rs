//! Drag-to-spin orientation controller with inertia and idle auto-rotation.
//!
//! Sign convention: the globe surface follows the pointer. Screen x grows to the
//! right and screen y grows downward; projection maps rotated `+x` to the right
//! and rotated `+y` up. Dragging right (`dx > 0`) rotates about `+Y` by
//! `dx * sensitivity`, carrying the visible face to the right; dragging down
//! (`dy > 0`) rotates about `+X` by `dy * sensitivity`, carrying it down.
//! Both axes are applied in screen space: `q' = normalize(pitch * yaw * q)`, the
//! same composition for direct drags and for coasting.

use crate::config::{BASE_FPS, EarthConfig};
use crate::math::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pointer is down; rotation tracks it directly.
    Dragging,
    /// Coasting on momentum, or idling with auto-rotation.
    Free,
}

/// Angular rate in radians per base frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Momentum {
    /// About screen Y (from horizontal drag).
    pub yaw: f64,
    /// About screen X (from vertical drag).
    pub pitch: f64,
}

impl Momentum {
    pub fn magnitude(&self) -> f64 {
        self.yaw.hypot(self.pitch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub start: (f64, f64),
    pub last: (f64, f64),
    /// Rotation applied by the most recent move, radians.
    pub last_delta: Momentum,
}

#[derive(Debug, Clone)]
pub struct Trackball {
    orientation: Quat,
    momentum: Momentum,
    drag: Option<DragSession>,
    sensitivity: f64,
    damping: f64,
    threshold: f64,
    auto_rotate: f64,
}

impl Trackball {
    pub fn new(orientation: Quat, config: &EarthConfig) -> Self {
        Self {
            orientation: orientation.normalize(),
            momentum: Momentum::default(),
            drag: None,
            sensitivity: config.sensitivity,
            damping: config.damping,
            threshold: config.momentum_threshold,
            auto_rotate: config.auto_rotate_speed,
        }
    }

    /// Starts at the configured yaw offset.
    pub fn from_config(config: &EarthConfig) -> Self {
        let start = Quat::from_axis_angle(Vec3::Y, config.initial_yaw_deg.to_radians());
        Self::new(start, config)
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn momentum(&self) -> Momentum {
        self.momentum
    }

    pub fn mode(&self) -> Mode {
        if self.drag.is_some() { Mode::Dragging } else { Mode::Free }
    }

    pub fn drag_session(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn begin_drag(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        self.momentum = Momentum::default();
        self.drag = Some(DragSession {
            start: (x, y),
            last: (x, y),
            last_delta: Momentum::default(),
        });
    }

    /// Rotate by the pointer delta since the last move. Ignored when not dragging.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let Some(session) = self.drag.as_mut() else {
            return;
        };
        let delta = Momentum {
            yaw: (x - session.last.0) * self.sensitivity,
            pitch: (y - session.last.1) * self.sensitivity,
        };
        session.last = (x, y);
        session.last_delta = delta;
        self.momentum = delta;
        self.apply_rotation(delta.yaw, delta.pitch);
    }

    /// End the gesture; the last move's delta carries on as momentum.
    pub fn release(&mut self) {
        if let Some(session) = self.drag.take() {
            self.momentum = session.last_delta;
        }
    }

    /// Advance inertia by `dt` seconds. No-op while dragging.
    pub fn step(&mut self, dt: f64) {
        if self.drag.is_some() || !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let frames = dt * BASE_FPS;
        let decay = self.damping.powf(frames);
        self.momentum.yaw *= decay;
        self.momentum.pitch *= decay;

        if self.momentum.yaw.abs() > self.threshold || self.momentum.pitch.abs() > self.threshold {
            self.apply_rotation(self.momentum.yaw * frames, self.momentum.pitch * frames);
        } else {
            self.apply_rotation(self.auto_rotate * frames, 0.0);
        }
    }

    fn apply_rotation(&mut self, yaw: f64, pitch: f64) {
        let spin = Quat::from_axis_angle(Vec3::Y, yaw);
        let tilt = Quat::from_axis_angle(Vec3::X, pitch);
        self.orientation = (tilt * (spin * self.orientation)).normalize();
    }
}
