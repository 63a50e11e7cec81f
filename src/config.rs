//! Tunable constants for both views.
//!
//! Every knob is a named `pub const`; the config structs default to them and can
//! be overridden from JSON when the `serde_json` feature is on. Per-frame rates
//! are given per 60 Hz frame and scaled by elapsed time at runtime.

use crate::error::{ConfigError, ConfigResult};

/// Frame rate the per-frame constants were tuned at.
pub const BASE_FPS: f64 = 60.0;

// --- Globe ------------------------------------------------------------------

/// Number of points in the sphere cloud.
pub const SPHERE_POINT_COUNT: usize = 8500;
/// Sphere radius in CSS pixels.
pub const SPHERE_RADIUS: f64 = 280.0;
/// Radians of rotation per pixel dragged.
pub const ROTATION_SENSITIVITY: f64 = 0.005;
/// Momentum multiplier applied once per base frame while coasting.
pub const MOMENTUM_DAMPING: f64 = 0.95;
/// Below this (radians per base frame on both axes) momentum is considered spent.
pub const MOMENTUM_THRESHOLD: f64 = 0.001;
/// Idle spin about the vertical axis, radians per base frame.
pub const AUTO_ROTATE_SPEED: f64 = 0.002;
/// Perspective focal length in pixels.
pub const FOCAL_LENGTH: f64 = 300.0;
/// Rotated points with `z` at or below this are culled.
pub const BACK_FACE_CULL: f64 = -0.5;
/// Minimum rotated `z` for the target to count as front-facing.
pub const TARGET_FACING_THRESHOLD: f64 = 0.4;
/// Max distance (CSS px) from the viewport centre for the target to be acquired.
pub const TARGET_ACQUIRE_DISTANCE: f64 = 80.0;
/// Guangzhou.
pub const TARGET_LAT_DEG: f64 = 23.1;
pub const TARGET_LON_DEG: f64 = 113.2;
/// Starting yaw about +Y so the target begins off-centre.
pub const INITIAL_YAW_DEG: f64 = -23.0;
/// Largest point cloud a config may ask for.
pub const POINT_COUNT_LIMIT: usize = 50_000;
/// Target marker pulse period.
pub const PULSE_PERIOD_MS: f64 = 1000.0;

// --- Fireworks --------------------------------------------------------------

/// Particles created per explosion.
pub const PARTICLES_PER_BURST: usize = 120;
/// Hard cap on live particles; oldest are evicted beyond it.
pub const MAX_PARTICLES: usize = 4000;
/// Largest burst a config may ask for.
pub const BURST_LIMIT: usize = 1_000;
/// Largest particle cap a config may ask for.
pub const PARTICLE_CAP_LIMIT: usize = 20_000;
/// Downward acceleration, px/s^2 (0.05 px per frame^2 at 60 Hz).
pub const GRAVITY: f64 = 180.0;
/// Velocity multiplier per base frame.
pub const DRAG_PER_FRAME: f64 = 0.96;
/// Alpha lost per second (0.005..0.015 per frame at 60 Hz).
pub const DECAY_MIN: f64 = 0.3;
pub const DECAY_MAX: f64 = 0.9;
/// Launch speed range, px/s (6..18 px per frame at 60 Hz).
pub const SPEED_MIN: f64 = 360.0;
pub const SPEED_MAX: f64 = 1080.0;
/// Particle radius range, px.
pub const PARTICLE_SIZE_MIN: f64 = 2.0;
pub const PARTICLE_SIZE_MAX: f64 = 3.0;
/// Mean autonomous bursts per second (4% chance per 60 Hz frame).
pub const AUTO_SPAWN_RATE: f64 = 2.4;
/// Autonomous bursts land in the top fraction of the viewport.
pub const AUTO_SPAWN_HEIGHT_FRACTION: f64 = 0.6;
/// Opacity of the black overlay painted each frame for trails.
pub const TRAIL_FADE_ALPHA: f64 = 0.15;
/// Chance per particle per frame of a dimmed twinkle.
pub const FLICKER_CHANCE: f64 = 0.08;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct EarthConfig {
    pub point_count: usize,
    pub sphere_radius: f64,
    pub sensitivity: f64,
    pub damping: f64,
    pub momentum_threshold: f64,
    pub auto_rotate_speed: f64,
    pub focal_length: f64,
    pub cull_threshold: f64,
    pub facing_threshold: f64,
    pub acquire_distance: f64,
    pub target_lat: f64,
    pub target_lon: f64,
    pub initial_yaw_deg: f64,
}

impl Default for EarthConfig {
    fn default() -> Self {
        Self {
            point_count: SPHERE_POINT_COUNT,
            sphere_radius: SPHERE_RADIUS,
            sensitivity: ROTATION_SENSITIVITY,
            damping: MOMENTUM_DAMPING,
            momentum_threshold: MOMENTUM_THRESHOLD,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            focal_length: FOCAL_LENGTH,
            cull_threshold: BACK_FACE_CULL,
            facing_threshold: TARGET_FACING_THRESHOLD,
            acquire_distance: TARGET_ACQUIRE_DISTANCE,
            target_lat: TARGET_LAT_DEG,
            target_lon: TARGET_LON_DEG,
            initial_yaw_deg: INITIAL_YAW_DEG,
        }
    }
}

impl EarthConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        at_least("point_count", self.point_count, 1)?;
        at_most("point_count", self.point_count, POINT_COUNT_LIMIT)?;
        positive("sphere_radius", self.sphere_radius)?;
        positive("sensitivity", self.sensitivity)?;
        positive("focal_length", self.focal_length)?;
        positive("acquire_distance", self.acquire_distance)?;
        in_range("damping", self.damping, 0.0, 1.0)?;
        in_range("momentum_threshold", self.momentum_threshold, 0.0, 1.0)?;
        in_range("auto_rotate_speed", self.auto_rotate_speed, -1.0, 1.0)?;
        in_range("cull_threshold", self.cull_threshold, -1.0, 1.0)?;
        in_range("facing_threshold", self.facing_threshold, -1.0, 1.0)?;
        in_range("target_lat", self.target_lat, -90.0, 90.000_001)?;
        in_range("target_lon", self.target_lon, -180.0, 180.000_001)?;
        in_range("initial_yaw_deg", self.initial_yaw_deg, -360.0, 360.0)?;
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct FireworksConfig {
    pub particles_per_burst: usize,
    pub max_particles: usize,
    pub gravity: f64,
    pub drag: f64,
    pub decay_min: f64,
    pub decay_max: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub size_min: f64,
    pub size_max: f64,
    pub auto_spawn_rate: f64,
    pub auto_spawn_height: f64,
    pub trail_alpha: f64,
    pub flicker_chance: f64,
    pub base_fps: f64,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            particles_per_burst: PARTICLES_PER_BURST,
            max_particles: MAX_PARTICLES,
            gravity: GRAVITY,
            drag: DRAG_PER_FRAME,
            decay_min: DECAY_MIN,
            decay_max: DECAY_MAX,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            size_min: PARTICLE_SIZE_MIN,
            size_max: PARTICLE_SIZE_MAX,
            auto_spawn_rate: AUTO_SPAWN_RATE,
            auto_spawn_height: AUTO_SPAWN_HEIGHT_FRACTION,
            trail_alpha: TRAIL_FADE_ALPHA,
            flicker_chance: FLICKER_CHANCE,
            base_fps: BASE_FPS,
        }
    }
}

impl FireworksConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        at_least("particles_per_burst", self.particles_per_burst, 1)?;
        at_most("particles_per_burst", self.particles_per_burst, BURST_LIMIT)?;
        at_least("max_particles", self.max_particles, self.particles_per_burst)?;
        at_most("max_particles", self.max_particles, PARTICLE_CAP_LIMIT)?;
        positive("base_fps", self.base_fps)?;
        positive("decay_min", self.decay_min)?;
        positive("speed_max", self.speed_max)?;
        positive("size_min", self.size_min)?;
        // drag == 1.0 means no air resistance, which the integrator supports.
        in_range("drag", self.drag, f64::MIN_POSITIVE, 1.000_000_1)?;
        in_range("gravity", self.gravity, -10_000.0, 10_000.0)?;
        in_range("auto_spawn_rate", self.auto_spawn_rate, 0.0, 1_000.0)?;
        in_range("auto_spawn_height", self.auto_spawn_height, 0.0, 1.000_000_1)?;
        in_range("trail_alpha", self.trail_alpha, 0.0, 1.000_000_1)?;
        in_range("flicker_chance", self.flicker_chance, 0.0, 1.000_000_1)?;
        ordered("decay", self.decay_min, self.decay_max)?;
        ordered("speed", self.speed_min, self.speed_max)?;
        ordered("size", self.size_min, self.size_max)?;
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let cfg: Self = serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> ConfigResult<()> {
    if value >= min && value < max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

fn at_least(field: &'static str, value: usize, min: usize) -> ConfigResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(ConfigError::TooSmall { field, value, min })
    }
}

fn at_most(field: &'static str, value: usize, max: usize) -> ConfigResult<()> {
    if value <= max {
        Ok(())
    } else {
        Err(ConfigError::TooLarge { field, value, max })
    }
}

fn ordered(field: &'static str, low: f64, high: f64) -> ConfigResult<()> {
    if low <= high {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, low, high })
    }
}
