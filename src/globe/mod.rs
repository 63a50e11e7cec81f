//! Spin-the-Earth view: a golden-spiral point cloud the user drags until the
//! target city sits in the middle of the screen.
//!
//! [`EarthScene`] is plain owned state. The browser layer feeds it pointer
//! events and frame timestamps and hands it a [`Surface`] to paint on; nothing
//! in here touches the DOM.

pub mod land;
pub mod projection;
pub mod render;
pub mod sphere;
pub mod target;
pub mod trackball;

use crate::clock::FrameClock;
use crate::config::EarthConfig;
use crate::error::ConfigResult;
use crate::math::{Quat, Vec3};
use crate::surface::{Surface, Viewport};

use projection::{ProjectedPoint, Projector};
use sphere::SpherePoint;
use target::Acquisition;
use trackball::Trackball;

pub struct EarthScene {
    config: EarthConfig,
    points: Vec<SpherePoint>,
    target: Vec3,
    trackball: Trackball,
    viewport: Viewport,
    clock: FrameClock,
    acquisition: Acquisition,
    // reused every frame
    projected: Vec<(ProjectedPoint, bool)>,
}

impl EarthScene {
    pub fn new(config: EarthConfig, viewport: Viewport) -> ConfigResult<Self> {
        config.validate()?;
        let points = sphere::fibonacci_sphere(config.point_count);
        let target = Vec3::from_lat_lon_deg(config.target_lat, config.target_lon);
        let trackball = Trackball::from_config(&config);
        log::debug!(
            "earth scene: {} points ({} land)",
            points.len(),
            points.iter().filter(|p| p.is_land).count()
        );
        let mut scene = Self {
            projected: Vec::with_capacity(points.len()),
            config,
            points,
            target,
            trackball,
            viewport,
            clock: FrameClock::new(),
            acquisition: Acquisition::HIDDEN,
        };
        scene.update_acquisition();
        Ok(scene)
    }

    pub fn config(&self) -> &EarthConfig {
        &self.config
    }

    pub fn points(&self) -> &[SpherePoint] {
        &self.points
    }

    pub fn target_point(&self) -> Vec3 {
        self.target
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn orientation(&self) -> Quat {
        self.trackball.orientation()
    }

    pub fn trackball(&self) -> &Trackball {
        &self.trackball
    }

    pub fn acquisition(&self) -> Acquisition {
        self.acquisition
    }

    pub fn target_acquired(&self) -> bool {
        self.acquisition.acquired
    }

    /// New drawable size; orientation and momentum are kept.
    pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
        self.viewport = Viewport::new(width, height, pixel_ratio);
        self.update_acquisition();
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.trackball.begin_drag(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.trackball.drag_to(x, y);
    }

    pub fn pointer_up(&mut self) {
        self.trackball.release();
    }

    /// Advance by the time since the previous frame stamp. Returns the
    /// acquisition signal for this frame.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let dt = self.clock.tick(now_ms);
        self.advance(dt)
    }

    /// Advance by an explicit `dt` in seconds.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.trackball.step(dt);
        self.update_acquisition();
        self.acquisition.acquired
    }

    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S, now_ms: f64) {
        let rotation = self.trackball.orientation().to_rotation_matrix();
        let projector = self.projector();
        render::project_cloud(
            &self.points,
            &rotation,
            &projector,
            self.config.cull_threshold,
            &mut self.projected,
        );
        render::draw_globe(surface, &self.viewport, &self.projected, &self.acquisition, now_ms);
    }

    fn projector(&self) -> Projector {
        Projector::new(&self.viewport, self.config.sphere_radius, self.config.focal_length)
    }

    fn update_acquisition(&mut self) {
        let rotation = self.trackball.orientation().to_rotation_matrix();
        self.acquisition = target::acquire(
            &rotation,
            self.target,
            &self.projector(),
            self.config.facing_threshold,
            self.config.acquire_distance,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CommandBuffer;

    fn small_config() -> EarthConfig {
        EarthConfig { point_count: 400, ..EarthConfig::default() }
    }

    #[test]
    fn starts_with_target_visible_but_not_centred() {
        let scene = EarthScene::new(small_config(), Viewport::new(800.0, 600.0, 1.0)).unwrap();
        let acq = scene.acquisition();
        assert!(acq.marker.is_some());
        assert!(!acq.acquired);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = EarthConfig { focal_length: 0.0, ..small_config() };
        assert!(EarthScene::new(cfg, Viewport::default()).is_err());
    }

    #[test]
    fn dragging_target_to_centre_acquires_it() {
        let mut scene = EarthScene::new(small_config(), Viewport::new(800.0, 600.0, 1.0)).unwrap();
        // Nudge the pointer by the marker's offset from centre until it locks on.
        scene.pointer_down(400.0, 300.0);
        let mut pointer = (400.0, 300.0);
        for _ in 0..200 {
            let Some(marker) = scene.acquisition().marker else { break };
            if scene.target_acquired() {
                break;
            }
            // surface follows the pointer
            pointer.0 += (400.0 - marker.x) * 0.2;
            pointer.1 += (300.0 - marker.y) * 0.2;
            scene.pointer_move(pointer.0, pointer.1);
            scene.advance(0.0);
        }
        assert!(scene.target_acquired());
    }

    #[test]
    fn render_paints_points() {
        let mut scene = EarthScene::new(small_config(), Viewport::default()).unwrap();
        let mut buf = CommandBuffer::new();
        scene.render(&mut buf, 0.0);
        let dots = buf.fill_circles().count();
        assert!(dots > 100 && dots <= 401, "dots {dots}");
    }
}
