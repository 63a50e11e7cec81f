// Integration tests (native) for the `lunar-canvas` crate.
// These drive the globe and fireworks simulations through their public API and
// paint into a recording surface, so they run under `cargo test` on the host.

use approx::assert_abs_diff_eq;
use lunar_canvas::config::{EarthConfig, FireworksConfig};
use lunar_canvas::math::{Quat, Vec3};
use lunar_canvas::surface::{CommandBuffer, DrawOp, Viewport};
use lunar_canvas::{ConfigError, EarthScene, FireworksShow};

fn earth(point_count: usize) -> EarthScene {
    let cfg = EarthConfig { point_count, ..EarthConfig::default() };
    EarthScene::new(cfg, Viewport::new(800.0, 600.0, 1.0)).unwrap()
}

fn calm_show(seed: u64) -> FireworksShow {
    let cfg = FireworksConfig { auto_spawn_rate: 0.0, ..FireworksConfig::default() };
    FireworksShow::with_seed(cfg, Viewport::new(800.0, 600.0, 1.0), seed).unwrap()
}

// Dragging 100 px right at 0.005 rad/px is a 0.5 rad turn about +Y, and the
// front-facing target slides right on screen.
#[test]
fn horizontal_drag_turns_globe_about_vertical_axis() {
    let mut scene = earth(500);
    let before = scene.orientation();
    let marker_before = scene.acquisition().marker.unwrap();

    scene.pointer_down(300.0, 300.0);
    scene.pointer_move(400.0, 300.0);
    scene.advance(0.0);

    let expected = (Quat::from_axis_angle(Vec3::Y, 0.5) * before).normalize();
    let after = scene.orientation();
    assert_abs_diff_eq!(after.w, expected.w, epsilon = 1e-12);
    assert_abs_diff_eq!(after.x, expected.x, epsilon = 1e-12);
    assert_abs_diff_eq!(after.y, expected.y, epsilon = 1e-12);
    assert_abs_diff_eq!(after.z, expected.z, epsilon = 1e-12);

    let marker_after = scene.acquisition().marker.unwrap();
    assert!(marker_after.x > marker_before.x);
}

// After a flick the globe coasts, then settles into the idle spin.
#[test]
fn released_globe_keeps_turning() {
    let mut scene = earth(200);
    scene.pointer_down(400.0, 300.0);
    scene.pointer_move(430.0, 310.0);
    scene.pointer_up();

    let mut last = scene.orientation();
    for _ in 0..600 {
        scene.advance(1.0 / 60.0);
        let now = scene.orientation();
        assert_ne!(now, last);
        last = now;
    }
    assert!(scene.trackball().momentum().magnitude() < 1e-4);
}

#[test]
fn acquisition_is_stable_between_frames() {
    let mut scene = earth(200);
    let first = scene.acquisition();
    scene.advance(0.0);
    assert_eq!(scene.acquisition(), first);
}

#[test]
fn spawn_adds_exactly_one_burst() {
    let cfg = FireworksConfig {
        particles_per_burst: 150,
        auto_spawn_rate: 0.0,
        ..FireworksConfig::default()
    };
    let mut show = FireworksShow::with_seed(cfg, Viewport::new(800.0, 600.0, 1.0), 7).unwrap();
    show.spawn(400.0, 300.0);
    assert_eq!(show.particle_count(), 150);
}

#[test]
fn same_seed_same_show() {
    let mut a = calm_show(99);
    let mut b = calm_show(99);
    a.spawn(200.0, 100.0);
    b.spawn(200.0, 100.0);
    for _ in 0..30 {
        a.advance(1.0 / 60.0);
        b.advance(1.0 / 60.0);
    }
    assert_eq!(a.particles(), b.particles());
}

// Growing the window re-centres the globe without touching its orientation,
// and live sparks stay where they are.
#[test]
fn resize_recentres_without_resetting_state() {
    let mut scene = earth(300);
    scene.pointer_down(400.0, 300.0);
    scene.pointer_move(380.0, 320.0);
    scene.pointer_up();
    // acquisition is refreshed once per frame
    scene.advance(0.0);
    let orientation = scene.orientation();
    let marker = scene.acquisition().marker.unwrap();

    scene.resize(1920.0, 1080.0, 1.0);
    assert_eq!(scene.orientation(), orientation);
    let moved = scene.acquisition().marker.unwrap();
    assert_abs_diff_eq!(moved.x - 960.0, marker.x - 400.0, epsilon = 1e-9);
    assert_abs_diff_eq!(moved.y - 540.0, marker.y - 300.0, epsilon = 1e-9);

    let mut show = calm_show(5);
    show.spawn(100.0, 100.0);
    let sparks = show.particles().to_vec();
    show.resize(1920.0, 1080.0, 1.0);
    assert_eq!(show.particles(), &sparks[..]);
    assert_eq!(show.viewport().center(), (960.0, 540.0));
}

#[test]
fn frames_paint_both_views() {
    let mut scene = earth(300);
    let mut buf = CommandBuffer::new();
    scene.tick(0.0);
    scene.tick(16.0);
    scene.render(&mut buf, 16.0);
    assert!(buf.fill_circles().count() > 50);

    let mut show = calm_show(3);
    show.spawn(400.0, 300.0);
    buf.clear();
    show.tick(0.0);
    show.tick(16.0);
    show.render(&mut buf);
    assert!(matches!(buf.ops.iter().find(|op| matches!(op, DrawOp::FillRect { .. })),
        Some(DrawOp::FillRect { w, h, .. }) if *w == 800.0 && *h == 600.0));
    assert_eq!(buf.fill_circles().count(), show.particle_count());
}

#[test]
fn bad_config_is_reported_not_panicked() {
    let cfg = FireworksConfig { drag: 0.0, ..FireworksConfig::default() };
    let err = FireworksShow::with_seed(cfg, Viewport::default(), 1).err().unwrap();
    assert!(matches!(err, ConfigError::OutOfRange { field: "drag", .. }));

    let cfg = EarthConfig { point_count: 0, ..EarthConfig::default() };
    assert!(matches!(
        EarthScene::new(cfg, Viewport::default()),
        Err(ConfigError::TooSmall { field: "point_count", .. })
    ));
}

// Huge counts from a JSON override must be refused before anything is allocated.
#[test]
fn oversized_counts_refused_at_construction() {
    let cfg = EarthConfig { point_count: usize::MAX / 64, ..EarthConfig::default() };
    assert!(matches!(
        EarthScene::new(cfg, Viewport::default()),
        Err(ConfigError::TooLarge { field: "point_count", .. })
    ));

    let cfg = FireworksConfig { max_particles: usize::MAX / 64, ..FireworksConfig::default() };
    assert!(matches!(
        FireworksShow::with_seed(cfg, Viewport::default(), 1).err(),
        Some(ConfigError::TooLarge { field: "max_particles", .. })
    ));
}
