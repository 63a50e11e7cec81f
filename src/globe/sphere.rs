//! Golden-angle (Fibonacci) point cloud on the unit sphere.

use super::land;
use crate::math::Vec3;

/// One dot of the globe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePoint {
    pub pos: Vec3,
    pub lat: f64,
    pub lon: f64,
    pub is_land: bool,
}

/// `count` evenly spread unit vectors, pole to pole, classified land/water.
///
/// Deterministic: the same count always yields the same points.
pub fn fibonacci_sphere(count: usize) -> Vec<SpherePoint> {
    let golden_ratio = (1.0 + 5.0_f64.sqrt()) * 0.5;
    let denom = count.saturating_sub(1).max(1) as f64;
    (0..count)
        .map(|i| {
            let fi = i as f64;
            let y = if count == 1 { 1.0 } else { 1.0 - (fi / denom) * 2.0 };
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = std::f64::consts::TAU * fi / golden_ratio;
            let pos = Vec3::new(theta.cos() * ring, y, theta.sin() * ring);
            let (lat, lon) = pos.to_lat_lon_deg();
            SpherePoint { pos, lat, lon, is_land: land::is_land(lat, lon) }
        })
        .collect()
}
