//! Small 3D math kit for the globe: vectors, unit quaternions and the 3x3
//! rotation matrix used to transform the point cloud in bulk.
//!
//! Quaternions are stored `(w, x, y, z)`. Composition reads right to left:
//! `a * b` applies `b` first, then `a`.

use std::ops::{Add, Mul, Neg, Sub};

/// Below this magnitude a quaternion is treated as degenerate.
pub const NORMALIZE_EPSILON: f64 = 1e-6;

/// 3D vector / point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector on the sphere for a latitude / longitude in degrees.
    ///
    /// +Y is the north pole, longitude 0 lies on +X and longitude 90 E on +Z,
    /// so `atan2(z, x)` recovers the longitude.
    pub fn from_lat_lon_deg(lat: f64, lon: f64) -> Self {
        let polar = (90.0 - lat).to_radians();
        let azimuth = lon.to_radians();
        Self {
            x: polar.sin() * azimuth.cos(),
            y: polar.cos(),
            z: polar.sin() * azimuth.sin(),
        }
    }

    /// Inverse of [`Vec3::from_lat_lon_deg`] for unit vectors.
    pub fn to_lat_lon_deg(self) -> (f64, f64) {
        let lat = self.y.clamp(-1.0, 1.0).asin().to_degrees();
        let lon = self.z.atan2(self.x).to_degrees();
        (lat, lon)
    }
}

impl Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Rotation quaternion `(w, x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `angle` radians about a unit `axis` (right-handed).
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let (s, c) = (angle * 0.5).sin_cos();
        Self::new(c, axis.x * s, axis.y * s, axis.z * s)
    }

    #[inline]
    pub fn length(self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy. Degenerate input yields the identity instead of NaNs.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if !(len >= NORMALIZE_EPSILON) {
            return Self::IDENTITY;
        }
        Self::new(self.w / len, self.x / len, self.y / len, self.z / len)
    }

    /// Hamilton product `self * rhs`.
    pub fn multiply(self, rhs: Self) -> Self {
        let (w1, x1, y1, z1) = (self.w, self.x, self.y, self.z);
        let (w2, x2, y2, z2) = (rhs.w, rhs.x, rhs.y, rhs.z);
        Self::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }

    /// Row-major rotation matrix equivalent to this (unit) quaternion.
    pub fn to_rotation_matrix(self) -> Mat3 {
        let Self { w, x, y, z } = self;
        let (x2, y2, z2) = (x + x, y + y, z + z);
        let (xx, xy, xz) = (x * x2, x * y2, x * z2);
        let (yy, yz, zz) = (y * y2, y * z2, z * z2);
        let (wx, wy, wz) = (w * x2, w * y2, w * z2);
        Mat3 {
            m: [
                1.0 - (yy + zz),
                xy - wz,
                xz + wy,
                xy + wz,
                1.0 - (xx + zz),
                yz - wx,
                xz - wy,
                yz + wx,
                1.0 - (xx + yy),
            ],
        }
    }

    /// Rotate a single vector. Prefer [`Mat3::transform`] for batches.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        self.to_rotation_matrix().transform(v)
    }
}

impl Mul for Quat {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

/// Row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [f64; 9],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    #[inline]
    pub fn transform(&self, p: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3 {
            x: m[0] * p.x + m[1] * p.y + m[2] * p.z,
            y: m[3] * p.x + m[4] * p.y + m[5] * p.z,
            z: m[6] * p.x + m[7] * p.y + m[8] * p.z,
        }
    }
}
