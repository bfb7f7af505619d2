//! Orbital planes and the reference curves drawn along electron orbits

use crate::constants::ORBIT_SEGMENTS;
use glam::Vec3;
use std::f32::consts::TAU;

/// Plane an electron circles in.
///
/// Every plane shares the XZ circle; `Xy` lifts it so `y` follows `z`, and
/// `Xy2` mirrors that lift so `y` runs against `z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitalPlane {
    Xz,
    Xy,
    Xy2,
}

impl OrbitalPlane {
    /// Point at phase `angle` (radians) on the orbit of `radius`.
    pub fn point(self, radius: f32, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        let y = match self {
            OrbitalPlane::Xz => 0.0,
            OrbitalPlane::Xy => radius * sin,
            OrbitalPlane::Xy2 => -radius * sin,
        };
        Vec3::new(radius * cos, y, radius * sin)
    }

    /// Unit normal of the plane the orbit lies in.
    pub fn normal(self) -> Vec3 {
        match self {
            OrbitalPlane::Xz => Vec3::Y,
            OrbitalPlane::Xy => Vec3::new(0.0, 1.0, -1.0).normalize(),
            OrbitalPlane::Xy2 => Vec3::new(0.0, 1.0, 1.0).normalize(),
        }
    }
}

/// Lazily samples a full turn of the orbit, `segments + 1` points with the
/// last one back at the start.
pub fn orbit_samples(
    radius: f32,
    plane: OrbitalPlane,
    segments: usize,
) -> impl Iterator<Item = Vec3> {
    let segments = segments.max(1);
    (0..=segments).map(move |i| plane.point(radius, i as f32 / segments as f32 * TAU))
}

/// Cached reference curve for one orbit.
///
/// The curve only depends on radius and plane, so it is resampled only when
/// one of them changes.
#[derive(Debug, Clone)]
pub struct OrbitPath {
    radius: f32,
    plane: OrbitalPlane,
    points: Vec<Vec3>,
}

impl OrbitPath {
    pub fn new(radius: f32, plane: OrbitalPlane) -> Self {
        Self {
            radius,
            plane,
            points: orbit_samples(radius, plane, ORBIT_SEGMENTS).collect(),
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn plane(&self) -> OrbitalPlane {
        self.plane
    }

    /// Retarget the curve. Returns `true` when the points were recomputed.
    pub fn update(&mut self, radius: f32, plane: OrbitalPlane) -> bool {
        if radius == self.radius && plane == self.plane {
            return false;
        }
        *self = Self::new(radius, plane);
        true
    }
}
