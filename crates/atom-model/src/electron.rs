//! Electron configuration and orbital motion

use crate::constants::{ELECTRON_BLUE, ELECTRON_GREEN, ELECTRON_RED};
use crate::error::ModelError;
use crate::orbit::OrbitalPlane;
use glam::Vec3;
use std::f32::consts::TAU;

/// Static description of one electron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronConfig {
    /// Orbit radius in scene units
    pub radius: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    pub plane: OrbitalPlane,
    pub color: [f32; 3],
    pub label: &'static str,
}

/// The six electrons of a neutral carbon atom
pub const CARBON_ELECTRONS: [ElectronConfig; 6] = [
    ElectronConfig {
        radius: 4.0,
        speed: 1.0,
        plane: OrbitalPlane::Xz,
        color: ELECTRON_BLUE,
        label: "Electron 1",
    },
    ElectronConfig {
        radius: 4.0,
        speed: 2.0,
        plane: OrbitalPlane::Xz,
        color: ELECTRON_BLUE,
        label: "Electron 2",
    },
    ElectronConfig {
        radius: 6.0,
        speed: 1.0,
        plane: OrbitalPlane::Xz,
        color: ELECTRON_RED,
        label: "Electron 3",
    },
    ElectronConfig {
        radius: 6.0,
        speed: 4.0,
        plane: OrbitalPlane::Xy2,
        color: ELECTRON_RED,
        label: "Electron 4",
    },
    ElectronConfig {
        radius: 6.0,
        speed: 3.0,
        plane: OrbitalPlane::Xz,
        color: ELECTRON_GREEN,
        label: "Electron 5",
    },
    ElectronConfig {
        radius: 6.0,
        speed: 4.0,
        plane: OrbitalPlane::Xy,
        color: ELECTRON_GREEN,
        label: "Electron 6",
    },
];

/// Uniform circular motion along an orbit.
///
/// Position is computed from absolute elapsed time, never from the previous
/// frame, so it can be evaluated at any time in any order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronKinematics {
    radius: f32,
    speed: f32,
    plane: OrbitalPlane,
}

impl ElectronKinematics {
    pub fn new(radius: f32, speed: f32, plane: OrbitalPlane) -> Result<Self, ModelError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ModelError::InvalidOrbit { radius });
        }
        Ok(Self {
            radius,
            speed,
            plane,
        })
    }

    pub fn from_config(config: &ElectronConfig) -> Result<Self, ModelError> {
        Self::new(config.radius, config.speed, config.plane)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn plane(&self) -> OrbitalPlane {
        self.plane
    }

    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        self.plane.point(self.radius, elapsed * self.speed)
    }

    /// Resting position before the first frame, on the +X axis.
    pub fn initial_position(&self) -> Vec3 {
        Vec3::new(self.radius, 0.0, 0.0)
    }

    /// Seconds per revolution, `None` for a stationary electron.
    pub fn period(&self) -> Option<f32> {
        (self.speed != 0.0).then(|| TAU / self.speed.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn assert_close(a: Vec3, b: Vec3, tolerance: f32) {
        assert!(a.distance(b) < tolerance, "{a:?} != {b:?}");
    }

    #[test]
    fn quarter_turn_in_xz_plane() {
        let electron = ElectronKinematics::new(4.0, 1.0, OrbitalPlane::Xz).unwrap();
        assert_close(electron.position_at(0.0), Vec3::new(4.0, 0.0, 0.0), 1e-6);
        assert_close(electron.position_at(FRAC_PI_2), Vec3::new(0.0, 0.0, 4.0), 1e-5);
    }

    #[test]
    fn tilted_planes_lift_y() {
        let up = ElectronKinematics::new(6.0, 4.0, OrbitalPlane::Xy).unwrap();
        let down = ElectronKinematics::new(6.0, 4.0, OrbitalPlane::Xy2).unwrap();
        let t = FRAC_PI_2 / 4.0;
        assert_close(up.position_at(t), Vec3::new(0.0, 6.0, 6.0), 1e-4);
        assert_close(down.position_at(t), Vec3::new(0.0, -6.0, 6.0), 1e-4);
    }

    #[test]
    fn stays_on_orbit_circle() {
        for config in &CARBON_ELECTRONS {
            let electron = ElectronKinematics::from_config(config).unwrap();
            for step in 0..200 {
                let p = electron.position_at(step as f32 * 0.137);
                let in_plane = (p.x * p.x + p.z * p.z).sqrt();
                assert!((in_plane - config.radius).abs() < 1e-4);
                assert!(p.dot(config.plane.normal()).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn motion_is_periodic() {
        for config in &CARBON_ELECTRONS {
            let electron = ElectronKinematics::from_config(config).unwrap();
            let period = electron.period().unwrap();
            assert_close(electron.position_at(0.0), electron.position_at(period), 1e-4);
        }
    }

    #[test]
    fn evaluation_order_does_not_matter() {
        let electron = ElectronKinematics::from_config(&CARBON_ELECTRONS[3]).unwrap();
        let later = electron.position_at(12.5);
        let _ = electron.position_at(3.0);
        assert_eq!(electron.position_at(12.5), later);
    }

    #[test]
    fn starts_on_x_axis() {
        let electron = ElectronKinematics::from_config(&CARBON_ELECTRONS[5]).unwrap();
        assert_eq!(electron.initial_position(), electron.position_at(0.0));
    }

    #[test]
    fn rejects_degenerate_orbits() {
        assert!(ElectronKinematics::new(0.0, 1.0, OrbitalPlane::Xz).is_err());
        assert!(ElectronKinematics::new(-2.0, 1.0, OrbitalPlane::Xy).is_err());
        assert!(ElectronKinematics::new(f32::NAN, 1.0, OrbitalPlane::Xy2).is_err());
    }

    #[test]
    fn stationary_electron_has_no_period() {
        let electron = ElectronKinematics::new(4.0, 0.0, OrbitalPlane::Xz).unwrap();
        assert_eq!(electron.period(), None);
    }
}
