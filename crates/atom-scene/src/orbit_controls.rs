//! Damped orbit controller
//!
//! User input only accumulates into pending deltas. Each [`OrbitControls::update`]
//! applies a fixed fraction of what is pending and decays the rest, which
//! gives the camera its inertial feel. Without updates nothing moves.

use crate::params::SceneParams;
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Keeps the camera off the poles where the up vector degenerates
const POLE_EPSILON: f32 = 0.01;

/// Pending motion below this is dropped so the camera settles exactly
const SETTLE_EPSILON: f32 = 1e-6;

/// Wheel zoom step per scroll unit
const ZOOM_BASE: f32 = 0.95;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X
    theta: f32,
    /// Polar angle from +Y
    phi: f32,

    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    pending_pan: Vec3,

    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// Vertical field of view, used to scale panning to the visible area
    pub fovy: f32,
}

impl OrbitControls {
    pub fn new(position: Vec3, target: Vec3, params: &SceneParams, fovy: f32) -> Self {
        let offset = position - target;
        let radius = offset.length();
        let phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        Self {
            target,
            radius: radius.clamp(params.min_distance, params.max_distance),
            theta: offset.x.atan2(offset.z),
            phi: phi.clamp(POLE_EPSILON, PI - POLE_EPSILON),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            pending_pan: Vec3::ZERO,
            damping_factor: params.damping_factor,
            min_distance: params.min_distance,
            max_distance: params.max_distance,
            rotate_speed: params.rotate_speed,
            zoom_speed: params.zoom_speed,
            pan_speed: params.pan_speed,
            fovy,
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vec3 {
        self.target + self.offset()
    }

    fn offset(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
            self.radius * sin_phi * cos_theta,
        )
    }

    /// Orbit by a pointer drag of `delta` pixels on a viewport `viewport_height` tall.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.pending_theta -= TAU * delta.x / height * self.rotate_speed;
        self.pending_phi -= TAU * delta.y / height * self.rotate_speed;
    }

    /// Zoom by wheel `scroll` units; positive moves closer.
    pub fn zoom(&mut self, scroll: f32) {
        self.pending_scale *= ZOOM_BASE.powf(scroll * self.zoom_speed);
    }

    /// Slide the target by a pointer drag of `delta` pixels.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        // Distance covered by one pixel at the target's depth
        let units_per_pixel = 2.0 * self.radius * (self.fovy * 0.5).tan() / height;

        let forward = -self.offset().normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);

        self.pending_pan +=
            (-right * delta.x + up * delta.y) * units_per_pixel * self.pan_speed;
    }

    pub fn has_pending_input(&self) -> bool {
        self.pending_theta != 0.0
            || self.pending_phi != 0.0
            || self.pending_scale != 1.0
            || self.pending_pan != Vec3::ZERO
    }

    /// Apply one damping step. Returns `true` if the camera moved.
    pub fn update(&mut self) -> bool {
        if !self.has_pending_input() {
            return false;
        }

        let damping = if self.damping_factor > 0.0 {
            self.damping_factor.min(1.0)
        } else {
            1.0
        };

        self.theta = (self.theta + self.pending_theta * damping).rem_euclid(TAU);
        self.phi = (self.phi + self.pending_phi * damping).clamp(POLE_EPSILON, PI - POLE_EPSILON);
        self.radius = (self.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.target += self.pending_pan * damping;

        let decay = 1.0 - damping;
        self.pending_theta = settle(self.pending_theta * decay);
        self.pending_phi = settle(self.pending_phi * decay);
        self.pending_pan *= decay;
        if self.pending_pan.length_squared() < SETTLE_EPSILON * SETTLE_EPSILON {
            self.pending_pan = Vec3::ZERO;
        }
        self.pending_scale = 1.0;

        true
    }
}

fn settle(value: f32) -> f32 {
    if value.abs() < SETTLE_EPSILON {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        let params = SceneParams::default();
        OrbitControls::new(
            params.camera_position,
            params.camera_target,
            &params,
            75f32.to_radians(),
        )
    }

    #[test]
    fn reproduces_initial_position() {
        let controls = controls();
        let expected = SceneParams::default().camera_position;
        assert!(controls.position().distance(expected) < 1e-4);
    }

    #[test]
    fn idle_updates_do_not_drift() {
        let mut controls = controls();
        let start = controls.position();
        for _ in 0..1000 {
            assert!(!controls.update());
        }
        assert_eq!(controls.position(), start);
    }

    #[test]
    fn input_is_applied_gradually_and_settles() {
        let mut controls = controls();
        let start = controls.position();
        controls.rotate(Vec2::new(120.0, 0.0), 800.0);

        assert!(controls.update());
        let first = controls.position();
        assert!(first.distance(start) > 0.0);

        let mut steps = 1;
        while controls.update() {
            steps += 1;
            assert!(steps < 10_000, "controller never settled");
        }
        assert!(steps > 1);

        let settled = controls.position();
        assert!(!controls.update());
        assert_eq!(controls.position(), settled);
    }

    #[test]
    fn rotation_keeps_distance() {
        let mut controls = controls();
        let distance = controls.distance();
        controls.rotate(Vec2::new(300.0, -150.0), 600.0);
        while controls.update() {}
        let offset = controls.position() - controls.target;
        assert!((offset.length() - distance).abs() < 1e-3);
    }

    #[test]
    fn input_without_update_is_stale() {
        let mut controls = controls();
        let start = controls.position();
        controls.rotate(Vec2::new(50.0, 20.0), 600.0);
        controls.zoom(3.0);
        assert_eq!(controls.position(), start);
        assert!(controls.has_pending_input());
    }

    #[test]
    fn zoom_out_is_bounded() {
        let mut controls = controls();
        for _ in 0..100 {
            controls.zoom(-10.0);
            controls.update();
        }
        assert!((controls.distance() - 50.0).abs() < 1e-4);
        assert!(controls.position().distance(controls.target) <= 50.0 + 1e-3);
    }

    #[test]
    fn zoom_in_moves_closer() {
        let mut controls = controls();
        let before = controls.distance();
        controls.zoom(2.0);
        controls.update();
        assert!(controls.distance() < before);
    }

    #[test]
    fn pan_moves_target() {
        let mut controls = controls();
        controls.pan(Vec2::new(40.0, 0.0), 600.0);
        while controls.update() {}
        assert!(controls.target.length() > 0.0);
        // Panning slides sideways, not toward the camera
        assert!(((controls.position() - controls.target).length() - controls.distance()).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut controls = controls();
        controls.rotate(Vec2::new(0.0, 100_000.0), 600.0);
        while controls.update() {}
        let offset = controls.position() - controls.target;
        assert!(offset.y.abs() < controls.distance());
        assert!(offset.x.is_finite() && offset.z.is_finite());
    }
}
