//! Camera rig: fixed starting pose, then damped interactive orbiting

use crate::orbit_controls::OrbitControls;
use crate::params::SceneParams;
use glam::{Mat4, Vec3};

/// Default vertical field of view
pub const DEFAULT_FOVY_DEGREES: f32 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}

/// Owns the camera pose.
///
/// The pose only changes inside [`CameraRig::advance`]; input handed to
/// [`CameraRig::controls_mut`] waits until the next advance.
#[derive(Debug, Clone)]
pub struct CameraRig {
    controls: OrbitControls,
    pose: CameraPose,
    initial: CameraPose,
}

impl CameraRig {
    /// Place the camera at its starting pose looking at the target.
    pub fn initialize(params: &SceneParams) -> Self {
        let initial = CameraPose {
            position: params.camera_position,
            target: params.camera_target,
        };
        let controls = OrbitControls::new(
            initial.position,
            initial.target,
            params,
            DEFAULT_FOVY_DEGREES.to_radians(),
        );
        log::debug!(
            "camera at {:?} looking at {:?} (max distance {})",
            initial.position,
            initial.target,
            params.max_distance
        );

        Self {
            controls,
            pose: initial,
            initial,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    /// Run one damping step of the orbit controller. Call once per frame.
    pub fn advance(&mut self) -> CameraPose {
        if self.controls.update() {
            self.pose = CameraPose {
                position: self.controls.position(),
                target: self.controls.target,
            };
        }
        self.pose
    }

    /// Return to the starting pose, dropping any pending input.
    pub fn reset(&mut self, params: &SceneParams) {
        let fovy = self.controls.fovy;
        self.controls = OrbitControls::new(self.initial.position, self.initial.target, params, fovy);
        self.pose = self.initial;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn starts_at_fixed_pose() {
        let rig = CameraRig::initialize(&SceneParams::default());
        let pose = rig.pose();
        assert_eq!(pose.position, Vec3::new(18.5, 1.5, -0.01));
        assert_eq!(pose.target, Vec3::ZERO);
    }

    #[test]
    fn view_looks_at_origin() {
        let pose = CameraRig::initialize(&SceneParams::default()).pose();
        let origin_in_view = pose.view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin_in_view.x.abs() < 1e-4);
        assert!(origin_in_view.y.abs() < 1e-4);
        assert!((origin_in_view.z + pose.distance()).abs() < 1e-3);
    }

    #[test]
    fn advance_without_input_keeps_exact_pose() {
        let mut rig = CameraRig::initialize(&SceneParams::default());
        let start = rig.pose();
        for _ in 0..500 {
            assert_eq!(rig.advance(), start);
        }
    }

    #[test]
    fn skipped_advance_freezes_response() {
        let mut rig = CameraRig::initialize(&SceneParams::default());
        let start = rig.pose();
        rig.controls_mut().rotate(Vec2::new(200.0, 0.0), 600.0);
        assert_eq!(rig.pose(), start);
        assert_ne!(rig.advance(), start);
    }

    #[test]
    fn reset_restores_initial_pose() {
        let params = SceneParams::default();
        let mut rig = CameraRig::initialize(&params);
        rig.controls_mut().zoom(-5.0);
        rig.controls_mut().pan(Vec2::new(30.0, 10.0), 600.0);
        for _ in 0..20 {
            rig.advance();
        }
        rig.reset(&params);
        assert_eq!(rig.pose().position, params.camera_position);
        assert_eq!(rig.advance(), rig.pose());
    }
}
