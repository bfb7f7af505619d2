//! Camera projection and the uniform shared by all pipelines

use atom_scene::{CameraPose, SceneParams, DEFAULT_FOVY_DEGREES};
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz: camera position
    pub position: [f32; 4],
    /// xyz: point light position, w: ambient term
    pub light: [f32; 4],
}

/// Perspective projection for the viewport
pub struct Projection {
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
    width: u32,
    height: u32,
}

impl Projection {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: DEFAULT_FOVY_DEGREES.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn build_view_projection_matrix(&self, pose: &CameraPose) -> Mat4 {
        let proj = Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar);
        proj * pose.view_matrix()
    }

    pub fn to_uniform(&self, pose: &CameraPose, params: &SceneParams) -> CameraUniform {
        CameraUniform {
            view_proj: self.build_view_projection_matrix(pose).to_cols_array_2d(),
            position: pose.position.extend(1.0).to_array(),
            light: params.light_position.extend(params.ambient).to_array(),
        }
    }

    /// Screen position in physical pixels (origin top-left) of a world point,
    /// or `None` when it is behind the camera or outside the depth range.
    pub fn project_to_screen(&self, pose: &CameraPose, world: Vec3) -> Option<Vec2> {
        let clip = self.build_view_projection_matrix(pose) * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * self.width as f32,
            (0.5 - ndc.y * 0.5) * self.height as f32,
        ))
    }
}
