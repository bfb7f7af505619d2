//! Scene parameters for runtime tuning

use atom_model::{ELECTRON_SIZE, NUCLEON_SIZE, NUCLEUS_RADIUS};
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    // Nucleus
    pub nucleus_radius: f32,
    pub nucleon_size: f32,
    pub nucleus_label_offset: Vec3,

    // Electrons
    pub electron_size: f32,
    /// Multiplier applied to wall-clock time before it reaches the electrons
    pub time_scale: f32,
    pub show_orbits: bool,
    pub show_labels: bool,

    // Camera
    pub camera_position: Vec3,
    pub camera_target: Vec3,
    pub max_distance: f32,
    pub min_distance: f32,
    /// Fraction of pending input applied per `advance()` call
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,

    // Lighting
    pub light_position: Vec3,
    pub ambient: f32,

    // Backdrop
    pub star_count: usize,
    pub star_radius: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            nucleus_radius: NUCLEUS_RADIUS,
            nucleon_size: NUCLEON_SIZE,
            nucleus_label_offset: Vec3::new(0.0, 3.0, 1.0),

            electron_size: ELECTRON_SIZE,
            time_scale: 1.0,
            show_orbits: true,
            show_labels: true,

            camera_position: Vec3::new(18.5, 1.5, -0.01),
            camera_target: Vec3::ZERO,
            max_distance: 50.0,
            min_distance: 0.0,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,

            light_position: Vec3::new(10.0, 10.0, 10.0),
            ambient: 0.35,

            star_count: 1500,
            star_radius: 150.0,
        }
    }
}
