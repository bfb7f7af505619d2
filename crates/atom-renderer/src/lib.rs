//! # Atom Renderer
//!
//! wgpu backend that draws the atom scene graph.

pub mod camera;
pub mod renderer;

pub use camera::*;
pub use renderer::*;
