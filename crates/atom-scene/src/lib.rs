//! # Atom Scene
//!
//! Composes the carbon atom into a scene graph: nucleus nodes rebuilt per
//! isotope, electrons repositioned every frame, and a damped orbit camera.

pub mod camera_rig;
pub mod composer;
pub mod electron_rig;
pub mod error;
pub mod frame;
pub mod graph;
pub mod orbit_controls;
pub mod params;

pub use camera_rig::*;
pub use composer::*;
pub use electron_rig::*;
pub use error::*;
pub use frame::*;
pub use graph::*;
pub use orbit_controls::*;
pub use params::*;
