//! # Atom Model
//!
//! Geometry and kinematics for the carbon atom: nucleon placement on the
//! nucleus shell, electron trajectories and their reference orbit curves.

pub mod constants;
pub mod electron;
pub mod error;
pub mod nucleus;
pub mod orbit;
pub mod sphere;

pub use constants::*;
pub use electron::*;
pub use error::*;
pub use nucleus::*;
pub use orbit::*;
pub use sphere::*;
