//! Fixed dimensions and colors of the carbon atom model
//!
//! Distances are in scene units, angular speeds in radians per second.

/// Atomic number of carbon
pub const PROTON_COUNT: u32 = 6;

/// Radius of the shell the nucleons are spread over
pub const NUCLEUS_RADIUS: f32 = 1.25;

/// Render radius of a single proton or neutron
pub const NUCLEON_SIZE: f32 = 0.55;

/// Render radius of an electron
pub const ELECTRON_SIZE: f32 = 0.4;

/// Number of segments in a reference orbit curve (segments + 1 samples)
pub const ORBIT_SEGMENTS: usize = 100;

/// Proton color (gold, #FFD700)
pub const PROTON_COLOR: [f32; 3] = [1.0, 0.843, 0.0];

/// Neutron color (silver, #C0C0C0)
pub const NEUTRON_COLOR: [f32; 3] = [0.753, 0.753, 0.753];

pub const ELECTRON_BLUE: [f32; 3] = [0.0, 0.0, 1.0];
pub const ELECTRON_RED: [f32; 3] = [1.0, 0.0, 0.0];
pub const ELECTRON_GREEN: [f32; 3] = [0.0, 1.0, 0.0];

/// Orbit curve color
pub const ORBIT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
