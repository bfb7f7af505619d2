//! Even placement of points on a sphere surface
//!
//! Points follow an equal-area spiral: the polar angle steps through equal
//! bands of `cos θ` and the azimuth winds `√(Nπ)` times faster than the polar
//! angle, which keeps neighbouring points roughly equidistant for any count.

use crate::error::ModelError;
use glam::Vec3;
use std::f32::consts::PI;

/// Position of point `index` out of `total` on a sphere of `radius` centred at
/// the origin.
///
/// The result depends only on the arguments, so the same nucleon always lands
/// on the same spot across rebuilds.
pub fn sphere_point(index: usize, total: usize, radius: f32) -> Result<Vec3, ModelError> {
    if total == 0 || index >= total {
        return Err(ModelError::InvalidArgument { index, total });
    }

    let n = total as f32;
    let theta = (1.0 - 2.0 * (index as f32 + 0.5) / n).acos();
    let phi = theta * (n * PI).sqrt();

    Ok(Vec3::new(
        radius * theta.sin() * phi.cos(),
        radius * theta.sin() * phi.sin(),
        radius * theta.cos(),
    ))
}

/// All `total` points of the spiral, in index order.
pub fn sphere_points(total: usize, radius: f32) -> Result<Vec<Vec3>, ModelError> {
    (0..total.max(1))
        .map(|i| sphere_point(i, total, radius))
        .collect()
}
