//! Direction helpers built on the dot product
//!
//! Pixel-space step cosines for the snap-back filter, and the
//! spherical-to-Cartesian launch decomposition for the shot sandbox.

use super::table::Vec3;

/// Cosine of the angle between two 2D steps
///
/// Uses dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns None when either step is shorter than `min_len`: a step that
/// short carries no usable direction.
pub fn step_cosine(v1: (f32, f32), v2: (f32, f32), min_len: f32) -> Option<f32> {
    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();

    if mag1 < min_len || mag2 < min_len || mag1 * mag2 < 1e-6 {
        return None;
    }

    let dot = v1.0 * v2.0 + v1.1 * v2.1;
    Some((dot / (mag1 * mag2)).clamp(-1.0, 1.0))
}

/// Launch velocity from speed and angles (degrees)
///
/// - `elevation_deg`: 0 = flat, 90 = straight up
/// - `direction_deg`: 0 = +x (towards the far side), 90 = +z
pub fn launch_velocity(speed: f32, elevation_deg: f32, direction_deg: f32) -> Vec3 {
    let el = elevation_deg.to_radians();
    let dir = direction_deg.to_radians();
    let horizontal = speed * el.cos();

    Vec3::new(horizontal * dir.cos(), speed * el.sin(), horizontal * dir.sin())
}
