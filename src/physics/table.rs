//! Table geometry and physical constants
//!
//! Scene frame: x runs along the table length with the net plane at x = 0,
//! y is up with the floor at 0, z runs across the table. The table is
//! centred on the origin.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// 3D scene position / velocity (metres, metres per second)
pub type Vec3 = Vector3<f32>;

/// Static physical description of the table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Length along x (m)
    pub width: f32,
    /// Extent along z (m)
    pub depth: f32,
    /// Playing surface height above the floor (m)
    pub height: f32,
    /// Net height above the surface (m)
    pub net_height: f32,
    /// Fraction of vertical speed kept after a bounce
    pub restitution: f32,
    /// m/s²
    pub gravity: f32,
}

/// Regulation table
pub const TABLE: Table = Table {
    width: 2.74,
    depth: 1.525,
    height: 0.76,
    net_height: 0.1525,
    restitution: 0.85,
    gravity: 9.81,
};

impl Table {
    /// Y of the playing surface
    pub fn surface_y(&self) -> f32 {
        self.height
    }

    /// Y of the net tape
    pub fn net_top(&self) -> f32 {
        self.height + self.net_height
    }

    pub fn half_width(&self) -> f32 {
        self.width * 0.5
    }

    pub fn half_depth(&self) -> f32 {
        self.depth * 0.5
    }

    /// Is (x, z) over the playing surface?
    pub fn covers(&self, x: f32, z: f32) -> bool {
        x.abs() <= self.half_width() && z.abs() <= self.half_depth()
    }

    /// Is (x, z) still inside the simulated scene (3x the table footprint)?
    pub fn in_scene(&self, x: f32, z: f32) -> bool {
        x.abs() <= 3.0 * self.half_width() && z.abs() <= 3.0 * self.half_depth()
    }
}

impl Default for Table {
    fn default() -> Self {
        TABLE
    }
}

/// Does the segment a → b cross the net plane (x = 0)?
pub fn crosses_net(a: f32, b: f32) -> bool {
    (a < 0.0 && b >= 0.0) || (a > 0.0 && b <= 0.0)
}

/// Point where the segment a → b meets x = 0. Caller checks `crosses_net`.
pub fn net_intersection(a: &Vec3, b: &Vec3) -> Vec3 {
    let denom = a.x - b.x;
    let u = if denom.abs() > f32::EPSILON { a.x / denom } else { 0.0 };
    a + (b - a) * u
}
