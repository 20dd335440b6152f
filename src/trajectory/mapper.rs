//! Heuristic monocular pixel → scene mapping
//!
//! There is no camera calibration here. Lateral position comes from the
//! central percentile band of image x, height from how far the ball sits
//! above the local pixel baseline, and depth from image y alone. The result
//! is a known-imprecise proxy, not ground truth. Rendered arcs depend on the
//! squared height curve and the tanh depth compression.

use super::bounds::TrajectoryBounds;
use crate::physics::{Table, Vec3};

/// Spread of the 25th–75th band scaled up to approximate the 10th–90th
const PERCENTILE_SPREAD_GAIN: f32 = 1.6;

/// The central lateral band spans this many table widths
const LATERAL_TABLE_SPAN: f32 = 1.3;

/// Highest mapped ball height above the surface (m)
pub const HEIGHT_CEILING: f32 = 0.35;

/// Fraction of the half-depth before tanh compression starts
const DEPTH_SOFT_CLAMP: f32 = 0.6;

/// Maps pixel positions into the table frame for one reconstruction
pub struct CoordinateMapper<'a> {
    bounds: &'a TrajectoryBounds,
    table: Table,
}

impl<'a> CoordinateMapper<'a> {
    pub fn new(bounds: &'a TrajectoryBounds, table: Table) -> Self {
        Self { bounds, table }
    }

    /// Map one image point
    pub fn map(&self, px: f32, py: f32) -> Vec3 {
        Vec3::new(self.lateral(px), self.height(px, py), self.depth(py))
    }

    /// x: centred on the percentile midpoint, central band ≈ 1.3 table widths
    fn lateral(&self, px: f32) -> f32 {
        let b = self.bounds;
        let mid = (b.p25_x + b.p75_x) * 0.5;
        let spread = (b.p75_x - b.p25_x) * PERCENTILE_SPREAD_GAIN;
        let spread = if spread > 0.0 { spread } else { 1.0 };

        (px - mid) / spread * self.table.width * LATERAL_TABLE_SPAN
    }

    /// y: squared rise above the local baseline, capped at the ceiling
    fn height(&self, px: f32, py: f32) -> f32 {
        let half_range = self.bounds.y_range() * 0.5;
        let above = (self.bounds.baseline_at(px) - py).max(0.0);
        let n = (above / half_range).min(1.0);

        self.table.surface_y() + n * n * HEIGHT_CEILING
    }

    /// z: image y across the full range, tanh-compressed near the edges
    fn depth(&self, py: f32) -> f32 {
        let t = (py - self.bounds.min_y) / self.bounds.y_range();
        let z = (t - 0.5) * self.table.depth;

        let half = self.table.half_depth();
        let soft = half * DEPTH_SOFT_CLAMP;
        if z.abs() <= soft {
            return z;
        }

        let room = half - soft;
        let excess = (z.abs() - soft) / room;
        z.signum() * (soft + room * excess.tanh())
    }
}

/// Map a single point against precomputed bounds
pub fn map_point(px: f32, py: f32, bounds: &TrajectoryBounds, table: &Table) -> Vec3 {
    CoordinateMapper::new(bounds, *table).map(px, py)
}
