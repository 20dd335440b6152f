//! Percentile calibration anchors for the pixel → scene mapping
//!
//! Computed once over the whole filtered set and reused for every point of
//! the same reconstruction, so the per-bucket baseline stays consistent
//! along an arc.

use super::types::FilteredPoint;

/// Number of horizontal buckets in the baseline table
pub const BASELINE_BUCKETS: usize = 16;

/// Buckets with fewer samples than this inherit from the left
const MIN_BUCKET_SAMPLES: usize = 2;

/// Percentile anchors and pixel-space baseline table
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryBounds {
    pub p25_x: f32,
    pub p75_x: f32,
    pub p25_y: f32,
    pub p75_y: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    /// 90th-percentile image y per x bucket: the table-surface proxy
    pub baselines: [f32; BASELINE_BUCKETS],
}

impl Default for TrajectoryBounds {
    fn default() -> Self {
        Self {
            p25_x: 0.0,
            p75_x: 0.0,
            p25_y: 0.0,
            p75_y: 0.0,
            min_x: 0.0,
            max_x: 0.0,
            min_y: 0.0,
            max_y: 0.0,
            baselines: [0.0; BASELINE_BUCKETS],
        }
    }
}

/// Index-based percentile of a sorted slice (no interpolation)
fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = ((sorted.len() as f32 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

fn sorted(values: impl Iterator<Item = f32>) -> Vec<f32> {
    let mut v: Vec<f32> = values.collect();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

impl TrajectoryBounds {
    /// Compute anchors over the full filtered set
    pub fn estimate(points: &[FilteredPoint]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let xs = sorted(points.iter().map(|p| p.x));
        let ys = sorted(points.iter().map(|p| p.y));

        let min_x = xs[0];
        let max_x = xs[xs.len() - 1];
        let min_y = ys[0];
        let max_y = ys[ys.len() - 1];

        let mut bounds = Self {
            p25_x: percentile(&xs, 0.25),
            p75_x: percentile(&xs, 0.75),
            p25_y: percentile(&ys, 0.25),
            p75_y: percentile(&ys, 0.75),
            min_x,
            max_x,
            min_y,
            max_y,
            baselines: [max_y; BASELINE_BUCKETS],
        };

        let mut buckets: Vec<Vec<f32>> = vec![Vec::new(); BASELINE_BUCKETS];
        for p in points {
            buckets[bounds.bucket_of(p.x)].push(p.y);
        }

        let mut carry = max_y;
        for (slot, mut samples) in bounds.baselines.iter_mut().zip(buckets) {
            if samples.len() >= MIN_BUCKET_SAMPLES {
                samples.sort_by(|a, b| a.total_cmp(b));
                carry = percentile(&samples, 0.9);
            }
            *slot = carry;
        }

        bounds
    }

    fn x_range(&self) -> f32 {
        let r = self.max_x - self.min_x;
        if r > 0.0 { r } else { 1.0 }
    }

    /// Full image-y extent (1 when degenerate)
    pub fn y_range(&self) -> f32 {
        let r = self.max_y - self.min_y;
        if r > 0.0 { r } else { 1.0 }
    }

    /// Bucket index for an image x
    pub fn bucket_of(&self, px: f32) -> usize {
        let t = (px - self.min_x) / self.x_range();
        let idx = (t * BASELINE_BUCKETS as f32).floor();
        if idx.is_nan() || idx < 0.0 {
            0
        } else {
            (idx as usize).min(BASELINE_BUCKETS - 1)
        }
    }

    /// Local table-surface proxy (image y) at image x
    pub fn baseline_at(&self, px: f32) -> f32 {
        self.baselines[self.bucket_of(px)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pt(x: f32, y: f32) -> FilteredPoint {
        FilteredPoint { frame: 0, x, y, confidence: 1.0, is_toss: false }
    }

    #[test]
    fn test_empty_is_neutral() {
        let b = TrajectoryBounds::estimate(&[]);
        assert_eq!(b, TrajectoryBounds::default());
        assert_relative_eq!(b.y_range(), 1.0);
    }

    #[test]
    fn test_percentiles_are_index_based() {
        let points: Vec<_> = (0..8).map(|i| pt(i as f32 * 10.0, 100.0 + i as f32)).collect();
        let b = TrajectoryBounds::estimate(&points);
        // floor(8 * 0.25) = 2, floor(8 * 0.75) = 6
        assert_relative_eq!(b.p25_x, 20.0);
        assert_relative_eq!(b.p75_x, 60.0);
        assert_relative_eq!(b.p25_y, 102.0);
        assert_relative_eq!(b.p75_y, 106.0);
        assert_relative_eq!(b.min_x, 0.0);
        assert_relative_eq!(b.max_y, 107.0);
    }

    #[test]
    fn test_bucket_baseline_is_p90() {
        // all points in the first bucket except one far right
        let mut points: Vec<_> = (0..10).map(|i| pt(0.0, 100.0 + i as f32 * 10.0)).collect();
        points.push(pt(1600.0, 50.0));
        let b = TrajectoryBounds::estimate(&points);
        // ten samples: floor(10 * 0.9) = 9 -> 190
        assert_relative_eq!(b.baselines[0], 190.0);
    }

    #[test]
    fn test_sparse_buckets_carry_forward() {
        let mut points = vec![pt(0.0, 300.0), pt(1.0, 310.0), pt(2.0, 320.0)];
        // lone sample in the last bucket
        points.push(pt(160.0, 10.0));
        let b = TrajectoryBounds::estimate(&points);

        let first = b.baselines[0];
        assert!(b.baselines.iter().all(|&v| (v - first).abs() < 1e-6));
    }

    #[test]
    fn test_leading_sparse_buckets_use_max_y() {
        let mut points = vec![pt(0.0, 123.0)];
        points.extend((0..5).map(|i| pt(160.0, 200.0 + i as f32)));
        let b = TrajectoryBounds::estimate(&points);
        assert_relative_eq!(b.baselines[0], 204.0);
        assert_relative_eq!(b.baselines[BASELINE_BUCKETS - 1], 204.0);
    }

    #[test]
    fn test_bucket_of_clamps() {
        let points = vec![pt(0.0, 0.0), pt(160.0, 0.0)];
        let b = TrajectoryBounds::estimate(&points);
        assert_eq!(b.bucket_of(-50.0), 0);
        assert_eq!(b.bucket_of(160.0), BASELINE_BUCKETS - 1);
        assert_eq!(b.bucket_of(1e6), BASELINE_BUCKETS - 1);
        assert_eq!(b.bucket_of(f32::NAN), 0);
    }
}
