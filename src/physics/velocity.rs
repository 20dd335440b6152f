//! Weighted velocity estimate from recent mapped positions
//!
//! Averages per-frame displacement over the recent history, weighting
//! newer pairs more heavily. Pairs spanning a long frame gap are treated
//! as discontinuous and skipped.

use super::table::Vec3;

/// One mapped sample: frame index and scene position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimedPosition {
    pub frame: u32,
    pub position: Vec3,
}

/// Weighted average velocity in metres per frame
///
/// Pair `k` (1-based from the oldest) gets weight `k`. Pairs with a zero
/// gap or a gap of `max_gap` frames or more are skipped. Returns zero when
/// no pair qualifies.
pub fn weighted_velocity(history: &[TimedPosition], max_gap: u32) -> Vec3 {
    let mut sum = Vec3::zeros();
    let mut total_weight = 0.0f32;

    for (k, pair) in history.windows(2).enumerate() {
        let gap = pair[1].frame.saturating_sub(pair[0].frame);
        if gap == 0 || gap >= max_gap {
            continue;
        }

        let weight = (k + 1) as f32;
        let per_frame = (pair[1].position - pair[0].position) / gap as f32;
        sum += per_frame * weight;
        total_weight += weight;
    }

    let denom = if total_weight > 0.0 { total_weight } else { 1.0 };
    sum / denom
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(frame: u32, x: f32) -> TimedPosition {
        TimedPosition { frame, position: Vec3::new(x, 1.0, 0.0) }
    }

    #[test]
    fn test_constant_motion() {
        let history: Vec<_> = (0..6).map(|i| sample(i, i as f32 * 0.1)).collect();
        let v = weighted_velocity(&history, 10);
        assert_relative_eq!(v.x, 0.1, epsilon = 1e-6);
        assert!(v.y.abs() < 1e-6);
    }

    #[test]
    fn test_gap_is_normalised_per_frame() {
        let history = vec![sample(0, 0.0), sample(2, 0.2), sample(4, 0.4)];
        let v = weighted_velocity(&history, 10);
        assert_relative_eq!(v.x, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_discontinuous_pair_skipped() {
        let history = vec![sample(0, 5.0), sample(20, 0.0), sample(21, 0.1), sample(22, 0.2)];
        let v = weighted_velocity(&history, 10);
        assert_relative_eq!(v.x, 0.1, epsilon = 1e-6);
    }

    #[test]
    fn test_recent_pairs_dominate() {
        // old pair moves 0.0, newest moves 0.3 per frame
        let history = vec![sample(0, 0.0), sample(1, 0.0), sample(2, 0.3)];
        let v = weighted_velocity(&history, 10);
        // (1*0.0 + 2*0.3) / 3
        assert_relative_eq!(v.x, 0.2, epsilon = 1e-6);
    }

    #[test]
    fn test_no_pairs_is_zero() {
        assert_eq!(weighted_velocity(&[], 10), Vec3::zeros());
        assert_eq!(weighted_velocity(&[sample(0, 1.0)], 10), Vec3::zeros());
    }
}
