//! Detector noise removal in pixel space
//!
//! Three passes, all deterministic:
//! 1. Isolated spikes: a point far from both of its close-in-time neighbours.
//! 2. Snap-backs: a sharp reversal against the trend that immediately
//!    reverses again.
//! 3. Serve-toss tagging: tight horizontal band with large vertical travel.
//!    Tagged, never removed.

use super::types::{FilteredPoint, RawDetection};
use crate::config::NoiseFilterConfig;
use crate::physics::step_cosine;

/// Fewer raw points than this pass through untouched
pub const MIN_FILTER_POINTS: usize = 3;

fn pixel_distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// Run all three passes
pub fn filter_noise(raw: &[RawDetection], config: &NoiseFilterConfig) -> Vec<FilteredPoint> {
    if raw.len() < MIN_FILTER_POINTS {
        return raw.iter().map(FilteredPoint::from_raw).collect();
    }

    let despiked = remove_spikes(raw, config);
    let mut points = remove_snap_backs(&despiked, config);
    tag_tosses(&mut points, config);
    points
}

/// Pass 1: drop interior points that jump away from both neighbours
pub fn remove_spikes(raw: &[RawDetection], config: &NoiseFilterConfig) -> Vec<FilteredPoint> {
    let n = raw.len();
    let mut kept = Vec::with_capacity(n);

    for (i, p) in raw.iter().enumerate() {
        if i == 0 || i + 1 == n {
            kept.push(FilteredPoint::from_raw(p));
            continue;
        }

        let prev = &raw[i - 1];
        let next = &raw[i + 1];
        let close_in_time = p.frame.abs_diff(prev.frame) <= config.max_spike_gap_frames
            && next.frame.abs_diff(p.frame) <= config.max_spike_gap_frames;

        if close_in_time {
            let d_prev = pixel_distance(prev.x, prev.y, p.x, p.y);
            let d_next = pixel_distance(p.x, p.y, next.x, next.y);
            if d_prev > config.jump_threshold_px && d_next > config.jump_threshold_px {
                continue;
            }
        }

        kept.push(FilteredPoint::from_raw(p));
    }

    kept
}

/// Pass 2: drop points that reverse the trend and then snap straight back
///
/// Judged against the pass-1 survivors; a dropped point does not change
/// the neighbours seen by the next judgment.
pub fn remove_snap_backs(points: &[FilteredPoint], config: &NoiseFilterConfig) -> Vec<FilteredPoint> {
    let n = points.len();
    let mut kept = Vec::with_capacity(n);

    for (i, p) in points.iter().enumerate() {
        if i < 2 || i + 1 >= n {
            kept.push(*p);
            continue;
        }

        let a = &points[i - 2];
        let b = &points[i - 1];
        let c = &points[i + 1];

        let trend = (b.x - a.x, b.y - a.y);
        let step = (p.x - b.x, p.y - b.y);
        let back = (c.x - p.x, c.y - p.y);

        let reversed = step_cosine(trend, step, config.min_step_px)
            .is_some_and(|cos| cos < config.snap_back_cos);
        let returned = reversed
            && step_cosine(step, back, config.min_step_px)
                .is_some_and(|cos| cos < config.snap_return_cos);

        if !returned {
            kept.push(*p);
        }
    }

    kept
}

/// Pass 3: mark near-vertical, tightly banded motion as serve toss
pub fn tag_tosses(points: &mut [FilteredPoint], config: &NoiseFilterConfig) {
    let w = config.toss_window;
    let n = points.len();
    if w == 0 || n < 2 * w + 1 {
        return;
    }

    let mut flags = vec![false; n];
    for (i, flag) in flags.iter_mut().enumerate().take(n - w).skip(w) {
        let window = &points[i - w..=i + w];

        let (min_x, max_x) = window
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), q| (lo.min(q.x), hi.max(q.x)));
        let (min_y, max_y) = window
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), q| (lo.min(q.y), hi.max(q.y)));

        *flag = max_x - min_x < config.toss_max_dx_px && max_y - min_y > config.toss_min_dy_px;
    }

    for (p, flag) in points.iter_mut().zip(flags) {
        p.is_toss = flag;
    }
}
