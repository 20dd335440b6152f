//! Bounce / hit / toss-peak detection on filtered pixel tracks
//!
//! Image y grows downward, so a bounce (ball closest to the table) is a
//! local maximum of y and the top of a serve toss is a local minimum.

use super::types::FilteredPoint;
use crate::config::EventConfig;

/// Detected event types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Bounce,
    Hit,
    TossPeak,
}

impl EventKind {
    /// Stable numeric code for the JS bridge
    pub fn code(&self) -> u8 {
        match self {
            EventKind::Bounce => 0,
            EventKind::Hit => 1,
            EventKind::TossPeak => 2,
        }
    }
}

/// An event at a position in the filtered sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrajectoryEvent {
    pub frame: u32,
    /// Index into the filtered point sequence
    pub index: usize,
    pub kind: EventKind,
}

/// Classify a single interior point. First match wins: bounce, hit, toss peak.
fn classify(prev: &FilteredPoint, p: &FilteredPoint, next: &FilteredPoint, config: &EventConfig) -> Option<EventKind> {
    let drop_before = p.y - prev.y;
    let drop_after = p.y - next.y;
    if drop_before > config.bounce_prominence_px && drop_after > config.bounce_prominence_px {
        return Some(EventKind::Bounce);
    }

    let dx_in = p.x - prev.x;
    let dx_out = next.x - p.x;
    if dx_in * dx_out < 0.0
        && dx_in.abs() > config.hit_reversal_px
        && dx_out.abs() > config.hit_reversal_px
    {
        return Some(EventKind::Hit);
    }

    if p.is_toss && p.y < prev.y && p.y < next.y {
        return Some(EventKind::TossPeak);
    }

    None
}

/// Find all events, ordered by index. At most one per point.
pub fn detect_events(points: &[FilteredPoint], config: &EventConfig) -> Vec<TrajectoryEvent> {
    if points.len() < config.min_points.max(3) {
        return Vec::new();
    }

    points
        .windows(3)
        .enumerate()
        .filter_map(|(k, w)| {
            let (prev, p, next) = (&w[0], &w[1], &w[2]);
            let contiguous = p.frame.abs_diff(prev.frame) <= config.max_gap_frames
                && next.frame.abs_diff(p.frame) <= config.max_gap_frames;
            if !contiguous {
                return None;
            }

            classify(prev, p, next, config).map(|kind| TrajectoryEvent {
                frame: p.frame,
                index: k + 1,
                kind,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(frame: u32, x: f32, y: f32) -> FilteredPoint {
        FilteredPoint { frame, x, y, confidence: 1.0, is_toss: false }
    }

    #[test]
    fn test_too_few_points() {
        let points: Vec<_> = (0..4).map(|i| pt(i, i as f32 * 20.0, if i == 2 { 100.0 } else { 0.0 })).collect();
        assert!(detect_events(&points, &EventConfig::default()).is_empty());
    }

    #[test]
    fn test_bounce() {
        // descend, touch, rise
        let ys = [200.0, 240.0, 280.0, 300.0, 270.0, 240.0, 210.0];
        let points: Vec<_> = ys.iter().enumerate().map(|(i, &y)| pt(i as u32, i as f32 * 10.0, y)).collect();
        let events = detect_events(&points, &EventConfig::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Bounce);
        assert_eq!(events[0].index, 3);
        assert_eq!(events[0].frame, 3);
    }

    #[test]
    fn test_shallow_bounce_ignored() {
        let ys = [200.0, 201.0, 202.0, 204.0, 202.0, 201.0, 200.0];
        let points: Vec<_> = ys.iter().enumerate().map(|(i, &y)| pt(i as u32, i as f32 * 10.0, y)).collect();
        assert!(detect_events(&points, &EventConfig::default()).is_empty());
    }

    #[test]
    fn test_hit() {
        let xs = [100.0, 130.0, 160.0, 190.0, 160.0, 130.0, 100.0];
        let points: Vec<_> = xs.iter().enumerate().map(|(i, &x)| pt(i as u32, x, 200.0 - i as f32 * 5.0)).collect();
        let events = detect_events(&points, &EventConfig::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Hit);
        assert_eq!(events[0].index, 3);
    }

    #[test]
    fn test_bounce_wins_over_hit() {
        let points = vec![
            pt(0, 0.0, 100.0),
            pt(1, 20.0, 120.0),
            pt(2, 40.0, 140.0),
            pt(3, 20.0, 120.0),
            pt(4, 0.0, 100.0),
        ];
        let events = detect_events(&points, &EventConfig::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Bounce);
    }

    #[test]
    fn test_toss_peak() {
        let ys = [400.0, 340.0, 300.0, 290.0, 300.0, 340.0, 400.0];
        let points: Vec<_> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| FilteredPoint { is_toss: true, ..pt(i as u32, 500.0, y) })
            .collect();
        let events = detect_events(&points, &EventConfig::default());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::TossPeak);
        assert_eq!(events[0].index, 3);
    }

    #[test]
    fn test_gap_suppresses_event() {
        let ys = [200.0, 240.0, 280.0, 300.0, 270.0, 240.0, 210.0];
        let points: Vec<_> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| pt(if i > 3 { i as u32 + 20 } else { i as u32 }, i as f32 * 10.0, y))
            .collect();
        assert!(detect_events(&points, &EventConfig::default()).is_empty());
    }
}
