//! Cuts the filtered stream into flight phases at event boundaries
//!
//! Segments partition the stream: every point lands in exactly one segment.
//! An event point opens the segment that follows it.

use super::events::TrajectoryEvent;
use super::types::FilteredPoint;

/// A contiguous run of filtered points `[start, end)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArcSegment {
    pub start: usize,
    /// Exclusive
    pub end: usize,
    /// Strict majority of points are toss-tagged
    pub is_toss: bool,
}

impl ArcSegment {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// The points covered by this segment
    pub fn points<'a>(&self, all: &'a [FilteredPoint]) -> &'a [FilteredPoint] {
        &all[self.start..self.end]
    }
}

/// Split `points` at the event indices
pub fn segment_arcs(points: &[FilteredPoint], events: &[TrajectoryEvent]) -> Vec<ArcSegment> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let mut cuts: Vec<usize> = events.iter().map(|e| e.index).filter(|&i| i < n).collect();
    cuts.push(0);
    cuts.push(n);
    cuts.sort_unstable();
    cuts.dedup();

    cuts.windows(2)
        .map(|w| {
            let (start, end) = (w[0], w[1]);
            let toss_count = points[start..end].iter().filter(|p| p.is_toss).count();
            ArcSegment {
                start,
                end,
                is_toss: toss_count * 2 > end - start,
            }
        })
        .collect()
}
