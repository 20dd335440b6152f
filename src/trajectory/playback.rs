//! Frame-indexed queries for the playback and rendering side
//!
//! Given the current video frame: where the ball is, which arcs to draw
//! (and how much of the one in flight), and where the ball is heading.

use super::types::{ProcessedArc, ProcessedTrajectory};
use crate::config::{HeatmapConfig, PredictionConfig};
use crate::heatmap::HeatmapField;
use crate::physics::{PredictionEngine, Vec3};

/// How much of an arc is visible at a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcProgress {
    /// The ball has left this arc
    Completed,
    /// Drawn up to `drawn` curve points
    InProgress { drawn: usize },
}

/// An arc to render as a trail
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibleArc<'a> {
    pub arc: &'a ProcessedArc,
    pub progress: ArcProgress,
}

impl VisibleArc<'_> {
    /// The curve points to draw for this frame
    pub fn drawn_points(&self) -> &[Vec3] {
        match self.progress {
            ArcProgress::Completed => &self.arc.curve_points,
            ArcProgress::InProgress { drawn } => {
                &self.arc.curve_points[..drawn.min(self.arc.curve_points.len())]
            }
        }
    }
}

impl ProcessedArc {
    pub fn contains_frame(&self, frame: u32) -> bool {
        frame >= self.start_frame && frame <= self.end_frame
    }

    /// Fractional curve-sample index for a frame inside the arc
    ///
    /// The frame is located between its two surrounding control points and
    /// mapped to the spline parameter, which is uniform per control span.
    pub fn sample_index_at(&self, frame: u32) -> Option<f32> {
        if !self.contains_frame(frame) || self.curve_points.is_empty() {
            return None;
        }

        let frames = &self.control_frames;
        let last_sample = (self.curve_points.len() - 1) as f32;
        if frames.len() < 2 {
            return Some(0.0);
        }

        let j = frames
            .partition_point(|&f| f <= frame)
            .saturating_sub(1)
            .min(frames.len() - 2);
        let span = frames[j + 1].saturating_sub(frames[j]);
        let span = if span > 0 { span } else { 1 };
        let u = (frame.saturating_sub(frames[j]) as f32 / span as f32).clamp(0.0, 1.0);

        let s = (j as f32 + u) / (frames.len() - 1) as f32;
        Some(s * last_sample)
    }

    /// Interpolated ball position at a frame inside the arc
    pub fn position_at(&self, frame: u32) -> Option<Vec3> {
        let idx = self.sample_index_at(frame)?;
        let lo = idx.floor() as usize;
        let hi = (lo + 1).min(self.curve_points.len() - 1);
        let w = idx - lo as f32;

        Some(self.curve_points[lo].lerp(&self.curve_points[hi], w))
    }
}

impl ProcessedTrajectory {
    /// Ball position at a frame
    ///
    /// Sampled from the arc in flight; between or outside arcs, the nearest
    /// known mapped point. None only when nothing was tracked.
    pub fn ball_position_at(&self, frame: u32) -> Option<Vec3> {
        if let Some(p) = self.arcs.iter().rev().find_map(|a| a.position_at(frame)) {
            return Some(p);
        }

        self.all_points
            .iter()
            .min_by_key(|p| p.frame.abs_diff(frame))
            .map(|p| p.position)
    }

    /// Arcs that have started by `frame`, oldest first
    pub fn visible_arcs(&self, frame: u32) -> Vec<VisibleArc<'_>> {
        self.arcs
            .iter()
            .filter(|a| a.start_frame <= frame)
            .map(|arc| {
                let progress = if frame >= arc.end_frame {
                    ArcProgress::Completed
                } else {
                    let idx = arc.sample_index_at(frame).unwrap_or(0.0);
                    ArcProgress::InProgress { drawn: idx.floor() as usize + 1 }
                };
                VisibleArc { arc, progress }
            })
            .collect()
    }

    /// Physics prediction from the points seen up to `frame`
    pub fn predicted_path(&self, frame: u32, fps: f32, config: &PredictionConfig) -> Vec<Vec3> {
        PredictionEngine::new(self.table, *config).predict(&self.all_points, frame, fps)
    }

    /// Impact density over every mapped point
    pub fn heatmap_field(&self, config: &HeatmapConfig) -> HeatmapField {
        HeatmapField::from_positions(self.all_points.iter().map(|p| p.position), &self.table, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{TimedPosition, TABLE};
    use crate::trajectory::bounds::TrajectoryBounds;
    use crate::trajectory::types::NetCrossing;
    use approx::assert_relative_eq;

    fn arc(start: u32, control_frames: Vec<u32>, samples: usize) -> ProcessedArc {
        let curve_points = (0..samples).map(|i| Vec3::new(i as f32, 1.0, 0.0)).collect();
        ProcessedArc {
            curve_points,
            is_toss: false,
            net_crossing: NetCrossing::None,
            start_frame: start,
            end_frame: *control_frames.last().unwrap_or(&start),
            control_frames,
            net_lift: 0.0,
        }
    }

    fn trajectory(arcs: Vec<ProcessedArc>, frames: &[u32]) -> ProcessedTrajectory {
        ProcessedTrajectory {
            arcs,
            all_points: frames
                .iter()
                .map(|&f| TimedPosition { frame: f, position: Vec3::new(f as f32 * 10.0, 0.0, 0.0) })
                .collect(),
            bounds: TrajectoryBounds::default(),
            events: Vec::new(),
            table: TABLE,
        }
    }

    #[test]
    fn test_sample_index_follows_control_frames() {
        // 3 control points, 2 spans, 11 samples
        let a = arc(10, vec![10, 12, 20], 11);
        assert_relative_eq!(a.sample_index_at(10).expect("inside"), 0.0);
        assert_relative_eq!(a.sample_index_at(12).expect("inside"), 5.0);
        assert_relative_eq!(a.sample_index_at(16).expect("inside"), 7.5);
        assert_relative_eq!(a.sample_index_at(20).expect("inside"), 10.0);
        assert!(a.sample_index_at(9).is_none());
        assert!(a.sample_index_at(21).is_none());
    }

    #[test]
    fn test_position_interpolates() {
        let a = arc(10, vec![10, 12, 20], 11);
        let p = a.position_at(16).expect("inside");
        assert_relative_eq!(p.x, 7.5, epsilon = 1e-6);
    }

    #[test]
    fn test_ball_position_falls_back_to_nearest_point() {
        let t = trajectory(vec![arc(10, vec![10, 20], 11)], &[0, 5, 10, 20, 40]);
        // inside the arc
        assert_relative_eq!(t.ball_position_at(15).expect("pos").x, 5.0, epsilon = 1e-6);
        // before the arc: nearest tracked point is frame 5
        assert_relative_eq!(t.ball_position_at(6).expect("pos").x, 50.0);
        // after: frame 40
        assert_relative_eq!(t.ball_position_at(35).expect("pos").x, 400.0);
    }

    #[test]
    fn test_ball_position_empty() {
        let t = ProcessedTrajectory::empty();
        assert!(t.ball_position_at(0).is_none());
        assert!(t.visible_arcs(100).is_empty());
        assert!(t.predicted_path(100, 30.0, &PredictionConfig::default()).is_empty());
    }

    #[test]
    fn test_heatmap_uses_trajectory_table() {
        let mut t = ProcessedTrajectory::empty();
        t.all_points = vec![TimedPosition { frame: 0, position: Vec3::new(1.2, TABLE.surface_y(), 0.0) }];
        // on the regulation table, off a shorter one
        assert!(!t.heatmap_field(&HeatmapConfig::default()).is_empty());

        t.table.width = 2.0;
        assert!(t.heatmap_field(&HeatmapConfig::default()).is_empty());
    }

    #[test]
    fn test_visible_arcs_progress() {
        let t = trajectory(vec![arc(0, vec![0, 10], 11), arc(10, vec![10, 20], 11), arc(20, vec![20, 30], 11)], &[]);

        let visible = t.visible_arcs(15);
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].progress, ArcProgress::Completed);
        assert_eq!(visible[1].progress, ArcProgress::InProgress { drawn: 6 });
        assert_eq!(visible[1].drawn_points().len(), 6);
        assert_eq!(visible[0].drawn_points().len(), 11);

        let all = t.visible_arcs(30);
        assert!(all.iter().all(|v| v.progress == ArcProgress::Completed));
    }

    #[test]
    fn test_arc_start_frame_draws_one_point() {
        let t = trajectory(vec![arc(5, vec![5, 15], 11)], &[]);
        let visible = t.visible_arcs(5);
        assert_eq!(visible[0].progress, ArcProgress::InProgress { drawn: 1 });
    }
}
