//! Forward prediction of the ball from its recent mapped positions
//!
//! Estimates launch velocity from the last few samples, then hands it to the
//! shared integrator with net collision enabled.

use super::flight::BallFlight;
use super::table::{Table, Vec3};
use super::velocity::{weighted_velocity, TimedPosition};
use crate::config::PredictionConfig;

/// Predicts where the ball goes after the current frame
pub struct PredictionEngine {
    table: Table,
    config: PredictionConfig,
}

impl PredictionEngine {
    pub fn new(table: Table, config: PredictionConfig) -> Self {
        Self { table, config }
    }

    /// Launch velocity in m/s from the recent history (per-frame × fps)
    ///
    /// A near-flat or mildly falling vertical component is lifted so the
    /// predicted arc does not skim the table unnaturally.
    pub fn launch_velocity(&self, recent: &[TimedPosition], fps: f32) -> Vec3 {
        let mut v = weighted_velocity(recent, self.config.max_pair_gap_frames) * fps;

        if v.y > self.config.flat_vy_min && v.y < self.config.flat_vy_max {
            v.y = v.y.max(self.config.flat_vy_floor);
        }

        v
    }

    /// Predicted path after `current_frame`
    ///
    /// `stream` is the full mapped stream in frame order; only samples at or
    /// before `current_frame` are used. Empty when fewer than the minimum
    /// history is available.
    pub fn predict(&self, stream: &[TimedPosition], current_frame: u32, fps: f32) -> Vec<Vec3> {
        let fps = if fps > 0.0 { fps } else { 1.0 };
        let known = stream.partition_point(|p| p.frame <= current_frame);
        let start = known.saturating_sub(self.config.history);
        let recent = &stream[start..known];

        if recent.len() < self.config.min_history {
            return Vec::new();
        }
        let Some(last) = recent.last() else {
            return Vec::new();
        };

        let origin = last.position;
        let velocity = self.launch_velocity(recent, fps);

        BallFlight::new(self.table, origin, velocity, fps).trace(self.config.steps)
    }
}

impl Default for PredictionEngine {
    fn default() -> Self {
        Self::new(super::table::TABLE, PredictionConfig::default())
    }
}
