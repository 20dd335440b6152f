//! Tuning thresholds for the reconstruction pipeline
//!
//! Every pixel threshold here is absolute and was tuned against a single
//! 720p camera setup. They do not scale with video resolution unless the
//! caller opts in through [`ReconstructionConfig::scaled_for`].

use serde::{Deserialize, Serialize};

use crate::trajectory::VideoInfo;

/// Video height (lines) the pixel defaults were tuned on
pub const REFERENCE_VIDEO_HEIGHT: f32 = 720.0;

// ============================================================================
// NOISE FILTER
// ============================================================================

/// Isolated-spike removal and serve-toss tagging
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseFilterConfig {
    /// Both legs must exceed this (px) for a point to count as a spike
    pub jump_threshold_px: f32,
    /// Spike check only runs when both frame gaps are at most this
    pub max_spike_gap_frames: u32,
    /// Reversal against the trend below this cosine (~120°)
    pub snap_back_cos: f32,
    /// Return leg reversal below this cosine
    pub snap_return_cos: f32,
    /// Steps shorter than this (px) are too slow to judge
    pub min_step_px: f32,
    /// Half-width of the toss window (points each side)
    pub toss_window: usize,
    /// Window must stay inside this horizontal band (px)
    pub toss_max_dx_px: f32,
    /// Window must cover more than this vertically (px)
    pub toss_min_dy_px: f32,
}

impl Default for NoiseFilterConfig {
    fn default() -> Self {
        Self {
            jump_threshold_px: 80.0,
            max_spike_gap_frames: 3,
            snap_back_cos: -0.5,
            snap_return_cos: -0.3,
            min_step_px: 3.0,
            toss_window: 3,
            toss_max_dx_px: 40.0,
            toss_min_dy_px: 60.0,
        }
    }
}

// ============================================================================
// EVENT DETECTION
// ============================================================================

/// Bounce / hit / toss-peak classification thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Fewer filtered points than this yields no events
    pub min_points: usize,
    /// Max frame gap to either neighbour for a point to be judged
    pub max_gap_frames: u32,
    /// Both-side drop (px) around a bounce
    pub bounce_prominence_px: f32,
    /// Minimum horizontal travel (px) of each leg around a hit
    pub hit_reversal_px: f32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            min_points: 5,
            max_gap_frames: 5,
            bounce_prominence_px: 3.0,
            hit_reversal_px: 15.0,
        }
    }
}

// ============================================================================
// CURVE FITTING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Catmull-Rom tension
    pub tension: f32,
    /// Lower bound on sampled steps per arc
    pub min_steps: usize,
    /// Sampled steps per control point
    pub steps_per_point: usize,
    /// Required clearance above the net top (m)
    pub net_margin_m: f32,
    /// Extra lift added on top of the shortfall (m)
    pub lift_headroom_m: f32,
    /// Bump half-width relative to the longer side of the crossing
    pub lift_width_factor: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            tension: 0.3,
            min_steps: 10,
            steps_per_point: 3,
            net_margin_m: 0.04,
            lift_headroom_m: 0.06,
            lift_width_factor: 1.2,
        }
    }
}

// ============================================================================
// PREDICTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// Integration step budget
    pub steps: usize,
    /// How many recent mapped points feed the velocity estimate
    pub history: usize,
    /// Fewer recent points than this yields no prediction
    pub min_history: usize,
    /// Pairs with a frame gap at or above this are discontinuous
    pub max_pair_gap_frames: u32,
    /// Vertical velocities inside (min, max) m/s get lifted
    pub flat_vy_min: f32,
    pub flat_vy_max: f32,
    /// Vertical velocity (m/s) a flat launch is lifted to
    pub flat_vy_floor: f32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            steps: 60,
            history: 15,
            min_history: 4,
            max_pair_gap_frames: 10,
            flat_vy_min: -2.0,
            flat_vy_max: 0.3,
            flat_vy_floor: 0.8,
        }
    }
}

// ============================================================================
// HEATMAP
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub texture_width: usize,
    pub texture_height: usize,
    /// Splat radius in bins (2 = 5x5)
    pub splat_radius: i32,
    /// Radial gradient radius per cell, in bins
    pub cell_glow_radius: f32,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            grid_width: 80,
            grid_height: 50,
            texture_width: 256,
            texture_height: 160,
            splat_radius: 2,
            cell_glow_radius: 1.5,
        }
    }
}

// ============================================================================
// TOP LEVEL
// ============================================================================

/// All pipeline thresholds. Deserialized from the dashboard's JSON with
/// missing fields falling back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionConfig {
    pub noise: NoiseFilterConfig,
    pub events: EventConfig,
    pub curve: CurveConfig,
    pub prediction: PredictionConfig,
    pub heatmap: HeatmapConfig,
}

impl ReconstructionConfig {
    /// Parse from JSON (partial objects allowed)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Rescale the pixel thresholds for a video of a different height than
    /// the 720-line reference. Opt-in: the defaults stay absolute pixels.
    pub fn scaled_for(&self, video: &VideoInfo) -> Self {
        let height = if video.height > 0.0 { video.height } else { REFERENCE_VIDEO_HEIGHT };
        let s = height / REFERENCE_VIDEO_HEIGHT;

        let mut scaled = *self;
        scaled.noise.jump_threshold_px *= s;
        scaled.noise.min_step_px *= s;
        scaled.noise.toss_max_dx_px *= s;
        scaled.noise.toss_min_dy_px *= s;
        scaled.events.bounce_prominence_px *= s;
        scaled.events.hit_reversal_px *= s;
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = ReconstructionConfig::from_json(r#"{"noise": {"jump_threshold_px": 120.0}}"#)
            .expect("valid json");
        assert_relative_eq!(cfg.noise.jump_threshold_px, 120.0);
        assert_relative_eq!(cfg.noise.toss_max_dx_px, 40.0);
        assert_eq!(cfg.prediction.steps, 60);
        assert_eq!(cfg.heatmap.grid_width, 80);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(ReconstructionConfig::from_json("{ noise: ").is_err());
    }

    #[test]
    fn test_scaled_for_1080p() {
        let video = VideoInfo { width: 1920.0, height: 1080.0, fps: 30.0 };
        let cfg = ReconstructionConfig::default().scaled_for(&video);
        assert_relative_eq!(cfg.noise.jump_threshold_px, 120.0, epsilon = 1e-4);
        assert_relative_eq!(cfg.events.hit_reversal_px, 22.5, epsilon = 1e-4);
        // non-pixel thresholds untouched
        assert_relative_eq!(cfg.noise.snap_back_cos, -0.5);
        assert_eq!(cfg.noise.max_spike_gap_frames, 3);
    }

    #[test]
    fn test_scaled_for_unknown_height_is_identity() {
        let video = VideoInfo { width: 0.0, height: 0.0, fps: 30.0 };
        let cfg = ReconstructionConfig::default().scaled_for(&video);
        assert_eq!(cfg, ReconstructionConfig::default());
    }
}
