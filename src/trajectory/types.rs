//! Shared data structures for trajectory reconstruction

use serde::{Deserialize, Serialize};

use super::bounds::TrajectoryBounds;
use crate::physics::{Table, TimedPosition, Vec3, TABLE};

/// Fallback playback rate when the video reports none
pub const DEFAULT_FPS: f32 = 30.0;

/// One tracked ball position from the upstream detector (image pixels)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    pub frame: u32,
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

impl RawDetection {
    pub fn new(frame: u32, x: f32, y: f32, confidence: f32) -> Self {
        Self { frame, x, y, confidence }
    }
}

/// A detection that survived noise filtering
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilteredPoint {
    pub frame: u32,
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
    /// Part of a near-vertical serve toss
    pub is_toss: bool,
}

impl FilteredPoint {
    pub fn from_raw(raw: &RawDetection) -> Self {
        Self {
            frame: raw.frame,
            x: raw.x,
            y: raw.y,
            confidence: raw.confidence,
            is_toss: false,
        }
    }
}

/// Video metadata, used only as scale references
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub width: f32,
    pub height: f32,
    pub fps: f32,
}

impl VideoInfo {
    /// Frame rate with a 30 fps fallback for missing metadata
    pub fn effective_fps(&self) -> f32 {
        if self.fps > 0.0 && self.fps.is_finite() {
            self.fps
        } else {
            DEFAULT_FPS
        }
    }
}

impl Default for VideoInfo {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0, fps: DEFAULT_FPS }
    }
}

/// How a fitted arc relates to the net plane
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetCrossing {
    /// Crosses x = 0 with the required clearance
    Clears,
    /// Crosses x = 0 below the required clearance
    Clips,
    /// Never reaches the net plane
    None,
}

impl NetCrossing {
    /// Stable numeric code for the JS bridge
    pub fn code(&self) -> u8 {
        match self {
            NetCrossing::None => 0,
            NetCrossing::Clears => 1,
            NetCrossing::Clips => 2,
        }
    }
}

/// A fitted, net-checked flight phase
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedArc {
    /// Sampled curve, evenly spaced in spline parameter
    pub curve_points: Vec<Vec3>,
    pub is_toss: bool,
    pub net_crossing: NetCrossing,
    pub start_frame: u32,
    pub end_frame: u32,
    /// Frames of the control points the curve was fitted through
    pub control_frames: Vec<u32>,
    /// Peak height injected to clear the net (0 when untouched)
    pub net_lift: f32,
}

/// Full output of one reconstruction pass
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessedTrajectory {
    pub arcs: Vec<ProcessedArc>,
    /// Every filtered point mapped to the scene, in frame order
    pub all_points: Vec<TimedPosition>,
    pub bounds: TrajectoryBounds,
    pub events: Vec<super::events::TrajectoryEvent>,
    /// Table the arcs were reconstructed against
    pub table: Table,
}

impl ProcessedTrajectory {
    /// Nothing tracked, on the regulation table
    pub fn empty() -> Self {
        Self::empty_on(TABLE)
    }

    pub fn empty_on(table: Table) -> Self {
        Self {
            arcs: Vec::new(),
            all_points: Vec::new(),
            bounds: TrajectoryBounds::default(),
            events: Vec::new(),
            table,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.all_points.is_empty()
    }
}
