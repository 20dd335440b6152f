//! Trajectory module - detections → filtered points → arcs → 3D curves
//!
//! Re-exports only. All logic in submodules.

mod bounds;
mod curve;
mod events;
mod mapper;
mod noise_filter;
mod pipeline;
mod playback;
mod segmenter;
mod types;

pub use bounds::{TrajectoryBounds, BASELINE_BUCKETS};
pub use curve::{
    catmull_rom_point, classify_net_crossing, clamp_to_scene, clearance_threshold,
    enforce_net_clearance, find_net_crossing, fit_arc, fit_curve, sample_spline, FittedCurve,
    SCENE_CEILING,
};
pub use events::{detect_events, EventKind, TrajectoryEvent};
pub use mapper::{map_point, CoordinateMapper, HEIGHT_CEILING};
pub use noise_filter::{filter_noise, remove_snap_backs, remove_spikes, tag_tosses, MIN_FILTER_POINTS};
pub use pipeline::{map_stream, reconstruct, reconstruct_on};
pub use playback::{ArcProgress, VisibleArc};
pub use segmenter::{segment_arcs, ArcSegment};
pub use types::{
    FilteredPoint, NetCrossing, ProcessedArc, ProcessedTrajectory, RawDetection, VideoInfo,
    DEFAULT_FPS,
};
