//! Full reconstruction pass: raw detections → processed trajectory
//!
//! Stages run in sequence as pure functions. The result is rebuilt from
//! scratch on every call; bounds depend on the whole point set, so partial
//! updates are never attempted.

use super::bounds::TrajectoryBounds;
use super::curve::fit_arc;
use super::events::detect_events;
use super::mapper::CoordinateMapper;
use super::noise_filter::filter_noise;
use super::segmenter::segment_arcs;
use super::types::{FilteredPoint, ProcessedTrajectory, RawDetection, VideoInfo};
use crate::config::ReconstructionConfig;
use crate::physics::{Table, TimedPosition, TABLE};

/// Reconstruct against the regulation table
pub fn reconstruct(
    raw: &[RawDetection],
    video: &VideoInfo,
    config: &ReconstructionConfig,
) -> ProcessedTrajectory {
    reconstruct_on(raw, video, config, &TABLE)
}

/// Reconstruct against an explicit table
///
/// `video` is a scale reference only; the pipeline itself works in pixels
/// and scene metres.
pub fn reconstruct_on(
    raw: &[RawDetection],
    _video: &VideoInfo,
    config: &ReconstructionConfig,
    table: &Table,
) -> ProcessedTrajectory {
    if raw.is_empty() {
        return ProcessedTrajectory::empty_on(*table);
    }

    let filtered = filter_noise(raw, &config.noise);
    let events = detect_events(&filtered, &config.events);
    let segments = segment_arcs(&filtered, &events);

    let bounds = TrajectoryBounds::estimate(&filtered);
    let mapper = CoordinateMapper::new(&bounds, *table);

    let all_points = map_stream(&filtered, &mapper);

    let arcs = segments
        .iter()
        .filter_map(|segment| {
            // extend to the following event point so consecutive curves meet
            let end = (segment.end + 1).min(filtered.len());
            fit_arc(&filtered[segment.start..end], segment.is_toss, &mapper, table, &config.curve)
        })
        .collect();

    ProcessedTrajectory {
        arcs,
        all_points,
        bounds,
        events,
        table: *table,
    }
}

/// Map every filtered point into the scene
pub fn map_stream(points: &[FilteredPoint], mapper: &CoordinateMapper) -> Vec<TimedPosition> {
    points
        .iter()
        .map(|p| TimedPosition {
            frame: p.frame,
            position: mapper.map(p.x, p.y),
        })
        .collect()
}
