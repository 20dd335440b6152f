//! Flat typed-array layouts exchanged with JavaScript
//!
//! Detections in: `[frame, x, y, confidence]` per detection.
//!
//! Visible arcs out: `[arc_count, (arc header, xyz...)*]` where each header is
//! `[start_frame, end_frame, is_toss, net_crossing, completed, point_count]`
//! followed by `point_count * 3` coordinates.

use super::error::BridgeError;
use crate::physics::Vec3;
use crate::trajectory::{ArcProgress, RawDetection, TrajectoryEvent, VisibleArc};

/// Floats per detection in the input buffer
pub const DETECTION_STRIDE: usize = 4;

/// Floats in each arc header of the visible-arc encoding
pub const ARC_HEADER_LEN: usize = 6;

/// Parse the flat detection buffer, rejecting malformed or unordered input
pub fn decode_detections(data: &[f32]) -> Result<Vec<RawDetection>, BridgeError> {
    if data.len() % DETECTION_STRIDE != 0 {
        return Err(BridgeError::MalformedDetections(format!(
            "length {} is not a multiple of {}",
            data.len(),
            DETECTION_STRIDE
        )));
    }

    let mut detections: Vec<RawDetection> = Vec::with_capacity(data.len() / DETECTION_STRIDE);
    for (index, chunk) in data.chunks_exact(DETECTION_STRIDE).enumerate() {
        let frame = chunk[0];
        if !frame.is_finite() || frame < 0.0 || frame > u32::MAX as f32 || frame.fract() != 0.0 {
            return Err(BridgeError::MalformedDetections(format!(
                "detection {} has frame {}",
                index, frame
            )));
        }
        if !chunk[1].is_finite() || !chunk[2].is_finite() {
            return Err(BridgeError::MalformedDetections(format!(
                "detection {} has a non-finite position",
                index
            )));
        }

        let frame = frame as u32;
        if let Some(prev) = detections.last() {
            if frame <= prev.frame {
                return Err(BridgeError::NonMonotonicFrames {
                    index,
                    previous: prev.frame,
                    frame,
                });
            }
        }
        detections.push(RawDetection::new(frame, chunk[1], chunk[2], chunk[3]));
    }

    Ok(detections)
}

/// `[x, y, z, x, y, z, ...]`
pub fn flatten_points(points: &[Vec3]) -> Vec<f32> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for p in points {
        out.extend_from_slice(&[p.x, p.y, p.z]);
    }
    out
}

pub fn encode_visible_arcs(arcs: &[VisibleArc]) -> Vec<f32> {
    let mut out = vec![arcs.len() as f32];
    for visible in arcs {
        let arc = visible.arc;
        let drawn = visible.drawn_points();
        let completed = matches!(visible.progress, ArcProgress::Completed);

        let header: [f32; ARC_HEADER_LEN] = [
            arc.start_frame as f32,
            arc.end_frame as f32,
            if arc.is_toss { 1.0 } else { 0.0 },
            arc.net_crossing.code() as f32,
            if completed { 1.0 } else { 0.0 },
            drawn.len() as f32,
        ];
        out.extend_from_slice(&header);
        out.extend(flatten_points(drawn));
    }
    out
}

/// `[frame, kind_code]` pairs
pub fn encode_events(events: &[TrajectoryEvent]) -> Vec<u32> {
    events
        .iter()
        .flat_map(|e| [e.frame, e.kind.code() as u32])
        .collect()
}
