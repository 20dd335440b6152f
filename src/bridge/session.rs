//! Reconstruction session and JS bridge
//!
//! Holds the latest detections, the reconstruction built from them and the
//! derived heatmap. JavaScript pushes a flat detection buffer once per video
//! (or per edit) and then queries by frame during playback.

use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use wasm_bindgen::prelude::*;

use super::codec::{decode_detections, encode_events, encode_visible_arcs, flatten_points};
use super::error::BridgeError;
use crate::config::ReconstructionConfig;
use crate::heatmap::HeatmapField;
use crate::physics::{simulate_shot_on, ShotParams, Vec3, TABLE, WHAT_IF_STEPS};
use crate::trajectory::{reconstruct, ProcessedTrajectory, RawDetection, VideoInfo, VisibleArc};

// ============================================================================
// SESSION STATE
// ============================================================================

/// Content hash of one reconstruction input
pub fn input_key(raw: &[RawDetection], video: &VideoInfo) -> u64 {
    let mut hasher = DefaultHasher::new();
    raw.len().hash(&mut hasher);
    for d in raw {
        d.frame.hash(&mut hasher);
        d.x.to_bits().hash(&mut hasher);
        d.y.to_bits().hash(&mut hasher);
        d.confidence.to_bits().hash(&mut hasher);
    }
    video.width.to_bits().hash(&mut hasher);
    video.height.to_bits().hash(&mut hasher);
    video.fps.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// A finished reconstruction waiting to be installed
pub struct Computed {
    ticket: u32,
    key: u64,
    raw: Vec<RawDetection>,
    video: VideoInfo,
    trajectory: ProcessedTrajectory,
}

impl Computed {
    pub fn ticket(&self) -> u32 {
        self.ticket
    }
}

/// What a load did, for logging
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadSummary {
    pub version: u32,
    pub memo_hit: bool,
    pub raw_points: usize,
    pub filtered_points: usize,
    pub arcs: usize,
    pub events: usize,
}

pub struct Session {
    config: ReconstructionConfig,
    video: VideoInfo,
    raw: Vec<RawDetection>,
    trajectory: ProcessedTrajectory,
    heatmap: HeatmapField,
    /// Key of the installed input; cleared while a config change rebuilds,
    /// then set again once the rebuilt result is installed
    input_key: Option<u64>,
    /// Ticket of the installed result
    version: u32,
    /// Latest ticket handed out
    submitted: u32,
}

impl Default for Session {
    fn default() -> Self {
        let config = ReconstructionConfig::default();
        let trajectory = ProcessedTrajectory::empty();
        let heatmap = trajectory.heatmap_field(&config.heatmap);
        Self {
            config,
            video: VideoInfo::default(),
            raw: Vec::new(),
            trajectory,
            heatmap,
            input_key: None,
            version: 0,
            submitted: 0,
        }
    }
}

impl Session {
    pub fn new(config: ReconstructionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Run a reconstruction under a fresh ticket. Nothing is installed yet.
    pub fn compute(&mut self, raw: Vec<RawDetection>, video: VideoInfo) -> Computed {
        self.submitted = self.submitted.wrapping_add(1);
        let key = input_key(&raw, &video);
        let trajectory = reconstruct(&raw, &video, &self.config);
        Computed {
            ticket: self.submitted,
            key,
            raw,
            video,
            trajectory,
        }
    }

    /// Install a result unless a newer input was submitted after it.
    /// Returns false when the result was stale and dropped.
    pub fn install(&mut self, computed: Computed) -> bool {
        if computed.ticket != self.submitted {
            return false;
        }

        self.heatmap = computed.trajectory.heatmap_field(&self.config.heatmap);
        self.trajectory = computed.trajectory;
        self.raw = computed.raw;
        self.video = computed.video;
        self.input_key = Some(computed.key);
        self.version = computed.ticket;
        true
    }

    /// Reconstruct and install, reusing the current result for identical input
    pub fn load(&mut self, raw: Vec<RawDetection>, video: VideoInfo) -> LoadSummary {
        let raw_points = raw.len();
        let memo_hit = self.input_key == Some(input_key(&raw, &video));

        if !memo_hit {
            let computed = self.compute(raw, video);
            self.install(computed);
        }

        LoadSummary {
            version: self.version,
            memo_hit,
            raw_points,
            filtered_points: self.trajectory.all_points.len(),
            arcs: self.trajectory.arcs.len(),
            events: self.trajectory.events.len(),
        }
    }

    /// Replace thresholds and rebuild from the stored detections
    pub fn set_config(&mut self, config: ReconstructionConfig) -> u32 {
        self.config = config;
        self.input_key = None;

        let raw = std::mem::take(&mut self.raw);
        let computed = self.compute(raw, self.video);
        self.install(computed);
        self.version
    }

    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn trajectory(&self) -> &ProcessedTrajectory {
        &self.trajectory
    }

    pub fn heatmap(&self) -> &HeatmapField {
        &self.heatmap
    }

    pub fn ball_position_at(&self, frame: u32) -> Option<Vec3> {
        self.trajectory.ball_position_at(frame)
    }

    pub fn visible_arcs(&self, frame: u32) -> Vec<VisibleArc<'_>> {
        self.trajectory.visible_arcs(frame)
    }

    pub fn predicted_path(&self, frame: u32) -> Vec<Vec3> {
        self.trajectory
            .predicted_path(frame, self.video.effective_fps(), &self.config.prediction)
    }

    /// Sandbox shot stepped at the loaded video's frame rate
    pub fn what_if_path(&self, params: &ShotParams) -> Vec<Vec3> {
        simulate_shot_on(&self.trajectory.table, params, WHAT_IF_STEPS, self.video.effective_fps())
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static SESSION: RefCell<Session> = RefCell::new(Session::default());
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    0.0
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Load detections as a flat Float32Array of `[frame, x, y, confidence]`
/// quadruples. Returns the session version; identical input keeps it.
#[wasm_bindgen]
pub fn load_detections(data: &[f32], width: f32, height: f32, fps: f32) -> Result<u32, JsValue> {
    let started = now_ms();

    let raw = decode_detections(data).map_err(|e| {
        console_warn!("Rejected detections: {}", e);
        e
    })?;
    let video = VideoInfo { width, height, fps };

    let summary = SESSION.with(|cell| cell.borrow_mut().load(raw, video));

    if summary.memo_hit {
        console_log!("Detections unchanged, keeping version {}", summary.version);
    } else {
        console_log!(
            "Reconstructed v{}: {} raw -> {} filtered, {} arcs, {} events in {:.1} ms",
            summary.version,
            summary.raw_points,
            summary.filtered_points,
            summary.arcs,
            summary.events,
            now_ms() - started
        );
    }

    Ok(summary.version)
}

/// Replace tuning thresholds from JSON; missing fields keep their defaults
#[wasm_bindgen]
pub fn set_config_json(json: &str) -> Result<(), JsValue> {
    let config = ReconstructionConfig::from_json(json).map_err(|e| {
        let err = BridgeError::from(e);
        console_warn!("{}", err);
        err
    })?;

    let version = SESSION.with(|cell| cell.borrow_mut().set_config(config));
    console_log!("Config replaced, rebuilt as v{}", version);
    Ok(())
}

/// Current thresholds as JSON
#[wasm_bindgen]
pub fn config_json() -> Result<String, JsValue> {
    SESSION
        .with(|cell| serde_json::to_string(cell.borrow().config()))
        .map_err(|e| BridgeError::from(e).into())
}

/// `[x, y, z]`, or undefined when nothing has been tracked
#[wasm_bindgen]
pub fn ball_position_at(frame: u32) -> Option<Vec<f32>> {
    SESSION.with(|cell| {
        cell.borrow()
            .ball_position_at(frame)
            .map(|p| vec![p.x, p.y, p.z])
    })
}

/// Arcs started by `frame`, in the header-prefixed layout of `codec`
#[wasm_bindgen]
pub fn visible_arcs(frame: u32) -> Vec<f32> {
    SESSION.with(|cell| encode_visible_arcs(&cell.borrow().visible_arcs(frame)))
}

/// Flat xyz of the physics prediction from `frame`
#[wasm_bindgen]
pub fn predicted_path(frame: u32) -> Vec<f32> {
    SESSION.with(|cell| flatten_points(&cell.borrow().predicted_path(frame)))
}

/// Flat xyz of a sandbox shot
#[wasm_bindgen]
pub fn what_if_path(
    origin_x: f32,
    origin_y: f32,
    origin_z: f32,
    speed_mps: f32,
    launch_angle_deg: f32,
    direction_deg: f32,
) -> Vec<f32> {
    let params = ShotParams {
        origin: Vec3::new(origin_x, origin_y, origin_z),
        speed_mps,
        launch_angle_deg,
        direction_deg,
    };
    SESSION.with(|cell| flatten_points(&cell.borrow().what_if_path(&params)))
}

/// Heatmap texture as RGBA8 bytes, row-major
#[wasm_bindgen]
pub fn heatmap_rgba() -> Vec<u8> {
    SESSION.with(|cell| cell.borrow().heatmap().as_bytes().to_vec())
}

/// `[width, height]` of the heatmap texture
#[wasm_bindgen]
pub fn heatmap_dimensions() -> Vec<u32> {
    SESSION.with(|cell| {
        let session = cell.borrow();
        let heatmap = session.heatmap();
        vec![heatmap.width() as u32, heatmap.height() as u32]
    })
}

/// `[frame, kind]` pairs: 0 bounce, 1 hit, 2 toss peak
#[wasm_bindgen]
pub fn trajectory_events() -> Vec<u32> {
    SESSION.with(|cell| encode_events(&cell.borrow().trajectory().events))
}

#[wasm_bindgen]
pub fn session_version() -> u32 {
    SESSION.with(|cell| cell.borrow().version())
}

/// Regulation table dimensions `[length, width, height, net_height]` for the scene
#[wasm_bindgen]
pub fn table_dimensions() -> Vec<f32> {
    vec![TABLE.width, TABLE.depth, TABLE.height, TABLE.net_height]
}
