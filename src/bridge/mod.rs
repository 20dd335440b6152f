//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod codec;
mod error;
mod session;

pub use codec::{
    decode_detections, encode_events, encode_visible_arcs, flatten_points, ARC_HEADER_LEN,
    DETECTION_STRIDE,
};
pub use error::BridgeError;
pub use session::{
    // WASM entry points
    ball_position_at,
    config_json,
    heatmap_dimensions,
    heatmap_rgba,
    load_detections,
    predicted_path,
    session_version,
    set_config_json,
    table_dimensions,
    trajectory_events,
    visible_arcs,
    what_if_path,
    // Internal API
    input_key,
    Computed,
    LoadSummary,
    Session,
};
