//! Rally Web - ball trajectory reconstruction for table-tennis video analysis
//!
//! Entry point for WASM module. Only contains:
//! - Logging macros
//! - Module declarations and re-exports
//! - wasm_bindgen start hook (the JS API lives in `bridge`)

use wasm_bindgen::prelude::*;

// ============================================================================
// CONSOLE LOGGING
// ============================================================================

// Browser console on wasm32. Native builds (unit tests) must not touch JS
// imports, so the macros only evaluate their format arguments there.

#[cfg(target_arch = "wasm32")]
macro_rules! console_log {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_log {
    ($($t:tt)*) => {{
        let _ = format_args!($($t)*);
    }};
}

#[cfg(target_arch = "wasm32")]
macro_rules! console_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! console_warn {
    ($($t:tt)*) => {{
        let _ = format_args!($($t)*);
    }};
}

pub mod bridge;
pub mod config;
pub mod heatmap;
pub mod physics;
pub mod trajectory;

pub use config::{
    CurveConfig, EventConfig, HeatmapConfig, NoiseFilterConfig, PredictionConfig,
    ReconstructionConfig,
};
pub use heatmap::HeatmapField;
pub use physics::{Table, Vec3, TABLE};
pub use trajectory::{
    reconstruct, ArcProgress, NetCrossing, ProcessedArc, ProcessedTrajectory, RawDetection,
    VideoInfo, VisibleArc,
};

// ============================================================================
// WASM ENTRY POINTS
// ============================================================================

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
    console_log!("rally-web loaded");
}
