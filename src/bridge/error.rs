//! Errors surfaced to JavaScript

use std::fmt;
use wasm_bindgen::prelude::*;

/// Input rejected at the JS boundary
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeError {
    /// Flat detection buffer is not 4 floats per detection, or a field is unusable
    MalformedDetections(String),
    /// Detections must arrive in strictly increasing frame order
    NonMonotonicFrames { index: usize, previous: u32, frame: u32 },
    InvalidConfig(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::MalformedDetections(e) => write!(f, "Malformed detections: {}", e),
            BridgeError::NonMonotonicFrames { index, previous, frame } => write!(
                f,
                "Detection {} has frame {} after frame {} (frames must increase)",
                index, frame, previous
            ),
            BridgeError::InvalidConfig(e) => write!(f, "Invalid config: {}", e),
        }
    }
}

impl std::error::Error for BridgeError {}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::InvalidConfig(err.to_string())
    }
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
