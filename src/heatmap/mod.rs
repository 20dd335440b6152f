//! Heatmap module - impact density over the table footprint
//!
//! Re-exports only. All logic in submodules.

mod colormap;
mod field;
mod grid;

pub use colormap::{ramp, Rgba8};
pub use field::HeatmapField;
pub use grid::DensityGrid;
