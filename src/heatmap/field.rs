//! Renderable impact-density texture

use super::colormap::{ramp, Rgba8};
use super::grid::DensityGrid;
use crate::config::HeatmapConfig;
use crate::physics::{Table, Vec3};
use crate::trajectory::{CoordinateMapper, FilteredPoint, TrajectoryBounds};

/// RGBA8 texture over the table footprint plus the normalised grid behind it
///
/// Texel rows run along z (table depth), columns along x (table length),
/// matching the grid layout.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapField {
    width: usize,
    height: usize,
    texels: Vec<Rgba8>,
    density: DensityGrid,
}

impl HeatmapField {
    /// Build from scene positions; points off the table footprint are skipped
    pub fn from_positions(
        positions: impl IntoIterator<Item = Vec3>,
        table: &Table,
        config: &HeatmapConfig,
    ) -> Self {
        let mut density = DensityGrid::new(config.grid_width, config.grid_height);
        for p in positions {
            if let Some((col, row)) = density.cell_of(p.x, p.z, table) {
                density.splat(col, row, config.splat_radius);
            }
        }
        density.normalize();

        Self::render(density, config)
    }

    /// Map filtered detections against the bounds of their reconstruction
    pub fn from_points(
        points: &[FilteredPoint],
        bounds: &TrajectoryBounds,
        table: &Table,
        config: &HeatmapConfig,
    ) -> Self {
        let mapper = CoordinateMapper::new(bounds, *table);
        Self::from_positions(points.iter().map(|p| mapper.map(p.x, p.y)), table, config)
    }

    /// Radial gradient per bin, lighten-blended into the texture
    fn render(density: DensityGrid, config: &HeatmapConfig) -> Self {
        let width = config.texture_width.max(1);
        let height = config.texture_height.max(1);
        let glow = config.cell_glow_radius.max(f32::EPSILON);
        let cols = density.cols() as f32;
        let rows = density.rows() as f32;
        // no bin further than the grid itself can contribute
        let reach = glow.min(cols + rows).ceil() as i64;
        let (last_col, last_row) = (density.cols() as i64 - 1, density.rows() as i64 - 1);

        let mut texels = Vec::with_capacity(width * height);
        for ty in 0..height {
            let gy = (ty as f32 + 0.5) / height as f32 * rows;
            for tx in 0..width {
                let gx = (tx as f32 + 0.5) / width as f32 * cols;

                let mut intensity: f32 = 0.0;
                let rows_in_reach = (gy as i64 - reach).max(0)..=(gy as i64 + reach).min(last_row);
                for r in rows_in_reach {
                    for c in (gx as i64 - reach).max(0)..=(gx as i64 + reach).min(last_col) {
                        let value = density.get(c as usize, r as usize);
                        if value <= 0.0 {
                            continue;
                        }
                        let dx = gx - (c as f32 + 0.5);
                        let dy = gy - (r as f32 + 0.5);
                        let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / glow;
                        if falloff > 0.0 {
                            intensity = intensity.max(value * falloff);
                        }
                    }
                }

                texels.push(ramp(intensity));
            }
        }

        Self {
            width,
            height,
            texels,
            density,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn texels(&self) -> &[Rgba8] {
        &self.texels
    }

    pub fn texel(&self, x: usize, y: usize) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.texels[y * self.width + x])
    }

    /// Texels as tightly packed RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }

    /// Normalised bin grid
    pub fn density(&self) -> &DensityGrid {
        &self.density
    }

    /// True when no point landed on the table
    pub fn is_empty(&self) -> bool {
        self.density.max() <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::TABLE;
    use approx::assert_relative_eq;

    fn on_table(x: f32, z: f32) -> Vec3 {
        Vec3::new(x, TABLE.surface_y(), z)
    }

    #[test]
    fn test_empty_field_is_transparent() {
        let f = HeatmapField::from_positions(Vec::new(), &TABLE, &HeatmapConfig::default());
        assert!(f.is_empty());
        assert_eq!((f.width(), f.height()), (256, 160));
        assert_eq!(f.as_bytes().len(), 256 * 160 * 4);
        assert!(f.texels().iter().all(|t| *t == Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_hotspot_is_densest_and_red() {
        let cfg = HeatmapConfig::default();
        let mut positions = vec![on_table(0.5, 0.2); 5];
        positions.push(on_table(-0.8, -0.4));
        let f = HeatmapField::from_positions(positions, &TABLE, &cfg);

        let (col, row) = f.density().cell_of(0.5, 0.2, &TABLE).expect("on table");
        assert_relative_eq!(f.density().get(col, row), 1.0);
        let (c2, r2) = f.density().cell_of(-0.8, -0.4, &TABLE).expect("on table");
        assert_relative_eq!(f.density().get(c2, r2), 0.2, epsilon = 1e-5);

        // texel under the hot bin centre
        let tx = ((col as f32 + 0.5) / cfg.grid_width as f32 * cfg.texture_width as f32) as usize;
        let ty = ((row as f32 + 0.5) / cfg.grid_height as f32 * cfg.texture_height as f32) as usize;
        let hot = f.texel(tx, ty).expect("in texture");
        assert!(hot.r > 200 && hot.b < 50);
    }

    #[test]
    fn test_off_table_points_ignored() {
        let f = HeatmapField::from_positions(
            vec![on_table(5.0, 0.0), on_table(0.0, 3.0)],
            &TABLE,
            &HeatmapConfig::default(),
        );
        assert!(f.is_empty());
    }

    #[test]
    fn test_far_corner_stays_transparent() {
        let f = HeatmapField::from_positions(vec![on_table(0.0, 0.0)], &TABLE, &HeatmapConfig::default());
        assert_eq!(f.texel(0, 0), Some(Rgba8::TRANSPARENT));
        assert_eq!(f.texel(256, 0), None);
    }

    #[test]
    fn test_from_points_maps_through_bounds() {
        let points: Vec<FilteredPoint> = (0..20u32)
            .map(|i| FilteredPoint {
                frame: i,
                x: 300.0 + i as f32 * 20.0,
                y: 400.0 + (i % 5) as f32 * 10.0,
                confidence: 1.0,
                is_toss: false,
            })
            .collect();
        let bounds = TrajectoryBounds::estimate(&points);
        let cfg = HeatmapConfig::default();

        let direct = HeatmapField::from_points(&points, &bounds, &TABLE, &cfg);
        let mapper = CoordinateMapper::new(&bounds, TABLE);
        let mapped = HeatmapField::from_positions(points.iter().map(|p| mapper.map(p.x, p.y)), &TABLE, &cfg);

        assert_eq!(direct, mapped);
        assert!(!direct.is_empty());
    }

    #[test]
    fn test_oversized_kernels_stay_bounded() {
        let cfg = HeatmapConfig {
            texture_width: 16,
            texture_height: 8,
            splat_radius: i32::MAX,
            cell_glow_radius: 1e9,
            ..HeatmapConfig::default()
        };
        let f = HeatmapField::from_positions(vec![on_table(0.0, 0.0)], &TABLE, &cfg);
        assert!(!f.is_empty());
        assert_eq!(f.texels().len(), 16 * 8);
    }

    #[test]
    fn test_custom_dimensions() {
        let cfg = HeatmapConfig {
            texture_width: 32,
            texture_height: 16,
            ..HeatmapConfig::default()
        };
        let f = HeatmapField::from_positions(vec![on_table(0.0, 0.0)], &TABLE, &cfg);
        assert_eq!(f.texels().len(), 32 * 16);
        assert!(!f.is_empty());
    }
}
