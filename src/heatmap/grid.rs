//! Density grid over the table footprint
//!
//! Bins are row-major: `row * cols + col`, col along x (table length),
//! row along z (table depth).

use crate::physics::Table;

/// Binned, Gaussian-smoothed impact density
#[derive(Clone, Debug, PartialEq)]
pub struct DensityGrid {
    cols: usize,
    rows: usize,
    bins: Vec<f32>,
}

impl DensityGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            bins: vec![0.0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn bins(&self) -> &[f32] {
        &self.bins
    }

    pub fn get(&self, col: usize, row: usize) -> f32 {
        if col >= self.cols || row >= self.rows {
            return 0.0;
        }
        self.bins[row * self.cols + col]
    }

    pub fn max(&self) -> f32 {
        self.bins.iter().copied().fold(0.0, f32::max)
    }

    /// Bin containing a scene position, None off the table footprint
    pub fn cell_of(&self, x: f32, z: f32, table: &Table) -> Option<(usize, usize)> {
        let u = (x + table.half_width()) / table.width;
        let v = (z + table.half_depth()) / table.depth;
        if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
            return None;
        }

        let col = ((u * self.cols as f32) as usize).min(self.cols - 1);
        let row = ((v * self.rows as f32) as usize).min(self.rows - 1);
        Some((col, row))
    }

    /// Add a Gaussian kernel `exp(-(dx² + dz²) / 2)` centred on a bin
    ///
    /// Only the part of the kernel that overlaps the grid is visited.
    pub fn splat(&mut self, col: usize, row: usize, radius: i32) {
        let radius = radius.max(0) as i64;
        let (col, row) = (col as i64, row as i64);

        let c_lo = (col - radius).max(0);
        let c_hi = (col + radius).min(self.cols as i64 - 1);
        let r_lo = (row - radius).max(0);
        let r_hi = (row + radius).min(self.rows as i64 - 1);

        for r in r_lo..=r_hi {
            for c in c_lo..=c_hi {
                let dx = (c - col) as f32;
                let dz = (r - row) as f32;
                let weight = (-(dx * dx + dz * dz) / 2.0).exp();
                self.bins[r as usize * self.cols + c as usize] += weight;
            }
        }
    }

    /// Scale so the densest bin is 1. An empty grid stays all zero.
    pub fn normalize(&mut self) {
        let max = self.max();
        if max <= 0.0 {
            return;
        }
        for b in &mut self.bins {
            *b /= max;
        }
    }
}
