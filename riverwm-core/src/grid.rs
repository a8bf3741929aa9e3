//! Grid provider interface and a uniform rectilinear implementation.
//!
//! The core does not own grid topology; it consumes a narrow read-only
//! interface for cell count, 2-D shape and spatial origin/spacing. All
//! per-cell arrays are indexed by the stable cell id defined here:
//! `cell = row * longitude_count + column`, rows ordered by latitude.

/// Read-only geometry of a single uniform rectilinear grid (grid id 0).
pub trait GridProvider {
    /// Number of cells; the length of every per-cell state array.
    fn cell_count(&self) -> usize;

    /// Grid shape as `[latitude_count, longitude_count]`.
    fn shape(&self) -> [usize; 2];

    /// Coordinates of the first cell as `[latitude, longitude]`.
    fn origin(&self) -> [f64; 2];

    /// Uniform cell spacing as `[latitude, longitude]` degrees.
    fn spacing(&self) -> [f64; 2];

    /// Unique latitude values, ascending.
    fn latitudes(&self) -> &[f64];

    /// Unique longitude values, ascending.
    fn longitudes(&self) -> &[f64];
}

/// A concrete uniform rectilinear grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RectilinearGrid {
    latitudes: Vec<f64>,
    longitudes: Vec<f64>,
    latitude_spacing: f64,
    longitude_spacing: f64,
}

impl RectilinearGrid {
    /// Build a grid from its unique coordinate axes.
    ///
    /// Spacing is taken from the first pair of each axis; the caller asserts
    /// uniformity. Panics if either axis is empty.
    pub fn new(latitudes: Vec<f64>, longitudes: Vec<f64>) -> Self {
        assert!(
            !latitudes.is_empty() && !longitudes.is_empty(),
            "grid axes must be non-empty"
        );
        let latitude_spacing = if latitudes.len() > 1 {
            latitudes[1] - latitudes[0]
        } else {
            0.0
        };
        let longitude_spacing = if longitudes.len() > 1 {
            longitudes[1] - longitudes[0]
        } else {
            0.0
        };
        Self {
            latitudes,
            longitudes,
            latitude_spacing,
            longitude_spacing,
        }
    }

    /// Regular grid covering `rows x cols` cells from an origin and spacing.
    pub fn regular(origin: [f64; 2], spacing: [f64; 2], rows: usize, cols: usize) -> Self {
        let latitudes = (0..rows).map(|i| origin[0] + i as f64 * spacing[0]).collect();
        let longitudes = (0..cols).map(|j| origin[1] + j as f64 * spacing[1]).collect();
        Self::new(latitudes, longitudes)
    }
}

impl GridProvider for RectilinearGrid {
    fn cell_count(&self) -> usize {
        self.latitudes.len() * self.longitudes.len()
    }

    fn shape(&self) -> [usize; 2] {
        [self.latitudes.len(), self.longitudes.len()]
    }

    fn origin(&self) -> [f64; 2] {
        [self.latitudes[0], self.longitudes[0]]
    }

    fn spacing(&self) -> [f64; 2] {
        [self.latitude_spacing, self.longitude_spacing]
    }

    fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_grid_geometry() {
        let grid = RectilinearGrid::regular([30.0, -120.0], [0.5, 0.25], 4, 8);
        assert_eq!(grid.cell_count(), 32);
        assert_eq!(grid.shape(), [4, 8]);
        assert_eq!(grid.origin(), [30.0, -120.0]);
        assert_eq!(grid.spacing(), [0.5, 0.25]);
        assert_eq!(grid.latitudes().len(), 4);
        assert_eq!(grid.longitudes()[1], -119.75);
    }

    #[test]
    fn single_cell_grid_has_zero_spacing() {
        let grid = RectilinearGrid::new(vec![45.0], vec![7.0]);
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.spacing(), [0.0, 0.0]);
    }

    #[test]
    #[should_panic]
    fn empty_axis_panics() {
        RectilinearGrid::new(vec![], vec![1.0]);
    }
}
