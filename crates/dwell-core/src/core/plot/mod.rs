//! # Plot Module
//!
//! Visualization primitives for rendering potential landscapes and sampled
//! trajectories.
//!
//! The drawing surface is a capability: [`canvas::PlotCanvas`] exposes the
//! three operations the sampling workflow needs (filled contour, scatter
//! overlay, colorbar), and [`chart::ChartCanvas`] is the plotters-backed
//! implementation that renders them to a bitmap file. Any backend
//! satisfying the trait is interchangeable; tests use a recording mock.

pub mod canvas;
pub mod chart;

use serde::{Deserialize, Serialize};

/// Number of filled contour bands drawn for a potential landscape.
pub const CONTOUR_LEVELS: usize = 8;

/// Axis-aligned rectangular plotting domain in the xy-plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Width of the domain along x.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the domain along y.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }
}

impl Default for PlotBounds {
    /// The domain of interest for the double-well surface.
    fn default() -> Self {
        Self::new(-3.0, 3.0, -1.2, 3.0)
    }
}

/// A scalar field sampled on a regular grid over a [`PlotBounds`] domain.
///
/// Values are stored row-major: index `j * nx + i` holds the sample at
/// column `i` (along x) and row `j` (along y).
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    pub bounds: PlotBounds,
    pub nx: usize,
    pub ny: usize,
    values: Vec<f64>,
}

impl ScalarField {
    /// Builds a field by evaluating `f` at every grid node.
    ///
    /// The grid has `nx` columns and `ny` rows with nodes placed at the
    /// cell corners, so the first and last samples lie exactly on the
    /// domain boundary. `nx` and `ny` must be at least 2.
    pub fn from_fn(bounds: PlotBounds, nx: usize, ny: usize, f: impl Fn(f64, f64) -> f64) -> Self {
        assert!(nx >= 2 && ny >= 2, "grid must have at least 2x2 nodes");
        let dx = bounds.width() / (nx - 1) as f64;
        let dy = bounds.height() / (ny - 1) as f64;
        let mut values = Vec::with_capacity(nx * ny);
        for j in 0..ny {
            let y = bounds.y_min + j as f64 * dy;
            for i in 0..nx {
                let x = bounds.x_min + i as f64 * dx;
                values.push(f(x, y));
            }
        }
        Self {
            bounds,
            nx,
            ny,
            values,
        }
    }

    /// Returns the sample at column `i`, row `j`.
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.nx + i]
    }

    /// Returns the x coordinate of grid column `i`.
    pub fn x_at(&self, i: usize) -> f64 {
        self.bounds.x_min + self.bounds.width() * i as f64 / (self.nx - 1) as f64
    }

    /// Returns the y coordinate of grid row `j`.
    pub fn y_at(&self, j: usize) -> f64 {
        self.bounds.y_min + self.bounds.height() * j as f64 / (self.ny - 1) as f64
    }

    /// Scans for the minimum and maximum sample values.
    ///
    /// Non-finite samples are skipped; a field with no finite samples
    /// reports `(0.0, 0.0)`.
    pub fn value_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in &self.values {
            if v.is_finite() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fn_places_nodes_on_the_domain_boundary() {
        let bounds = PlotBounds::new(-1.0, 1.0, 0.0, 2.0);
        let field = ScalarField::from_fn(bounds, 3, 5, |x, y| x + y);
        assert_eq!(field.x_at(0), -1.0);
        assert_eq!(field.x_at(2), 1.0);
        assert_eq!(field.y_at(0), 0.0);
        assert_eq!(field.y_at(4), 2.0);
        assert_eq!(field.value(0, 0), -1.0);
        assert_eq!(field.value(2, 4), 3.0);
    }

    #[test]
    fn value_range_skips_non_finite_samples() {
        let bounds = PlotBounds::new(0.0, 1.0, 0.0, 1.0);
        let field = ScalarField::from_fn(bounds, 2, 2, |x, y| {
            if x == 0.0 && y == 0.0 {
                f64::INFINITY
            } else {
                x - y
            }
        });
        let (min, max) = field.value_range();
        assert_eq!(min, -1.0);
        assert_eq!(max, 1.0);
    }

    #[test]
    fn default_bounds_cover_the_double_well_domain() {
        let bounds = PlotBounds::default();
        assert_eq!(bounds.width(), 6.0);
        assert!((bounds.height() - 4.2).abs() < 1e-12);
    }
}
