use super::canvas::PlotCanvas;
use super::{PlotBounds, ScalarField};
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Nothing to render: no contour or scatter data recorded")]
    Empty,

    #[error("Failed to render chart: {0}")]
    Render(String),
}

// Viridis anchors, dark to bright.
const BAND_PALETTE: [RGBColor; 8] = [
    RGBColor(68, 1, 84),
    RGBColor(70, 50, 126),
    RGBColor(54, 92, 141),
    RGBColor(39, 127, 142),
    RGBColor(31, 161, 135),
    RGBColor(74, 193, 109),
    RGBColor(160, 218, 57),
    RGBColor(253, 231, 37),
];

// Warm ramp for the scatter overlay: early frames light, late frames dark,
// so time progression stays readable over the viridis contour.
const SCATTER_RAMP_START: RGBColor = RGBColor(252, 197, 134);
const SCATTER_RAMP_END: RGBColor = RGBColor(150, 10, 30);
const COLORBAR_WIDTH_PX: u32 = 90;

fn band_index(value: f64, min: f64, max: f64, levels: usize) -> usize {
    if max <= min || !value.is_finite() {
        return 0;
    }
    let t = (value - min) / (max - min);
    ((t * levels as f64) as usize).min(levels - 1)
}

fn scatter_color(frame: usize, total: usize) -> RGBColor {
    if total <= 1 {
        return SCATTER_RAMP_END;
    }
    let t = frame as f64 / (total - 1) as f64;
    let lerp = |a: u8, b: u8| (f64::from(a) + t * (f64::from(b) - f64::from(a))).round() as u8;
    RGBColor(
        lerp(SCATTER_RAMP_START.0, SCATTER_RAMP_END.0),
        lerp(SCATTER_RAMP_START.1, SCATTER_RAMP_END.1),
        lerp(SCATTER_RAMP_START.2, SCATTER_RAMP_END.2),
    )
}

fn band_color(index: usize, levels: usize) -> RGBColor {
    if levels <= 1 {
        return BAND_PALETTE[0];
    }
    let t = index as f64 / (levels - 1) as f64;
    let slot = (t * (BAND_PALETTE.len() - 1) as f64).round() as usize;
    BAND_PALETTE[slot.min(BAND_PALETTE.len() - 1)]
}

/// A plotters-backed [`PlotCanvas`] that renders to a bitmap file.
///
/// Draw calls are recorded; [`ChartCanvas::save`] performs the actual
/// rendering in one pass so the canvas can be handed around without
/// dragging backend lifetimes through the workflow.
#[derive(Debug, Clone)]
pub struct ChartCanvas {
    bounds: PlotBounds,
    contour: Option<(ScalarField, usize)>,
    colorbar: Option<(f64, f64, usize)>,
    frames: Vec<Vec<(f64, f64)>>,
}

impl ChartCanvas {
    pub fn new(bounds: PlotBounds) -> Self {
        Self {
            bounds,
            contour: None,
            colorbar: None,
            frames: Vec::new(),
        }
    }

    /// Returns the number of scatter frames recorded so far.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Renders everything recorded so far into a bitmap at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PlotError::Empty`] if nothing was drawn, or
    /// [`PlotError::Render`] if the backend fails (unwritable path,
    /// degenerate dimensions).
    pub fn save(&self, path: &Path, dimensions: (u32, u32)) -> Result<(), PlotError> {
        if self.contour.is_none() && self.frames.is_empty() {
            return Err(PlotError::Empty);
        }

        let root = BitMapBackend::new(path, dimensions).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let (main, legend) = if self.colorbar.is_some() {
            let (main, legend) =
                root.split_horizontally(dimensions.0.saturating_sub(COLORBAR_WIDTH_PX));
            (main, Some(legend))
        } else {
            (root.clone(), None)
        };

        let mut chart = ChartBuilder::on(&main)
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(
                self.bounds.x_min..self.bounds.x_max,
                self.bounds.y_min..self.bounds.y_max,
            )
            .map_err(render_error)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .draw()
            .map_err(render_error)?;

        if let Some((field, levels)) = &self.contour {
            let (min, max) = field.value_range();
            let levels = *levels;
            let mut cells = Vec::with_capacity((field.nx - 1) * (field.ny - 1));
            for j in 0..field.ny - 1 {
                for i in 0..field.nx - 1 {
                    let corner_mean = (field.value(i, j)
                        + field.value(i + 1, j)
                        + field.value(i, j + 1)
                        + field.value(i + 1, j + 1))
                        / 4.0;
                    let color = band_color(band_index(corner_mean, min, max, levels), levels);
                    cells.push(Rectangle::new(
                        [
                            (field.x_at(i), field.y_at(j)),
                            (field.x_at(i + 1), field.y_at(j + 1)),
                        ],
                        color.filled(),
                    ));
                }
            }
            chart.draw_series(cells).map_err(render_error)?;
        }

        let total_frames = self.frames.len();
        for (index, frame) in self.frames.iter().enumerate() {
            let color = scatter_color(index, total_frames);
            chart
                .draw_series(
                    frame
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 2, color.mix(0.8).filled())),
                )
                .map_err(render_error)?;
        }

        if let (Some((min, max, levels)), Some(legend)) = (self.colorbar, legend) {
            draw_colorbar_legend(&legend, min, max, levels)?;
        }

        root.present().map_err(render_error)?;
        Ok(())
    }
}

fn draw_colorbar_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    min: f64,
    max: f64,
    levels: usize,
) -> Result<(), PlotError> {
    let span = if max > min { max - min } else { 1.0 };
    let mut bar = ChartBuilder::on(area)
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Right, 40)
        .build_cartesian_2d(0.0..1.0, min..min + span)
        .map_err(render_error)?;
    bar.configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(levels + 1)
        .draw()
        .map_err(render_error)?;

    let step = span / levels as f64;
    bar.draw_series((0..levels).map(|level| {
        let lo = min + level as f64 * step;
        Rectangle::new(
            [(0.0, lo), (1.0, lo + step)],
            band_color(level, levels).filled(),
        )
    }))
    .map_err(render_error)?;
    Ok(())
}

fn render_error(err: impl std::fmt::Display) -> PlotError {
    PlotError::Render(err.to_string())
}

impl PlotCanvas for ChartCanvas {
    fn draw_filled_contour(&mut self, field: &ScalarField, levels: usize) {
        self.contour = Some((field.clone(), levels.max(1)));
    }

    fn draw_colorbar(&mut self, min: f64, max: f64, levels: usize) {
        self.colorbar = Some((min, max, levels.max(1)));
    }

    fn draw_scatter(&mut self, points: &[(f64, f64)]) {
        self.frames.push(points.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_index_partitions_the_value_range() {
        assert_eq!(band_index(0.0, 0.0, 8.0, 8), 0);
        assert_eq!(band_index(0.9, 0.0, 8.0, 8), 0);
        assert_eq!(band_index(1.0, 0.0, 8.0, 8), 1);
        assert_eq!(band_index(7.9, 0.0, 8.0, 8), 7);
        // The top of the range clamps into the last band.
        assert_eq!(band_index(8.0, 0.0, 8.0, 8), 7);
    }

    #[test]
    fn band_index_handles_degenerate_ranges() {
        assert_eq!(band_index(1.0, 1.0, 1.0, 8), 0);
        assert_eq!(band_index(f64::NAN, 0.0, 1.0, 8), 0);
    }

    #[test]
    fn band_color_spans_the_palette() {
        assert_eq!(band_color(0, 8), BAND_PALETTE[0]);
        assert_eq!(band_color(7, 8), BAND_PALETTE[7]);
        assert_eq!(band_color(0, 2), BAND_PALETTE[0]);
        assert_eq!(band_color(1, 2), BAND_PALETTE[7]);
    }

    #[test]
    fn scatter_ramp_distinguishes_early_and_late_frames() {
        assert_eq!(scatter_color(0, 10), SCATTER_RAMP_START);
        assert_eq!(scatter_color(9, 10), SCATTER_RAMP_END);
        assert_ne!(scatter_color(3, 10), scatter_color(6, 10));
        // A single frame gets the fully saturated end of the ramp.
        assert_eq!(scatter_color(0, 1), SCATTER_RAMP_END);
    }

    #[test]
    fn saving_an_empty_canvas_is_an_error() {
        let canvas = ChartCanvas::new(PlotBounds::default());
        let dir = tempfile::tempdir().unwrap();
        let result = canvas.save(&dir.path().join("empty.png"), (320, 240));
        assert!(matches!(result, Err(PlotError::Empty)));
    }

    #[test]
    fn contour_scatter_and_colorbar_render_to_a_file() {
        let bounds = PlotBounds::new(-1.0, 1.0, -1.0, 1.0);
        let field = ScalarField::from_fn(bounds, 16, 16, |x, y| x * x + y * y);
        let (min, max) = field.value_range();

        let mut canvas = ChartCanvas::new(bounds);
        canvas.draw_filled_contour(&field, 8);
        canvas.draw_colorbar(min, max, 8);
        canvas.draw_scatter(&[(0.0, 0.0), (0.5, -0.5)]);
        assert_eq!(canvas.frame_count(), 1);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landscape.png");
        canvas.save(&path, (640, 480)).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
