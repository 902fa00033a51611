use super::ScalarField;

/// Defines the drawing capability consumed by the sampling workflow.
///
/// Implementors accumulate drawing state; when and how pixels are produced
/// is a backend concern. The workflow only ever mutates the surface, so
/// every operation is infallible here and rendering errors surface at
/// save time on the concrete backend.
pub trait PlotCanvas {
    /// Draws `levels` filled contour bands of the scalar field.
    fn draw_filled_contour(&mut self, field: &ScalarField, levels: usize);

    /// Attaches a color-scale legend spanning `[min, max]` in `levels` bands.
    fn draw_colorbar(&mut self, min: f64, max: f64, levels: usize);

    /// Overlays one frame of scatter points in xy coordinates.
    fn draw_scatter(&mut self, points: &[(f64, f64)]);
}
