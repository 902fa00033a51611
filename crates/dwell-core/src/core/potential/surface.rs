use crate::core::plot::canvas::PlotCanvas;
use crate::core::plot::{CONTOUR_LEVELS, PlotBounds, ScalarField};

/// The analytic double-well potential-energy surface.
///
/// One struct owns every constant of
///
/// ```text
/// V(x,y) = -a*exp(-(x-x0)^2 - y^2) - a*exp(-(x+x0)^2 - y^2)
///        + b*exp(-c*(x^2 + y^2 + d*(x+y)^2))
///        + q*(x^4 + y^4) + s*exp(u + w*y)
/// ```
///
/// Both the numeric evaluation path ([`PotentialSurface::evaluate`]) and
/// the engine force expression ([`PotentialSurface::to_engine_expression`])
/// are derived from these fields, so the two representations cannot drift
/// apart. The engine expression additionally carries a harmonic restraint
/// `k*z^2` that confines the engine's mandatory third dimension; it has no
/// physical meaning and vanishes identically at z = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PotentialSurface {
    /// Depth prefactor of the two Gaussian wells (a).
    pub well_depth: f64,
    /// Offset of each well center from the origin along x (x0).
    pub well_offset: f64,
    /// Height prefactor of the central Gaussian ridge (b).
    pub ridge_height: f64,
    /// Width coefficient of the ridge exponent (c).
    pub ridge_width: f64,
    /// Coupling coefficient of the diagonal (x+y)^2 ridge term (d).
    pub diagonal_coupling: f64,
    /// Prefactor of the quartic confinement term (q).
    pub quartic_confinement: f64,
    /// Prefactor of the exponential wall along -y (s).
    pub wall_scale: f64,
    /// Constant term in the wall exponent (u).
    pub wall_offset: f64,
    /// Linear-in-y coefficient in the wall exponent (w).
    pub wall_slope: f64,
    /// Stiffness of the z-restraint in the engine expression (k).
    pub restraint_stiffness: f64,
}

impl Default for PotentialSurface {
    fn default() -> Self {
        Self {
            well_depth: 3.0,
            well_offset: 1.0,
            ridge_height: 15.0,
            ridge_width: 0.32,
            diagonal_coupling: 20.0,
            quartic_confinement: 0.0512,
            wall_scale: 0.4,
            wall_offset: -2.0,
            wall_slope: -4.0,
            restraint_stiffness: 1000.0,
        }
    }
}

impl PotentialSurface {
    /// Evaluates V(x, y) pointwise.
    ///
    /// Finite and real everywhere on the domain of interest
    /// (x in [-3, 3], y in [-1.2, 3]); exponentials of large negative
    /// arguments underflow to zero silently, which is acceptable.
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        let left_well = -self.well_depth * (-(x - self.well_offset).powi(2) - y * y).exp();
        let right_well = -self.well_depth * (-(x + self.well_offset).powi(2) - y * y).exp();
        let ridge = self.ridge_height
            * (-self.ridge_width * (x * x + y * y + self.diagonal_coupling * (x + y).powi(2)))
                .exp();
        let confinement = self.quartic_confinement * (x.powi(4) + y.powi(4));
        let wall = self.wall_scale * (self.wall_offset + self.wall_slope * y).exp();
        left_well + right_well + ridge + confinement + wall
    }

    /// Evaluates V elementwise over a regular grid.
    ///
    /// `resolution` is the number of grid nodes along each axis.
    pub fn evaluate_grid(&self, bounds: PlotBounds, resolution: usize) -> ScalarField {
        ScalarField::from_fn(bounds, resolution, resolution, |x, y| self.evaluate(x, y))
    }

    /// Formats the surface as a force expression for the dynamics engine.
    ///
    /// The string is the exact analytic form of [`PotentialSurface::evaluate`]
    /// plus the `k*z^2` restraint, in the engine's caret-power syntax. The
    /// terms are spelled with explicit separators so the output stays
    /// parseable for any sign of the parameters.
    pub fn to_engine_expression(&self) -> String {
        format!(
            "-{a}*exp(-(x-{x0})^2 - y^2) - {a}*exp(-(x+{x0})^2 - y^2) \
             + {b}*exp(-{c}*(x^2 + y^2 + {d}*(x+y)^2)) \
             + {q}*(x^4 + y^4) + {s}*exp({u} + {w}*y) + {k}*z^2",
            a = self.well_depth,
            x0 = self.well_offset,
            b = self.ridge_height,
            c = self.ridge_width,
            d = self.diagonal_coupling,
            q = self.quartic_confinement,
            s = self.wall_scale,
            u = self.wall_offset,
            w = self.wall_slope,
            k = self.restraint_stiffness,
        )
    }

    /// Draws the surface onto a canvas as filled contour bands plus a
    /// colorbar legend.
    ///
    /// Side effect only: the canvas accumulates the landscape, and the
    /// sampling workflow scatters trajectory frames on top of it.
    pub fn render(&self, canvas: &mut impl PlotCanvas, bounds: PlotBounds, resolution: usize) {
        let field = self.evaluate_grid(bounds, resolution);
        let (min, max) = field.value_range();
        canvas.draw_filled_contour(&field, CONTOUR_LEVELS);
        canvas.draw_colorbar(min, max, CONTOUR_LEVELS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::potential::expression::Expr;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn regression_value_at_the_right_well() {
        let surface = PotentialSurface::default();
        // Term by term at (1, 0): the ridge exponent is
        // -0.32*(1 + 0 + 20*1) = -6.72.
        let expected = -3.0
            - 3.0 * (-4.0f64).exp()
            + 15.0 * (-6.72f64).exp()
            + 0.0512
            + 0.4 * (-2.0f64).exp();
        assert!((surface.evaluate(1.0, 0.0) - expected).abs() < 1e-12);
        assert!((surface.evaluate(1.0, 0.0) - (-2.9315148)).abs() < 1e-5);
    }

    #[test]
    fn surface_is_finite_over_the_domain_of_interest() {
        let surface = PotentialSurface::default();
        let field = surface.evaluate_grid(PlotBounds::default(), 61);
        for j in 0..field.ny {
            for i in 0..field.nx {
                assert!(
                    field.value(i, j).is_finite(),
                    "non-finite V at ({}, {})",
                    field.x_at(i),
                    field.y_at(j)
                );
            }
        }
    }

    #[test]
    fn surface_is_symmetric_in_x_along_the_well_axis() {
        let surface = PotentialSurface::default();
        // At y = -x the diagonal ridge term is constant in the swap
        // x -> -x only at y = 0; check the simple axis.
        assert!((surface.evaluate(1.0, 0.0) - surface.evaluate(-1.0, 0.0)).abs() < TOLERANCE);
    }

    #[test]
    fn wells_are_deeper_than_the_saddle_region() {
        let surface = PotentialSurface::default();
        let well = surface.evaluate(1.0, 0.0);
        let origin = surface.evaluate(0.0, 0.0);
        assert!(well < origin);
    }

    #[test]
    fn engine_expression_agrees_with_evaluate_at_z_zero() {
        let surface = PotentialSurface::default();
        let expr = Expr::parse(&surface.to_engine_expression()).unwrap();
        for i in 0..=24 {
            for j in 0..=24 {
                let x = -3.0 + 6.0 * i as f64 / 24.0;
                let y = -1.2 + 4.2 * j as f64 / 24.0;
                let direct = surface.evaluate(x, y);
                let via_expression = expr.eval(x, y, 0.0);
                assert!(
                    (direct - via_expression).abs() < TOLERANCE,
                    "mismatch at ({x}, {y}): {direct} vs {via_expression}"
                );
            }
        }
    }

    #[test]
    fn restraint_term_is_harmonic_in_z() {
        let surface = PotentialSurface::default();
        let expr = Expr::parse(&surface.to_engine_expression()).unwrap();
        let at_plane = expr.eval(0.5, 0.5, 0.0);
        let off_plane = expr.eval(0.5, 0.5, 0.1);
        let expected_penalty = surface.restraint_stiffness * 0.1 * 0.1;
        assert!((off_plane - at_plane - expected_penalty).abs() < TOLERANCE);
    }

    #[test]
    fn expression_stays_parseable_for_flipped_parameter_signs() {
        let surface = PotentialSurface {
            well_offset: -1.0,
            wall_slope: 4.0,
            ..PotentialSurface::default()
        };
        let expr = Expr::parse(&surface.to_engine_expression()).unwrap();
        let x = 0.7;
        let y = -0.3;
        assert!((expr.eval(x, y, 0.0) - surface.evaluate(x, y)).abs() < TOLERANCE);
    }
}
