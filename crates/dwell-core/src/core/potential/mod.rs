//! # Potential Module
//!
//! The analytic potential-energy surface and the expression syntax that
//! carries it to the dynamics engine.
//!
//! ## Overview
//!
//! One mathematical definition serves two consumers: the integrator, which
//! receives the surface as a force-expression string, and the plotting
//! layer, which evaluates it over a grid. [`surface::PotentialSurface`]
//! owns the analytic parameters and derives both representations from
//! them, so they agree by construction. [`expression`] implements the
//! engine's expression syntax (parsing, evaluation, symbolic
//! differentiation for force extraction).

pub mod expression;
pub mod surface;
