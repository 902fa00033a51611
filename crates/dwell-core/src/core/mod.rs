//! # Core Module
//!
//! Stateless foundations of the sampling library.
//!
//! ## Overview
//!
//! Everything here is a pure data model or a pure function of its inputs:
//!
//! - **Ensemble representation** ([`models`]) - Particles, placeholder
//!   topology, and the [`models::system::ParticleSystem`] container
//! - **Potential surface** ([`potential`]) - The analytic double-well
//!   energy function, its engine expression syntax, and symbolic
//!   differentiation
//! - **Visualization** ([`plot`]) - Scalar fields, the plotting capability
//!   trait, and the plotters-backed chart canvas
//!
//! Stateful orchestration lives in [`crate::engine`]; complete procedures
//! live in [`crate::workflows`].

pub mod models;
pub mod plot;
pub mod potential;
