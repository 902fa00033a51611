//! # Workflows Module
//!
//! High-level entry points that tie the core models and the engine
//! together into complete procedures.
//!
//! ## Overview
//!
//! A workflow owns the whole arc of a run: landscape rendering, initial
//! placement, engine and integrator setup, the iteration loop, and result
//! collection. Callers supply the configuration, a dynamics engine, a
//! plot canvas, and a progress reporter; the workflow enforces the phase
//! ordering and returns the recorded trajectory.
//!
//! - **Sampling Workflow** ([`sample`]) - Langevin sampling of the
//!   ensemble on the double-well surface.

pub mod sample;
