//! # Core Models Module
//!
//! Fundamental data structures for representing the sampling ensemble.
//!
//! ## Overview
//!
//! The dynamics engine requires a chain/residue/particle topology even when
//! the particles are abstract, non-interacting samplers. These models keep
//! that bookkeeping honest without pretending there is chemistry involved:
//!
//! - [`ids`] - Stable slot-map identifier types for particles, residues, and chains
//! - [`element`] - Placeholder element bookkeeping mandated by the engine schema
//! - [`particle`] - Individual particle state: mass, position, velocity
//! - [`residue`] / [`chain`] - Placeholder grouping layers
//! - [`system`] - The complete [`system::ParticleSystem`] container
//!
//! ## Usage
//!
//! ```
//! use dwellmd::core::models::{particle::Particle, system::ParticleSystem};
//! use nalgebra::Point3;
//!
//! let mut system = ParticleSystem::new();
//! let chain_id = system.add_chain('A').unwrap();
//! let residue_id = system.add_residue(chain_id, 1, "SMP").unwrap();
//!
//! let particle = Particle::new("P1", residue_id, 1.0, Point3::origin());
//! system.add_particle_to_residue(residue_id, particle).unwrap();
//! ```

pub mod chain;
pub mod element;
pub mod ids;
pub mod particle;
pub mod residue;
pub mod system;
