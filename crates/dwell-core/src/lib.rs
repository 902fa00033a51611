//! # Dwell Core Library
//!
//! A library for Langevin molecular-dynamics sampling of independent,
//! non-interacting particles on an analytic 2D double-well potential-energy
//! surface.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a
//! clear separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models
//!   (`ParticleSystem`), the analytic potential surface with its engine
//!   expression syntax (`potential`), and visualization primitives (`plot`).
//!
//! - **[`engine`]: The Logic Core.** This stateful layer holds run
//!   configuration, the `DynamicsEngine` capability trait with its reference
//!   Langevin implementation, initial placement, the driver phase machine,
//!   and progress reporting.
//!
//! - **[`workflows`]: The Public API.** This is the highest-level,
//!   user-facing layer. It ties `engine` and `core` together to execute a
//!   complete sampling run: landscape render, ensemble placement, engine
//!   wiring, and the integration loop.

pub mod core;
pub mod engine;
pub mod workflows;
