//! # Engine Module
//!
//! Stateful orchestration of a sampling run.
//!
//! ## Overview
//!
//! Everything that holds run state or touches randomness lives here:
//!
//! - **Configuration** ([`config`]) - The immutable run parameters and
//!   their builder
//! - **Integration capability** ([`dynamics`]) - The trait any dynamics
//!   engine must satisfy, and the reference [`langevin`] implementation
//! - **Initial placement** ([`utils`]) - Seeded placement of the ensemble
//!   on its starting circle
//! - **Run state** ([`state`]) - The driver phase machine and recorded
//!   frames
//! - **Progress** ([`progress`]) - Callback-based progress reporting
//! - **Errors** ([`error`]) - The engine error taxonomy; all failures are
//!   fatal, there are no retries

pub mod config;
pub mod dynamics;
pub mod error;
pub mod langevin;
pub mod progress;
pub mod state;
pub mod utils;
