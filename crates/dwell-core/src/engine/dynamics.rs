use super::error::EngineError;
use nalgebra::Point3;

/// Defines the integration capability consumed by the sampling driver.
///
/// Any engine that can hold per-particle masses, accept a force as a
/// scalar expression string over the named coordinates `x`/`y`/`z`, and
/// advance a thermostatted trajectory is interchangeable behind this
/// trait. The driver registers particles in a fixed order and indexes
/// engine state by that order.
pub trait DynamicsEngine {
    /// Registers one particle with the given mass.
    ///
    /// # Return
    ///
    /// Returns the particle's engine index (registration order).
    fn register_particle(&mut self, mass: f64) -> usize;

    /// Attaches the external force, applied identically to every particle,
    /// defined by an expression string for the potential energy.
    ///
    /// # Errors
    ///
    /// Returns an error if the expression cannot be parsed or cannot be
    /// differentiated into a force.
    fn attach_force(&mut self, expression: &str) -> Result<(), EngineError>;

    /// Overwrites all particle positions, in registration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer length does not match the number of
    /// registered particles.
    fn set_positions(&mut self, positions: &[Point3<f64>]) -> Result<(), EngineError>;

    /// Configures the stochastic integrator's thermostat temperature,
    /// friction coefficient, and timestep.
    fn configure_integrator(&mut self, temperature: f64, friction: f64, timestep: f64);

    /// Draws fresh velocities from the Maxwell-Boltzmann distribution at
    /// the given temperature.
    fn initialize_velocities(&mut self, temperature: f64);

    /// Queries the current positions, in registration order.
    fn positions(&self) -> Vec<Point3<f64>>;

    /// Advances the trajectory by `n_steps` integrator steps.
    ///
    /// # Errors
    ///
    /// Returns an error if no force is attached.
    fn step(&mut self, n_steps: usize) -> Result<(), EngineError>;
}

impl<E: DynamicsEngine + ?Sized> DynamicsEngine for &mut E {
    fn register_particle(&mut self, mass: f64) -> usize {
        (**self).register_particle(mass)
    }

    fn attach_force(&mut self, expression: &str) -> Result<(), EngineError> {
        (**self).attach_force(expression)
    }

    fn set_positions(&mut self, positions: &[Point3<f64>]) -> Result<(), EngineError> {
        (**self).set_positions(positions)
    }

    fn configure_integrator(&mut self, temperature: f64, friction: f64, timestep: f64) {
        (**self).configure_integrator(temperature, friction, timestep)
    }

    fn initialize_velocities(&mut self, temperature: f64) {
        (**self).initialize_velocities(temperature)
    }

    fn positions(&self) -> Vec<Point3<f64>> {
        (**self).positions()
    }

    fn step(&mut self, n_steps: usize) -> Result<(), EngineError> {
        (**self).step(n_steps)
    }
}
