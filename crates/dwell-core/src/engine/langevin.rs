use super::dynamics::DynamicsEngine;
use super::error::EngineError;
use crate::core::potential::expression::{Coordinate, Expr};
use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

// Reduced units throughout.
const BOLTZMANN: f64 = 1.0;

struct ForceField {
    energy: Expr,
    gradient: [Expr; 3],
}

impl ForceField {
    fn from_expression(expression: &str) -> Result<Self, EngineError> {
        let energy = Expr::parse(expression)?;
        let gradient = [
            energy.differentiate(Coordinate::X)?,
            energy.differentiate(Coordinate::Y)?,
            energy.differentiate(Coordinate::Z)?,
        ];
        Ok(Self { energy, gradient })
    }

    fn force_at(&self, p: &Point3<f64>) -> Vector3<f64> {
        Vector3::new(
            -self.gradient[0].eval(p.x, p.y, p.z),
            -self.gradient[1].eval(p.x, p.y, p.z),
            -self.gradient[2].eval(p.x, p.y, p.z),
        )
    }
}

/// Reference Langevin engine behind the [`DynamicsEngine`] capability.
///
/// Parses the attached potential expression once, differentiates it
/// symbolically into a gradient, and advances each particle independently
/// with the Euler-Maruyama discretization of the Langevin equation:
///
/// ```text
/// v += (F/m - gamma*v)*dt + sqrt(2*gamma*kT/m)*sqrt(dt)*xi
/// x += v*dt
/// ```
///
/// with xi drawn per-component from the standard normal distribution.
/// Particles never interact, so cost is linear in the ensemble size.
pub struct LangevinIntegrator {
    masses: Vec<f64>,
    positions: Vec<Point3<f64>>,
    velocities: Vec<Vector3<f64>>,
    force: Option<ForceField>,
    temperature: f64,
    friction: f64,
    timestep: f64,
    rng: StdRng,
}

impl LangevinIntegrator {
    /// Creates an engine with no particles and a seeded RNG.
    ///
    /// Thermostat parameters default to zero and must be set through
    /// [`DynamicsEngine::configure_integrator`] before stepping does
    /// anything meaningful.
    pub fn new(seed: u64) -> Self {
        Self {
            masses: Vec::new(),
            positions: Vec::new(),
            velocities: Vec::new(),
            force: None,
            temperature: 0.0,
            friction: 0.0,
            timestep: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Total potential energy of the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MissingForce`] if no force is attached.
    pub fn potential_energy(&self) -> Result<f64, EngineError> {
        let force = self.force.as_ref().ok_or(EngineError::MissingForce)?;
        Ok(self
            .positions
            .iter()
            .map(|p| force.energy.eval(p.x, p.y, p.z))
            .sum())
    }

    /// Total kinetic energy of the current velocities.
    pub fn kinetic_energy(&self) -> f64 {
        self.velocities
            .iter()
            .zip(&self.masses)
            .map(|(v, &m)| 0.5 * m * v.dot(v))
            .sum()
    }
}

impl DynamicsEngine for LangevinIntegrator {
    fn register_particle(&mut self, mass: f64) -> usize {
        self.masses.push(mass);
        self.positions.push(Point3::origin());
        self.velocities.push(Vector3::zeros());
        self.masses.len() - 1
    }

    fn attach_force(&mut self, expression: &str) -> Result<(), EngineError> {
        let field = ForceField::from_expression(expression)?;
        debug!(expression, "attached external force");
        self.force = Some(field);
        Ok(())
    }

    fn set_positions(&mut self, positions: &[Point3<f64>]) -> Result<(), EngineError> {
        if positions.len() != self.masses.len() {
            return Err(EngineError::PositionCountMismatch {
                expected: self.masses.len(),
                got: positions.len(),
            });
        }
        self.positions.copy_from_slice(positions);
        Ok(())
    }

    fn configure_integrator(&mut self, temperature: f64, friction: f64, timestep: f64) {
        self.temperature = temperature;
        self.friction = friction;
        self.timestep = timestep;
    }

    fn initialize_velocities(&mut self, temperature: f64) {
        for (velocity, &mass) in self.velocities.iter_mut().zip(&self.masses) {
            let sigma = (BOLTZMANN * temperature / mass).sqrt();
            *velocity = Vector3::new(
                sigma * self.rng.sample::<f64, _>(StandardNormal),
                sigma * self.rng.sample::<f64, _>(StandardNormal),
                sigma * self.rng.sample::<f64, _>(StandardNormal),
            );
        }
    }

    fn positions(&self) -> Vec<Point3<f64>> {
        self.positions.clone()
    }

    fn step(&mut self, n_steps: usize) -> Result<(), EngineError> {
        let Self {
            masses,
            positions,
            velocities,
            force,
            temperature,
            friction,
            timestep,
            rng,
        } = self;
        let force = force.as_ref().ok_or(EngineError::MissingForce)?;

        let dt = *timestep;
        let sqrt_dt = dt.sqrt();
        let gamma = *friction;
        let kt = BOLTZMANN * *temperature;

        for _ in 0..n_steps {
            for i in 0..masses.len() {
                let inv_m = 1.0 / masses[i];
                let deterministic = force.force_at(&positions[i]) * inv_m - velocities[i] * gamma;
                let noise_scale = (2.0 * gamma * kt * inv_m).sqrt();
                let xi = Vector3::new(
                    rng.sample::<f64, _>(StandardNormal),
                    rng.sample::<f64, _>(StandardNormal),
                    rng.sample::<f64, _>(StandardNormal),
                );

                velocities[i] += deterministic * dt + xi * (noise_scale * sqrt_dt);
                positions[i] += velocities[i] * dt;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::potential::surface::PotentialSurface;

    fn harmonic_engine(seed: u64) -> LangevinIntegrator {
        let mut engine = LangevinIntegrator::new(seed);
        engine.register_particle(1.0);
        engine.attach_force("x^2 + y^2 + z^2").unwrap();
        engine
    }

    #[test]
    fn stepping_without_a_force_is_fatal() {
        let mut engine = LangevinIntegrator::new(0);
        engine.register_particle(1.0);
        assert!(matches!(engine.step(1), Err(EngineError::MissingForce)));
    }

    #[test]
    fn malformed_expressions_are_rejected_on_attach() {
        let mut engine = LangevinIntegrator::new(0);
        assert!(matches!(
            engine.attach_force("exp("),
            Err(EngineError::Expression { .. })
        ));
    }

    #[test]
    fn position_buffer_length_is_checked() {
        let mut engine = LangevinIntegrator::new(0);
        engine.register_particle(1.0);
        engine.register_particle(1.0);
        let result = engine.set_positions(&[Point3::origin()]);
        assert!(matches!(
            result,
            Err(EngineError::PositionCountMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn zero_temperature_velocities_are_zero() {
        let mut engine = harmonic_engine(3);
        engine.initialize_velocities(0.0);
        assert_eq!(engine.kinetic_energy(), 0.0);
    }

    #[test]
    fn initialized_velocities_carry_kinetic_energy_at_finite_temperature() {
        let mut engine = LangevinIntegrator::new(11);
        for _ in 0..256 {
            engine.register_particle(2.0);
        }
        engine.initialize_velocities(1.5);
        // Equipartition: <KE> = (3/2) * N * kT, loose statistical check.
        let expected = 1.5 * 256.0 * 1.5;
        let ke = engine.kinetic_energy();
        assert!(ke > 0.5 * expected && ke < 1.5 * expected, "KE = {ke}");
    }

    #[test]
    fn deterministic_dynamics_relax_toward_the_harmonic_minimum() {
        // T = 0 removes the noise term, so the overdamped particle slides
        // downhill and stays there.
        let mut engine = harmonic_engine(5);
        engine.set_positions(&[Point3::new(1.0, -0.5, 0.25)]).unwrap();
        engine.configure_integrator(0.0, 5.0, 0.01);
        engine.step(5000).unwrap();

        let p = engine.positions()[0];
        assert!(p.coords.norm() < 1e-3, "did not relax: {p:?}");
    }

    #[test]
    fn identical_seeds_reproduce_identical_trajectories() {
        let mut a = harmonic_engine(42);
        let mut b = harmonic_engine(42);
        for engine in [&mut a, &mut b] {
            engine.set_positions(&[Point3::new(0.5, 0.5, 0.0)]).unwrap();
            engine.configure_integrator(1.0, 10.0, 0.005);
            engine.initialize_velocities(1.0);
            engine.step(200).unwrap();
        }
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn restraint_confines_the_third_coordinate() {
        let surface = PotentialSurface::default();
        let mut engine = LangevinIntegrator::new(17);
        engine.register_particle(1.0);
        engine.attach_force(&surface.to_engine_expression()).unwrap();
        engine.set_positions(&[Point3::new(1.0, 0.0, 0.0)]).unwrap();
        engine.configure_integrator(0.5, 20.0, 0.001);
        engine.initialize_velocities(0.5);

        for _ in 0..50 {
            engine.step(20).unwrap();
            let z = engine.positions()[0].z;
            assert!(z.abs() < 0.2, "restraint failed to pin z: {z}");
        }
    }

    #[test]
    fn potential_energy_sums_over_the_ensemble() {
        let mut engine = LangevinIntegrator::new(0);
        engine.register_particle(1.0);
        engine.register_particle(1.0);
        engine.attach_force("x^2 + y^2 + z^2").unwrap();
        engine
            .set_positions(&[Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 2.0, 0.0)])
            .unwrap();
        assert!((engine.potential_energy().unwrap() - 5.0).abs() < 1e-12);
    }
}
