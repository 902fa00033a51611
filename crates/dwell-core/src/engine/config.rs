use crate::core::plot::PlotBounds;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Parameter {name} must be positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Parameter {0} must be non-zero")]
    Zero(&'static str),

    #[error("Parameter {name} must be at least {min} (got {value})")]
    TooSmall {
        name: &'static str,
        min: usize,
        value: usize,
    },
}

/// Immutable configuration of a sampling run.
///
/// All quantities are in reduced units (k_B = 1). Built through
/// [`SimulationConfigBuilder`]; the notebook-style global constants of the
/// original workflow live here instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub n_particles: usize,
    pub particle_mass: f64,
    pub temperature: f64,
    pub friction: f64,
    pub timestep: f64,
    pub initial_radius: f64,
    pub iterations: usize,
    pub steps_per_iteration: usize,
    pub report_interval: usize,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub bounds: PlotBounds,
    pub resolution: usize,
}

impl PlotConfig {
    /// Checks that the grid resolution can actually carry a contour.
    ///
    /// The scalar field places nodes on the domain boundary, so fewer than
    /// two nodes per axis leaves no cell to fill.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < 2 {
            return Err(ConfigError::TooSmall {
                name: "resolution",
                min: 2,
                value: self.resolution,
            });
        }
        Ok(())
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            bounds: PlotBounds::default(),
            resolution: 100,
        }
    }
}

#[derive(Default)]
pub struct SimulationConfigBuilder {
    n_particles: Option<usize>,
    particle_mass: Option<f64>,
    temperature: Option<f64>,
    friction: Option<f64>,
    timestep: Option<f64>,
    initial_radius: Option<f64>,
    iterations: Option<usize>,
    steps_per_iteration: Option<usize>,
    report_interval: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_particles(mut self, n: usize) -> Self {
        self.n_particles = Some(n);
        self
    }
    pub fn particle_mass(mut self, mass: f64) -> Self {
        self.particle_mass = Some(mass);
        self
    }
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
    pub fn friction(mut self, friction: f64) -> Self {
        self.friction = Some(friction);
        self
    }
    pub fn timestep(mut self, timestep: f64) -> Self {
        self.timestep = Some(timestep);
        self
    }
    pub fn initial_radius(mut self, radius: f64) -> Self {
        self.initial_radius = Some(radius);
        self
    }
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = Some(iterations);
        self
    }
    pub fn steps_per_iteration(mut self, steps: usize) -> Self {
        self.steps_per_iteration = Some(steps);
        self
    }
    pub fn report_interval(mut self, interval: usize) -> Self {
        self.report_interval = Some(interval);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        let config = SimulationConfig {
            n_particles: self
                .n_particles
                .ok_or(ConfigError::MissingParameter("n_particles"))?,
            particle_mass: self
                .particle_mass
                .ok_or(ConfigError::MissingParameter("particle_mass"))?,
            temperature: self
                .temperature
                .ok_or(ConfigError::MissingParameter("temperature"))?,
            friction: self
                .friction
                .ok_or(ConfigError::MissingParameter("friction"))?,
            timestep: self
                .timestep
                .ok_or(ConfigError::MissingParameter("timestep"))?,
            initial_radius: self
                .initial_radius
                .ok_or(ConfigError::MissingParameter("initial_radius"))?,
            iterations: self
                .iterations
                .ok_or(ConfigError::MissingParameter("iterations"))?,
            steps_per_iteration: self
                .steps_per_iteration
                .ok_or(ConfigError::MissingParameter("steps_per_iteration"))?,
            report_interval: self
                .report_interval
                .ok_or(ConfigError::MissingParameter("report_interval"))?,
            seed: self.seed,
        };

        require_positive("particle_mass", config.particle_mass)?;
        require_positive("friction", config.friction)?;
        require_positive("timestep", config.timestep)?;
        require_positive("initial_radius", config.initial_radius)?;
        if config.temperature < 0.0 {
            return Err(ConfigError::NotPositive {
                name: "temperature",
                value: config.temperature,
            });
        }
        if config.n_particles == 0 {
            return Err(ConfigError::Zero("n_particles"));
        }
        if config.steps_per_iteration == 0 {
            return Err(ConfigError::Zero("steps_per_iteration"));
        }
        if config.report_interval == 0 {
            return Err(ConfigError::Zero("report_interval"));
        }

        Ok(config)
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::new()
            .n_particles(16)
            .particle_mass(1.0)
            .temperature(0.75)
            .friction(10.0)
            .timestep(0.005)
            .initial_radius(1.0)
            .iterations(100)
            .steps_per_iteration(50)
            .report_interval(10)
    }

    #[test]
    fn complete_builder_produces_a_config() {
        let config = complete_builder().seed(Some(42)).build().unwrap();
        assert_eq!(config.n_particles, 16);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn missing_parameter_is_reported_by_name() {
        let result = SimulationConfigBuilder::new().n_particles(4).build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::MissingParameter("particle_mass")
        );
    }

    #[test]
    fn non_positive_scalars_are_rejected() {
        let result = complete_builder().timestep(0.0).build();
        assert_eq!(
            result.unwrap_err(),
            ConfigError::NotPositive {
                name: "timestep",
                value: 0.0
            }
        );
    }

    #[test]
    fn negative_temperature_is_rejected_but_zero_is_allowed() {
        assert!(complete_builder().temperature(0.0).build().is_ok());
        assert!(complete_builder().temperature(-1.0).build().is_err());
    }

    #[test]
    fn zero_counts_are_rejected_except_iterations() {
        assert_eq!(
            complete_builder().n_particles(0).build().unwrap_err(),
            ConfigError::Zero("n_particles")
        );
        assert_eq!(
            complete_builder().steps_per_iteration(0).build().unwrap_err(),
            ConfigError::Zero("steps_per_iteration")
        );
        // A zero-iteration run is legal and must record nothing.
        assert!(complete_builder().iterations(0).build().is_ok());
    }

    #[test]
    fn grid_resolution_below_two_is_rejected() {
        let plot = PlotConfig {
            resolution: 1,
            ..PlotConfig::default()
        };
        assert_eq!(
            plot.validate().unwrap_err(),
            ConfigError::TooSmall {
                name: "resolution",
                min: 2,
                value: 1
            }
        );
        assert!(PlotConfig::default().validate().is_ok());
    }
}
