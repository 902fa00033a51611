use crate::cli::{RunArgs, SurfaceArgs};
use crate::error::Result;
use dwellmd::core::plot::PlotBounds;
use dwellmd::engine::config::{PlotConfig, SimulationConfig, SimulationConfigBuilder};
use serde::Deserialize;
use std::path::Path;

/// Built-in defaults filling every parameter neither the config file nor
/// the command line provides.
mod defaults {
    pub const N_PARTICLES: usize = 100;
    pub const PARTICLE_MASS: f64 = 1.0;
    pub const TEMPERATURE: f64 = 1.0;
    pub const FRICTION: f64 = 10.0;
    pub const TIMESTEP: f64 = 0.005;
    pub const INITIAL_RADIUS: f64 = 1.0;
    pub const ITERATIONS: usize = 100;
    pub const STEPS_PER_ITERATION: usize = 100;
    pub const REPORT_INTERVAL: usize = 10;
    pub const RESOLUTION: usize = 100;
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub simulation: Option<SimulationSection>,
    pub plot: Option<PlotSection>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    pub n_particles: Option<usize>,
    pub particle_mass: Option<f64>,
    pub temperature: Option<f64>,
    pub friction: Option<f64>,
    pub timestep: Option<f64>,
    pub initial_radius: Option<f64>,
    pub iterations: Option<usize>,
    pub steps_per_iteration: Option<usize>,
    pub report_interval: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlotSection {
    pub bounds: Option<PlotBounds>,
    pub resolution: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Command-line overrides for the simulation section; each `Some` wins
/// over the config file, which wins over the built-in defaults.
#[derive(Debug, Default, Clone)]
pub struct SimulationOverrides {
    pub n_particles: Option<usize>,
    pub temperature: Option<f64>,
    pub friction: Option<f64>,
    pub timestep: Option<f64>,
    pub iterations: Option<usize>,
    pub seed: Option<u64>,
}

impl From<&RunArgs> for SimulationOverrides {
    fn from(args: &RunArgs) -> Self {
        Self {
            n_particles: args.particles,
            temperature: args.temperature,
            friction: args.friction,
            timestep: args.timestep,
            iterations: args.iterations,
            seed: args.seed,
        }
    }
}

pub fn resolve_simulation(
    file: &FileConfig,
    overrides: &SimulationOverrides,
) -> Result<SimulationConfig> {
    let section = file.simulation.clone().unwrap_or_default();
    let config = SimulationConfigBuilder::new()
        .n_particles(
            overrides
                .n_particles
                .or(section.n_particles)
                .unwrap_or(defaults::N_PARTICLES),
        )
        .particle_mass(section.particle_mass.unwrap_or(defaults::PARTICLE_MASS))
        .temperature(
            overrides
                .temperature
                .or(section.temperature)
                .unwrap_or(defaults::TEMPERATURE),
        )
        .friction(
            overrides
                .friction
                .or(section.friction)
                .unwrap_or(defaults::FRICTION),
        )
        .timestep(
            overrides
                .timestep
                .or(section.timestep)
                .unwrap_or(defaults::TIMESTEP),
        )
        .initial_radius(section.initial_radius.unwrap_or(defaults::INITIAL_RADIUS))
        .iterations(
            overrides
                .iterations
                .or(section.iterations)
                .unwrap_or(defaults::ITERATIONS),
        )
        .steps_per_iteration(
            section
                .steps_per_iteration
                .unwrap_or(defaults::STEPS_PER_ITERATION),
        )
        .report_interval(section.report_interval.unwrap_or(defaults::REPORT_INTERVAL))
        .seed(overrides.seed.or(section.seed))
        .build()?;
    Ok(config)
}

pub fn resolve_plot(file: &FileConfig, resolution_override: Option<usize>) -> Result<PlotConfig> {
    let section = file.plot.clone().unwrap_or_default();
    let plot = PlotConfig {
        bounds: section.bounds.unwrap_or_default(),
        resolution: resolution_override
            .or(section.resolution)
            .unwrap_or(defaults::RESOLUTION),
    };
    plot.validate()?;
    Ok(plot)
}

pub fn resolve_surface_plot(file: &FileConfig, args: &SurfaceArgs) -> Result<PlotConfig> {
    resolve_plot(file, args.resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_TOML: &str = r#"
[simulation]
n_particles = 24
temperature = 0.6
seed = 1234

[plot]
resolution = 80
bounds = { x_min = -2.0, x_max = 2.0, y_min = -1.0, y_max = 2.0 }
"#;

    #[test]
    fn file_values_override_defaults() {
        let file: FileConfig = toml::from_str(SAMPLE_TOML).unwrap();
        let config = resolve_simulation(&file, &SimulationOverrides::default()).unwrap();
        assert_eq!(config.n_particles, 24);
        assert_eq!(config.temperature, 0.6);
        assert_eq!(config.seed, Some(1234));
        // Untouched parameters come from the built-in defaults.
        assert_eq!(config.friction, defaults::FRICTION);
        assert_eq!(config.iterations, defaults::ITERATIONS);
    }

    #[test]
    fn cli_overrides_beat_file_values() {
        let file: FileConfig = toml::from_str(SAMPLE_TOML).unwrap();
        let overrides = SimulationOverrides {
            n_particles: Some(8),
            temperature: Some(2.0),
            seed: Some(9),
            ..SimulationOverrides::default()
        };
        let config = resolve_simulation(&file, &overrides).unwrap();
        assert_eq!(config.n_particles, 8);
        assert_eq!(config.temperature, 2.0);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn plot_section_resolves_bounds_and_resolution() {
        let file: FileConfig = toml::from_str(SAMPLE_TOML).unwrap();
        let plot = resolve_plot(&file, None).unwrap();
        assert_eq!(plot.resolution, 80);
        assert_eq!(plot.bounds.x_min, -2.0);

        let plot = resolve_plot(&file, Some(200)).unwrap();
        assert_eq!(plot.resolution, 200);
    }

    #[test]
    fn degenerate_resolution_is_rejected_before_rendering() {
        let result = resolve_plot(&FileConfig::default(), Some(1));
        assert!(matches!(result, Err(crate::error::CliError::Config(_))));

        let file: FileConfig = toml::from_str("[plot]\nresolution = 0\n").unwrap();
        assert!(resolve_plot(&file, None).is_err());
    }

    #[test]
    fn empty_config_falls_back_to_defaults_everywhere() {
        let config =
            resolve_simulation(&FileConfig::default(), &SimulationOverrides::default()).unwrap();
        assert_eq!(config.n_particles, defaults::N_PARTICLES);
        assert_eq!(config.seed, None);

        let plot = resolve_plot(&FileConfig::default(), None).unwrap();
        assert_eq!(plot.resolution, defaults::RESOLUTION);
        assert_eq!(plot.bounds, PlotBounds::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: std::result::Result<FileConfig, _> =
            toml::from_str("[simulation]\nnparticles = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_surfaces_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileConfig::load(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(crate::error::CliError::Io(_))));
    }
}
