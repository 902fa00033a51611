use crate::core::models::particle::Particle;
use crate::core::models::system::ParticleSystem;
use crate::core::plot::canvas::PlotCanvas;
use crate::core::potential::surface::PotentialSurface;
use crate::engine::config::{PlotConfig, SimulationConfig};
use crate::engine::dynamics::DynamicsEngine;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{DriverPhase, Frame, SamplingResult};
use crate::engine::utils::sampling::circle_positions;
use nalgebra::Point3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};

const CHAIN_ID: char = 'A';
const RESIDUE_NUMBER: isize = 1;
const RESIDUE_NAME: &str = "SMP";

/// Drives one sampling run through its phase machine.
///
/// Phases advance strictly
/// `Uninitialized -> PositionsReady -> SystemBuilt -> IntegratorReady ->
/// Running -> Done`; calling an operation out of order is a fatal
/// [`EngineError::Phase`]. The driver owns the engine for the duration of
/// the run and borrows the canvas it scatters onto.
pub struct SamplingDriver<'a, E: DynamicsEngine, C: PlotCanvas> {
    config: &'a SimulationConfig,
    engine: E,
    canvas: &'a mut C,
    reporter: &'a ProgressReporter<'a>,
    phase: DriverPhase,
    initial_positions: Vec<Point3<f64>>,
    system: Option<ParticleSystem>,
}

impl<'a, E: DynamicsEngine, C: PlotCanvas> SamplingDriver<'a, E, C> {
    pub fn new(
        config: &'a SimulationConfig,
        engine: E,
        canvas: &'a mut C,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            config,
            engine,
            canvas,
            reporter,
            phase: DriverPhase::Uninitialized,
            initial_positions: Vec::new(),
            system: None,
        }
    }

    /// Current phase of the driver.
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// Initial placement, available once positions are ready.
    pub fn initial_positions(&self) -> &[Point3<f64>] {
        &self.initial_positions
    }

    /// The placeholder topology, available once the system is built.
    pub fn system(&self) -> Option<&ParticleSystem> {
        self.system.as_ref()
    }

    fn expect_phase(&self, expected: DriverPhase) -> Result<(), EngineError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::Phase {
                expected,
                actual: self.phase,
            })
        }
    }

    /// Places the ensemble uniformly on the starting circle.
    pub fn initialize_positions(&mut self) -> Result<(), EngineError> {
        self.expect_phase(DriverPhase::Uninitialized)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.initial_positions =
            circle_positions(self.config.n_particles, self.config.initial_radius, &mut rng)?;

        info!(
            n = self.config.n_particles,
            radius = self.config.initial_radius,
            "placed ensemble on starting circle"
        );
        self.phase = DriverPhase::PositionsReady;
        Ok(())
    }

    /// Registers the ensemble with the engine and builds the placeholder
    /// topology.
    ///
    /// Every particle gets the configured mass; the surface is attached
    /// once as an external force applied identically to all of them.
    pub fn build_system(&mut self, surface: &PotentialSurface) -> Result<(), EngineError> {
        self.expect_phase(DriverPhase::PositionsReady)?;

        let mut system = ParticleSystem::new();
        let chain_id = system
            .add_chain(CHAIN_ID)
            .ok_or_else(|| EngineError::Topology("duplicate chain".to_string()))?;
        let residue_id = system
            .add_residue(chain_id, RESIDUE_NUMBER, RESIDUE_NAME)
            .ok_or_else(|| EngineError::Topology("duplicate residue".to_string()))?;

        for (i, position) in self.initial_positions.iter().enumerate() {
            self.engine.register_particle(self.config.particle_mass);
            let particle = Particle::new(
                &format!("P{}", i + 1),
                residue_id,
                self.config.particle_mass,
                *position,
            );
            system
                .add_particle_to_residue(residue_id, particle)
                .ok_or_else(|| EngineError::Topology("missing residue".to_string()))?;
        }

        self.engine.attach_force(&surface.to_engine_expression())?;
        self.engine.set_positions(&self.initial_positions)?;

        self.system = Some(system);
        self.phase = DriverPhase::SystemBuilt;
        Ok(())
    }

    /// Configures the thermostat and draws initial velocities.
    pub fn build_integrator(&mut self) -> Result<(), EngineError> {
        self.expect_phase(DriverPhase::SystemBuilt)?;

        self.engine.configure_integrator(
            self.config.temperature,
            self.config.friction,
            self.config.timestep,
        );
        self.engine.initialize_velocities(self.config.temperature);

        self.phase = DriverPhase::IntegratorReady;
        Ok(())
    }

    /// Runs the iteration loop to completion.
    ///
    /// Each iteration queries the engine state exactly once, scatters the
    /// xy projection onto the canvas, then advances the engine by the
    /// configured number of steps. A progress marker is emitted every
    /// `report_interval` iterations.
    pub fn run_loop(mut self) -> Result<SamplingResult, EngineError> {
        self.expect_phase(DriverPhase::IntegratorReady)?;
        self.phase = DriverPhase::Running;

        self.reporter.report(Progress::LoopStart {
            total_iterations: self.config.iterations as u64,
        });

        let mut frames = Vec::with_capacity(self.config.iterations);
        let mut last_positions = self.initial_positions.clone();

        for iteration in 0..self.config.iterations {
            last_positions = self.engine.positions();
            let points: Vec<(f64, f64)> = last_positions.iter().map(|p| (p.x, p.y)).collect();
            self.canvas.draw_scatter(&points);
            frames.push(Frame { iteration, points });

            self.engine.step(self.config.steps_per_iteration)?;

            if (iteration + 1) % self.config.report_interval == 0 {
                self.reporter.report(Progress::IterationBatch {
                    completed: (iteration + 1) as u64,
                });
            }
        }

        self.reporter.report(Progress::LoopFinish);

        if let Some(system) = &mut self.system {
            system.set_positions(&last_positions);
        }
        self.phase = DriverPhase::Done;

        info!(frames = frames.len(), "sampling loop finished");
        Ok(SamplingResult {
            frames,
            final_positions: last_positions,
        })
    }
}

/// Runs the complete sampling procedure: landscape render, placement,
/// system and integrator setup, then the iteration loop.
#[instrument(skip_all, name = "sampling_workflow")]
pub fn run<E: DynamicsEngine, C: PlotCanvas>(
    config: &SimulationConfig,
    plot: &PlotConfig,
    surface: &PotentialSurface,
    engine: E,
    canvas: &mut C,
    reporter: &ProgressReporter,
) -> Result<SamplingResult, EngineError> {
    // === Phase 0: Landscape ===
    reporter.report(Progress::PhaseStart { name: "Landscape" });
    surface.render(canvas, plot.bounds, plot.resolution);
    reporter.report(Progress::Message(format!(
        "landscape rendered on a {res}x{res} grid",
        res = plot.resolution
    )));
    reporter.report(Progress::PhaseFinish);

    // === Phases 1-3: Placement, system, integrator ===
    reporter.report(Progress::PhaseStart { name: "Setup" });
    let mut driver = SamplingDriver::new(config, engine, canvas, reporter);
    driver.initialize_positions()?;
    driver.build_system(surface)?;
    driver.build_integrator()?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 4: Sampling loop ===
    driver.run_loop()
}
