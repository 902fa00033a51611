use crate::cli::RunArgs;
use crate::config::{self, FileConfig, SimulationOverrides};
use crate::error::Result;
use crate::progress::CliProgressHandler;
use dwellmd::core::plot::chart::ChartCanvas;
use dwellmd::core::potential::surface::PotentialSurface;
use dwellmd::engine::langevin::LangevinIntegrator;
use dwellmd::engine::progress::ProgressReporter;
use dwellmd::workflows::sample;
use tracing::{info, instrument};

const OUTPUT_DIMENSIONS: (u32, u32) = (1024, 768);

#[instrument(skip_all, name = "run_command")]
pub fn run(args: RunArgs) -> Result<()> {
    let file = FileConfig::load_optional(args.config.as_deref())?;
    let sim = config::resolve_simulation(&file, &SimulationOverrides::from(&args))?;
    let plot = config::resolve_plot(&file, None)?;

    info!(
        n_particles = sim.n_particles,
        temperature = sim.temperature,
        iterations = sim.iterations,
        seed = ?sim.seed,
        "starting sampling run"
    );

    let surface = PotentialSurface::default();
    let engine = LangevinIntegrator::new(sim.seed.unwrap_or_else(rand::random));
    let mut canvas = ChartCanvas::new(plot.bounds);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let result = sample::run(&sim, &plot, &surface, engine, &mut canvas, &reporter)?;

    canvas.save(&args.output, OUTPUT_DIMENSIONS)?;
    info!(
        frames = result.frames.len(),
        output = %args.output.display(),
        "trajectory image written"
    );
    println!(
        "Recorded {} frames of {} particles -> {}",
        result.frames.len(),
        sim.n_particles,
        args.output.display()
    );

    Ok(())
}
