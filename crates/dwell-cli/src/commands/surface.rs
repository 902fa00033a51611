use crate::cli::SurfaceArgs;
use crate::config::{self, FileConfig};
use crate::error::Result;
use dwellmd::core::plot::chart::ChartCanvas;
use dwellmd::core::potential::surface::PotentialSurface;
use tracing::{info, instrument};

const OUTPUT_DIMENSIONS: (u32, u32) = (1024, 768);

#[instrument(skip_all, name = "surface_command")]
pub fn run(args: SurfaceArgs) -> Result<()> {
    let file = FileConfig::load_optional(args.config.as_deref())?;
    let plot = config::resolve_surface_plot(&file, &args)?;

    info!(
        resolution = plot.resolution,
        "rendering potential landscape"
    );

    let surface = PotentialSurface::default();
    let mut canvas = ChartCanvas::new(plot.bounds);
    surface.render(&mut canvas, plot.bounds, plot.resolution);

    canvas.save(&args.output, OUTPUT_DIMENSIONS)?;
    println!("Landscape written -> {}", args.output.display());

    Ok(())
}
