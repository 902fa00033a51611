use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Dwell CLI - Langevin sampling of independent particles on an analytic double-well potential-energy surface.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a Langevin sampling trajectory and render it over the landscape.
    Run(RunArgs),
    /// Render the bare potential-energy landscape without sampling.
    Surface(SurfaceArgs),
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path for the output trajectory image.
    #[arg(short, long, value_name = "PATH", default_value = "trajectory.png")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Simulation Overrides ---
    /// Override the number of particles in the ensemble.
    #[arg(short = 'n', long, value_name = "INT")]
    pub particles: Option<usize>,

    /// Override the thermostat temperature (reduced units).
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub temperature: Option<f64>,

    /// Override the friction coefficient.
    #[arg(long, value_name = "FLOAT")]
    pub friction: Option<f64>,

    /// Override the integrator timestep.
    #[arg(long, value_name = "FLOAT")]
    pub timestep: Option<f64>,

    /// Override the number of plotted iterations.
    #[arg(long, value_name = "INT")]
    pub iterations: Option<usize>,

    /// Fix the random seed for a reproducible run.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `surface` subcommand.
#[derive(Args, Debug)]
pub struct SurfaceArgs {
    /// Path for the output landscape image.
    #[arg(short, long, value_name = "PATH", default_value = "landscape.png")]
    pub output: PathBuf,

    /// Path to an optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the contour grid resolution.
    #[arg(short, long, value_name = "INT")]
    pub resolution: Option<usize>,
}
