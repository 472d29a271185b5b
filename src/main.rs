/*
 * Boid Flocking Simulation
 *
 * This application simulates the flocking behavior of birds (boids) based on three main rules:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 *
 * Parameters come from defaults, an optional TOML file and command line flags,
 * in that order. The flock is shown in a window, or run headless for a fixed
 * number of ticks.
 */

use anyhow::{Context, Result};
use boid_flock::config::{self, ParamOverrides};
use boid_flock::{app, headless, UpdateOrder};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML file with simulation parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable smoothing of boid movements
    #[arg(long)]
    smooth: bool,

    /// Number of boids in the simulation
    #[arg(long, alias = "boids_num")]
    boids_num: Option<usize>,

    /// Size of each boid
    #[arg(long, alias = "boid_size")]
    boid_size: Option<f64>,

    /// Maximum speed of each boid
    #[arg(long, alias = "max_speed")]
    max_speed: Option<f64>,

    /// Time step for each simulation update
    #[arg(long, alias = "delta_time")]
    delta_time: Option<f64>,

    /// Separation radius for boid separation behavior
    #[arg(long, alias = "sep_radius")]
    sep_radius: Option<f64>,

    /// Alignment radius for boid alignment behavior
    #[arg(long, alias = "ali_radius")]
    ali_radius: Option<f64>,

    /// Cohesion radius for boid cohesion behavior
    #[arg(long, alias = "coh_radius")]
    coh_radius: Option<f64>,

    /// Scalar for the strength of the separation behavior
    #[arg(long, alias = "sep_scalar")]
    sep_scalar: Option<f64>,

    /// Scalar for the strength of the alignment behavior
    #[arg(long, alias = "ali_scalar")]
    ali_scalar: Option<f64>,

    /// Scalar for the strength of the cohesion behavior
    #[arg(long, alias = "coh_scalar")]
    coh_scalar: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Order in which a tick applies steering
    #[arg(long, value_enum)]
    update_order: Option<UpdateOrder>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the flock in a window (default)
    Window,

    /// Run without a window and log flock statistics
    Headless {
        #[arg(long, default_value_t = 300)]
        ticks: u64,
    },
}

impl Cli {
    fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            smooth: self.smooth,
            boids_num: self.boids_num,
            boid_size: self.boid_size,
            max_speed: self.max_speed,
            delta_time: self.delta_time,
            sep_radius: self.sep_radius,
            ali_radius: self.ali_radius,
            coh_radius: self.coh_radius,
            sep_scalar: self.sep_scalar,
            ali_scalar: self.ali_scalar,
            coh_scalar: self.coh_scalar,
            seed: self.seed,
            update_order: self.update_order,
        }
    }
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::debug!("{args:#?}");

    let params = config::resolve(args.config.as_deref(), &args.overrides())
        .context("failed to resolve parameters")?;
    log::info!("{params:#?}");

    match args.command.unwrap_or(Command::Window) {
        Command::Window => app::launch(params)?,
        Command::Headless { ticks } => {
            let sim = headless::run(params, ticks)?;
            log::info!("finished after {} ticks", sim.ticks());
        }
    }

    Ok(())
}
